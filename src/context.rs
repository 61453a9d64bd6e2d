use std::sync::Arc;

use crate::database::connection::DatabaseManager;
use crate::plan::PlanStore;

/// Shared dependencies handed to every handler and service.
///
/// Initialized once at startup and cloned into the dispatcher; there are
/// no global handles.
#[derive(Clone)]
pub struct AppContext {
    pub db: DatabaseManager,
    pub plan: Arc<PlanStore>,
    /// Chat where completions are announced, if configured.
    pub group_chat_id: Option<i64>,
}

impl AppContext {
    pub fn new(db: DatabaseManager, plan: Arc<PlanStore>, group_chat_id: Option<i64>) -> Self {
        Self {
            db,
            plan,
            group_chat_id,
        }
    }
}
