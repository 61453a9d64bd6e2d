pub mod commands;
pub mod dialogue;
pub mod handlers;
pub mod keyboards;

pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;
