pub mod callback;
pub mod message;

use teloxide::dispatching::{dialogue, UpdateHandler};
use teloxide::prelude::*;

use crate::bot::commands::Command;
use crate::bot::dialogue::PendingInput;

/// Update routing: commands first, then plain text (keyboard buttons and
/// pending-input replies), then callback buttons. The dialogue layer
/// injects the per-chat [`PendingInput`] state.
pub fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::UpdateFilterExt;

    dialogue::enter::<Update, teloxide::dispatching::dialogue::InMemStorage<PendingInput>, PendingInput, _>()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(message::command_handler),
        )
        .branch(Update::filter_message().endpoint(message::text_handler))
        .branch(Update::filter_callback_query().endpoint(callback::callback_handler))
}
