/// Yes/No button presses.
pub mod callback;
/// Commands and date text.
pub mod message;

use teloxide::{dispatching::UpdateHandler, prelude::*};
use crate::bot::commands::Command;
use crate::context::AppContext;
use crate::utils::validation::is_date_shaped;

/// Error type shared by every endpoint in the dispatch tree.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;
/// Result returned by every endpoint.
pub type HandlerResult = Result<(), HandlerError>;

/// Builds the dispatch tree around a shared [`AppContext`].
pub struct BotHandler {
    /// Context cloned into the endpoints that need the store.
    pub ctx: AppContext,
}

impl BotHandler {
    /// Creates a handler over the given context.
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// Dispatch table: commands, then date-shaped text, then button presses.
    /// Any other update falls through and is ignored.
    pub fn schema(&self) -> UpdateHandler<HandlerError> {
        let ctx_date = self.ctx.clone();
        let ctx_callback = self.ctx.clone();

        dptree::entry()
            .branch(
                Update::filter_message()
                    .branch(
                        dptree::entry()
                            .filter_command::<Command>()
                            .endpoint(message::command_handler),
                    )
                    .branch(
                        dptree::filter(|msg: Message| msg.text().is_some_and(is_date_shaped))
                            .endpoint(move |bot, msg| {
                                let ctx = ctx_date.clone();
                                async move { message::date_handler(bot, msg, ctx).await }
                            }),
                    ),
            )
            .branch(Update::filter_callback_query().endpoint(move |bot, q| {
                let ctx = ctx_callback.clone();
                async move { callback::callback_handler(bot, q, ctx).await }
            }))
    }
}
