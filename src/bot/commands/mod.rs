use teloxide::utils::command::BotCommands;

// Doc comments here would end up in the `/help` text, so the derive's own
// descriptions document the variants.
#[allow(missing_docs)]
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Sober Streak Bot commands:")]
pub enum Command {
    #[command(description = "Show how to start tracking")]
    Start,
    #[command(description = "Display this help message")]
    Help,
}
