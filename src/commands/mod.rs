use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Deal a new board (or restart the current one)")]
    Play,
    #[command(description = "Show the current board again")]
    Board,
    #[command(description = "Show help message")]
    Help,
}
