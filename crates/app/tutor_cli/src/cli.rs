use clap::{Parser, Subcommand};
use tutor_client::client::DEFAULT_BASE_URL;

#[derive(Parser, Debug)]
#[command(name = "tutor_cli", about = "Chat with the AI tutor from the terminal")]
pub struct Cli {
    /// Base URL of the tutor relay.
    #[arg(long, env = "TUTOR_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Pause between revealed characters, in milliseconds.
    #[arg(long, default_value_t = 20, global = true)]
    pub delay_ms: u64,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive chat (default). Ctrl-C stops a reply, Ctrl-D or /quit exits.
    Chat,
    /// Ask a single question and print the reply.
    Ask {
        /// The question to ask.
        question: String,

        /// Print the finished reply as a JSON message record instead of revealing it.
        #[arg(long)]
        json: bool,
    },
    /// Print the version.
    Version,
}
