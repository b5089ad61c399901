use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "embedgate", version, about = "Embed gate CLI")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the embed gate server from environment configuration.
    Serve,

    /// Token operations.
    Token {
        #[command(subcommand)]
        cmd: commands::token::TokenCommand,
    },

    /// Generate a random signing secret.
    Secret {
        /// Number of random bytes (hex-encoded on output).
        #[arg(long, default_value_t = 32)]
        bytes: usize,
    },

    /// Load the environment configuration and report what was found.
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Serve => commands::serve::run().await,
        Command::Token { cmd } => commands::token::run(cmd),
        Command::Secret { bytes } => commands::secret::run(bytes),
        Command::Check => commands::check::run(),
    }
}
