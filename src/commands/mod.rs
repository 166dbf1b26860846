pub mod init;
pub mod issues;
pub mod track;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "List unresolved Jira issues assigned to you")]
    Issues,
    #[command(about = "Track time on an issue and log it to Jira", arg_required_else_help = true)]
    Track(track::TrackArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Issues => issues::cmd().await,
            Commands::Track(args) => track::cmd(args).await,
        }
    }
}
