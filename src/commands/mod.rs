pub mod init;
pub mod migrations;
pub mod serve;
pub mod task;
pub mod user;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Start the HTTP API server")]
    Serve(serve::ServeArgs),
    #[command(about = "Manage API users and their tokens", arg_required_else_help = true)]
    User(user::UserArgs),
    #[command(about = "List a user's tasks", arg_required_else_help = true)]
    Task(task::TaskArgs),
    #[command(about = "Inspect database migrations", arg_required_else_help = true)]
    Migrations(migrations::MigrationsArgs),
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
            Commands::Serve(args) => serve::cmd(args).await,
            Commands::User(args) => user::cmd(args),
            Commands::Task(args) => task::cmd(args),
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}
