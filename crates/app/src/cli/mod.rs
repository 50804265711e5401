use clap::{Parser, Subcommand};

mod admin;

#[derive(Debug, Parser)]
#[command(name = "atelier-app", about = "Atelier operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Admin(admin::AdminCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Admin(command) => admin::run(command).await,
        }
    }
}
