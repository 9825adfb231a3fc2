use anyhow::Result;
use clap::{Parser, Subcommand};

use chisel::commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Scaffold subcommands into bootstrapped CLI projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a nested subcommand to the current project
    Add {
        /// Command path segments, e.g. `config set`
        #[arg(required = true)]
        segments: Vec<String>,

        /// Disable colorized status output
        #[arg(long)]
        no_color: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Add { segments, no_color } => {
            let exit_code = commands::add::execute(segments, no_color)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
