use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    assign::{self, AssignArgs},
    check::{self, CheckArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "lunchtag", about = "Repeat-avoiding lunch tag group assignment")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw a new round of groups from a signup file.
    Assign(AssignArgs),
    /// Check an existing assignment file against the history.
    Check(CheckArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Assign(args) => assign::run(&args),
        Command::Check(args) => check::run(&args),
    }
}
