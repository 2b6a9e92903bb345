use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use lunchtag_engine::find_repeats;
use lunchtag_io::{load_history, read_assignment_file};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Assignment CSV to check.
    #[arg(long)]
    pub assignment: PathBuf,
    /// Glob pattern(s) matching earlier assignment files.
    #[arg(long = "history", value_name = "GLOB", required = true)]
    pub history: Vec<String>,
}

pub fn run(args: &CheckArgs) -> Result<(), Box<dyn Error>> {
    let groups = read_assignment_file(&args.assignment)?;
    // The checked file may itself match a history pattern.
    let history = load_history(&args.history)?.excluding(&args.assignment);

    let repeats = find_repeats(&groups, &history.groups);
    for violation in &repeats {
        println!("{violation}");
    }
    if repeats.is_empty() {
        println!(
            "no repeats across {} groups and {} prior groups",
            groups.len(),
            history.groups.len()
        );
        Ok(())
    } else {
        Err(format!("{} repeat violation(s) found", repeats.len()).into())
    }
}
