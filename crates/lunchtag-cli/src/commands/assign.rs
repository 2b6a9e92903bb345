use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use lunchtag_core::RunProvenance;
use lunchtag_engine::{assign, AssignConfig, AssignmentReport, OverflowPolicy};
use lunchtag_io::{
    history_hash, load_history, load_roster, roster_hash, save_assignment, write_report,
    RosterColumns,
};

#[derive(Args, Debug)]
pub struct AssignArgs {
    /// Signup CSV with a header row.
    #[arg(long)]
    pub signups: PathBuf,
    /// Column holding each participant's unique identifier.
    #[arg(long = "id", value_name = "COLUMN")]
    pub id_column: String,
    /// Column to balance groups across.
    #[arg(long, value_name = "COLUMN")]
    pub stratify_by: Option<String>,
    /// Glob pattern(s) matching earlier assignment files.
    #[arg(long = "history", value_name = "GLOB")]
    pub history: Vec<String>,
    /// YAML configuration; flags below override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Group size (minimum size when overflow is allowed).
    #[arg(long)]
    pub group_size: Option<usize>,
    /// Leave participants who do not fit evenly out of every group.
    #[arg(long, conflicts_with = "overflow")]
    pub no_overflow: bool,
    /// Per-stratum overflow flag, e.g. `--overflow eng=true`.
    #[arg(long, value_name = "STRATUM=BOOL", value_parser = parse_overflow_entry)]
    pub overflow: Vec<(String, bool)>,
    /// Maximum number of sampling attempts.
    #[arg(long)]
    pub max_attempts: Option<usize>,
    /// Master seed for a reproducible draw.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Output assignment CSV.
    #[arg(long)]
    pub out: PathBuf,
    /// Optional JSON report with provenance.
    #[arg(long)]
    pub report: Option<PathBuf>,
}

fn parse_overflow_entry(raw: &str) -> Result<(String, bool), String> {
    let (name, flag) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected STRATUM=BOOL, got '{raw}'"))?;
    let flag = flag
        .trim()
        .parse::<bool>()
        .map_err(|err| format!("invalid overflow flag for '{name}': {err}"))?;
    Ok((name.trim().to_string(), flag))
}

pub(crate) fn resolve_config(args: &AssignArgs) -> Result<AssignConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => AssignConfig::from_yaml_slice(&fs::read(path)?)?,
        None => AssignConfig::default(),
    };
    if let Some(group_size) = args.group_size {
        config.group_size = group_size;
    }
    if args.stratify_by.is_some() {
        config.stratify_by = args.stratify_by.clone();
    }
    if !args.overflow.is_empty() {
        let map: BTreeMap<String, bool> = args.overflow.iter().cloned().collect();
        config.overflow = OverflowPolicy::PerStratum(map);
    } else if args.no_overflow {
        config.overflow = OverflowPolicy::Uniform(false);
    }
    if let Some(max_attempts) = args.max_attempts {
        config.max_attempts = max_attempts;
    }
    if args.seed.is_some() {
        config.seed_policy.master_seed = args.seed;
    }
    Ok(config)
}

pub fn run(args: &AssignArgs) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(args)?;
    let mut columns = RosterColumns::new(&args.id_column);
    if let Some(column) = &config.stratify_by {
        columns = columns.with_stratum(column);
    }
    let roster = load_roster(&args.signups, &columns)?;
    let history = load_history(&args.history)?;

    let outcome = assign(&roster, &history.groups, &config)?;
    save_assignment(&args.out, &outcome.groups)?;

    if let Some(report_path) = &args.report {
        let provenance = RunProvenance {
            roster_hash: roster_hash(&roster)?,
            history_hash: history_hash(&history.groups)?,
            history_files: history
                .files
                .iter()
                .map(|path| path.display().to_string())
                .collect(),
            seed: outcome.seed,
            created_at: chrono::Utc::now().to_rfc3339(),
            tool_versions: [(
                env!("CARGO_PKG_NAME").to_string(),
                env!("CARGO_PKG_VERSION").to_string(),
            )]
            .into_iter()
            .collect(),
        };
        write_report(report_path, &AssignmentReport::new(&outcome, &config, provenance))?;
    }

    for group in &outcome.groups {
        println!("{}", group.joined());
    }
    Ok(())
}
