//! Flat-file record I/O for lunchtag: signups in, history in, assignments out.

pub mod assignment;
pub mod hash;
pub mod history;
pub mod report;
pub mod roster;
pub mod serde;

pub use assignment::{
    read_assignment, read_assignment_file, save_assignment, write_assignment, IDS_COLUMN,
};
pub use hash::{history_hash, roster_hash, stable_hash_string};
pub use history::{load_history, History};
pub use report::{load_report, write_report};
pub use roster::{load_roster, read_roster, RosterColumns};
pub use self::serde::{from_json_slice, to_canonical_json_bytes};
