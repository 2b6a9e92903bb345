#![deny(missing_docs)]
#![doc = "Core types, errors and seeding helpers shared by the lunchtag crates."]

pub mod errors;
pub mod provenance;
pub mod rng;
mod types;

pub use errors::{ErrorInfo, LunchError};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, fresh_master_seed, RngHandle};
pub use types::{Group, Participant, ParticipantId, Roster, ID_DELIMITER};
