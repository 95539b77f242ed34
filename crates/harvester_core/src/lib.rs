//! Harvester core: pure pagination state machine, listing filter and configuration.
mod config;
mod effect;
mod filter;
mod msg;
mod record;
mod report;
mod state;
mod update;

pub use config::{
    HarvestConfig, DEFAULT_END_REASON, DEFAULT_INTER_RECORD_DELAY, DEFAULT_LEXICONS,
    DEFAULT_PAGE_SIZE, DEFAULT_STANDARD_LAYOUT,
};
pub use effect::Effect;
pub use filter::{GameFilter, Rejection};
pub use msg::{Msg, RecordOutcome};
pub use record::ListingRecord;
pub use report::HarvestReport;
pub use state::{HarvestState, Phase};
pub use update::update;
