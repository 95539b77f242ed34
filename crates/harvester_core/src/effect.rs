use crate::ListingRecord;

/// Work the driver must perform on behalf of the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPage { offset: u64 },
    ProcessPage { records: Vec<ListingRecord> },
    CloseStore,
}
