use crate::{ListingRecord, Rejection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Begin the session at the configured start offset.
    Start,
    /// Listing call succeeded. An empty page means the history is exhausted.
    PageFetched { records: Vec<ListingRecord> },
    /// Listing call failed; the cursor skips one page width.
    PageFailed { reason: String },
    /// One record of the current page has been handled.
    RecordProcessed(RecordOutcome),
    /// Every record of the current page has been handled.
    PageProcessed,
}

/// What happened to a single listing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Rejected(Rejection),
    AlreadyStored,
    Stored { empty_transcript: bool },
    TranscriptFailed,
}
