/// Session summary, updated as messages arrive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HarvestReport {
    pub final_offset: u64,
    pub pages_fetched: u64,
    pub listing_failures: u64,
    /// Reason given for the most recent listing failure.
    pub last_listing_failure: Option<String>,
    pub rejected: u64,
    pub already_stored: u64,
    pub stored: u64,
    pub empty_transcripts: u64,
    pub transcript_failures: u64,
}
