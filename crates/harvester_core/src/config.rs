use std::collections::BTreeSet;
use std::time::Duration;

pub const DEFAULT_PAGE_SIZE: u64 = 1000;
pub const DEFAULT_INTER_RECORD_DELAY: Duration = Duration::from_millis(50);
pub const DEFAULT_LEXICONS: [&str; 2] = ["CSW24", "NWL23"];
pub const DEFAULT_STANDARD_LAYOUT: &str = "CrosswordGame";
pub const DEFAULT_END_REASON: &str = "STANDARD";

/// Everything a harvest session needs to know up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestConfig {
    pub username: String,
    /// Offset the cursor starts from. The cursor itself is never persisted.
    pub start_offset: u64,
    pub page_size: u64,
    /// Pause after every detail fetch.
    pub inter_record_delay: Duration,
    pub allowed_lexicons: BTreeSet<String>,
    pub standard_layout: String,
    pub standard_end_reason: String,
}

impl HarvestConfig {
    pub fn for_user(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            start_offset: 0,
            page_size: DEFAULT_PAGE_SIZE,
            inter_record_delay: DEFAULT_INTER_RECORD_DELAY,
            allowed_lexicons: DEFAULT_LEXICONS.iter().map(|s| s.to_string()).collect(),
            standard_layout: DEFAULT_STANDARD_LAYOUT.to_string(),
            standard_end_reason: DEFAULT_END_REASON.to_string(),
        }
    }
}
