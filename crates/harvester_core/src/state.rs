use crate::{HarvestConfig, HarvestReport, RecordOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    FetchingPage,
    ProcessingPage,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestState {
    phase: Phase,
    offset: u64,
    page_size: u64,
    /// Raw length of the page being processed; the cursor advances by this.
    page_len: u64,
    report: HarvestReport,
}

impl HarvestState {
    pub fn new(start_offset: u64, page_size: u64) -> Self {
        Self {
            phase: Phase::Idle,
            offset: start_offset,
            page_size,
            page_len: 0,
            report: HarvestReport::default(),
        }
    }

    pub fn from_config(config: &HarvestConfig) -> Self {
        Self::new(config.start_offset, config.page_size)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn report(&self) -> HarvestReport {
        HarvestReport {
            final_offset: self.offset,
            ..self.report.clone()
        }
    }

    pub(crate) fn begin_fetch(&mut self) {
        self.phase = Phase::FetchingPage;
    }

    pub(crate) fn begin_page(&mut self, len: usize) {
        self.phase = Phase::ProcessingPage;
        self.page_len = len as u64;
        self.report.pages_fetched += 1;
    }

    pub(crate) fn skip_failed_page(&mut self, reason: String) {
        self.offset += self.page_size;
        self.report.listing_failures += 1;
        self.report.last_listing_failure = Some(reason);
    }

    pub(crate) fn advance_past_page(&mut self) {
        self.offset += self.page_len;
        self.page_len = 0;
        self.phase = Phase::FetchingPage;
    }

    pub(crate) fn finish(&mut self) {
        self.report.pages_fetched += 1;
        self.phase = Phase::Done;
    }

    pub(crate) fn tally(&mut self, outcome: &RecordOutcome) {
        let report = &mut self.report;
        match outcome {
            RecordOutcome::Rejected(_) => report.rejected += 1,
            RecordOutcome::AlreadyStored => report.already_stored += 1,
            RecordOutcome::Stored { empty_transcript } => {
                report.stored += 1;
                if *empty_transcript {
                    report.empty_transcripts += 1;
                }
            }
            RecordOutcome::TranscriptFailed => report.transcript_failures += 1,
        }
    }
}
