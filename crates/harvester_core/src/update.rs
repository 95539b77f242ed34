use crate::{Effect, HarvestState, Msg, Phase};

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages that do not belong to the current phase leave the state untouched.
pub fn update(mut state: HarvestState, msg: Msg) -> (HarvestState, Vec<Effect>) {
    let effects = match (state.phase(), msg) {
        (Phase::Idle, Msg::Start) => {
            state.begin_fetch();
            vec![Effect::FetchPage {
                offset: state.offset(),
            }]
        }
        (Phase::FetchingPage, Msg::PageFetched { records }) => {
            if records.is_empty() {
                state.finish();
                vec![Effect::CloseStore]
            } else {
                state.begin_page(records.len());
                vec![Effect::ProcessPage { records }]
            }
        }
        (Phase::FetchingPage, Msg::PageFailed { reason }) => {
            // Skip ahead instead of retrying so a permanently bad offset
            // cannot stall the session.
            state.skip_failed_page(reason);
            vec![Effect::FetchPage {
                offset: state.offset(),
            }]
        }
        (Phase::ProcessingPage, Msg::RecordProcessed(outcome)) => {
            state.tally(&outcome);
            Vec::new()
        }
        (Phase::ProcessingPage, Msg::PageProcessed) => {
            state.advance_past_page();
            vec![Effect::FetchPage {
                offset: state.offset(),
            }]
        }
        _ => Vec::new(),
    };

    (state, effects)
}
