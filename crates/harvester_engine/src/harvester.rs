use std::collections::VecDeque;

use engine_logging::{engine_debug, engine_info, engine_warn};
use harvester_core::{
    update, Effect, GameFilter, HarvestConfig, HarvestReport, HarvestState, ListingRecord, Msg,
    RecordOutcome, Rejection,
};

use crate::{GameRecord, GameSource, GameStore, StorageError};

/// Drives one harvest session: executes the effects of the core state machine
/// against a [`GameSource`] and a [`GameStore`], one call at a time.
pub struct Harvester<'a> {
    source: &'a dyn GameSource,
    store: Option<GameStore>,
    filter: GameFilter,
    config: HarvestConfig,
}

impl<'a> Harvester<'a> {
    pub fn new(source: &'a dyn GameSource, store: GameStore, config: HarvestConfig) -> Self {
        Self {
            source,
            store: Some(store),
            filter: GameFilter::from_config(&config),
            config,
        }
    }

    /// Run until the listing is exhausted. The store is closed on the way out.
    ///
    /// Network failures never end the session; storage failures do.
    pub async fn run(mut self) -> Result<HarvestReport, StorageError> {
        let mut state = HarvestState::from_config(&self.config);
        let mut inbox = VecDeque::from([Msg::Start]);

        while let Some(msg) = inbox.pop_front() {
            let (next, effects) = update(state, msg);
            state = next;
            for effect in effects {
                self.execute(effect, &mut inbox).await?;
            }
        }

        Ok(state.report())
    }

    async fn execute(
        &mut self,
        effect: Effect,
        inbox: &mut VecDeque<Msg>,
    ) -> Result<(), StorageError> {
        match effect {
            Effect::FetchPage { offset } => {
                engine_info!("Fetching games for {}, offset {}", self.config.username, offset);
                let result = self
                    .source
                    .list_games(&self.config.username, offset, self.config.page_size)
                    .await;
                match result {
                    Ok(records) => inbox.push_back(Msg::PageFetched { records }),
                    Err(err) => {
                        engine_warn!("Failed fetching at offset {}: {}", offset, err);
                        inbox.push_back(Msg::PageFailed {
                            reason: err.to_string(),
                        });
                    }
                }
            }
            Effect::ProcessPage { records } => {
                for record in &records {
                    let outcome = self.process_record(record).await?;
                    inbox.push_back(Msg::RecordProcessed(outcome));
                }
                inbox.push_back(Msg::PageProcessed);
            }
            Effect::CloseStore => {
                engine_info!("No more games for {}", self.config.username);
                if let Some(store) = self.store.take() {
                    store.close()?;
                }
            }
        }
        Ok(())
    }

    async fn process_record(
        &mut self,
        record: &ListingRecord,
    ) -> Result<RecordOutcome, StorageError> {
        if let Some(rejection) = self.filter.rejection(record) {
            engine_debug!("Skipping {}: {}", record.game_id, rejection);
            return Ok(RecordOutcome::Rejected(rejection));
        }
        // Presence was checked by the filter; this only unpacks the fields.
        let (Some(winner), Some((player1, player2))) = (record.winner, record.player_pair()) else {
            return Ok(RecordOutcome::Rejected(Rejection::Incomplete));
        };

        if self.store_mut()?.exists(&record.game_id)? {
            engine_debug!("{} already exists", record.game_id);
            return Ok(RecordOutcome::AlreadyStored);
        }

        engine_info!(
            "Fetching {}: {} vs {}, winner: {}",
            record.game_id,
            player1,
            player2,
            winner
        );
        let outcome = match self.source.fetch_transcript(&record.game_id).await {
            Ok(transcript) => {
                let game = GameRecord {
                    game_id: record.game_id.clone(),
                    winner,
                    transcript,
                    player1: player1.to_string(),
                    player2: player2.to_string(),
                };
                let store = self.store_mut()?;
                store.insert_if_absent(&game)?;
                store.commit()?;
                RecordOutcome::Stored {
                    empty_transcript: game.transcript.is_empty(),
                }
            }
            Err(err) => {
                // Left out of the store so a later run picks it up again.
                engine_warn!("Failed fetching transcript for {}: {}", record.game_id, err);
                RecordOutcome::TranscriptFailed
            }
        };

        tokio::time::sleep(self.config.inter_record_delay).await;
        Ok(outcome)
    }

    fn store_mut(&mut self) -> Result<&mut GameStore, StorageError> {
        self.store.as_mut().ok_or(StorageError::Closed)
    }
}
