use std::collections::BTreeSet;
use std::fmt;

use crate::{HarvestConfig, ListingRecord};

/// Why a listing record was left out of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Game id, winner or one of the two players is missing.
    Incomplete,
    Lexicon(Option<String>),
    BoardLayout(Option<String>),
    EndReason(Option<String>),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Incomplete => write!(f, "incomplete listing entry"),
            Rejection::Lexicon(value) => write!(f, "lexicon {value:?} not allowed"),
            Rejection::BoardLayout(value) => write!(f, "board layout {value:?} not standard"),
            Rejection::EndReason(value) => write!(f, "end reason {value:?} not standard"),
        }
    }
}

/// Scope predicate over listing records. Stateless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameFilter {
    allowed_lexicons: BTreeSet<String>,
    standard_layout: String,
    standard_end_reason: String,
}

impl GameFilter {
    pub fn new(
        allowed_lexicons: impl IntoIterator<Item = impl Into<String>>,
        standard_layout: impl Into<String>,
        standard_end_reason: impl Into<String>,
    ) -> Self {
        Self {
            allowed_lexicons: allowed_lexicons.into_iter().map(Into::into).collect(),
            standard_layout: standard_layout.into(),
            standard_end_reason: standard_end_reason.into(),
        }
    }

    pub fn from_config(config: &HarvestConfig) -> Self {
        Self {
            allowed_lexicons: config.allowed_lexicons.clone(),
            standard_layout: config.standard_layout.clone(),
            standard_end_reason: config.standard_end_reason.clone(),
        }
    }

    pub fn admit(&self, record: &ListingRecord) -> bool {
        self.rejection(record).is_none()
    }

    /// First condition the record fails, or `None` if it is in scope.
    pub fn rejection(&self, record: &ListingRecord) -> Option<Rejection> {
        if record.game_id.is_empty() || record.winner.is_none() || record.player_pair().is_none() {
            return Some(Rejection::Incomplete);
        }
        let lexicon = record.lexicon.as_deref();
        if !lexicon.is_some_and(|lex| self.allowed_lexicons.contains(lex)) {
            return Some(Rejection::Lexicon(record.lexicon.clone()));
        }
        if record.board_layout.as_deref() != Some(self.standard_layout.as_str()) {
            return Some(Rejection::BoardLayout(record.board_layout.clone()));
        }
        if record.end_reason.as_deref() != Some(self.standard_end_reason.as_str()) {
            return Some(Rejection::EndReason(record.end_reason.clone()));
        }
        None
    }
}
