/// One game summary from a listing page.
///
/// Fields the service left out are `None` (or an empty `players` list) so the
/// filter can reject the record instead of decoding failing for the page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingRecord {
    pub game_id: String,
    pub winner: Option<i64>,
    /// Display names in service order; index matches `winner`.
    pub players: Vec<String>,
    pub lexicon: Option<String>,
    pub board_layout: Option<String>,
    pub end_reason: Option<String>,
}

impl ListingRecord {
    /// The two participants, if the listing carried both.
    pub fn player_pair(&self) -> Option<(&str, &str)> {
        match self.players.as_slice() {
            [first, second, ..] => Some((first.as_str(), second.as_str())),
            _ => None,
        }
    }
}
