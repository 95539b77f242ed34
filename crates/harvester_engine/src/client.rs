use std::time::Duration;

use engine_logging::engine_warn;
use futures_util::StreamExt;
use harvester_core::ListingRecord;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{FailureKind, NetworkError};

pub const DEFAULT_BASE_URL: &str = "https://woogles.io/api/game_service.GameMetadataService";

#[derive(Debug, Clone)]
pub struct RemoteSettings {
    /// Service prefix; method names are appended as path segments.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 64 * 1024 * 1024,
        }
    }
}

/// Remote game history. Implementations do not retry.
#[async_trait::async_trait]
pub trait GameSource: Send + Sync {
    /// One listing page starting at `offset`, in service order. Empty means exhausted.
    async fn list_games(
        &self,
        username: &str,
        offset: u64,
        page_size: u64,
    ) -> Result<Vec<ListingRecord>, NetworkError>;

    /// GCG transcript for one game; `""` when the service has none.
    async fn fetch_transcript(&self, game_id: &str) -> Result<String, NetworkError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecentGamesRequest<'a> {
    username: &'a str,
    num_games: u64,
    offset: u64,
}

#[derive(Deserialize)]
struct RecentGamesResponse {
    /// Entries are decoded one by one so a single bad entry cannot sink the page.
    #[serde(default)]
    game_info: Vec<Value>,
}

#[derive(Deserialize)]
struct WireGameInfo {
    #[serde(default)]
    game_id: String,
    winner: Option<i64>,
    #[serde(default)]
    players: Vec<WirePlayer>,
    game_request: Option<WireGameRequest>,
    game_end_reason: Option<String>,
}

#[derive(Deserialize)]
struct WirePlayer {
    #[serde(default)]
    nickname: String,
}

#[derive(Deserialize)]
struct WireGameRequest {
    lexicon: Option<String>,
    rules: Option<WireRules>,
}

#[derive(Deserialize)]
struct WireRules {
    board_layout_name: Option<String>,
}

#[derive(Serialize)]
struct GcgRequest<'a> {
    game_id: &'a str,
}

#[derive(Deserialize)]
struct GcgResponse {
    #[serde(default)]
    gcg: String,
}

impl From<WireGameInfo> for ListingRecord {
    fn from(info: WireGameInfo) -> Self {
        let (lexicon, board_layout) = match info.game_request {
            Some(request) => (
                request.lexicon,
                request.rules.and_then(|rules| rules.board_layout_name),
            ),
            None => (None, None),
        };
        ListingRecord {
            game_id: info.game_id,
            winner: info.winner,
            players: info.players.into_iter().map(|p| p.nickname).collect(),
            lexicon,
            board_layout,
            end_reason: info.game_end_reason,
        }
    }
}

/// `GameSource` backed by the Woogles JSON API.
#[derive(Debug, Clone)]
pub struct WooglesClient {
    settings: RemoteSettings,
    client: reqwest::Client,
}

impl WooglesClient {
    pub fn new(settings: RemoteSettings) -> Result<Self, NetworkError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| NetworkError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn call<Req, Resp>(&self, method: &str, request: &Req) -> Result<Resp, NetworkError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}/{}", self.settings.base_url.trim_end_matches('/'), method);
        let parsed = reqwest::Url::parse(&url)
            .map_err(|err| NetworkError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let body = serde_json::to_vec(request)
            .map_err(|err| NetworkError::new(FailureKind::Payload, err.to_string()))?;

        let response = self
            .client
            .post(parsed)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&bytes)
            .map_err(|err| NetworkError::new(FailureKind::Payload, err.to_string()))
    }
}

#[async_trait::async_trait]
impl GameSource for WooglesClient {
    async fn list_games(
        &self,
        username: &str,
        offset: u64,
        page_size: u64,
    ) -> Result<Vec<ListingRecord>, NetworkError> {
        let request = RecentGamesRequest {
            username,
            num_games: page_size,
            offset,
        };
        let response: RecentGamesResponse = self.call("GetRecentGames", &request).await?;
        Ok(response.game_info.into_iter().map(decode_entry).collect())
    }

    async fn fetch_transcript(&self, game_id: &str) -> Result<String, NetworkError> {
        let response: GcgResponse = self.call("GetGCG", &GcgRequest { game_id }).await?;
        Ok(response.gcg)
    }
}

/// Unreadable entries keep only their id (when present) and fall to the filter
/// as incomplete.
fn decode_entry(entry: Value) -> ListingRecord {
    let game_id = entry
        .get("game_id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    match serde_json::from_value::<WireGameInfo>(entry) {
        Ok(info) => ListingRecord::from(info),
        Err(err) => {
            engine_warn!("Unreadable listing entry {:?}: {}", game_id, err);
            ListingRecord {
                game_id,
                ..ListingRecord::default()
            }
        }
    }
}

fn too_large(max_bytes: u64, actual: u64) -> NetworkError {
    NetworkError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> NetworkError {
    if err.is_timeout() {
        return NetworkError::new(FailureKind::Timeout, err.to_string());
    }
    NetworkError::new(FailureKind::Network, err.to_string())
}
