use std::time::Duration;

use harvester_engine::{FailureKind, GameSource, RemoteSettings, WooglesClient};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SERVICE: &str = "/api/game_service.GameMetadataService";

fn client_for(server: &MockServer) -> WooglesClient {
    let settings = RemoteSettings {
        base_url: format!("{}{}", server.uri(), SERVICE),
        ..RemoteSettings::default()
    };
    WooglesClient::new(settings).expect("client builds")
}

#[tokio::test]
async fn list_games_posts_paging_request_and_maps_entries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{SERVICE}/GetRecentGames")))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "username": "HastyBot",
            "numGames": 1000,
            "offset": 2000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "game_info": [
                {
                    "game_id": "SUKyN5ec",
                    "winner": 0,
                    "players": [{"nickname": "HastyBot"}, {"nickname": "marvin"}],
                    "game_request": {
                        "lexicon": "CSW24",
                        "rules": {"board_layout_name": "CrosswordGame"}
                    },
                    "game_end_reason": "STANDARD"
                },
                {
                    "game_id": "bare"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let games = client_for(&server)
        .list_games("HastyBot", 2000, 1000)
        .await
        .expect("listing ok");

    assert_eq!(games.len(), 2);
    assert_eq!(games[0].game_id, "SUKyN5ec");
    assert_eq!(games[0].winner, Some(0));
    assert_eq!(games[0].players, vec!["HastyBot", "marvin"]);
    assert_eq!(games[0].lexicon.as_deref(), Some("CSW24"));
    assert_eq!(games[0].board_layout.as_deref(), Some("CrosswordGame"));
    assert_eq!(games[0].end_reason.as_deref(), Some("STANDARD"));

    assert_eq!(games[1].game_id, "bare");
    assert_eq!(games[1].winner, None);
    assert!(games[1].players.is_empty());
    assert_eq!(games[1].lexicon, None);
}

#[tokio::test]
async fn missing_game_info_is_an_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{SERVICE}/GetRecentGames")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let games = client_for(&server)
        .list_games("nobody", 0, 1000)
        .await
        .expect("listing ok");
    assert!(games.is_empty());
}

#[tokio::test]
async fn fetch_transcript_returns_gcg_or_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{SERVICE}/GetGCG")))
        .and(body_json(json!({"game_id": "SUKyN5ec"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "gcg": "#character-encoding UTF-8\n>HastyBot: DIOTTUV 8D DIVOT +22 22\n"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{SERVICE}/GetGCG")))
        .and(body_json(json!({"game_id": "nogcg"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let gcg = client.fetch_transcript("SUKyN5ec").await.expect("gcg ok");
    assert!(gcg.contains("DIVOT +22 22"));

    let empty = client.fetch_transcript("nogcg").await.expect("empty gcg ok");
    assert_eq!(empty, "");
}

#[tokio::test]
async fn non_success_status_is_a_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_games("HastyBot", 0, 1000)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
}

#[tokio::test]
async fn malformed_body_is_a_payload_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_transcript("SUKyN5ec")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Payload);
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"game_info": []})),
        )
        .mount(&server)
        .await;

    let settings = RemoteSettings {
        base_url: format!("{}{}", server.uri(), SERVICE),
        request_timeout: Duration::from_millis(50),
        ..RemoteSettings::default()
    };
    let client = WooglesClient::new(settings).expect("client builds");

    let err = client.list_games("HastyBot", 0, 1000).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"gcg": "0123456789"})))
        .mount(&server)
        .await;

    let settings = RemoteSettings {
        base_url: format!("{}{}", server.uri(), SERVICE),
        max_bytes: 8,
        ..RemoteSettings::default()
    };
    let client = WooglesClient::new(settings).expect("client builds");

    let err = client.fetch_transcript("big").await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::TooLarge { max_bytes: 8, .. }));
}

#[tokio::test]
async fn unparsable_base_url_is_rejected() {
    let settings = RemoteSettings {
        base_url: "not a url".to_string(),
        ..RemoteSettings::default()
    };
    let client = WooglesClient::new(settings).expect("client builds");

    let err = client.list_games("HastyBot", 0, 1000).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test]
async fn unreadable_entry_does_not_sink_its_page() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{SERVICE}/GetRecentGames")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "game_info": [
                {
                    "game_id": "GOOD",
                    "winner": 1,
                    "players": [{"nickname": "HastyBot"}, {"nickname": "marvin"}],
                    "game_request": {
                        "lexicon": "NWL23",
                        "rules": {"board_layout_name": "CrosswordGame"}
                    },
                    "game_end_reason": "STANDARD"
                },
                {"game_id": "BAD", "players": null},
                {"game_id": null, "winner": 0},
                {"game_id": "ODD", "game_request": {"lexicon": 24}}
            ]
        })))
        .mount(&server)
        .await;

    let games = client_for(&server)
        .list_games("HastyBot", 0, 1000)
        .await
        .expect("listing ok");

    assert_eq!(games.len(), 4);
    assert_eq!(games[0].game_id, "GOOD");
    assert_eq!(games[0].lexicon.as_deref(), Some("NWL23"));
    assert_eq!(games[1].game_id, "BAD");
    assert!(games[1].players.is_empty());
    assert_eq!(games[1].winner, None);
    assert_eq!(games[2].game_id, "");
    assert_eq!(games[3].game_id, "ODD");
    assert_eq!(games[3].lexicon, None);
}
