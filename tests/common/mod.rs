//! In-process stand-in for the decision-support backend

use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use vgdss::client::{ClientConfig, DssClient};

pub const TOTAL_GAMES: u64 = 40;

/// One game per request; `Name` encodes genre and offset, `query` echoes
/// every parameter the client sent
async fn games(Query(params): Query<BTreeMap<String, String>>) -> Json<Value> {
    let echo: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    let genre = params.get("genre").map(String::as_str).unwrap_or("Any");
    let offset = params.get("offset").map(String::as_str).unwrap_or("0");

    Json(json!({
        "games": [{
            "Name": format!("{}-{}", genre, offset),
            "Platform": "PS4",
            "Year_of_Release": 2015.0,
            "Genre": genre,
            "Publisher": "Sony Computer Entertainment",
            "Global_Sales": 1.25,
            "Critic_Score": null,
            "query": echo.join("&"),
        }],
        "total": TOTAL_GAMES,
        "limit": params.get("limit").and_then(|v| v.parse::<u32>().ok()),
        "offset": params.get("offset").and_then(|v| v.parse::<u64>().ok()),
    }))
}

async fn predict(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["platform"] == "Atari" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": "Unknown platform: Atari"})),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "prediction": "Hit",
            "probabilities": {"Flop": 0.1, "Moderate": 0.3, "Hit": 0.6},
            "confidence": 0.6,
            "recommendations": [
                {"type": "success", "title": "Strong outlook", "message": "Ship it"}
            ],
            "input": body,
        })),
    )
}

pub fn router() -> Router {
    Router::new()
        .route(
            "/api/health",
            get(|| async { Json(json!({"status": "healthy", "message": "ok"})) }),
        )
        .route(
            "/api/metadata",
            get(|| async {
                Json(json!({
                    "platforms": ["PS4", "Wii"],
                    "genres": ["Action", "Sports"],
                    "publishers": ["Nintendo"],
                    "feature_importance": [
                        {"Feature": "Critic_Score", "Importance": 0.4},
                        {"Feature": "Platform_Encoded", "Importance": 0.2}
                    ],
                    "model_accuracy": 0.82,
                }))
            }),
        )
        .route("/api/games", get(games))
        .route("/api/predict", post(predict))
        .route(
            "/api/analytics/rules",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "rules not mined") }),
        )
}

/// Serve the stub on an ephemeral port
pub async fn spawn_backend() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router()).await.unwrap();
    });
    addr
}

pub fn client_for(addr: SocketAddr) -> DssClient {
    DssClient::new(ClientConfig {
        base_url: format!("http://{}/", addr),
        request_timeout_ms: 2_000,
    })
    .unwrap()
}
