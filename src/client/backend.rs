//! Decision-support REST client
//!
//! HTTP client for the video-game sales backend.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use super::dto::{
    AnalyticsSummary, AssociationRule, Game, GamesPage, HealthResponse, Metadata,
    PredictionRequest, PredictionResponse,
};
use super::error::{ClientError, ClientResult};
use crate::explorer::GamesQuery;

/// Backend REST client
#[derive(Clone)]
pub struct DssClient {
    client: Client,
    config: ClientConfig,
}

/// Configuration for the backend client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend (e.g., "http://localhost:5000")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// Pre-aggregated views served by the analytics endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalyticsView {
    ChartData,
    Summary,
    Genre,
    Platform,
    Yearly,
    Correlation,
    Rules,
    Clusters,
}

impl AnalyticsView {
    pub const ALL: [AnalyticsView; 8] = [
        AnalyticsView::ChartData,
        AnalyticsView::Summary,
        AnalyticsView::Genre,
        AnalyticsView::Platform,
        AnalyticsView::Yearly,
        AnalyticsView::Correlation,
        AnalyticsView::Rules,
        AnalyticsView::Clusters,
    ];

    /// Endpoint path relative to the base URL
    pub fn path(&self) -> &'static str {
        match self {
            AnalyticsView::ChartData => "/api/chart-data",
            AnalyticsView::Summary => "/api/analytics/summary",
            AnalyticsView::Genre => "/api/analytics/genre",
            AnalyticsView::Platform => "/api/analytics/platform",
            AnalyticsView::Yearly => "/api/analytics/yearly",
            AnalyticsView::Correlation => "/api/analytics/correlation",
            AnalyticsView::Rules => "/api/analytics/rules",
            AnalyticsView::Clusters => "/api/cluster-data",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsView::ChartData => "chart-data",
            AnalyticsView::Summary => "summary",
            AnalyticsView::Genre => "genre",
            AnalyticsView::Platform => "platform",
            AnalyticsView::Yearly => "yearly",
            AnalyticsView::Correlation => "correlation",
            AnalyticsView::Rules => "rules",
            AnalyticsView::Clusters => "clusters",
        }
    }
}

impl fmt::Display for AnalyticsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnalyticsView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        AnalyticsView::ALL
            .into_iter()
            .find(|view| view.name() == wanted || (wanted == "cluster-data" && *view == AnalyticsView::Clusters))
            .ok_or_else(|| {
                let names: Vec<&str> = AnalyticsView::ALL.iter().map(|v| v.name()).collect();
                format!("unknown analytics view '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

impl DssClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        let config = ClientConfig {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ..config
        };

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Check that the backend is up
    pub async fn health(&self) -> ClientResult<HealthResponse> {
        self.get_json("/api/health", &[]).await
    }

    /// Platforms, genres, publishers and model facts
    pub async fn metadata(&self) -> ClientResult<Metadata> {
        self.get_json("/api/metadata", &[]).await
    }

    /// One filtered, sorted page of games
    pub async fn games(&self, query: &GamesQuery) -> ClientResult<GamesPage> {
        self.get_json("/api/games", &query.to_params()).await
    }

    /// Best-selling games
    pub async fn top_games(&self, limit: u32) -> ClientResult<Vec<Game>> {
        self.get_json("/api/top-games", &[("limit", limit.to_string())])
            .await
    }

    /// Dataset-wide summary statistics
    pub async fn summary(&self) -> ClientResult<AnalyticsSummary> {
        self.get_json(AnalyticsView::Summary.path(), &[]).await
    }

    /// Mined association rules
    pub async fn rules(&self) -> ClientResult<Vec<AssociationRule>> {
        self.get_json(AnalyticsView::Rules.path(), &[]).await
    }

    /// Any analytics view as untyped JSON
    pub async fn analytics(&self, view: AnalyticsView) -> ClientResult<Value> {
        self.get_json(view.path(), &[]).await
    }

    /// Ask the model how a game with these characteristics would perform
    pub async fn predict(&self, request: &PredictionRequest) -> ClientResult<PredictionResponse> {
        request.validate()?;

        let path = "/api/predict";
        let started = Instant::now();
        let response = self
            .client
            .post(self.url(path))
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::from_transport(e, &self.config.base_url))?;

        let status = response.status();
        let text = response.text().await?;

        tracing::debug!(
            endpoint = path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Prediction response received"
        );

        // Failures come back as 400 with a `{success: false, error}` body
        match serde_json::from_str::<PredictionResponse>(&text) {
            Ok(result) if !result.success => Err(ClientError::Prediction(
                result.error.unwrap_or_else(|| "unknown error".to_string()),
            )),
            Ok(result) if status.is_success() => Ok(result),
            Ok(_) => Err(ClientError::Api {
                status: status.as_u16(),
                message: text,
            }),
            Err(_) if !status.is_success() => Err(ClientError::Api {
                status: status.as_u16(),
                message: text,
            }),
            Err(e) => Err(ClientError::Decode {
                endpoint: path.to_string(),
                error: e.to_string(),
            }),
        }
    }

    /// Send a GET and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> ClientResult<T> {
        let started = Instant::now();
        let response = self
            .client
            .get(self.url(path))
            .query(params)
            .send()
            .await
            .map_err(|e| ClientError::from_transport(e, &self.config.base_url))?;

        let body = Self::success_body(response).await?;

        tracing::debug!(
            endpoint = path,
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Response received"
        );

        serde_json::from_str(&body).map_err(|e| ClientError::Decode {
            endpoint: path.to_string(),
            error: e.to_string(),
        })
    }

    async fn success_body(response: Response) -> ClientResult<String> {
        let status = response.status();
        if status.is_success() {
            Ok(response.text().await?)
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}
