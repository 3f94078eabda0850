//! # vgdss
//!
//! Video Games Decision Support - a terminal client for a video-game sales
//! backend. Browse the dataset with filters, sorting, and pagination, view
//! analytics, and request success predictions for hypothetical titles.
//!
//! ## Modules
//!
//! - [`client`]: Typed REST client for the decision-support backend
//! - [`explorer`]: Query state, debounced search, and page fetching
//! - [`display`]: Plain-text rendering of tables and reports
//! - [`guidance`]: Static business guidance next to the mined rules
//! - [`session`]: Interactive explorer driven by line commands
//! - [`config`]: File and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vgdss::client::{ClientConfig, DssClient};
//! use vgdss::explorer::{Action, ExplorerConfig, ExplorerController};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(DssClient::new(ClientConfig::default())?);
//!     let mut explorer = ExplorerController::new(client, ExplorerConfig::default());
//!
//!     explorer.dispatch(Action::SetGenre("Action".to_string()));
//!     explorer.settle().await;
//!
//!     println!("{} matching games", explorer.page().total);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod display;
pub mod explorer;
pub mod guidance;
pub mod logging;
pub mod session;

pub use client::{
    AnalyticsSummary, AnalyticsView, ClientConfig, ClientError, ClientResult, DssClient, Game,
    GamesPage, Metadata, PredictionRequest, PredictionResponse,
};

pub use config::{Config, ConfigError, LoggingConfig};

pub use explorer::{
    Action, Effect, ExplorerConfig, ExplorerController, ExplorerUpdate, GamesQuery, PageInfo,
    PageSource, QueryState, SortColumn, SortOrder,
};
