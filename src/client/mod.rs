//! Backend Client
//!
//! Talks to the decision-support REST backend that owns the dataset and
//! the prediction model.
//!
//! ## Endpoints
//!
//! - `/api/metadata`: platforms, genres, publishers, model facts
//! - `/api/games`: paginated, filtered, sorted records
//! - `/api/chart-data`, `/api/analytics/*`, `/api/cluster-data`: aggregates
//! - `/api/predict`: success prediction with recommendations

mod backend;
mod dto;
mod error;

pub use backend::{AnalyticsView, ClientConfig, DssClient};
pub use dto::{
    AnalyticsSummary, AssociationRule, FeatureImportance, Game, GamesPage, HealthResponse,
    Metadata, PredictionRequest, PredictionResponse, Recommendation, RecommendationKind,
    YearRange,
};
pub use error::{ClientError, ClientResult};
