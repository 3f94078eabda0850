//! Request/response shapes for the backend REST API
//!
//! The backend serves pandas records, so every field is lenient: missing
//! values become `None` or defaults and unknown columns are kept in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::error::{ClientError, ClientResult};

// ============================================
// Dataset records
// ============================================

/// One row of the video-game sales dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Game {
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Platform", default)]
    pub platform: Option<String>,
    #[serde(rename = "Year_of_Release", default)]
    pub year: Option<f64>,
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    #[serde(rename = "Publisher", default)]
    pub publisher: Option<String>,
    #[serde(rename = "NA_Sales", default)]
    pub na_sales: Option<f64>,
    #[serde(rename = "EU_Sales", default)]
    pub eu_sales: Option<f64>,
    #[serde(rename = "JP_Sales", default)]
    pub jp_sales: Option<f64>,
    #[serde(rename = "Other_Sales", default)]
    pub other_sales: Option<f64>,
    #[serde(rename = "Global_Sales", default)]
    pub global_sales: Option<f64>,
    #[serde(rename = "Critic_Score", default)]
    pub critic_score: Option<f64>,
    #[serde(rename = "User_Score", default)]
    pub user_score: Option<f64>,
    /// Columns the client does not know about
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One page of `/api/games`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GamesPage {
    #[serde(default)]
    pub games: Vec<Game>,
    #[serde(default)]
    pub total: u64,
    /// Echo of the requested limit
    #[serde(default)]
    pub limit: Option<u32>,
    /// Echo of the requested offset
    #[serde(default)]
    pub offset: Option<u64>,
}

// ============================================
// Metadata & health
// ============================================

/// `/api/health`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Static lists and model facts from `/api/metadata`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Metadata {
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub publishers: Vec<String>,
    #[serde(default)]
    pub feature_importance: Vec<FeatureImportance>,
    #[serde(default)]
    pub model_accuracy: Option<f64>,
    #[serde(default)]
    pub cluster_labels: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Metadata {
    /// Feature importances, most important first
    pub fn ranked_features(&self) -> Vec<&FeatureImportance> {
        let mut features: Vec<&FeatureImportance> = self.feature_importance.iter().collect();
        features.sort_by(|a, b| b.importance.total_cmp(&a.importance));
        features
    }
}

/// Weight of one model input
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeatureImportance {
    #[serde(rename = "Feature")]
    pub feature: String,
    #[serde(rename = "Importance")]
    pub importance: f64,
}

impl FeatureImportance {
    /// Feature name without the label-encoding suffix
    pub fn display_name(&self) -> &str {
        self.feature.strip_suffix("_Encoded").unwrap_or(&self.feature)
    }
}

// ============================================
// Analytics
// ============================================

/// `/api/analytics/summary`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyticsSummary {
    pub total_games: u64,
    pub total_sales: f64,
    pub avg_critic_score: f64,
    pub avg_user_score: f64,
    pub unique_platforms: u64,
    pub unique_genres: u64,
    pub unique_publishers: u64,
    pub year_range: YearRange,
    pub top_genre: String,
    pub top_platform: String,
    pub top_publisher: String,
}

/// Inclusive release-year span
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

/// One mined association rule from `/api/analytics/rules`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AssociationRule {
    pub antecedent: String,
    pub consequent: String,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
}

// ============================================
// Prediction
// ============================================

/// Body of `POST /api/predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub platform: String,
    pub genre: String,
    pub publisher: String,
    pub critic_score: f64,
    pub user_score: f64,
    pub year: i32,
}

impl Default for PredictionRequest {
    fn default() -> Self {
        Self {
            platform: "PS4".to_string(),
            genre: "Action".to_string(),
            publisher: "Electronic Arts".to_string(),
            critic_score: 75.0,
            user_score: 7.0,
            year: 2026,
        }
    }
}

impl PredictionRequest {
    /// Reject inputs outside the ranges the model was trained on
    pub fn validate(&self) -> ClientResult<()> {
        if !(0.0..=100.0).contains(&self.critic_score) {
            return Err(ClientError::InvalidInput(format!(
                "critic_score must be between 0 and 100, got {}",
                self.critic_score
            )));
        }
        if !(0.0..=10.0).contains(&self.user_score) {
            return Err(ClientError::InvalidInput(format!(
                "user_score must be between 0 and 10, got {}",
                self.user_score
            )));
        }
        for (field, value) in [
            ("platform", &self.platform),
            ("genre", &self.genre),
            ("publisher", &self.publisher),
        ] {
            if value.trim().is_empty() {
                return Err(ClientError::InvalidInput(format!("{} must not be empty", field)));
            }
        }
        Ok(())
    }
}

/// Response of `POST /api/predict`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PredictionResponse {
    pub success: bool,
    #[serde(default)]
    pub prediction: Option<String>,
    #[serde(default)]
    pub probabilities: BTreeMap<String, f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    /// Echo of the normalised input
    #[serde(default)]
    pub input: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl PredictionResponse {
    /// Class probabilities, most likely first
    pub fn ranked_probabilities(&self) -> Vec<(&str, f64)> {
        let mut probs: Vec<(&str, f64)> = self
            .probabilities
            .iter()
            .map(|(class, p)| (class.as_str(), *p))
            .collect();
        probs.sort_by(|a, b| b.1.total_cmp(&a.1));
        probs
    }
}

/// Advice attached to a prediction
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub message: String,
}

/// Severity of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Success,
    Info,
    Warning,
    Error,
    #[serde(other)]
    Other,
}

impl RecommendationKind {
    pub fn label(&self) -> &'static str {
        match self {
            RecommendationKind::Success => "OK",
            RecommendationKind::Info => "INFO",
            RecommendationKind::Warning => "WARN",
            RecommendationKind::Error => "ERROR",
            RecommendationKind::Other => "NOTE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_lenient_decode() {
        let json = r#"{
            "Name": "Wii Sports",
            "Platform": "Wii",
            "Year_of_Release": 2006.0,
            "Genre": "Sports",
            "Publisher": "Nintendo",
            "Global_Sales": 82.53,
            "Critic_Score": 76.0,
            "User_Score": null,
            "Rating": "E"
        }"#;

        let game: Game = serde_json::from_str(json).unwrap();
        assert_eq!(game.name.as_deref(), Some("Wii Sports"));
        assert_eq!(game.global_sales, Some(82.53));
        assert_eq!(game.user_score, None);
        assert_eq!(game.na_sales, None);
        assert_eq!(game.extra.get("Rating"), Some(&Value::from("E")));
    }

    #[test]
    fn test_games_page_decode() {
        let json = r#"{"games": [{"Name": "Tetris"}], "total": 31, "limit": 15, "offset": 15}"#;
        let page: GamesPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.games.len(), 1);
        assert_eq!(page.total, 31);
        assert_eq!(page.offset, Some(15));
    }

    #[test]
    fn test_metadata_ranked_features() {
        let json = r#"{
            "platforms": ["PS4", "XOne"],
            "genres": ["Action"],
            "feature_importance": [
                {"Feature": "Genre_Encoded", "Importance": 0.1},
                {"Feature": "Critic_Score", "Importance": 0.4}
            ],
            "model_accuracy": 0.87,
            "avg_critic_blockbuster": 82.1
        }"#;

        let meta: Metadata = serde_json::from_str(json).unwrap();
        let ranked = meta.ranked_features();
        assert_eq!(ranked[0].feature, "Critic_Score");
        assert_eq!(ranked[1].display_name(), "Genre");
        assert!(meta.publishers.is_empty());
        assert!(meta.extra.contains_key("avg_critic_blockbuster"));
    }

    #[test]
    fn test_prediction_request_validation() {
        assert!(PredictionRequest::default().validate().is_ok());

        let req = PredictionRequest {
            critic_score: 101.0,
            ..Default::default()
        };
        assert!(matches!(req.validate(), Err(ClientError::InvalidInput(_))));

        let req = PredictionRequest {
            user_score: -0.5,
            ..Default::default()
        };
        assert!(matches!(req.validate(), Err(ClientError::InvalidInput(_))));

        let req = PredictionRequest {
            publisher: "  ".to_string(),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_prediction_response_decode() {
        let json = r#"{
            "success": true,
            "prediction": "Hit",
            "probabilities": {"Blockbuster": 0.1, "Hit": 0.6, "Low": 0.05, "Moderate": 0.25},
            "confidence": 0.6,
            "recommendations": [
                {"type": "success", "title": "Good Potential!", "message": "Could be a hit."},
                {"type": "critical", "title": "Odd", "message": "Unknown severity."}
            ]
        }"#;

        let resp: PredictionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.prediction.as_deref(), Some("Hit"));
        assert_eq!(resp.ranked_probabilities()[0], ("Hit", 0.6));
        assert_eq!(resp.recommendations[0].kind, RecommendationKind::Success);
        assert_eq!(resp.recommendations[1].kind, RecommendationKind::Other);
    }
}
