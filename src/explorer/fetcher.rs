//! Remote page fetching
//!
//! Turns a [`QueryState`] into the `/api/games` request and abstracts the
//! transport behind [`PageSource`].

use async_trait::async_trait;

use super::pagination::total_pages;
use super::query::{QueryState, SortColumn, SortOrder};
use crate::client::{ClientResult, DssClient, GamesPage};

/// Parameters of one `/api/games` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamesQuery {
    pub limit: u32,
    pub offset: u64,
    pub sort_by: SortColumn,
    pub sort_order: SortOrder,
    pub search: Option<String>,
    pub platform: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl GamesQuery {
    pub fn from_state(state: &QueryState) -> Self {
        Self {
            limit: state.page_size,
            offset: state.offset(),
            sort_by: state.sort_column,
            sort_order: state.sort_order,
            search: non_empty(&state.search),
            platform: non_empty(&state.platform),
            genre: non_empty(&state.genre),
            publisher: non_empty(&state.publisher),
            year_min: state.year_min,
            year_max: state.year_max,
        }
    }

    /// Ordered query parameters; optional filters appear only when set
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("sort_by", self.sort_by.as_str().to_string()),
            ("sort_order", self.sort_order.as_str().to_string()),
        ];

        let optional = [
            ("search", self.search.clone()),
            ("platform", self.platform.clone()),
            ("genre", self.genre.clone()),
            ("publisher", self.publisher.clone()),
            ("year_min", self.year_min.map(|y| y.to_string())),
            ("year_max", self.year_max.map(|y| y.to_string())),
        ];
        params.extend(
            optional
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v))),
        );

        params
    }

    /// Percent-encoded query string, without the leading `?`
    pub fn to_query_string(&self) -> String {
        self.to_params()
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Anything that can serve a page of games
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, query: &GamesQuery) -> ClientResult<GamesPage>;
}

#[async_trait]
impl PageSource for DssClient {
    async fn fetch_page(&self, query: &GamesQuery) -> ClientResult<GamesPage> {
        self.games(query).await
    }
}

/// Fetch the page `state` asks for, falling back to the last page when
/// the requested one lies past the end; `state.page` is updated to match
pub async fn fetch_clamped(
    source: &dyn PageSource,
    state: &mut QueryState,
) -> ClientResult<GamesPage> {
    let page = source.fetch_page(&GamesQuery::from_state(state)).await?;

    let last = total_pages(page.total, state.page_size).max(1);
    if state.page <= last {
        return Ok(page);
    }

    tracing::debug!(requested = state.page, last, "Page past the end, fetching last page");
    state.page = last;
    source.fetch_page(&GamesQuery::from_state(state)).await
}
