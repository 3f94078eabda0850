//! Dataset Explorer
//!
//! Client-side logic for browsing the games table: query state, a pure
//! reducer, debounced search, remote page fetching, and pagination.
//!
//! ## Data Flow
//!
//! 1. A user interaction becomes an [`Action`]
//! 2. [`reduce`] produces the next [`QueryState`] and an [`Effect`]
//! 3. Search input waits for the [`Debouncer`]; everything else fetches now
//! 4. The [`PageSource`] answers and the controller swaps the page in whole
//! 5. [`PageInfo`] re-derives the page window

mod controller;
mod debounce;
mod fetcher;
mod pagination;
mod query;
mod reducer;

pub use controller::{ExplorerConfig, ExplorerController, ExplorerEvent, ExplorerUpdate};
pub use debounce::{Debouncer, DEFAULT_SEARCH_DELAY};
pub use fetcher::{fetch_clamped, GamesQuery, PageSource};
pub use pagination::{clamp_page, page_window, total_pages, PageInfo, PAGE_WINDOW};
pub use query::{QueryState, SortColumn, SortOrder, DEFAULT_PAGE_SIZE};
pub use reducer::{reduce, Action, Effect, Transition};
