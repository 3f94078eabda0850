//! Dataset browsing controller
//!
//! Owns the query state and the page currently on screen. Fetches and
//! debounce timers run as spawned tasks and report back through an mpsc
//! channel; the owner drains that channel with [`ExplorerController::step`].
//!
//! Every fetch carries a sequence number. A response is applied only when
//! it is newer than the last one that settled, so a slow stale response
//! can never overwrite a newer page.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use super::debounce::{Debouncer, DEFAULT_SEARCH_DELAY};
use super::fetcher::{GamesQuery, PageSource};
use super::pagination::{clamp_page, total_pages, PageInfo};
use super::query::{QueryState, DEFAULT_PAGE_SIZE};
use super::reducer::{reduce, Action, Effect};
use crate::client::{ClientResult, GamesPage};

/// Tunables for the controller
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    pub page_size: u32,
    pub search_delay: Duration,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_delay: DEFAULT_SEARCH_DELAY,
        }
    }
}

/// Completion reported by a background task
#[derive(Debug)]
pub enum ExplorerEvent {
    SearchSettled { generation: u64 },
    PageLoaded { seq: u64, result: ClientResult<GamesPage> },
}

/// What handling an event did to the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerUpdate {
    /// A new page replaced the old one
    PageApplied,
    /// The latest fetch failed; the previous page is still shown
    FetchFailed(String),
    /// A response older than what is on screen was dropped
    Stale,
    /// Search settled and a fetch is under way
    FetchStarted,
    /// Superseded timer
    Ignored,
}

pub struct ExplorerController {
    source: Arc<dyn PageSource>,
    state: QueryState,
    page: GamesPage,
    /// Highest sequence number handed out
    issued_seq: u64,
    /// Highest sequence number that completed, successfully or not
    settled_seq: u64,
    search_generation: u64,
    search_armed: bool,
    debouncer: Debouncer,
    events_tx: mpsc::UnboundedSender<ExplorerEvent>,
    events_rx: mpsc::UnboundedReceiver<ExplorerEvent>,
}

impl ExplorerController {
    pub fn new(source: Arc<dyn PageSource>, config: ExplorerConfig) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            source,
            state: QueryState::with_page_size(config.page_size),
            page: GamesPage::default(),
            issued_seq: 0,
            settled_seq: 0,
            search_generation: 0,
            search_armed: false,
            debouncer: Debouncer::new(config.search_delay),
            events_tx,
            events_rx,
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Page currently on screen
    pub fn page(&self) -> &GamesPage {
        &self.page
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(self.state.page, self.page.total, self.state.page_size)
    }

    /// Whether the newest fetch is still outstanding
    pub fn is_loading(&self) -> bool {
        self.issued_seq > self.settled_seq
    }

    /// Whether a search is waiting for typing to pause
    pub fn search_pending(&self) -> bool {
        self.search_armed
    }

    /// Nothing outstanding that could change the view
    pub fn is_idle(&self) -> bool {
        !self.is_loading() && !self.search_armed
    }

    /// Number of fetches started so far
    pub fn fetches_issued(&self) -> u64 {
        self.issued_seq
    }

    /// Apply a user action and start whatever it requires
    pub fn dispatch(&mut self, action: Action) -> Effect {
        let pages = total_pages(self.page.total, self.state.page_size);
        let transition = reduce(&self.state, pages, action);
        self.state = transition.state;

        match transition.effect {
            Effect::None => {}
            Effect::Fetch => self.start_fetch(),
            Effect::ScheduleSearch => self.schedule_search(),
            Effect::CancelSearchAndFetch => {
                self.cancel_search();
                self.start_fetch();
            }
        }

        transition.effect
    }

    /// Wait for the next background completion
    pub async fn next_event(&mut self) -> Option<ExplorerEvent> {
        self.events_rx.recv().await
    }

    /// Wait for the next background completion and apply it
    pub async fn step(&mut self) -> Option<ExplorerUpdate> {
        let event = self.next_event().await?;
        Some(self.handle_event(event))
    }

    /// Apply completions until no fetch or timer is outstanding
    pub async fn settle(&mut self) -> Vec<ExplorerUpdate> {
        let mut updates = Vec::new();
        while !self.is_idle() {
            match self.step().await {
                Some(update) => updates.push(update),
                None => break,
            }
        }
        updates
    }

    /// Apply every completion already queued without waiting
    pub fn drain_ready(&mut self) -> Vec<ExplorerUpdate> {
        let mut updates = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            updates.push(self.handle_event(event));
        }
        updates
    }

    pub fn handle_event(&mut self, event: ExplorerEvent) -> ExplorerUpdate {
        match event {
            ExplorerEvent::SearchSettled { generation } => {
                if !self.search_armed || generation != self.search_generation {
                    return ExplorerUpdate::Ignored;
                }
                self.search_armed = false;
                self.dispatch(Action::SearchSettled);
                ExplorerUpdate::FetchStarted
            }
            ExplorerEvent::PageLoaded { seq, result } => self.apply_page(seq, result),
        }
    }

    fn apply_page(&mut self, seq: u64, result: ClientResult<GamesPage>) -> ExplorerUpdate {
        if seq <= self.settled_seq {
            tracing::debug!(seq, settled = self.settled_seq, "Discarding stale games page");
            return ExplorerUpdate::Stale;
        }
        self.settled_seq = seq;

        match result {
            Ok(page) => {
                tracing::debug!(seq, rows = page.games.len(), total = page.total, "Games page applied");
                let pages = total_pages(page.total, self.state.page_size);
                self.page = page;

                // Result set shrank under the requested page
                if self.state.page > pages.max(1) {
                    let clamped = clamp_page(self.state.page, pages);
                    tracing::debug!(from = self.state.page, to = clamped, "Re-clamping page");
                    self.state.page = clamped;
                    self.start_fetch();
                }
                ExplorerUpdate::PageApplied
            }
            Err(e) => {
                tracing::error!(seq, error = %e, "Error fetching games");
                ExplorerUpdate::FetchFailed(e.to_string())
            }
        }
    }

    fn start_fetch(&mut self) {
        self.issued_seq += 1;
        let seq = self.issued_seq;
        let query = GamesQuery::from_state(&self.state);

        tracing::debug!(seq, query = %query.to_query_string(), "Fetching games page");

        let source = Arc::clone(&self.source);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_page(&query).await;
            // Receiver only goes away with the controller
            let _ = tx.send(ExplorerEvent::PageLoaded { seq, result });
        });
    }

    fn schedule_search(&mut self) {
        self.search_generation += 1;
        self.search_armed = true;

        let generation = self.search_generation;
        let tx = self.events_tx.clone();
        self.debouncer.schedule(async move {
            let _ = tx.send(ExplorerEvent::SearchSettled { generation });
        });
    }

    fn cancel_search(&mut self) {
        self.debouncer.cancel();
        self.search_armed = false;
        // Invalidate a timer that fired but has not been handled yet
        self.search_generation += 1;
    }
}
