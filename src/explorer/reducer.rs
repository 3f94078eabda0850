//! Query state transitions
//!
//! Every user interaction is an [`Action`]; [`reduce`] maps the current
//! state and an action to the next state plus the side effect the
//! controller must run. The function is pure.

use super::pagination::clamp_page;
use super::query::{QueryState, SortColumn, SortOrder};

/// A user interaction with the dataset browser
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Search box changed; fetch is deferred until typing pauses
    SearchInput(String),
    /// Typing paused long enough
    SearchSettled,
    SetPlatform(String),
    SetGenre(String),
    SetPublisher(String),
    SetYearRange { min: Option<i32>, max: Option<i32> },
    /// Header click: flip on the active column, otherwise select descending
    SortBy(SortColumn),
    GoToPage(u32),
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    ClearFilters,
    Refresh,
}

/// Side effect requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Fetch the page for the new state now
    Fetch,
    /// (Re)start the search debounce timer
    ScheduleSearch,
    /// Drop any pending search timer, then fetch
    CancelSearchAndFetch,
}

/// Result of applying an action
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: QueryState,
    pub effect: Effect,
}

impl Transition {
    fn unchanged(state: &QueryState) -> Self {
        Self {
            state: state.clone(),
            effect: Effect::None,
        }
    }
}

/// Apply `action` to `state`
///
/// `total_pages` comes from the page result currently on screen and bounds
/// page navigation.
pub fn reduce(state: &QueryState, total_pages: u32, action: Action) -> Transition {
    match action {
        Action::SearchInput(text) => {
            if text == state.search {
                return Transition::unchanged(state);
            }
            Transition {
                state: QueryState {
                    search: text,
                    ..state.clone()
                },
                effect: Effect::ScheduleSearch,
            }
        }

        Action::SearchSettled => Transition {
            state: QueryState {
                page: 1,
                ..state.clone()
            },
            effect: Effect::Fetch,
        },

        Action::SetPlatform(platform) => set_filter(state, platform, |s| &mut s.platform),
        Action::SetGenre(genre) => set_filter(state, genre, |s| &mut s.genre),
        Action::SetPublisher(publisher) => set_filter(state, publisher, |s| &mut s.publisher),

        Action::SetYearRange { min, max } => {
            if state.year_min == min && state.year_max == max {
                return Transition::unchanged(state);
            }
            Transition {
                state: QueryState {
                    year_min: min,
                    year_max: max,
                    page: 1,
                    ..state.clone()
                },
                effect: Effect::Fetch,
            }
        }

        Action::SortBy(column) => {
            let (sort_column, sort_order) = if column == state.sort_column {
                (column, state.sort_order.flipped())
            } else {
                (column, SortOrder::Desc)
            };
            Transition {
                state: QueryState {
                    sort_column,
                    sort_order,
                    page: 1,
                    ..state.clone()
                },
                effect: Effect::Fetch,
            }
        }

        Action::GoToPage(page) => go_to_page(state, page, total_pages),
        Action::NextPage => go_to_page(state, state.page.saturating_add(1), total_pages),
        Action::PreviousPage => go_to_page(state, state.page.saturating_sub(1), total_pages),
        Action::FirstPage => go_to_page(state, 1, total_pages),
        Action::LastPage => go_to_page(state, total_pages, total_pages),

        Action::ClearFilters => Transition {
            state: state.cleared(),
            effect: Effect::CancelSearchAndFetch,
        },

        Action::Refresh => Transition {
            state: state.clone(),
            effect: Effect::Fetch,
        },
    }
}

fn set_filter(
    state: &QueryState,
    value: String,
    field: impl Fn(&mut QueryState) -> &mut String,
) -> Transition {
    let value = value.trim().to_string();
    let mut next = state.clone();
    let slot = field(&mut next);
    if *slot == value {
        return Transition::unchanged(state);
    }
    *slot = value;
    next.page = 1;

    Transition {
        state: next,
        effect: Effect::Fetch,
    }
}

fn go_to_page(state: &QueryState, page: u32, total_pages: u32) -> Transition {
    let page = clamp_page(page, total_pages);
    if page == state.page {
        return Transition::unchanged(state);
    }
    Transition {
        state: QueryState {
            page,
            ..state.clone()
        },
        effect: Effect::Fetch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page(page: u32) -> QueryState {
        QueryState {
            page,
            ..Default::default()
        }
    }

    #[test]
    fn test_search_input_defers_fetch() {
        let t = reduce(&on_page(3), 10, Action::SearchInput("zel".to_string()));
        assert_eq!(t.effect, Effect::ScheduleSearch);
        assert_eq!(t.state.search, "zel");
        // Page resets only once the search settles
        assert_eq!(t.state.page, 3);

        let settled = reduce(&t.state, 10, Action::SearchSettled);
        assert_eq!(settled.effect, Effect::Fetch);
        assert_eq!(settled.state.page, 1);
        assert_eq!(settled.state.search, "zel");
    }

    #[test]
    fn test_unchanged_search_is_noop() {
        let state = QueryState {
            search: "halo".to_string(),
            ..Default::default()
        };
        let t = reduce(&state, 1, Action::SearchInput("halo".to_string()));
        assert_eq!(t.effect, Effect::None);
    }

    #[test]
    fn test_filter_resets_page_and_fetches() {
        let t = reduce(&on_page(4), 10, Action::SetGenre("Action".to_string()));
        assert_eq!(t.effect, Effect::Fetch);
        assert_eq!(t.state.genre, "Action");
        assert_eq!(t.state.page, 1);

        let again = reduce(&t.state, 10, Action::SetGenre("Action".to_string()));
        assert_eq!(again.effect, Effect::None);
    }

    #[test]
    fn test_year_range() {
        let t = reduce(
            &on_page(2),
            5,
            Action::SetYearRange {
                min: Some(2005),
                max: None,
            },
        );
        assert_eq!(t.effect, Effect::Fetch);
        assert_eq!(t.state.year_min, Some(2005));
        assert_eq!(t.state.page, 1);
    }

    #[test]
    fn test_sort_toggle_round_trip() {
        let start = QueryState::default();
        assert_eq!(start.sort_column, SortColumn::GlobalSales);
        assert_eq!(start.sort_order, SortOrder::Desc);

        let once = reduce(&start, 1, Action::SortBy(SortColumn::GlobalSales));
        assert_eq!(once.state.sort_order, SortOrder::Asc);
        let twice = reduce(&once.state, 1, Action::SortBy(SortColumn::GlobalSales));
        assert_eq!(twice.state.sort_order, SortOrder::Desc);
        assert_eq!(twice.effect, Effect::Fetch);
    }

    #[test]
    fn test_new_sort_column_starts_descending() {
        let asc = QueryState {
            sort_column: SortColumn::Name,
            sort_order: SortOrder::Asc,
            page: 6,
            ..Default::default()
        };

        for column in SortColumn::ALL {
            if column == SortColumn::Name {
                continue;
            }
            let t = reduce(&asc, 10, Action::SortBy(column));
            assert_eq!(t.state.sort_column, column);
            assert_eq!(t.state.sort_order, SortOrder::Desc);
            assert_eq!(t.state.page, 1);
        }
    }

    #[test]
    fn test_page_navigation_clamps() {
        let first = reduce(&on_page(1), 12, Action::PreviousPage);
        assert_eq!(first.effect, Effect::None);
        assert_eq!(first.state.page, 1);

        let last = reduce(&on_page(12), 12, Action::NextPage);
        assert_eq!(last.effect, Effect::None);
        assert_eq!(last.state.page, 12);

        let jump = reduce(&on_page(2), 12, Action::GoToPage(40));
        assert_eq!(jump.state.page, 12);
        assert_eq!(jump.effect, Effect::Fetch);

        let end = reduce(&on_page(2), 12, Action::LastPage);
        assert_eq!(end.state.page, 12);

        let zero = reduce(&on_page(1), 0, Action::NextPage);
        assert_eq!(zero.state.page, 1);
        assert_eq!(zero.effect, Effect::None);
    }

    #[test]
    fn test_page_change_keeps_filters() {
        let state = QueryState {
            genre: "Racing".to_string(),
            ..Default::default()
        };
        let t = reduce(&state, 4, Action::NextPage);
        assert_eq!(t.state.page, 2);
        assert_eq!(t.state.genre, "Racing");
    }

    #[test]
    fn test_clear_filters() {
        let state = QueryState {
            search: "fifa".to_string(),
            platform: "PS4".to_string(),
            genre: "Sports".to_string(),
            page: 5,
            ..Default::default()
        };

        let t = reduce(&state, 9, Action::ClearFilters);
        assert_eq!(t.effect, Effect::CancelSearchAndFetch);
        assert!(t.state.search.is_empty());
        assert!(t.state.platform.is_empty());
        assert!(t.state.genre.is_empty());
        assert_eq!(t.state.page, 1);
    }

    #[test]
    fn test_refresh_always_fetches() {
        let state = on_page(2);
        let t = reduce(&state, 3, Action::Refresh);
        assert_eq!(t.effect, Effect::Fetch);
        assert_eq!(t.state, state);
    }
}
