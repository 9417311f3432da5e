//! In-memory filter selection for the product listing.
//!
//! The selection is read from the URL once per page load, edited in memory by
//! the filter panel, and only becomes visible again through a navigation
//! ([`FilterState::apply_and_navigate`]).

use crate::config::{PARAM_COLOR, PARAM_PRICE_GTE, PARAM_PRICE_LTE, PARAM_SIZE, PARAM_SORTING};
use crate::navigation::{NavigationError, Navigator, Redirector};
use crate::query::{parse_list, ChangeSet, PageUrl};
use crate::utils::parse_int_prefix;
use log::debug;

/// Insertion-ordered set of URL tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet(Vec<String>);

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set keeping the first occurrence of each token.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for token in tokens {
            let token = token.into();
            if !set.contains(&token) {
                set.0.push(token);
            }
        }
        set
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t == token)
    }

    /// Remove `token` if present, otherwise append it. Returns whether the
    /// token is selected afterwards.
    pub fn toggle(&mut self, token: &str) -> bool {
        match self.0.iter().position(|t| t == token) {
            Some(idx) => {
                self.0.remove(idx);
                false
            }
            None => {
                self.0.push(token.to_string());
                true
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn join(&self, separator: &str) -> String {
        self.0.join(separator)
    }
}

/// Which multi-value filter a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Color,
    Size,
}

impl FilterKind {
    pub fn param_name(self) -> &'static str {
        match self {
            FilterKind::Color => PARAM_COLOR,
            FilterKind::Size => PARAM_SIZE,
        }
    }
}

/// `[low, high]` price bounds; `None` marks a bound that failed to parse.
pub type PricePair = [Option<i64>; 2];

/// Ordering choices offered by the listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOption {
    Popularity,
    PriceAscending,
    PriceDescending,
    Newest,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption::Popularity,
        SortOption::PriceAscending,
        SortOption::PriceDescending,
        SortOption::Newest,
    ];

    pub fn as_param(self) -> &'static str {
        match self {
            SortOption::Popularity => "popularity",
            SortOption::PriceAscending => "price_ascending",
            SortOption::PriceDescending => "price_descending",
            SortOption::Newest => "newest",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.as_param() == value)
    }

    /// Human readable label, e.g. "price ascending".
    pub fn label(self) -> String {
        self.as_param().replace('_', " ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub color: TokenSet,
    pub size: TokenSet,
    pub price: PricePair,
    pub sorting: String,
}

impl FilterState {
    /// Initialize every field from the page URL.
    pub fn from_url(url: &PageUrl) -> Self {
        let sorting = parse_list(url, PARAM_SORTING)
            .into_iter()
            .next()
            .unwrap_or_default();
        // A list parameter is read as a whole, so `10,20` reads as 10.
        let price_gte = parse_int_prefix(&parse_list(url, PARAM_PRICE_GTE).join(","));
        let price_lte = parse_int_prefix(&parse_list(url, PARAM_PRICE_LTE).join(","));

        let state = Self {
            color: TokenSet::from_tokens(parse_list(url, PARAM_COLOR)),
            size: TokenSet::from_tokens(parse_list(url, PARAM_SIZE)),
            price: [price_gte, price_lte],
            sorting,
        };
        debug!("Filter state from URL: {:?}", state);
        state
    }

    /// Initialize from the navigator's current location.
    pub fn from_navigator<N: Navigator>(navigator: &N) -> Result<Self, NavigationError> {
        Ok(Self::from_url(&navigator.location()?))
    }

    pub fn tokens(&self, kind: FilterKind) -> &TokenSet {
        match kind {
            FilterKind::Color => &self.color,
            FilterKind::Size => &self.size,
        }
    }

    pub fn toggle_filter(&mut self, kind: FilterKind, token: &str) -> bool {
        let collection = match kind {
            FilterKind::Color => &mut self.color,
            FilterKind::Size => &mut self.size,
        };
        let selected = collection.toggle(token);
        debug!("Toggled {} '{}': selected={}", kind.param_name(), token, selected);
        selected
    }

    pub fn set_price(&mut self, price: PricePair) {
        self.price = price;
    }

    pub fn set_sorting(&mut self, sorting: impl Into<String>) {
        self.sorting = sorting.into();
    }

    /// The selected ordering, `None` for an empty or unrecognized key.
    pub fn sort_option(&self) -> Option<SortOption> {
        SortOption::from_param(&self.sorting)
    }

    /// Full snapshot of the tracked parameters. Empty values delete their
    /// parameter when merged into the URL.
    pub fn build_change_set(&self) -> ChangeSet {
        let bound = |b: Option<i64>| b.map(|v| v.to_string()).unwrap_or_default();

        let mut changes = ChangeSet::new();
        changes.insert(PARAM_COLOR, self.color.join(","));
        changes.insert(PARAM_SIZE, self.size.join(","));
        changes.insert(PARAM_PRICE_GTE, bound(self.price[0]));
        changes.insert(PARAM_PRICE_LTE, bound(self.price[1]));
        changes.insert(PARAM_SORTING, self.sorting.clone());
        changes
    }

    pub fn apply_and_navigate<N: Navigator>(
        &self,
        redirector: &Redirector<N>,
    ) -> Result<(), NavigationError> {
        redirector.redirect(&self.build_change_set())
    }

    pub fn reset_and_navigate<N: Navigator>(
        &self,
        redirector: &Redirector<N>,
    ) -> Result<(), NavigationError> {
        redirector.redirect_to_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RecordingNavigator;

    fn state_for(href: &str) -> FilterState {
        FilterState::from_url(&PageUrl::parse(href))
    }

    #[test_log::test]
    fn toggle_twice_restores_contents() {
        let mut set = TokenSet::from_tokens(["red", "blue"]);
        assert!(set.toggle("green"));
        assert!(!set.toggle("green"));
        assert_eq!(set, TokenSet::from_tokens(["red", "blue"]));
    }

    #[test_log::test]
    fn toggled_off_then_on_moves_to_end() {
        let mut set = TokenSet::from_tokens(["red", "blue", "green"]);
        set.toggle("red");
        set.toggle("red");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["blue", "green", "red"]);
    }

    #[test_log::test]
    fn duplicate_url_tokens_collapse() {
        let state = state_for("/p/?color=red,blue,red");
        assert_eq!(state.color.join(","), "red,blue");
    }

    #[test_log::test]
    fn color_round_trips_through_change_set() {
        let state = state_for("/p/?color=red,blue");
        assert_eq!(state.color.iter().collect::<Vec<_>>(), vec!["red", "blue"]);
        assert_eq!(state.build_change_set().get("color"), Some("red,blue"));
    }

    #[test_log::test]
    fn price_round_trips_through_change_set() {
        let state = state_for("/p/?price_gte=10&price_lte=50");
        assert_eq!(state.price, [Some(10), Some(50)]);
        let changes = state.build_change_set();
        assert_eq!(changes.get("price_gte"), Some("10"));
        assert_eq!(changes.get("price_lte"), Some("50"));
    }

    #[test_log::test]
    fn malformed_price_is_kept_unset_and_not_written() {
        let state = state_for("/p/?price_gte=cheap&price_lte=20abc");
        assert_eq!(state.price, [None, Some(20)]);
        assert_eq!(state.build_change_set().get("price_gte"), Some(""));
    }

    #[test_log::test]
    fn sorting_keeps_first_value_only() {
        assert_eq!(state_for("/p/?sorting=newest,popularity").sorting, "newest");
        assert_eq!(state_for("/p/").sorting, "");
    }

    #[test_log::test]
    fn empty_url_gives_empty_state() {
        assert_eq!(state_for("/p/"), FilterState::default());
    }

    #[test_log::test]
    fn change_set_is_a_full_snapshot() {
        let changes = FilterState::default().build_change_set();
        let names: Vec<_> = changes.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["color", "size", "price_gte", "price_lte", "sorting"]);
        assert!(changes.iter().all(|(_, v)| v.is_empty()));
    }

    #[test_log::test]
    fn in_memory_edits_do_not_navigate() {
        let redirector = Redirector::new(RecordingNavigator::new("/p/"));
        let mut state = FilterState::from_navigator(redirector.navigator()).unwrap();
        state.toggle_filter(FilterKind::Size, "m");
        assert!(redirector.navigator().visited().is_empty());
    }

    #[test_log::test]
    fn apply_and_navigate_writes_selection() {
        let redirector = Redirector::new(RecordingNavigator::new("/p/?color=red&q=dress&page=3"));
        let mut state = FilterState::from_navigator(redirector.navigator()).unwrap();
        state.toggle_filter(FilterKind::Color, "red");
        state.toggle_filter(FilterKind::Color, "blue");
        state.toggle_filter(FilterKind::Size, "m");
        state.set_price([Some(5), Some(200)]);
        state.set_sorting(SortOption::PriceAscending.as_param());

        state.apply_and_navigate(&redirector).unwrap();

        let visited = PageUrl::parse(&redirector.navigator().last_visited().unwrap());
        assert_eq!(visited.get("color"), Some("blue"));
        assert_eq!(visited.get("size"), Some("m"));
        assert_eq!(visited.get("price_gte"), Some("5"));
        assert_eq!(visited.get("price_lte"), Some("200"));
        assert_eq!(visited.get("sorting"), Some("price_ascending"));
        assert_eq!(visited.get("q"), Some("dress"));
    }

    #[test_log::test]
    fn reset_ignores_in_memory_state() {
        let redirector = Redirector::new(RecordingNavigator::new("/p/dresses/?color=red"));
        let mut state = FilterState::from_navigator(redirector.navigator()).unwrap();
        state.toggle_filter(FilterKind::Color, "blue");

        state.reset_and_navigate(&redirector).unwrap();

        assert_eq!(redirector.navigator().visited(), vec!["/p/dresses/"]);
    }

    #[test_log::test]
    fn sort_options_labels() {
        assert_eq!(SortOption::PriceDescending.label(), "price descending");
        assert_eq!(SortOption::from_param("newest"), Some(SortOption::Newest));
        assert_eq!(SortOption::from_param("cheapest"), None);
    }

    #[test_log::test]
    fn unset_or_unknown_sorting_has_no_option() {
        assert_eq!(state_for("/p/").sort_option(), None);
        let unknown = state_for("/p/?sorting=cheapest");
        assert_eq!(unknown.sort_option(), None);
        assert_eq!(unknown.build_change_set().get("sorting"), Some("cheapest"));
        assert_eq!(
            state_for("/p/?sorting=price_descending").sort_option(),
            Some(SortOption::PriceDescending)
        );
    }
}
