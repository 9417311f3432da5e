//! Storefront widgets: a URL-synchronized product filter panel, a price range
//! slider, image carousels and a hover zoom, rendered with Yew.
//!
//! The state machines (`query`, `filter`, `range`, `carousel`, `zoom`) have no
//! browser dependency. The browser is reached only through
//! [`navigation::Navigator`] and [`view::ViewEffects`].

pub mod carousel;
pub mod components;
pub mod config;
pub mod filter;
pub mod hooks;
pub mod navigation;
pub mod query;
pub mod range;
pub mod utils;
pub mod view;
pub mod zoom;

pub use filter::{FilterKind, FilterState, PricePair, SortOption, TokenSet};
pub use navigation::{BrowserNavigator, NavigationError, Navigator, RecordingNavigator, Redirector};
pub use query::{
    build_url, clear_all_parameters, page_links, parse_list, with_page, ChangeSet, PageLink, PageUrl,
};
