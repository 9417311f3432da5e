//! Redirect driver: the only place that replaces the browser's location.

use crate::query::{build_url, clear_all_parameters, ChangeSet, PageUrl};
use log::info;
use std::cell::RefCell;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum NavigationError {
    /// No `window` (not running in a browser main thread).
    NoWindow,
    /// The browser rejected the location read or write.
    Browser(String),
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::NoWindow => write!(f, "No browser window available"),
            NavigationError::Browser(msg) => write!(f, "Browser navigation failed: {}", msg),
        }
    }
}

impl std::error::Error for NavigationError {}

/// Access to the current navigation context.
pub trait Navigator {
    /// The URL the page was loaded from.
    fn location(&self) -> Result<PageUrl, NavigationError>;

    /// Start a full-page navigation. In a browser nothing after this runs.
    fn assign(&self, url: &PageUrl) -> Result<(), NavigationError>;
}

/// `window.location` backed navigator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrowserNavigator;

impl BrowserNavigator {
    fn location_handle() -> Result<web_sys::Location, NavigationError> {
        web_sys::window()
            .map(|w| w.location())
            .ok_or(NavigationError::NoWindow)
    }
}

impl Navigator for BrowserNavigator {
    fn location(&self) -> Result<PageUrl, NavigationError> {
        let href = Self::location_handle()?
            .href()
            .map_err(|e| NavigationError::Browser(format!("{:?}", e)))?;
        Ok(PageUrl::parse(&href))
    }

    fn assign(&self, url: &PageUrl) -> Result<(), NavigationError> {
        Self::location_handle()?
            .set_href(&url.to_string())
            .map_err(|e| NavigationError::Browser(format!("{:?}", e)))
    }
}

/// In-memory navigator that records every assignment instead of leaving the page.
#[derive(Debug)]
pub struct RecordingNavigator {
    current: RefCell<PageUrl>,
    visited: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new(href: &str) -> Self {
        Self {
            current: RefCell::new(PageUrl::parse(href)),
            visited: RefCell::new(Vec::new()),
        }
    }

    /// Every href assigned so far, oldest first.
    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }

    pub fn last_visited(&self) -> Option<String> {
        self.visited.borrow().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn location(&self) -> Result<PageUrl, NavigationError> {
        Ok(self.current.borrow().clone())
    }

    fn assign(&self, url: &PageUrl) -> Result<(), NavigationError> {
        self.visited.borrow_mut().push(url.to_string());
        *self.current.borrow_mut() = url.clone();
        Ok(())
    }
}

/// Computes target URLs from the current location and navigates to them.
#[derive(Debug, Clone, Default)]
pub struct Redirector<N: Navigator> {
    navigator: N,
}

impl<N: Navigator> Redirector<N> {
    pub fn new(navigator: N) -> Self {
        Self { navigator }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Merge `changes` into the current URL and navigate there.
    pub fn redirect(&self, changes: &ChangeSet) -> Result<(), NavigationError> {
        let current = self.navigator.location()?;
        let target = build_url(&current, changes);
        info!("Redirecting to {}", target);
        self.navigator.assign(&target)
    }

    /// Navigate to the current path with every query parameter stripped.
    pub fn redirect_to_path(&self) -> Result<(), NavigationError> {
        let current = self.navigator.location()?;
        let target = clear_all_parameters(&current);
        info!("Clearing filters, redirecting to {}", target);
        self.navigator.assign(&target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn redirect_merges_into_current_location() {
        let redirector = Redirector::new(RecordingNavigator::new("/p/?q=dress&color=red"));
        let changes: ChangeSet = [("color", "red,blue"), ("size", "")].into_iter().collect();

        redirector.redirect(&changes).unwrap();

        assert_eq!(
            redirector.navigator().last_visited().as_deref(),
            Some("/p/?q=dress&color=red%2Cblue")
        );
    }

    #[test_log::test]
    fn redirect_to_path_strips_everything() {
        let redirector =
            Redirector::new(RecordingNavigator::new("https://shop.example/p/?color=red&page=2"));

        redirector.redirect_to_path().unwrap();

        assert_eq!(redirector.navigator().visited(), vec!["https://shop.example/p/"]);
    }

    #[test_log::test]
    fn recording_navigator_follows_assignments() {
        let redirector = Redirector::new(RecordingNavigator::new("/p/"));
        let first: ChangeSet = [("color", "3")].into_iter().collect();
        let second: ChangeSet = [("size", "7")].into_iter().collect();

        redirector.redirect(&first).unwrap();
        redirector.redirect(&second).unwrap();

        assert_eq!(
            redirector.navigator().visited(),
            vec!["/p/?color=3", "/p/?color=3&size=7"]
        );
    }

    #[test_log::test]
    fn error_messages() {
        assert_eq!(NavigationError::NoWindow.to_string(), "No browser window available");
        assert!(NavigationError::Browser("denied".into())
            .to_string()
            .ends_with("denied"));
    }
}
