//! URL query codec.
//!
//! Everything here is a pure function of a [`PageUrl`]: the current location is
//! passed in by the caller (see [`crate::navigation::Navigator`]) and new URLs
//! are returned rather than assigned.

use crate::config::PARAM_PAGE;
use crate::utils::parse_int_prefix;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

// Digits following any `page=`
static PAGE_PARAM_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(page=)\d+").unwrap());

/// A parsed page URL with ordered query pairs.
///
/// Query pairs follow the browser's `URLSearchParams` model: order is kept and
/// the same name may appear more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUrl {
    base: String,
    pairs: Vec<(String, String)>,
    fragment: Option<String>,
}

impl PageUrl {
    /// Parse an absolute or relative href. Never fails: malformed escapes are
    /// decoded lossily.
    pub fn parse(href: &str) -> Self {
        let (rest, fragment) = match href.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (href, None),
        };
        let (base, query) = rest.split_once('?').unwrap_or((rest, ""));

        Self {
            base: base.to_string(),
            pairs: parse_query(query),
            fragment,
        }
    }

    /// Scheme, authority and path, without query or fragment.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Path component only, e.g. `/products/dresses/`.
    pub fn path(&self) -> &str {
        match self.base.find("://") {
            Some(idx) => {
                let after_scheme = &self.base[idx + 3..];
                after_scheme
                    .find('/')
                    .map(|slash| &after_scheme[slash..])
                    .unwrap_or("/")
            }
            None => &self.base,
        }
    }

    /// Path and query, the form server-rendered links use.
    pub fn full_path(&self) -> String {
        if self.pairs.is_empty() {
            self.path().to_string()
        } else {
            format!("{}?{}", self.path(), self.query_string())
        }
    }

    /// First value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the first occurrence of `name` and drop the others, or append.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.pairs.iter().position(|(k, _)| k == name) {
            Some(first) => {
                self.pairs[first].1 = value.to_string();
                let mut idx = 0;
                self.pairs.retain(|(k, _)| {
                    let keep = idx <= first || k != name;
                    idx += 1;
                    keep
                });
            }
            None => self.pairs.push((name.to_string(), value.to_string())),
        }
    }

    /// Remove every occurrence of `name`.
    pub fn delete(&mut self, name: &str) {
        self.pairs.retain(|(k, _)| k != name);
    }

    /// Serialized query string without the leading `?`.
    pub fn query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Display for PageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        if !self.pairs.is_empty() {
            write!(f, "?{}", self.query_string())?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (name, value) = segment.split_once('=').unwrap_or((segment, ""));
            (decode_component(name), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned(),
    }
}

// `urlencoding` differs from form encoding on space, `*` and `~`
fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw)
        .replace("%20", "+")
        .replace("%2A", "*")
        .replace('~', "%7E")
}

/// Parameter changes to merge into a URL, in insertion order.
///
/// An empty value means "remove this parameter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    entries: Vec<(String, String)>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `name`, keeping its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut changes = ChangeSet::new();
        for (k, v) in iter {
            changes.insert(k, v);
        }
        changes
    }
}

/// Read a comma-separated parameter as a list of tokens.
///
/// Order and empty tokens are kept as-is. A missing or empty parameter yields
/// an empty list.
pub fn parse_list(url: &PageUrl, param_name: &str) -> Vec<String> {
    match url.get(param_name) {
        Some(value) if !value.is_empty() => value.split(',').map(String::from).collect(),
        _ => Vec::new(),
    }
}

/// Merge `changes` into a copy of `current`.
pub fn build_url(current: &PageUrl, changes: &ChangeSet) -> PageUrl {
    let mut url = current.clone();
    for (name, value) in changes.iter() {
        if value.is_empty() {
            url.delete(name);
        } else {
            let values: Vec<&str> = value.split(',').collect();
            url.set(name, &values.join(","));
        }
    }
    url
}

/// The same page with no query string.
pub fn clear_all_parameters(current: &PageUrl) -> PageUrl {
    PageUrl {
        base: current.base.clone(),
        pairs: Vec::new(),
        fragment: None,
    }
}

/// Point a pager link at `page`, replacing an existing page number.
pub fn with_page(href: &str, page: usize) -> String {
    if PAGE_PARAM_REGEX.is_match(href) {
        PAGE_PARAM_REGEX
            .replace_all(href, format!("${{1}}{}", page).as_str())
            .into_owned()
    } else if !href.contains('?') {
        format!("{}?{}={}", href, PARAM_PAGE, page)
    } else {
        format!("{}&{}={}", href, PARAM_PAGE, page)
    }
}

/// One entry of the listing pager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub page: usize,
    pub href: String,
    pub current: bool,
}

/// Links to every page of a listing, pointing at the current path and query.
/// A missing or malformed `page` parameter means page 1.
pub fn page_links(current: &PageUrl, page_count: usize) -> Vec<PageLink> {
    let current_page = current
        .get(PARAM_PAGE)
        .and_then(parse_int_prefix)
        .and_then(|page| usize::try_from(page).ok())
        .filter(|page| *page > 0)
        .unwrap_or(1);
    let href = current.full_path();

    (1..=page_count)
        .map(|page| PageLink {
            page,
            href: with_page(&href, page),
            current: page == current_page,
        })
        .collect()
}
