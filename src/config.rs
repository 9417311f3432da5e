//! Application-level configuration constants and the per-page widget config.

use log::{info, warn};
use serde::Deserialize;
use std::fmt;

// URL parameter names
pub const PARAM_COLOR: &str = "color";
pub const PARAM_SIZE: &str = "size";
pub const PARAM_SORTING: &str = "sorting";
pub const PARAM_PRICE_GTE: &str = "price_gte";
pub const PARAM_PRICE_LTE: &str = "price_lte";
pub const PARAM_PAGE: &str = "page";

// Price slider limits
pub const PRICE_FLOOR: i64 = 1;
pub const PRICE_CEILING: i64 = 10_000;
pub const MIN_PRICE_GAP: i64 = 10;

// Widget behavior
pub const ZOOM_SCALE: f64 = 2.5;
pub const CAROUSEL_MARGIN_PX: f64 = 8.0;

// Host elements in the server-rendered page
pub const CONFIG_ELEMENT_ID: &str = "storefront-config";
pub const FILTER_PANEL_HOST: &str = "filter-panel";
pub const STATIC_CAROUSEL_HOST: &str = "static-carousel";
pub const DYNAMIC_CAROUSEL_HOST: &str = "dynamic-carousel";
pub const ZOOM_HOST: &str = "product-zoom";
pub const PAGER_HOST: &str = "listing-pager";

/// A selectable filter value as rendered by the server, e.g. a color swatch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FilterOption {
    /// Token written into the URL (usually the database id).
    pub value: String,
    pub label: String,
    /// Optional swatch color, `#rrggbb`.
    #[serde(default)]
    pub hex_code: Option<String>,
}

/// Data the server embeds into the page for the widgets.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub colors: Vec<FilterOption>,
    pub sizes: Vec<FilterOption>,
    /// Highest price among the listed products; tightens the slider ceiling.
    pub max_price: Option<i64>,
    pub carousel_images: Vec<String>,
    pub zoom_image: Option<String>,
    /// Number of listing pages; 0 leaves the pager empty.
    pub page_count: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingElement(String),
    InvalidJson(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingElement(id) => write!(f, "No config element with id '{}'", id),
            ConfigError::InvalidJson(e) => write!(f, "Invalid page config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::InvalidJson)
    }

    /// Read the JSON config embedded in the page under [`CONFIG_ELEMENT_ID`].
    pub fn from_document() -> Result<Self, ConfigError> {
        let element = gloo_utils::document()
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .ok_or_else(|| ConfigError::MissingElement(CONFIG_ELEMENT_ID.to_string()))?;
        let json = element.text_content().unwrap_or_default();
        Self::from_json(&json)
    }

    /// Like [`PageConfig::from_document`], falling back to defaults.
    pub fn load() -> Self {
        match Self::from_document() {
            Ok(config) => {
                info!(
                    "Loaded page config: {} colors, {} sizes, {} carousel images",
                    config.colors.len(),
                    config.sizes.len(),
                    config.carousel_images.len()
                );
                config
            }
            Err(e) => {
                warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Slider ceiling for this page.
    pub fn price_ceiling(&self) -> i64 {
        self.max_price.unwrap_or(PRICE_CEILING)
    }
}
