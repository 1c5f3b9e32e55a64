//! Shop settings singleton.

use serde::{Deserialize, Serialize};

use choco_shelf_core::CurrencyCode;

/// Page theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Shop-wide settings, stored as a single record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Currency prices are displayed in.
    pub currency: CurrencyCode,
    /// BCP 47 language tag for the storefront copy.
    pub language: String,
    /// Page theme.
    pub theme: Theme,
    /// Whether order notifications are shown.
    pub notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::USD,
            language: "en".to_owned(),
            theme: Theme::Light,
            notifications: true,
        }
    }
}
