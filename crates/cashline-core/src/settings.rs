//! # Pricing Settings
//!
//! Site-wide rules the engine prices against: whether shelf prices already
//! include tax, the ordered tax rules, and the member discounts.
//!
//! ## Settings File Format
//! ```json
//! {
//!   "prices_include_taxes": true,
//!   "taxes": [
//!     { "percentage": 7,  "product_types": ["book"], "countries": ["DE"] },
//!     { "percentage": 19, "countries": ["DE"] }
//!   ],
//!   "member_discounts": [
//!     {
//!       "claims": { "app_metadata.plan": "gold" },
//!       "percentage": 10,
//!       "fixed": [{ "amount": "2.50", "currency": "EUR" }],
//!       "product_types": ["book"]
//!     }
//!   ]
//! }
//! ```
//!
//! Tax rules are tried top to bottom and the first match wins, so specific
//! rules go above general ones.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::{SettingsError, SettingsResult};
use crate::money::Money;
use crate::validation::validate_currency;

// =============================================================================
// Settings
// =============================================================================

/// Site-wide settings for price calculation. Read-only during a calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Settings {
    /// Shelf prices already contain tax; the engine backs it out.
    #[serde(default)]
    pub prices_include_taxes: bool,

    /// Tax rules in priority order.
    #[serde(default)]
    pub taxes: Vec<Tax>,

    /// Discounts granted to authenticated members.
    #[serde(default)]
    pub member_discounts: Vec<MemberDiscount>,
}

impl Settings {
    /// Decodes and validates settings from a JSON document.
    pub fn from_json_str(json: &str) -> SettingsResult<Settings> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        debug!(
            taxes = settings.taxes.len(),
            member_discounts = settings.member_discounts.len(),
            prices_include_taxes = settings.prices_include_taxes,
            "Loaded pricing settings"
        );
        Ok(settings)
    }

    /// Reads settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> SettingsResult<Settings> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Settings::from_json_str(&json)
    }

    /// Rejects malformed currency codes.
    ///
    /// Unparseable fixed amounts are only warned about: at pricing time they
    /// count as zero, and loading keeps that behaviour.
    pub fn validate(&self) -> SettingsResult<()> {
        for (i, discount) in self.member_discounts.iter().enumerate() {
            for (j, fixed) in discount.fixed.iter().enumerate() {
                let field = format!("member_discounts[{i}].fixed[{j}]");
                validate_currency(&fixed.currency).map_err(|e| SettingsError::Invalid {
                    field: format!("{field}.currency"),
                    reason: e.to_string(),
                })?;
                if Money::parse_major(&fixed.amount).is_none() {
                    warn!(field = %field, amount = %fixed.amount, "Fixed amount will price as zero");
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tax
// =============================================================================

/// A tax, optionally restricted to product types and destination countries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Tax {
    /// Whole percentage: 20 means 20%.
    pub percentage: u64,

    /// Empty means every product type.
    #[serde(default)]
    pub product_types: Vec<String>,

    /// Empty means every country.
    #[serde(default)]
    pub countries: Vec<String>,
}

impl Tax {
    /// True when the rule covers both the country AND the product type.
    ///
    /// ## Example
    /// ```rust
    /// use cashline_core::settings::Tax;
    ///
    /// let tax = Tax {
    ///     percentage: 7,
    ///     product_types: vec!["book".into()],
    ///     countries: vec![],
    /// };
    /// assert!(tax.applies_to("DE", "book"));
    /// assert!(!tax.applies_to("DE", "ebook"));
    /// ```
    pub fn applies_to(&self, country: &str, product_type: &str) -> bool {
        allows(&self.product_types, product_type) && allows(&self.countries, country)
    }
}

// =============================================================================
// Member Discount
// =============================================================================

/// A fixed amount in one currency, stored as a major-unit decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FixedAmount {
    /// e.g. `"2.50"`.
    pub amount: String,
    pub currency: String,
}

/// Looks up the fixed amount for `currency`, parsed leniently.
pub(crate) fn fixed_for_currency(fixed: &[FixedAmount], currency: &str) -> Money {
    fixed
        .iter()
        .find(|f| f.currency == currency)
        .map(|f| Money::parse_major_lenient(&f.amount, currency))
        .unwrap_or_default()
}

/// A discount for callers whose claims satisfy `claims`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MemberDiscount {
    /// Claim path → required value. All must match.
    #[serde(default)]
    pub claims: HashMap<String, String>,

    #[serde(default)]
    pub percentage: u64,

    /// Fixed amount per currency.
    #[serde(default)]
    pub fixed: Vec<FixedAmount>,

    /// Empty means every product type.
    #[serde(default)]
    pub product_types: Vec<String>,

    /// Empty means every SKU.
    #[serde(default)]
    pub products: Vec<String>,
}

impl MemberDiscount {
    pub fn valid_for_type(&self, product_type: &str) -> bool {
        allows(&self.product_types, product_type)
    }

    pub fn valid_for_product(&self, sku: &str) -> bool {
        allows(&self.products, sku)
    }

    /// The fixed discount for `currency`, or zero if none is configured.
    pub fn fixed_discount(&self, currency: &str) -> Money {
        fixed_for_currency(&self.fixed, currency)
    }
}

/// An empty allow-list allows everything.
pub(crate) fn allows(list: &[String], value: &str) -> bool {
    list.is_empty() || list.iter().any(|v| v == value)
}

// =============================================================================
// Unit Tests
// =============================================================================
