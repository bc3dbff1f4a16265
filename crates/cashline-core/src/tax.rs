//! # Tax Resolver
//!
//! Decides which amounts of a line item are taxed, and at what percentage.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. item.fixed_vat() != 0   → [(item price, fixed_vat)]                 │
//! │                               site rules are ignored entirely           │
//! │                                                                         │
//! │  2. bundle parts present    → [(part price, first matching rule %)…]    │
//! │                               one pair per part, 0% if nothing matches  │
//! │                                                                         │
//! │  3. otherwise               → [(item price, first matching rule %)]     │
//! │                               or [] when no rule matches                │
//! │                                                                         │
//! │  "First matching" is declaration order, not highest or lowest rate.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::item::Item;
use crate::money::Money;
use crate::settings::{Settings, Tax};

/// A taxable slice of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxAmount {
    pub price: Money,
    pub percentage: u64,
}

/// The first rule in `settings` that applies to the country and product type.
pub fn first_matching_rule<'a>(
    settings: &'a Settings,
    country: &str,
    product_type: &str,
) -> Option<&'a Tax> {
    settings
        .taxes
        .iter()
        .find(|tax| tax.applies_to(country, product_type))
}

/// Splits an item into the amounts that get taxed.
///
/// Without settings only a fixed VAT override can produce tax.
pub fn resolve_tax_amounts<I: Item + ?Sized>(
    settings: Option<&Settings>,
    item: &I,
    country: &str,
) -> Vec<TaxAmount> {
    if item.fixed_vat() != 0 {
        return vec![TaxAmount {
            price: item.price(),
            percentage: item.fixed_vat(),
        }];
    }

    let Some(settings) = settings else {
        return Vec::new();
    };

    let parts = item.taxable_items();
    if !parts.is_empty() {
        return parts
            .iter()
            .map(|part| TaxAmount {
                price: part.price,
                percentage: first_matching_rule(settings, country, &part.product_type)
                    .map_or(0, |tax| tax.percentage),
            })
            .collect();
    }

    first_matching_rule(settings, country, item.product_type())
        .map(|tax| TaxAmount {
            price: item.price(),
            percentage: tax.percentage,
        })
        .into_iter()
        .collect()
}
