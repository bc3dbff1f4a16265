//! # Price Calculator
//!
//! Drives the per-item computation and folds the results into order totals.
//!
//! ## Per-Item Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  item.price() ──► subtotal                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resolve_tax_amounts() ──► [(price, %), …]                              │
//! │       │                                                                 │
//! │       ├── prices include taxes?  subtotal = Σ price / (100+%) × 100     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  taxes = Σ price × % / 100                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  discount = coupon + Σ member discounts                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total = max(0, subtotal − discount + taxes)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Order totals are the per-item figures × quantity, except the order total,
//! which is always re-derived from the order subtotal, discount and taxes.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use ts_rs::TS;

use crate::claims::Claims;
use crate::coupon::Coupon;
use crate::discount::{calculate_discount, coupon_applies, member_discount_applies};
use crate::item::Item;
use crate::money::Money;
use crate::settings::Settings;
use crate::tax::resolve_tax_amounts;

// =============================================================================
// Output Types
// =============================================================================

/// The total price of all line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Price {
    /// One entry per input item, in input order.
    pub items: Vec<ItemPrice>,

    pub subtotal: Money,
    pub discount: Money,
    pub taxes: Money,
    pub total: Money,
}

/// The price of a single unit of a line item, plus its quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemPrice {
    pub quantity: u64,

    pub subtotal: Money,
    pub discount: Money,
    pub taxes: Money,
    pub total: Money,
}

// =============================================================================
// Calculation
// =============================================================================

/// Calculates the final price of `items`.
///
/// - `settings: None` means no tax rules and no member discounts
///   (a per-item fixed VAT still applies)
/// - `claims: None` means an anonymous caller: member discounts are skipped
/// - `coupon: None` means no coupon was redeemed
///
/// The coupon's price validity is the caller's concern; it is not checked
/// here.
///
/// ## Example
/// ```rust
/// use cashline_core::{calculate_price, LineItem, Money, Settings, Tax};
///
/// let settings = Settings {
///     taxes: vec![Tax { percentage: 20, ..Default::default() }],
///     ..Default::default()
/// };
/// let items = [LineItem::new("SKU-1", "book", Money::from_cents(1000), 2)];
///
/// let price = calculate_price(Some(&settings), None, "GB", "GBP", None, &items);
/// assert_eq!(price.items[0].total.cents(), 1200);
/// assert_eq!(price.total.cents(), 2400);
/// ```
pub fn calculate_price<I: Item>(
    settings: Option<&Settings>,
    claims: Option<&Claims>,
    country: &str,
    currency: &str,
    coupon: Option<&dyn Coupon>,
    items: &[I],
) -> Price {
    let mut price = Price::default();

    for item in items {
        let item_price = price_item(settings, claims, country, currency, coupon, item);
        trace!(
            sku = %item.sku(),
            quantity = item_price.quantity,
            subtotal = %item_price.subtotal,
            discount = %item_price.discount,
            taxes = %item_price.taxes,
            total = %item_price.total,
            "Priced line item"
        );

        let quantity = item_price.quantity;
        price.subtotal += item_price.subtotal * quantity;
        price.discount += item_price.discount * quantity;
        price.taxes += item_price.taxes * quantity;
        price.items.push(item_price);
    }

    price.total = (price.subtotal + price.taxes).saturating_sub(price.discount);

    debug!(
        items = price.items.len(),
        currency = %currency,
        country = %country,
        subtotal = %price.subtotal,
        discount = %price.discount,
        taxes = %price.taxes,
        total = %price.total,
        "Calculated order price"
    );

    price
}

/// Prices one unit of `item`.
fn price_item<I: Item + ?Sized>(
    settings: Option<&Settings>,
    claims: Option<&Claims>,
    country: &str,
    currency: &str,
    coupon: Option<&dyn Coupon>,
    item: &I,
) -> ItemPrice {
    let include_taxes = settings.is_some_and(|s| s.prices_include_taxes);

    let mut item_price = ItemPrice {
        quantity: item.quantity(),
        subtotal: item.price(),
        ..Default::default()
    };

    let tax_amounts = resolve_tax_amounts(settings, item, country);
    if !tax_amounts.is_empty() {
        if include_taxes {
            item_price.subtotal = Money::zero();
        }
        for tax in &tax_amounts {
            let mut taxable = tax.price;
            if include_taxes {
                taxable = taxable.excluding_tax(tax.percentage);
                item_price.subtotal += taxable;
            }
            item_price.taxes += taxable.percent_of(tax.percentage);
        }
    }

    if let Some(coupon) = coupon.filter(|c| coupon_applies(*c, item)) {
        item_price.discount = calculate_discount(
            item_price.subtotal,
            item_price.taxes,
            coupon.percentage_discount(),
            coupon.fixed_discount(currency),
            include_taxes,
        );
    }

    if let Some(settings) = settings {
        for discount in &settings.member_discounts {
            if member_discount_applies(discount, claims, item) {
                item_price.discount += calculate_discount(
                    item_price.subtotal,
                    item_price.taxes,
                    discount.percentage,
                    discount.fixed_discount(currency),
                    include_taxes,
                );
            }
        }
    }

    item_price.total = (item_price.subtotal + item_price.taxes).saturating_sub(item_price.discount);

    item_price
}

// =============================================================================
// Unit Tests
// =============================================================================
