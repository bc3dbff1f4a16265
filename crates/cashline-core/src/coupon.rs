//! # Coupons
//!
//! A redeemed coupon code is looked up elsewhere; the engine only sees the
//! [`Coupon`] capability. [`CouponRecord`] is the plain-data implementation
//! used when coupons are kept alongside the settings.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::settings::{allows, fixed_for_currency, FixedAmount};

/// What the engine needs from a coupon.
pub trait Coupon {
    fn valid_for_type(&self, product_type: &str) -> bool;

    /// Checked by the caller against the order, not per item by the engine.
    fn valid_for_price(&self, currency: &str, price: Money) -> bool;

    fn valid_for_product(&self, sku: &str) -> bool;

    fn percentage_discount(&self) -> u64;

    fn fixed_discount(&self, currency: &str) -> Money;
}

/// A coupon as stored in a coupon list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CouponRecord {
    pub code: String,

    #[serde(default)]
    pub percentage: u64,

    #[serde(default)]
    pub fixed: Vec<FixedAmount>,

    /// Empty means every product type.
    #[serde(default)]
    pub product_types: Vec<String>,

    /// Empty means every SKU.
    #[serde(default)]
    pub products: Vec<String>,

    /// Minimum order amount per currency. A currency with no entry has no
    /// minimum.
    #[serde(default)]
    pub minimum: Vec<FixedAmount>,
}

impl Coupon for CouponRecord {
    fn valid_for_type(&self, product_type: &str) -> bool {
        allows(&self.product_types, product_type)
    }

    fn valid_for_price(&self, currency: &str, price: Money) -> bool {
        match self.minimum.iter().find(|m| m.currency == currency) {
            Some(minimum) => price >= Money::parse_major_lenient(&minimum.amount, currency),
            None => true,
        }
    }

    fn valid_for_product(&self, sku: &str) -> bool {
        allows(&self.products, sku)
    }

    fn percentage_discount(&self) -> u64 {
        self.percentage
    }

    fn fixed_discount(&self, currency: &str) -> Money {
        fixed_for_currency(&self.fixed, currency)
    }
}
