//! # Discount Resolver
//!
//! Works out how much of an item's price a coupon or member discount removes.
//!
//! ## Discount Formula
//! ```text
//! base     = subtotal            (+ taxes when prices include taxes)
//! discount = round(base × percentage / 100) + fixed
//! discount = min(discount, base)
//! ```
//!
//! Each discount is clamped on its own. Stacked discounts are summed by the
//! caller and only the item total is clamped afterwards.

use crate::claims::{has_claims, Claims};
use crate::coupon::Coupon;
use crate::item::Item;
use crate::money::Money;
use crate::settings::MemberDiscount;

/// Computes one discount against an item's subtotal.
///
/// ## Example
/// ```rust
/// use cashline_core::discount::calculate_discount;
/// use cashline_core::money::Money;
///
/// let base = Money::from_cents(100);
/// // 150% of 100 would be 150, but a discount never exceeds its base
/// let discount = calculate_discount(base, Money::zero(), 150, Money::zero(), false);
/// assert_eq!(discount.cents(), 100);
/// ```
pub fn calculate_discount(
    subtotal: Money,
    taxes: Money,
    percentage: u64,
    fixed: Money,
    include_taxes: bool,
) -> Money {
    let base = if include_taxes { subtotal + taxes } else { subtotal };

    let mut discount = Money::zero();
    if percentage > 0 {
        discount = base.percent_of(percentage);
    }
    discount += fixed;

    discount.min(base)
}

/// A coupon applies when both its product-type and SKU checks pass.
pub fn coupon_applies<C, I>(coupon: &C, item: &I) -> bool
where
    C: Coupon + ?Sized,
    I: Item + ?Sized,
{
    coupon.valid_for_type(item.product_type()) && coupon.valid_for_product(item.sku())
}

/// A member discount applies when the caller is authenticated, every required
/// claim matches, and the discount covers the item's product type.
pub fn member_discount_applies<I: Item + ?Sized>(
    discount: &MemberDiscount,
    claims: Option<&Claims>,
    item: &I,
) -> bool {
    match claims {
        Some(claims) => {
            has_claims(claims, &discount.claims) && discount.valid_for_type(item.product_type())
        }
        None => false,
    }
}
