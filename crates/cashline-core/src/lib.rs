//! # cashline-core: Pure Pricing Engine
//!
//! Computes the final monetary total of an order's line items: per-item
//! taxes, coupon discounts and member discounts, under either tax-inclusive
//! or tax-exclusive shelf prices.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Order flow (HTTP, auth, product lookup, persistence) - elsewhere       │
//! │                                                                         │
//! │     Settings   Claims   Coupon   [Item]   country   currency            │
//! │         │         │        │        │        │          │               │
//! │  ┌──────▼─────────▼────────▼────────▼────────▼──────────▼───────────┐   │
//! │  │               ★ cashline-core (THIS CRATE) ★                     │   │
//! │  │                                                                  │   │
//! │  │   ┌───────────┐    ┌────────────┐    ┌──────────────────────┐   │   │
//! │  │   │    tax    │───►│  discount  │───►│     calculator       │   │   │
//! │  │   │ resolver  │    │  resolver  │    │ items → order totals │   │   │
//! │  │   └───────────┘    └────────────┘    └──────────────────────┘   │   │
//! │  │                                                                  │   │
//! │  │   NO NETWORK • NO DATABASE • SAME INPUT = SAME OUTPUT            │   │
//! │  └──────────────────────────────┬───────────────────────────────────┘   │
//! │                                 ▼                                       │
//! │                 Price { items, subtotal, discount, taxes, total }       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type and the banker's rounding primitive
//! - [`settings`] - Site-wide tax rules and member discounts
//! - [`claims`] - Matching member discounts against token claims
//! - [`item`] - The `Item` capability and concrete line items
//! - [`coupon`] - The `Coupon` capability and coupon records
//! - [`tax`] - Tax resolver
//! - [`discount`] - Discount resolver
//! - [`calculator`] - `calculate_price` and the `Price` breakdown
//! - [`validation`] - Order input bounds
//! - [`error`] - Error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: `calculate_price` is deterministic and safe to call
//!    concurrently on disjoint inputs
//! 2. **Integer Money**: amounts are minor units; floats only live between a
//!    percentage and its rounding
//! 3. **Banker's Rounding**: every fractional amount rounds half to even
//! 4. **Absent Means Off**: no settings, claims or coupon disables that
//!    feature instead of failing
//!
//! ## Example Usage
//!
//! ```rust
//! use cashline_core::{calculate_price, CouponRecord, LineItem, Money};
//!
//! let coupon = CouponRecord { code: "SAVE10".into(), percentage: 10, ..Default::default() };
//! let items = [LineItem::new("SKU-1", "book", Money::from_cents(1000), 1)];
//!
//! let price = calculate_price(None, None, "US", "USD", Some(&coupon), &items);
//! assert_eq!(price.discount.cents(), 100);
//! assert_eq!(price.total.cents(), 900);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod claims;
pub mod coupon;
pub mod discount;
pub mod error;
pub mod item;
pub mod money;
pub mod settings;
pub mod tax;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{calculate_price, ItemPrice, Price};
pub use claims::Claims;
pub use coupon::{Coupon, CouponRecord};
pub use error::{CoreError, CoreResult, SettingsError, ValidationError};
pub use item::{Item, ItemKind, LineItem, TaxableItem};
pub use money::Money;
pub use settings::{FixedAmount, MemberDiscount, Settings, Tax};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line.
pub const MAX_ITEM_QUANTITY: u64 = 999;

/// Maximum unit price in minor units (10 billion major units).
pub const MAX_UNIT_PRICE: u64 = 1_000_000_000_000;

/// Maximum number of lines in one order.
pub const MAX_LINE_ITEMS: u64 = 100;
