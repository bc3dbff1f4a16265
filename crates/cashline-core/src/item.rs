//! # Line Items
//!
//! The engine prices anything implementing [`Item`]. Order construction
//! resolves each line's product metadata (price, type, VAT override, bundle
//! contents) and hands the engine a materialized list.
//!
//! ## Single vs Bundle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Single                         Bundle                                  │
//! │  ──────                         ──────                                  │
//! │  one product type               parts with their own product types      │
//! │  taxed at one rate              each part taxed at its own rate         │
//! │                                                                         │
//! │  "ebook" 10.00                  "course box" 30.00                      │
//! │    └─ 10.00 @ ebook rate          ├─ 20.00 "book"  @ book rate          │
//! │                                   └─ 10.00 "video" @ video rate         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Item Capability
// =============================================================================

/// What the engine needs to know about a line item.
pub trait Item {
    fn sku(&self) -> &str;

    /// Unit price in minor units.
    fn price(&self) -> Money;

    fn product_type(&self) -> &str;

    /// Per-item VAT percentage that bypasses the site tax rules. Zero = none.
    fn fixed_vat(&self) -> u64;

    /// Separately taxed components of a bundle. Empty for single products.
    fn taxable_items(&self) -> &[TaxableItem];

    fn quantity(&self) -> u64;
}

impl<T: Item + ?Sized> Item for &T {
    fn sku(&self) -> &str {
        (**self).sku()
    }
    fn price(&self) -> Money {
        (**self).price()
    }
    fn product_type(&self) -> &str {
        (**self).product_type()
    }
    fn fixed_vat(&self) -> u64 {
        (**self).fixed_vat()
    }
    fn taxable_items(&self) -> &[TaxableItem] {
        (**self).taxable_items()
    }
    fn quantity(&self) -> u64 {
        (**self).quantity()
    }
}

impl<T: Item + ?Sized> Item for Box<T> {
    fn sku(&self) -> &str {
        (**self).sku()
    }
    fn price(&self) -> Money {
        (**self).price()
    }
    fn product_type(&self) -> &str {
        (**self).product_type()
    }
    fn fixed_vat(&self) -> u64 {
        (**self).fixed_vat()
    }
    fn taxable_items(&self) -> &[TaxableItem] {
        (**self).taxable_items()
    }
    fn quantity(&self) -> u64 {
        (**self).quantity()
    }
}

// =============================================================================
// Concrete Line Items
// =============================================================================

/// One component of a bundle, taxed on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxableItem {
    #[serde(default)]
    pub sku: String,
    pub price: Money,
    pub product_type: String,
}

/// Whether a line is one product or a bundle of separately taxed parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ItemKind {
    #[default]
    Single,
    Bundle(Vec<TaxableItem>),
}

/// A priced order line, as built from the product's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub sku: String,

    #[serde(default)]
    pub title: String,

    /// Unit price in minor units.
    pub price: Money,

    pub product_type: String,

    /// VAT override percentage; 0 defers to the site tax rules.
    #[serde(default)]
    pub vat: u64,

    pub quantity: u64,

    #[serde(default)]
    pub kind: ItemKind,
}

impl LineItem {
    /// Creates a single-product line.
    pub fn new(
        sku: impl Into<String>,
        product_type: impl Into<String>,
        price: Money,
        quantity: u64,
    ) -> Self {
        LineItem {
            sku: sku.into(),
            title: String::new(),
            price,
            product_type: product_type.into(),
            vat: 0,
            quantity,
            kind: ItemKind::Single,
        }
    }

    /// Sets the VAT override.
    pub fn with_vat(mut self, vat: u64) -> Self {
        self.vat = vat;
        self
    }

    /// Turns the line into a bundle of the given parts.
    pub fn with_parts(mut self, parts: Vec<TaxableItem>) -> Self {
        self.kind = ItemKind::Bundle(parts);
        self
    }

    pub fn is_bundle(&self) -> bool {
        matches!(self.kind, ItemKind::Bundle(_))
    }
}

impl Item for LineItem {
    fn sku(&self) -> &str {
        &self.sku
    }

    fn price(&self) -> Money {
        self.price
    }

    fn product_type(&self) -> &str {
        &self.product_type
    }

    fn fixed_vat(&self) -> u64 {
        self.vat
    }

    fn taxable_items(&self) -> &[TaxableItem] {
        match &self.kind {
            ItemKind::Single => &[],
            ItemKind::Bundle(parts) => parts,
        }
    }

    fn quantity(&self) -> u64 {
        self.quantity
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
