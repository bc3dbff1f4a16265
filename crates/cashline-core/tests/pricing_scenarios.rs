//! End-to-end pricing scenarios through the public API.

use std::collections::HashMap;

use cashline_core::{
    calculate_price, Claims, Coupon, CouponRecord, FixedAmount, LineItem, MemberDiscount, Money,
    Settings, Tax, TaxableItem,
};
use serde_json::json;

fn cents(c: u64) -> Money {
    Money::from_cents(c)
}

fn claims(value: serde_json::Value) -> Claims {
    value.as_object().cloned().expect("claims must be an object")
}

fn gold_member_settings(include_taxes: bool) -> Settings {
    Settings {
        prices_include_taxes: include_taxes,
        taxes: vec![Tax {
            percentage: 20,
            product_types: vec!["book".into()],
            countries: vec!["GB".into()],
        }],
        member_discounts: vec![MemberDiscount {
            claims: HashMap::from([("plan".to_string(), "gold".to_string())]),
            percentage: 10,
            product_types: vec!["book".into()],
            ..Default::default()
        }],
    }
}

#[test]
fn test_coupon_only_order() {
    let coupon = CouponRecord {
        code: "SAVE10".into(),
        percentage: 10,
        ..Default::default()
    };
    let items = [LineItem::new("BOOK-1", "book", cents(1000), 1)];

    let price = calculate_price(None, None, "US", "USD", Some(&coupon), &items);

    assert_eq!(price.subtotal, cents(1000));
    assert_eq!(price.discount, cents(100));
    assert_eq!(price.taxes, cents(0));
    assert_eq!(price.total, cents(900));
}

#[test]
fn test_inclusive_and_exclusive_share_the_shelf_price() {
    let items = [LineItem::new("BOOK-1", "book", cents(1000), 1)];

    let exclusive = calculate_price(
        Some(&gold_member_settings(false)),
        None,
        "GB",
        "GBP",
        None,
        &items,
    );
    assert_eq!(exclusive.subtotal, cents(1000));
    assert_eq!(exclusive.taxes, cents(200));
    assert_eq!(exclusive.total, cents(1200));

    let inclusive = calculate_price(
        Some(&gold_member_settings(true)),
        None,
        "GB",
        "GBP",
        None,
        &items,
    );
    assert_eq!(inclusive.subtotal, cents(833));
    assert_eq!(inclusive.taxes, cents(167));
    assert_eq!(inclusive.total, cents(1000));
}

#[test]
fn test_member_discount_gated_on_claims() {
    let settings = gold_member_settings(false);
    let items = [LineItem::new("BOOK-1", "book", cents(1000), 1)];

    let anonymous = calculate_price(Some(&settings), None, "US", "USD", None, &items);
    assert_eq!(anonymous.discount, cents(0));

    let silver = claims(json!({ "plan": "silver" }));
    let mismatched = calculate_price(Some(&settings), Some(&silver), "US", "USD", None, &items);
    assert_eq!(mismatched.discount, cents(0));

    let gold = claims(json!({ "plan": "gold" }));
    let member = calculate_price(Some(&settings), Some(&gold), "US", "USD", None, &items);
    assert_eq!(member.discount, cents(100));
    assert_eq!(member.total, cents(900));
}

#[test]
fn test_member_discount_skips_other_product_types() {
    let settings = gold_member_settings(false);
    let gold = claims(json!({ "plan": "gold" }));
    let items = [LineItem::new("VID-1", "video", cents(1000), 1)];

    let price = calculate_price(Some(&settings), Some(&gold), "US", "USD", None, &items);
    assert_eq!(price.discount, cents(0));
}

#[test]
fn test_member_and_coupon_discounts_stack() {
    let settings = gold_member_settings(false);
    let gold = claims(json!({ "plan": "gold" }));
    let coupon = CouponRecord {
        code: "FIVE".into(),
        fixed: vec![FixedAmount {
            amount: "5.00".into(),
            currency: "GBP".into(),
        }],
        ..Default::default()
    };
    let items = [LineItem::new("BOOK-1", "book", cents(10000), 2)];

    let price = calculate_price(Some(&settings), Some(&gold), "GB", "GBP", Some(&coupon), &items);

    let item = &price.items[0];
    assert_eq!(item.subtotal, cents(10000));
    assert_eq!(item.taxes, cents(2000));
    // 500 fixed from the coupon + 10% member discount on 10000
    assert_eq!(item.discount, cents(1500));
    assert_eq!(item.total, cents(10500));

    assert_eq!(price.subtotal, cents(20000));
    assert_eq!(price.discount, cents(3000));
    assert_eq!(price.taxes, cents(4000));
    assert_eq!(price.total, cents(21000));
}

#[test]
fn test_nested_claims_unlock_discount() {
    let settings = Settings {
        member_discounts: vec![MemberDiscount {
            claims: HashMap::from([("app_metadata.plan".to_string(), "gold".to_string())]),
            percentage: 25,
            ..Default::default()
        }],
        ..Default::default()
    };
    let caller = claims(json!({ "sub": "u-1", "app_metadata": { "plan": "gold" } }));
    let items = [LineItem::new("A", "book", cents(400), 1)];

    let price = calculate_price(Some(&settings), Some(&caller), "US", "USD", None, &items);
    assert_eq!(price.discount, cents(100));
}

#[test]
fn test_unparseable_fixed_amount_prices_as_zero() {
    let settings = Settings {
        member_discounts: vec![MemberDiscount {
            fixed: vec![FixedAmount {
                amount: "ten".into(),
                currency: "USD".into(),
            }],
            ..Default::default()
        }],
        ..Default::default()
    };
    let caller = claims(json!({}));
    let items = [LineItem::new("A", "book", cents(1000), 1)];

    let price = calculate_price(Some(&settings), Some(&caller), "US", "USD", None, &items);
    assert_eq!(price.discount, cents(0));
    assert_eq!(price.total, cents(1000));
}

#[test]
fn test_fixed_vat_bypasses_site_rules() {
    let settings = gold_member_settings(false);
    let items = [LineItem::new("BOOK-1", "book", cents(1000), 1).with_vat(5)];

    let price = calculate_price(Some(&settings), None, "GB", "GBP", None, &items);
    assert_eq!(price.taxes, cents(50));
}

#[test]
fn test_bundle_with_split_rates() {
    let settings = Settings {
        taxes: vec![
            Tax {
                percentage: 7,
                product_types: vec!["book".into()],
                ..Default::default()
            },
            Tax {
                percentage: 19,
                ..Default::default()
            },
        ],
        ..Default::default()
    };
    let bundle = LineItem::new("BOX", "box", cents(3000), 1).with_parts(vec![
        TaxableItem {
            sku: "B".into(),
            price: cents(2000),
            product_type: "book".into(),
        },
        TaxableItem {
            sku: "V".into(),
            price: cents(1000),
            product_type: "video".into(),
        },
    ]);

    let price = calculate_price(Some(&settings), None, "DE", "EUR", None, &[bundle]);
    assert_eq!(price.subtotal, cents(3000));
    assert_eq!(price.taxes, cents(140 + 190));
    assert_eq!(price.total, cents(3330));
}

#[test]
fn test_coupon_price_check_is_left_to_caller() {
    let coupon = CouponRecord {
        code: "BIG".into(),
        percentage: 10,
        minimum: vec![FixedAmount {
            amount: "100".into(),
            currency: "USD".into(),
        }],
        ..Default::default()
    };
    let items = [LineItem::new("A", "book", cents(1000), 1)];

    assert!(!coupon.valid_for_price("USD", cents(1000)));
    let price = calculate_price(None, None, "US", "USD", Some(&coupon), &items);
    assert_eq!(price.discount, cents(100));
}

#[test]
fn test_settings_file_round_trip_through_engine() {
    let settings = Settings::from_json_str(
        r#"{
            "prices_include_taxes": true,
            "taxes": [{ "percentage": 20, "countries": ["GB"] }]
        }"#,
    )
    .unwrap();
    let items = [LineItem::new("A", "book", cents(1000), 1)];

    let price = calculate_price(Some(&settings), None, "GB", "GBP", None, &items);
    assert_eq!(price.subtotal, cents(833));
    assert_eq!(price.total, cents(1000));

    let json = serde_json::to_value(&price).unwrap();
    assert_eq!(json["total"], 1000);
    assert_eq!(json["items"][0]["quantity"], 1);
}
