//! # Order Quote
//!
//! Prices an order file and prints the breakdown as JSON.
//!
//! ## Usage
//! ```bash
//! # Price with no site settings (no taxes, no member discounts)
//! cargo run -p cashline-core --bin quote -- --order ./order.json
//!
//! # Price against site settings
//! cargo run -p cashline-core --bin quote -- --order ./order.json --settings ./settings.json
//!
//! # Or point at the settings through the environment
//! CASHLINE_SETTINGS=./settings.json cargo run -p cashline-core --bin quote -- --order ./order.json
//! ```
//!
//! ## Order File
//! ```json
//! {
//!   "country": "DE",
//!   "currency": "EUR",
//!   "claims": { "app_metadata": { "plan": "gold" } },
//!   "coupon": { "code": "SAVE10", "percentage": 10 },
//!   "line_items": [
//!     { "sku": "BOOK-1", "price": 1999, "product_type": "book", "quantity": 2 }
//!   ]
//! }
//! ```
//!
//! Logs go to stderr (`RUST_LOG` controls the level); stdout only carries
//! the price JSON.

use std::env;
use std::path::{Path, PathBuf};

use cashline_core::validation::{validate_country, validate_currency, validate_line_items};
use cashline_core::{
    calculate_price, Claims, CoreError, CoreResult, Coupon, CouponRecord, LineItem, Price,
    Settings,
};
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable naming the settings file.
const SETTINGS_ENV: &str = "CASHLINE_SETTINGS";

/// An order as handed over by the order flow.
#[derive(Debug, Deserialize)]
struct OrderInput {
    #[serde(default)]
    country: String,

    #[serde(default = "default_currency")]
    currency: String,

    #[serde(default)]
    claims: Option<Claims>,

    #[serde(default)]
    coupon: Option<CouponRecord>,

    line_items: Vec<LineItem>,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut order_path: Option<PathBuf> = None;
    let mut settings_path: Option<PathBuf> = env::var_os(SETTINGS_ENV).map(PathBuf::from);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--order" | "-o" => {
                if i + 1 < args.len() {
                    order_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--settings" | "-s" => {
                if i + 1 < args.len() {
                    settings_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(2);
            }
        }
        i += 1;
    }

    let Some(order_path) = order_path else {
        print_usage();
        std::process::exit(2);
    };

    let settings = match &settings_path {
        Some(path) => {
            info!(path = %path.display(), "Loading settings");
            Some(Settings::load(path)?)
        }
        None => {
            info!("No settings given, pricing without taxes or member discounts");
            None
        }
    };

    let order = read_order(&order_path)?;
    let price = quote(settings.as_ref(), &order)?;

    println!("{}", serde_json::to_string_pretty(&price)?);
    Ok(())
}

fn read_order(path: &Path) -> CoreResult<OrderInput> {
    let json = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&json)?)
}

/// Validates the order, drops a coupon below its minimum, and prices it.
fn quote(settings: Option<&Settings>, order: &OrderInput) -> CoreResult<Price> {
    validate_currency(&order.currency)?;
    validate_country(&order.country)?;
    validate_line_items(&order.line_items)?;

    let claims = order.claims.as_ref();
    let mut coupon: Option<&dyn Coupon> = order.coupon.as_ref().map(|c| c as &dyn Coupon);

    if let Some(record) = &order.coupon {
        let undiscounted = calculate_price(
            settings,
            claims,
            &order.country,
            &order.currency,
            None,
            &order.line_items,
        );
        if !record.valid_for_price(&order.currency, undiscounted.subtotal) {
            warn!(
                code = %record.code,
                subtotal = %undiscounted.subtotal,
                "Coupon minimum not met, ignoring coupon"
            );
            coupon = None;
        }
    }

    Ok(calculate_price(
        settings,
        claims,
        &order.country,
        &order.currency,
        coupon,
        &order.line_items,
    ))
}

fn print_usage() {
    eprintln!("Usage: quote --order <order.json> [--settings <settings.json>]");
    eprintln!("       settings may also come from ${SETTINGS_ENV}");
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cashline_core=trace` - Show every priced line
/// - Default: INFO level, DEBUG for cashline
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cashline_core=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
