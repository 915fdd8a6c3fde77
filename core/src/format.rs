//! Number, price and image-URL formatting for values returned by the API.
//!
//! Formatting never fails: anything that is not a number (or a numeric
//! string) formats to the empty string.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::query::{build_query_string, normalize_query_values};

/// Precision beyond this carries no information in an `f64`.
const MAX_PRECISION: u32 = 20;

/// Separators used when rendering a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delimiter {
    pub thousands: String,
    pub decimal: String,
}

impl Default for Delimiter {
    fn default() -> Self {
        Self {
            thousands: String::new(),
            decimal: ".".to_string(),
        }
    }
}

/// Currency display settings, as found on the API's currency objects.
///
/// Every field is optional on the wire. `precision: None` disables rounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyOptions {
    pub precision: Option<u32>,
    pub delimiter: Delimiter,
    pub symbol: String,
    /// Template with `{symbol}` and `{price}` placeholders.
    pub format: String,
}

impl Default for CurrencyOptions {
    fn default() -> Self {
        Self {
            precision: None,
            delimiter: Delimiter::default(),
            symbol: String::new(),
            format: "{price}".to_string(),
        }
    }
}

/// Format a number with grouping, rounding and decimal padding.
///
/// ```
/// use clayful_core::format::{format_number, CurrencyOptions, Delimiter};
///
/// let currency = CurrencyOptions {
///     precision: Some(2),
///     delimiter: Delimiter { thousands: ",".into(), decimal: ".".into() },
///     ..Default::default()
/// };
/// assert_eq!(format_number(&serde_json::json!(1234567.5), &currency), "1,234,567.50");
/// ```
pub fn format_number(value: &Value, currency: &CurrencyOptions) -> String {
    let Some(number) = numeric(value) else {
        return String::new();
    };

    let precision = currency.precision.map(|p| p.min(MAX_PRECISION));
    let text = match (exact_integer(value), precision) {
        (Some(digits), _) => digits,
        (None, Some(precision)) => render(round_to(number, precision)),
        (None, None) => render(number),
    };

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let mut fraction = fraction.to_string();
    // A precision of 0 never pads.
    if let Some(precision) = precision.filter(|p| *p > 0) {
        let width = precision as usize;
        if fraction.len() < width {
            fraction.push_str(&"0".repeat(width - fraction.len()));
        }
    }

    let grouped = group_thousands(integer, &currency.delimiter.thousands);
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}{}{fraction}", currency.delimiter.decimal)
    }
}

/// Format a number as a price using the currency's `format` template.
pub fn format_price(value: &Value, currency: &CurrencyOptions) -> String {
    let price = format_number(value, currency);
    // Empty input yields an empty price, not a bare template such as "$".
    if price.is_empty() {
        return price;
    }
    currency
        .format
        .replace("{symbol}", &currency.symbol)
        .replace("{price}", &price)
}

/// Append image options (e.g. `width`, `height`) to an image URL.
pub fn format_image_url(base_url: &str, options: &Map<String, Value>) -> String {
    let query = build_query_string(&normalize_query_values(options));
    if query.is_empty() {
        base_url.to_string()
    } else {
        format!("{base_url}?{query}")
    }
}

fn numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(text) => {
            let text = text.trim();
            let allowed = |b: u8| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E');
            if text.is_empty() || !text.bytes().all(allowed) {
                return None;
            }
            text.parse().ok()?
        }
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Integers, as JSON numbers or integer strings, keep every digit.
fn exact_integer(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        Value::String(text) => {
            let text = text.trim();
            match text.parse::<i64>() {
                Ok(n) => Some(n.to_string()),
                Err(_) => text.parse::<u64>().ok().map(|n| n.to_string()),
            }
        }
        _ => None,
    }
}

/// Half away from zero. The scaled value is first cut to 15 significant
/// digits so binary noise such as `1.005 * 100 = 100.49999999999999`
/// rounds the way it reads.
fn round_to(number: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let scaled = number * factor;
    if !scaled.is_finite() {
        return number;
    }
    let scaled: f64 = format!("{scaled:.14e}").parse().unwrap_or(scaled);
    scaled.round() / factor
}

/// Plain decimal notation at 14 significant digits.
fn render(number: f64) -> String {
    let trimmed: f64 = format!("{number:.13e}").parse().unwrap_or(number);
    let text = trimmed.to_string();
    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}

fn group_thousands(digits: &str, separator: &str) -> String {
    let head = digits.len() % 3;
    let mut groups: Vec<&str> = Vec::with_capacity(digits.len() / 3 + 1);
    if head > 0 {
        groups.push(&digits[..head]);
    }
    let mut start = head;
    while start < digits.len() {
        groups.push(&digits[start..start + 3]);
        start += 3;
    }
    groups.join(separator)
}
