//! Lenient field access on raw documents.
//!
//! Exports from older app versions store the same value under different keys
//! and as either numbers or formatted strings. Each getter takes the keys to
//! try in order and never fails.

use chrono::NaiveDate;
use serde_json::Value;

use flow_model::{FieldValue, LineItem, parse_date, parse_number};

use crate::reader::Document;

fn lookup<'a>(doc: &'a Document, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| doc.get(*key))
        .find(|value| !value_is_blank(value))
}

fn value_is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

/// First non-blank value rendered as trimmed text.
pub fn text(doc: &Document, keys: &[&str]) -> Option<String> {
    lookup(doc, keys).map(|value| match value {
        Value::String(text) => text.trim().to_string(),
        other => other.to_string(),
    })
}

/// First non-blank value read as a number. Currency symbols and thousands
/// separators are ignored; anything unparseable reads as zero.
pub fn number(doc: &Document, keys: &[&str]) -> f64 {
    let value = match lookup(doc, keys) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => parse_amount(text),
        Some(Value::Bool(flag)) => f64::from(u8::from(*flag)),
        _ => 0.0,
    };
    if value.is_finite() { value } else { 0.0 }
}

/// Parse `"$1,234.50"` style amounts.
pub fn parse_amount(text: &str) -> f64 {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// Whole units, truncated; negative or unparseable counts read as zero.
pub fn count(doc: &Document, keys: &[&str]) -> u32 {
    let value = number(doc, keys).trunc();
    if value <= 0.0 {
        0
    } else if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value as u32
    }
}

/// Signed whole number; used for stock, which may go negative on oversell.
pub fn integer(doc: &Document, keys: &[&str]) -> i64 {
    number(doc, keys).trunc() as i64
}

pub fn boolean(doc: &Document, keys: &[&str], default: bool) -> bool {
    match lookup(doc, keys) {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(text)) => match text.trim().to_lowercase().as_str() {
            "true" | "1" | "si" | "sí" | "yes" | "activo" => true,
            "false" | "0" | "no" | "inactivo" => false,
            _ => default,
        },
        _ => default,
    }
}

/// A date stored as `YYYY-MM-DD`, an ISO timestamp, or a Firestore
/// `{ "seconds": .. }` timestamp object.
pub fn date(doc: &Document, keys: &[&str]) -> Option<NaiveDate> {
    match lookup(doc, keys)? {
        Value::String(text) => parse_date(text),
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(Value::as_i64)?;
            chrono::DateTime::from_timestamp(seconds, 0).map(|dt| dt.date_naive())
        }
        _ => None,
    }
}

/// Line items from a `productos` array, or a single implicit item built from
/// the document's own unit cost and quantity.
pub fn line_items(doc: &Document) -> Vec<LineItem> {
    if let Some(Value::Array(items)) = doc.get("productos") {
        return items
            .iter()
            .filter_map(Value::as_object)
            .map(|item| {
                LineItem::from_raw(
                    number(item, &["cpUnit", "precioCompra", "costoUnitario"]),
                    number(item, &["cantidad", "qty"]),
                )
            })
            .filter(|item| item.quantity > 0)
            .collect();
    }
    let unit_cost = number(doc, &["cpUnit", "precioCompra"]);
    let quantity = number(doc, &["cantidad"]);
    if unit_cost > 0.0 && quantity > 0.0 {
        vec![LineItem::from_raw(unit_cost, quantity)]
    } else {
        Vec::new()
    }
}

/// Map a raw JSON value onto a list field value. Nested arrays and objects are
/// kept as their JSON text so they still participate in search.
pub fn field_value(value: &Value) -> FieldValue {
    match value {
        Value::Null => FieldValue::Missing,
        Value::Bool(flag) => FieldValue::Bool(*flag),
        Value::Number(n) => match n.as_i64() {
            Some(int) => FieldValue::Integer(int),
            None => FieldValue::Number(n.as_f64().unwrap_or(0.0)),
        },
        Value::String(text) => numeric_cell(text)
            .or_else(|| parse_date(text).map(FieldValue::Date))
            .unwrap_or_else(|| FieldValue::Text(text.clone())),
        other => FieldValue::Text(other.to_string()),
    }
}

/// Numbers written as text, as CSV cells and older exports store them.
/// `"$1,200.50"` style amounts count too. Digit strings with a leading zero
/// (phone numbers, codes) stay text.
fn numeric_cell(text: &str) -> Option<FieldValue> {
    let trimmed = text.trim();
    let unsigned = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if let Some(amount) = unsigned.strip_prefix('$') {
        let value = parse_amount(amount);
        let value = if unsigned.len() == trimmed.len() { value } else { -value };
        return (value.is_finite() && amount.chars().any(|c| c.is_ascii_digit()))
            .then_some(FieldValue::Number(value));
    }
    let digits = unsigned.as_bytes();
    if digits.len() > 1 && digits[0] == b'0' && digits[1].is_ascii_digit() {
        return None;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Some(FieldValue::Integer(int));
    }
    parse_number(trimmed).map(FieldValue::Number)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => Document::new(),
        }
    }

    #[test]
    fn number_reads_formatted_amounts() {
        let d = doc(json!({ "totalVenta": "$6,000.50", "bad": "n/a" }));
        assert_eq!(number(&d, &["precioVenta", "totalVenta"]), 6000.5);
        assert_eq!(number(&d, &["bad"]), 0.0);
        assert_eq!(number(&d, &["missing"]), 0.0);
    }

    #[test]
    fn blank_values_fall_through_to_next_key() {
        let d = doc(json!({ "clienteId": "", "cliente": "Ana" }));
        assert_eq!(text(&d, &["clienteId", "cliente"]).as_deref(), Some("Ana"));
    }

    #[test]
    fn firestore_timestamps_become_dates() {
        let d = doc(json!({ "fecha": { "seconds": 1_736_899_200 } }));
        assert_eq!(date(&d, &["fecha"]), NaiveDate::from_ymd_opt(2025, 1, 15));
    }

    #[test]
    fn implicit_line_item_from_flat_document() {
        let d = doc(json!({ "cpUnit": 400, "cantidad": "12" }));
        assert_eq!(line_items(&d), vec![LineItem::new(400.0, 12)]);
    }

    #[test]
    fn count_truncates_and_clamps() {
        let d = doc(json!({ "a": 3.9, "b": -2 }));
        assert_eq!(count(&d, &["a"]), 3);
        assert_eq!(count(&d, &["b"]), 0);
    }

    #[test]
    fn numeric_text_cells_become_numbers() {
        assert_eq!(field_value(&json!("2500")), FieldValue::Integer(2500));
        assert_eq!(field_value(&json!(" 12.5 ")), FieldValue::Number(12.5));
        assert_eq!(field_value(&json!("$1,200.50")), FieldValue::Number(1200.5));
        assert_eq!(field_value(&json!("-$80")), FieldValue::Number(-80.0));
        assert_eq!(field_value(&json!("0551234567")), FieldValue::from("0551234567"));
        assert_eq!(field_value(&json!("Norte")), FieldValue::from("Norte"));
        assert_eq!(
            field_value(&json!("2025-01-15")),
            FieldValue::Date(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
        );
    }
}
