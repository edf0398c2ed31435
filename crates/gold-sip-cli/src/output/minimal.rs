use serde_json::Value;

use super::cell;

/// Result fields tried in order; the first non-null one is printed.
const PRIORITY_KEYS: [&str; 7] = [
    "cagr",
    "required_average_price",
    "projected_price",
    "price_per_gram",
    "weight_difference",
    "profit_loss",
    "current_value",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_text(value));
}

fn minimal_text(value: &Value) -> String {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => {
            if let Some(val) = PRIORITY_KEYS
                .iter()
                .filter_map(|k| map.get(*k))
                .find(|v| !v.is_null())
            {
                return cell(val, "null");
            }
            match map.iter().next() {
                Some((key, val)) => format!("{key}: {}", cell(val, "null")),
                None => String::new(),
            }
        }
        // Lists: the last row is the headline (final month, last scenario)
        Value::Array(rows) => rows.last().map(minimal_text).unwrap_or_default(),
        other => cell(other, "null"),
    }
}
