pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter. Text results are printed
/// verbatim and `null` prints nothing.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match value {
        Value::Null => {}
        Value::String(text) => println!("{text}"),
        _ => match format {
            OutputFormat::Json => json::print_json(value),
            OutputFormat::Table => table::print_table(value),
            OutputFormat::Csv => csv_out::print_csv(value),
            OutputFormat::Minimal => minimal::print_minimal(value),
        },
    }
}

/// Render a JSON leaf for a table or CSV cell.
pub(crate) fn cell(value: &Value, null: &str) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => null.to_string(),
        Value::Array(arr) => arr
            .iter()
            .map(|v| cell(v, null))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Column headers for a list of records, in first-seen order.
pub(crate) fn record_headers(rows: &[Value]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for row in rows {
        if let Value::Object(map) = row {
            for key in map.keys() {
                if !headers.iter().any(|h| h == key) {
                    headers.push(key.clone());
                }
            }
        }
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_rendering() {
        assert_eq!(cell(&json!("7500.00"), "-"), "7500.00");
        assert_eq!(cell(&json!(null), "-"), "-");
        assert_eq!(cell(&json!(["a", 1]), ""), "a, 1");
        assert_eq!(cell(&json!({"held_months": 3}), ""), r#"{"held_months":3}"#);
    }

    #[test]
    fn test_record_headers_union() {
        let rows = vec![json!({"month": 1, "date": null}), json!({"month": 2, "extra": true})];
        assert_eq!(record_headers(&rows), vec!["date", "month", "extra"]);
    }
}
