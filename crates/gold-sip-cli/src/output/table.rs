use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{cell, record_headers};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_envelope(result, map),
            None => print_fields(map),
        },
        Value::Array(rows) => print_records(rows),
        _ => println!("{value}"),
    }
}

fn print_envelope(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(fields) => print_fields(fields),
        Value::Array(rows) => print_records(rows),
        other => println!("{}", cell(other, "null")),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {methodology}");
    }
}

fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &cell(val, "null")]);
    }
    println!("{}", Table::from(builder));
}

fn print_records(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }

    let headers = record_headers(rows);
    if headers.is_empty() {
        for item in rows {
            println!("{}", cell(item, "null"));
        }
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(String::as_str));
    for row in rows {
        builder.push_record(
            headers
                .iter()
                .map(|h| row.get(h.as_str()).map(|v| cell(v, "-")).unwrap_or_default()),
        );
    }
    println!("{}", Table::from(builder));
}
