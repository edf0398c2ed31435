use serde_json::{Map, Value};
use std::io;

use super::{cell, record_headers};

/// Write output as CSV to stdout. Envelope metadata is dropped; only the
/// result is written.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let body = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let written = match body {
        Value::Object(map) => write_fields(&mut wtr, map),
        Value::Array(rows) => write_records(&mut wtr, rows),
        other => wtr.write_record([cell(other, "")]),
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        tracing::error!(error = %e, "failed to write CSV");
    }
}

fn write_fields<W: io::Write>(wtr: &mut csv::Writer<W>, map: &Map<String, Value>) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in map {
        wtr.write_record([key.as_str(), &cell(val, "")])?;
    }
    Ok(())
}

fn write_records<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let headers = record_headers(rows);
    if headers.is_empty() {
        for item in rows {
            wtr.write_record([cell(item, "")])?;
        }
        return Ok(());
    }

    wtr.write_record(&headers)?;
    for row in rows {
        let record: Vec<String> = headers
            .iter()
            .map(|h| row.get(h.as_str()).map(|v| cell(v, "")).unwrap_or_default())
            .collect();
        wtr.write_record(&record)?;
    }
    Ok(())
}
