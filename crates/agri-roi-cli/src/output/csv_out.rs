use serde_json::Value;
use std::io;

use super::{flatten_fields, scalar_cell};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let body = map.get("result").unwrap_or(value);
            let _ = wtr.write_record(["field", "value"]);
            for (field, rendered) in flatten_fields(body) {
                let _ = wtr.write_record([field.as_str(), rendered.as_str()]);
            }
        }
        Value::Array(records) => {
            write_record_csv(&mut wtr, records);
        }
        _ => {
            let _ = wtr.write_record([&scalar_cell(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_record_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, records: &[Value]) {
    if records.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = records.first() {
        let headers: Vec<&str> = first.keys().map(|key| key.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for record in records {
            if let Value::Object(map) = record {
                let row: Vec<String> = headers
                    .iter()
                    .map(|header| map.get(*header).map(scalar_cell).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for record in records {
            let _ = wtr.write_record([&scalar_cell(record)]);
        }
    }
}
