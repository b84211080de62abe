use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten_fields, scalar_cell};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_envelope(result, map);
            } else {
                print_field_table(value);
            }
        }
        Value::Array(records) => print_record_table(records),
        _ => println!("{}", value),
    }
}

fn print_envelope(result: &Value, envelope: &serde_json::Map<String, Value>) {
    // The envelope's warnings already carry the result's notes
    let mut body = result.clone();
    if let Some(map) = body.as_object_mut() {
        map.remove("notes");
    }
    print_field_table(&body);

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nNotes:");
            for warning in warnings {
                if let Value::String(text) = warning {
                    println!("  - {}", text);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

/// Two-column table of dotted field paths and values.
fn print_field_table(value: &Value) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (field, rendered) in flatten_fields(value) {
        builder.push_record([field.as_str(), rendered.as_str()]);
    }
    println!("{}", Table::from(builder));
}

/// One row per record, headers taken from the first record.
fn print_record_table(records: &[Value]) {
    if records.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = records.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for record in records {
            if let Value::Object(map) = record {
                let row: Vec<String> = headers
                    .iter()
                    .map(|header| map.get(header.as_str()).map(scalar_cell).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for record in records {
            println!("{}", scalar_cell(record));
        }
    }
}
