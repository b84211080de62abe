use serde_json::Value;

use super::scalar_cell;

/// Headline metrics, most decision-relevant first.
const PRIORITY_PATHS: [&[&str]; 5] = [
    &["payback", "payback_years"],
    &["horizon", "roi_percent"],
    &["npv", "value"],
    &["annual", "net_annual_benefit"],
    &["base_case", "net_annual_benefit"],
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|map| map.get("result"))
        .unwrap_or(value);

    for path in PRIORITY_PATHS {
        if let Some(found) = lookup(result, path) {
            if !found.is_null() {
                println!("{}", scalar_cell(found));
                return;
            }
        }
    }

    // Fall back to the first field
    if let Value::Object(map) = result {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar_cell(val));
            return;
        }
    }

    println!("{}", scalar_cell(result));
}

fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for segment in path {
        current = current.as_object()?.get(*segment)?;
    }
    Some(current)
}
