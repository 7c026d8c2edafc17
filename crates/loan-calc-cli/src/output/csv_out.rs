use serde_json::{Map, Value};
use std::io::{self, Write};

/// Keys holding the main tabular part of a result, in lookup order.
const TABULAR_KEYS: [&str; 3] = ["schedule", "rows", "yearly_summary"];

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        eprintln!("CSV output error: {}", e);
    }
}

/// CSV for a command result.
///
/// A loan schedule or comparison table is written row per entry. Envelopes
/// without one fall back to two columns, field and value, with nested objects
/// flattened to dotted names.
pub fn write_csv<W: Write>(writer: W, value: &Value) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);

    match value {
        Value::Object(map) => {
            let result = map.get("result").unwrap_or(value);
            if let Some(rows) = find_tabular(result) {
                write_rows(&mut wtr, rows)?;
            } else if let Value::Object(fields) = result {
                wtr.write_record(["field", "value"])?;
                write_fields(&mut wtr, "", fields)?;
            } else {
                wtr.write_record([format_csv_value(result)])?;
            }
        }
        Value::Array(arr) => write_rows(&mut wtr, arr)?,
        _ => wtr.write_record([format_csv_value(value)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn find_tabular(result: &Value) -> Option<&Vec<Value>> {
    let map = result.as_object()?;
    TABULAR_KEYS
        .iter()
        .find_map(|k| map.get(*k).and_then(Value::as_array))
        .or_else(|| map.get("loan").and_then(find_tabular))
}

fn write_rows<W: Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> Result<(), csv::Error> {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            wtr.write_record([format_csv_value(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for item in arr.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| item.get(*h).map(format_csv_value).unwrap_or_default())
            .collect();
        wtr.write_record(&row)?;
    }
    Ok(())
}

fn write_fields<W: Write>(
    wtr: &mut csv::Writer<W>,
    prefix: &str,
    fields: &Map<String, Value>,
) -> Result<(), csv::Error> {
    for (key, val) in fields {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => write_fields(wtr, &name, inner)?,
            _ => wtr.write_record([name.as_str(), &format_csv_value(val)])?,
        }
    }
    Ok(())
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
