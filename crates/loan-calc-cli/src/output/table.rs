use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::display_money;

/// Render a command result as tables.
///
/// Scalar result fields go into one Field/Value table. Each list of objects
/// in the result (schedule, comparison rows, yearly summary) gets a table of
/// its own, and a nested object such as the financed `loan` is expanded in
/// place.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_envelope(result, map),
            None => print_object("", map),
        },
        Value::Array(arr) => print_records(arr),
        _ => println!("{}", value),
    }
}

fn print_envelope(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => print_object("", res_map),
        other => println!("{}", format_cell(other)),
    }

    if let Some(Value::Array(years)) = envelope.get("yearly_summary") {
        println!("\nyearly_summary");
        print_records(years);
    }
    if let Some(Value::String(id)) = envelope.get("saved_id") {
        println!("\n{} {}", "Saved as".green(), id);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\n{}", "Warnings:".yellow().bold());
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_object(prefix: &str, map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut lists: Vec<(String, &Vec<Value>)> = Vec::new();
    let mut nested: Vec<(String, &Map<String, Value>)> = Vec::new();
    let mut scalars = 0usize;

    for (key, val) in map {
        let name = qualified(prefix, key);
        match val {
            Value::Array(items) if items.iter().all(Value::is_object) && !items.is_empty() => {
                lists.push((name, items))
            }
            Value::Object(inner) => nested.push((name, inner)),
            _ => {
                builder.push_record([name.as_str(), &format_cell(val)]);
                scalars += 1;
            }
        }
    }

    if scalars > 0 {
        println!("{}", Table::from(builder));
    }
    for (name, inner) in nested {
        println!();
        print_object(&name, inner);
    }
    for (name, items) in lists {
        println!("\n{}", name);
        print_records(items);
    }
}

fn print_records(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            println!("{}", format_cell(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in arr.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| item.get(h.as_str()).map(format_cell).unwrap_or_default())
            .collect();
        builder.push_record(row);
    }
    println!("{}", Table::from(builder));
}

fn qualified(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn format_cell(value: &Value) -> String {
    match value {
        Value::String(s) => display_money(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => arr.iter().map(format_cell).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
