use serde_json::Value;

use super::display_money;

/// The one figure a caller most likely wants, in order of preference.
const HEADLINE_KEYS: [&str; 5] = [
    "monthly_payment",
    "max_loan_amount",
    "best_option_id",
    "count",
    "removed",
];

/// Print just the headline figure of a result.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Array(items) = result {
        return items.len().to_string();
    }

    if let Value::Object(map) = result {
        // A financed purchase keeps its payment one level down.
        let nested = map.get("loan").and_then(Value::as_object);
        for key in HEADLINE_KEYS {
            let found = map
                .get(key)
                .or_else(|| nested.and_then(|loan| loan.get(key)));
            if let Some(val) = found.filter(|v| !v.is_null()) {
                return format_minimal(val);
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_minimal(val));
        }
    }

    format_minimal(result)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => display_money(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
