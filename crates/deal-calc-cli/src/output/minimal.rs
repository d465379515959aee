use serde_json::Value;

/// Headline figure for each kind of output, in lookup order.
const HEADLINE_KEYS: [&str; 3] = ["monthly_payment", "acquisition_fee", "amount_financed"];

/// Print only the headline number, e.g. the monthly payment of a quote.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result {
        let headline = HEADLINE_KEYS
            .iter()
            .find_map(|key| map.get(*key).filter(|v| !v.is_null()));
        match headline {
            Some(val) => println!("{}", format_minimal(val)),
            None => {
                if let Some((key, val)) = map.iter().next() {
                    println!("{}: {}", key, format_minimal(val));
                }
            }
        }
        return;
    }

    println!("{}", format_minimal(result));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
