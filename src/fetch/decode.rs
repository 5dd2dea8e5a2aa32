use serde_json::Value;

use crate::error::FetchError;

/// Pull `root[id][currency]` out of a `/simple/price` payload such as
/// `{"bitcoin": {"usd": 64000.5}}`.
pub fn extract_quote(root: &Value, id: &str, currency: &str) -> Result<f64, FetchError> {
    let missing = || FetchError::MissingQuote {
        id: id.to_string(),
        currency: currency.to_string(),
    };

    let raw = root
        .get(id)
        .and_then(|entry| entry.get(currency))
        .ok_or_else(missing)?;
    let price = parse_number(raw).ok_or_else(missing)?;

    if !price.is_finite() || price <= 0.0 {
        return Err(FetchError::InvalidPrice {
            id: id.to_string(),
            price,
        });
    }
    Ok(price)
}

fn parse_number(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
}
