use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts a numeric field that may arrive as a JSON number, a numeric string,
/// `null`, or garbage, and converts it once at the boundary. Anything that is
/// not a finite number becomes `None`; render-time code never re-validates.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}
