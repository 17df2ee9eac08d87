use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

/// One recorded buy/sell order, as returned by the order endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    pub id: String,
    pub symbol: String,
    #[serde(rename = "type")]
    pub side: OrderSide,
    pub quantity: f64,
    pub price: f64,
    #[serde(deserialize_with = "de_order_date")]
    pub date: NaiveDate,
}

/// Write shape for `/orders/add`.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub symbol: String,
    #[serde(rename = "type")]
    pub side: OrderSide,
    pub quantity: f64,
    pub price: f64,
    pub date: NaiveDate,
}

/// Partial update for `/orders/update/{id}`; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub side: Option<OrderSide>,
}

// The API returns plain dates from some endpoints and full ISO timestamps
// from others; only the calendar date matters to the client.
fn de_order_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let date_part = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(serde::de::Error::custom)
}
