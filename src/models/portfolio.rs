use serde::Deserialize;

use super::lenient_f64;
use super::Order;

/// One open position as reported by `/portfolio/analysis`. Numeric fields may
/// be absent upstream (e.g. no market price for a delisted symbol) and are
/// never defaulted to zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Holding {
    #[serde(default)]
    pub symbol: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_buy_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub investment: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub market_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub current_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub unrealized_profit: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub day_change_percent: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub allocation_percent: Option<f64>,
}

/// Payload of `/portfolio/analysis`: aggregate totals plus per-symbol
/// positions and the raw order history.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PortfolioSummary {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_investment: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_current_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_profit_loss: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub realized_profit: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub unrealized_profit: Option<f64>,
    #[serde(default)]
    pub holdings: Vec<Holding>,
    #[serde(default)]
    pub orders: Vec<Order>,
}
