use std::collections::HashMap;

use serde::Deserialize;

use super::lenient_f64;

/// One slice of an allocation map. Percentages across a map should sum to
/// roughly 100, but upstream data may be incomplete so nothing assumes it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AllocationEntry {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub percentage: Option<f64>,
}

/// Payload of `/portfolio/composition`. Maps are keyed by sector name or
/// market-cap bucket label.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompositionData {
    #[serde(default)]
    pub sector_allocation: HashMap<String, AllocationEntry>,
    #[serde(default)]
    pub market_cap_allocation: HashMap<String, AllocationEntry>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_portfolio_value: Option<f64>,
}

/// One ranked instrument in the gainers/losers lists. Every numeric field may
/// be absent or non-numeric upstream and degrades to `None` at ingestion.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InstrumentPerformance {
    #[serde(default)]
    pub symbol: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub investment: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub profit_loss: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub return_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub current_price: Option<f64>,
}

/// Payload of `/portfolio/performance`. Both lists arrive pre-ranked.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PerformanceData {
    #[serde(default)]
    pub top_gainers: Vec<InstrumentPerformance>,
    #[serde(default)]
    pub top_losers: Vec<InstrumentPerformance>,
}

/// Payload of `/portfolio/behavior`: scalar trading statistics.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BehaviorStats {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub average_holding_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub win_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub trading_frequency: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_trades: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub profitable_trades: Option<f64>,
}
