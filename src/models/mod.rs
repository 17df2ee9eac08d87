mod analysis;
mod insight;
mod numeric;
mod order;
mod portfolio;
mod view;

pub use analysis::{AllocationEntry, BehaviorStats, CompositionData, InstrumentPerformance, PerformanceData};
pub use insight::{InsightCategory, InsightItem, InsightReport};
pub use order::{NewOrder, Order, OrderPatch, OrderSide};
pub use portfolio::{Holding, PortfolioSummary};
pub use view::ViewState;

pub(crate) use numeric::lenient_f64;
