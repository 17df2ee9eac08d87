use async_trait::async_trait;

use crate::errors::ApiError;
use crate::models::{
    BehaviorStats, CompositionData, NewOrder, Order, OrderPatch, PerformanceData, PortfolioSummary,
};
use crate::session::Credential;

/// The remote API seam. Read operations are keyed by view; every protected
/// operation carries the caller's credential and reports `Unauthorized`
/// distinctly from other failures so the session layer can react.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<Credential, ApiError>;

    async fn register(&self, email: &str, password: &str) -> Result<Credential, ApiError>;

    /// Aggregate totals, per-symbol holdings, and order history.
    async fn portfolio_summary(&self, credential: &Credential) -> Result<PortfolioSummary, ApiError>;

    /// Sector and market-cap allocation maps.
    async fn composition(&self, credential: &Credential) -> Result<CompositionData, ApiError>;

    /// Ranked gainer/loser lists.
    async fn performance(&self, credential: &Credential) -> Result<PerformanceData, ApiError>;

    /// Scalar trading-behavior statistics.
    async fn behavior(&self, credential: &Credential) -> Result<BehaviorStats, ApiError>;

    /// The raw free-text commentary blob produced by the upstream language
    /// model. Formatting is unknown and variable; parsing happens client-side.
    async fn ai_summary(&self, credential: &Credential) -> Result<String, ApiError>;

    async fn orders(&self, credential: &Credential) -> Result<Vec<Order>, ApiError>;

    async fn add_order(&self, credential: &Credential, order: &NewOrder) -> Result<Order, ApiError>;

    async fn update_order(
        &self,
        credential: &Credential,
        order_id: &str,
        patch: &OrderPatch,
    ) -> Result<Order, ApiError>;

    async fn delete_order(&self, credential: &Credential, order_id: &str) -> Result<(), ApiError>;

    async fn delete_all_orders(&self, credential: &Credential) -> Result<(), ApiError>;
}
