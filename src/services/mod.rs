pub mod analysis_service;
pub mod auth_service;
pub mod dashboard_service;
pub mod insight_parser;
pub mod metrics;
pub mod order_service;
pub mod view_cycle;

#[cfg(test)]
pub(crate) mod test_support;
