//! Scripted `DataSource` for exercising the orchestration layer without a
//! network. Each endpoint resolves a queue of outcomes, one per call, with a
//! per-outcome delay; the last outcome repeats for any further calls.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;

use crate::errors::ApiError;
use crate::external::DataSource;
use crate::models::{
    BehaviorStats, CompositionData, NewOrder, Order, OrderPatch, OrderSide, PerformanceData,
    PortfolioSummary,
};
use crate::session::Credential;

#[derive(Debug, Clone)]
pub(crate) enum Outcome<T: Clone> {
    Ready(T),
    Unauthorized,
    Fail(&'static str),
}

pub(crate) struct Endpoint<T: Clone> {
    script: Mutex<Vec<(Outcome<T>, Duration)>>,
}

impl<T: Clone> Endpoint<T> {
    pub fn ready(value: T) -> Self {
        Self::scripted(Outcome::Ready(value))
    }

    pub fn unauthorized() -> Self {
        Self::scripted(Outcome::Unauthorized)
    }

    pub fn failing(message: &'static str) -> Self {
        Self::scripted(Outcome::Fail(message))
    }

    fn scripted(outcome: Outcome<T>) -> Self {
        Self {
            script: Mutex::new(vec![(outcome, Duration::ZERO)]),
        }
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        for entry in self.script.lock().iter_mut() {
            entry.1 = delay;
        }
        self
    }

    pub fn then_ready(self, value: T, delay: Duration) -> Self {
        self.script.lock().push((Outcome::Ready(value), delay));
        self
    }

    async fn resolve(&self, calls: &AtomicUsize) -> Result<T, ApiError> {
        calls.fetch_add(1, Ordering::SeqCst);
        let (outcome, delay) = {
            let mut script = self.script.lock();
            if script.len() > 1 {
                script.remove(0)
            } else {
                script[0].clone()
            }
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        match outcome {
            Outcome::Ready(value) => Ok(value),
            Outcome::Unauthorized => Err(ApiError::Unauthorized),
            Outcome::Fail(message) => Err(ApiError::Network(message.to_string())),
        }
    }
}

pub(crate) fn sample_order() -> Order {
    Order {
        id: "order-1".into(),
        symbol: "INFY.NS".into(),
        side: OrderSide::Buy,
        quantity: 10.0,
        price: 1500.0,
        date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    }
}

pub(crate) struct ScriptedSource {
    pub composition: Endpoint<CompositionData>,
    pub performance: Endpoint<PerformanceData>,
    pub behavior: Endpoint<BehaviorStats>,
    pub summary: Endpoint<PortfolioSummary>,
    pub ai_summary: Endpoint<String>,
    pub order_list: Endpoint<Vec<Order>>,
    pub order_write: Endpoint<Order>,
    pub calls: AtomicUsize,
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self {
            composition: Endpoint::ready(CompositionData::default()),
            performance: Endpoint::ready(PerformanceData::default()),
            behavior: Endpoint::ready(BehaviorStats::default()),
            summary: Endpoint::ready(PortfolioSummary::default()),
            ai_summary: Endpoint::ready(String::new()),
            order_list: Endpoint::ready(Vec::new()),
            order_write: Endpoint::ready(sample_order()),
            calls: AtomicUsize::new(0),
        }
    }
}

impl ScriptedSource {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for ScriptedSource {
    async fn login(&self, _email: &str, _password: &str) -> Result<Credential, ApiError> {
        Ok(Credential::new("test-token"))
    }

    async fn register(&self, _email: &str, _password: &str) -> Result<Credential, ApiError> {
        Ok(Credential::new("test-token"))
    }

    async fn portfolio_summary(&self, _credential: &Credential) -> Result<PortfolioSummary, ApiError> {
        self.summary.resolve(&self.calls).await
    }

    async fn composition(&self, _credential: &Credential) -> Result<CompositionData, ApiError> {
        self.composition.resolve(&self.calls).await
    }

    async fn performance(&self, _credential: &Credential) -> Result<PerformanceData, ApiError> {
        self.performance.resolve(&self.calls).await
    }

    async fn behavior(&self, _credential: &Credential) -> Result<BehaviorStats, ApiError> {
        self.behavior.resolve(&self.calls).await
    }

    async fn ai_summary(&self, _credential: &Credential) -> Result<String, ApiError> {
        self.ai_summary.resolve(&self.calls).await
    }

    async fn orders(&self, _credential: &Credential) -> Result<Vec<Order>, ApiError> {
        self.order_list.resolve(&self.calls).await
    }

    async fn add_order(&self, _credential: &Credential, _order: &NewOrder) -> Result<Order, ApiError> {
        self.order_write.resolve(&self.calls).await
    }

    async fn update_order(
        &self,
        _credential: &Credential,
        _order_id: &str,
        _patch: &OrderPatch,
    ) -> Result<Order, ApiError> {
        self.order_write.resolve(&self.calls).await
    }

    async fn delete_order(&self, _credential: &Credential, _order_id: &str) -> Result<(), ApiError> {
        self.order_write.resolve(&self.calls).await.map(|_| ())
    }

    async fn delete_all_orders(&self, _credential: &Credential) -> Result<(), ApiError> {
        self.order_write.resolve(&self.calls).await.map(|_| ())
    }
}
