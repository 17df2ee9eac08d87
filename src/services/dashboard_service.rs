use std::sync::Arc;

use tracing::{error, warn};

use crate::external::DataSource;
use crate::models::{Holding, PortfolioSummary, ViewState};
use crate::services::metrics::{
    classify, format_percent, format_quantity, format_rupees, format_signed_percent, Trend,
};
use crate::services::view_cycle::ViewCycle;
use crate::session::SessionGuard;

/// One holding rendered for display. All strings and trend tokens are
/// computed through the formatter exactly once, when the bundle is assembled;
/// re-renders read them as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingRow {
    pub symbol: String,
    pub quantity: String,
    pub avg_buy_price: String,
    pub market_price: String,
    pub unrealized_profit: String,
    pub unrealized_trend: Trend,
    pub current_value: String,
    pub day_change: String,
    pub day_change_trend: Trend,
    pub allocation: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub total_investment: String,
    pub total_current_value: String,
    pub total_profit_loss: String,
    pub realized_profit: String,
    pub realized_trend: Trend,
    pub unrealized_profit: String,
    pub unrealized_trend: Trend,
    pub holdings: Vec<HoldingRow>,
}

/// Orchestrates the dashboard screen: one summary read per cycle, with the
/// same loading/error/session state machine as the analysis screen.
pub struct DashboardScreen {
    source: Arc<dyn DataSource>,
    session: Arc<SessionGuard>,
    view: ViewCycle<DashboardView>,
}

impl DashboardScreen {
    pub fn new(source: Arc<dyn DataSource>, session: Arc<SessionGuard>) -> Self {
        Self {
            source,
            session,
            view: ViewCycle::new(),
        }
    }

    pub fn state(&self) -> ViewState<DashboardView> {
        self.view.state()
    }

    pub async fn load(&self) {
        let cycle = self.view.begin();
        let next = self.fetch_view().await;
        self.view.commit(cycle, next);
    }

    pub async fn retry(&self) {
        self.load().await;
    }

    async fn fetch_view(&self) -> ViewState<DashboardView> {
        let Some(credential) = self.session.current() else {
            warn!("dashboard load skipped, no live session");
            return ViewState::SessionExpired;
        };
        match self.source.portfolio_summary(&credential).await {
            Ok(summary) => ViewState::Ready(build_view(summary)),
            Err(e) if e.is_unauthorized() => {
                warn!("dashboard fetch rejected as unauthorized, session expired");
                self.session.clear();
                ViewState::SessionExpired
            }
            Err(e) => {
                let message = e.to_string();
                error!("dashboard fetch failed: {message}");
                ViewState::Error(message)
            }
        }
    }
}

fn build_view(summary: PortfolioSummary) -> DashboardView {
    DashboardView {
        total_investment: format_rupees(summary.total_investment, 0),
        total_current_value: format_rupees(summary.total_current_value, 0),
        total_profit_loss: format_rupees(summary.total_profit_loss, 0),
        realized_profit: format_rupees(summary.realized_profit, 0),
        realized_trend: classify(summary.realized_profit),
        unrealized_profit: format_rupees(summary.unrealized_profit, 0),
        unrealized_trend: classify(summary.unrealized_profit),
        holdings: summary.holdings.iter().map(build_row).collect(),
    }
}

fn build_row(holding: &Holding) -> HoldingRow {
    HoldingRow {
        symbol: holding.symbol.clone(),
        quantity: format_quantity(holding.quantity),
        avg_buy_price: format_rupees(holding.avg_buy_price, 2),
        market_price: format_rupees(holding.market_price, 2),
        unrealized_profit: format_rupees(holding.unrealized_profit, 0),
        unrealized_trend: classify(holding.unrealized_profit),
        current_value: format_rupees(holding.current_value, 2),
        day_change: format_signed_percent(holding.day_change_percent, 2),
        day_change_trend: classify(holding.day_change_percent),
        allocation: format_percent(holding.allocation_percent, 1),
    }
}
