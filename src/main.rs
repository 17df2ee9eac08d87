use std::sync::Arc;

use anyhow::Context;

use folioscope::external::HttpDataSource;
use folioscope::logging::{init_logging, LoggingConfig};
use folioscope::models::ViewState;
use folioscope::services::analysis_service::AnalysisScreen;
use folioscope::services::auth_service;
use folioscope::services::dashboard_service::DashboardScreen;
use folioscope::session::SessionGuard;
use folioscope::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    let email = std::env::var("PORTFOLIO_EMAIL").context("PORTFOLIO_EMAIL is not set")?;
    let password = std::env::var("PORTFOLIO_PASSWORD").context("PORTFOLIO_PASSWORD is not set")?;

    let source = Arc::new(HttpDataSource::from_env()?);
    let session = Arc::new(SessionGuard::new());
    let state = AppState::new(source, session);

    auth_service::login(state.source.as_ref(), &state.session, &email, &password)
        .await
        .context("login failed")?;

    let dashboard = DashboardScreen::new(state.source.clone(), state.session.clone());
    let analysis = AnalysisScreen::new(state.source.clone(), state.session.clone());

    futures::join!(dashboard.load(), analysis.load(), analysis.load_commentary());

    print_dashboard(&dashboard);
    print_analysis(&analysis);

    auth_service::logout(&state.session);
    Ok(())
}

fn print_dashboard(screen: &DashboardScreen) {
    println!("== Dashboard ==");
    match screen.state() {
        ViewState::Ready(view) => {
            println!("Invested:        {}", view.total_investment);
            println!("Current value:   {}", view.total_current_value);
            println!("Total P/L:       {}", view.total_profit_loss);
            println!(
                "Realized:        {} {}",
                view.realized_trend.arrow(),
                view.realized_profit
            );
            println!(
                "Unrealized:      {} {}",
                view.unrealized_trend.arrow(),
                view.unrealized_profit
            );
            for row in &view.holdings {
                println!(
                    "  {:<12} qty {:<8} avg {:<12} ltp {:<12} day {:<10} alloc {}",
                    row.symbol,
                    row.quantity,
                    row.avg_buy_price,
                    row.market_price,
                    row.day_change,
                    row.allocation
                );
            }
        }
        other => print_unready("dashboard", &other),
    }
}

fn print_analysis(screen: &AnalysisScreen) {
    println!("\n== Analysis ==");
    match screen.state() {
        ViewState::Ready(view) => {
            println!("Sectors tracked:   {}", view.composition.sector_allocation.len());
            println!("Top gainers:       {}", view.performance.top_gainers.len());
            println!("Top losers:        {}", view.performance.top_losers.len());
            if let Some(win_rate) = view.behavior.win_rate {
                println!("Win rate:          {win_rate:.1}%");
            }
        }
        other => print_unready("analysis", &other),
    }

    match screen.commentary_state() {
        ViewState::Ready(report) if !report.is_empty() => {
            println!("\n-- AI commentary --");
            for line in &report.insights {
                println!("  insight: {line}");
            }
            for line in &report.suggestions {
                println!("  suggestion: {line}");
            }
        }
        ViewState::Ready(_) => println!("\n(no AI commentary)"),
        other => print_unready("AI commentary", &other),
    }
}

fn print_unready<T: std::fmt::Debug>(label: &str, state: &ViewState<T>) {
    match state {
        ViewState::Loading => println!("{label}: still loading"),
        ViewState::Error(message) => println!("{label}: error: {message}"),
        ViewState::SessionExpired => println!("{label}: session expired, log in again"),
        ViewState::Ready(_) => unreachable!(),
    }
}
