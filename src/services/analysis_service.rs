use std::sync::Arc;

use futures::join;
use tracing::{error, warn};

use crate::errors::ApiError;
use crate::external::DataSource;
use crate::models::{BehaviorStats, CompositionData, InsightReport, PerformanceData, ViewState};
use crate::services::insight_parser;
use crate::services::view_cycle::ViewCycle;
use crate::session::SessionGuard;

/// Merged bundle for the analysis screen. Assembled wholesale once per fetch
/// cycle and replaced on retry, never mutated field-by-field afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisView {
    pub composition: CompositionData,
    pub performance: PerformanceData,
    pub behavior: BehaviorStats,
}

/// Orchestrates the analysis screen: the primary bundle is three independent
/// reads joined fan-out/fan-in, and the AI commentary rides a second,
/// decoupled channel with its own state. A failed commentary never disturbs
/// the primary view.
pub struct AnalysisScreen {
    source: Arc<dyn DataSource>,
    session: Arc<SessionGuard>,
    view: ViewCycle<AnalysisView>,
    commentary: ViewCycle<InsightReport>,
}

impl AnalysisScreen {
    pub fn new(source: Arc<dyn DataSource>, session: Arc<SessionGuard>) -> Self {
        Self {
            source,
            session,
            view: ViewCycle::new(),
            commentary: ViewCycle::new(),
        }
    }

    pub fn state(&self) -> ViewState<AnalysisView> {
        self.view.state()
    }

    pub fn commentary_state(&self) -> ViewState<InsightReport> {
        self.commentary.state()
    }

    /// Fetches the primary bundle. The view leaves `Loading` only after all
    /// three sub-reads have settled; a stale cycle that settles after a newer
    /// one started is discarded.
    pub async fn load(&self) {
        let cycle = self.view.begin();
        let next = self.fetch_bundle().await;
        self.view.commit(cycle, next);
    }

    pub async fn retry(&self) {
        self.load().await;
    }

    /// Fetches and parses the AI commentary on its own cycle.
    pub async fn load_commentary(&self) {
        let cycle = self.commentary.begin();
        let next = self.fetch_commentary().await;
        self.commentary.commit(cycle, next);
    }

    async fn fetch_bundle(&self) -> ViewState<AnalysisView> {
        let Some(credential) = self.session.current() else {
            warn!("analysis load skipped, no live session");
            return ViewState::SessionExpired;
        };

        // All three reads settle before fan-in; a single early failure must
        // not abandon the others' error information.
        let (composition, performance, behavior) = join!(
            self.source.composition(&credential),
            self.source.performance(&credential),
            self.source.behavior(&credential),
        );

        match (composition, performance, behavior) {
            (Ok(composition), Ok(performance), Ok(behavior)) => ViewState::Ready(AnalysisView {
                composition,
                performance,
                behavior,
            }),
            (composition, performance, behavior) => {
                let failures: Vec<ApiError> =
                    [composition.err(), performance.err(), behavior.err()]
                        .into_iter()
                        .flatten()
                        .collect();
                self.settle_failed(failures)
            }
        }
    }

    fn settle_failed(&self, failures: Vec<ApiError>) -> ViewState<AnalysisView> {
        if failures.iter().any(ApiError::is_unauthorized) {
            warn!("analysis fetch rejected as unauthorized, session expired");
            self.session.clear();
            return ViewState::SessionExpired;
        }
        // Failures arrive in sub-read declaration order; the first one is the
        // message shown for the whole view.
        let message = failures
            .first()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "failed to fetch analysis data".to_string());
        error!("analysis fetch failed: {message}");
        ViewState::Error(message)
    }

    async fn fetch_commentary(&self) -> ViewState<InsightReport> {
        let Some(credential) = self.session.current() else {
            return ViewState::SessionExpired;
        };
        match self.source.ai_summary(&credential).await {
            Ok(raw) => ViewState::Ready(insight_parser::parse(&raw)),
            Err(e) if e.is_unauthorized() => {
                warn!("AI summary rejected as unauthorized, session expired");
                self.session.clear();
                ViewState::SessionExpired
            }
            Err(e) => {
                warn!("AI summary fetch failed: {e}");
                ViewState::Error("Could not load AI insights.".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::services::test_support::{Endpoint, ScriptedSource};
    use crate::session::Credential;

    fn screen_with(source: ScriptedSource) -> (Arc<AnalysisScreen>, Arc<SessionGuard>) {
        let session = Arc::new(SessionGuard::new());
        session.set(Credential::new("tok"));
        let screen = Arc::new(AnalysisScreen::new(Arc::new(source), session.clone()));
        (screen, session)
    }

    fn composition_tagged(total: f64) -> CompositionData {
        CompositionData {
            total_portfolio_value: Some(total),
            ..CompositionData::default()
        }
    }

    #[tokio::test]
    async fn ready_only_after_slowest_subread_settles() {
        let source = ScriptedSource {
            composition: Endpoint::ready(composition_tagged(1.0))
                .with_delay(Duration::from_millis(80)),
            performance: Endpoint::ready(PerformanceData::default())
                .with_delay(Duration::from_millis(10)),
            ..ScriptedSource::default()
        };
        let (screen, _session) = screen_with(source);

        let loader = tokio::spawn({
            let screen = screen.clone();
            async move { screen.load().await }
        });

        // Two of three sub-reads have settled; the view must still be loading.
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(screen.state().is_loading());

        loader.await.unwrap();
        match screen.state() {
            ViewState::Ready(view) => {
                assert_eq!(view.composition.total_portfolio_value, Some(1.0));
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unauthorized_subread_expires_session_regardless_of_order() {
        // Unauthorized settles first.
        let source = ScriptedSource {
            performance: Endpoint::unauthorized(),
            composition: Endpoint::ready(CompositionData::default())
                .with_delay(Duration::from_millis(30)),
            behavior: Endpoint::ready(BehaviorStats::default())
                .with_delay(Duration::from_millis(30)),
            ..ScriptedSource::default()
        };
        let (screen, session) = screen_with(source);
        screen.load().await;
        assert_eq!(screen.state(), ViewState::SessionExpired);
        assert!(session.current().is_none());

        // Unauthorized settles last.
        let source = ScriptedSource {
            performance: Endpoint::unauthorized().with_delay(Duration::from_millis(30)),
            ..ScriptedSource::default()
        };
        let (screen, session) = screen_with(source);
        screen.load().await;
        assert_eq!(screen.state(), ViewState::SessionExpired);
        assert!(session.current().is_none());
    }

    #[tokio::test]
    async fn first_failure_in_declaration_order_wins() {
        let source = ScriptedSource {
            composition: Endpoint::failing("composition down")
                .with_delay(Duration::from_millis(30)),
            behavior: Endpoint::failing("behavior down"),
            ..ScriptedSource::default()
        };
        let (screen, _session) = screen_with(source);
        screen.load().await;

        let message = screen.state().error().unwrap_or_default().to_string();
        assert!(message.contains("composition down"), "got: {message}");
        assert!(!message.contains("behavior down"));
    }

    #[tokio::test]
    async fn missing_session_short_circuits_without_network_calls() {
        let source = Arc::new(ScriptedSource::default());
        let session = Arc::new(SessionGuard::new());
        let screen = AnalysisScreen::new(source.clone(), session.clone());

        screen.load().await;
        assert_eq!(screen.state(), ViewState::SessionExpired);

        screen.load_commentary().await;
        assert_eq!(screen.commentary_state(), ViewState::SessionExpired);
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn commentary_failure_leaves_primary_view_ready() {
        let source = ScriptedSource {
            ai_summary: Endpoint::failing("model offline"),
            composition: Endpoint::ready(composition_tagged(2.0)),
            ..ScriptedSource::default()
        };
        let (screen, session) = screen_with(source);

        join!(screen.load(), screen.load_commentary());

        assert!(screen.state().is_ready());
        assert_eq!(
            screen.commentary_state(),
            ViewState::Error("Could not load AI insights.".to_string())
        );
        assert!(session.current().is_some());
    }

    #[tokio::test]
    async fn unauthorized_commentary_expires_session_but_not_primary_view() {
        let source = ScriptedSource {
            ai_summary: Endpoint::unauthorized().with_delay(Duration::from_millis(30)),
            composition: Endpoint::ready(composition_tagged(3.0)),
            ..ScriptedSource::default()
        };
        let (screen, session) = screen_with(source);

        // Primary settles first; the delayed 401 then tears the session down.
        join!(screen.load(), screen.load_commentary());

        assert_eq!(screen.commentary_state(), ViewState::SessionExpired);
        assert!(session.current().is_none());
        match screen.state() {
            ViewState::Ready(view) => {
                assert_eq!(view.composition.total_portfolio_value, Some(3.0));
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn commentary_success_is_parsed_into_lists() {
        let source = ScriptedSource {
            ai_summary: Endpoint::ready(
                "Behavioral Insights: You churn positions.\nPersonalized Suggestions: Hold longer."
                    .to_string(),
            ),
            ..ScriptedSource::default()
        };
        let (screen, _session) = screen_with(source);
        screen.load_commentary().await;

        match screen.commentary_state() {
            ViewState::Ready(report) => {
                assert_eq!(report.insights, vec!["You churn positions."]);
                assert_eq!(report.suggestions, vec!["Hold longer."]);
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn stale_cycle_result_is_discarded() {
        let source = ScriptedSource {
            composition: Endpoint::ready(composition_tagged(1.0))
                .with_delay(Duration::from_millis(60))
                .then_ready(composition_tagged(2.0), Duration::from_millis(5)),
            ..ScriptedSource::default()
        };
        let (screen, _session) = screen_with(source);

        let first = tokio::spawn({
            let screen = screen.clone();
            async move { screen.load().await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        screen.retry().await;
        first.await.unwrap();

        // The slower first cycle settled after the retry and must not win.
        match screen.state() {
            ViewState::Ready(view) => {
                assert_eq!(view.composition.total_portfolio_value, Some(2.0));
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }
}
