//! Comparison chart refresh.

use tracing::{debug, warn};

use pt_client::{CompositionRequest, CompositionService};
use pt_core::ViewKind;

use crate::feedback::Feedback;
use crate::presenter::RenderSurface;
use crate::state::ActionKind;
use crate::workflow::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The collaborator's chart is on screen.
    Composed,
    /// Composition failed; the comparison placeholder is on screen.
    Placeholder,
    /// A newer refresh was started; nothing was drawn.
    Superseded,
}

pub struct ComparisonComposer<M> {
    service: M,
}

impl<M: CompositionService> ComparisonComposer<M> {
    pub fn new(service: M) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &M {
        &self.service
    }

    /// Send the current curves (either may be absent) for composition and draw
    /// the answer into the comparison view.
    ///
    /// Every call issues a fresh request. Failures never reach the user: the
    /// comparison placeholder replaces whatever was shown.
    pub async fn refresh<S: RenderSurface, F: Feedback>(
        &self,
        ctx: Context<'_, S, F>,
    ) -> RefreshOutcome {
        let (token, request) = {
            let mut state = ctx.state.borrow_mut();
            let token = state.issue(ActionKind::Compose);
            let request = CompositionRequest {
                simulation_data: state.last_simulation_run().cloned(),
                test_data: state.last_test_import().cloned(),
            };
            (token, request)
        };
        debug!(
            seq = token.seq(),
            simulation = request.simulation_data.is_some(),
            test = request.test_data.is_some(),
            "comparison requested"
        );

        let result = self.service.compose(&request).await;

        if !ctx.state.borrow().is_latest(token) {
            debug!(seq = token.seq(), "dropping superseded comparison chart");
            return RefreshOutcome::Superseded;
        }

        match result {
            Ok(chart) => {
                ctx.state.borrow_mut().record_comparison(chart.clone());
                ctx.presenter.present(ViewKind::Comparison, &chart);
                RefreshOutcome::Composed
            }
            Err(err) => {
                warn!(error = %err, "comparison chart unavailable, showing placeholder");
                ctx.presenter.present_placeholder(ViewKind::Comparison);
                RefreshOutcome::Placeholder
            }
        }
    }
}
