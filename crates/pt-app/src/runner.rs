//! Simulation submission.

use tracing::{debug, error, info, warn};

use pt_client::{ComputeService, FormInput};
use pt_core::{ChartDescription, CurveDataset, SimulationStatistics, ViewKind};

use crate::error::{WorkflowError, WorkflowResult};
use crate::feedback::{Feedback, Notice, SIMULATION_DONE, SIMULATION_ERROR, SIMULATION_FAILED};
use crate::presenter::RenderSurface;
use crate::state::ActionKind;
use crate::workflow::Context;

/// Result of one successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    /// Curve read from the chart's first trace; `None` when the chart has no traces
    pub dataset: Option<CurveDataset>,
    pub chart: ChartDescription,
    pub stats: Option<SimulationStatistics>,
}

pub struct SimulationRunner<C> {
    service: C,
}

impl<C: ComputeService> SimulationRunner<C> {
    pub fn new(service: C) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &C {
        &self.service
    }

    /// Submit `params` unchanged. On success the run's curve and chart are
    /// stored together, the summary is updated and the chart is drawn into
    /// the primary view; on failure the state is untouched.
    pub async fn run<S: RenderSurface, F: Feedback>(
        &self,
        params: &FormInput,
        ctx: Context<'_, S, F>,
    ) -> WorkflowResult<SimulationOutcome> {
        let token = ctx.state.borrow_mut().issue(ActionKind::Run);
        debug!(seq = token.seq(), fields = params.len(), "simulation submitted");

        let result = self
            .service
            .run_simulation(params)
            .await
            .map_err(WorkflowError::from)
            .and_then(|payload| {
                let dataset = payload.plot_data.first_curve().map_err(|e| {
                    WorkflowError::Transport(format!("malformed plot data: {e}"))
                })?;
                Ok(SimulationOutcome {
                    dataset,
                    chart: payload.plot_data,
                    stats: payload.statistics,
                })
            });

        if !ctx.state.borrow().is_latest(token) {
            debug!(seq = token.seq(), "dropping superseded simulation result");
            return Err(WorkflowError::Stale(ActionKind::Run));
        }

        match result {
            Ok(outcome) => {
                ctx.state
                    .borrow_mut()
                    .record_simulation(outcome.dataset.clone(), outcome.chart.clone());
                if let Some(stats) = &outcome.stats {
                    ctx.feedback.show_summary(&stats.summary_text());
                }
                ctx.presenter.present(ViewKind::Primary, &outcome.chart);
                info!(
                    seq = token.seq(),
                    samples = outcome.dataset.as_ref().map_or(0, CurveDataset::len),
                    "simulation completed"
                );
                ctx.feedback.notify(Notice::info(SIMULATION_DONE));
                Ok(outcome)
            }
            Err(err) => {
                match &err {
                    WorkflowError::RemoteRejection { .. } => warn!(error = %err, "simulation rejected"),
                    _ => error!(error = %err, "simulation request failed"),
                }
                ctx.feedback.notify(Notice::failure(
                    SIMULATION_FAILED,
                    err.server_message(),
                    SIMULATION_ERROR,
                ));
                Err(err)
            }
        }
    }
}
