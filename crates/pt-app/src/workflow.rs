//! Orchestration root.

use std::cell::{Ref, RefCell};

use tracing::info;

use pt_client::{CompositionService, ComputeService, FormInput, IngestionService, UploadFile};
use pt_core::{CurveDataset, ViewKind};

use crate::composer::{ComparisonComposer, RefreshOutcome};
use crate::error::WorkflowResult;
use crate::feedback::Feedback;
use crate::importer::TestDataImporter;
use crate::presenter::{ChartPresenter, RenderSurface};
use crate::runner::{SimulationOutcome, SimulationRunner};
use crate::state::WorkflowState;
use crate::views::{TabControl, ViewSwitcher, VisibilityChange};

/// Shared pieces an action needs while it runs.
pub struct Context<'a, S, F> {
    pub state: &'a RefCell<WorkflowState>,
    pub presenter: &'a ChartPresenter<S>,
    pub feedback: &'a F,
}

impl<S, F> Clone for Context<'_, S, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, F> Copy for Context<'_, S, F> {}

/// Owns the workflow state and every component acting on it.
///
/// Actions take `&self`, so several can be in flight on one thread at once.
/// No `RefCell` borrow is held across a remote call.
pub struct Workflow<C, I, M, S, F> {
    state: RefCell<WorkflowState>,
    runner: SimulationRunner<C>,
    importer: TestDataImporter<I>,
    composer: ComparisonComposer<M>,
    presenter: ChartPresenter<S>,
    switcher: RefCell<ViewSwitcher>,
    feedback: F,
}

impl<C, I, M, S, F> Workflow<C, I, M, S, F>
where
    C: ComputeService,
    I: IngestionService,
    M: CompositionService,
    S: RenderSurface,
    F: Feedback,
{
    pub fn new(compute: C, ingestion: I, composition: M, surface: S, feedback: F) -> Self {
        Self {
            state: RefCell::new(WorkflowState::new()),
            runner: SimulationRunner::new(compute),
            importer: TestDataImporter::new(ingestion),
            composer: ComparisonComposer::new(composition),
            presenter: ChartPresenter::new(surface),
            switcher: RefCell::new(ViewSwitcher::new()),
            feedback,
        }
    }

    /// Replace the state a fresh workflow starts with.
    pub fn with_state(mut self, state: WorkflowState) -> Self {
        self.state = RefCell::new(state);
        self
    }

    fn context(&self) -> Context<'_, S, F> {
        Context {
            state: &self.state,
            presenter: &self.presenter,
            feedback: &self.feedback,
        }
    }

    /// Draw both placeholders and activate the first view. Front ends that
    /// only perform a single action may skip this and draw nothing else.
    pub fn initialize(&self) {
        for view in ViewKind::ALL {
            self.presenter.present_placeholder(view);
        }
        self.switch_view(&TabControl::for_view(ViewKind::ALL[0]));
        info!("workflow initialized");
    }

    pub async fn run_simulation(&self, params: &FormInput) -> WorkflowResult<SimulationOutcome> {
        self.runner.run(params, self.context()).await
    }

    /// Upload `file` (None when nothing was selected), then refresh the comparison.
    pub async fn import_test_file(&self, file: Option<&UploadFile>) -> WorkflowResult<CurveDataset> {
        self.importer
            .import_file(file, self.context(), &self.composer)
            .await
    }

    pub async fn refresh_comparison(&self) -> RefreshOutcome {
        self.composer.refresh(self.context()).await
    }

    pub fn switch_view(&self, control: &TabControl) -> VisibilityChange {
        self.switcher
            .borrow_mut()
            .switch_to(control, &self.presenter)
    }

    pub fn active_view(&self) -> ViewKind {
        self.switcher.borrow().active()
    }

    pub fn switcher(&self) -> Ref<'_, ViewSwitcher> {
        self.switcher.borrow()
    }

    pub fn state(&self) -> Ref<'_, WorkflowState> {
        self.state.borrow()
    }

    pub fn presenter(&self) -> &ChartPresenter<S> {
        &self.presenter
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }
}
