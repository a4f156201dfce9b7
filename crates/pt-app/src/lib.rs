//! Workflow orchestration for ptflow.
//!
//! Ties the run / upload / compare actions to the state they share and to the
//! single presenter allowed to draw. [`Workflow`] is the root: it owns the
//! state, the collaborators and the view switcher, and exposes the user
//! actions.

pub mod composer;
pub mod error;
pub mod feedback;
pub mod importer;
pub mod presenter;
pub mod runner;
pub mod state;
pub mod views;
pub mod workflow;

// Re-export key types for convenience
pub use composer::{ComparisonComposer, RefreshOutcome};
pub use error::{WorkflowError, WorkflowResult};
pub use feedback::{Feedback, Notice, NoticeLevel};
pub use importer::TestDataImporter;
pub use presenter::{ChartPresenter, RenderSurface};
pub use runner::{SimulationOutcome, SimulationRunner};
pub use state::{ActionKind, SequenceToken, WorkflowState};
pub use views::{TabControl, ViewSwitcher, VisibilityChange, VisibilityObserver};
pub use workflow::{Context, Workflow};
