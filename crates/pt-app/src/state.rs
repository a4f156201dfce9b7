//! Workflow state shared between the run, upload and compare actions.

use std::fmt;

use pt_core::{ChartDescription, CurveDataset};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Run,
    Import,
    Compose,
}

impl ActionKind {
    fn slot(self) -> usize {
        match self {
            ActionKind::Run => 0,
            ActionKind::Import => 1,
            ActionKind::Compose => 2,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActionKind::Run => "run",
            ActionKind::Import => "import",
            ActionKind::Compose => "compose",
        })
    }
}

/// Issued when an action starts; its result is applied only while the token
/// is still the latest one for its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceToken {
    kind: ActionKind,
    seq: u64,
}

impl SequenceToken {
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Latest results of each action. Every field is replaced wholesale by its
/// producing action, never merged.
#[derive(Debug, Default)]
pub struct WorkflowState {
    last_simulation_run: Option<CurveDataset>,
    last_simulation_chart: Option<ChartDescription>,
    last_test_import: Option<CurveDataset>,
    last_comparison_chart: Option<ChartDescription>,
    issued: [u64; 3],
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State resumed from curves saved by an earlier session. No charts are
    /// carried over, so the simulation chart stays empty until the next run.
    pub fn with_curves(simulation: Option<CurveDataset>, test: Option<CurveDataset>) -> Self {
        Self {
            last_simulation_run: simulation,
            last_test_import: test,
            ..Self::default()
        }
    }

    pub fn last_simulation_run(&self) -> Option<&CurveDataset> {
        self.last_simulation_run.as_ref()
    }

    pub fn last_simulation_chart(&self) -> Option<&ChartDescription> {
        self.last_simulation_chart.as_ref()
    }

    pub fn last_test_import(&self) -> Option<&CurveDataset> {
        self.last_test_import.as_ref()
    }

    pub fn last_comparison_chart(&self) -> Option<&ChartDescription> {
        self.last_comparison_chart.as_ref()
    }

    /// Store one run's result. Dataset and chart always come from the same run;
    /// the dataset is `None` when the chart had no traces to derive it from.
    pub fn record_simulation(&mut self, dataset: Option<CurveDataset>, chart: ChartDescription) {
        self.last_simulation_run = dataset;
        self.last_simulation_chart = Some(chart);
    }

    pub fn record_test_import(&mut self, dataset: CurveDataset) {
        self.last_test_import = Some(dataset);
    }

    pub fn record_comparison(&mut self, chart: ChartDescription) {
        self.last_comparison_chart = Some(chart);
    }

    pub fn issue(&mut self, kind: ActionKind) -> SequenceToken {
        let slot = &mut self.issued[kind.slot()];
        *slot += 1;
        SequenceToken { kind, seq: *slot }
    }

    pub fn is_latest(&self, token: SequenceToken) -> bool {
        self.issued[token.kind.slot()] == token.seq
    }
}
