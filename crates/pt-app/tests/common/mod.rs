//! In-memory collaborators for workflow tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use tokio::sync::oneshot;

use pt_app::{Feedback, Notice, RenderSurface, Workflow};
use pt_client::{
    ClientError, ClientResult, CompositionRequest, CompositionService, ComputeService, FormInput,
    IngestionService, SimulationPayload, UploadFile,
};
use pt_core::{
    ChartDescription, CurveDataset, Figure, LineStyle, SimulationStatistics, Trace, ViewKind,
};

enum Reply<T> {
    Ready(ClientResult<T>),
    Gated(oneshot::Receiver<ClientResult<T>>),
}

/// Replies handed out in call order. A gated reply resolves when the test
/// sends through the returned sender, so tests control completion order.
pub struct Scripted<T> {
    replies: RefCell<VecDeque<Reply<T>>>,
    calls: Cell<usize>,
}

impl<T> Default for Scripted<T> {
    fn default() -> Self {
        Self {
            replies: RefCell::new(VecDeque::new()),
            calls: Cell::new(0),
        }
    }
}

impl<T> Scripted<T> {
    pub fn ok(&self, value: T) {
        self.replies.borrow_mut().push_back(Reply::Ready(Ok(value)));
    }

    pub fn err(&self, err: ClientError) {
        self.replies.borrow_mut().push_back(Reply::Ready(Err(err)));
    }

    pub fn gated(&self) -> oneshot::Sender<ClientResult<T>> {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push_back(Reply::Gated(rx));
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    async fn next(&self) -> ClientResult<T> {
        self.calls.set(self.calls.get() + 1);
        let reply = self.replies.borrow_mut().pop_front();
        match reply {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Gated(rx)) => rx.await.unwrap_or_else(|_| {
                Err(ClientError::Malformed {
                    message: "gate dropped".to_string(),
                })
            }),
            None => Err(ClientError::Malformed {
                message: "no scripted reply".to_string(),
            }),
        }
    }
}

#[derive(Default)]
pub struct FakeCompute {
    pub script: Scripted<SimulationPayload>,
    pub params: RefCell<Vec<FormInput>>,
}

impl ComputeService for FakeCompute {
    async fn run_simulation(&self, params: &FormInput) -> ClientResult<SimulationPayload> {
        self.params.borrow_mut().push(params.clone());
        self.script.next().await
    }
}

#[derive(Default)]
pub struct FakeIngestion {
    pub script: Scripted<CurveDataset>,
}

impl IngestionService for FakeIngestion {
    async fn upload_test_file(&self, _file: &UploadFile) -> ClientResult<CurveDataset> {
        self.script.next().await
    }
}

#[derive(Default)]
pub struct FakeComposition {
    pub script: Scripted<ChartDescription>,
    pub requests: RefCell<Vec<CompositionRequest>>,
}

impl CompositionService for FakeComposition {
    async fn compose(&self, request: &CompositionRequest) -> ClientResult<ChartDescription> {
        self.requests.borrow_mut().push(request.clone());
        self.script.next().await
    }
}

#[derive(Default)]
pub struct RecordingSurface {
    pub draws: Vec<(ViewKind, ChartDescription)>,
    pub relayouts: Vec<ViewKind>,
}

impl RecordingSurface {
    pub fn last_draw(&self, view: ViewKind) -> Option<&ChartDescription> {
        self.draws
            .iter()
            .rev()
            .find(|(v, _)| *v == view)
            .map(|(_, chart)| chart)
    }
}

impl RenderSurface for RecordingSurface {
    fn draw(&mut self, view: ViewKind, chart: &ChartDescription) {
        self.draws.push((view, chart.clone()));
    }

    fn relayout(&mut self, view: ViewKind) {
        self.relayouts.push(view);
    }
}

#[derive(Default)]
pub struct RecordingFeedback {
    pub notices: RefCell<Vec<Notice>>,
    pub summaries: RefCell<Vec<String>>,
}

impl Feedback for RecordingFeedback {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }

    fn show_summary(&self, summary: &str) {
        self.summaries.borrow_mut().push(summary.to_string());
    }
}

#[derive(Default)]
pub struct Fakes {
    pub compute: FakeCompute,
    pub ingestion: FakeIngestion,
    pub composition: FakeComposition,
    pub feedback: RecordingFeedback,
}

pub type TestWorkflow<'a> = Workflow<
    &'a FakeCompute,
    &'a FakeIngestion,
    &'a FakeComposition,
    RecordingSurface,
    &'a RecordingFeedback,
>;

impl Fakes {
    pub fn workflow(&self) -> TestWorkflow<'_> {
        Workflow::new(
            &self.compute,
            &self.ingestion,
            &self.composition,
            RecordingSurface::default(),
            &self.feedback,
        )
    }
}

pub fn curve(time: &[f64], pressure: &[f64]) -> CurveDataset {
    CurveDataset::new(time.to_vec(), pressure.to_vec()).expect("aligned curve")
}

pub fn chart_of(curve: &CurveDataset, name: &str) -> ChartDescription {
    Figure {
        data: vec![Trace::lines(curve, name, LineStyle::default())],
        ..Figure::default()
    }
    .into()
}

pub fn payload(curve: &CurveDataset) -> SimulationPayload {
    SimulationPayload {
        plot_data: chart_of(curve, "Simulation"),
        statistics: Some(SimulationStatistics {
            r_squared: Some(0.99),
            peak_pressure: curve.peak().map(|(_, p)| p),
            num_models: Some(2),
        }),
    }
}

pub fn upload() -> UploadFile {
    UploadFile::new("test.xlsx", vec![1, 2, 3])
}
