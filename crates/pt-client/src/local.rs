//! In-process chart composition.
//!
//! Builds the same charts the remote service does: one trace per non-empty
//! curve, a legend only when both are present, and the comparison prompt
//! when neither is.

use pt_core::chart::{GRID_COLOR, JsonMap, PRESSURE_AXIS_TITLE, TEXT_COLOR, TIME_AXIS_TITLE};
use pt_core::{
    Annotation, Axis, ChartDescription, CurveDataset, Figure, Font, Layout, Legend, LineStyle,
    Trace, ViewKind,
};

use crate::wire::CompositionRequest;
use crate::{ClientResult, CompositionService};

pub const SIMULATION_TRACE_NAME: &str = "Simulation";
pub const TEST_TRACE_NAME: &str = "Test data";

const SIMULATION_COLOR: &str = "rgb(66, 126, 234)";
const TEST_COLOR: &str = "rgb(231, 76, 60)";
const FONT_FAMILY: &str = "Microsoft YaHei, Arial, sans-serif";

pub fn simulation_line() -> LineStyle {
    LineStyle {
        color: Some(SIMULATION_COLOR.to_string()),
        width: Some(3.0),
        ..LineStyle::default()
    }
}

pub fn test_line() -> LineStyle {
    LineStyle {
        color: Some(TEST_COLOR.to_string()),
        width: Some(3.0),
        dash: Some("dot".to_string()),
        ..LineStyle::default()
    }
}

fn chart_layout() -> Layout {
    let axis = |title: &str| Axis {
        zeroline: Some(false),
        showline: Some(true),
        linecolor: Some(GRID_COLOR.to_string()),
        ..Axis::titled(title)
    };
    Layout {
        xaxis: Some(axis(TIME_AXIS_TITLE)),
        yaxis: Some(axis(PRESSURE_AXIS_TITLE)),
        hovermode: Some("x unified".to_string()),
        font: Some(Font {
            family: Some(FONT_FAMILY.to_string()),
            size: Some(12.0),
            color: Some(TEXT_COLOR.to_string()),
            extra: JsonMap::new(),
        }),
        ..Layout::pressure_time()
    }
}

fn legend() -> Legend {
    Legend {
        x: Some(0.7),
        y: Some(0.1),
        bgcolor: Some("rgba(255, 255, 255, 0.8)".to_string()),
        bordercolor: Some(GRID_COLOR.to_string()),
        borderwidth: Some(1.0),
        extra: JsonMap::new(),
    }
}

/// Single-trace chart for a simulation curve.
pub fn simulation_chart(curve: &CurveDataset) -> ChartDescription {
    Figure {
        data: vec![Trace::lines(curve, SIMULATION_TRACE_NAME, simulation_line())],
        layout: chart_layout(),
    }
    .into()
}

pub fn comparison_chart(
    simulation: Option<&CurveDataset>,
    test: Option<&CurveDataset>,
) -> ChartDescription {
    let mut data = Vec::new();
    if let Some(curve) = simulation.filter(|c| !c.is_empty()) {
        data.push(Trace::lines(curve, SIMULATION_TRACE_NAME, simulation_line()));
    }
    if let Some(curve) = test.filter(|c| !c.is_empty()) {
        data.push(Trace::lines(curve, TEST_TRACE_NAME, test_line()));
    }

    let mut layout = chart_layout();
    match data.len() {
        0 => layout.annotations = vec![Annotation::prompt(ViewKind::Comparison.prompt())],
        1 => {}
        _ => layout.legend = Some(legend()),
    }

    Figure { data, layout }.into()
}

/// [`CompositionService`] that never leaves the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalComposer;

impl CompositionService for LocalComposer {
    async fn compose(&self, request: &CompositionRequest) -> ClientResult<ChartDescription> {
        Ok(comparison_chart(
            request.simulation_data.as_ref(),
            request.test_data.as_ref(),
        ))
    }
}
