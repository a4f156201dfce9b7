//! Chart descriptions exchanged with the composition service and drawn by the
//! rendering surface.
//!
//! The wire shape is `{data: [trace...], layout: {...}}`. [`ChartDescription`]
//! keeps that object untouched; [`Figure`] and its parts are the typed model
//! for charts built in-process.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::curve::CurveDataset;
use crate::error::{CurveError, CurveResult};

pub type JsonMap = Map<String, Value>;

pub const GRID_COLOR: &str = "#e0e0e0";
pub const BACKGROUND_COLOR: &str = "white";
pub const TEXT_COLOR: &str = "#2c3e50";
pub const TEXT_SECONDARY_COLOR: &str = "#7f8c8d";
pub const TIME_AXIS_TITLE: &str = "Time (ms)";
pub const PRESSURE_AXIS_TITLE: &str = "Pressure (MPa)";
pub const PRIMARY_PROMPT: &str = "Click \"Run\" to start a simulation";
pub const COMPARISON_PROMPT: &str = "Run a simulation or upload test data first";

/// The two view regions a chart can be drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Primary,
    Comparison,
}

impl ViewKind {
    /// Declaration order; the first entry is the initially active view.
    pub const ALL: [ViewKind; 2] = [ViewKind::Primary, ViewKind::Comparison];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::Primary => "primary",
            ViewKind::Comparison => "comparison",
        }
    }

    /// Prompt shown while the view has no data.
    pub fn prompt(self) -> &'static str {
        match self {
            ViewKind::Primary => PRIMARY_PROMPT,
            ViewKind::Comparison => COMPARISON_PROMPT,
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// No traces; only a prompt annotation.
    Placeholder,
    /// At least one trace.
    Populated,
}

/// A chart as exchanged with collaborators and handed to the surface.
///
/// Held as the JSON object it arrived as, so a remote chart is drawn exactly
/// as received. Charts built locally go through [`Figure`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartDescription(JsonMap);

impl ChartDescription {
    pub fn from_json(object: JsonMap) -> Self {
        Self(object)
    }

    pub fn as_json(&self) -> &JsonMap {
        &self.0
    }

    pub fn into_json(self) -> JsonMap {
        self.0
    }

    /// Raw trace records; empty when `data` is missing or not an array.
    pub fn traces(&self) -> &[Value] {
        self.0
            .get("data")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn trace_count(&self) -> usize {
        self.traces().len()
    }

    pub fn kind(&self) -> ChartKind {
        if self.traces().is_empty() {
            ChartKind::Placeholder
        } else {
            ChartKind::Populated
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.kind() == ChartKind::Placeholder
    }

    /// Prompt text of a placeholder chart, `None` for populated charts.
    pub fn placeholder_prompt(&self) -> Option<&str> {
        if !self.is_placeholder() {
            return None;
        }
        self.0
            .get("layout")?
            .get("annotations")?
            .as_array()?
            .first()?
            .get("text")?
            .as_str()
    }

    /// Curve carried by the first trace, `None` when there are no traces.
    ///
    /// A trace without `x` is plotted against the sample index, so its time
    /// axis is `0, 1, 2, ...`.
    pub fn first_curve(&self) -> CurveResult<Option<CurveDataset>> {
        let Some(trace) = self.traces().first() else {
            return Ok(None);
        };
        let pressure = numeric_array(trace.get("y"), "y")?.unwrap_or_default();
        let time = match numeric_array(trace.get("x"), "x")? {
            Some(time) => time,
            None => (0..pressure.len()).map(|i| i as f64).collect(),
        };
        CurveDataset::new(time, pressure).map(Some)
    }

    /// Typed view of the chart. Lossy for keys the typed model normalizes,
    /// so it is for inspection only; draw the description itself.
    pub fn figure(&self) -> serde_json::Result<Figure> {
        serde_json::from_value(Value::Object(self.0.clone()))
    }
}

impl From<Figure> for ChartDescription {
    fn from(figure: Figure) -> Self {
        // a derived Serialize for a struct always yields an object
        match serde_json::to_value(figure) {
            Ok(Value::Object(object)) => Self(object),
            _ => Self::default(),
        }
    }
}

fn numeric_array(value: Option<&Value>, axis: &'static str) -> CurveResult<Option<Vec<f64>>> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Ok(None);
    };
    let items = value.as_array().ok_or(CurveError::NonNumeric { axis })?;
    items
        .iter()
        .map(|v| v.as_f64().ok_or(CurveError::NonNumeric { axis }))
        .collect::<CurveResult<Vec<_>>>()
        .map(Some)
}

/// Typed `{data, layout}` model used to build charts locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    #[serde(default)]
    pub data: Vec<Trace>,
    #[serde(default)]
    pub layout: Layout,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(default)]
    pub x: Vec<f64>,
    #[serde(default)]
    pub y: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl Trace {
    pub fn lines(curve: &CurveDataset, name: &str, line: LineStyle) -> Self {
        Self {
            x: curve.time().to_vec(),
            y: curve.pressure().to_vec(),
            mode: Some("lines".to_string()),
            name: Some(name.to_string()),
            line: Some(line),
            extra: JsonMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
    #[serde(flatten)]
    pub extra: JsonMap,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper_bgcolor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hovermode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl Layout {
    /// Axis, grid, background and margin styling shared by every chart.
    pub fn pressure_time() -> Self {
        Self {
            xaxis: Some(Axis::titled(TIME_AXIS_TITLE)),
            yaxis: Some(Axis::titled(PRESSURE_AXIS_TITLE)),
            plot_bgcolor: Some(BACKGROUND_COLOR.to_string()),
            paper_bgcolor: Some(BACKGROUND_COLOR.to_string()),
            margin: Some(Margin {
                l: 60.0,
                r: 30.0,
                t: 30.0,
                b: 50.0,
                extra: JsonMap::new(),
            }),
            ..Self::default()
        }
    }
}

/// Axis titles arrive either as a bare string or as `{text: ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisTitle {
    Text(String),
    Styled {
        text: String,
        #[serde(flatten)]
        extra: JsonMap,
    },
}

impl AxisTitle {
    pub fn text(&self) -> &str {
        match self {
            AxisTitle::Text(text) | AxisTitle::Styled { text, .. } => text,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<AxisTitle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gridcolor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showgrid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zeroline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linecolor: Option<String>,
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl Axis {
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(AxisTitle::Text(title.to_string())),
            gridcolor: Some(GRID_COLOR.to_string()),
            showgrid: Some(true),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    #[serde(default)]
    pub l: f64,
    #[serde(default)]
    pub r: f64,
    #[serde(default)]
    pub t: f64,
    #[serde(default)]
    pub b: f64,
    #[serde(flatten)]
    pub extra: JsonMap,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Font {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: JsonMap,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bordercolor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borderwidth: Option<f64>,
    #[serde(flatten)]
    pub extra: JsonMap,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showarrow: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl Annotation {
    /// Centred, arrowless prompt in the secondary text colour.
    pub fn prompt(text: &str) -> Self {
        Self {
            text: text.to_string(),
            xref: Some("paper".to_string()),
            yref: Some("paper".to_string()),
            x: Some(0.5),
            y: Some(0.5),
            showarrow: Some(false),
            font: Some(Font {
                size: Some(16.0),
                color: Some(TEXT_SECONDARY_COLOR.to_string()),
                ..Font::default()
            }),
            extra: JsonMap::new(),
        }
    }
}

/// Empty chart carrying only the prompt for `view`.
pub fn placeholder_for(view: ViewKind) -> ChartDescription {
    Figure {
        data: Vec::new(),
        layout: Layout {
            annotations: vec![Annotation::prompt(view.prompt())],
            ..Layout::pressure_time()
        },
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn placeholders_share_styling_and_differ_in_prompt() {
        let primary = placeholder_for(ViewKind::Primary);
        let comparison = placeholder_for(ViewKind::Comparison);

        assert!(primary.is_placeholder());
        assert!(comparison.is_placeholder());
        assert_eq!(primary.placeholder_prompt(), Some(PRIMARY_PROMPT));
        assert_eq!(comparison.placeholder_prompt(), Some(COMPARISON_PROMPT));

        let strip = |chart: ChartDescription| {
            let mut figure = chart.figure().unwrap();
            figure.layout.annotations[0].text.clear();
            figure
        };
        assert_eq!(strip(primary), strip(comparison));
    }

    #[test]
    fn kind_follows_trace_count() {
        let mut figure = placeholder_for(ViewKind::Comparison).figure().unwrap();
        assert_eq!(ChartDescription::from(figure.clone()).kind(), ChartKind::Placeholder);

        let curve = CurveDataset::new(vec![0.0, 1.0], vec![1.0, 2.0]).unwrap();
        figure.data.push(Trace::lines(&curve, "Simulation", LineStyle::default()));
        let chart = ChartDescription::from(figure);
        assert_eq!(chart.kind(), ChartKind::Populated);
        assert_eq!(chart.placeholder_prompt(), None);
    }

    #[test]
    fn first_curve_tolerates_empty_trace_list() {
        let chart = ChartDescription::default();
        assert_eq!(chart.first_curve().unwrap(), None);
    }

    #[test]
    fn first_curve_reads_first_trace() {
        let chart: ChartDescription = serde_json::from_str(
            r#"{"data":[{"x":[0,1,2],"y":[0,5,10],"mode":"lines","name":"a","type":"scatter"},
                        {"x":[9],"y":[9]}],
                "layout":{}}"#,
        )
        .unwrap();
        let curve = chart.first_curve().unwrap().unwrap();
        assert_eq!(curve.time(), &[0.0, 1.0, 2.0]);
        assert_eq!(curve.pressure(), &[0.0, 5.0, 10.0]);
    }

    #[test]
    fn first_curve_indexes_a_trace_without_x() {
        let chart: ChartDescription =
            serde_json::from_value(json!({"data": [{"y": [4, 5, 6]}]})).unwrap();
        let curve = chart.first_curve().unwrap().unwrap();
        assert_eq!(curve.time(), &[0.0, 1.0, 2.0]);
        assert_eq!(curve.pressure(), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn first_curve_rejects_misaligned_or_non_numeric_traces() {
        let chart: ChartDescription =
            serde_json::from_str(r#"{"data":[{"x":[0,1],"y":[0]}],"layout":{}}"#).unwrap();
        assert!(matches!(
            chart.first_curve(),
            Err(CurveError::LengthMismatch { time: 2, pressure: 1 })
        ));

        let chart: ChartDescription =
            serde_json::from_value(json!({"data": [{"x": ["a"], "y": [1]}]})).unwrap();
        assert_eq!(chart.first_curve(), Err(CurveError::NonNumeric { axis: "x" }));
    }

    #[test]
    fn received_charts_round_trip_unchanged() {
        let input = json!({
            "data": [{
                "x": [0.0, 1.0],
                "y": [2.0, 3.0],
                "mode": "lines",
                "name": "Simulation",
                "type": "scatter",
                "line": {"color": "rgb(66, 126, 234)", "width": 3, "shape": "spline"}
            }],
            "layout": {
                "xaxis": {"title": {"text": "Time (ms)"}, "gridcolor": "#e0e0e0"},
                "template": {"layout": {}},
                "hovermode": "x unified"
            }
        });
        let chart: ChartDescription = serde_json::from_value(input.clone()).unwrap();
        let figure = chart.figure().unwrap();
        assert_eq!(figure.data[0].extra["type"], "scatter");
        assert_eq!(
            figure.layout.xaxis.as_ref().and_then(|a| a.title.as_ref()).map(AxisTitle::text),
            Some("Time (ms)")
        );
        assert_eq!(serde_json::to_value(&chart).unwrap(), input);
    }

    #[test]
    fn missing_optional_keys_stay_missing() {
        let input = json!({
            "data": [{"y": [1, 2, 3], "type": "scatter", "name": "y only"}],
            "layout": {"margin": {"l": 40}, "annotations": []}
        });
        let chart: ChartDescription = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&chart).unwrap(), input);

        let sparse = json!({"layout": {}});
        let chart: ChartDescription = serde_json::from_value(sparse.clone()).unwrap();
        assert!(chart.is_placeholder());
        assert_eq!(serde_json::to_value(&chart).unwrap(), sparse);
    }
}
