//! pt-core: shared data model for ptflow.
//!
//! Contains:
//! - curve (time/pressure datasets, length-checked at construction)
//! - stats (display-only simulation statistics)
//! - chart (chart descriptions, view kinds, placeholders)
//! - metrics (simulation vs test curve comparison)
//! - numeric (rounding + interpolation helpers)
//! - units (uom pressure/time constructors)
//! - error (shared error types)

pub mod chart;
pub mod curve;
pub mod error;
pub mod metrics;
pub mod numeric;
pub mod stats;
pub mod units;

pub use chart::{
    Annotation, Axis, AxisTitle, ChartDescription, ChartKind, Figure, Font, Layout, Legend,
    LineStyle, Margin, Trace, ViewKind, placeholder_for,
};
pub use curve::CurveDataset;
pub use error::{CurveError, CurveResult};
pub use metrics::{ComparisonMetrics, compare_curves};
pub use stats::SimulationStatistics;
