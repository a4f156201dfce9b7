use thiserror::Error;

pub type CurveResult<T> = Result<T, CurveError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("Curve length mismatch: {time} time samples vs {pressure} pressure samples")]
    LengthMismatch { time: usize, pressure: usize },

    #[error("Trace axis {axis} is not a numeric array")]
    NonNumeric { axis: &'static str },

    #[error("Empty curve: {what}")]
    Empty { what: &'static str },

    #[error("Curves do not overlap in time ({start} > {end})")]
    NoOverlap { start: f64, end: f64 },

    #[error("Sample count mismatch for {what}: {left} vs {right}")]
    SampleMismatch {
        what: &'static str,
        left: usize,
        right: usize,
    },
}
