//! Response envelope decoding against bodies shaped like the service's.

use pt_client::envelope::decode;
use pt_client::{ClientError, SimulationPayload};
use pt_core::{ChartDescription, CurveDataset};

#[test]
fn run_success_yields_chart_and_statistics() {
    let body = r#"{
        "success": true,
        "message": "Success",
        "data": {
            "plot_data": {
                "data": [{"x": [0, 1, 2], "y": [0, 5, 10], "mode": "lines", "name": "Simulation", "type": "scatter"}],
                "layout": {"xaxis": {"title": {"text": "Time (ms)"}}}
            },
            "statistics": {"r_squared": 0.9991, "peak_pressure": 10.0, "num_models": 4}
        }
    }"#;

    let payload: SimulationPayload = decode(200, body).expect("decode");
    assert_eq!(payload.plot_data.trace_count(), 1);
    assert_eq!(payload.plot_data.traces()[0]["x"], serde_json::json!([0, 1, 2]));
    let stats = payload.statistics.expect("statistics");
    assert_eq!(stats.num_models, Some(4));
    assert_eq!(stats.peak_pressure, Some(10.0));
}

#[test]
fn run_rejection_carries_message() {
    let body = r#"{"success": false, "message": "Simulation timeout (exceeded 30 seconds)"}"#;
    let err = decode::<SimulationPayload>(200, body).unwrap_err();
    match err {
        ClientError::Rejected { message } => {
            assert_eq!(
                message.as_deref(),
                Some("Simulation timeout (exceeded 30 seconds)")
            )
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn compose_rejection_uses_error_field_even_on_400() {
    let body = r#"{"success": false, "error": "Error generating comparison chart"}"#;
    let err = decode::<ChartDescription>(400, body).unwrap_err();
    assert!(matches!(
        err,
        ClientError::Rejected { message: Some(ref m) } if m == "Error generating comparison chart"
    ));
}

#[test]
fn rejection_without_text_has_no_message() {
    let err = decode::<CurveDataset>(200, r#"{"success": false, "message": "  "}"#).unwrap_err();
    assert!(matches!(err, ClientError::Rejected { message: None }));
}

#[test]
fn compose_success_reads_chart_key() {
    let body = r#"{"success": true, "chart": {"data": [], "layout": {"annotations": [{"text": "Run a simulation or upload test data first"}]}}}"#;
    let chart: ChartDescription = decode(200, body).expect("decode");
    assert!(chart.is_placeholder());
}

#[test]
fn upload_success_yields_curve() {
    let body = r#"{"success": true, "data": {"time": [0.0, 0.5], "pressure": [0.1, 0.2]}}"#;
    let curve: CurveDataset = decode(200, body).expect("decode");
    assert_eq!(curve.len(), 2);
}

#[test]
fn misaligned_curve_is_malformed() {
    let body = r#"{"success": true, "data": {"time": [0.0, 0.5], "pressure": [0.1]}}"#;
    let err = decode::<CurveDataset>(200, body).unwrap_err();
    assert!(matches!(err, ClientError::Malformed { .. }));
}

#[test]
fn success_without_payload_is_malformed() {
    let err = decode::<CurveDataset>(200, r#"{"success": true}"#).unwrap_err();
    assert!(matches!(err, ClientError::Malformed { .. }));
}

#[test]
fn html_error_page_is_a_status_error() {
    let err = decode::<CurveDataset>(502, "<html>Bad Gateway</html>").unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 502 }));
}

#[test]
fn garbage_on_200_is_malformed() {
    let err = decode::<CurveDataset>(200, "not json").unwrap_err();
    assert!(matches!(err, ClientError::Malformed { .. }));
}
