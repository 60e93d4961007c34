//! End-to-end attribution runs over a small campaign snapshot.

use approx::assert_relative_eq;
use chrono::{DateTime, TimeZone, Utc};
use polars::prelude::*;
use rstest::{fixture, rstest};
use waypoint::journey::{ChannelCatalog, ChannelKind};
use waypoint::models::list_model_names;
use waypoint::{
    AttributionEngine, AttributionError, AttributionRequest, JourneyStore, ModelParams, Touchpoint,
};

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 1, d, 0, 0, 0).unwrap()
}

/// Three converting customers plus one who only saw a YouTube ad.
#[fixture]
fn engine() -> AttributionEngine {
    AttributionEngine::new(JourneyStore::from_touchpoints(vec![
        Touchpoint::exposure("C1", "Facebook Ad", day(1), 10.0),
        Touchpoint::exposure("C1", "Email Newsletter", day(2), 0.0),
        Touchpoint::exposure("C1", "Website Visit", day(3), 0.0),
        Touchpoint::exposure("C1", "Product Review", day(4), 0.0),
        Touchpoint::conversion("C1", day(5), 75.0),
        Touchpoint::exposure("C2", "Google Search", day(1), 5.0),
        Touchpoint::exposure("C2", "Website Visit", day(2), 0.0),
        Touchpoint::exposure("C2", "Discount Code Email", day(3), 0.0),
        Touchpoint::conversion("C2", day(4), 100.0),
        Touchpoint::exposure("C3", "Instagram Ad", day(1), 15.0),
        Touchpoint::conversion("C3", day(2), 125.0),
        Touchpoint::exposure("C4", "YouTube Ad", day(1), 20.0),
    ]))
}

fn attribution(engine: &AttributionEngine, model: &str, channel: &str) -> f64 {
    engine
        .calculate_channel_metrics(model, &ModelParams::default())
        .unwrap()
        .get(channel)
        .unwrap()
        .attribution_percentage
}

#[rstest]
#[case("first")]
#[case("last")]
#[case("second_to_last")]
#[case("third_to_last")]
#[case("u_shaped")]
#[case("w_shaped")]
#[case("linear")]
#[case("time_decay")]
fn test_attribution_sums_to_one(engine: AttributionEngine, #[case] model: &str) {
    let table = engine
        .calculate_channel_metrics(model, &ModelParams::default())
        .unwrap();

    assert_relative_eq!(table.total_attribution(), 1.0, epsilon = 0.02);
    assert_relative_eq!(table.total_revenue(), 300.0, epsilon = 1e-9);
    assert_eq!(table.len(), 8);
    for row in table.rows() {
        assert!((0.0..=1.0).contains(&row.success_rate));
        assert!(row.attribution_percentage >= 0.0);
    }
}

#[rstest]
fn test_linear_shares(engine: AttributionEngine) {
    assert_relative_eq!(attribution(&engine, "linear", "Facebook Ad"), 0.0833, epsilon = 1e-3);
    assert_relative_eq!(attribution(&engine, "linear", "Website Visit"), 0.1944, epsilon = 1e-3);
    assert_relative_eq!(attribution(&engine, "linear", "Instagram Ad"), 0.3333, epsilon = 1e-3);
    assert_relative_eq!(attribution(&engine, "linear", "Google Search"), 0.1111, epsilon = 1e-3);
    assert_relative_eq!(
        attribution(&engine, "linear", "Email Newsletter"),
        0.0833,
        epsilon = 1e-3
    );
    assert_relative_eq!(attribution(&engine, "linear", "Product Review"), 0.0833, epsilon = 1e-3);
    assert_relative_eq!(
        attribution(&engine, "linear", "Discount Code Email"),
        0.1111,
        epsilon = 1e-3
    );
}

#[rstest]
fn test_u_shaped_shares(engine: AttributionEngine) {
    assert_relative_eq!(attribution(&engine, "u_shaped", "Facebook Ad"), 0.1667, epsilon = 1e-3);
    assert_relative_eq!(attribution(&engine, "u_shaped", "Website Visit"), 0.125, epsilon = 1e-3);
    assert_relative_eq!(
        attribution(&engine, "u_shaped", "Email Newsletter"),
        0.0417,
        epsilon = 1e-3
    );
}

#[rstest]
fn test_w_shaped_shares(engine: AttributionEngine) {
    assert_relative_eq!(attribution(&engine, "w_shaped", "Facebook Ad"), 0.1304, epsilon = 1e-3);
    assert_relative_eq!(attribution(&engine, "w_shaped", "Website Visit"), 0.2609, epsilon = 1e-3);
    assert_relative_eq!(
        attribution(&engine, "w_shaped", "Email Newsletter"),
        0.0870,
        epsilon = 1e-3
    );
    assert!(
        attribution(&engine, "w_shaped", "Facebook Ad")
            > attribution(&engine, "w_shaped", "Email Newsletter")
    );
}

#[rstest]
fn test_time_decay_favours_recent_exposures(engine: AttributionEngine) {
    let recent = attribution(&engine, "time_decay", "Product Review");
    let early = attribution(&engine, "time_decay", "Facebook Ad");
    assert!(recent > early);

    let faster = engine
        .calculate_channel_metrics("time_decay", &ModelParams::new().half_life(1.0))
        .unwrap();
    assert!(faster.get("Product Review").unwrap().attribution_percentage > recent);
}

#[rstest]
fn test_non_converting_channel_is_reported(engine: AttributionEngine) {
    let table = engine
        .calculate_channel_metrics("linear", &ModelParams::default())
        .unwrap();
    let youtube = table.get("YouTube Ad").unwrap();

    assert_eq!(youtube.attribution_percentage, 0.0);
    assert_eq!(youtube.total_appearances, 1);
    assert_eq!(youtube.success_rate, 0.0);
    assert_eq!(youtube.total_cost, 20.0);
    assert_relative_eq!(youtube.roi, -1.0);
    assert_eq!(table.rows().last().unwrap().channel, "YouTube Ad");
}

#[rstest]
fn test_repeat_runs_are_identical(engine: AttributionEngine) {
    for model in list_model_names() {
        let first = engine
            .calculate_channel_metrics(model, &ModelParams::default())
            .unwrap();
        let second = engine
            .calculate_channel_metrics(model, &ModelParams::default())
            .unwrap();
        assert_eq!(first, second);
    }
}

#[rstest]
fn test_invalid_requests_abort(engine: AttributionEngine) {
    assert!(matches!(
        engine.calculate_channel_metrics("markov_chain", &ModelParams::default()),
        Err(AttributionError::InvalidModel(_))
    ));
    assert!(matches!(
        engine.calculate_channel_metrics("time_decay", &ModelParams::new().half_life(0.0)),
        Err(AttributionError::InvalidModel(_))
    ));
    assert!(matches!(
        engine.calculate_channel_metrics("u_shaped", &ModelParams::new().first_weight(-0.1)),
        Err(AttributionError::InvalidModel(_))
    ));
}

#[rstest]
fn test_irrelevant_params_are_ignored(engine: AttributionEngine) {
    let plain = engine
        .calculate_channel_metrics("linear", &ModelParams::default())
        .unwrap();
    let noisy = engine
        .calculate_channel_metrics("linear", &ModelParams::new().half_life(2.0).first_weight(0.9))
        .unwrap();
    assert_eq!(plain, noisy);
}

#[rstest]
fn test_json_request(engine: AttributionEngine) {
    let request = AttributionRequest::from_json(
        r#"{"model": "u_shaped", "first_weight": 0.5, "last_weight": 0.5, "middle_weight": 0.0}"#,
    )
    .unwrap();
    let table = request.execute(&engine).unwrap();

    assert_eq!(table.model, "u_shaped");
    assert_relative_eq!(table.get("Website Visit").unwrap().attribution_percentage, 0.0);
}

#[rstest]
fn test_paid_segment(engine: AttributionEngine) {
    let table = engine
        .calculate_channel_metrics("first", &ModelParams::default())
        .unwrap();
    let catalog = ChannelCatalog::default();

    let paid = table.by_kind(&catalog, ChannelKind::Paid);
    assert_eq!(paid.len(), 4);
    let paid_share: f64 = paid.iter().map(|r| r.attribution_percentage).sum();
    assert_relative_eq!(paid_share, 1.0, epsilon = 1e-12);
}

#[rstest]
fn test_compare_models(engine: AttributionEngine) {
    let cmp = engine
        .compare(&["first", "last", "linear"], &ModelParams::default())
        .unwrap();

    assert_eq!(cmp.models(), ["first", "last", "linear"]);
    assert_eq!(cmp.rows().len(), 8);
    assert_relative_eq!(
        cmp.attribution("Product Review", "last").unwrap(),
        1.0 / 3.0,
        epsilon = 1e-12
    );
    assert_eq!(cmp.attribution("Product Review", "first"), Some(0.0));

    let df = cmp.to_dataframe().unwrap();
    assert_eq!(df.width(), 2 + 2 * 3);
}

#[test]
fn test_engine_from_dataframe() {
    const DAY_MS: i64 = 86_400_000;
    const JAN_1: i64 = 1_672_531_200_000;

    let timestamps = Column::new(
        "timestamp".into(),
        vec![JAN_1, JAN_1 + DAY_MS, JAN_1 + 2 * DAY_MS],
    )
    .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
    .unwrap();
    let df = DataFrame::new(vec![
        Column::new("customer_id".into(), vec!["A", "A", "A"]),
        Column::new("channel".into(), vec![Some("Search"), Some("Email"), None]),
        timestamps,
        Column::new("cost".into(), vec![3.0, 0.0, 0.0]),
        Column::new("is_conversion".into(), vec![false, false, true]),
        Column::new("purchase_value".into(), vec![0.0, 0.0, 90.0]),
    ])
    .unwrap();

    let engine = AttributionEngine::from_dataframe(&df).unwrap();
    let table = engine
        .calculate_channel_metrics("linear", &ModelParams::default())
        .unwrap();

    assert_relative_eq!(table.get("Search").unwrap().attributed_revenue, 45.0);
    assert_relative_eq!(table.get("Search").unwrap().roi, 14.0);

    let out = table.to_dataframe().unwrap();
    assert_eq!(out.height(), 2);
}
