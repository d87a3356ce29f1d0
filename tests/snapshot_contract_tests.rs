use energy_charts::api::{CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshotJsonContractV1};
use energy_charts::core::{ChartType, DataPoint, Dataset, Series, ViewWindow};
use energy_charts::render::NullRenderer;
use energy_charts::scene::SceneLayerKind;
use energy_charts::{Chart, ChartCommand, ChartConfig, ChartError, ChartSnapshot};

fn series(name: &str, samples: &[(i32, f64)]) -> Series<DataPoint> {
    Series::new(
        name,
        samples
            .iter()
            .map(|&(year, value)| DataPoint::from_year(year, value))
            .collect(),
    )
}

fn dataset() -> Dataset {
    Dataset::lines(vec![
        series("Coal", &[(2015, 40.0), (2020, 32.0), (2030, 12.0), (2040, 2.0)]),
        series("Gas", &[(2015, 20.0), (2020, 24.0), (2030, 18.0), (2040, 9.0)]),
        series("Solar", &[(2015, 1.0), (2020, 4.0), (2030, 21.0), (2040, 38.0)]),
    ])
    .expect("dataset")
}

fn chart(chart_type: ChartType) -> Chart<NullRenderer> {
    let config = ChartConfig::new(chart_type, 640.0, 360.0)
        .with_default_window(2015, 2040)
        .with_default_year(2030)
        .with_y_axis_title("TWh");
    Chart::new(config, dataset(), NullRenderer::default()).expect("chart init")
}

#[test]
fn repeated_update_plot_is_idempotent() {
    for chart_type in [ChartType::Line, ChartType::Area, ChartType::Treemap] {
        let mut chart = chart(chart_type);
        let before = chart.snapshot();
        chart.update_plot().expect("update plot");
        chart.update_plot().expect("update plot");
        assert_eq!(chart.snapshot(), before, "{chart_type} snapshot drifted");
    }
}

#[test]
fn snapshot_ignores_the_animation_clock() {
    let mut chart = chart(ChartType::Line);
    chart.set_window(2020, 2040).expect("set window");
    assert!(chart.is_animating());
    let mid_flight = chart.snapshot();

    chart.tick(250.0).expect("tick");
    assert!(chart.is_animating());
    assert_ne!(chart.current_frame(), chart.settled_frame());

    chart.tick(250.0).expect("tick");
    assert!(!chart.is_animating());
    assert_eq!(chart.current_frame(), chart.settled_frame());
    assert_eq!(chart.snapshot(), mid_flight);
}

#[test]
fn new_elements_fade_in() {
    let mut chart = chart(ChartType::Line);
    let replacement =
        Dataset::lines(vec![series("Wind", &[(2015, 3.0), (2040, 30.0)])]).expect("dataset");
    chart.update_data(replacement).expect("update data");
    chart.update_plot().expect("update plot");

    let start = chart.current_frame();
    assert!(start.paths.is_empty(), "entering curves start transparent");
    chart.tick(500.0).expect("tick");
    let end = chart.current_frame();
    assert_eq!(end.paths.len(), 1);
    assert_eq!(end.paths[0].opacity, 1.0);
}

#[test]
fn snapshot_counts_layers() {
    let line = chart(ChartType::Line).snapshot();
    assert_eq!(line.layer_count(SceneLayerKind::Curves), 3);
    assert_eq!(line.layer_count(SceneLayerKind::Cells), 0);
    assert_eq!(line.window, ViewWindow::range(2015, 2040).expect("window"));

    let treemap = chart(ChartType::Treemap).snapshot();
    assert_eq!(treemap.layer_count(SceneLayerKind::Cells), 3);
    assert_eq!(treemap.layer_count(SceneLayerKind::XAxis), 0);
    assert_eq!(treemap.window, ViewWindow::year(2030));
    assert_eq!(treemap.slider_bounds, (2015, 2040));
}

#[test]
fn snapshot_json_contract_round_trips() {
    let mut chart = chart(ChartType::Area);
    chart.set_window(2020, 2030).expect("set window");
    let snapshot = chart.snapshot();

    let contract_json = chart
        .snapshot_json_contract_v1_pretty()
        .expect("contract json");
    let payload: ChartSnapshotJsonContractV1 =
        serde_json::from_str(&contract_json).expect("contract payload");
    assert_eq!(payload.schema_version, CHART_SNAPSHOT_JSON_SCHEMA_V1);

    for json in [contract_json, snapshot.to_json_pretty().expect("bare json")] {
        let parsed = ChartSnapshot::from_json_compat_str(&json).expect("compat parse");
        assert_eq!(parsed.chart_type, ChartType::Area);
        assert_eq!(parsed.window, snapshot.window);
        assert_eq!(parsed.layer_counts, snapshot.layer_counts);
        assert_eq!(parsed.frame.primitive_count(), snapshot.frame.primitive_count());
        assert_eq!(parsed.frame.viewport, snapshot.frame.viewport);
    }
}

#[test]
fn unknown_schema_version_is_rejected() {
    let snapshot = chart(ChartType::Line).snapshot();
    let payload = serde_json::json!({
        "schema_version": 99,
        "snapshot": snapshot,
    });
    let result = ChartSnapshot::from_json_compat_str(&payload.to_string());
    assert!(result.is_err());
    assert!(ChartSnapshot::from_json_compat_str("{}").is_err());
}

#[test]
fn commands_route_to_chart_operations() {
    let mut chart = chart(ChartType::Line);
    chart
        .dispatch(ChartCommand::SetWindow {
            min_year: 2020,
            max_year: 2030,
        })
        .expect("set window");
    assert_eq!(chart.window().bounds(), (2020, 2030));

    let x = chart.config().margin.left + chart.scales().expect("scales").time.year_to_pixel(2025);
    chart
        .dispatch(ChartCommand::PointerMove { x, y: 50.0 })
        .expect("pointer move");
    assert_eq!(chart.interaction().active_year(), Some(2025));

    chart
        .dispatch(ChartCommand::HideCursor)
        .expect("hide cursor");
    assert!(!chart.interaction().is_hovering());

    chart
        .dispatch(ChartCommand::UpdateData {
            dataset: Dataset::empty(),
        })
        .expect("update data");
    assert!(chart.is_no_data());
    assert!(chart.popup().visible);

    chart
        .dispatch(ChartCommand::Tick { delta_ms: 1_000.0 })
        .expect("tick");
    assert_eq!(chart.now_ms(), 1_000.0);
    assert!(chart.dispatch(ChartCommand::SetYear { year: 2020 }).is_err());
}

#[test]
fn commands_deserialize_from_tagged_json() {
    let command: ChartCommand =
        serde_json::from_str(r#"{"type":"set_window","min_year":2020,"max_year":2035}"#)
            .expect("command json");
    assert_eq!(
        command,
        ChartCommand::SetWindow {
            min_year: 2020,
            max_year: 2035
        }
    );
    assert_eq!(command.name(), "set_window");

    let leave: ChartCommand =
        serde_json::from_str(r#"{"type":"pointer_leave"}"#).expect("unit command json");
    assert_eq!(leave, ChartCommand::PointerLeave);
}

#[test]
fn update_data_command_rejects_duplicate_series_names() {
    let mut chart = chart(ChartType::Line);
    let duplicate = Dataset::Lines(vec![
        Series {
            name: "A".to_owned(),
            values: vec![DataPoint::from_year(2020, 2.0), DataPoint::from_year(2010, 1.0)],
        },
        Series {
            name: "A".to_owned(),
            values: vec![DataPoint::from_year(2010, 3.0)],
        },
    ]);

    let result = chart.dispatch(ChartCommand::UpdateData { dataset: duplicate });
    assert!(matches!(result, Err(ChartError::InvalidData(_))));
    assert_eq!(chart.dataset().len(), 3);
    assert_eq!(chart.scene().layer_len(SceneLayerKind::Curves), 3);

    let json = r#"{"type":"update_data","dataset":{"kind":"lines","lines":[
        {"name":"A","values":[{"x":1577836800.0,"y":2.0},{"x":1262304000.0,"y":1.0}]},
        {"name":"A","values":[{"x":1262304000.0,"y":3.0}]}
    ]}}"#;
    let err = serde_json::from_str::<ChartCommand>(json).expect_err("duplicate names");
    assert!(err.to_string().contains("duplicate series name"));
}

#[test]
fn update_data_command_sorts_loader_samples() {
    let mut chart = chart(ChartType::Line);
    let json = r#"{"type":"update_data","dataset":{"kind":"lines","lines":[
        {"name":"A","values":[{"x":1577836800.0,"y":2.0},{"x":1262304000.0,"y":1.0}]}
    ]}}"#;
    let command: ChartCommand = serde_json::from_str(json).expect("command json");
    chart.dispatch(command).expect("update data");

    let Dataset::Lines(series) = chart.dataset() else {
        panic!("expected raw lines");
    };
    let xs: Vec<f64> = series[0].values.iter().map(|point| point.x).collect();
    assert_eq!(xs, vec![1_262_304_000.0, 1_577_836_800.0]);
}
