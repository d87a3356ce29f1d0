use energy_charts::api::{Orientation, PageOffset};
use energy_charts::core::{ChartType, DataPoint, Dataset, Series};
use energy_charts::interaction::{InteractionMode, PointerSource};
use energy_charts::render::NullRenderer;
use energy_charts::scene::{SceneLayerKind, Shape};
use energy_charts::{Chart, ChartConfig};

fn series(name: &str, samples: &[(i32, f64)]) -> Series<DataPoint> {
    Series::new(
        name,
        samples
            .iter()
            .map(|&(year, value)| DataPoint::from_year(year, value))
            .collect(),
    )
}

fn emissions() -> Dataset {
    Dataset::lines(vec![
        series("A", &[(2010, 5.0), (2020, 10.0), (2030, 12.0)]),
        series("B", &[(2010, 3.0), (2020, 7.0), (2030, 9.0)]),
    ])
    .expect("dataset")
}

fn chart(chart_type: ChartType) -> Chart<NullRenderer> {
    let config = ChartConfig::new(chart_type, 800.0, 400.0).with_default_window(2010, 2030);
    Chart::new(config, emissions(), NullRenderer::default()).expect("chart init")
}

/// Canvas x of `year` on the time axis.
fn canvas_x(chart: &Chart<NullRenderer>, year: i32) -> f64 {
    let scales = chart.scales().expect("scales");
    chart.config().margin.left + scales.time.year_to_pixel(year)
}

fn legend_rows(chart: &Chart<NullRenderer>) -> Vec<(String, f64)> {
    chart
        .interaction()
        .legend
        .iter()
        .map(|entry| (entry.name.clone(), entry.value))
        .collect()
}

#[test]
fn line_hover_builds_sorted_legend_and_cursor() {
    let mut chart = chart(ChartType::Line);
    let x = canvas_x(&chart, 2020);
    chart.pointer_move(x, 100.0).expect("pointer move");

    assert_eq!(chart.interaction().mode, InteractionMode::Hover);
    assert_eq!(chart.interaction().active_year(), Some(2020));
    assert_eq!(chart.interaction().source, Some(PointerSource::Mouse));
    assert_eq!(
        legend_rows(&chart),
        vec![("A".to_owned(), 10.0), ("B".to_owned(), 7.0)]
    );
    assert_eq!(chart.scene().layer_len(SceneLayerKind::Cursor), 1);
    assert_eq!(chart.scene().layer_len(SceneLayerKind::CursorDots), 2);

    let tooltip = chart.tooltip();
    assert!(tooltip.visible);
    assert_eq!(tooltip.orientation, Some(Orientation::Right));
    assert!((tooltip.anchor.0 - x).abs() <= 1e-9);
    assert_eq!(tooltip.anchor.1, 20.0);
    assert!(tooltip.html.contains(r#"<div class="legend-header">2020</div>"#));
    let a = tooltip.html.find(">A<").expect("A row");
    let b = tooltip.html.find(">B<").expect("B row");
    assert!(a < b);
}

#[test]
fn pointer_snaps_to_nearest_year() {
    let mut chart = chart(ChartType::Line);
    let year_width = canvas_x(&chart, 2021) - canvas_x(&chart, 2020);
    chart
        .pointer_move(canvas_x(&chart, 2020) + 0.4 * year_width, 10.0)
        .expect("pointer move");
    assert_eq!(chart.interaction().active_year(), Some(2020));

    chart
        .pointer_move(canvas_x(&chart, 2020) + 0.6 * year_width, 10.0)
        .expect("pointer move");
    assert_eq!(chart.interaction().active_year(), Some(2021));
}

#[test]
fn year_without_samples_shows_empty_legend() {
    let mut chart = chart(ChartType::Line);
    chart
        .pointer_move(canvas_x(&chart, 2015), 10.0)
        .expect("pointer move");

    assert_eq!(chart.interaction().active_year(), Some(2015));
    assert!(chart.interaction().legend.is_empty());
    assert_eq!(chart.scene().layer_len(SceneLayerKind::Cursor), 1);
    assert_eq!(chart.scene().layer_len(SceneLayerKind::CursorDots), 0);
}

#[test]
fn cursor_dots_sit_on_series_values() {
    let mut chart = chart(ChartType::Line);
    chart
        .pointer_move(canvas_x(&chart, 2020), 10.0)
        .expect("pointer move");
    let scales = chart.scales().expect("scales");
    let dots = chart
        .scene()
        .layer(SceneLayerKind::CursorDots)
        .expect("dots layer");
    let Shape::Circle(first) = dots.get("0").expect("first dot").target() else {
        panic!("dot must be a circle");
    };
    assert!((first.cy - scales.value.value_to_pixel(10.0)).abs() <= 1e-9);
    assert!((first.cx - scales.time.year_to_pixel(2020)).abs() <= 1e-9);
}

#[test]
fn area_hover_reports_contributions_without_dots() {
    let mut chart = chart(ChartType::Area);
    chart
        .pointer_move(canvas_x(&chart, 2020), 10.0)
        .expect("pointer move");

    // B sits on top of A, so it leads the legend with its own share.
    assert_eq!(
        legend_rows(&chart),
        vec![("B".to_owned(), 7.0), ("A".to_owned(), 10.0)]
    );
    assert_eq!(chart.scene().layer_len(SceneLayerKind::Cursor), 1);
    assert_eq!(chart.scene().layer_len(SceneLayerKind::CursorDots), 0);
    assert!(chart.tooltip().html.contains(r#"<span class="legend-value">7.0</span>"#));
}

#[test]
fn same_year_does_not_redraw() {
    let mut chart = chart(ChartType::Line);
    let x = canvas_x(&chart, 2020);
    chart.pointer_move(x, 10.0).expect("first move");
    let frames = chart.renderer().frames_rendered;
    let updates = chart.tooltip().updates;

    chart.pointer_move(x + 0.5, 200.0).expect("second move");
    assert_eq!(chart.renderer().frames_rendered, frames);
    assert_eq!(chart.tooltip().updates, updates);
    assert_eq!(chart.interaction().pointer, Some((x + 0.5, 200.0)));
}

#[test]
fn pointer_outside_time_axis_clears_cursor() {
    let mut chart = chart(ChartType::Line);
    chart
        .pointer_move(canvas_x(&chart, 2020), 10.0)
        .expect("pointer move");
    assert!(chart.interaction().is_hovering());

    // The axis ends are excluded.
    let left_edge = chart.config().margin.left + chart.config().time_range().0;
    chart.pointer_move(left_edge, 10.0).expect("edge move");

    assert!(!chart.interaction().is_hovering());
    assert!(!chart.tooltip().visible);
    assert_eq!(chart.scene().layer_len(SceneLayerKind::Cursor), 0);
    assert_eq!(chart.scene().layer_len(SceneLayerKind::CursorDots), 0);
}

#[test]
fn pointer_leave_and_hide_cursor_reset_state() {
    let mut chart = chart(ChartType::Line);
    let x = canvas_x(&chart, 2030) - 1.0;
    chart.pointer_move(x, 10.0).expect("pointer move");
    chart.pointer_leave().expect("pointer leave");
    assert_eq!(chart.interaction().mode, InteractionMode::Idle);
    assert!(chart.interaction().legend.is_empty());
    assert!(!chart.tooltip().visible);

    chart.pointer_move(x, 10.0).expect("pointer move");
    assert!(chart.interaction().is_hovering());
    chart.hide_cursor().expect("hide cursor");
    assert_eq!(chart.interaction().active_year(), None);
    assert_eq!(chart.scene().layer_len(SceneLayerKind::Cursor), 0);
}

#[test]
fn touch_drives_the_same_cursor() {
    let mut chart = chart(ChartType::Line);
    chart
        .touch_move(canvas_x(&chart, 2020), 10.0)
        .expect("touch move");
    assert_eq!(chart.interaction().source, Some(PointerSource::Touch));
    assert_eq!(chart.interaction().active_year(), Some(2020));

    chart.touch_end().expect("touch end");
    assert!(!chart.interaction().is_hovering());
    assert_eq!(chart.interaction().source, Some(PointerSource::Touch));
}

#[test]
fn non_finite_pointer_is_ignored() {
    let mut chart = chart(ChartType::Line);
    chart.pointer_move(f64::NAN, 10.0).expect("nan move");
    assert!(!chart.interaction().is_hovering());
    assert_eq!(chart.interaction().pointer, None);
}

#[test]
fn pointer_is_ignored_while_no_data_is_shown() {
    let config = ChartConfig::new(ChartType::Line, 800.0, 400.0);
    let mut chart =
        Chart::new(config, Dataset::empty(), NullRenderer::default()).expect("chart init");
    chart.pointer_move(400.0, 100.0).expect("pointer move");
    assert!(!chart.interaction().is_hovering());
    assert!(!chart.tooltip().visible);
}

#[test]
fn data_update_drops_stale_cursor() {
    let mut chart = chart(ChartType::Line);
    chart
        .pointer_move(canvas_x(&chart, 2020), 10.0)
        .expect("pointer move");

    chart.hide_cursor().expect("hide cursor");
    let replacement =
        Dataset::lines(vec![series("C", &[(2010, 1.0), (2030, 2.0)])]).expect("dataset");
    chart.update_data(replacement).expect("update data");
    chart.update_plot().expect("update plot");

    assert!(chart.interaction().legend.is_empty());
    chart
        .pointer_move(canvas_x(&chart, 2030) - 1.0, 10.0)
        .expect("pointer move");
    let names: Vec<&str> = chart
        .interaction()
        .legend
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(names, vec!["C"]);
}

fn treemap() -> Chart<NullRenderer> {
    let dataset = Dataset::lines(vec![
        series("Solar", &[(2020, 10.0)]),
        series("Wind", &[(2020, 30.0)]),
        series("Hydro", &[(2020, 20.0)]),
    ])
    .expect("dataset");
    let config = ChartConfig::new(ChartType::Treemap, 400.0, 300.0)
        .with_default_year(2020)
        .with_page_offset(PageOffset {
            left: 8.0,
            top: 100.0,
            scroll_top: 40.0,
        });
    Chart::new(config, dataset, NullRenderer::default()).expect("treemap init")
}

#[test]
fn treemap_hover_shows_cell_tooltip_above_pointer() {
    let mut chart = treemap();
    let names: Vec<&str> = chart.cells().iter().map(|cell| cell.name.as_str()).collect();
    assert_eq!(names, vec!["Wind", "Hydro", "Solar"]);

    let wind = chart.cells()[0].clone();
    let (x, y) = ((wind.x0 + wind.x1) / 2.0, (wind.y0 + wind.y1) / 2.0);
    chart.pointer_move(x, y).expect("pointer move");

    let tooltip = chart.tooltip();
    assert!(tooltip.visible);
    assert_eq!(tooltip.orientation, Some(Orientation::Top));
    assert_eq!(tooltip.anchor, (8.0 + x, 140.0 + y));
    assert!(tooltip.html.contains(r#"<div class="legend-header">Wind</div>"#));
    assert!(tooltip.html.contains(r#"<div class="legend-body">30</div>"#));
    assert_eq!(chart.interaction().hovered_cell.as_deref(), Some("Wind"));
    assert_eq!(chart.scene().layer_len(SceneLayerKind::Cursor), 0);
}

#[test]
fn treemap_gap_keeps_last_tooltip() {
    let mut chart = treemap();
    chart.pointer_move(0.2, 0.2).expect("gap move");
    assert!(!chart.tooltip().visible);

    let hydro = chart.cells()[1].clone();
    chart
        .pointer_move(hydro.x0 + 1.0, hydro.y0 + 1.0)
        .expect("pointer move");
    chart.pointer_move(0.2, 0.2).expect("gap move");
    assert!(chart.tooltip().visible);
    assert_eq!(chart.interaction().hovered_cell.as_deref(), Some("Hydro"));

    chart.pointer_leave().expect("pointer leave");
    assert!(!chart.tooltip().visible);
    assert_eq!(chart.interaction().hovered_cell, None);
}
