use energy_charts::core::{ChartType, DataPoint, Dataset, Series, Viewport};
use energy_charts::render::{
    Color, LinePrimitive, LineStrokeStyle, RenderFrame, Renderer, SvgRenderer,
};
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

fn dataset() -> Dataset {
    Dataset::lines(vec![
        series("Oil & Gas", &[(2010, 40.0), (2020, 35.0), (2030, 20.0)]),
        series("Wind", &[(2010, 2.0), (2020, 8.0), (2030, 25.0)]),
    ])
    .expect("dataset")
}

#[test]
fn settled_line_chart_renders_curves_axes_and_projection() {
    let config = ChartConfig::new(ChartType::Line, 600.0, 300.0)
        .with_default_window(2010, 2030)
        .with_y_axis_title("Mt <CO2>");
    let mut chart = Chart::new(config, dataset(), SvgRenderer::new()).expect("chart init");
    chart.tick(500.0).expect("tick");

    let svg = chart.renderer().document();
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="660" height="340""#));
    assert_eq!(svg.matches("<path ").count(), 2);
    assert!(svg.contains(r##"fill="none" stroke="#00e3e6""##));
    assert!(svg.contains(r##"fill="#165163" opacity="0.2""##));
    assert!(svg.contains(r#"stroke-dasharray="4,4""#));
    assert!(svg.contains(">Projection</text>"));
    assert!(svg.contains(">2020</text>"));
    assert!(svg.contains(">Mt &lt;CO2&gt;</text>"));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn entering_elements_are_invisible_on_the_first_frame() {
    let config = ChartConfig::new(ChartType::Line, 600.0, 300.0).with_default_window(2010, 2030);
    let chart = Chart::new(config, dataset(), SvgRenderer::new()).expect("chart init");
    let svg = chart.renderer().document();
    assert_eq!(chart.renderer().frames_rendered(), 1);
    assert!(!svg.contains("<path "));
    assert!(!svg.contains("<text "));
}

#[test]
fn no_data_frame_is_transparent() {
    let config = ChartConfig::new(ChartType::Area, 600.0, 300.0);
    let chart = Chart::new(config, Dataset::empty(), SvgRenderer::new()).expect("chart init");
    assert!(chart.renderer().document().contains(r#" opacity="0">"#));
}

#[test]
fn area_chart_fills_bands_without_stroke() {
    let config = ChartConfig::new(ChartType::Area, 600.0, 300.0).with_default_window(2010, 2030);
    let mut chart = Chart::new(config, dataset(), SvgRenderer::new()).expect("chart init");
    chart.tick(1_000.0).expect("tick");

    let svg = chart.renderer().document();
    assert!(svg.contains(r##"fill="#6797fd" stroke="none" opacity="0.8""##));
    assert_eq!(svg.matches(r#"stroke="none""#).count(), 2);
}

#[test]
fn treemap_labels_are_clipped_to_cells() {
    let config = ChartConfig::new(ChartType::Treemap, 600.0, 400.0).with_default_year(2030);
    let mut chart = Chart::new(config, dataset(), SvgRenderer::new()).expect("treemap init");
    chart.render().expect("render");

    let svg = chart.renderer().document();
    assert_eq!(svg.matches("<rect ").count(), 2 + 4);
    assert!(svg.contains(r#"<clipPath id="clip-0">"#));
    assert!(svg.contains(">Wind</text>"));
    assert!(svg.contains(">Oil &amp; Gas</text>"));
    assert!(svg.contains(">25</text>"));
}

#[test]
fn invalid_frames_are_rejected() {
    let mut renderer = SvgRenderer::new();
    let frame = RenderFrame::new(Viewport::new(100, 100)).with_line(
        LinePrimitive::new(0.0, 0.0, 10.0, 10.0, 1.0, Color::WHITE)
            .with_style(LineStrokeStyle::Dashed { on: 0.0, off: 2.0 }),
    );
    assert!(renderer.render(&frame).is_err());
    assert_eq!(renderer.frames_rendered(), 0);
}
