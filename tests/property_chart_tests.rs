use energy_charts::core::{ChartType, DataPoint, Dataset, Series};
use energy_charts::render::NullRenderer;
use energy_charts::{Chart, ChartConfig};
use proptest::prelude::*;

fn dataset(rows: &[Vec<f64>], first_year: i32) -> Dataset {
    let series = rows
        .iter()
        .enumerate()
        .map(|(index, values)| {
            Series::new(
                format!("series-{index}"),
                values
                    .iter()
                    .enumerate()
                    .map(|(offset, &value)| {
                        DataPoint::from_year(first_year + offset as i32, value)
                    })
                    .collect(),
            )
        })
        .collect();
    Dataset::lines(series).expect("dataset")
}

fn chart_type(index: u8) -> ChartType {
    match index % 3 {
        0 => ChartType::Line,
        1 => ChartType::Area,
        _ => ChartType::Treemap,
    }
}

proptest! {
    #[test]
    fn update_plot_twice_matches_once(
        rows in prop::collection::vec(prop::collection::vec(0.0f64..5_000.0, 2..30), 0..7),
        kind in 0u8..3,
        lo_offset in 0i32..10,
        span in 0i32..25
    ) {
        let chart_type = chart_type(kind);
        let config = ChartConfig::new(chart_type, 720.0, 360.0)
            .with_default_window(2010, 2040)
            .with_default_year(2010 + lo_offset);
        let mut chart = Chart::new(config, dataset(&rows, 2010), NullRenderer::default())
            .expect("chart init");
        if chart_type == ChartType::Treemap {
            chart.set_year(2010 + lo_offset).expect("set year");
        } else {
            chart.set_window(2010 + lo_offset, 2010 + lo_offset + span).expect("set window");
        }

        let once = chart.snapshot();
        chart.update_plot().expect("update plot");
        prop_assert_eq!(chart.snapshot(), once);
        prop_assert_eq!(chart.is_no_data(), rows.is_empty());
    }

    #[test]
    fn hover_legend_is_sorted_and_matches_samples(
        rows in prop::collection::vec(prop::collection::vec(-500.0f64..500.0, 21), 1..7),
        hover_offset in 1i32..20,
        area in any::<bool>()
    ) {
        let chart_type = if area { ChartType::Area } else { ChartType::Line };
        let config = ChartConfig::new(chart_type, 720.0, 360.0).with_default_window(2010, 2030);
        let mut chart = Chart::new(config, dataset(&rows, 2010), NullRenderer::default())
            .expect("chart init");
        let year = 2010 + hover_offset;
        let scales = chart.scales().expect("scales");
        let x = chart.config().margin.left + scales.time.year_to_pixel(year);
        chart.pointer_move(x, 100.0).expect("pointer move");

        let legend = &chart.interaction().legend;
        prop_assert_eq!(chart.interaction().active_year(), Some(year));
        prop_assert_eq!(legend.len(), rows.len());
        prop_assert!(legend.windows(2).all(|pair| pair[0].anchor >= pair[1].anchor));
        for entry in legend {
            let index: usize = entry
                .name
                .trim_start_matches("series-")
                .parse()
                .expect("series index");
            let sample = rows[index][hover_offset as usize];
            prop_assert!((entry.value - sample).abs() <= 1e-9);
        }
    }

    #[test]
    fn slider_window_never_leaves_its_bounds(
        first_year in 2000i32..2030,
        len in 2usize..30,
        lo in 1950i32..2100,
        span in 0i32..80
    ) {
        let rows = vec![vec![1.0; len]];
        let config = ChartConfig::new(ChartType::Line, 720.0, 360.0);
        let mut chart = Chart::new(config, dataset(&rows, first_year), NullRenderer::default())
            .expect("chart init");
        chart.set_window(lo, lo + span).expect("set window");

        let (min_bound, max_bound) = chart.slider().bounds();
        let (min_year, max_year) = chart.window().bounds();
        prop_assert_eq!((min_bound, max_bound), (first_year, first_year + len as i32 - 1));
        prop_assert!(min_bound <= min_year);
        prop_assert!(min_year <= max_year);
        prop_assert!(max_year <= max_bound);
    }
}
