use anyhow::{anyhow, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;
use shared::{ChartModel, ChartPoint, ChartSeries, SeriesKind};
use crate::services::Logger;

const CANVAS_WIDTH: u32 = 800;
const FALLBACK_COLOR: RGBColor = RGBColor(0, 143, 251);

#[derive(Properties, PartialEq)]
pub struct ChartCanvasProps {
    pub model: ChartModel,
}

/// Draws a chart model with plotters and overlays the no-data text when empty
#[function_component(ChartCanvas)]
pub fn chart_canvas(props: &ChartCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(props.model.clone(), move |model| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                if let Err(e) = draw_chart(canvas, model) {
                    Logger::error_with_component("chart", &format!("{}: {}", model.config.id, e));
                }
            }
            || ()
        });
    }

    let model = &props.model;
    html! {
        <div class="chart-content" style="position: relative;">
            <canvas
                ref={canvas_ref}
                id={model.config.id.clone()}
                class="chart-canvas"
                width={CANVAS_WIDTH.to_string()}
                height={model.config.height.to_string()}
            />
            if !model.has_data() {
                <div class="chart-no-data">{ model.no_data_text.clone() }</div>
            }
        </div>
    }
}

fn draw_err<E: std::fmt::Display>(e: E) -> anyhow::Error {
    anyhow!("chart drawing failed: {}", e)
}

fn draw_chart(canvas: HtmlCanvasElement, model: &ChartModel) -> Result<()> {
    let backend = CanvasBackend::with_canvas_object(canvas)
        .ok_or_else(|| anyhow!("canvas has no 2d context"))?;
    let root = backend.into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    if model.has_data() {
        if model.config.sparkline {
            draw_sparkline(&root, model)?;
        } else {
            draw_combo(&root, model)?;
        }
    }

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Filled area without axes or grid
fn draw_sparkline(root: &DrawingArea<CanvasBackend, Shift>, model: &ChartModel) -> Result<()> {
    let Some((index, series)) = model
        .series
        .iter()
        .enumerate()
        .find(|(_, series)| !series.is_empty())
    else {
        return Ok(());
    };

    let last = series.data.len().saturating_sub(1).max(1) as f64;
    let y_min = model
        .config
        .y_axes
        .first()
        .and_then(|axis| axis.min)
        .unwrap_or(0.0);
    let y_max = y_upper(series.max_y());
    let color = parse_hex_color(model.color_for(index));

    let mut chart = ChartBuilder::on(root)
        .margin(4)
        .build_cartesian_2d(0f64..last, y_min..y_max)
        .map_err(draw_err)?;

    for segment in gap_segments(&series.data) {
        chart
            .draw_series(
                AreaSeries::new(segment, y_min, &color.mix(0.6))
                    .border_style(color.stroke_width(2)),
            )
            .map_err(draw_err)?;
    }
    Ok(())
}

/// Usage columns on the left axis, charge line on the right axis
fn draw_combo(root: &DrawingArea<CanvasBackend, Shift>, model: &ChartModel) -> Result<()> {
    let labels = x_labels(&model.series);
    let x_range = -0.5f64..(labels.len() as f64 - 0.5);

    let column = model
        .series
        .iter()
        .position(|series| series.kind == Some(SeriesKind::Column));
    let line = model
        .series
        .iter()
        .position(|series| series.kind == Some(SeriesKind::Line));

    let left_max = y_upper(column.and_then(|i| model.series[i].max_y()));
    let right_max = y_upper(line.and_then(|i| model.series[i].max_y()));
    let axis_title = |index: usize| {
        model
            .config
            .y_axes
            .get(index)
            .and_then(|axis| axis.title.clone())
            .unwrap_or_default()
    };

    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .right_y_label_area_size(60)
        .build_cartesian_2d(x_range.clone(), 0f64..left_max)
        .map_err(draw_err)?
        .set_secondary_coord(x_range, 0f64..right_max);

    let formatter = |v: &f64| label_at(&labels, *v);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len().clamp(1, 12))
        .x_label_formatter(&formatter)
        .y_desc(axis_title(0))
        .label_style(("sans-serif", 12))
        .draw()
        .map_err(draw_err)?;

    chart
        .configure_secondary_axes()
        .y_desc(axis_title(1))
        .label_style(("sans-serif", 12))
        .draw()
        .map_err(draw_err)?;

    if let Some(index) = column {
        let series = &model.series[index];
        let color = parse_hex_color(model.color_for(index));
        chart
            .draw_series(series.data.iter().enumerate().filter_map(|(i, point)| {
                let x = i as f64;
                point
                    .y
                    .map(|y| Rectangle::new([(x - 0.3, 0.0), (x + 0.3, y)], color.filled()))
            }))
            .map_err(draw_err)?
            .label(series.name.clone())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    if let Some(index) = line {
        let series = &model.series[index];
        let color = parse_hex_color(model.color_for(index));
        for (n, segment) in gap_segments(&series.data).into_iter().enumerate() {
            let anno = chart
                .draw_secondary_series(LineSeries::new(segment, color.stroke_width(2)))
                .map_err(draw_err)?;
            // One legend entry per series, not per segment
            if n == 0 {
                anno.label(series.name.clone()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 10, y)], color.stroke_width(2))
                });
            }
        }
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(draw_err)?;
    Ok(())
}

/// Category labels shared by every series; series are drawn by position
fn x_labels(series: &[ChartSeries]) -> Vec<String> {
    series
        .iter()
        .find(|s| !s.is_empty())
        .map(|s| s.data.iter().map(|point| point.x.clone()).collect())
        .unwrap_or_default()
}

fn label_at(labels: &[String], position: f64) -> String {
    let rounded = position.round();
    if rounded < 0.0 || (position - rounded).abs() > 0.01 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

/// Top of a value axis with some headroom; an empty or all-zero series still
/// gets a drawable range
fn y_upper(max: Option<f64>) -> f64 {
    match max {
        Some(max) if max > 0.0 => max * 1.1,
        _ => 1.0,
    }
}

/// Split a series at its gaps so missing values are never drawn as zero
fn gap_segments(points: &[ChartPoint]) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for (i, point) in points.iter().enumerate() {
        match point.y {
            Some(y) => current.push((i as f64, y)),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn parse_hex_color(hex: &str) -> RGBColor {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return FALLBACK_COLOR;
    }
    match u32::from_str_radix(hex, 16) {
        Ok(v) => RGBColor((v >> 16) as u8, (v >> 8) as u8, v as u8),
        Err(_) => FALLBACK_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: &str, y: Option<f64>) -> ChartPoint {
        ChartPoint { x: x.to_string(), y }
    }

    #[test]
    fn test_gap_segments_split_on_missing_values() {
        let points = vec![
            point("2024-01", Some(1.0)),
            point("2024-02", Some(2.0)),
            point("2024-03", None),
            point("2024-04", Some(4.0)),
            point("2024-05", None),
        ];
        assert_eq!(
            gap_segments(&points),
            vec![vec![(0.0, 1.0), (1.0, 2.0)], vec![(3.0, 4.0)]]
        );
        assert!(gap_segments(&[point("2024-01", None)]).is_empty());
    }

    #[test]
    fn test_label_at_only_hits_whole_positions() {
        let labels = vec!["2024-01".to_string(), "2024-02".to_string()];
        assert_eq!(label_at(&labels, 0.0), "2024-01");
        assert_eq!(label_at(&labels, 1.0), "2024-02");
        assert_eq!(label_at(&labels, 0.5), "");
        assert_eq!(label_at(&labels, -0.5), "");
        assert_eq!(label_at(&labels, 2.0), "");
    }

    #[test]
    fn test_y_upper_headroom() {
        assert!((y_upper(Some(10.0)) - 11.0).abs() < 1e-9);
        assert_eq!(y_upper(Some(0.0)), 1.0);
        assert_eq!(y_upper(None), 1.0);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#00D8B6"), RGBColor(0x00, 0xD8, 0xB6));
        assert_eq!(parse_hex_color("DCE6EC"), RGBColor(0xDC, 0xE6, 0xEC));
        assert_eq!(parse_hex_color("#zzzzzz"), FALLBACK_COLOR);
        assert_eq!(parse_hex_color("#fff"), FALLBACK_COLOR);
    }

    #[test]
    fn test_x_labels_from_first_non_empty_series() {
        let series = vec![
            ChartSeries::new("empty", None, Vec::new()),
            ChartSeries::new(
                "usage",
                Some(SeriesKind::Column),
                vec![point("2024-01", Some(1.0)), point("2024-02", None)],
            ),
        ];
        assert_eq!(x_labels(&series), vec!["2024-01", "2024-02"]);
        assert!(x_labels(&[]).is_empty());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn canvas() -> HtmlCanvasElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let canvas: HtmlCanvasElement =
            document.create_element("canvas").unwrap().dyn_into().unwrap();
        canvas.set_width(CANVAS_WIDTH);
        canvas.set_height(340);
        canvas
    }

    #[wasm_bindgen_test]
    fn test_draws_monthly_chart_with_gaps() {
        let mut model = ChartModel::monthly_usage();
        shared::ChartSink::update_series(
            &mut model,
            vec![
                ChartSeries::new(
                    "Usage (kWh)",
                    Some(SeriesKind::Column),
                    vec![
                        ChartPoint { x: "2024-01".to_string(), y: Some(120.0) },
                        ChartPoint { x: "2024-02".to_string(), y: None },
                    ],
                ),
                ChartSeries::new(
                    "Charge (CNY)",
                    Some(SeriesKind::Line),
                    vec![
                        ChartPoint { x: "2024-01".to_string(), y: Some(60.0) },
                        ChartPoint { x: "2024-02".to_string(), y: None },
                    ],
                ),
            ],
        );
        assert!(draw_chart(canvas(), &model).is_ok());
    }

    #[wasm_bindgen_test]
    fn test_draws_empty_sparkline() {
        assert!(draw_chart(canvas(), &ChartModel::balance_sparkline()).is_ok());
    }
}
