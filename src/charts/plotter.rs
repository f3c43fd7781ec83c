//! Static Chart Plotter
//! Chart client that renders configs to PNG or SVG files with plotters,
//! one file per surface, named after the surface.

use crate::charts::config::{axis_label_step, axis_upper_bound, segment_sweeps, Sweep};
use crate::charts::{ChartClient, ChartConfig, ChartKind, ClientError, LegendPosition, Rgba};
use crate::page::Surface;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

const FONT: &str = "sans-serif";
const LEGEND_HEIGHT: u32 = 40;
const SWATCH: i32 = 12;
/// Inner radius of the doughnut relative to the outer one.
const CUTOUT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

/// Writes each drawn chart to `<output_dir>/<surface>.<ext>`.
pub struct PlottersClient {
    output_dir: PathBuf,
    format: ImageFormat,
    written: Vec<PathBuf>,
}

impl PlottersClient {
    pub fn new(output_dir: &Path, format: ImageFormat) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            format,
            written: Vec::new(),
        }
    }

    pub fn output_path(&self, surface: &Surface) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", surface.name, self.format.extension()))
    }

    /// Files written so far, in draw order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ChartClient for PlottersClient {
    fn draw(&mut self, surface: &Surface, config: &ChartConfig) -> Result<(), ClientError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_path(surface);
        let size = (surface.width.max(1), surface.height.max(1));
        let draw_error = |message: String| ClientError::Draw {
            surface: surface.name.clone(),
            message,
        };

        match self.format {
            ImageFormat::Png => {
                let root = BitMapBackend::new(&path, size).into_drawing_area();
                draw_chart(&root, config).map_err(|e| draw_error(e.to_string()))?;
                root.present().map_err(|e| draw_error(e.to_string()))?;
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(&path, size).into_drawing_area();
                draw_chart(&root, config).map_err(|e| draw_error(e.to_string()))?;
                root.present().map_err(|e| draw_error(e.to_string()))?;
            }
        }

        log::debug!("Wrote {} chart to {}", surface.name, path.display());
        self.written.push(path);
        Ok(())
    }
}

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

fn draw_chart<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, config: &ChartConfig) -> DrawResult<DB> {
    root.fill(&WHITE)?;
    match config.kind {
        ChartKind::Bar => draw_bar(root, config),
        ChartKind::Doughnut => draw_doughnut(root, config),
    }
}

fn color(c: Rgba) -> RGBAColor {
    RGBAColor(c.r, c.g, c.b, c.a)
}

fn draw_bar<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, config: &ChartConfig) -> DrawResult<DB> {
    let Some(dataset) = config.primary() else {
        return Ok(());
    };
    let step = config
        .y_axis
        .as_ref()
        .and_then(|a| a.step_size)
        .unwrap_or(1)
        .max(1);
    let upper = axis_upper_bound(config.max_value(), step);
    let label_step = axis_label_step(upper, step);
    let categories = config.labels.len().max(1);
    let labels = &config.labels;

    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d((0..categories).into_segmented(), 0u64..upper)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_labels((upper / label_step).saturating_add(1) as usize)
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    let bar = |i: usize, v: u64, style: ShapeStyle| {
        let mut rect = Rectangle::new(
            [(SegmentValue::Exact(i), 0), (SegmentValue::Exact(i + 1), v)],
            style,
        );
        rect.set_margin(0, 0, 8, 8);
        rect
    };

    let series = chart.draw_series(
        dataset
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| bar(i, v, color(dataset.background_at(i)).filled())),
    )?;
    if let Some(label) = &dataset.label {
        let swatch = color(dataset.background_at(0));
        series
            .label(label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], swatch.filled()));
    }

    chart.draw_series(dataset.values.iter().enumerate().map(|(i, &v)| {
        bar(
            i,
            v,
            color(dataset.border_at(i)).stroke_width(dataset.border_width),
        )
    }))?;

    if dataset.label.is_some() {
        chart
            .configure_series_labels()
            .position(match config.legend {
                LegendPosition::Top => SeriesLabelPosition::UpperMiddle,
                LegendPosition::Bottom => SeriesLabelPosition::LowerMiddle,
            })
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    Ok(())
}

/// Points along an arc, `degrees` clockwise from 12 o'clock.
fn arc(center: (i32, i32), radius: f64, from: f64, to: f64) -> Vec<(i32, i32)> {
    let steps = ((to - from).abs().ceil() as usize).max(1);
    (0..=steps)
        .map(|k| {
            let deg = from + (to - from) * k as f64 / steps as f64;
            let rad = Sweep::to_screen_radians(deg);
            (
                center.0 + (radius * rad.cos()).round() as i32,
                center.1 + (radius * rad.sin()).round() as i32,
            )
        })
        .collect()
}

fn draw_doughnut<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    config: &ChartConfig,
) -> DrawResult<DB> {
    let Some(dataset) = config.primary() else {
        return Ok(());
    };
    let (width, height) = root.dim_in_pixel();
    let legend_h = LEGEND_HEIGHT.min(height / 2);
    let (ring_area, legend_area) = match config.legend {
        LegendPosition::Bottom => root.split_vertically(height - legend_h),
        LegendPosition::Top => {
            let (top, bottom) = root.split_vertically(legend_h);
            (bottom, top)
        }
    };

    let (ring_w, ring_h) = ring_area.dim_in_pixel();
    let center = (ring_w as i32 / 2, ring_h as i32 / 2);
    let outer = (ring_w.min(ring_h) as f64 / 2.0 - 10.0).max(1.0);
    let inner = outer * CUTOUT;

    for sweep in segment_sweeps(&dataset.values) {
        let mut points = arc(center, outer, sweep.start, sweep.end);
        points.extend(arc(center, inner, sweep.end, sweep.start));

        ring_area.draw(&Polygon::new(
            points.clone(),
            color(dataset.background_at(sweep.index)).filled(),
        ))?;
        if let Some(&first) = points.first() {
            points.push(first);
        }
        ring_area.draw(&PathElement::new(
            points,
            color(dataset.border_at(sweep.index)).stroke_width(dataset.border_width),
        ))?;
    }

    // Legend: swatch + label per category, centred on one row.
    let item_widths: Vec<i32> = config
        .labels
        .iter()
        .map(|l| SWATCH + 6 + l.chars().count() as i32 * 8 + 16)
        .collect();
    let total: i32 = item_widths.iter().sum();
    let mut x = (width as i32 - total).max(0) / 2;
    let y = legend_h as i32 / 2;
    for (i, (label, item_w)) in config.labels.iter().zip(&item_widths).enumerate() {
        legend_area.draw(&Rectangle::new(
            [(x, y - SWATCH / 2), (x + SWATCH, y + SWATCH / 2)],
            color(dataset.background_at(i)).filled(),
        ))?;
        legend_area.draw(&Text::new(
            label.clone(),
            (x + SWATCH + 6, y - 7),
            (FONT, 14),
        ))?;
        x += item_w;
    }
    Ok(())
}
