//! Chart Viewer Widget
//! Central panel showing the dashboard charts with egui_plot and the painter.
//! Acts as a chart client: `draw` stores the config, `show` paints it every frame.

use crate::charts::{
    axis_upper_bound, segment_sweeps, ChartClient, ChartConfig, ChartKind, ClientError, Dataset,
    LegendPosition, Rgba, Sweep, MAX_AXIS_LABELS,
};
use crate::page::Surface;
use egui::{Color32, RichText, ScrollArea, Sense, Shape, Stroke};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot};

const CHART_SPACING: f32 = 15.0;
/// Inner radius of the doughnut relative to the outer one.
const CUTOUT: f32 = 0.5;

fn color32(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.alpha_u8())
}

/// Index of the segment under an angle (degrees clockwise from 12 o'clock).
pub fn segment_at(sweeps: &[Sweep], degrees: f64) -> Option<usize> {
    let degrees = degrees.rem_euclid(360.0);
    sweeps
        .iter()
        .find(|s| degrees >= s.start && degrees < s.end)
        .map(|s| s.index)
}

/// Integer grid marks for a zero-based value axis.
pub fn integer_marks(bounds: (f64, f64), step: u64) -> Vec<GridMark> {
    let low = bounds.0.max(0.0).floor();
    let high = bounds.1.ceil();
    if high < low {
        return Vec::new();
    }
    let mut step = step.max(1) as f64;
    let max_lines = MAX_AXIS_LABELS as f64;
    if (high - low) / step > max_lines {
        step = ((high - low) / max_lines).ceil();
    }

    let mut marks = Vec::new();
    let mut value = (low / step).ceil() * step;
    while value <= high {
        marks.push(GridMark {
            value,
            step_size: step,
        });
        value += step;
    }
    marks
}

struct DrawnChart {
    surface: Surface,
    config: ChartConfig,
}

/// Charts by surface, in the order they were first drawn.
#[derive(Default)]
pub struct ChartViewer {
    charts: Vec<DrawnChart>,
}

impl ChartClient for ChartViewer {
    fn draw(&mut self, surface: &Surface, config: &ChartConfig) -> Result<(), ClientError> {
        let drawn = DrawnChart {
            surface: surface.clone(),
            config: config.clone(),
        };
        match self.charts.iter_mut().find(|c| c.surface.name == surface.name) {
            Some(existing) => *existing = drawn,
            None => self.charts.push(drawn),
        }
        Ok(())
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.charts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    #[cfg(test)]
    pub fn config_for(&self, surface: &str) -> Option<&ChartConfig> {
        self.charts
            .iter()
            .find(|c| c.surface.name == surface)
            .map(|c| &c.config)
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        if self.charts.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("Sin datos").size(20.0));
            });
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for chart in &self.charts {
                    Self::draw_card(ui, chart);
                    ui.add_space(CHART_SPACING);
                }
            });
    }

    fn draw_card(ui: &mut egui::Ui, chart: &DrawnChart) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                // Responsive charts follow the panel width, keeping the surface's aspect ratio.
                let width = if chart.config.responsive {
                    ui.available_width()
                } else {
                    chart.surface.width as f32
                };
                let aspect = chart.surface.height as f32 / chart.surface.width.max(1) as f32;
                let height = (width * aspect).max(150.0);

                match chart.config.kind {
                    ChartKind::Bar => Self::draw_bar(ui, &chart.surface, &chart.config, height),
                    ChartKind::Doughnut => Self::draw_doughnut(ui, &chart.config, width, height),
                }
            });
    }

    fn draw_bar(ui: &mut egui::Ui, surface: &Surface, config: &ChartConfig, height: f32) {
        let Some(dataset) = config.primary() else {
            return;
        };
        let step = config
            .y_axis
            .as_ref()
            .and_then(|a| a.step_size)
            .unwrap_or(1);
        let upper = axis_upper_bound(config.max_value(), step);
        let labels = config.labels.clone();

        let bars: Vec<Bar> = dataset
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                Bar::new(i as f64, v as f64)
                    .width(0.6)
                    .name(config.labels.get(i).cloned().unwrap_or_default())
                    .fill(color32(dataset.background_at(i)))
                    .stroke(Stroke::new(
                        dataset.border_width as f32,
                        color32(dataset.border_at(i)),
                    ))
            })
            .collect();

        let mut chart = BarChart::new(bars);
        if let Some(label) = &dataset.label {
            chart = chart.name(label).color(color32(dataset.border_at(0)));
        }

        let mut plot = Plot::new(format!("bar_{}", surface.name))
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_y(upper as f64)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() < 1e-6 && idx >= 0.0 {
                    labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .x_grid_spacer(|input| integer_marks(input.bounds, 1))
            .y_grid_spacer(move |input| integer_marks(input.bounds, step));
        if config.y_axis.as_ref().is_some_and(|a| a.begin_at_zero) {
            plot = plot.include_y(0.0);
        }
        if dataset.label.is_some() {
            plot = plot.legend(Legend::default().position(match config.legend {
                LegendPosition::Top => egui_plot::Corner::RightTop,
                LegendPosition::Bottom => egui_plot::Corner::RightBottom,
            }));
        }
        if !config.tooltips {
            plot = plot.show_x(false).show_y(false);
        }

        plot.show(ui, |plot_ui| plot_ui.bar_chart(chart));
    }

    fn draw_doughnut(ui: &mut egui::Ui, config: &ChartConfig, width: f32, height: f32) {
        let Some(dataset) = config.primary() else {
            return;
        };

        if config.legend == LegendPosition::Top {
            Self::draw_legend(ui, config, dataset);
        }

        let (response, painter) = ui.allocate_painter(egui::vec2(width, height), Sense::hover());
        let rect = response.rect;
        let center = rect.center();
        let outer = (rect.width().min(rect.height()) / 2.0 - 10.0).max(1.0);
        let inner = outer * CUTOUT;
        let point = |radius: f32, degrees: f64| {
            let rad = Sweep::to_screen_radians(degrees) as f32;
            center + egui::vec2(radius * rad.cos(), radius * rad.sin())
        };

        let sweeps = segment_sweeps(&dataset.values);
        for sweep in &sweeps {
            let fill = color32(dataset.background_at(sweep.index));
            let steps = (sweep.degrees().ceil() as usize).max(1);
            let at = |k: usize| sweep.start + sweep.degrees() * k as f64 / steps as f64;

            // Convex quads, one per degree.
            for k in 0..steps {
                let (a, b) = (at(k), at(k + 1));
                painter.add(Shape::convex_polygon(
                    vec![point(outer, a), point(outer, b), point(inner, b), point(inner, a)],
                    fill,
                    Stroke::NONE,
                ));
            }

            let mut outline: Vec<egui::Pos2> = (0..=steps).map(|k| point(outer, at(k))).collect();
            outline.extend((0..=steps).rev().map(|k| point(inner, at(k))));
            painter.add(Shape::closed_line(
                outline,
                Stroke::new(
                    dataset.border_width as f32,
                    color32(dataset.border_at(sweep.index)),
                ),
            ));
        }

        if config.tooltips {
            if let Some(pos) = response.hover_pos() {
                let offset = pos - center;
                let distance = offset.length();
                if distance >= inner && distance <= outer {
                    let degrees = (offset.y as f64).atan2(offset.x as f64).to_degrees() + 90.0;
                    if let Some(index) = segment_at(&sweeps, degrees) {
                        let label = config.labels.get(index).cloned().unwrap_or_default();
                        let value = dataset.values.get(index).copied().unwrap_or(0);
                        response.on_hover_text(format!("{}: {}", label, value));
                    }
                }
            }
        }

        if config.legend == LegendPosition::Bottom {
            Self::draw_legend(ui, config, dataset);
        }
    }

    fn draw_legend(ui: &mut egui::Ui, config: &ChartConfig, dataset: &Dataset) {
        ui.horizontal_wrapped(|ui| {
            for (i, label) in config.labels.iter().enumerate() {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(16.0, 16.0), Sense::hover());
                ui.painter()
                    .rect_filled(rect, 3.0, color32(dataset.background_at(i)));
                ui.label(RichText::new(label).size(13.0));
                ui.add_space(12.0);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CategoryCounts;

    fn risk_config() -> ChartConfig {
        let counts: CategoryCounts = [("Alto", 2), ("Medio", 4), ("Bajo", 1)].into_iter().collect();
        ChartConfig::doughnut(&counts)
    }

    #[test]
    fn redraw_replaces_chart_on_same_surface() {
        let mut viewer = ChartViewer::new();
        let surface = Surface::new("riesgosChart", 400, 300);
        viewer.draw(&surface, &risk_config()).unwrap();

        let counts: CategoryCounts = [("Alto", 9)].into_iter().collect();
        viewer.draw(&surface, &ChartConfig::doughnut(&counts)).unwrap();

        assert_eq!(viewer.charts.len(), 1);
        assert_eq!(viewer.config_for("riesgosChart").unwrap().labels, vec!["Alto"]);
    }

    #[test]
    fn clear_empties_viewer() {
        let mut viewer = ChartViewer::new();
        viewer
            .draw(&Surface::new("riesgosChart", 400, 300), &risk_config())
            .unwrap();
        assert!(!viewer.is_empty());
        viewer.clear();
        assert!(viewer.is_empty());
    }

    #[test]
    fn hover_angle_maps_to_segment() {
        let sweeps = segment_sweeps(&[2, 4, 1]);
        assert_eq!(segment_at(&sweeps, 10.0), Some(0));
        assert_eq!(segment_at(&sweeps, 180.0), Some(1));
        assert_eq!(segment_at(&sweeps, 350.0), Some(2));
        assert_eq!(segment_at(&sweeps, -10.0), Some(2));
        assert_eq!(segment_at(&[], 10.0), None);
    }

    #[test]
    fn integer_marks_step_by_one() {
        let marks = integer_marks((-0.4, 5.2), 1);
        let values: Vec<f64> = marks.iter().map(|m| m.value).collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!(marks.iter().all(|m| m.step_size == 1.0));
    }

    #[test]
    fn integer_marks_thin_out_large_ranges() {
        let marks = integer_marks((0.0, 1000.0), 1);
        assert!(marks.len() as u64 <= MAX_AXIS_LABELS + 1);
        assert_eq!(marks[0].value, 0.0);
    }
}
