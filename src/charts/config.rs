//! Chart configuration handed to a chart client.
//!
//! Describes what to draw; clients decide how.

use crate::data::CategoryCounts;

/// RGB colour with an alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

pub const BAR_PALETTE: [Rgba; 5] = [
    Rgba::new(255, 99, 132, 1.0),  // Red
    Rgba::new(54, 162, 235, 1.0),  // Blue
    Rgba::new(255, 206, 86, 1.0),  // Yellow
    Rgba::new(75, 192, 192, 1.0),  // Teal
    Rgba::new(153, 102, 255, 1.0), // Purple
];

pub const RING_PALETTE: [Rgba; 3] = [
    Rgba::new(255, 99, 132, 1.0), // Red
    Rgba::new(255, 206, 86, 1.0), // Yellow
    Rgba::new(75, 192, 192, 1.0), // Teal
];

/// Most value-axis labels either client draws; steps widen past this.
pub const MAX_AXIS_LABELS: u64 = 20;

const BAR_FILL_ALPHA: f64 = 0.5;
const RING_FILL_ALPHA: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Doughnut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    Top,
    Bottom,
}

/// One series of values with per-point colours.
///
/// Colour lists shorter than `values` are cycled.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: Option<String>,
    pub values: Vec<u64>,
    pub background: Vec<Rgba>,
    pub border: Vec<Rgba>,
    pub border_width: u32,
}

impl Dataset {
    pub fn background_at(&self, index: usize) -> Rgba {
        cycle(&self.background, index)
    }

    pub fn border_at(&self, index: usize) -> Rgba {
        cycle(&self.border, index)
    }
}

fn cycle(colors: &[Rgba], index: usize) -> Rgba {
    if colors.is_empty() {
        Rgba::new(128, 128, 128, 1.0)
    } else {
        colors[index % colors.len()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueAxis {
    pub begin_at_zero: bool,
    pub step_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub responsive: bool,
    pub legend: LegendPosition,
    pub tooltips: bool,
    /// Only meaningful for bar charts.
    pub y_axis: Option<ValueAxis>,
}

impl ChartConfig {
    /// Bar chart: one bar per category, zero-based y axis stepping by 1.
    pub fn bar(counts: &CategoryCounts, dataset_label: &str) -> Self {
        Self {
            kind: ChartKind::Bar,
            labels: counts.labels(),
            datasets: vec![Dataset {
                label: Some(dataset_label.to_string()),
                values: counts.values(),
                background: BAR_PALETTE
                    .iter()
                    .map(|c| c.with_alpha(BAR_FILL_ALPHA))
                    .collect(),
                border: BAR_PALETTE.to_vec(),
                border_width: 1,
            }],
            responsive: true,
            legend: LegendPosition::Top,
            tooltips: true,
            y_axis: Some(ValueAxis {
                begin_at_zero: true,
                step_size: Some(1),
            }),
        }
    }

    /// Doughnut chart: one segment per category, legend at the bottom.
    pub fn doughnut(counts: &CategoryCounts) -> Self {
        Self {
            kind: ChartKind::Doughnut,
            labels: counts.labels(),
            datasets: vec![Dataset {
                label: None,
                values: counts.values(),
                background: RING_PALETTE
                    .iter()
                    .map(|c| c.with_alpha(RING_FILL_ALPHA))
                    .collect(),
                border: RING_PALETTE.to_vec(),
                border_width: 1,
            }],
            responsive: true,
            legend: LegendPosition::Bottom,
            tooltips: true,
            y_axis: None,
        }
    }

    /// The first (and for these charts, only) dataset.
    pub fn primary(&self) -> Option<&Dataset> {
        self.datasets.first()
    }

    /// Largest value across all datasets, 0 when empty.
    pub fn max_value(&self) -> u64 {
        self.datasets
            .iter()
            .flat_map(|d| d.values.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

/// Angular extent of one doughnut segment, in degrees clockwise from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

impl Sweep {
    pub fn degrees(&self) -> f64 {
        self.end - self.start
    }

    /// Screen angle in radians (y down) for `degrees` clockwise from 12 o'clock.
    pub fn to_screen_radians(degrees: f64) -> f64 {
        (degrees - 90.0).to_radians()
    }
}

/// Split the full circle proportionally to `values`.
///
/// Zero-valued entries get no sweep; an all-zero input gives no sweeps.
pub fn segment_sweeps(values: &[u64]) -> Vec<Sweep> {
    // f64 total: counts near u64::MAX would overflow an integer sum.
    let total: f64 = values.iter().map(|&v| v as f64).sum();
    if total == 0.0 {
        return Vec::new();
    }

    let mut start = 0.0;
    values
        .iter()
        .enumerate()
        .filter(|(_, &v)| v > 0)
        .map(|(index, &v)| {
            let end = start + v as f64 / total * 360.0;
            let sweep = Sweep { index, start, end };
            start = end;
            sweep
        })
        .collect()
}

/// Upper bound of a zero-based integer axis: at least one step above the max.
pub fn axis_upper_bound(max: u64, step: u64) -> u64 {
    let step = step.max(1);
    (max / step).saturating_add(1).saturating_mul(step)
}

/// Label step for a zero-based axis up to `upper`: `step`, widened so that
/// at most `MAX_AXIS_LABELS + 1` labels are drawn.
pub fn axis_label_step(upper: u64, step: u64) -> u64 {
    let step = step.max(1);
    if upper / step > MAX_AXIS_LABELS {
        upper.div_ceil(MAX_AXIS_LABELS)
    } else {
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u64)]) -> CategoryCounts {
        pairs.iter().map(|&(l, c)| (l, c)).collect()
    }

    #[test]
    fn bar_has_one_bar_per_category() {
        let config = ChartConfig::bar(&counts(&[("SQLi", 3), ("XSS", 5)]), "Vulnerabilidades por Tipo");
        assert_eq!(config.kind, ChartKind::Bar);
        assert_eq!(config.labels, vec!["SQLi", "XSS"]);
        assert_eq!(config.datasets.len(), 1);

        let dataset = config.primary().unwrap();
        assert_eq!(dataset.label.as_deref(), Some("Vulnerabilidades por Tipo"));
        assert_eq!(dataset.values, vec![3, 5]);
        assert_eq!(
            config.y_axis,
            Some(ValueAxis {
                begin_at_zero: true,
                step_size: Some(1)
            })
        );
        assert!(config.responsive);
        assert!(config.tooltips);
    }

    #[test]
    fn bar_palette_cycles_after_five() {
        let many: CategoryCounts = (0..7).map(|i| (format!("t{i}"), i as u64)).collect();
        let config = ChartConfig::bar(&many, "x");
        let dataset = config.primary().unwrap();
        assert_eq!(dataset.values.len(), 7);
        assert_eq!(dataset.background_at(5), dataset.background_at(0));
        assert_eq!(dataset.border_at(6), BAR_PALETTE[1]);
        assert_eq!(dataset.background_at(2), Rgba::new(255, 206, 86, 0.5));
    }

    #[test]
    fn empty_mapping_gives_zero_categories() {
        let config = ChartConfig::bar(&CategoryCounts::new(), "x");
        assert!(config.labels.is_empty());
        assert_eq!(config.max_value(), 0);
    }

    #[test]
    fn doughnut_keeps_order_and_puts_legend_at_bottom() {
        let config = ChartConfig::doughnut(&counts(&[("Alto", 2), ("Medio", 4), ("Bajo", 1)]));
        assert_eq!(config.kind, ChartKind::Doughnut);
        assert_eq!(config.labels, vec!["Alto", "Medio", "Bajo"]);
        assert_eq!(config.legend, LegendPosition::Bottom);
        assert!(config.y_axis.is_none());

        let dataset = config.primary().unwrap();
        assert_eq!(dataset.values, vec![2, 4, 1]);
        assert_eq!(dataset.background_at(1), Rgba::new(255, 206, 86, 0.8));
        assert_eq!(dataset.border_width, 1);
    }

    #[test]
    fn sweeps_are_proportional_and_cover_the_circle() {
        let sweeps = segment_sweeps(&[2, 4, 1]);
        assert_eq!(sweeps.len(), 3);
        assert!((sweeps[0].degrees() - 360.0 * 2.0 / 7.0).abs() < 1e-9);
        assert!((sweeps[1].degrees() - 360.0 * 4.0 / 7.0).abs() < 1e-9);
        assert!((sweeps[2].degrees() - 360.0 / 7.0).abs() < 1e-9);
        assert_eq!(sweeps[0].start, 0.0);
        assert_eq!(sweeps[1].start, sweeps[0].end);
        assert!((sweeps[2].end - 360.0).abs() < 1e-9);
    }

    #[test]
    fn zero_values_get_no_sweep() {
        let sweeps = segment_sweeps(&[0, 3, 0, 1]);
        assert_eq!(sweeps.iter().map(|s| s.index).collect::<Vec<_>>(), vec![1, 3]);
        assert!(segment_sweeps(&[0, 0]).is_empty());
        assert!(segment_sweeps(&[]).is_empty());
    }

    #[test]
    fn sweeps_survive_counts_near_u64_max() {
        let sweeps = segment_sweeps(&[u64::MAX, 1]);
        assert_eq!(sweeps.len(), 2);
        assert!((sweeps[0].degrees() - 360.0).abs() < 1e-6);
        assert!((sweeps[1].end - 360.0).abs() < 1e-6);
    }

    #[test]
    fn axis_bound_saturates_at_u64_max() {
        assert_eq!(axis_upper_bound(u64::MAX, 1), u64::MAX);
        assert_eq!(axis_upper_bound(u64::MAX - 1, 1), u64::MAX);
        assert_eq!(axis_upper_bound(u64::MAX, 1000), u64::MAX);
    }

    #[test]
    fn label_step_widens_for_large_ranges() {
        assert_eq!(axis_label_step(6, 1), 1);
        assert_eq!(axis_label_step(20, 1), 1);
        assert_eq!(axis_label_step(3001, 1), 151);
        assert!(3001 / axis_label_step(3001, 1) <= MAX_AXIS_LABELS);
        assert!(u64::MAX / axis_label_step(u64::MAX, 1) <= MAX_AXIS_LABELS);
    }

    #[test]
    fn axis_bound_leaves_headroom() {
        assert_eq!(axis_upper_bound(5, 1), 6);
        assert_eq!(axis_upper_bound(0, 1), 1);
        assert_eq!(axis_upper_bound(9, 0), 10);
    }

    #[test]
    fn alpha_maps_to_byte() {
        assert_eq!(Rgba::new(0, 0, 0, 0.5).alpha_u8(), 128);
        assert_eq!(Rgba::new(0, 0, 0, 1.0).alpha_u8(), 255);
    }
}
