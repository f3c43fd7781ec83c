//! Charts module - chart configuration, rendering and clients

mod client;
mod config;
mod plotter;
mod renderer;

pub use client::{ChartClient, ClientError};
pub use config::{
    axis_label_step, axis_upper_bound, segment_sweeps, ChartConfig, ChartKind, Dataset,
    LegendPosition, Rgba, Sweep, MAX_AXIS_LABELS,
};
pub use plotter::{ImageFormat, PlottersClient};
pub use renderer::{render_charts, RenderError};
