//! Chart client - the rendering backend a chart config is handed to.

use crate::charts::ChartConfig;
use crate::page::Surface;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to draw chart on '{surface}': {message}")]
    Draw { surface: String, message: String },
    #[error("Failed to write chart output: {0}")]
    Io(#[from] std::io::Error),
}

/// Draws a configured chart onto a surface, replacing what was there.
pub trait ChartClient {
    fn draw(&mut self, surface: &Surface, config: &ChartConfig) -> Result<(), ClientError>;
}
