//! Data module - count mappings and their loading

mod counts;
mod loader;

pub use counts::CategoryCounts;
pub use loader::{DashboardData, DataLoader, LoaderError};
