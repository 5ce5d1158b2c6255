pub mod chart;
pub mod config;
pub mod error;
pub mod plot;
pub mod record;
pub mod series;
