//! Core signal-derivation pipeline.

pub mod candle;
pub mod series;
pub mod moving_average;
pub mod cross;
pub mod sentiment;
pub mod signal;
pub mod analysis;
pub mod error;
