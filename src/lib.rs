//! fearcross — moving-average crossover + fear/greed trading signal analyzer.
//!
//! Hexagonal architecture: pipeline logic in [`domain`], port traits in
//! [`ports`], concrete collaborators in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
