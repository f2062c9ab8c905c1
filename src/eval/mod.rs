//! Position evaluation for the heuristic AI

pub mod heuristic;

pub use heuristic::{score_column, Weights};
