pub mod cycle;
pub mod driver;
pub mod engine;
pub mod heuristics;
pub mod stats;
pub mod tracker;
