pub mod sweeper;

pub use sweeper::{SweepReport, SweepStats, Sweeper};
