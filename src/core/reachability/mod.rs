pub mod collector;

pub use collector::{collect, Collection, ReachableSet};
