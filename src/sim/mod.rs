//! Simulation engine: world state and the per-tick stages
//!
//! Stages run strictly in sequence over one shared `World`; see `tick` for
//! the load-bearing order.

pub mod absorption;
pub mod assignment;
pub mod battle;
pub mod drift;
pub mod output;
pub mod scheduler;
pub mod separatism;
pub mod tick;
pub mod union;
pub mod world;

pub use output::{RunOutput, RunStats, Snapshot};
pub use tick::{run_tick, TickSummary};
pub use world::World;
