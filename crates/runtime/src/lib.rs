//! Runtime orchestration for the toroidal RTS core.
//!
//! This crate wires the deterministic core into a runnable single-process
//! host. Consumers embed [`GameHost`] to queue commands, drive ticks, and
//! observe resource changes.
//!
//! Modules are organized by responsibility:
//! - [`host`] owns the tick loop and the command queue
//! - [`world`] is the in-memory actor world the wrap tracker drives
//! - [`piles`] adapts the pile registry into the core's spawn oracle
//! - [`telemetry`] sets up tracing for binaries and tests
pub mod host;
pub mod piles;
pub mod telemetry;
pub mod world;

pub use host::{ActionOutcome, GameHost, TickReport};
pub use piles::WorldPiles;
pub use telemetry::init_tracing;
pub use world::InMemoryWorld;
