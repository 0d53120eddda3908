#![forbid(unsafe_code)]

//! Call-stepped circle simulation used to declump clusters.
//!
//! An engine owns the bodies while it runs, calls the tick callback after every step (callers
//! clamp or otherwise constrain positions there) and hands the bodies back through the end
//! callback exactly once. `CollideSimulation` is the default engine; any other implementation of
//! [`Simulation`] can be plugged in.

pub mod body;
pub mod collide;
pub mod error;
pub mod options;

pub use body::Body;
pub use collide::{CollideSimulation, RunStats};
pub use error::{Error, Result};
pub use options::SimulationOptions;

pub type TickFn = Box<dyn FnMut(&mut [Body]) + Send>;
pub type EndFn = Box<dyn FnOnce(Vec<Body>) + Send>;

/// An iterative layout engine.
///
/// Implementations must call `on_end` exactly once, after the last `on_tick`. They may run on the
/// calling thread or elsewhere; dropping `on_end` without calling it aborts the run.
pub trait Simulation {
    fn run(self, bodies: Vec<Body>, on_tick: TickFn, on_end: EndFn);
}

/// Engine that never ticks: hands the bodies straight back.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stationary;

impl Simulation for Stationary {
    fn run(self, bodies: Vec<Body>, _on_tick: TickFn, on_end: EndFn) {
        on_end(bodies);
    }
}
