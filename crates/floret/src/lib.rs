#![forbid(unsafe_code)]

//! `floret` lays out clustered point data for rendering.
//!
//! Records are grouped into clusters (see [`floret_core`]); every cluster is a phyllotaxis spiral
//! with clipped Voronoi cells. The clusters are then placed on a canvas, either by deterministic
//! row packing ([`bar`]) or by an iterative, canvas-bounded simulation ([`force`]).
//!
//! All geometry is returned as fresh values; inputs are never modified.

pub mod bar;
pub mod config;
pub mod force;
pub mod order;

pub use config::{LayoutConfig, ScaleConfig};
pub use floret_core::{
    BatchOptions, Canvas, Cell, Cluster, DataPoint, GroupingDescriptor, IdentityScale,
    LinearScale, PhyllotaxisOptions, RadiusScale, Record, SpiralAngle, build_clusters,
};
pub use floret_core::{geom, phyllotaxis, tessellate};
pub use floret_sim as sim;
pub use order::{Ordering, SymmetricOrder};

use serde::{Deserialize, Serialize};

/// Default clearance multiplier applied to cluster radii.
pub const DEFAULT_RADIUS_FACTOR: f64 = 1.2;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] floret_core::Error),
    #[error(transparent)]
    Sim(#[from] floret_sim::Error),
    #[error("ordering returned {order:?}, which is not a permutation of 0..{len}")]
    InvalidPermutation { len: usize, order: Vec<usize> },
    #[error("simulation ended without reporting its bodies")]
    SimulationAborted,
    #[error("simulation returned {actual} bodies for {expected} clusters")]
    SimulationMismatch { expected: usize, actual: usize },
    #[error("config JSON error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// How clusters are placed on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Clusters keep their local origin; no canvas position is assigned.
    None,
    #[default]
    Bar,
    Force,
}

/// Builds the clusters and places them with the configured strategy.
///
/// The force placement uses the default collide engine with `config.simulation`; call
/// [`force::resolve`] directly to plug in another engine.
pub async fn layout<S>(
    grouping: &GroupingDescriptor,
    records: &[Record],
    scale: &S,
    config: &LayoutConfig,
    placement: Placement,
) -> Result<Vec<Cluster>>
where
    S: RadiusScale + ?Sized,
{
    let clusters = build_clusters(grouping, records, scale, &config.batch)?;
    match placement {
        Placement::None => Ok(clusters),
        Placement::Bar => bar::pack(
            &clusters,
            config.canvas,
            config.radius_factor,
            &config.ordering,
        ),
        Placement::Force => {
            config.simulation.validate()?;
            let engine = sim::CollideSimulation::new(config.simulation.clone());
            force::resolve(&clusters, config.canvas, config.radius_factor, engine).await
        }
    }
}

/// Synchronous [`layout`] (executor-free for every placement except `Force`, which is driven to
/// completion on the calling thread).
pub fn layout_sync<S>(
    grouping: &GroupingDescriptor,
    records: &[Record],
    scale: &S,
    config: &LayoutConfig,
    placement: Placement,
) -> Result<Vec<Cluster>>
where
    S: RadiusScale + ?Sized,
{
    futures::executor::block_on(layout(grouping, records, scale, config, placement))
}
