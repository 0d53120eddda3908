#![forbid(unsafe_code)]

//! Cluster model and per-cluster geometry (headless).
//!
//! Records are grouped into clusters; every cluster's points are laid out on a phyllotaxis spiral,
//! ringed with padding points, and tessellated into clipped Voronoi cells. Placing the clusters on
//! a canvas is left to the `floret` crate.
//!
//! Design goals:
//! - deterministic, testable outputs
//! - value semantics: inputs are never mutated, outputs never alias them

pub mod batch;
pub mod error;
pub mod geom;
pub mod model;
pub mod phyllotaxis;
pub mod scale;
pub mod tessellate;

pub use batch::{BatchOptions, build_clusters};
pub use error::{Error, Result};
pub use model::{Canvas, Cell, Cluster, DataPoint, GroupingDescriptor, Record};
pub use phyllotaxis::{PhyllotaxisOptions, Placement, SpiralAngle};
pub use scale::{IdentityScale, LinearScale, RadiusScale};
