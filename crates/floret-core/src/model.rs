use crate::geom::{Point, point};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Write as _;

/// An input record. Real points carry their record through unchanged.
pub type Record = Map<String, Value>;

/// Describes how records are partitioned into clusters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingDescriptor {
    /// Record field whose value selects the cluster.
    pub name: String,
    /// Cluster values, in output order.
    pub values: Vec<Value>,
    #[serde(default)]
    pub color: String,
}

/// The bounding rectangle of a placement, centered at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// A clipped Voronoi cell: a closed polygon, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell {
    pub vertices: Vec<Point>,
}

impl Cell {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns `true` when every vertex lies inside `[-bound, bound]²` (with a small tolerance).
    pub fn within_square(&self, bound: f64) -> bool {
        let tol = 1e-9 * bound.abs().max(1.0);
        self.vertices
            .iter()
            .all(|v| v.x.abs() <= bound + tol && v.y.abs() <= bound + tol)
    }

    /// SVG path data for the cell (`M x,y L x,y ... Z`), or an empty string for an empty cell.
    pub fn to_svg_path(&self) -> String {
        let mut out = String::new();
        for (i, v) in self.vertices.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(out, "{cmd}{},{}", v.x, v.y);
        }
        if !out.is_empty() {
            out.push('Z');
        }
        out
    }
}

/// A positioned point of a cluster, real or padding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub id: u64,
    /// `false` for synthetic padding points that only bound the tessellation.
    pub draw: bool,
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub within_cluster_index: usize,
    #[serde(default)]
    pub cell: Cell,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<Record>,
}

impl DataPoint {
    pub fn position(&self) -> Point {
        point(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: usize,
    pub name: Value,
    pub color: String,
    /// Half extent of the real points.
    pub radius: f64,
    /// Half extent of every point, padding included.
    pub outer_radius: f64,
    pub points: Vec<DataPoint>,
    /// Number of real points.
    pub length: usize,
    /// Center set by a placement. Final layouts (`bar::pack`, `force::resolve`) use canvas space
    /// centered on the origin; the intermediate rows of `bar::layout_bars` carry bar-local
    /// positions measured from the canvas's top-left corner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
}

impl Cluster {
    pub fn real_points(&self) -> impl Iterator<Item = &DataPoint> {
        self.points.iter().filter(|p| p.draw)
    }

    pub fn padding_points(&self) -> impl Iterator<Item = &DataPoint> {
        self.points.iter().filter(|p| !p.draw)
    }

    /// Copy of this cluster placed at `(x, y)`.
    pub fn placed_at(&self, x: f64, y: f64) -> Self {
        Self {
            position: Some(point(x, y)),
            ..self.clone()
        }
    }
}
