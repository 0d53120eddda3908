//! Voronoi cells of a cluster, clipped to its outer square.
//!
//! The Delaunay triangulation is built with `spade`. A point's Voronoi cell is the intersection of
//! the clip square with one half-plane per Delaunay neighbour (the side of the perpendicular
//! bisector closer to the point), so only the neighbour list of every site is needed.

use crate::geom::{Point, point};
use crate::model::Cell;
use rustc_hash::FxHashSet;
use spade::{DelaunayTriangulation, Point2, Triangulation};

/// Computes one cell per site, index-aligned with `sites`, clipped to `[-outer_radius, outer_radius]²`.
///
/// Never fails: sites that cannot be triangulated (non-finite coordinates, duplicates of an earlier
/// site) get an empty cell, as does every site when the clip square is degenerate.
pub fn tessellate(outer_radius: f64, sites: &[Point]) -> Vec<Cell> {
    if !(outer_radius.is_finite() && outer_radius > 0.0) {
        return vec![Cell::empty(); sites.len()];
    }

    let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    let mut claimed: FxHashSet<usize> = FxHashSet::default();
    let mut handles = Vec::with_capacity(sites.len());
    for site in sites {
        if !(site.x.is_finite() && site.y.is_finite()) {
            handles.push(None);
            continue;
        }
        let handle = match triangulation.insert(Point2::new(site.x, site.y)) {
            Ok(h) => h,
            Err(err) => {
                tracing::debug!(?err, x = site.x, y = site.y, "site rejected by triangulation");
                handles.push(None);
                continue;
            }
        };
        // Coincident sites collapse onto one vertex; the first one owns the cell.
        handles.push(claimed.insert(handle.index()).then_some(handle));
    }

    let r = outer_radius;
    let square = vec![point(-r, -r), point(r, -r), point(r, r), point(-r, r)];

    sites
        .iter()
        .zip(handles)
        .map(|(site, handle)| {
            let Some(handle) = handle else {
                return Cell::empty();
            };
            let mut polygon = square.clone();
            for edge in triangulation.vertex(handle).out_edges() {
                let other = edge.to().position();
                polygon = clip_to_bisector(&polygon, *site, point(other.x, other.y));
                if polygon.is_empty() {
                    break;
                }
            }
            Cell::new(polygon)
        })
        .collect()
}

/// Keeps the part of `polygon` that is at least as close to `site` as to `other`.
fn clip_to_bisector(polygon: &[Point], site: Point, other: Point) -> Vec<Point> {
    let normal = other - site;
    let mid = site.lerp(other, 0.5);
    let side = |p: Point| (p - mid).dot(normal);

    let mut out = Vec::with_capacity(polygon.len() + 1);
    for (i, &cur) in polygon.iter().enumerate() {
        let prev = polygon[(i + polygon.len() - 1) % polygon.len()];
        let (s_cur, s_prev) = (side(cur), side(prev));
        if s_cur <= 0.0 {
            if s_prev > 0.0 {
                out.push(crossing(prev, cur, s_prev, s_cur));
            }
            out.push(cur);
        } else if s_prev <= 0.0 {
            out.push(crossing(prev, cur, s_prev, s_cur));
        }
    }
    out
}

fn crossing(a: Point, b: Point, side_a: f64, side_b: f64) -> Point {
    let t = side_a / (side_a - side_b);
    a + (b - a) * t
}
