//! Deterministic row ("bar") packing of clusters into the canvas.
//!
//! Clusters are sorted by radius, filled greedily into rows of the canvas width, arranged within
//! each row by a [`SymmetricOrder`], and then spaced evenly: horizontally inside a row and
//! vertically between rows. No iteration and no randomness are involved.

use crate::order::{SymmetricOrder, is_permutation};
use crate::{Error, Result};
use floret_core::geom::point;
use floret_core::{Canvas, Cluster};
use serde::Serialize;

/// One row of clusters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub id: usize,
    /// Clusters in left-to-right order. Their positions are bar-local, not canvas-centered: x is
    /// measured from the left edge and y equals [`Bar::y`]. [`pack`] converts them.
    pub clusters: Vec<Cluster>,
    /// Sum of the inflated diameters in the row.
    pub occupied_width: f64,
    /// Largest inflated diameter in the row.
    pub max_height: f64,
    /// Row center, measured from the top edge of the canvas.
    pub y: f64,
}

impl Bar {
    fn new(id: usize) -> Self {
        Self {
            id,
            clusters: Vec::new(),
            occupied_width: 0.0,
            max_height: 0.0,
            y: 0.0,
        }
    }
}

/// Greedy first-fit of clusters, largest first, into rows of `width`.
///
/// A cluster wider than the canvas is never dropped: it ends up alone in its own row.
pub fn assign_bars(clusters: &[Cluster], width: f64, radius_factor: f64) -> Vec<Bar> {
    let mut sorted = clusters.to_vec();
    sorted.sort_by(|a, b| b.radius.total_cmp(&a.radius));

    let mut bars = Vec::new();
    let mut bar = Bar::new(0);
    for cluster in sorted {
        let diameter = 2.0 * cluster.radius * radius_factor;
        if !bar.clusters.is_empty() && width - bar.occupied_width < diameter {
            let next = Bar::new(bar.id + 1);
            bars.push(std::mem::replace(&mut bar, next));
        }
        if diameter > width {
            tracing::warn!(
                cluster = cluster.id,
                diameter,
                width,
                "cluster is wider than the canvas; placing it in its own bar"
            );
        }
        bar.clusters.push(cluster);
        bar.occupied_width += diameter;
        bar.max_height = bar.max_height.max(diameter);
    }
    if !bar.clusters.is_empty() {
        bars.push(bar);
    }
    bars
}

/// Assigns, orders and spaces the bars.
///
/// Cluster positions in the result are bar-local: x from the left edge of the canvas, y equal to
/// the row center measured from the top edge.
pub fn layout_bars<O>(
    clusters: &[Cluster],
    canvas: Canvas,
    radius_factor: f64,
    order: &O,
) -> Result<Vec<Bar>>
where
    O: SymmetricOrder + ?Sized,
{
    let mut bars = assign_bars(clusters, canvas.width, radius_factor);

    for bar in &mut bars {
        let radii: Vec<f64> = bar.clusters.iter().map(|c| c.radius).collect();
        let perm = order.order(&radii);
        if !is_permutation(&perm, radii.len()) {
            return Err(Error::InvalidPermutation {
                len: radii.len(),
                order: perm,
            });
        }
        bar.clusters = perm.iter().map(|&i| bar.clusters[i].clone()).collect();
        space_horizontally(bar, canvas.width, radius_factor);
    }

    let total_height: f64 = bars.iter().map(|b| b.max_height).sum();
    let y_spacing = (canvas.height - total_height) / (bars.len() + 1) as f64;
    let mut y = 0.0;
    let mut prev_height: Option<f64> = None;
    for bar in &mut bars {
        y += match prev_height {
            None => y_spacing + bar.max_height / 2.0,
            Some(prev) => (prev + bar.max_height) / 2.0 + y_spacing,
        };
        bar.y = y;
        prev_height = Some(bar.max_height);
        for cluster in &mut bar.clusters {
            if let Some(p) = cluster.position.as_mut() {
                p.y = y;
            }
        }
    }

    tracing::debug!(
        bars = bars.len(),
        clusters = clusters.len(),
        y_spacing,
        "bar layout"
    );
    Ok(bars)
}

fn space_horizontally(bar: &mut Bar, width: f64, radius_factor: f64) {
    let used: f64 = bar
        .clusters
        .iter()
        .map(|c| 2.0 * c.radius * radius_factor)
        .sum();
    let x_spacing = (width - used) / (bar.clusters.len() + 1) as f64;

    let mut x = 0.0;
    let mut prev_radius: Option<f64> = None;
    for cluster in &mut bar.clusters {
        x += match prev_radius {
            None => x_spacing + cluster.radius * radius_factor,
            Some(prev) => (prev + cluster.radius) * radius_factor + x_spacing,
        };
        prev_radius = Some(cluster.radius);
        cluster.position = Some(point(x, 0.0));
    }
}

/// Packs clusters into bars and returns them centered on the canvas origin, in bar order then
/// left-to-right order.
pub fn pack<O>(
    clusters: &[Cluster],
    canvas: Canvas,
    radius_factor: f64,
    order: &O,
) -> Result<Vec<Cluster>>
where
    O: SymmetricOrder + ?Sized,
{
    let bars = layout_bars(clusters, canvas, radius_factor, order)?;
    let (hw, hh) = (canvas.half_width(), canvas.half_height());
    Ok(bars
        .into_iter()
        .flat_map(|bar| {
            let y = bar.y;
            bar.clusters.into_iter().map(move |c| {
                let x = c.position.map_or(0.0, |p| p.x);
                c.placed_at(x - hw, y - hh)
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::InputOrder;
    use serde_json::json;

    fn cluster(id: usize, radius: f64) -> Cluster {
        Cluster {
            id,
            name: json!(format!("c{id}")),
            color: String::new(),
            radius,
            outer_radius: radius,
            points: Vec::new(),
            length: 0,
            position: None,
        }
    }

    #[test]
    fn sort_is_stable_for_equal_radii() {
        let input = vec![cluster(0, 5.0), cluster(1, 5.0), cluster(2, 9.0)];
        let bars = assign_bars(&input, 1000.0, 1.2);
        let ids: Vec<usize> = bars[0].clusters.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 0, 1]);
    }

    #[test]
    fn single_bar_is_spaced_evenly() {
        let input = vec![cluster(0, 10.0), cluster(1, 10.0)];
        let bars = layout_bars(&input, Canvas::new(100.0, 60.0), 1.0, &InputOrder).expect("ok");
        assert_eq!(bars.len(), 1);
        // (100 - 40) / 3 = 20 → centers at 30 and 70.
        let xs: Vec<f64> = bars[0]
            .clusters
            .iter()
            .map(|c| c.position.expect("placed").x)
            .collect();
        assert_eq!(xs, vec![30.0, 70.0]);
        // (60 - 20) / 2 = 20 → row center at 30.
        assert_eq!(bars[0].y, 30.0);
    }

    #[test]
    fn layout_bars_positions_are_measured_from_the_top_left() {
        let input = vec![cluster(0, 30.0), cluster(1, 30.0), cluster(2, 10.0)];
        let canvas = Canvas::new(130.0, 200.0);
        let bars = layout_bars(&input, canvas, 1.0, &InputOrder).expect("ok");
        assert_eq!(bars.len(), 2);
        for bar in &bars {
            for c in &bar.clusters {
                let p = c.position.expect("placed");
                assert!(p.x - c.radius >= 0.0 && p.x + c.radius <= canvas.width);
                assert_eq!(p.y, bar.y);
                assert!(bar.y > 0.0);
            }
        }
    }

    #[test]
    fn rejects_an_order_that_is_not_a_permutation() {
        struct Broken;
        impl SymmetricOrder for Broken {
            fn order(&self, radii: &[f64]) -> Vec<usize> {
                vec![0; radii.len()]
            }
        }
        let input = vec![cluster(0, 1.0), cluster(1, 2.0)];
        let err = pack(&input, Canvas::new(100.0, 100.0), 1.2, &Broken).unwrap_err();
        assert!(matches!(err, Error::InvalidPermutation { len: 2, .. }));
    }

    #[test]
    fn empty_input_packs_to_nothing() {
        let out = pack(&[], Canvas::new(100.0, 100.0), 1.2, &InputOrder).expect("ok");
        assert!(out.is_empty());
    }
}
