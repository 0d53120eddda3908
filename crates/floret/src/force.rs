//! Declumping through an iterative simulation, bounded by the canvas.
//!
//! Each cluster becomes a body whose collision radius is its radius times the inflation factor.
//! After every simulation tick the centers are clamped so that no inflated cluster crosses the
//! canvas edge, whatever forces the engine applies.

use crate::{Error, Result};
use floret_core::{Canvas, Cluster};
use floret_sim::{Body, Simulation};
use futures::channel::oneshot;

/// Runs `engine` over the clusters and resolves once it reports its end.
///
/// Clusters without a position are seeded on a small spiral around the origin. Every returned
/// center satisfies `|x| <= width/2 - r·f` and `|y| <= height/2 - r·f`; on an axis where the
/// cluster cannot fit at all, it is centered instead.
///
/// Runs do not share state, but the caller must not start a second run for the same batch
/// before the first resolves: which result wins is undefined. With an engine that never ends the
/// future never resolves; `CollideSimulation` is bounded by its `max_iterations`.
pub async fn resolve<S>(
    clusters: &[Cluster],
    canvas: Canvas,
    radius_factor: f64,
    engine: S,
) -> Result<Vec<Cluster>>
where
    S: Simulation,
{
    let radii: Vec<f64> = clusters.iter().map(|c| c.radius * radius_factor).collect();
    let bodies: Vec<Body> = clusters
        .iter()
        .zip(&radii)
        .enumerate()
        .map(|(i, (c, &radius))| match c.position {
            Some(p) => Body::at(p.x, p.y, radius),
            None => Body::seeded(i, radius),
        })
        .collect();

    let (tx, rx) = oneshot::channel::<Vec<Body>>();
    let tick_radii = radii.clone();
    engine.run(
        bodies,
        Box::new(move |bodies: &mut [Body]| clamp_inflated(bodies, &tick_radii, canvas)),
        Box::new(move |bodies: Vec<Body>| {
            // The receiver only disappears when the caller dropped the future.
            let _ = tx.send(bodies);
        }),
    );

    let mut bodies = rx.await.map_err(|_| Error::SimulationAborted)?;
    if bodies.len() != clusters.len() {
        return Err(Error::SimulationMismatch {
            expected: clusters.len(),
            actual: bodies.len(),
        });
    }
    clamp_inflated(&mut bodies, &radii, canvas);

    tracing::debug!(clusters = clusters.len(), "force layout resolved");
    Ok(clusters
        .iter()
        .zip(bodies)
        .map(|(c, b)| c.placed_at(b.x, b.y))
        .collect())
}

/// Restores each body's collision radius from `radii` and clamps it into the canvas.
///
/// The engine owns the bodies between ticks and may rewrite `radius`; the bound always comes from
/// the cluster itself.
fn clamp_inflated(bodies: &mut [Body], radii: &[f64], canvas: Canvas) {
    for (b, &radius) in bodies.iter_mut().zip(radii) {
        b.radius = radius;
    }
    clamp_all(bodies, canvas);
}

/// Keeps every body's inflated extent (its current `radius`) inside the canvas.
pub fn clamp_all(bodies: &mut [Body], canvas: Canvas) {
    for b in bodies {
        b.x = clamp_axis(b.x, canvas.half_width(), b.radius);
        b.y = clamp_axis(b.y, canvas.half_height(), b.radius);
    }
}

fn clamp_axis(v: f64, half: f64, radius: f64) -> f64 {
    let (lo, hi) = (-half + radius, half - radius);
    if !(lo <= hi) || v.is_nan() {
        return 0.0;
    }
    v.clamp(lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_axis_respects_inflated_bounds() {
        assert_eq!(clamp_axis(90.0, 50.0, 12.0), 38.0);
        assert_eq!(clamp_axis(-90.0, 50.0, 12.0), -38.0);
        assert_eq!(clamp_axis(5.0, 50.0, 12.0), 5.0);
    }

    #[test]
    fn clamp_inflated_ignores_radius_rewritten_by_the_engine() {
        let mut bodies = vec![Body::at(1000.0, -1000.0, 0.0)];
        clamp_inflated(&mut bodies, &[24.0], Canvas::new(100.0, 100.0));
        assert_eq!(bodies[0].radius, 24.0);
        assert_eq!((bodies[0].x, bodies[0].y), (26.0, -26.0));
    }

    #[test]
    fn clamp_axis_centers_what_cannot_fit() {
        assert_eq!(clamp_axis(3.0, 10.0, 11.0), 0.0);
        assert_eq!(clamp_axis(f64::NAN, 10.0, 1.0), 0.0);
        assert_eq!(clamp_axis(3.0, 0.0, 0.0), 0.0);
    }
}
