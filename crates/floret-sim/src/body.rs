use std::f64::consts::PI;

/// A circular body moved by the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Collision radius.
    pub radius: f64,
}

impl Body {
    const SEED_RADIUS: f64 = 10.0;

    pub fn at(x: f64, y: f64, radius: f64) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            radius,
        }
    }

    /// Body without a tentative position, seeded on a sunflower spiral by `index` so that
    /// unplaced bodies never start on top of each other.
    pub fn seeded(index: usize, radius: f64) -> Self {
        let angle = PI * (3.0 - 5f64.sqrt());
        let r = Self::SEED_RADIUS * (0.5 + index as f64).sqrt();
        let a = index as f64 * angle;
        Self::at(r * a.cos(), r * a.sin(), radius)
    }
}

#[cfg(test)]
mod tests {
    use super::Body;

    #[test]
    fn seeded_bodies_are_distinct() {
        let a = Body::seeded(0, 1.0);
        let b = Body::seeded(1, 1.0);
        assert!((a.x - b.x).abs() + (a.y - b.y).abs() > 1.0);
        assert_eq!(a.vx, 0.0);
    }
}
