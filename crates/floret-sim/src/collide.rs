//! Default engine: centering pull plus pairwise circle collision.

use crate::body::Body;
use crate::options::SimulationOptions;
use crate::{EndFn, Simulation, TickFn};

#[derive(Debug, Clone, Default)]
pub struct CollideSimulation {
    pub options: SimulationOptions,
}

/// Outcome of a run, reported through `tracing`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RunStats {
    pub iterations: usize,
    pub converged: bool,
}

impl CollideSimulation {
    pub fn new(options: SimulationOptions) -> Self {
        Self { options }
    }

    /// Runs to completion on the calling thread.
    pub fn run_blocking(
        &self,
        bodies: &mut [Body],
        mut on_tick: impl FnMut(&mut [Body]),
    ) -> RunStats {
        let opts = &self.options;
        let mut rng = XorShift64Star::new(opts.random_seed);
        let mut alpha = 1.0_f64;
        let mut stats = RunStats::default();

        while stats.iterations < opts.max_iterations {
            alpha += (0.0 - alpha) * opts.alpha_decay;
            self.step(bodies, alpha, &mut rng);
            on_tick(bodies);
            stats.iterations += 1;
            if alpha < opts.alpha_min {
                stats.converged = true;
                break;
            }
        }
        stats
    }

    fn step(&self, bodies: &mut [Body], alpha: f64, rng: &mut XorShift64Star) {
        let opts = &self.options;
        let k = opts.center_strength * alpha;
        for b in bodies.iter_mut() {
            b.vx -= b.x * k;
            b.vy -= b.y * k;
        }

        apply_collisions(bodies, opts.collide_strength, rng);

        let keep = 1.0 - opts.velocity_decay;
        for b in bodies.iter_mut() {
            b.vx *= keep;
            b.vy *= keep;
            b.x += b.vx;
            b.y += b.vy;
        }
    }
}

impl Simulation for CollideSimulation {
    fn run(self, mut bodies: Vec<Body>, mut on_tick: TickFn, on_end: EndFn) {
        let start = std::time::Instant::now();
        let stats = self.run_blocking(&mut bodies, |b| on_tick(b));
        tracing::debug!(
            bodies = bodies.len(),
            iterations = stats.iterations,
            converged = stats.converged,
            elapsed = ?start.elapsed(),
            "collide simulation finished"
        );
        on_end(bodies);
    }
}

/// Pushes overlapping pairs apart along their center line, using positions predicted from the
/// current velocities. Larger bodies move less.
fn apply_collisions(bodies: &mut [Body], strength: f64, rng: &mut XorShift64Star) {
    let n = bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = (bodies[i], bodies[j]);
            let r = a.radius + b.radius;
            if r <= 0.0 {
                continue;
            }
            let mut dx = (a.x + a.vx) - (b.x + b.vx);
            let mut dy = (a.y + a.vy) - (b.y + b.vy);
            let mut l = dx * dx + dy * dy;
            if l >= r * r {
                continue;
            }
            if dx == 0.0 {
                dx = rng.jiggle();
                l += dx * dx;
            }
            if dy == 0.0 {
                dy = rng.jiggle();
                l += dy * dy;
            }
            let l_sqrt = l.sqrt();
            let push = (r - l_sqrt) / l_sqrt * strength;
            dx *= push;
            dy *= push;
            let (ra2, rb2) = (a.radius * a.radius, b.radius * b.radius);
            let w = rb2 / (ra2 + rb2);
            bodies[i].vx += dx * w;
            bodies[i].vy += dy * w;
            bodies[j].vx -= dx * (1.0 - w);
            bodies[j].vy -= dy * (1.0 - w);
        }
    }
}

#[derive(Debug, Clone)]
struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D_u64)
    }

    fn next_f64_unit(&mut self) -> f64 {
        // [0, 1) with 53 bits of precision.
        let u = self.next_u64() >> 11;
        (u as f64) / ((1u64 << 53) as f64)
    }

    /// Tiny non-zero offset used to separate coincident centers.
    fn jiggle(&mut self) -> f64 {
        let v = (self.next_f64_unit() - 0.5) * 1e-6;
        if v == 0.0 { 1e-9 } else { v }
    }
}
