//! Spiral placement of one cluster's points.
//!
//! Point `i` sits at angle `θ·i` and radius `spacing·√i + offset`, which packs points at a nearly
//! uniform density without any pairwise collision checks. A ring of padding points is appended
//! after the real ones so the tessellation has a densely packed, bounded outer edge.

use crate::error::{Error, Result};
use crate::model::{Cell, DataPoint, Record};
use crate::scale::RadiusScale;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Angular increment between consecutive spiral points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpiralAngle {
    /// `2π / φ`, φ = (1 + √5) / 2.
    Golden,
    /// `2π / (1 + √2)`.
    #[default]
    Silver,
    /// `2π / ((9 + √221) / 10)`.
    Tertiary,
    /// Explicit angle in radians.
    Custom(f64),
}

impl SpiralAngle {
    pub fn radians(self) -> f64 {
        match self {
            SpiralAngle::Golden => 2.0 * PI / ((1.0 + 5f64.sqrt()) / 2.0),
            SpiralAngle::Silver => 2.0 * PI / (1.0 + 2f64.sqrt()),
            SpiralAngle::Tertiary => 2.0 * PI / ((9.0 + 221f64.sqrt()) / 10.0),
            SpiralAngle::Custom(theta) => theta,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhyllotaxisOptions {
    /// Point radius in abstract units (scaled for `DataPoint::r`).
    pub point_radius: f64,
    /// Radius of the first spiral point; `None` means half of `point_radius`.
    pub radius_offset: Option<f64>,
    pub spacing: f64,
    pub angle: SpiralAngle,
}

impl Default for PhyllotaxisOptions {
    fn default() -> Self {
        Self {
            point_radius: 2.0,
            radius_offset: None,
            spacing: 2.5,
            angle: SpiralAngle::Silver,
        }
    }
}

impl PhyllotaxisOptions {
    pub fn radius_offset(&self) -> f64 {
        self.radius_offset.unwrap_or(self.point_radius / 2.0)
    }
}

/// Result of placing one cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Real points in record order, then padding points.
    pub points: Vec<DataPoint>,
    /// Highest id handed out; feed it into the next cluster's placement.
    pub last_id: u64,
}

/// Number of padding points needed to ring a spiral of `n` real points.
///
/// Returns 0 for an empty cluster and for any non-finite or non-positive intermediate value.
pub fn padding_count(n: usize, scaled_spacing: f64, scaled_offset: f64, point_radius: f64) -> usize {
    if n == 0 {
        return 0;
    }
    let final_radius = scaled_spacing * (n as f64).sqrt() + scaled_offset;
    let step = 2.0 * point_radius + scaled_spacing;
    if !final_radius.is_finite() || !step.is_finite() || step <= 0.0 {
        return 0;
    }
    let d = (2.0 * PI * final_radius / step).round();
    if d.is_finite() && d > 0.0 { d as usize } else { 0 }
}

/// Places `records` on a spiral, appending padding points, with ids starting at `last_id + 1`.
///
/// Fails with [`Error::IdOverflow`] when the ids would run past `u64::MAX`.
pub fn place<S>(
    records: &[Record],
    scale: &S,
    last_id: u64,
    opts: &PhyllotaxisOptions,
) -> Result<Placement>
where
    S: RadiusScale + ?Sized,
{
    let n = records.len();
    let scaled_spacing = scale.scale(opts.spacing);
    let scaled_offset = scale.scale(opts.radius_offset());
    let d = padding_count(n, scaled_spacing, scaled_offset, opts.point_radius);
    let theta = opts.angle.radians();
    let r = scale.scale(opts.point_radius);
    let count = n + d;
    let end_id = last_id
        .checked_add(count as u64)
        .ok_or(Error::IdOverflow { last_id, count })?;

    let slots = records
        .iter()
        .map(|rec| Some(rec.clone()))
        .chain(std::iter::repeat_n(None, d));

    let points = slots
        .enumerate()
        .map(|(i, record)| {
            let angle = theta * i as f64;
            let radius = scaled_spacing * (i as f64).sqrt() + scaled_offset;
            DataPoint {
                id: last_id + 1 + i as u64,
                draw: record.is_some(),
                x: angle.cos() * radius,
                y: angle.sin() * radius,
                r,
                within_cluster_index: i,
                cell: Cell::empty(),
                record,
            }
        })
        .collect::<Vec<_>>();

    tracing::trace!(real = n, padding = d, last_id, "phyllotaxis placement");

    Ok(Placement {
        points,
        last_id: end_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::IdentityScale;
    use serde_json::json;

    fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| {
                let serde_json::Value::Object(m) = json!({ "id": i, "label": format!("r{i}") })
                else {
                    unreachable!()
                };
                m
            })
            .collect()
    }

    #[test]
    fn default_angle_is_silver_ratio() {
        let theta = PhyllotaxisOptions::default().angle.radians();
        assert!((theta - 2.0 * PI / (1.0 + 2f64.sqrt())).abs() < 1e-15);
    }

    #[test]
    fn padding_count_matches_formula() {
        // n = 4: final radius = 2.5 * 2 + 1 = 6; 2π·6 / 6.5 ≈ 5.8 → 6.
        assert_eq!(padding_count(4, 2.5, 1.0, 2.0), 6);
    }

    #[test]
    fn padding_count_guards_degenerate_inputs() {
        assert_eq!(padding_count(0, 2.5, 1.0, 2.0), 0);
        assert_eq!(padding_count(5, 0.0, 1.0, 0.0), 0);
        assert_eq!(padding_count(5, f64::NAN, 1.0, 2.0), 0);
        assert_eq!(padding_count(5, -10.0, 1.0, 2.0), 0);
    }

    #[test]
    fn place_orders_real_points_first_and_threads_ids() {
        let recs = records(4);
        let out = place(&recs, &IdentityScale, 10, &PhyllotaxisOptions::default())
            .expect("placement");
        assert_eq!(out.points.len(), 4 + 6);
        assert_eq!(out.last_id, 10 + 10);
        assert!(out.points[..4].iter().all(|p| p.draw && p.record.is_some()));
        assert!(out.points[4..].iter().all(|p| !p.draw && p.record.is_none()));
        let ids: Vec<u64> = out.points.iter().map(|p| p.id).collect();
        assert_eq!(ids, (11..=20).collect::<Vec<_>>());
        assert_eq!(out.points[2].record.as_ref(), Some(&recs[2]));
    }

    #[test]
    fn first_point_sits_at_offset_on_the_x_axis() {
        let out = place(&records(1), &IdentityScale, 0, &PhyllotaxisOptions::default())
            .expect("placement");
        let p0 = &out.points[0];
        assert_eq!(p0.x, 1.0);
        assert_eq!(p0.y, 0.0);
        assert_eq!(p0.r, 2.0);
        assert_eq!(p0.within_cluster_index, 0);
    }

    #[test]
    fn scale_applies_to_spacing_offset_and_point_radius() {
        let scale = |v: f64| v * 3.0;
        let out = place(&records(2), &scale, 0, &PhyllotaxisOptions::default())
            .expect("placement");
        assert_eq!(out.points[0].x, 3.0);
        assert_eq!(out.points[0].r, 6.0);
        let p1 = &out.points[1];
        let radius = (p1.x * p1.x + p1.y * p1.y).sqrt();
        assert!((radius - (7.5 + 3.0)).abs() < 1e-12);
    }

    #[test]
    fn empty_input_produces_no_points() {
        let out = place(&[], &IdentityScale, 7, &PhyllotaxisOptions::default())
            .expect("placement");
        assert!(out.points.is_empty());
        assert_eq!(out.last_id, 7);
    }

    #[test]
    fn ids_that_would_pass_u64_max_are_rejected() {
        let opts = PhyllotaxisOptions::default();
        let err = place(&records(4), &IdentityScale, u64::MAX - 5, &opts).unwrap_err();
        assert!(matches!(
            err,
            Error::IdOverflow {
                last_id,
                count: 10
            } if last_id == u64::MAX - 5
        ));

        // Exactly enough room: the last id lands on u64::MAX.
        let out = place(&records(4), &IdentityScale, u64::MAX - 10, &opts).expect("placement");
        assert_eq!(out.last_id, u64::MAX);
        assert_eq!(out.points.last().map(|p| p.id), Some(u64::MAX));

        let empty = place(&[], &IdentityScale, u64::MAX, &opts).expect("placement");
        assert_eq!(empty.last_id, u64::MAX);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts: PhyllotaxisOptions =
            serde_json::from_str(r#"{"spacing": 3.0, "angle": "golden"}"#).expect("json");
        assert_eq!(opts.spacing, 3.0);
        assert_eq!(opts.point_radius, 2.0);
        assert_eq!(opts.radius_offset(), 1.0);
        assert_eq!(opts.angle, SpiralAngle::Golden);
    }
}
