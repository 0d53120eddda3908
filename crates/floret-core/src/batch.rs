//! Builds every cluster of a grouping: spiral placement, extents and tessellation.

use crate::error::{Error, Result};
use crate::geom::max_abs_extent;
use crate::model::{Cluster, DataPoint, GroupingDescriptor, Record};
use crate::phyllotaxis::{self, PhyllotaxisOptions};
use crate::scale::RadiusScale;
use crate::tessellate::tessellate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchOptions {
    pub phyllotaxis: PhyllotaxisOptions,
    /// Id preceding the first generated point. Defaults to the largest record `id`.
    pub initial_last_id: Option<u64>,
}

/// Lays out one cluster per grouping value, in descriptor order.
///
/// Point ids are unique across the whole batch: the last id of each placement seeds the next.
pub fn build_clusters<S>(
    grouping: &GroupingDescriptor,
    records: &[Record],
    scale: &S,
    opts: &BatchOptions,
) -> Result<Vec<Cluster>>
where
    S: RadiusScale + ?Sized,
{
    let max_id = max_record_id(records)?;
    let mut last_id = opts.initial_last_id.unwrap_or(max_id);

    let groups = partition(grouping, records)?;
    let mut clusters = Vec::with_capacity(groups.len());
    for (idx, (value, members)) in groups.into_iter().enumerate() {
        let placement = phyllotaxis::place(&members, scale, last_id, &opts.phyllotaxis)?;
        last_id = placement.last_id;
        clusters.push(assemble(idx, value, &grouping.color, placement.points));
    }

    tracing::debug!(
        grouping = %grouping.name,
        clusters = clusters.len(),
        records = records.len(),
        last_id,
        "built cluster batch"
    );
    Ok(clusters)
}

fn assemble(id: usize, name: Value, color: &str, points: Vec<DataPoint>) -> Cluster {
    let radius = max_abs_extent(points.iter().filter(|p| p.draw).map(DataPoint::position));
    let outer_radius = max_abs_extent(points.iter().map(DataPoint::position));
    let length = points.iter().filter(|p| p.draw).count();

    let sites = points.iter().map(DataPoint::position).collect::<Vec<_>>();
    let cells = tessellate(outer_radius, &sites);
    let points = points
        .into_iter()
        .zip(cells)
        .map(|(p, cell)| DataPoint { cell, ..p })
        .collect();

    Cluster {
        id,
        name,
        color: color.to_string(),
        radius,
        outer_radius,
        points,
        length,
        position: None,
    }
}

/// Key under which a grouping value is matched.
///
/// Numbers compare by numeric value, so `1`, `1.0` and `-0.0`/`0` key alike; every other value
/// keys by its JSON text.
fn group_key(value: &Value) -> String {
    let Value::Number(n) = value else {
        return value.to_string();
    };
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => (f as i64).to_string(),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Splits records by grouping value, keeping descriptor order.
fn partition(
    grouping: &GroupingDescriptor,
    records: &[Record],
) -> Result<Vec<(Value, Vec<Record>)>> {
    let mut groups: IndexMap<String, (Value, Vec<Record>)> = IndexMap::new();
    for value in &grouping.values {
        let key = group_key(value);
        if groups.contains_key(&key) {
            return Err(Error::DuplicateGroupValue {
                value: value.clone(),
            });
        }
        groups.insert(key, (value.clone(), Vec::new()));
    }

    for record in records {
        let Some(value) = record.get(&grouping.name) else {
            continue;
        };
        if let Some((_, members)) = groups.get_mut(&group_key(value)) {
            members.push(record.clone());
        }
    }

    Ok(groups.into_values().collect())
}

/// Largest numeric `id` among the records, 0 when none carries one.
///
/// Numeric strings count, so `"12"` and `12` are treated alike. Integer ids are read exactly;
/// fractional ids are truncated.
pub fn max_record_id(records: &[Record]) -> Result<u64> {
    let mut max = 0u64;
    for record in records {
        let id = match record.get("id") {
            Some(Value::Number(n)) => {
                if let Some(u) = n.as_u64() {
                    max = max.max(u);
                    continue;
                }
                n.as_f64()
            }
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        let Some(id) = id.filter(|v| v.is_finite()) else {
            continue;
        };
        if id < 0.0 {
            return Err(Error::NegativeRecordId { id });
        }
        // Saturates at u64::MAX; placement then reports the overflow.
        max = max.max(id as u64);
    }
    Ok(max)
}
