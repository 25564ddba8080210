//! # Zone Partitioner
//!
//! Converts the length-wise spacing rules and opening positions into an
//! ordered, gap-free, non-overlapping sequence of longitudinal zones covering
//! `[0, L]`. Zones are produced once per pass and consumed read-only by every
//! downstream generator.
//!
//! Classification precedence: opening-local > dense > ordinary. Dense bands
//! seeded at both supports and at both edges of every opening are unioned
//! before sorting, so an opening sitting inside a support's dense zone, or
//! two openings whose bands touch, collapse into single intervals instead of
//! fragmenting the cover.

use serde::{Deserialize, Serialize};

use crate::errors::{RebarError, RebarResult};
use crate::params::{BeamParams, TOLERANCE};

/// Reinforcement regime over a longitudinal interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    /// Densified stirrup spacing near a support or opening edge
    Dense,
    /// Ordinary mid-span spacing
    Ordinary,
    /// The literal extent of an opening; stirrups here are clipped ring bands
    OpeningLocal,
}

/// One half-open longitudinal interval `[x_start, x_end)` with its active
/// regime parameters. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub x_start: f64,
    pub x_end: f64,
    pub kind: ZoneKind,
    /// Stirrup spacing active over this interval (mm)
    pub stirrup_spacing: f64,
    /// Stirrup bar diameter active over this interval (mm)
    pub stirrup_diameter: f64,
    /// Vertical stirrup leg count active over this interval
    pub stirrup_legs: usize,
    /// Index into `BeamParams::holes` for opening-local zones
    pub hole: Option<usize>,
}

impl Zone {
    pub fn width(&self) -> f64 {
        self.x_end - self.x_start
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.x_start - TOLERANCE && x < self.x_end
    }
}

/// Closed interval union helper for the dense bands
fn union_bands(mut bands: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    bands.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut merged: Vec<(f64, f64)> = Vec::with_capacity(bands.len());
    for (start, end) in bands {
        match merged.last_mut() {
            Some(last) if start <= last.1 + TOLERANCE => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

fn in_any(bands: &[(f64, f64)], x: f64) -> bool {
    bands.iter().any(|&(a, b)| x > a - TOLERANCE && x < b + TOLERANCE)
}

/// Partition `[0, L]` into zones.
///
/// Fails with a `Configuration` error if the dense-zone length is
/// non-positive, if any opening extends outside the beam, or if two openings
/// overlap — all before any zone is produced.
pub fn partition(params: &BeamParams) -> RebarResult<Vec<Zone>> {
    let length = params.geometry.length;
    let dense_len = params.stirrups.dense_zone_length;

    if dense_len <= 0.0 {
        return Err(RebarError::configuration(
            "stirrups.dense_zone_length",
            dense_len.to_string(),
            "Dense-zone length must be positive",
        ));
    }
    for (i, hole) in params.holes.iter().enumerate() {
        if hole.x_start <= 0.0 || hole.x_end >= length || hole.width() <= 0.0 {
            return Err(RebarError::configuration(
                format!("holes[{i}]"),
                format!("[{}, {}]", hole.x_start, hole.x_end),
                "Opening must lie strictly inside the beam length",
            ));
        }
        for (j, other) in params.holes.iter().enumerate().skip(i + 1) {
            if hole.overlaps(other) {
                return Err(RebarError::configuration(
                    format!("holes[{i}]"),
                    format!("[{}, {}]", hole.x_start, hole.x_end),
                    format!("Opening overlaps holes[{j}]"),
                ));
            }
        }
    }

    let clamp = |v: f64| v.clamp(0.0, length);

    // Support dense bands plus one band off each opening edge
    let mut dense_bands = vec![(0.0, clamp(dense_len)), (clamp(length - dense_len), length)];
    for hole in &params.holes {
        dense_bands.push((clamp(hole.x_start - dense_len), hole.x_start));
        dense_bands.push((hole.x_end, clamp(hole.x_end + dense_len)));
    }
    let dense_bands = union_bands(dense_bands);

    // Boundary coordinates: beam ends, dense band edges, opening edges
    let mut cuts = vec![0.0, length];
    for &(a, b) in &dense_bands {
        cuts.push(a);
        cuts.push(b);
    }
    for hole in &params.holes {
        cuts.push(hole.x_start);
        cuts.push(hole.x_end);
    }
    cuts.sort_by(|a, b| a.total_cmp(b));
    cuts.dedup_by(|a, b| (*a - *b).abs() < TOLERANCE);

    let mut zones = Vec::with_capacity(cuts.len());
    for pair in cuts.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if b - a < TOLERANCE {
            continue;
        }
        let mid = 0.5 * (a + b);

        let hole = params
            .holes
            .iter()
            .position(|h| mid > h.x_start - TOLERANCE && mid < h.x_end + TOLERANCE);
        let stirrups = &params.stirrups;
        let (kind, spacing, diameter, legs) = match hole {
            Some(i) => {
                let ring = params.holes[i].ring_spacing;
                let spacing = if ring > 0.0 { ring } else { stirrups.dense_spacing };
                (ZoneKind::OpeningLocal, spacing, stirrups.dense_bar_diameter(), stirrups.dense_legs)
            }
            None if in_any(&dense_bands, mid) => (
                ZoneKind::Dense,
                stirrups.dense_spacing,
                stirrups.dense_bar_diameter(),
                stirrups.dense_legs,
            ),
            None => (
                ZoneKind::Ordinary,
                stirrups.normal_spacing,
                stirrups.normal_bar_diameter(),
                stirrups.normal_legs,
            ),
        };

        zones.push(Zone {
            x_start: a,
            x_end: b,
            kind,
            stirrup_spacing: spacing,
            stirrup_diameter: diameter,
            stirrup_legs: legs,
            hole,
        });
    }

    Ok(zones)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{
        BeamParams, FlangeSide, GeometryParams, HoleSpec, LongitudinalParams, StirrupParams,
    };

    fn params_with_holes(holes: Vec<HoleSpec>) -> BeamParams {
        BeamParams {
            geometry: GeometryParams {
                length: 10000.0,
                height: 800.0,
                web_width: 250.0,
                flange_left: FlangeSide { overhang: 200.0, thickness: 150.0 },
                flange_right: FlangeSide { overhang: 200.0, thickness: 150.0 },
                precast_height: 500.0,
                cover: 25.0,
            },
            stirrups: StirrupParams {
                diameter: 10.0,
                dense_diameter: None,
                normal_diameter: None,
                dense_legs: 2,
                normal_legs: 2,
                dense_spacing: 100.0,
                normal_spacing: 200.0,
                dense_zone_length: 1500.0,
            },
            longitudinal: LongitudinalParams::default(),
            holes,
            prestress: None,
        }
    }

    fn hole(x_start: f64, x_end: f64) -> HoleSpec {
        HoleSpec {
            x_start,
            x_end,
            z_min: 150.0,
            z_max: 500.0,
            corner_bar_diameter: 16.0,
            ring_spacing: 0.0,
            anchorage: 300.0,
        }
    }

    fn assert_covers_beam(zones: &[Zone], length: f64) {
        assert!((zones[0].x_start).abs() < TOLERANCE);
        assert!((zones.last().unwrap().x_end - length).abs() < TOLERANCE);
        for pair in zones.windows(2) {
            assert!(
                (pair[0].x_end - pair[1].x_start).abs() < TOLERANCE,
                "gap between {:?} and {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_no_holes_three_zones() {
        let zones = partition(&params_with_holes(vec![])).unwrap();
        assert_eq!(zones.len(), 3);
        assert_eq!(zones[0].kind, ZoneKind::Dense);
        assert_eq!(zones[1].kind, ZoneKind::Ordinary);
        assert_eq!(zones[2].kind, ZoneKind::Dense);
        assert_eq!(zones[0].x_end, 1500.0);
        assert_eq!(zones[2].x_start, 8500.0);
        assert_eq!(zones[1].stirrup_spacing, 200.0);
        assert_covers_beam(&zones, 10000.0);
    }

    #[test]
    fn test_mid_span_hole_adds_local_and_dense_zones() {
        let zones = partition(&params_with_holes(vec![hole(4000.0, 4600.0)])).unwrap();
        // dense | ordinary | dense | opening | dense | ordinary | dense
        assert_eq!(zones.len(), 7);
        assert_eq!(zones[3].kind, ZoneKind::OpeningLocal);
        assert_eq!(zones[3].x_start, 4000.0);
        assert_eq!(zones[3].x_end, 4600.0);
        assert_eq!(zones[3].hole, Some(0));
        assert_eq!(zones[2].kind, ZoneKind::Dense);
        assert_eq!(zones[2].x_start, 2500.0);
        assert_eq!(zones[4].x_end, 6100.0);
        assert_covers_beam(&zones, 10000.0);
    }

    #[test]
    fn test_hole_inside_support_dense_zone_merges_bands() {
        let zones = partition(&params_with_holes(vec![hole(600.0, 1000.0)])).unwrap();
        // The opening's left band reaches x=0 and merges with the support band
        assert_eq!(zones[0].kind, ZoneKind::Dense);
        assert_eq!(zones[0].x_start, 0.0);
        assert_eq!(zones[0].x_end, 600.0);
        assert_eq!(zones[1].kind, ZoneKind::OpeningLocal);
        // Right band [1000, 2500] joins the remaining support band [0, 1500]
        assert_eq!(zones[2].kind, ZoneKind::Dense);
        assert_eq!(zones[2].x_end, 2500.0);
        assert_covers_beam(&zones, 10000.0);
    }

    #[test]
    fn test_touching_dense_bands_between_two_holes() {
        // Gap between holes is 2600 < 2*1500, so the bands overlap and merge
        let zones =
            partition(&params_with_holes(vec![hole(3000.0, 3400.0), hole(6000.0, 6400.0)])).unwrap();
        let between: Vec<_> = zones
            .iter()
            .filter(|z| z.x_start >= 3400.0 - TOLERANCE && z.x_end <= 6000.0 + TOLERANCE)
            .collect();
        assert_eq!(between.len(), 1);
        assert_eq!(between[0].kind, ZoneKind::Dense);
        assert_covers_beam(&zones, 10000.0);
    }

    #[test]
    fn test_per_zone_diameter_and_legs() {
        let mut params = params_with_holes(vec![hole(4000.0, 4600.0)]);
        params.stirrups.dense_diameter = Some(12.0);
        params.stirrups.dense_legs = 4;
        let zones = partition(&params).unwrap();
        for zone in &zones {
            match zone.kind {
                ZoneKind::Ordinary => {
                    assert_eq!(zone.stirrup_diameter, 10.0);
                    assert_eq!(zone.stirrup_legs, 2);
                }
                // Opening-local zones share the dense regime's bar rules
                ZoneKind::Dense | ZoneKind::OpeningLocal => {
                    assert_eq!(zone.stirrup_diameter, 12.0);
                    assert_eq!(zone.stirrup_legs, 4);
                }
            }
        }
    }

    #[test]
    fn test_ring_spacing_overrides_dense_spacing() {
        let mut h = hole(4000.0, 4600.0);
        h.ring_spacing = 75.0;
        let zones = partition(&params_with_holes(vec![h])).unwrap();
        let local = zones.iter().find(|z| z.kind == ZoneKind::OpeningLocal).unwrap();
        assert_eq!(local.stirrup_spacing, 75.0);
    }

    #[test]
    fn test_overlapping_holes_rejected() {
        let err = partition(&params_with_holes(vec![hole(4000.0, 4600.0), hole(4500.0, 5200.0)]))
            .unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION");
    }

    #[test]
    fn test_hole_outside_beam_rejected() {
        let err = partition(&params_with_holes(vec![hole(9800.0, 10200.0)])).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION");
    }

    #[test]
    fn test_zone_membership_is_half_open() {
        let zones = partition(&params_with_holes(vec![])).unwrap();
        assert!(zones[0].contains(0.0));
        assert!(zones[0].contains(1499.9));
        assert!(!zones[0].contains(1500.0));
        assert!(zones[1].contains(1500.0));
        // Exactly one zone owns any interior station
        for x in [0.0, 750.0, 1500.0, 5000.0, 8500.0, 9999.0] {
            assert_eq!(zones.iter().filter(|z| z.contains(x)).count(), 1);
        }
    }

    #[test]
    fn test_zones_pairwise_disjoint() {
        let zones = partition(&params_with_holes(vec![hole(2000.0, 2400.0)])).unwrap();
        for pair in zones.windows(2) {
            assert!(pair[0].x_end <= pair[1].x_start + TOLERANCE);
        }
        let total: f64 = zones.iter().map(Zone::width).sum();
        assert!((total - 10000.0).abs() < 1e-9);
    }
}
