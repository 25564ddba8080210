//! # Stirrup Generator
//!
//! Walks every zone and synthesizes one stirrup per station. Outside an
//! opening the stirrup is the closed I-shaped polygon: an outer rectangle
//! confined to the flange band at `±y_outer` plus an inner rectangle spanning
//! the full height at `±y_inner`, joined into a single non-self-intersecting
//! loop of exactly 10 nodes and 10 segments.
//!
//! ```text
//!             n8 ───── n7                 z_top
//!             │         │
//!             │ inner   │
//!             │ (long)  │
//!  n10 ────── n9        n6 ────── n5      z_flange_top (left/right)
//!   │ outer               outer   │
//!   │ (short)            (short)  │
//!  n1 ── n2 ───────────── n3 ─── n4       z_bottom
//! -y_outer -y_inner   +y_inner +y_outer
//! ```
//!
//! Inside an opening's padded extent the vertical band is clipped to the
//! sub-bands the opening leaves free: a rectangular web-width ring above the
//! opening and one below. A sub-band squeezed empty is skipped and counted —
//! expected inside the void, asserted zero everywhere else.

use serde::{Deserialize, Serialize};

use crate::errors::RebarResult;
use crate::graph::{GeometryGraph, NodeId, SegmentRole};
use crate::params::{BeamParams, TOLERANCE};
use crate::section::{self, SectionProfile};
use crate::verify::{Severity, VerificationLedger};
use crate::zones::Zone;

/// Counters produced by the stirrup pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StirrupSummary {
    /// Stations visited across all zones
    pub stations: usize,
    /// Full I-shaped stirrups emitted
    pub full_stirrups: usize,
    /// Clipped ring bands emitted inside opening extents
    pub ring_bands: usize,
    /// Sub-bands skipped inside opening voids (expected, advisory)
    pub bands_skipped_in_void: usize,
    /// Empty/inverted bands found outside any void (must be zero)
    pub bad_bands_outside_void: usize,
}

/// Station list for one zone: multiples of the zone spacing from the entry
/// boundary. The exit boundary is owned by the following zone; the final zone
/// also emits it so both beam ends carry a stirrup.
fn zone_stations(zone: &Zone, is_last: bool, out: &mut Vec<(f64, usize)>, zone_idx: usize) {
    let mut x = zone.x_start;
    while x < zone.x_end - TOLERANCE {
        out.push((x, zone_idx));
        x += zone.stirrup_spacing;
    }
    if is_last {
        out.push((zone.x_end, zone_idx));
    }
}

/// Generate all stirrups for the pass.
///
/// Stations are clamped into `[cover, L - cover]` so no stirrup plane
/// coincides with a beam end face.
pub fn generate(
    params: &BeamParams,
    zones: &[Zone],
    graph: &mut GeometryGraph,
    ledger: &mut VerificationLedger,
) -> RebarResult<StirrupSummary> {
    let cover = params.geometry.cover;
    let length = params.geometry.length;

    let mut stations: Vec<(f64, usize)> = Vec::new();
    for (i, zone) in zones.iter().enumerate() {
        zone_stations(zone, i + 1 == zones.len(), &mut stations, i);
    }
    for station in &mut stations {
        station.0 = station.0.clamp(cover, length - cover);
    }
    stations.dedup_by(|a, b| (a.0 - b.0).abs() < TOLERANCE);

    let mut summary = StirrupSummary::default();

    for &(x, zone_idx) in &stations {
        summary.stations += 1;
        let profile = section::resolve(&params.geometry, x)?;

        ledger.check(
            format!("stirrup.cover_bottom@{x:.1}"),
            cover,
            profile.z_bottom,
            TOLERANCE,
            Severity::Strict,
        )?;
        ledger.check(
            format!("stirrup.cover_top@{x:.1}"),
            params.geometry.height - cover,
            profile.z_top,
            TOLERANCE,
            Severity::Strict,
        )?;

        let zone = &zones[zone_idx];
        let intruding = params.holes.iter().find(|h| h.contains_station(x));
        match intruding {
            Some(hole) => {
                // Clipped ring bands above and below the opening
                let bands = [
                    (profile.z_bottom, hole.z_min - cover),
                    (hole.z_max + cover, profile.z_top),
                ];
                for (z_low, z_high) in bands {
                    if z_high - z_low > TOLERANCE {
                        emit_ring(graph, x, profile.y_inner, z_low, z_high, zone.stirrup_diameter);
                        summary.ring_bands += 1;
                    } else {
                        summary.bands_skipped_in_void += 1;
                    }
                }
            }
            None => {
                if profile.z_top - profile.z_bottom <= TOLERANCE || zone.hole.is_some() {
                    // Station bookkeeping disagrees with the opening extents
                    summary.bad_bands_outside_void += 1;
                    continue;
                }
                emit_i_stirrup(graph, x, &profile, zone.stirrup_diameter, zone.stirrup_legs);
                summary.full_stirrups += 1;
            }
        }
    }

    if summary.bands_skipped_in_void > 0 {
        ledger.advisory(
            "stirrup.bands_skipped_in_void",
            0.0,
            summary.bands_skipped_in_void as f64,
            0.5,
        );
    }
    ledger.check(
        "stirrup.bad_z_band_outside_void",
        0.0,
        summary.bad_bands_outside_void as f64,
        0.5,
        Severity::Strict,
    )?;

    Ok(summary)
}

/// Emit the closed 10-node I-polygon at station `x`, plus any intermediate
/// web legs when the zone calls for more than two.
fn emit_i_stirrup(graph: &mut GeometryGraph, x: f64, p: &SectionProfile, diameter: f64, legs: usize) {
    let n1 = graph.add_node(x, -p.y_outer, p.z_bottom);
    let n2 = graph.add_node(x, -p.y_inner, p.z_bottom);
    let n3 = graph.add_node(x, p.y_inner, p.z_bottom);
    let n4 = graph.add_node(x, p.y_outer, p.z_bottom);
    let n5 = graph.add_node(x, p.y_outer, p.z_flange_top_right);
    let n6 = graph.add_node(x, p.y_inner, p.z_flange_top_right);
    let n7 = graph.add_node(x, p.y_inner, p.z_top);
    let n8 = graph.add_node(x, -p.y_inner, p.z_top);
    let n9 = graph.add_node(x, -p.y_inner, p.z_flange_top_left);
    let n10 = graph.add_node(x, -p.y_outer, p.z_flange_top_left);

    use SegmentRole::*;
    let loop_edges: [(NodeId, NodeId, SegmentRole); 10] = [
        (n1, n2, StirrupChord),    // bottom, left third
        (n2, n3, StirrupChord),    // bottom, web third
        (n3, n4, StirrupChord),    // bottom, right third
        (n4, n5, StirrupOuterLeg), // right outer short leg
        (n5, n6, StirrupChord),    // right flange-top chord
        (n6, n7, StirrupInnerLeg), // right inner long leg
        (n7, n8, StirrupChord),    // top chord
        (n8, n9, StirrupInnerLeg), // left inner long leg
        (n9, n10, StirrupChord),   // left flange-top chord
        (n10, n1, StirrupOuterLeg), // left outer short leg, closes the loop
    ];
    for (a, b, role) in loop_edges {
        graph.add_segment(a, b, role, diameter);
    }

    // Intermediate full-height web legs, evenly spaced between the inner pair
    let extra = legs.saturating_sub(2);
    for k in 1..=extra {
        let y = -p.y_inner + 2.0 * p.y_inner * k as f64 / (extra + 1) as f64;
        let a = graph.add_node(x, y, p.z_bottom);
        let b = graph.add_node(x, y, p.z_top);
        graph.add_segment(a, b, StirrupInnerLeg, diameter);
    }
}

/// Emit a rectangular web-width ring between `z_low` and `z_high`
fn emit_ring(graph: &mut GeometryGraph, x: f64, y_inner: f64, z_low: f64, z_high: f64, diameter: f64) {
    let a = graph.add_node(x, -y_inner, z_low);
    let b = graph.add_node(x, y_inner, z_low);
    let c = graph.add_node(x, y_inner, z_high);
    let d = graph.add_node(x, -y_inner, z_high);
    graph.add_segment(a, b, SegmentRole::StirrupRing, diameter);
    graph.add_segment(b, c, SegmentRole::StirrupRing, diameter);
    graph.add_segment(c, d, SegmentRole::StirrupRing, diameter);
    graph.add_segment(d, a, SegmentRole::StirrupRing, diameter);
}
