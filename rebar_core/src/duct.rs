//! # Prestress Duct Router
//!
//! Routes the post-tension duct centerline through the web, or records the
//! pretension anchor points when no physical duct exists.
//!
//! The duct axis runs straight at `(y_offset, H/2 + z_offset)` from
//! `x = end_inset` to `x = L - end_inset`, subdivided into
//! [`DUCT_SUBDIVISIONS`] segments. Containment is verified as zero-violation
//! checks: the duct envelope must stay inside the cover-reduced web (STRICT),
//! clear of every opening's padded extent (STRICT), and inside the precast
//! layer (advisory, since a duct reaching into the topping is detailed
//! differently rather than rejected).

use serde::{Deserialize, Serialize};

use crate::errors::RebarResult;
use crate::graph::{GeometryGraph, SegmentRole};
use crate::params::{BeamParams, PrestressMethod, HOLE_EDGE_CLEARANCE, TOLERANCE};
use crate::verify::{Severity, VerificationLedger};

/// Number of collinear segments along the duct centerline
pub const DUCT_SUBDIVISIONS: usize = 10;

/// Outcome of the duct pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DuctSummary {
    /// Prestress method, if any prestress was configured
    pub method: Option<PrestressMethod>,
    /// Centerline segments emitted (post-tension only)
    pub segments: usize,
    /// Anchor nodes recorded at the beam end faces (pretension only)
    pub anchor_nodes: usize,
    /// Resolved duct axis height above the soffit (mm)
    pub z_axis: f64,
}

/// Route the duct (or anchors) for the pass.
pub fn route(
    params: &BeamParams,
    graph: &mut GeometryGraph,
    ledger: &mut VerificationLedger,
) -> RebarResult<DuctSummary> {
    let Some(duct) = &params.prestress else {
        return Ok(DuctSummary::default());
    };

    let geometry = &params.geometry;
    let y = duct.y_offset;
    let z = geometry.height / 2.0 + duct.z_offset;
    let radius = duct.effective_diameter() / 2.0;

    let mut summary = DuctSummary {
        method: Some(duct.method),
        segments: 0,
        anchor_nodes: 0,
        z_axis: z,
    };

    if duct.method == PrestressMethod::Pretension {
        // No duct in the section; only the force application points exist
        graph.add_node(0.0, y, z);
        graph.add_node(geometry.length, y, z);
        summary.anchor_nodes = 2;
        return Ok(summary);
    }

    // Envelope inside the cover-reduced web
    let web_limit = geometry.web_width / 2.0 - geometry.cover;
    let web_violation = (y.abs() + radius - web_limit).max(0.0);
    ledger.check("duct.within_web", 0.0, web_violation, TOLERANCE, Severity::Strict)?;

    let x0 = duct.end_inset;
    let x1 = geometry.length - duct.end_inset;

    // Vertical clearance against every opening the duct runs past
    for (i, hole) in params.holes.iter().enumerate() {
        if x1 <= hole.x_start - HOLE_EDGE_CLEARANCE || x0 >= hole.x_end + HOLE_EDGE_CLEARANCE {
            continue;
        }
        let overlap = (z + radius).min(hole.z_max + HOLE_EDGE_CLEARANCE)
            - (z - radius).max(hole.z_min - HOLE_EDGE_CLEARANCE);
        ledger.check(
            format!("duct.avoid_hole[{i}]"),
            0.0,
            overlap.max(0.0),
            TOLERANCE,
            Severity::Strict,
        )?;
    }

    ledger.check("duct.end_inset", duct.end_inset, x0, TOLERANCE, Severity::Strict)?;
    ledger.check(
        "duct.end_inset_far",
        duct.end_inset,
        geometry.length - x1,
        TOLERANCE,
        Severity::Strict,
    )?;

    // A duct reaching into the cast-in-place topping is flagged, not rejected
    let precast_violation = (z + radius - geometry.precast_height).max(0.0);
    ledger.advisory("duct.within_precast", 0.0, precast_violation, TOLERANCE);

    let dx = (x1 - x0) / DUCT_SUBDIVISIONS as f64;
    let mut prev = graph.add_node(x0, y, z);
    for k in 1..=DUCT_SUBDIVISIONS {
        let x = if k == DUCT_SUBDIVISIONS { x1 } else { x0 + k as f64 * dx };
        let next = graph.add_node(x, y, z);
        graph.add_segment(prev, next, SegmentRole::DuctCenterline, duct.diameter);
        prev = next;
        summary.segments += 1;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RebarError;
    use crate::params::{
        DuctSpec, FlangeSide, GeometryParams, HoleSpec, LongitudinalParams, StirrupParams,
    };

    fn params(prestress: Option<DuctSpec>, holes: Vec<HoleSpec>) -> BeamParams {
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
            prestress,
        }
    }

    fn post_tension() -> DuctSpec {
        DuctSpec {
            method: PrestressMethod::PostTension,
            diameter: 80.0,
            y_offset: 0.0,
            z_offset: -150.0,
            end_inset: 500.0,
            force: 1.0e6,
        }
    }

    #[test]
    fn test_post_tension_centerline() {
        let p = params(Some(post_tension()), vec![]);
        let mut graph = GeometryGraph::new();
        let mut ledger = VerificationLedger::new();
        let summary = route(&p, &mut graph, &mut ledger).unwrap();
        assert_eq!(summary.method, Some(PrestressMethod::PostTension));
        assert_eq!(summary.segments, DUCT_SUBDIVISIONS);
        assert_eq!(graph.node_count(), DUCT_SUBDIVISIONS + 1);
        assert!((summary.z_axis - 250.0).abs() < TOLERANCE);
        // Endpoints inset from the end faces
        assert!((graph.nodes[0].x - 500.0).abs() < TOLERANCE);
        assert!((graph.nodes.last().unwrap().x - 9500.0).abs() < TOLERANCE);
        assert!(ledger.passed());
    }

    #[test]
    fn test_pretension_has_anchors_only() {
        let mut duct = post_tension();
        duct.method = PrestressMethod::Pretension;
        let p = params(Some(duct), vec![]);
        let mut graph = GeometryGraph::new();
        let mut ledger = VerificationLedger::new();
        let summary = route(&p, &mut graph, &mut ledger).unwrap();
        assert_eq!(summary.segments, 0);
        assert_eq!(summary.anchor_nodes, 2);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.segment_count(), 0);
        assert_eq!(graph.nodes[0].x, 0.0);
        assert_eq!(graph.nodes[1].x, 10000.0);
    }

    #[test]
    fn test_no_prestress_is_a_no_op() {
        let p = params(None, vec![]);
        let mut graph = GeometryGraph::new();
        let mut ledger = VerificationLedger::new();
        let summary = route(&p, &mut graph, &mut ledger).unwrap();
        assert_eq!(summary, DuctSummary::default());
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn test_duct_outside_web_fails_strict() {
        let mut duct = post_tension();
        duct.y_offset = 80.0; // 80 + r 40 > Tw/2 - cover = 100
        let p = params(Some(duct), vec![]);
        let mut graph = GeometryGraph::new();
        let mut ledger = VerificationLedger::new();
        let err = route(&p, &mut graph, &mut ledger).unwrap_err();
        assert_eq!(err.error_code(), "STRICT_CHECK_FAILED");
        assert!(!ledger.passed());
        // Fail-fast: nothing was emitted
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn test_duct_through_opening_fails_strict() {
        let hole = HoleSpec {
            x_start: 4000.0,
            x_end: 4600.0,
            z_min: 150.0,
            z_max: 500.0,
            corner_bar_diameter: 16.0,
            ring_spacing: 0.0,
            anchorage: 300.0,
        };
        // Duct axis at z = 250 with r = 40 runs straight through the opening
        let p = params(Some(post_tension()), vec![hole]);
        let mut graph = GeometryGraph::new();
        let mut ledger = VerificationLedger::new();
        let err = route(&p, &mut graph, &mut ledger).unwrap_err();
        match err {
            RebarError::StrictCheckFailed { name, .. } => {
                assert_eq!(name, "duct.avoid_hole[0]");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duct_above_precast_is_advisory() {
        let mut duct = post_tension();
        duct.z_offset = 150.0; // axis at 550, envelope to 590 > h_pre 500
        let p = params(Some(duct), vec![]);
        let mut graph = GeometryGraph::new();
        let mut ledger = VerificationLedger::new();
        let summary = route(&p, &mut graph, &mut ledger).unwrap();
        assert_eq!(summary.segments, DUCT_SUBDIVISIONS);
        assert!(ledger.passed());
        assert_eq!(ledger.advisory_failure_count(), 1);
    }

    #[test]
    fn test_centerline_carries_duct_diameter() {
        let p = params(Some(post_tension()), vec![]);
        let mut graph = GeometryGraph::new();
        let mut ledger = VerificationLedger::new();
        route(&p, &mut graph, &mut ledger).unwrap();
        for seg in graph.segments_with_role(SegmentRole::DuctCenterline) {
            assert_eq!(seg.diameter, 80.0);
        }
    }
}
