//! # Longitudinal Rebar Placer
//!
//! Places the continuous bar mats and the opening corner bars.
//!
//! Mat layout comes from [`crate::params::LongitudinalParams`]: the bottom
//! mat spreads its
//! bars evenly across the flange width at `z = cover`, the top mat across the
//! web width at `z = H - cover`, and either layer may stack additional rows
//! stepping away from its concrete face. Each bar runs the full beam length,
//! subdivided into [`BAR_SUBDIVISIONS`] collinear segments so an opening can
//! knock out exactly the spans that cross it: a web bar whose height falls
//! within an opening's padded vertical extent drops every segment whose
//! x-range touches the padded opening, and the omitted spans are replaced by
//! that opening's corner bars.

use serde::{Deserialize, Serialize};

use crate::errors::{RebarError, RebarResult};
use crate::graph::{GeometryGraph, SegmentRole};
use crate::params::{BarLayer, BeamParams, HoleSpec, HOLE_EDGE_CLEARANCE, TOLERANCE};
use crate::section;

/// Number of collinear segments a continuous bar is subdivided into
pub const BAR_SUBDIVISIONS: usize = 30;

/// Counters produced by the longitudinal pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LongitudinalSummary {
    /// Continuous mat bars placed (full or partial)
    pub bars: usize,
    /// Bar segments emitted into the graph
    pub segments_emitted: usize,
    /// Bar segments omitted for crossing an opening
    pub segments_omitted: usize,
    /// Corner bars placed around openings
    pub corner_bars: usize,
}

/// Evenly spread `count` bar positions across `[-half_width, +half_width]`
fn spread(count: usize, half_width: f64) -> Vec<f64> {
    if count == 1 {
        return vec![0.0];
    }
    (0..count)
        .map(|i| -half_width + 2.0 * half_width * i as f64 / (count - 1) as f64)
        .collect()
}

/// Whether a bar at `(y, z)` runs through the padded vertical extent of the
/// opening. Only web bars can collide; flange bars outside the web pass
/// beside it and are never blocked.
fn bar_blocked_by(hole: &HoleSpec, y: f64, z: f64, web_width: f64) -> bool {
    y.abs() < web_width / 2.0 - TOLERANCE
        && z > hole.z_min - HOLE_EDGE_CLEARANCE - TOLERANCE
        && z < hole.z_max + HOLE_EDGE_CLEARANCE + TOLERANCE
}

/// Whether the x-interval `[x0, x1]` touches the padded x-extent of the opening
fn span_crosses(hole: &HoleSpec, x0: f64, x1: f64) -> bool {
    x1 > hole.x_start - HOLE_EDGE_CLEARANCE - TOLERANCE
        && x0 < hole.x_end + HOLE_EDGE_CLEARANCE + TOLERANCE
}

/// Place all longitudinal bars.
pub fn place(params: &BeamParams, graph: &mut GeometryGraph) -> RebarResult<LongitudinalSummary> {
    let geometry = &params.geometry;
    let layers = &params.longitudinal;
    let profile = section::resolve(geometry, 0.0)?;
    let z_bottom = profile.z_bottom;
    let z_top = profile.z_top;

    // (y, z, role, diameter) per mat bar, bottom rows rising, top rows dropping
    let mut bars: Vec<(f64, f64, SegmentRole, f64)> = Vec::new();
    let mut stack = |layer: &BarLayer,
                     half_width: f64,
                     face_z: f64,
                     step: f64,
                     role: SegmentRole,
                     field: &str|
     -> RebarResult<()> {
        for row in 0..layer.rows {
            let z = face_z + step * row as f64 * layer.row_spacing;
            if z <= z_bottom - TOLERANCE || z >= z_top + TOLERANCE {
                return Err(RebarError::geometry(
                    0.0,
                    field,
                    format!("Row {row} stacks outside the reinforcement envelope at z={z}"),
                ));
            }
            for y in spread(layer.count, half_width) {
                bars.push((y, z, role, layer.diameter));
            }
        }
        Ok(())
    };
    stack(
        &layers.bottom,
        profile.y_outer,
        z_bottom,
        1.0,
        SegmentRole::LongitudinalBottomBar,
        "longitudinal.bottom",
    )?;
    stack(
        &layers.top,
        profile.y_inner,
        z_top,
        -1.0,
        SegmentRole::LongitudinalTopBar,
        "longitudinal.top",
    )?;

    let mut summary = LongitudinalSummary::default();
    let dx = geometry.length / BAR_SUBDIVISIONS as f64;

    for (y, z, role, diameter) in bars {
        summary.bars += 1;
        for k in 0..BAR_SUBDIVISIONS {
            let x0 = k as f64 * dx;
            let x1 = if k + 1 == BAR_SUBDIVISIONS {
                geometry.length
            } else {
                (k + 1) as f64 * dx
            };
            let blocked = params
                .holes
                .iter()
                .any(|h| bar_blocked_by(h, y, z, geometry.web_width) && span_crosses(h, x0, x1));
            if blocked {
                summary.segments_omitted += 1;
                continue;
            }
            // Consecutive spans of one bar share their joint node
            let a = graph.add_or_reuse_node(x0, y, z);
            let b = graph.add_or_reuse_node(x1, y, z);
            graph.add_segment(a, b, role, diameter);
            summary.segments_emitted += 1;
        }
    }

    for hole in &params.holes {
        let z_above = (hole.z_max + geometry.cover).min(z_top);
        let z_below = (hole.z_min - geometry.cover).max(z_bottom);
        let x0 = (hole.x_start - hole.anchorage).max(0.0);
        let x1 = (hole.x_end + hole.anchorage).min(geometry.length);
        for y in [-profile.y_inner, profile.y_inner] {
            for z in [z_below, z_above] {
                let a = graph.add_node(x0, y, z);
                let b = graph.add_node(x1, y, z);
                graph.add_segment(a, b, SegmentRole::HoleCornerBar, hole.corner_bar_diameter);
                summary.corner_bars += 1;
            }
        }
    }

    Ok(summary)
}
