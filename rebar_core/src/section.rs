//! # Cross-Section Profile Resolver
//!
//! Computes, for a given longitudinal station, the cover-adjusted
//! reinforcement envelope of the active I-section:
//!
//! ```text
//! y_outer = flange_total_width / 2 - cover      (outer short legs)
//! y_inner = Tw / 2 - cover                      (inner full-height legs)
//! z_bottom = cover
//! z_flange_top(side) = tf(side) - cover         (left/right independent)
//! z_top = H - cover
//! ```
//!
//! "Short outer / long inner" refers to vertical extent: the outer legs are
//! wider apart but confined to the flange band, the inner legs are narrower
//! but reach the full section height. Any non-positive derived span means the
//! input geometry is physically infeasible at that station and resolves to a
//! `Geometry` error naming the station and quantity.

use serde::{Deserialize, Serialize};

use crate::errors::{RebarError, RebarResult};
use crate::params::{GeometryParams, TOLERANCE};

/// Resolved reinforcement envelope at one station
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionProfile {
    /// |Y| of the outer short legs (mm)
    pub y_outer: f64,
    /// |Y| of the inner full-height legs (mm)
    pub y_inner: f64,
    /// Z of the bottom chord: exactly the cover distance (mm)
    pub z_bottom: f64,
    /// Z of the left flange-top chord (mm)
    pub z_flange_top_left: f64,
    /// Z of the right flange-top chord (mm)
    pub z_flange_top_right: f64,
    /// Z of the top chord: exactly `H - cover` (mm)
    pub z_top: f64,
}

impl SectionProfile {
    /// Full reinforcement height of the inner legs (mm)
    pub fn inner_leg_height(&self) -> f64 {
        self.z_top - self.z_bottom
    }
}

/// Resolve the active section envelope at station `x`.
///
/// The station only participates in error reporting: the I-profile itself is
/// prismatic, but infeasibility (e.g. cover eating an entire flange) must be
/// pinned to where the generator asked for it.
pub fn resolve(geometry: &GeometryParams, x: f64) -> RebarResult<SectionProfile> {
    let cover = geometry.cover;
    let y_outer = geometry.flange_total_width() / 2.0 - cover;
    let y_inner = geometry.web_width / 2.0 - cover;
    let z_bottom = cover;
    let z_flange_top_left = geometry.flange_left.thickness - cover;
    let z_flange_top_right = geometry.flange_right.thickness - cover;
    let z_top = geometry.height - cover;

    if y_inner <= 0.0 {
        return Err(RebarError::geometry(
            x,
            "y_inner",
            format!("Cover {cover} leaves no web width for the inner legs"),
        ));
    }
    if y_outer - y_inner <= TOLERANCE {
        return Err(RebarError::geometry(
            x,
            "y_outer",
            "Outer legs must sit strictly outside the inner legs; the section has no flange overhang",
        ));
    }
    for (name, z_flange) in [
        ("z_flange_top_left", z_flange_top_left),
        ("z_flange_top_right", z_flange_top_right),
    ] {
        if z_flange - z_bottom <= TOLERANCE {
            return Err(RebarError::geometry(
                x,
                name,
                format!("Cover {cover} leaves no flange band for the outer legs"),
            ));
        }
    }
    if z_top - z_bottom <= TOLERANCE {
        return Err(RebarError::geometry(x, "z_top", "Section height consumed by cover"));
    }

    Ok(SectionProfile {
        y_outer,
        y_inner,
        z_bottom,
        z_flange_top_left,
        z_flange_top_right,
        z_top,
    })
}
