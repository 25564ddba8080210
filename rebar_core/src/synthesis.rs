//! # Synthesis Pass
//!
//! The single entry point tying the generators together. One pass runs a
//! fixed pipeline over a validated parameter model:
//!
//! 1. validate the parameter model
//! 2. partition `[0, L]` into zones
//! 3. generate stirrups zone by zone
//! 4. place longitudinal mats and corner bars
//! 5. route the prestress duct
//! 6. register the aggregate checks: opening clearance over the whole
//!    graph, then zone coverage
//!
//! Every stage appends to the same graph and ledger; a STRICT failure at any
//! point aborts the pass and the caller never sees partial geometry. Identical
//! input produces an identical pass: same ids, same coordinates, same ledger,
//! byte for byte.

use serde::{Deserialize, Serialize};

use crate::duct::{self, DuctSummary};
use crate::errors::RebarResult;
use crate::graph::GeometryGraph;
use crate::longitudinal::{self, LongitudinalSummary};
use crate::params::{BeamParams, HOLE_EDGE_CLEARANCE, TOLERANCE};
use crate::stirrups::{self, StirrupSummary};
use crate::verify::{Severity, VerificationLedger};
use crate::zones::{self, Zone};

/// Complete result of one synthesis pass, read-only to consumers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Synthesis {
    pub zones: Vec<Zone>,
    pub graph: GeometryGraph,
    pub ledger: VerificationLedger,
    pub stirrups: StirrupSummary,
    pub longitudinal: LongitudinalSummary,
    pub duct: DuctSummary,
}

impl Synthesis {
    /// Aggregate verification outcome of the pass
    pub fn passed(&self) -> bool {
        self.ledger.passed()
    }
}

/// Run one synthesis pass over a parameter model.
pub fn synthesize(params: &BeamParams) -> RebarResult<Synthesis> {
    params.validate()?;

    let zones = zones::partition(params)?;
    let mut graph = GeometryGraph::new();
    let mut ledger = VerificationLedger::new();

    let stirrups = stirrups::generate(params, &zones, &mut graph, &mut ledger)?;
    let longitudinal = longitudinal::place(params, &mut graph)?;
    let duct = duct::route(params, &mut graph, &mut ledger)?;

    // Every node in the finished graph, duct included, must keep clear of
    // every opening interior
    let web_half = params.geometry.web_width / 2.0;
    let mut intrusions = 0usize;
    for node in &graph.nodes {
        for hole in &params.holes {
            let inside_x = node.x > hole.x_start + HOLE_EDGE_CLEARANCE - TOLERANCE
                && node.x < hole.x_end - HOLE_EDGE_CLEARANCE + TOLERANCE;
            let inside_z = node.z > hole.z_min + HOLE_EDGE_CLEARANCE - TOLERANCE
                && node.z < hole.z_max - HOLE_EDGE_CLEARANCE + TOLERANCE;
            if inside_x && inside_z && node.y.abs() < web_half {
                intrusions += 1;
            }
        }
    }
    ledger.check("clearance.openings", 0.0, intrusions as f64, 0.5, Severity::Strict)?;

    let covered: f64 = zones.iter().map(Zone::width).sum();
    ledger.check(
        "zones.coverage",
        params.geometry.length,
        covered,
        TOLERANCE,
        Severity::Strict,
    )?;
    ledger.check("zones.origin", 0.0, zones[0].x_start, TOLERANCE, Severity::Strict)?;
    ledger.check(
        "zones.terminus",
        params.geometry.length,
        zones[zones.len() - 1].x_end,
        TOLERANCE,
        Severity::Strict,
    )?;

    Ok(Synthesis {
        zones,
        graph,
        ledger,
        stirrups,
        longitudinal,
        duct,
    })
}
