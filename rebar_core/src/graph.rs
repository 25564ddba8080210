//! # Geometry Graph
//!
//! The shared output artifact of a synthesis pass: an ordered list of 3D
//! nodes with stable, strictly increasing ids and an ordered list of tagged
//! line segments referencing them. Generators only ever append; nothing is
//! rewritten once created, so repeated passes over identical input produce
//! identical graphs.
//!
//! Identity is by id, not by coordinate: two nodes may coincide in space and
//! remain distinct unless a generator explicitly reuses one through
//! [`GeometryGraph::add_or_reuse_node`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stable node identifier, unique within one synthesis pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

/// Stable segment identifier, unique within one synthesis pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(pub u32);

/// A 3D point (mm). X runs along the beam, Y across the section, Z up from
/// the soffit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Semantic role of a segment, carried through to the downstream emitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentRole {
    /// Short vertical stirrup leg at ±y_outer, confined to the flange band
    StirrupOuterLeg,
    /// Full-height vertical stirrup leg at ±y_inner
    StirrupInnerLeg,
    /// Horizontal stirrup chord (bottom, flange-top, or top)
    StirrupChord,
    /// Edge of a rectangular ring stirrup clipped above/below an opening
    StirrupRing,
    /// Continuous top-mat bar
    LongitudinalTopBar,
    /// Continuous bottom-mat bar (located in the flange)
    LongitudinalBottomBar,
    /// Corner bar tracing an opening
    HoleCornerBar,
    /// Prestress duct centerline
    DuctCenterline,
}

impl SegmentRole {
    pub fn display_name(&self) -> &'static str {
        match self {
            SegmentRole::StirrupOuterLeg => "stirrup-outer-leg",
            SegmentRole::StirrupInnerLeg => "stirrup-inner-leg",
            SegmentRole::StirrupChord => "stirrup-chord",
            SegmentRole::StirrupRing => "stirrup-ring",
            SegmentRole::LongitudinalTopBar => "longitudinal-top-bar",
            SegmentRole::LongitudinalBottomBar => "longitudinal-bottom-bar",
            SegmentRole::HoleCornerBar => "hole-corner-bar",
            SegmentRole::DuctCenterline => "duct-centerline",
        }
    }
}

/// An ordered pair of node ids plus its semantic role and bar diameter.
/// Append-only. The diameter rides along so the downstream emitter never has
/// to re-derive which parameter produced a segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    pub start: NodeId,
    pub end: NodeId,
    pub role: SegmentRole,
    /// Bar or duct diameter (mm)
    pub diameter: f64,
}

/// Monotonic id allocator, scoped to one synthesis pass.
///
/// Passed by value inside the graph rather than held in any global state, so
/// independent passes number from the same origin and stay comparable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdAllocator {
    next_node: u32,
    next_segment: u32,
}

impl IdAllocator {
    fn next_node_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        id
    }

    fn next_segment_id(&mut self) -> SegmentId {
        let id = SegmentId(self.next_segment);
        self.next_segment += 1;
        id
    }
}

/// Quantized coordinate key for explicit deduplication (1e-3 mm grid)
fn coord_key(x: f64, y: f64, z: f64) -> (i64, i64, i64) {
    let q = |v: f64| (v * 1000.0).round() as i64;
    (q(x), q(y), q(z))
}

/// Append-only collection of nodes and segments produced by one pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeometryGraph {
    pub nodes: Vec<Node>,
    pub segments: Vec<Segment>,
    alloc: IdAllocator,
    #[serde(skip)]
    dedup: HashMap<(i64, i64, i64), NodeId>,
}

impl GeometryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new node, always allocating a fresh id
    pub fn add_node(&mut self, x: f64, y: f64, z: f64) -> NodeId {
        let id = self.alloc.next_node_id();
        self.nodes.push(Node { id, x, y, z });
        id
    }

    /// Append a node unless one already exists at the same (quantized)
    /// coordinate, in which case the existing id is returned.
    ///
    /// Generators use this where features genuinely share a point, e.g. the
    /// closing corner of a stirrup polygon.
    pub fn add_or_reuse_node(&mut self, x: f64, y: f64, z: f64) -> NodeId {
        let key = coord_key(x, y, z);
        if let Some(&id) = self.dedup.get(&key) {
            return id;
        }
        let id = self.add_node(x, y, z);
        self.dedup.insert(key, id);
        id
    }

    /// Append a segment connecting two existing nodes
    pub fn add_segment(
        &mut self,
        start: NodeId,
        end: NodeId,
        role: SegmentRole,
        diameter: f64,
    ) -> SegmentId {
        let id = self.alloc.next_segment_id();
        self.segments.push(Segment { id, start, end, role, diameter });
        id
    }

    /// Look up a node by id
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        // Ids are dense and assigned in push order
        self.nodes.get(id.0 as usize).filter(|n| n.id == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// All segments carrying a given role
    pub fn segments_with_role(&self, role: SegmentRole) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(move |s| s.role == role)
    }
}
