//! # rebar_core - Precast Composite I-Beam Rebar Synthesis Engine
//!
//! `rebar_core` derives the complete reinforcement and prestress duct geometry
//! of a precast/composite I-beam from a small parameter model: stirrup cages,
//! longitudinal bar mats, web-opening corner bars, and the post-tension duct
//! centerline, emitted as a graph of 3D nodes and role-tagged segments
//! together with an itemized self-verification ledger.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: one pure pass from parameters to geometry, no globals
//! - **JSON-First**: all inputs and outputs implement Serialize/Deserialize
//! - **Fail-Fast**: a STRICT verification failure aborts the pass; partial
//!   geometry is never observable
//! - **Deterministic**: identical input yields a byte-identical pass
//!
//! ## Quick Start
//!
//! ```rust
//! use rebar_core::params::BeamParams;
//! use rebar_core::synthesis::synthesize;
//!
//! let json = r#"{
//!     "geometry": {
//!         "length": 10000.0, "height": 800.0, "web_width": 250.0,
//!         "flange_left":  { "overhang": 200.0, "thickness": 150.0 },
//!         "flange_right": { "overhang": 200.0, "thickness": 150.0 },
//!         "precast_height": 500.0, "cover": 25.0
//!     },
//!     "stirrups": {
//!         "diameter": 10.0, "dense_spacing": 100.0,
//!         "normal_spacing": 200.0, "dense_zone_length": 1500.0
//!     }
//! }"#;
//! let params: BeamParams = serde_json::from_str(json).unwrap();
//! let result = synthesize(&params).unwrap();
//! assert!(result.passed());
//! ```
//!
//! ## Modules
//!
//! - [`params`] - Validated input parameter model and constants
//! - [`zones`] - Longitudinal zone partitioner
//! - [`section`] - Cross-section reinforcement envelope resolver
//! - [`stirrups`] - Stirrup cage generator
//! - [`longitudinal`] - Bar mats and opening corner bars
//! - [`duct`] - Prestress duct router
//! - [`graph`] - Append-only geometry graph output
//! - [`verify`] - Named-assertion verification ledger
//! - [`synthesis`] - The top-level pass
//! - [`errors`] - Structured error types

pub mod duct;
pub mod errors;
pub mod graph;
pub mod longitudinal;
pub mod params;
pub mod section;
pub mod stirrups;
pub mod synthesis;
pub mod verify;
pub mod zones;

// Re-export commonly used types at crate root for convenience
pub use errors::{RebarError, RebarResult};
pub use params::BeamParams;
pub use synthesis::{synthesize, Synthesis};
