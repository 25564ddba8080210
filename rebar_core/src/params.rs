//! # Parameter Model
//!
//! Normalized, validated input for one synthesis pass. The parameter model is
//! constructed once at the boundary and is the only source of defaults:
//! downstream generators never invent fallback values of their own.
//!
//! All dimensions are millimetres; the beam runs along +X, the section lies in
//! the (Y, Z) plane with Z = 0 at the beam soffit.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "geometry": {
//!     "length": 10000.0,
//!     "height": 800.0,
//!     "web_width": 250.0,
//!     "flange_left": { "overhang": 200.0, "thickness": 150.0 },
//!     "flange_right": { "overhang": 200.0, "thickness": 150.0 },
//!     "precast_height": 500.0,
//!     "cover": 25.0
//!   },
//!   "stirrups": {
//!     "diameter": 10.0,
//!     "dense_spacing": 100.0,
//!     "normal_spacing": 200.0,
//!     "dense_zone_length": 1500.0
//!   },
//!   "longitudinal": {
//!     "bottom": { "count": 4, "diameter": 20.0, "rows": 1 },
//!     "top": { "count": 2, "diameter": 16.0 }
//!   },
//!   "holes": [],
//!   "prestress": {
//!     "method": "post_tension",
//!     "diameter": 80.0,
//!     "y_offset": 0.0,
//!     "z_offset": -150.0,
//!     "end_inset": 500.0,
//!     "force": 1000000.0
//!   }
//! }
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{RebarError, RebarResult};

/// Coordinate comparison tolerance used throughout synthesis (mm)
pub const TOLERANCE: f64 = 1e-6;

/// Minimum clear distance kept between hole faces and any rebar node (mm).
///
/// Rebar coinciding exactly with a hole boundary makes downstream meshing
/// ambiguous, so every hole-adjacent feature backs off by this amount.
pub const HOLE_EDGE_CLEARANCE: f64 = 2.0;

/// Standard rebar diameters (mm) with nominal cross-section areas (mm²).
///
/// GB/T 1499.2 deformed bar series. Every configured bar diameter must come
/// from this series; `validate()` rejects anything else.
pub static STANDARD_BAR_SIZES: Lazy<Vec<(f64, f64)>> = Lazy::new(|| {
    [6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 25.0, 28.0, 32.0]
        .iter()
        .map(|&d: &f64| (d, std::f64::consts::PI * (d / 2.0) * (d / 2.0)))
        .collect()
});

/// Whether a diameter matches the standard deformed bar series
pub fn is_standard_diameter(diameter: f64) -> bool {
    STANDARD_BAR_SIZES
        .iter()
        .any(|&(d, _)| (d - diameter).abs() < TOLERANCE)
}

/// One side of the bottom flange (the precast "boot" of the I-section)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlangeSide {
    /// Horizontal overhang past the web face (mm); 0 = no flange on this side
    pub overhang: f64,
    /// Flange thickness measured from the soffit (mm)
    pub thickness: f64,
}

/// Cross-section geometry of the composite I-beam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryParams {
    /// Total beam length L (mm)
    pub length: f64,
    /// Total section height H (mm)
    pub height: f64,
    /// Web width Tw (mm)
    pub web_width: f64,
    /// Left bottom-flange dimensions
    pub flange_left: FlangeSide,
    /// Right bottom-flange dimensions (may differ from left)
    pub flange_right: FlangeSide,
    /// Precast layer height h_pre (mm); the cast-in-place topping sits above
    pub precast_height: f64,
    /// Clear cover from any rebar surface to the concrete face (mm)
    pub cover: f64,
}

impl GeometryParams {
    /// Validate the section invariants.
    ///
    /// `0 < tf_side < h_pre < H`, overhangs non-negative,
    /// `cover < min(tf_side, Tw/2)`.
    pub fn validate(&self) -> RebarResult<()> {
        if self.length <= 0.0 {
            return Err(RebarError::configuration(
                "length",
                self.length.to_string(),
                "Beam length must be positive",
            ));
        }
        if self.height <= 0.0 {
            return Err(RebarError::configuration(
                "height",
                self.height.to_string(),
                "Beam height must be positive",
            ));
        }
        if self.web_width <= 0.0 {
            return Err(RebarError::configuration(
                "web_width",
                self.web_width.to_string(),
                "Web width must be positive",
            ));
        }
        for (name, side) in [("flange_left", &self.flange_left), ("flange_right", &self.flange_right)] {
            if side.overhang < 0.0 {
                return Err(RebarError::configuration(
                    name,
                    side.overhang.to_string(),
                    "Flange overhang cannot be negative",
                ));
            }
            if side.thickness <= 0.0 || side.thickness >= self.precast_height {
                return Err(RebarError::configuration(
                    name,
                    side.thickness.to_string(),
                    "Flange thickness must satisfy 0 < tf < precast_height",
                ));
            }
        }
        if self.precast_height <= 0.0 || self.precast_height >= self.height {
            return Err(RebarError::configuration(
                "precast_height",
                self.precast_height.to_string(),
                "Precast layer height must lie strictly inside (0, height)",
            ));
        }
        let cover_limit = self
            .flange_left
            .thickness
            .min(self.flange_right.thickness)
            .min(self.web_width / 2.0);
        if self.cover <= 0.0 || self.cover >= cover_limit {
            return Err(RebarError::configuration(
                "cover",
                self.cover.to_string(),
                format!("Cover must lie strictly inside (0, {cover_limit}) for this section"),
            ));
        }
        Ok(())
    }

    /// Governing total flange width `Tw + 2 * max(overhang)` (mm).
    ///
    /// For asymmetric overhangs the wider side governs the stirrup envelope,
    /// matching how the outer legs are detailed in practice.
    pub fn flange_total_width(&self) -> f64 {
        self.web_width + 2.0 * self.flange_left.overhang.max(self.flange_right.overhang)
    }

    /// Whether both flange sides share identical dimensions
    pub fn is_symmetric(&self) -> bool {
        (self.flange_left.overhang - self.flange_right.overhang).abs() < TOLERANCE
            && (self.flange_left.thickness - self.flange_right.thickness).abs() < TOLERANCE
    }
}

/// Stirrup spacing and leg rules along the beam.
///
/// Dense and ordinary zones may carry different bar diameters and vertical
/// leg counts; an omitted per-zone diameter falls back to `diameter`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StirrupParams {
    /// Default stirrup bar diameter (mm)
    pub diameter: f64,
    /// Diameter override inside dense and opening-local zones (mm)
    #[serde(default)]
    pub dense_diameter: Option<f64>,
    /// Diameter override inside ordinary zones (mm)
    #[serde(default)]
    pub normal_diameter: Option<f64>,
    /// Vertical leg count in dense and opening-local zones (>= 2)
    #[serde(default = "default_legs")]
    pub dense_legs: usize,
    /// Vertical leg count in ordinary zones (>= 2)
    #[serde(default = "default_legs")]
    pub normal_legs: usize,
    /// Spacing inside dense zones near supports and opening edges (mm)
    pub dense_spacing: f64,
    /// Spacing in ordinary mid-span zones (mm)
    pub normal_spacing: f64,
    /// Dense-zone length measured from each support and each opening edge (mm)
    pub dense_zone_length: f64,
}

fn default_legs() -> usize {
    2
}

impl StirrupParams {
    /// Bar diameter active in dense and opening-local zones (mm)
    pub fn dense_bar_diameter(&self) -> f64 {
        self.dense_diameter.unwrap_or(self.diameter)
    }

    /// Bar diameter active in ordinary zones (mm)
    pub fn normal_bar_diameter(&self) -> f64 {
        self.normal_diameter.unwrap_or(self.diameter)
    }

    pub fn validate(&self) -> RebarResult<()> {
        for (name, diameter) in [
            ("stirrups.diameter", self.diameter),
            ("stirrups.dense_diameter", self.dense_bar_diameter()),
            ("stirrups.normal_diameter", self.normal_bar_diameter()),
        ] {
            if !is_standard_diameter(diameter) {
                return Err(RebarError::configuration(
                    name,
                    diameter.to_string(),
                    "Diameter is not in the standard bar series",
                ));
            }
        }
        for (name, legs) in [
            ("stirrups.dense_legs", self.dense_legs),
            ("stirrups.normal_legs", self.normal_legs),
        ] {
            if legs < 2 {
                return Err(RebarError::configuration(
                    name,
                    legs.to_string(),
                    "A stirrup needs at least two vertical legs",
                ));
            }
        }
        if self.dense_spacing <= 0.0 || self.normal_spacing <= 0.0 {
            return Err(RebarError::configuration(
                "stirrups.spacing",
                format!("dense={}, normal={}", self.dense_spacing, self.normal_spacing),
                "Stirrup spacings must be positive",
            ));
        }
        if self.dense_spacing > self.normal_spacing {
            return Err(RebarError::configuration(
                "stirrups.dense_spacing",
                self.dense_spacing.to_string(),
                "Dense-zone spacing cannot exceed ordinary spacing",
            ));
        }
        if self.dense_zone_length <= 0.0 {
            return Err(RebarError::configuration(
                "stirrups.dense_zone_length",
                self.dense_zone_length.to_string(),
                "Dense-zone length must be positive",
            ));
        }
        Ok(())
    }
}

/// One layer of longitudinal bars: `count` bars spread evenly across the
/// available width, optionally stacked into several rows stepping away from
/// the concrete face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarLayer {
    /// Bars per row
    pub count: usize,
    /// Bar diameter (mm), from the standard series
    pub diameter: f64,
    /// Stacked row count
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// Centre-to-centre vertical step between stacked rows (mm)
    #[serde(default = "default_row_spacing")]
    pub row_spacing: f64,
}

fn default_rows() -> usize {
    1
}

fn default_row_spacing() -> f64 {
    50.0
}

impl BarLayer {
    /// Total bar count across all rows
    pub fn total_bars(&self) -> usize {
        self.count * self.rows
    }

    fn validate(&self, field: &str) -> RebarResult<()> {
        if self.count == 0 {
            return Err(RebarError::configuration(
                format!("{field}.count"),
                self.count.to_string(),
                "A bar layer needs at least one bar",
            ));
        }
        if !is_standard_diameter(self.diameter) {
            return Err(RebarError::configuration(
                format!("{field}.diameter"),
                self.diameter.to_string(),
                "Diameter is not in the standard bar series",
            ));
        }
        if self.rows == 0 {
            return Err(RebarError::configuration(
                format!("{field}.rows"),
                self.rows.to_string(),
                "A bar layer needs at least one row",
            ));
        }
        if self.rows > 1 && self.row_spacing <= 0.0 {
            return Err(RebarError::configuration(
                format!("{field}.row_spacing"),
                self.row_spacing.to_string(),
                "Stacked rows need a positive row spacing",
            ));
        }
        Ok(())
    }
}

/// Longitudinal mat configuration: the bottom mat spreads across the flange
/// width, the top mat across the web width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongitudinalParams {
    #[serde(default = "default_bottom_layer")]
    pub bottom: BarLayer,
    #[serde(default = "default_top_layer")]
    pub top: BarLayer,
}

fn default_bottom_layer() -> BarLayer {
    BarLayer { count: 4, diameter: 20.0, rows: 1, row_spacing: 50.0 }
}

fn default_top_layer() -> BarLayer {
    BarLayer { count: 2, diameter: 16.0, rows: 1, row_spacing: 50.0 }
}

impl Default for LongitudinalParams {
    fn default() -> Self {
        LongitudinalParams {
            bottom: default_bottom_layer(),
            top: default_top_layer(),
        }
    }
}

impl LongitudinalParams {
    pub fn validate(&self) -> RebarResult<()> {
        self.bottom.validate("longitudinal.bottom")?;
        self.top.validate("longitudinal.top")
    }
}

/// A rectangular web opening with its local reinforcement rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleSpec {
    /// Longitudinal start of the opening (mm)
    pub x_start: f64,
    /// Longitudinal end of the opening (mm)
    pub x_end: f64,
    /// Bottom of the opening (mm from soffit)
    pub z_min: f64,
    /// Top of the opening (mm from soffit)
    pub z_max: f64,
    /// Corner bar diameter for the bars tracing the opening (mm)
    pub corner_bar_diameter: f64,
    /// Ring stirrup spacing inside the opening-local zone (mm); 0 = use the
    /// global dense spacing
    #[serde(default)]
    pub ring_spacing: f64,
    /// Anchorage extension of corner bars past the opening edges (mm)
    #[serde(default = "default_anchorage")]
    pub anchorage: f64,
}

fn default_anchorage() -> f64 {
    300.0
}

impl HoleSpec {
    /// Longitudinal width of the opening (mm)
    pub fn width(&self) -> f64 {
        self.x_end - self.x_start
    }

    /// Vertical extent of the opening (mm)
    pub fn height(&self) -> f64 {
        self.z_max - self.z_min
    }

    /// Whether two openings overlap as 2-D rectangles in the (X, Z) plane
    pub fn overlaps(&self, other: &HoleSpec) -> bool {
        let x_overlap = self.x_end > other.x_start && other.x_end > self.x_start;
        let z_overlap = self.z_max > other.z_min && other.z_max > self.z_min;
        x_overlap && z_overlap
    }

    /// Whether station `x` falls inside the opening's padded x-extent
    pub fn contains_station(&self, x: f64) -> bool {
        x > self.x_start - HOLE_EDGE_CLEARANCE - TOLERANCE
            && x < self.x_end + HOLE_EDGE_CLEARANCE + TOLERANCE
    }

    fn validate(&self, index: usize, geometry: &GeometryParams) -> RebarResult<()> {
        let field = format!("holes[{index}]");
        if self.width() <= 0.0 || self.height() <= 0.0 {
            return Err(RebarError::configuration(
                field,
                format!("{}x{}", self.width(), self.height()),
                "Opening width and height must be positive",
            ));
        }
        if self.x_start <= 0.0 || self.x_end >= geometry.length {
            return Err(RebarError::configuration(
                field,
                format!("[{}, {}]", self.x_start, self.x_end),
                "Opening must lie strictly inside the beam length",
            ));
        }
        if self.z_min <= 0.0 || self.z_max >= geometry.height {
            return Err(RebarError::configuration(
                field,
                format!("[{}, {}]", self.z_min, self.z_max),
                "Opening must lie strictly inside the section height",
            ));
        }
        if !is_standard_diameter(self.corner_bar_diameter) {
            return Err(RebarError::configuration(
                format!("{field}.corner_bar_diameter"),
                self.corner_bar_diameter.to_string(),
                "Corner bar diameter is not in the standard bar series",
            ));
        }
        if self.ring_spacing < 0.0 {
            return Err(RebarError::configuration(
                format!("{field}.ring_spacing"),
                self.ring_spacing.to_string(),
                "Ring spacing cannot be negative",
            ));
        }
        if self.anchorage < 0.0 {
            return Err(RebarError::configuration(
                format!("{field}.anchorage"),
                self.anchorage.to_string(),
                "Anchorage length cannot be negative",
            ));
        }
        Ok(())
    }
}

/// Prestress application method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrestressMethod {
    /// Tendons stressed before casting; no duct exists in the section
    Pretension,
    /// Tendons stressed through a reserved duct after casting
    PostTension,
}

/// Prestress duct configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuctSpec {
    pub method: PrestressMethod,
    /// Duct outer diameter (mm); forced to 0 under pretension
    pub diameter: f64,
    /// Horizontal offset of the duct axis from the web centerline (mm)
    #[serde(default)]
    pub y_offset: f64,
    /// Vertical offset of the duct axis from section mid-height (mm)
    #[serde(default)]
    pub z_offset: f64,
    /// Inset of the duct ends from the beam end faces (mm)
    #[serde(default = "default_end_inset")]
    pub end_inset: f64,
    /// Jacking force (N)
    pub force: f64,
}

fn default_end_inset() -> f64 {
    500.0
}

impl DuctSpec {
    /// Effective duct diameter: pretension has no physical duct
    pub fn effective_diameter(&self) -> f64 {
        match self.method {
            PrestressMethod::Pretension => 0.0,
            PrestressMethod::PostTension => self.diameter,
        }
    }

    pub fn validate(&self) -> RebarResult<()> {
        if self.force <= 0.0 {
            return Err(RebarError::configuration(
                "prestress.force",
                self.force.to_string(),
                "Jacking force must be positive",
            ));
        }
        match self.method {
            PrestressMethod::PostTension => {
                if self.diameter <= 0.0 {
                    return Err(RebarError::configuration(
                        "prestress.diameter",
                        self.diameter.to_string(),
                        "Post-tension duct diameter must be positive",
                    ));
                }
            }
            PrestressMethod::Pretension => {
                if self.diameter < 0.0 {
                    return Err(RebarError::configuration(
                        "prestress.diameter",
                        self.diameter.to_string(),
                        "Duct diameter cannot be negative",
                    ));
                }
            }
        }
        if self.end_inset <= 0.0 {
            return Err(RebarError::configuration(
                "prestress.end_inset",
                self.end_inset.to_string(),
                "End inset must be positive",
            ));
        }
        Ok(())
    }
}

/// Complete validated input for one synthesis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamParams {
    pub geometry: GeometryParams,
    pub stirrups: StirrupParams,
    #[serde(default)]
    pub longitudinal: LongitudinalParams,
    #[serde(default)]
    pub holes: Vec<HoleSpec>,
    #[serde(default)]
    pub prestress: Option<DuctSpec>,
}

impl BeamParams {
    /// Validate the whole parameter model.
    ///
    /// Runs every per-component check plus the cross-component ones: openings
    /// pairwise non-overlapping, openings inside the beam, duct feasible.
    /// Synthesis refuses to produce any geometry until this passes.
    pub fn validate(&self) -> RebarResult<()> {
        self.geometry.validate()?;
        self.stirrups.validate()?;
        self.longitudinal.validate()?;
        for (i, hole) in self.holes.iter().enumerate() {
            hole.validate(i, &self.geometry)?;
            for (j, other) in self.holes.iter().enumerate().skip(i + 1) {
                if hole.overlaps(other) {
                    return Err(RebarError::configuration(
                        format!("holes[{i}]"),
                        format!("[{}, {}]", hole.x_start, hole.x_end),
                        format!("Opening overlaps holes[{j}]"),
                    ));
                }
            }
        }
        if let Some(duct) = &self.prestress {
            duct.validate()?;
            if duct.method == PrestressMethod::PostTension
                && 2.0 * duct.end_inset >= self.geometry.length
            {
                return Err(RebarError::configuration(
                    "prestress.end_inset",
                    duct.end_inset.to_string(),
                    "End insets leave no duct length between them",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn test_geometry() -> GeometryParams {
        GeometryParams {
            length: 10000.0,
            height: 800.0,
            web_width: 250.0,
            flange_left: FlangeSide { overhang: 200.0, thickness: 150.0 },
            flange_right: FlangeSide { overhang: 200.0, thickness: 150.0 },
            precast_height: 500.0,
            cover: 25.0,
        }
    }

    #[test]
    fn test_valid_geometry() {
        assert!(test_geometry().validate().is_ok());
        assert_eq!(test_geometry().flange_total_width(), 650.0);
        assert!(test_geometry().is_symmetric());
    }

    #[test]
    fn test_cover_too_large() {
        let mut geom = test_geometry();
        geom.cover = 130.0; // exceeds Tw/2 = 125
        assert!(geom.validate().is_err());
    }

    #[test]
    fn test_precast_must_be_inside_height() {
        let mut geom = test_geometry();
        geom.precast_height = 800.0;
        assert!(geom.validate().is_err());
    }

    #[test]
    fn test_asymmetric_flange_width_governed_by_max() {
        let mut geom = test_geometry();
        geom.flange_right.overhang = 100.0;
        assert!(!geom.is_symmetric());
        assert_eq!(geom.flange_total_width(), 650.0);
    }

    pub(crate) fn test_stirrups() -> StirrupParams {
        StirrupParams {
            diameter: 10.0,
            dense_diameter: None,
            normal_diameter: None,
            dense_legs: 2,
            normal_legs: 2,
            dense_spacing: 100.0,
            normal_spacing: 200.0,
            dense_zone_length: 1500.0,
        }
    }

    #[test]
    fn test_stirrup_spacing_ordering() {
        let mut stirrups = test_stirrups();
        stirrups.dense_spacing = 300.0;
        assert!(stirrups.validate().is_err());
    }

    #[test]
    fn test_non_standard_diameter_rejected() {
        let mut stirrups = test_stirrups();
        stirrups.diameter = 13.0;
        let err = stirrups.validate().unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION");

        let mut stirrups = test_stirrups();
        stirrups.dense_diameter = Some(11.0);
        assert!(stirrups.validate().is_err());

        let mut layers = LongitudinalParams::default();
        layers.bottom.diameter = 15.0;
        assert!(layers.validate().is_err());
    }

    #[test]
    fn test_leg_count_minimum() {
        let mut stirrups = test_stirrups();
        stirrups.dense_legs = 1;
        assert!(stirrups.validate().is_err());
        stirrups.dense_legs = 4;
        assert!(stirrups.validate().is_ok());
    }

    #[test]
    fn test_per_zone_diameter_fallback() {
        let mut stirrups = test_stirrups();
        assert_eq!(stirrups.dense_bar_diameter(), 10.0);
        assert_eq!(stirrups.normal_bar_diameter(), 10.0);
        stirrups.dense_diameter = Some(12.0);
        assert_eq!(stirrups.dense_bar_diameter(), 12.0);
        assert_eq!(stirrups.normal_bar_diameter(), 10.0);
    }

    #[test]
    fn test_default_longitudinal_layout() {
        let layers = LongitudinalParams::default();
        assert_eq!(layers.bottom.count, 4);
        assert_eq!(layers.bottom.diameter, 20.0);
        assert_eq!(layers.bottom.rows, 1);
        assert_eq!(layers.top.count, 2);
        assert_eq!(layers.top.diameter, 16.0);
        assert_eq!(layers.bottom.total_bars(), 4);
        assert!(layers.validate().is_ok());
    }

    #[test]
    fn test_stacked_rows_need_spacing() {
        let mut layers = LongitudinalParams::default();
        layers.bottom.rows = 2;
        layers.bottom.row_spacing = 0.0;
        assert!(layers.validate().is_err());
        layers.bottom.row_spacing = 50.0;
        assert!(layers.validate().is_ok());
        assert_eq!(layers.bottom.total_bars(), 8);
    }

    #[test]
    fn test_hole_overlap_detection() {
        let a = HoleSpec {
            x_start: 4000.0,
            x_end: 4600.0,
            z_min: 150.0,
            z_max: 500.0,
            corner_bar_diameter: 16.0,
            ring_spacing: 0.0,
            anchorage: 300.0,
        };
        let mut b = a.clone();
        b.x_start = 4500.0;
        b.x_end = 5200.0;
        assert!(a.overlaps(&b));

        // Same x range but stacked clear in z: no overlap
        b.z_min = 550.0;
        b.z_max = 700.0;
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_pretension_forces_zero_diameter() {
        let duct = DuctSpec {
            method: PrestressMethod::Pretension,
            diameter: 80.0,
            y_offset: 0.0,
            z_offset: 0.0,
            end_inset: 500.0,
            force: 1.0e6,
        };
        assert_eq!(duct.effective_diameter(), 0.0);
        assert!(duct.validate().is_ok());
    }

    #[test]
    fn test_standard_bar_table() {
        assert!(is_standard_diameter(25.0));
        assert!(!is_standard_diameter(13.0));
        let (d, area) = STANDARD_BAR_SIZES[2];
        assert_eq!(d, 10.0);
        assert!((area - 78.54).abs() < 0.01);
    }

    #[test]
    fn test_end_inset_must_fit_beam() {
        // Caught at the boundary, before any generator runs
        let params = BeamParams {
            geometry: test_geometry(),
            stirrups: test_stirrups(),
            longitudinal: LongitudinalParams::default(),
            holes: vec![],
            prestress: Some(DuctSpec {
                method: PrestressMethod::PostTension,
                diameter: 80.0,
                y_offset: 0.0,
                z_offset: -150.0,
                end_inset: 5000.0,
                force: 1.0e6,
            }),
        };
        let err = params.validate().unwrap_err();
        match err {
            RebarError::Configuration { field, .. } => assert_eq!(field, "prestress.end_inset"),
            other => panic!("unexpected error: {other:?}"),
        }

        // Pretension has no duct run, so the inset is not constrained
        let mut params = params;
        if let Some(duct) = &mut params.prestress {
            duct.method = PrestressMethod::Pretension;
        }
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let params = BeamParams {
            geometry: test_geometry(),
            stirrups: test_stirrups(),
            longitudinal: LongitudinalParams::default(),
            holes: vec![],
            prestress: Some(DuctSpec {
                method: PrestressMethod::PostTension,
                diameter: 80.0,
                y_offset: 0.0,
                z_offset: -150.0,
                end_inset: 500.0,
                force: 1.0e6,
            }),
        };
        let json = serde_json::to_string_pretty(&params).unwrap();
        assert!(json.contains("post_tension"));
        let roundtrip: BeamParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, roundtrip);
    }

    #[test]
    fn test_minimal_json_fills_defaults() {
        let json = r#"{
            "geometry": {
                "length": 10000.0, "height": 800.0, "web_width": 250.0,
                "flange_left":  { "overhang": 200.0, "thickness": 150.0 },
                "flange_right": { "overhang": 200.0, "thickness": 150.0 },
                "precast_height": 500.0, "cover": 25.0
            },
            "stirrups": {
                "diameter": 10.0, "dense_spacing": 100.0,
                "normal_spacing": 200.0, "dense_zone_length": 1500.0
            }
        }"#;
        let params: BeamParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.stirrups.dense_legs, 2);
        assert_eq!(params.stirrups.dense_bar_diameter(), 10.0);
        assert_eq!(params.longitudinal, LongitudinalParams::default());
        assert!(params.validate().is_ok());
    }
}
