//! Core-Domänentypen: Extent, Segment-Geometrie, Referenzquellen, Kamera, Einheiten.

pub mod extent;
pub mod geometry;
pub mod reference;
pub mod units;
pub mod view;

pub use extent::Extent;
pub use geometry::{crop_segment_to_extent, line_intersection, orthogonal_basis, Segment};
pub use reference::{ReferenceGeometry, ReferenceSource, ReferenceStore};
pub use units::{LengthMeasure, PlanarLength, UnitTable};
pub use view::{MapCamera, MapView, ViewContext};
