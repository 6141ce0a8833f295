//! Grundriss-Sketch Library.
//!
//! Interaktives Skizzieren rechteckiger Kartenflächen entlang bestehender
//! Liniengeometrie: Segment-Geometrie, Vorschlags-Scan, Movement-Handles,
//! Draft-Engine und die Zeichen-Zustandsmaschine. Rendering, Karten-Widgets
//! und Persistenz docken über die Traits in `core` und `tool` an.

pub mod core;
pub mod io;
pub mod shared;
pub mod tool;

pub use crate::core::{
    crop_segment_to_extent, line_intersection, orthogonal_basis, Extent, LengthMeasure, MapCamera,
    MapView, PlanarLength, ReferenceGeometry, ReferenceSource, ReferenceStore, Segment, UnitTable,
    ViewContext,
};
pub use io::{parse_reference_collection, GeoJsonStore};
pub use shared::SketchOptions;
pub use tool::{
    DraftQuad, DraftSession, FeatureSink, HandleProposal, HandleRole, MovementHandle,
    ProposalScanner, SketchController, SketchEvent, SketchState,
};
