//! Geteilte Konfiguration für Tool- und Render-Schicht.

pub mod options;

pub use options::SketchOptions;
pub use options::{
    FOCUS_BUFFER_DIAGONAL_FRACTION, HANDLE_PICK_RADIUS_PX, MIN_SEGMENT_DIAGONAL_FRACTION,
    PROPOSAL_BUCKET_SIZE_PX,
};
