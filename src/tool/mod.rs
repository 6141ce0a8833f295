//! Sketch-Tool: Handles, Vorschlags-Scan, Draft-Engine und Zustandsmaschine.
//!
//! Die Tool-Schicht erzeugt reine Daten (`HandleProposal`, `DraftQuad`,
//! `SketchEvent`); Rendering und Widgets docken als dünne Adapter an.

pub mod draft;
pub mod handle;
pub mod scanner;
pub mod state;

pub use draft::{DraftQuad, DraftSession, HandleRole};
pub use handle::MovementHandle;
pub use scanner::{HandleProposal, ProposalScanner};
pub use state::{FeatureSink, SketchController, SketchEvent, SketchState};
