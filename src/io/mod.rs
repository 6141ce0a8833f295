//! Serialisierung: GeoJSON-Import und -Export.

pub mod geojson;

pub use geojson::{parse_reference_collection, GeoJsonStore};
