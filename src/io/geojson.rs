//! GeoJSON-Import für Referenz-Geometrien und Export gezeichneter Features.

use anyhow::{anyhow, Context, Result};
use glam::Vec2;
use serde_json::{json, Value};

use crate::core::ReferenceGeometry;
use crate::tool::FeatureSink;

/// Liest Referenz-Geometrien aus einer GeoJSON-FeatureCollection.
///
/// Unterstützt `LineString`, `MultiLineString` und `Polygon`; andere
/// Geometrie-Typen werden mit Warnung übersprungen. Fehlerhafte einzelne
/// Features brechen den Import nicht ab.
pub fn parse_reference_collection(input: &str) -> Result<Vec<ReferenceGeometry>> {
    let root: Value = serde_json::from_str(input).context("GeoJSON nicht lesbar")?;
    let features = root
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("FeatureCollection ohne features-Array"))?;

    let mut geometries = Vec::new();
    for feature in features {
        let Some(geometry) = feature.get("geometry") else {
            continue;
        };
        match parse_geometry(geometry) {
            Ok(Some(parsed)) => geometries.push(parsed),
            Ok(None) => {}
            Err(err) => log::warn!("Feature übersprungen: {err}"),
        }
    }
    log::debug!("GeoJSON-Import: {} Geometrien", geometries.len());
    Ok(geometries)
}

fn parse_geometry(value: &Value) -> Result<Option<ReferenceGeometry>> {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("Geometrie ohne type"))?;
    let coordinates = value
        .get("coordinates")
        .ok_or_else(|| anyhow!("Geometrie ohne coordinates"))?;

    match kind {
        "LineString" => Ok(Some(ReferenceGeometry::LineString(parse_line(
            coordinates,
        )?))),
        "MultiLineString" => {
            let lines = coordinates
                .as_array()
                .ok_or_else(|| anyhow!("MultiLineString ohne Linien-Array"))?
                .iter()
                .map(|line| parse_line(line).map(ReferenceGeometry::LineString))
                .collect::<Result<Vec<_>>>()?;
            Ok(Some(ReferenceGeometry::Multi(lines)))
        }
        "Polygon" => {
            let rings = coordinates
                .as_array()
                .ok_or_else(|| anyhow!("Polygon ohne Ring-Array"))?
                .iter()
                .map(parse_line)
                .collect::<Result<Vec<_>>>()?;
            Ok(Some(ReferenceGeometry::Polygon(rings)))
        }
        other => {
            log::warn!("Nicht unterstützter Geometrie-Typ: {other}");
            Ok(None)
        }
    }
}

fn parse_line(value: &Value) -> Result<Vec<Vec2>> {
    value
        .as_array()
        .ok_or_else(|| anyhow!("Koordinatenliste erwartet"))?
        .iter()
        .map(parse_position)
        .collect()
}

fn parse_position(value: &Value) -> Result<Vec2> {
    let coords = value
        .as_array()
        .ok_or_else(|| anyhow!("Position als Array erwartet"))?;
    if coords.len() < 2 {
        return Err(anyhow!("Position braucht mindestens 2 Komponenten"));
    }
    let x = coords[0]
        .as_f64()
        .ok_or_else(|| anyhow!("x-Koordinate keine Zahl"))?;
    let y = coords[1]
        .as_f64()
        .ok_or_else(|| anyhow!("y-Koordinate keine Zahl"))?;
    Ok(Vec2::new(x as f32, y as f32))
}

/// Sammelt bestätigte Vierecke und serialisiert sie als FeatureCollection.
#[derive(Debug, Default)]
pub struct GeoJsonStore {
    rings: Vec<Vec<Vec2>>,
}

impl GeoJsonStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    /// Alle committeten Ringe in Commit-Reihenfolge.
    pub fn rings(&self) -> &[Vec<Vec2>] {
        &self.rings
    }

    /// Serialisiert alle committeten Features als GeoJSON-String.
    pub fn to_json(&self) -> Result<String> {
        let features: Vec<Value> = self
            .rings
            .iter()
            .map(|ring| {
                let coordinates: Vec<[f32; 2]> = ring.iter().map(|p| [p.x, p.y]).collect();
                json!({
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [coordinates],
                    },
                })
            })
            .collect();
        serde_json::to_string_pretty(&json!({
            "type": "FeatureCollection",
            "features": features,
        }))
        .context("FeatureCollection nicht serialisierbar")
    }
}

impl FeatureSink for GeoJsonStore {
    fn commit(&mut self, ring: &[Vec2]) {
        log::debug!("Feature committed ({} Punkte)", ring.len());
        self.rings.push(ring.to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"name": "weg"},
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]]
                }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0, 0], [5, 0], [5, 5], [0, 0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "MultiLineString",
                    "coordinates": [[[0, 0], [1, 1]], [[2, 2], [3, 3]]]
                }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "Point",
                    "coordinates": [1.0, 2.0]
                }
            }
        ]
    }"#;

    #[test]
    fn test_parse_supported_geometry_types() {
        let geometries = parse_reference_collection(SAMPLE).expect("Import erwartet");
        // Point wird übersprungen
        assert_eq!(geometries.len(), 3);

        let mut segments = 0;
        for g in &geometries {
            g.for_each_segment(&mut |_| segments += 1);
        }
        // LineString: 2, Polygon-Ring: 3, MultiLineString: 2
        assert_eq!(segments, 7);
    }

    #[test]
    fn test_parse_rejects_invalid_root() {
        assert!(parse_reference_collection("kein json").is_err());
        assert!(parse_reference_collection(r#"{"type": "FeatureCollection"}"#).is_err());
    }

    #[test]
    fn test_store_serializes_committed_rings() {
        let mut store = GeoJsonStore::new();
        store.commit(&[
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 5.0),
            Vec2::new(0.0, 5.0),
            Vec2::ZERO,
        ]);
        assert_eq!(store.len(), 1);

        let jsontext = store.to_json().expect("Export erwartet");
        assert!(jsontext.contains("\"Polygon\""));

        // Export ist wieder als Referenz-Sammlung lesbar
        let reparsed = parse_reference_collection(&jsontext).expect("Re-Import erwartet");
        assert_eq!(reparsed.len(), 1);
    }
}
