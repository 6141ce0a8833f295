//! Referenz-Geometrien und deren Quelle (Extent-Abfrage + Revisionszähler).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::extent::Extent;
use super::geometry::Segment;

/// Referenz-Geometrie, rekursiv zerlegbar bis auf Linienzüge und Ringe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReferenceGeometry {
    /// Offener Linienzug
    LineString(Vec<Vec2>),
    /// Polygon als Ring-Liste (erster Ring = Außenkontur)
    Polygon(Vec<Vec<Vec2>>),
    /// Sammlung weiterer Geometrien
    Multi(Vec<ReferenceGeometry>),
}

impl ReferenceGeometry {
    /// Ruft `f` für jedes konsekutive 2-Punkt-Segment auf,
    /// rekursiv durch zusammengesetzte Geometrien.
    pub fn for_each_segment(&self, f: &mut impl FnMut(Segment)) {
        match self {
            ReferenceGeometry::LineString(points) => {
                for pair in points.windows(2) {
                    f(Segment::new(pair[0], pair[1]));
                }
            }
            ReferenceGeometry::Polygon(rings) => {
                for ring in rings {
                    for pair in ring.windows(2) {
                        f(Segment::new(pair[0], pair[1]));
                    }
                }
            }
            ReferenceGeometry::Multi(parts) => {
                for part in parts {
                    part.for_each_segment(f);
                }
            }
        }
    }

    /// Bounding-Box über alle Stützpunkte (`None` ohne Punkte).
    pub fn bounds(&self) -> Option<Extent> {
        let mut points: Vec<Vec2> = Vec::new();
        self.collect_points(&mut points);
        Extent::from_points(points)
    }

    fn collect_points(&self, out: &mut Vec<Vec2>) {
        match self {
            ReferenceGeometry::LineString(points) => out.extend_from_slice(points),
            ReferenceGeometry::Polygon(rings) => {
                for ring in rings {
                    out.extend_from_slice(ring);
                }
            }
            ReferenceGeometry::Multi(parts) => {
                for part in parts {
                    part.collect_points(out);
                }
            }
        }
    }
}

/// Quelle von Referenz-Geometrien, eingeschränkt auf einen Extent.
///
/// Aus Sicht des Sketch-Tools strikt read-only.
pub trait ReferenceSource {
    /// Geometrien, deren Bounding-Box den Extent schneidet.
    fn geometries_in(&self, extent: &Extent) -> Vec<&ReferenceGeometry>;

    /// Monoton steigender Revisionszähler.
    /// Ändert sich bei jeder Mutation der zugrunde liegenden Daten.
    fn revision(&self) -> u64;
}

/// Einfacher In-Memory-Store für Referenz-Geometrien.
#[derive(Debug, Default)]
pub struct ReferenceStore {
    geometries: Vec<ReferenceGeometry>,
    revision: u64,
}

impl ReferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt eine Geometrie hinzu und erhöht die Revision.
    pub fn add(&mut self, geometry: ReferenceGeometry) {
        self.geometries.push(geometry);
        self.revision += 1;
    }

    /// Fügt mehrere Geometrien hinzu (eine Revisions-Erhöhung).
    pub fn extend(&mut self, geometries: impl IntoIterator<Item = ReferenceGeometry>) {
        let before = self.geometries.len();
        self.geometries.extend(geometries);
        if self.geometries.len() != before {
            self.revision += 1;
        }
    }

    /// Entfernt alle Geometrien.
    pub fn clear(&mut self) {
        if !self.geometries.is_empty() {
            self.geometries.clear();
            self.revision += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }
}

impl ReferenceSource for ReferenceStore {
    fn geometries_in(&self, extent: &Extent) -> Vec<&ReferenceGeometry> {
        self.geometries
            .iter()
            .filter(|g| g.bounds().is_some_and(|b| b.intersects(extent)))
            .collect()
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}
