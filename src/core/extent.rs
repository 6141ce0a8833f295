//! Achsenparalleles Rechteck (AABB) in Welt-Koordinaten.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Achsenparalleles Rechteck in Welt-Koordinaten.
///
/// Invariante: `min_x <= max_x` und `min_y <= max_y`.
/// Ein Extent darf leer sein (min == max).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    /// Minimale X-Koordinate (links)
    pub min_x: f32,
    /// Minimale Y-Koordinate (unten)
    pub min_y: f32,
    /// Maximale X-Koordinate (rechts)
    pub max_x: f32,
    /// Maximale Y-Koordinate (oben)
    pub max_y: f32,
}

impl Extent {
    /// Erstellt einen Extent; vertauschte Grenzen werden normalisiert.
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x: min_x.min(max_x),
            min_y: min_y.min(max_y),
            max_x: min_x.max(max_x),
            max_y: min_y.max(max_y),
        }
    }

    /// Erstellt einen Extent aus Zentrum und halber Ausdehnung.
    pub fn from_center_half(center: Vec2, half: Vec2) -> Self {
        Self::new(
            center.x - half.x,
            center.y - half.y,
            center.x + half.x,
            center.y + half.y,
        )
    }

    /// Bounding-Box über eine Punktmenge (`None` bei leerer Menge).
    pub fn from_points(points: impl IntoIterator<Item = Vec2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut extent = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in iter {
            extent.min_x = extent.min_x.min(p.x);
            extent.min_y = extent.min_y.min(p.y);
            extent.max_x = extent.max_x.max(p.x);
            extent.max_y = extent.max_y.max(p.y);
        }
        Some(extent)
    }

    /// Linke untere Ecke.
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.min_x, self.min_y)
    }

    /// Rechte obere Ecke.
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.max_x, self.max_y)
    }

    /// Mittelpunkt des Rechtecks.
    pub fn center(&self) -> Vec2 {
        self.min().midpoint(self.max())
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Länge der Diagonale.
    pub fn diagonal(&self) -> f32 {
        self.min().distance(self.max())
    }

    /// True wenn der Extent keine Fläche hat.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Prüft ob ein Punkt innerhalb liegt (Kanten inklusiv).
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Vergrößert das Rechteck auf allen Seiten um `amount`
    /// (symmetrisch, das Zentrum bleibt erhalten).
    pub fn buffered(&self, amount: f32) -> Self {
        Self::new(
            self.min_x - amount,
            self.min_y - amount,
            self.max_x + amount,
            self.max_y + amount,
        )
    }

    /// Prüft ob sich zwei Extents überlappen (Kanten inklusiv).
    pub fn intersects(&self, other: &Extent) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Die vier Ecken gegen den Uhrzeigersinn, beginnend links unten.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.min_x, self.min_y),
            Vec2::new(self.max_x, self.min_y),
            Vec2::new(self.max_x, self.max_y),
            Vec2::new(self.min_x, self.max_y),
        ]
    }
}
