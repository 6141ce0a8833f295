//! Einheiten-Tabelle und Längenmessung für die Maßanzeige.

use glam::Vec2;
use indexmap::IndexMap;

/// Misst die reale Länge einer 2-Punkt-Strecke in Karten-Koordinaten.
///
/// In echten Deployments projektionsabhängig (geodätisch); die Kern-Logik
/// delegiert jede Längenberechnung an diese Schnittstelle.
pub trait LengthMeasure {
    /// Länge der Strecke `p0 → p1` in Metern.
    fn length(&self, p0: Vec2, p1: Vec2) -> f32;
}

/// Planare (euklidische) Länge — ausreichend für metrische Karteneinheiten.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarLength;

impl LengthMeasure for PlanarLength {
    fn length(&self, p0: Vec2, p1: Vec2) -> f32 {
        p0.distance(p1)
    }
}

/// Tabelle Einheiten-Label → Meter pro Einheit.
///
/// IndexMap hält die Einfüge-Reihenfolge für eine deterministische
/// Einheiten-Auswahl in der UI.
#[derive(Debug, Clone)]
pub struct UnitTable {
    factors: IndexMap<String, f32>,
}

impl UnitTable {
    /// Leere Tabelle ohne Einheiten.
    pub fn empty() -> Self {
        Self {
            factors: IndexMap::new(),
        }
    }

    /// Registriert eine Einheit (überschreibt bei gleichem Label).
    pub fn insert(&mut self, label: impl Into<String>, meters_per_unit: f32) {
        self.factors.insert(label.into(), meters_per_unit);
    }

    /// Meter pro Einheit für ein Label.
    pub fn factor(&self, label: &str) -> Option<f32> {
        self.factors.get(label).copied()
    }

    /// Alle Labels in Einfüge-Reihenfolge.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.factors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

impl Default for UnitTable {
    /// Standard-Einheiten: Meter, Fuß, Zoll.
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert("m", 1.0);
        table.insert("ft", 1.0 / 3.28084);
        table.insert("in", 0.0254);
        table
    }
}
