//! Verschiebbarer Handle: Ursprung + Einheits-Basisvektor + skalare Magnitude.

use glam::Vec2;

use crate::core::units::LengthMeasure;

/// Laufender Drag: zuletzt gesehener Pointer in Welt-Koordinaten.
#[derive(Debug, Clone, Copy)]
struct DragCapture {
    last_pointer: Vec2,
}

/// Draggbarer Punkt, dessen Position sich rein aus
/// `origin + basis * magnitude` ableitet.
///
/// `origin` und `magnitude` sind unabhängig setzbare Felder; das Herleiten
/// des einen verändert nie das andere. Die Position wird nie gespeichert,
/// sondern bei jedem Zugriff neu berechnet.
#[derive(Debug, Clone)]
pub struct MovementHandle {
    origin: Vec2,
    basis: Vec2,
    magnitude: f32,
    drag: Option<DragCapture>,
    /// Sichtbarkeit der numerischen Maßanzeige (von der Draft-Engine getoggelt)
    pub dimension_visible: bool,
}

impl MovementHandle {
    /// Erstellt einen Handle mit Magnitude 0.
    /// `basis` muss Einheitslänge haben und bleibt ab Konstruktion fix.
    pub fn new(origin: Vec2, basis: Vec2) -> Self {
        Self::with_magnitude(origin, basis, 0.0)
    }

    /// Erstellt einen Handle mit vorgegebener Magnitude.
    pub fn with_magnitude(origin: Vec2, basis: Vec2, magnitude: f32) -> Self {
        Self {
            origin,
            basis,
            magnitude,
            drag: None,
            dimension_visible: false,
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn basis(&self) -> Vec2 {
        self.basis
    }

    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    pub fn set_magnitude(&mut self, magnitude: f32) {
        self.magnitude = magnitude;
    }

    /// Verschiebung entlang der Basis: `basis * magnitude`.
    pub fn displacement(&self) -> Vec2 {
        self.basis * self.magnitude
    }

    /// Aktuelle Position: `origin + displacement`.
    pub fn position(&self) -> Vec2 {
        self.origin + self.displacement()
    }

    /// Pinnt die Position auf `new_position`, ohne die Magnitude zu ändern:
    /// der Ursprung wird zu `new_position - displacement` hergeleitet.
    pub fn update_location(&mut self, new_position: Vec2) {
        self.origin = new_position - self.displacement();
    }

    // ── Drag ────────────────────────────────────────────────────

    /// Beginnt einen Drag und merkt sich die Pointer-Position.
    pub fn drag_begin(&mut self, pointer: Vec2) {
        self.drag = Some(DragCapture {
            last_pointer: pointer,
        });
    }

    /// Verrechnet die Pointer-Bewegung in die Magnitude.
    ///
    /// Jedes Achsen-Delta wird gespiegelt wenn die zugehörige
    /// Basis-Komponente negativ ist — nach außen ziehen erhöht die Magnitude
    /// unabhängig von der Orientierung der Basis. Beide Achsen-Deltas gehen
    /// additiv ein, es findet keine Projektion auf die Basis statt; auf
    /// schrägen Basen ist die Richtung dadurch nur näherungsweise getroffen.
    ///
    /// Gibt `true` zurück wenn sich die Magnitude geändert hat.
    pub fn drag_update(&mut self, pointer: Vec2) -> bool {
        let Some(capture) = &mut self.drag else {
            return false;
        };
        let mut dx = pointer.x - capture.last_pointer.x;
        let mut dy = pointer.y - capture.last_pointer.y;
        if self.basis.x < 0.0 {
            dx = -dx;
        }
        if self.basis.y < 0.0 {
            dy = -dy;
        }
        capture.last_pointer = pointer;
        let delta = dx + dy;
        if delta == 0.0 {
            return false;
        }
        self.magnitude += delta;
        true
    }

    /// Beendet den Drag und verwirft den Pointer-Zustand.
    pub fn drag_end(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // ── Maßanzeige ──────────────────────────────────────────────

    /// Angezeigte Länge `origin → position` in der gewählten Einheit.
    pub fn dimension_value(&self, measure: &dyn LengthMeasure, meters_per_unit: f32) -> f32 {
        measure.length(self.origin, self.position()) / meters_per_unit
    }

    /// Übernimmt einen eingegebenen Maßwert als neue Magnitude.
    ///
    /// Lineare Reskalierung entlang der bestehenden Richtung:
    /// `magnitude ← (magnitude / länge) * (wert * meter_pro_einheit)`.
    /// Nicht-endliche Eingaben oder eine aktuelle Länge von 0 werden
    /// verworfen, die letzte gültige Magnitude bleibt erhalten.
    pub fn apply_dimension_input(
        &mut self,
        value: f32,
        measure: &dyn LengthMeasure,
        meters_per_unit: f32,
    ) -> bool {
        if !value.is_finite() {
            return false;
        }
        let geodesic = measure.length(self.origin, self.position());
        if !geodesic.is_finite() || geodesic <= 0.0 {
            return false;
        }
        let next = (self.magnitude / geodesic) * (value * meters_per_unit);
        if !next.is_finite() {
            return false;
        }
        self.magnitude = next;
        true
    }
}
