//! Draft-Engine: leitet das entstehende Viereck und seine Guides
//! aus drei Handles ab.

use std::cmp::Ordering;

use glam::Vec2;

use crate::core::units::LengthMeasure;
use crate::core::Segment;

use super::handle::MovementHandle;
use super::scanner::HandleProposal;

/// Die vier Ecken des entstehenden Vierecks.
///
/// Die Ecken-Reihenfolge ist über alle Neuberechnungen stabil:
/// 0/1 = verschobene Original-Endpunkte, 2/3 = skalierte Gegenseite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DraftQuad {
    pub corners: [Vec2; 4],
}

impl DraftQuad {
    /// Geschlossener 4-Ring: erster Punkt am Ende wiederholt.
    pub fn closed_ring(&self) -> [Vec2; 5] {
        let [a, b, c, d] = self.corners;
        [a, b, c, d, a]
    }
}

/// Rolle eines Handles innerhalb einer Session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleRole {
    /// Streckt die Gegenseite entlang der Orthogonal-Basis
    Scale,
    /// Verschiebt die ganze Form entlang des Ursprungssegments
    MoveX,
    /// Verschiebt die ganze Form entlang der Orthogonal-Basis
    MoveY,
}

/// Eine laufende Zeichensession: drei Handles, Viereck, Guides.
///
/// Alle Neuberechnungen laufen als ein einziger azyklischer Durchlauf pro
/// Eingabe-Ereignis: erst das Viereck und die Guides aus den aktuellen
/// Verschiebungen, danach die abhängigen Handle-Ursprünge per direkter
/// Feldzuweisung. Das Herleiten eines Ursprungs ändert nie eine Magnitude,
/// daher kann kein Durchlauf sich selbst erneut anstoßen.
#[derive(Debug, Clone)]
pub struct DraftSession {
    /// Ursprüngliches Segment, aus dem der Vorschlag entstand
    anchor: Segment,
    scale: MovementHandle,
    move_x: MovementHandle,
    move_y: MovementHandle,
    quad: DraftQuad,
    x_guide: Segment,
    y_guide: Segment,
    dragging: Option<HandleRole>,
}

impl DraftSession {
    /// Startet eine Session aus einem gegriffenen Vorschlag.
    ///
    /// Der Scale-Handle ist der Vorschlags-Handle selbst; die beiden
    /// Move-Handles werden mit Magnitude 0 auf den Kanten-Mittelpunkten
    /// des (anfangs entarteten) Vierecks synthetisiert.
    pub fn from_proposal(proposal: &HandleProposal) -> Self {
        let anchor = proposal.source;
        let mut scale = proposal.handle.clone();
        scale.dimension_visible = true;

        let along = (anchor.p1 - anchor.p0).normalize_or_zero();
        let move_x = MovementHandle::new(anchor.p0, along);
        let move_y = MovementHandle::new(anchor.midpoint(), scale.basis());

        let mut session = Self {
            anchor,
            scale,
            move_x,
            move_y,
            quad: DraftQuad {
                corners: [anchor.p0, anchor.p1, anchor.p1, anchor.p0],
            },
            x_guide: Segment::new(anchor.p1, anchor.p1),
            y_guide: Segment::new(anchor.p1, anchor.p1),
            dragging: None,
        };
        session.recompute_geometry();
        session
    }

    // ── Zugriff ─────────────────────────────────────────────────

    pub fn quad(&self) -> DraftQuad {
        self.quad
    }

    pub fn anchor(&self) -> Segment {
        self.anchor
    }

    /// Guide entlang der X-Verschiebung (aktuelle Ecke 1 → unverschobener Punkt).
    pub fn x_guide(&self) -> Segment {
        self.x_guide
    }

    /// Guide entlang der Y-Verschiebung (Original-Ankerpunkt → verschobener Punkt).
    pub fn y_guide(&self) -> Segment {
        self.y_guide
    }

    pub fn handle(&self, role: HandleRole) -> &MovementHandle {
        match role {
            HandleRole::Scale => &self.scale,
            HandleRole::MoveX => &self.move_x,
            HandleRole::MoveY => &self.move_y,
        }
    }

    fn handle_mut(&mut self, role: HandleRole) -> &mut MovementHandle {
        match role {
            HandleRole::Scale => &mut self.scale,
            HandleRole::MoveX => &mut self.move_x,
            HandleRole::MoveY => &mut self.move_y,
        }
    }

    pub fn dragging(&self) -> Option<HandleRole> {
        self.dragging
    }

    // ── Neuberechnung ───────────────────────────────────────────

    /// Viereck und Guides aus den aktuellen Verschiebungen ableiten.
    fn recompute_geometry(&mut self) {
        let translate = self.move_x.displacement() + self.move_y.displacement();
        let stretch = self.scale.displacement();
        let a0 = self.anchor.p0;
        let a1 = self.anchor.p1;
        self.quad.corners = [
            a0 + translate,
            a1 + translate,
            a1 + translate + stretch,
            a0 + translate + stretch,
        ];

        let q1 = self.quad.corners[1];
        let x_displacement = self.move_x.displacement();
        self.x_guide = Segment::new(q1, q1 - x_displacement);
        self.y_guide = Segment::new(a1, q1 - x_displacement);
    }

    /// Ein kompletter Durchlauf nach Änderung eines Handles: Geometrie neu
    /// ableiten, dann die abhängigen Handles nachziehen.
    fn apply_change(&mut self, changed: HandleRole) {
        self.recompute_geometry();
        let [q0, q1, _q2, q3] = self.quad.corners;
        let base_mid = q0.midpoint(q1);
        let side_mid = q3.midpoint(q0);

        match changed {
            HandleRole::Scale => {
                // Move-Handles bleiben auf den Kanten-Mittelpunkten gepinnt,
                // ihre Magnituden bleiben unberührt
                self.move_x.update_location(side_mid);
                self.move_y.update_location(base_mid);
            }
            HandleRole::MoveX => {
                self.scale.set_origin(base_mid);
                self.move_y.update_location(base_mid);
                self.move_x.dimension_visible = self.move_x.magnitude() != 0.0;
            }
            HandleRole::MoveY => {
                self.scale.set_origin(base_mid);
                self.move_x.update_location(side_mid);
                self.move_y.dimension_visible = self.move_y.magnitude() != 0.0;
            }
        }
    }

    // ── Drag ────────────────────────────────────────────────────

    /// Greift den nächstgelegenen Handle innerhalb von `pick_radius`.
    /// Bei Gleichstand gewinnt Scale vor MoveX vor MoveY.
    pub fn begin_drag(&mut self, pos: Vec2, pick_radius: f32) -> bool {
        let mut candidates = [
            (HandleRole::Scale, self.scale.position().distance(pos)),
            (HandleRole::MoveX, self.move_x.position().distance(pos)),
            (HandleRole::MoveY, self.move_y.position().distance(pos)),
        ];
        candidates.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

        let (role, dist) = candidates[0];
        if dist > pick_radius {
            return false;
        }
        self.dragging = Some(role);
        self.handle_mut(role).drag_begin(pos);
        true
    }

    /// Aktualisiert den laufenden Drag und rechnet bei Änderung neu.
    pub fn drag_update(&mut self, pos: Vec2) {
        let Some(role) = self.dragging else {
            return;
        };
        if self.handle_mut(role).drag_update(pos) {
            self.apply_change(role);
        }
    }

    /// Beendet den laufenden Drag.
    pub fn drag_end(&mut self) {
        if let Some(role) = self.dragging.take() {
            self.handle_mut(role).drag_end();
        }
    }

    // ── Maßanzeige ──────────────────────────────────────────────

    /// Angezeigte Länge eines Handles in der gewählten Einheit.
    pub fn dimension_value(
        &self,
        role: HandleRole,
        measure: &dyn LengthMeasure,
        meters_per_unit: f32,
    ) -> f32 {
        self.handle(role).dimension_value(measure, meters_per_unit)
    }

    /// Übernimmt einen eingegebenen Maßwert; bei Erfolg wird neu berechnet.
    pub fn apply_dimension_input(
        &mut self,
        role: HandleRole,
        value: f32,
        measure: &dyn LengthMeasure,
        meters_per_unit: f32,
    ) -> bool {
        if self
            .handle_mut(role)
            .apply_dimension_input(value, measure, meters_per_unit)
        {
            self.apply_change(role);
            return true;
        }
        false
    }
}
