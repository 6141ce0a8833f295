//! Zwei-Zustands-Steuerung: Handles vorschlagen ↔ Form zeichnen.

use glam::Vec2;

use crate::core::{ReferenceSource, ViewContext};
use crate::shared::SketchOptions;

use super::draft::{DraftQuad, DraftSession};
use super::scanner::{HandleProposal, ProposalScanner};

/// Zustand der Zeichensteuerung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchState {
    /// Kandidaten-Handles werden angeboten, keine Session aktiv
    ProposingHandles,
    /// Genau eine Session aktiv, Vorschlags-Scan ausgesetzt
    Drawing,
}

/// Signal an die Außenwelt (Rendering / Persistenz).
#[derive(Debug, Clone)]
pub enum SketchEvent {
    /// Session gestartet — Geometrie des entstehenden Vierecks
    DrawStarted { quad: DraftQuad },
    /// Session bestätigt — das finale Viereck wurde committed
    DrawEnded { quad: DraftQuad },
    /// Session abgebrochen — verworfene Geometrie, kein Commit
    DrawAborted { quad: DraftQuad },
}

/// Ziel-Store für bestätigte Features.
pub trait FeatureSink {
    /// Nimmt das fertige Viereck als geschlossenen 4-Ring entgegen.
    fn commit(&mut self, ring: &[Vec2]);
}

/// Steuert den Wechsel zwischen Vorschlags- und Zeichenmodus.
///
/// Besitzt den Scanner und — nur während des Zeichnens — genau eine
/// `DraftSession`. Jeder Übergang zurück in den Vorschlagsmodus verwirft
/// die Session vollständig und invalidiert den Scanner-Cache, so dass der
/// nächste `evaluate` von Grund auf neu scannt.
pub struct SketchController {
    options: SketchOptions,
    scanner: ProposalScanner,
    session: Option<DraftSession>,
}

impl SketchController {
    pub fn new(options: SketchOptions) -> Self {
        Self {
            options,
            scanner: ProposalScanner::new(),
            session: None,
        }
    }

    pub fn state(&self) -> SketchState {
        if self.session.is_some() {
            SketchState::Drawing
        } else {
            SketchState::ProposingHandles
        }
    }

    pub fn options(&self) -> &SketchOptions {
        &self.options
    }

    /// Kandidaten des letzten Scans (während des Zeichnens eingefroren,
    /// nicht zur Anzeige gedacht).
    pub fn proposals(&self) -> &[HandleProposal] {
        self.scanner.proposals()
    }

    /// Aktive Session, falls im Zeichenmodus.
    pub fn session(&self) -> Option<&DraftSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut DraftSession> {
        self.session.as_mut()
    }

    /// Aktualisiert die Vorschläge; während einer Session komplett ausgesetzt.
    /// Gibt `true` zurück wenn neu gescannt wurde.
    pub fn evaluate(&mut self, source: &dyn ReferenceSource, view: &dyn ViewContext) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.scanner.evaluate(source, view, &self.options)
    }

    /// Pointer-Down in Welt-Koordinaten.
    ///
    /// Im Vorschlagsmodus greift er den nächstgelegenen Kandidaten-Handle
    /// und startet eine Session; im Zeichenmodus greift er einen der drei
    /// Session-Handles.
    pub fn pointer_down(&mut self, pos: Vec2, pick_radius: f32) -> Option<SketchEvent> {
        if let Some(session) = &mut self.session {
            session.begin_drag(pos, pick_radius);
            return None;
        }

        let grabbed = self
            .scanner
            .proposals()
            .iter()
            .map(|p| (p, p.handle.position().distance(pos)))
            .filter(|(_, dist)| *dist <= pick_radius)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(p, _)| p)?;

        let session = DraftSession::from_proposal(grabbed);
        let quad = session.quad();
        self.session = Some(session);
        log::info!("Zeichensession gestartet");
        Some(SketchEvent::DrawStarted { quad })
    }

    /// Leitet eine Pointer-Bewegung an den laufenden Drag weiter.
    pub fn drag_update(&mut self, pos: Vec2) {
        if let Some(session) = &mut self.session {
            session.drag_update(pos);
        }
    }

    /// Beendet den laufenden Drag.
    pub fn drag_end(&mut self) {
        if let Some(session) = &mut self.session {
            session.drag_end();
        }
    }

    /// Bestätigt die Session: committed den geschlossenen Ring in `sink`
    /// und wechselt zurück in den Vorschlagsmodus.
    pub fn confirm(&mut self, sink: &mut dyn FeatureSink) -> Option<SketchEvent> {
        let session = self.session.take()?;
        let quad = session.quad();
        sink.commit(&quad.closed_ring());
        self.scanner.invalidate();
        log::info!("Zeichensession bestätigt");
        Some(SketchEvent::DrawEnded { quad })
    }

    /// Bricht die Session ab; nichts wird committed.
    pub fn cancel(&mut self) -> Option<SketchEvent> {
        let session = self.session.take()?;
        self.scanner.invalidate();
        log::info!("Zeichensession abgebrochen");
        Some(SketchEvent::DrawAborted {
            quad: session.quad(),
        })
    }
}

impl Default for SketchController {
    fn default() -> Self {
        Self::new(SketchOptions::default())
    }
}
