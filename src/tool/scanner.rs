//! Scan der Referenz-Geometrie nach Kandidaten-Handles.

use std::collections::HashSet;

use crate::core::{
    crop_segment_to_extent, orthogonal_basis, Extent, ReferenceSource, Segment, ViewContext,
};
use crate::shared::SketchOptions;

use super::handle::MovementHandle;

/// Kandidat für den Start einer Zeichensession.
#[derive(Debug, Clone)]
pub struct HandleProposal {
    /// Vorgeschlagener Handle (Magnitude 0) am Mittelpunkt des sichtbaren Segments
    pub handle: MovementHandle,
    /// Auf den sichtbaren Ausschnitt geclipptes Segment (Highlight-Layer)
    pub highlight: Segment,
    /// Ursprüngliches, ungeclipptes Segment (Provenienz)
    pub source: Segment,
}

/// Scannt Referenz-Geometrien und schlägt deduplizierte Handles vor.
///
/// Der Scan läuft nur wenn sich die Quell-Revision oder der View-Extent
/// gegenüber dem letzten Durchlauf geändert haben — unveränderte Repaints
/// lösen keine Neuberechnung aus.
#[derive(Debug, Default)]
pub struct ProposalScanner {
    cached: Option<(u64, Extent)>,
    proposals: Vec<HandleProposal>,
}

impl ProposalScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aktuelle Kandidaten des letzten Scans.
    pub fn proposals(&self) -> &[HandleProposal] {
        &self.proposals
    }

    /// Vergisst den Cache — der nächste `evaluate` scannt neu.
    pub fn invalidate(&mut self) {
        self.cached = None;
        self.proposals.clear();
    }

    /// Aktualisiert die Kandidaten. Gibt `true` zurück wenn neu gescannt wurde.
    pub fn evaluate(
        &mut self,
        source: &dyn ReferenceSource,
        view: &dyn ViewContext,
        options: &SketchOptions,
    ) -> bool {
        let key = (source.revision(), view.extent());
        if self
            .cached
            .as_ref()
            .is_some_and(|cached| cached.0 == key.0 && cached.1 == key.1)
        {
            return false;
        }
        self.proposals = scan(source, view, options);
        self.cached = Some(key);
        true
    }
}

/// Ein kompletter Scan-Durchlauf über alle Geometrien in der Fokus-Region.
fn scan(
    source: &dyn ReferenceSource,
    view: &dyn ViewContext,
    options: &SketchOptions,
) -> Vec<HandleProposal> {
    let view_extent = view.extent();
    let view_diagonal = view_extent.diagonal();
    if view_diagonal <= 0.0 {
        return Vec::new();
    }

    let focus = view_extent.buffered(view_diagonal * options.focus_buffer_diagonal_fraction);
    let min_diagonal = view_diagonal * options.min_segment_diagonal_fraction;
    let bucket_size = options.proposal_bucket_size_px.max(1.0);

    let mut occupied: HashSet<(i64, i64)> = HashSet::new();
    let mut proposals: Vec<HandleProposal> = Vec::new();

    for geometry in source.geometries_in(&focus) {
        geometry.for_each_segment(&mut |segment| {
            // Anteil innerhalb der Fokus-Region
            let Some(in_focus) = crop_segment_to_extent(&segment, &focus) else {
                return;
            };
            // Zu kurz auf dem Bildschirm → kein brauchbarer Anker
            if in_focus.bounds().diagonal() < min_diagonal {
                return;
            }
            // Für die Handle-Platzierung auf den sichtbaren Ausschnitt clippen
            let Some(visible) = crop_segment_to_extent(&segment, &view_extent) else {
                return;
            };
            let midpoint = visible.midpoint();
            // Degenerierte Reststücke vor der Basis-Berechnung aussortieren
            if midpoint.distance_squared(visible.p1) <= f32::EPSILON {
                return;
            }
            // Dedup über das Screen-Raster: ein Vorschlag pro Zelle, erster gewinnt
            let px = view.world_to_pixel(midpoint);
            let cell = (
                (px.x / bucket_size).floor() as i64,
                (px.y / bucket_size).floor() as i64,
            );
            if !occupied.insert(cell) {
                return;
            }
            let basis = orthogonal_basis(midpoint, visible.p1);
            proposals.push(HandleProposal {
                handle: MovementHandle::new(midpoint, basis),
                highlight: visible,
                source: segment,
            });
        });
    }

    log::debug!("Vorschlags-Scan: {} Kandidaten", proposals.len());
    proposals
}
