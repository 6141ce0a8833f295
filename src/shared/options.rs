//! Zentrale Konfiguration für das Sketch-Tool.
//!
//! `SketchOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ── Vorschlags-Scan ─────────────────────────────────────────────────

/// Puffer der Fokus-Region als Anteil der View-Diagonale.
pub const FOCUS_BUFFER_DIAGONAL_FRACTION: f32 = 0.125;
/// Mindest-Diagonale eines Kandidaten-Segments als Anteil der View-Diagonale.
pub const MIN_SEGMENT_DIAGONAL_FRACTION: f32 = 0.1;
/// Kantenlänge einer Dedup-Zelle in Screen-Pixeln.
pub const PROPOSAL_BUCKET_SIZE_PX: f32 = 100.0;

// ── Interaktion ─────────────────────────────────────────────────────

/// Pick-Radius für Handle-Griffe in Screen-Pixeln.
pub const HANDLE_PICK_RADIUS_PX: f32 = 12.0;

/// Laufzeit-Konfiguration des Sketch-Tools.
///
/// Wird als `grundriss_sketch.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchOptions {
    // ── Vorschlags-Scan ─────────────────────────────────────────
    /// Puffer der Fokus-Region als Anteil der View-Diagonale
    pub focus_buffer_diagonal_fraction: f32,
    /// Mindest-Diagonale eines Kandidaten-Segments als Anteil der View-Diagonale
    pub min_segment_diagonal_fraction: f32,
    /// Kantenlänge einer Dedup-Zelle in Screen-Pixeln
    pub proposal_bucket_size_px: f32,

    // ── Interaktion ─────────────────────────────────────────────
    /// Pick-Radius für Handle-Griffe in Screen-Pixeln
    pub handle_pick_radius_px: f32,
    /// Standard-Einheit für die Maßanzeige
    pub default_unit: String,

    // ── Overlay ─────────────────────────────────────────────────
    /// Vorschlags-/Guide-Layer ignoriert das View-Extent-Culling
    /// und bleibt unabhängig vom sichtbaren Ausschnitt gezeichnet.
    #[serde(default = "default_overlay_ignore_view_culling")]
    pub overlay_ignore_view_culling: bool,
}

fn default_overlay_ignore_view_culling() -> bool {
    true
}

impl Default for SketchOptions {
    fn default() -> Self {
        Self {
            focus_buffer_diagonal_fraction: FOCUS_BUFFER_DIAGONAL_FRACTION,
            min_segment_diagonal_fraction: MIN_SEGMENT_DIAGONAL_FRACTION,
            proposal_bucket_size_px: PROPOSAL_BUCKET_SIZE_PX,
            handle_pick_radius_px: HANDLE_PICK_RADIUS_PX,
            default_unit: "m".to_string(),
            overlay_ignore_view_culling: true,
        }
    }
}

impl SketchOptions {
    /// Lädt die Optionen von `path`; bei fehlender oder unlesbarer Datei
    /// werden die Defaults geliefert (mit Warnung im Log).
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(options) => options,
                Err(err) => {
                    log::warn!("Optionen nicht lesbar ({}): {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Speichert die Optionen als TOML nach `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Optionen nicht serialisierbar")?;
        std::fs::write(path, content)
            .with_context(|| format!("Optionen nicht speicherbar: {}", path.display()))?;
        Ok(())
    }

    /// Standard-Pfad: `grundriss_sketch.toml` neben der Binary.
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("grundriss_sketch.toml")
    }
}
