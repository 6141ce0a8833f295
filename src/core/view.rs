//! 2D-Kamera und View-Kontext für die Welt↔Screen-Umrechnung.

use glam::Vec2;

use super::extent::Extent;

/// 2D-Kamera mit Pan und Zoom
#[derive(Debug, Clone)]
pub struct MapCamera {
    /// Position der Kamera in Welt-Koordinaten
    pub position: Vec2,
    /// Zoom-Level (1.0 = normal, 2.0 = doppelt so groß)
    pub zoom: f32,
}

impl MapCamera {
    /// Sichtbare Welt-Halbbreite bei Zoom 1.0.
    pub const BASE_WORLD_EXTENT: f32 = 2048.0;
    /// Minimaler Zoom-Faktor.
    pub const ZOOM_MIN: f32 = 0.1;
    /// Maximaler Zoom-Faktor.
    pub const ZOOM_MAX: f32 = 100.0;

    /// Erstellt eine neue Kamera
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    /// Zentriert die Kamera auf einen Punkt
    pub fn look_at(&mut self, target: Vec2) {
        self.position = target;
    }

    /// Verschiebt die Kamera (Pan)
    pub fn pan(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Ändert den Zoom-Level
    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(Self::ZOOM_MIN, Self::ZOOM_MAX);
    }

    /// Sichtbarer Welt-Ausschnitt bei gegebener Viewport-Größe (Pixel).
    pub fn visible_extent(&self, viewport_size: Vec2) -> Extent {
        let aspect = viewport_size.x / viewport_size.y.max(1.0);
        let half = Vec2::new(
            Self::BASE_WORLD_EXTENT * aspect / self.zoom,
            Self::BASE_WORLD_EXTENT / self.zoom,
        );
        Extent::from_center_half(self.position, half)
    }

    /// Konvertiert Screen-Koordinaten zu Welt-Koordinaten.
    /// Berücksichtigt BASE_WORLD_EXTENT, Zoom und Aspekt-Ratio.
    pub fn screen_to_world(&self, screen_pos: Vec2, screen_size: Vec2) -> Vec2 {
        // Screen-Koordinaten zentrieren (-1 bis 1)
        let ndc = (screen_pos / screen_size) * 2.0 - Vec2::ONE;
        let aspect = screen_size.x / screen_size.y;
        Vec2::new(
            ndc.x * Self::BASE_WORLD_EXTENT * aspect / self.zoom,
            ndc.y * Self::BASE_WORLD_EXTENT / self.zoom,
        ) + self.position
    }

    /// Konvertiert Welt-Koordinaten zu Screen-Koordinaten
    /// (Umkehrung von `screen_to_world`).
    pub fn world_to_screen(&self, world_pos: Vec2, screen_size: Vec2) -> Vec2 {
        let aspect = screen_size.x / screen_size.y;
        let offset = world_pos - self.position;
        let ndc = Vec2::new(
            offset.x * self.zoom / (Self::BASE_WORLD_EXTENT * aspect),
            offset.y * self.zoom / Self::BASE_WORLD_EXTENT,
        );
        (ndc + Vec2::ONE) / 2.0 * screen_size
    }

    /// Berechnet den Umrechnungsfaktor von Screen-Pixeln zu Welt-Einheiten.
    pub fn world_per_pixel(&self, viewport_height: f32) -> f32 {
        2.0 * Self::BASE_WORLD_EXTENT / (self.zoom * viewport_height.max(1.0))
    }

    /// Pick-Radius in Welteinheiten aus einem Pixel-Radius.
    pub fn pick_radius_world(&self, viewport_height: f32, pick_radius_px: f32) -> f32 {
        pick_radius_px * self.world_per_pixel(viewport_height)
    }
}

impl Default for MapCamera {
    fn default() -> Self {
        Self::new()
    }
}

/// View-Kontext: sichtbarer Extent, Viewport-Größe und Pixel-Projektion.
///
/// Die Projektion wird ausschließlich für das Screen-Raster der
/// Vorschlags-Deduplizierung benutzt.
pub trait ViewContext {
    /// Sichtbarer Ausschnitt in Welt-Koordinaten.
    fn extent(&self) -> Extent;

    /// Viewport-Größe in Pixeln.
    fn size(&self) -> Vec2;

    /// Projiziert einen Welt-Punkt auf Screen-Pixel.
    fn world_to_pixel(&self, world: Vec2) -> Vec2;
}

/// Konkreter View aus Kamera und Viewport-Größe.
#[derive(Debug, Clone)]
pub struct MapView {
    pub camera: MapCamera,
    /// Viewport-Größe in Pixeln
    pub viewport_size: Vec2,
}

impl MapView {
    pub fn new(camera: MapCamera, viewport_size: Vec2) -> Self {
        Self {
            camera,
            viewport_size,
        }
    }
}

impl ViewContext for MapView {
    fn extent(&self) -> Extent {
        self.camera.visible_extent(self.viewport_size)
    }

    fn size(&self) -> Vec2 {
        self.viewport_size
    }

    fn world_to_pixel(&self, world: Vec2) -> Vec2 {
        self.camera.world_to_screen(world, self.viewport_size)
    }
}
