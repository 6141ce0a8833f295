//! Planare Segment-Geometrie: Orthogonal-Basis, Schnittpunkte, Clipping.

use glam::Vec2;

use super::extent::Extent;

/// Zwei Schnittpunkte gelten unterhalb dieses Abstands als identisch.
const DISTINCT_EPS: f32 = 1e-6;

/// Gerichtetes 2-Punkt-Segment in Welt-Koordinaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub p0: Vec2,
    pub p1: Vec2,
}

impl Segment {
    pub fn new(p0: Vec2, p1: Vec2) -> Self {
        Self { p0, p1 }
    }

    /// Mittelpunkt des Segments.
    pub fn midpoint(&self) -> Vec2 {
        self.p0.midpoint(self.p1)
    }

    /// Euklidische Länge.
    pub fn length(&self) -> f32 {
        self.p0.distance(self.p1)
    }

    /// Achsenparallele Bounding-Box der beiden Endpunkte.
    pub fn bounds(&self) -> Extent {
        Extent::new(self.p0.x, self.p0.y, self.p1.x, self.p1.y)
    }
}

/// Einheits-Normale zur Geraden `p0 → p1`.
///
/// Zerlegung über Rise/Run statt einfacher 90°-Rotation, damit die
/// Vorzeichen zur Bildschirm-Achsenkonvention passen: die x-Komponente ist
/// immer `-rise/len`, die y-Komponente `run/len` mit geflipptem Vorzeichen
/// bei fallender Steigung.
///
/// Vorbedingung: `p0 != p1`. Degenerierte Segmente führen zu Division durch
/// Null — der Scanner filtert zu kurze Segmente vor dem Aufruf.
pub fn orthogonal_basis(p0: Vec2, p1: Vec2) -> Vec2 {
    let run = (p1.x - p0.x).abs();
    let rise = (p1.y - p0.y).abs();
    let len = (run * run + rise * rise).sqrt();
    let mut y = run / len;
    if (p0.x - p1.x) * (p0.y - p1.y) < 0.0 {
        y = -y;
    }
    Vec2::new(-rise / len, y)
}

/// Schnittpunkt zweier Segmente in parametrischer Form.
///
/// Gibt nur dann einen Punkt zurück, wenn beide Parameter in [0, 1] liegen.
/// Parallele oder kollineare Segmente liefern `None` — das ist ein Signal,
/// kein Fehler.
pub fn line_intersection(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Option<Vec2> {
    let d1 = p1 - p0;
    let d2 = p3 - p2;
    let denom = d1.perp_dot(d2);
    if denom == 0.0 {
        return None;
    }
    let offset = p2 - p0;
    let s = offset.perp_dot(d2) / denom;
    let t = offset.perp_dot(d1) / denom;
    if !(0.0..=1.0).contains(&s) || !(0.0..=1.0).contains(&t) {
        return None;
    }
    Some(p0 + d1 * s)
}

/// Clippt ein Segment gegen ein achsenparalleles Rechteck.
///
/// - Beide Endpunkte innen → Segment unverändert.
/// - Beide außen → Schnittpunkte mit allen 4 Rechteck-Kanten; bei mindestens
///   zwei verschiedenen Treffern das Segment aus den ersten beiden, sonst
///   `None`. Ein Segment, das exakt eine Ecke streift, kann unter zwei
///   Treffern bleiben und zählt als Fehlschlag.
/// - Genau ein Endpunkt innen → `[Innenpunkt, erster Schnittpunkt]`;
///   ohne Schnittpunkt (geometrisch nicht erreichbar) `None`.
pub fn crop_segment_to_extent(segment: &Segment, extent: &Extent) -> Option<Segment> {
    let inside0 = extent.contains(segment.p0);
    let inside1 = extent.contains(segment.p1);
    if inside0 && inside1 {
        return Some(*segment);
    }

    let corners = extent.corners();
    let edges = [
        (corners[0], corners[1]),
        (corners[1], corners[2]),
        (corners[2], corners[3]),
        (corners[3], corners[0]),
    ];

    if !inside0 && !inside1 {
        let mut hits: Vec<Vec2> = Vec::with_capacity(2);
        for (e0, e1) in edges {
            if let Some(hit) = line_intersection(segment.p0, segment.p1, e0, e1) {
                if !hits.iter().any(|h| h.distance_squared(hit) < DISTINCT_EPS) {
                    hits.push(hit);
                }
            }
            if hits.len() == 2 {
                return Some(Segment::new(hits[0], hits[1]));
            }
        }
        return None;
    }

    let inside = if inside0 { segment.p0 } else { segment.p1 };
    for (e0, e1) in edges {
        if let Some(hit) = line_intersection(segment.p0, segment.p1, e0, e1) {
            return Some(Segment::new(inside, hit));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_orthogonal_basis_is_unit_and_perpendicular() {
        let cases = [
            (Vec2::ZERO, Vec2::new(10.0, 0.0)),
            (Vec2::ZERO, Vec2::new(0.0, 10.0)),
            (Vec2::new(1.0, 2.0), Vec2::new(4.0, 6.0)),
            (Vec2::new(4.0, 6.0), Vec2::new(1.0, 2.0)),
            (Vec2::new(-3.0, 5.0), Vec2::new(2.0, -1.0)),
        ];
        for (p0, p1) in cases {
            let basis = orthogonal_basis(p0, p1);
            assert_relative_eq!(basis.length(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(basis.dot(p1 - p0), 0.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_orthogonal_basis_screen_sign_convention() {
        // Horizontales Segment: Normale zeigt nach +Y
        let basis = orthogonal_basis(Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert_relative_eq!(basis.x, 0.0);
        assert_relative_eq!(basis.y, 1.0);

        // Vertikales Segment: Normale zeigt nach -X
        let basis = orthogonal_basis(Vec2::ZERO, Vec2::new(0.0, 10.0));
        assert_relative_eq!(basis.x, -1.0);
        assert_relative_eq!(basis.y, 0.0);

        // x-Komponente ist nie positiv
        let basis = orthogonal_basis(Vec2::new(2.0, 1.0), Vec2::new(-3.0, 7.0));
        assert!(basis.x <= 0.0);
    }

    #[test]
    fn test_line_intersection_crossing() {
        let hit = line_intersection(
            Vec2::new(-5.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(0.0, -5.0),
            Vec2::new(0.0, 5.0),
        )
        .expect("Schnittpunkt erwartet");
        assert_relative_eq!(hit.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(hit.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_line_intersection_parallel_is_none() {
        let hit = line_intersection(
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(10.0, 1.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_line_intersection_outside_parameter_range() {
        // Die Geraden schneiden sich, die Segmente nicht
        let hit = line_intersection(
            Vec2::ZERO,
            Vec2::new(1.0, 0.0),
            Vec2::new(5.0, -1.0),
            Vec2::new(5.0, 1.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_crop_fully_inside_unchanged() {
        let extent = Extent::new(-10.0, -10.0, 10.0, 10.0);
        let segment = Segment::new(Vec2::new(-5.0, -5.0), Vec2::new(5.0, 5.0));
        let cropped = crop_segment_to_extent(&segment, &extent).expect("Segment erwartet");
        assert_eq!(cropped, segment);
    }

    #[test]
    fn test_crop_fully_outside_is_none() {
        let extent = Extent::new(-10.0, -10.0, 10.0, 10.0);
        let segment = Segment::new(Vec2::new(20.0, 20.0), Vec2::new(30.0, 25.0));
        assert!(crop_segment_to_extent(&segment, &extent).is_none());
    }

    #[test]
    fn test_crop_both_outside_crossing() {
        let extent = Extent::new(-10.0, -10.0, 10.0, 10.0);
        let segment = Segment::new(Vec2::new(-20.0, 0.0), Vec2::new(20.0, 0.0));
        let cropped = crop_segment_to_extent(&segment, &extent).expect("Segment erwartet");
        // Beide Endpunkte liegen auf den vertikalen Kanten
        assert_relative_eq!(cropped.p0.x.abs(), 10.0, epsilon = 1e-4);
        assert_relative_eq!(cropped.p1.x.abs(), 10.0, epsilon = 1e-4);
        assert_relative_eq!(cropped.p0.y, 0.0, epsilon = 1e-4);
        assert_relative_eq!(cropped.p1.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_crop_one_endpoint_inside() {
        let extent = Extent::new(-10.0, -10.0, 10.0, 10.0);
        let segment = Segment::new(Vec2::ZERO, Vec2::new(20.0, 0.0));
        let cropped = crop_segment_to_extent(&segment, &extent).expect("Segment erwartet");
        assert_relative_eq!(cropped.p0.x, 0.0);
        assert_relative_eq!(cropped.p1.x, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_crop_corner_graze_counts_as_miss() {
        // Streift exakt die Ecke (10, 10): nur ein unterscheidbarer
        // Schnittpunkt, wird als Fehlschlag behandelt.
        let extent = Extent::new(-10.0, -10.0, 10.0, 10.0);
        let segment = Segment::new(Vec2::new(0.0, 20.0), Vec2::new(20.0, 0.0));
        assert!(crop_segment_to_extent(&segment, &extent).is_none());
    }

    #[test]
    fn test_segment_bounds_and_midpoint() {
        let segment = Segment::new(Vec2::new(4.0, -2.0), Vec2::new(-4.0, 2.0));
        let bounds = segment.bounds();
        assert_relative_eq!(bounds.min_x, -4.0);
        assert_relative_eq!(bounds.max_y, 2.0);
        assert_relative_eq!(segment.midpoint().x, 0.0);
        assert_relative_eq!(segment.midpoint().y, 0.0);
    }
}
