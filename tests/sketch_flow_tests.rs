//! Integrationstests für den kompletten Zeichen-Ablauf:
//! - Vorschlags-Scan über den ViewContext
//! - Session-Start per Pointer-Down, Drag der drei Handles
//! - Confirm/Cancel mit Commit in den GeoJSON-Store

use approx::assert_relative_eq;
use glam::Vec2;
use grundriss_sketch::{
    GeoJsonStore, HandleRole, MapCamera, MapView, PlanarLength, ReferenceGeometry, ReferenceStore,
    SketchController, SketchEvent, SketchOptions, SketchState, UnitTable, ViewContext,
};

/// Kamera auf dem Ursprung, quadratischer Viewport:
/// sichtbarer Ausschnitt [-2048, 2048] in beiden Achsen.
fn view() -> MapView {
    MapView::new(MapCamera::new(), Vec2::new(1000.0, 1000.0))
}

/// Store mit einer langen horizontalen Referenzlinie durch den Ursprung.
fn store_with_center_line() -> ReferenceStore {
    let mut store = ReferenceStore::new();
    store.add(ReferenceGeometry::LineString(vec![
        Vec2::new(-1500.0, 0.0),
        Vec2::new(1500.0, 0.0),
    ]));
    store
}

fn assert_vec_eq(actual: Vec2, expected: Vec2) {
    assert_relative_eq!(actual.x, expected.x, epsilon = 1e-3);
    assert_relative_eq!(actual.y, expected.y, epsilon = 1e-3);
}

#[test]
fn test_scan_proposes_handle_on_reference_line() {
    let store = store_with_center_line();
    let view = view();
    let mut controller = SketchController::new(SketchOptions::default());

    assert_eq!(controller.state(), SketchState::ProposingHandles);
    assert!(controller.evaluate(&store, &view));
    assert_eq!(controller.proposals().len(), 1);
    assert_vec_eq(controller.proposals()[0].handle.position(), Vec2::ZERO);

    // Unveränderter Repaint löst keinen Neuscan aus
    assert!(!controller.evaluate(&store, &view));
}

#[test]
fn test_full_draw_flow_with_confirm() {
    let store = store_with_center_line();
    let view = view();
    let mut controller = SketchController::new(SketchOptions::default());
    let mut sink = GeoJsonStore::new();
    controller.evaluate(&store, &view);

    // Pointer-Down auf dem Vorschlag startet die Session
    let started = controller.pointer_down(Vec2::ZERO, 50.0);
    assert!(matches!(started, Some(SketchEvent::DrawStarted { .. })));
    assert_eq!(controller.state(), SketchState::Drawing);

    // Während der Session ist der Scan komplett ausgesetzt
    assert!(!controller.evaluate(&store, &view));

    // Scale-Handle nach oben ziehen
    assert!(controller.pointer_down(Vec2::ZERO, 50.0).is_none());
    controller.drag_update(Vec2::new(0.0, 300.0));
    controller.drag_end();

    let quad = controller.session().expect("Session erwartet").quad();
    assert_vec_eq(quad.corners[0], Vec2::new(-1500.0, 0.0));
    assert_vec_eq(quad.corners[1], Vec2::new(1500.0, 0.0));
    assert_vec_eq(quad.corners[2], Vec2::new(1500.0, 300.0));
    assert_vec_eq(quad.corners[3], Vec2::new(-1500.0, 300.0));

    // Confirm committed genau ein Feature und beendet die Session
    let ended = controller.confirm(&mut sink).expect("DrawEnded erwartet");
    assert!(matches!(ended, SketchEvent::DrawEnded { .. }));
    assert_eq!(controller.state(), SketchState::ProposingHandles);
    assert_eq!(sink.len(), 1);
    assert_eq!(sink.rings()[0].len(), 5);
    assert_vec_eq(sink.rings()[0][2], Vec2::new(1500.0, 300.0));

    // Nach dem Commit wird von Grund auf neu gescannt
    assert!(controller.evaluate(&store, &view));
    assert_eq!(controller.proposals().len(), 1);
}

#[test]
fn test_cancel_commits_nothing() {
    let store = store_with_center_line();
    let view = view();
    let mut controller = SketchController::new(SketchOptions::default());
    let mut sink = GeoJsonStore::new();
    controller.evaluate(&store, &view);

    controller.pointer_down(Vec2::ZERO, 50.0);
    controller.pointer_down(Vec2::ZERO, 50.0);
    controller.drag_update(Vec2::new(0.0, 120.0));
    controller.drag_end();

    let aborted = controller.cancel().expect("DrawAborted erwartet");
    match aborted {
        SketchEvent::DrawAborted { quad } => {
            assert_vec_eq(quad.corners[2], Vec2::new(1500.0, 120.0));
        }
        other => panic!("DrawAborted erwartet, war {other:?}"),
    }
    assert_eq!(controller.state(), SketchState::ProposingHandles);
    assert!(sink.is_empty());

    // Confirm ohne Session ist ein No-Op
    assert!(controller.confirm(&mut sink).is_none());
    assert!(sink.is_empty());
}

#[test]
fn test_pointer_down_outside_pick_radius_stays_proposing() {
    let store = store_with_center_line();
    let view = view();
    let mut controller = SketchController::new(SketchOptions::default());
    controller.evaluate(&store, &view);

    assert!(controller.pointer_down(Vec2::new(500.0, 500.0), 50.0).is_none());
    assert_eq!(controller.state(), SketchState::ProposingHandles);
}

#[test]
fn test_dimension_feedback_in_feet() {
    let store = store_with_center_line();
    let view = view();
    let mut controller = SketchController::new(SketchOptions::default());
    controller.evaluate(&store, &view);
    controller.pointer_down(Vec2::ZERO, 50.0);
    controller.pointer_down(Vec2::ZERO, 50.0);
    controller.drag_update(Vec2::new(0.0, 30.48));
    controller.drag_end();

    let units = UnitTable::default();
    let feet = units.factor("ft").expect("ft registriert");
    let session = controller.session().expect("Session erwartet");
    assert_relative_eq!(
        session.dimension_value(HandleRole::Scale, &PlanarLength, feet),
        100.0,
        epsilon = 0.01
    );

    // Eingabe in Fuß rechnet auf die Magnitude zurück
    let session = controller.session_mut().expect("Session erwartet");
    assert!(session.apply_dimension_input(HandleRole::Scale, 200.0, &PlanarLength, feet));
    assert_relative_eq!(
        session.handle(HandleRole::Scale).magnitude(),
        60.96,
        epsilon = 0.01
    );
}

#[test]
fn test_view_change_triggers_rescan() {
    let store = store_with_center_line();
    let mut controller = SketchController::new(SketchOptions::default());

    let initial = view();
    assert!(controller.evaluate(&store, &initial));

    let mut moved = view();
    moved.camera.pan(Vec2::new(400.0, 0.0));
    assert!(controller.evaluate(&store, &moved));
    assert!(!controller.evaluate(&store, &moved));
}

#[test]
fn test_geojson_pipeline_roundtrip() {
    // Referenzlinien aus GeoJSON laden, zeichnen, Ergebnis exportieren
    let input = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "LineString",
                "coordinates": [[-1500.0, 0.0], [1500.0, 0.0]]
            }
        }]
    }"#;
    let mut store = ReferenceStore::new();
    store.extend(grundriss_sketch::parse_reference_collection(input).expect("Import erwartet"));

    let view = view();
    let mut controller = SketchController::new(SketchOptions::default());
    let mut sink = GeoJsonStore::new();
    controller.evaluate(&store, &view);
    controller.pointer_down(Vec2::ZERO, 50.0);
    controller.pointer_down(Vec2::ZERO, 50.0);
    controller.drag_update(Vec2::new(0.0, 250.0));
    controller.drag_end();
    controller.confirm(&mut sink);

    let exported = sink.to_json().expect("Export erwartet");
    assert!(exported.contains("\"Polygon\""));
    assert_eq!(view.extent().center(), Vec2::ZERO);
}
