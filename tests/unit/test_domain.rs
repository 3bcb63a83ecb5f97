use gatehouse::domain::{
    capture::{CaptureError, CaptureSession, CaptureState, PedestrianEntryForm, VehicleEntryForm},
    extraction::{
        ExtractionError, ExtractionFields, ExtractionOutcome, ImagePayload,
        LicensePlateExtraction, VisitorIdExtraction,
    },
};
use serde_json::json;

#[test]
fn image_payload_accepts_only_image_data_uris() {
    assert!(ImagePayload::parse("data:image/webp;base64,UklGRg==").is_ok());
    assert_eq!(ImagePayload::parse(""), Err(ExtractionError::MissingInput));
    assert!(matches!(
        ImagePayload::parse("data:application/pdf;base64,JVBERi0="),
        Err(ExtractionError::InvalidInput(_))
    ));
}

#[test]
fn caller_side_errors_are_flagged() {
    assert!(ExtractionError::MissingInput.is_caller_side());
    assert!(ExtractionError::InvalidInput("x".into()).is_caller_side());
    assert!(!ExtractionError::Inference("x".into()).is_caller_side());
}

#[test]
fn flows_expose_distinct_failure_messages() {
    assert_eq!(
        LicensePlateExtraction::FAILURE_MESSAGE,
        "Failed to extract license plate."
    );
    assert_eq!(
        VisitorIdExtraction::FAILURE_MESSAGE,
        "Failed to extract information from the ID."
    );
    assert_ne!(LicensePlateExtraction::SLUG, VisitorIdExtraction::SLUG);
}

#[test]
fn outcome_is_never_both_fields_and_error() {
    let extracted: ExtractionOutcome<LicensePlateExtraction> =
        serde_json::from_value(json!({ "licensePlate": "ABC-123", "confidence": 0.7 })).unwrap();
    assert!(extracted.is_extracted());

    let failed: ExtractionOutcome<LicensePlateExtraction> =
        serde_json::from_value(json!({ "error": "Failed to extract license plate." })).unwrap();
    assert!(!failed.is_extracted());

    let neither = serde_json::from_value::<ExtractionOutcome<LicensePlateExtraction>>(json!({}));
    assert!(neither.is_err());
}

#[test]
fn pedestrian_session_submits_manual_values_from_idle() {
    let mut session = CaptureSession::<PedestrianEntryForm>::new();
    session
        .edit_form(|form| {
            form.visitor_name = "Rosa Vargas".into();
            form.visitor_type = "employee".into();
            form.destination = "Pool house".into();
        })
        .unwrap();

    let submission = session.submit().unwrap();
    assert_eq!(submission.form.visitor_name, "Rosa Vargas");
    assert_eq!(submission.photo::<VisitorIdExtraction>(), None);
    assert!(submission.photos.is_empty());
    assert_eq!(session.state::<VisitorIdExtraction>(), CaptureState::Submitted);
}

#[test]
fn vehicle_session_rejects_short_driver_name() {
    let mut session = CaptureSession::<VehicleEntryForm>::new();
    session
        .edit_form(|form| {
            form.license_plate = "ABC-123".into();
            form.driver_name = "J".into();
            form.visitor_type = "visit".into();
            form.destination = "Tower A - 101".into();
            form.vehicle_type = "truck".into();
            form.vehicle_brand = "Volvo".into();
            form.vehicle_color = "blue".into();
        })
        .unwrap();

    match session.submit() {
        Err(CaptureError::InvalidForm(errors)) => {
            let fields = errors.field_errors();
            assert!(fields.contains_key("driver_name"));
            assert_eq!(fields.len(), 1);
        }
        other => panic!("expected invalid form, got {:?}", other),
    }
}

#[test]
fn vehicle_session_keeps_separate_slots_for_id_and_plate() {
    let mut session = CaptureSession::<VehicleEntryForm>::new();
    session
        .capture_photo::<VisitorIdExtraction>("data:image/jpeg;base64,SUQ=")
        .unwrap();

    assert_eq!(session.state::<VisitorIdExtraction>(), CaptureState::PhotoReady);
    assert_eq!(session.state::<LicensePlateExtraction>(), CaptureState::Idle);
    assert_eq!(
        session.begin_extraction::<LicensePlateExtraction>(),
        Err(CaptureError::NoPhoto)
    );
    assert!(session.can_extract::<VisitorIdExtraction>());
}
