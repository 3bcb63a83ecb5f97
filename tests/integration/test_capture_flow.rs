use super::helpers::{StubBehavior, serve, spawn_app, tiny_jpeg_data_uri};
use gatehouse::{
    application::capture::workflow::CaptureWorkflow,
    domain::{
        capture::{CaptureSession, CaptureState, CompletionDisposition, PedestrianEntryForm, VehicleEntryForm},
        extraction::{LicensePlateExtraction, VisitorIdExtraction},
    },
    infrastructure::client::extraction_client::HttpExtractionClient,
};
use serde_json::json;
use std::time::Duration;

fn client_for(addr: std::net::SocketAddr) -> HttpExtractionClient {
    HttpExtractionClient::new(format!("http://{}", addr), Duration::from_secs(5))
        .expect("failed to build client")
}

fn fill_vehicle_details(form: &mut VehicleEntryForm) {
    form.visitor_type = "visit".into();
    form.destination = "Tower A - 201".into();
    form.vehicle_type = "car".into();
    form.vehicle_brand = "Nissan".into();
    form.vehicle_color = "grey".into();
}

#[tokio::test]
async fn failed_extraction_then_manual_plate_is_submitted() {
    let app = spawn_app(StubBehavior::Fail("deadline exceeded"));
    let client = client_for(serve(app.app.clone()).await);

    let workflow = CaptureWorkflow::new(CaptureSession::<VehicleEntryForm>::new());
    workflow
        .capture_photo::<LicensePlateExtraction>(tiny_jpeg_data_uri())
        .await
        .expect("capture failed");

    let disposition = workflow
        .extract::<LicensePlateExtraction>(&client)
        .await
        .expect("extraction not started");
    assert_eq!(
        disposition,
        CompletionDisposition::Failed("Failed to extract license plate.".into())
    );
    assert_eq!(
        workflow.state::<LicensePlateExtraction>().await,
        CaptureState::PhotoReady
    );

    workflow
        .edit_form(|form| {
            form.license_plate = "ABC-123".into();
            form.driver_name = "Marta Quispe".into();
            fill_vehicle_details(form);
        })
        .await
        .expect("edit rejected");

    let submission = workflow.submit().await.expect("submission rejected");
    assert_eq!(submission.form.license_plate, "ABC-123");
    assert_eq!(submission.confidence::<LicensePlateExtraction>(), None);
    assert_eq!(app.provider.calls(), 1);
}

#[tokio::test]
async fn remote_extraction_prefills_pedestrian_form() {
    let app = spawn_app(StubBehavior::Respond(json!({
        "visitorName": "Jane Doe",
        "visitorDocumentNumber": "X1234567",
        "confidence": 0.92
    })));
    let client = client_for(serve(app.app.clone()).await);

    let workflow = CaptureWorkflow::new(CaptureSession::<PedestrianEntryForm>::new());
    workflow
        .capture_photo::<VisitorIdExtraction>(tiny_jpeg_data_uri())
        .await
        .expect("capture failed");

    assert_eq!(
        workflow.extract::<VisitorIdExtraction>(&client).await,
        Ok(CompletionDisposition::Applied)
    );
    let form = workflow.form().await;
    assert_eq!(form.visitor_name, "Jane Doe");
    assert_eq!(form.document_number.as_deref(), Some("X1234567"));
    assert_eq!(
        workflow.confidence::<VisitorIdExtraction>().await,
        Some(0.92)
    );
}

#[tokio::test]
async fn vehicle_form_is_prefilled_from_id_and_plate_photos() {
    let id_app = spawn_app(StubBehavior::Respond(json!({
        "visitorName": "Carlos Ruiz",
        "visitorDocumentNumber": "47001234",
        "confidence": 0.88
    })));
    let plate_app = spawn_app(StubBehavior::Respond(json!({
        "licensePlate": "PBX-4521",
        "confidence": 0.74
    })));
    let id_client = client_for(serve(id_app.app.clone()).await);
    let plate_client = client_for(serve(plate_app.app.clone()).await);

    let workflow = CaptureWorkflow::new(CaptureSession::<VehicleEntryForm>::new());
    workflow
        .capture_photo::<VisitorIdExtraction>(tiny_jpeg_data_uri())
        .await
        .expect("capture failed");
    workflow
        .capture_photo::<LicensePlateExtraction>(tiny_jpeg_data_uri())
        .await
        .expect("capture failed");

    assert_eq!(
        workflow.extract::<VisitorIdExtraction>(&id_client).await,
        Ok(CompletionDisposition::Applied)
    );
    assert_eq!(
        workflow.extract::<LicensePlateExtraction>(&plate_client).await,
        Ok(CompletionDisposition::Applied)
    );

    workflow
        .edit_form(fill_vehicle_details)
        .await
        .expect("edit rejected");
    let submission = workflow.submit().await.expect("submission rejected");
    assert_eq!(submission.form.driver_name, "Carlos Ruiz");
    assert_eq!(submission.form.document_number.as_deref(), Some("47001234"));
    assert_eq!(submission.form.license_plate, "PBX-4521");
    assert_eq!(submission.confidence::<VisitorIdExtraction>(), Some(0.88));
    assert_eq!(submission.confidence::<LicensePlateExtraction>(), Some(0.74));
    assert_eq!(submission.photos.len(), 2);
    assert_eq!(id_app.provider.calls(), 1);
    assert_eq!(plate_app.provider.calls(), 1);
}

#[tokio::test]
async fn unreachable_server_degrades_to_manual_entry() {
    let client = HttpExtractionClient::new("http://127.0.0.1:9", Duration::from_secs(2))
        .expect("failed to build client");
    let workflow = CaptureWorkflow::new(CaptureSession::<PedestrianEntryForm>::new());
    workflow
        .capture_photo::<VisitorIdExtraction>(tiny_jpeg_data_uri())
        .await
        .expect("capture failed");

    assert_eq!(
        workflow.extract::<VisitorIdExtraction>(&client).await,
        Ok(CompletionDisposition::Failed(
            "Failed to extract information from the ID.".into()
        ))
    );
    assert_eq!(
        workflow.state::<VisitorIdExtraction>().await,
        CaptureState::PhotoReady
    );
}
