use crate::domain::extraction::{LicensePlateExtraction, VisitorIdExtraction};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

/// Copies extracted values into a form. Fields stay editable afterwards.
pub trait Prefill<F> {
    fn prefill(&mut self, fields: &F);
}

/// Vehicle check-in at the gate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VehicleEntryForm {
    #[validate(length(min = 1, message = "License plate is required."))]
    pub license_plate: String,

    #[validate(length(min = 2, message = "Name must be at least 2 characters."))]
    pub driver_name: String,

    pub document_number: Option<String>,

    #[validate(length(min = 1, message = "Please select a visitor type."))]
    pub visitor_type: String,

    #[validate(length(min = 1, message = "Please select a destination."))]
    pub destination: String,

    #[validate(length(min = 1, message = "Please select a vehicle type."))]
    pub vehicle_type: String,

    #[validate(length(min = 1, message = "Please select a vehicle brand."))]
    pub vehicle_brand: String,

    #[validate(length(min = 1, message = "Please select a vehicle color."))]
    pub vehicle_color: String,
}

impl Prefill<LicensePlateExtraction> for VehicleEntryForm {
    fn prefill(&mut self, fields: &LicensePlateExtraction) {
        self.license_plate = fields.license_plate.clone();
    }
}

/// The driver's ID photo fills in who is driving.
impl Prefill<VisitorIdExtraction> for VehicleEntryForm {
    fn prefill(&mut self, fields: &VisitorIdExtraction) {
        self.driver_name = fields.visitor_name.clone();
        self.document_number = Some(fields.visitor_document_number.clone());
    }
}

/// Pedestrian check-in at the gate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PedestrianEntryForm {
    #[validate(length(min = 2, message = "Name must be at least 2 characters."))]
    pub visitor_name: String,

    pub document_number: Option<String>,

    #[validate(length(min = 1, message = "Please select a visitor type."))]
    pub visitor_type: String,

    #[validate(length(min = 1, message = "Please select a destination."))]
    pub destination: String,
}

impl Prefill<VisitorIdExtraction> for PedestrianEntryForm {
    fn prefill(&mut self, fields: &VisitorIdExtraction) {
        self.visitor_name = fields.visitor_name.clone();
        self.document_number = Some(fields.visitor_document_number.clone());
    }
}
