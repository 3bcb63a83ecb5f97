pub mod capture;
pub mod extract_fields;
