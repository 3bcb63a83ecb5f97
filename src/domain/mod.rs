pub mod capture;
pub mod extraction;
