pub mod extraction;
pub mod health;
