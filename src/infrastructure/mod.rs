pub mod client;
pub mod inference;
