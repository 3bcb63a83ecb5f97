pub mod extraction_client;
