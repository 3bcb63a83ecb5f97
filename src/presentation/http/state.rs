use crate::{
    application::extract_fields::use_case::ExtractFieldsUseCase, config::Config,
    infrastructure::inference::traits::InferenceProvider,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub inference: Arc<dyn InferenceProvider>,
    pub extractor: ExtractFieldsUseCase,
}

impl AppState {
    pub fn new(config: Config, inference: Arc<dyn InferenceProvider>) -> Self {
        Self {
            extractor: ExtractFieldsUseCase::new(inference.clone()),
            config,
            inference,
        }
    }
}
