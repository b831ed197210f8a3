use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::{classifier::Classifier, extractor::ExtractorRegistry};

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ExtractorRegistry>,
    pub classifier: Option<Arc<dyn Classifier>>,
    /// Fires on shutdown; in-flight extractions are abandoned.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(registry: ExtractorRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            classifier: None,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }
}
