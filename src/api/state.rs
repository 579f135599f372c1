use std::sync::Arc;

use crate::domain::ports::{AgentClient, DocumentAnalyzer, SearchIndex, SpeechRecognizer};
use crate::domain::DomainError;
use crate::infrastructure::{
    AppConfig, AzureDocumentAnalyzer, AzureSearchClient, AzureSpeechRecognizer, FoundryAgent,
};

/// Shared, read-only request state. A `None` client means the service is
/// not configured.
#[derive(Clone)]
pub struct AppState {
    pub search: Option<Arc<dyn SearchIndex>>,
    pub documents: Option<Arc<dyn DocumentAnalyzer>>,
    pub speech: Option<Arc<dyn SpeechRecognizer>>,
    pub agent: Option<Arc<dyn AgentClient>>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            search: None,
            documents: None,
            speech: None,
            agent: None,
            config: Arc::new(config),
        }
    }

    /// Builds a client for every vendor section present in `config`.
    pub fn from_config(config: AppConfig) -> Result<Self, DomainError> {
        let mut state = Self::new(config.clone());

        if let Some(search) = config.search {
            state = state.with_search(Arc::new(AzureSearchClient::new(search)?));
        }
        if let Some(document) = config.document {
            state = state.with_document_analyzer(Arc::new(AzureDocumentAnalyzer::new(document)?));
        }
        if let Some(speech) = config.speech {
            state = state.with_speech_recognizer(Arc::new(AzureSpeechRecognizer::new(speech)?));
        }
        if let Some(agent) = config.agent {
            state = state.with_agent(Arc::new(FoundryAgent::new(agent)?));
        }

        Ok(state)
    }

    pub fn with_search(mut self, search: Arc<dyn SearchIndex>) -> Self {
        self.search = Some(search);
        self
    }

    pub fn with_document_analyzer(mut self, analyzer: Arc<dyn DocumentAnalyzer>) -> Self {
        self.documents = Some(analyzer);
        self
    }

    pub fn with_speech_recognizer(mut self, recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        self.speech = Some(recognizer);
        self
    }

    pub fn with_agent(mut self, agent: Arc<dyn AgentClient>) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Whether each EduVoice vendor service has a client.
    pub fn vendor_services(&self) -> [(&'static str, bool); 3] {
        [
            ("search", self.search.is_some()),
            ("documents", self.documents.is_some()),
            ("speech", self.speech.is_some()),
        ]
    }
}
