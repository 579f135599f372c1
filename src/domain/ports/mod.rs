mod agent;
mod document_analyzer;
mod search_index;
mod speech;

pub use agent::AgentClient;
pub use document_analyzer::DocumentAnalyzer;
pub use search_index::SearchIndex;
pub use speech::SpeechRecognizer;
