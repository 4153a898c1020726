pub mod claude;
pub mod parser;
pub mod prompts;
pub mod provider;

pub use claude::ClaudeClassifier;
pub use provider::Classifier;
