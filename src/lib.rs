pub mod config;
pub mod error;
pub mod github;
pub mod llm;
pub mod models;
pub mod monitor;
pub mod notify;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use github::{GitHubClient, ReleaseSource};
pub use llm::{Classifier, ClaudeClassifier};
pub use monitor::{ReleaseMonitor, Scheduler};
pub use notify::{ConsoleNotifier, Notifier, SlackNotifier};
pub use store::{FileLedger, MemoryLedger, SeenStore};
