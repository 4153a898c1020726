use crate::error::Result;
use crate::github::ReleaseSource;
use crate::llm::Classifier;
use crate::models::{Classification, Release};
use crate::notify::Notifier;
use crate::store::SeenStore;

/// What happened to a single release in one pass through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Already in the ledger; no classifier or notifier call was made.
    AlreadySeen,
    /// Alert delivered and the release marked seen.
    Delivered,
    /// The channel rejected the alert; the release stays unmarked and is
    /// retried verbatim (re-classified, re-notified) next cycle.
    DeliveryFailed,
}

/// Orchestrates one release at a time: dedup check, classify, notify,
/// then a conditional ledger update. Single-threaded by design; only one
/// release is ever mid-pipeline, so the ledger needs no locking.
pub struct ReleaseMonitor {
    source: Box<dyn ReleaseSource>,
    classifier: Box<dyn Classifier>,
    notifier: Box<dyn Notifier>,
    seen: Box<dyn SeenStore>,
    fetch_limit: u32,
}

impl ReleaseMonitor {
    pub fn new(
        source: impl ReleaseSource + 'static,
        classifier: impl Classifier + 'static,
        notifier: Box<dyn Notifier>,
        seen: Box<dyn SeenStore>,
        fetch_limit: u32,
    ) -> Self {
        Self {
            source: Box::new(source),
            classifier: Box::new(classifier),
            notifier,
            seen,
            fetch_limit,
        }
    }

    /// One fetch + process cycle. Fetch failures skip the cycle; they are
    /// logged and retried at the next scheduled run, never fatal.
    pub async fn run_once(&mut self) {
        tracing::info!("Checking for new releases");

        let releases = match self.source.fetch_latest(self.fetch_limit).await {
            Ok(releases) => releases,
            Err(e) => {
                tracing::warn!("Error fetching releases, skipping this cycle: {}", e);
                return;
            }
        };

        if releases.is_empty() {
            tracing::info!("No releases found");
            return;
        }

        tracing::info!("Found {} recent releases", releases.len());

        // The feed is newest first; process oldest first so simultaneous
        // new releases alert in chronological order.
        for release in releases.iter().rev() {
            if let Err(e) = self.process(release).await {
                tracing::error!("Failed to process release {}: {}", release.id, e);
            }
        }
    }

    pub async fn process(&mut self, release: &Release) -> Result<Outcome> {
        if !self.seen.is_new(&release.id) {
            tracing::debug!("Release {} already processed, skipping", release.id);
            return Ok(Outcome::AlreadySeen);
        }

        tracing::info!("Analyzing release: {}", release.title);
        let verdict = match self.classifier.classify(&release.title, &release.body).await {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::warn!("Classification failed for {}: {}", release.title, e);
                Classification::degraded(&e.to_string())
            }
        };
        tracing::info!(
            breaking = verdict.is_breaking,
            severity = %verdict.severity,
            "Analysis result: {}",
            verdict.reason
        );

        if self.notifier.deliver(release, &verdict).await {
            self.seen.mark_seen(&release.id)?;
            tracing::info!("Release {} processed successfully", release.title);
            Ok(Outcome::Delivered)
        } else {
            tracing::warn!(
                "Failed to deliver alert for {}, will retry next cycle",
                release.title
            );
            Ok(Outcome::DeliveryFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::Severity;
    use crate::store::MemoryLedger;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn release(id: &str, title: &str) -> Release {
        Release {
            id: id.to_string(),
            title: title.to_string(),
            body: "notes".to_string(),
            url: format!("https://example.com/{}", title),
        }
    }

    struct FakeSource {
        batch: Vec<Release>,
        fetches: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ReleaseSource for FakeSource {
        async fn fetch_latest(&self, _limit: u32) -> Result<Vec<Release>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.batch.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ReleaseSource for FailingSource {
        async fn fetch_latest(&self, _limit: u32) -> Result<Vec<Release>> {
            Err(Error::GitHubApi("upstream unreachable".to_string()))
        }
    }

    struct FixedClassifier {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Classifier for FixedClassifier {
        async fn classify(&self, _title: &str, _body: &str) -> Result<Classification> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Classification {
                is_breaking: true,
                severity: Severity::High,
                reason: "Hard fork".to_string(),
                affected_components: vec!["consensus".to_string()],
            })
        }

        fn name(&self) -> &str {
            "Fixed"
        }
    }

    struct FailingClassifier;

    #[async_trait]
    impl Classifier for FailingClassifier {
        async fn classify(&self, _title: &str, _body: &str) -> Result<Classification> {
            Err(Error::ClaudeApi("model timed out".to_string()))
        }

        fn name(&self) -> &str {
            "Failing"
        }
    }

    /// Records delivered release ids and the verdict each was delivered
    /// with; delivery success is switchable mid-test.
    struct RecordingNotifier {
        accept: Arc<AtomicBool>,
        delivered: Arc<Mutex<Vec<(String, Classification)>>>,
    }

    impl RecordingNotifier {
        fn accepting() -> (Self, Arc<Mutex<Vec<(String, Classification)>>>) {
            let delivered = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    accept: Arc::new(AtomicBool::new(true)),
                    delivered: delivered.clone(),
                },
                delivered,
            )
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn deliver(&self, release: &Release, verdict: &Classification) -> bool {
            self.delivered
                .lock()
                .unwrap()
                .push((release.id.clone(), verdict.clone()));
            self.accept.load(Ordering::SeqCst)
        }

        fn name(&self) -> &str {
            "Recording"
        }
    }

    fn monitor_with(
        batch: Vec<Release>,
        notifier: RecordingNotifier,
        classifier_calls: Arc<AtomicUsize>,
    ) -> ReleaseMonitor {
        ReleaseMonitor::new(
            FakeSource {
                batch,
                fetches: Arc::new(AtomicUsize::new(0)),
            },
            FixedClassifier {
                calls: classifier_calls,
            },
            Box::new(notifier),
            Box::new(MemoryLedger::new()),
            5,
        )
    }

    #[tokio::test]
    async fn batch_is_processed_oldest_first() {
        // Fetched newest first: ids 3, 1, 2
        let batch = vec![
            release("3", "v3"),
            release("1", "v1"),
            release("2", "v2"),
        ];
        let (notifier, delivered) = RecordingNotifier::accepting();
        let mut monitor = monitor_with(batch, notifier, Arc::new(AtomicUsize::new(0)));

        monitor.run_once().await;

        let order: Vec<String> = delivered.lock().unwrap().iter().map(|(id, _)| id.clone()).collect();
        assert_eq!(order, vec!["2", "1", "3"]);
    }

    #[tokio::test]
    async fn seen_release_skips_classifier_and_notifier() {
        let (notifier, delivered) = RecordingNotifier::accepting();
        let calls = Arc::new(AtomicUsize::new(0));
        let mut monitor = monitor_with(vec![release("1", "v1")], notifier, calls.clone());

        let r = release("1", "v1");
        assert_eq!(monitor.process(&r).await.unwrap(), Outcome::Delivered);
        assert_eq!(monitor.process(&r).await.unwrap(), Outcome::AlreadySeen);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(delivered.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn replaying_identical_batch_delivers_nothing_new() {
        let batch = vec![release("1", "v1"), release("2", "v2")];
        let (notifier, delivered) = RecordingNotifier::accepting();
        let mut monitor = monitor_with(batch, notifier, Arc::new(AtomicUsize::new(0)));

        monitor.run_once().await;
        assert_eq!(delivered.lock().unwrap().len(), 2);

        monitor.run_once().await;
        assert_eq!(delivered.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn failing_classifier_still_delivers_degraded_verdict() {
        let (notifier, delivered) = RecordingNotifier::accepting();
        let mut monitor = ReleaseMonitor::new(
            FakeSource {
                batch: vec![],
                fetches: Arc::new(AtomicUsize::new(0)),
            },
            FailingClassifier,
            Box::new(notifier),
            Box::new(MemoryLedger::new()),
            5,
        );

        let r = release("9", "v9");
        assert_eq!(monitor.process(&r).await.unwrap(), Outcome::Delivered);

        {
            let delivered = delivered.lock().unwrap();
            let (id, verdict) = &delivered[0];
            assert_eq!(id, "9");
            assert!(!verdict.is_breaking);
            assert_eq!(verdict.severity, Severity::Low);
            assert!(verdict.reason.starts_with("analysis failed:"));
            assert_eq!(verdict.affected_components, vec!["unknown"]);
        }

        // Delivery succeeded, so the degraded release is marked seen
        assert_eq!(monitor.process(&r).await.unwrap(), Outcome::AlreadySeen);
    }

    #[tokio::test]
    async fn delivery_failure_leaves_release_unmarked_until_success() {
        let accept = Arc::new(AtomicBool::new(false));
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let notifier = RecordingNotifier {
            accept: accept.clone(),
            delivered: delivered.clone(),
        };
        let calls = Arc::new(AtomicUsize::new(0));
        let mut monitor = monitor_with(vec![], notifier, calls.clone());

        let r = release("5", "v5");

        // Cycle 1: channel outage, release stays unmarked
        assert_eq!(monitor.process(&r).await.unwrap(), Outcome::DeliveryFailed);

        // Cycle 2: channel recovers; the release is re-classified and delivered
        accept.store(true, Ordering::SeqCst);
        assert_eq!(monitor.process(&r).await.unwrap(), Outcome::Delivered);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        // Cycle 3: skipped entirely
        assert_eq!(monitor.process(&r).await.unwrap(), Outcome::AlreadySeen);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(delivered.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn fetch_failure_skips_cycle_without_panicking() {
        let (notifier, delivered) = RecordingNotifier::accepting();
        let mut monitor = ReleaseMonitor::new(
            FailingSource,
            FixedClassifier {
                calls: Arc::new(AtomicUsize::new(0)),
            },
            Box::new(notifier),
            Box::new(MemoryLedger::new()),
            5,
        );

        monitor.run_once().await;
        assert!(delivered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_feed_is_not_an_error() {
        let (notifier, delivered) = RecordingNotifier::accepting();
        let mut monitor = monitor_with(vec![], notifier, Arc::new(AtomicUsize::new(0)));

        monitor.run_once().await;
        assert!(delivered.lock().unwrap().is_empty());
    }
}
