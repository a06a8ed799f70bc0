use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use console_core::{ApplicationInfo, JobRecord, PluginDescriptor, PluginKind};
use console_engine::{load_directory, ConsoleApi, FailureKind, FetchError};

/// In-memory backend; `failing` names the endpoint that errors.
struct FakeApi {
    failing: Option<&'static str>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl FakeApi {
    fn new(failing: Option<&'static str>) -> Self {
        Self {
            failing,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    async fn call<T>(&self, endpoint: &'static str, value: T) -> Result<T, FetchError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.failing == Some(endpoint) {
            Err(FetchError {
                kind: FailureKind::HttpStatus(500),
                message: "boom".into(),
            })
        } else {
            Ok(value)
        }
    }
}

#[async_trait]
impl ConsoleApi for FakeApi {
    async fn about(&self) -> Result<ApplicationInfo, FetchError> {
        self.call(
            "version",
            ApplicationInfo {
                application_name: "Job Controller".into(),
                version: "2.0".into(),
            },
        )
        .await
    }

    async fn plugins(&self, kind: PluginKind) -> Result<Vec<PluginDescriptor>, FetchError> {
        match kind {
            PluginKind::Provider => {
                self.call(
                    "providers",
                    vec![PluginDescriptor::new(kind, "p1", "Provider One")],
                )
                .await
            }
            PluginKind::Publisher => self.call("publishers", Vec::new()).await,
        }
    }

    async fn jobs(&self) -> Result<Vec<JobRecord>, FetchError> {
        Ok(Vec::new())
    }

    async fn job_text(&self, _: &str, _: &str, _: bool) -> Result<String, FetchError> {
        Ok(String::new())
    }

    async fn job_bytes(&self, _: &str, _: &str) -> Result<Vec<u8>, FetchError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn all_three_fetches_run_concurrently_and_build_the_directory() {
    console_logging::initialize_for_tests();
    let api = FakeApi::new(None);

    let bootstrap = load_directory(&api).await.expect("bootstrap");
    assert_eq!(bootstrap.about.version, "2.0");
    assert_eq!(
        bootstrap
            .directory
            .resolve(PluginKind::Provider, "p1")
            .map(|p| p.display_name.as_str()),
        Some("Provider One")
    );
    assert!(bootstrap.directory.plugins(PluginKind::Publisher).is_empty());
    assert_eq!(api.peak.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn any_failed_fetch_fails_the_whole_startup() {
    console_logging::initialize_for_tests();
    for endpoint in ["version", "providers", "publishers"] {
        let api = FakeApi::new(Some(endpoint));
        let err = load_directory(&api).await.unwrap_err();
        assert_eq!(err.endpoint, endpoint);
        assert_eq!(err.source.kind, FailureKind::HttpStatus(500));
    }
}
