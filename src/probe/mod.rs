//! Probe module - runs independent network checks concurrently.
//!
//! Every lookup that touches more than one endpoint (platform presence,
//! subdomain discovery, port scanning) goes through [`FanOut`]: each probe
//! runs once under its own timeout, failures are isolated to the probe that
//! produced them, and the caller gets exactly one [`ProbeResult`] per probe.

pub mod dns;
pub mod http;
pub mod tcp;
pub mod tls;
mod traits;

pub use dns::{DnsResolver, SubdomainProbe};
pub use http::{build_client, ClientConfig, PlatformProbe, WebProbe};
pub use tcp::TcpConnectProbe;
pub use tls::{fetch_certificate, CertificateInfo};
pub use traits::{BoxedProbe, Evidence, Probe, ProbeOutcome, ProbeResult};

use crate::error::ProbeError;
use futures::stream::{self, StreamExt};
use futures::FutureExt;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};

/// How many probes may be in flight at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Concurrency {
    /// All probes start immediately.
    Unbounded,
    /// At most `n` probes in flight; a new one starts as soon as one ends.
    Window(usize),
}

/// Concurrent probe executor.
#[derive(Debug, Clone)]
pub struct FanOut {
    concurrency: Concurrency,
    timeout: Duration,
    show_progress: bool,
    progress_message: String,
}

impl FanOut {
    /// Create an unbounded executor with a per-probe timeout.
    pub fn new(timeout: Duration) -> Self {
        Self {
            concurrency: Concurrency::Unbounded,
            timeout,
            show_progress: false,
            progress_message: String::new(),
        }
    }

    /// Limit the number of probes in flight.
    pub fn with_window(mut self, window: usize) -> Self {
        self.concurrency = Concurrency::Window(window.max(1));
        self
    }

    /// Draw a progress bar while probes run.
    pub fn with_progress(mut self, message: impl Into<String>) -> Self {
        self.show_progress = true;
        self.progress_message = message.into();
        self
    }

    /// Run every probe once and return one result per probe, in completion
    /// order. Never fails: errors, timeouts and panics become
    /// [`ProbeOutcome::Error`] results.
    pub async fn run(&self, probes: Vec<BoxedProbe>) -> Vec<ProbeResult> {
        let total = probes.len();
        if total == 0 {
            return Vec::new();
        }

        let limit = match self.concurrency {
            Concurrency::Unbounded => total,
            Concurrency::Window(n) => n,
        };
        let progress = self.progress_bar(total);
        let timeout = self.timeout;

        tracing::debug!(total, limit, timeout_ms = timeout.as_millis() as u64, "starting fan-out");

        let results: Vec<ProbeResult> = stream::iter(probes)
            .map(|probe| {
                let progress = progress.clone();

                async move {
                    let result = execute(probe.as_ref(), timeout).await;

                    if let Some(ref pb) = progress {
                        pb.inc(1);
                        if result.is_found() {
                            pb.set_message(format!("found: {}", result.label));
                        }
                    }

                    result
                }
            })
            .buffer_unordered(limit)
            .collect()
            .await;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        results
    }

    fn progress_bar(&self, total: usize) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} {prefix} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        ) {
            pb.set_style(style.progress_chars("=>-"));
        }
        pb.set_prefix(self.progress_message.clone());
        Some(pb)
    }
}

/// Run one probe under the timeout, catching panics.
async fn execute(probe: &dyn Probe, limit: Duration) -> ProbeResult {
    let label = probe.label().to_string();
    let endpoint = probe.endpoint();
    let start = Instant::now();

    let attempt = AssertUnwindSafe(tokio::time::timeout(limit, probe.probe()))
        .catch_unwind()
        .await;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    let (outcome, detail) = match attempt {
        Ok(Ok(Ok(evidence))) => {
            let outcome = if evidence.found {
                ProbeOutcome::Found
            } else {
                ProbeOutcome::NotFound
            };
            (outcome, evidence.detail)
        }
        Ok(Ok(Err(e))) => (ProbeOutcome::Error(e.to_string()), None),
        Ok(Err(_)) => (ProbeOutcome::Error(ProbeError::Timeout.to_string()), None),
        Err(_) => {
            tracing::warn!(label = %label, "probe panicked");
            (ProbeOutcome::Error("probe panicked".to_string()), None)
        }
    };

    tracing::debug!(label = %label, endpoint = %endpoint, outcome = %outcome, elapsed_ms, "probe finished");

    ProbeResult::new(label, endpoint, outcome)
        .with_detail(detail)
        .with_elapsed(elapsed_ms)
}

/// Derived counts over a set of probe results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeSummary {
    pub total: usize,
    pub found: usize,
    pub not_found: usize,
    pub errors: usize,
}

impl ProbeSummary {
    pub fn of(results: &[ProbeResult]) -> Self {
        results.iter().fold(Self::default(), |mut acc, r| {
            acc.total += 1;
            match r.outcome {
                ProbeOutcome::Found => acc.found += 1,
                ProbeOutcome::NotFound => acc.not_found += 1,
                ProbeOutcome::Error(_) => acc.errors += 1,
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeResultOf;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    enum Behavior {
        Found,
        Absent,
        Fail,
        Hang,
        Panic,
    }

    struct MockProbe {
        label: String,
        behavior: Behavior,
        in_flight: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
    }

    impl MockProbe {
        fn boxed(label: &str, behavior: Behavior) -> BoxedProbe {
            Self::tracked(label, behavior, Arc::default(), Arc::default())
        }

        fn tracked(
            label: &str,
            behavior: Behavior,
            in_flight: Arc<AtomicUsize>,
            peak: Arc<AtomicUsize>,
        ) -> BoxedProbe {
            Box::new(Self {
                label: label.to_string(),
                behavior,
                in_flight,
                peak,
            })
        }
    }

    #[async_trait]
    impl Probe for MockProbe {
        fn label(&self) -> &str {
            &self.label
        }

        fn endpoint(&self) -> String {
            format!("mock://{}", self.label)
        }

        async fn probe(&self) -> ProbeResultOf<Evidence> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            match self.behavior {
                Behavior::Found => Ok(Evidence::found().with_detail("200")),
                Behavior::Absent => Ok(Evidence::not_found()),
                Behavior::Fail => Err(ProbeError::ConnectionRefused),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(Evidence::found())
                }
                Behavior::Panic => panic!("probe blew up"),
            }
        }
    }

    #[tokio::test]
    async fn test_every_probe_yields_one_result() {
        let mut probes = Vec::new();
        for i in 0..3 {
            probes.push(MockProbe::boxed(&format!("ok-{}", i), Behavior::Found));
        }
        for i in 0..3 {
            probes.push(MockProbe::boxed(&format!("fail-{}", i), Behavior::Fail));
        }
        for i in 0..4 {
            probes.push(MockProbe::boxed(&format!("hang-{}", i), Behavior::Hang));
        }

        let results = FanOut::new(Duration::from_millis(100)).run(probes).await;
        let summary = ProbeSummary::of(&results);

        assert_eq!(results.len(), 10);
        assert_eq!(summary.found, 3);
        assert_eq!(summary.not_found + summary.errors, 7);
        assert!(results
            .iter()
            .filter(|r| r.label.starts_with("hang"))
            .all(|r| r.outcome == ProbeOutcome::Error("connection timed out".into())));
    }

    #[tokio::test]
    async fn test_window_bounds_in_flight() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let probes = (0..12)
            .map(|i| {
                MockProbe::tracked(
                    &format!("p{}", i),
                    Behavior::Absent,
                    Arc::clone(&in_flight),
                    Arc::clone(&peak),
                )
            })
            .collect();

        let results = FanOut::new(Duration::from_secs(5))
            .with_window(2)
            .run(probes)
            .await;

        assert_eq!(results.len(), 12);
        assert!(peak.load(Ordering::SeqCst) <= 2);
        assert_eq!(ProbeSummary::of(&results).not_found, 12);
    }

    #[tokio::test]
    async fn test_panicking_probe_is_isolated() {
        let probes = vec![
            MockProbe::boxed("before", Behavior::Found),
            MockProbe::boxed("boom", Behavior::Panic),
            MockProbe::boxed("after", Behavior::Found),
        ];

        let results = FanOut::new(Duration::from_secs(5)).run(probes).await;

        assert_eq!(results.len(), 3);
        let boom = results.iter().find(|r| r.label == "boom").unwrap();
        assert!(boom.outcome.is_error());
        assert_eq!(ProbeSummary::of(&results).found, 2);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let results = FanOut::new(Duration::from_secs(1)).run(Vec::new()).await;
        assert!(results.is_empty());
    }
}
