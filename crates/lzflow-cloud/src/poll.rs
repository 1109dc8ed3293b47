//! Bounded fixed-interval polling
//!
//! Every provisioning step waits for convergence through [`poll`]: the status
//! check runs immediately, then once per interval until it reports ready, fails,
//! or the wait budget runs out.

use crate::error::{CloudError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Result of a single status check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// Not converged yet, check again after the interval
    Pending,
    /// Converged, carrying the final observed value
    Ready(T),
}

impl<T> PollOutcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, PollOutcome::Ready(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PollOutcome<U> {
        match self {
            PollOutcome::Pending => PollOutcome::Pending,
            PollOutcome::Ready(value) => PollOutcome::Ready(f(value)),
        }
    }
}

/// Wait budget and interval for one polled step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub max_wait: Duration,
    pub interval: Duration,
}

impl PollConfig {
    pub fn new(max_wait: Duration, interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(CloudError::InvalidConfig(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        Ok(Self { max_wait, interval })
    }

    /// Shorthand for whole-second budgets, the unit every step uses
    pub fn from_secs(max_wait_secs: u64, interval_secs: u64) -> Result<Self> {
        Self::new(
            Duration::from_secs(max_wait_secs),
            Duration::from_secs(interval_secs),
        )
    }

    /// Built-in step budgets; `interval_secs` is a non-zero literal at every call site
    pub(crate) const fn preset(max_wait_secs: u64, interval_secs: u64) -> Self {
        Self {
            max_wait: Duration::from_secs(max_wait_secs),
            interval: Duration::from_secs(interval_secs),
        }
    }

    /// Upper bound on status checks: `floor(max_wait / interval) + 1`
    pub fn max_attempts(&self) -> u64 {
        let ratio = self.max_wait.as_nanos() / self.interval.as_nanos().max(1);
        u64::try_from(ratio).unwrap_or(u64::MAX).saturating_add(1)
    }
}

/// Poll `check` until it reports [`PollOutcome::Ready`] or the budget is spent.
///
/// # Errors
/// * [`CloudError::PollTimeout`] once another sleep would exceed `max_wait`
/// * any error returned by `check`, propagated without a further attempt
pub async fn poll<T, F, Fut>(name: &str, config: PollConfig, mut check: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<PollOutcome<T>>>,
{
    if config.interval.is_zero() {
        return Err(CloudError::InvalidConfig(format!(
            "poll interval for {name} must be greater than zero"
        )));
    }

    let mut waited = Duration::ZERO;
    let mut attempt: u64 = 0;

    loop {
        attempt += 1;
        tracing::debug!("Polling on {} (attempt {})", name, attempt);

        if let PollOutcome::Ready(value) = check().await? {
            tracing::info!("{} is successful", name);
            return Ok(value);
        }

        if waited + config.interval > config.max_wait {
            tracing::warn!(
                "{} did not complete within {}s ({} attempts)",
                name,
                config.max_wait.as_secs(),
                attempt
            );
            return Err(CloudError::PollTimeout {
                step: name.to_string(),
                max_wait: config.max_wait,
            });
        }

        tracing::info!("{} not complete, scheduling retry...", name);
        sleep(config.interval).await;
        waited += config.interval;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tokio::time::Instant;

    fn config(max_wait: u64, interval: u64) -> PollConfig {
        PollConfig::from_secs(max_wait, interval).unwrap()
    }

    #[test]
    fn test_zero_interval_rejected() {
        let result = PollConfig::from_secs(10, 0);
        assert!(matches!(result, Err(CloudError::InvalidConfig(_))));
    }

    #[test]
    fn test_max_attempts() {
        assert_eq!(config(10, 5).max_attempts(), 3);
        assert_eq!(config(12, 5).max_attempts(), 3);
        assert_eq!(config(300, 5).max_attempts(), 61);
        assert_eq!(config(3, 5).max_attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_on_first_check_never_sleeps() {
        let calls = Cell::new(0u32);
        let start = Instant::now();

        let value = poll("instant", config(60, 5), || {
            calls.set(calls.get() + 1);
            async { Ok(PollOutcome::Ready("done")) }
        })
        .await
        .unwrap();

        assert_eq!(value, "done");
        assert_eq!(calls.get(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_after_pending_checks() {
        let calls = Cell::new(0u32);
        let start = Instant::now();

        let value = poll("eventually", config(60, 5), || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move {
                if n < 3 {
                    Ok(PollOutcome::Pending)
                } else {
                    Ok(PollOutcome::Ready(n))
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(value, 3);
        assert_eq!(start.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_after_exact_attempts_and_sleeps() {
        for (max_wait, interval) in [(10, 5), (12, 5), (7, 7), (1, 1), (4, 5)] {
            let calls = Cell::new(0u64);
            let start = Instant::now();
            let cfg = config(max_wait, interval);

            let err = poll("never", cfg, || {
                calls.set(calls.get() + 1);
                async { Ok::<_, CloudError>(PollOutcome::<()>::Pending) }
            })
            .await
            .unwrap_err();

            let expected_sleeps = max_wait / interval;
            assert_eq!(calls.get(), expected_sleeps + 1, "M={max_wait} P={interval}");
            assert_eq!(start.elapsed(), Duration::from_secs(expected_sleeps * interval));
            assert_eq!(calls.get(), cfg.max_attempts());
            match err {
                CloudError::PollTimeout { step, max_wait: budget } => {
                    assert_eq!(step, "never");
                    assert_eq!(budget, Duration::from_secs(max_wait));
                }
                other => panic!("expected PollTimeout, got {other:?}"),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_propagates_without_retry() {
        let calls = Cell::new(0u32);
        let start = Instant::now();

        let err = poll("doomed", config(600, 5), || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move {
                if n == 2 {
                    Err(CloudError::TerminalResourceFailure {
                        step: "doomed".to_string(),
                        state: "Failed".to_string(),
                    })
                } else {
                    Ok(PollOutcome::<()>::Pending)
                }
            }
        })
        .await
        .unwrap_err();

        assert!(matches!(err, CloudError::TerminalResourceFailure { .. }));
        assert_eq!(calls.get(), 2);
        assert_eq!(start.elapsed(), Duration::from_secs(5));
    }

    #[test]
    fn test_outcome_map() {
        assert_eq!(PollOutcome::Ready(2).map(|v| v * 2), PollOutcome::Ready(4));
        assert_eq!(PollOutcome::<i32>::Pending.map(|v| v * 2), PollOutcome::Pending);
        assert!(!PollOutcome::<()>::Pending.is_ready());
    }
}
