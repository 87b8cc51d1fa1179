use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Result of a best-effort collaborator call.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub degraded: bool,
}

impl<T> Outcome<T> {
    fn fresh(value: T) -> Self {
        Self {
            value,
            degraded: false,
        }
    }

    fn fallback(value: T) -> Self {
        Self {
            value,
            degraded: true,
        }
    }
}

/// Awaits `call` for at most `timeout`; errors and timeouts yield `fallback()` flagged as degraded.
pub async fn best_effort<T, E, F, D>(
    label: &'static str,
    timeout: Duration,
    call: F,
    fallback: D,
) -> Outcome<T>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
    D: FnOnce() -> T,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(value)) => Outcome::fresh(value),
        Ok(Err(err)) => {
            warn!(call = label, error = %err, "collaborator failed; using fallback");
            Outcome::fallback(fallback())
        }
        Err(_) => {
            warn!(
                call = label,
                timeout_ms = timeout.as_millis() as u64,
                "collaborator timed out; using fallback"
            );
            Outcome::fallback(fallback())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_through_successful_calls() {
        let outcome = best_effort(
            "ok",
            Duration::from_millis(50),
            async { Ok::<_, String>(7) },
            || 0,
        )
        .await;
        assert_eq!(outcome, Outcome::fresh(7));
    }

    #[tokio::test]
    async fn errors_fall_back() {
        let outcome = best_effort(
            "err",
            Duration::from_millis(50),
            async { Err::<u8, _>("boom") },
            || 1,
        )
        .await;
        assert!(outcome.degraded);
        assert_eq!(outcome.value, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_calls_time_out() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, String>("late")
        };
        let outcome = best_effort("slow", Duration::from_millis(10), slow, || "placeholder").await;
        assert!(outcome.degraded);
        assert_eq!(outcome.value, "placeholder");
    }
}
