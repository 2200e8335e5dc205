//! The two retry policies used by the completion client.
//!
//! `retry_transport` guards a single remote call; `retry_turn` guards a whole
//! generate turn and is what redoes the turn from scratch when structured
//! output fails to parse. Both back off for `2^n` seconds between attempts,
//! with no jitter and no cap.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

use super::error::LlmError;

fn backoff_delay(exponent: u32) -> Duration {
    Duration::from_secs(1u64 << exponent)
}

/// Invoke `call` up to `max_attempts` times.
///
/// The last attempt's error is re-raised unchanged once the budget is spent;
/// between attempts the task suspends for `2^attempts` seconds, so the first
/// delay is two seconds.
pub async fn retry_transport<T, F, Fut>(max_attempts: u32, mut call: F) -> Result<T, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    let mut attempts = 0;
    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempts += 1;
                if attempts >= max_attempts {
                    return Err(err);
                }
                warn!(attempts, error = %err, "remote call failed, backing off");
                sleep(backoff_delay(attempts)).await;
            }
        }
    }
}

/// Invoke `turn` up to `max_retries` times, redoing the whole turn on failure.
///
/// A [`LlmError::ContentParse`] failure retries immediately; every other
/// failure backs off for `2^retry_count` seconds first. Exhaustion surfaces
/// as a single counted error, dropping the per-attempt detail.
pub async fn retry_turn<T, F, Fut>(max_retries: u32, mut turn: F) -> Result<T, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    let mut retry_count = 0;
    loop {
        match turn().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                retry_count += 1;
                let parse_failure = matches!(err, LlmError::ContentParse(_));
                if retry_count >= max_retries {
                    return Err(if parse_failure {
                        LlmError::JsonRetriesExhausted {
                            retries: max_retries,
                        }
                    } else {
                        LlmError::RetriesExhausted {
                            retries: max_retries,
                        }
                    });
                }
                if parse_failure {
                    warn!(retry_count, "structured output did not parse, redoing turn");
                } else {
                    warn!(retry_count, error = %err, "turn failed, backing off before redoing it");
                    sleep(backoff_delay(retry_count)).await;
                }
            }
        }
    }
}
