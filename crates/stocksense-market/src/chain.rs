//! Ordered fallback over interchangeable providers.
//!
//! [`try_chain`] attempts each candidate in order and returns the first
//! success. A failure of any kind (transport, malformed or empty response)
//! advances to the next candidate; later candidates are never invoked once
//! one succeeds. The same combinator is used across vendors and, nested,
//! across one vendor's model variants.

use std::fmt::Display;
use std::future::Future;

use thiserror::Error;

/// Every candidate in a chain failed (or the chain was empty).
#[derive(Debug, Error)]
#[error("{chain} chain exhausted after {attempts} attempt(s)")]
pub struct ChainExhausted {
    pub chain: &'static str,
    pub attempts: usize,
    /// One `"<candidate>: <error>"` entry per failed attempt, in order.
    pub errors: Vec<String>,
}

/// Try `attempt` on each candidate in order until one succeeds.
///
/// # Errors
///
/// Returns [`ChainExhausted`] when no candidate succeeds.
pub async fn try_chain<C, T, E, F, Fut>(
    chain: &'static str,
    candidates: impl IntoIterator<Item = C>,
    mut attempt: F,
) -> Result<T, ChainExhausted>
where
    C: Display,
    E: Display,
    F: FnMut(C) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut errors = Vec::new();
    for candidate in candidates {
        let label = candidate.to_string();
        match attempt(candidate).await {
            Ok(value) => {
                if !errors.is_empty() {
                    tracing::debug!(
                        chain,
                        candidate = %label,
                        failed_before = errors.len(),
                        "fallback chain recovered"
                    );
                }
                return Ok(value);
            }
            Err(e) => {
                tracing::warn!(chain, candidate = %label, error = %e, "candidate failed, trying next");
                errors.push(format!("{label}: {e}"));
            }
        }
    }

    Err(ChainExhausted {
        chain,
        attempts: errors.len(),
        errors,
    })
}
