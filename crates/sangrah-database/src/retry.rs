//! Bounded retry of version-number collisions.

use std::future::Future;

use tracing::{debug, warn};

use sangrah_core::result::AppResult;
use sangrah_core::types::id::DocumentId;

/// Run `attempt` until it succeeds, fails with anything other than
/// `Conflict`, or has been retried `max_retries` times.
///
/// Each call to `attempt` must allocate afresh, so a retry never reuses
/// the number that collided.
pub async fn retry_on_conflict<T, F, Fut>(
    document_id: DocumentId,
    max_retries: u32,
    mut attempt: F,
) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut retries = 0u32;

    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_conflict() && retries < max_retries => {
                retries += 1;
                debug!(
                    document_id = %document_id,
                    attempt = retries,
                    "Version number collision, retrying with a fresh allocation"
                );
            }
            Err(e) => {
                if e.is_conflict() {
                    warn!(
                        document_id = %document_id,
                        attempts = retries + 1,
                        "Giving up on version append after repeated collisions"
                    );
                }
                return Err(e);
            }
        }
    }
}
