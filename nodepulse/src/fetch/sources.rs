//! Concurrent subscription source download.

use std::sync::Arc;

use tokio::task::JoinSet;

use super::client::AsyncHttpClient;
use super::error::FetchError;
use crate::bundle::decode_bundle;
use crate::log::Logger;
use crate::{log_debug, log_error, log_info, log_warn};

/// Fetch every source concurrently and return their descriptor lines.
///
/// Bodies are kept in source order regardless of completion order. Each
/// successful body is bundle-decoded when it is base64 and used as-is
/// otherwise. Failed or empty sources are logged and skipped; if no source
/// yields a single descriptor line the fetch fails with
/// [`FetchError::NoDescriptors`].
pub async fn fetch_sources<C: AsyncHttpClient>(
    client: Arc<C>,
    urls: &[String],
    logger: Arc<dyn Logger>,
) -> Result<Vec<String>, FetchError> {
    if urls.is_empty() {
        return Err(FetchError::NoSources);
    }

    let mut tasks = JoinSet::new();
    for (index, url) in urls.iter().enumerate() {
        let client = Arc::clone(&client);
        let url = url.clone();
        tasks.spawn(async move {
            let result = client.get(&url).await;
            (index, result)
        });
    }

    let mut bodies: Vec<Option<String>> = vec![None; urls.len()];
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = match joined {
            Ok(pair) => pair,
            Err(e) => {
                log_warn!(logger, "Fetch task failed: {}", e);
                continue;
            }
        };
        match result {
            Ok(bytes) if !bytes.is_empty() => {
                let text = String::from_utf8_lossy(&bytes);
                let decoded = decode_bundle(&text);
                log_debug!(
                    logger,
                    "Fetched {} ({} bytes, {})",
                    urls[index],
                    bytes.len(),
                    if decoded.was_decoded() { "base64" } else { "plain" }
                );
                bodies[index] = Some(decoded.into_text());
            }
            Ok(_) => log_warn!(logger, "Empty response from {}", urls[index]),
            Err(e) => log_warn!(logger, "Failed to fetch {}: {}", urls[index], e),
        }
    }

    let succeeded = bodies.iter().filter(|b| b.is_some()).count();
    if succeeded == 0 {
        return Err(FetchError::AllSourcesFailed(urls.len()));
    }

    let lines: Vec<String> = bodies
        .into_iter()
        .flatten()
        .flat_map(|body| {
            body.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect();

    if lines.is_empty() {
        log_error!(
            logger,
            "{} of {} sources responded but none held descriptor lines",
            succeeded,
            urls.len()
        );
        return Err(FetchError::NoDescriptors);
    }

    log_info!(
        logger,
        "Fetched {}/{} sources, {} lines",
        succeeded,
        urls.len(),
        lines.len()
    );
    Ok(lines)
}
