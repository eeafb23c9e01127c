use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinSet;
use tracing::debug;

use crate::report::Reporter;

use super::fetcher::{Fetch, FetchError};
use super::resource_path::ResourcePath;

/// One slot of a batch: an identifier as requested plus its fixed
/// position. Each spawned fetch owns its copy, so completions in any
/// order write disjoint slots.
#[derive(Clone, Debug)]
pub struct LoadRequest {
    pub id: String,
    pub index: usize,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load `{id}`")]
    Fetch {
        id: String,
        #[source]
        source: FetchError,
    },

    #[error("load task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Fetch every identifier concurrently and resolve once, after all of
/// them have arrived, with payloads in the order the identifiers were
/// given, regardless of the order the responses came back in.
///
/// An empty batch resolves immediately with no results. The first
/// failure resolves the whole batch as that error; fetches still in
/// flight are dropped with the set. Every fetch that actually failed
/// is reported exactly once through `reporter`.
pub async fn load_all<F: Fetch>(
    fetcher: &F,
    reporter: &Reporter,
    ids: &[String],
    mime: &str,
) -> Result<Vec<String>, LoadError> {
    debug!("trying to load {} resources", ids.len());

    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut inflight = JoinSet::new();

    for (index, id) in ids.iter().enumerate() {
        let request = LoadRequest {
            id: id.clone(),
            index,
        };
        let fetcher = fetcher.clone();
        let reporter = Arc::clone(reporter);
        let mime = mime.to_string();

        inflight.spawn(async move {
            let path = ResourcePath::from(request.id.as_str());

            match fetcher.fetch(&path, &mime).await {
                Ok(payload) => {
                    debug!("loaded resource: {}", path.name());
                    Ok((request.index, payload))
                }
                Err(source) => {
                    reporter.report(&format!("Failed to load asset: {}", path.name()));
                    Err(LoadError::Fetch {
                        id: request.id,
                        source,
                    })
                }
            }
        });
    }

    let mut slots: Vec<Option<String>> = vec![None; ids.len()];

    while let Some(joined) = inflight.join_next().await {
        let (index, payload) = joined??;
        slots[index] = Some(payload);
    }

    debug!("requested resources have been loaded");

    // every task resolved and wrote its own slot
    Ok(slots.into_iter().flatten().collect())
}

/// The single-resource degenerate form of the same join.
pub async fn load_one<F: Fetch>(
    fetcher: &F,
    reporter: &Reporter,
    id: &str,
    mime: &str,
) -> Result<String, LoadError> {
    let mut payloads = load_all(fetcher, reporter, &[id.to_string()], mime).await?;
    // a one-item batch yields exactly one payload
    Ok(payloads.pop().unwrap())
}
