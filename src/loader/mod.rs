// Resource loading: one fetch per resource, and the batch join that
// delivers N concurrent fetches as one ordered result set.

mod fetcher;
mod join;
mod resource_path;

#[cfg(test)]
pub mod testing;

pub use fetcher::{Fetch, HttpFetcher};
pub use join::load_all;
