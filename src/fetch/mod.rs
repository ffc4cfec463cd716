// src/fetch/mod.rs
// =============================================================================
// Fetching pages over HTTP.
//
// Submodules:
// - cache: on-disk response cache keyed by URL
// - client: reqwest client that consults the cache before the network
// =============================================================================

mod cache;
mod client;

pub use cache::ResponseCache;
pub use client::CachedClient;
