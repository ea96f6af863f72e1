//! Config file payloads: static contents, remote fetching, and writing

pub mod fetcher;
pub mod payload;
pub mod writer;

pub use fetcher::{ensure_yaml_document, HttpFetcher, PayloadFetcher};
pub use payload::StaticPayload;
pub use writer::{write_bytes, write_payload};
