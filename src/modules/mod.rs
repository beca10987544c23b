pub mod artifacts;
pub mod ingest;
