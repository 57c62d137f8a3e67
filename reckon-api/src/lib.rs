//! Reckon API wire contract.
//!
//! Everything the console knows about the backend's HTTP surface lives here:
//! request/response types, the `{data: ...}` envelope normalizer, and the
//! structured error body. No I/O - the HTTP clients live in `reckon-tui`.

pub mod envelope;
pub mod error;
pub mod types;
