//! Search state, the endpoint client and view selection

pub mod backend;
pub mod error;
pub mod result;
pub mod share;
pub mod store;
pub mod view;

pub use backend::HttpBackend;
pub use result::SearchResult;
pub use share::{QuerySink, ShareLink};
pub use store::SearchStore;
