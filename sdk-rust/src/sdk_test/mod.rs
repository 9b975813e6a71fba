//! Test doubles for code built on [`crate::ApiClient`].

mod transport;

pub use transport::{MockResult, MockTransport};
