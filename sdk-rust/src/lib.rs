mod client;
mod errors;
mod opentelemetry;
pub mod sdk_test;
mod session;
mod text_utils;
mod transport;
mod types;

pub use client::{ApiClient, ApiClientOptions, CallOptions, AUTH_TOKEN_HEADER, DEFAULT_BASE_URL};
pub use errors::*;
pub use session::{
    FileStorage, KeyValueStorage, MemoryStorage, SessionStore, AUTH_TOKEN_KEY, AUTH_USER_KEY,
};
pub use text_utils::{escape_html, filter_itson_id, parse_csv, strip_diacritics};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
pub use types::*;

pub use reqwest::{Method, StatusCode};
