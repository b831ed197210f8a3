pub mod client;
pub mod errors;
pub mod pipeline;

pub use client::{USER_AGENT, build_client, get, read_limited, read_text};
pub use errors::FetchError;
