use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("creating request: {0}")]
    RequestConstruction(#[source] reqwest::Error),

    #[error("fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("reading response body: {0}")]
    ResponseRead(#[source] reqwest::Error),

    #[error("body too large ({size} bytes, limit {limit})")]
    BodyTooLarge { size: u64, limit: u64 },

    #[error("building http client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    pub fn network(url: &str, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.to_string(),
            source,
        }
    }
}
