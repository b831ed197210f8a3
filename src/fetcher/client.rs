use bytes::{Bytes, BytesMut};
use reqwest::{Client, ClientBuilder, Response, header::HeaderMap};
use tracing::instrument;

use crate::config::HttpConfig;
use crate::fetcher::{errors::FetchError, pipeline::decode_body};

/// User-Agent sent on every outbound request.
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; LinkSummarizer/1.0)";

/// Build the shared client handed to every extractor.
///
/// Connection pooling lives inside the client, so clones are cheap and safe to
/// use from concurrent tasks. The configured timeout is the deadline for each
/// outbound call.
pub fn build_client(config: &HttpConfig) -> Result<Client, FetchError> {
    ClientBuilder::new()
        .connect_timeout(config.connect_timeout)
        .timeout(config.timeout)
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .build()
        .map_err(FetchError::Client)
}

/// Issue a GET with the fixed User-Agent plus any extra headers.
///
/// The response is returned whatever its status; callers decide what a
/// non-200 means for their format.
#[instrument(skip(client, headers), fields(url = %url))]
pub async fn get(client: &Client, url: &str, headers: HeaderMap) -> Result<Response, FetchError> {
    let request = client
        .get(url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .headers(headers)
        .build()
        .map_err(FetchError::RequestConstruction)?;

    client
        .execute(request)
        .await
        .map_err(|e| FetchError::network(url, e))
}

/// Read the full body and decode it to UTF-8. No size cap is applied.
pub async fn read_text(response: Response) -> Result<String, FetchError> {
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let body = response.bytes().await.map_err(FetchError::ResponseRead)?;

    Ok(decode_body(&content_type, &body))
}

/// Read at most `limit` bytes of body.
///
/// The declared `Content-Length` is checked before anything is read, and the
/// running total is checked while streaming, so a missing or lying header
/// still cannot push the buffer past `limit + 1` bytes.
pub async fn read_limited(mut response: Response, limit: u64) -> Result<Bytes, FetchError> {
    if let Some(content_length) = response.content_length()
        && content_length > limit
    {
        return Err(FetchError::BodyTooLarge {
            size: content_length,
            limit,
        });
    }

    let mut buffer = BytesMut::new();
    while let Some(chunk) = response.chunk().await.map_err(FetchError::ResponseRead)? {
        let room = (limit + 1).saturating_sub(buffer.len() as u64) as usize;
        buffer.extend_from_slice(&chunk[..chunk.len().min(room)]);

        if buffer.len() as u64 > limit {
            return Err(FetchError::BodyTooLarge {
                size: buffer.len() as u64,
                limit,
            });
        }
    }

    Ok(buffer.freeze())
}
