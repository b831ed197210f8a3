use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{classifier::ClassificationResult, extractor::LinkInfo};

#[derive(Debug, Deserialize, ToSchema)]
pub struct UrlRequest {
    #[serde(default)]
    pub url: String,
}

impl UrlRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("url is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub content: String,
}

impl ClassifyRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.content.is_empty() {
            return Err("content is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DetectResponse {
    pub link_info: LinkInfo,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExtractResponse {
    pub link_info: LinkInfo,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClassifyResponse {
    pub classification: ClassificationResult,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
