//! Content classification into a fixed set of categories.
//!
//! The classifier is a downstream consumer of extracted text. It asks a
//! completion backend for a JSON verdict and validates the answer; provider
//! HTTP adapters live outside this crate and plug in through
//! [`CompletionClient`].

mod llm;
mod prompt;

pub use llm::LlmClassifier;
pub use prompt::{MAX_PROMPT_CONTENT, classification_prompt};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ContentCategory {
    /// Explains a principle, concept or mechanism.
    #[serde(rename = "원리소개")]
    Principle,
    /// Hands-on review of a product, tool or service.
    #[serde(rename = "사용기")]
    Review,
    /// Opinion piece or essay.
    #[serde(rename = "생각정리")]
    Opinion,
    /// Introduction of a new technology or framework.
    #[serde(rename = "기술소개")]
    TechIntro,
    /// Step-by-step guide.
    #[serde(rename = "튜토리얼")]
    Tutorial,
    /// Industry news and trend analysis.
    #[serde(rename = "뉴스/분석")]
    News,
}

impl ContentCategory {
    pub const ALL: [ContentCategory; 6] = [
        Self::Principle,
        Self::Review,
        Self::Opinion,
        Self::TechIntro,
        Self::Tutorial,
        Self::News,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Principle => "원리소개",
            Self::Review => "사용기",
            Self::Opinion => "생각정리",
            Self::TechIntro => "기술소개",
            Self::Tutorial => "튜토리얼",
            Self::News => "뉴스/분석",
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContentCategory {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| ClassifyError::InvalidCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClassificationResult {
    pub primary: ContentCategory,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<ContentCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_confidence: Option<f64>,
}

#[derive(Error, Debug)]
#[error("{message}")]
pub struct CompletionError {
    message: String,
}

impl CompletionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("LLM classification failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("parsing classification response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid primary category: {0}")]
    InvalidCategory(String),
}

/// Text completion backend (an LLM provider adapter).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, content: &str) -> Result<ClassificationResult, ClassifyError>;
}
