//! 감성 분석 협력자 구현.
//!
//! - [`HttpSentimentClassifier`]: 외부 추론 엔드포인트 호출
//! - [`DisabledSentiment`]: 엔드포인트 미설정 시 사용

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use finlens_core::{SentimentClassifier, SentimentError, SentimentLabel, SentimentScores};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::SentimentConfig;

/// 레이블/점수 쌍.
#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// 추론 엔드포인트 응답.
///
/// 지원 형식:
/// - `{"logits": [neg, neu, pos]}`
/// - `[[{"label": "positive", "score": 0.9}, ...]]`
/// - `[{"label": "positive", "score": 0.9}, ...]`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Logits { logits: Vec<f64> },
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl InferenceResponse {
    fn into_scores(self) -> Result<SentimentScores, SentimentError> {
        let labels = match self {
            Self::Logits { logits } => {
                let logits: [f64; 3] = logits.try_into().map_err(|v: Vec<f64>| {
                    SentimentError::InvalidResponse(format!(
                        "로짓 3개가 필요하지만 {}개를 받았습니다",
                        v.len()
                    ))
                })?;
                return Ok(SentimentScores::from_logits(logits));
            }
            Self::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
            Self::Flat(labels) => labels,
        };

        let mut scores = SentimentScores::zero();
        let mut matched = 0usize;
        for entry in labels {
            if let Some(label) = SentimentLabel::parse(&entry.label) {
                scores.set(label, entry.score);
                matched += 1;
            }
        }

        if matched == 0 {
            return Err(SentimentError::InvalidResponse(
                "인식할 수 있는 감성 레이블이 없습니다".to_string(),
            ));
        }
        Ok(scores)
    }
}

/// HTTP 추론 엔드포인트 기반 감성 분석기.
///
/// `{"inputs": text}`를 POST합니다.
#[derive(Debug, Clone)]
pub struct HttpSentimentClassifier {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

impl HttpSentimentClassifier {
    /// 새 분석기를 생성합니다.
    pub fn new(
        endpoint: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SentimentError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SentimentError::Request(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_token,
        })
    }
}

#[async_trait]
impl SentimentClassifier for HttpSentimentClassifier {
    fn name(&self) -> &str {
        "http"
    }

    async fn classify(&self, text: &str) -> Result<SentimentScores, SentimentError> {
        debug!(endpoint = %self.endpoint, chars = text.len(), "Requesting sentiment");

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "inputs": text }));
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SentimentError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SentimentError::Request(format!("HTTP {}: {}", status, body)));
        }

        let body: InferenceResponse = response
            .json()
            .await
            .map_err(|e| SentimentError::InvalidResponse(e.to_string()))?;

        body.into_scores()
    }
}

/// 비활성화된 감성 분석기. 항상 [`SentimentError::Disabled`]를 반환합니다.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledSentiment;

#[async_trait]
impl SentimentClassifier for DisabledSentiment {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn classify(&self, _text: &str) -> Result<SentimentScores, SentimentError> {
        Err(SentimentError::Disabled)
    }
}

/// 설정에 맞는 감성 분석기를 생성합니다.
pub fn build_classifier(
    config: &SentimentConfig,
) -> Result<Arc<dyn SentimentClassifier>, SentimentError> {
    match config.endpoint_url() {
        Some(endpoint) => {
            info!(endpoint, "Sentiment endpoint configured");
            let classifier = HttpSentimentClassifier::new(
                endpoint,
                config.api_token.clone(),
                Duration::from_secs(config.timeout_secs),
            )?;
            Ok(Arc::new(classifier))
        }
        None => {
            debug!("No sentiment endpoint configured");
            Ok(Arc::new(DisabledSentiment))
        }
    }
}
