//! 감성 분석 협력자 trait 및 결과 타입.
//!
//! 분류 모델 자체는 이 시스템의 범위 밖입니다. 협력자는 텍스트를 받아
//! {negative, neutral, positive} 3-클래스 확률 분포를 반환하기만 하면 됩니다.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::numeric::json_safe;

/// 감성 분석 에러.
#[derive(Debug, Error)]
pub enum SentimentError {
    /// 분류기가 설정되지 않음
    #[error("감성 분석기가 비활성화되어 있습니다")]
    Disabled,

    /// 요청 실패
    #[error("감성 분석 요청 실패: {0}")]
    Request(String),

    /// 응답 형식 오류
    #[error("잘못된 감성 분석 응답: {0}")]
    InvalidResponse(String),
}

/// 감성 레이블.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    /// 분류기 레이블 문자열을 파싱합니다 (대소문자 무시).
    ///
    /// `LABEL_0/1/2` 형식은 negative/neutral/positive 순서로 해석합니다.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "negative" | "neg" | "label_0" => Some(Self::Negative),
            "neutral" | "neu" | "label_1" => Some(Self::Neutral),
            "positive" | "pos" | "label_2" => Some(Self::Positive),
            _ => None,
        }
    }
}

/// 3-클래스 감성 확률 분포. 각 값은 유한하며 정상 응답이면 합이 약 1.0입니다.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentScores {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
}

impl SentimentScores {
    /// 분류 실패 시 사용하는 전부 0인 분포.
    pub fn zero() -> Self {
        Self::default()
    }

    /// 확률 값으로 생성합니다 (비유한값은 0).
    pub fn new(negative: f64, neutral: f64, positive: f64) -> Self {
        Self {
            negative: json_safe(negative),
            neutral: json_safe(neutral),
            positive: json_safe(positive),
        }
    }

    /// [negative, neutral, positive] 순서의 로짓에 softmax를 적용합니다.
    pub fn from_logits(logits: [f64; 3]) -> Self {
        let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps = logits.map(|l| (l - max).exp());
        let sum: f64 = exps.iter().sum();
        Self::new(exps[0] / sum, exps[1] / sum, exps[2] / sum)
    }

    /// 레이블별 값을 설정합니다.
    pub fn set(&mut self, label: SentimentLabel, score: f64) {
        let score = json_safe(score);
        match label {
            SentimentLabel::Negative => self.negative = score,
            SentimentLabel::Neutral => self.neutral = score,
            SentimentLabel::Positive => self.positive = score,
        }
    }

    /// 확률 합계.
    pub fn total(&self) -> f64 {
        self.negative + self.neutral + self.positive
    }

    /// 가장 높은 확률의 레이블 (전부 0이면 `None`).
    pub fn dominant(&self) -> Option<SentimentLabel> {
        let candidates = [
            (SentimentLabel::Negative, self.negative),
            (SentimentLabel::Neutral, self.neutral),
            (SentimentLabel::Positive, self.positive),
        ];
        candidates
            .into_iter()
            .filter(|(_, score)| *score > 0.0)
            .reduce(|best, next| if next.1 > best.1 { next } else { best })
            .map(|(label, _)| label)
    }
}

/// 감성 분석 협력자.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// 분류기 이름 (로그용).
    fn name(&self) -> &str;

    /// 텍스트를 분류하여 3-클래스 확률 분포를 반환합니다.
    async fn classify(&self, text: &str) -> Result<SentimentScores, SentimentError>;
}
