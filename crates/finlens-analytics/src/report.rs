//! 분석 리포트 조립.
//!
//! 지표 엔진과 성과 지표 계산기는 모두 호출자의 원본 시계열을 입력으로 받으며
//! 서로 의존하지 않습니다. 감성 분석 실패는 0 분포로 대체됩니다.

use std::sync::Arc;

use finlens_core::{
    CompanyInfo, CompanyProfile, EnrichedPoint, IndicatorStatus, MetricsResult, PricePoint,
    SentimentClassifier, SentimentScores,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::indicators::IndicatorEngine;
use crate::performance::MetricsCalculator;

/// 단일 종목 분석 리포트.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockReport {
    /// 종목 심볼
    pub symbol: String,
    /// 지표가 추가된 시계열
    pub historical_data: Vec<EnrichedPoint>,
    /// 지표 계산 상태
    pub indicator_status: IndicatorStatus,
    /// 위험/수익 지표
    pub metrics: MetricsResult,
    /// 기업 정보
    pub company_info: CompanyInfo,
    /// 기업 설명 감성 분포
    pub sentiment: SentimentScores,
}

/// 리포트 빌더.
#[derive(Clone)]
pub struct ReportBuilder {
    engine: IndicatorEngine,
    calculator: MetricsCalculator,
    classifier: Arc<dyn SentimentClassifier>,
}

impl ReportBuilder {
    /// 새 리포트 빌더 생성.
    pub fn new(
        engine: IndicatorEngine,
        calculator: MetricsCalculator,
        classifier: Arc<dyn SentimentClassifier>,
    ) -> Self {
        Self {
            engine,
            calculator,
            classifier,
        }
    }

    /// 리포트를 생성합니다. 에러를 반환하지 않습니다.
    pub async fn build(
        &self,
        symbol: &str,
        series: &[PricePoint],
        profile: &CompanyProfile,
    ) -> StockReport {
        let enriched = self.engine.enrich(series);
        let metrics = self.calculator.calculate(series);
        let sentiment = self.classify(profile.description_text()).await;

        info!(
            symbol,
            points = enriched.len(),
            indicators = enriched.is_computed(),
            "리포트 생성 완료"
        );

        StockReport {
            symbol: symbol.to_string(),
            historical_data: enriched.points,
            indicator_status: enriched.status,
            metrics,
            company_info: profile.sanitized(symbol),
            sentiment,
        }
    }

    async fn classify(&self, text: &str) -> SentimentScores {
        match self.classifier.classify(text).await {
            Ok(scores) => scores,
            Err(e) => {
                warn!(
                    classifier = self.classifier.name(),
                    error = %e,
                    "감성 분석 실패, 0 분포로 대체"
                );
                SentimentScores::zero()
            }
        }
    }
}

impl std::fmt::Debug for ReportBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportBuilder")
            .field("engine", &self.engine)
            .field("calculator", &self.calculator)
            .field("classifier", &self.classifier.name())
            .finish()
    }
}
