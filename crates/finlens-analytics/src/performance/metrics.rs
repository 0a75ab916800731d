//! 위험/수익 지표 계산 모듈
//!
//! 종가 시계열에서 다섯 가지 요약 지표를 계산합니다:
//! - 일간 수익률 평균 (Daily Returns)
//! - 연율화 수익률 (Annual Returns)
//! - 연율화 변동성 (Volatility)
//! - 최대 낙폭 (Maximum Drawdown): 고점 대비 최대 하락 비율
//! - 샤프 비율 (Sharpe Ratio): 위험 대비 초과 수익
//!
//! # 사용 예시
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use finlens_analytics::performance::MetricsCalculator;
//! use finlens_core::PricePoint;
//!
//! let day = |d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap();
//! let series = vec![
//!     PricePoint::from_close(day(2), 100.0),
//!     PricePoint::from_close(day(3), 90.0),
//!     PricePoint::from_close(day(4), 81.0),
//! ];
//!
//! let metrics = MetricsCalculator::new().calculate(&series);
//! assert!((metrics.max_drawdown - 0.19).abs() < 1e-12);
//! ```

use finlens_core::{forward_fill, json_safe, MetricsResult, PricePoint};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// 연간 거래일 수 (연율화 계산에 사용)
///
/// 일반적으로 주식 시장은 연간 약 252일 거래됩니다.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// 기본 무위험 이자율 (연간, 0.01 = 1%)
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.01;

/// 지표 계산 에러.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// 빈 시계열
    #[error("시계열이 비어 있습니다")]
    EmptySeries,
}

/// 지표 계산 결과 타입.
pub type MetricsCalcResult<T> = Result<T, MetricsError>;

/// 연율화/무위험 이자율 설정.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsParams {
    /// 연간 거래일 수 (기본: 252)
    pub trading_days_per_year: u32,
    /// 연간 무위험 이자율 (기본: 0.01)
    pub risk_free_rate: f64,
}

impl Default for MetricsParams {
    fn default() -> Self {
        Self {
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
        }
    }
}

/// 위험/수익 지표 계산기.
#[derive(Debug, Clone, Default)]
pub struct MetricsCalculator {
    params: MetricsParams,
}

impl MetricsCalculator {
    /// 기본 설정으로 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 지정한 설정으로 생성.
    pub fn with_params(params: MetricsParams) -> Self {
        Self { params }
    }

    /// 현재 설정.
    pub fn params(&self) -> &MetricsParams {
        &self.params
    }

    /// 지표를 계산합니다.
    ///
    /// 에러를 반환하지 않습니다. 전체 계산이 실패하면 경고를 남기고 전부 0인 결과를 반환합니다.
    pub fn calculate(&self, series: &[PricePoint]) -> MetricsResult {
        match self.try_calculate(series) {
            Ok(metrics) => {
                debug!(points = series.len(), ?metrics, "성과 지표 계산 완료");
                metrics
            }
            Err(e) => {
                warn!(error = %e, points = series.len(), "성과 지표 계산 실패, 0으로 대체");
                MetricsResult::zero()
            }
        }
    }

    /// 지표를 계산합니다. 실패 원인을 그대로 반환합니다.
    ///
    /// 각 필드는 개별적으로 비유한값 가드를 거칩니다.
    pub fn try_calculate(&self, series: &[PricePoint]) -> MetricsCalcResult<MetricsResult> {
        if series.is_empty() {
            return Err(MetricsError::EmptySeries);
        }

        let closes: Vec<f64> = series.iter().map(|p| p.close).collect();
        let returns = Self::calculate_returns(&closes);
        let trading_days = f64::from(self.params.trading_days_per_year);

        let daily_returns = guard_field("daily_returns", mean(&returns));
        let annual_returns = guard_field("annual_returns", daily_returns * trading_days);
        let volatility = guard_field("volatility", sample_std(&returns) * trading_days.sqrt());
        let max_drawdown = guard_field("max_drawdown", Self::calculate_max_drawdown(&closes));
        let sharpe_ratio = Self::calculate_sharpe_ratio(
            annual_returns,
            volatility,
            self.params.risk_free_rate,
        );

        Ok(MetricsResult {
            daily_returns,
            annual_returns,
            volatility,
            max_drawdown,
            sharpe_ratio,
        }
        .sanitized())
    }

    /// 기간별 수익률을 계산합니다.
    ///
    /// 결측 종가는 직전 유효값으로 채운 뒤 변화율을 구하며, 정의되지 않는 값(NaN)만
    /// 제외합니다. 이전 종가가 0이면 ±Infinity가 그대로 남습니다.
    pub fn calculate_returns(closes: &[f64]) -> Vec<f64> {
        let wrapped: Vec<Option<f64>> = closes.iter().copied().map(Some).collect();
        let filled: Vec<f64> = forward_fill(&wrapped)
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();

        filled
            .windows(2)
            .map(|w| w[1] / w[0] - 1.0)
            .filter(|r| !r.is_nan())
            .collect()
    }

    /// 최대 낙폭을 계산합니다 (비율, 0 이상).
    ///
    /// 결측 종가는 건너뛰며, 고점은 지금까지의 유효 종가 최댓값입니다.
    pub fn calculate_max_drawdown(closes: &[f64]) -> f64 {
        let mut peak: Option<f64> = None;
        let mut max_drawdown = 0.0_f64;

        for &close in closes.iter().filter(|c| !c.is_nan()) {
            // 새로운 고점 갱신
            let current_peak = match peak {
                Some(p) if p >= close => p,
                _ => close,
            };
            peak = Some(current_peak);

            let drawdown = (current_peak - close) / current_peak;
            if drawdown > max_drawdown {
                max_drawdown = drawdown;
            }
        }

        max_drawdown
    }

    /// 샤프 비율을 계산합니다.
    ///
    /// (연율화 수익률 - 무위험 이자율) / 변동성. 변동성이 0이면 0입니다.
    pub fn calculate_sharpe_ratio(
        annual_returns: f64,
        volatility: f64,
        risk_free_rate: f64,
    ) -> f64 {
        if volatility == 0.0 {
            return 0.0;
        }
        guard_field(
            "sharpe_ratio",
            (annual_returns - risk_free_rate) / volatility,
        )
    }
}

/// 비유한 지표 값을 0으로 바꾸고 대체 사실을 기록합니다.
///
/// NaN은 데이터 부족(수익률 2개 미만 등)에서 흔하므로 debug, ±Infinity는 warn입니다.
fn guard_field(field: &'static str, raw: f64) -> f64 {
    if raw.is_infinite() {
        warn!(field, raw, "무한대 지표 값을 0으로 대체");
    } else if raw.is_nan() {
        debug!(field, "정의되지 않은 지표 값을 0으로 대체");
    }
    json_safe(raw)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// 표본 표준편차 (ddof = 1). 값이 2개 미만이면 NaN.
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
