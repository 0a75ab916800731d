//! 기술적 지표 모듈.
//!
//! 원본 OHLCV 시계열을 지표가 추가된 시계열로 변환합니다.
//!
//! # 지원 지표
//!
//! ## 추세 지표 (Trend Indicators)
//! - **SMA**: 단순 이동평균 (MA20, MA50)
//! - **EMA**: 지수 이동평균
//! - **MACD**: 이동평균 수렴/확산 및 시그널 라인
//!
//! ## 모멘텀 지표 (Momentum Indicators)
//! - **RSI**: 상대강도지수
//!
//! ## 변동성 지표 (Volatility Indicators)
//! - **Bollinger Bands**: 볼린저 밴드 상단/하단
//!
//! # 결측 처리
//!
//! 모든 컬럼은 계산 후 전방 채움 → 남은 결측 0 → 비유한값 0 순서로 확정됩니다
//! ([`finlens_core::finalize_column`]). 데이터가 지표 기간보다 짧으면 해당 컬럼은
//! 전부 0이 되며, 이는 에러가 아니라 [`IndicatorAvailability`]로 구분됩니다.
//!
//! # 사용 예시
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use finlens_analytics::indicators::IndicatorEngine;
//! use finlens_core::PricePoint;
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let series: Vec<PricePoint> = (0..60)
//!     .map(|i| PricePoint::from_close(start + chrono::Duration::days(i), 100.0 + i as f64))
//!     .collect();
//!
//! let enriched = IndicatorEngine::new().enrich(&series);
//! assert_eq!(enriched.len(), 60);
//! assert!(enriched.is_computed());
//! ```

pub mod momentum;
pub mod smoothing;
pub mod trend;
pub mod volatility;

use finlens_core::{
    finalize_column, finalize_values, is_missing, EnrichedPoint, EnrichedSeries,
    IndicatorAvailability, IndicatorStatus, IndicatorValues, PricePoint,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub use momentum::{MomentumCalculator, RsiParams};
pub use trend::{EmaParams, MacdParams, MacdResult, SmaParams, TrendIndicators};
pub use volatility::{BollingerBandsParams, BollingerBandsResult, VolatilityIndicators};

/// 단기 이동평균 기간 (`ma20`).
pub const MA_SHORT_PERIOD: usize = 20;

/// 장기 이동평균 기간 (`ma50`).
pub const MA_LONG_PERIOD: usize = 50;

/// 지표 계산 오류.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),

    /// 빈 시계열
    #[error("시계열이 비어 있습니다")]
    EmptySeries,
}

/// 지표 계산 결과 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// 설정 가능한 지표 파라미터.
///
/// 이동평균 기간은 출력 키(`ma20`, `ma50`)에 묶여 있어 설정 대상이 아닙니다.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub rsi: RsiParams,
    pub macd: MacdParams,
    pub bollinger: BollingerBandsParams,
}

/// 컬럼 단위 계산 결과 (채움 이전).
#[derive(Debug, Clone, Default)]
struct IndicatorColumns {
    ma20: Vec<Option<f64>>,
    ma50: Vec<Option<f64>>,
    rsi: Vec<Option<f64>>,
    macd: Vec<Option<f64>>,
    macd_signal: Vec<Option<f64>>,
    bb_upper: Vec<Option<f64>>,
    bb_lower: Vec<Option<f64>>,
}

impl IndicatorColumns {
    fn availability(&self) -> IndicatorAvailability {
        let has_value = |column: &[Option<f64>]| column.iter().any(|v| !is_missing(*v));
        IndicatorAvailability {
            ma20: has_value(&self.ma20),
            ma50: has_value(&self.ma50),
            rsi: has_value(&self.rsi),
            macd: has_value(&self.macd),
            macd_signal: has_value(&self.macd_signal),
            bb_upper: has_value(&self.bb_upper),
            bb_lower: has_value(&self.bb_lower),
        }
    }
}

/// 통합 지표 엔진.
///
/// 상태가 없으며, 같은 입력에 대해 항상 같은 출력을 냅니다.
#[derive(Debug, Default, Clone)]
pub struct IndicatorEngine {
    params: IndicatorParams,
    trend: TrendIndicators,
    momentum: MomentumCalculator,
    volatility: VolatilityIndicators,
}

impl IndicatorEngine {
    /// 기본 파라미터로 지표 엔진 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 지정한 파라미터로 지표 엔진 생성.
    pub fn with_params(params: IndicatorParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// 현재 파라미터.
    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    /// 시계열에 지표를 추가합니다.
    ///
    /// 에러를 반환하지 않습니다. 계산 전체가 실패하면(빈 시계열, 잘못된 파라미터)
    /// 경고를 남기고 원본 시계열을 지표 없이 그대로 반환합니다.
    pub fn enrich(&self, series: &[PricePoint]) -> EnrichedSeries {
        match self.try_enrich(series) {
            Ok(enriched) => {
                debug!(points = enriched.len(), status = ?enriched.status, "지표 계산 완료");
                enriched
            }
            Err(e) => {
                warn!(error = %e, points = series.len(), "지표 계산 실패, 원본 시계열 반환");
                EnrichedSeries::unavailable(series, e.to_string())
            }
        }
    }

    /// 지표를 계산합니다. 실패 원인을 그대로 반환합니다.
    pub fn try_enrich(&self, series: &[PricePoint]) -> IndicatorResult<EnrichedSeries> {
        if series.is_empty() {
            return Err(IndicatorError::EmptySeries);
        }

        let closes: Vec<f64> = series.iter().map(|p| p.close).collect();
        let columns = self.compute_columns(&closes)?;
        let availability = columns.availability();

        let ma20 = finalize_column(&columns.ma20);
        let ma50 = finalize_column(&columns.ma50);
        let rsi = finalize_column(&columns.rsi);
        let macd = finalize_column(&columns.macd);
        let macd_signal = finalize_column(&columns.macd_signal);
        let bb_upper = finalize_column(&columns.bb_upper);
        let bb_lower = finalize_column(&columns.bb_lower);

        let price_column = |field: fn(&PricePoint) -> f64| -> Vec<f64> {
            let raw: Vec<f64> = series.iter().map(field).collect();
            finalize_values(&raw)
        };
        let open = price_column(|p| p.open);
        let high = price_column(|p| p.high);
        let low = price_column(|p| p.low);
        let close = price_column(|p| p.close);
        let volume = price_column(|p| p.volume);

        let points = series
            .iter()
            .enumerate()
            .map(|(i, p)| EnrichedPoint {
                price: PricePoint::new(p.date, open[i], high[i], low[i], close[i], volume[i]),
                indicators: Some(IndicatorValues {
                    ma20: ma20[i],
                    ma50: ma50[i],
                    rsi: rsi[i],
                    macd: macd[i],
                    macd_signal: macd_signal[i],
                    bb_upper: bb_upper[i],
                    bb_lower: bb_lower[i],
                }),
            })
            .collect();

        Ok(EnrichedSeries {
            points,
            status: IndicatorStatus::Computed { availability },
        })
    }

    fn compute_columns(&self, closes: &[f64]) -> IndicatorResult<IndicatorColumns> {
        let macd = self.trend.macd(closes, self.params.macd)?;
        let bands = self
            .volatility
            .bollinger_bands(closes, self.params.bollinger)?;
        let short = SmaParams {
            period: MA_SHORT_PERIOD,
        };
        let long = SmaParams {
            period: MA_LONG_PERIOD,
        };

        Ok(IndicatorColumns {
            ma20: self.sma(closes, short)?,
            ma50: self.sma(closes, long)?,
            rsi: self.rsi(closes, self.params.rsi)?,
            macd: macd.macd,
            macd_signal: macd.signal,
            bb_upper: bands.upper,
            bb_lower: bands.lower,
        })
    }

    // ==================== 개별 지표 ====================

    /// 단순 이동평균 (SMA) 계산.
    pub fn sma(&self, prices: &[f64], params: SmaParams) -> IndicatorResult<Vec<Option<f64>>> {
        self.trend.sma(prices, params)
    }

    /// 지수 이동평균 (EMA) 계산.
    pub fn ema(&self, prices: &[f64], params: EmaParams) -> IndicatorResult<Vec<Option<f64>>> {
        self.trend.ema(prices, params)
    }

    /// MACD 계산.
    pub fn macd(&self, prices: &[f64], params: MacdParams) -> IndicatorResult<MacdResult> {
        self.trend.macd(prices, params)
    }

    /// RSI 계산.
    pub fn rsi(&self, prices: &[f64], params: RsiParams) -> IndicatorResult<Vec<Option<f64>>> {
        self.momentum.rsi(prices, params)
    }

    /// 볼린저 밴드 계산.
    pub fn bollinger_bands(
        &self,
        prices: &[f64],
        params: BollingerBandsParams,
    ) -> IndicatorResult<BollingerBandsResult> {
        self.volatility.bollinger_bands(prices, params)
    }
}
