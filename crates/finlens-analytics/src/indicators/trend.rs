//! 추세 지표 (Trend Indicators).
//!
//! 이동평균 기반의 추세 지표들을 제공합니다.
//! - SMA (Simple Moving Average)
//! - EMA (Exponential Moving Average)
//! - MACD (Moving Average Convergence Divergence)

use serde::{Deserialize, Serialize};

use super::smoothing::{ewm_mean, rolling_mean, to_nan};
use super::{IndicatorError, IndicatorResult};

/// SMA 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for SmaParams {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// EMA 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmaParams {
    /// span (alpha = 2 / (span + 1)).
    pub period: usize,
}

impl Default for EmaParams {
    fn default() -> Self {
        Self { period: 12 }
    }
}

/// MACD 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    /// 단기 EMA 기간 (기본: 12).
    pub fast_period: usize,
    /// 장기 EMA 기간 (기본: 26).
    pub slow_period: usize,
    /// 시그널 라인 기간 (기본: 9).
    pub signal_period: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

impl MacdParams {
    /// 파라미터를 검증합니다.
    pub fn validate(&self) -> IndicatorResult<()> {
        if self.fast_period == 0 || self.slow_period == 0 || self.signal_period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "MACD 기간은 0보다 커야 합니다".to_string(),
            ));
        }
        Ok(())
    }
}

/// MACD 결과 (컬럼 단위).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MacdResult {
    /// MACD 라인 (단기 EMA - 장기 EMA).
    pub macd: Vec<Option<f64>>,
    /// 시그널 라인 (MACD의 EMA).
    pub signal: Vec<Option<f64>>,
    /// 히스토그램 (MACD - 시그널).
    pub histogram: Vec<Option<f64>>,
}

/// 추세 지표 계산기.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrendIndicators;

impl TrendIndicators {
    /// 새로운 추세 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 단순 이동평균 (SMA) 계산.
    ///
    /// SMA = (P1 + P2 + ... + Pn) / n
    ///
    /// # 반환
    /// 각 시점의 SMA 값. 처음 period-1개와 결측을 포함한 윈도우는 `None`.
    /// 데이터가 기간보다 짧으면 전부 `None`이며 에러가 아닙니다.
    pub fn sma(&self, prices: &[f64], params: SmaParams) -> IndicatorResult<Vec<Option<f64>>> {
        if params.period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }

        Ok(rolling_mean(prices, params.period))
    }

    /// 지수 이동평균 (EMA) 계산.
    ///
    /// EMA = (현재가 × k) + (이전 EMA × (1 - k)), k = 2 / (period + 1)
    ///
    /// 첫 관측값으로 시작하며, 관측값이 period개 모인 시점부터 값을 냅니다.
    pub fn ema(&self, prices: &[f64], params: EmaParams) -> IndicatorResult<Vec<Option<f64>>> {
        if params.period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }

        let alpha = 2.0 / (params.period as f64 + 1.0);
        Ok(ewm_mean(prices, alpha, params.period))
    }

    /// MACD 계산.
    ///
    /// - MACD 라인 = EMA(fast) - EMA(slow)
    /// - 시그널 = MACD 라인의 EMA(signal)
    /// - 히스토그램 = MACD - 시그널
    pub fn macd(&self, prices: &[f64], params: MacdParams) -> IndicatorResult<MacdResult> {
        params.validate()?;

        let fast = self.ema(
            prices,
            EmaParams {
                period: params.fast_period,
            },
        )?;
        let slow = self.ema(
            prices,
            EmaParams {
                period: params.slow_period,
            },
        )?;

        let macd: Vec<Option<f64>> = fast
            .iter()
            .zip(&slow)
            .map(|(f, s)| match (f, s) {
                (Some(f), Some(s)) => Some(f - s),
                _ => None,
            })
            .collect();

        let signal = self.ema(
            &to_nan(&macd),
            EmaParams {
                period: params.signal_period,
            },
        )?;

        let histogram = macd
            .iter()
            .zip(&signal)
            .map(|(m, s)| match (m, s) {
                (Some(m), Some(s)) => Some(m - s),
                _ => None,
            })
            .collect();

        Ok(MacdResult {
            macd,
            signal,
            histogram,
        })
    }
}
