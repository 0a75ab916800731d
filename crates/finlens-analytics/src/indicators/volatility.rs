//! 변동성 지표 (Volatility Indicators).
//!
//! - Bollinger Bands

use serde::{Deserialize, Serialize};

use super::smoothing::{rolling_mean, rolling_std};
use super::{IndicatorError, IndicatorResult};

/// 볼린저 밴드 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerBandsParams {
    /// 이동평균 기간 (기본: 20).
    pub period: usize,
    /// 표준편차 승수 (기본: 2.0).
    pub std_dev_multiplier: f64,
}

impl Default for BollingerBandsParams {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

/// 볼린저 밴드 결과 (컬럼 단위).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BollingerBandsResult {
    /// 상단 밴드 (중간 + k × 표준편차).
    pub upper: Vec<Option<f64>>,
    /// 중간 밴드 (SMA).
    pub middle: Vec<Option<f64>>,
    /// 하단 밴드 (중간 - k × 표준편차).
    pub lower: Vec<Option<f64>>,
}

/// 변동성 지표 계산기.
#[derive(Debug, Default, Clone, Copy)]
pub struct VolatilityIndicators;

impl VolatilityIndicators {
    /// 새로운 변동성 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 볼린저 밴드 계산.
    ///
    /// 표준편차는 모표준편차(ddof = 0)입니다.
    pub fn bollinger_bands(
        &self,
        prices: &[f64],
        params: BollingerBandsParams,
    ) -> IndicatorResult<BollingerBandsResult> {
        if params.period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "볼린저 밴드 기간은 0보다 커야 합니다".to_string(),
            ));
        }
        if !params.std_dev_multiplier.is_finite() || params.std_dev_multiplier < 0.0 {
            return Err(IndicatorError::InvalidParameter(format!(
                "잘못된 표준편차 승수: {}",
                params.std_dev_multiplier
            )));
        }

        let middle = rolling_mean(prices, params.period);
        let std_dev = rolling_std(prices, params.period);
        let k = params.std_dev_multiplier;

        let band = |sign: f64| -> Vec<Option<f64>> {
            middle
                .iter()
                .zip(&std_dev)
                .map(|(m, s)| match (m, s) {
                    (Some(m), Some(s)) => Some(m + sign * k * s),
                    _ => None,
                })
                .collect()
        };
        let upper = band(1.0);
        let lower = band(-1.0);

        Ok(BollingerBandsResult {
            upper,
            middle,
            lower,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bollinger_bands_symmetry() {
        let prices: Vec<f64> = (0..25).map(|i| 100.0 + (i % 5) as f64).collect();
        let bands = VolatilityIndicators::new()
            .bollinger_bands(&prices, BollingerBandsParams::default())
            .unwrap();

        assert!(bands.upper[18].is_none());
        for i in 19..25 {
            let (u, m, l) = (
                bands.upper[i].unwrap(),
                bands.middle[i].unwrap(),
                bands.lower[i].unwrap(),
            );
            assert!(u > m && m > l);
            assert!(((u - m) - (m - l)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_bollinger_bands_population_std() {
        // 값 2,4,4,4,5,5,7,9 → 평균 5, 모표준편차 2
        let prices = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let bands = VolatilityIndicators::new()
            .bollinger_bands(
                &prices,
                BollingerBandsParams {
                    period: 8,
                    std_dev_multiplier: 2.0,
                },
            )
            .unwrap();

        assert!((bands.upper[7].unwrap() - 9.0).abs() < 1e-12);
        assert!((bands.lower[7].unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_multiplier() {
        let result = VolatilityIndicators::new().bollinger_bands(
            &[1.0, 2.0],
            BollingerBandsParams {
                period: 2,
                std_dev_multiplier: f64::NAN,
            },
        );
        assert!(result.is_err());
    }
}
