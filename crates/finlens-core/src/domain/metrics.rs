//! 위험/수익 요약 지표.

use serde::{Deserialize, Serialize};

use crate::numeric::json_safe;

/// 다섯 가지 위험/수익 지표.
///
/// 모든 필드는 항상 존재하며 유한합니다. 계산 결과가 비유한이면 해당 필드만 0.0이 됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricsResult {
    /// 일간 수익률 평균
    pub daily_returns: f64,
    /// 연율화 수익률 (일간 평균 × 연간 거래일)
    pub annual_returns: f64,
    /// 연율화 변동성 (일간 수익률 표준편차 × √연간 거래일)
    pub volatility: f64,
    /// 최대 낙폭 (고점 대비 하락 비율, 0 이상)
    pub max_drawdown: f64,
    /// 샤프 비율
    pub sharpe_ratio: f64,
}

impl MetricsResult {
    /// 모든 필드가 0인 결과 (전체 계산 실패 시 기본값).
    pub fn zero() -> Self {
        Self::default()
    }

    /// 각 필드에 개별적으로 비유한값 가드를 적용합니다.
    pub fn sanitized(self) -> Self {
        Self {
            daily_returns: json_safe(self.daily_returns),
            annual_returns: json_safe(self.annual_returns),
            volatility: json_safe(self.volatility),
            max_drawdown: json_safe(self.max_drawdown),
            sharpe_ratio: json_safe(self.sharpe_ratio),
        }
    }

    /// 모든 필드가 유한한지 확인합니다.
    pub fn is_finite(&self) -> bool {
        [
            self.daily_returns,
            self.annual_returns,
            self.volatility,
            self.max_drawdown,
            self.sharpe_ratio,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_is_per_field() {
        let metrics = MetricsResult {
            daily_returns: 0.1,
            annual_returns: f64::INFINITY,
            volatility: f64::NAN,
            max_drawdown: 0.2,
            sharpe_ratio: -1.5,
        }
        .sanitized();

        assert_eq!(metrics.daily_returns, 0.1);
        assert_eq!(metrics.annual_returns, 0.0);
        assert_eq!(metrics.volatility, 0.0);
        assert_eq!(metrics.max_drawdown, 0.2);
        assert_eq!(metrics.sharpe_ratio, -1.5);
        assert!(metrics.is_finite());
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(MetricsResult::zero()).unwrap();
        for key in [
            "daily_returns",
            "annual_returns",
            "volatility",
            "max_drawdown",
            "sharpe_ratio",
        ] {
            assert_eq!(json[key], 0.0, "{key}");
        }
    }
}
