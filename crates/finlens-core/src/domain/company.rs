//! 기업 정보.
//!
//! 기업 정보 조회는 호출자 책임이며, 이 모듈은 호출자가 전달한 값을
//! 응답에 넣을 수 있는 형태로 정규화하기만 합니다.

use serde::{Deserialize, Serialize};

use crate::numeric::json_safe;

const NOT_AVAILABLE: &str = "N/A";

/// 호출자가 제공하는 기업 정보 (모든 필드 선택).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    pub name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub beta: Option<f64>,
    pub dividend_yield: Option<f64>,
    /// 사업 설명 (감성 분석 입력)
    pub description: Option<String>,
}

/// 정규화된 기업 정보.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub sector: String,
    pub industry: String,
    pub market_cap: f64,
    pub pe_ratio: f64,
    pub beta: f64,
    pub dividend_yield: f64,
    pub description: String,
}

impl CompanyProfile {
    /// 기본값을 채워 정규화합니다.
    ///
    /// 이름이 없으면 심볼, 섹터/산업이 없으면 "N/A", 수치가 없거나 비유한이면 0.0.
    pub fn sanitized(&self, symbol: &str) -> CompanyInfo {
        let text = |value: &Option<String>, fallback: &str| {
            value
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(fallback)
                .to_string()
        };
        let number = |value: Option<f64>| json_safe(value.unwrap_or(0.0));

        CompanyInfo {
            name: text(&self.name, symbol),
            sector: text(&self.sector, NOT_AVAILABLE),
            industry: text(&self.industry, NOT_AVAILABLE),
            market_cap: number(self.market_cap),
            pe_ratio: number(self.pe_ratio),
            beta: number(self.beta),
            dividend_yield: number(self.dividend_yield),
            description: self.description.clone().unwrap_or_default(),
        }
    }

    /// 감성 분석에 넘길 설명 텍스트 (없으면 빈 문자열).
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_defaults() {
        let info = CompanyProfile::default().sanitized("AAPL");

        assert_eq!(info.name, "AAPL");
        assert_eq!(info.sector, "N/A");
        assert_eq!(info.industry, "N/A");
        assert_eq!(info.market_cap, 0.0);
        assert_eq!(info.description, "");
    }

    #[test]
    fn test_sanitized_keeps_values_and_guards_numbers() {
        let profile = CompanyProfile {
            name: Some("Apple Inc.".to_string()),
            sector: Some("Technology".to_string()),
            market_cap: Some(3.0e12),
            pe_ratio: Some(f64::INFINITY),
            beta: Some(f64::NAN),
            dividend_yield: Some(0.0044),
            ..Default::default()
        };
        let info = profile.sanitized("AAPL");

        assert_eq!(info.name, "Apple Inc.");
        assert_eq!(info.sector, "Technology");
        assert_eq!(info.market_cap, 3.0e12);
        assert_eq!(info.pe_ratio, 0.0);
        assert_eq!(info.beta, 0.0);
        assert_eq!(info.dividend_yield, 0.0044);
    }

    #[test]
    fn test_profile_from_partial_json() {
        let profile: CompanyProfile =
            serde_json::from_str(r#"{"name": "Tesla", "beta": 2.3}"#).unwrap();
        assert_eq!(profile.beta, Some(2.3));
        assert_eq!(profile.description_text(), "");
    }
}
