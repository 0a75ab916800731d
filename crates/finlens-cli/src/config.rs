//! 설정 관리.
//!
//! 기본값 → 설정 파일(TOML, 선택) → 환경 변수(`FINLENS__` 접두사) 순서로 병합됩니다.
//!
//! ```bash
//! FINLENS__METRICS__RISK_FREE_RATE=0.02
//! FINLENS__SENTIMENT__ENDPOINT=https://inference.example.com/finbert
//! FINLENS__LOGGING__FORMAT=json
//! ```

use std::path::Path;

use finlens_analytics::{IndicatorParams, MetricsParams};
use finlens_core::{LogConfig, LogFormat};
use serde::{Deserialize, Serialize};

/// 환경 변수 접두사.
pub const ENV_PREFIX: &str = "FINLENS";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// 지표 파라미터
    pub indicators: IndicatorParams,
    /// 성과 지표 파라미터
    pub metrics: MetricsParams,
    /// 감성 분석 설정
    pub sentiment: SentimentConfig,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 감성 분석 엔드포인트 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SentimentConfig {
    /// 추론 엔드포인트 URL (없으면 감성 분석 비활성화)
    pub endpoint: Option<String>,
    /// Bearer 토큰
    pub api_token: Option<String>,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_token: None,
            timeout_secs: 10,
        }
    }
}

impl SentimentConfig {
    /// 공백을 제거한 엔드포인트 URL. 비어 있으면 `None`.
    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}

impl AppConfig {
    /// 설정 파일(선택)과 환경 변수에서 설정을 로드합니다.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(path, None)
    }

    /// 환경 변수 소스를 직접 지정하여 설정을 로드합니다.
    ///
    /// `env`가 `None`이면 프로세스 환경 변수를 사용합니다.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?;

        // 파일에서 로드
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        // 환경 변수로 오버라이드
        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        config.try_deserialize()
    }

    /// 로깅 설정으로 변환합니다. 알 수 없는 형식은 pretty로 처리합니다.
    pub fn log_config(&self) -> LogConfig {
        let format = self
            .logging
            .format
            .parse::<LogFormat>()
            .unwrap_or_default();
        LogConfig::new(self.logging.level.clone()).with_format(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_env() -> Option<config::Map<String, String>> {
        Some(config::Map::new())
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = AppConfig::load_with_env(None, no_env()).unwrap();

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.metrics.trading_days_per_year, 252);
        assert_eq!(config.metrics.risk_free_rate, 0.01);
        assert_eq!(config.indicators.rsi.period, 14);
        assert_eq!(config.indicators.macd.slow_period, 26);
        assert_eq!(config.indicators.bollinger.std_dev_multiplier, 2.0);
        assert_eq!(config.sentiment.endpoint_url(), None);
        assert_eq!(config.sentiment.timeout_secs, 10);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[metrics]\nrisk_free_rate = 0.03\n\n[indicators.rsi]\nperiod = 7\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = AppConfig::load_with_env(Some(file.path()), no_env()).unwrap();

        assert_eq!(config.metrics.risk_free_rate, 0.03);
        assert_eq!(config.metrics.trading_days_per_year, 252);
        assert_eq!(config.indicators.rsi.period, 7);
        assert_eq!(config.log_config().format, LogFormat::Json);
    }

    #[test]
    fn test_env_overrides_file() {
        let env = config::Map::from([
            (
                "FINLENS__METRICS__RISK_FREE_RATE".to_string(),
                "0.02".to_string(),
            ),
            (
                "FINLENS__SENTIMENT__ENDPOINT".to_string(),
                "http://localhost:8080/classify".to_string(),
            ),
        ]);

        let config = AppConfig::load_with_env(None, Some(env)).unwrap();

        assert_eq!(config.metrics.risk_free_rate, 0.02);
        assert_eq!(
            config.sentiment.endpoint_url(),
            Some("http://localhost:8080/classify")
        );
    }

    #[test]
    fn test_unknown_log_format_falls_back_to_pretty() {
        let config = AppConfig {
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: "xml".to_string(),
            },
            ..Default::default()
        };
        assert_eq!(config.log_config().format, LogFormat::Pretty);
        assert_eq!(config.log_config().level, "debug");
    }
}
