//! `analyze` 명령: CSV 시세 파일에서 전체 분석 리포트를 생성합니다.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use finlens_analytics::{IndicatorEngine, MetricsCalculator, ReportBuilder, StockReport};
use finlens_core::{analysis_span, parse_price_csv, CompanyProfile, PricePoint};
use tracing::{info, Instrument};

use crate::config::AppConfig;
use crate::sentiment::build_classifier;

/// 분석 옵션.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// 입력 CSV 경로
    pub input: PathBuf,
    /// 심볼 (기본: 파일명 대문자)
    pub symbol: Option<String>,
    /// 기업 정보 JSON 경로
    pub profile: Option<PathBuf>,
}

/// CSV 파일에서 시세 시계열을 로드합니다.
///
/// 데이터 행이 없으면 에러입니다.
pub fn load_series(path: &Path) -> Result<Vec<PricePoint>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let series = parse_price_csv(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    if series.is_empty() {
        bail!("No data found in {}", path.display());
    }

    info!(path = %path.display(), points = series.len(), "Loaded price series");
    Ok(series)
}

/// 기업 정보 JSON을 로드합니다 (경로가 없으면 빈 정보).
pub fn load_profile(path: Option<&Path>) -> Result<CompanyProfile> {
    let Some(path) = path else {
        return Ok(CompanyProfile::default());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid company profile JSON in {}", path.display()))
}

/// 파일명에서 심볼을 추출합니다 (`data/aapl.csv` → `AAPL`).
pub fn symbol_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_uppercase())
        .unwrap_or_else(|| "UNKNOWN".to_string())
}

/// 분석을 실행하여 리포트를 반환합니다.
pub async fn run_analyze(config: &AppConfig, options: &AnalyzeOptions) -> Result<StockReport> {
    let symbol = options
        .symbol
        .clone()
        .unwrap_or_else(|| symbol_from_path(&options.input));

    let series = load_series(&options.input)?;
    let profile = load_profile(options.profile.as_deref())?;
    let classifier = build_classifier(&config.sentiment)?;

    let builder = ReportBuilder::new(
        IndicatorEngine::with_params(config.indicators),
        MetricsCalculator::with_params(config.metrics),
        classifier,
    );

    let report = builder
        .build(&symbol, &series, &profile)
        .instrument(analysis_span!("analyze", symbol))
        .await;

    Ok(report)
}

/// 리포트를 JSON 문자열로 렌더링합니다.
pub fn render_report(report: &StockReport, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(report)?
    } else {
        serde_json::to_string_pretty(report)?
    };
    Ok(json)
}
