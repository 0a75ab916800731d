//! `analyze` / `metrics` 명령 통합 테스트.

use std::io::Write;
use std::path::Path;

use finlens_cli::commands::{
    format_metrics_table, load_series, render_report, run_analyze, run_metrics, AnalyzeOptions,
};
use finlens_cli::AppConfig;
use finlens_core::{IndicatorStatus, SentimentScores};
use serde_json::Value;
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

fn price_csv(rows: usize) -> String {
    let mut csv = String::from("date,open,high,low,close,volume\n");
    for i in 0..rows {
        let close = 100.0 * 1.01f64.powi(i as i32);
        csv.push_str(&format!(
            "2024-{:02}-{:02},{close:.4},{close:.4},{close:.4},{close:.4},{}\n",
            1 + i / 28,
            1 + i % 28,
            1000 + i
        ));
    }
    csv
}

#[tokio::test]
async fn analyze_builds_report_from_files() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "spy.csv", &price_csv(60));
    let profile = write_file(
        dir.path(),
        "profile.json",
        r#"{"name": "SPDR S&P 500", "sector": "ETF", "pe_ratio": "n/a"}"#,
    );

    // pe_ratio가 숫자가 아니면 프로필 로드 실패
    let options = AnalyzeOptions {
        input: input.clone(),
        symbol: None,
        profile: Some(profile),
    };
    assert!(run_analyze(&AppConfig::default(), &options).await.is_err());

    let profile = write_file(
        dir.path(),
        "profile.json",
        r#"{"name": "SPDR S&P 500", "sector": "ETF", "beta": 1.0}"#,
    );
    let options = AnalyzeOptions {
        input,
        symbol: None,
        profile: Some(profile),
    };
    let report = run_analyze(&AppConfig::default(), &options).await.unwrap();

    assert_eq!(report.symbol, "SPY");
    assert_eq!(report.historical_data.len(), 60);
    assert!(matches!(report.indicator_status, IndicatorStatus::Computed { .. }));
    assert_eq!(report.company_info.name, "SPDR S&P 500");
    assert_eq!(report.company_info.industry, "N/A");
    // 엔드포인트 미설정 → 감성 0 분포
    assert_eq!(report.sentiment, SentimentScores::zero());
    assert!((report.metrics.daily_returns - 0.01).abs() < 1e-4);
    assert_eq!(report.metrics.max_drawdown, 0.0);

    let json: Value = serde_json::from_str(&render_report(&report, true).unwrap()).unwrap();
    assert_eq!(json["symbol"], "SPY");
    assert!(json["historical_data"][59]["ma50"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn explicit_symbol_overrides_file_name() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "prices.csv", &price_csv(5));
    let options = AnalyzeOptions {
        input,
        symbol: Some("QQQ".to_string()),
        profile: None,
    };

    let report = run_analyze(&AppConfig::default(), &options).await.unwrap();
    assert_eq!(report.symbol, "QQQ");
    assert_eq!(report.company_info.name, "QQQ");
}

#[test]
fn header_only_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "empty.csv", "date,close\n");

    let err = load_series(&input).unwrap_err();
    assert!(err.to_string().contains("No data found"));
}

#[test]
fn missing_file_is_an_error() {
    assert!(load_series(Path::new("/nonexistent/finlens/prices.csv")).is_err());
}

#[test]
fn metrics_command_table() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        dir.path(),
        "down.csv",
        "date,close\n2024-01-02,100\n2024-01-03,90\n2024-01-04,81\n",
    );

    let metrics = run_metrics(&AppConfig::default(), &input).unwrap();
    assert!((metrics.max_drawdown - 0.19).abs() < 1e-12);

    let table = format_metrics_table(&metrics);
    assert!(table.contains("0.190000"));
}
