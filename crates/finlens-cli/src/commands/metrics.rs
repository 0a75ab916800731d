//! `metrics` 명령: 위험/수익 지표만 계산합니다.

use std::path::Path;

use anyhow::Result;
use finlens_analytics::MetricsCalculator;
use finlens_core::MetricsResult;

use super::analyze::load_series;
use crate::config::AppConfig;

/// 지표를 계산합니다.
pub fn run_metrics(config: &AppConfig, input: &Path) -> Result<MetricsResult> {
    let series = load_series(input)?;
    Ok(MetricsCalculator::with_params(config.metrics).calculate(&series))
}

/// 지표를 표 형식으로 출력합니다.
pub fn format_metrics_table(metrics: &MetricsResult) -> String {
    let rows = [
        ("Daily returns", metrics.daily_returns),
        ("Annual returns", metrics.annual_returns),
        ("Volatility", metrics.volatility),
        ("Max drawdown", metrics.max_drawdown),
        ("Sharpe ratio", metrics.sharpe_ratio),
    ];

    let mut table = format!("{:<16} {:>14}\n", "Metric", "Value");
    table.push_str(&format!("{}\n", "-".repeat(31)));
    for (name, value) in rows {
        table.push_str(&format!("{:<16} {:>14.6}\n", name, value));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_metrics_table() {
        let table = format_metrics_table(&MetricsResult {
            max_drawdown: 0.19,
            ..Default::default()
        });

        assert!(table.starts_with("Metric"));
        assert!(table.contains("Max drawdown"));
        assert!(table.contains("0.190000"));
        assert_eq!(table.lines().count(), 7);
    }
}
