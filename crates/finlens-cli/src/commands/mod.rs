//! CLI 명령어 구현 모듈.

pub mod analyze;
pub mod metrics;

pub use analyze::{load_profile, load_series, render_report, run_analyze, AnalyzeOptions};
pub use metrics::{format_metrics_table, run_metrics};
