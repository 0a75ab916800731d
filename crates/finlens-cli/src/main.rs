//! finlens CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 전체 리포트 (지표 + 성과 지표 + 기업 정보 + 감성)
//! finlens analyze -i data/aapl.csv --profile data/aapl_profile.json -o report.json
//!
//! # 성과 지표만 표로 출력
//! finlens metrics -i data/aapl.csv
//!
//! # 설정 파일 지정
//! finlens --config config/default.toml analyze -i data/spy.csv -s SPY --compact
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use finlens_cli::commands::{
    format_metrics_table, render_report, run_analyze, run_metrics, AnalyzeOptions,
};
use finlens_cli::AppConfig;
use finlens_core::init_logging;
use tracing::info;

#[derive(Parser)]
#[command(name = "finlens")]
#[command(about = "기술적 지표 및 위험/수익 지표 분석", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 전체 분석 리포트를 JSON으로 출력
    Analyze {
        /// 입력 CSV 파일 (date,open,high,low,close,volume)
        #[arg(short, long)]
        input: PathBuf,

        /// 종목 심볼 (기본: 파일명)
        #[arg(short, long)]
        symbol: Option<String>,

        /// 기업 정보 JSON 파일
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// 출력 파일 경로 (지정하지 않으면 stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 한 줄 JSON 출력
        #[arg(long, default_value = "false")]
        compact: bool,
    },

    /// 위험/수익 지표를 표로 출력
    Metrics {
        /// 입력 CSV 파일
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(config.log_config().override_from_env())?;

    match cli.command {
        Commands::Analyze {
            input,
            symbol,
            profile,
            output,
            compact,
        } => {
            let options = AnalyzeOptions {
                input,
                symbol,
                profile,
            };
            let report = run_analyze(&config, &options).await?;
            let json = render_report(&report, compact)?;

            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Report saved to: {}", path.display());
                }
                None => println!("{json}"),
            }
        }

        Commands::Metrics { input } => {
            let metrics = run_metrics(&config, &input)?;
            print!("{}", format_metrics_table(&metrics));
        }
    }

    Ok(())
}
