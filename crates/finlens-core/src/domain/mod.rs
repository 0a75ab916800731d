//! 도메인 모델.

pub mod company;
pub mod enriched;
pub mod metrics;
pub mod price;
pub mod sentiment;

pub use company::{CompanyInfo, CompanyProfile};
pub use enriched::{
    EnrichedPoint, EnrichedSeries, IndicatorAvailability, IndicatorStatus, IndicatorValues,
};
pub use metrics::MetricsResult;
pub use price::{parse_price_csv, PricePoint};
pub use sentiment::{SentimentClassifier, SentimentError, SentimentLabel, SentimentScores};
