//! # Analytics Repository
//!
//! Synthetic market-price report for the farmer analysis page.
//!
//! ## Series
//! ```text
//! price(i) = 30 + 5·sin(i / 5) + 2·jitter      i = 0..29, day = i + 1
//!
//! avgMarketPrice  = mean(series)                    (2 decimals)
//! highestPrice    = max(series)                     (2 decimals)
//! avgSellingPrice = avgMarketPrice × 1.09           (2 decimals)
//! priceTrend      = (last − first) / first × 100    (1 decimal, percent)
//! ```

use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

use mandi_core::{AnalysisReport, PricePoint, PRICE_SERIES_DAYS};

use crate::config::{Delay, MockConfig};
use crate::random::JitterSource;

pub const DEFAULT_PRODUCT: &str = "Organic Tomatoes";
pub const DEFAULT_RANGE: &str = "30d";

const BASE_PRICE: f64 = 30.0;
const WAVE_AMPLITUDE: f64 = 5.0;
const WAVE_PERIOD: f64 = 5.0;
const JITTER_AMPLITUDE: f64 = 2.0;

/// Markup of the farmer's selling price over the market average.
const SELLING_MARGIN: f64 = 0.09;

/// Repository for the price analysis report.
#[derive(Debug, Clone)]
pub struct AnalyticsRepository {
    jitter: Arc<dyn JitterSource>,
    config: MockConfig,
}

impl AnalyticsRepository {
    pub(crate) fn new(jitter: Arc<dyn JitterSource>, config: MockConfig) -> Self {
        AnalyticsRepository { jitter, config }
    }

    /// Builds the price report for `product` over `range`.
    ///
    /// Defaults to "Organic Tomatoes" and "30d". The range is echoed back;
    /// the series always covers 30 days.
    pub async fn price_analysis(
        &self,
        product: Option<&str>,
        range: Option<&str>,
    ) -> AnalysisReport {
        self.config.simulate(Delay::Default).await;

        let product = product.unwrap_or(DEFAULT_PRODUCT);
        let range = range.unwrap_or(DEFAULT_RANGE);
        let series = synthetic_series(self.jitter.as_ref());

        debug!(product, range, points = series.len(), "Built price analysis");
        build_report(product, range, series)
    }
}

/// Noise-free part of the price on day index `i`.
fn base_price(i: u32) -> f64 {
    BASE_PRICE + WAVE_AMPLITUDE * (f64::from(i) / WAVE_PERIOD).sin()
}

fn synthetic_series(jitter: &dyn JitterSource) -> Vec<PricePoint> {
    (0..PRICE_SERIES_DAYS)
        .map(|i| PricePoint {
            day: i + 1,
            price: base_price(i) + JITTER_AMPLITUDE * jitter.next_unit(),
        })
        .collect()
}

fn build_report(product: &str, range: &str, series: Vec<PricePoint>) -> AnalysisReport {
    let prices: Vec<f64> = series.iter().map(|p| p.price).collect();

    let avg = if prices.is_empty() {
        0.0
    } else {
        prices.iter().sum::<f64>() / prices.len() as f64
    };
    let highest = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let highest = if highest.is_finite() { highest } else { 0.0 };

    let trend = match (prices.first(), prices.last()) {
        (Some(&first), Some(&last)) if first != 0.0 => (last - first) / first * 100.0,
        _ => 0.0,
    };

    AnalysisReport {
        product: product.to_string(),
        range: range.to_string(),
        avg_market_price: round_to(avg, 2),
        avg_selling_price: round_to(avg * (1.0 + SELLING_MARGIN), 2),
        highest_price: round_to(highest, 2),
        price_trend: round_to(trend, 1),
        series,
        generated_at: Utc::now(),
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
