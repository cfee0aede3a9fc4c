//! Price statistics and the synthetic history placeholder.

use chrono::{Days, Utc};
use rand::Rng;

use fitcomp_core::{round2, HistoryPoint, Offer, PriceSummary};

const HISTORY_POINTS: u64 = 7;
const HISTORY_STEP_DAYS: u64 = 7;
const JITTER_AMPLITUDE: f64 = 3.0;

/// Computes min/max/average over the finite-priced offers.
///
/// Returns the all-`None` summary when no offer carries a usable price.
/// The average is rounded to 2 decimals, half away from zero (see
/// [`fitcomp_core::round2`]).
#[must_use]
pub fn summarize(offers: &[Offer]) -> PriceSummary {
    let prices: Vec<f64> = offers
        .iter()
        .filter_map(|o| o.price)
        .filter(|p| p.is_finite())
        .collect();

    if prices.is_empty() {
        return PriceSummary::empty();
    }

    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    #[allow(clippy::cast_precision_loss)]
    let avg = prices.iter().sum::<f64>() / prices.len() as f64;

    PriceSummary {
        min: Some(min),
        max: Some(max),
        avg: Some(round2(avg)),
    }
}

/// Fabricates a short price history around the current average.
///
/// Seven points at 7-day spacing into the past, each priced
/// `avg + jitter` with jitter uniform in ±3 EUR, floored at 0.01.
///
/// This is DECORATIVE data: nothing is persisted, the points are
/// regenerated with fresh jitter on every request, and callers must never
/// treat them as real historical tracking. Returns an empty vec when no
/// average exists (zero priced offers).
#[must_use]
pub fn synthetic_history(summary: &PriceSummary) -> Vec<HistoryPoint> {
    let Some(avg) = summary.avg.filter(|a| a.is_finite()) else {
        return Vec::new();
    };

    let today = Utc::now().date_naive();
    let mut rng = rand::rng();

    (1..=HISTORY_POINTS)
        .rev()
        .filter_map(|weeks_back| {
            let date = today.checked_sub_days(Days::new(weeks_back * HISTORY_STEP_DAYS))?;
            let jitter = rng.random_range(-JITTER_AMPLITUDE..=JITTER_AMPLITUDE);
            let price = round2((avg + jitter).max(0.01));
            Some(HistoryPoint { date, price })
        })
        .collect()
}
