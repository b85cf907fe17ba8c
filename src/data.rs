//! Revenue history handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// A single day of observed revenue, as supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueObservation {
    /// Calendar date of the observation
    pub date: NaiveDate,
    /// Total revenue for that day
    pub daily_revenue: f64,
}

impl RevenueObservation {
    /// Create a new observation
    pub fn new(date: NaiveDate, daily_revenue: f64) -> Self {
        Self {
            date,
            daily_revenue,
        }
    }
}

/// Date-ordered daily revenue history
///
/// The series is validated on construction and never mutated by the
/// forecasting core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueSeries {
    observations: Vec<RevenueObservation>,
}

impl RevenueSeries {
    /// Create a series from observations ordered by date
    ///
    /// Dates must be strictly increasing and every revenue value finite.
    pub fn new(observations: Vec<RevenueObservation>) -> Result<Self> {
        for window in observations.windows(2) {
            if window[1].date <= window[0].date {
                return Err(ForecastError::DataError(format!(
                    "Observations must be strictly ordered by date ({} follows {})",
                    window[1].date, window[0].date
                )));
            }
        }

        if let Some(bad) = observations.iter().find(|o| !o.daily_revenue.is_finite()) {
            return Err(ForecastError::DataError(format!(
                "Non-finite revenue value on {}",
                bad.date
            )));
        }

        Ok(Self { observations })
    }

    /// Build a series from (date, revenue) pairs
    pub fn from_pairs(pairs: Vec<(NaiveDate, f64)>) -> Result<Self> {
        Self::new(
            pairs
                .into_iter()
                .map(|(date, revenue)| RevenueObservation::new(date, revenue))
                .collect(),
        )
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series is empty
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// All observations, oldest first
    pub fn observations(&self) -> &[RevenueObservation] {
        &self.observations
    }

    /// Revenue values in date order
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.daily_revenue).collect()
    }

    /// Date of the most recent observation
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    /// The trailing `n` revenue values (fewer if the series is shorter)
    pub fn trailing_values(&self, n: usize) -> Vec<f64> {
        let start = self.observations.len().saturating_sub(n);
        self.observations[start..]
            .iter()
            .map(|o| o.daily_revenue)
            .collect()
    }

    /// Revenue values falling on the given weekday
    pub fn same_weekday_values(&self, weekday: Weekday) -> Vec<f64> {
        self.observations
            .iter()
            .filter(|o| o.date.weekday() == weekday)
            .map(|o| o.daily_revenue)
            .collect()
    }

    /// Calibration anchor for a forecast day: the historical average for that
    /// weekday, falling back to the overall mean when the weekday is unseen
    pub fn base_day_revenue(&self, weekday: Weekday) -> f64 {
        let same_day = self.same_weekday_values(weekday);
        if !same_day.is_empty() {
            return same_day.iter().sum::<f64>() / same_day.len() as f64;
        }

        if self.observations.is_empty() {
            return 0.0;
        }
        self.values().iter().sum::<f64>() / self.observations.len() as f64
    }

    /// Revenue totals per calendar month, oldest first, trailing up to
    /// `max_months` months (partial months included)
    pub fn monthly_totals(&self, max_months: usize) -> Vec<f64> {
        let mut totals: Vec<((i32, u32), f64)> = Vec::new();

        for obs in &self.observations {
            let key = (obs.date.year(), obs.date.month());
            match totals.last_mut() {
                Some((last_key, total)) if *last_key == key => *total += obs.daily_revenue,
                _ => totals.push((key, obs.daily_revenue)),
            }
        }

        let start = totals.len().saturating_sub(max_months);
        totals[start..].iter().map(|(_, total)| *total).collect()
    }

    /// Fraction of trailing months (up to `max_months`) with non-zero revenue
    pub fn non_zero_month_fraction(&self, max_months: usize) -> f64 {
        let totals = self.monthly_totals(max_months);
        if totals.is_empty() {
            return 0.0;
        }
        let non_zero = totals.iter().filter(|t| **t > 0.0).count();
        non_zero as f64 / totals.len() as f64
    }
}
