//! DTOs for the manager report.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::delivery_type::DeliveryType;
use crate::domain::period::{BillingPeriod, PeriodError};
use crate::domain::summary::DeliverySummary;
use crate::services::gateway::DataSource;

/// Portuguese month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// `?month=&year=` selector shared by the report, history and API.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct PeriodQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl PeriodQuery {
    /// Resolves the requested period; missing parts default to the period
    /// containing `today`.
    pub fn resolve(&self, today: NaiveDate) -> Result<BillingPeriod, PeriodError> {
        let current = BillingPeriod::containing(today);
        match (self.month, self.year) {
            (None, None) => Ok(current),
            (month, year) => BillingPeriod::resolve(
                month.unwrap_or(current.month),
                year.unwrap_or(current.year),
            ),
        }
    }
}

/// Option of the month selector.
#[derive(Debug, Serialize)]
pub struct MonthOption {
    pub value: u32,
    pub label: &'static str,
}

pub fn month_options() -> Vec<MonthOption> {
    (1..=12)
        .zip(MONTH_NAMES)
        .map(|(value, label)| MonthOption { value, label })
        .collect()
}

/// Data required to render the summary page.
#[derive(Debug, Serialize)]
pub struct SummaryPageData {
    pub period: BillingPeriod,
    pub period_label: String,
    /// Columns of the report, in the hub's type order.
    pub delivery_types: Vec<DeliveryType>,
    pub summaries: Vec<DeliverySummary>,
    /// `None` when neither store could be read.
    pub source: Option<DataSource>,
}

impl SummaryPageData {
    pub fn unavailable(period: BillingPeriod) -> Self {
        Self {
            period,
            period_label: period_label(&period),
            delivery_types: Vec::new(),
            summaries: Vec::new(),
            source: None,
        }
    }
}

/// `Fevereiro de 2024`.
pub fn period_label(period: &BillingPeriod) -> String {
    let month = MONTH_NAMES
        .get(period.month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or_default();
    format!("{month} de {}", period.year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 27).unwrap()
    }

    #[test]
    fn empty_query_uses_period_of_today() {
        let period = PeriodQuery::default().resolve(today()).unwrap();
        assert_eq!((period.month, period.year), (3, 2024));
    }

    #[test]
    fn partial_query_fills_the_missing_part() {
        let period = PeriodQuery {
            month: Some(12),
            year: None,
        }
        .resolve(today())
        .unwrap();
        assert_eq!((period.month, period.year), (12, 2024));

        let period = PeriodQuery {
            month: None,
            year: Some(2023),
        }
        .resolve(today())
        .unwrap();
        assert_eq!((period.month, period.year), (3, 2023));
    }

    #[test]
    fn out_of_range_month_is_an_error() {
        let query = PeriodQuery {
            month: Some(13),
            year: Some(2024),
        };
        assert_eq!(query.resolve(today()), Err(PeriodError::InvalidMonth(13)));
    }

    #[test]
    fn label_names_the_closing_month() {
        let period = BillingPeriod::resolve(2, 2024).unwrap();
        assert_eq!(period_label(&period), "Fevereiro de 2024");
        assert_eq!(month_options().len(), 12);
    }
}
