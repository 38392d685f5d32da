//! Load sequencing for the dashboard.
//!
//! One load reads the current filter selection, fetches the latest balance,
//! recent daily usage and monthly usage, and pushes the reshaped data into
//! the two chart sinks. Loads never overlap: a trigger that arrives while a
//! load is running is dropped and reported as [`LoadOutcome::Busy`].

use chrono::NaiveDate;
use std::cell::Cell;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::{HttpGet, RequestError, UsageClient};
use crate::charts::{BalanceHeadline, ChartSink, DashboardCharts};
use crate::config::DashboardConfig;
use crate::date_range::DateRange;
use crate::series::{daily_usage_series, monthly_usage_series};
use crate::{Granularity, Resident, ResidentId};

pub const VALIDATION_NOTICE: &str = "Please fill in all filter conditions";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no resident selected")]
    MissingResident,
    #[error("no date range selected")]
    MissingDateRange,
}

impl ValidationError {
    /// Text shown to the user; identical for every missing filter
    pub fn notice(&self) -> &'static str {
        VALIDATION_NOTICE
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Request(#[from] RequestError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Completed,
    /// Another load was already running; nothing was fetched
    Busy,
}

/// What the filter bar currently holds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    pub resident_id: Option<ResidentId>,
    pub range: Option<DateRange>,
}

impl FilterSelection {
    pub fn new(resident_id: Option<ResidentId>, range: Option<DateRange>) -> Self {
        Self { resident_id, range }
    }

    /// Build a selection from the raw selector value and picker dates.
    /// Anything blank or unparsable counts as not selected.
    pub fn from_inputs(resident: &str, start: &str, end: &str) -> Self {
        Self {
            resident_id: ResidentId::from_selection(resident),
            range: DateRange::from_picker(start, end).ok(),
        }
    }

    fn validate(&self) -> Result<(ResidentId, DateRange), ValidationError> {
        let resident_id = self.resident_id.clone().ok_or(ValidationError::MissingResident)?;
        let range = self.range.ok_or(ValidationError::MissingDateRange)?;
        Ok((resident_id, range))
    }
}

/// Flips the controller to `Loading` and back to `Idle` when dropped, so an
/// error or an abandoned load future cannot leave it stuck.
struct LoadingGuard<'a> {
    state: &'a Cell<LoadState>,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(state: &'a Cell<LoadState>) -> Option<Self> {
        if state.get() == LoadState::Loading {
            return None;
        }
        state.set(LoadState::Loading);
        Some(Self { state })
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.set(LoadState::Idle);
    }
}

pub struct DashboardController<H> {
    client: UsageClient<H>,
    config: DashboardConfig,
    state: Cell<LoadState>,
}

impl<H: HttpGet> DashboardController<H> {
    pub fn new(client: UsageClient<H>, config: DashboardConfig) -> Self {
        Self {
            client,
            config: config.normalized(),
            state: Cell::new(LoadState::Idle),
        }
    }

    pub fn state(&self) -> LoadState {
        self.state.get()
    }

    /// Range the picker starts with
    pub fn default_range(&self, today: NaiveDate) -> DateRange {
        DateRange::recent(self.config.default_range_days, today).unwrap_or_else(|e| {
            warn!(error = %e, "default range unusable, starting from today");
            DateRange::new(today, today)
        })
    }

    /// Residents for the selector, plus the one selected initially (the first)
    pub async fn load_residents(
        &self,
    ) -> Result<(Vec<Resident>, Option<ResidentId>), RequestError> {
        let residents = self.client.list_residents().await?;
        info!(count = residents.len(), "loaded residents");
        let selected = residents.first().map(|resident| resident.resident_id.clone());
        Ok((residents, selected))
    }

    /// Run one full load for `filter` and update both charts.
    ///
    /// The balance chart and the monthly chart are fetched concurrently and
    /// each is updated from its own results. When either side fails the other
    /// is still applied and the first error is returned.
    pub async fn load<B, M>(
        &self,
        filter: &FilterSelection,
        today: NaiveDate,
        charts: &mut DashboardCharts<B, M>,
    ) -> Result<LoadOutcome, LoadError>
    where
        B: ChartSink,
        M: ChartSink,
    {
        let Some(_guard) = LoadingGuard::acquire(&self.state) else {
            warn!("load requested while another load is running, ignoring");
            return Ok(LoadOutcome::Busy);
        };

        let (resident_id, range) = filter.validate().map_err(|e| {
            warn!(reason = %e, "filter incomplete, nothing fetched");
            e
        })?;
        let recent = DateRange::recent(self.config.sparkline_days, today).unwrap_or_else(|e| {
            warn!(error = %e, "sparkline window unusable, showing today only");
            DateRange::new(today, today)
        });
        info!(resident = %resident_id, %range, sparkline = %recent, "loading dashboard");

        let balance_branch = async {
            futures::try_join!(
                self.client.latest_balance(&resident_id),
                self.client.usage(&resident_id, &recent, Granularity::Daily),
            )
        };
        let monthly_branch = self.client.usage(&resident_id, &range, Granularity::Monthly);
        let (balance, monthly) = futures::join!(balance_branch, monthly_branch);

        let mut first_error = None;

        match balance {
            Ok((latest, daily)) => {
                charts
                    .balance
                    .update_options(BalanceHeadline::from_latest(&latest).into());
                charts.balance.update_series(vec![daily_usage_series(&daily)]);
            }
            Err(e) => {
                error!(error = %e, "failed to load balance chart");
                first_error.get_or_insert(e);
            }
        }

        match monthly {
            Ok(rows) => charts.monthly.update_series(monthly_usage_series(&rows)),
            Err(e) => {
                error!(error = %e, "failed to load monthly usage chart");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e.into()),
            None => {
                info!(resident = %resident_id, "dashboard loaded");
                Ok(LoadOutcome::Completed)
            }
        }
    }
}
