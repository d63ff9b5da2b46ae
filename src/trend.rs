//! Trend orchestration: fetch a window of periods, reduce each to a value.
//!
//! # Failure policy
//!
//! Each period is fetched independently. A failed, timed-out, or malformed
//! period becomes a gap (`None`) in the output; it never aborts the others.
//! Only a failed anchor fetch (the latest report) turns the whole view into
//! its "no data" state.
//!
//! # Stale responses
//!
//! Callers that may issue a newer request before an older one settles claim
//! a [`Ticket`] for the view as soon as the request arrives. Results computed
//! under a ticket that is no longer current are discarded. A finished
//! request's ticket releases its slot, so the [`StaleGuard`] only holds
//! requests still in flight.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use tracing::{debug, info, warn};

use crate::aggregation::{
    compute_metric_statuses, compute_monthly_graph_status, monthly_vitals, summarize_checkup,
};
use crate::data_sources::ReportSource;
use crate::error::{FetchError, TrendError};
use crate::model::{
    BmiSeries, BreedStandard, HealthTrend, MonthlyVitals, PeriodLabel, Pet, Report, TrendSeries,
};
use crate::window::{DEFAULT_WINDOW_LENGTH, WindowMode, build_window, chart_labels};

/// Default bound on a single backend request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Tunables for trend computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendSettings {
    /// Number of periods per window.
    pub window_length: usize,

    /// Upper bound on each backend request.
    pub request_timeout: Duration,
}

impl Default for TrendSettings {
    fn default() -> Self {
        Self {
            window_length: DEFAULT_WINDOW_LENGTH,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Run a fetch under a timeout, folding the timeout into [`FetchError`].
async fn bounded<T>(
    limit: Duration,
    fetch: impl std::future::Future<Output = Result<T, FetchError>>,
) -> Result<T, FetchError> {
    match tokio::time::timeout(limit, fetch).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(limit)),
    }
}

/// Fetch every period in `window` concurrently.
///
/// Returns one entry per period, in window order. Completion order does not
/// matter: results are placed by their index in the window.
pub async fn fetch_window<S: ReportSource>(
    source: &S,
    pet_id: &str,
    window: &[PeriodLabel],
    request_timeout: Duration,
) -> Vec<Option<Report>> {
    let mut pending: FuturesUnordered<_> = window
        .iter()
        .enumerate()
        .map(|(index, &period)| async move {
            let outcome = bounded(request_timeout, source.period_reports(pet_id, period)).await;
            (index, period, outcome)
        })
        .collect();

    let mut settled: Vec<Option<Report>> = vec![None; window.len()];

    while let Some((index, period, outcome)) = pending.next().await {
        match outcome {
            Ok(payload) => settled[index] = payload.into_latest(),
            Err(e) => {
                warn!(pet_id, period = %period, error = %e, "Period fetch failed; leaving a gap");
            }
        }
    }

    settled
}

/// Reduce fetched reports to the health-status chart.
///
/// A period is a gap when it has no report, when its report lacks a
/// respiratory rate, or when no metric could be classified.
pub fn health_series(
    window: &[PeriodLabel],
    reports: &[Option<Report>],
    standard: Option<&BreedStandard>,
) -> TrendSeries {
    let health_statuses = reports
        .iter()
        .map(|report| {
            let report = report.as_ref().filter(|r| r.respiratory_rate.is_some())?;
            let statuses = compute_metric_statuses(Some(report), standard);
            compute_monthly_graph_status(statuses.as_ref())
        })
        .collect();

    TrendSeries {
        months: chart_labels(window),
        health_statuses,
    }
}

/// Reduce fetched reports to the rolling BMI comparison.
pub fn bmi_series(
    window: &[PeriodLabel],
    reports: &[Option<Report>],
    standard: Option<&BreedStandard>,
) -> BmiSeries {
    let breed_bmi = standard.and_then(|s| s.bmi);

    BmiSeries {
        months: chart_labels(window),
        pet_bmis: reports
            .iter()
            .map(|report| report.as_ref().and_then(|r| r.bmi))
            .collect(),
        breed_bmis: vec![breed_bmi; window.len()],
    }
}

/// A request's claim on a view slot.
///
/// Dropping the ticket releases the slot unless a newer ticket holds it.
#[derive(Debug)]
pub struct Ticket {
    guard: Arc<StaleGuard>,
    slot: String,
    generation: u64,
}

impl Drop for Ticket {
    fn drop(&mut self) {
        let mut slots = self.guard.slots.lock().unwrap_or_else(PoisonError::into_inner);
        if slots.get(&self.slot) == Some(&self.generation) {
            slots.remove(&self.slot);
        }
    }
}

/// Tracks the newest in-flight request per view slot.
#[derive(Debug, Default)]
pub struct StaleGuard {
    next: AtomicU64,
    slots: Mutex<HashMap<String, u64>>,
}

impl StaleGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `slot`, superseding any earlier ticket for it.
    pub fn issue(self: &Arc<Self>, slot: &str) -> Ticket {
        let generation = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(slot.to_string(), generation);

        Ticket {
            guard: Arc::clone(self),
            slot: slot.to_string(),
            generation,
        }
    }

    /// Whether no newer ticket has been issued for this ticket's slot.
    ///
    /// A slot released by a newer ticket that already finished still
    /// supersedes this one.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&ticket.slot)
            == Some(&ticket.generation)
    }

    /// Number of slots with a request in flight.
    pub fn active_slots(&self) -> usize {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Assembles the view-level results on top of a [`ReportSource`].
pub struct TrendService<S> {
    source: Arc<S>,
    settings: TrendSettings,
    guard: Arc<StaleGuard>,
}

impl<S> Clone for TrendService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            settings: self.settings,
            guard: Arc::clone(&self.guard),
        }
    }
}

impl<S: ReportSource> TrendService<S> {
    pub fn new(source: S, settings: TrendSettings) -> Self {
        Self {
            source: Arc::new(source),
            settings,
            guard: Arc::new(StaleGuard::new()),
        }
    }

    pub fn settings(&self) -> TrendSettings {
        self.settings
    }

    /// Claim a view slot for a request that has just arrived.
    ///
    /// Hold the ticket for the lifetime of the request and pass it to the
    /// trend calls; results computed under a superseded ticket are discarded.
    pub fn claim(&self, slot: &str) -> Ticket {
        self.guard.issue(slot)
    }

    /// Number of view slots with a request in flight.
    pub fn active_views(&self) -> usize {
        self.guard.active_slots()
    }

    /// Look a pet up by id.
    pub async fn find_pet(&self, pet_id: &str) -> Result<Pet, TrendError> {
        let pets = bounded(self.settings.request_timeout, self.source.list_pets()).await?;

        pets.into_iter()
            .find(|pet| pet.id == pet_id)
            .ok_or_else(|| TrendError::PetNotFound {
                pet_id: pet_id.to_string(),
            })
    }

    /// The latest report, or `None` when it cannot be fetched.
    async fn latest_report(&self, pet_id: &str) -> Option<Report> {
        match bounded(self.settings.request_timeout, self.source.latest_report(pet_id)).await {
            Ok(payload) => payload.into_latest(),
            Err(e) => {
                warn!(pet_id, error = %e, "Failed to fetch latest report");
                None
            }
        }
    }

    /// Fail with `Superseded` if a newer request took over the view slot.
    fn check_current(&self, ticket: Option<&Ticket>, pet_id: &str) -> Result<(), TrendError> {
        match ticket {
            Some(ticket) if !self.guard.is_current(ticket) => {
                debug!(pet_id, "Discarding stale trend result");
                Err(TrendError::Superseded {
                    pet_id: pet_id.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Health-status trend ending at the latest report.
    ///
    /// The anchor must carry a respiratory rate, month, and year; anything
    /// less yields [`HealthTrend::empty`].
    pub async fn health_trend(
        &self,
        pet: &Pet,
        ticket: Option<&Ticket>,
    ) -> Result<HealthTrend, TrendError> {
        let standard = pet.standard();

        let Some(latest) = self.latest_report(&pet.id).await else {
            self.check_current(ticket, &pet.id)?;
            return Ok(HealthTrend::empty());
        };

        let anchor = latest.period().filter(|_| latest.respiratory_rate.is_some());
        let (Some(anchor), Some(summary)) = (anchor, summarize_checkup(&latest, standard)) else {
            self.check_current(ticket, &pet.id)?;
            return Ok(HealthTrend::empty());
        };

        let window = build_window(anchor, self.settings.window_length, WindowMode::EndingAtAnchor);
        let reports =
            fetch_window(self.source.as_ref(), &pet.id, &window, self.settings.request_timeout)
                .await;

        self.check_current(ticket, &pet.id)?;

        let chart = health_series(&window, &reports, standard);
        info!(
            pet_id = %pet.id,
            anchor = %anchor,
            gaps = chart.health_statuses.iter().filter(|s| s.is_none()).count(),
            "Health trend computed"
        );

        Ok(HealthTrend {
            overall: summary.overall,
            summary: Some(summary),
            chart,
        })
    }

    /// Rolling BMI comparison over the window following the latest report.
    pub async fn bmi_trend(
        &self,
        pet: &Pet,
        ticket: Option<&Ticket>,
    ) -> Result<BmiSeries, TrendError> {
        let Some(anchor) = self.latest_report(&pet.id).await.and_then(|r| r.period()) else {
            self.check_current(ticket, &pet.id)?;
            return Ok(BmiSeries::default());
        };

        let window = build_window(anchor, self.settings.window_length, WindowMode::FollowingAnchor);
        let reports =
            fetch_window(self.source.as_ref(), &pet.id, &window, self.settings.request_timeout)
                .await;

        self.check_current(ticket, &pet.id)?;

        info!(pet_id = %pet.id, anchor = %anchor, "BMI trend computed");
        Ok(bmi_series(&window, &reports, pet.standard()))
    }

    /// Vitals card for one selected period.
    pub async fn monthly_vitals(
        &self,
        pet: &Pet,
        period: PeriodLabel,
    ) -> Result<MonthlyVitals, TrendError> {
        let payload = bounded(
            self.settings.request_timeout,
            self.source.period_reports(&pet.id, period),
        )
        .await?;

        let report = payload.into_latest();
        Ok(monthly_vitals(period, report.as_ref(), pet.standard()))
    }
}
