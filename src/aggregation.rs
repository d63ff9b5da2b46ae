//! Aggregation logic for per-vital statuses and per-period health labels.
//!
//! Everything in this module is pure and total: missing inputs produce
//! `None` or [`OverallHealth::Unknown`], never an error.

use crate::model::{
    BreedStandard, CheckupStatusLabel, CheckupVital, HealthSummary, MetricStatusSet,
    MonthlyVitals, OverallHealth, PeriodLabel, Report, StatusTier, Vital, VitalRow,
    VitalStatusLabel,
};

/// Compute the four per-vital statuses for a report against a breed standard.
///
/// Returns `None` when either record is absent as a whole. Individual
/// vitals missing on either side come back as `None` entries.
pub fn compute_metric_statuses(
    report: Option<&Report>,
    standard: Option<&BreedStandard>,
) -> Option<MetricStatusSet> {
    let (report, standard) = (report?, standard?);

    Some(MetricStatusSet::from_fn(|vital| {
        StatusTier::classify(report.reading(vital), standard.expected(vital))
    }))
}

/// Tier counts over the present metrics of one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TierCounts {
    healthy: usize,
    moderate: usize,
    poor: usize,
}

impl TierCounts {
    fn from_statuses(statuses: &MetricStatusSet) -> Self {
        let mut counts = Self::default();
        for tier in statuses.present() {
            match tier {
                StatusTier::Healthy => counts.healthy += 1,
                StatusTier::Moderate => counts.moderate += 1,
                StatusTier::Poor => counts.poor += 1,
            }
        }
        counts
    }

    fn total(&self) -> usize {
        self.healthy + self.moderate + self.poor
    }
}

/// Fold a period's statuses into one label.
///
/// # Rules
///
/// Absent metrics are dropped first; with nothing left the label is `-`.
/// Otherwise the first matching rule wins:
///
/// 1. every metric healthy: `Healthy`
/// 2. no poor, at least two healthy, rest moderate: `Healthy`
/// 3. two or more poor: `Poor`
/// 4. at least one poor, two or more moderate, none healthy: `Poor`
/// 5. anything else: `Moderate`
///
/// A single poor metric alongside healthy ones lands on rule 5.
pub fn compute_overall_health(statuses: Option<&MetricStatusSet>) -> OverallHealth {
    let Some(statuses) = statuses else {
        return OverallHealth::Unknown;
    };

    let counts = TierCounts::from_statuses(statuses);
    let total = counts.total();

    if total == 0 {
        return OverallHealth::Unknown;
    }

    if counts.healthy == total {
        OverallHealth::Healthy
    } else if counts.poor == 0 && counts.healthy >= 2 && counts.healthy + counts.moderate == total {
        OverallHealth::Healthy
    } else if counts.poor >= 2 {
        OverallHealth::Poor
    } else if counts.poor >= 1 && counts.moderate >= 2 && counts.healthy == 0 {
        OverallHealth::Poor
    } else {
        OverallHealth::Moderate
    }
}

/// Plot value for one period: the aggregate label as a tier, or a gap.
pub fn compute_monthly_graph_status(statuses: Option<&MetricStatusSet>) -> Option<StatusTier> {
    compute_overall_health(statuses).tier()
}

/// Display label for one vital on the monthly report view.
pub fn vital_status_label(value: Option<f64>, status: Option<StatusTier>) -> VitalStatusLabel {
    if value.is_none() {
        return VitalStatusLabel::NotAvailable;
    }
    match status {
        Some(StatusTier::Healthy) => VitalStatusLabel::Normal,
        Some(StatusTier::Moderate) => VitalStatusLabel::Low,
        Some(StatusTier::Poor) => VitalStatusLabel::High,
        None => VitalStatusLabel::NotAvailable,
    }
}

/// Display label for one vital on the latest-checkup card.
///
/// A zero reading counts as not recorded.
pub fn checkup_status_label(value: Option<f64>, status: Option<StatusTier>) -> CheckupStatusLabel {
    if value.is_none_or(|v| v == 0.0) {
        return CheckupStatusLabel::NotRecorded;
    }
    match status {
        Some(StatusTier::Healthy) => CheckupStatusLabel::Normal,
        Some(StatusTier::Moderate) => CheckupStatusLabel::Elevated,
        Some(StatusTier::Poor) => CheckupStatusLabel::Abnormal,
        None => CheckupStatusLabel::Unknown,
    }
}

/// Vitals shown on the checkup card. BMI is charted separately.
const CHECKUP_VITALS: [Vital; 3] = [Vital::Respiratory, Vital::Heart, Vital::BloodPressure];

/// Latest-checkup summary for a report that carries its own period.
pub fn summarize_checkup(report: &Report, standard: Option<&BreedStandard>) -> Option<HealthSummary> {
    let period = report.period()?;
    let statuses = compute_metric_statuses(Some(report), standard);

    let vitals = CHECKUP_VITALS
        .into_iter()
        .map(|vital| {
            let value = report.reading(vital);
            CheckupVital {
                label: vital.label(),
                value,
                unit: vital.unit(),
                status: checkup_status_label(value, statuses.and_then(|s| s.get(vital))),
            }
        })
        .collect();

    Some(HealthSummary {
        period,
        overall: compute_overall_health(statuses.as_ref()),
        statuses,
        vitals,
    })
}

/// Build the vitals card for one period.
pub fn monthly_vitals(
    period: PeriodLabel,
    report: Option<&Report>,
    standard: Option<&BreedStandard>,
) -> MonthlyVitals {
    let statuses = compute_metric_statuses(report, standard);

    let vitals = Vital::ALL
        .into_iter()
        .map(|vital| {
            let value = report.and_then(|r| r.reading(vital));
            let status = statuses.and_then(|s| s.get(vital));
            VitalRow {
                label: vital.label(),
                value,
                unit: vital.unit(),
                status: vital_status_label(value, status),
            }
        })
        .collect();

    MonthlyVitals { period, vitals }
}
