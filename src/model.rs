//! Data models for petvitals.
//!
//! Every type in this module is a transient value shape: it is read from a
//! backend response, reduced, and dropped. Nothing here is persisted or
//! mutated in place.
//!
//! # Schema contract
//!
//! Reports and breed standards name the same vitals differently. The
//! [`Vital`] table is the single place that maps between them:
//!
//! | Vital | Report field | Standard field |
//! |---|---|---|
//! | respiratory | `respiratoryRate` | `respiratory` |
//! | heart | `heartRate` | `heartRate` |
//! | bloodPressure | `bloodPressure` | `bloodPressure` |
//! | bmi | `bmi` | `bmi` |

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Month, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Deviation (absolute units) at or below which a vital is `Healthy`.
pub const HEALTHY_BAND: f64 = 10.0;

/// Deviation (absolute units) at or below which a vital is `Moderate`.
pub const MODERATE_BAND: f64 = 20.0;

/// Three-tier health classification for one vital or one period.
///
/// Serializes as its numeric code (`Poor = 0`, `Moderate = 1`, `Healthy = 2`),
/// which is what the chart consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusTier {
    Poor = 0,
    Moderate = 1,
    Healthy = 2,
}

impl StatusTier {
    /// Classify a measured vital against its breed standard.
    ///
    /// # Thresholds
    ///
    /// With `diff = measured - standard`:
    ///
    /// - `healthy`: `|diff| <= 10`
    /// - `moderate`: `10 < |diff| <= 20`
    /// - `poor`: `|diff| > 20`
    ///
    /// Bands are absolute, in whatever unit the vital is recorded in.
    /// Returns `None` when either side is absent or not finite. Two finite
    /// sides whose difference overflows are `Poor`.
    pub fn classify(measured: Option<f64>, standard: Option<f64>) -> Option<Self> {
        let measured = measured.filter(|v| v.is_finite())?;
        let standard = standard.filter(|v| v.is_finite())?;

        let deviation = (measured - standard).abs();
        if deviation <= HEALTHY_BAND {
            Some(StatusTier::Healthy)
        } else if deviation <= MODERATE_BAND {
            Some(StatusTier::Moderate)
        } else {
            Some(StatusTier::Poor)
        }
    }

    /// Numeric code used for plotting.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl Serialize for StatusTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Aggregate label for one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OverallHealth {
    Healthy,
    Moderate,
    Poor,
    /// No usable metric.
    #[serde(rename = "-")]
    Unknown,
}

impl OverallHealth {
    pub fn label(&self) -> &'static str {
        match self {
            OverallHealth::Healthy => "Healthy",
            OverallHealth::Moderate => "Moderate",
            OverallHealth::Poor => "Poor",
            OverallHealth::Unknown => "-",
        }
    }

    /// The plot value for this label; `Unknown` is a gap.
    pub fn tier(&self) -> Option<StatusTier> {
        match self {
            OverallHealth::Healthy => Some(StatusTier::Healthy),
            OverallHealth::Moderate => Some(StatusTier::Moderate),
            OverallHealth::Poor => Some(StatusTier::Poor),
            OverallHealth::Unknown => None,
        }
    }
}

impl fmt::Display for OverallHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-vital label shown on the monthly report view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VitalStatusLabel {
    Normal,
    Low,
    High,
    #[serde(rename = "N/A")]
    NotAvailable,
}

/// Per-vital label shown on the latest-checkup card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckupStatusLabel {
    Normal,
    Elevated,
    Abnormal,
    #[serde(rename = "Not Recorded")]
    NotRecorded,
    Unknown,
}

/// One of the four tracked vitals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vital {
    Respiratory,
    Heart,
    BloodPressure,
    Bmi,
}

impl Vital {
    /// All vitals, in display order.
    pub const ALL: [Vital; 4] = [
        Vital::Respiratory,
        Vital::Heart,
        Vital::BloodPressure,
        Vital::Bmi,
    ];

    /// Field name in a report record.
    pub fn report_field(self) -> &'static str {
        match self {
            Vital::Respiratory => "respiratoryRate",
            Vital::Heart => "heartRate",
            Vital::BloodPressure => "bloodPressure",
            Vital::Bmi => "bmi",
        }
    }

    /// Field name in a breed standard record.
    pub fn standard_field(self) -> &'static str {
        match self {
            Vital::Respiratory => "respiratory",
            Vital::Heart => "heartRate",
            Vital::BloodPressure => "bloodPressure",
            Vital::Bmi => "bmi",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Vital::Respiratory => "Respiratory Rate",
            Vital::Heart => "Heart Rate",
            Vital::BloodPressure => "Blood Pressure",
            Vital::Bmi => "BMI",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Vital::Respiratory => "breaths/min",
            Vital::Heart => "bpm",
            Vital::BloodPressure => "mmHg",
            Vital::Bmi => "",
        }
    }
}

/// A health report as returned by the backend.
///
/// Numeric fields are read leniently: numbers and numeric strings are
/// accepted, anything else (including `NaN`) is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(default, deserialize_with = "lenient_number")]
    pub respiratory_rate: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub heart_rate: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub blood_pressure: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub bmi: Option<f64>,

    /// Full English month name, e.g. "March".
    #[serde(default, deserialize_with = "lenient_string")]
    pub month: Option<String>,

    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Report {
    /// The measured value for a vital.
    pub fn reading(&self, vital: Vital) -> Option<f64> {
        match vital {
            Vital::Respiratory => self.respiratory_rate,
            Vital::Heart => self.heart_rate,
            Vital::BloodPressure => self.blood_pressure,
            Vital::Bmi => self.bmi,
        }
    }

    /// The calendar period this report belongs to, if both parts are present.
    pub fn period(&self) -> Option<PeriodLabel> {
        let month = self.month.as_deref()?.parse::<PeriodMonth>().ok()?;
        Some(PeriodLabel::new(month.0, self.year?))
    }
}

/// Expected value of each vital for a breed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreedStandard {
    #[serde(default, deserialize_with = "lenient_number")]
    pub respiratory: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub heart_rate: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub blood_pressure: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub bmi: Option<f64>,
}

impl BreedStandard {
    /// The expected value for a vital.
    pub fn expected(&self, vital: Vital) -> Option<f64> {
        match vital {
            Vital::Respiratory => self.respiratory,
            Vital::Heart => self.heart_rate,
            Vital::BloodPressure => self.blood_pressure,
            Vital::Bmi => self.bmi,
        }
    }
}

/// A breed record as populated into a pet's `breedId`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Breed {
    #[serde(rename = "_id", default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(flatten)]
    pub standard: BreedStandard,
}

/// A pet as listed by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Pet {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Populated breed; `None` when the backend sent only an id or nothing.
    #[serde(rename = "breedId", default, deserialize_with = "populated_breed")]
    pub breed: Option<Breed>,
}

impl Pet {
    pub fn standard(&self) -> Option<&BreedStandard> {
        self.breed.as_ref().map(|b| &b.standard)
    }
}

/// A report query result: the backend answers with one object, an array,
/// or nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportPayload {
    Empty,
    Single(Report),
    Many(Vec<Report>),
}

impl ReportPayload {
    /// Decode a raw JSON body.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Null => Ok(ReportPayload::Empty),
            Value::Array(_) => Ok(ReportPayload::Many(serde_json::from_value(value)?)),
            other => Ok(ReportPayload::Single(serde_json::from_value(other)?)),
        }
    }

    /// The report to use for this query.
    ///
    /// For arrays this is the one with the latest `createdAt`. Undated
    /// reports rank below dated ones; ties keep payload order.
    pub fn into_latest(self) -> Option<Report> {
        match self {
            ReportPayload::Empty => None,
            ReportPayload::Single(report) => Some(report),
            ReportPayload::Many(reports) => reports
                .into_iter()
                .reduce(|best, candidate| {
                    if candidate.created_at > best.created_at {
                        candidate
                    } else {
                        best
                    }
                }),
        }
    }
}

/// The four per-vital statuses for one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricStatusSet {
    pub respiratory: Option<StatusTier>,
    pub heart: Option<StatusTier>,
    pub blood_pressure: Option<StatusTier>,
    pub bmi: Option<StatusTier>,
}

impl MetricStatusSet {
    /// Build a set by computing each vital independently.
    pub fn from_fn(mut status: impl FnMut(Vital) -> Option<StatusTier>) -> Self {
        Self {
            respiratory: status(Vital::Respiratory),
            heart: status(Vital::Heart),
            blood_pressure: status(Vital::BloodPressure),
            bmi: status(Vital::Bmi),
        }
    }

    pub fn get(&self, vital: Vital) -> Option<StatusTier> {
        match vital {
            Vital::Respiratory => self.respiratory,
            Vital::Heart => self.heart,
            Vital::BloodPressure => self.blood_pressure,
            Vital::Bmi => self.bmi,
        }
    }

    /// Statuses that were actually computed.
    pub fn present(&self) -> impl Iterator<Item = StatusTier> + '_ {
        Vital::ALL.into_iter().filter_map(|vital| self.get(vital))
    }
}

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// One calendar month of one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeriodLabel {
    pub month: Month,
    pub year: i32,
}

impl PeriodLabel {
    const FIRST_INDEX: i64 = i32::MIN as i64 * 12;
    const LAST_INDEX: i64 = i32::MAX as i64 * 12 + 11;

    pub fn new(month: Month, year: i32) -> Self {
        Self { month, year }
    }

    /// Full English month name, as the backend expects in queries.
    pub fn full_name(&self) -> &'static str {
        self.month.name()
    }

    /// Three-letter month name for chart labels.
    pub fn short_name(&self) -> &'static str {
        &self.month.name()[..3]
    }

    /// The period `offset` months away, rolling the year as needed.
    ///
    /// Saturates at the first and last representable periods.
    pub fn shift(&self, offset: i64) -> Self {
        let index = self
            .index()
            .saturating_add(offset)
            .clamp(Self::FIRST_INDEX, Self::LAST_INDEX);
        Self::from_index(index).unwrap_or(*self)
    }

    /// The period `offset` months away, or `None` past the representable years.
    pub fn checked_shift(&self, offset: i64) -> Option<Self> {
        Self::from_index(self.index().checked_add(offset)?)
    }

    /// Months since January of year 0.
    fn index(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month.number_from_month() - 1)
    }

    fn from_index(index: i64) -> Option<Self> {
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        Some(Self::new(MONTHS[index.rem_euclid(12) as usize], year))
    }

    pub fn next(&self) -> Self {
        self.shift(1)
    }

    pub fn previous(&self) -> Self {
        self.shift(-1)
    }

    fn ordinal(&self) -> (i32, u32) {
        (self.year, self.month.number_from_month())
    }
}

impl Ord for PeriodLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl PartialOrd for PeriodLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PeriodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.full_name(), self.year)
    }
}

impl Serialize for PeriodLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PeriodLabel", 3)?;
        state.serialize_field("month", self.full_name())?;
        state.serialize_field("shortMonth", self.short_name())?;
        state.serialize_field("year", &self.year)?;
        state.end()
    }
}

/// A month name parsed from backend or query text.
///
/// Accepts full English names and three-letter abbreviations, in any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodMonth(pub Month);

impl FromStr for PeriodMonth {
    type Err = chrono::ParseMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<Month>().map(PeriodMonth)
    }
}

/// Chart payload for the health trend: one point per period, chronological.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSeries {
    pub months: Vec<String>,
    pub health_statuses: Vec<Option<StatusTier>>,
}

/// Chart payload for the rolling BMI comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiSeries {
    pub months: Vec<String>,
    pub pet_bmis: Vec<Option<f64>>,
    pub breed_bmis: Vec<Option<f64>>,
}

/// One vital on the latest-checkup card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckupVital {
    pub label: &'static str,
    pub value: Option<f64>,
    pub unit: &'static str,
    pub status: CheckupStatusLabel,
}

/// Latest-checkup summary shown next to the trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSummary {
    pub period: PeriodLabel,
    pub statuses: Option<MetricStatusSet>,
    pub overall: OverallHealth,
    pub vitals: Vec<CheckupVital>,
}

/// Everything the dashboard needs: summary, overall label, and chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthTrend {
    pub summary: Option<HealthSummary>,
    pub overall: OverallHealth,
    pub chart: TrendSeries,
}

impl HealthTrend {
    /// The "no data" state.
    pub fn empty() -> Self {
        Self {
            summary: None,
            overall: OverallHealth::Unknown,
            chart: TrendSeries::default(),
        }
    }
}

/// One row of the monthly vitals card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VitalRow {
    pub label: &'static str,
    pub value: Option<f64>,
    pub unit: &'static str,
    pub status: VitalStatusLabel,
}

/// The monthly report view for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyVitals {
    pub period: PeriodLabel,
    pub vitals: Vec<VitalRow>,
}

fn number_from_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        _ => None,
    })
}

fn populated_breed<'de, D>(deserializer: D) -> Result<Option<Breed>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .filter(Value::is_object)
        .and_then(|v| serde_json::from_value(v).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_zero_diff() {
        for x in [0.0, 12.5, 98.0, 140.0] {
            assert_eq!(StatusTier::classify(Some(x), Some(x)), Some(StatusTier::Healthy));
        }
    }

    #[test]
    fn test_classify_boundaries() {
        let x = 70.0;
        // Standard above the measurement (negative diff)
        assert_eq!(StatusTier::classify(Some(x), Some(x + 10.0)), Some(StatusTier::Healthy));
        assert_eq!(
            StatusTier::classify(Some(x), Some(x + 10.0001)),
            Some(StatusTier::Moderate)
        );
        assert_eq!(StatusTier::classify(Some(x), Some(x + 20.0)), Some(StatusTier::Moderate));
        assert_eq!(StatusTier::classify(Some(x), Some(x + 20.0001)), Some(StatusTier::Poor));

        // Measurement above the standard (positive diff)
        assert_eq!(StatusTier::classify(Some(x + 10.0), Some(x)), Some(StatusTier::Healthy));
        assert_eq!(
            StatusTier::classify(Some(x + 10.0001), Some(x)),
            Some(StatusTier::Moderate)
        );
        assert_eq!(StatusTier::classify(Some(x + 20.0), Some(x)), Some(StatusTier::Moderate));
        assert_eq!(StatusTier::classify(Some(x + 20.0001), Some(x)), Some(StatusTier::Poor));
    }

    #[test]
    fn test_classify_missing_or_non_finite() {
        assert_eq!(StatusTier::classify(None, Some(5.0)), None);
        assert_eq!(StatusTier::classify(Some(5.0), None), None);
        assert_eq!(StatusTier::classify(Some(f64::NAN), Some(5.0)), None);
        assert_eq!(StatusTier::classify(Some(5.0), Some(f64::INFINITY)), None);
    }

    #[test]
    fn test_classify_overflowing_diff_is_poor() {
        assert_eq!(
            StatusTier::classify(Some(f64::MAX), Some(-f64::MAX)),
            Some(StatusTier::Poor)
        );
        assert_eq!(
            StatusTier::classify(Some(-f64::MAX), Some(f64::MAX)),
            Some(StatusTier::Poor)
        );
    }

    #[test]
    fn test_status_tier_codes() {
        assert_eq!(StatusTier::Poor.code(), 0);
        assert_eq!(StatusTier::Moderate.code(), 1);
        assert_eq!(StatusTier::Healthy.code(), 2);
        assert!(StatusTier::Healthy > StatusTier::Moderate);
        assert_eq!(serde_json::to_value(StatusTier::Moderate).unwrap(), json!(1));
    }

    #[test]
    fn test_report_lenient_numbers() {
        let report: Report = serde_json::from_value(json!({
            "respiratoryRate": "24",
            "heartRate": "fast",
            "bloodPressure": null,
            "bmi": 21.5,
            "month": "March",
            "year": "2024",
            "createdAt": "not a date"
        }))
        .unwrap();

        assert_eq!(report.respiratory_rate, Some(24.0));
        assert_eq!(report.heart_rate, None);
        assert_eq!(report.blood_pressure, None);
        assert_eq!(report.bmi, Some(21.5));
        assert_eq!(report.year, Some(2024));
        assert_eq!(report.created_at, None);
        assert_eq!(report.period(), Some(PeriodLabel::new(Month::March, 2024)));
    }

    #[test]
    fn test_report_nan_string_is_absent() {
        let report: Report = serde_json::from_value(json!({ "heartRate": "NaN", "bmi": "" })).unwrap();
        assert_eq!(report.heart_rate, None);
        assert_eq!(report.bmi, None);
    }

    #[test]
    fn test_vital_field_table_matches_report_schema() {
        for (i, vital) in Vital::ALL.into_iter().enumerate() {
            let value = 10.0 + i as f64;
            let mut body = serde_json::Map::new();
            body.insert(vital.report_field().to_string(), json!(value));
            let report: Report = serde_json::from_value(Value::Object(body)).unwrap();
            assert_eq!(report.reading(vital), Some(value), "report field for {vital:?}");

            let mut body = serde_json::Map::new();
            body.insert(vital.standard_field().to_string(), json!(value));
            let standard: BreedStandard = serde_json::from_value(Value::Object(body)).unwrap();
            assert_eq!(standard.expected(vital), Some(value), "standard field for {vital:?}");
        }
    }

    #[test]
    fn test_pet_with_populated_breed() {
        let pet: Pet = serde_json::from_value(json!({
            "_id": "p1",
            "name": "Rex",
            "breedId": { "_id": "b1", "name": "Beagle", "respiratory": 24, "bmi": 20 }
        }))
        .unwrap();

        let breed = pet.breed.as_ref().unwrap();
        assert_eq!(breed.name, "Beagle");
        assert_eq!(pet.standard().unwrap().respiratory, Some(24.0));
        assert_eq!(pet.standard().unwrap().heart_rate, None);
    }

    #[test]
    fn test_pet_with_unpopulated_breed() {
        let pet: Pet = serde_json::from_value(json!({ "_id": "p2", "breedId": "b1" })).unwrap();
        assert!(pet.breed.is_none());
    }

    #[test]
    fn test_payload_picks_latest_created_at() {
        let payload = ReportPayload::from_value(json!([
            { "bmi": 1, "createdAt": "2024-03-02T10:00:00Z" },
            { "bmi": 2, "createdAt": "2024-03-20T10:00:00Z" },
            { "bmi": 3 },
            { "bmi": 4, "createdAt": "2024-03-05T10:00:00Z" }
        ]))
        .unwrap();

        assert_eq!(payload.into_latest().unwrap().bmi, Some(2.0));
    }

    #[test]
    fn test_payload_empty_shapes() {
        assert_eq!(ReportPayload::from_value(Value::Null).unwrap().into_latest(), None);
        assert_eq!(ReportPayload::from_value(json!([])).unwrap().into_latest(), None);
        assert!(ReportPayload::from_value(json!("not found")).is_err());
    }

    #[test]
    fn test_period_names() {
        let period = PeriodLabel::new(Month::September, 2024);
        assert_eq!(period.full_name(), "September");
        assert_eq!(period.short_name(), "Sep");
        assert_eq!(period.to_string(), "September 2024");
    }

    #[test]
    fn test_period_shift_rolls_year() {
        let dec = PeriodLabel::new(Month::December, 2024);
        assert_eq!(dec.next(), PeriodLabel::new(Month::January, 2025));
        assert_eq!(dec.next().previous(), dec);
        assert_eq!(
            PeriodLabel::new(Month::March, 2024).shift(-11),
            PeriodLabel::new(Month::April, 2023)
        );
        assert_eq!(
            PeriodLabel::new(Month::January, 2024).shift(-25),
            PeriodLabel::new(Month::December, 2021)
        );
    }

    #[test]
    fn test_period_shift_saturates_at_year_limits() {
        let last = PeriodLabel::new(Month::December, i32::MAX);
        assert_eq!(last.next(), last);
        assert_eq!(last.checked_shift(1), None);
        assert_eq!(
            last.checked_shift(-1),
            Some(PeriodLabel::new(Month::November, i32::MAX))
        );

        let first = PeriodLabel::new(Month::January, i32::MIN);
        assert_eq!(first.previous(), first);
        assert_eq!(first.checked_shift(-1), None);
        assert_eq!(first.shift(i64::MIN), first);
    }

    #[test]
    fn test_period_ordering() {
        assert!(PeriodLabel::new(Month::December, 2023) < PeriodLabel::new(Month::January, 2024));
        assert!(PeriodLabel::new(Month::February, 2024) > PeriodLabel::new(Month::January, 2024));
    }

    #[test]
    fn test_period_month_parsing() {
        assert_eq!("March".parse::<PeriodMonth>().unwrap().0, Month::March);
        assert_eq!("mar".parse::<PeriodMonth>().unwrap().0, Month::March);
        assert!("Marchuary".parse::<PeriodMonth>().is_err());
    }

    #[test]
    fn test_overall_health_serializes_as_label() {
        assert_eq!(serde_json::to_value(OverallHealth::Unknown).unwrap(), json!("-"));
        assert_eq!(serde_json::to_value(OverallHealth::Healthy).unwrap(), json!("Healthy"));
        assert_eq!(
            serde_json::to_value(VitalStatusLabel::NotAvailable).unwrap(),
            json!("N/A")
        );
    }
}
