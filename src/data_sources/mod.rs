//! Backend data sources for pet reports and breed standards.
//!
//! The trend logic talks to the backend only through [`ReportSource`], so
//! views can be driven by the real HTTP client or by any other async
//! provider of the same shapes.
//!
//! # Data Sources
//!
//! - [`petcare`]: REST client for the pet-care backend

use std::future::Future;

use crate::error::FetchError;
use crate::model::{PeriodLabel, Pet, ReportPayload};

pub mod petcare;

pub use petcare::PetCareClient;

/// Async access to the backend resources the trend views consume.
pub trait ReportSource: Send + Sync {
    /// All pets visible to the caller, with populated breeds.
    fn list_pets(&self) -> impl Future<Output = Result<Vec<Pet>, FetchError>> + Send;

    /// The most recent report for a pet.
    fn latest_report(
        &self,
        pet_id: &str,
    ) -> impl Future<Output = Result<ReportPayload, FetchError>> + Send;

    /// Reports filed for a pet in one calendar period.
    fn period_reports(
        &self,
        pet_id: &str,
        period: PeriodLabel,
    ) -> impl Future<Output = Result<ReportPayload, FetchError>> + Send;
}
