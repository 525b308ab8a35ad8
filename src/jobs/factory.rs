use std::sync::Arc;

use crate::config::JobKind;
use crate::traits::StreamingJob;
use super::{CustomerBirthYearJob, CustomerRiskJob};

/// Factory for creating streaming job instances
pub struct JobFactory;

impl JobFactory {
    /// Create the job named by `kind`
    ///
    /// - `customer_risk` -> CustomerRiskJob
    /// - `customer_birth_year` -> CustomerBirthYearJob
    pub fn create(kind: JobKind) -> Arc<dyn StreamingJob> {
        match kind {
            JobKind::CustomerRisk => Arc::new(CustomerRiskJob::new()),
            JobKind::CustomerBirthYear => Arc::new(CustomerBirthYearJob::new()),
        }
    }

    /// List all available job names
    pub fn list_available() -> Vec<&'static str> {
        JobKind::ALL.iter().map(JobKind::as_str).collect()
    }

    /// Check if a job name is available
    pub fn is_available(name: &str) -> bool {
        Self::list_available().contains(&name)
    }
}
