//! Verification outcome types and JSON reporting

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Outcome of checking one property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyStatus {
    /// Every generated case satisfied the property.
    Proven,
    /// At least one case violated the property.
    Violated,
}

/// One property together with the evidence gathered for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyResult {
    pub name: String,
    pub status: PropertyStatus,
    /// Number of concrete cases exercised.
    pub checked_cases: usize,
    /// Human-readable descriptions of the violating cases, if any.
    pub violations: Vec<String>,
}

impl PropertyResult {
    pub fn passed(&self) -> bool {
        self.status == PropertyStatus::Proven
    }
}

/// Aggregated results over a full verification run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub results: Vec<PropertyResult>,
}

impl VerificationReport {
    pub fn passed(&self) -> bool {
        self.results.iter().all(PropertyResult::passed)
    }

    pub fn total_cases(&self) -> usize {
        self.results.iter().map(|r| r.checked_cases).sum()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_round_trips_through_json() {
        let report = VerificationReport {
            results: vec![PropertyResult {
                name: "merge symmetry".to_string(),
                status: PropertyStatus::Proven,
                checked_cases: 225,
                violations: vec![],
            }],
        };
        assert!(report.passed());
        assert_eq!(report.total_cases(), 225);

        let json = report.to_json().unwrap();
        let back: VerificationReport = serde_json::from_str(&json).unwrap();
        assert!(back.passed());
        assert_eq!(back.results[0].name, "merge symmetry");
    }

    #[test]
    fn test_one_violation_fails_the_report() {
        let report = VerificationReport {
            results: vec![
                PropertyResult {
                    name: "a".to_string(),
                    status: PropertyStatus::Proven,
                    checked_cases: 1,
                    violations: vec![],
                },
                PropertyResult {
                    name: "b".to_string(),
                    status: PropertyStatus::Violated,
                    checked_cases: 1,
                    violations: vec!["case".to_string()],
                },
            ],
        };
        assert!(!report.passed());
    }
}
