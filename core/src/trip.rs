//! Trip request/response records shared by the orchestrator and the API.

use crate::{PlannerError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single trip-planning request. Created fresh per request and
/// discarded once the response is sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub passengers: u32,
    /// Budget per person, in whole dollars.
    pub budget: u32,
    /// Free-text interests, passed verbatim into prompts.
    pub interests: String,
}

impl TripRequest {
    /// Trip length in days. Negative or zero means the request is invalid.
    pub fn days(&self) -> i64 {
        (self.return_date - self.departure_date).num_days()
    }

    pub fn total_budget(&self) -> u64 {
        self.budget as u64 * self.passengers as u64
    }

    /// Validate required fields. Return date must be strictly after
    /// departure; passengers and budget must be positive.
    pub fn validate(&self) -> Result<()> {
        if self.origin.trim().is_empty() {
            return Err(PlannerError::Validation("Origin is required".to_string()));
        }
        if self.destination.trim().is_empty() {
            return Err(PlannerError::Validation(
                "Destination is required".to_string(),
            ));
        }
        if self.days() <= 0 {
            return Err(PlannerError::Validation(
                "Return date must be after departure date".to_string(),
            ));
        }
        if self.passengers == 0 {
            return Err(PlannerError::Validation(
                "Passenger count must be positive".to_string(),
            ));
        }
        if self.budget == 0 {
            return Err(PlannerError::Validation(
                "Budget must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn summary(&self) -> TripSummary {
        TripSummary {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            days: self.days(),
            passengers: self.passengers,
            budget: self.budget,
            total_budget: self.total_budget(),
        }
    }
}

/// Structured trip summary for machine consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripSummary {
    pub origin: String,
    pub destination: String,
    pub days: i64,
    pub passengers: u32,
    pub budget: u32,
    #[serde(rename = "totalBudget")]
    pub total_budget: u64,
}

/// Final artifact for one request: the concatenated report text plus
/// the structured summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedReport {
    pub text: String,
    pub summary: TripSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(departure: &str, ret: &str) -> TripRequest {
        TripRequest {
            origin: "San Francisco".to_string(),
            destination: "Barcelona".to_string(),
            departure_date: departure.parse().unwrap(),
            return_date: ret.parse().unwrap(),
            passengers: 2,
            budget: 2000,
            interests: "architecture, food".to_string(),
        }
    }

    #[test]
    fn day_count_is_date_difference() {
        let req = request("2025-12-15", "2025-12-22");
        assert_eq!(req.days(), 7);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn total_budget_multiplies_by_passengers() {
        let req = request("2025-12-15", "2025-12-22");
        assert_eq!(req.total_budget(), 4000);
        assert_eq!(req.summary().total_budget, 4000);
    }

    #[test]
    fn rejects_return_before_departure() {
        let req = request("2025-12-22", "2025-12-15");
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_same_day_return() {
        let req = request("2025-12-15", "2025-12-15");
        assert!(matches!(
            req.validate(),
            Err(PlannerError::Validation(_))
        ));
    }

    #[test]
    fn rejects_zero_passengers() {
        let mut req = request("2025-12-15", "2025-12-22");
        req.passengers = 0;
        assert!(req.validate().is_err());
    }
}
