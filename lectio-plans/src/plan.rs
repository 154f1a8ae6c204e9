use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Plan categories offered by the business
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanType {
    Individual,
    Pair,
}

impl PlanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Individual => "INDIVIDUAL",
            PlanType::Pair => "PAIR",
        }
    }
}

impl std::str::FromStr for PlanType {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INDIVIDUAL" => Ok(PlanType::Individual),
            "PAIR" => Ok(PlanType::Pair),
            other => Err(PlanError::UnknownPlanType(other.to_string())),
        }
    }
}

/// A priced lesson template: duration, price and individual/pair type.
/// Lessons reference a plan; the plan price drives the billing statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    pub plan_type: PlanType,
    pub duration_minutes: i32,
    /// Price per lesson in minor currency units (kopecks, cents)
    pub price_minor: i32,
    pub currency: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Plan {
    pub fn new(
        name: String,
        plan_type: PlanType,
        duration_minutes: i32,
        price_minor: i32,
        currency: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            plan_type,
            duration_minutes,
            price_minor,
            currency,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Check the plan definition before it is persisted
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.name.trim().is_empty() {
            return Err(PlanError::Invalid("plan name must not be empty".to_string()));
        }
        if self.duration_minutes <= 0 {
            return Err(PlanError::Invalid(format!(
                "duration must be positive, got {}",
                self.duration_minutes
            )));
        }
        if self.price_minor < 0 {
            return Err(PlanError::Invalid(format!(
                "price must not be negative, got {}",
                self.price_minor
            )));
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(PlanError::Invalid(format!(
                "currency must be a 3-letter ISO code, got {:?}",
                self.currency
            )));
        }
        Ok(())
    }

    /// Deactivated plans stay referenced by historical lessons but cannot be booked
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("Plan not found: {0}")]
    NotFound(String),

    #[error("Invalid plan definition: {0}")]
    Invalid(String),

    #[error("Unknown plan type: {0}")]
    UnknownPlanType(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample_plan() -> Plan {
        Plan::new(
            "Maths, 60 min".to_string(),
            PlanType::Individual,
            60,
            150_000,
            "RUB".to_string(),
        )
    }

    #[test]
    fn test_valid_plan_passes_validation() {
        assert!(sample_plan().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_duration() {
        let mut plan = sample_plan();
        plan.duration_minutes = 0;
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_currency() {
        let mut plan = sample_plan();
        plan.currency = "rub".to_string();
        assert!(plan.validate().is_err());
        plan.currency = "ROUBLES".to_string();
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_plan_type_round_trip() {
        let json = serde_json::to_string(&PlanType::Pair).unwrap();
        assert_eq!(json, "\"PAIR\"");
        assert_eq!(PlanType::from_str("INDIVIDUAL").unwrap(), PlanType::Individual);
        assert!(PlanType::from_str("GROUP").is_err());
    }
}
