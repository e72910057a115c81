//! Consent analytics
//!
//! No consent events are stored anywhere, so the dataset is a fixed sample
//! used by the frontend dashboard.

use chrono::NaiveDate;
use serde::Serialize;

/// Acceptance rate per consent purpose, serialised in declaration order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopularChoices {
    pub analytics: f64,
    pub marketing: f64,
    pub functional: f64,
}

/// Consent rate on a given day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyConsent {
    pub date: NaiveDate,
    pub consent_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsentAnalytics {
    pub consent_rate: f64,
    pub rejection_rate: f64,
    pub popular_choices: PopularChoices,
    pub consent_over_time: Vec<DailyConsent>,
}

impl ConsentAnalytics {
    /// The fixed sample dataset
    pub fn sample() -> Self {
        let day = |d: u32| NaiveDate::from_ymd_opt(2023, 10, d).unwrap_or_default();

        Self {
            consent_rate: 0.85,
            rejection_rate: 0.15,
            popular_choices: PopularChoices {
                analytics: 0.80,
                marketing: 0.60,
                functional: 0.90,
            },
            consent_over_time: vec![
                DailyConsent {
                    date: day(26),
                    consent_rate: 0.75,
                },
                DailyConsent {
                    date: day(27),
                    consent_rate: 0.80,
                },
                DailyConsent {
                    date: day(28),
                    consent_rate: 0.85,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sample_serialization() {
        let value = serde_json::to_value(ConsentAnalytics::sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "consent_rate": 0.85,
                "rejection_rate": 0.15,
                "popular_choices": {"analytics": 0.80, "marketing": 0.60, "functional": 0.90},
                "consent_over_time": [
                    {"date": "2023-10-26", "consent_rate": 0.75},
                    {"date": "2023-10-27", "consent_rate": 0.80},
                    {"date": "2023-10-28", "consent_rate": 0.85}
                ]
            })
        );
    }

    #[test]
    fn test_rates_are_complementary() {
        let sample = ConsentAnalytics::sample();
        assert!((sample.consent_rate + sample.rejection_rate - 1.0).abs() < f64::EPSILON);
    }
}
