//! Flat record handed to report renderers.

use chrono::NaiveDate;
use serde::Serialize;

use super::{HealthProfile, RecommendationSet, RiskVerdict};

/// Everything a renderer needs, already formatted for display.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRecord {
    pub name: String,
    pub age: u8,
    /// Display string ("Male" / "Female")
    pub sex: String,
    pub systolic_bp: u16,
    pub cholesterol: u16,
    /// Display label for the chest pain category
    pub chest_pain: String,
    pub verdict: RiskVerdict,
    pub recommendations: RecommendationSet,
    pub generated_on: NaiveDate,
}

impl ReportRecord {
    /// Build a record dated today (local time).
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        profile: &HealthProfile,
        verdict: RiskVerdict,
        recommendations: RecommendationSet,
    ) -> Self {
        Self::dated(
            name,
            profile,
            verdict,
            recommendations,
            chrono::Local::now().date_naive(),
        )
    }

    #[must_use]
    pub fn dated(
        name: impl Into<String>,
        profile: &HealthProfile,
        verdict: RiskVerdict,
        recommendations: RecommendationSet,
        generated_on: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            age: profile.age(),
            sex: profile.sex().to_string(),
            systolic_bp: profile.systolic_bp(),
            cholesterol: profile.cholesterol(),
            chest_pain: profile.chest_pain().label().to_string(),
            verdict,
            recommendations,
            generated_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{derive_recommendations, ChestPainType, Sex};

    #[test]
    fn test_record_uses_display_strings() {
        let profile =
            HealthProfile::new(44, Sex::Female, 125, 180, ChestPainType::NonAnginal).expect("valid");
        let recs = derive_recommendations(RiskVerdict::NotAtRisk, &profile);
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).expect("date");
        let record = ReportRecord::dated("Ada", &profile, RiskVerdict::NotAtRisk, recs, date);

        assert_eq!(record.sex, "Female");
        assert_eq!(record.chest_pain, "Moderate Pain (Non-anginal)");
        assert_eq!(record.systolic_bp, 125);
        assert_eq!(record.generated_on.to_string(), "2024-03-01");
    }
}
