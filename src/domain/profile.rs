//! Health profile types for heart-disease risk screening.
//!
//! A [`HealthProfile`] is the validated five-field record fed to the classifier
//! and the recommendation engine. [`ProfileInput`] is its raw, unvalidated form
//! as it arrives from a form, the command line or a JSON request body.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of classifier features.
pub const FEATURE_COUNT: usize = 5;

/// Feature names in classifier column order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "sex",
    "systolic_bp",
    "cholesterol",
    "chest_pain_type",
];

/// Accepted age range in years.
pub const AGE_RANGE: std::ops::RangeInclusive<i64> = 1..=120;

/// Accepted systolic blood pressure range in mm Hg.
pub const SYSTOLIC_BP_RANGE: std::ops::RangeInclusive<i64> = 50..=300;

/// Accepted total cholesterol range in mg/dl.
pub const CHOLESTEROL_RANGE: std::ops::RangeInclusive<i64> = 100..=600;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {field}: {reason}")]
pub struct ValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// Why it was rejected
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Biological sex as used by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    /// Classifier encoding: Male = 1, Female = 0.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Female => 0,
            Self::Male => 1,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Female => write!(f, "Female"),
            Self::Male => write!(f, "Male"),
        }
    }
}

impl FromStr for Sex {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            other => Err(ValidationError::new(
                "sex",
                format!("expected Male or Female, got {other:?}"),
            )),
        }
    }
}

/// Chest pain category.
///
/// The numeric code is what the classifier sees. Severity wording does not
/// follow the code order: code 0 is asymptomatic, yet the training heuristic
/// treats codes above 1 as risk-increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChestPainType {
    Asymptomatic,
    AtypicalAngina,
    NonAnginal,
    TypicalAngina,
}

impl ChestPainType {
    pub const ALL: [Self; 4] = [
        Self::Asymptomatic,
        Self::AtypicalAngina,
        Self::NonAnginal,
        Self::TypicalAngina,
    ];

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Asymptomatic => 0,
            Self::AtypicalAngina => 1,
            Self::NonAnginal => 2,
            Self::TypicalAngina => 3,
        }
    }

    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Asymptomatic),
            1 => Some(Self::AtypicalAngina),
            2 => Some(Self::NonAnginal),
            3 => Some(Self::TypicalAngina),
            _ => None,
        }
    }

    /// Display label shown on forms and reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Asymptomatic => "No Pain (Asymptomatic)",
            Self::AtypicalAngina => "Mild Pain (Atypical Angina)",
            Self::NonAnginal => "Moderate Pain (Non-anginal)",
            Self::TypicalAngina => "Severe Pain (Typical Angina)",
        }
    }
}

impl fmt::Display for ChestPainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw profile fields before validation.
///
/// Field names match the JSON body accepted by `--input`. The systolic
/// pressure is also accepted under its web-form name, `blood_pressure`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInput {
    pub age: i64,
    pub sex: String,
    #[serde(alias = "blood_pressure")]
    pub systolic_bp: i64,
    pub cholesterol: i64,
    pub chest_pain_type: i64,
}

/// Validated health profile. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthProfile {
    age: u8,
    sex: Sex,
    systolic_bp: u16,
    cholesterol: u16,
    chest_pain: ChestPainType,
}

fn check_range(
    field: &'static str,
    value: i64,
    range: &std::ops::RangeInclusive<i64>,
) -> Result<(), ValidationError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            format!(
                "{value} out of range [{}, {}]",
                range.start(),
                range.end()
            ),
        ))
    }
}

impl HealthProfile {
    /// Build a profile, rejecting the first out-of-range field.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] naming the offending field.
    pub fn new(
        age: i64,
        sex: Sex,
        systolic_bp: i64,
        cholesterol: i64,
        chest_pain: ChestPainType,
    ) -> Result<Self, ValidationError> {
        check_range("age", age, &AGE_RANGE)?;
        check_range("systolic_bp", systolic_bp, &SYSTOLIC_BP_RANGE)?;
        check_range("cholesterol", cholesterol, &CHOLESTEROL_RANGE)?;

        // Ranges above fit the narrower integer types.
        Ok(Self {
            age: age as u8,
            sex,
            systolic_bp: systolic_bp as u16,
            cholesterol: cholesterol as u16,
            chest_pain,
        })
    }

    #[must_use]
    pub fn age(&self) -> u8 {
        self.age
    }

    #[must_use]
    pub fn sex(&self) -> Sex {
        self.sex
    }

    #[must_use]
    pub fn systolic_bp(&self) -> u16 {
        self.systolic_bp
    }

    #[must_use]
    pub fn cholesterol(&self) -> u16 {
        self.cholesterol
    }

    #[must_use]
    pub fn chest_pain(&self) -> ChestPainType {
        self.chest_pain
    }

    /// Feature row in classifier column order:
    /// age, sex, systolic_bp, cholesterol, chest_pain_type.
    #[must_use]
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [
            f64::from(self.age),
            f64::from(self.sex.code()),
            f64::from(self.systolic_bp),
            f64::from(self.cholesterol),
            f64::from(self.chest_pain.code()),
        ]
    }
}

impl TryFrom<ProfileInput> for HealthProfile {
    type Error = ValidationError;

    fn try_from(input: ProfileInput) -> Result<Self, Self::Error> {
        let sex: Sex = input.sex.parse()?;
        let chest_pain = ChestPainType::from_code(input.chest_pain_type).ok_or_else(|| {
            ValidationError::new(
                "chest_pain_type",
                format!("{} must be one of 0, 1, 2, 3", input.chest_pain_type),
            )
        })?;
        Self::new(
            input.age,
            sex,
            input.systolic_bp,
            input.cholesterol,
            chest_pain,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ProfileInput {
        ProfileInput {
            age: 55,
            sex: "Male".to_string(),
            systolic_bp: 138,
            cholesterol: 210,
            chest_pain_type: 2,
        }
    }

    #[test]
    fn test_features_column_order() {
        let profile = HealthProfile::try_from(input()).expect("valid profile");
        assert_eq!(profile.features(), [55.0, 1.0, 138.0, 210.0, 2.0]);
    }

    #[test]
    fn test_sex_encoding() {
        assert_eq!(Sex::Male.code(), 1);
        assert_eq!(Sex::Female.code(), 0);
        assert_eq!("female".parse::<Sex>().expect("parse"), Sex::Female);
        assert_eq!(" M ".parse::<Sex>().expect("parse"), Sex::Male);
        assert_eq!("other".parse::<Sex>().unwrap_err().field, "sex");
    }

    #[test]
    fn test_chest_pain_labels() {
        assert_eq!(ChestPainType::from_code(0), Some(ChestPainType::Asymptomatic));
        assert_eq!(
            ChestPainType::TypicalAngina.label(),
            "Severe Pain (Typical Angina)"
        );
        assert!(ChestPainType::from_code(4).is_none());
        for (i, pain) in ChestPainType::ALL.iter().enumerate() {
            assert_eq!(usize::from(pain.code()), i);
        }
    }

    #[test]
    fn test_validation_names_field() {
        let mut bad = input();
        bad.age = 0;
        assert_eq!(HealthProfile::try_from(bad).unwrap_err().field, "age");

        let mut bad = input();
        bad.systolic_bp = 301;
        assert_eq!(
            HealthProfile::try_from(bad).unwrap_err().field,
            "systolic_bp"
        );

        let mut bad = input();
        bad.cholesterol = 99;
        assert_eq!(
            HealthProfile::try_from(bad).unwrap_err().field,
            "cholesterol"
        );

        let mut bad = input();
        bad.chest_pain_type = -1;
        assert_eq!(
            HealthProfile::try_from(bad).unwrap_err().field,
            "chest_pain_type"
        );
    }

    #[test]
    fn test_range_bounds_inclusive() {
        assert!(HealthProfile::new(1, Sex::Female, 50, 100, ChestPainType::Asymptomatic).is_ok());
        assert!(
            HealthProfile::new(120, Sex::Male, 300, 600, ChestPainType::TypicalAngina).is_ok()
        );
        assert!(HealthProfile::new(121, Sex::Male, 120, 200, ChestPainType::Asymptomatic).is_err());
    }

    #[test]
    fn test_input_from_json() {
        let json = r#"{"age":60,"sex":"Female","systolic_bp":150,"cholesterol":260,"chest_pain_type":3}"#;
        let parsed: ProfileInput = serde_json::from_str(json).expect("json");
        let profile = HealthProfile::try_from(parsed).expect("valid");
        assert_eq!(profile.sex(), Sex::Female);
        assert_eq!(profile.chest_pain(), ChestPainType::TypicalAngina);
    }
}
