//! Rule-based diet recommendations.
//!
//! [`derive_recommendations`] applies a fixed sequence of rules to a verdict and
//! profile. Each rule only adds a section or appends to one; nothing added
//! earlier in the same derivation is removed or rewritten.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::{HealthProfile, RiskVerdict};

/// Age strictly above which age-specific suggestions apply.
pub const AGE_THRESHOLD: u8 = 50;

/// Cholesterol (mg/dl) strictly above which cholesterol advice applies.
pub const CHOLESTEROL_THRESHOLD: u16 = 200;

/// Systolic BP (mm Hg) strictly above which blood pressure advice applies.
pub const SYSTOLIC_BP_THRESHOLD: u16 = 130;

const RECOMMENDED_FOODS: [&str; 5] = [
    "Fresh fruits and vegetables",
    "Whole grains (brown rice, oats, whole wheat)",
    "Lean proteins (chicken, fish, legumes)",
    "Low-fat dairy products",
    "Nuts and seeds (in moderation)",
];

const HYDRATION: [&str; 3] = [
    "Drink 8-10 glasses of water daily",
    "Herbal teas without added sugar",
    "Fresh vegetable juices",
];

const FOODS_TO_LIMIT: [&str; 5] = [
    "Salt and high-sodium foods (processed foods, canned soups)",
    "Saturated fats (fatty meats, full-fat dairy)",
    "Trans fats (fried foods, baked goods)",
    "Added sugars (desserts, sodas, candies)",
    "Alcohol (limit to occasional consumption)",
];

const HEART_HEALTHY_OPTIONS: [&str; 6] = [
    "Omega-3 rich fish (salmon, mackerel, sardines)",
    "Heart-healthy oils (olive oil, avocado oil)",
    "Berries (strawberries, blueberries, raspberries)",
    "Leafy greens (spinach, kale, collard greens)",
    "Garlic and onions",
    "Dark chocolate (70% or higher cocoa content, in moderation)",
];

const MAINTENANCE_TIPS: [&str; 5] = [
    "Maintain a balanced diet with diverse food groups",
    "Practice portion control",
    "Cook at home more often to control ingredients",
    "Read nutrition labels when shopping",
    "Limit processed and ultra-processed foods",
];

const AGE_SPECIFIC: [&str; 4] = [
    "Increase calcium and vitamin D intake for bone health",
    "Consider B12 supplementation (consult with healthcare provider)",
    "Reduce sodium intake further to support blood pressure control",
    "Prioritize fiber-rich foods for digestive health",
];

const CHOLESTEROL_MANAGEMENT: [&str; 5] = [
    "Increase soluble fiber intake (oats, beans, fruits)",
    "Include plant sterols/stanols (fortified foods)",
    "Consume fatty fish twice a week",
    "Add ground flaxseeds to meals",
    "Consider reducing animal protein consumption",
];

const BLOOD_PRESSURE_CONTROL: [&str; 5] = [
    "Follow the DASH diet approach",
    "Limit sodium to less than 1,500mg daily",
    "Increase potassium-rich foods (bananas, potatoes, beans)",
    "Include magnesium-rich foods (nuts, seeds, whole grains)",
    "Consider regular consumption of beetroot juice or beets",
];

/// Recommendation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    RecommendedFoods,
    Hydration,
    FoodsToLimit,
    HeartHealthyOptions,
    MaintenanceTips,
    AgeSpecific,
    CholesterolManagement,
    BloodPressureControl,
}

impl Category {
    /// Display title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::RecommendedFoods => "Recommended Foods",
            Self::Hydration => "Hydration",
            Self::FoodsToLimit => "Foods to Limit",
            Self::HeartHealthyOptions => "Heart-Healthy Options",
            Self::MaintenanceTips => "Maintenance Tips",
            Self::AgeSpecific => "Age-Specific Suggestions",
            Self::CholesterolManagement => "Cholesterol Management",
            Self::BloodPressureControl => "Blood Pressure Control",
        }
    }

    /// The fixed item list contributed by this category's rule.
    #[must_use]
    pub fn items(self) -> &'static [&'static str] {
        match self {
            Self::RecommendedFoods => &RECOMMENDED_FOODS,
            Self::Hydration => &HYDRATION,
            Self::FoodsToLimit => &FOODS_TO_LIMIT,
            Self::HeartHealthyOptions => &HEART_HEALTHY_OPTIONS,
            Self::MaintenanceTips => &MAINTENANCE_TIPS,
            Self::AgeSpecific => &AGE_SPECIFIC,
            Self::CholesterolManagement => &CHOLESTEROL_MANAGEMENT,
            Self::BloodPressureControl => &BLOOD_PRESSURE_CONTROL,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// One category and its items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub category: Category,
    pub items: Vec<String>,
}

/// Ordered, append-only collection of recommendation sections.
///
/// Section order is insertion order and is part of the contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationSet {
    sections: Vec<Section>,
}

impl RecommendationSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Items of `category`, creating an empty section at the end if absent.
    pub fn ensure(&mut self, category: Category) -> &mut Vec<String> {
        let idx = match self.position(category) {
            Some(idx) => idx,
            None => {
                self.sections.push(Section {
                    category,
                    items: Vec::new(),
                });
                self.sections.len() - 1
            }
        };
        &mut self.sections[idx].items
    }

    /// Append `items` to `category`, creating the section if absent.
    pub fn append<I, S>(&mut self, category: Category, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ensure(category).extend(items.into_iter().map(Into::into));
    }

    /// Append the category's fixed item list.
    pub fn apply(&mut self, category: Category) {
        self.append(category, category.items().iter().copied());
    }

    fn position(&self, category: Category) -> Option<usize> {
        self.sections.iter().position(|s| s.category == category)
    }

    #[must_use]
    pub fn contains(&self, category: Category) -> bool {
        self.position(category).is_some()
    }

    #[must_use]
    pub fn get(&self, category: Category) -> Option<&[String]> {
        self.position(category)
            .map(|idx| self.sections[idx].items.as_slice())
    }

    /// Categories in display order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.sections.iter().map(|s| s.category)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    #[must_use]
    pub fn total_items(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}

impl Serialize for RecommendationSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(section.category.title(), &section.items)?;
        }
        map.end()
    }
}

/// Derive diet recommendations for a verdict and profile.
///
/// Rules run in a fixed order: base categories, risk branch, then age,
/// cholesterol and blood pressure. Thresholds are strict.
#[must_use]
pub fn derive_recommendations(verdict: RiskVerdict, profile: &HealthProfile) -> RecommendationSet {
    let mut set = RecommendationSet::new();

    set.apply(Category::RecommendedFoods);
    set.apply(Category::Hydration);

    if verdict.is_at_risk() {
        set.apply(Category::FoodsToLimit);
        set.apply(Category::HeartHealthyOptions);
    } else {
        set.apply(Category::MaintenanceTips);
    }

    if profile.age() > AGE_THRESHOLD {
        set.apply(Category::AgeSpecific);
    }
    if profile.cholesterol() > CHOLESTEROL_THRESHOLD {
        set.apply(Category::CholesterolManagement);
    }
    if profile.systolic_bp() > SYSTOLIC_BP_THRESHOLD {
        set.apply(Category::BloodPressureControl);
    }

    tracing::debug!(
        sections = set.len(),
        items = set.total_items(),
        "Derived diet recommendations"
    );

    set
}
