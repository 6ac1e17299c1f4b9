//! General heart-healthy guidance, independent of any profile.

use serde::Serialize;

/// A titled list of general guidance items.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GuidanceSection {
    pub title: &'static str,
    pub items: &'static [&'static str],
}

const GUIDANCE: [GuidanceSection; 10] = [
    GuidanceSection {
        title: "Foods to Include",
        items: &[
            "Fruits and Vegetables: Aim for 5+ servings daily",
            "Whole Grains: Brown rice, oats, whole wheat bread",
            "Lean Proteins: Fish, skinless poultry, legumes",
            "Healthy Fats: Olive oil, avocados, nuts, seeds",
            "Low-fat Dairy: Milk, yogurt, cheese in moderation",
        ],
    },
    GuidanceSection {
        title: "Heart-Healthy Eating Patterns",
        items: &[
            "Mediterranean Diet: Rich in olive oil, nuts, fish, fruits and vegetables",
            "DASH Diet: Designed to lower blood pressure",
            "Plant-Based Diet: Focus on plants with limited animal products",
            "Low Sodium Diet: Reducing salt intake below 2,300mg daily",
        ],
    },
    GuidanceSection {
        title: "Foods to Limit",
        items: &[
            "Processed Foods: Packaged snacks, frozen meals",
            "Added Sugars: Sodas, candies, desserts",
            "Saturated Fats: Fatty meats, full-fat dairy",
            "Trans Fats: Fried foods, some baked goods",
            "High-Sodium Foods: Canned soups, fast food",
        ],
    },
    GuidanceSection {
        title: "Weekly Meal Planning",
        items: &[
            "Plan for 2 servings of fatty fish weekly (salmon, mackerel)",
            "Include a meatless day focusing on legumes",
            "Prepare meals at home to control ingredients",
            "Use herbs and spices instead of salt for flavor",
            "Stay hydrated with water instead of sugary drinks",
        ],
    },
    GuidanceSection {
        title: "Portion Guide: Proteins",
        items: &[
            "Size of a deck of cards (3oz)",
            "Fish, poultry, lean meat",
            "1/2 cup of beans or lentils",
        ],
    },
    GuidanceSection {
        title: "Portion Guide: Grains & Starches",
        items: &[
            "1/2 cup cooked rice or pasta",
            "1 slice of bread",
            "1 small potato",
        ],
    },
    GuidanceSection {
        title: "Portion Guide: Fruits & Vegetables",
        items: &[
            "1 cup raw leafy vegetables",
            "1/2 cup chopped vegetables",
            "1 medium fruit",
        ],
    },
    GuidanceSection {
        title: "Major Risk Factors",
        items: &[
            "Age: Risk increases with age",
            "Sex: Men have higher risk than pre-menopausal women",
            "Family History: Genetic factors play a role",
            "High Blood Pressure: Damages arterial walls",
            "High Cholesterol: Leads to plaque buildup",
            "Smoking: Damages blood vessels",
            "Diabetes: Increases risk significantly",
            "Obesity: Strains the heart",
        ],
    },
    GuidanceSection {
        title: "Protective Factors",
        items: &[
            "Regular Exercise: At least 150 minutes per week",
            "Healthy Diet: Rich in fruits, vegetables, whole grains",
            "Maintaining Healthy Weight: BMI between 18.5-24.9",
            "No Smoking: Quitting reduces risk substantially",
            "Limited Alcohol: Moderate consumption only",
            "Stress Management: Regular relaxation practices",
            "Regular Check-ups: Monitoring health metrics",
        ],
    },
    GuidanceSection {
        title: "Warning Signs of Heart Disease",
        items: &[
            "Chest pain or discomfort",
            "Shortness of breath",
            "Pain in the arms, back, neck, or jaw",
            "Feeling weak, lightheaded, or faint",
            "Heart palpitations",
            "Swelling in the legs, ankles, or feet",
            "Rapid or irregular heartbeat",
            "Extreme fatigue",
            "Nausea or vomiting",
        ],
    },
];

/// Closing reminder printed after the guidance sections.
pub const CHECKUP_REMINDER: &str =
    "Regular checkups with healthcare professionals are essential for maintaining heart health.";

/// General dietary and risk-factor guidance, in display order.
#[must_use]
pub fn general_guidance() -> &'static [GuidanceSection] {
    &GUIDANCE
}
