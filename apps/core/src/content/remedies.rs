//! Prophetic medicine remedies, selected by ordered substring lookup.

use super::compliance::ComplianceStatus;
use super::table::{ContentTable, Selection, SelectionKind};
use crate::error::AppError;
use serde::Serialize;

pub const DEFAULT_REMEDY: &str = "honey";

/// First key contained in the condition text decides the remedy.
const REMEDY_SYNONYMS: &[(&str, &str)] = &[
    ("cough", "honey"),
    ("sore_throat", "honey"),
    ("digestive", "honey"),
    ("immune", "black_seed"),
    ("inflammation", "black_seed"),
    ("diabetes", "black_seed"),
    ("fatigue", "dates"),
    ("energy", "dates"),
    ("heart", "olive_oil"),
    ("skin", "olive_oil"),
    ("spiritual", "zamzam_water"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Remedy {
    pub name: &'static str,
    pub arabic_name: &'static str,
    pub description: &'static str,
    /// Quranic verse or prophetic saying
    pub citation: &'static str,
    pub benefits: &'static [&'static str],
    pub recommended_for: &'static [&'static str],
    pub usage: &'static str,
    pub compliance: ComplianceStatus,
    pub precautions: &'static str,
}

pub fn select_remedy<'t>(
    table: &'t ContentTable<Remedy>,
    condition: &str,
) -> Result<Selection<'t, Remedy>, AppError> {
    let condition_lower = condition.to_lowercase();

    let mapped = REMEDY_SYNONYMS
        .iter()
        .find(|(key, _)| condition_lower.contains(*key))
        .and_then(|(_, id)| table.entry(id));

    let (id, item, kind) = match mapped {
        Some((id, item)) => (id, item, SelectionKind::Direct),
        None => {
            let (id, item) = table.fallback()?;
            (id, item, SelectionKind::Default)
        }
    };

    Ok(Selection {
        id,
        item,
        match_score: 0,
        kind,
    })
}

/// The default remedy, also used when a lookup cannot be made.
pub const HONEY: Remedy = Remedy {
    name: "Honey",
    arabic_name: "عَسَل",
    description: "Honey is mentioned in the Quran as having healing properties",
    citation: "And from their bellies comes a drink of varying colors, in which there is healing for people (16:69)",
    benefits: &[
        "Antibacterial properties",
        "Wound healing",
        "Cough suppression",
        "Digestive health",
        "Antioxidant effects",
    ],
    recommended_for: &[
        "cough",
        "sore_throat",
        "digestive_issues",
        "wound_healing",
        "general_wellness",
    ],
    usage: "Take 1-2 tablespoons daily, preferably on empty stomach",
    compliance: ComplianceStatus::Compliant,
    precautions: "Not recommended for infants under 1 year",
};

pub fn remedy_table() -> ContentTable<Remedy> {
    ContentTable::new(
        "remedies",
        vec![
            ("honey", HONEY),
            (
                "black_seed",
                Remedy {
                    name: "Black Seed",
                    arabic_name: "حَبَّة البَرَكَة",
                    description: "Black seed (Nigella sativa) is highly praised in Islamic medicine",
                    citation: "In black seed there is healing for every disease except death (Sahih Bukhari)",
                    benefits: &[
                        "Immune system support",
                        "Anti-inflammatory properties",
                        "Blood sugar regulation",
                        "Respiratory health",
                        "Digestive support",
                    ],
                    recommended_for: &[
                        "immune_support",
                        "inflammation",
                        "diabetes",
                        "asthma",
                        "allergies",
                    ],
                    usage: "1 teaspoon of oil daily or half teaspoon of ground seeds with honey",
                    compliance: ComplianceStatus::Compliant,
                    precautions: "Consult healthcare provider if pregnant or on medications",
                },
            ),
            (
                "dates",
                Remedy {
                    name: "Dates",
                    arabic_name: "تَمْر",
                    description: "Dates were a staple food of the Prophet (ﷺ) and have many health benefits",
                    citation: "Whoever eats seven dates in the morning will not be harmed by poison or magic that day (Sahih Bukhari)",
                    benefits: &[
                        "Natural energy source",
                        "Rich in fiber and potassium",
                        "Heart health support",
                        "Bone health",
                        "Natural antioxidants",
                    ],
                    recommended_for: &[
                        "fatigue",
                        "constipation",
                        "heart_health",
                        "bone_health",
                        "general_nutrition",
                    ],
                    usage: "7 dates daily, preferably Ajwa dates in the morning",
                    compliance: ComplianceStatus::Compliant,
                    precautions: "Moderate consumption for diabetics due to natural sugars",
                },
            ),
            (
                "olive_oil",
                Remedy {
                    name: "Olive Oil",
                    arabic_name: "زَيْت الزَّيْتُون",
                    description: "Olive oil is blessed and mentioned in Islamic sources",
                    citation: "Allah is the light of the heavens and earth... lit from a blessed tree, an olive (24:35)",
                    benefits: &[
                        "Heart health",
                        "Anti-inflammatory",
                        "Skin health",
                        "Brain function",
                        "Antioxidant properties",
                    ],
                    recommended_for: &[
                        "heart_health",
                        "skin_conditions",
                        "inflammation",
                        "cognitive_health",
                    ],
                    usage: "1-2 tablespoons daily in food or applied topically for skin",
                    compliance: ComplianceStatus::Compliant,
                    precautions: "Use extra virgin, cold-pressed oil for maximum benefits",
                },
            ),
            (
                "zamzam_water",
                Remedy {
                    name: "Zamzam Water",
                    arabic_name: "مَاء زَمْزَم",
                    description: "Sacred water from the well of Zamzam in Mecca",
                    citation: "Zamzam water is for whatever purpose it is drunk for (Ibn Majah)",
                    benefits: &[
                        "Blessed water",
                        "Spiritual healing",
                        "Fulfillment of intentions",
                        "Barakah (blessings)",
                    ],
                    recommended_for: &[
                        "spiritual_healing",
                        "general_wellness",
                        "intention_fulfillment",
                    ],
                    usage: "Drink with intention (dua) for healing",
                    compliance: ComplianceStatus::Compliant,
                    precautions: "Ensure authenticity of source",
                },
            ),
        ],
        DEFAULT_REMEDY,
    )
}
