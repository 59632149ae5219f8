//! Islamic healing guidance: du'as, prophetic medicine and halal screening.

use crate::brain::category::CategoryLabel;
use crate::content::compliance::{verify_compliance, ComplianceVerdict};
use crate::content::prayers::{select_prayer, HealingPrayer, DEFAULT_PRAYER, GENERAL_HEALING};
use crate::content::remedies::{select_remedy, Remedy, DEFAULT_REMEDY, HONEY};
use crate::content::{ContentLibrary, SelectionKind};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, warn};

pub const GREETING: &str = "بِسْمِ اللَّهِ الرَّحْمَنِ الرَّحِيم (Bismillah Ar-Rahman Ar-Raheem) - In the name of Allah, the Most Gracious, the Most Merciful";

pub const ENCOURAGEMENTS: &[&str] = &[
    "Allah is Ash-Shafi (The Healer). Place your trust in Him while taking beneficial means.",
    "Every du'a is answered by Allah in the way that is best for you. Have hope and keep making du'a.",
    "Illness can be a means of purification and drawing closer to Allah. Seek His mercy and healing.",
    "The Prophet (ﷺ) said: 'No fatigue, illness, anxiety, sorrow, or harm befalls a Muslim - not even a thorn prick - without Allah removing some of his sins because of it.'",
    "Healing comes from Allah alone. The medicine and treatment are merely means that He has provided for us.",
];

pub const MENTAL_HEALTH_ENCOURAGEMENTS: &[&str] = &[
    "Allah knows your struggles and He is always near. Turn to Him in du'a and dhikr for peace of mind.",
    "Remember: 'And whoever relies upon Allah - then He is sufficient for him. Indeed, Allah will accomplish His purpose.' (65:3)",
];

const DEFAULT_PRAYER_ENCOURAGEMENT: &str =
    "May Allah grant you complete healing and recovery. Trust in His wisdom and mercy.";

const DEFAULT_PRAYER_GUIDANCE: &[&str] = &[
    "Keep making du'a",
    "Maintain hope in Allah's mercy",
    "Seek beneficial treatment",
];

const LIFESTYLE_PRINCIPLES: &[&str] = &[
    "Eat in moderation - 'The son of Adam fills no vessel worse than his stomach' (Tirmidhi)",
    "Maintain cleanliness - 'Cleanliness is half of faith' (Sahih Muslim)",
    "Exercise regularly - 'Your body has a right over you' (Sahih Bukhari)",
    "Get adequate rest - Balance between worship, work, and rest",
    "Avoid harmful substances - 'Do not harm yourselves or others' (Islamic principle)",
];

const MENTAL_HEALTH_GUIDANCE: &[&str] = &[
    "Turn to Allah in times of distress through du'a and dhikr",
    "Maintain trust in Allah's wisdom and decree (Tawakkul)",
    "Seek beneficial knowledge and righteous companionship",
    "Practice gratitude (Shukr) for Allah's blessings",
    "Remember that trials are a test and purification",
];

const GENERAL_GUIDANCE: &[&str] = &[
    "Combine spiritual healing (du'a, dhikr) with beneficial medical treatment",
    "Maintain regular prayers and remembrance of Allah",
    "Eat halal, wholesome foods as recommended in Islam",
    "Keep good company and avoid harmful environments",
];

pub const DAILY_TIPS: &[&str] = &[
    "Start your day with Bismillah and the morning adhkar for protection and blessings",
    "Eat with your right hand and say Bismillah before eating, as taught by the Prophet (ﷺ)",
    "The Prophet (ﷺ) said: 'Eat together and mention Allah's name, and you will be blessed in your food'",
    "Maintain wudu (ablution) regularly - it's both spiritual and physical cleanliness",
    "The Prophet (ﷺ) recommended eating dates in odd numbers, especially 7 in the morning",
    "Practice moderation in eating: 'One third for food, one third for drink, one third for breath'",
    "Seek healing through both du'a and beneficial medicine - both are means Allah has provided",
    "The best drink is water - remember to say Bismillah and drink in three sips",
    "Regular movement and walking is sunnah - the Prophet (ﷺ) walked briskly",
    "End your day with evening adhkar and seek Allah's forgiveness for complete spiritual wellness",
];

#[derive(Debug, Clone, Serialize)]
pub struct PrayerGuidance {
    pub id: String,
    #[serde(rename = "dua")]
    pub prayer: HealingPrayer,
    pub selection: SelectionKind,
    pub encouragement: String,
    pub category: String,
    pub additional_guidance: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemedyGuidance {
    pub id: String,
    pub remedy: Remedy,
    pub selection: SelectionKind,
    pub islamic_guidance: String,
    pub halal_verification: &'static str,
    pub modern_validation: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LifestyleGuidance {
    pub focus_area: &'static str,
    pub guidance: &'static [&'static str],
    pub spiritual_principle: &'static str,
}

/// Everything the engine offers for one query, plus a rendered text block.
#[derive(Debug, Clone, Serialize)]
pub struct ShifaGuidance {
    pub category: CategoryLabel,
    pub prayer: PrayerGuidance,
    pub remedy: RemedyGuidance,
    pub lifestyle: LifestyleGuidance,
    pub compliance: ComplianceVerdict,
    pub halal_compliant: bool,
    pub formatted: String,
}

/// Encouragement candidates for a category label.
pub fn encouragement_pool(category: Option<&str>) -> Vec<&'static str> {
    let mut pool = ENCOURAGEMENTS.to_vec();
    if category == Some(CategoryLabel::MentalHealth.label()) {
        pool.extend_from_slice(MENTAL_HEALTH_ENCOURAGEMENTS);
    }
    pool
}

pub fn additional_guidance(category: Option<&str>) -> &'static [&'static str] {
    match category {
        Some("mental_health") => MENTAL_HEALTH_GUIDANCE,
        Some("lifestyle") | Some("general_health") => LIFESTYLE_PRINCIPLES,
        _ => GENERAL_GUIDANCE,
    }
}

pub fn lifestyle_guidance(category: CategoryLabel) -> LifestyleGuidance {
    match category {
        CategoryLabel::MentalHealth => LifestyleGuidance {
            focus_area: "Mental and Spiritual Wellbeing",
            guidance: MENTAL_HEALTH_GUIDANCE,
            spiritual_principle: "Verily, in the remembrance of Allah do hearts find rest (13:28)",
        },
        CategoryLabel::Lifestyle | CategoryLabel::GeneralHealth => LifestyleGuidance {
            focus_area: "Healthy Living",
            guidance: LIFESTYLE_PRINCIPLES,
            spiritual_principle: "Your body has a right over you (Sahih Bukhari)",
        },
        _ => LifestyleGuidance {
            focus_area: "Holistic Healing",
            guidance: GENERAL_GUIDANCE,
            spiritual_principle: "Allah has not sent down a disease except that He has also sent down its cure (Sahih Bukhari)",
        },
    }
}

pub struct ShifaEngine {
    library: Arc<ContentLibrary>,
}

impl ShifaEngine {
    pub fn new(library: Arc<ContentLibrary>) -> Self {
        Self { library }
    }

    /// Du'a for a category and optional specific condition.
    pub fn healing_prayer<R: Rng + ?Sized>(
        &self,
        category: Option<&str>,
        specific_condition: Option<&str>,
        rng: &mut R,
    ) -> PrayerGuidance {
        let category = category
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty());
        let category = category.as_deref();

        match select_prayer(&self.library.prayers, category, specific_condition) {
            Ok(selection) => {
                debug!(dua = selection.id, kind = ?selection.kind, "Du'a selected");
                let pool = encouragement_pool(category);
                PrayerGuidance {
                    id: selection.id.to_string(),
                    prayer: selection.item.clone(),
                    selection: selection.kind,
                    encouragement: pool
                        .choose(rng)
                        .copied()
                        .unwrap_or(DEFAULT_PRAYER_ENCOURAGEMENT)
                        .to_string(),
                    category: category.unwrap_or("general").to_string(),
                    additional_guidance: additional_guidance(category).to_vec(),
                }
            }
            Err(e) => {
                warn!("Du'a lookup failed, using default: {}", e);
                Self::default_prayer()
            }
        }
    }

    pub fn prophetic_remedy(&self, condition: &str) -> RemedyGuidance {
        match select_remedy(&self.library.remedies, condition) {
            Ok(selection) => {
                debug!(remedy = selection.id, kind = ?selection.kind, "Remedy selected");
                let remedy = selection.item.clone();
                RemedyGuidance {
                    id: selection.id.to_string(),
                    islamic_guidance: format!(
                        "Following the Sunnah of Prophet Muhammad (ﷺ) in using {}",
                        remedy.arabic_name
                    ),
                    halal_verification: remedy.compliance.label(),
                    modern_validation:
                        "This remedy aligns with both Islamic teachings and modern nutritional science",
                    selection: selection.kind,
                    remedy,
                }
            }
            Err(e) => {
                warn!("Remedy lookup failed, using default: {}", e);
                Self::default_remedy()
            }
        }
    }

    pub fn default_prayer() -> PrayerGuidance {
        PrayerGuidance {
            id: DEFAULT_PRAYER.to_string(),
            prayer: GENERAL_HEALING,
            selection: SelectionKind::Default,
            encouragement: DEFAULT_PRAYER_ENCOURAGEMENT.to_string(),
            category: "general".to_string(),
            additional_guidance: DEFAULT_PRAYER_GUIDANCE.to_vec(),
        }
    }

    pub fn default_remedy() -> RemedyGuidance {
        RemedyGuidance {
            id: DEFAULT_REMEDY.to_string(),
            remedy: HONEY,
            selection: SelectionKind::Default,
            islamic_guidance: "Honey is mentioned in the Quran as having healing properties"
                .to_string(),
            halal_verification: HONEY.compliance.label(),
            modern_validation: "Honey has scientifically proven health benefits",
        }
    }

    pub fn daily_tip<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
        DAILY_TIPS.choose(rng).copied().unwrap_or(DAILY_TIPS[0])
    }

    /// Du'a, remedy, lifestyle advice and a compliance check for one query.
    ///
    /// `first_keyword` is the first extracted keyword of the query, used as the
    /// specific condition for the du'a lookup.
    pub fn comprehensive_guidance<R: Rng + ?Sized>(
        &self,
        query: &str,
        category: CategoryLabel,
        first_keyword: Option<&str>,
        rng: &mut R,
    ) -> ShifaGuidance {
        let prayer = self.healing_prayer(Some(category.label()), first_keyword, rng);
        let remedy = self.prophetic_remedy(query);
        let lifestyle = lifestyle_guidance(category);
        let compliance = verify_compliance(query);
        let formatted = render_guidance(&prayer, &remedy, &lifestyle, &compliance);

        ShifaGuidance {
            category,
            halal_compliant: compliance.is_compliant(),
            prayer,
            remedy,
            lifestyle,
            compliance,
            formatted,
        }
    }
}

fn render_guidance(
    prayer: &PrayerGuidance,
    remedy: &RemedyGuidance,
    lifestyle: &LifestyleGuidance,
    compliance: &ComplianceVerdict,
) -> String {
    let dua = &prayer.prayer;
    let medicine = &remedy.remedy;
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{}\n", GREETING);
    let _ = writeln!(out, "**Healing Du'a for You:**\n");
    let _ = writeln!(out, "**Arabic:** {}\n", dua.arabic);
    let _ = writeln!(out, "**Transliteration:** {}\n", dua.transliteration);
    let _ = writeln!(out, "**Translation:** {}\n", dua.translation);
    let _ = writeln!(out, "**Source:** {}\n", dua.source);
    let _ = writeln!(out, "{}\n", dua.recitation_notes);

    let _ = writeln!(out, "**Prophetic Medicine Recommendation:**\n");
    let _ = writeln!(out, "**{} ({})**\n", medicine.name, medicine.arabic_name);
    let _ = writeln!(out, "{}\n", medicine.description);
    let _ = writeln!(out, "**Benefits:**");
    for benefit in medicine.benefits {
        let _ = writeln!(out, "• {}", benefit);
    }
    let _ = writeln!(out, "\n**Usage:** {}\n", medicine.usage);
    let _ = writeln!(out, "**Precautions:** {}\n", medicine.precautions);

    let _ = writeln!(out, "**Islamic Lifestyle Guidance - {}:**\n", lifestyle.focus_area);
    for item in lifestyle.guidance.iter().take(3) {
        let _ = writeln!(out, "• {}", item);
    }
    let _ = writeln!(
        out,
        "\n**Spiritual Principle:** {}\n",
        lifestyle.spiritual_principle
    );
    let _ = writeln!(out, "**Halal Compliance:** {}\n", compliance.guidance);
    let _ = write!(
        out,
        "**Remember:** Islam teaches us that Allah is Ash-Shaafi (The Healer). We use the means He has provided while placing our complete trust in His wisdom and mercy. May Allah grant you complete healing and wellness - Ameen."
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentTable;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine() -> ShifaEngine {
        ShifaEngine::new(Arc::new(ContentLibrary::load().unwrap()))
    }

    #[test]
    fn test_prayer_for_mental_health() {
        let mut rng = StdRng::seed_from_u64(5);
        let guidance = engine().healing_prayer(Some("mental_health"), None, &mut rng);
        assert_eq!(guidance.id, "anxiety_relief");
        assert_eq!(guidance.selection, SelectionKind::Direct);
        assert_eq!(guidance.additional_guidance, MENTAL_HEALTH_GUIDANCE.to_vec());
        assert!(encouragement_pool(Some("mental_health")).contains(&guidance.encouragement.as_str()));
    }

    #[test]
    fn test_mental_health_widens_encouragement_pool() {
        assert_eq!(encouragement_pool(None).len(), 5);
        assert_eq!(encouragement_pool(Some("lifestyle")).len(), 5);
        assert_eq!(encouragement_pool(Some("mental_health")).len(), 7);
    }

    #[test]
    fn test_additional_guidance_by_category() {
        assert_eq!(additional_guidance(Some("general_health")), LIFESTYLE_PRINCIPLES);
        assert_eq!(additional_guidance(Some("acute_illness")), GENERAL_GUIDANCE);
        assert_eq!(additional_guidance(None), GENERAL_GUIDANCE);
    }

    #[test]
    fn test_category_case_does_not_change_guidance() {
        let lower = engine().healing_prayer(Some("mental_health"), None, &mut StdRng::seed_from_u64(9));
        let mixed = engine().healing_prayer(Some(" Mental_Health "), None, &mut StdRng::seed_from_u64(9));

        assert_eq!(mixed.id, "anxiety_relief");
        assert_eq!(mixed.category, "mental_health");
        assert_eq!(mixed.additional_guidance, MENTAL_HEALTH_GUIDANCE.to_vec());
        assert_eq!(mixed.encouragement, lower.encouragement);
    }

    #[test]
    fn test_prayer_without_category_reports_general() {
        let guidance = engine().healing_prayer(None, None, &mut StdRng::seed_from_u64(0));
        assert_eq!(guidance.id, DEFAULT_PRAYER);
        assert_eq!(guidance.category, "general");
        assert_eq!(guidance.selection, SelectionKind::Default);
    }

    #[test]
    fn test_remedy_guidance_names_arabic() {
        let guidance = engine().prophetic_remedy("I feel fatigue all day");
        assert_eq!(guidance.id, "dates");
        assert!(guidance.islamic_guidance.ends_with("تَمْر"));
        assert_eq!(guidance.halal_verification, "Halal");
    }

    #[test]
    fn test_lookup_failure_degrades_to_defaults() {
        let mut library = ContentLibrary::load().unwrap();
        library.prayers = ContentTable::new("prayers", vec![], DEFAULT_PRAYER);
        library.remedies = ContentTable::new("remedies", vec![], DEFAULT_REMEDY);
        let engine = ShifaEngine::new(Arc::new(library));

        let prayer = engine.healing_prayer(Some("lifestyle"), None, &mut StdRng::seed_from_u64(0));
        assert_eq!(prayer.encouragement, DEFAULT_PRAYER_ENCOURAGEMENT);
        assert_eq!(prayer.selection, SelectionKind::Default);

        let remedy = engine.prophetic_remedy("headache");
        assert_eq!(remedy.id, "honey");
        assert_eq!(remedy.modern_validation, "Honey has scientifically proven health benefits");
    }

    #[test]
    fn test_comprehensive_guidance() {
        let mut rng = StdRng::seed_from_u64(11);
        let guidance = engine().comprehensive_guidance(
            "I have a fever and a bad cough",
            CategoryLabel::AcuteIllness,
            Some("fever"),
            &mut rng,
        );

        assert_eq!(guidance.prayer.id, "fever_relief");
        assert_eq!(guidance.remedy.id, "honey");
        assert_eq!(guidance.lifestyle.focus_area, "Holistic Healing");
        assert!(!guidance.halal_compliant);
        assert!(guidance.formatted.starts_with(GREETING));
        assert!(guidance.formatted.contains("**Honey (عَسَل)**"));
        assert!(guidance.formatted.ends_with("Ameen."));
    }

    #[test]
    fn test_daily_tip_from_pool() {
        let tip = ShifaEngine::daily_tip(&mut StdRng::seed_from_u64(2));
        assert!(DAILY_TIPS.contains(&tip));
    }
}
