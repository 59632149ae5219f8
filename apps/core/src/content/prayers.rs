//! Healing du'as from the Quran and Sunnah, selected by synonym lookup.

use super::table::{ContentTable, Selection, SelectionKind};
use crate::error::AppError;
use serde::Serialize;

pub const DEFAULT_PRAYER: &str = "general_healing";

/// Condition or category word to prayer id. Conditions are looked up before categories.
const PRAYER_SYNONYMS: &[(&str, &str)] = &[
    ("anxiety", "anxiety_relief"),
    ("stress", "anxiety_relief"),
    ("mental_health", "anxiety_relief"),
    ("fever", "fever_relief"),
    ("acute_illness", "fever_relief"),
    ("pain", "pain_relief"),
    ("pain_management", "pain_relief"),
    ("chronic_condition", "general_healing"),
    ("protection", "morning_protection"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealingPrayer {
    pub arabic: &'static str,
    pub transliteration: &'static str,
    pub translation: &'static str,
    pub source: &'static str,
    pub category: &'static str,
    pub benefits: &'static [&'static str],
    pub recitation_notes: &'static str,
}

fn synonym(word: &str) -> Option<&'static str> {
    let wanted = word.trim().to_lowercase();
    PRAYER_SYNONYMS
        .iter()
        .find(|(key, _)| *key == wanted)
        .map(|(_, id)| *id)
}

/// Pick a prayer for a specific condition and/or a category.
///
/// Lookup is exact (case-insensitive) against the synonym list. When nothing
/// maps, or the mapped id is absent from the table, the default prayer is used.
pub fn select_prayer<'t>(
    table: &'t ContentTable<HealingPrayer>,
    category: Option<&str>,
    specific_condition: Option<&str>,
) -> Result<Selection<'t, HealingPrayer>, AppError> {
    let mapped = specific_condition
        .and_then(synonym)
        .or_else(|| category.and_then(synonym));

    if let Some((id, item)) = mapped.and_then(|id| table.entry(id)) {
        return Ok(Selection {
            id,
            item,
            match_score: 0,
            kind: SelectionKind::Direct,
        });
    }

    let (id, item) = table.fallback()?;
    Ok(Selection {
        id,
        item,
        match_score: 0,
        kind: SelectionKind::Default,
    })
}

/// The default prayer, also used when a lookup cannot be made.
pub const GENERAL_HEALING: HealingPrayer = HealingPrayer {
    arabic: "اللَّهُمَّ رَبَّ النَّاسِ أَذْهِبِ الْبَأْسَ وَاشْفِ أَنْتَ الشَّافِي لاَ شِفَاءَ إِلاَّ شِفَاؤُكَ شِفَاءً لاَ يُغَادِرُ سَقَمًا",
    transliteration: "Allahumma rabbannāsi adhhibil-ba'sa washfi anta ash-shāfī lā shifā'a illā shifā'uka shifā'an lā yughādiru saqamā",
    translation: "O Allah, Lord of mankind, remove the illness and heal, You are the Healer, there is no healing except Your healing, a healing that leaves no illness behind",
    source: "Sahih Bukhari and Muslim",
    category: "general",
    benefits: &["Physical healing", "Spiritual comfort", "Trust in Allah"],
    recitation_notes: "Place hand on the area of pain while reciting",
};

pub fn prayer_table() -> ContentTable<HealingPrayer> {
    ContentTable::new(
        "prayers",
        vec![
            ("general_healing", GENERAL_HEALING),
            (
                "ruqyah_protection",
                HealingPrayer {
                    arabic: "قُلْ هُوَ اللَّهُ أَحَدٌ * اللَّهُ الصَّمَدُ * لَمْ يَلِدْ وَلَمْ يُولَدْ * وَلَمْ يَكُن لَّهُ كُفُوًا أَحَدٌ",
                    transliteration: "Qul huwallāhu ahad, Allāhus-samad, lam yalid wa lam yūlad, wa lam yakun lahu kufuwan ahad",
                    translation: "Say: He is Allah, the One! Allah, the Eternal, Absolute; He begets not, nor is He begotten; And there is none like unto Him",
                    source: "Quran - Surah Al-Ikhlas (112)",
                    category: "protection",
                    benefits: &["Spiritual protection", "Healing", "Peace of mind"],
                    recitation_notes: "Recite 3 times, blow on hands, wipe over body",
                },
            ),
            (
                "anxiety_relief",
                HealingPrayer {
                    arabic: "اللَّهُمَّ إِنِّي أَعُوذُ بِكَ مِنَ الْهَمِّ وَالْحَزَنِ وَأَعُوذُ بِكَ مِنَ الْعَجْزِ وَالْكَسَلِ",
                    transliteration: "Allāhumma innī a'ūdhu bika minal-hammi wal-hazan, wa a'ūdhu bika minal-'ajzi wal-kasal",
                    translation: "O Allah, I seek refuge in You from worry and grief, and I seek refuge in You from incapacity and laziness",
                    source: "Sahih Bukhari",
                    category: "mental_health",
                    benefits: &["Anxiety relief", "Mental peace", "Strength and motivation"],
                    recitation_notes: "Best recited in morning and evening",
                },
            ),
            (
                "morning_protection",
                HealingPrayer {
                    arabic: "أَعُوذُ بِكَلِمَاتِ اللَّهِ التَّامَّاتِ مِنْ شَرِّ مَا خَلَقَ",
                    transliteration: "A'ūdhu bi kalimātillāhit-tāmmāti min sharri mā khalaq",
                    translation: "I seek refuge in the perfect words of Allah from the evil of what He has created",
                    source: "Sahih Muslim",
                    category: "protection",
                    benefits: &["Daily protection", "General wellness", "Spiritual strength"],
                    recitation_notes: "Recite 3 times in morning and evening",
                },
            ),
            (
                "fever_relief",
                HealingPrayer {
                    arabic: "اللَّهُمَّ أَذْهِبْ عَنِّي حَرَّ السَّخْنَةِ وَبَرْدَ الْقُرَّةِ",
                    transliteration: "Allāhumma adhhib 'annī harras-sakhnati wa bard al-qurrah",
                    translation: "O Allah, remove from me the heat of fever and the coldness of chill",
                    source: "Abu Dawud",
                    category: "acute_illness",
                    benefits: &["Fever relief", "Comfort during illness"],
                    recitation_notes: "Recite while placing cool cloth on forehead",
                },
            ),
            (
                "pain_relief",
                HealingPrayer {
                    arabic: "أَسْأَلُ اللَّهَ الْعَظِيمَ رَبَّ الْعَرْشِ الْعَظِيمِ أَنْ يَشْفِيَكَ",
                    transliteration: "As'alullāhal-'azīma rabbal-'arshil-'azīmi an yashfīyak",
                    translation: "I ask Allah the Mighty, Lord of the Mighty Throne, to heal you",
                    source: "Tirmidhi",
                    category: "pain_management",
                    benefits: &["Pain relief", "Healing", "Comfort"],
                    recitation_notes: "Recite 7 times while placing hand on area of pain",
                },
            ),
        ],
        DEFAULT_PRAYER,
    )
}
