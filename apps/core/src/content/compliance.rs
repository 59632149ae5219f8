//! Halal compliance screening of ingredients and treatments.
//!
//! Disallowed substrings are checked before allowed ones, so a mixture such as
//! "honey with alcohol" is non-compliant.

use serde::Serialize;

const DISALLOWED: &[&str] = &["alcohol", "wine", "beer", "pork", "gelatin", "vanilla extract"];

const ALLOWED: &[&str] = &[
    "honey",
    "black seed",
    "dates",
    "olive oil",
    "water",
    "herbs",
    "fruits",
    "vegetables",
    "nuts",
    "seeds",
    "grains",
    "legumes",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    NonCompliant,
    Indeterminate,
}

impl ComplianceStatus {
    /// Human-facing label
    pub fn label(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "Halal",
            ComplianceStatus::NonCompliant => "Haram",
            ComplianceStatus::Indeterminate => "Requires Investigation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceVerdict {
    pub status: ComplianceStatus,
    pub label: &'static str,
    pub reason: String,
    /// The list entry that decided the verdict
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative: Option<&'static str>,
    pub guidance: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principle: Option<&'static str>,
}

impl ComplianceVerdict {
    pub fn is_compliant(&self) -> bool {
        self.status == ComplianceStatus::Compliant
    }
}

pub fn verify_compliance(item: &str) -> ComplianceVerdict {
    let item_lower = item.to_lowercase();

    if let Some(hit) = DISALLOWED.iter().find(|d| item_lower.contains(**d)) {
        return ComplianceVerdict {
            status: ComplianceStatus::NonCompliant,
            label: ComplianceStatus::NonCompliant.label(),
            reason: format!("Contains {} which is prohibited in Islam", hit),
            matched: Some(hit),
            alternative: Some("Seek halal alternatives or consult Islamic scholar"),
            guidance: "Islam encourages seeking beneficial treatment through halal means",
            principle: None,
        };
    }

    if let Some(hit) = ALLOWED.iter().find(|a| item_lower.contains(**a)) {
        return ComplianceVerdict {
            status: ComplianceStatus::Compliant,
            label: ComplianceStatus::Compliant.label(),
            reason: format!("{} is permissible and beneficial", title_case(hit)),
            matched: Some(hit),
            alternative: None,
            guidance: "This aligns with Islamic principles of seeking beneficial treatment",
            principle: None,
        };
    }

    ComplianceVerdict {
        status: ComplianceStatus::Indeterminate,
        label: ComplianceStatus::Indeterminate.label(),
        reason: "Unable to determine halal status without more information".to_string(),
        matched: None,
        alternative: None,
        guidance: "Consult with knowledgeable Islamic scholars or halal certification authorities",
        principle: Some("When in doubt, it's better to avoid until clarity is obtained"),
    }
}

fn title_case(phrase: &str) -> String {
    phrase
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
