//! Preference-based refinement of a prediction.
//!
//! The classifier only sees questionnaire answers. Work preferences that are
//! not part of the questionnaire (remote work, industry, leadership interest
//! and so on) are applied afterwards as fixed role suggestions appended to
//! the predicted role.

use serde::{Deserialize, Serialize};

use crate::answers::QuestionnaireAnswer;
use crate::questionnaire::MANAGEMENT_OR_TECHNICAL;

/// Maximum number of roles returned by [`refine`].
pub const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechDepth {
    DeepSpecialization,
    Balanced,
    BroadGeneralist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interest {
    VeryInterested,
    SomewhatInterested,
    NotInterested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemotePreference {
    FullyRemote,
    Hybrid,
    OnSite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    VeryImportant,
    Important,
    NotImportant,
}

/// Optional work preferences. Unset fields contribute nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub tech_depth: Option<TechDepth>,
    pub leadership: Option<Interest>,
    pub entrepreneurship: Option<Interest>,
    pub innovation: Option<Level>,
    pub remote: Option<RemotePreference>,
    pub industry: Option<String>,
    pub work_life_balance: Option<Importance>,
}

const DEEP_TECH_ROLES: [&str; 3] = ["Machine Learning Engineer", "AI Research Scientist", "Data Scientist"];
const LEADERSHIP_ROLES: [&str; 2] = ["Technical Product Manager", "Engineering Manager"];
const STARTUP_ROLES: [&str; 2] = ["Startup Founder", "Innovation Consultant"];
const REMOTE_ROLES: [&str; 2] = ["Remote Software Developer", "Digital Nomad Consultant"];
const BALANCED_ROLES: [&str; 2] = ["Technical Writer", "UX Researcher"];

fn industry_roles(industry: &str) -> &'static [&'static str] {
    match industry.trim().to_lowercase().as_str() {
        "healthcare" => &["Healthcare Data Analyst", "Health Informatics Specialist"],
        "finance" => &["FinTech Developer", "Quantitative Analyst"],
        "education" => &["EdTech Developer", "Educational Technology Specialist"],
        "entertainment" => &["Game Developer", "Animation Artist"],
        "energy" => &["Smart Grid Engineer", "Sustainability Consultant"],
        _ => &[],
    }
}

/// The predicted role followed by preference-driven suggestions, without
/// duplicates, at most [`MAX_SUGGESTIONS`] long.
pub fn refine(base: &str, answer: &QuestionnaireAnswer, preferences: &Preferences) -> Vec<String> {
    let orientation = answer
        .get(MANAGEMENT_OR_TECHNICAL)
        .map(|v| v.to_string().trim().to_lowercase())
        .unwrap_or_default();

    let mut roles: Vec<&str> = vec![base];

    if orientation == "technical" && preferences.tech_depth == Some(TechDepth::DeepSpecialization) {
        roles.extend(DEEP_TECH_ROLES);
    }
    if orientation == "management" || preferences.leadership == Some(Interest::VeryInterested) {
        roles.extend(LEADERSHIP_ROLES);
    }
    if preferences.entrepreneurship == Some(Interest::VeryInterested) && preferences.innovation == Some(Level::High) {
        roles.extend(STARTUP_ROLES);
    }
    if preferences.remote == Some(RemotePreference::FullyRemote) {
        roles.extend(REMOTE_ROLES);
    }
    if let Some(industry) = &preferences.industry {
        roles.extend(industry_roles(industry));
    }
    if preferences.work_life_balance == Some(Importance::VeryImportant) {
        roles.extend(BALANCED_ROLES);
    }

    let mut unique: Vec<String> = Vec::with_capacity(MAX_SUGGESTIONS);
    for role in roles {
        if unique.len() == MAX_SUGGESTIONS {
            break;
        }
        if !unique.iter().any(|r| r == role) {
            unique.push(role.to_string());
        }
    }
    unique
}
