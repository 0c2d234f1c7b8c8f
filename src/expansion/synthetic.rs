//! Synthetic rows for roles that never appear in the collected survey.
//!
//! Each role gets a [`SyntheticProfile`]: a normal distribution per rating
//! and a weighted choice per text answer. Profiles start from a shared base,
//! take their family's overrides, and then a label-specific signature so two
//! roles of the same family do not produce identical distributions.
//!
//! Besides the hand-picked business, creative and emerging roles there is a
//! large industry catalog: a few hundred titles across sixteen industries,
//! each sampled from its industry's pattern with more rows per role.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::PI;

use crate::answers::{AnswerValue, QuestionnaireAnswer};
use crate::dataset::Dataset;
use crate::errors::{CareerError, Result};
use crate::expansion::catalog::{BUSINESS_ROLES, CREATIVE_ROLES, EMERGING_ROLES, INDUSTRY_ROLES, MANAGEMENT_ROLES};
use crate::questionnaire::*;

/// Sampling distribution for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dist", rename_all = "snake_case")]
pub enum FeatureProfile {
    /// Rounded and clipped to the question's bounds after sampling.
    Normal { mean: f64, std: f64 },
    Weighted { choices: Vec<(String, f64)> },
}

impl FeatureProfile {
    fn uniform(values: &[&str]) -> Self {
        FeatureProfile::Weighted {
            choices: values.iter().map(|v| (v.to_string(), 1.0)).collect(),
        }
    }

    fn weighted(values: &[(&str, f64)]) -> Self {
        FeatureProfile::Weighted {
            choices: values.iter().map(|(v, w)| (v.to_string(), *w)).collect(),
        }
    }

    fn fixed(value: &str) -> Self {
        Self::weighted(&[(value, 1.0)])
    }

    fn sample<R: Rng>(&self, bounds: Option<(i64, i64)>, rng: &mut R) -> Result<AnswerValue> {
        match self {
            FeatureProfile::Normal { mean, std } => {
                let raw = (mean + std * standard_normal(rng)).round() as i64;
                let value = match bounds {
                    Some((lo, hi)) => raw.clamp(lo, hi),
                    None => raw,
                };
                Ok(AnswerValue::Rating(value))
            }
            FeatureProfile::Weighted { choices } => {
                let index = WeightedIndex::new(choices.iter().map(|(_, w)| *w))
                    .map_err(|e| CareerError::Configuration(format!("bad choice weights: {}", e)))?;
                let choice = &choices[index.sample(rng)].0;
                Ok(match (bounds, choice.trim().parse::<i64>()) {
                    (Some((lo, hi)), Ok(n)) => AnswerValue::Rating(n.clamp(lo, hi)),
                    _ => AnswerValue::text(choice.clone()),
                })
            }
        }
    }

    fn validate(&self, question: &str, kind: &QuestionKind) -> Result<()> {
        let problem = match self {
            FeatureProfile::Normal { mean, std } if !mean.is_finite() || !std.is_finite() || *std < 0.0 => {
                Some(format!("invalid normal({}, {})", mean, std))
            }
            FeatureProfile::Normal { .. } if kind.bounds().is_none() => {
                Some("normal distributions apply to ratings only".to_string())
            }
            FeatureProfile::Weighted { choices }
                if choices.is_empty()
                    || choices.iter().any(|(_, w)| !w.is_finite() || *w < 0.0)
                    || choices.iter().all(|(_, w)| *w == 0.0) =>
            {
                Some("choices need at least one positive weight".to_string())
            }
            FeatureProfile::Weighted { choices } => {
                choices.iter().find_map(|(value, _)| kind.check_literal(value).err())
            }
            _ => None,
        };
        match problem {
            Some(problem) => Err(CareerError::Configuration(format!(
                "profile for '{}': {}",
                question, problem
            ))),
            None => Ok(()),
        }
    }
}

/// Box-Muller transform over two uniform draws.
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    // gen::<f64>() is in [0, 1); flip it so ln never sees zero
    let u1 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Role family deciding which overrides apply on top of the base profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleFamily {
    Business,
    Creative,
    Emerging,
    /// Sampled from an industry's feature pattern.
    Industry(Industry),
    /// Base profile plus the role's own overrides only.
    Custom,
}

/// Industries of the large role catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    TechnologySoftware,
    DataScienceAi,
    Cybersecurity,
    CloudDevops,
    ProductDesign,
    BusinessManagement,
    HealthcareBiotech,
    FinanceFintech,
    MediaEntertainment,
    EducationResearch,
    ManufacturingEngineering,
    SalesMarketing,
    TransportationLogistics,
    LegalCompliance,
    EnergyEnvironment,
    ConsultingAdvisory,
}

impl Industry {
    /// Per-question distributions for the industry. Industries without a
    /// pattern of their own share the software one.
    pub fn pattern(self) -> Vec<(&'static str, FeatureProfile)> {
        let normal = |mean, std| FeatureProfile::Normal { mean, std };
        let management = |p: f64| FeatureProfile::weighted(&[("Management", p), ("Technical", 1.0 - p)]);
        let teams = |p: f64| FeatureProfile::weighted(&[("yes", p), ("no", 1.0 - p)]);

        match self {
            Industry::DataScienceAi => vec![
                (LOGICAL_QUOTIENT, normal(8.0, 1.5)),
                (CODING_SKILLS, normal(8.0, 1.5)),
                (MANAGEMENT_OR_TECHNICAL, management(0.15)),
                (
                    INTERESTED_SUBJECTS,
                    FeatureProfile::weighted(&[("data engineering", 0.6), ("programming", 0.3), ("Management", 0.1)]),
                ),
            ],
            Industry::Cybersecurity => vec![
                (LOGICAL_QUOTIENT, normal(8.0, 1.5)),
                (CODING_SKILLS, normal(7.0, 2.0)),
                (MANAGEMENT_OR_TECHNICAL, management(0.3)),
                (
                    CERTIFICATIONS,
                    FeatureProfile::weighted(&[("information security", 0.6), ("cloud computing", 0.2), ("machine learning", 0.2)]),
                ),
            ],
            Industry::BusinessManagement => vec![
                (PUBLIC_SPEAKING, normal(8.0, 1.5)),
                (WORKED_IN_TEAMS, teams(0.9)),
                (MANAGEMENT_OR_TECHNICAL, management(0.8)),
                (
                    INTERESTED_SUBJECTS,
                    FeatureProfile::weighted(&[("Management", 0.5), ("business strategy", 0.4), ("programming", 0.1)]),
                ),
            ],
            Industry::ProductDesign => vec![
                (PUBLIC_SPEAKING, normal(7.0, 2.0)),
                (WORKED_IN_TEAMS, teams(0.8)),
                (MANAGEMENT_OR_TECHNICAL, management(0.6)),
            ],
            _ => vec![
                (LOGICAL_QUOTIENT, normal(7.0, 2.0)),
                (CODING_SKILLS, normal(8.0, 1.5)),
                (HACKATHONS, normal(3.0, 2.0)),
                (MANAGEMENT_OR_TECHNICAL, management(0.2)),
                (
                    INTERESTED_SUBJECTS,
                    FeatureProfile::weighted(&[("programming", 0.6), ("data engineering", 0.3), ("Management", 0.1)]),
                ),
            ],
        }
    }
}

/// A role that only exists as synthetic rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticRole {
    pub label: String,
    pub family: RoleFamily,
    #[serde(default)]
    pub overrides: BTreeMap<String, FeatureProfile>,
    /// Inclusive row range for this role; the catalog's range when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<(usize, usize)>,
}

impl SyntheticRole {
    pub fn new(label: impl Into<String>, family: RoleFamily) -> Self {
        SyntheticRole {
            label: label.into(),
            family,
            overrides: BTreeMap::new(),
            rows: None,
        }
    }
}

/// Per-question sampling distributions for one role.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SyntheticProfile {
    pub features: BTreeMap<String, FeatureProfile>,
}

impl SyntheticProfile {
    /// Profile shared by every new role before family adjustments.
    pub fn base() -> Self {
        let mut features = BTreeMap::new();
        let normal = |mean, std| FeatureProfile::Normal { mean, std };

        features.insert(LOGICAL_QUOTIENT.to_string(), normal(5.5, 1.7));
        features.insert(HACKATHONS.to_string(), normal(3.5, 2.3));
        features.insert(CODING_SKILLS.to_string(), normal(4.5, 1.7));
        features.insert(PUBLIC_SPEAKING.to_string(), normal(5.0, 2.0));
        features.insert(SELF_LEARNING.to_string(), FeatureProfile::weighted(&[("yes", 0.7), ("no", 0.3)]));
        features.insert(EXTRA_COURSES.to_string(), FeatureProfile::weighted(&[("yes", 0.6), ("no", 0.4)]));
        features.insert(SENIOR_INPUTS.to_string(), FeatureProfile::weighted(&[("yes", 0.7), ("no", 0.3)]));
        features.insert(WORKED_IN_TEAMS.to_string(), FeatureProfile::weighted(&[("yes", 0.8), ("no", 0.2)]));
        features.insert(INTROVERT.to_string(), FeatureProfile::weighted(&[("yes", 0.4), ("no", 0.6)]));
        features.insert(
            READING_WRITING.to_string(),
            FeatureProfile::weighted(&[("poor", 0.1), ("medium", 0.4), ("excellent", 0.5)]),
        );
        features.insert(
            MEMORY_SCORE.to_string(),
            FeatureProfile::weighted(&[("poor", 0.1), ("medium", 0.5), ("excellent", 0.4)]),
        );
        features.insert(
            CERTIFICATIONS.to_string(),
            FeatureProfile::uniform(&[
                "information security",
                "machine learning",
                "cloud computing",
                "data science",
                "project management",
                "digital marketing",
            ]),
        );
        features.insert(
            WORKSHOPS.to_string(),
            FeatureProfile::uniform(&["data science", "cloud computing", "leadership", "design thinking"]),
        );
        features.insert(
            INTERESTED_SUBJECTS.to_string(),
            FeatureProfile::uniform(&["programming", "Management", "data engineering", "business strategy"]),
        );
        features.insert(
            CAREER_AREA.to_string(),
            FeatureProfile::uniform(&["technology", "business", "creative", "consulting"]),
        );
        features.insert(
            COMPANY_TYPE.to_string(),
            FeatureProfile::uniform(&["Technology", "Startup", "Consulting", "Healthcare", "Finance"]),
        );
        features.insert(
            BOOK_TYPE.to_string(),
            FeatureProfile::uniform(&["Business", "Technology", "Self-help", "Science", "Biography"]),
        );
        features.insert(MANAGEMENT_OR_TECHNICAL.to_string(), FeatureProfile::uniform(&["Management", "Technical"]));
        features.insert(
            HARD_OR_SMART.to_string(),
            FeatureProfile::weighted(&[("smart worker", 0.6), ("hard worker", 0.4)]),
        );

        SyntheticProfile { features }
    }

    /// Full profile for the `index`-th role of a catalog.
    pub fn for_role(role: &SyntheticRole, index: usize) -> Self {
        let mut profile = Self::base();
        let mut set = |question: &str, p: FeatureProfile| {
            profile.features.insert(question.to_string(), p);
        };

        set(MANAGEMENT_OR_TECHNICAL, management_preference(&role.label));

        match role.family {
            RoleFamily::Business => {
                set(PUBLIC_SPEAKING, FeatureProfile::Normal { mean: 7.5, std: 1.2 });
                set(MANAGEMENT_OR_TECHNICAL, FeatureProfile::fixed("Management"));
                set(WORKED_IN_TEAMS, FeatureProfile::fixed("yes"));
            }
            RoleFamily::Creative => {
                set(BOOK_TYPE, FeatureProfile::uniform(&["Art", "Design", "Creative"]));
                set(HACKATHONS, FeatureProfile::Normal { mean: 1.5, std: 1.5 });
            }
            RoleFamily::Emerging => {
                set(LOGICAL_QUOTIENT, FeatureProfile::Normal { mean: 8.0, std: 1.0 });
                set(SELF_LEARNING, FeatureProfile::fixed("yes"));
                set(EXTRA_COURSES, FeatureProfile::fixed("yes"));
            }
            RoleFamily::Industry(industry) => {
                for (question, p) in industry.pattern() {
                    set(question, p);
                }
            }
            RoleFamily::Custom => {}
        }

        profile.apply_signature(index);

        for (question, p) in &role.overrides {
            profile.features.insert(question.clone(), p.clone());
        }
        profile
    }

    /// Shift one rating mean and favour one category so that roles sharing a
    /// family still differ. The choice cycles with `index`.
    fn apply_signature(&mut self, index: usize) {
        const RATINGS: [&str; 4] = [LOGICAL_QUOTIENT, CODING_SKILLS, HACKATHONS, PUBLIC_SPEAKING];
        const CATEGORIES: [&str; 4] = [CERTIFICATIONS, WORKSHOPS, INTERESTED_SUBJECTS, COMPANY_TYPE];

        let rating = RATINGS[index % RATINGS.len()];
        if let Some(FeatureProfile::Normal { mean, .. }) = self.features.get_mut(rating) {
            *mean += 1.0 + ((index / RATINGS.len()) % 3) as f64;
        }

        let category = CATEGORIES[index % CATEGORIES.len()];
        if let Some(FeatureProfile::Weighted { choices }) = self.features.get_mut(category) {
            let favoured = (index / CATEGORIES.len()) % choices.len();
            choices[favoured].1 *= 4.0;
        }
    }

    /// Check every distribution against the kind of the question it feeds.
    pub fn validate(&self, questionnaire: &Questionnaire) -> Result<()> {
        for (question, profile) in &self.features {
            let kind = questionnaire.get(question).map(|q| &q.kind).ok_or_else(|| {
                CareerError::Configuration(format!("profile for unknown question '{}'", question))
            })?;
            profile.validate(question, kind)?;
        }
        Ok(())
    }
}

/// Named management roles lean management, engineering and analyst titles
/// lean technical, anything else is a coin flip.
fn management_preference(label: &str) -> FeatureProfile {
    if MANAGEMENT_ROLES.iter().any(|role| label.contains(role)) {
        FeatureProfile::fixed("Management")
    } else if ["Developer", "Engineer", "Analyst"].iter().any(|t| label.contains(t)) {
        FeatureProfile::fixed("Technical")
    } else {
        FeatureProfile::uniform(&["Management", "Technical"])
    }
}

/// Observed answers per question, used for questions a profile does not
/// cover.
#[derive(Debug, Clone, Default)]
pub struct EmpiricalAnswers {
    observed: BTreeMap<String, Vec<AnswerValue>>,
}

impl EmpiricalAnswers {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut observed: BTreeMap<String, Vec<AnswerValue>> = BTreeMap::new();
        for row in &dataset.rows {
            for (question, value) in row.answer.iter() {
                observed.entry(question.clone()).or_default().push(value.clone());
            }
        }
        EmpiricalAnswers { observed }
    }

    fn sample<R: Rng>(&self, question: &str, rng: &mut R) -> Option<AnswerValue> {
        self.observed.get(question).and_then(|values| values.choose(rng)).cloned()
    }
}

fn default_rows_per_label() -> (usize, usize) {
    (10, 20)
}

/// Rows per role in the industry catalog.
pub const INDUSTRY_ROWS_PER_LABEL: (usize, usize) = (50, 100);

fn check_rows(label: &str, (min, max): (usize, usize)) -> Result<()> {
    if min == 0 || min > max {
        return Err(CareerError::Configuration(format!(
            "rows for '{}' must be a non-empty range starting at 1 or more, got {}..={}",
            label, min, max
        )));
    }
    Ok(())
}

/// Roles to synthesize and how many rows each gets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticCatalog {
    pub roles: Vec<SyntheticRole>,
    /// Inclusive range; each role draws its row count uniformly from it.
    #[serde(default = "default_rows_per_label")]
    pub rows_per_label: (usize, usize),
}

impl SyntheticCatalog {
    /// Business, creative and emerging roles.
    pub fn builtin() -> Self {
        let family = |roles: &[&str], family: RoleFamily| {
            roles
                .iter()
                .map(move |r| SyntheticRole::new(*r, family))
                .collect::<Vec<_>>()
        };

        let mut roles = family(BUSINESS_ROLES, RoleFamily::Business);
        roles.extend(family(CREATIVE_ROLES, RoleFamily::Creative));
        roles.extend(family(EMERGING_ROLES, RoleFamily::Emerging));

        SyntheticCatalog {
            roles,
            rows_per_label: default_rows_per_label(),
        }
    }

    pub fn empty() -> Self {
        SyntheticCatalog {
            roles: Vec::new(),
            rows_per_label: default_rows_per_label(),
        }
    }

    /// Every industry role, each drawing its row count from `rows`.
    pub fn industry(rows: (usize, usize)) -> Self {
        let mut catalog = SyntheticCatalog {
            roles: Vec::new(),
            rows_per_label: rows,
        };
        catalog.extend_unique(INDUSTRY_ROLES.iter().flat_map(|(industry, labels)| {
            labels.iter().map(move |label| {
                let mut role = SyntheticRole::new(*label, RoleFamily::Industry(*industry));
                role.rows = Some(rows);
                role
            })
        }));
        catalog
    }

    /// Append roles whose label is not in the catalog yet.
    pub fn extend_unique(&mut self, roles: impl IntoIterator<Item = SyntheticRole>) {
        for role in roles {
            if !self.roles.iter().any(|r| r.label == role.label) {
                self.roles.push(role);
            }
        }
    }

    pub fn validate(&self, questionnaire: &Questionnaire) -> Result<()> {
        check_rows("synthetic labels", self.rows_per_label)?;
        for (index, role) in self.roles.iter().enumerate() {
            if let Some(rows) = role.rows {
                check_rows(&role.label, rows)?;
            }
            SyntheticProfile::for_role(role, index).validate(questionnaire)?;
        }
        Ok(())
    }

    /// Generate rows for one role. Questions outside the profile are drawn
    /// from the observed answers.
    pub fn generate<R: Rng>(
        &self,
        index: usize,
        questionnaire: &Questionnaire,
        empirical: &EmpiricalAnswers,
        rng: &mut R,
    ) -> Result<Vec<QuestionnaireAnswer>> {
        let Some(role) = self.roles.get(index) else {
            return Ok(Vec::new());
        };
        let profile = SyntheticProfile::for_role(role, index);
        let (min, max) = role.rows.unwrap_or(self.rows_per_label);
        let count = rng.gen_range(min..=max);

        let mut rows = Vec::with_capacity(count);
        for _ in 0..count {
            let mut answer = QuestionnaireAnswer::new();
            for question in &questionnaire.questions {
                let value = match profile.features.get(&question.key) {
                    Some(p) => Some(p.sample(question.kind.bounds(), rng)?),
                    None => empirical.sample(&question.key, rng),
                };
                if let Some(value) = value {
                    answer.set(question.key.clone(), value);
                }
            }
            rows.push(answer);
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mean_of(rows: &[QuestionnaireAnswer], question: &str) -> f64 {
        rows.iter().map(|r| r.rating(question).unwrap() as f64).sum::<f64>() / rows.len() as f64
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = SyntheticCatalog::builtin();
        catalog.validate(&Questionnaire::standard()).unwrap();
        assert_eq!(catalog.roles.len(), BUSINESS_ROLES.len() + CREATIVE_ROLES.len() + EMERGING_ROLES.len());
    }

    #[test]
    fn test_row_count_within_range_and_complete() {
        let questionnaire = Questionnaire::standard();
        let catalog = SyntheticCatalog::builtin();
        let mut rng = StdRng::seed_from_u64(11);
        for index in 0..catalog.roles.len() {
            let rows = catalog
                .generate(index, &questionnaire, &EmpiricalAnswers::default(), &mut rng)
                .unwrap();
            assert!((10..=20).contains(&rows.len()));
            for row in &rows {
                assert_eq!(row.len(), questionnaire.questions.len());
            }
        }
    }

    #[test]
    fn test_ratings_clipped_to_bounds() {
        let questionnaire = Questionnaire::standard();
        let mut role = SyntheticRole::new("Stress Tester", RoleFamily::Custom);
        role.overrides.insert(
            CODING_SKILLS.to_string(),
            FeatureProfile::Normal { mean: 30.0, std: 1.0 },
        );
        role.overrides.insert(
            HACKATHONS.to_string(),
            FeatureProfile::Normal { mean: -10.0, std: 1.0 },
        );
        let catalog = SyntheticCatalog {
            roles: vec![role],
            rows_per_label: (50, 50),
        };
        let mut rng = StdRng::seed_from_u64(5);
        let rows = catalog
            .generate(0, &questionnaire, &EmpiricalAnswers::default(), &mut rng)
            .unwrap();
        for row in rows {
            assert_eq!(row.rating(CODING_SKILLS), Some(10));
            assert_eq!(row.rating(HACKATHONS), Some(0));
        }
    }

    #[test]
    fn test_business_family_speaks_more_than_creative() {
        let questionnaire = Questionnaire::standard();
        let catalog = SyntheticCatalog {
            roles: vec![
                SyntheticRole::new("Sales Manager", RoleFamily::Business),
                SyntheticRole::new("Photographer", RoleFamily::Creative),
            ],
            rows_per_label: (200, 200),
        };
        let mut rng = StdRng::seed_from_u64(9);
        let empirical = EmpiricalAnswers::default();
        let business = catalog.generate(0, &questionnaire, &empirical, &mut rng).unwrap();
        let creative = catalog.generate(1, &questionnaire, &empirical, &mut rng).unwrap();

        assert!(mean_of(&business, PUBLIC_SPEAKING) > mean_of(&creative, PUBLIC_SPEAKING) + 1.0);
        assert!(business
            .iter()
            .all(|r| r.get(MANAGEMENT_OR_TECHNICAL) == Some(&AnswerValue::text("Management"))));
    }

    #[test]
    fn test_signature_differs_within_family() {
        let a = SyntheticProfile::for_role(&SyntheticRole::new("IoT Developer", RoleFamily::Emerging), 0);
        let b = SyntheticProfile::for_role(&SyntheticRole::new("EdTech Developer", RoleFamily::Emerging), 1);
        assert_ne!(a, b);
    }

    #[test]
    fn test_management_preference() {
        assert_eq!(management_preference("Senior Product Manager"), FeatureProfile::fixed("Management"));
        assert_eq!(management_preference("Risk Analyst"), FeatureProfile::fixed("Technical"));
    }

    #[test]
    fn test_invalid_range_rejected() {
        let mut catalog = SyntheticCatalog::builtin();
        catalog.rows_per_label = (5, 2);
        assert!(matches!(
            catalog.validate(&Questionnaire::standard()),
            Err(CareerError::Configuration(_))
        ));
    }

    fn custom(question: &str, profile: FeatureProfile) -> SyntheticCatalog {
        let mut role = SyntheticRole::new("Odd Role", RoleFamily::Custom);
        role.overrides.insert(question.to_string(), profile);
        SyntheticCatalog {
            roles: vec![role],
            rows_per_label: (5, 5),
        }
    }

    #[test]
    fn test_profiles_checked_against_question_kind() {
        let questionnaire = Questionnaire::standard();
        let rejected = [
            custom(CODING_SKILLS, FeatureProfile::weighted(&[("7", 0.5), ("15", 0.5)])),
            custom(CODING_SKILLS, FeatureProfile::fixed("strong")),
            custom(INTROVERT, FeatureProfile::Normal { mean: 1.0, std: 0.5 }),
            custom(MEMORY_SCORE, FeatureProfile::Normal { mean: 2.0, std: 0.5 }),
            custom(READING_WRITING, FeatureProfile::fixed("superb")),
            custom("favourite colour", FeatureProfile::fixed("blue")),
        ];
        for catalog in rejected {
            assert!(
                matches!(catalog.validate(&questionnaire), Err(CareerError::Configuration(_))),
                "{:?} should be rejected",
                catalog.roles[0].overrides
            );
        }
        custom(CODING_SKILLS, FeatureProfile::weighted(&[("7", 0.5), ("10", 0.5)]))
            .validate(&questionnaire)
            .unwrap();
    }

    #[test]
    fn test_weighted_rating_sampled_as_rating() {
        let questionnaire = Questionnaire::standard();
        let catalog = custom(CODING_SKILLS, FeatureProfile::weighted(&[("7", 1.0), ("12", 1.0)]));
        let mut rng = StdRng::seed_from_u64(21);
        let rows = catalog
            .generate(0, &questionnaire, &EmpiricalAnswers::default(), &mut rng)
            .unwrap();
        for row in rows {
            let coding = row.get(CODING_SKILLS).unwrap();
            assert!(matches!(coding, AnswerValue::Rating(7) | AnswerValue::Rating(10)), "{:?}", coding);
        }
    }

    #[test]
    fn test_industry_catalog() {
        let questionnaire = Questionnaire::standard();
        let catalog = SyntheticCatalog::industry(INDUSTRY_ROWS_PER_LABEL);
        catalog.validate(&questionnaire).unwrap();
        assert!(catalog.roles.len() > 300);

        // titles shared between industries appear once, under the first
        let platform: Vec<_> = catalog.roles.iter().filter(|r| r.label == "Platform Engineer").collect();
        assert_eq!(platform.len(), 1);
        assert_eq!(platform[0].family, RoleFamily::Industry(Industry::TechnologySoftware));

        let index = catalog.roles.iter().position(|r| r.label == "Penetration Tester").unwrap();
        let mut rng = StdRng::seed_from_u64(13);
        let rows = catalog
            .generate(index, &questionnaire, &EmpiricalAnswers::default(), &mut rng)
            .unwrap();
        assert!((50..=100).contains(&rows.len()));
        assert!(mean_of(&rows, LOGICAL_QUOTIENT) > 7.0);
    }

    #[test]
    fn test_industry_patterns_separate_business_from_data() {
        let questionnaire = Questionnaire::standard();
        let catalog = SyntheticCatalog {
            roles: vec![
                SyntheticRole::new("Operations Manager", RoleFamily::Industry(Industry::BusinessManagement)),
                SyntheticRole::new("Data Scientist", RoleFamily::Industry(Industry::DataScienceAi)),
            ],
            rows_per_label: (200, 200),
        };
        let mut rng = StdRng::seed_from_u64(17);
        let empirical = EmpiricalAnswers::default();
        let business = catalog.generate(0, &questionnaire, &empirical, &mut rng).unwrap();
        let data = catalog.generate(1, &questionnaire, &empirical, &mut rng).unwrap();

        assert!(mean_of(&business, PUBLIC_SPEAKING) > mean_of(&data, PUBLIC_SPEAKING) + 1.0);
        assert!(mean_of(&data, CODING_SKILLS) > mean_of(&business, CODING_SKILLS) + 1.0);
    }
}
