use crate::document::{extract_text, RichDocument};
use regex::{RegexSet, RegexSetBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

pub const TOTAL_CHECKS: u32 = 4;

// ---------------------------------------------------------------------------
// Check
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Check {
    UserStory,
    AcceptanceCriteria,
    TestCases,
    DependenciesAssumptions,
}

/// How a check's keywords combine.
enum Keywords {
    AllOf(&'static [&'static str]),
    AnyOf(&'static [&'static str]),
}

impl Check {
    /// Fixed display order.
    pub fn all() -> &'static [Check] {
        &[
            Check::UserStory,
            Check::AcceptanceCriteria,
            Check::TestCases,
            Check::DependenciesAssumptions,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Check::UserStory => "userStory",
            Check::AcceptanceCriteria => "acceptanceCriteria",
            Check::TestCases => "testCases",
            Check::DependenciesAssumptions => "dependenciesAssumptions",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Check::UserStory => "User Story Format",
            Check::AcceptanceCriteria => "Acceptance Criteria",
            Check::TestCases => "Test Cases",
            Check::DependenciesAssumptions => "Dependencies / Assumptions",
        }
    }

    fn keywords(self) -> Keywords {
        match self {
            Check::UserStory => Keywords::AllOf(&["given", "when", "then"]),
            Check::AcceptanceCriteria => {
                Keywords::AnyOf(&["acceptance criteria", "ac:", "requirements"])
            }
            Check::TestCases => Keywords::AnyOf(&["test case", "testing", "scenarios"]),
            Check::DependenciesAssumptions => Keywords::AnyOf(&[
                "dependency",
                "dependencies",
                "assumption",
                "assumptions",
            ]),
        }
    }

    fn matcher(self) -> &'static RegexSet {
        static SETS: OnceLock<Vec<RegexSet>> = OnceLock::new();
        let sets = SETS.get_or_init(|| {
            Check::all()
                .iter()
                .map(|check| {
                    let words = match check.keywords() {
                        Keywords::AllOf(w) | Keywords::AnyOf(w) => w,
                    };
                    RegexSetBuilder::new(words.iter().map(|w| regex::escape(w)))
                        .case_insensitive(true)
                        .unicode(false)
                        .build()
                        .expect("keyword patterns are escaped literals")
                })
                .collect()
        });
        &sets[self as usize]
    }

    /// Case-insensitive substring test over the full text. Keywords also
    /// match inside longer words.
    pub fn is_met(self, text: &str) -> bool {
        let set = self.matcher();
        match self.keywords() {
            Keywords::AllOf(_) => set.matches(text).matched_all(),
            Keywords::AnyOf(_) => set.is_match(text),
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CheckResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub user_story: bool,
    pub acceptance_criteria: bool,
    pub test_cases: bool,
    pub dependencies_assumptions: bool,
}

impl CheckResult {
    pub fn evaluate(text: &str) -> Self {
        Self {
            user_story: Check::UserStory.is_met(text),
            acceptance_criteria: Check::AcceptanceCriteria.is_met(text),
            test_cases: Check::TestCases.is_met(text),
            dependencies_assumptions: Check::DependenciesAssumptions.is_met(text),
        }
    }

    pub fn get(&self, check: Check) -> bool {
        match check {
            Check::UserStory => self.user_story,
            Check::AcceptanceCriteria => self.acceptance_criteria,
            Check::TestCases => self.test_cases,
            Check::DependenciesAssumptions => self.dependencies_assumptions,
        }
    }

    /// Checks paired with their outcome, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Check, bool)> + '_ {
        Check::all().iter().map(move |&c| (c, self.get(c)))
    }

    pub fn passed(&self) -> u32 {
        self.iter().filter(|(_, ok)| *ok).count() as u32
    }
}

// ---------------------------------------------------------------------------
// AnalysisResult
// ---------------------------------------------------------------------------

/// Completion score for one description. Only constructible through
/// [`analyze`], so `completed_count` always equals the number of passing checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    completed_count: u32,
    total_count: u32,
    checks: CheckResult,
}

impl AnalysisResult {
    fn from_checks(checks: CheckResult) -> Self {
        Self {
            completed_count: checks.passed(),
            total_count: TOTAL_CHECKS,
            checks,
        }
    }

    pub fn completed_count(&self) -> u32 {
        self.completed_count
    }

    pub fn total_count(&self) -> u32 {
        self.total_count
    }

    pub fn checks(&self) -> &CheckResult {
        &self.checks
    }

    pub fn is_complete(&self) -> bool {
        self.completed_count == self.total_count
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

pub fn analyze(text: &str) -> AnalysisResult {
    AnalysisResult::from_checks(CheckResult::evaluate(text))
}

pub fn analyze_document(document: Option<&RichDocument>) -> AnalysisResult {
    analyze(&extract_text(document))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
