use serde::{Deserialize, Serialize};

/// Contact block. Never scored, returned exactly as received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonalInfo {
    pub firstname: String,
    pub lastname: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EducationItem {
    pub institution: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub minor: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
}

/// A single work-history entry. Scored on its title and its joined bullets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Vec<String>,
}

impl WorkItem {
    /// Bullets joined with a single space, the text compared against the job description.
    pub fn description_text(&self) -> String {
        self.description.join(" ")
    }
}

/// A project entry. Only the joined descriptions are scored; the title is not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    pub title: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub descriptions: Vec<String>,
}

impl ProjectItem {
    pub fn description_text(&self) -> String {
        self.descriptions.join(" ")
    }
}

/// The candidate profile submitted for pruning.
///
/// `work`, `projects` and `skills` are the only sequences the ranker touches;
/// `personal`, `education` and `websites` pass through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub personal: PersonalInfo,
    #[serde(default)]
    pub work: Vec<WorkItem>,
    #[serde(default)]
    pub projects: Vec<ProjectItem>,
    #[serde(default)]
    pub education: Vec<EducationItem>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub websites: Vec<String>,
}

/// The posting the profile is ranked against. Empty strings are accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetJob {
    pub title: String,
    pub description: String,
}
