use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::document::layout::{default_layout, Layout};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A full résumé: content sections plus the layout they are presented with.
///
/// The JSON shape of this type is the persisted snapshot format and the
/// `resumeData` member of a compile request; field names must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub layout: Layout,
    pub sections: Sections,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sections {
    pub personal: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    /// Free-form lines, or `"Category: item1, item2"` lines.
    pub skills: Vec<String>,
}

/// Contact details. An empty string means the field is omitted when rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub location: String,
    pub graduation_date: String,
    #[serde(default)]
    pub gpa: String,
}

impl ExperienceEntry {
    /// The entry the editor appends when the user asks for a blank one.
    pub fn placeholder() -> Self {
        Self {
            title: "Job Title".to_string(),
            company: "Company Name".to_string(),
            location: "City, State".to_string(),
            start_date: "2023".to_string(),
            end_date: "Present".to_string(),
            bullets: vec!["Describe your responsibilities and achievements".to_string()],
        }
    }
}

impl EducationEntry {
    pub fn placeholder() -> Self {
        Self {
            degree: "Degree Name".to_string(),
            school: "School Name".to_string(),
            location: "City, State".to_string(),
            graduation_date: "2023".to_string(),
            gpa: String::new(),
        }
    }
}

pub const PLACEHOLDER_BULLET: &str = "New responsibility";
pub const PLACEHOLDER_SKILL_LINE: &str = "New skill category";

impl ResumeDocument {
    /// Parses a stored snapshot or request body.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Default for ResumeDocument {
    fn default() -> Self {
        default_template()
    }
}

/// The sample résumé every newly created document starts from.
pub fn default_template() -> ResumeDocument {
    ResumeDocument {
        layout: default_layout(),
        sections: Sections {
            personal: PersonalInfo {
                name: "John Doe".to_string(),
                email: "john.doe@email.com".to_string(),
                phone: "(555) 123-4567".to_string(),
                location: "City, State".to_string(),
                website: "linkedin.com/in/johndoe".to_string(),
            },
            experience: vec![ExperienceEntry {
                title: "Software Engineer".to_string(),
                company: "Company Name".to_string(),
                location: "City, State".to_string(),
                start_date: "2022".to_string(),
                end_date: "Present".to_string(),
                bullets: vec![
                    "Developed and maintained web applications using React and Node.js"
                        .to_string(),
                    "Collaborated with cross-functional teams to deliver high-quality software"
                        .to_string(),
                    "Implemented responsive designs and optimized performance".to_string(),
                ],
            }],
            education: vec![EducationEntry {
                degree: "Bachelor of Science in Computer Science".to_string(),
                school: "University Name".to_string(),
                location: "City, State".to_string(),
                graduation_date: "2022".to_string(),
                gpa: "3.8".to_string(),
            }],
            skills: vec![
                "JavaScript, Python, Java".to_string(),
                "React, Node.js, Express".to_string(),
                "PostgreSQL, MongoDB".to_string(),
                "Git, Docker, AWS".to_string(),
            ],
        },
    }
}

// `bullets: null` in an old snapshot reads back as an empty list.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
