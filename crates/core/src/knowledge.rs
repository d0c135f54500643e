//! The owner's knowledge base.
//!
//! Every reply is composed from a single immutable [`KnowledgeBase`]. The
//! built-in base is created once per process on first use; an alternative
//! base can be loaded from a TOML file at startup and shared behind an
//! `Arc`. Nothing writes to it afterwards.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, LazyLock};

use crate::error::KnowledgeError;

/// Everything the assistant knows about the site owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub personal: Personal,

    /// Skill groups, in display order
    #[serde(default)]
    pub skills: Vec<SkillCategory>,

    /// Projects, in display order
    #[serde(default)]
    pub projects: Vec<Project>,

    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personal {
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub education: Education,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub linkedin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    /// e.g. "B.Tech"
    pub degree: String,
    pub institution: String,
    /// Name used in conversational text
    pub short_name: String,
    pub location: String,
}

/// A named group of skill labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    /// Stable lookup key ("programming", "development", ...)
    pub key: String,
    /// Heading shown to visitors
    pub label: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

static BUILTIN: LazyLock<Arc<KnowledgeBase>> =
    LazyLock::new(|| Arc::new(KnowledgeBase::default_owner()));

impl KnowledgeBase {
    /// The process-wide built-in knowledge base.
    pub fn builtin() -> &'static KnowledgeBase {
        BUILTIN.as_ref()
    }

    /// A handle to the built-in knowledge base. Every handle points at the
    /// same instance.
    pub fn shared() -> Arc<KnowledgeBase> {
        Arc::clone(&BUILTIN)
    }

    /// Load a knowledge base from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self, KnowledgeError> {
        let content = std::fs::read_to_string(path).map_err(|e| KnowledgeError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let kb: Self = toml::from_str(&content).map_err(|e| KnowledgeError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        kb.validate()?;
        tracing::info!(
            path = %path.display(),
            projects = kb.projects.len(),
            skills = kb.skills.len(),
            "Knowledge base loaded"
        );
        Ok(kb)
    }

    /// Check the invariants the reply templates rely on.
    pub fn validate(&self) -> Result<(), KnowledgeError> {
        if self.personal.name.trim().is_empty() {
            return Err(KnowledgeError::Invalid("personal.name must not be empty".into()));
        }
        if self.projects.is_empty() {
            return Err(KnowledgeError::Invalid(
                "at least one project is required".into(),
            ));
        }
        if let Some(p) = self.projects.iter().find(|p| p.name.trim().is_empty()) {
            return Err(KnowledgeError::Invalid(format!(
                "project with description {:?} has no name",
                p.description
            )));
        }
        Ok(())
    }

    /// Look up a skill category by key.
    pub fn skill(&self, key: &str) -> Option<&SkillCategory> {
        self.skills.iter().find(|s| s.key == key)
    }

    /// Serialize to TOML (for `folio profile --toml` and tests).
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    fn default_owner() -> Self {
        Self {
            personal: Personal {
                name: "Abhinav Kumar".into(),
                location: "Guna, Madhya Pradesh, India".into(),
                education: Education {
                    degree: "B.Tech".into(),
                    institution: "Jaypee University of Engineering and Technology".into(),
                    short_name: "Jaypee University".into(),
                    location: "Guna, Madhya Pradesh, India".into(),
                },
                emails: strings(&["aabhinavmishra133@gmail.com", "kumarabhinav6649@gmail.com"]),
                phone: "+91 9142647855".into(),
                github: "https://github.com/abhiav-spec".into(),
                linkedin: "Abhinav Kumar".into(),
            },
            skills: vec![
                category("programming", "Programming Languages", &["C", "C++", "Java", "Python"]),
                category(
                    "development",
                    "Development Areas",
                    &["Frontend Development", "Python Development", "Machine Learning"],
                ),
                category(
                    "learning",
                    "Currently Learning",
                    &["Backend Development", "Full Stack Development"],
                ),
                category(
                    "frameworks",
                    "Frameworks & Web",
                    &["React", "HTML/CSS", "JavaScript", "TypeScript"],
                ),
                category("tools", "Tools", &["Git", "GitHub", "VS Code", "Jupyter Notebook"]),
            ],
            projects: vec![
                Project {
                    name: "Movie Recommendation System".into(),
                    description:
                        "AI-powered movie recommendation engine using machine learning algorithms"
                            .into(),
                    link: "https://bright-jalebi-9a6bc5.netlify.app/".into(),
                    tech: strings(&[
                        "Python",
                        "Machine Learning",
                        "Collaborative Filtering",
                        "Web Development",
                    ]),
                    features: strings(&[
                        "Personalized recommendations",
                        "User rating system",
                        "Movie database integration",
                    ]),
                },
                Project {
                    name: "Crop Prediction System".into(),
                    description:
                        "Agricultural prediction system using machine learning to forecast crop yields"
                            .into(),
                    link: "https://crop-predictor-234a.onrender.com".into(),
                    tech: strings(&[
                        "Python",
                        "Machine Learning",
                        "Data Analysis",
                        "Web Framework",
                    ]),
                    features: strings(&[
                        "Weather data analysis",
                        "Soil condition assessment",
                        "Yield prediction",
                    ]),
                },
                Project {
                    name: "Safe Harvest".into(),
                    description: "Agricultural safety and optimization platform for farmers".into(),
                    link: "https://safe-harvest.onrender.com".into(),
                    tech: strings(&[
                        "Full Stack Development",
                        "Agricultural Tech",
                        "Safety Systems",
                    ]),
                    features: strings(&[
                        "Safety monitoring",
                        "Harvest optimization",
                        "Real-time alerts",
                    ]),
                },
                Project {
                    name: "Moisture Predictor".into(),
                    description: "Soil moisture prediction system for precision agriculture".into(),
                    link: "https://moisture-predicitor.onrender.com".into(),
                    tech: strings(&["Machine Learning", "IoT Integration", "Data Analytics"]),
                    features: strings(&[
                        "Soil moisture analysis",
                        "Irrigation recommendations",
                        "Historical data tracking",
                    ]),
                },
            ],
            interests: strings(&[
                "Machine Learning and AI",
                "Agricultural Technology",
                "Full Stack Development",
                "Open Source Contribution",
                "Innovation in Technology",
            ]),
        }
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn category(key: &str, label: &str, items: &[&str]) -> SkillCategory {
    SkillCategory {
        key: key.into(),
        label: label.into(),
        items: strings(items),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_valid() {
        let kb = KnowledgeBase::builtin();
        assert!(kb.validate().is_ok());
        assert_eq!(kb.projects.len(), 4);
        assert_eq!(kb.personal.emails.len(), 2);
    }

    #[test]
    fn builtin_is_shared() {
        assert!(std::ptr::eq(KnowledgeBase::builtin(), KnowledgeBase::builtin()));
        let (a, b) = (KnowledgeBase::shared(), KnowledgeBase::shared());
        assert!(Arc::ptr_eq(&a, &b));
        assert!(std::ptr::eq(a.as_ref(), KnowledgeBase::builtin()));
    }

    #[test]
    fn skill_lookup_by_key() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(
            kb.skill("programming").map(|s| s.items.as_slice()),
            Some(["C", "C++", "Java", "Python"].map(String::from).as_slice())
        );
        assert_eq!(
            kb.skill("learning").map(|s| s.label.as_str()),
            Some("Currently Learning")
        );
        assert!(kb.skill("cooking").is_none());
    }

    #[test]
    fn load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("owner.toml");
        std::fs::write(
            &path,
            r#"
[personal]
name = "Jane Doe"
emails = ["jane@example.com"]

[personal.education]
degree = "M.Sc"
institution = "Example Institute of Technology"
short_name = "EIT"
location = "Springfield"

[[skills]]
key = "programming"
label = "Programming Languages"
items = ["Rust", "Go"]

[[projects]]
name = "Tide Tables"
description = "Offline tide prediction"
tech = ["Rust"]
"#,
        )
        .unwrap();

        let kb = KnowledgeBase::load_from(&path).unwrap();
        assert_eq!(kb.personal.name, "Jane Doe");
        assert_eq!(kb.projects[0].name, "Tide Tables");
        assert!(kb.projects[0].features.is_empty());
        assert!(kb.interests.is_empty());
    }

    #[test]
    fn load_rejects_base_without_projects() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        std::fs::write(
            &path,
            r#"
[personal]
name = "Nobody"

[personal.education]
degree = "-"
institution = "-"
short_name = "-"
location = "-"
"#,
        )
        .unwrap();

        let err = KnowledgeBase::load_from(&path).unwrap_err();
        assert!(matches!(err, KnowledgeError::Invalid(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = KnowledgeBase::load_from(Path::new("/nonexistent/owner.toml")).unwrap_err();
        assert!(matches!(err, KnowledgeError::ReadError { .. }));
    }

    #[test]
    fn toml_roundtrip_preserves_order() {
        let kb = KnowledgeBase::builtin();
        let parsed: KnowledgeBase = toml::from_str(&kb.to_toml().unwrap()).unwrap();
        assert_eq!(&parsed, kb);
    }
}
