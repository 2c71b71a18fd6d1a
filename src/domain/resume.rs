use serde::Deserialize;

use super::AppError;

const EMBEDDED_RESUME: &str = include_str!("../../assets/resume.json");

/// Static page content. Loaded once at start-up and never mutated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Resume {
    pub profile: Profile,
    pub contacts: Vec<ContactLink>,
    pub about: String,
    pub skills: Vec<SkillCategory>,
    pub experience: Vec<Experience>,
    pub featured_project: Project,
    pub education: Credential,
    pub military: Credential,
    pub footer_tagline: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Email,
    Phone,
    Linkedin,
    Github,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContactLink {
    pub kind: ContactKind,
    pub label: String,
    pub href: String,
    /// Whether the footer repeats this link.
    #[serde(default)]
    pub in_footer: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Experience {
    pub period: String,
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    pub name: String,
    pub link: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Credential {
    pub heading: String,
    pub title: String,
    pub institution: String,
    pub period: String,
}

impl Resume {
    /// Content bundled into the binary.
    pub fn embedded() -> Result<Self, AppError> {
        Self::from_json(EMBEDDED_RESUME)
    }

    pub fn from_json(json: &str) -> Result<Self, AppError> {
        serde_json::from_str(json).map_err(|e| AppError::Content(e.to_string()))
    }

    pub fn footer_contacts(&self) -> impl Iterator<Item = &ContactLink> {
        self.contacts.iter().filter(|c| c.in_footer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_resume_parses() {
        let resume = Resume::embedded().unwrap();
        assert_eq!(resume.profile.name, "Yariv Menachem");
        assert_eq!(resume.skills.len(), 6);
        assert_eq!(resume.experience.len(), 3);
        assert_eq!(resume.experience[0].company, "Freelance");
        assert_eq!(resume.featured_project.name, "JobSeekerTG Bot");
        assert_eq!(resume.military.institution, "Israeli Air Force");
    }

    #[test]
    fn test_footer_skips_phone() {
        let resume = Resume::embedded().unwrap();
        let kinds: Vec<_> = resume.footer_contacts().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![ContactKind::Email, ContactKind::Linkedin, ContactKind::Github]
        );
    }

    #[test]
    fn test_rejects_malformed_content() {
        let err = Resume::from_json(r#"{"profile": {}}"#).unwrap_err();
        assert!(matches!(err, AppError::Content(_)));
    }
}
