use crate::error::{SceneError, SceneResult};

/// The seven fixed, ordered page sections. Their order defines the section
/// indices used by the locator and the rows of the shape table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionId {
    Hero,
    About,
    Services,
    Skills,
    Experience,
    Experiments,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 7] = [
        Self::Hero,
        Self::About,
        Self::Services,
        Self::Skills,
        Self::Experience,
        Self::Experiments,
        Self::Contact,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Root content document. The animation core never reads the prose fields;
/// they are modeled so hosts can parse and validate the document the
/// templating layer consumes.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Portfolio {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub about: Option<About>,
    #[serde(default)]
    pub skill_set: Vec<String>,
    #[serde(default)]
    pub intro: Option<Intro>,
    #[serde(default)]
    pub services: Option<Services>,
    #[serde(default)]
    pub skills: Option<Skills>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub experiments: Option<Experiments>,
    #[serde(default)]
    pub contact: Option<Contact>,
    #[serde(default)]
    pub cta: Option<Cta>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct About {
    #[serde(default)]
    pub section_title: Option<String>,
    #[serde(default)]
    pub identity: Option<String>,
    #[serde(default)]
    pub summary: Vec<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Intro {
    #[serde(default)]
    pub highlight: Option<Highlight>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Highlight {
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Services {
    #[serde(default)]
    pub section_title: Option<String>,
    #[serde(default)]
    pub offerings: Vec<Offering>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Offering {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Skills {
    #[serde(default)]
    pub automation: Vec<String>,
    #[serde(default)]
    pub technical_skills: Vec<String>,
    #[serde(default)]
    pub entrepreneurship: Vec<String>,
    #[serde(default)]
    pub social_skills: Vec<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Experience {
    pub company: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub employment_type: Option<String>,
    /// ISO-8601 date, e.g. "2021-03-01".
    #[serde(default)]
    pub start_date: Option<String>,
    /// Absent means the position is current.
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Experiments {
    #[serde(default)]
    pub section_title: Option<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub lesson: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub email: Vec<String>,
    #[serde(default)]
    pub socials: Socials,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Socials {
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Cta {
    #[serde(default)]
    pub primary: Option<String>,
    #[serde(default)]
    pub secondary: Option<String>,
    #[serde(default)]
    pub link_text: Option<String>,
}

/// Wire envelope: the document ships under a `portfolio` root key.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ContentDocument {
    pub portfolio: Portfolio,
}

impl Portfolio {
    pub fn validate(&self) -> SceneResult<()> {
        if self.name.trim().is_empty() {
            return Err(SceneError::content("portfolio name must be non-empty"));
        }
        for exp in &self.experience {
            if exp.company.trim().is_empty() {
                return Err(SceneError::content("experience company must be non-empty"));
            }
            if let (Some(start), Some(end)) = (&exp.start_date, &exp.end_date) {
                // ISO-8601 strings compare correctly lexicographically.
                if start > end {
                    return Err(SceneError::content(format!(
                        "experience at '{}' ends before it starts",
                        exp.company
                    )));
                }
            }
        }
        if let Some(services) = &self.services {
            for offering in &services.offerings {
                if offering.title.trim().is_empty() {
                    return Err(SceneError::content("service offering title must be non-empty"));
                }
            }
        }
        Ok(())
    }
}
