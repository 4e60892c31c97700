use serde::{Deserialize, Serialize};

use devconnector_validate::{EducationInput, ExperienceInput};

/// A job held, newest first in the profile's list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: String,
}

impl From<ExperienceInput> for Experience {
    fn from(input: ExperienceInput) -> Self {
        Self {
            id: devconnector_core::new_id(),
            title: input.title,
            company: input.company,
            location: input.location,
            from: input.from,
            to: input.to,
            current: input.current,
            description: input.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: String,
}

impl From<EducationInput> for Education {
    fn from(input: EducationInput) -> Self {
        Self {
            id: devconnector_core::new_id(),
            school: input.school,
            degree: input.degree,
            fieldofstudy: input.fieldofstudy,
            from: input.from,
            to: input.to,
            current: input.current,
            description: input.description,
        }
    }
}
