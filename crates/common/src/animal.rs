//! Animal records as served by the gateway.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::AnimalId;

/// Adoption status of an animal.
///
/// The only legal transition is `Available` → `Adopted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimalStatus {
    #[default]
    Available,
    Adopted,
}

impl AnimalStatus {
    /// Returns the stored/serialized representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimalStatus::Available => "available",
            AnimalStatus::Adopted => "adopted",
        }
    }

    pub fn is_adopted(&self) -> bool {
        matches!(self, AnimalStatus::Adopted)
    }
}

impl std::fmt::Display for AnimalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored status value is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown animal status: {0}")]
pub struct ParseStatusError(pub String);

impl std::str::FromStr for AnimalStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(AnimalStatus::Available),
            "adopted" => Ok(AnimalStatus::Adopted),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// An animal listed for adoption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: AnimalId,
    pub name: String,
    /// Species, e.g. `"cat"` or `"dog"`.
    #[serde(rename = "type")]
    pub species: String,
    /// Age in years, `None` when unknown.
    pub age: Option<i64>,
    pub breed: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub status: AnimalStatus,
}

/// An animal that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnimal {
    pub name: String,
    pub species: String,
    pub age: Option<i64>,
    pub breed: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl NewAnimal {
    /// Creates a new animal with only the required fields set.
    pub fn new(name: impl Into<String>, species: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            species: species.into(),
            age: None,
            breed: None,
            description: None,
            image_url: None,
        }
    }

    pub fn with_age(mut self, age: i64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_breed(mut self, breed: impl Into<String>) -> Self {
        self.breed = Some(breed.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Attaches the store-assigned id. New animals always start available.
    pub fn into_animal(self, id: AnimalId) -> Animal {
        Animal {
            id,
            name: self.name,
            species: self.species,
            age: self.age,
            breed: self.breed,
            description: self.description,
            image_url: self.image_url,
            status: AnimalStatus::Available,
        }
    }
}
