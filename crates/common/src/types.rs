use serde::{Deserialize, Serialize};

/// Identifier of an animal in the gateway's animal store.
///
/// Wraps the store-assigned integer key so animal ids cannot be mixed up
/// with adoption ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimalId(i64);

impl AnimalId {
    /// Creates an animal ID from a raw store key.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw store key.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for AnimalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AnimalId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<i64> for AnimalId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<AnimalId> for i64 {
    fn from(id: AnimalId) -> Self {
        id.0
    }
}

/// Identifier of an adoption application, assigned by the adoption store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdoptionId(i64);

impl AdoptionId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for AdoptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for AdoptionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
