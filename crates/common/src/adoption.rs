//! Adoption applications and the request the gateway sends to record one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AdoptionId, AnimalId};

/// A stored adoption application. At most one exists per animal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionApplication {
    pub id: AdoptionId,
    pub animal_id: AnimalId,
    pub applicant_name: String,
    pub applicant_email: String,
    /// Free-text message, empty when the applicant left none.
    pub message: String,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// A validated application that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdoption {
    pub animal_id: AnimalId,
    pub applicant_name: String,
    pub applicant_email: String,
    pub message: String,
}

impl NewAdoption {
    pub fn new(
        animal_id: AnimalId,
        applicant_name: impl Into<String>,
        applicant_email: impl Into<String>,
        message: Option<String>,
    ) -> Self {
        Self {
            animal_id,
            applicant_name: applicant_name.into(),
            applicant_email: applicant_email.into(),
            message: message.unwrap_or_default(),
        }
    }

    /// Attaches the store-assigned id and creation time.
    pub fn into_application(
        self,
        id: AdoptionId,
        created_at: DateTime<Utc>,
    ) -> AdoptionApplication {
        AdoptionApplication {
            id,
            animal_id: self.animal_id,
            applicant_name: self.applicant_name,
            applicant_email: self.applicant_email,
            message: self.message,
            created_at,
        }
    }
}

/// Body of `POST /adoptions`, as sent by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionRequest {
    pub animal_id: AnimalId,
    pub applicant_name: String,
    pub applicant_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
