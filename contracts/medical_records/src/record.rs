use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Deserializer, Serialize};

/// A patient medical record as it travels on the wire and sits in the ledger.
///
/// `id` and `patient_id` are required on decode; every other field falls back
/// to its empty value so older or partial producers can still be read.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub id: String,
    pub patient_id: String,
    #[serde(default)]
    pub doctor_id: String,
    #[serde(default)]
    pub hospital_id: String,
    #[serde(default)]
    pub diagnosis: String,
    #[serde(default)]
    pub treatment: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub medications: Vec<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl MedicalRecord {
    /// Boundary check shared by every write path: the key and the subject
    /// the gate authorizes against must both be present.
    pub fn has_required_keys(&self) -> bool {
        !self.id.is_empty() && !self.patient_id.is_empty()
    }

    /// Stamps a freshly created record. Caller-supplied timestamps are discarded.
    pub fn stamp_created(&mut self, now: &str) {
        self.created_at = String::from(now);
        self.updated_at = String::from(now);
    }

    /// Stamps an update, carrying the creation time over from the stored version.
    pub fn stamp_updated(&mut self, created_at: &str, now: &str) {
        self.created_at = String::from(created_at);
        self.updated_at = String::from(now);
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
