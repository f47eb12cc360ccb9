use log::trace;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

/// A single record from a user's public activity feed.
///
/// The `payload` is kept as raw JSON since its shape
/// depends entirely on the event's `type`.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub repo: EventRepo,

    #[serde(default)]
    pub payload: Value,
}

impl Event {
    /// Re-decodes the raw payload into the shape expected for
    /// this event's type. A payload that doesn't match returns `None`.
    #[must_use]
    pub fn payload_as<T>(&self) -> Option<T>
    where
        T: DeserializeOwned,
    {
        T::deserialize(&self.payload)
            .inspect_err(|e| trace!("Payload for {} didn't match: {e}", self.kind))
            .ok()
    }

    #[must_use]
    pub fn repo_name(&self) -> &str {
        &self.repo.name
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct EventRepo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PushPayload {
    pub commits: Vec<Commit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    #[serde(default)]
    pub sha: Option<String>,
}

/// Probe for payloads where only the `action` is of interest.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ActionPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub action: String,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct PullRequestPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub action: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub pull_request: PullRequest,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct PullRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub merged: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePayload {
    pub ref_type: String,

    #[serde(default, rename = "ref")]
    pub ref_name: Option<String>,
}

/// The API sends `null` for fields that don't apply to an event,
/// which is treated the same as the field being absent.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
