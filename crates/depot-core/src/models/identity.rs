use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Point-in-time copy of a user's public identity fields, fetched per request
/// from the identity service. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IdentitySnapshot {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Outcome of author enrichment on file creation.
///
/// Enrichment failure never blocks the create operation: the record is
/// persisted either way, and callers distinguish a transient lookup failure
/// from a definitively absent user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorEnrichment {
    Resolved(IdentitySnapshot),
    Unavailable,
    NotFound,
}

impl AuthorEnrichment {
    pub fn snapshot(&self) -> Option<&IdentitySnapshot> {
        match self {
            AuthorEnrichment::Resolved(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorEnrichment::Resolved(_) => "resolved",
            AuthorEnrichment::Unavailable => "unavailable",
            AuthorEnrichment::NotFound => "not_found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrichment_snapshot_access() {
        let snapshot = IdentitySnapshot {
            id: Uuid::new_v4(),
            username: "ada".to_string(),
            display_name: "Ada Lovelace".to_string(),
            avatar_url: None,
        };
        let resolved = AuthorEnrichment::Resolved(snapshot.clone());
        assert_eq!(resolved.snapshot(), Some(&snapshot));
        assert_eq!(resolved.as_str(), "resolved");

        assert_eq!(AuthorEnrichment::Unavailable.snapshot(), None);
        assert_eq!(AuthorEnrichment::NotFound.as_str(), "not_found");
    }
}
