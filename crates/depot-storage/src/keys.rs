//! Storage key minting.
//!
//! Key format: `{owner_id}/{disambiguator}_{file_name}`. The owner-id prefix
//! prevents key collision or hijack across users; the UUID v4 disambiguator
//! keeps keys unique even for identical file names requested by the same
//! owner in the same instant.

use uuid::Uuid;

/// Mint a fresh owner-scoped storage key for a file name.
pub fn mint_storage_key(owner_id: Uuid, file_name: &str) -> String {
    format!(
        "{}/{}_{}",
        owner_id,
        Uuid::new_v4(),
        sanitize_file_name(file_name)
    )
}

/// Reduce a client-supplied file name to characters safe for an object key.
/// Path separators and control characters are replaced so the name cannot
/// escape the owner's namespace.
pub fn sanitize_file_name(file_name: &str) -> String {
    let sanitized: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();

    if sanitized.trim_matches('.').is_empty() {
        "file".to_string()
    } else {
        sanitized
    }
}

/// Check that a storage key sits inside the given owner's namespace.
pub fn is_owned_by(storage_key: &str, owner_id: Uuid) -> bool {
    match storage_key.split_once('/') {
        Some((prefix, rest)) => prefix == owner_id.to_string() && !rest.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_mint_storage_key_is_owner_scoped() {
        let owner_id = Uuid::new_v4();
        let key = mint_storage_key(owner_id, "photo.png");
        assert!(key.starts_with(&format!("{}/", owner_id)));
        assert!(key.ends_with("_photo.png"));
        assert!(is_owned_by(&key, owner_id));
    }

    #[test]
    fn test_mint_storage_key_distinct_for_same_name() {
        let owner_id = Uuid::new_v4();
        let keys: HashSet<String> = (0..100)
            .map(|_| mint_storage_key(owner_id, "photo.png"))
            .collect();
        assert_eq!(keys.len(), 100);
    }

    #[test]
    fn test_sanitize_strips_path_separators() {
        assert_eq!(sanitize_file_name("../etc/passwd"), "..-etc-passwd");
        assert_eq!(sanitize_file_name("a b\\c.png"), "a-b-c.png");
        assert_eq!(sanitize_file_name("photo.png"), "photo.png");
    }

    #[test]
    fn test_sanitize_empty_name_falls_back() {
        assert_eq!(sanitize_file_name(""), "file");
        assert_eq!(sanitize_file_name("..."), "file");
    }

    #[test]
    fn test_is_owned_by_rejects_foreign_keys() {
        let owner_id = Uuid::new_v4();
        let other_id = Uuid::new_v4();
        let key = mint_storage_key(owner_id, "photo.png");
        assert!(!is_owned_by(&key, other_id));
        assert!(!is_owned_by("no-slash", owner_id));
        assert!(!is_owned_by(&format!("{}/", owner_id), owner_id));
    }
}
