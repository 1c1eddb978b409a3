//! Zone (city) model and zone-reference allocation.

use serde::{Deserialize, Serialize};

use super::ZoneStatus;

/// A tracked city/location unit with its derived unique reference.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: i64,
    pub name: String,
    pub zone_ref: String,
}

/// A zone joined with its current status for list views.
///
/// The current status is the latest status-update row for the zone (max
/// `updated_at`, ties broken by highest id); zones without any update
/// carry `None` in all status fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneWithStatus {
    pub id: i64,
    pub name: String,
    pub zone_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ZoneStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

/// Request body for creating a new zone.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateZoneRequest {
    pub name: String,
}

/// Derive the prefix of a zone reference from a zone name: the first three
/// characters uppercased, or the whole name when shorter.
pub fn zone_ref_prefix(name: &str) -> String {
    name.chars().take(3).collect::<String>().to_uppercase()
}

/// Allocate the next zone reference for `name` given the references already
/// taken by zones sharing the same prefix.
///
/// The numeric suffix is one past the highest existing suffix for the
/// prefix, zero-padded to three digits, starting at 001. Suffixes that fail
/// to parse are ignored.
pub fn allocate_zone_ref(name: &str, existing: &[String]) -> String {
    let prefix = zone_ref_prefix(name);
    let next = existing
        .iter()
        .filter_map(|zone_ref| zone_ref.strip_prefix(&prefix))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .map_or(1, |max| max + 1);
    format!("{}{:03}", prefix, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_uppercases_first_three_chars() {
        assert_eq!(zone_ref_prefix("Karachi"), "KAR");
        assert_eq!(zone_ref_prefix("lahore"), "LAH");
    }

    #[test]
    fn test_prefix_of_short_name_is_whole_name() {
        assert_eq!(zone_ref_prefix("Ely"), "ELY");
        assert_eq!(zone_ref_prefix("Os"), "OS");
    }

    #[test]
    fn test_first_allocation_starts_at_001() {
        assert_eq!(allocate_zone_ref("Karachi", &[]), "KAR001");
    }

    #[test]
    fn test_allocation_increments_within_prefix() {
        let existing = vec!["KAR001".to_string(), "KAR002".to_string()];
        assert_eq!(allocate_zone_ref("Karma", &existing), "KAR003");
    }

    #[test]
    fn test_allocation_ignores_other_prefixes() {
        let existing = vec![
            "KAR001".to_string(),
            "KAR002".to_string(),
            "KAR003".to_string(),
        ];
        assert_eq!(allocate_zone_ref("Lahore", &existing), "LAH001");
    }

    #[test]
    fn test_allocation_skips_unparseable_suffixes() {
        let existing = vec!["KARxyz".to_string(), "KAR004".to_string()];
        assert_eq!(allocate_zone_ref("Karachi", &existing), "KAR005");
    }
}
