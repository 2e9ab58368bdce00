//! Locate a player's member record inside a profile's member map.

use sbstats_domain::PlayerUuid;
use serde_json::{Map, Value};

/// Find the member record belonging to `uuid`.
///
/// Tries an exact key match on the compact id first, then falls back to a
/// scan that compares every key with hyphens stripped and case folded.
/// Returns the first match.
pub fn find_member<'m>(members: &'m Map<String, Value>, uuid: &PlayerUuid) -> Option<&'m Value> {
    members.get(uuid.compact()).or_else(|| {
        members
            .iter()
            .find(|(key, _)| uuid.matches_key(key))
            .map(|(_, member)| member)
    })
}
