/// Entity identifiers are opaque strings. Generated ones carry a kind prefix.
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

pub const CONTRACT_TYPE_ID_PREFIX: &str = "ct";
pub const PLACEHOLDER_ID_PREFIX: &str = "ph";
pub const TEMPLATE_ID_PREFIX: &str = "t";

/// Generate a fresh identifier such as `ct_0190a6f2...`.
pub fn generate_id(prefix: &str) -> EntityId {
    format!("{prefix}_{}", uuid::Uuid::now_v7().simple())
}

/// Canonical form of a client-supplied identifier: surrounding whitespace is
/// dropped and a blank id counts as absent.
pub fn normalize_id(id: Option<EntityId>) -> Option<EntityId> {
    id.map(|id| id.trim().to_string()).filter(|id| !id.is_empty())
}

/// Compute the `updated_at` value for a mutation.
///
/// Always strictly later than `previous`, even if the clock has not moved.
pub fn touch(previous: Timestamp, now: Timestamp) -> Timestamp {
    if now > previous {
        now
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}
