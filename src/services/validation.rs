//! Validation layer
//!
//! Required-field checks, identifier and date parsing, and a single
//! existence check parameterized by entity kind. Every write path runs
//! through these before touching storage.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use sea_orm::{ConnectionTrait, EntityTrait};

use crate::domain::DomainError;
use crate::models::{assignment, book, coup_de_coeur, genre, order, status, user};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Reader,
    User,
    Book,
    Genre,
    Status,
    Order,
    Assignment,
    CoupDeCoeur,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Reader => "Reader",
            EntityKind::User => "User",
            EntityKind::Book => "Book",
            EntityKind::Genre => "Genre",
            EntityKind::Status => "Status",
            EntityKind::Order => "Order",
            EntityKind::Assignment => "Assignment",
            EntityKind::CoupDeCoeur => "Coup de coeur",
        }
    }
}

async fn exists<C: ConnectionTrait>(
    conn: &C,
    kind: EntityKind,
    id: i32,
) -> Result<bool, DomainError> {
    let found = match kind {
        EntityKind::Reader | EntityKind::User => {
            user::Entity::find_by_id(id).one(conn).await?.is_some()
        }
        EntityKind::Book => book::Entity::find_by_id(id).one(conn).await?.is_some(),
        EntityKind::Genre => genre::Entity::find_by_id(id).one(conn).await?.is_some(),
        EntityKind::Status => status::Entity::find_by_id(id).one(conn).await?.is_some(),
        EntityKind::Order => order::Entity::find_by_id(id).one(conn).await?.is_some(),
        EntityKind::Assignment => assignment::Entity::find_by_id(id).one(conn).await?.is_some(),
        EntityKind::CoupDeCoeur => {
            coup_de_coeur::Entity::find_by_id(id).one(conn).await?.is_some()
        }
    };
    Ok(found)
}

/// The addressed resource itself must exist (404 `NOT_FOUND`).
pub async fn ensure_exists<C: ConnectionTrait>(
    conn: &C,
    kind: EntityKind,
    id: i32,
) -> Result<(), DomainError> {
    if exists(conn, kind, id).await? {
        Ok(())
    } else {
        Err(DomainError::not_found(kind.label(), id))
    }
}

/// A record referenced by the payload must exist (404 `RELATED_RECORD_MISSING`).
pub async fn ensure_related<C: ConnectionTrait>(
    conn: &C,
    kind: EntityKind,
    id: i32,
) -> Result<(), DomainError> {
    if exists(conn, kind, id).await? {
        Ok(())
    } else {
        Err(DomainError::RelatedMissing(format!(
            "{} {} not found",
            kind.label(),
            id
        )))
    }
}

pub async fn ensure_related_all<C: ConnectionTrait>(
    conn: &C,
    kind: EntityKind,
    ids: &[i32],
) -> Result<(), DomainError> {
    for id in ids {
        ensure_related(conn, kind, *id).await?;
    }
    Ok(())
}

pub fn require<T>(value: Option<T>, field: &str) -> Result<T, DomainError> {
    value.ok_or_else(|| DomainError::validation(format!("{} is required", field)))
}

/// Required, non-blank text. Surrounding whitespace is trimmed.
pub fn require_text(value: Option<String>, field: &str) -> Result<String, DomainError> {
    let text = require(value, field)?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Optional text where a blank value means "none".
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parse a path or query identifier. Only positive integers are accepted.
pub fn parse_id(raw: &str, field: &str) -> Result<i32, DomainError> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(DomainError::validation(format!(
            "Invalid {}: '{}' is not a positive integer",
            field, raw
        ))),
    }
}

/// Boolean query flag such as `?active=true`. Absent means `false`.
pub fn parse_flag(raw: Option<&str>, field: &str) -> Result<bool, DomainError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(false),
        Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(other) => Err(DomainError::validation(format!(
            "Invalid {}: '{}' is not a boolean",
            field, other
        ))),
    }
}

/// Normalize an ISO date (`YYYY-MM-DD`) or RFC 3339 timestamp to RFC 3339 UTC.
pub fn normalize_date(field: &str, raw: &str) -> Result<String, DomainError> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Secs, true));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(midnight
            .and_utc()
            .to_rfc3339_opts(SecondsFormat::Secs, true));
    }
    Err(DomainError::validation(format!(
        "{} must be an ISO date or timestamp, got '{}'",
        field, raw
    )))
}

pub fn optional_date(field: &str, value: Option<String>) -> Result<Option<String>, DomainError> {
    value.map(|raw| normalize_date(field, &raw)).transpose()
}

/// Date in a partial update: absent, explicitly null, or a new value.
pub fn nullable_date(
    field: &str,
    value: Option<Option<String>>,
) -> Result<Option<Option<String>>, DomainError> {
    match value {
        None => Ok(None),
        Some(None) => Ok(Some(None)),
        Some(Some(raw)) => normalize_date(field, &raw).map(|d| Some(Some(d))),
    }
}

/// Collapse duplicate identifiers, keeping first-seen order.
pub fn dedup_ids(ids: Vec<i32>) -> Vec<i32> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_names_the_missing_field() {
        let err = require::<i32>(None, "readerId").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "readerId is required");
    }

    #[test]
    fn require_text_rejects_blank_and_trims() {
        assert!(require_text(Some("   ".to_string()), "title").is_err());
        assert_eq!(
            require_text(Some("  Coup 1 ".to_string()), "title").unwrap(),
            "Coup 1"
        );
    }

    #[test]
    fn parse_id_rejects_non_numeric_and_non_positive() {
        assert_eq!(parse_id("12", "id").unwrap(), 12);
        assert!(parse_id("abc", "id").is_err());
        assert!(parse_id("0", "id").is_err());
        assert!(parse_id("-4", "id").is_err());
        assert!(parse_id("1.5", "id").is_err());
    }

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert!(parse_flag(Some("true"), "active").unwrap());
        assert!(!parse_flag(Some("0"), "active").unwrap());
        assert!(!parse_flag(None, "active").unwrap());
        assert!(parse_flag(Some("yes please"), "active").is_err());
    }

    #[test]
    fn normalize_date_accepts_plain_dates_and_timestamps() {
        assert_eq!(
            normalize_date("receptionDate", "2024-03-05").unwrap(),
            "2024-03-05T00:00:00Z"
        );
        assert_eq!(
            normalize_date("receptionDate", "2024-03-05T10:30:00+02:00").unwrap(),
            "2024-03-05T08:30:00Z"
        );
        let err = normalize_date("receptionDate", "05/03/2024").unwrap_err();
        assert!(err.to_string().contains("receptionDate"));
    }

    #[test]
    fn nullable_date_distinguishes_absent_null_and_value() {
        assert_eq!(nullable_date("d", None).unwrap(), None);
        assert_eq!(nullable_date("d", Some(None)).unwrap(), Some(None));
        assert_eq!(
            nullable_date("d", Some(Some("2024-01-02".to_string()))).unwrap(),
            Some(Some("2024-01-02T00:00:00Z".to_string()))
        );
    }

    #[test]
    fn dedup_ids_keeps_first_occurrence_order() {
        assert_eq!(dedup_ids(vec![3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }

    #[test]
    fn optional_text_drops_blank_values() {
        assert_eq!(optional_text(Some("  ".to_string())), None);
        assert_eq!(optional_text(Some(" a ".to_string())), Some("a".to_string()));
        assert_eq!(optional_text(None), None);
    }
}
