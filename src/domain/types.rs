//! Domain data types returned by repositories and serialized by the API.
//!
//! All wire representations are camelCase.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Account role. Readers borrow books; staff and admins run the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
    Reader,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::Reader => "reader",
        }
    }

    /// Whether this role may modify catalogue and lending data.
    pub fn can_write(&self) -> bool {
        matches!(self, Role::Admin | Role::Staff)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "staff" => Ok(Role::Staff),
            "reader" => Ok(Role::Reader),
            other => Err(format!("Unknown role '{}'", other)),
        }
    }
}

/// Identity fields of a reader, embedded in assignments, orders and history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderSummary {
    pub id: i32,
    pub name: String,
    pub first_name: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub id: i32,
    pub title: String,
    pub author: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: i32,
    pub order_date: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub first_name: Option<String>,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub id: i32,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreSummary {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub narrator: Option<String>,
    pub summary: Option<String>,
    pub isbn: Option<String>,
    pub duration_minutes: Option<i32>,
    pub cover_path: Option<String>,
    pub audio_path: Option<String>,
    pub genres: Vec<GenreSummary>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i32,
    pub reader: ReaderSummary,
    pub book: BookSummary,
    pub order_date: String,
    pub notes: Option<String>,
    pub created_at: String,
}

/// An assignment joined with its reader, catalogue item, order and status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: i32,
    pub reader: ReaderSummary,
    pub catalogue: BookSummary,
    pub order: Option<OrderSummary>,
    pub status: Status,
    pub reception_date: Option<String>,
    pub sent_to_reader_date: Option<String>,
    #[serde(rename = "returnedToECADate")]
    pub returned_to_eca_date: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// One entry of an assignment's reader history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentReaderEntry {
    pub id: i32,
    pub assignment_id: i32,
    pub assigned_date: String,
    pub notes: Option<String>,
    pub reader: ReaderSummary,
}

/// A curated collection ("coup de coeur") with its current book membership.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoupDeCoeur {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub audio_path: Option<String>,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipCheck {
    pub coup_de_coeur_id: i32,
    pub book_id: i32,
    pub exists: bool,
}
