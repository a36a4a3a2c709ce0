//! Schema normalization for upstream LMS records
//!
//! The remote API has shipped several payload generations, so the same
//! concept appears under different field names depending on which version
//! produced the record. These adapters are pure functions from a raw JSON
//! record to the canonical shape: dedicated fields win over generic ones,
//! missing optionals become empty strings, and only a missing upstream id
//! is an error because it is the sole reconciliation join key.

use chrono::{DateTime, Utc};
use edulink_domain::{
    CanonicalCourse, CanonicalEnrollment, CanonicalUser, EdulinkError, EnrollmentStatus, Result,
};
use serde_json::Value;

/// A raw record as received from the LMS, tagged by kind. The sole entry
/// point into normalization: the client wraps each raw payload here and
/// everything downstream works on canonical types only.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamRecord {
    Course(Value),
    User(Value),
    Enrollment(Value),
}

impl UpstreamRecord {
    /// Normalize a course record. Errors when the tag is not `Course`.
    pub fn into_course(self) -> Result<CanonicalCourse> {
        match self {
            Self::Course(raw) => course_from_raw(&raw),
            other => Err(other.kind_mismatch("course")),
        }
    }

    /// Normalize a user record. Errors when the tag is not `User`.
    pub fn into_user(self) -> Result<CanonicalUser> {
        match self {
            Self::User(raw) => user_from_raw(&raw),
            other => Err(other.kind_mismatch("user")),
        }
    }

    /// Normalize an enrollment record. Errors when the tag is not
    /// `Enrollment`.
    pub fn into_enrollment(self) -> Result<CanonicalEnrollment> {
        match self {
            Self::Enrollment(raw) => enrollment_from_raw(&raw),
            other => Err(other.kind_mismatch("enrollment")),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Course(_) => "course",
            Self::User(_) => "user",
            Self::Enrollment(_) => "enrollment",
        }
    }

    fn kind_mismatch(&self, expected: &str) -> EdulinkError {
        EdulinkError::Internal(format!("expected {expected} record, got {}", self.kind()))
    }
}

fn course_from_raw(raw: &Value) -> Result<CanonicalCourse> {
    Ok(CanonicalCourse {
        id: String::new(),
        title: first_string(raw, &["title", "name"]),
        description: first_string(raw, &["description", "summary"]),
        image_url: first_string(raw, &["image_url", "image", "cover"]),
        price_total: first_number(raw, &["price_total", "price", "amount"]),
        price_monthly: first_number(raw, &["price_monthly", "installment_price"]),
        duration_label: first_string(raw, &["duration_label", "duration", "workload"]),
        external_id: require_external_id(raw, "course")?,
    })
}

/// Older payloads carry a single composed `name` field; newer ones carry
/// dedicated given/family fields.
fn user_from_raw(raw: &Value) -> Result<CanonicalUser> {
    let (first_name, last_name) = adapt_name(raw);

    Ok(CanonicalUser {
        id: String::new(),
        first_name,
        last_name,
        email: first_string(raw, &["email", "mail"]),
        phone: first_string(raw, &["phone", "phone_number", "cellphone"]),
        tax_id: first_string(raw, &["tax_id", "document", "cpf"]),
        external_id: require_external_id(raw, "user")?,
        offline: false,
    })
}

/// Unrecognized status strings default to inactive rather than failing the
/// whole record.
fn enrollment_from_raw(raw: &Value) -> Result<CanonicalEnrollment> {
    let status = match first_string(raw, &["status", "state"]).to_lowercase().as_str() {
        "active" | "enrolled" => EnrollmentStatus::Active,
        "completed" | "finished" => EnrollmentStatus::Completed,
        _ => EnrollmentStatus::Inactive,
    };

    Ok(CanonicalEnrollment {
        id: String::new(),
        student_external_id: first_id(raw, &["student_id", "user_id", "member_id"]),
        course_external_id: first_id(raw, &["course_id", "product_id"]),
        status,
        enrollment_date: first_date(raw, &["enrollment_date", "enrolled_at", "created_at"])
            .unwrap_or_else(Utc::now),
        expiration_date: first_date(raw, &["expiration_date", "expires_at", "valid_until"]),
    })
}

/// Extract pagination metadata from an upstream list envelope, tolerating
/// both naming generations (`total`/`pages` and `totalItems`/`totalPages`).
pub fn adapt_page_meta(raw: &Value) -> (u32, u32) {
    let total_items = first_number(raw, &["total", "totalItems", "total_items"]) as u32;
    let total_pages = first_number(raw, &["pages", "totalPages", "total_pages"]) as u32;
    (total_items, total_pages.max(1))
}

fn adapt_name(raw: &Value) -> (String, String) {
    let first = first_string(raw, &["first_name", "given_name"]);
    let last = first_string(raw, &["last_name", "family_name"]);
    if !first.is_empty() || !last.is_empty() {
        return (first, last);
    }

    // Fall back to splitting a composed display name on the first space.
    let composed = first_string(raw, &["name", "full_name"]);
    match composed.split_once(' ') {
        Some((head, tail)) => (head.to_string(), tail.trim().to_string()),
        None => (composed, String::new()),
    }
}

fn require_external_id(raw: &Value, kind: &str) -> Result<String> {
    let id = first_id(raw, &["id", "external_id"]);
    if id.is_empty() {
        return Err(EdulinkError::MalformedResponse(format!(
            "upstream {kind} record has no id"
        )));
    }
    Ok(id)
}

/// First present field from the chain, stringified. Upstream ids arrive as
/// numbers in some payload generations and strings in others.
fn first_id(raw: &Value, fields: &[&str]) -> String {
    for field in fields {
        match raw.get(field) {
            Some(Value::String(s)) if !s.is_empty() => return s.clone(),
            Some(Value::Number(n)) => return n.to_string(),
            _ => {}
        }
    }
    String::new()
}

fn first_string(raw: &Value, fields: &[&str]) -> String {
    for field in fields {
        if let Some(Value::String(s)) = raw.get(field) {
            if !s.is_empty() {
                return s.clone();
            }
        }
    }
    String::new()
}

fn first_number(raw: &Value, fields: &[&str]) -> f64 {
    for field in fields {
        match raw.get(field) {
            Some(Value::Number(n)) => return n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => {
                if let Ok(parsed) = s.parse::<f64>() {
                    return parsed;
                }
            }
            _ => {}
        }
    }
    0.0
}

fn first_date(raw: &Value, fields: &[&str]) -> Option<DateTime<Utc>> {
    for field in fields {
        if let Some(Value::String(s)) = raw.get(field) {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
                return Some(parsed.with_timezone(&Utc));
            }
        }
    }
    None
}
