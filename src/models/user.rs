use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct User {
    pub id: i32,
    pub given_name: String,
    pub paternal_surname: String,
    pub maternal_surname: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub postal_code: Option<i32>,
    pub neighborhood: Option<String>,
    pub street: Option<String>,
    pub street_number: Option<i32>,
    pub sex: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[serde(serialize_with = "serialize_avatar")]
    pub avatar: Option<Vec<u8>>,
    pub role_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the caller when registering. The password is already hashed.
pub struct NewUser<'a> {
    pub id: i32,
    pub given_name: &'a str,
    pub paternal_surname: &'a str,
    pub maternal_surname: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub postal_code: Option<i32>,
    pub neighborhood: Option<&'a str>,
    pub street: Option<&'a str>,
    pub street_number: Option<i32>,
    pub sex: Option<&'a str>,
    pub date_of_birth: Option<NaiveDate>,
    pub avatar: Option<&'a [u8]>,
    pub role_id: i32,
}

fn serialize_avatar<S: Serializer>(avatar: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
    match avatar {
        Some(bytes) => s.serialize_some(&BASE64.encode(bytes)),
        None => s.serialize_none(),
    }
}

/// Decode a base64 avatar payload. A leading data-URL header
/// (`data:image/png;base64,`) is stripped.
pub fn decode_avatar(payload: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let data = match payload.split_once("base64,") {
        Some((header, rest)) if header.starts_with("data:") => rest,
        _ => payload,
    };
    BASE64.decode(data.trim())
}
