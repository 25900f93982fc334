//! Person and contact record types.
//!
//! Three shapes move through the gateway: `Person` is what the upstream
//! people API returns on reads, `PersonForm` is what the form codec produces
//! from a submission, and `PersonPayload` is what create/update calls send
//! upstream (collections under the nested `*_attributes` names).

use serde::{Deserialize, Deserializer, Serialize};

use crate::contact::primary;

/// A single email row within a person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailEntry {
    /// Upstream row identifier; absent for rows created in the form
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_opt_id"
    )]
    pub id: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_primary: bool,
}

impl Default for EmailEntry {
    fn default() -> Self {
        Self {
            id: None,
            email: String::new(),
            is_primary: false,
        }
    }
}

/// A single phone number row within a person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneEntry {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_opt_id"
    )]
    pub id: Option<String>,
    #[serde(default)]
    pub mobile_number: String,
    #[serde(default)]
    pub is_primary: bool,
}

impl Default for PhoneEntry {
    fn default() -> Self {
        Self {
            id: None,
            mobile_number: String::new(),
            is_primary: false,
        }
    }
}

/// A single address row within a person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressEntry {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_opt_id"
    )]
    pub id: Option<String>,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub landmark: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub is_primary: bool,
}

impl Default for AddressEntry {
    fn default() -> Self {
        Self {
            id: None,
            street: String::new(),
            city: String::new(),
            state: String::new(),
            country: String::new(),
            landmark: String::new(),
            postal_code: String::new(),
            is_primary: false,
        }
    }
}

/// Person record as returned by the upstream people API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Person {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub emails: Vec<EmailEntry>,
    /// Upstream names this collection `phone_numbers`
    #[serde(default)]
    pub phone_numbers: Vec<PhoneEntry>,
    #[serde(default)]
    pub addresses: Vec<AddressEntry>,
    /// Soft-delete timestamp; non-null means the record is deleted
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Person {
    /// Full display name, first name then last name.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether the record has been soft-deleted upstream.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Reshapes the upstream record for the edit screen: collections under
    /// their form group names, row ids kept so updates correlate upstream.
    pub fn into_form(self) -> PersonForm {
        PersonForm {
            id: Some(self.id),
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            emails: self.emails,
            phones: self.phone_numbers,
            addresses: self.addresses,
        }
    }

    /// Reshapes the upstream record into a list row.
    pub fn into_summary(self) -> PersonSummary {
        let name = self.display_name();
        let deleted = self.is_deleted();
        let primary_email = primary(&self.emails).map(|e| e.email.clone());
        let primary_phone = primary(&self.phone_numbers).map(|p| p.mobile_number.clone());
        PersonSummary {
            id: self.id,
            name,
            date_of_birth: self.date_of_birth,
            primary_email,
            primary_phone,
            emails: self.emails,
            phones: self.phone_numbers,
            addresses: self.addresses,
            deleted,
        }
    }
}

/// Structured person record decoded from a form submission.
///
/// Request-scoped: built fresh per decode, forwarded, then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersonForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub emails: Vec<EmailEntry>,
    #[serde(default)]
    pub phones: Vec<PhoneEntry>,
    #[serde(default)]
    pub addresses: Vec<AddressEntry>,
}

impl PersonForm {
    /// Converts the form record into the upstream write shape.
    pub fn into_payload(self) -> PersonPayload {
        PersonPayload {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            emails_attributes: self.emails,
            phone_numbers_attributes: self.phones,
            addresses_attributes: self.addresses,
        }
    }
}

/// Create/update body for the upstream people API.
///
/// The upstream service accepts nested rows under `*_attributes` keys, so
/// the three form collections are renamed here and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub emails_attributes: Vec<EmailEntry>,
    pub phone_numbers_attributes: Vec<PhoneEntry>,
    pub addresses_attributes: Vec<AddressEntry>,
}

/// List row served by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonSummary {
    pub id: String,
    /// Display name (first and last name joined)
    pub name: String,
    pub date_of_birth: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_phone: Option<String>,
    pub emails: Vec<EmailEntry>,
    pub phones: Vec<PhoneEntry>,
    pub addresses: Vec<AddressEntry>,
    pub deleted: bool,
}

/// Accepts upstream ids as either JSON numbers or strings.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Num(i64),
        Str(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Num(n) => n.to_string(),
        RawId::Str(s) => s,
    })
}

fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Num(i64),
        Str(String),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Num(n) => n.to_string(),
        RawId::Str(s) => s,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_person() -> Person {
        serde_json::from_value(serde_json::json!({
            "id": 7,
            "first_name": "Akshay",
            "last_name": "Donga",
            "date_of_birth": "1990-01-01",
            "emails": [
                {"id": 11, "email": "a@x.com", "is_primary": false},
                {"id": 12, "email": "b@x.com", "is_primary": true}
            ],
            "phone_numbers": [
                {"id": 21, "mobile_number": "555-0100", "is_primary": true}
            ],
            "addresses": [],
            "deleted_at": null
        }))
        .unwrap()
    }

    #[test]
    fn numeric_ids_deserialize_as_strings() {
        let person = sample_person();
        assert_eq!(person.id, "7");
        assert_eq!(person.emails[0].id.as_deref(), Some("11"));
        assert_eq!(person.phone_numbers[0].id.as_deref(), Some("21"));
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let person: Person = serde_json::from_value(serde_json::json!({
            "id": "3",
            "first_name": "Ankit",
            "last_name": "Patel"
        }))
        .unwrap();
        assert!(person.emails.is_empty());
        assert!(person.phone_numbers.is_empty());
        assert!(person.addresses.is_empty());
        assert!(!person.is_deleted());
    }

    #[test]
    fn summary_joins_name_and_flags_deletion() {
        let mut person = sample_person();
        person.deleted_at = Some("2026-01-01T00:00:00Z".to_string());
        let summary = person.into_summary();
        assert_eq!(summary.name, "Akshay Donga");
        assert!(summary.deleted);
        assert_eq!(summary.primary_email.as_deref(), Some("b@x.com"));
        assert_eq!(summary.primary_phone.as_deref(), Some("555-0100"));
        assert_eq!(summary.phones.len(), 1);
    }

    #[test]
    fn form_reshape_keeps_row_ids() {
        let form = sample_person().into_form();
        assert_eq!(form.id.as_deref(), Some("7"));
        assert_eq!(form.phones.len(), 1);
        assert_eq!(form.phones[0].id.as_deref(), Some("21"));
    }

    #[test]
    fn payload_moves_collections_to_attributes_keys() {
        let form = PersonForm {
            first_name: "Akshay".to_string(),
            emails: vec![EmailEntry {
                email: "a@x.com".to_string(),
                is_primary: true,
                ..Default::default()
            }],
            ..Default::default()
        };
        let json = serde_json::to_value(form.into_payload()).unwrap();
        assert!(json.get("emails").is_none());
        assert_eq!(json["emails_attributes"][0]["email"], "a@x.com");
        assert_eq!(json["phone_numbers_attributes"], serde_json::json!([]));
        assert_eq!(json["addresses_attributes"], serde_json::json!([]));
        // no id submitted, so none serialized
        assert!(json.get("id").is_none());
    }

    #[test]
    fn new_rows_serialize_without_id() {
        let entry = EmailEntry {
            email: "a@x.com".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("id").is_none());
    }
}
