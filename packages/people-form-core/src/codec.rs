//! Nested form-field codec.
//!
//! Form controls name repeating contact rows with bracketed paths
//! (`emails[0].email`, `addresses[2].is_primary`). [`decode`] rebuilds a
//! structured [`PersonForm`] from the flat submission pairs; [`encode`]
//! produces the flat names a renderer must emit so that a later decode
//! round-trips the record.
//!
//! The codec is a pure structural transform: it never validates field
//! content and never fails. Keys that do not match the
//! `group[index].field` grammar fall back to top-level scalar assignment,
//! and unrecognized names are dropped.

use tracing::trace;

use crate::model::{AddressEntry, EmailEntry, PersonForm, PhoneEntry};

/// Value browsers submit for a checked checkbox; anything else means false.
pub const CHECKBOX_ON: &str = "on";

/// The three repeating contact groups a person record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactGroup {
    Emails,
    Phones,
    Addresses,
}

impl ContactGroup {
    /// Resolves a group token from a field name, if it names a known group.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "emails" => Some(Self::Emails),
            "phones" => Some(Self::Phones),
            "addresses" => Some(Self::Addresses),
            _ => None,
        }
    }

    /// Group token as it appears in field names.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Emails => "emails",
            Self::Phones => "phones",
            Self::Addresses => "addresses",
        }
    }
}

/// Parsed form of a submitted field name.
#[derive(Debug, PartialEq, Eq)]
struct FieldPath<'a> {
    group: &'a str,
    index: Option<usize>,
    field: Option<&'a str>,
}

impl<'a> FieldPath<'a> {
    /// Splits `group[index].field` into its parts.
    ///
    /// Anything that does not match the grammar (unclosed bracket,
    /// non-numeric index, junk between `]` and `.`) comes back as a bare
    /// scalar path carrying the whole key as the group.
    fn parse(key: &'a str) -> Self {
        let scalar = Self {
            group: key,
            index: None,
            field: None,
        };
        let Some(open) = key.find('[') else {
            return scalar;
        };
        let Some(close) = key[open..].find(']').map(|i| open + i) else {
            return scalar;
        };
        let Ok(index) = key[open + 1..close].parse::<usize>() else {
            return scalar;
        };
        let rest = &key[close + 1..];
        let field = if rest.is_empty() {
            None
        } else {
            match rest.strip_prefix('.') {
                Some(f) if !f.is_empty() => Some(f),
                _ => return scalar,
            }
        };
        Self {
            group: &key[..open],
            index: Some(index),
            field,
        }
    }
}

/// Rebuilds a structured person record from flat submission pairs.
///
/// Scalar keys assign top-level attributes, last occurrence winning.
/// Bracketed keys grow the named contact collection with default rows up to
/// the given index (sparse indices compact densely) and set one attribute
/// on the row. `is_primary` attributes are true only for the literal
/// checkbox sentinel `"on"`; every other attribute passes through as the
/// raw submitted string.
pub fn decode(pairs: &[(String, String)]) -> PersonForm {
    let mut form = PersonForm::default();

    for (key, value) in pairs {
        let path = FieldPath::parse(key);
        match (path.index, ContactGroup::from_token(path.group)) {
            (Some(index), Some(group)) => {
                let Some(field) = path.field else {
                    trace!(key = key.as_str(), "indexed key without attribute, dropped");
                    continue;
                };
                match group {
                    ContactGroup::Emails => {
                        set_email_field(entry_at(&mut form.emails, index), field, value);
                    }
                    ContactGroup::Phones => {
                        set_phone_field(entry_at(&mut form.phones, index), field, value);
                    }
                    ContactGroup::Addresses => {
                        set_address_field(entry_at(&mut form.addresses, index), field, value);
                    }
                }
            }
            // Everything else degrades to a top-level scalar assignment.
            _ => assign_scalar(&mut form, key, value),
        }
    }

    form
}

/// Produces the flat field pairs a renderer must emit for `form`.
///
/// This is the inverse naming contract of [`decode`]: attribute `f` of row
/// `i` in group `g` becomes `g[i].f`, row ids are emitted only when
/// present, and `is_primary` is emitted as `"on"` only when set (checkbox
/// semantics, absent means unchecked).
pub fn encode(form: &PersonForm) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    if let Some(id) = &form.id {
        pairs.push(("id".to_string(), id.clone()));
    }
    pairs.push(("first_name".to_string(), form.first_name.clone()));
    pairs.push(("last_name".to_string(), form.last_name.clone()));
    pairs.push(("date_of_birth".to_string(), form.date_of_birth.clone()));

    for (i, entry) in form.emails.iter().enumerate() {
        push_row_id(&mut pairs, ContactGroup::Emails, i, entry.id.as_deref());
        pairs.push((
            field_name(ContactGroup::Emails, i, "email"),
            entry.email.clone(),
        ));
        push_checkbox(&mut pairs, ContactGroup::Emails, i, entry.is_primary);
    }

    for (i, entry) in form.phones.iter().enumerate() {
        push_row_id(&mut pairs, ContactGroup::Phones, i, entry.id.as_deref());
        pairs.push((
            field_name(ContactGroup::Phones, i, "mobile_number"),
            entry.mobile_number.clone(),
        ));
        push_checkbox(&mut pairs, ContactGroup::Phones, i, entry.is_primary);
    }

    for (i, entry) in form.addresses.iter().enumerate() {
        push_row_id(&mut pairs, ContactGroup::Addresses, i, entry.id.as_deref());
        for (field, value) in [
            ("street", &entry.street),
            ("city", &entry.city),
            ("state", &entry.state),
            ("country", &entry.country),
            ("landmark", &entry.landmark),
            ("postal_code", &entry.postal_code),
        ] {
            pairs.push((field_name(ContactGroup::Addresses, i, field), value.clone()));
        }
        push_checkbox(&mut pairs, ContactGroup::Addresses, i, entry.is_primary);
    }

    pairs
}

/// Field name for attribute `field` of row `index` in `group`.
pub fn field_name(group: ContactGroup, index: usize, field: &str) -> String {
    format!("{}[{}].{}", group.as_str(), index, field)
}

fn assign_scalar(form: &mut PersonForm, key: &str, value: &str) {
    match key {
        "id" => form.id = Some(value.to_string()),
        "first_name" => form.first_name = value.to_string(),
        "last_name" => form.last_name = value.to_string(),
        "date_of_birth" => form.date_of_birth = value.to_string(),
        _ => trace!(key, "unknown scalar key, dropped"),
    }
}

fn set_email_field(entry: &mut EmailEntry, field: &str, value: &str) {
    match field {
        "id" => entry.id = Some(value.to_string()),
        "email" => entry.email = value.to_string(),
        "is_primary" => entry.is_primary = value == CHECKBOX_ON,
        _ => trace!(field, "unknown email attribute, dropped"),
    }
}

fn set_phone_field(entry: &mut PhoneEntry, field: &str, value: &str) {
    match field {
        "id" => entry.id = Some(value.to_string()),
        "mobile_number" => entry.mobile_number = value.to_string(),
        "is_primary" => entry.is_primary = value == CHECKBOX_ON,
        _ => trace!(field, "unknown phone attribute, dropped"),
    }
}

fn set_address_field(entry: &mut AddressEntry, field: &str, value: &str) {
    match field {
        "id" => entry.id = Some(value.to_string()),
        "street" => entry.street = value.to_string(),
        "city" => entry.city = value.to_string(),
        "state" => entry.state = value.to_string(),
        "country" => entry.country = value.to_string(),
        "landmark" => entry.landmark = value.to_string(),
        "postal_code" => entry.postal_code = value.to_string(),
        "is_primary" => entry.is_primary = value == CHECKBOX_ON,
        _ => trace!(field, "unknown address attribute, dropped"),
    }
}

/// Row at `index`, growing the collection with default rows as needed so
/// skipped indices never leave holes.
fn entry_at<T: Default>(entries: &mut Vec<T>, index: usize) -> &mut T {
    if entries.len() <= index {
        entries.resize_with(index + 1, T::default);
    }
    &mut entries[index]
}

fn push_row_id(
    pairs: &mut Vec<(String, String)>,
    group: ContactGroup,
    index: usize,
    id: Option<&str>,
) {
    if let Some(id) = id {
        pairs.push((field_name(group, index, "id"), id.to_string()));
    }
}

fn push_checkbox(pairs: &mut Vec<(String, String)>, group: ContactGroup, index: usize, on: bool) {
    if on {
        pairs.push((field_name(group, index, "is_primary"), CHECKBOX_ON.to_string()));
    }
}
