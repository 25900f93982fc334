//! Integration test for the full submission path: raw form-encoded body
//! through pair parsing, codec decode, and the upstream payload shape.

use people_form_core::codec::{decode, encode};
use people_form_core::form::parse_form_urlencoded;

#[test]
fn browser_submission_becomes_upstream_payload() {
    // What a browser posts for the create screen: two emails (first one
    // primary), one phone, one address, plus a stray submit control.
    let body = b"first_name=Akshay&last_name=Donga&date_of_birth=1990-01-01\
&emails%5B0%5D.email=a%40x.com&emails%5B0%5D.is_primary=on\
&emails%5B1%5D.email=b%40x.com\
&phones%5B0%5D.mobile_number=555-0100\
&addresses%5B0%5D.street=Main+St&addresses%5B0%5D.city=NY\
&addresses%5B0%5D.state=NY&addresses%5B0%5D.country=US\
&addresses%5B0%5D.landmark=&addresses%5B0%5D.postal_code=10001\
&intent=save";

    let pairs = parse_form_urlencoded(body);
    let form = decode(&pairs);

    assert_eq!(form.first_name, "Akshay");
    assert_eq!(form.emails.len(), 2);
    assert!(form.emails[0].is_primary);
    assert!(!form.emails[1].is_primary);
    assert_eq!(form.addresses[0].street, "Main St");
    assert_eq!(form.addresses[0].landmark, "");

    let json = serde_json::to_value(form.into_payload()).unwrap();
    assert_eq!(json["first_name"], "Akshay");
    assert_eq!(json["emails_attributes"][0]["email"], "a@x.com");
    assert_eq!(json["emails_attributes"][0]["is_primary"], true);
    assert_eq!(json["phone_numbers_attributes"][0]["mobile_number"], "555-0100");
    assert_eq!(json["addresses_attributes"][0]["postal_code"], "10001");
    // collections only travel under the *_attributes names
    assert!(json.get("emails").is_none());
    assert!(json.get("phones").is_none());
    assert!(json.get("addresses").is_none());
}

#[test]
fn edit_screen_fields_round_trip_through_a_resubmission() {
    // An edit screen renders the record with encode's field names; saving it
    // unchanged must decode back to the same record.
    let body = b"id=7&first_name=Akshay&last_name=Donga&date_of_birth=1990-01-01\
&emails%5B0%5D.id=11&emails%5B0%5D.email=a%40x.com&emails%5B0%5D.is_primary=on";

    let form = decode(&parse_form_urlencoded(body));
    let resubmitted = decode(&encode(&form));
    assert_eq!(resubmitted, form);
    assert_eq!(resubmitted.id.as_deref(), Some("7"));
    assert_eq!(resubmitted.emails[0].id.as_deref(), Some("11"));
}
