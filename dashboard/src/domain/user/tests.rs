//! Tests for the user identity and profile model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn profile_json() -> serde_json::Value {
    json!({
        "id": "u1",
        "firstName": "Somchai",
        "lastName": "Dee",
        "email": "somchai@example.com",
        "smallStars": 4,
        "bigStars": 2
    })
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case(" u1", UserValidationError::InvalidId)]
#[case("u1\n", UserValidationError::InvalidId)]
fn user_id_rejects_malformed_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
#[case(None, None)]
#[case(Some(""), None)]
#[case(Some(" padded "), None)]
#[case(Some("u7"), Some("u7"))]
fn references_resolve_leniently(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
    let resolved = UserId::from_reference(raw.map(str::to_owned));
    assert_eq!(resolved.as_ref().map(AsRef::as_ref), expected);
}

#[rstest]
fn profile_defaults_role_and_picture(profile_json: serde_json::Value) {
    let profile: UserProfile = serde_json::from_value(profile_json).expect("valid profile");

    assert_eq!(profile.role().as_ref(), DEFAULT_ROLE);
    assert_eq!(profile.role().css_class(), "officer");
    assert!(profile.profile_picture_url().is_none());
    assert_eq!(profile.display_name(), "Somchai Dee");
    assert_eq!((profile.small_stars(), profile.big_stars()), (4, 2));
}

#[rstest]
fn blank_role_falls_back_to_default(mut profile_json: serde_json::Value) {
    profile_json["role"] = json!("  ");
    let profile: UserProfile = serde_json::from_value(profile_json).expect("valid profile");
    assert_eq!(profile.role(), &Role::default());
}

#[rstest]
#[case("firstName", "first name must not be empty")]
#[case("lastName", "last name must not be empty")]
#[case("email", "email must not be empty")]
fn profile_rejects_blank_required_fields(
    mut profile_json: serde_json::Value,
    #[case] field: &str,
    #[case] message: &str,
) {
    profile_json[field] = json!(" ");
    let err = serde_json::from_value::<UserProfile>(profile_json).expect_err("blank field");
    assert!(err.to_string().contains(message), "unexpected error: {err}");
}

#[rstest]
fn profile_rejects_missing_required_fields(mut profile_json: serde_json::Value) {
    profile_json
        .as_object_mut()
        .expect("object")
        .remove("email");
    let err = serde_json::from_value::<UserProfile>(profile_json).expect_err("missing email");
    assert!(err.to_string().contains("email"), "unexpected error: {err}");
}

#[rstest]
fn renaming_keeps_existing_picture_unless_replaced(profile_json: serde_json::Value) {
    let profile: UserProfile = serde_json::from_value(profile_json).expect("valid profile");
    let with_picture = profile.with_names_and_picture("A", "B", Some("pic.png".to_owned()));
    let renamed = with_picture.with_names_and_picture("C", "D", None);

    assert_eq!(renamed.display_name(), "C D");
    assert_eq!(renamed.profile_picture_url(), Some("pic.png"));
    assert_eq!(renamed.email(), "somchai@example.com");
}

#[rstest]
fn profile_serialises_camel_case(profile_json: serde_json::Value) {
    let profile: UserProfile = serde_json::from_value(profile_json).expect("valid profile");
    let value = serde_json::to_value(&profile).expect("serialise");
    assert_eq!(value["firstName"], "Somchai");
    assert_eq!(value["role"], DEFAULT_ROLE);
    assert_eq!(value["smallStars"], 4);
}
