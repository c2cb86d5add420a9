use adminkit_handler::{ValidationError, Validators};
use adminkit_model::Value;
use pretty_assertions::assert_eq;

fn message(result: Result<(), ValidationError>) -> String {
    result.unwrap_err().message().to_string()
}

// ── ValidationError ──────────────────────────────────────────────

#[test]
fn validation_error_stores_message_and_field() {
    let err = ValidationError::for_field("Bad value", "title");
    assert_eq!(err.message(), "Bad value");
    assert_eq!(err.field(), Some("title"));
    assert_eq!(err.to_string(), "Bad value");
}

#[test]
fn validation_error_field_is_optional() {
    assert_eq!(ValidationError::new("x").field(), None);
}

#[test]
fn assign_field_is_first_write_wins() {
    let mut err = ValidationError::new("x");
    err.assign_field("first").assign_field("second");
    assert_eq!(err.field(), Some("first"));

    let mut preset = ValidationError::for_field("x", "own");
    preset.assign_field("other");
    assert_eq!(preset.field(), Some("own"));
}

#[test]
fn validation_error_serializes_without_missing_field() {
    let json = serde_json::to_value(ValidationError::new("Oops")).unwrap();
    assert_eq!(json, serde_json::json!({"message": "Oops"}));
}

// ── required ─────────────────────────────────────────────────────

#[test]
fn required_rejects_null_and_empty_string() {
    let required = Validators::required();
    assert_eq!(message(required(&Value::Null)), "This field is required");
    assert!(required(&Value::from("")).is_err());
}

#[test]
fn required_passes_falsy_but_present_values() {
    let required = Validators::required();
    assert!(required(&Value::Int(0)).is_ok());
    assert!(required(&Value::Bool(false)).is_ok());
    assert!(required(&Value::from("0")).is_ok());
    assert!(required(&Value::from("hello")).is_ok());
}

// ── Length ───────────────────────────────────────────────────────

#[test]
fn min_length() {
    let min = Validators::min_length(5);
    assert_eq!(message(min(&Value::from("abc"))), "Must be at least 5 characters");
    assert!(min(&Value::from("abcdef")).is_ok());
    assert!(min(&Value::from("abcde")).is_ok());
}

#[test]
fn max_length() {
    let max = Validators::max_length(5);
    assert_eq!(
        message(max(&Value::from("abcdefghij"))),
        "Must be no more than 5 characters"
    );
    assert!(max(&Value::from("abc")).is_ok());
}

#[test]
fn length_counts_characters_not_bytes() {
    assert!(Validators::max_length(4)(&Value::from("héllo")).is_err());
    assert!(Validators::max_length(5)(&Value::from("héllo")).is_ok());
}

#[test]
fn length_ignores_non_strings() {
    assert!(Validators::min_length(5)(&Value::Int(1)).is_ok());
    assert!(Validators::max_length(1)(&Value::Int(123_456)).is_ok());
    assert!(Validators::min_length(5)(&Value::Null).is_ok());
}

// ── Numeric bounds ───────────────────────────────────────────────

#[test]
fn min_bound() {
    let min = Validators::min(10.0);
    assert_eq!(message(min(&Value::Int(5))), "Must be at least 10");
    assert!(min(&Value::Int(15)).is_ok());
    assert!(min(&Value::Int(10)).is_ok());
}

#[test]
fn min_works_with_floats() {
    let min = Validators::min(1.5);
    assert_eq!(message(min(&Value::Float(1.0))), "Must be at least 1.5");
    assert!(min(&Value::Float(2.0)).is_ok());
}

#[test]
fn max_bound() {
    let max = Validators::max(100.0);
    assert_eq!(message(max(&Value::Int(150))), "Must be no more than 100");
    assert!(max(&Value::Int(50)).is_ok());
}

#[test]
fn bounds_apply_to_numeric_strings_only() {
    assert!(Validators::min(10.0)(&Value::from("5")).is_err());
    assert!(Validators::min(10.0)(&Value::from("abc")).is_ok());
    assert!(Validators::max(0.0)(&Value::Bool(true)).is_ok());
}

// ── one_of ───────────────────────────────────────────────────────

#[test]
fn one_of_rejects_value_not_in_list() {
    let check = Validators::one_of(["draft", "published"]);
    assert_eq!(
        message(check(&Value::from("archived"))),
        "Must be one of: draft, published"
    );
    assert!(check(&Value::from("draft")).is_ok());
}

#[test]
fn one_of_uses_strict_comparison() {
    let check = Validators::one_of([1_i64, 2, 3]);
    assert!(check(&Value::Int(1)).is_ok());
    assert!(check(&Value::from("1")).is_err());
    assert!(check(&Value::Float(1.0)).is_err());
}

// ── email ────────────────────────────────────────────────────────

#[test]
fn email_rejects_invalid_addresses() {
    let email = Validators::email();
    assert_eq!(message(email(&Value::from("not-an-email"))), "Invalid email address");
    assert!(email(&Value::from("missing@tld")).is_err());
    assert!(email(&Value::from("@example.com")).is_err());
    assert!(email(&Value::from("two@@example.com")).is_err());
    assert!(email(&Value::Int(42)).is_err());
}

#[test]
fn email_passes_valid_addresses() {
    let email = Validators::email();
    assert!(email(&Value::from("test@example.com")).is_ok());
    assert!(email(&Value::from("first.last+tag@mail.example.org")).is_ok());
}

#[test]
fn email_passes_empty_values() {
    let email = Validators::email();
    assert!(email(&Value::from("")).is_ok());
    assert!(email(&Value::Null).is_ok());
}
