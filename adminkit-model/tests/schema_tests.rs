use adminkit_model::{FieldDef, FieldKind, Record, Schema, Value};
use pretty_assertions::assert_eq;

fn make_item_schema() -> Schema {
    Schema::new()
        .string("title")
        .integer("count")
        .boolean("is_active")
}

// ── Field declaration ────────────────────────────────────────────

#[test]
fn empty_schema_has_no_fields() {
    let s = Schema::new();
    assert!(s.is_empty());
    assert_eq!(s.len(), 0);
}

#[test]
fn shorthands_declare_matching_kinds() {
    let s = make_item_schema();
    assert_eq!(s.kind_of("title"), Some(FieldKind::String));
    assert_eq!(s.kind_of("count"), Some(FieldKind::Integer));
    assert_eq!(s.kind_of("is_active"), Some(FieldKind::Boolean));
}

#[test]
fn add_field_is_chainable() {
    let s = Schema::new()
        .add_field(FieldKind::String, "a")
        .add_field(FieldKind::Integer, "b");
    assert_eq!(s.len(), 2);
}

#[test]
fn fields_keep_declaration_order() {
    let s = Schema::new().boolean("z").string("a").integer("m");
    let slugs: Vec<&str> = s.slugs().collect();
    assert_eq!(slugs, vec!["z", "a", "m"]);
}

#[test]
fn fields_expose_definitions() {
    let s = Schema::new().string("title");
    assert_eq!(
        s.fields(),
        &[FieldDef {
            slug: "title".to_string(),
            kind: FieldKind::String
        }]
    );
}

#[test]
fn redeclaring_slug_replaces_kind_in_place() {
    let s = Schema::new().string("a").string("b").integer("a");
    let slugs: Vec<&str> = s.slugs().collect();
    assert_eq!(slugs, vec!["a", "b"]);
    assert_eq!(s.kind_of("a"), Some(FieldKind::Integer));
}

#[test]
fn has_field_checks_membership() {
    let s = make_item_schema();
    assert!(s.has_field("title"));
    assert!(!s.has_field("nonexistent"));
    assert_eq!(s.kind_of("nonexistent"), None);
}

#[test]
fn field_kind_display() {
    assert_eq!(FieldKind::String.to_string(), "string");
    assert_eq!(FieldKind::Integer.to_string(), "integer");
    assert_eq!(FieldKind::Boolean.to_string(), "boolean");
}

#[test]
fn field_kind_serializes_snake_case() {
    let json = serde_json::to_string(&FieldKind::Boolean).unwrap();
    assert_eq!(json, "\"boolean\"");
    let back: FieldKind = serde_json::from_str("\"integer\"").unwrap();
    assert_eq!(back, FieldKind::Integer);
}

// ── String coercion ──────────────────────────────────────────────

#[test]
fn string_field_stringifies_integers() {
    let s = Schema::new().string("value");
    assert_eq!(s.coerce("value", Value::Int(123)), Value::from("123"));
}

#[test]
fn string_field_stringifies_booleans() {
    let s = Schema::new().string("value");
    assert_eq!(s.coerce("value", Value::Bool(true)), Value::from("1"));
    assert_eq!(s.coerce("value", Value::Bool(false)), Value::from(""));
}

#[test]
fn string_field_stringifies_null_as_empty() {
    let s = Schema::new().string("value");
    assert_eq!(s.coerce("value", Value::Null), Value::from(""));
}

#[test]
fn string_field_keeps_strings() {
    let s = Schema::new().string("value");
    assert_eq!(s.coerce("value", Value::from("<b>hi</b>")), Value::from("<b>hi</b>"));
}

#[test]
fn string_field_renders_whole_floats_without_fraction() {
    let s = Schema::new().string("value");
    assert_eq!(s.coerce("value", Value::Float(5.0)), Value::from("5"));
    assert_eq!(s.coerce("value", Value::Float(2.5)), Value::from("2.5"));
}

// ── Integer coercion ─────────────────────────────────────────────

#[test]
fn integer_field_parses_numeric_strings() {
    let s = Schema::new().integer("count");
    assert_eq!(s.coerce("count", Value::from("42")), Value::Int(42));
    assert_eq!(s.coerce("count", Value::from(" -7 ")), Value::Int(-7));
}

#[test]
fn integer_field_truncates_fractional_input() {
    let s = Schema::new().integer("count");
    assert_eq!(s.coerce("count", Value::from("5.9")), Value::Int(5));
    assert_eq!(s.coerce("count", Value::Float(-3.7)), Value::Int(-3));
    assert_eq!(s.coerce("count", Value::from("1e3")), Value::Int(1000));
}

#[test]
fn integer_field_falls_back_to_zero() {
    let s = Schema::new().integer("count");
    assert_eq!(s.coerce("count", Value::from("abc")), Value::Int(0));
    assert_eq!(s.coerce("count", Value::from("12abc")), Value::Int(0));
    assert_eq!(s.coerce("count", Value::from("")), Value::Int(0));
    assert_eq!(s.coerce("count", Value::from("NaN")), Value::Int(0));
    assert_eq!(s.coerce("count", Value::Null), Value::Int(0));
}

#[test]
fn integer_field_maps_booleans_to_zero_and_one() {
    let s = Schema::new().integer("count");
    assert_eq!(s.coerce("count", Value::Bool(true)), Value::Int(1));
    assert_eq!(s.coerce("count", Value::Bool(false)), Value::Int(0));
}

#[test]
fn integer_field_saturates_huge_floats() {
    let s = Schema::new().integer("count");
    assert_eq!(s.coerce("count", Value::Float(1e300)), Value::Int(i64::MAX));
    assert_eq!(s.coerce("count", Value::Float(f64::INFINITY)), Value::Int(0));
}

// ── Boolean coercion ─────────────────────────────────────────────

#[test]
fn boolean_field_accepts_truthy_strings_case_insensitively() {
    let s = Schema::new().boolean("flag");
    for input in ["1", "true", "TRUE", "yes", "Yes", "on", "ON"] {
        assert_eq!(s.coerce("flag", Value::from(input)), Value::Bool(true), "{input}");
    }
}

#[test]
fn boolean_field_rejects_other_strings() {
    let s = Schema::new().boolean("flag");
    for input in ["0", "false", "no", "off", "", " yes", "2"] {
        assert_eq!(s.coerce("flag", Value::from(input)), Value::Bool(false), "{input}");
    }
}

#[test]
fn boolean_field_passes_booleans_through() {
    let s = Schema::new().boolean("flag");
    assert_eq!(s.coerce("flag", Value::Bool(true)), Value::Bool(true));
    assert_eq!(s.coerce("flag", Value::Bool(false)), Value::Bool(false));
}

#[test]
fn boolean_field_casts_numbers_by_truthiness() {
    let s = Schema::new().boolean("flag");
    assert_eq!(s.coerce("flag", Value::Int(0)), Value::Bool(false));
    assert_eq!(s.coerce("flag", Value::Int(-2)), Value::Bool(true));
    assert_eq!(s.coerce("flag", Value::Float(0.5)), Value::Bool(true));
    assert_eq!(s.coerce("flag", Value::Null), Value::Bool(false));
}

// ── Unknown slugs ────────────────────────────────────────────────

#[test]
fn unknown_slug_passes_value_through() {
    let s = make_item_schema();
    assert_eq!(s.coerce("typo", Value::from("5")), Value::from("5"));
    assert_eq!(s.coerce("typo", Value::Float(1.5)), Value::Float(1.5));
    assert_eq!(s.coerce("typo", Value::Null), Value::Null);
}

#[test]
fn coerce_record_converts_known_fields_and_keeps_order() {
    let s = make_item_schema();
    let mut data = Record::new();
    data.insert("is_active".into(), Value::from("yes"));
    data.insert("extra".into(), Value::from("x"));
    data.insert("count".into(), Value::from("5"));

    let coerced = s.coerce_record(data);
    let keys: Vec<&str> = coerced.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["is_active", "extra", "count"]);
    assert_eq!(coerced["is_active"], Value::Bool(true));
    assert_eq!(coerced["extra"], Value::from("x"));
    assert_eq!(coerced["count"], Value::Int(5));
}
