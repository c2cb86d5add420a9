use adminkit_handler::{
    FailureReason, HookError, Outcome, PluralHandler, ValidationError, Validators,
};
use adminkit_model::{Entity, EntityId, Record, Schema, Value};
use adminkit_object::PluralObject;
use adminkit_storage::HostStore;
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

fn schema() -> Arc<Schema> {
    Arc::new(
        Schema::new()
            .string("title")
            .integer("count")
            .boolean("is_active"),
    )
}

fn make_handler() -> PluralHandler {
    let host = HostStore::in_memory();
    let object = PluralObject::new("test_item", Box::new(host.collection_storage("test_item")))
        .with_schema(schema());
    PluralHandler::new(object)
}

fn record(pairs: &[(&str, Value)]) -> Record {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn created_id(outcome: &Outcome) -> EntityId {
    outcome.entity().and_then(Entity::id).unwrap()
}

// ── CRUD ─────────────────────────────────────────────────────────

#[test]
fn create_success_contains_entity() {
    let mut handler = make_handler();
    let outcome = handler.create(record(&[("title", Value::from("Test Item"))]));

    assert!(outcome.is_success());
    assert!(!outcome.is_error());
    let entity = outcome.entity().unwrap();
    assert!(entity.id().is_some());
    assert_eq!(entity.get("title"), Some(&Value::from("Test Item")));
}

#[test]
fn create_coerces_types_from_schema() {
    let mut handler = make_handler();
    let outcome = handler.create(record(&[
        ("title", Value::from("Valid Title")),
        ("count", Value::from("5")),
        ("is_active", Value::from("yes")),
    ]));

    assert!(outcome.is_success());
    let entity = outcome.entity().unwrap();
    assert_eq!(entity.get("count"), Some(&Value::Int(5)));
    assert_eq!(entity.get("is_active"), Some(&Value::Bool(true)));

    // Stored values are typed too.
    let stored = handler.read(entity.id().unwrap());
    assert_eq!(stored.entity().unwrap().get("count"), Some(&Value::Int(5)));
}

#[test]
fn read_returns_entity() {
    let mut handler = make_handler();
    let id = created_id(&handler.create(record(&[("title", Value::from("Read Me"))])));

    let outcome = handler.read(id);
    assert!(outcome.is_success());
    assert_eq!(outcome.entity().unwrap().get("title"), Some(&Value::from("Read Me")));
}

#[test]
fn read_nonexistent_returns_error() {
    let handler = make_handler();
    let outcome = handler.read(EntityId::new(999_999));
    assert!(outcome.is_error());
    assert!(outcome.entity().is_none());
    assert_eq!(outcome.reason(), Some(&FailureReason::NotFound));
}

#[test]
fn update_modifies_entity() {
    let mut handler = make_handler();
    let id = created_id(&handler.create(record(&[
        ("title", Value::from("Original")),
        ("count", Value::Int(1)),
    ])));

    let outcome = handler.update(id, record(&[("title", Value::from("Updated"))]));
    assert!(outcome.is_success());
    let entity = outcome.entity().unwrap();
    assert_eq!(entity.get("title"), Some(&Value::from("Updated")));
    // Untouched fields survive a partial update.
    assert_eq!(entity.get("count"), Some(&Value::Int(1)));

    let reread = handler.read(id);
    assert_eq!(reread.entity().unwrap().get("title"), Some(&Value::from("Updated")));
}

#[test]
fn update_nonexistent_returns_error() {
    let mut handler = make_handler();
    let outcome = handler.update(EntityId::new(999_999), record(&[("title", Value::from("x"))]));
    assert!(outcome.is_error());
    assert_eq!(outcome.reason(), Some(&FailureReason::NotFound));
}

#[test]
fn delete_removes_entity() {
    let mut handler = make_handler();
    let id = created_id(&handler.create(record(&[("title", Value::from("Doomed"))])));

    let outcome = handler.delete(id);
    assert!(outcome.is_success());
    assert!(handler.read(id).is_error());
}

#[test]
fn delete_nonexistent_returns_error() {
    let mut handler = make_handler();
    let outcome = handler.delete(EntityId::new(999_999));
    assert!(outcome.is_error());
    assert_eq!(outcome.reason(), Some(&FailureReason::NotFound));
}

#[test]
fn list_returns_all_entities() {
    let mut handler = make_handler();
    assert!(handler.list().is_success());
    assert!(handler.list().entities().is_empty());

    for title in ["One", "Two", "Three"] {
        handler.create(record(&[("title", Value::from(title))]));
    }
    let outcome = handler.list();
    assert!(outcome.is_success());
    assert_eq!(outcome.entities().len(), 3);
}

// ── Validation ───────────────────────────────────────────────────

#[test]
fn validation_failure_blocks_create() {
    let mut handler = make_handler();
    handler.add_validator("title", Validators::min_length(3));

    let outcome = handler.create(record(&[
        ("title", Value::from("AB")),
        ("count", Value::from("5")),
    ]));

    assert!(outcome.is_error());
    assert_eq!(outcome.reason(), Some(&FailureReason::Invalid));
    assert_eq!(outcome.field_errors("title").len(), 1);
    assert_eq!(
        outcome.field_errors("title")[0].message(),
        "Must be at least 3 characters"
    );
    assert!(handler.list().entities().is_empty());
}

#[test]
fn custom_validator_can_reject_value() {
    let mut handler = make_handler();
    handler.add_validator("title", |value: &Value| {
        if value.as_str() == Some("forbidden") {
            Err(ValidationError::new("Title is forbidden"))
        } else {
            Ok(())
        }
    });

    assert!(handler.create(record(&[("title", Value::from("forbidden"))])).is_error());
    assert!(handler.create(record(&[("title", Value::from("allowed"))])).is_success());
}

#[test]
fn every_failing_validator_is_reported() {
    let mut handler = make_handler();
    handler
        .add_validator("title", Validators::required())
        .add_validator("title", |_: &Value| Err(ValidationError::new("first")))
        .add_validator("title", |_: &Value| Err(ValidationError::new("second")))
        .add_validator("count", Validators::max(10.0));

    let outcome = handler.create(record(&[
        ("title", Value::from("ok")),
        ("count", Value::Int(50)),
    ]));

    let messages: Vec<&str> = outcome.errors().iter().map(ValidationError::message).collect();
    assert_eq!(messages, vec!["first", "second", "Must be no more than 10"]);
    assert_eq!(outcome.field_errors("count").len(), 1);
}

#[test]
fn validator_supplied_field_is_kept() {
    let mut handler = make_handler();
    handler.add_validator("title", |_: &Value| {
        Err(ValidationError::for_field("mismatch", "count"))
    });

    let outcome = handler.create(record(&[("title", Value::from("x"))]));
    assert!(outcome.field_errors("title").is_empty());
    assert_eq!(outcome.field_errors("count").len(), 1);
}

#[test]
fn absent_fields_are_not_validated() {
    let mut handler = make_handler();
    handler.add_validator("title", Validators::required());

    let outcome = handler.create(record(&[("count", Value::Int(1))]));
    assert!(outcome.is_success());
}

#[test]
fn validators_see_coerced_values() {
    let mut handler = make_handler();
    handler.add_validator("count", |value: &Value| match value {
        Value::Int(_) => Ok(()),
        _ => Err(ValidationError::new("not an integer")),
    });

    assert!(handler.create(record(&[("count", Value::from("12"))])).is_success());
}

#[test]
fn validation_runs_on_update() {
    let mut handler = make_handler();
    handler.add_validator("title", Validators::min_length(3));
    let id = created_id(&handler.create(record(&[("title", Value::from("Valid"))])));

    let outcome = handler.update(id, record(&[("title", Value::from("X"))]));
    assert!(outcome.is_error());
    assert!(!outcome.field_errors("title").is_empty());

    let stored = handler.read(id);
    assert_eq!(stored.entity().unwrap().get("title"), Some(&Value::from("Valid")));
}

// ── Hooks ────────────────────────────────────────────────────────

#[test]
fn before_create_hooks_transform_data_in_order() {
    let mut handler = make_handler();
    handler
        .before_create(|mut data| {
            data.insert("title".into(), Value::from("from first"));
            Ok(data)
        })
        .before_create(|mut data| {
            let title = data.get("title").map(Value::to_text).unwrap_or_default();
            data.insert("title".into(), Value::from(title.to_uppercase()));
            Ok(data)
        });

    let outcome = handler.create(record(&[("title", Value::from("original"))]));
    assert_eq!(
        outcome.entity().unwrap().get("title"),
        Some(&Value::from("FROM FIRST"))
    );
}

#[test]
fn after_create_receives_entity() {
    let seen: Arc<Mutex<Option<Entity>>> = Arc::default();
    let mut handler = make_handler();
    let sink = Arc::clone(&seen);
    handler.after_create(move |entity| {
        *sink.lock().unwrap() = Some(entity.clone());
    });

    let outcome = handler.create(record(&[("title", Value::from("Hooked"))]));
    let received = seen.lock().unwrap().clone().unwrap();
    assert_eq!(Some(&received), outcome.entity());
    assert!(received.id().is_some());
}

#[test]
fn before_create_error_aborts_without_persisting() {
    let mut handler = make_handler();
    let after_calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&after_calls);
    handler
        .before_create(|_| Err(HookError::new("quota exceeded")))
        .after_create(move |_| *counter.lock().unwrap() += 1);

    let outcome = handler.create(record(&[("title", Value::from("x"))]));
    assert!(outcome.is_error());
    assert_eq!(
        outcome.reason(),
        Some(&FailureReason::Hook("quota exceeded".into()))
    );
    assert!(handler.list().entities().is_empty());
    assert_eq!(*after_calls.lock().unwrap(), 0);
}

#[test]
fn before_update_sees_stored_entity_and_can_modify_data() {
    let mut handler = make_handler();
    let id = created_id(&handler.create(record(&[("title", Value::from("Before"))])));

    let previous: Arc<Mutex<Option<Value>>> = Arc::default();
    let sink = Arc::clone(&previous);
    handler.before_update(move |entity, mut data| {
        *sink.lock().unwrap() = entity.get("title").cloned();
        data.insert("count".into(), Value::Int(99));
        Ok(data)
    });

    let outcome = handler.update(id, record(&[("title", Value::from("After"))]));
    assert_eq!(*previous.lock().unwrap(), Some(Value::from("Before")));
    let entity = outcome.entity().unwrap();
    assert_eq!(entity.get("title"), Some(&Value::from("After")));
    assert_eq!(entity.get("count"), Some(&Value::Int(99)));
}

#[test]
fn after_update_receives_updated_entity() {
    let mut handler = make_handler();
    let id = created_id(&handler.create(record(&[("title", Value::from("Old"))])));

    let seen: Arc<Mutex<Option<Value>>> = Arc::default();
    let sink = Arc::clone(&seen);
    handler.after_update(move |entity| {
        *sink.lock().unwrap() = entity.get("title").cloned();
    });

    handler.update(id, record(&[("title", Value::from("New"))]));
    assert_eq!(*seen.lock().unwrap(), Some(Value::from("New")));
}

#[test]
fn before_update_error_leaves_entity_untouched() {
    let mut handler = make_handler();
    let id = created_id(&handler.create(record(&[("title", Value::from("Keep"))])));
    handler.before_update(|_, _| Err(HookError::new("locked")));

    let outcome = handler.update(id, record(&[("title", Value::from("Change"))]));
    assert!(matches!(outcome.reason(), Some(FailureReason::Hook(msg)) if msg == "locked"));
    assert_eq!(
        handler.read(id).entity().unwrap().get("title"),
        Some(&Value::from("Keep"))
    );
}

#[test]
fn before_delete_can_cancel_deletion() {
    let mut handler = make_handler();
    let id = created_id(&handler.create(record(&[("title", Value::from("Protected"))])));
    let after_calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&after_calls);
    handler
        .before_delete(|_| false)
        .after_delete(move |_| *counter.lock().unwrap() += 1);

    let outcome = handler.delete(id);
    assert!(outcome.is_error());
    assert_eq!(outcome.reason(), Some(&FailureReason::Cancelled));

    let still_there = handler.read(id);
    assert!(still_there.is_success());
    assert_eq!(
        still_there.entity().unwrap().get("title"),
        Some(&Value::from("Protected"))
    );
    assert_eq!(*after_calls.lock().unwrap(), 0);
}

#[test]
fn before_delete_returning_true_allows_deletion() {
    let mut handler = make_handler();
    let id = created_id(&handler.create(record(&[("title", Value::from("Gone"))])));
    handler.before_delete(|entity| entity.get("title") == Some(&Value::from("Gone")));

    assert!(handler.delete(id).is_success());
    assert!(handler.read(id).is_error());
}

#[test]
fn after_delete_receives_id() {
    let mut handler = make_handler();
    let id = created_id(&handler.create(record(&[("title", Value::from("Bye"))])));

    let seen: Arc<Mutex<Option<EntityId>>> = Arc::default();
    let sink = Arc::clone(&seen);
    handler.after_delete(move |deleted| *sink.lock().unwrap() = Some(deleted));

    handler.delete(id);
    assert_eq!(*seen.lock().unwrap(), Some(id));
}

// ── Fluent registration ──────────────────────────────────────────

#[test]
fn registration_chains() {
    let mut handler = make_handler();
    handler
        .add_validator("title", |_: &Value| Ok(()))
        .before_create(Ok)
        .after_create(|_| {})
        .before_update(|_, data| Ok(data))
        .after_update(|_| {})
        .before_delete(|_| true)
        .after_delete(|_| {})
        .set_capability("manage_options");

    assert_eq!(handler.base().capability(), Some("manage_options"));
    assert_eq!(handler.base().validator_count("title"), 1);
}

#[test]
fn capability_is_not_enforced() {
    let mut handler = make_handler();
    handler.set_capability("nobody_has_this");
    assert!(handler.create(record(&[("title", Value::from("x"))])).is_success());
}

#[test]
#[allow(deprecated)]
fn legacy_handler_alias_still_works() {
    let object = PluralObject::in_memory("legacy").with_schema(schema());
    let mut handler: adminkit_handler::Handler = adminkit_handler::Handler::new(object);
    assert!(handler.create(Record::new()).is_success());
}
