use adminkit_handler::{PluralHandler, SingularHandler};
use adminkit_layout::{Layout, LayoutResult};
use adminkit_model::Schema;
use adminkit_object::{PluralObject, SingularObject};
use adminkit_storage::HostStore;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

use crate::config::{AdminConfig, ObjectConfig, ObjectKind};
use crate::{AdminError, AdminResult};

/// The handler serving one admin object.
pub enum ObjectHandler {
    Singular(SingularHandler),
    Plural(PluralHandler),
}

/// A configured object: its schema, editor layout and handler.
pub struct AdminObject {
    slug: String,
    schema: Arc<Schema>,
    layout: Layout,
    handler: ObjectHandler,
}

impl AdminObject {
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn kind(&self) -> ObjectKind {
        match self.handler {
            ObjectHandler::Singular(_) => ObjectKind::Singular,
            ObjectHandler::Plural(_) => ObjectKind::Plural,
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn handler(&self) -> &ObjectHandler {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut ObjectHandler {
        &mut self.handler
    }

    pub fn singular_mut(&mut self) -> AdminResult<&mut SingularHandler> {
        match &mut self.handler {
            ObjectHandler::Singular(handler) => Ok(handler),
            ObjectHandler::Plural(_) => Err(AdminError::WrongKind {
                slug: self.slug.clone(),
                expected: ObjectKind::Singular,
            }),
        }
    }

    pub fn plural(&self) -> AdminResult<&PluralHandler> {
        match &self.handler {
            ObjectHandler::Plural(handler) => Ok(handler),
            ObjectHandler::Singular(_) => Err(AdminError::WrongKind {
                slug: self.slug.clone(),
                expected: ObjectKind::Plural,
            }),
        }
    }

    pub fn plural_mut(&mut self) -> AdminResult<&mut PluralHandler> {
        match &mut self.handler {
            ObjectHandler::Plural(handler) => Ok(handler),
            ObjectHandler::Singular(_) => Err(AdminError::WrongKind {
                slug: self.slug.clone(),
                expected: ObjectKind::Plural,
            }),
        }
    }
}

/// Every configured object, wired to one shared [`HostStore`].
pub struct Registry {
    host: HostStore,
    objects: IndexMap<String, AdminObject>,
}

impl Registry {
    /// Builds schemas, layouts and handlers for every object in `config`.
    ///
    /// Singular objects are loaded from the host and plural objects register
    /// their collection settings, so the registry is ready to serve reads.
    pub fn build(config: &AdminConfig, host: HostStore) -> AdminResult<Self> {
        let mut objects = IndexMap::new();
        for object in &config.objects {
            if objects.contains_key(&object.slug) {
                return Err(AdminError::DuplicateObject(object.slug.clone()));
            }
            let built = build_object(object, &host)?;
            debug!(object = %object.slug, kind = %object.kind, "Registered admin object");
            objects.insert(object.slug.clone(), built);
        }
        Ok(Self { host, objects })
    }

    pub fn host(&self) -> &HostStore {
        &self.host
    }

    pub fn get(&self, slug: &str) -> AdminResult<&AdminObject> {
        self.objects
            .get(slug)
            .ok_or_else(|| AdminError::UnknownObject(slug.to_string()))
    }

    pub fn get_mut(&mut self, slug: &str) -> AdminResult<&mut AdminObject> {
        self.objects
            .get_mut(slug)
            .ok_or_else(|| AdminError::UnknownObject(slug.to_string()))
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

fn build_object(config: &ObjectConfig, host: &HostStore) -> AdminResult<AdminObject> {
    let schema = Arc::new(config.schema());
    let layout = build_layout(config, Arc::clone(&schema))?;

    let mut handler = match config.kind {
        ObjectKind::Singular => {
            let storage = host.option_storage(config.slug.as_str());
            let mut object = SingularObject::new(config.slug.as_str(), Box::new(storage))
                .with_schema(Arc::clone(&schema));
            object.load()?;
            ObjectHandler::Singular(SingularHandler::new(object))
        }
        ObjectKind::Plural => {
            let storage = host.collection_storage(config.slug.as_str());
            let mut object = PluralObject::new(config.slug.as_str(), Box::new(storage))
                .with_schema(Arc::clone(&schema));
            object.register(serde_json::to_value(&config.settings)?)?;
            ObjectHandler::Plural(PluralHandler::new(object))
        }
    };

    for field in &config.fields {
        for validator in field.rules.validators() {
            match &mut handler {
                ObjectHandler::Singular(h) => {
                    h.add_validator(field.slug.as_str(), validator);
                }
                ObjectHandler::Plural(h) => {
                    h.add_validator(field.slug.as_str(), validator);
                }
            }
        }
    }
    if let Some(capability) = &config.capability {
        match &mut handler {
            ObjectHandler::Singular(h) => {
                h.set_capability(capability.as_str());
            }
            ObjectHandler::Plural(h) => {
                h.set_capability(capability.as_str());
            }
        }
    }

    Ok(AdminObject {
        slug: config.slug.clone(),
        schema,
        layout,
        handler,
    })
}

/// Configured sections in order. Without any, one "General" section holds
/// every field the sidebar does not.
fn build_layout(config: &ObjectConfig, schema: Arc<Schema>) -> LayoutResult<Layout> {
    let mut layout = Layout::new(schema);

    if config.sections.is_empty() {
        let in_sidebar: Vec<&str> = config
            .sidebar
            .as_ref()
            .map(|sidebar| sidebar.fields.iter().map(String::as_str).collect())
            .unwrap_or_default();
        let remaining: Vec<&str> = config
            .fields
            .iter()
            .map(|field| field.slug.as_str())
            .filter(|slug| !in_sidebar.contains(slug))
            .collect();
        if !remaining.is_empty() {
            layout.section("General", |section| {
                for slug in remaining {
                    section.field(slug)?;
                }
                Ok(())
            })?;
        }
    }

    for section_config in &config.sections {
        layout.section(section_config.label.as_str(), |section| {
            if let Some(columns) = section_config.columns {
                section.columns(columns);
            }
            for slug in &section_config.fields {
                section.field(slug)?;
            }
            Ok(())
        })?;
    }

    if let Some(sidebar_config) = &config.sidebar {
        layout.sidebar(|sidebar| {
            for slug in &sidebar_config.fields {
                sidebar.field(slug)?;
            }
            sidebar.actions(sidebar_config.actions.iter().cloned());
            Ok(())
        })?;
    }

    Ok(layout)
}
