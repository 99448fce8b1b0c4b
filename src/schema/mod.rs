use ahash::AHashMap;
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Ordered input-name lists for one node class, as the execution engine
/// declares them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeSchema {
    pub required: Vec<String>,
    pub optional: Vec<String>,
}

impl NodeSchema {
    /// All input names in positional order: required first, then optional.
    pub fn positional_names(&self) -> impl Iterator<Item = &str> {
        self.required
            .iter()
            .chain(self.optional.iter())
            .map(String::as_str)
    }

    /// The input name at a positional widget index, if the schema has one.
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.positional_names().nth(index)
    }
}

/// Shared, read-mostly cache of node schemas.
///
/// The host fetches the engine's introspection document once and hands it to
/// [`SchemaCache::populate`]; conversions only ever read. [`invalidate`] wipes
/// the cache when the engine's node registry changes.
///
/// [`invalidate`]: SchemaCache::invalidate
#[derive(Debug, Default)]
pub struct SchemaCache {
    schemas: RwLock<AHashMap<String, Arc<NodeSchema>>>,
}

type SchemaMap = AHashMap<String, Arc<NodeSchema>>;

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache populated directly from an introspection document.
    pub fn from_object_info(doc: &Value) -> Self {
        let cache = Self::new();
        cache.populate(doc);
        cache
    }

    /// Replaces the cached schemas with the contents of `doc`.
    ///
    /// A document that is not an object degrades to an empty cache; lookups
    /// then fall back to heuristic widget naming instead of failing.
    pub fn populate(&self, doc: &Value) {
        *self.write_map() = parse_object_info(doc);
    }

    /// Looks up the schema for a class type.
    pub fn get(&self, class_type: &str) -> Option<Arc<NodeSchema>> {
        self.read_map().get(class_type).cloned()
    }

    /// Drops every cached schema.
    pub fn invalidate(&self) {
        self.write_map().clear();
    }

    pub fn len(&self) -> usize {
        self.read_map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_map().is_empty()
    }

    fn read_map(&self) -> RwLockReadGuard<'_, SchemaMap> {
        self.schemas.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_map(&self) -> RwLockWriteGuard<'_, SchemaMap> {
        self.schemas.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Extracts per-class schemas from the engine's introspection document
/// (`class -> {"input": {"required": {...}, "optional": {...}}}`).
///
/// Entry order of the input objects is preserved; it is the positional widget
/// order.
pub fn parse_object_info(doc: &Value) -> AHashMap<String, Arc<NodeSchema>> {
    let Some(classes) = doc.as_object() else {
        log::warn!("introspection document is not an object; schema cache left empty");
        return AHashMap::new();
    };
    let mut schemas = AHashMap::with_capacity(classes.len());
    for (class_type, info) in classes {
        schemas.insert(
            class_type.clone(),
            Arc::new(NodeSchema {
                required: input_names(info, "required"),
                optional: input_names(info, "optional"),
            }),
        );
    }
    schemas
}

fn input_names(info: &Value, section: &str) -> Vec<String> {
    info.get("input")
        .and_then(|input| input.get(section))
        .and_then(Value::as_object)
        .map(|names| names.keys().cloned().collect())
        .unwrap_or_default()
}
