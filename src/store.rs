//! In-memory document containers that test code can query and patch.
//!
//! A [`Store`] holds databases, each a set of named [`Container`]s. A
//! container is a plain list of documents plus the name of its partition-key
//! field. Queries go through a shared [`QueryEngine`] and come back as a
//! paged [`FeedIterator`].

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;
use tracing::debug;

use crate::{
    engine::QueryEngine,
    error::{StoreError, StoreResult},
    params::Parameters,
    value::{Document, Value},
};

const PARTITION_KEY_MAX_LENGTH: usize = 20;
const DEFAULT_PARTITION_KEY: &str = "partitionKey";
const DEFAULT_PAGE_SIZE: usize = 1;

static PARTITION_KEY_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_-]+$").expect("partition key pattern is valid")
});

/// A single change applied by [`Container::patch_item`].
///
/// Paths are top-level field names, with or without a leading `/`.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOperation {
    /// Set a field, adding it when absent
    Set { path: String, value: Value },

    /// Remove a field if present
    Remove { path: String },
}

impl PatchOperation {
    pub fn set(path: impl Into<String>, value: impl Into<Value>) -> Self {
        PatchOperation::Set {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn remove(path: impl Into<String>) -> Self {
        PatchOperation::Remove { path: path.into() }
    }

    fn apply(&self, doc: &mut Document) {
        match self {
            PatchOperation::Set { path, value } => {
                doc.insert(field_name(path), value.clone());
            }
            PatchOperation::Remove { path } => {
                doc.remove(field_name(path));
            }
        }
    }
}

fn field_name(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// A named list of documents partitioned by one of their fields.
#[derive(Debug, Clone)]
pub struct Container {
    id: String,
    partition_key: String,
    items: Vec<Document>,
}

impl Container {
    /// Create a container.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidPartitionKey`] unless `partition_key` is 1 to 20
    /// characters of ASCII letters, digits, `_` or `-`.
    pub fn new(
        id: impl Into<String>,
        partition_key: &str,
        items: impl IntoIterator<Item = Document>,
    ) -> StoreResult<Self> {
        if partition_key.len() > PARTITION_KEY_MAX_LENGTH
            || !PARTITION_KEY_NAME.is_match(partition_key)
        {
            return Err(StoreError::InvalidPartitionKey(partition_key.to_string()));
        }

        Ok(Container {
            id: id.into(),
            partition_key: partition_key.to_string(),
            items: items.into_iter().collect(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Name of the partition-key field
    pub fn partition_key(&self) -> &str {
        &self.partition_key
    }

    pub fn items(&self) -> &[Document] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the document whose `id` and partition-key fields render as the
    /// given strings.
    pub fn read_item(&self, id: &str, partition_key: &str) -> StoreResult<&Document> {
        let index = self.position(id, partition_key)?;
        Ok(&self.items[index])
    }

    /// Apply patch operations in order to one document and return it.
    pub fn patch_item(
        &mut self,
        id: &str,
        partition_key: &str,
        operations: &[PatchOperation],
    ) -> StoreResult<&Document> {
        let index = self.position(id, partition_key)?;
        let item = &mut self.items[index];

        for op in operations {
            op.apply(item);
        }
        debug!(
            container = %self.id,
            id,
            operations = operations.len(),
            "patched item"
        );
        Ok(item)
    }

    /// Run a query against this container's documents.
    pub fn query_items(
        &self,
        engine: &QueryEngine,
        text: &str,
        parameters: &Parameters,
    ) -> StoreResult<FeedIterator> {
        let results = engine.apply_filter(&self.items, text, parameters)?;
        Ok(FeedIterator::new(results))
    }

    fn position(&self, id: &str, partition_key: &str) -> StoreResult<usize> {
        self.items
            .iter()
            .position(|item| {
                field_text(item, "id").as_deref() == Some(id)
                    && field_text(item, &self.partition_key).as_deref() == Some(partition_key)
            })
            .ok_or_else(|| StoreError::NotFound {
                id: id.to_string(),
                partition_key: partition_key.to_string(),
            })
    }
}

fn field_text(doc: &Document, name: &str) -> Option<String> {
    doc.get_exact(name).map(Value::as_text)
}

/// Query results handed out one page at a time.
///
/// Pages hold a single document unless [`FeedIterator::with_page_size`]
/// says otherwise.
#[derive(Debug, Clone)]
pub struct FeedIterator {
    items: std::vec::IntoIter<Document>,
    page_size: usize,
}

impl FeedIterator {
    pub fn new(items: Vec<Document>) -> Self {
        FeedIterator {
            items: items.into_iter(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Page size is clamped to at least one document.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn has_more_results(&self) -> bool {
        self.items.len() > 0
    }

    /// Drain every remaining page into a single list.
    pub fn collect_all(self) -> Vec<Document> {
        self.flatten().collect()
    }
}

impl Iterator for FeedIterator {
    type Item = Vec<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        let page: Vec<Document> = self.items.by_ref().take(self.page_size).collect();
        if page.is_empty() { None } else { Some(page) }
    }
}

/// Databases of containers, sharing one query engine.
///
/// # Examples
/// ```
/// use docsift::{Document, Parameters, Store, Value};
///
/// let mut store = Store::new();
/// let doc: Document = [("id", Value::from("1")), ("country", Value::from("US"))]
///     .into_iter()
///     .collect();
/// store.init_container("shop", "customers", "country", vec![doc]).unwrap();
///
/// let params = Parameters::new().with("country", "US");
/// let found = store
///     .query_items("shop", "customers", "SELECT c.id FROM c WHERE c.country = @country", &params)
///     .unwrap()
///     .collect_all();
/// assert_eq!(found.len(), 1);
/// ```
#[derive(Default)]
pub struct Store {
    databases: HashMap<String, HashMap<String, Container>>,
    engine: QueryEngine,
    create_missing_containers: bool,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(engine: QueryEngine) -> Self {
        Store {
            engine,
            ..Self::default()
        }
    }

    /// Treat unknown containers as empty instead of failing lookups.
    pub fn create_missing_containers(mut self, create: bool) -> Self {
        self.create_missing_containers = create;
        self
    }

    pub fn engine(&self) -> &QueryEngine {
        &self.engine
    }

    /// Create (or replace) a container seeded with `items`, creating the
    /// database on first use.
    pub fn init_container(
        &mut self,
        database: &str,
        container: &str,
        partition_key: &str,
        items: impl IntoIterator<Item = Document>,
    ) -> StoreResult<()> {
        let new_container = Container::new(container, partition_key, items)?;
        debug!(
            database,
            container,
            partition_key,
            items = new_container.len(),
            "initialized container"
        );
        self.databases
            .entry(database.to_string())
            .or_default()
            .insert(container.to_string(), new_container);
        Ok(())
    }

    pub fn container(&self, database: &str, container: &str) -> StoreResult<&Container> {
        self.databases
            .get(database)
            .ok_or_else(|| StoreError::DatabaseNotFound(database.to_string()))?
            .get(container)
            .ok_or_else(|| StoreError::ContainerNotFound(container.to_string()))
    }

    /// Mutable container lookup. With missing-container creation enabled, an
    /// unknown container is created empty, keyed on `partitionKey`.
    pub fn container_mut(&mut self, database: &str, container: &str) -> StoreResult<&mut Container> {
        let containers = self
            .databases
            .get_mut(database)
            .ok_or_else(|| StoreError::DatabaseNotFound(database.to_string()))?;

        if self.create_missing_containers && !containers.contains_key(container) {
            let empty = Container::new(container, DEFAULT_PARTITION_KEY, Vec::new())?;
            containers.insert(container.to_string(), empty);
        }

        containers
            .get_mut(container)
            .ok_or_else(|| StoreError::ContainerNotFound(container.to_string()))
    }

    pub fn read_item(
        &self,
        database: &str,
        container: &str,
        id: &str,
        partition_key: &str,
    ) -> StoreResult<Document> {
        self.container(database, container)?
            .read_item(id, partition_key)
            .cloned()
    }

    pub fn patch_item(
        &mut self,
        database: &str,
        container: &str,
        id: &str,
        partition_key: &str,
        operations: &[PatchOperation],
    ) -> StoreResult<Document> {
        self.container_mut(database, container)?
            .patch_item(id, partition_key, operations)
            .cloned()
    }

    /// Query a container. An unknown container yields no results when
    /// missing-container creation is enabled.
    pub fn query_items(
        &self,
        database: &str,
        container: &str,
        text: &str,
        parameters: &Parameters,
    ) -> StoreResult<FeedIterator> {
        match self.container(database, container) {
            Ok(found) => found.query_items(&self.engine, text, parameters),
            Err(StoreError::ContainerNotFound(_)) if self.create_missing_containers => {
                // Still reject malformed query text.
                self.engine.compile(text)?;
                Ok(FeedIterator::new(Vec::new()))
            }
            Err(err) => Err(err),
        }
    }
}
