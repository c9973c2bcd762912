//! Query entry point: compile (with caching), filter, project.

use std::{num::NonZeroUsize, sync::Arc};

use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

use crate::{
    ast::Query,
    error::QueryResult,
    evaluator::Evaluator,
    functions::{FunctionRegistry, Predicate},
    params::Parameters,
    parser::Parser,
    projection::project,
    value::Document,
};

const DEFAULT_CACHE_CAPACITY: usize = 128;

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Report unrecognized conditions and unbound parameters as errors
    /// instead of letting them match nothing.
    pub strict: bool,

    /// Number of compiled queries kept, keyed by query text. 0 disables caching.
    pub cache_capacity: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        QueryOptions {
            strict: false,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl QueryOptions {
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

/// Filters and projects document collections with query text.
///
/// An engine owns the function registry, the options, and a cache of compiled
/// queries. It holds no documents, and is safe to share between threads.
///
/// # Examples
/// ```
/// use docsift::{Document, Parameters, QueryEngine, Value};
///
/// let docs: Vec<Document> = vec![
///     [("id", Value::from("1")), ("name", Value::from("John"))].into_iter().collect(),
///     [("id", Value::from("2")), ("name", Value::from("Doe"))].into_iter().collect(),
/// ];
///
/// let engine = QueryEngine::new();
/// let params = Parameters::new().with("@name", "John");
/// let result = engine
///     .apply_filter(&docs, "SELECT * FROM c WHERE c.name = @name", &params)
///     .unwrap();
///
/// assert_eq!(result.len(), 1);
/// assert_eq!(result[0].get("id"), Some(&Value::from("1")));
/// ```
pub struct QueryEngine {
    registry: FunctionRegistry,
    options: QueryOptions,
    cache: Option<Mutex<LruCache<String, Arc<Query>>>>,
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryEngine {
    /// Engine with the built-in functions and default options.
    pub fn new() -> Self {
        Self::with_options(QueryOptions::default())
    }

    pub fn with_options(options: QueryOptions) -> Self {
        Self::with_registry(FunctionRegistry::default(), options)
    }

    pub fn with_registry(registry: FunctionRegistry, options: QueryOptions) -> Self {
        let cache = NonZeroUsize::new(options.cache_capacity).map(|cap| Mutex::new(LruCache::new(cap)));
        QueryEngine {
            registry,
            options,
            cache,
        }
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    pub fn options(&self) -> QueryOptions {
        self.options
    }

    /// Parse query text, reusing a previously compiled query for the same text.
    pub fn compile(&self, text: &str) -> QueryResult<Arc<Query>> {
        if let Some(cache) = &self.cache
            && let Some(query) = cache.lock().get(text)
        {
            debug!(query = text, "compiled query cache hit");
            return Ok(Arc::clone(query));
        }

        let query = Arc::new(
            Parser::new(&self.registry)
                .strict(self.options.strict)
                .parse_query(text)?,
        );
        debug!(query = text, filter = %query.filter, "compiled query");

        if let Some(cache) = &self.cache {
            cache.lock().put(text.to_string(), Arc::clone(&query));
        }
        Ok(query)
    }

    /// Bind parameters to a compiled query, producing its document predicate.
    pub fn predicate(&self, query: &Query, parameters: &Parameters) -> QueryResult<Predicate> {
        Evaluator::new(&self.registry, parameters)
            .strict(self.options.strict)
            .compile(&query.filter)
    }

    /// Run a query over `documents`, returning the projected matches in input order.
    ///
    /// # Errors
    ///
    /// [`crate::QueryError::MalformedQuery`] when the query text lacks its
    /// clause keywords. In strict mode, also unrecognized conditions and
    /// unbound parameters.
    pub fn apply_filter<'d, I>(
        &self,
        documents: I,
        text: &str,
        parameters: &Parameters,
    ) -> QueryResult<Vec<Document>>
    where
        I: IntoIterator<Item = &'d Document>,
    {
        let query = self.compile(text)?;
        let predicate = self.predicate(&query, parameters)?;

        let results: Vec<Document> = documents
            .into_iter()
            .filter(|doc| predicate(doc))
            .map(|doc| project(doc, &query.selection))
            .collect();

        debug!(query = text, matched = results.len(), "applied filter");
        Ok(results)
    }

    /// Number of compiled queries currently cached
    pub fn cached_queries(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.lock().len())
    }
}

/// Run a query with a default engine. See [`QueryEngine::apply_filter`].
pub fn apply_filter<'d, I>(
    documents: I,
    text: &str,
    parameters: &Parameters,
) -> QueryResult<Vec<Document>>
where
    I: IntoIterator<Item = &'d Document>,
{
    QueryEngine::with_options(QueryOptions::default().cache_capacity(0))
        .apply_filter(documents, text, parameters)
}
