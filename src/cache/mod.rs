//! Memo table of compiled path expressions.
//!
//! Entries are keyed by the raw expression string. The table is never
//! evicted entry by entry: once it holds more than `max_size` entries, the
//! next insertion clears it completely first. A `max_size` of zero disables
//! caching. The cache is meant to be built once by the application (see
//! [`PathCache::from_config`]) and shared by reference.
//!
//! # Example
//!
//! ```
//! use schmuck::{PathCache, Value};
//!
//! let cache = PathCache::new(16);
//! let first = cache.compile_cached(".upcase").unwrap();
//! let again = cache.compile_cached(".upcase").unwrap();
//! assert!(std::sync::Arc::ptr_eq(&first, &again));
//! assert_eq!(cache.stats().hits, 1);
//!
//! let upcase = cache.accessor(".upcase").unwrap();
//! assert_eq!(upcase(&Value::from("abc")).unwrap(), Some(Value::from("ABC")));
//! ```

use crate::config::Config;
use crate::path::{ApplyError, Path, PathError};
use crate::value::Value;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Counters describing cache effectiveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the table
    pub hits: usize,
    /// Lookups that had to compile
    pub misses: usize,
    /// Bulk clears triggered by overflow
    pub clears: usize,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<String, Arc<Path>>,
    stats: CacheStats,
}

/// Thread-safe expression cache with clear-all overflow.
pub struct PathCache {
    inner: Mutex<Inner>,
    max_size: usize,
}

impl PathCache {
    pub const DEFAULT_MAX_SIZE: usize = 200;

    /// Creates an empty cache; `max_size` of 0 disables caching.
    pub fn new(max_size: usize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            max_size,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cache_max_size)
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns the cached path for `expression`, compiling it with
    /// `compile_fn` on a miss.
    ///
    /// The lock is not held while compiling, so two threads missing on the
    /// same expression both compile it and the later insert wins. Failed
    /// compilations are not stored and do not clear the table.
    pub fn resolve<F, E>(&self, expression: &str, compile_fn: F) -> Result<Arc<Path>, E>
    where
        F: FnOnce(&str) -> Result<Path, E>,
    {
        {
            let mut inner = self.inner.lock();
            if let Some(path) = inner.entries.get(expression).cloned() {
                inner.stats.hits += 1;
                log::trace!("path cache hit for {:?}", expression);
                return Ok(path);
            }
            inner.stats.misses += 1;
        }

        log::trace!("path cache miss for {:?}", expression);
        let path = Arc::new(compile_fn(expression)?);

        if self.max_size == 0 {
            return Ok(path);
        }

        let mut inner = self.inner.lock();
        if inner.entries.len() > self.max_size {
            log::debug!(
                "path cache exceeded {} entries, clearing {}",
                self.max_size,
                inner.entries.len()
            );
            inner.entries.clear();
            inner.stats.clears += 1;
        }
        inner
            .entries
            .insert(expression.to_string(), Arc::clone(&path));

        Ok(path)
    }

    /// Compiles `expression` through the cache.
    pub fn compile_cached(&self, expression: &str) -> Result<Arc<Path>, PathError> {
        self.resolve(expression, Path::parse)
    }

    /// Binds `expression` into an accessor closure backed by the cached path.
    pub fn accessor(
        &self,
        expression: &str,
    ) -> Result<impl Fn(&Value) -> Result<Option<Value>, ApplyError> + Send + Sync + 'static, PathError>
    {
        let path = self.compile_cached(expression)?;
        Ok(move |root: &Value| path.apply(root))
    }

    /// Returns true if `expression` is currently cached.
    pub fn contains(&self, expression: &str) -> bool {
        self.inner.lock().entries.contains_key(expression)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Drops every entry. Statistics are kept.
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats
    }
}

impl Default for PathCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_SIZE)
    }
}

impl std::fmt::Debug for PathCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("PathCache")
            .field("max_size", &self.max_size)
            .field("len", &inner.entries.len())
            .field("stats", &inner.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting_compile<'c>(
        calls: &'c Cell<usize>,
    ) -> impl Fn(&str) -> Result<Path, PathError> + 'c {
        move |expression: &str| {
            calls.set(calls.get() + 1);
            Path::parse(expression)
        }
    }

    #[test]
    fn test_hit_does_not_recompile() {
        let cache = PathCache::new(10);
        let calls = Cell::new(0);
        let compile = counting_compile(&calls);

        let first = cache.resolve("[a][1]", &compile).unwrap();
        let second = cache.resolve("[a][1]", &compile).unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(first, second);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                clears: 0
            }
        );
    }

    #[test]
    fn test_zero_max_size_disables_caching() {
        let cache = PathCache::new(0);
        let calls = Cell::new(0);
        let compile = counting_compile(&calls);

        for _ in 0..3 {
            cache.resolve(".upcase", &compile).unwrap();
        }

        assert_eq!(calls.get(), 3);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_overflow_clears_everything() {
        let cache = PathCache::new(2);
        for expression in [".a", ".b", ".c"] {
            cache.compile_cached(expression).unwrap();
        }
        // Size may exceed the maximum by one before the next insert clears it.
        assert_eq!(cache.len(), 3);

        cache.compile_cached(".d").unwrap();
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(".d"));
        assert!(!cache.contains(".a"));
        assert_eq!(cache.stats().clears, 1);

        let calls = Cell::new(0);
        cache.resolve(".a", counting_compile(&calls)).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = PathCache::new(10);
        assert!(cache.compile_cached("[oops").is_err());
        assert!(cache.is_empty());
        assert!(cache.compile_cached("[oops").is_err());
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            cache_max_size: 7,
            ..Config::default()
        };
        assert_eq!(PathCache::from_config(&config).max_size(), 7);
        assert_eq!(PathCache::default().max_size(), 200);
    }
}
