//! Per-stage memoization.
//!
//! Stage outputs are pure functions of the stage configuration and the
//! document text, so they can be shared between runs through a
//! [`CacheStore`]. The store is accessed without any coordination: two runs
//! computing the same fingerprint write the same value, and the last write
//! wins.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use sha2::{Digest, Sha256};

use crate::{Artifact, ProcessResult};

/// Key/value backend for cached stage outputs.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Artifact>;
    fn set(&self, key: String, value: Artifact);
}

/// Hit/miss counters of a [`MemoryStore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// In-process cache store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, Artifact>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Artifact> {
        match self.entries.get(key) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value().clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    fn set(&self, key: String, value: Artifact) {
        self.entries.insert(key, value);
    }
}

/// Everything that determines a stage's output.
#[derive(Debug, Clone, Copy)]
pub struct Fingerprint<'a> {
    /// Stable stage identifier.
    pub stage: &'a str,
    /// Serialized stage configuration attributes.
    pub attrs: &'a str,
    /// Serialized run parameters the stage reads, if any.
    pub params: Option<&'a str>,
    /// The document's raw text.
    pub base_text: &'a str,
    /// The upstream artifact key the stage consumes.
    pub input_key: Option<&'a str>,
    /// Digest of the fingerprint that produced the input artifact.
    pub upstream: Option<&'a str>,
}

impl Fingerprint<'_> {
    /// Hex SHA-256 over all parts; each part is length-prefixed so adjacent
    /// parts cannot run into one another.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        let parts = [
            Some(self.stage),
            Some(self.attrs),
            self.params,
            Some(self.base_text),
            self.input_key,
            self.upstream,
        ];
        for part in parts {
            match part {
                Some(part) => {
                    hasher.update([1u8]);
                    hasher.update((part.len() as u64).to_le_bytes());
                    hasher.update(part.as_bytes());
                }
                None => hasher.update([0u8]),
            }
        }
        format!("stage_{:x}", hasher.finalize())
    }
}

/// A cache view for one run.
#[derive(Clone, Copy)]
pub struct Cache<'a> {
    store: &'a dyn CacheStore,
    enabled: bool,
}

impl<'a> Cache<'a> {
    pub fn new(store: &'a dyn CacheStore, enabled: bool) -> Self {
        Self { store, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Return the cached value for `fingerprint`, or compute, store and
    /// return it.
    ///
    /// When the cache is disabled the store is neither read nor written.
    /// Errors from `run` are returned as-is and never stored.
    pub fn wrap<F>(&self, fingerprint: &Fingerprint<'_>, run: F) -> ProcessResult<Artifact>
    where
        F: FnOnce() -> ProcessResult<Artifact>,
    {
        if !self.enabled {
            return run();
        }

        let key = fingerprint.digest();
        if let Some(hit) = self.store.get(&key) {
            tracing::trace!(stage = fingerprint.stage, key = %key, "cache hit");
            return Ok(hit);
        }

        tracing::trace!(stage = fingerprint.stage, key = %key, "cache miss");
        let value = run()?;
        self.store.set(key, value.clone());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn fingerprint<'a>(attrs: &'a str, input_key: Option<&'a str>) -> Fingerprint<'a> {
        Fingerprint {
            stage: "text_cleaner",
            attrs,
            params: None,
            base_text: "Some text.",
            input_key,
            upstream: None,
        }
    }

    #[test]
    fn enabled_cache_computes_once() {
        let store = MemoryStore::new();
        let cache = Cache::new(&store, true);
        assert!(cache.is_enabled());
        let calls = Cell::new(0);
        let fp = fingerprint(r#"{"out":"cleaned_text"}"#, None);

        for _ in 0..2 {
            let value = cache
                .wrap(&fp, || {
                    calls.set(calls.get() + 1);
                    Ok(Artifact::Text("Some text.".into()))
                })
                .unwrap();
            assert_eq!(value, Artifact::Text("Some text.".into()));
        }

        assert_eq!(calls.get(), 1);
        assert_eq!(
            store.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
    }

    #[test]
    fn disabled_cache_always_recomputes() {
        let store = MemoryStore::new();
        let cache = Cache::new(&store, false);
        assert!(!cache.is_enabled());
        let calls = Cell::new(0);
        let fp = fingerprint(r#"{"out":"cleaned_text"}"#, None);

        for _ in 0..2 {
            cache
                .wrap(&fp, || {
                    calls.set(calls.get() + 1);
                    Ok(Artifact::Text("Some text.".into()))
                })
                .unwrap();
        }

        assert_eq!(calls.get(), 2);
        assert_eq!(store.stats(), CacheStats::default());
    }

    #[test]
    fn clearing_drops_entries_but_keeps_counters() {
        let store = MemoryStore::new();
        let cache = Cache::new(&store, true);
        let calls = Cell::new(0);
        let fp = fingerprint("{}", None);
        let run = || {
            calls.set(calls.get() + 1);
            Ok(Artifact::Text("Some text.".into()))
        };

        cache.wrap(&fp, run).unwrap();
        store.clear();
        cache.wrap(&fp, run).unwrap();

        assert_eq!(calls.get(), 2);
        assert_eq!(
            store.stats(),
            CacheStats {
                hits: 0,
                misses: 2,
                entries: 1
            }
        );
    }

    #[test]
    fn errors_are_not_cached() {
        let store = MemoryStore::new();
        let cache = Cache::new(&store, true);
        let fp = fingerprint("{}", Some("cleaned_text"));

        let err = cache.wrap(&fp, || Err(crate::ProcessError::MissingKey("cleaned_text".into())));
        assert!(err.is_err());
        assert_eq!(store.stats().entries, 0);
    }

    #[test]
    fn fingerprint_covers_configuration_and_input() {
        let a = fingerprint(r#"{"out":"cleaned_text"}"#, None).digest();
        let b = fingerprint(r#"{"out":"other_text"}"#, None).digest();
        let c = fingerprint(r#"{"out":"cleaned_text"}"#, Some("sentences")).digest();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, fingerprint(r#"{"out":"cleaned_text"}"#, None).digest());

        let from_cleaner = Fingerprint {
            upstream: Some("stage_aa"),
            ..fingerprint("{}", Some("cleaned_text"))
        };
        let from_remover = Fingerprint {
            upstream: Some("stage_bb"),
            ..from_cleaner
        };
        assert_ne!(from_cleaner.digest(), from_remover.digest());
    }
}
