//! Memoized synthesis.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::assemble::{ArithCircuit, RippleCarry};
use crate::config::SynthesisKey;
use crate::error::ArithResult;
use crate::observer::TracingObserver;

/// Circuits already synthesized, keyed by kind, widths and flags.
///
/// Synthesis is deterministic, so a cached circuit is identical to a fresh
/// one. Failed syntheses are not cached.
#[derive(Debug, Default)]
pub struct SynthesisCache {
    entries: FxHashMap<SynthesisKey, Arc<ArithCircuit>>,
    hits: u64,
    misses: u64,
}

impl SynthesisCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the circuit for `key`, synthesizing it on first use.
    pub fn get_or_synthesize(&mut self, key: SynthesisKey) -> ArithResult<Arc<ArithCircuit>> {
        // Keys built by hand may carry flags the kind ignores.
        let key = SynthesisKey::new(key.kind, key.a_len, key.b_len, key.config);
        if let Some(circuit) = self.entries.get(&key) {
            self.hits += 1;
            trace!(?key, "synthesis cache hit");
            return Ok(Arc::clone(circuit));
        }

        self.misses += 1;
        let circuit = RippleCarry::from_key(&key).synthesize(key.kind, &mut TracingObserver)?;
        let circuit = Arc::new(circuit);
        self.entries.insert(key, Arc::clone(&circuit));
        Ok(circuit)
    }

    /// Cached circuit for `key`, if any.
    pub fn get(&self, key: &SynthesisKey) -> Option<Arc<ArithCircuit>> {
        let key = SynthesisKey::new(key.kind, key.a_len, key.b_len, key.config);
        self.entries.get(&key).cloned()
    }

    /// Number of cached circuits.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that had to synthesize.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drop every cached circuit and reset the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
