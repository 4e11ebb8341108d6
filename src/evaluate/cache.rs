//! Memoization of evaluations by canonical position key.

use std::cell::{Cell, RefCell};
use std::hash::Hash;
use std::rc::Rc;

use log::trace;
use rustc_hash::FxHashMap;

use super::Evaluator;
use crate::search::Score;

/// A position that can be reduced to a key identifying it for evaluation
/// purposes, independent of move counters and history.
pub trait Canonical {
    type Key: Hash + Eq;

    fn canonical_key(&self) -> Self::Key;
}

/// Maps canonical keys to previously computed scores.
///
/// Entries are written at most once per key. For a fixed evaluator the
/// mapping never goes stale, so clearing is only ever an optional policy.
pub struct PositionCache<K> {
    scores: RefCell<FxHashMap<K, Score>>,
    hit_count: Cell<usize>,
    miss_count: Cell<usize>,
}

impl<K: Hash + Eq> Default for PositionCache<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq> PositionCache<K> {
    pub fn new() -> Self {
        Self {
            scores: RefCell::new(FxHashMap::default()),
            hit_count: Cell::new(0),
            miss_count: Cell::new(0),
        }
    }

    pub fn get(&self, key: &K) -> Option<Score> {
        self.scores.borrow().get(key).copied()
    }

    /// Returns the score stored for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with<F>(&self, key: K, compute: F) -> Score
    where
        F: FnOnce() -> Score,
    {
        if let Some(score) = self.get(&key) {
            self.hit_count.set(self.hit_count.get() + 1);
            return score;
        }

        // computed before borrowing mutably, the evaluator may consult this cache
        let score = compute();
        self.miss_count.set(self.miss_count.get() + 1);
        trace!("position cache miss, computed {}", score);
        *self.scores.borrow_mut().entry(key).or_insert(score)
    }

    pub fn len(&self) -> usize {
        self.scores.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.borrow().is_empty()
    }

    pub fn clear(&self) {
        trace!("clearing position cache of {} entries", self.len());
        self.scores.borrow_mut().clear();
    }

    pub fn hit_count(&self) -> usize {
        self.hit_count.get()
    }

    pub fn miss_count(&self) -> usize {
        self.miss_count.get()
    }
}

/// Fronts an evaluator with a [`PositionCache`]. The cache may be shared
/// between several wrappers as long as they wrap identically configured
/// evaluators.
pub struct CachedEvaluator<E, K> {
    inner: E,
    cache: Rc<PositionCache<K>>,
}

impl<E, K: Hash + Eq> CachedEvaluator<E, K> {
    pub fn new(inner: E) -> Self {
        Self::with_cache(inner, Rc::new(PositionCache::new()))
    }

    pub fn with_cache(inner: E, cache: Rc<PositionCache<K>>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &Rc<PositionCache<K>> {
        &self.cache
    }
}

impl<P, E> Evaluator<P> for CachedEvaluator<E, P::Key>
where
    P: Canonical,
    E: Evaluator<P>,
{
    fn evaluate(&self, position: &P) -> Score {
        self.cache
            .get_or_insert_with(position.canonical_key(), || self.inner.evaluate(position))
    }
}
