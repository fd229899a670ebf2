// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use log::debug;

use crate::diagnostics::Diagnostics;

/// Memoizes a resolution result against a data generation.
///
/// The owner bumps its generation whenever the underlying data is replaced.
/// Scale or zoom changes never touch the generation, so they never cause a
/// re-resolution.
#[derive(Clone, Debug)]
pub struct ResolutionCache<T> {
    generation: Option<u64>,
    value: Option<T>,
    diagnostics: Diagnostics,
    misses: u64,
}

impl<T> Default for ResolutionCache<T> {
    fn default() -> Self {
        Self {
            generation: None,
            value: None,
            diagnostics: Diagnostics::new(),
            misses: 0,
        }
    }
}

impl<T> ResolutionCache<T> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value, resolving it first if `generation` changed.
    pub fn get_or_resolve(
        &mut self,
        generation: u64,
        resolve: impl FnOnce(&mut Diagnostics) -> T,
    ) -> &T {
        if self.generation != Some(generation) {
            self.value = None;
            self.generation = Some(generation);
        }
        self.value.get_or_insert_with(|| {
            debug!("resolving data generation {generation}");
            self.diagnostics.clear();
            self.misses += 1;
            resolve(&mut self.diagnostics)
        })
    }

    /// The cached value, if it matches `generation`.
    #[must_use]
    pub fn get(&self, generation: u64) -> Option<&T> {
        self.value
            .as_ref()
            .filter(|_| self.generation == Some(generation))
    }

    /// The last resolved value regardless of generation.
    #[must_use]
    pub fn latest(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Diagnostics raised by the last resolution.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// How many times the resolver actually ran.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Forgets the cached value.
    pub fn invalidate(&mut self) {
        self.generation = None;
        self.value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_once_per_generation() {
        let mut cache = ResolutionCache::new();
        assert_eq!(*cache.get_or_resolve(1, |_| 10), 10);
        assert_eq!(*cache.get_or_resolve(1, |_| 20), 10);
        assert_eq!(cache.misses(), 1);
        assert_eq!(*cache.get_or_resolve(2, |_| 30), 30);
        assert_eq!(cache.get(1), None);
        assert_eq!(cache.get(2), Some(&30));
        cache.invalidate();
        assert_eq!(cache.latest(), None);
    }
}
