// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashMap;
use strata_data::DataAccessor;

/// Named data accessors that plot configurations refer to.
///
/// Configurations are plain data, so a plot names its accessor with
/// `dataAccessor: "..."` and the host registers the function under that name
/// before building the viewer.
#[derive(Clone, Debug, Default)]
pub struct AccessorRegistry {
    accessors: HashMap<String, DataAccessor>,
}

impl AccessorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `accessor` under `name`, returning the one it replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        accessor: DataAccessor,
    ) -> Option<DataAccessor> {
        self.accessors.insert(name.into(), accessor)
    }

    /// Builder form of [`AccessorRegistry::register`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, accessor: DataAccessor) -> Self {
        self.register(name, accessor);
        self
    }

    /// Looks up an accessor.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DataAccessor> {
        self.accessors.get(name)
    }

    /// Number of registered accessors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }
}
