//! Stores for every class of a school, keyed by class name.

use std::collections::BTreeMap;
use std::sync::Arc;

use timetable_core::ScheduleIndex;

use crate::class::SchoolClass;
use crate::config::StoreOptions;
use crate::error::RefreshError;
use crate::store::{Pipeline, ScheduleStore};

/// Outcome of refreshing one class.
pub type RefreshOutcome = (String, Result<Arc<ScheduleIndex>, RefreshError>);

/// A set of [`ScheduleStore`]s sharing one [`Pipeline`].
#[derive(Debug)]
pub struct Registry {
    pipeline: Arc<Pipeline>,
    options: StoreOptions,
    stores: BTreeMap<String, Arc<ScheduleStore>>,
}

impl Registry {
    pub fn new(pipeline: Pipeline, options: StoreOptions) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            options,
            stores: BTreeMap::new(),
        }
    }

    /// Register `class`, reading its timetable from the class link.
    ///
    /// Classes without a link are skipped; returns whether a store was added.
    /// Registering a name again replaces its store.
    pub fn register(&mut self, class: SchoolClass) -> bool {
        let mut options = self.options.clone();
        options.class_token = None;
        match ScheduleStore::for_class(class, Arc::clone(&self.pipeline), options) {
            Some(store) => {
                self.stores
                    .insert(store.class().name.clone(), Arc::new(store));
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<ScheduleStore>> {
        self.stores.get(name).cloned()
    }

    /// Registered class names, sorted.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.stores.keys().map(String::as_str)
    }

    /// Classes grouped by department; classes without one are under `""`.
    pub fn departments(&self) -> BTreeMap<&str, Vec<&SchoolClass>> {
        let mut out: BTreeMap<&str, Vec<&SchoolClass>> = BTreeMap::new();
        for store in self.stores.values() {
            let class = store.class();
            out.entry(class.department.as_deref().unwrap_or(""))
                .or_default()
                .push(class);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Force a rebuild of every store. Results are in class-name order.
    ///
    /// With the `parallel` feature, stores are rebuilt concurrently using
    /// rayon.
    pub fn refresh_all(&self) -> Vec<RefreshOutcome> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let stores: Vec<(&String, &Arc<ScheduleStore>)> = self.stores.iter().collect();
            stores
                .into_par_iter()
                .map(|(name, store)| (name.clone(), store.refresh()))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            self.stores
                .iter()
                .map(|(name, store)| (name.clone(), store.refresh()))
                .collect()
        }
    }
}
