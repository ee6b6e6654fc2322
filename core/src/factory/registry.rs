//! factory/registry.rs
//! Process-global name-keyed factory registry.
//!
//! One thread writes at startup; every generator call reads. Publishing
//! under an existing name replaces the prior state atomically with
//! respect to readers (in-flight calls keep their `Arc` to the old
//! state, new lookups see the replacement).

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};

use crate::factory::state::FactoryState;
use crate::types::FactoryError;

static REGISTRY: LazyLock<RwLock<HashMap<String, Arc<FactoryState>>>> =
    LazyLock::new(Default::default);

/// Publish a fully constructed state under `name`.
pub(crate) fn publish(name: &str, state: FactoryState) {
    REGISTRY
        .write()
        .expect("nonceforge: factory registry lock poisoned")
        .insert(name.to_owned(), Arc::new(state));
}

/// Look up a factory by registry name.
///
/// # Errors
///
/// `FactoryNotInitialized` when no init has published under `name`.
pub fn get(name: &str) -> Result<Arc<FactoryState>, FactoryError> {
    REGISTRY
        .read()
        .expect("nonceforge: factory registry lock poisoned")
        .get(name)
        .cloned()
        .ok_or_else(|| FactoryError::FactoryNotInitialized {
            name: name.to_owned(),
        })
}

/// True when `name` has a published factory.
pub fn is_initialized(name: &str) -> bool {
    REGISTRY
        .read()
        .expect("nonceforge: factory registry lock poisoned")
        .contains_key(name)
}
