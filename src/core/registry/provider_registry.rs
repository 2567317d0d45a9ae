use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use log::debug;

use crate::core::actions::render_tiles::ports::colour_map::ColourMap;
use crate::core::actions::render_tiles::ports::equation::Equation;

/// Point-in-time view of a provider map, iterated in ascending name order.
pub type Snapshot<P> = Arc<BTreeMap<String, Arc<P>>>;

// Copy-on-write map: readers clone the current `Arc`, writers replace it.
struct NamedProviders<P: ?Sized> {
    current: RwLock<Snapshot<P>>,
}

impl<P: ?Sized> NamedProviders<P> {
    fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(BTreeMap::new())),
        }
    }

    fn snapshot(&self) -> Snapshot<P> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn get(&self, name: &str) -> Option<Arc<P>> {
        self.snapshot().get(name).cloned()
    }

    fn insert_if_absent(&self, name: String, provider: Arc<P>) -> bool {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);

        if current.contains_key(&name) {
            return false;
        }

        let mut next = BTreeMap::clone(&current);
        next.insert(name, provider);
        *current = Arc::new(next);
        true
    }

    fn remove_if_same(&self, name: &str, provider: &Arc<P>) -> bool {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);

        let registered = current
            .get(name)
            .is_some_and(|registered| same_provider(registered, provider));

        if !registered {
            return false;
        }

        let mut next = BTreeMap::clone(&current);
        next.remove(name);
        *current = Arc::new(next);
        true
    }
}

// Compares data pointers only; vtable pointers of the same object may differ
// between codegen units.
fn same_provider<P: ?Sized>(a: &Arc<P>, b: &Arc<P>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// The equations and colour maps available to render requests, keyed by
/// name. Adding is first-writer-wins; removing only evicts the exact
/// provider that was registered under the name.
pub struct ProviderRegistry {
    equations: NamedProviders<dyn Equation>,
    colour_maps: NamedProviders<dyn ColourMap>,
}

impl ProviderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            equations: NamedProviders::new(),
            colour_maps: NamedProviders::new(),
        }
    }

    pub fn add_equation(&self, name: impl Into<String>, equation: Arc<dyn Equation>) -> bool {
        let name = name.into();
        let added = self.equations.insert_if_absent(name.clone(), equation);
        debug!("add equation {}: {}", name, if added { "registered" } else { "name taken" });
        added
    }

    pub fn remove_equation(&self, name: &str, equation: &Arc<dyn Equation>) -> bool {
        let removed = self.equations.remove_if_same(name, equation);
        debug!("remove equation {}: {}", name, if removed { "removed" } else { "not registered" });
        removed
    }

    pub fn add_colour_map(&self, name: impl Into<String>, colour_map: Arc<dyn ColourMap>) -> bool {
        let name = name.into();
        let added = self.colour_maps.insert_if_absent(name.clone(), colour_map);
        debug!("add colour map {}: {}", name, if added { "registered" } else { "name taken" });
        added
    }

    pub fn remove_colour_map(&self, name: &str, colour_map: &Arc<dyn ColourMap>) -> bool {
        let removed = self.colour_maps.remove_if_same(name, colour_map);
        debug!("remove colour map {}: {}", name, if removed { "removed" } else { "not registered" });
        removed
    }

    #[must_use]
    pub fn equations(&self) -> Snapshot<dyn Equation> {
        self.equations.snapshot()
    }

    #[must_use]
    pub fn colour_maps(&self) -> Snapshot<dyn ColourMap> {
        self.colour_maps.snapshot()
    }

    #[must_use]
    pub fn colour_scheme_names(&self) -> Vec<String> {
        self.colour_maps.snapshot().keys().cloned().collect()
    }

    #[must_use]
    pub fn equation(&self, name: &str) -> Option<Arc<dyn Equation>> {
        self.equations.get(name)
    }

    #[must_use]
    pub fn colour_map(&self, name: &str) -> Option<Arc<dyn ColourMap>> {
        self.colour_maps.get(name)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
