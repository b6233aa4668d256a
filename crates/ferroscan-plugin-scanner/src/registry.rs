use std::sync::Arc;

use parking_lot::Mutex;

use ferroscan_prefs::Preferences;

use crate::class::PluginClass;

/// Priority-ordered set of plugin classes. Written once, read-only
/// afterwards; the mutex doubles as the initialize-once guard so concurrent
/// callers cannot produce a partial or duplicated chain.
///
/// The registry counts as initialized only once at least one class has
/// registered. A walk in which every initializer fails leaves it
/// uninitialized and is repeated on the next call.
#[derive(Debug)]
pub struct ClassRegistry {
    candidates: Vec<Arc<dyn PluginClass>>,
    active: Mutex<Vec<Arc<dyn PluginClass>>>,
}

impl ClassRegistry {
    /// `candidates` in dispatch priority order.
    pub fn new(candidates: Vec<Arc<dyn PluginClass>>) -> Self {
        Self {
            candidates,
            active: Mutex::new(Vec::new()),
        }
    }

    /// Runs every candidate initializer, keeping the classes that succeed in
    /// their original relative order. A no-op once any class has registered.
    pub fn initialize(&self, prefs: &Preferences) {
        let mut active = self.active.lock();
        if !active.is_empty() {
            return;
        }
        for class in &self.candidates {
            if class.init(prefs) {
                active.push(Arc::clone(class));
            } else {
                tracing::debug!(class = class.name(), "plugin class failed to initialize");
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        !self.active.lock().is_empty()
    }

    /// First class in the active chain whose extension is a byte-exact,
    /// case-sensitive suffix of `filename` shorter than the name itself.
    /// Classification has no side effects.
    pub fn classify(&self, filename: &str) -> Option<Arc<dyn PluginClass>> {
        let active = self.active.lock();
        active
            .iter()
            .find(|class| {
                let extension = class.extension();
                filename.len() > extension.len() && filename.ends_with(extension)
            })
            .cloned()
    }
}
