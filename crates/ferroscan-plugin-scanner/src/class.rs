use std::fmt;
use std::path::Path;
use std::sync::Arc;

use ferroscan_plugins::{ClassTag, PluginCollection, PluginRecord};
use ferroscan_prefs::Preferences;

/// A family of plugins distinguished by file-extension pattern, with a
/// dedicated initializer/loader pair.
pub trait PluginClass: fmt::Debug + Send + Sync {
    /// Stable class label used for tagging and diagnostics.
    fn name(&self) -> &str;

    /// Literal suffix matched against file names, including the leading dot.
    /// Extensions across classes are expected to be mutually exclusive under
    /// suffix comparison.
    fn extension(&self) -> &str;

    /// One-shot initializer. Returning `false` keeps the class out of the
    /// active chain.
    fn init(&self, prefs: &Preferences) -> bool;

    /// Loads one file into a plugin record. `None` skips the file without
    /// failing the surrounding scan.
    fn load(
        &self,
        folder: &Path,
        filename: &str,
        collection: &mut PluginCollection,
        prefs: &Arc<Preferences>,
    ) -> Option<PluginRecord>;

    /// Tag attached to records loaded by this class.
    fn tag(&self) -> ClassTag {
        ClassTag::new(self.name(), self.extension())
    }
}
