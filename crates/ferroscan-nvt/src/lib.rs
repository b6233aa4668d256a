//! Built-in plugin classes covering the supported vulnerability-test
//! formats. Only the discovery-time loaders live here; the execution engines
//! are separate components.

pub mod nasl;
pub mod nes;
pub mod oval;

use std::path::Path;
use std::sync::Arc;

use ferroscan_plugin_scanner::PluginClass;
use ferroscan_plugins::PluginRecord;
use ferroscan_prefs::Preferences;

pub use nasl::NaslClass;
pub use nes::NesClass;
pub use oval::OvalClass;

/// Candidate classes in dispatch priority order.
pub fn default_classes() -> Vec<Arc<dyn PluginClass>> {
    vec![
        Arc::new(NesClass),
        Arc::new(NaslClass),
        Arc::new(OvalClass),
    ]
}

/// Common loader body: the file must exist as a regular file; the record is
/// named after the file minus the class extension and keeps a preferences
/// back-reference.
pub(crate) fn file_record(
    folder: &Path,
    filename: &str,
    extension: &str,
    prefs: &Arc<Preferences>,
) -> Option<PluginRecord> {
    let path = folder.join(filename);
    if !path.is_file() {
        return None;
    }
    let name = filename.strip_suffix(extension).unwrap_or(filename);
    Some(PluginRecord::new(name, path).with_preferences(Arc::clone(prefs)))
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use ferroscan_plugin_scanner::{ClassRegistry, Scanner};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn default_classes_keep_the_historical_priority_order() {
        let names: Vec<_> = default_classes()
            .iter()
            .map(|class| class.name().to_string())
            .collect();
        assert_eq!(names, ["nes", "nasl", "oval"]);
    }

    #[test]
    fn a_full_scan_tags_each_record_with_its_class() {
        let dir = tempdir().unwrap();
        for name in ["a.nasl", ".hidden", "b.oval.xml", "c.txt", "d.nes"] {
            File::create(dir.path().join(name)).unwrap();
        }
        let scanner = Scanner::new(ClassRegistry::new(default_classes()));
        let mut prefs = Preferences::new();
        prefs.set("plugins_folder", dir.path().display().to_string());
        let prefs = Arc::new(prefs);

        // NES stays out of the chain without the opt-in preference.
        let plugins = scanner.init_collection(&prefs, true);
        assert_eq!(plugins.len(), 2);
        let class_of = |name: &str| {
            plugins
                .iter()
                .find(|record| record.name() == name)
                .and_then(|record| record.class())
                .map(|tag| tag.name().to_string())
        };
        assert_eq!(class_of("a").as_deref(), Some("nasl"));
        assert_eq!(class_of("b").as_deref(), Some("oval"));
        plugins.free();
    }

    #[test]
    fn nes_records_load_once_the_class_is_enabled() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("d.nes")).unwrap();
        let scanner = Scanner::new(ClassRegistry::new(default_classes()));
        let mut prefs = Preferences::new();
        prefs.set("plugins_folder", dir.path().display().to_string());
        prefs.set("nes_enabled", "yes");
        let prefs = Arc::new(prefs);

        let mut plugins = scanner.init_collection(&prefs, true);
        assert_eq!(plugins.len(), 1);
        assert_eq!(
            plugins.get(0).unwrap().class().map(|tag| tag.name()),
            Some("nes")
        );
        plugins.set_socket_all(21);
        assert_eq!(plugins.get(0).unwrap().socket(), Some(21));
        plugins.free();
    }
}
