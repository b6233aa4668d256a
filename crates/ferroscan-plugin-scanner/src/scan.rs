use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ferroscan_plugins::PluginCollection;
use ferroscan_prefs::Preferences;

use crate::progress::Progress;
use crate::registry::ClassRegistry;

/// Directory scanner. Owns the class registry and extends a caller-owned
/// collection; it never replaces one.
#[derive(Debug)]
pub struct Scanner {
    registry: ClassRegistry,
}

impl Scanner {
    pub fn new(registry: ClassRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    /// Creates a fresh collection and immediately loads the configured
    /// plugins folder into it.
    pub fn init_collection(&self, prefs: &Arc<Preferences>, quiet: bool) -> PluginCollection {
        let mut collection = PluginCollection::new();
        self.reload(prefs, &mut collection, quiet);
        collection
    }

    /// Reloads from the configured `plugins_folder`. A reload appends;
    /// calling it twice without resetting the collection accumulates.
    pub fn reload(&self, prefs: &Arc<Preferences>, collection: &mut PluginCollection, quiet: bool) {
        let folder = prefs.plugins_folder().map(PathBuf::from);
        self.reload_from_dir(prefs, collection, folder.as_deref(), quiet);
    }

    /// Loads every classified file under `folder` into `collection`. A
    /// missing or unreadable folder is recoverable: the collection is
    /// returned untouched after a diagnostic pointing at the config file.
    pub fn reload_from_dir(
        &self,
        prefs: &Arc<Preferences>,
        collection: &mut PluginCollection,
        folder: Option<&Path>,
        quiet: bool,
    ) {
        self.registry.initialize(prefs);

        let Some(folder) = folder else {
            tracing::debug!("plugins_folder is not set");
            println!(
                "Could not determine the value of <plugins_folder>. Check {}",
                prefs.config_file()
            );
            return;
        };

        let files = match list_entries(folder) {
            Ok(files) => files,
            Err(err) => {
                println!(
                    "Couldn't open the directory called \"{}\" - {}\nCheck {}",
                    folder.display(),
                    err,
                    prefs.config_file()
                );
                return;
            }
        };

        let mut progress = Progress::start(quiet, files.len());
        for name in &files {
            progress.tick();
            if prefs.log_plugins_at_load() {
                tracing::info!("Loading {name}");
            }
            let Some(class) = self.registry.classify(name) else {
                continue;
            };
            if let Some(mut record) = class.load(folder, name, collection, prefs) {
                record.set_class(class.tag());
                collection.push(record);
            }
        }
        progress.finish();
    }
}

/// Snapshots the folder listing before any loader runs, so loader-triggered
/// filesystem mutation cannot affect the iteration. Hidden entries are
/// excluded.
fn list_entries(folder: &Path) -> std::io::Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(folder)?.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        files.push(name.to_owned());
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use ferroscan_plugins::PluginRecord;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;
    use crate::class::PluginClass;

    #[derive(Debug)]
    struct StubClass {
        name: &'static str,
        extension: &'static str,
        decline: bool,
    }

    impl StubClass {
        fn new(name: &'static str, extension: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                extension,
                decline: false,
            })
        }

        fn declining(name: &'static str, extension: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                extension,
                decline: true,
            })
        }
    }

    impl PluginClass for StubClass {
        fn name(&self) -> &str {
            self.name
        }

        fn extension(&self) -> &str {
            self.extension
        }

        fn init(&self, _prefs: &Preferences) -> bool {
            true
        }

        fn load(
            &self,
            folder: &Path,
            filename: &str,
            _collection: &mut PluginCollection,
            prefs: &Arc<Preferences>,
        ) -> Option<PluginRecord> {
            if self.decline {
                return None;
            }
            let name = filename.strip_suffix(self.extension).unwrap_or(filename);
            Some(
                PluginRecord::new(name, folder.join(filename))
                    .with_preferences(Arc::clone(prefs)),
            )
        }
    }

    fn scanner(classes: Vec<Arc<dyn PluginClass>>) -> Scanner {
        Scanner::new(ClassRegistry::new(classes))
    }

    #[test]
    fn scan_loads_matching_files_and_skips_hidden_and_unmatched() {
        let dir = tempdir().unwrap();
        for name in ["a.nasl", ".hidden", "b.oval.xml", "c.txt"] {
            File::create(dir.path().join(name)).unwrap();
        }
        let scanner = scanner(vec![
            StubClass::new("nasl", ".nasl"),
            StubClass::new("oval", ".oval.xml"),
        ]);
        let prefs = Arc::new(Preferences::new());
        let mut plugins = PluginCollection::new();
        scanner.reload_from_dir(&prefs, &mut plugins, Some(dir.path()), true);

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
    }

    #[test]
    fn rescanning_accumulates_rather_than_replacing() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("a.nasl")).unwrap();
        File::create(dir.path().join("b.nasl")).unwrap();
        let scanner = scanner(vec![StubClass::new("nasl", ".nasl")]);
        let prefs = Arc::new(Preferences::new());
        let mut plugins = PluginCollection::new();
        scanner.reload_from_dir(&prefs, &mut plugins, Some(dir.path()), true);
        assert_eq!(plugins.len(), 2);
        scanner.reload_from_dir(&prefs, &mut plugins, Some(dir.path()), true);
        assert_eq!(plugins.len(), 4);
    }

    #[test]
    fn a_missing_folder_leaves_the_collection_untouched() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let scanner = scanner(vec![StubClass::new("nasl", ".nasl")]);
        let prefs = Arc::new(Preferences::new());
        let mut plugins = PluginCollection::new();
        scanner.reload_from_dir(&prefs, &mut plugins, Some(&missing), true);
        assert!(plugins.is_empty());
    }

    #[test]
    fn a_folder_that_is_a_plain_file_leaves_the_collection_untouched() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("not-a-folder");
        File::create(&file).unwrap();
        let scanner = scanner(vec![StubClass::new("nasl", ".nasl")]);
        let prefs = Arc::new(Preferences::new());
        let mut plugins = PluginCollection::new();
        scanner.reload_from_dir(&prefs, &mut plugins, Some(&file), true);
        assert!(plugins.is_empty());
    }

    #[test]
    fn an_unset_folder_leaves_the_collection_untouched() {
        let scanner = scanner(vec![StubClass::new("nasl", ".nasl")]);
        let prefs = Arc::new(Preferences::new());
        let mut plugins = PluginCollection::new();
        scanner.reload(&prefs, &mut plugins, true);
        assert!(plugins.is_empty());
    }

    #[test]
    fn a_declining_loader_skips_the_file_without_failing_the_scan() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("a.nasl")).unwrap();
        File::create(dir.path().join("b.oval.xml")).unwrap();
        let scanner = scanner(vec![
            StubClass::declining("nasl", ".nasl"),
            StubClass::new("oval", ".oval.xml"),
        ]);
        let prefs = Arc::new(Preferences::new());
        let mut plugins = PluginCollection::new();
        scanner.reload_from_dir(&prefs, &mut plugins, Some(dir.path()), true);
        assert_eq!(plugins.len(), 1);
        assert_eq!(plugins.get(0).unwrap().name(), "b");
    }

    #[test]
    fn init_collection_equals_an_empty_collection_plus_one_reload() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("a.nasl")).unwrap();
        let scanner = scanner(vec![StubClass::new("nasl", ".nasl")]);
        let mut prefs = Preferences::new();
        prefs.set("plugins_folder", dir.path().display().to_string());
        let prefs = Arc::new(prefs);

        let via_init = scanner.init_collection(&prefs, true);

        let mut via_reload = PluginCollection::new();
        scanner.reload(&prefs, &mut via_reload, true);

        assert_eq!(via_init.len(), via_reload.len());
        assert_eq!(
            via_init.get(0).unwrap().name(),
            via_reload.get(0).unwrap().name()
        );
    }

    #[test]
    fn loaded_records_keep_the_preferences_backref() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("a.nasl")).unwrap();
        let scanner = scanner(vec![StubClass::new("nasl", ".nasl")]);
        let prefs = Arc::new(Preferences::new());
        let mut plugins = PluginCollection::new();
        scanner.reload_from_dir(&prefs, &mut plugins, Some(dir.path()), true);
        assert!(plugins.get(0).unwrap().preferences().is_some());
    }
}
