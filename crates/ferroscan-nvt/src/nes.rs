use std::path::Path;
use std::sync::Arc;

use ferroscan_plugin_scanner::PluginClass;
use ferroscan_plugins::{AttrValue, PluginCollection, PluginRecord};
use ferroscan_prefs::Preferences;

use crate::file_record;

/// Binary-format tests shipped as compiled shared objects. Loading native
/// code is opt-in: the class only joins the active chain when the
/// `nes_enabled` preference says so.
#[derive(Debug, Default)]
pub struct NesClass;

impl PluginClass for NesClass {
    fn name(&self) -> &str {
        "nes"
    }

    fn extension(&self) -> &str {
        ".nes"
    }

    fn init(&self, prefs: &Preferences) -> bool {
        matches!(prefs.get("nes_enabled"), Some("yes") | Some("true") | Some("1"))
    }

    fn load(
        &self,
        folder: &Path,
        filename: &str,
        _collection: &mut PluginCollection,
        prefs: &Arc<Preferences>,
    ) -> Option<PluginRecord> {
        let mut record = file_record(folder, filename, self.extension(), prefs)?;
        record.set_attr("format", AttrValue::Str("binary".into()));
        Some(record)
    }
}
