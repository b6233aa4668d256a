use std::path::Path;
use std::sync::Arc;

use ferroscan_plugin_scanner::PluginClass;
use ferroscan_plugins::{AttrValue, PluginCollection, PluginRecord};
use ferroscan_prefs::Preferences;

use crate::file_record;

/// Scripting-format tests written in NASL.
#[derive(Debug, Default)]
pub struct NaslClass;

impl PluginClass for NaslClass {
    fn name(&self) -> &str {
        "nasl"
    }

    fn extension(&self) -> &str {
        ".nasl"
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
        let mut record = file_record(folder, filename, self.extension(), prefs)?;
        record.set_attr("format", AttrValue::Str("script".into()));
        Some(record)
    }
}
