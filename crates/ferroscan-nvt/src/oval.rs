use std::path::Path;
use std::sync::Arc;

use ferroscan_plugin_scanner::PluginClass;
use ferroscan_plugins::{AttrValue, PluginCollection, PluginRecord};
use ferroscan_prefs::Preferences;

use crate::file_record;

/// Structured-document-format tests: OVAL definition files.
#[derive(Debug, Default)]
pub struct OvalClass;

impl PluginClass for OvalClass {
    fn name(&self) -> &str {
        "oval"
    }

    fn extension(&self) -> &str {
        ".oval.xml"
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
        record.set_attr("format", AttrValue::Str("document".into()));
        Some(record)
    }
}
