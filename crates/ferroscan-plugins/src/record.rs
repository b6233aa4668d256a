use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use ferroscan_prefs::Preferences;

/// Descriptor for the live connection to the scan target. The subsystem
/// stores and propagates it; it never opens or closes the connection.
pub type RawSocket = i32;

/// Loader-specific attribute value kept in a record's extras map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AttrValue {
    Str(String),
    Int(i64),
}

/// Identity of the plugin class that loaded a record. Carried by value so a
/// record stays self-describing once it leaves the scanner.
#[derive(Debug, Clone, Eq, Serialize)]
pub struct ClassTag {
    name: String,
    extension: String,
}

impl ClassTag {
    pub fn new(name: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extension: extension.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}

// Two tags compare equal when they identify the same class; the extension is
// descriptive only.
impl PartialEq for ClassTag {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// One loaded plugin. Created by a class loader, owned by its collection.
#[derive(Debug, Clone, Serialize)]
pub struct PluginRecord {
    name: String,
    path: PathBuf,
    class: Option<ClassTag>,
    socket: Option<RawSocket>,
    #[serde(skip)]
    preferences: Option<Arc<Preferences>>,
    extra: BTreeMap<String, AttrValue>,
}

impl PluginRecord {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            class: None,
            socket: None,
            preferences: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_preferences(mut self, prefs: Arc<Preferences>) -> Self {
        self.preferences = Some(prefs);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn class(&self) -> Option<&ClassTag> {
        self.class.as_ref()
    }

    pub fn set_class(&mut self, tag: ClassTag) {
        self.class = Some(tag);
    }

    /// Overwrites the socket if one is bound, inserts it otherwise. A record
    /// holds at most one socket value.
    pub fn set_socket(&mut self, socket: RawSocket) {
        self.socket = Some(socket);
    }

    /// The bound descriptor, or `None` while unset.
    pub fn socket(&self) -> Option<RawSocket> {
        self.socket
    }

    pub fn preferences(&self) -> Option<&Arc<Preferences>> {
        self.preferences.as_ref()
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: AttrValue) {
        self.extra.insert(key.into(), value);
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.extra.get(key)
    }

    /// Drops the preferences back-reference. The record itself stays valid.
    pub fn unlink(&mut self) {
        self.preferences = None;
    }
}
