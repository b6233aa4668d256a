use serde::Serialize;

use crate::record::{PluginRecord, RawSocket};

/// Ordered, owned sequence of plugin records. Scans extend the same
/// collection in place; records never outlive it.
#[derive(Debug, Default, Serialize)]
pub struct PluginCollection {
    records: Vec<PluginRecord>,
}

impl PluginCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: PluginRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PluginRecord> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut PluginRecord> {
        self.records.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PluginRecord> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, PluginRecord> {
        self.records.iter_mut()
    }

    /// Clears one record's preferences back-reference. An out-of-range index
    /// is a caller bug; it is logged and otherwise ignored.
    pub fn unlink(&mut self, index: usize) {
        match self.records.get_mut(index) {
            Some(record) => record.unlink(),
            None => log::error!("unlink: no plugin record at index {index}"),
        }
    }

    /// Binds the same descriptor to every record, in collection order.
    pub fn set_socket_all(&mut self, socket: RawSocket) {
        for record in &mut self.records {
            record.set_socket(socket);
        }
    }

    /// Unlinks every record's preferences reference, then releases all record
    /// storage in one operation. An empty collection is a no-op.
    pub fn free(mut self) {
        if self.records.is_empty() {
            return;
        }
        for record in &mut self.records {
            record.unlink();
        }
    }
}

impl<'a> IntoIterator for &'a PluginCollection {
    type Item = &'a PluginRecord;
    type IntoIter = std::slice::Iter<'a, PluginRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
