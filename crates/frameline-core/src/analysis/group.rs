use crate::model::{DeviceGroupKey, FileRecord};
use crate::sequence::file_prefix;
use ahash::AHashMap;

/// Files sharing one `(model, serial, extension)` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceGroup {
    pub key: DeviceGroupKey,
    pub files: Vec<FileRecord>,
}

impl DeviceGroup {
    pub fn is_unknown_device(&self) -> bool {
        self.key.device.is_unknown()
    }

    /// Human label for logs: the device for known groups, the file-name
    /// prefix plus extension for unknown ones.
    pub fn label(&self) -> String {
        if self.is_unknown_device() {
            let prefix = self
                .files
                .first()
                .and_then(|f| file_prefix(&f.file_name))
                .unwrap_or("");
            format!("{}*{}", prefix, self.key.extension)
        } else {
            format!("{} {}", self.key.device, self.key.extension)
        }
    }
}

/// Partition `records` by device group key. Groups appear in the order their
/// key was first seen; files keep their input order within a group.
pub fn group_records(records: Vec<FileRecord>) -> Vec<DeviceGroup> {
    let mut index: AHashMap<DeviceGroupKey, usize> = AHashMap::new();
    let mut groups: Vec<DeviceGroup> = Vec::new();

    for record in records {
        let key = record.group_key();
        match index.get(&key) {
            Some(&i) => groups[i].files.push(record),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(DeviceGroup {
                    key,
                    files: vec![record],
                });
            }
        }
    }

    groups
}

/// Deterministic ordering by model, then serial, then extension.
pub fn sort_groups(groups: &mut [DeviceGroup]) {
    groups.sort_by(|a, b| a.key.cmp(&b.key));
}
