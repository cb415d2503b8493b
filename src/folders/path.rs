//! Human-readable folder path labels

use std::collections::{HashMap, HashSet};

use crate::client::Folder;

/// Separator between path segments
pub const PATH_SEPARATOR: &str = " | ";

/// Folders keyed by ID, for walking parent links.
#[derive(Debug, Default, Clone)]
pub struct FolderIndex {
    by_id: HashMap<u64, Folder>,
}

impl FolderIndex {
    pub fn new(folders: &[Folder]) -> Self {
        Self {
            by_id: folders.iter().map(|f| (f.id, f.clone())).collect(),
        }
    }

    pub fn get(&self, id: u64) -> Option<&Folder> {
        self.by_id.get(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Labels like `"Grandparent | Parent | Self"` for each known folder.
    ///
    /// With a root scope, folders under another top-level folder are left
    /// out and the scope's own segment is dropped from the label. Unknown IDs
    /// are skipped.
    pub fn path_names(&self, folder_ids: &[u64], root_scope: Option<u64>) -> Vec<String> {
        folder_ids
            .iter()
            .filter_map(|&id| self.path_name(id, root_scope))
            .collect()
    }

    /// Label for a single folder, or `None` when it is unknown or out of scope.
    pub fn path_name(&self, id: u64, root_scope: Option<u64>) -> Option<String> {
        let mut folder = self.get(id)?;
        let mut names = vec![folder.name.as_str()];
        let mut visited = HashSet::from([folder.id]);

        while let Some(parent) = folder.parent.and_then(|p| self.get(p)) {
            if !visited.insert(parent.id) {
                log::warn!("Folder {} has a cyclic parent chain", id);
                return None;
            }
            names.push(parent.name.as_str());
            folder = parent;
        }

        if let Some(scope) = root_scope {
            if folder.id != scope {
                return None;
            }
            // The scope root is implied, unless it is the folder itself
            if names.len() > 1 {
                names.pop();
            }
        }

        names.reverse();
        Some(names.join(PATH_SEPARATOR))
    }
}
