//! Folder choices for narrowing a search

use serde::Serialize;

use super::path::PATH_SEPARATOR;
use super::tree::FolderNode;

/// Label used when no root scope is configured
pub const ALL_FOLDERS: &str = "all folders";

/// One selectable folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderOption {
    pub id: u64,
    pub label: String,
}

/// The folders a search can be limited to, three levels deep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderChoices {
    /// Name of the browsing scope
    pub scope_name: String,
    /// Folder searched when nothing is chosen (the root scope, if any)
    pub scope_id: Option<u64>,
    pub options: Vec<FolderOption>,
}

/// List the folder choices under the root scope (or all top-level folders).
///
/// An unknown root scope falls back to all folders. Omitted IDs only apply
/// to the first listed level.
pub fn folder_options(roots: &[FolderNode], root_scope: Option<u64>, omit: &[u64]) -> FolderChoices {
    let scope = root_scope.and_then(|id| roots.iter().find(|root| root.id == id));

    let (scope_name, scope_id, level) = match scope {
        Some(root) => (root.name.clone(), Some(root.id), root.children.as_slice()),
        None => (ALL_FOLDERS.to_string(), None, roots),
    };

    let mut options = Vec::new();
    for folder in level.iter().filter(|f| !omit.contains(&f.id)) {
        options.push(FolderOption {
            id: folder.id,
            label: folder.name.clone(),
        });
        for child in &folder.children {
            let child_label = [folder.name.as_str(), child.name.as_str()].join(PATH_SEPARATOR);
            let grandchildren: Vec<FolderOption> = child
                .children
                .iter()
                .map(|grandchild| FolderOption {
                    id: grandchild.id,
                    label: format!("{}{}{}", child_label, PATH_SEPARATOR, grandchild.name),
                })
                .collect();
            options.push(FolderOption {
                id: child.id,
                label: child_label,
            });
            options.extend(grandchildren);
        }
    }

    FolderChoices {
        scope_name,
        scope_id,
        options,
    }
}
