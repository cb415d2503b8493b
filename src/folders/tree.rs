//! Folder hierarchy reconstruction
//!
//! The folder endpoint returns a flat list where each record only knows its
//! parent. [`build_tree`] turns that list into nested [`FolderNode`]s, each
//! carrying the IDs of itself and everything below it.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::client::Folder;
use crate::error::FolderError;

/// A folder with its children and the transitive set of folder IDs it spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderNode {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
    /// Own ID plus the IDs of all descendants
    pub folder_ids: BTreeSet<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    /// Number of folders below this one
    pub fn descendant_count(&self) -> usize {
        self.folder_ids.len() - 1
    }
}

/// Build the folder forest from a flat listing.
///
/// Top-level folders keep their listing order; children are sorted by name.
/// A folder whose parent is not in the listing stays at the top level.
///
/// # Errors
/// `FolderError::DuplicateId` when an ID is listed twice and
/// `FolderError::Cycle` when parent links loop.
pub fn build_tree(folders: &[Folder]) -> Result<Vec<FolderNode>, FolderError> {
    let mut index: HashMap<u64, usize> = HashMap::with_capacity(folders.len());
    for (slot, folder) in folders.iter().enumerate() {
        if index.insert(folder.id, slot).is_some() {
            return Err(FolderError::DuplicateId(folder.id));
        }
    }

    // One grouping pass: children per slot, roots in listing order
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); folders.len()];
    let mut roots = Vec::new();
    for (slot, folder) in folders.iter().enumerate() {
        match folder.parent.and_then(|p| index.get(&p)) {
            Some(&parent) => children[parent].push(slot),
            None => roots.push(slot),
        }
    }
    for group in &mut children {
        group.sort_by(|a, b| folders[*a].name.cmp(&folders[*b].name));
    }

    // Pre-order walk from the roots; anything not reached sits on a cycle
    let mut order = Vec::with_capacity(folders.len());
    let mut reached = vec![false; folders.len()];
    let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
    while let Some(slot) = stack.pop() {
        reached[slot] = true;
        order.push(slot);
        stack.extend(children[slot].iter().rev());
    }

    if order.len() != folders.len() {
        return Err(FolderError::Cycle(cycle_members(folders, &index, &reached)));
    }

    // Children come after their parent in pre-order, so walking it backwards
    // builds every subtree before the node that owns it.
    let mut built: Vec<Option<FolderNode>> = vec![None; folders.len()];
    for &slot in order.iter().rev() {
        let folder = &folders[slot];
        let mut folder_ids = BTreeSet::from([folder.id]);
        let mut nodes = Vec::with_capacity(children[slot].len());
        for &child in &children[slot] {
            if let Some(node) = built[child].take() {
                folder_ids.extend(node.folder_ids.iter().copied());
                nodes.push(node);
            }
        }
        built[slot] = Some(FolderNode {
            id: folder.id,
            name: folder.name.clone(),
            parent: folder.parent,
            folder_ids,
            children: nodes,
        });
    }

    Ok(roots.iter().filter_map(|&slot| built[slot].take()).collect())
}

/// IDs on the first cycle found among unreached folders, in link order.
fn cycle_members(folders: &[Folder], index: &HashMap<u64, usize>, reached: &[bool]) -> Vec<u64> {
    let Some(start) = reached.iter().position(|r| !r) else {
        return Vec::new();
    };

    // Follow parent links until a slot repeats; the repeat starts the cycle
    let mut seen = vec![false; folders.len()];
    let mut slot = start;
    while !seen[slot] {
        seen[slot] = true;
        match folders[slot].parent.and_then(|p| index.get(&p)) {
            Some(&parent) => slot = parent,
            None => return vec![folders[slot].id],
        }
    }

    let first = slot;
    let mut members = vec![folders[first].id];
    while let Some(&parent) = folders[slot].parent.and_then(|p| index.get(&p)) {
        if parent == first {
            break;
        }
        members.push(folders[parent].id);
        slot = parent;
    }
    members
}
