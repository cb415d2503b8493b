//! Folder hierarchy: tree building, path labels and search choices

pub mod options;
pub mod path;
pub mod tree;

pub use options::{FolderChoices, FolderOption, folder_options};
pub use path::FolderIndex;
pub use tree::{FolderNode, build_tree};

use crate::client::{Folder, SkyfishApi};
use crate::error::Result;

/// The folder listing in both tree and lookup form.
#[derive(Debug, Clone)]
pub struct FolderCatalog {
    pub roots: Vec<FolderNode>,
    pub index: FolderIndex,
}

impl FolderCatalog {
    pub fn from_folders(folders: &[Folder]) -> Result<Self> {
        Ok(Self {
            roots: build_tree(folders)?,
            index: FolderIndex::new(folders),
        })
    }

    /// Fetch the folder listing and build the catalog.
    pub async fn fetch<A: SkyfishApi + ?Sized>(api: &A) -> Result<Self> {
        let folders = api.get_folders().await?;
        if folders.is_empty() {
            log::warn!("No folders found; check the Skyfish user's permissions");
        }
        Self::from_folders(&folders)
    }

    pub fn choices(&self, root_scope: Option<u64>, omit: &[u64]) -> FolderChoices {
        folder_options(&self.roots, root_scope, omit)
    }
}
