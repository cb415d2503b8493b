//! Display model implementations for table and JSON output
//!
//! Display models turn API and folder types into rows with CLI column names.

use serde::Serialize;
use tabled::Tabled;

use crate::client::{MediaItem, MediaRecord};
use crate::folders::{FolderIndex, FolderNode, FolderOption};
use crate::output::formatters::{format_size, or_dash, truncate};

const TITLE_WIDTH: usize = 40;

/// One folder of the hierarchy, flattened for a table.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct FolderRow {
    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "PATH")]
    pub path: String,

    #[tabled(rename = "SUBFOLDERS")]
    pub subfolders: usize,
}

impl FolderRow {
    /// Flatten a forest in depth-first order
    pub fn flatten(roots: &[FolderNode]) -> Vec<Self> {
        let mut rows = Vec::new();
        let mut stack: Vec<(&FolderNode, String)> = roots
            .iter()
            .rev()
            .map(|node| (node, node.name.clone()))
            .collect();

        while let Some((node, path)) = stack.pop() {
            for child in node.children.iter().rev() {
                stack.push((child, format!("{} | {}", path, child.name)));
            }
            rows.push(Self {
                id: node.id,
                path,
                subfolders: node.descendant_count(),
            });
        }
        rows
    }
}

/// A folder a search can be limited to.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct FolderOptionRow {
    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "FOLDER")]
    pub label: String,
}

impl From<FolderOption> for FolderOptionRow {
    fn from(option: FolderOption) -> Self {
        Self {
            id: option.id,
            label: option.label,
        }
    }
}

/// A search hit with its folder paths resolved.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SearchRow {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "FILENAME")]
    pub filename: String,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "SIZE")]
    pub size: String,

    #[tabled(rename = "CREATED")]
    pub created: String,

    #[tabled(rename = "FOLDERS")]
    pub folders: String,
}

impl SearchRow {
    pub fn new(record: &MediaRecord, index: &FolderIndex, root_scope: Option<u64>) -> Self {
        Self {
            id: record
                .unique_media_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
            filename: or_dash(record.filename.as_deref()),
            title: truncate(&or_dash(record.title.as_deref()), TITLE_WIDTH),
            size: record
                .file_disksize
                .map(format_size)
                .unwrap_or_else(|| "-".to_string()),
            created: or_dash(record.created_date()),
            folders: index.path_names(&record.folder_ids, root_scope).join("\n"),
        }
    }
}

/// Item detail for `media get`.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct MediaItemDisplay {
    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "FILENAME")]
    pub filename: String,

    #[tabled(rename = "TYPE")]
    pub kind: String,

    #[tabled(rename = "IMPORT AS")]
    pub bundle: String,

    #[tabled(rename = "TITLE")]
    pub title: String,
}

impl From<&MediaItem> for MediaItemDisplay {
    fn from(item: &MediaItem) -> Self {
        Self {
            id: item.id,
            filename: item.filename.clone(),
            kind: item.kind.clone(),
            bundle: item
                .bundle()
                .map(|b| b.as_str().to_string())
                .unwrap_or_else(|| "unsupported".to_string()),
            title: item.alt_text().to_string(),
        }
    }
}
