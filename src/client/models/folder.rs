//! Folder models

use serde::{Deserialize, Deserializer, Serialize};

/// Folder record as returned by the folder listing endpoint.
///
/// Records are flat; the hierarchy is only expressed through `parent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Folder ID
    pub id: u64,

    /// Folder name
    pub name: String,

    /// Parent folder ID; `null` and `0` both mean a top-level folder
    #[serde(
        default,
        deserialize_with = "deserialize_parent",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent: Option<u64>,
}

impl Folder {
    pub fn new(id: u64, name: impl Into<String>, parent: Option<u64>) -> Self {
        Self {
            id,
            name: name.into(),
            parent,
        }
    }
}

fn deserialize_parent<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let parent = Option::<u64>::deserialize(deserializer)?;
    Ok(parent.filter(|id| *id != 0))
}
