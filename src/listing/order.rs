use serde::{Deserialize, Serialize};

/// Ordering key for model listings, as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderBy {
    #[default]
    #[serde(rename = "CREATED_NEW_TO_OLD")]
    CreatedNewToOld,
    #[serde(rename = "CREATED_OLD_TO_NEW")]
    CreatedOldToNew,
    #[serde(rename = "NAME_ASC")]
    NameAsc,
    #[serde(rename = "NAME_DESC")]
    NameDesc,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::CreatedNewToOld => "CREATED_NEW_TO_OLD",
            OrderBy::CreatedOldToNew => "CREATED_OLD_TO_NEW",
            OrderBy::NameAsc => "NAME_ASC",
            OrderBy::NameDesc => "NAME_DESC",
        }
    }

    /// Lenient wire parse; unknown keys fall back to the default ordering.
    pub fn parse(s: &str) -> Self {
        match s {
            "CREATED_NEW_TO_OLD" => OrderBy::CreatedNewToOld,
            "CREATED_OLD_TO_NEW" => OrderBy::CreatedOldToNew,
            "NAME_ASC" => OrderBy::NameAsc,
            "NAME_DESC" => OrderBy::NameDesc,
            _ => OrderBy::default(),
        }
    }

    /// ORDER BY fragment for the models table. Name ties break on id so
    /// pagination stays stable across requests.
    pub fn to_sql(&self) -> &'static str {
        match self {
            OrderBy::CreatedNewToOld => "created_at DESC",
            OrderBy::CreatedOldToNew => "created_at ASC",
            OrderBy::NameAsc => "name ASC, id ASC",
            OrderBy::NameDesc => "name DESC, id DESC",
        }
    }
}
