//! Sorting and statistics types.

use serde::{Deserialize, Serialize};

/// Sortable table columns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SortField {
    Name,
    /// The `id` column, which displays the medical record number
    RecordNumber,
    Category,
    Risk,
    Date,
}

impl SortField {
    /// Parse a column key: `name`, `id`, `category`, `risk`, `date`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "name" => Some(SortField::Name),
            "id" => Some(SortField::RecordNumber),
            "category" => Some(SortField::Category),
            "risk" => Some(SortField::Risk),
            "date" => Some(SortField::Date),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::RecordNumber => "id",
            SortField::Category => "category",
            SortField::Risk => "risk",
            SortField::Date => "date",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse `asc` / `desc`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Flip direction (clicking the same column header twice).
    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// A column plus direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Aggregate counts shown above the case table.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaseStatistics {
    /// Number of cases
    pub total: usize,
    /// Cases with high risk
    pub high_risk: usize,
    /// Cases whose last visit is older than the follow-up threshold
    pub pending_follow_up: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_keys() {
        assert_eq!(SortField::from_key("id"), Some(SortField::RecordNumber));
        assert_eq!(SortField::from_key("risk"), Some(SortField::Risk));
        assert_eq!(SortField::from_key("unknown"), None);
        assert_eq!(SortField::RecordNumber.key(), "id");
    }

    #[test]
    fn test_direction_toggle() {
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::parse("desc"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("DESC"), None);
    }
}
