//! Sort allow-list for item listings
//!
//! Callers pick a column and direction by name. Each accepted name maps to a
//! fixed SQL fragment; nothing the caller sends is ever written into a
//! statement.

use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Sortable item columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Category,
    Curriculum,
    Title,
    Link,
    Summary,
    MadeDay,
    UpdatedDay,
}

impl SortColumn {
    pub const ALL: [SortColumn; 8] = [
        SortColumn::Id,
        SortColumn::Category,
        SortColumn::Curriculum,
        SortColumn::Title,
        SortColumn::Link,
        SortColumn::Summary,
        SortColumn::MadeDay,
        SortColumn::UpdatedDay,
    ];

    /// Column name as accepted in the `sort` query parameter and used in SQL.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Category => "category",
            Self::Curriculum => "curriculum",
            Self::Title => "title",
            Self::Link => "link",
            Self::Summary => "summary",
            Self::MadeDay => "made_day",
            Self::UpdatedDay => "updated_day",
        }
    }
}

impl FromStr for SortColumn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|column| column.as_str() == wanted)
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "sort",
                value: s.to_owned(),
            })
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ValidationError::InvalidVariant {
                field: "order",
                value: s.to_owned(),
            }),
        }
    }
}

/// Validated ORDER BY for the item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortKey {
    /// Newest `made_day` first.
    fn default() -> Self {
        Self {
            column: SortColumn::MadeDay,
            direction: SortDirection::Desc,
        }
    }
}

impl SortKey {
    /// Resolve the `sort`/`order` query parameters.
    ///
    /// Empty strings count as absent. Without `sort` the column is `made_day`
    /// and the direction defaults to descending; with an explicit `sort` the
    /// direction defaults to ascending.
    pub fn from_params(sort: Option<&str>, order: Option<&str>) -> Result<Self, ValidationError> {
        let sort = sort.filter(|s| !s.is_empty());
        let order = order
            .filter(|s| !s.is_empty())
            .map(SortDirection::from_str)
            .transpose()?;

        match sort {
            None => Ok(Self {
                direction: order.unwrap_or(SortDirection::Desc),
                ..Self::default()
            }),
            Some(column) => Ok(Self {
                column: column.parse()?,
                direction: order.unwrap_or(SortDirection::Asc),
            }),
        }
    }
}

/// Renders the ORDER BY body; `id` breaks ties so pages of equal keys are stable.
impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = self.direction.as_sql();
        match self.column {
            SortColumn::Id => write!(f, "id {}", direction),
            column => write!(f, "{} {}, id {}", column.as_str(), direction, direction),
        }
    }
}
