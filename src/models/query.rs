use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Age,
    Group,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Name, SortKey::Age, SortKey::Group];

    pub fn next(self) -> Self {
        match self {
            SortKey::Name => SortKey::Age,
            SortKey::Age => SortKey::Group,
            SortKey::Group => SortKey::Name,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Age => "Age",
            SortKey::Group => "Group",
        }
    }

    /// Lenient parse: anything unrecognized sorts by name.
    pub fn from_label(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "age" => Ok(SortKey::Age),
            "group" => Ok(SortKey::Group),
            other => Err(format!("unknown sort key '{other}' (expected name, age or group)")),
        }
    }
}

/// The live inputs of the result list, owned by the caller and handed to the
/// query engine on every recomputation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub search_text: String,
    /// `None` means every group.
    pub group_filter: Option<String>,
    pub sort_key: SortKey,
}

impl QueryState {
    pub fn with_sort(sort_key: SortKey) -> Self {
        Self {
            sort_key,
            ..Self::default()
        }
    }
}
