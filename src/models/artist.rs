/// Marker stored in `group` when the source row leaves the column blank.
pub const SOLO_GROUP: &str = "Solo";

/// Column order of the dataset. Rows are mapped onto this list by position.
pub const SCHEMA: [&str; 7] = [
    "stage_name",
    "full_name",
    "korean_name",
    "date_of_birth",
    "country",
    "group",
    "gender",
];

/// One performer as read from the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistRecord {
    pub stage_name: String,
    pub full_name: String,
    pub korean_name: String,
    /// `DD/MM/YYYY`, kept as text; see [`crate::query::parse_date_of_birth`].
    pub date_of_birth: String,
    pub country: String,
    pub group: String,
    pub gender: String,
}

impl ArtistRecord {
    /// Builds a record from already normalized fields.
    ///
    /// Returns `None` when fewer than [`SCHEMA`] columns are present. Extra
    /// trailing fields are ignored.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Option<Self> {
        if fields.len() < SCHEMA.len() {
            return None;
        }

        let field = |idx: usize| fields[idx].as_ref().to_string();
        let group = if fields[5].as_ref().is_empty() {
            SOLO_GROUP.to_string()
        } else {
            field(5)
        };

        Some(Self {
            stage_name: field(0),
            full_name: field(1),
            korean_name: field(2),
            date_of_birth: field(3),
            country: field(4),
            group,
            gender: field(6),
        })
    }

    pub fn gender_label(&self) -> &'static str {
        if self.gender == "F" { "Female" } else { "Male" }
    }

    pub fn is_solo(&self) -> bool {
        self.group == SOLO_GROUP
    }
}
