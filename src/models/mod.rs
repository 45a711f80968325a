pub mod artist;
pub mod query;

pub use artist::ArtistRecord;
pub use query::{QueryState, SortKey};
