pub mod aliases;
pub mod comic;
pub mod mode;

pub use aliases::{Alias, AliasTable};
pub use comic::{DownloadTarget, SearchResult, VolumeLink, YearBuckets, UNKNOWN};
pub use mode::ResolutionMode;
