pub mod aria2_client;
pub mod catalog_client;

pub use aria2_client::{Aria2Client, DownloadOutcome, DownloadSink};
pub use catalog_client::{CatalogClient, PageFetcher};
