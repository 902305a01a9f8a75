pub mod classifier;
pub mod dispatcher;
pub mod keyword;
pub mod resolver;

pub use classifier::ResultClassifier;
pub use dispatcher::{DispatchReport, DownloadDispatcher};
pub use keyword::{format_folder_name, normalize};
pub use resolver::VolumeResolver;
