pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod metadata;
pub mod model;
pub mod progress;
pub mod report;
pub mod scanner;
pub mod sequence;

pub use config::AppConfig;
pub use engine::{ContinuityChecker, ContinuityReport};
pub use error::{Error, SequenceError};
pub use metadata::{ExifExtractor, MetadataExtractor};
pub use model::{DeviceGroupKey, DeviceIdentity, FileRecord};
pub use progress::{CallbackReporter, ProgressReporter, SilentReporter};
pub use report::GroupReport;
