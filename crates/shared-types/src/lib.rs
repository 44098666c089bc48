pub mod review_log;
pub mod types;

pub use review_log::{export_training_data, ReviewLogEntry, ReviewStatus, TrainingExample};
pub use types::{Clause, Issue, ParsedReport};
