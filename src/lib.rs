pub mod catalog;
pub mod columns;
pub mod constants;
pub mod exoscore;
pub mod exoscore_errors;
pub mod features;
pub mod jobs;
pub mod model;
pub mod observability;
pub mod pipeline;
pub mod scoring;

pub use exoscore::Exoscore;
pub use exoscore_errors::ExoscoreError;
