pub mod analysis_client;
pub mod export_client;
pub mod input_validator;
pub mod presentation;
pub mod result_normalizer;

pub use analysis_client::AnalysisClient;
pub use export_client::ExportClient;
pub use input_validator::InputValidator;
pub use presentation::{derive, PresentationState, ScoreBand};
pub use result_normalizer::{normalize, normalize_outcome};
