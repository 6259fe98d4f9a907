pub mod document;
pub mod evaluation;
pub mod outcome;
pub mod response;

pub use document::{Document, DocumentSource, SubmissionInput, PDF_MEDIA_TYPE};
pub use evaluation::EvaluationResult;
pub use outcome::{Notice, NoticeKind, SubmissionOutcome};
pub use response::{AnalysisResponseBody, RawAnalysisResponse};
