pub mod session;

pub use session::{Session, SessionView, Settled, SubmissionState};
