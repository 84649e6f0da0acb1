pub mod access;
pub mod domain;
pub mod ports;
pub mod report;

pub use domain::{Comment, ObservationRecord, Role, Session, Submission, SubmissionStatus, User};
pub use ports::{
    PortError, PortResult, SessionService, SubmissionService, TranscriptionService, UserDirectory,
};
pub use report::render_report;
