pub mod assignment_service;
pub mod response_writer;
pub mod submission_service;
pub mod upload_service;

pub use assignment_service::AssignmentService;
pub use response_writer::ResponseWriter;
pub use submission_service::SubmissionService;
pub use upload_service::{UploadService, TEXT_PLAIN};
