pub mod classroom;
pub mod users;

pub use classroom::{
    Attachment, Course, CourseWork, DriveFileRef, DueDate, DueTime, StudentSubmission,
    SubmissionPatch, SubmissionState, NO_DESCRIPTION,
};
pub use users::{load_user_list, parse_user_list, retain_valid_emails};
