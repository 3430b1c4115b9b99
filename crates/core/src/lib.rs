pub mod filter;
pub mod types;
pub mod validation;

pub use filter::{department_options, filter_jobs, retain_published, ALL_DEPARTMENTS};
pub use types::{
    ApplicationForm, ApplicationSubmission, Job, JobStatus, JobsDocument, SubmissionReceipt,
};
pub use validation::{
    validate_application, FieldError, InvalidApplication, ValidApplication, MAX_EMAIL_LEN,
    MAX_NAME_LEN, MAX_PHONE_LEN,
};
