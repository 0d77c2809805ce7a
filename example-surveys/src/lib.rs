//! Sample survey definitions used by tests and demos.

pub mod customer_feedback;
pub mod event_registration;
pub mod job_application;

// Re-export customer_feedback surveys
pub use customer_feedback::{customer_feedback, customer_feedback_auto_advance};

// Re-export event_registration surveys
pub use event_registration::{MAX_ABSTRACT_SIZE, event_registration};

// Re-export job_application surveys
pub use job_application::{JOB_APPLICATION_JSON, MAX_CV_SIZE, job_application};
