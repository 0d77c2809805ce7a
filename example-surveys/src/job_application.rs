use surveyor_types::{DefinitionError, SurveyDefinition};

/// The job application survey as authored in an editor, in its JSON form.
pub const JOB_APPLICATION_JSON: &str = include_str!("../surveys/job_application.json");

/// Largest accepted CV, in bytes.
pub const MAX_CV_SIZE: u64 = 5 * 1024 * 1024;

/// A bilingual (English/French) application form loaded from JSON.
///
/// - `experience` above 5 shows `mentoring`, below 2 shows `learning_plan`;
/// - selecting `embedded` in `areas` hides `remote`;
/// - `areas` shuffles its options on every presentation.
pub fn job_application() -> Result<SurveyDefinition, DefinitionError> {
    SurveyDefinition::from_json(JOB_APPLICATION_JSON)
}
