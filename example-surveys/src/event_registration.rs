use chrono::NaiveDate;
use surveyor_types::{
    ChoiceOption, DateProperties, DateQuestion, FileUploadProperties, FileUploadQuestion,
    NumericProperties, NumericQuestion, Question, QuestionKind, RequiredIndicator, SurveyDefinition,
    SurveySettings, Theme,
};

/// Largest accepted upload, in bytes.
pub const MAX_ABSTRACT_SIZE: u64 = 2 * 1024 * 1024;

fn options(pairs: &[(&str, &str)]) -> Vec<ChoiceOption> {
    pairs.iter().map(|(id, text)| ChoiceOption::new(*id, *text)).collect()
}

/// A single-language registration form exercising the structured question types.
pub fn event_registration() -> SurveyDefinition {
    let settings = SurveySettings {
        theme: Theme {
            primary_color: "#0f766e".into(),
            background_color: "#f8fafc".into(),
            ..Default::default()
        },
        required_indicator: RequiredIndicator::Text,
        show_response_summary: true,
        ..Default::default()
    };

    SurveyDefinition::new(
        "rustconf-registration",
        "Conference Registration",
        vec![
            Question::new(
                "ticket",
                "Ticket type",
                QuestionKind::dropdown(options(&[
                    ("student", "Student"),
                    ("regular", "Regular"),
                    ("sponsor", "Sponsor"),
                ])),
            )
            .required(),
            Question::new(
                "arrival",
                "Arrival date",
                QuestionKind::Date(DateQuestion {
                    properties: DateProperties {
                        min: NaiveDate::from_ymd_opt(2026, 9, 1),
                        max: NaiveDate::from_ymd_opt(2026, 9, 5),
                    },
                }),
            )
            .required(),
            Question::new(
                "guests",
                "Number of guests",
                QuestionKind::Numeric(NumericQuestion {
                    properties: NumericProperties {
                        min: Some(0.0),
                        max: Some(3.0),
                        step: Some(1.0),
                    },
                }),
            ),
            Question::section_break("program", "Program"),
            Question::new(
                "tracks",
                "Rank the tracks by interest",
                QuestionKind::ranking(options(&[
                    ("embedded", "Embedded"),
                    ("web", "Web"),
                    ("compilers", "Compilers"),
                ])),
            ),
            Question::new(
                "workshops",
                "Rate the workshop formats",
                QuestionKind::matrix(
                    options(&[("hands_on", "Hands-on"), ("talks", "Talks"), ("panels", "Panels")]),
                    options(&[("love", "Love it"), ("fine", "Fine"), ("skip", "Skip")]),
                ),
            )
            .required(),
            Question::new(
                "abstract",
                "Upload your talk abstract (optional)",
                QuestionKind::FileUpload(FileUploadQuestion {
                    properties: FileUploadProperties {
                        allowed_types: vec![".pdf".into(), "text/*".into()],
                        max_files: Some(2),
                        max_file_size: Some(MAX_ABSTRACT_SIZE),
                    },
                }),
            ),
        ],
    )
    .with_settings(settings)
}
