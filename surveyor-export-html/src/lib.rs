//! # surveyor-export-html
//!
//! Compile a [`SurveyDefinition`](surveyor::SurveyDefinition) into one
//! self-contained HTML file that runs the survey offline.
//!
//! The document embeds a style sheet generated from the theme, the
//! definition as JSON, the browser runtime and its presentation layer, plus
//! a `<noscript>` rendering of every question.
//!
//! ```rust
//! use surveyor::{Question, QuestionKind, SurveyDefinition};
//! use surveyor_export_html::{HtmlOptions, compile_with_options};
//!
//! let definition = SurveyDefinition::new(
//!     "poll",
//!     "Team Poll",
//!     vec![Question::new("name", "Your name", QuestionKind::OpenText(Default::default()))],
//! );
//!
//! let artifact = compile_with_options(&definition, &HtmlOptions::new().with_class_prefix("poll")).unwrap();
//! assert_eq!(artifact.file_name, "team-poll.html");
//! assert!(artifact.html.contains("<title>Team Poll</title>"));
//! ```

mod fallback;
mod generator;
mod styles;

pub use fallback::generate_fallback;
pub use generator::{
    ExportArtifact, ExportError, HtmlOptions, RUNTIME_JS, compile, compile_with_options,
};
pub use styles::generate_styles;
