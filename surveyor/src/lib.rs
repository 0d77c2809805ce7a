//! # surveyor
//!
//! Run declarative surveys: conditional visibility, localized text,
//! per-type validation and randomized presentation order.
//!
//! A [`SurveyDefinition`] is plain data (usually loaded from JSON). A
//! [`Session`] walks one respondent through it:
//!
//! ```rust
//! use surveyor::{ChoiceOption, LogicRule, Question, QuestionKind, RuleCondition, Session, SurveyDefinition};
//!
//! let definition = SurveyDefinition::new(
//!     "lunch",
//!     "Lunch",
//!     vec![
//!         Question::new(
//!             "hungry",
//!             "Hungry?",
//!             QuestionKind::multiple_choice(vec![ChoiceOption::new("yes", "Yes"), ChoiceOption::new("no", "No")]),
//!         )
//!         .required()
//!         .with_rule(LogicRule::show("dish", RuleCondition::Equals, "yes")),
//!         Question::new("dish", "What would you like?", QuestionKind::OpenText(Default::default())),
//!     ],
//! );
//!
//! let mut session = Session::new(&definition);
//! assert!(!session.is_visible("dish"));
//!
//! session.respond("hungry", "yes").unwrap();
//! assert!(session.is_visible("dish"));
//!
//! session.next().unwrap();
//! session.respond("dish", "Soup").unwrap();
//! let snapshot = session.submit().unwrap();
//! assert_eq!(snapshot.len(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`visibility`] - show/hide rule evaluation
//! - [`text`] - language fallback for localized text
//! - [`validate`] - required-ness and per-type constraints
//! - [`randomize`] - question and option shuffles
//! - [`runtime`] - the session state machine
//! - [`snapshot`] - the summary produced on submit
//!
//! The logging is done through `tracing`; no subscriber is installed here.

// Re-export all types from surveyor-types
pub use surveyor_types::*;

pub mod randomize;
pub mod runtime;
pub mod snapshot;
pub mod text;
pub mod validate;
pub mod visibility;

pub use runtime::{RespondOutcome, Session, SessionError, SessionOptions, SessionState, Step};
pub use snapshot::{ResponseSnapshot, SnapshotEntry, display_value};
pub use text::Locale;
pub use validate::{ValidationFailure, is_valid, validate, validate_all};
pub use visibility::{VisibilityMap, resolve_visibility};

// Scripted respondent for running surveys without user interaction
mod scripted;
pub use scripted::{Respondent, ScriptError, ScriptedRespondent};
