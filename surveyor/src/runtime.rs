//! The respondent-facing state machine.
//!
//! A [`Session`] walks a respondent through the *visible* questions of a
//! survey in presentation order. Every response recomputes visibility from
//! scratch, so the visible ordering (and therefore the cursor) can change
//! under the respondent's feet; the cursor is kept on the current question
//! while it stays visible and clamped into range otherwise.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use surveyor_types::{
    ChoiceOption, LocalizedText, NavigationStyle, Question, QuestionId, ResponseValue, Responses,
    SurveyDefinition,
};

use crate::randomize;
use crate::snapshot::ResponseSnapshot;
use crate::text::Locale;
use crate::validate::{self, ValidationFailure};
use crate::visibility::{VisibilityMap, resolve_visibility};

/// Options for starting a [`Session`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Seed for question and option shuffles. Drawn from entropy when unset.
    pub seed: Option<u64>,

    /// Initial language. The survey's default language when unset.
    pub language: Option<String>,
}

impl SessionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every shuffle reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Start in the given language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Where a session is.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Answering the question at `position` in the visible ordering.
    Answering { position: usize },

    /// Submitted. Terminal.
    Completed(ResponseSnapshot),
}

/// Errors from misusing a [`Session`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("The survey has already been submitted")]
    Completed,

    #[error("Unknown question '{0}'")]
    UnknownQuestion(QuestionId),

    #[error("Language '{0}' is not enabled for this survey")]
    UnsupportedLanguage(String),

    #[error("Question '{question}' is not answered correctly: {failure}")]
    Invalid {
        question: QuestionId,
        failure: ValidationFailure,
    },
}

/// The result of [`Session::respond`].
#[derive(Debug, Clone, PartialEq)]
pub struct RespondOutcome {
    /// Visibility after the response was recorded.
    pub visibility: VisibilityMap,

    /// Validation of the question that was answered.
    pub validation: Result<(), ValidationFailure>,

    /// Whether auto-advance moved the cursor.
    pub advanced: bool,
}

/// The result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The cursor moved to this position.
    Moved(usize),

    /// Already at the end in that direction.
    Stayed,
}

/// One respondent's pass through a survey.
#[derive(Debug, Clone)]
pub struct Session<'a> {
    definition: &'a SurveyDefinition,

    /// Presentation order, as indices into the definition's questions.
    order: Vec<usize>,

    responses: Responses,
    visibility: VisibilityMap,
    state: SessionState,
    locale: Locale,
    rng: ChaCha8Rng,
}

impl<'a> Session<'a> {
    /// Start a session in the survey's default language with an unseeded RNG.
    pub fn new(definition: &'a SurveyDefinition) -> Self {
        let rng = ChaCha8Rng::from_entropy();
        Self::with_rng(definition, Locale::from_settings(&definition.settings), rng)
    }

    /// Start a session with explicit options.
    pub fn with_options(definition: &'a SurveyDefinition, options: SessionOptions) -> Result<Self, SessionError> {
        let mut locale = Locale::from_settings(&definition.settings);
        if let Some(language) = options.language {
            if !definition.settings.supports_language(&language) {
                return Err(SessionError::UnsupportedLanguage(language));
            }
            locale.set_active(language);
        }
        let rng = match options.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self::with_rng(definition, locale, rng))
    }

    fn with_rng(definition: &'a SurveyDefinition, locale: Locale, mut rng: ChaCha8Rng) -> Self {
        let settings = &definition.settings;
        let order = randomize::question_order(
            &definition.questions,
            settings.randomize_questions,
            settings.respect_sections,
            &mut rng,
        );
        let responses = Responses::new();
        let visibility = resolve_visibility(&definition.questions, &responses);

        tracing::debug!(
            survey = %definition.id,
            questions = definition.len(),
            language = locale.active(),
            "Started session"
        );

        Self {
            definition,
            order,
            responses,
            visibility,
            state: SessionState::Answering { position: 0 },
            locale,
            rng,
        }
    }

    pub fn definition(&self) -> &'a SurveyDefinition {
        self.definition
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.state, SessionState::Completed(_))
    }

    /// The cursor, or `None` once submitted.
    pub fn position(&self) -> Option<usize> {
        match self.state {
            SessionState::Answering { position } => Some(position),
            SessionState::Completed(_) => None,
        }
    }

    /// The snapshot produced by [`Session::submit`].
    pub fn snapshot(&self) -> Option<&ResponseSnapshot> {
        match &self.state {
            SessionState::Completed(snapshot) => Some(snapshot),
            SessionState::Answering { .. } => None,
        }
    }

    pub fn responses(&self) -> &Responses {
        &self.responses
    }

    pub fn visibility(&self) -> &VisibilityMap {
        &self.visibility
    }

    /// Check if a question is currently visible. Unknown ids are not.
    pub fn is_visible(&self, id: &str) -> bool {
        self.visibility.get(id).copied().unwrap_or(false)
    }

    /// All questions in presentation order, hidden ones included.
    pub fn presentation_order(&self) -> impl Iterator<Item = &'a Question> + '_ {
        let definition: &'a SurveyDefinition = self.definition;
        self.order.iter().map(move |&index| &definition.questions[index])
    }

    /// The visible questions in presentation order.
    pub fn visible_questions(&self) -> Vec<&'a Question> {
        self.presentation_order()
            .filter(|q| self.visibility.get(&q.id).copied().unwrap_or(true))
            .collect()
    }

    /// The question under the cursor.
    pub fn current_question(&self) -> Option<&'a Question> {
        let position = self.position()?;
        self.visible_questions().get(position).copied()
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn language(&self) -> &str {
        self.locale.active()
    }

    /// Resolve a text in the session's language.
    pub fn text<'t>(&self, field: &'t LocalizedText) -> &'t str {
        self.locale.resolve(field)
    }

    /// Switch the active language.
    pub fn set_language(&mut self, language: &str) -> Result<(), SessionError> {
        self.ensure_answering()?;
        if !self.definition.settings.supports_language(language) {
            return Err(SessionError::UnsupportedLanguage(language.to_string()));
        }
        tracing::debug!(from = self.locale.active(), to = language, "Switched language");
        self.locale.set_active(language);
        Ok(())
    }

    /// Completion percentage for a progress bar.
    pub fn progress(&self) -> u8 {
        match self.state {
            SessionState::Completed(_) => 100,
            SessionState::Answering { position } => {
                let visible = self.visible_questions().len();
                if visible == 0 {
                    return 0;
                }
                let percent = (position + 1) as f64 / visible as f64 * 100.0;
                percent.round().min(100.0) as u8
            }
        }
    }

    /// The options of a question in presentation order.
    ///
    /// Questions with randomized options get a fresh shuffle on every call.
    pub fn presented_options(&mut self, id: &str) -> Result<Vec<&'a ChoiceOption>, SessionError> {
        let question = self.lookup(id)?;
        Ok(randomize::presented_options(question, &mut self.rng))
    }

    /// Record a response and recompute visibility.
    pub fn respond(
        &mut self,
        id: &str,
        value: impl Into<ResponseValue>,
    ) -> Result<RespondOutcome, SessionError> {
        let position = self.ensure_answering()?;
        let question = self.lookup(id)?;
        let current = self.current_question().map(|q| q.id.clone());

        self.responses.insert(question.id.clone(), value.into());
        self.visibility = resolve_visibility(&self.definition.questions, &self.responses);

        let visible = self.visible_questions();
        let mut position = match current.as_ref() {
            Some(current) => visible
                .iter()
                .position(|q| q.id == *current)
                .unwrap_or(position),
            None => position,
        };
        position = position.min(visible.len().saturating_sub(1));

        let validation = validate::validate(question, &self.responses);
        let responded_to_current = current.as_ref() == Some(&question.id);
        let auto_advance = self.definition.settings.navigation_style == NavigationStyle::AutoAdvance;
        let advanced = auto_advance
            && responded_to_current
            && validation.is_ok()
            && visible.get(position).is_some_and(|q| q.id == question.id)
            && position + 1 < visible.len();
        if advanced {
            position += 1;
        }

        tracing::debug!(
            question = %question.id,
            valid = validation.is_ok(),
            position,
            visible = visible.len(),
            advanced,
            "Recorded response"
        );
        self.state = SessionState::Answering { position };

        Ok(RespondOutcome {
            visibility: self.visibility.clone(),
            validation,
            advanced,
        })
    }

    /// Move to the next visible question.
    ///
    /// Refused while the current question does not validate.
    pub fn next(&mut self) -> Result<Step, SessionError> {
        let position = self.ensure_answering()?;
        self.check_current()?;

        let visible = self.visible_questions().len();
        if position + 1 >= visible {
            return Ok(Step::Stayed);
        }
        self.state = SessionState::Answering { position: position + 1 };
        tracing::debug!(from = position, to = position + 1, "Moved forward");
        Ok(Step::Moved(position + 1))
    }

    /// Move to the previous visible question. Never validates.
    pub fn previous(&mut self) -> Result<Step, SessionError> {
        let position = self.ensure_answering()?;
        if position == 0 {
            return Ok(Step::Stayed);
        }
        self.state = SessionState::Answering { position: position - 1 };
        tracing::debug!(from = position, to = position - 1, "Moved back");
        Ok(Step::Moved(position - 1))
    }

    /// Finish the session and produce the response snapshot.
    ///
    /// Refused while the current question does not validate.
    pub fn submit(&mut self) -> Result<ResponseSnapshot, SessionError> {
        self.ensure_answering()?;
        self.check_current()?;

        let snapshot = ResponseSnapshot::capture(
            self.definition.id.clone(),
            self.presentation_order(),
            &self.responses,
            &self.visibility,
            &self.locale,
        );
        tracing::debug!(survey = %self.definition.id, answered = snapshot.len(), "Submitted");
        self.state = SessionState::Completed(snapshot.clone());
        Ok(snapshot)
    }

    /// Validation failures of every visible question, by id.
    pub fn failures(&self) -> BTreeMap<QuestionId, ValidationFailure> {
        validate::validate_all(self.visible_questions(), &self.responses, &self.visibility)
    }

    fn ensure_answering(&self) -> Result<usize, SessionError> {
        self.position().ok_or(SessionError::Completed)
    }

    fn lookup(&self, id: &str) -> Result<&'a Question, SessionError> {
        self.definition
            .question(id)
            .ok_or_else(|| SessionError::UnknownQuestion(QuestionId::new(id)))
    }

    fn check_current(&self) -> Result<(), SessionError> {
        let Some(question) = self.current_question() else {
            return Ok(());
        };
        validate::validate(question, &self.responses).map_err(|failure| SessionError::Invalid {
            question: question.id.clone(),
            failure,
        })
    }
}
