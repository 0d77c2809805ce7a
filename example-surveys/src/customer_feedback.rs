use surveyor_types::{
    ChoiceOption, LikertProperties, LikertQuestion, LocalizedText, LogicRule, NavigationStyle,
    OpenTextProperties, OpenTextQuestion, Question, QuestionKind, RuleCondition, SurveyDefinition,
    SurveySettings,
};

/// Text in English and German.
fn en_de(en: &str, de: &str) -> LocalizedText {
    LocalizedText::localized([("en", en), ("de", de)])
}

fn option(id: &str, en: &str, de: &str) -> ChoiceOption {
    ChoiceOption::new(id, en_de(en, de))
}

fn rating(min: &str, max: &str) -> QuestionKind {
    QuestionKind::LikertScale(LikertQuestion {
        properties: LikertProperties {
            scale: 5,
            min_label: LocalizedText::plain(min),
            max_label: LocalizedText::plain(max),
        },
    })
}

/// A bilingual feedback survey with two sections and branching.
///
/// - `satisfaction` below 3 reveals `what_went_wrong`;
/// - picking `support` in `features` reveals `support_rating`;
/// - answering `no` to `contact_ok` hides `email`.
///
/// Questions are shuffled within their section.
pub fn customer_feedback() -> SurveyDefinition {
    let settings = SurveySettings {
        languages: vec!["en".into(), "de".into()],
        randomize_questions: true,
        respect_sections: true,
        completion_message: en_de("Thanks for the feedback!", "Danke für Ihr Feedback!"),
        ..Default::default()
    };

    SurveyDefinition::new(
        "customer-feedback",
        en_de("Customer Feedback", "Kundenfeedback"),
        vec![
            Question::new(
                "satisfaction",
                en_de("How satisfied are you overall?", "Wie zufrieden sind Sie insgesamt?"),
                rating("Not at all", "Very"),
            )
            .required()
            .with_rule(LogicRule::show("what_went_wrong", RuleCondition::LessThan, 3)),
            Question::new(
                "what_went_wrong",
                en_de("What went wrong?", "Was ist schiefgelaufen?"),
                QuestionKind::OpenText(OpenTextQuestion {
                    properties: OpenTextProperties {
                        multiline: true,
                        max_length: Some(500),
                        placeholder: LocalizedText::default(),
                    },
                }),
            ),
            Question::new(
                "features",
                en_de("Which features did you use?", "Welche Funktionen haben Sie genutzt?"),
                QuestionKind::checkbox_group(vec![
                    option("search", "Search", "Suche"),
                    option("export", "Export", "Export"),
                    option("support", "Customer support", "Kundendienst"),
                ]),
            )
            .with_rule(LogicRule::show("support_rating", RuleCondition::Contains, "support")),
            Question::new(
                "support_rating",
                en_de("How helpful was our support?", "Wie hilfreich war unser Kundendienst?"),
                rating("Useless", "Excellent"),
            ),
            Question::section_break("contact", en_de("Staying in touch", "In Kontakt bleiben")),
            Question::new(
                "contact_ok",
                en_de("May we contact you?", "Dürfen wir Sie kontaktieren?"),
                QuestionKind::multiple_choice(vec![option("yes", "Yes", "Ja"), option("no", "No", "Nein")]),
            )
            .required()
            .with_rule(LogicRule::hide("email", RuleCondition::Equals, "no")),
            Question::new(
                "email",
                en_de("Your email address", "Ihre E-Mail-Adresse"),
                QuestionKind::OpenText(Default::default()),
            )
            .with_description(en_de("We never share it.", "Wir geben sie nicht weiter.")),
        ],
    )
    .with_description(en_de(
        "Five minutes to help us improve.",
        "Fünf Minuten, die uns helfen, besser zu werden.",
    ))
    .with_settings(settings)
}

/// The same survey, advancing automatically after each valid answer.
pub fn customer_feedback_auto_advance() -> SurveyDefinition {
    let mut definition = customer_feedback();
    definition.settings.navigation_style = NavigationStyle::AutoAdvance;
    definition.settings.randomize_questions = false;
    definition
}
