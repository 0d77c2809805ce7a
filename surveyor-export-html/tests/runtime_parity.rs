//! The embedded browser runtime must behave like the `surveyor` crate.
//!
//! Each test loads `RUNTIME_JS` into a JavaScript engine, runs a scenario
//! through both implementations and compares what they report.

use boa_engine::{Context, JsError, Source};
use example_surveys::{customer_feedback, customer_feedback_auto_advance, event_registration};
use serde_json::{Value, json};
use surveyor::randomize::sections;
use surveyor::{
    ChoiceOption, LogicRule, Question, QuestionKind, ResponseValue, Responses, RuleCondition,
    Session, Step, SurveyDefinition, UploadedFile, ValidationFailure, resolve_visibility,
    validate::validate_response,
};
use surveyor_export_html::RUNTIME_JS;

/// A JavaScript context with `SurveyRuntime` loaded.
struct Runtime {
    context: Context,
}

impl Runtime {
    fn load() -> anyhow::Result<Self> {
        let mut context = Context::default();
        context.eval(Source::from_bytes("var window = globalThis;")).map_err(js)?;
        context.eval(Source::from_bytes(RUNTIME_JS)).map_err(js)?;
        Ok(Self { context })
    }

    /// Run a function body with `R` bound to `SurveyRuntime` and return its result as JSON.
    fn run(&mut self, body: &str) -> anyhow::Result<Value> {
        let script = format!("JSON.stringify((function (R) {{ {body} }})(SurveyRuntime))");
        let value = self.context.eval(Source::from_bytes(&script)).map_err(js)?;
        let text = value.to_string(&mut self.context).map_err(js)?.to_std_string_escaped();
        Ok(serde_json::from_str(&text)?)
    }
}

fn js(error: JsError) -> anyhow::Error {
    anyhow::anyhow!("javascript error: {error}")
}

fn responses(pairs: &[(&str, ResponseValue)]) -> Responses {
    let mut responses = Responses::new();
    for (id, value) in pairs {
        responses.insert(*id, value.clone());
    }
    responses
}

/// Resolve visibility in both runtimes, asserting they agree, and return the shared map.
fn visibility(runtime: &mut Runtime, definition: &SurveyDefinition, answers: &Responses) -> anyhow::Result<Value> {
    let expected = serde_json::to_value(resolve_visibility(&definition.questions, answers))?;
    let actual = runtime.run(&format!(
        "return R.resolveVisibility({}, {});",
        serde_json::to_string(&definition.questions)?,
        serde_json::to_string(answers)?
    ))?;
    assert_eq!(actual, expected, "visibility differs for {answers:?}");
    Ok(actual)
}

fn choice(id: &str) -> Question {
    Question::new(
        id,
        id,
        QuestionKind::multiple_choice(vec![ChoiceOption::new("x", "X"), ChoiceOption::new("y", "Y")]),
    )
}

fn text(id: &str) -> Question {
    Question::new(id, id, QuestionKind::OpenText(Default::default()))
}

#[test]
fn hide_dominates_and_show_is_any_of() -> anyhow::Result<()> {
    let definition = SurveyDefinition::new(
        "rules",
        "Rules",
        vec![
            choice("a").with_rule(LogicRule::show("t", RuleCondition::Equals, "x")),
            choice("b")
                .with_rule(LogicRule::show("t", RuleCondition::Equals, "x"))
                .with_rule(LogicRule::hide("t", RuleCondition::Equals, "y")),
            choice("c")
                .with_rule(LogicRule::show("u", RuleCondition::Equals, "x"))
                .with_rule(LogicRule::show("u", RuleCondition::Equals, "y")),
            text("t"),
            text("u"),
        ],
    );
    let mut runtime = Runtime::load()?;

    let cases: [(Vec<(&str, ResponseValue)>, bool, bool); 6] = [
        (vec![], false, false),
        (vec![("a", "x".into())], true, false),
        (vec![("b", "x".into())], true, false),
        (vec![("a", "x".into()), ("b", "y".into())], false, false),
        // Same source, target and action: the later rule replaces the earlier one.
        (vec![("c", "x".into())], false, false),
        (vec![("c", "y".into())], false, true),
    ];
    for (pairs, t, u) in cases {
        let map = visibility(&mut runtime, &definition, &responses(&pairs))?;
        assert_eq!(map["t"], json!(t), "t for {pairs:?}");
        assert_eq!(map["u"], json!(u), "u for {pairs:?}");
        assert_eq!(map["a"], json!(true));
    }
    Ok(())
}

#[test]
fn malformed_numbers_evaluate_false() -> anyhow::Result<()> {
    let definition = SurveyDefinition::new(
        "numbers",
        "Numbers",
        vec![
            Question::new("n", "n", QuestionKind::Numeric(Default::default()))
                .with_rule(LogicRule::show("big", RuleCondition::GreaterThan, 3))
                .with_rule(LogicRule::show("small", RuleCondition::LessThan, 3)),
            text("big"),
            text("small"),
        ],
    );
    let mut runtime = Runtime::load()?;

    for raw in ["abc", "", "1e400", "NaN", "inf", "0x10", "3 apples"] {
        let map = visibility(&mut runtime, &definition, &responses(&[("n", raw.into())]))?;
        assert_eq!(map["big"], json!(false), "big for {raw:?}");
        assert_eq!(map["small"], json!(false), "small for {raw:?}");
    }

    for (value, big, small) in [
        (ResponseValue::from(" 5 "), true, false),
        (ResponseValue::from("2"), false, true),
        (ResponseValue::from(7), true, false),
        (ResponseValue::from(3), false, false),
    ] {
        let map = visibility(&mut runtime, &definition, &responses(&[("n", value.clone())]))?;
        assert_eq!((map["big"].clone(), map["small"].clone()), (json!(big), json!(small)), "{value:?}");
    }
    Ok(())
}

#[test]
fn branching_in_sample_survey_agrees() -> anyhow::Result<()> {
    let definition = customer_feedback();
    let mut runtime = Runtime::load()?;

    let cases: Vec<Vec<(&str, ResponseValue)>> = vec![
        vec![],
        vec![("satisfaction", 2.into())],
        vec![("satisfaction", "2".into())],
        vec![("satisfaction", "two".into())],
        vec![("features", vec!["search", "support"].into())],
        vec![("features", "support".into())],
        vec![("contact_ok", "no".into())],
        vec![("contact_ok", "yes".into()), ("satisfaction", 5.into())],
    ];
    for pairs in cases {
        visibility(&mut runtime, &definition, &responses(&pairs))?;
    }
    Ok(())
}

/// The camelCase `kind` the browser runtime reports for a failure.
fn kind(failure: &ValidationFailure) -> &'static str {
    match failure {
        ValidationFailure::Required => "required",
        ValidationFailure::IncompleteMatrix { .. } => "incompleteMatrix",
        ValidationFailure::TypeMismatch { .. } => "typeMismatch",
        ValidationFailure::TooManyFiles { .. } => "tooManyFiles",
        ValidationFailure::FileTooLarge { .. } => "fileTooLarge",
        ValidationFailure::FileTypeNotAllowed { .. } => "fileTypeNotAllowed",
        ValidationFailure::NotANumber { .. } => "notANumber",
        ValidationFailure::BelowMinimum { .. } => "belowMinimum",
        ValidationFailure::AboveMaximum { .. } => "aboveMaximum",
        ValidationFailure::NotADate { .. } => "notADate",
        ValidationFailure::DateBeforeMinimum { .. } => "dateBeforeMinimum",
        ValidationFailure::DateAfterMaximum { .. } => "dateAfterMaximum",
        ValidationFailure::TooLong { .. } => "tooLong",
        ValidationFailure::TooFewSelections { .. } => "tooFewSelections",
        ValidationFailure::TooManySelections { .. } => "tooManySelections",
        ValidationFailure::UnknownOption { .. } => "unknownOption",
        ValidationFailure::DuplicateRanking { .. } => "duplicateRanking",
        ValidationFailure::OutOfScale { .. } => "outOfScale",
        ValidationFailure::UnknownMatrixCell { .. } => "unknownMatrixCell",
    }
}

#[test]
fn validation_agrees_across_question_types() -> anyhow::Result<()> {
    let registration = event_registration();
    let feedback = customer_feedback();
    let question = |definition: &SurveyDefinition, id: &str| -> anyhow::Result<Question> {
        definition
            .question(id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no question {id}"))
    };
    let cells = |pairs: &[(&str, &str)]| -> ResponseValue {
        ResponseValue::Matrix(pairs.iter().map(|(r, c)| (r.to_string(), c.to_string())).collect())
    };
    let pdf = |name: &str, size: u64| UploadedFile::new(name, size);

    let ticket = question(&registration, "ticket")?;
    let arrival = question(&registration, "arrival")?;
    let guests = question(&registration, "guests")?;
    let tracks = question(&registration, "tracks")?;
    let workshops = question(&registration, "workshops")?;
    let upload = question(&registration, "abstract")?;
    let satisfaction = question(&feedback, "satisfaction")?;
    let features = question(&feedback, "features")?;
    let went_wrong = question(&feedback, "what_went_wrong")?;

    let cases: Vec<(&Question, Option<ResponseValue>, Option<&str>)> = vec![
        (&ticket, None, Some("required")),
        (&ticket, Some("student".into()), None),
        (&ticket, Some("vip".into()), Some("unknownOption")),
        (&ticket, Some(vec!["student"].into()), Some("typeMismatch")),
        (&ticket, Some(" ".into()), Some("required")),
        (&arrival, Some("2026-09-02".into()), None),
        (&arrival, Some("2026-9-1".into()), Some("notADate")),
        (&arrival, Some("+2026-09-01".into()), Some("notADate")),
        (&arrival, Some("2026-02-30".into()), Some("notADate")),
        (&arrival, Some("2026-08-31".into()), Some("dateBeforeMinimum")),
        (&arrival, Some("2026-09-06".into()), Some("dateAfterMaximum")),
        (&arrival, Some(5.into()), Some("typeMismatch")),
        (&guests, None, None),
        (&guests, Some(2.into()), None),
        (&guests, Some("2".into()), None),
        (&guests, Some("two".into()), Some("notANumber")),
        (&guests, Some("1e400".into()), Some("notANumber")),
        (&guests, Some(4.into()), Some("aboveMaximum")),
        (&guests, Some((-1).into()), Some("belowMinimum")),
        (&tracks, Some(vec!["web", "embedded"].into()), None),
        (&tracks, Some(vec!["web", "web"].into()), Some("duplicateRanking")),
        (&tracks, Some(vec!["rust"].into()), Some("unknownOption")),
        (
            &workshops,
            Some(cells(&[("hands_on", "love"), ("talks", "fine"), ("panels", "skip")])),
            None,
        ),
        (&workshops, Some(cells(&[("hands_on", "love")])), Some("incompleteMatrix")),
        (&workshops, Some(cells(&[])), Some("required")),
        (&workshops, Some(cells(&[("hands_on", "meh")])), Some("unknownMatrixCell")),
        (&upload, Some(vec![pdf("talk.pdf", 10)].into()), None),
        (&upload, Some(vec![pdf("TALK.PDF", 10)].into()), None),
        (
            &upload,
            Some(vec![UploadedFile::new("notes", 10).with_mime_type("text/plain")].into()),
            None,
        ),
        (
            &upload,
            Some(vec![pdf("a.pdf", 1), pdf("b.pdf", 1), pdf("c.pdf", 1)].into()),
            Some("tooManyFiles"),
        ),
        (&upload, Some(vec![pdf("big.pdf", 3 * 1024 * 1024)].into()), Some("fileTooLarge")),
        (&upload, Some(vec![pdf("setup.exe", 10)].into()), Some("fileTypeNotAllowed")),
        (&satisfaction, Some(3.into()), None),
        (&satisfaction, Some("4".into()), None),
        (&satisfaction, Some(6.into()), Some("outOfScale")),
        (&satisfaction, Some(2.5.into()), Some("outOfScale")),
        (&satisfaction, Some("great".into()), Some("typeMismatch")),
        (&features, Some(vec!["search"].into()), None),
        (&features, Some(vec!["teleport"].into()), Some("unknownOption")),
        (&features, Some("search".into()), Some("typeMismatch")),
        (&went_wrong, Some("x".repeat(501).into()), Some("tooLong")),
        (&went_wrong, Some("ü".repeat(500).into()), None),
    ];

    let pairs: Vec<(&Question, Option<&ResponseValue>)> =
        cases.iter().map(|(q, v, _)| (*q, v.as_ref())).collect();
    let kinds = Runtime::load()?.run(&format!(
        "return {}.map(function (c) {{ var f = R.validate(c[0], c[1]); return f ? f.kind : null; }});",
        serde_json::to_string(&pairs)?
    ))?;

    for (index, (question, value, expected)) in cases.iter().enumerate() {
        let rust = validate_response(question, value.as_ref()).err();
        assert_eq!(rust.as_ref().map(kind), *expected, "rust: {} = {value:?}", question.id);
        assert_eq!(kinds[index], json!(expected), "runtime: {} = {value:?}", question.id);
    }
    Ok(())
}

#[test]
fn section_shuffle_keeps_groups() -> anyhow::Result<()> {
    let definition = customer_feedback();
    let ranges = sections(&definition.questions, Question::is_section_break);
    assert_eq!(ranges.len(), 2);

    let orders = Runtime::load()?.run(&format!(
        "var q = {}, s = {}, out = []; for (var i = 0; i < 25; i++) out.push(R.questionOrder(q, s)); return out;",
        serde_json::to_string(&definition.questions)?,
        serde_json::to_string(&definition.settings)?
    ))?;
    let orders: Vec<Vec<usize>> = serde_json::from_value(orders)?;

    for order in orders {
        for range in &ranges {
            let mut group = order[range.clone()].to_vec();
            group.sort_unstable();
            assert_eq!(group, range.clone().collect::<Vec<_>>(), "order {order:?}");
        }
    }
    Ok(())
}

enum Action {
    Respond(&'static str, ResponseValue),
    Next,
    Previous,
    Submit,
}

impl Action {
    fn to_json(&self) -> Value {
        match self {
            Action::Respond(id, value) => json!({ "respond": [id, value] }),
            Action::Next => json!("next"),
            Action::Previous => json!("previous"),
            Action::Submit => json!("submit"),
        }
    }

    /// Apply to a Rust session, reporting whether it advanced, moved or submitted.
    fn apply(&self, session: &mut Session<'_>) -> bool {
        match self {
            Action::Respond(id, value) => session.respond(id, value.clone()).is_ok_and(|o| o.advanced),
            Action::Next => matches!(session.next(), Ok(Step::Moved(_))),
            Action::Previous => matches!(session.previous(), Ok(Step::Moved(_))),
            Action::Submit => session.submit().is_ok(),
        }
    }
}

const SESSION_DRIVER: &str = r#"
    var s = new R.Session(DEFINITION);
    var report = function (ok) {
      var current = s.current();
      return {
        ok: ok,
        position: s.state.name === "answering" ? s.state.position : null,
        current: current ? current.id : null,
        progress: s.progress()
      };
    };
    var steps = ACTIONS.map(function (a) {
      if (a === "next") return report(s.next().moved);
      if (a === "previous") return report(s.previous().moved);
      if (a === "submit") return report(s.submit().submitted);
      return report(s.respond(a.respond[0], a.respond[1]).advanced);
    });
    var snapshot = s.state.name === "completed" ? s.state.snapshot : null;
    return { steps: steps, snapshot: snapshot, responses: s.responses };
"#;

#[test]
fn session_walkthrough_agrees() -> anyhow::Result<()> {
    let definition = customer_feedback_auto_advance();
    let actions = [
        // Required and unanswered.
        Action::Next,
        // Reveals what_went_wrong and advances onto it.
        Action::Respond("satisfaction", 2.into()),
        // Optional questions can be skipped in auto-advance mode.
        Action::Next,
        Action::Previous,
        Action::Respond("what_went_wrong", "Slow exports".into()),
        Action::Respond("features", vec!["support"].into()),
        Action::Respond("support_rating", 5.into()),
        Action::Next,
        // contact_ok is required.
        Action::Submit,
        // Hides email, making contact_ok the last question.
        Action::Respond("contact_ok", "no".into()),
        // Hides what_went_wrong; the cursor stays on contact_ok.
        Action::Respond("satisfaction", 4.into()),
        Action::Submit,
    ];

    let mut session = Session::new(&definition);
    let mut expected = Vec::new();
    for action in &actions {
        let ok = action.apply(&mut session);
        expected.push(json!({
            "ok": ok,
            "position": session.position(),
            "current": session.current_question().map(|q| q.id.as_str()),
            "progress": session.progress(),
        }));
    }

    let script = SESSION_DRIVER
        .replace("DEFINITION", &definition.to_json()?)
        .replace("ACTIONS", &serde_json::to_string(&actions.iter().map(Action::to_json).collect::<Vec<_>>())?);
    let actual = Runtime::load()?.run(&script)?;

    assert_eq!(actual["steps"], Value::Array(expected));
    assert_eq!(
        actual["steps"]
            .as_array()
            .map(|steps| steps.iter().map(|s| s["ok"].clone()).collect::<Vec<_>>()),
        Some(
            [false, true, true, true, true, true, true, true, false, false, false, true]
                .map(Value::from)
                .to_vec()
        )
    );

    // Hidden answers stay in the response state but not in the snapshot.
    assert_eq!(actual["responses"]["what_went_wrong"], json!("Slow exports"));
    assert_eq!(
        session.responses().get("what_went_wrong"),
        Some(&ResponseValue::from("Slow exports"))
    );

    let snapshot = session.snapshot().ok_or_else(|| anyhow::anyhow!("rust session not submitted"))?;
    let rust_rows: Vec<Value> = snapshot
        .entries
        .iter()
        .map(|e| json!([e.question_id, e.text, e.display]))
        .collect();
    let js_rows: Vec<Value> = actual["snapshot"]["entries"]
        .as_array()
        .ok_or_else(|| anyhow::anyhow!("runtime session not submitted"))?
        .iter()
        .map(|e| json!([e["questionId"], e["text"], e["display"]]))
        .collect();
    assert_eq!(js_rows, rust_rows);
    assert_eq!(
        js_rows,
        vec![
            json!(["satisfaction", "How satisfied are you overall?", "4 / 5"]),
            json!(["features", "Which features did you use?", "Customer support"]),
            json!(["support_rating", "How helpful was our support?", "5 / 5"]),
            json!(["contact_ok", "May we contact you?", "No"]),
        ]
    );
    Ok(())
}

#[test]
fn registration_snapshot_display_agrees() -> anyhow::Result<()> {
    let definition = event_registration();
    let actions = [
        Action::Respond("ticket", "regular".into()),
        Action::Next,
        Action::Respond("arrival", "2026-09-02".into()),
        Action::Next,
        Action::Respond("guests", 1.into()),
        Action::Next,
        Action::Next,
        Action::Respond("tracks", vec!["compilers", "web", "embedded"].into()),
        Action::Next,
        Action::Respond(
            "workshops",
            ResponseValue::Matrix(
                [("hands_on", "love"), ("talks", "fine"), ("panels", "skip")]
                    .map(|(r, c)| (r.to_string(), c.to_string()))
                    .into(),
            ),
        ),
        Action::Next,
        Action::Respond("abstract", vec![UploadedFile::new("talk.pdf", 2048)].into()),
        Action::Submit,
    ];

    let mut session = Session::new(&definition);
    for action in &actions {
        action.apply(&mut session);
    }
    let snapshot = session.snapshot().ok_or_else(|| anyhow::anyhow!("rust session not submitted"))?;

    let script = SESSION_DRIVER
        .replace("DEFINITION", &definition.to_json()?)
        .replace("ACTIONS", &serde_json::to_string(&actions.iter().map(Action::to_json).collect::<Vec<_>>())?);
    let actual = Runtime::load()?.run(&script)?;

    let js_display: Vec<Value> = actual["snapshot"]["entries"]
        .as_array()
        .ok_or_else(|| anyhow::anyhow!("runtime session not submitted"))?
        .iter()
        .map(|e| e["display"].clone())
        .collect();
    let rust_display: Vec<Value> = snapshot.entries.iter().map(|e| json!(e.display)).collect();
    assert_eq!(js_display, rust_display);
    assert_eq!(js_display.len(), 6);
    Ok(())
}

#[test]
fn navigation_actions_follow_the_cursor() -> anyhow::Result<()> {
    let feedback = customer_feedback_auto_advance();
    let empty = SurveyDefinition::new("empty", "Empty", vec![]);

    let actual = Runtime::load()?.run(&format!(
        r#"
        var s = new R.Session({feedback});
        var start = s.actions();
        s.respond("satisfaction", 4);
        var optional = s.actions();
        s.next();
        s.next();
        s.respond("contact_ok", "no");
        var last = s.actions();

        var e = new R.Session({empty});
        var empty = e.actions();
        var submitted = e.submit().submitted;
        return {{ start: start, optional: optional, last: last, empty: empty, submitted: submitted, done: e.actions() }};
        "#,
        feedback = feedback.to_json()?,
        empty = empty.to_json()?,
    ))?;

    assert_eq!(actual["start"], json!({ "back": false, "next": true, "submit": false }));
    // Auto-advance moved onto the optional features question; Next must still be offered.
    assert_eq!(actual["optional"], json!({ "back": true, "next": true, "submit": false }));
    assert_eq!(actual["last"], json!({ "back": true, "next": false, "submit": true }));
    // Nothing to show: Submit is still reachable.
    assert_eq!(actual["empty"], json!({ "back": false, "next": false, "submit": true }));
    assert_eq!(actual["submitted"], json!(true));
    assert_eq!(actual["done"], json!({ "back": false, "next": false, "submit": false }));

    let mut session = Session::new(&empty);
    assert!(session.current_question().is_none());
    assert!(session.submit()?.is_empty());
    Ok(())
}
