//! Static rendering of every question, shown when scripts are disabled.

use surveyor::text::resolve;
use surveyor::{
    ChoiceOption, LocalizedText, Question, QuestionKind, QuestionNumbering, RequiredIndicator,
    SurveyDefinition,
};

use crate::generator::escape_html;

/// Render the whole survey as a plain form in the default language.
///
/// All questions are listed in authored order; visibility rules need the runtime.
pub fn generate_fallback(definition: &SurveyDefinition, prefix: &str) -> String {
    let prefix = &escape_html(prefix);
    let settings = &definition.settings;
    let text = |field: &LocalizedText| {
        escape_html(resolve(field, &settings.default_language, &settings.default_language))
    };

    let mut html = String::new();
    html.push_str(&format!("<form class=\"{prefix}-form\">\n"));
    html.push_str(&format!(
        "  <h1 class=\"{prefix}-title\">{}</h1>\n",
        text(&definition.title)
    ));
    if !definition.description.is_empty() {
        html.push_str(&format!(
            "  <p class=\"{prefix}-description\">{}</p>\n",
            text(&definition.description)
        ));
    }

    let mut number = 0;
    for question in definition.questions() {
        let label = if question.is_section_break() {
            text(&question.text)
        } else {
            number += 1;
            let mut label = match settings.question_numbering {
                QuestionNumbering::Visible => format!("{number}. {}", text(&question.text)),
                QuestionNumbering::Hidden => text(&question.text),
            };
            if question.required {
                label.push_str(&required_marker(settings.required_indicator, prefix));
            }
            label
        };
        html.push_str(&generate_question(question, &label, prefix, &text));
    }

    html.push_str("</form>\n");
    html
}

fn required_marker(indicator: RequiredIndicator, prefix: &str) -> String {
    match indicator {
        RequiredIndicator::Asterisk => format!("<span class=\"{prefix}-required\"> *</span>"),
        RequiredIndicator::Text => format!("<span class=\"{prefix}-required\"> (required)</span>"),
        RequiredIndicator::None => String::new(),
    }
}

/// Generate HTML for a single question. `label` is already escaped.
fn generate_question(
    question: &Question,
    label: &str,
    prefix: &str,
    text: &impl Fn(&LocalizedText) -> String,
) -> String {
    let ind = "  ";
    let id = escape_html(question.id.as_str());
    let mut html = String::new();

    if let QuestionKind::SectionBreak = question.kind {
        html.push_str(&format!(
            "{ind}<h2 class=\"{prefix}-section-title\">{label}</h2>\n"
        ));
        push_description(&mut html, question, prefix, text);
        return html;
    }

    match &question.kind {
        QuestionKind::MultipleChoice(choice) => {
            html.push_str(&fieldset_start(prefix, label));
            push_description(&mut html, question, prefix, text);
            push_options(&mut html, &choice.options, "radio", &id, prefix, text);
            html.push_str(&format!("{ind}</fieldset>\n"));
        }

        QuestionKind::CheckboxGroup(checkbox) => {
            html.push_str(&fieldset_start(prefix, label));
            push_description(&mut html, question, prefix, text);
            push_options(&mut html, &checkbox.options, "checkbox", &id, prefix, text);
            html.push_str(&format!("{ind}</fieldset>\n"));
        }

        QuestionKind::Dropdown(choice) => {
            html.push_str(&field_start(prefix, &id, label));
            push_description(&mut html, question, prefix, text);
            html.push_str(&format!(
                "{ind}  <select id=\"{id}\" name=\"{id}\" class=\"{prefix}-select\">\n"
            ));
            html.push_str(&format!("{ind}    <option value=\"\"></option>\n"));
            for option in &choice.options {
                html.push_str(&format!(
                    "{ind}    <option value=\"{}\">{}</option>\n",
                    escape_html(&option.id),
                    text(&option.text)
                ));
            }
            html.push_str(&format!("{ind}  </select>\n"));
            html.push_str(&format!("{ind}</div>\n"));
        }

        QuestionKind::LikertScale(likert) => {
            let properties = &likert.properties;
            html.push_str(&fieldset_start(prefix, label));
            push_description(&mut html, question, prefix, text);
            html.push_str(&format!("{ind}  <div class=\"{prefix}-likert\">\n"));
            if !properties.min_label.is_empty() {
                html.push_str(&format!(
                    "{ind}    <span class=\"{prefix}-likert-label\">{}</span>\n",
                    text(&properties.min_label)
                ));
            }
            for point in 1..=properties.scale {
                html.push_str(&format!(
                    "{ind}    <label><input type=\"radio\" name=\"{id}\" value=\"{point}\"> {point}</label>\n"
                ));
            }
            if !properties.max_label.is_empty() {
                html.push_str(&format!(
                    "{ind}    <span class=\"{prefix}-likert-label\">{}</span>\n",
                    text(&properties.max_label)
                ));
            }
            html.push_str(&format!("{ind}  </div>\n"));
            html.push_str(&format!("{ind}</fieldset>\n"));
        }

        QuestionKind::OpenText(open) => {
            let properties = &open.properties;
            let mut attrs = format!("id=\"{id}\" name=\"{id}\" class=\"{prefix}-input\"");
            if let Some(max) = properties.max_length {
                attrs.push_str(&format!(" maxlength=\"{max}\""));
            }
            if !properties.placeholder.is_empty() {
                attrs.push_str(&format!(" placeholder=\"{}\"", text(&properties.placeholder)));
            }

            html.push_str(&field_start(prefix, &id, label));
            push_description(&mut html, question, prefix, text);
            if properties.multiline {
                html.push_str(&format!("{ind}  <textarea rows=\"4\" {attrs}></textarea>\n"));
            } else {
                html.push_str(&format!("{ind}  <input type=\"text\" {attrs}>\n"));
            }
            html.push_str(&format!("{ind}</div>\n"));
        }

        QuestionKind::Numeric(numeric) => {
            let properties = &numeric.properties;
            let mut attrs = format!("type=\"number\" id=\"{id}\" name=\"{id}\" class=\"{prefix}-input\"");
            if let Some(min) = properties.min {
                attrs.push_str(&format!(" min=\"{min}\""));
            }
            if let Some(max) = properties.max {
                attrs.push_str(&format!(" max=\"{max}\""));
            }
            match properties.step {
                Some(step) => attrs.push_str(&format!(" step=\"{step}\"")),
                None => attrs.push_str(" step=\"any\""),
            }

            html.push_str(&field_start(prefix, &id, label));
            push_description(&mut html, question, prefix, text);
            html.push_str(&format!("{ind}  <input {attrs}>\n"));
            html.push_str(&format!("{ind}</div>\n"));
        }

        QuestionKind::Date(date) => {
            let properties = &date.properties;
            let mut attrs = format!("type=\"date\" id=\"{id}\" name=\"{id}\" class=\"{prefix}-input\"");
            if let Some(min) = properties.min {
                attrs.push_str(&format!(" min=\"{}\"", min.format("%Y-%m-%d")));
            }
            if let Some(max) = properties.max {
                attrs.push_str(&format!(" max=\"{}\"", max.format("%Y-%m-%d")));
            }

            html.push_str(&field_start(prefix, &id, label));
            push_description(&mut html, question, prefix, text);
            html.push_str(&format!("{ind}  <input {attrs}>\n"));
            html.push_str(&format!("{ind}</div>\n"));
        }

        QuestionKind::Ranking(ranking) => {
            html.push_str(&fieldset_start(prefix, label));
            push_description(&mut html, question, prefix, text);
            html.push_str(&format!("{ind}  <ol class=\"{prefix}-ranking\">\n"));
            for option in &ranking.options {
                html.push_str(&format!(
                    "{ind}    <li class=\"{prefix}-ranking-item\">{}</li>\n",
                    text(&option.text)
                ));
            }
            html.push_str(&format!("{ind}  </ol>\n"));
            html.push_str(&format!("{ind}</fieldset>\n"));
        }

        QuestionKind::Matrix(matrix) => {
            html.push_str(&fieldset_start(prefix, label));
            push_description(&mut html, question, prefix, text);
            html.push_str(&format!("{ind}  <table class=\"{prefix}-matrix\">\n"));
            html.push_str(&format!("{ind}    <tr><th></th>"));
            for column in &matrix.columns {
                html.push_str(&format!("<th>{}</th>", text(&column.text)));
            }
            html.push_str("</tr>\n");
            for row in &matrix.rows {
                let row_id = escape_html(&row.id);
                html.push_str(&format!("{ind}    <tr><th>{}</th>", text(&row.text)));
                for column in &matrix.columns {
                    html.push_str(&format!(
                        "<td><input type=\"radio\" name=\"{id}-{row_id}\" value=\"{}\"></td>",
                        escape_html(&column.id)
                    ));
                }
                html.push_str("</tr>\n");
            }
            html.push_str(&format!("{ind}  </table>\n"));
            html.push_str(&format!("{ind}</fieldset>\n"));
        }

        QuestionKind::FileUpload(upload) => {
            let properties = &upload.properties;
            let mut attrs = format!("type=\"file\" id=\"{id}\" name=\"{id}\" class=\"{prefix}-input\"");
            if !properties.allowed_types.is_empty() {
                attrs.push_str(&format!(
                    " accept=\"{}\"",
                    escape_html(&properties.allowed_types.join(","))
                ));
            }
            if properties.max_files != Some(1) {
                attrs.push_str(" multiple");
            }

            html.push_str(&field_start(prefix, &id, label));
            push_description(&mut html, question, prefix, text);
            html.push_str(&format!("{ind}  <input {attrs}>\n"));
            html.push_str(&format!("{ind}</div>\n"));
        }

        QuestionKind::SectionBreak => {}
    }

    html
}

fn field_start(prefix: &str, id: &str, label: &str) -> String {
    format!("  <div class=\"{prefix}-field\">\n    <label for=\"{id}\">{label}</label>\n")
}

fn fieldset_start(prefix: &str, label: &str) -> String {
    format!("  <fieldset class=\"{prefix}-field\">\n    <legend>{label}</legend>\n")
}

fn push_description(
    html: &mut String,
    question: &Question,
    prefix: &str,
    text: &impl Fn(&LocalizedText) -> String,
) {
    if !question.description.is_empty() {
        html.push_str(&format!(
            "    <p class=\"{prefix}-description\">{}</p>\n",
            text(&question.description)
        ));
    }
}

fn push_options(
    html: &mut String,
    options: &[ChoiceOption],
    input_type: &str,
    name: &str,
    prefix: &str,
    text: &impl Fn(&LocalizedText) -> String,
) {
    for option in options {
        html.push_str(&format!(
            "    <label class=\"{prefix}-option\"><input type=\"{input_type}\" name=\"{name}\" value=\"{}\"> {}</label>\n",
            escape_html(&option.id),
            text(&option.text)
        ));
    }
}
