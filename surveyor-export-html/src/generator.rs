//! Self-contained HTML document assembly.

use chrono::{DateTime, SecondsFormat, Utc};
use surveyor::SurveyDefinition;
use surveyor::text::resolve;

use crate::fallback::generate_fallback;
use crate::styles::generate_styles;

/// Browser runtime: visibility, validation, shuffling and the session state machine.
///
/// Defines `window.SurveyRuntime`; it has no DOM dependency of its own.
pub const RUNTIME_JS: &str = include_str!("../assets/runtime.js");

/// Presentation layer rendering the session into the document.
const PRESENTER_JS: &str = include_str!("../assets/presenter.js");

/// Errors that can occur while compiling a survey.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to serialize survey definition: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Options for HTML generation.
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Document title; defaults to the survey title in the default language.
    pub title: Option<String>,
    /// Whether to include the theme style sheet.
    pub include_styles: bool,
    /// Custom CSS class prefix for all generated elements.
    pub class_prefix: String,
    /// Script URLs loaded before the runtime.
    pub runtime_libraries: Vec<String>,
    /// Generation time written into the document head.
    pub generated_at: Option<DateTime<Utc>>,
}

impl HtmlOptions {
    /// Create new options with default values.
    pub fn new() -> Self {
        Self {
            title: None,
            include_styles: true,
            class_prefix: "survey".to_string(),
            runtime_libraries: Vec::new(),
            generated_at: None,
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable the theme style sheet.
    pub fn with_styles(mut self, include: bool) -> Self {
        self.include_styles = include;
        self
    }

    /// Set a custom CSS class prefix.
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    /// Load a third-party script before the runtime.
    ///
    /// These are the only network references a compiled document contains.
    pub fn with_runtime_library(mut self, url: impl Into<String>) -> Self {
        self.runtime_libraries.push(url.into());
        self
    }

    /// Stamp the document with its generation time.
    ///
    /// Without a timestamp, compiling the same definition twice gives identical bytes.
    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }
}

/// A compiled survey document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// The complete HTML document.
    pub html: String,
    /// Suggested file name, derived from the title.
    pub file_name: String,
}

/// Compile a survey definition into a self-contained HTML document.
pub fn compile(definition: &SurveyDefinition) -> Result<ExportArtifact, ExportError> {
    compile_with_options(definition, &HtmlOptions::new())
}

/// Compile a survey definition with custom options.
pub fn compile_with_options(
    definition: &SurveyDefinition,
    options: &HtmlOptions,
) -> Result<ExportArtifact, ExportError> {
    for issue in definition.lint() {
        tracing::warn!(survey = %definition.id, "{issue}");
    }

    let title = document_title(definition, options);
    let html = generate_html(definition, options, &title)?;
    let file_name = file_name(&title, &definition.id);

    tracing::debug!(survey = %definition.id, bytes = html.len(), file_name = %file_name, "compiled survey");
    Ok(ExportArtifact { html, file_name })
}

fn document_title(definition: &SurveyDefinition, options: &HtmlOptions) -> String {
    if let Some(title) = &options.title {
        return title.clone();
    }
    let default = &definition.settings.default_language;
    let title = resolve(&definition.title, default, default);
    if title.is_empty() {
        definition.id.clone()
    } else {
        title.to_string()
    }
}

/// Generate the full document.
fn generate_html(
    definition: &SurveyDefinition,
    options: &HtmlOptions,
    title: &str,
) -> Result<String, ExportError> {
    let mut html = String::new();
    let prefix = escape_html(&options.class_prefix);
    let language = &definition.settings.default_language;

    html.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n",
        escape_html(language)
    ));
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str("  <meta name=\"generator\" content=\"surveyor-export-html\">\n");
    if let Some(generated_at) = options.generated_at {
        html.push_str(&format!(
            "  <meta name=\"generated-at\" content=\"{}\">\n",
            generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }
    html.push_str(&format!("  <title>{}</title>\n", escape_html(title)));

    if options.include_styles {
        html.push_str("  <style>\n");
        html.push_str(&generate_styles(&definition.settings.theme, &options.class_prefix));
        html.push_str("  </style>\n");
    }

    for url in &options.runtime_libraries {
        html.push_str(&format!("  <script src=\"{}\"></script>\n", escape_html(url)));
    }

    html.push_str("</head>\n<body>\n");
    html.push_str(&format!(
        "<div id=\"survey-root\" class=\"{prefix}-root\" data-class-prefix=\"{prefix}\"></div>\n"
    ));

    html.push_str("<noscript>\n");
    html.push_str(&generate_fallback(definition, &options.class_prefix));
    html.push_str("</noscript>\n");

    html.push_str(&format!(
        "<script type=\"application/json\" id=\"survey-definition\">{}</script>\n",
        embed_json(definition)?
    ));
    html.push_str(&format!("<script>\n{RUNTIME_JS}</script>\n"));
    html.push_str(&format!("<script>\n{PRESENTER_JS}</script>\n"));
    html.push_str("</body>\n</html>\n");

    Ok(html)
}

/// Serialize the definition for a `<script type="application/json">` block.
///
/// The block ends at the first `</`, so every `</` is written as `<\/`
/// (an equivalent JSON string escape). `<!--` is escaped as well.
fn embed_json(definition: &SurveyDefinition) -> Result<String, serde_json::Error> {
    Ok(definition
        .to_json()?
        .replace("</", "<\\/")
        .replace("<!--", "\\u003c!--"))
}

/// Lowercase ASCII slug of the title, falling back to the survey id.
fn file_name(title: &str, id: &str) -> String {
    let slug = slugify(title);
    let slug = if slug.is_empty() { slugify(id) } else { slug };
    if slug.is_empty() {
        "survey.html".to_string()
    } else {
        format!("{slug}.html")
    }
}

fn slugify(text: &str) -> String {
    let mut slug = String::new();
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Escape HTML special characters.
pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
