//! Style sheet generated from the survey theme.

use surveyor::Theme;

/// Generate the style sheet for `theme`, with every class under `prefix`.
///
/// Pure: the same theme and prefix always give the same CSS.
pub fn generate_styles(theme: &Theme, prefix: &str) -> String {
    let primary = css_value(&theme.primary_color);
    let background = css_value(&theme.background_color);
    let text = css_value(&theme.text_color);
    let font = css_value(&theme.font_family);
    let prefix = css_value(prefix);

    format!(
        r#"    .{prefix}-root, .{prefix}-form {{
      --{prefix}-primary: {primary};
      --{prefix}-background: {background};
      --{prefix}-text: {text};
      --{prefix}-font: {font};
    }}
    body {{
      margin: 0;
      background: {background};
      color: {text};
      font-family: {font};
    }}
    .{prefix}-container, .{prefix}-form {{
      max-width: 640px;
      margin: 2rem auto;
      padding: 1rem;
    }}
    .{prefix}-title {{
      margin: 0 0 0.5rem;
      color: var(--{prefix}-primary);
    }}
    .{prefix}-description {{
      margin: 0.25rem 0 0.75rem;
      opacity: 0.8;
      white-space: pre-wrap;
    }}
    .{prefix}-language {{
      float: right;
    }}
    .{prefix}-progress {{
      height: 6px;
      margin: 1rem 0;
      border-radius: 3px;
      background: rgba(0, 0, 0, 0.08);
      overflow: hidden;
    }}
    .{prefix}-progress-fill {{
      height: 100%;
      background: var(--{prefix}-primary);
      transition: width 0.2s ease;
    }}
    .{prefix}-section-title {{
      border-bottom: 2px solid var(--{prefix}-primary);
      padding-bottom: 0.25rem;
    }}
    .{prefix}-field {{
      margin: 1rem 0;
    }}
    .{prefix}-field > label, .{prefix}-field legend {{
      display: block;
      margin-bottom: 0.5rem;
      font-weight: 600;
    }}
    .{prefix}-required {{
      color: var(--{prefix}-primary);
    }}
    .{prefix}-input, .{prefix}-select {{
      width: 100%;
      padding: 0.5rem;
      box-sizing: border-box;
      font: inherit;
    }}
    .{prefix}-option {{
      display: block;
      margin: 0.25rem 0;
    }}
    .{prefix}-likert {{
      display: flex;
      align-items: center;
      gap: 0.5rem;
    }}
    .{prefix}-likert-point {{
      min-width: 2.5rem;
      padding: 0.5rem;
      border: 1px solid var(--{prefix}-primary);
      background: transparent;
      color: inherit;
      cursor: pointer;
    }}
    .{prefix}-likert-point.{prefix}-selected, .{prefix}-likert-point:hover {{
      background: var(--{prefix}-primary);
      color: #ffffff;
    }}
    .{prefix}-matrix {{
      width: 100%;
      border-collapse: collapse;
    }}
    .{prefix}-matrix th, .{prefix}-matrix td {{
      padding: 0.25rem 0.5rem;
      text-align: center;
    }}
    .{prefix}-matrix tr > th:first-child {{
      text-align: left;
    }}
    .{prefix}-ranking-item {{
      margin: 0.25rem 0;
    }}
    .{prefix}-ranking-up {{
      margin-left: 0.5rem;
    }}
    .{prefix}-error {{
      color: #b91c1c;
    }}
    .{prefix}-nav {{
      display: flex;
      justify-content: space-between;
      margin-top: 1.5rem;
    }}
    .{prefix}-button {{
      padding: 0.5rem 1.25rem;
      border: none;
      border-radius: 4px;
      background: var(--{prefix}-primary);
      color: #ffffff;
      font: inherit;
      cursor: pointer;
    }}
    .{prefix}-button.{prefix}-secondary {{
      background: transparent;
      color: var(--{prefix}-primary);
      border: 1px solid var(--{prefix}-primary);
    }}
    .{prefix}-button:disabled {{
      opacity: 0.4;
      cursor: default;
    }}
    .{prefix}-summary dt {{
      font-weight: 600;
      margin-top: 0.5rem;
    }}
    .{prefix}-summary dd {{
      margin-left: 0;
    }}
"#
    )
}

/// Strip characters that could end a declaration or the style block.
fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '{' | '}' | ';'))
        .collect()
}
