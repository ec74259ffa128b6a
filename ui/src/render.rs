//! Modal markup.
//!
//! Pure string builders for the three modal bodies (loading, explanation,
//! error). Every piece of page- or model-supplied text goes through
//! [`escape_html`] before it is interpolated; the DOM layer assigns the result
//! with `innerHTML` and adds nothing of its own.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Write;

use common::ExplanationResult;

/// Characters of the selected text shown above the explanation.
pub const EXCERPT_CHARS: usize = 100;

/// Hint shown under every error.
pub const API_KEY_HINT: &str = "Please check your API key configuration in the extension popup.";

/// Shown when the background worker could not be reached at all.
pub const EXTENSION_ERROR_MESSAGE: &str = "Extension error. Please try again.";

/// Shown when a failure reply carries no message.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to get explanation";

/// Escape text for insertion into element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// First [`EXCERPT_CHARS`] characters, with `...` appended when cut.
pub fn excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}

/// Escape the explanation and turn blank lines into paragraphs and single
/// newlines into line breaks.
pub fn format_explanation(text: &str) -> String {
    let body = escape_html(text)
        .replace("\n\n", "</p><p>")
        .replace('\n', "<br>");
    format!("<p>{body}</p>")
}

fn header(title: &str) -> String {
    format!(r#"<div class="modal-header"><h3>{title}</h3><button class="modal-close">&times;</button></div>"#)
}

const FOOTER: &str =
    r#"<div class="modal-footer"><button class="btn btn-secondary modal-close-btn">Close</button></div>"#;

pub fn loading_modal() -> String {
    let mut html = header("🤔 Thinking...");
    html.push_str(
        r#"<div class="modal-body"><div class="loading-spinner"></div><p>Getting explanation from Gemini AI...</p></div>"#,
    );
    html
}

pub fn explanation_modal(explanation: &str, original_text: &str) -> String {
    let mut html = header("💡 Text Explanation");
    // Writing into a String cannot fail.
    write!(
        html,
        r#"<div class="modal-body"><div class="original-text"><h4>Selected Text:</h4><p>"{}"</p></div><div class="explanation"><h4>Explanation:</h4><div class="explanation-content">{}</div></div></div>"#,
        escape_html(&excerpt(original_text)),
        format_explanation(explanation),
    )
    .unwrap_or_default();
    html.push_str(FOOTER);
    html
}

pub fn error_modal(message: &str) -> String {
    let message = if message.is_empty() { FALLBACK_ERROR_MESSAGE } else { message };
    let mut html = header("❌ Error");
    write!(
        html,
        r#"<div class="modal-body"><p class="error-message">{}</p><p>{API_KEY_HINT}</p></div>"#,
        escape_html(message),
    )
    .unwrap_or_default();
    html.push_str(FOOTER);
    html
}

/// Modal body for a finished request.
pub fn result_modal(result: &ExplanationResult) -> String {
    match result {
        ExplanationResult::Success { explanation, original_text } => explanation_modal(explanation, original_text),
        ExplanationResult::Failure { error } => error_modal(error),
    }
}
