use super::*;

// =============================================================
// escape_html
// =============================================================

#[test]
fn escape_replaces_markup_characters() {
    assert_eq!(
        escape_html(r#"<script>alert("x" & 'y')</script>"#),
        "&lt;script&gt;alert(&quot;x&quot; &amp; &#39;y&#39;)&lt;/script&gt;"
    );
}

#[test]
fn escape_leaves_plain_text_alone() {
    assert_eq!(escape_html("Quantum entanglement is... ✓"), "Quantum entanglement is... ✓");
}

// =============================================================
// excerpt
// =============================================================

#[test]
fn short_text_is_not_truncated() {
    assert_eq!(excerpt("quantum entanglement"), "quantum entanglement");
}

#[test]
fn exactly_limit_is_not_truncated() {
    let text = "a".repeat(EXCERPT_CHARS);
    assert_eq!(excerpt(&text), text);
}

#[test]
fn long_text_is_cut_with_ellipsis() {
    let text = "b".repeat(EXCERPT_CHARS + 1);
    let cut = excerpt(&text);
    assert_eq!(cut, format!("{}...", "b".repeat(EXCERPT_CHARS)));
}

#[test]
fn truncation_counts_characters_not_bytes() {
    let text = "é".repeat(150);
    let cut = excerpt(&text);
    assert_eq!(cut.chars().count(), EXCERPT_CHARS + 3);
    assert!(cut.ends_with("é..."));
}

// =============================================================
// format_explanation
// =============================================================

#[test]
fn single_paragraph_is_wrapped() {
    assert_eq!(format_explanation("One line."), "<p>One line.</p>");
}

#[test]
fn blank_lines_split_paragraphs_and_newlines_break() {
    assert_eq!(
        format_explanation("First para.\n\nSecond line one.\nSecond line two."),
        "<p>First para.</p><p>Second line one.<br>Second line two.</p>"
    );
}

#[test]
fn model_markup_is_escaped_before_formatting() {
    assert_eq!(format_explanation("<b>bold</b>\nnext"), "<p>&lt;b&gt;bold&lt;/b&gt;<br>next</p>");
}

// =============================================================
// Modals
// =============================================================

#[test]
fn loading_modal_shows_spinner_and_close() {
    let html = loading_modal();
    assert!(html.contains("Thinking..."));
    assert!(html.contains(r#"class="loading-spinner""#));
    assert!(html.contains(r#"class="modal-close""#));
}

#[test]
fn explanation_modal_shows_excerpt_and_body() {
    let html = explanation_modal("Quantum entanglement is...", "quantum entanglement");
    assert!(html.contains(r#"<p>"quantum entanglement"</p>"#));
    assert!(html.contains(r#"<div class="explanation-content"><p>Quantum entanglement is...</p></div>"#));
    assert!(html.contains("modal-close-btn"));
}

#[test]
fn explanation_modal_escapes_selected_text() {
    let html = explanation_modal("ok", "<img src=x onerror=alert(1)>");
    assert!(!html.contains("<img"));
    assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
}

#[test]
fn error_modal_escapes_message_and_adds_hint() {
    let html = error_modal("<b>Invalid</b>");
    assert!(html.contains(r#"<p class="error-message">&lt;b&gt;Invalid&lt;/b&gt;</p>"#));
    assert!(html.contains(API_KEY_HINT));
}

#[test]
fn empty_error_uses_fallback() {
    assert!(error_modal("").contains(FALLBACK_ERROR_MESSAGE));
}

#[test]
fn result_modal_dispatches_on_outcome() {
    let ok = result_modal(&ExplanationResult::success("answer", "question"));
    assert!(ok.contains("Text Explanation"));
    let err = result_modal(&ExplanationResult::failure("API rate limit exceeded. Please try again later."));
    assert!(err.contains("❌ Error"));
    assert!(err.contains("API rate limit exceeded."));
}
