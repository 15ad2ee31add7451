use super::*;

// =========================================================================
// escape / markdown
// =========================================================================

#[test]
fn escape_html_covers_markup_and_quotes() {
    assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    assert_eq!(escape_html("plain ñ"), "plain ñ");
}

#[test]
fn markdown_renders_emphasis_and_lists() {
    let html = markdown_html("**Pino**: 500 unidades\n\n- uno\n- dos");
    assert!(html.contains("<strong>Pino</strong>"));
    assert!(html.contains("<li>uno</li>"));
}

#[test]
fn markdown_drops_raw_html() {
    let html = markdown_html("hola <script>alert(1)</script>\n\n<div onclick=\"x\">bloque</div>");
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<div"));
    assert!(html.contains("hola"));
}

#[test]
fn markdown_neutralizes_script_links() {
    let html = markdown_html("[clic](javascript:alert(1)) y ![img](data:text/html;base64,PHNjcmlwdD4=)");
    assert!(!html.contains("javascript:"));
    assert!(!html.contains("data:text/html"));
    assert!(html.contains(r##"<a href="#">clic</a>"##));
}

#[test]
fn markdown_keeps_web_and_mail_links() {
    let html = markdown_html("[web](https://example.com/a?b=1) [mail](mailto:leo@example.com) [rel](/contact)");
    assert!(html.contains(r#"href="https://example.com/a?b=1""#));
    assert!(html.contains(r#"href="mailto:leo@example.com""#));
    assert!(html.contains(r#"href="/contact""#));
}

#[test]
fn markdown_escapes_text_content() {
    let html = markdown_html("1 < 2 & 3 > 2");
    assert!(html.contains("1 &lt; 2 &amp; 3 &gt; 2"));
}

// =========================================================================
// layout
// =========================================================================

#[test]
fn layout_lists_every_page_and_marks_current() {
    let html = layout(Page::Analytics, "<p>body</p>");
    for page in Page::ALL {
        assert!(html.contains(&format!(r#"href="{}""#, page.path())), "missing {page:?}");
    }
    assert!(html.contains(r#"<a class="nav-link nav-link--active" href="/analytics" aria-current="page">"#));
    assert_eq!(html.matches("nav-link--active").count(), 1);
    assert!(html.contains("<p>body</p>"));
    assert!(html.contains("<title>Analytics · "));
}

#[test]
fn page_labels_follow_menu_order() {
    let labels: Vec<&str> = Page::ALL.iter().map(|p| p.label()).collect();
    assert_eq!(labels, ["Inicio", "Chatbot IA", "Visión Artificial", "Analytics", "Contacto"]);
}

// =========================================================================
// components
// =========================================================================

#[test]
fn chat_log_escapes_user_and_renders_assistant_markdown() {
    let turns = [Message::assistant("**hola**"), Message::user("<img src=x>")];
    let html = chat_log(&turns, "🤖");

    assert!(html.contains("<strong>hola</strong>"));
    assert!(html.contains("&lt;img src=x&gt;"));
    assert!(!html.contains("<img"));
    assert_eq!(html.matches("chat-msg--assistant").count(), 1);
    assert_eq!(html.matches("chat-msg--user").count(), 1);
}

#[test]
fn chat_form_carries_hidden_fields_on_both_forms() {
    let html = chat_form("/analytics/chat", "/analytics/chat/reset", "Pregunta", &[("material", "Pino")]);
    assert_eq!(html.matches(r#"<input type="hidden" name="material" value="Pino">"#).count(), 2);
    assert!(html.contains(r#"action="/analytics/chat/reset""#));
}

#[test]
fn expander_escapes_summary() {
    let html = expander("¿A & B?", "<p>x</p>");
    assert!(html.contains("<summary>¿A &amp; B?</summary>"));
    assert!(html.contains("<p>x</p>"));
}
