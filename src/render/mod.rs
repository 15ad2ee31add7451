//! Server-side HTML rendering.
//!
//! DESIGN
//! ======
//! Pages are plain strings assembled with `format!`. The layout shell owns the
//! sidebar and the asset links; each page module renders only its body. Any
//! text that did not originate in this crate goes through [`escape_html`], and
//! model replies go through [`markdown_html`], which drops raw HTML.

pub mod analytics;
pub mod chart;
pub mod chat;
pub mod contact;
pub mod home;
pub mod vision;

use std::fmt::Write as _;

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

use crate::llm::types::{Message, Role};
use crate::services::contact::{OWNER_NAME, OWNER_TITLE};

const SITE_TITLE: &str = "Leonardo Nieto | AI Engineer";
const AVATAR_URL: &str = "https://api.dicebear.com/7.x/shapes/svg?seed=Leo&backgroundColor=6c5ce7";
const VERSION_LINE: &str = "v2.4.0 • System Online";

// =============================================================================
// NAVIGATION
// =============================================================================

/// Sidebar entries, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Chat,
    Vision,
    Analytics,
    Contact,
}

impl Page {
    pub const ALL: [Self; 5] = [Self::Home, Self::Chat, Self::Vision, Self::Analytics, Self::Contact];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Inicio",
            Self::Chat => "Chatbot IA",
            Self::Vision => "Visión Artificial",
            Self::Analytics => "Analytics",
            Self::Contact => "Contacto",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Home => "▦",
            Self::Chat => "💬",
            Self::Vision => "👁",
            Self::Analytics => "📈",
            Self::Contact => "✉",
        }
    }

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Chat => "/chat",
            Self::Vision => "/vision",
            Self::Analytics => "/analytics",
            Self::Contact => "/contact",
        }
    }
}

// =============================================================================
// SHELL
// =============================================================================

/// Wrap a page body in the document shell with the sidebar.
#[must_use]
pub fn layout(current: Page, body: &str) -> String {
    let mut nav = String::new();
    for page in Page::ALL {
        let (class, aria) = if page == current {
            ("nav-link nav-link--active", r#" aria-current="page""#)
        } else {
            ("nav-link", "")
        };
        let _ = write!(
            nav,
            r#"<a class="{class}" href="{path}"{aria}><span class="nav-icon">{icon}</span>{label}</a>"#,
            path = page.path(),
            icon = page.icon(),
            label = page.label(),
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{page_label} · {SITE_TITLE}</title>
<link rel="stylesheet" href="/static/site.css">
<script src="/static/site.js" defer></script>
</head>
<body>
<button class="menu-toggle" type="button" aria-controls="sidebar">☰ MENÚ</button>
<aside class="sidebar" id="sidebar">
<img class="avatar" src="{AVATAR_URL}" alt="" width="80" height="80">
<div class="identity"><h2>{OWNER_NAME}</h2><p>{OWNER_TITLE}</p></div>
<nav>{nav}</nav>
<div class="version">{VERSION_LINE}</div>
</aside>
<main class="content">
{body}
</main>
</body>
</html>"#,
        page_label = current.label(),
    )
}

// =============================================================================
// TEXT
// =============================================================================

/// Escape text for use in element content and quoted attribute values.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

const LINK_SCHEMES: [&str; 3] = ["http:", "https:", "mailto:"];

/// Relative destinations and `http`/`https`/`mailto` pass; any other scheme does not.
fn is_safe_url(dest: &str) -> bool {
    let dest = dest.trim_start();
    match dest.find(':') {
        None => true,
        Some(colon) if dest[..colon].contains(['/', '?', '#']) => true,
        Some(_) => {
            let lower = dest.to_ascii_lowercase();
            LINK_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
        }
    }
}

fn neutralize(dest_url: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&dest_url) { dest_url } else { CowStr::Borrowed("#") }
}

/// Render markdown to HTML with raw HTML events removed and link
/// destinations limited to safe schemes.
#[must_use]
pub fn markdown_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options).filter_map(|event| match event {
        Event::Html(_) | Event::InlineHtml(_) => None,
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
            Some(Event::Start(Tag::Link { link_type, dest_url: neutralize(dest_url), title, id }))
        }
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => {
            Some(Event::Start(Tag::Image { link_type, dest_url: neutralize(dest_url), title, id }))
        }
        other => Some(other),
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

// =============================================================================
// COMPONENTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

impl Tone {
    fn class(self) -> &'static str {
        match self {
            Self::Info => "notice--info",
            Self::Success => "notice--success",
            Self::Warning => "notice--warning",
            Self::Error => "notice--error",
        }
    }
}

/// Colored callout box. `inner_html` must already be safe.
#[must_use]
pub fn notice(tone: Tone, inner_html: &str) -> String {
    format!(r#"<div class="notice {}" role="status">{inner_html}</div>"#, tone.class())
}

/// Collapsible section, open on first render.
#[must_use]
pub fn expander(summary: &str, inner_html: &str) -> String {
    format!(
        r#"<details class="expander" open><summary>{}</summary><div class="expander-body">{inner_html}</div></details>"#,
        escape_html(summary)
    )
}

/// Page heading with a subtitle.
#[must_use]
pub fn page_header(title: &str, subtitle: &str) -> String {
    format!(
        "<header class=\"page-header\"><h1>{}</h1><h4>{}</h4></header>",
        escape_html(title),
        escape_html(subtitle)
    )
}

/// Chat transcript. User turns are escaped text; assistant turns are markdown.
#[must_use]
pub fn chat_log(turns: &[Message], assistant_avatar: &str) -> String {
    let mut out = String::from(r#"<div class="chat-log">"#);
    for turn in turns {
        let (class, avatar, content) = match turn.role {
            Role::User => ("chat-msg chat-msg--user", "👤", format!("<p>{}</p>", escape_html(&turn.content))),
            Role::Assistant | Role::System => ("chat-msg chat-msg--assistant", assistant_avatar, markdown_html(&turn.content)),
        };
        let _ = write!(
            out,
            r#"<div class="{class}"><span class="chat-avatar">{avatar}</span><div class="chat-body">{content}</div></div>"#
        );
    }
    out.push_str("</div>");
    out
}

/// Chat input form posting a `prompt` field, plus a reset button.
///
/// `hidden` fields are carried on both forms so the redirect can restore view
/// state.
#[must_use]
pub fn chat_form(action: &str, reset_action: &str, placeholder: &str, hidden: &[(&str, &str)]) -> String {
    let mut hidden_html = String::new();
    for (name, value) in hidden {
        let _ = write!(
            hidden_html,
            r#"<input type="hidden" name="{}" value="{}">"#,
            escape_html(name),
            escape_html(value)
        );
    }
    format!(
        r#"<form class="chat-input" method="post" action="{action}">{hidden_html}<textarea name="prompt" rows="2" placeholder="{placeholder}" required></textarea><button type="submit">Enviar</button></form>
<form class="chat-reset" method="post" action="{reset_action}">{hidden_html}<button type="submit" class="button-ghost">Reiniciar conversación</button></form>"#,
        placeholder = escape_html(placeholder),
    )
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
