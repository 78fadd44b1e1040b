//! Markup fragments for the upload page.
//!
//! Fragments live in `assets/` as HTML with `{{TOKEN}}` placeholders and are
//! loaded at compile time. `fill_template` walks the template once, so text
//! substituted for one token is never scanned for further tokens; a file
//! named `{{CAPTION}}.png` renders literally.
//!
//! Tokens the caller does not resolve are blanked rather than leaking raw
//! `{{TOKEN}}` strings into the page.

const PREVIEW_TEMPLATE: &str = include_str!("assets/preview.html");

/// Substitutes every `{{TOKEN}}` in `template` with `resolve(TOKEN)`.
pub fn fill_template<F>(template: &str, resolve: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out  = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let Some(len) = rest[start + 2..].find("}}") else {
            break;
        };
        out.push_str(&rest[..start]);
        let token = &rest[start + 2..start + 2 + len];
        if let Some(value) = resolve(token) {
            out.push_str(&value);
        }
        rest = &rest[start + 2 + len + 2..];
    }
    out.push_str(rest);
    out
}

/// Renders the preview block: the image and a `name (size)` caption.
pub fn render_preview(data_url: &str, caption: &str) -> String {
    fill_template(PREVIEW_TEMPLATE, |token| match token {
        "DATA_URL" => Some(html_escape(data_url)),
        "CAPTION"  => Some(html_escape(caption)),
        _          => None,
    })
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
     .replace('<', "&lt;")
     .replace('>', "&gt;")
     .replace('"', "&quot;")
}
