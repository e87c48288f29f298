//! Static document assembly for export.
//!
//! The DOM-dependent half of export (cleaning instrumentation out of a
//! markup snapshot) lives in the browser crate; this module builds the
//! surrounding document: slot slugs, per-section wrappers and the final
//! self-contained HTML shell. The output renders by simply opening the
//! file; the only external reference is the utility-CSS runtime.

/// The utility-CSS runtime the exported document loads so the color
/// classes keep rendering outside the editor.
pub const UTILITY_CSS_RUNTIME: &str = "https://unpkg.com/@tailwindcss/browser@4";

/// Derive a section id/class token from a slot name: lowercased, each
/// whitespace run replaced by a single hyphen.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for ch in name.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('-');
            }
            in_whitespace = true;
        } else {
            out.push(ch);
            in_whitespace = false;
        }
    }
    out
}

/// Wrap one slot's cleaned markup in its named section element.
pub fn wrap_section(slot_name: &str, cleaned_html: &str) -> String {
    let slug = slug(slot_name);
    format!(
        "<!-- {slot_name} Section -->\n\
         <section class=\"section-{slug}\" id=\"{slug}\">\n\
         {cleaned_html}\n\
         </section>"
    )
}

/// Embed the concatenated sections into a minimal static document shell.
pub fn document_shell(title: &str, sections: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\" class=\"antialiased scroll-smooth\">\n\
         <head>\n\
         \x20\x20<meta charset=\"UTF-8\">\n\
         \x20\x20<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         \x20\x20<title>{title}</title>\n\
         \x20\x20<script src=\"{UTILITY_CSS_RUNTIME}\"></script>\n\
         </head>\n\
         <body>\n\
         {sections}\n\
         </body>\n\
         </html>"
    )
}
