//! Preparing post text for display.
//!
//! The API delivers text with `&amp;`, `&lt;` and `&gt;` escaped and with
//! shortened `t.co`-style links. Before drawing, entities are unescaped and
//! each short link is replaced by its display form.

/// A short link in the post and what to show instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntity {
    pub url: String,
    pub display_url: String,
}

static ENTITIES: [(&str, char); 3] = [("&amp;", '&'), ("&lt;", '<'), ("&gt;", '>')];

/// Undo the three HTML escapes the API applies.
///
/// Single left-to-right pass, so `&amp;lt;` becomes `&lt;`, not `<`.
pub fn unescape_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        let replaced = ENTITIES
            .iter()
            .find(|(entity, _)| rest.starts_with(entity));
        match replaced {
            Some((entity, ch)) => {
                out.push(*ch);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Unescape entities and swap every link for its display form.
pub fn display_text(text: &str, links: &[LinkEntity]) -> String {
    let mut text = unescape_entities(text);
    for link in links.iter().filter(|link| !link.url.is_empty()) {
        text = text.replace(&link.url, &link.display_url);
    }
    text
}
