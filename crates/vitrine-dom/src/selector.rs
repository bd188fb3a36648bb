//! Selector matching for the in-memory page.
//!
//! Only the shapes the markup contract uses are understood: a type
//! selector, `#id`, `.class`, `[attr]` and `[attr^="prefix"]` compounds,
//! joined by descendant whitespace and listed with `,`.

use crate::element::ElementId;
use crate::error::PageError;

/// Read access to the element data a selector is matched against.
pub trait SelectorSubject {
    fn tag_name(&self, el: ElementId) -> &str;
    fn attribute(&self, el: ElementId, name: &str) -> Option<&str>;
    fn has_class(&self, el: ElementId, class: &str) -> bool;
    fn parent(&self, el: ElementId) -> Option<ElementId>;
}

/// A parsed, comma-separated selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList(Vec<Vec<Compound>>);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    /// Attribute name and required value prefix.
    attrs: Vec<(String, Option<String>)>,
}

impl SelectorList {
    pub fn parse(selector: &str) -> Result<Self, PageError> {
        let error = |reason: &str| PageError::invalid_selector(selector, reason);
        selector
            .split(',')
            .map(|complex| {
                let compounds = complex
                    .split_whitespace()
                    .map(|compound| parse_compound(compound).map_err(error))
                    .collect::<Result<Vec<_>, _>>()?;
                if compounds.is_empty() {
                    return Err(error("empty selector"));
                }
                Ok(compounds)
            })
            .collect::<Result<_, _>>()
            .map(SelectorList)
    }

    /// Whether `el` matches any selector in the list.
    pub fn matches<S: SelectorSubject + ?Sized>(&self, subject: &S, el: ElementId) -> bool {
        self.0.iter().any(|compounds| match compounds.split_last() {
            Some((last, ancestors)) => {
                last.matches(subject, el) && match_ancestors(ancestors, subject, el)
            }
            None => false,
        })
    }
}

/// Whether `ancestors`, innermost last, appear in order above `el`.
fn match_ancestors<S: SelectorSubject + ?Sized>(
    ancestors: &[Compound],
    subject: &S,
    el: ElementId,
) -> bool {
    let Some((innermost, rest)) = ancestors.split_last() else {
        return true;
    };
    let mut current = subject.parent(el);
    while let Some(ancestor) = current {
        if innermost.matches(subject, ancestor) && match_ancestors(rest, subject, ancestor) {
            return true;
        }
        current = subject.parent(ancestor);
    }
    false
}

impl Compound {
    fn matches<S: SelectorSubject + ?Sized>(&self, subject: &S, el: ElementId) -> bool {
        if let Some(tag) = &self.tag
            && !subject.tag_name(el).eq_ignore_ascii_case(tag)
        {
            return false;
        }
        if let Some(id) = &self.id
            && subject.attribute(el, "id") != Some(id.as_str())
        {
            return false;
        }
        self.classes.iter().all(|class| subject.has_class(el, class))
            && self.attrs.iter().all(|(name, prefix)| {
                match (subject.attribute(el, name), prefix) {
                    (Some(_), None) => true,
                    // `[a^=""]` matches nothing, as in CSS.
                    (Some(value), Some(prefix)) => !prefix.is_empty() && value.starts_with(prefix),
                    (None, _) => false,
                }
            })
    }
}

fn parse_compound(source: &str) -> Result<Compound, &'static str> {
    let mut compound = Compound::default();
    let (tag, mut rest) = split_ident(source);
    if !tag.is_empty() {
        compound.tag = Some(tag.to_ascii_lowercase());
    }

    while let Some(marker) = rest.chars().next() {
        rest = &rest[marker.len_utf8()..];
        match marker {
            '#' | '.' => {
                let (ident, tail) = split_ident(rest);
                if ident.is_empty() {
                    return Err("expected an identifier");
                }
                if marker == '#' {
                    compound.id = Some(ident.to_owned());
                } else {
                    compound.classes.push(ident.to_owned());
                }
                rest = tail;
            }
            '[' => {
                let end = rest.find(']').ok_or("unterminated attribute selector")?;
                compound.attrs.push(parse_attr(&rest[..end])?);
                rest = &rest[end + 1..];
            }
            _ => return Err("unexpected character"),
        }
    }
    Ok(compound)
}

fn parse_attr(body: &str) -> Result<(String, Option<String>), &'static str> {
    let (name, prefix) = match body.split_once("^=") {
        Some((name, value)) => {
            let value = value.trim().trim_matches(|c: char| c == '"' || c == '\'');
            (name, Some(value.to_owned()))
        }
        None if body.contains('=') => return Err("unsupported attribute operator"),
        None => (body, None),
    };
    let name = name.trim();
    if name.is_empty() || !split_ident(name).1.is_empty() {
        return Err("expected an attribute name");
    }
    Ok((name.to_ascii_lowercase(), prefix))
}

fn split_ident(source: &str) -> (&str, &str) {
    let end = source
        .find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(source.len());
    source.split_at(end)
}
