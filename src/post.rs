use std::borrow::Cow;

use quick_xml::escape::unescape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::BytesStart;
use serde::{Deserialize, Serialize};

use crate::clean::{DefaultHtmlCleaner, HtmlCleaner};

/// A post as it is written to the csv dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// The `Id` attribute of the row, verbatim.
    pub id: Option<String>,
    /// Title and plain text body.
    pub text: String,
}

impl Post {
    /// Number of chars of the text.
    #[inline]
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the text is long enough to be kept.
    #[inline]
    pub fn is_qualifying(&self, min_text_chars: usize) -> bool {
        self.text_len() > min_text_chars
    }
}

/// The attributes of a single `row` element of a dump.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPost {
    pub id: Option<String>,
    pub title: String,
    /// Html markup of the post.
    pub body: String,
}

impl RawPost {
    /// Collect the `Id`, `Title` and `Body` attributes of a `row`, other
    /// attributes are ignored.
    pub fn from_element(row: &BytesStart) -> Result<Self, quick_xml::Error> {
        let mut raw = RawPost::default();
        for attr in row.attributes() {
            let attr = attr?;
            match attr.key.as_ref() {
                b"Id" => raw.id = Some(attribute_value(&attr)?),
                b"Title" => raw.title = attribute_value(&attr)?,
                b"Body" => raw.body = attribute_value(&attr)?,
                _ => {}
            }
        }
        Ok(raw)
    }

    /// Strip the body with the [`DefaultHtmlCleaner`] and prepend the title.
    pub fn compose(self) -> Post {
        self.compose_with::<DefaultHtmlCleaner>()
    }

    pub fn compose_with<T: HtmlCleaner>(self) -> Post {
        let body = T::clean_html(&self.body);
        Post {
            id: self.id,
            text: compose_text(&self.title, &body).into_owned(),
        }
    }
}

/// The normalized, unescaped value of an attribute.
///
/// Literal tabs and line breaks become a single space each, a `\r\n` pair
/// counts as one line break. Escaped ones like `&#xA;` are kept.
pub fn attribute_value(attr: &Attribute) -> Result<String, quick_xml::Error> {
    let mut normalized = Vec::with_capacity(attr.value.len());
    let mut bytes = attr.value.iter().peekable();
    while let Some(&b) = bytes.next() {
        match b {
            b'\r' => {
                if bytes.peek() == Some(&&b'\n') {
                    bytes.next();
                }
                normalized.push(b' ');
            }
            b'\t' | b'\n' => normalized.push(b' '),
            _ => normalized.push(b),
        }
    }
    let value = std::str::from_utf8(&normalized)?;
    Ok(unescape(value)?.into_owned())
}

/// `"{title}. {body}"` if there is a title, otherwise just the body, trimmed
/// either way.
pub fn compose_text<'a>(title: &str, body: &'a str) -> Cow<'a, str> {
    if title.is_empty() {
        Cow::Borrowed(body.trim())
    } else {
        Cow::Owned(format!("{}. {}", title, body).trim().to_string())
    }
}
