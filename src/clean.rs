use select::document::Document;
use select::node::Node;
use select::predicate::Text;

/// Elements whose text content is never rendered.
const HIDDEN_ELEMENTS: [&str; 2] = ["script", "style"];

pub trait HtmlCleaner {
    /// Ignore text that belongs to an element that is not displayed.
    fn is_hidden(node: &Node) -> bool {
        node.parent()
            .and_then(|parent| parent.name())
            .map(|name| HIDDEN_ELEMENTS.contains(&name))
            .unwrap_or(false)
    }

    /// Extract the visible text of an html fragment.
    ///
    /// Every text node is trimmed, empty ones are dropped and the rest are
    /// joined with a single space, so `<p>Hello <b>world</b></p>` becomes
    /// `Hello world`.
    fn clean_html(html: &str) -> String {
        if html.is_empty() {
            return String::new();
        }
        let doc = Document::from(html);
        let fragments: Vec<&str> = doc
            .find(Text)
            .filter(|node| !Self::is_hidden(node))
            .filter_map(|node| node.as_text())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        fragments.join(" ")
    }
}

/// A standard implementation of a cleaner that keeps all visible text.
pub struct DefaultHtmlCleaner;

impl HtmlCleaner for DefaultHtmlCleaner {}
