//! HTML document parsing and querying.
//!
//! Wraps `scraper`'s html5ever-backed parser so the auditors can query the
//! page with CSS selectors. Parsing is browser-grade lenient: unclosed tags,
//! stray text and missing doctypes produce a best-effort tree, never an
//! error.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// A parsed HTML page, queryable by CSS selector.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse raw markup into a queryable document. Never fails.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// All elements matching `selector`, in document order.
    ///
    /// A selector that fails to parse matches nothing.
    pub fn query_all(&self, selector: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(selector) {
            Ok(sel) => self.html.select(&sel).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Number of elements matching `selector`.
    pub fn count(&self, selector: &str) -> usize {
        match Selector::parse(selector) {
            Ok(sel) => self.html.select(&sel).count(),
            Err(_) => 0,
        }
    }

    /// Whether at least one element matches `selector`.
    pub fn exists(&self, selector: &str) -> bool {
        match Selector::parse(selector) {
            Ok(sel) => self.html.select(&sel).next().is_some(),
            Err(_) => false,
        }
    }

    /// First element matching `selector`, if any.
    pub fn first(&self, selector: &str) -> Option<ElementRef<'_>> {
        match Selector::parse(selector) {
            Ok(sel) => self.html.select(&sel).next(),
            Err(_) => None,
        }
    }
}

/// Concatenated, trimmed text content of an element.
pub fn element_text(element: &ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Visible text of a page: script/style/noscript/template subtrees and
/// comments are removed from the raw markup, the remainder is re-parsed,
/// and whitespace runs are collapsed to single spaces.
pub fn body_text(html: &str) -> String {
    let stripped = strip_inert_markup(html);
    let document = Html::parse_document(&stripped);
    collapse_whitespace(&document.root_element().text().collect::<Vec<_>>().join(" "))
}

/// Remove markup that carries no visible text.
fn strip_inert_markup(html: &str) -> String {
    static RE_TAG_BLOCKS: Lazy<Vec<Regex>> = Lazy::new(|| {
        [
            r"(?is)<script[^>]*?>[\s\S]*?</script>",
            r"(?is)<style[^>]*?>[\s\S]*?</style>",
            r"(?is)<noscript[^>]*?>[\s\S]*?</noscript>",
            r"(?is)<template[^>]*?>[\s\S]*?</template>",
        ]
        .into_iter()
        .map(|pattern| Regex::new(pattern).expect("invalid block regex"))
        .collect()
    });
    static RE_COMMENT: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?is)<!--.*?-->").expect("invalid comment regex"));

    let mut clean = html.to_string();
    for re in RE_TAG_BLOCKS.iter() {
        clean = re.replace_all(&clean, "").into_owned();
    }

    RE_COMMENT.replace_all(&clean, "").into_owned()
}

fn collapse_whitespace(text: &str) -> String {
    static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("invalid ws regex"));
    RE_WS.replace_all(text.trim(), " ").into_owned()
}
