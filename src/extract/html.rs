// src/extract/html.rs
// =============================================================================
// Small query helpers on top of `scraper`.
//
// The mode functions know what the target pages look like; these helpers
// only answer "give me the first <tag> matching this filter, or tell me
// exactly what was missing".
//
// A filter is the CSS tail appended to the tag name, e.g.
//   find_tag(root, "div", Some(".sphinxsidebarwrapper"))
//   find_tag(row, "a", Some("[href$=\".html\"]"))
// =============================================================================

use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, ScraperError};

/// Parses a full HTML document
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Compiles a CSS selector, reporting the offending text on failure
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScraperError::InvalidSelector {
        css: css.to_string(),
        message: e.to_string(),
    })
}

/// Returns the first descendant of `scope` matching `tag` + `filter`
pub fn find_tag<'a>(scope: ElementRef<'a>, tag: &str, filter: Option<&str>) -> Result<ElementRef<'a>> {
    find_tag_where(scope, tag, filter, |_| true)
}

/// Like [`find_tag`], but the element must also satisfy `predicate`
pub fn find_tag_where<'a, P>(
    scope: ElementRef<'a>,
    tag: &str,
    filter: Option<&str>,
    predicate: P,
) -> Result<ElementRef<'a>>
where
    P: Fn(&ElementRef<'a>) -> bool,
{
    let filter = filter.unwrap_or("");
    let css = format!("{}{}", tag, filter);
    let selector = selector(&css)?;

    scope
        .select(&selector)
        .find(|element| predicate(element))
        .ok_or_else(|| ScraperError::TagNotFound {
            tag: tag.to_string(),
            filter: filter.to_string(),
        })
}

/// All descendants of `scope` matching `css`, in document order
pub fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>> {
    let selector = selector(css)?;
    Ok(scope.select(&selector).collect())
}

/// Concatenated text of the element and all its descendants
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// The next sibling that is an element, skipping whitespace text nodes
pub fn next_element_sibling(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why does everything take an ElementRef instead of &Html?
//    - Html::root_element() gives an ElementRef for the whole page
//    - So one function works both on a page and on a single table row
//
// 2. Why collect text instead of using inner_html()?
//    - element.text() walks all descendant text nodes, like BeautifulSoup's .text
//    - "<td><abbr>SF</abbr></td>" gives "SF"
//
// 3. What does ElementRef::wrap do?
//    - Siblings are generic tree nodes (text, comments, elements)
//    - wrap() returns Some only when the node is an element
// -----------------------------------------------------------------------------
