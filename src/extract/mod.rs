// src/extract/mod.rs
// =============================================================================
// Locating elements in parsed HTML. See html.rs.
// =============================================================================

mod html;

pub use html::{find_tag, find_tag_where, next_element_sibling, parse_document, select_all, text_of};
