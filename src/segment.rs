//! Section segmentation of a raw dump.
//!
//! A dump is an HTML page whose `<CODE>` block lists the local subgraph as
//! comment-introduced record groups:
//!
//! ```text
//! <def>...numbered definitions...</def>
//! // les types de noeuds (Nodes Types) : nt;ntid;'ntname'
//! nt;1;'n_term'
//! // les noeuds/termes (Entries) : e;eid;'name';type;w;'formated name'
//! e;150;'chat';1;5248
//! ...
//! // END
//! ```
//!
//! Each marker line is replaced by closing/opening tags so every record
//! group becomes a named, well-nested section. Section bodies are then
//! sliced out of the rewritten text verbatim; only the `def` element and the
//! not-found warning are looked up through an HTML parser.

use scraper::{Html, Selector};
use tracing::debug;

use crate::error::CacheError;

/// CSS selector of the block the service renders for unknown terms.
const WARNING_SELECTOR: &str = ".jdm-warning";
const DEFINITION_SELECTOR: &str = "def";

/// Marker lines in dump order, with the tags that replace them.
const MARKERS: [(&str, &str); 6] = [
    (
        "// les types de noeuds (Nodes Types) : nt;ntid;'ntname'",
        "<types_noeuds>",
    ),
    (
        "// les noeuds/termes (Entries) : e;eid;'name';type;w;'formated name' ",
        "</types_noeuds><entrees>",
    ),
    (
        "// les types de relations (Relation Types) : rt;rtid;'trname';'trgpname';'rthelp' ",
        "</entrees><types_relations>",
    ),
    (
        "// les relations sortantes : r;rid;node1;node2;type;w ",
        "</types_relations><sortants>",
    ),
    (
        "// les relations entrantes : r;rid;node1;node2;type;w ",
        "</sortants><entrants>",
    ),
    ("// END", "</entrants>"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    NodeTypes,
    Entries,
    RelationTypes,
    Outgoing,
    Incoming,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::NodeTypes,
        Section::Entries,
        Section::RelationTypes,
        Section::Outgoing,
        Section::Incoming,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Section::NodeTypes => "types_noeuds",
            Section::Entries => "entrees",
            Section::RelationTypes => "types_relations",
            Section::Outgoing => "sortants",
            Section::Incoming => "entrants",
        }
    }
}

/// A dump rewritten with section tags.
#[derive(Debug, Clone)]
pub struct SegmentedDump {
    text: String,
    definitions: Option<String>,
}

impl SegmentedDump {
    /// Body of `section`, or `None` when its tags are missing or it is empty.
    pub fn section(&self, section: Section) -> Option<&str> {
        let open = format!("<{}>", section.tag());
        let close = format!("</{}>", section.tag());

        let start = self.text.find(&open)? + open.len();
        let len = self.text[start..].find(&close)?;
        let body = &self.text[start..start + len];
        (!body.is_empty()).then_some(body)
    }

    /// Inner markup of the `<def>` element, if any and non-empty.
    pub fn definitions(&self) -> Option<&str> {
        self.definitions.as_deref()
    }

    /// The rewritten document.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Rewrite `raw` into a [`SegmentedDump`].
///
/// Fails with [`CacheError::TermNotFound`] when the page carries the
/// service's warning block, before any section is looked at.
pub fn segment(term: &str, raw: &str) -> Result<SegmentedDump, CacheError> {
    let document = Html::parse_document(raw);

    if inner_html(&document, WARNING_SELECTOR).is_some() {
        return Err(CacheError::TermNotFound(term.to_string()));
    }
    let definitions = inner_html(&document, DEFINITION_SELECTOR);

    let mut text = raw.to_string();
    for (marker, tags) in MARKERS {
        text = text.replacen(marker, tags, 1);
    }

    let dump = SegmentedDump { text, definitions };
    let present: Vec<&str> = Section::ALL
        .into_iter()
        .filter(|s| dump.section(*s).is_some())
        .map(Section::tag)
        .collect();
    debug!(term, sections = ?present, "dump segmented");
    Ok(dump)
}

fn inner_html(document: &Html, selector: &str) -> Option<String> {
    let selector = match Selector::parse(selector) {
        Ok(s) => s,
        Err(_) => return None,
    };
    document
        .select(&selector)
        .next()
        .map(|el| el.inner_html())
        .filter(|html| !html.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(body: &str) -> String {
        format!("<html><body><CODE>{}</CODE></body></html>", body)
    }

    fn full_dump() -> String {
        wrap(concat!(
            "<def>\n1. Un f\u{e9}lin.\n</def>\n",
            "// les types de noeuds (Nodes Types) : nt;ntid;'ntname'\n\nnt;1;'n_term'\n\n",
            "// les noeuds/termes (Entries) : e;eid;'name';type;w;'formated name' \n\ne;150;'chat';1;5248\n\n",
            "// les types de relations (Relation Types) : rt;rtid;'trname';'trgpname';'rthelp' \n\nrt;6;'r_isa';'is-a';'aide'\n\n",
            "// les relations sortantes : r;rid;node1;node2;type;w \n\nr;1;150;151;6;30\n\n",
            "// les relations entrantes : r;rid;node1;node2;type;w \n\nr;2;152;150;6;40\n\n",
            "// END\n",
        ))
    }

    #[test]
    fn test_all_sections_addressable() {
        let dump = segment("chat", &full_dump()).unwrap();
        for section in Section::ALL {
            assert!(dump.section(section).is_some(), "{:?} missing", section);
        }
        assert_eq!(
            dump.section(Section::Entries),
            Some("\n\ne;150;'chat';1;5248\n\n")
        );
        assert_eq!(
            dump.section(Section::Incoming),
            Some("\n\nr;2;152;150;6;40\n\n")
        );
    }

    #[test]
    fn test_markers_are_replaced_once_in_order() {
        let dump = segment("chat", &full_dump()).unwrap();
        assert!(!dump.text().contains("// les"));
        assert!(!dump.text().contains("// END"));
        let opens: Vec<usize> = Section::ALL
            .iter()
            .map(|s| dump.text().find(&format!("<{}>", s.tag())).unwrap())
            .collect();
        assert!(opens.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_definitions_block_extracted() {
        let dump = segment("chat", &full_dump()).unwrap();
        assert_eq!(dump.definitions(), Some("\n1. Un félin.\n"));
    }

    #[test]
    fn test_missing_sections_are_none() {
        let raw = wrap(concat!(
            "// les noeuds/termes (Entries) : e;eid;'name';type;w;'formated name' \n\ne;150;'chat';1;5248\n\n",
            "// les types de relations (Relation Types) : rt;rtid;'trname';'trgpname';'rthelp' \n\n",
        ));
        let dump = segment("chat", &raw).unwrap();
        assert!(dump.section(Section::Entries).is_some());
        assert!(dump.section(Section::Outgoing).is_none());
        assert!(dump.section(Section::Incoming).is_none());
        assert!(dump.definitions().is_none());
    }

    #[test]
    fn test_warning_block_is_term_not_found() {
        let raw = "<html><body><div class=\"jdm-warning\">Le terme 'xyzzy' n'existe pas !</div>\
                   // END</body></html>";
        let err = segment("xyzzy", raw).unwrap_err();
        assert!(matches!(err, CacheError::TermNotFound(ref t) if t == "xyzzy"));
    }

    #[test]
    fn test_empty_warning_block_is_ignored() {
        let raw = format!("<div class=\"jdm-warning\"></div>{}", full_dump());
        assert!(segment("chat", &raw).is_ok());
    }
}
