//! Record parsing and cross-reference resolution.
//!
//! Every record section has the same shape: a blank-ish two-line head and
//! two-line tail around newline-separated, `;`-delimited records whose first
//! field is the record kind (`e`, `rt`, `r`). Names are wrapped in single
//! quotes.
//!
//! Resolution is scoped to one dump: edges are resolved against the entry
//! and relation-type tables built from the same dump, and an id the dump
//! never declared resolves to `None` instead of failing.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::models::{Definition, Direction, RelationEntry, RelationType, TermGraph, TermInfo};
use crate::segment::{Section, SegmentedDump};

/// Leading markup left in front of a single, unnumbered definition.
const SINGLE_DEFINITION_ARTIFACT: &str = "\n<br>\n";

fn numbered_item() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // ASCII digits only: other scripts' numerals do not start an item.
    RE.get_or_init(|| Regex::new(r"(?:^|\n)[0-9]\.\s").expect("valid numbered item pattern"))
}

/// Resolve a whole segmented dump.
pub fn parse_dump(term: &str, dump: &SegmentedDump) -> TermGraph {
    let definitions = split_definitions(dump.definitions());

    let entries = parse_entries(dump.section(Section::Entries));
    let info = match entries.own_record {
        Some(record) => parse_term_info(record),
        None => TermInfo::fallback(term),
    };

    let types = parse_relation_types(dump.section(Section::RelationTypes));

    let outgoing = resolve_edges(
        dump.section(Section::Outgoing),
        Direction::Outgoing,
        &info.id,
        &entries,
        &types,
    );
    let incoming = resolve_edges(
        dump.section(Section::Incoming),
        Direction::Incoming,
        &info.id,
        &entries,
        &types,
    );

    TermGraph {
        info,
        definitions,
        relation_types: types.catalog,
        outgoing,
        incoming,
    }
}

/// Split the `<def>` block into numbered definitions.
///
/// An item starts at `<digit>. ` at the beginning of the block or right
/// after a newline; the marker itself is dropped. When more than one
/// fragment results, the first is the preamble before item 1 and is
/// discarded. A lone fragment is kept, minus its leading `\n<br>\n`.
pub fn split_definitions(block: Option<&str>) -> Vec<Definition> {
    let Some(block) = block.filter(|b| !b.is_empty()) else {
        return vec![Definition::none()];
    };

    let fragments: Vec<&str> = numbered_item().split(block).collect();
    if fragments.len() == 1 {
        return vec![Definition::new(
            block.replacen(SINGLE_DEFINITION_ARTIFACT, "", 1),
        )];
    }

    fragments.into_iter().skip(1).map(Definition::new).collect()
}

/// Entry table of one dump.
#[derive(Debug, Default)]
pub struct EntryTable<'a> {
    /// First record: the queried term itself. Kept out of `names`.
    pub own_record: Option<&'a str>,
    pub names: HashMap<String, String>,
}

impl EntryTable<'_> {
    pub fn name(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }
}

/// Parse `e;eid;'name';type;w[;'formatted name']` records.
pub fn parse_entries(section: Option<&str>) -> EntryTable<'_> {
    let Some(section) = section else {
        return EntryTable::default();
    };

    let mut lines = record_lines(section).into_iter();
    let own_record = lines.next();

    let mut names = HashMap::new();
    for line in lines {
        let fields: Vec<&str> = line.split(';').collect();
        if field(&fields, 2).is_empty() {
            continue;
        }
        // A sixth field carries the formatted name (e.g. `chat>animal`),
        // which reads better than the raw one.
        let name = match fields.get(5) {
            Some(formatted) if !formatted.is_empty() => unquote(formatted),
            _ => unquote(fields[2]),
        };
        names.insert(fields[1].to_string(), name.to_string());
    }

    EntryTable { own_record, names }
}

/// Term info from the queried term's own entry record.
pub fn parse_term_info(record: &str) -> TermInfo {
    let fields: Vec<&str> = record.split(';').collect();
    TermInfo {
        word: unquote(field(&fields, 2)).to_string(),
        id: field(&fields, 1).to_string(),
        weight: field(&fields, 4).to_string(),
    }
}

/// Relation types of one dump: a lookup for edge resolution plus the
/// ordered catalog that gets persisted.
#[derive(Debug, Default)]
pub struct RelationTypeTable {
    pub names: HashMap<String, String>,
    pub catalog: Vec<RelationType>,
}

/// Parse `rt;rtid;'name'[;'group name'];'help'` records.
pub fn parse_relation_types(section: Option<&str>) -> RelationTypeTable {
    let mut table = RelationTypeTable::default();
    let Some(section) = section else {
        return table;
    };

    for line in record_lines(section) {
        let fields: Vec<&str> = line.split(';').collect();
        if field(&fields, 2).is_empty() {
            continue;
        }
        let id = fields[1].to_string();
        let name = unquote(fields[2]).to_string();
        let description = if fields.len() == 4 {
            field(&fields, 3)
        } else {
            field(&fields, 4)
        };

        table.names.insert(id.clone(), name.clone());
        table.catalog.push(RelationType {
            id,
            name,
            description: unquote(description).to_string(),
        });
    }
    table
}

/// Resolve `r;rid;node1;node2;type;w` records into relation entries.
///
/// The "other" endpoint is whichever node is not `self_id`: node1 when it
/// differs from `self_id`, node2 otherwise.
pub fn resolve_edges(
    section: Option<&str>,
    direction: Direction,
    self_id: &str,
    entries: &EntryTable<'_>,
    types: &RelationTypeTable,
) -> Vec<RelationEntry> {
    let Some(section) = section else {
        return vec![RelationEntry::placeholder(direction)];
    };

    let mut resolved = Vec::new();
    for line in record_lines(section) {
        let fields: Vec<&str> = line.split(';').collect();
        let node1 = field(&fields, 2);
        if node1.is_empty() {
            continue;
        }
        let other = if node1 != self_id {
            unquote(node1)
        } else {
            unquote(field(&fields, 3))
        };

        resolved.push(RelationEntry {
            id: fields[1].to_string(),
            kind: types.names.get(field(&fields, 4)).cloned(),
            weight: field(&fields, 5).to_string(),
            term: entries.name(other).map(str::to_string),
        });
    }
    resolved
}

/// Lines of a record section without its two leading and two trailing
/// boundary lines.
fn record_lines(section: &str) -> Vec<&str> {
    let lines: Vec<&str> = section.split('\n').collect();
    if lines.len() <= 4 {
        return Vec::new();
    }
    lines[2..lines.len() - 2].to_vec()
}

fn field<'a>(fields: &[&'a str], index: usize) -> &'a str {
    fields.get(index).copied().unwrap_or("")
}

/// Strip one leading and one trailing single quote.
fn unquote(s: &str) -> &str {
    let s = s.strip_prefix('\'').unwrap_or(s);
    s.strip_suffix('\'').unwrap_or(s)
}
