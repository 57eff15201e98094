//! Section structure, two ways.
//!
//! [section_tree] works on the parse module's section list (titles and nesting
//! only). [section_texts] splits the plain text extract on its `== Heading ==`
//! lines so the body of a single section can be looked up by name.

use lazy_regex::regex;
use scraper::Html;

use crate::definitions::RawSection;

/// A heading and everything nested below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionNode {
    pub title: String,
    /// 1 for top level sections.
    pub level: u32,
    /// Dotted position in the table of contents, e.g. `2.1`.
    pub number: String,
    pub children: Vec<SectionNode>,
}

/// A heading from the plain text extract and the text up to the next heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionText {
    pub title: String,
    /// Count of `=` on each side, so `== Impact ==` is 2.
    pub level: usize,
    pub text: String,
}

/// Nest the flat, document ordered section list by `toclevel`.
pub fn section_tree(raw: &[RawSection]) -> Vec<SectionNode> {
    let mut pos = 0;
    children(raw, &mut pos, 0)
}

fn children(raw: &[RawSection], pos: &mut usize, parent_level: u32) -> Vec<SectionNode> {
    let mut out = vec![];
    while let Some(section) = raw.get(*pos) {
        if section.toclevel <= parent_level {
            break;
        }
        *pos += 1;
        let nested = children(raw, pos, section.toclevel);
        out.push(SectionNode {
            title: heading_text(&section.line),
            level: section.toclevel,
            number: section.number.clone(),
            children: nested,
        });
    }
    out
}

/// Titles in document order, parents before their children.
pub fn flatten(tree: &[SectionNode]) -> Vec<String> {
    let mut out = vec![];
    for node in tree {
        out.push(node.title.clone());
        out.extend(flatten(&node.children));
    }
    out
}

/// Section lines may carry inline markup (`<i>Title</i>`); keep the text only.
fn heading_text(line: &str) -> String {
    if !line.contains('<') && !line.contains('&') {
        return line.to_owned();
    }
    Html::parse_fragment(line)
        .root_element()
        .text()
        .collect::<String>()
}

/// Split a plain text extract into its sections, in document order.
///
/// Text before the first heading (the lead) is not a section and is skipped.
pub fn section_texts(content: &str) -> Vec<SectionText> {
    let headings = regex!(r"(?m)^(={2,6})[ \t]*(.+?)[ \t]*={2,6}[ \t]*$");
    let found = headings.captures_iter(content).collect::<Vec<_>>();

    found
        .iter()
        .enumerate()
        .filter_map(|(i, caps)| {
            let whole = caps.get(0)?;
            let end = found
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map(|next| next.start())
                .unwrap_or(content.len());
            Some(SectionText {
                title: caps.get(2)?.as_str().to_owned(),
                level: caps.get(1)?.as_str().len(),
                text: content[whole.end()..end].trim().to_owned(),
            })
        })
        .collect()
}
