//! Tolerant scanning of the table markup in the daily-history export.
//!
//! This is not a general HTML parser. It finds tag blocks case-insensitively,
//! accepts unclosed cells and rows, and reduces a cell to its visible text.
//! Anything more structured than `<tbody>` → `<tr>` → `<td>` is ignored.

/// Find an opening `<tag ...>` at or after `from` in the lowercased document.
///
/// Returns the tag start and the offset just past its closing `>`.
fn find_open_tag(lower: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let needle = format!("<{tag}");
    let mut pos = from;
    while let Some(rel) = lower.get(pos..)?.find(&needle) {
        let start = pos + rel;
        let after = start + needle.len();
        match lower.as_bytes().get(after) {
            Some(b'>') | Some(b'/') => {}
            Some(b) if b.is_ascii_whitespace() => {}
            // `<tr` must not match `<track`.
            Some(_) => {
                pos = after;
                continue;
            }
            None => return None,
        }
        let gt = lower[after..].find('>')?;
        return Some((start, after + gt + 1));
    }
    None
}

/// Find a closing `</tag>` at or after `from`. Returns its start and end.
fn find_close_tag(lower: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let needle = format!("</{tag}");
    let start = from + lower.get(from..)?.find(&needle)?;
    let end = lower[start..]
        .find('>')
        .map(|gt| start + gt + 1)
        .unwrap_or(lower.len());
    Some((start, end))
}

/// Inner content of every `tag` element in `html`, in document order.
///
/// An element ends at its closing tag, at the next opening of the same tag,
/// or at the end of the input, whichever comes first.
pub fn blocks<'a>(html: &'a str, tag: &str) -> Vec<&'a str> {
    let lower = html.to_ascii_lowercase();
    let mut found = Vec::new();
    let mut pos = 0;

    while let Some((_, content_start)) = find_open_tag(&lower, tag, pos) {
        let close = find_close_tag(&lower, tag, content_start);
        let next_open = find_open_tag(&lower, tag, content_start).map(|(s, _)| s);

        let (content_end, resume) = match (close, next_open) {
            (Some((cs, ce)), Some(os)) if cs < os => (cs, ce),
            (Some((cs, ce)), None) => (cs, ce),
            (_, Some(os)) => (os, os),
            (None, None) => (html.len(), html.len()),
        };

        found.push(&html[content_start..content_end]);
        pos = resume;
    }

    found
}

/// Inner content of the first `tag` element, if any.
pub fn find_block<'a>(html: &'a str, tag: &str) -> Option<&'a str> {
    blocks(html, tag).into_iter().next()
}

/// Visible text of a fragment: tags dropped, entities decoded, each text run
/// trimmed, and the runs joined with no separator.
pub fn text_content(fragment: &str) -> String {
    let mut out = String::new();
    let mut rest = fragment;

    loop {
        let (text, after) = match rest.find('<') {
            Some(lt) => (&rest[..lt], Some(&rest[lt..])),
            None => (rest, None),
        };

        let decoded = decode_entities(text);
        out.push_str(decoded.trim());

        match after {
            Some(tag) => match tag.find('>') {
                Some(gt) => rest = &tag[gt + 1..],
                None => break,
            },
            None => break,
        }
    }

    out
}

/// Decode named and numeric character references.
///
/// Exports may spell accented month names as `f&eacute;vr.` or `ao&ucirc;t`,
/// so the full named-entity set is needed.
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// Rows of the first `<tbody>` as cell texts, or `None` if the document has
/// no body section.
pub fn parse_table_body(html: &str) -> Option<Vec<Vec<String>>> {
    let body = find_block(html, "tbody")?;
    let rows = blocks(body, "tr")
        .into_iter()
        .map(|row| blocks(row, "td").into_iter().map(text_content).collect())
        .collect();
    Some(rows)
}
