// src/scrape/highscore.rs

use crate::html::{attr_value, block_text, cell_int, next_tag_block_ci, to_lower};

/// One row of the highscore list: enough to find the profile page later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighscoreEntry {
    pub name: String,
    pub url: String,
    pub level: u32,
}

/// All player rows on a highscore page. The own account shows up here too;
/// callers treat a page with at most one row as the end of the list.
pub fn entries(doc: &str) -> Vec<HighscoreEntry> {
    let mut out = Vec::new();
    let mut pos = 0usize;

    while let Some((tr_s, tr_e)) = next_tag_block_ci(doc, "<tr", "</tr>", pos) {
        let tr = &doc[tr_s..tr_e];
        pos = tr_e;

        // Sniff the class from the row head only; back off to a char
        // boundary so a multibyte name straddling the cut cannot panic.
        let mut head = tr.len().min(200);
        while !tr.is_char_boundary(head) {
            head -= 1;
        }
        if !to_lower(&tr[..head]).contains("highscore") {
            continue;
        }

        // Cells: rank, name (a link), level, ...
        let mut cells = Vec::new();
        let mut td_pos = 0usize;
        while let Some((td_s, td_e)) = next_tag_block_ci(tr, "<td", "</td>", td_pos) {
            cells.push(&tr[td_s..td_e]);
            td_pos = td_e;
        }
        if cells.len() < 3 {
            continue;
        }

        let Some((a_s, a_e)) = next_tag_block_ci(cells[1], "<a", "</a>", 0) else {
            continue;
        };
        let link = &cells[1][a_s..a_e];
        let Some(url) = attr_value(&link[..link.find('>').unwrap_or(link.len())], "href") else {
            continue;
        };
        let name = block_text(link);
        if name.is_empty() {
            continue;
        }

        let level = cell_int(&block_text(cells[2])).max(0) as u32;
        out.push(HighscoreEntry { name, url, level });
    }

    out
}

/// The csrf token the pagination form wants back.
pub fn csrf_token(doc: &str) -> Option<String> {
    let lc = to_lower(doc);
    let mut pos = 0usize;
    while let Some(i) = lc[pos..].find("<input") {
        let tag_start = pos + i;
        let tag_end = doc[tag_start..].find('>')?;
        let tag = &doc[tag_start..tag_start + tag_end + 1];
        if attr_value(tag, "name").as_deref() == Some("csrftoken") {
            return attr_value(tag, "value");
        }
        pos = tag_start + tag_end + 1;
    }
    None
}
