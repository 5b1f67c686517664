// src/scrape/reports.rs
// Attack-report message list: each data row carries the fight date, the
// victim's profile link, the winner's name and a link with the fight id.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::html::{attr_value, block_text, int_after, next_tag_block_ci};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub battle_id: u64,
    pub victim_url: String,
    pub winner_name: String,
    pub date: DateTime<Utc>,
}

/// Total number of reports, from the pager cell ("1 - 10 of 345").
pub fn total(doc: &str) -> Option<u64> {
    let mut pos = 0usize;
    while let Some((td_s, td_e)) = next_tag_block_ci(doc, "<td", "</td>", pos) {
        let text = block_text(&doc[td_s..td_e]);
        pos = td_e;
        if text.contains(" - ") && text.contains(" of ") {
            return int_after(&text, " of ");
        }
    }
    None
}

/// All data rows on the page. Header and spacer rows parse as no date and
/// fall out naturally.
pub fn rows(doc: &str) -> Vec<ReportRow> {
    let mut out = Vec::new();
    let mut pos = 0usize;

    while let Some((tr_s, tr_e)) = next_tag_block_ci(doc, "<tr", "</tr>", pos) {
        let tr = &doc[tr_s..tr_e];
        pos = tr_e;

        let mut cells = Vec::new();
        let mut td_pos = 0usize;
        while let Some((td_s, td_e)) = next_tag_block_ci(tr, "<td", "</td>", td_pos) {
            cells.push(&tr[td_s..td_e]);
            td_pos = td_e;
        }
        if cells.len() < 4 {
            continue;
        }

        let Ok(date) = NaiveDateTime::parse_from_str(block_text(cells[0]).trim(), DATE_FORMAT)
        else {
            continue;
        };

        let Some(victim_url) = link_href(cells[1]) else {
            continue;
        };
        let winner_name = block_text(cells[2]);

        let Some(battle_link) = cells.last().and_then(|c| link_href(c)) else {
            continue;
        };
        let Some(battle_id) = int_after(&battle_link, "fightid=") else {
            continue;
        };

        out.push(ReportRow {
            battle_id,
            victim_url,
            winner_name,
            date: date.and_utc(),
        });
    }

    out
}

fn link_href(cell: &str) -> Option<String> {
    let (a_s, a_e) = next_tag_block_ci(cell, "<a", "</a>", 0)?;
    let link = &cell[a_s..a_e];
    let open_end = link.find('>')?;
    attr_value(&link[..open_end + 1], "href")
}
