// src/scrape/profile.rs
// Turns one player profile page into a full Player record. The page spreads
// the data across tooltip `rel` attributes, digit images and two profile
// tables, so this leans on every trick in html.rs.

use chrono::NaiveDateTime;

use crate::entities::Player;
use crate::error::{Error, Result};
use crate::html::{
    attr_value, block_text, cell_int, int_after, next_tag_block_ci, signed_int_after, to_lower,
};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a profile page. `name`, `url` and `level` come from the highscore
/// row that led us here; everything else is read off this page.
pub fn parse(doc: &str, name: &str, url: &str, level: u32) -> Result<Player> {
    let mut player = Player {
        name: name.to_string(),
        url: url.to_string(),
        level,
        ..Player::default()
    };

    player.id = u32::try_from(
        int_after(url, "/player/")
            .ok_or_else(|| Error::Scrape(format!("no player id in url {}", url)))?,
    )
    .map_err(|_| Error::Scrape(format!("player id out of range in url {}", url)))?;

    // Vitals live in tooltip text: "Health points: 1,234.56 of 2000",
    // "Experience: -12 of 400", "Alignment: ... ~-30".
    let hp = doc
        .find("Health points:")
        .map(|at| &doc[at + "Health points:".len()..])
        .ok_or_else(|| Error::Scrape("profile page has no health tooltip".into()))?;
    player.current_hp = decimal_prefix(hp)
        .ok_or_else(|| Error::Scrape("unreadable current health".into()))?;
    player.max_hp = int_after(hp, " of ")
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| Error::Scrape("unreadable max health".into()))?;

    player.experience = signed_int_after(doc, "Experience:")
        .ok_or_else(|| Error::Scrape("profile page has no experience tooltip".into()))?;

    let alignment_at = doc
        .find("Alignment:")
        .ok_or_else(|| Error::Scrape("profile page has no alignment tooltip".into()))?;
    player.alignment = signed_int_after(&doc[alignment_at..], "~")
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| Error::Scrape("unreadable alignment".into()))?;

    // Five attributes then three skills, rendered as digit images.
    let stats = stat_values(doc);
    if stats.len() < 8 {
        return Err(Error::Scrape(format!(
            "expected 8 stat blocks, page has {}",
            stats.len()
        )));
    }
    player.strength = stats[0];
    player.stamina = stats[1];
    player.dexterity = stats[2];
    player.fighting_ability = stats[3];
    player.parry = stats[4];
    player.armour = stats[5];
    player.one_handed_attack = stats[6];
    player.two_handed_attack = stats[7];

    // Profile box: first table has the registration date, second the
    // battle statistics in fixed row order.
    if let Some(at) = to_lower(doc).find("box-bg-profil") {
        let tail = &doc[at..];
        if let Some((t1_s, t1_e)) = next_tag_block_ci(tail, "<table", "</table>", 0) {
            if let Some(raw) = labelled_cell(&tail[t1_s..t1_e], "Knight since:") {
                if let Ok(ts) = NaiveDateTime::parse_from_str(raw.trim(), DATE_FORMAT) {
                    player.created_at = ts.and_utc();
                }
            }

            if let Some((t2_s, t2_e)) = next_tag_block_ci(tail, "<table", "</table>", t1_e) {
                let rows = table_rows(&tail[t2_s..t2_e]);
                let value = |i: usize| -> i64 {
                    rows.get(i)
                        .and_then(|r| r.get(1))
                        .map(|c| cell_int(c))
                        .unwrap_or(0)
                };
                player.total_loot = value(2).max(0) as u64;
                player.total_battles = value(4).max(0) as u32;
                player.wins = value(5).max(0) as u32;
                player.losses = value(6).max(0) as u32;
                player.undecided = value(7).max(0) as u32;
                player.gold_received = value(8).max(0) as u64;
                player.gold_lost = value(9).max(0) as u64;
                player.damage_to_enemies = value(10).max(0) as u64;
                player.damage_from_enemies = value(11).max(0) as u64;
            }
        }
    }

    Ok(player)
}

/// Each `class="sc"` block renders one stat as digit images
/// (`.../b4.gif` + `.../b2.gif` inside `*elem` divs -> 42).
fn stat_values(doc: &str) -> Vec<u32> {
    let lc = to_lower(doc);
    let marker = "class=\"sc\"";

    let mut starts = Vec::new();
    let mut pos = 0usize;
    while let Some(i) = lc[pos..].find(marker) {
        starts.push(pos + i);
        pos = pos + i + marker.len();
    }

    let mut out = Vec::new();
    for (k, &start) in starts.iter().enumerate() {
        let end = starts.get(k + 1).copied().unwrap_or(doc.len());
        let window = &doc[start..end];
        let wlc = &lc[start..end];

        let mut digits = String::new();
        let mut p = 0usize;
        while let Some(i) = wlc[p..].find("elem\"") {
            let at = p + i;
            if let Some(img_rel) = wlc[at..].find("<img") {
                let img_at = at + img_rel;
                if let Some(gt) = window[img_at..].find('>') {
                    let tag = &window[img_at..img_at + gt + 1];
                    if let Some(src) = attr_value(tag, "src") {
                        digits.push_str(&digit_stem(&src));
                    }
                }
            }
            p = at + "elem\"".len();
        }
        out.push(digits.parse().unwrap_or(0));
    }
    out
}

/// "images/stats/b7.gif" -> "7"
fn digit_stem(src: &str) -> String {
    let file = src.rsplit('/').next().unwrap_or(src);
    let stem = file.split('.').next().unwrap_or(file);
    stem.trim_matches('b')
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect()
}

/// All `<tr>` rows of a table as vectors of cell texts.
fn table_rows(table: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut pos = 0usize;
    while let Some((tr_s, tr_e)) = next_tag_block_ci(table, "<tr", "</tr>", pos) {
        let tr = &table[tr_s..tr_e];
        pos = tr_e;

        let mut cells = Vec::new();
        let mut td_pos = 0usize;
        while let Some((td_s, td_e)) = next_tag_block_ci(tr, "<td", "</td>", td_pos) {
            cells.push(block_text(&tr[td_s..td_e]));
            td_pos = td_e;
        }
        rows.push(cells);
    }
    rows
}

/// Second cell of the row whose first cell equals `label`.
fn labelled_cell(table: &str, label: &str) -> Option<String> {
    table_rows(table)
        .into_iter()
        .find(|r| r.first().map(|c| c == label).unwrap_or(false))
        .and_then(|r| r.get(1).cloned())
}

/// Leading decimal, commas tolerated: "1,234.56 of ..." -> 1234.56
fn decimal_prefix(s: &str) -> Option<f64> {
    let rest = s.trim_start();
    let mut txt = String::new();
    for ch in rest.chars() {
        match ch {
            '0'..='9' | '.' => txt.push(ch),
            ',' if !txt.is_empty() => {}
            _ => break,
        }
    }
    txt.parse().ok()
}
