// src/html.rs
// String-scan helpers for the game's server-rendered pages.
// No DOM, no parser dependency: the markup is stable enough that
// case-insensitive substring walking holds up.

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Next `(start, end)` of a full `<o ...> ... c` block at or after `from`.
pub fn next_tag_block_ci(s: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let ol = to_lower(o);
    let cl = to_lower(c);
    let start = lc.get(from..)?.find(&ol)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&cl)?;
    let end = open_end + end_rel + c.len();
    Some((start, end))
}

pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    String::new()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ").replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// Plain text of a tag block: inner markup stripped and entities folded.
pub fn block_text(block: &str) -> String {
    strip_tags(normalize_entities(&inner_after_open_tag(block)))
}

/// Value of `name="..."` (or `name=...` unquoted) inside an opening tag.
pub fn attr_value(tag: &str, name: &str) -> Option<String> {
    let lc = to_lower(tag);
    let needle = format!("{}=", to_lower(name));
    let mut from = 0usize;
    loop {
        let i = lc[from..].find(&needle)? + from;
        // Require a boundary before the attribute name.
        if i > 0 && !lc.as_bytes()[i - 1].is_ascii_whitespace() {
            from = i + needle.len();
            continue;
        }
        let rest = &tag[i + needle.len()..];
        let mut chars = rest.chars();
        return match chars.next() {
            Some(q @ ('"' | '\'')) => {
                let rest = &rest[1..];
                rest.find(q).map(|end| rest[..end].to_string())
            }
            Some(_) => {
                let end = rest
                    .find(|c: char| c.is_whitespace() || c == '>')
                    .unwrap_or(rest.len());
                Some(rest[..end].to_string())
            }
            None => None,
        };
    }
}

/// First run of ASCII digits at or after `from`, with its end offset.
pub fn digits_at(s: &str, from: usize) -> Option<(u64, usize)> {
    let bytes = s.as_bytes();
    let mut i = from;
    while i < bytes.len() && !bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i >= bytes.len() {
        return None;
    }
    let start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    s[start..i].parse().ok().map(|v| (v, i))
}

/// First unsigned integer after the first occurrence of `marker`.
pub fn int_after(s: &str, marker: &str) -> Option<u64> {
    let at = s.find(marker)? + marker.len();
    digits_at(s, at).map(|(v, _)| v)
}

/// Signed integer right after `marker`, tolerating thousands separators ("−1,234").
pub fn signed_int_after(s: &str, marker: &str) -> Option<i64> {
    let at = s.find(marker)? + marker.len();
    let rest = s[at..].trim_start();
    let mut txt = String::new();
    for ch in rest.chars() {
        match ch {
            '-' if txt.is_empty() => txt.push(ch),
            '0'..='9' => txt.push(ch),
            ',' if !txt.is_empty() && txt != "-" => {}
            _ => break,
        }
    }
    if txt.is_empty() || txt == "-" {
        return None;
    }
    txt.parse().ok()
}

/// Integer out of loose cell text ("1,234 gold" -> 1234). Zero when absent.
pub fn cell_int(s: &str) -> i64 {
    let trimmed = s.trim();
    let mut txt = String::new();
    let mut seen_digit = false;
    for ch in trimmed.chars() {
        match ch {
            '-' if txt.is_empty() => txt.push(ch),
            '0'..='9' => {
                txt.push(ch);
                seen_digit = true;
            }
            ',' if seen_digit => {}
            _ if !seen_digit => {
                txt.clear();
            }
            _ => break,
        }
    }
    txt.parse().unwrap_or(0)
}
