// src/scrape/form.rs
// Minimal form extraction: method, action and named <input> fields.
// Enough for the login form and the attack confirmation form.

use crate::html::{attr_value, next_tag_block_ci, to_lower};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub method: String,
    pub action: String,
    pub fields: Vec<(String, String)>,
}

impl Form {
    /// Replace an existing field or add it; used to fill in credentials.
    pub fn set_field(&mut self, name: &str, value: &str) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.fields.push((name.to_string(), value.to_string())),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// First `<form>` on the page.
pub fn first_form(doc: &str) -> Option<Form> {
    next_form(doc, 0).map(|(form, _)| form)
}

/// First `<form>` whose action contains `action_needle`.
pub fn form_with_action(doc: &str, action_needle: &str) -> Option<Form> {
    let mut from = 0usize;
    while let Some((form, end)) = next_form(doc, from) {
        if form.action.contains(action_needle) {
            return Some(form);
        }
        from = end;
    }
    None
}

fn next_form(doc: &str, from: usize) -> Option<(Form, usize)> {
    let (start, end) = next_tag_block_ci(doc, "<form", "</form>", from)?;
    let block = &doc[start..end];
    let open_end = block.find('>')?;
    let open_tag = &block[..open_end + 1];

    let method = attr_value(open_tag, "method")
        .map(|m| to_lower(&m))
        .unwrap_or_else(|| "get".to_string());
    let action = attr_value(open_tag, "action").unwrap_or_default();

    let mut fields = Vec::new();
    let lc = to_lower(block);
    let mut pos = 0usize;
    while let Some(i) = lc[pos..].find("<input") {
        let tag_start = pos + i;
        let Some(tag_end) = block[tag_start..].find('>') else {
            break;
        };
        let tag = &block[tag_start..tag_start + tag_end + 1];
        if let Some(name) = attr_value(tag, "name") {
            let value = attr_value(tag, "value").unwrap_or_default();
            fields.push((name, value));
        }
        pos = tag_start + tag_end + 1;
    }

    Some((Form { method, action, fields }, end))
}
