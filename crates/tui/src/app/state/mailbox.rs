use crate::app::runtime::{MailListing, MailPart, MailRecord};
use crate::app::util::text::html_to_text;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MailTabKind {
    Html,
    Text,
    Attachment,
    Raw,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailTab {
    pub kind: MailTabKind,
    pub label: String,
    part: Option<usize>,
}

/// Builds the tab strip for a mail: HTML parts first, then text parts, then attachments, then
/// the raw source. Labels gain a counter when a kind occurs more than once.
pub fn mail_tabs(mail: &MailRecord) -> Vec<MailTab> {
    let mut tabs = Vec::new();
    for (kind, name) in [
        (MailTabKind::Html, "HTML"),
        (MailTabKind::Text, "Text"),
        (MailTabKind::Attachment, "Attachment"),
    ] {
        let parts: Vec<usize> = mail
            .parts
            .iter()
            .enumerate()
            .filter(|(_, part)| part_kind(part) == kind)
            .map(|(index, _)| index)
            .collect();
        let numbered = parts.len() > 1;
        for (ordinal, part) in parts.into_iter().enumerate() {
            let label = if numbered {
                format!("{name} #{}", ordinal + 1)
            } else {
                name.to_string()
            };
            tabs.push(MailTab {
                kind,
                label,
                part: Some(part),
            });
        }
    }
    tabs.push(MailTab {
        kind: MailTabKind::Raw,
        label: "Raw".to_string(),
        part: None,
    });
    tabs
}

fn part_kind(part: &MailPart) -> MailTabKind {
    match part {
        MailPart::Html(_) => MailTabKind::Html,
        MailPart::Text(_) => MailTabKind::Text,
        MailPart::Binary(_) => MailTabKind::Attachment,
    }
}

/// Mail list plus the currently displayed message.
#[derive(Default)]
pub struct MailboxView {
    pub listings: Vec<MailListing>,
    pub selected: usize,
    pub mail: Option<MailRecord>,
    pub mail_index: Option<u64>,
    pub tabs: Vec<MailTab>,
    pub tab: usize,
    pub scroll: u16,
    pub pending_fetch: Option<u64>,
}

impl MailboxView {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_listings(&mut self, listings: Vec<MailListing>) {
        self.listings = listings;
        self.selected = self.selected.min(self.listings.len().saturating_sub(1));
    }

    pub fn selected_listing(&self) -> Option<MailListing> {
        self.listings.get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.listings.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn begin_fetch(&mut self, index: u64) {
        self.pending_fetch = Some(index);
    }

    /// Applies a fetch result. A failed fetch keeps whatever mail was already shown.
    pub fn finish_fetch(&mut self, index: u64, mail: Option<MailRecord>) {
        if self.pending_fetch == Some(index) {
            self.pending_fetch = None;
        }
        let Some(mail) = mail else {
            return;
        };
        self.tabs = mail_tabs(&mail);
        self.mail = Some(mail);
        self.mail_index = Some(index);
        self.tab = 0;
        self.scroll = 0;
    }

    pub fn next_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.tab = (self.tab + 1) % self.tabs.len();
            self.scroll = 0;
        }
    }

    pub fn prev_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.tab = (self.tab + self.tabs.len() - 1) % self.tabs.len();
            self.scroll = 0;
        }
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Text shown under the active tab.
    pub fn tab_body(&self) -> Option<String> {
        let mail = self.mail.as_ref()?;
        let tab = self.tabs.get(self.tab)?;
        let body = match tab.part.and_then(|index| mail.parts.get(index)) {
            Some(MailPart::Html(html)) => html_to_text(html),
            Some(MailPart::Text(text)) => text.clone(),
            Some(MailPart::Binary(bytes)) => format!("{} bytes", bytes.len()),
            None => mail.raw.clone(),
        };
        Some(body)
    }
}
