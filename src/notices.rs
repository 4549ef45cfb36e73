//! Short user-facing event messages ("Ad loaded.", "You lose!", ...),
//! newest first, capped so the panel never scrolls.

use crate::constants::MAX_NOTICES;
use chrono::{DateTime, Local};
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct Notice {
    pub at: DateTime<Local>,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct NoticeLog {
    entries: VecDeque<Notice>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MAX_NOTICES),
        }
    }

    pub fn push(&mut self, text: impl Into<String>) {
        if self.entries.len() >= MAX_NOTICES {
            self.entries.pop_back();
        }
        self.entries.push_front(Notice {
            at: Local::now(),
            text: text.into(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
