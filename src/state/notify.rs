//! Toasts shown at the bottom of the screen.

pub const MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Error,
}

impl Level {
    pub fn class(self) -> &'static str {
        match self {
            Level::Success => "toast ok",
            Level::Info => "toast",
            Level::Error => "toast err",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub level: Level,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notices {
    next_id: u64,
    items: Vec<Notice>,
}

impl Notices {
    /// Queues a notice and returns its id. The oldest one is dropped past `MAX_VISIBLE`.
    pub fn push(&mut self, level: Level, text: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notice { id, level, text: text.into() });
        if self.items.len() > MAX_VISIBLE {
            self.items.remove(0);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    pub fn items(&self) -> &[Notice] {
        &self.items
    }
}
