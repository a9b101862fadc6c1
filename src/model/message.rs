#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub id: String,
    pub counterpart: String,
    pub preview: String,
    pub unread: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    Me,
    Them,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub author: Author,
    pub body: String,
    pub sent_at: String,
}
