//! Conversations list plus the open thread.

use std::cell::RefCell;

use super::stamp::Generation;
use crate::api::MarketplaceApi;
use crate::error::ApiResult;
use crate::model::{Conversation, Message};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadTicket {
    pub conversation_id: String,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationsTicket {
    pub generation: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inbox {
    conversations: Vec<Conversation>,
    list_generation: Generation,
    open: Option<String>,
    generation: Generation,
    thread: Vec<Message>,
    loading: bool,
    error: Option<String>,
}

impl Inbox {
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn open(&self) -> Option<&str> {
        self.open.as_deref()
    }

    pub fn thread(&self) -> &[Message] {
        &self.thread
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn begin_conversations(&mut self) -> ConversationsTicket {
        ConversationsTicket { generation: self.list_generation.bump() }
    }

    /// Applies a conversation list unless a newer list request was started.
    pub fn finish_conversations(&mut self, ticket: ConversationsTicket, result: ApiResult<Vec<Conversation>>) -> bool {
        if !self.list_generation.is_current(ticket.generation) {
            tracing::debug!(generation = ticket.generation, "dropping stale conversation list");
            return false;
        }
        match result {
            Ok(list) => self.conversations = list,
            Err(e) => {
                tracing::warn!(error = %e, "loading conversations failed");
                self.error = Some(e.user_message());
            }
        }
        true
    }

    pub fn begin_thread(&mut self, conversation_id: &str) -> ThreadTicket {
        if self.open.as_deref() != Some(conversation_id) {
            self.thread.clear();
        }
        self.open = Some(conversation_id.to_string());
        self.loading = true;
        self.error = None;
        ThreadTicket {
            conversation_id: conversation_id.to_string(),
            generation: self.generation.bump(),
        }
    }

    pub fn finish_thread(&mut self, ticket: ThreadTicket, result: ApiResult<Vec<Message>>) -> bool {
        if !self.generation.is_current(ticket.generation) {
            tracing::debug!(conversation = %ticket.conversation_id, "dropping stale thread response");
            return false;
        }
        self.loading = false;
        match result {
            Ok(messages) => self.thread = messages,
            Err(e) => {
                tracing::warn!(conversation = %ticket.conversation_id, error = %e, "loading thread failed");
                self.error = Some(e.user_message());
            }
        }
        true
    }
}

pub async fn load_conversations(api: &dyn MarketplaceApi, inbox: &RefCell<Inbox>) -> bool {
    let ticket = inbox.borrow_mut().begin_conversations();
    let result = api.list_conversations().await;
    inbox.borrow_mut().finish_conversations(ticket, result)
}

pub async fn open_thread(api: &dyn MarketplaceApi, inbox: &RefCell<Inbox>, conversation_id: &str) -> bool {
    let ticket = inbox.borrow_mut().begin_thread(conversation_id);
    let result = api.list_messages(conversation_id).await;
    inbox.borrow_mut().finish_thread(ticket, result)
}
