//! Inbox page: conversation list plus the selected thread.
//!
//! Messaging is poll/refetch based — sending a message re-fetches the
//! thread rather than appending locally, and the conversation list is
//! marked stale (the server updates its last_message) for the shell to
//! refresh when it chooses.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::api::Api;
use crate::error::PageError;
use crate::invalidation::{keys, InvalidationBus};
use crate::loader::{ResourceLoader, ResourceState};
use crate::types::{Conversation, Message, MessageCreate};

pub struct InboxPage {
    api: Arc<dyn Api>,
    bus: Arc<InvalidationBus>,
    conversations: ResourceLoader<Conversation>,
    /// Loader for the selected conversation's thread; replaced on select.
    messages: RwLock<Option<Arc<ResourceLoader<Message>>>>,
    selected: RwLock<Option<String>>,
}

impl InboxPage {
    pub fn new(api: Arc<dyn Api>, bus: Arc<InvalidationBus>) -> Self {
        Self {
            conversations: ResourceLoader::new(keys::CONVERSATIONS, bus.clone()),
            messages: RwLock::new(None),
            selected: RwLock::new(None),
            api,
            bus,
        }
    }

    /// Load conversations and, as the page does on mount, select the
    /// first one and pull its thread.
    pub async fn load(&self) -> Result<(), PageError> {
        self.conversations.run(self.api.list_conversations()).await?;

        let needs_selection = self.selected.read().is_none();
        if needs_selection {
            let first = self.conversations.items().first().map(|c| c.id.clone());
            if let Some(id) = first {
                return self.select(&id).await;
            }
        }
        Ok(())
    }

    pub fn conversations(&self) -> Vec<Conversation> {
        self.conversations.items()
    }

    pub fn conversations_state(&self) -> ResourceState<Conversation> {
        self.conversations.state()
    }

    /// True once a send has invalidated the list (last_message changed
    /// server-side) and it has not been re-fetched yet.
    pub fn conversations_stale(&self) -> bool {
        self.conversations.is_stale()
    }

    /// Search over conversation names.
    pub fn search(&self, query: &str) -> Vec<Conversation> {
        crate::filter::filter_items(&self.conversations.items(), query, |c, q| {
            crate::filter::contains_ci(&c.name, q)
        })
    }

    pub fn unread_total(&self) -> u32 {
        self.conversations.items().iter().map(|c| c.unread).sum()
    }

    pub fn selected_id(&self) -> Option<String> {
        self.selected.read().clone()
    }

    pub fn selected_conversation(&self) -> Option<Conversation> {
        let id = self.selected.read().clone()?;
        self.conversations.items().into_iter().find(|c| c.id == id)
    }

    /// Messages of the selected thread, in server order (created_at
    /// ascending).
    pub fn messages(&self) -> Vec<Message> {
        match &*self.messages.read() {
            Some(loader) => loader.items(),
            None => Vec::new(),
        }
    }

    pub fn messages_state(&self) -> Option<ResourceState<Message>> {
        self.messages.read().as_ref().map(|l| l.state())
    }

    /// Select a conversation and load its thread. Re-selecting quickly is
    /// safe: the thread loader is replaced, so a late response for the
    /// previous selection is dropped.
    pub async fn select(&self, conversation_id: &str) -> Result<(), PageError> {
        *self.selected.write() = Some(conversation_id.to_string());

        let loader = Arc::new(ResourceLoader::new(
            keys::messages(conversation_id),
            self.bus.clone(),
        ));
        *self.messages.write() = Some(loader.clone());

        loader.run(self.api.list_messages(conversation_id)).await
    }

    /// Send a message to the selected conversation. A whitespace-only body
    /// or missing selection is a no-op: no request is issued.
    pub async fn send(&self, text: &str) -> Result<bool, PageError> {
        if text.trim().is_empty() {
            return Ok(false);
        }
        let Some(conversation_id) = self.selected.read().clone() else {
            return Ok(false);
        };

        let payload = MessageCreate {
            conversation_id: conversation_id.clone(),
            text: text.to_string(),
        };
        match self.api.send_message(&payload).await {
            Ok(_) => {
                self.bus.invalidate(&keys::messages(&conversation_id));
                self.bus.invalidate(keys::CONVERSATIONS);
                self.reload_messages(&conversation_id).await?;
                Ok(true)
            }
            Err(err) => {
                log::warn!("Send message failed: {}", err);
                Err(err.into())
            }
        }
    }

    async fn reload_messages(&self, conversation_id: &str) -> Result<(), PageError> {
        let loader = self.messages.read().clone();
        match loader {
            Some(loader) => loader.run(self.api.list_messages(conversation_id)).await,
            None => Ok(()),
        }
    }
}
