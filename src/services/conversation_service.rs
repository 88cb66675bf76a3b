use crate::domain::conversation::{ConversationPreview, ConversationThread};
use crate::domain::read_state::{self, ReadReceiptStyle};
use crate::domain::user::Counterpart;
use crate::error::{AppError, Result};
use crate::services::presence::PresenceService;
use crate::storage::conversation_repo::ConversationRepository;
use crate::storage::message_repo::MessageRepository;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct ConversationService {
    conversation_repo: ConversationRepository,
    message_repo: MessageRepository,
    presence: Arc<dyn PresenceService>,
    read_receipt_style: ReadReceiptStyle,
}

impl ConversationService {
    #[must_use]
    pub fn new(
        conversation_repo: ConversationRepository,
        message_repo: MessageRepository,
        presence: Arc<dyn PresenceService>,
        read_receipt_style: ReadReceiptStyle,
    ) -> Self {
        Self { conversation_repo, message_repo, presence, read_receipt_style }
    }

    /// All of the requester's conversations as previews, most recently
    /// active first.
    #[tracing::instrument(skip(self), fields(user_id = %requester_id), err(level = "warn"))]
    pub async fn list(&self, requester_id: Uuid) -> Result<Vec<ConversationPreview>> {
        let threads = self.conversation_repo.find_for_user(requester_id).await?;

        let mut previews = Vec::with_capacity(threads.len());
        for thread in threads {
            let online = self.presence.is_online(thread.counterpart.id).await;
            previews.push(build_preview(thread, online, requester_id, self.read_receipt_style));
        }

        order_by_activity(&mut previews);
        Ok(previews)
    }

    /// Marks every message from `sender_id` in the conversation as read.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the conversation does not exist and
    /// `AppError::Forbidden` if the requester is not a participant.
    #[tracing::instrument(
        skip(self),
        fields(user_id = %requester_id, conversation_id = %conversation_id),
        err(level = "warn")
    )]
    pub async fn mark_read(&self, requester_id: Uuid, conversation_id: Uuid, sender_id: Uuid) -> Result<()> {
        let conversation =
            self.conversation_repo.find_by_id(conversation_id).await?.ok_or(AppError::NotFound)?;

        if !conversation.has_participant(requester_id) {
            return Err(AppError::Forbidden);
        }

        let updated = self.message_repo.mark_read(conversation_id, sender_id).await?;
        tracing::debug!(updated, "Messages marked read");

        Ok(())
    }
}

/// Assembles one preview from a fetched thread. The unread count is derived
/// from the rows fetched for this request, never from a cached value.
fn build_preview(
    thread: ConversationThread,
    counterpart_online: bool,
    requester_id: Uuid,
    style: ReadReceiptStyle,
) -> ConversationPreview {
    let ConversationThread { conversation, counterpart, messages } = thread;

    let unread_count = messages.iter().filter(|m| m.is_unread_from(counterpart.id)).count();
    let latest_message_text = messages.last().map(|m| m.text.clone()).unwrap_or_default();
    let last_read_id = read_state::most_recent_read(&messages, requester_id, style);

    ConversationPreview {
        id: conversation.id,
        other_user: Counterpart::new(counterpart, counterpart_online),
        latest_message_text,
        unread_count,
        last_read_id,
        messages,
    }
}

/// Most recently active conversation first. Conversations with no messages
/// sort last; equal timestamps break by conversation id descending.
fn order_by_activity(previews: &mut [ConversationPreview]) {
    previews.sort_by(|a, b| {
        let a_key = (a.messages.last().map(|m| m.created_at), a.id);
        let b_key = (b.messages.last().map(|m| m.created_at), b.id);
        b_key.cmp(&a_key)
    });
}
