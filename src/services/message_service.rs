use crate::config::ChatConfig;
use crate::domain::message::Message;
use crate::error::{AppError, Result};
use crate::storage::conversation_repo::ConversationRepository;
use crate::storage::message_repo::MessageRepository;
use crate::storage::user_repo::UserRepository;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct MessageService {
    conversation_repo: ConversationRepository,
    message_repo: MessageRepository,
    user_repo: UserRepository,
    config: ChatConfig,
}

impl MessageService {
    #[must_use]
    pub const fn new(
        conversation_repo: ConversationRepository,
        message_repo: MessageRepository,
        user_repo: UserRepository,
        config: ChatConfig,
    ) -> Self {
        Self { conversation_repo, message_repo, user_repo, config }
    }

    /// Stores a message from `sender_id` to `recipient_id`, creating the
    /// conversation between the pair if it does not exist yet.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the recipient does not exist and
    /// `AppError::BadRequest` for empty, oversized, or self-addressed text.
    #[tracing::instrument(
        skip(self, text),
        fields(recipient_id = %recipient_id),
        err(level = "warn")
    )]
    pub async fn send(&self, sender_id: Uuid, recipient_id: Uuid, text: &str) -> Result<Message> {
        if sender_id == recipient_id {
            return Err(AppError::BadRequest("Cannot message yourself".into()));
        }
        if text.is_empty() {
            return Err(AppError::BadRequest("Message text must not be empty".into()));
        }
        if text.len() > self.config.max_message_bytes {
            return Err(AppError::BadRequest("Message text too long".into()));
        }

        if self.user_repo.find_by_id(recipient_id).await?.is_none() {
            return Err(AppError::NotFound);
        }

        let conversation = match self.conversation_repo.find_between(sender_id, recipient_id).await? {
            Some(conversation) => conversation,
            None => self.conversation_repo.create(sender_id, recipient_id).await?,
        };

        let message = self.message_repo.create(conversation.id, sender_id, text).await?;
        tracing::debug!(conversation_id = %conversation.id, "Message stored");

        Ok(message)
    }
}
