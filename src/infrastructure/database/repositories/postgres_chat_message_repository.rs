use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::ChatMessage;
use crate::domain::repositories::chat_message_repository::{
    ChatMessageRepository, ChatMessageRepositoryError,
};
use crate::infrastructure::database::models::{ChatMessageModel, NewChatMessageModel};
use crate::infrastructure::database::schema::chat_messages::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresChatMessageRepository {
    pool: DbPool,
}

impl PostgresChatMessageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatMessageRepository for PostgresChatMessageRepository {
    async fn save(&self, message: &ChatMessage) -> Result<(), ChatMessageRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChatMessageRepositoryError::DatabaseError(e.to_string()))?;

        let new_message = NewChatMessageModel::from(message);

        diesel::insert_into(chat_messages)
            .values(&new_message)
            .execute(&mut conn)
            .map_err(|e| ChatMessageRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_session(
        &self,
        for_session: Uuid,
    ) -> Result<Vec<ChatMessage>, ChatMessageRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChatMessageRepositoryError::DatabaseError(e.to_string()))?;

        let models = chat_messages
            .filter(session_id.eq(for_session))
            .order(timestamp.asc())
            .load::<ChatMessageModel>(&mut conn)
            .map_err(|e| ChatMessageRepositoryError::DatabaseError(e.to_string()))?;

        let mut messages = Vec::new();
        for model in models {
            let message = ChatMessage::try_from(model)
                .map_err(ChatMessageRepositoryError::ValidationError)?;
            messages.push(message);
        }

        Ok(messages)
    }
}
