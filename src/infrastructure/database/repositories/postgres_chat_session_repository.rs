use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::ChatSession;
use crate::domain::repositories::chat_session_repository::{
    ChatSessionRepository, ChatSessionRepositoryError,
};
use crate::infrastructure::database::models::{ChatSessionModel, NewChatSessionModel};
use crate::infrastructure::database::schema::chat_sessions::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresChatSessionRepository {
    pool: DbPool,
}

impl PostgresChatSessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatSessionRepository for PostgresChatSessionRepository {
    async fn save(&self, session: &ChatSession) -> Result<(), ChatSessionRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChatSessionRepositoryError::DatabaseError(e.to_string()))?;

        let new_session = NewChatSessionModel::from(session);

        diesel::insert_into(chat_sessions)
            .values(&new_session)
            .execute(&mut conn)
            .map_err(|e| ChatSessionRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_project(
        &self,
        for_project: Uuid,
    ) -> Result<Vec<ChatSession>, ChatSessionRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChatSessionRepositoryError::DatabaseError(e.to_string()))?;

        let models = chat_sessions
            .filter(project_id.eq(for_project))
            .order(created_at.asc())
            .load::<ChatSessionModel>(&mut conn)
            .map_err(|e| ChatSessionRepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(ChatSession::from).collect())
    }

    async fn find_in_project(
        &self,
        for_project: Uuid,
        session_id: Uuid,
    ) -> Result<Option<ChatSession>, ChatSessionRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChatSessionRepositoryError::DatabaseError(e.to_string()))?;

        let result = chat_sessions
            .find(session_id)
            .filter(project_id.eq(for_project))
            .first::<ChatSessionModel>(&mut conn)
            .optional()
            .map_err(|e| ChatSessionRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(ChatSession::from))
    }

    async fn update(&self, session: &ChatSession) -> Result<(), ChatSessionRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChatSessionRepositoryError::DatabaseError(e.to_string()))?;

        let update_model = NewChatSessionModel::from(session);

        diesel::update(chat_sessions.find(session.id()))
            .set(&update_model)
            .execute(&mut conn)
            .map_err(|e| ChatSessionRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> Result<bool, ChatSessionRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChatSessionRepositoryError::DatabaseError(e.to_string()))?;

        let deleted_count = diesel::delete(chat_sessions.find(session_id))
            .execute(&mut conn)
            .map_err(|e| ChatSessionRepositoryError::DatabaseError(e.to_string()))?;

        Ok(deleted_count > 0)
    }
}
