use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{AuthToken, User};
use crate::domain::repositories::auth_repository::{
    AuthRepositoryError, TokenRepository, UserRepository,
};
use crate::infrastructure::database::models::{AuthTokenModel, NewUserModel, UserModel};
use crate::infrastructure::database::schema::{auth_tokens, users};
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

/// Backs both halves of the auth story: the user table and the one-token-per-
/// user bearer token table.
pub struct PostgresAuthRepository {
    pool: DbPool,
}

impl PostgresAuthRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn connection(&self) -> Result<crate::infrastructure::database::DbConnection, AuthRepositoryError> {
        get_connection_from_pool(&self.pool)
            .map_err(|e| AuthRepositoryError::DatabaseError(e.to_string()))
    }
}

#[async_trait]
impl UserRepository for PostgresAuthRepository {
    async fn save(&self, user: &User) -> Result<(), AuthRepositoryError> {
        let mut conn = self.connection()?;

        let new_user = NewUserModel::from(user);

        diesel::insert_into(users::table)
            .values(&new_user)
            .execute(&mut conn)
            .map_err(|e| AuthRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_username(&self, name: &str) -> Result<Option<User>, AuthRepositoryError> {
        let mut conn = self.connection()?;

        let result = users::table
            .filter(users::username.eq(name))
            .first::<UserModel>(&mut conn)
            .optional()
            .map_err(|e| AuthRepositoryError::DatabaseError(e.to_string()))?;

        match result {
            Some(model) => {
                let user = User::try_from(model).map_err(AuthRepositoryError::ValidationError)?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl TokenRepository for PostgresAuthRepository {
    async fn get_or_create(&self, for_user: Uuid) -> Result<AuthToken, AuthRepositoryError> {
        let mut conn = self.connection()?;

        let existing = auth_tokens::table
            .filter(auth_tokens::user_id.eq(for_user))
            .first::<AuthTokenModel>(&mut conn)
            .optional()
            .map_err(|e| AuthRepositoryError::DatabaseError(e.to_string()))?;

        if let Some(model) = existing {
            return Ok(AuthToken::from(model));
        }

        let token = AuthToken::issue(for_user);
        let model = AuthTokenModel::from(&token);

        diesel::insert_into(auth_tokens::table)
            .values(&model)
            .execute(&mut conn)
            .map_err(|e| AuthRepositoryError::DatabaseError(e.to_string()))?;

        Ok(token)
    }

    async fn find_user_by_token(&self, bearer: &str) -> Result<Option<User>, AuthRepositoryError> {
        let mut conn = self.connection()?;

        let result = auth_tokens::table
            .inner_join(users::table)
            .filter(auth_tokens::token.eq(bearer))
            .select(UserModel::as_select())
            .first::<UserModel>(&mut conn)
            .optional()
            .map_err(|e| AuthRepositoryError::DatabaseError(e.to_string()))?;

        match result {
            Some(model) => {
                let user = User::try_from(model).map_err(AuthRepositoryError::ValidationError)?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    async fn delete_for_user(&self, for_user: Uuid) -> Result<bool, AuthRepositoryError> {
        let mut conn = self.connection()?;

        let deleted_count =
            diesel::delete(auth_tokens::table.filter(auth_tokens::user_id.eq(for_user)))
                .execute(&mut conn)
                .map_err(|e| AuthRepositoryError::DatabaseError(e.to_string()))?;

        Ok(deleted_count > 0)
    }
}
