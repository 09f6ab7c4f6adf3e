use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::AuthToken as DomainAuthToken;
use crate::infrastructure::database::schema::auth_tokens;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Insertable, Deserialize)]
#[diesel(table_name = auth_tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AuthTokenModel {
    pub token: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<&DomainAuthToken> for AuthTokenModel {
    fn from(token: &DomainAuthToken) -> Self {
        Self {
            token: token.token().to_string(),
            user_id: token.user_id(),
            created_at: token.created_at(),
        }
    }
}

impl From<AuthTokenModel> for DomainAuthToken {
    fn from(model: AuthTokenModel) -> Self {
        DomainAuthToken::restore(model.token, model.user_id, model.created_at)
    }
}
