use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::User as DomainUser;
use crate::domain::value_objects::PasswordDigest;
use crate::infrastructure::database::schema::users;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserModel {
    pub id: Uuid,
    pub username: String,
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, Deserialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUserModel {
    pub id: Uuid,
    pub username: String,
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
}

impl From<&DomainUser> for NewUserModel {
    fn from(user: &DomainUser) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_string(),
            password_digest: user.password_digest().as_str().to_string(),
            created_at: user.created_at(),
        }
    }
}

impl TryFrom<UserModel> for DomainUser {
    type Error = String;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let digest = PasswordDigest::new(model.password_digest)
            .map_err(|e| format!("Invalid digest on user {}: {}", model.id, e))?;

        Ok(DomainUser::restore(
            model.id,
            model.username,
            digest,
            model.created_at,
        ))
    }
}
