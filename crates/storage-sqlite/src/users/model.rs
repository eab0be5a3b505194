//! Database model for users.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use procat_core::users::User;

#[derive(Queryable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct UserDB {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub is_superuser: bool,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            username: db.username,
            full_name: db.full_name,
            email: db.email,
            is_superuser: db.is_superuser,
        }
    }
}

impl From<User> for UserDB {
    fn from(domain: User) -> Self {
        Self {
            id: domain.id,
            username: domain.username,
            full_name: domain.full_name,
            email: domain.email,
            is_superuser: domain.is_superuser,
        }
    }
}
