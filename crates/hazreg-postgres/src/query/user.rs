//! User lookups for identity resolution and login.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::{Role, User, UserAccess};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

diesel::define_sql_function! {
    /// SQL `lower(text)`.
    fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Repository for user database operations.
pub trait UserRepository {
    /// Finds an active user by email together with all assigned role names.
    ///
    /// The email is trimmed and compared case-insensitively. Inactive users
    /// are treated as absent.
    fn find_user_access_by_email(
        &mut self,
        email: &str,
    ) -> impl Future<Output = PgResult<Option<UserAccess>>> + Send;
}

impl UserRepository for PgConnection {
    async fn find_user_access_by_email(&mut self, email: &str) -> PgResult<Option<UserAccess>> {
        use schema::{roles, user_roles, users};

        let email = email.trim().to_lowercase();
        let user = users::table
            .filter(lower(users::email).eq(email))
            .filter(users::is_active.eq(true))
            .select(User::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        let Some(user) = user else {
            tracing::debug!(target: TRACING_TARGET_QUERY, "No active user for email");
            return Ok(None);
        };

        let roles: Vec<Role> = user_roles::table
            .inner_join(roles::table)
            .filter(user_roles::user_id.eq(user.id))
            .order(roles::name.asc())
            .select(Role::as_select())
            .load(self)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            user_id = %user.id,
            role_count = roles.len(),
            "Loaded user role assignments"
        );

        Ok(Some(UserAccess {
            user,
            role_names: roles.into_iter().map(|role| role.name).collect(),
        }))
    }
}
