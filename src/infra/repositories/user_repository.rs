//! User repository.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{AccountStatus, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::types::{SortDirection, SortParams};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Filter predicate for the admin user directory.
///
/// Admin accounts are always excluded from directory listings.
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub role: Option<UserRole>,
    pub status: Option<AccountStatus>,
    pub search: Option<String>,
    pub sort: Option<SortParams>,
}

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user; duplicate email surfaces as `Conflict`.
    async fn create(&self, user: User) -> AppResult<User>;

    /// Full-record update keyed by id.
    async fn update(&self, user: User) -> AppResult<User>;

    async fn set_status(&self, id: Uuid, status: AccountStatus) -> AppResult<User>;

    /// Hard delete; the caller runs the domain cascade first.
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Admin directory listing (admins excluded).
    async fn list(&self, query: UserListQuery) -> AppResult<Vec<User>>;

    /// Public company directory.
    async fn list_companies(&self) -> AppResult<Vec<User>>;

    async fn count_by_role(&self, role: UserRole) -> AppResult<u64>;

    async fn count_by_role_and_status(
        &self,
        role: UserRole,
        status: AccountStatus,
    ) -> AppResult<u64>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_active(user: User) -> ActiveModel {
    ActiveModel {
        id: Set(user.id),
        name: Set(user.name),
        email: Set(user.email),
        password_hash: Set(user.password_hash),
        role: Set(user.role.as_str().to_string()),
        status: Set(user.status.as_str().to_string()),
        avatar: Set(user.avatar),
        contact_number: Set(user.contact_number),
        created_at: Set(user.created_at),
        updated_at: Set(user.updated_at),
    }
}

fn map_insert_err(e: DbErr) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("User"),
        _ => AppError::from(e),
    }
}

fn sort_column(field: &str) -> Option<user::Column> {
    match field {
        "name" => Some(user::Column::Name),
        "email" => Some(user::Column::Email),
        "status" => Some(user::Column::Status),
        "created_at" => Some(user::Column::CreatedAt),
        _ => None,
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, user: User) -> AppResult<User> {
        let model = to_active(user)
            .insert(&self.db)
            .await
            .map_err(map_insert_err)?;

        Ok(User::from(model))
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let model = to_active(user).update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => AppError::NotFound,
            e => AppError::from(e),
        })?;

        Ok(User::from(model))
    }

    async fn set_status(&self, id: Uuid, status: AccountStatus) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn list(&self, query: UserListQuery) -> AppResult<Vec<User>> {
        let mut select = UserEntity::find().filter(user::Column::Role.ne(UserRole::Admin.as_str()));

        if let Some(role) = query.role {
            select = select.filter(user::Column::Role.eq(role.as_str()));
        }
        if let Some(status) = query.status {
            select = select.filter(user::Column::Status.eq(status.as_str()));
        }
        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", search.to_lowercase());
            select = select.filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col((
                            UserEntity,
                            user::Column::Name,
                        ))))
                        .like(pattern.clone()),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col((
                            UserEntity,
                            user::Column::Email,
                        ))))
                        .like(pattern),
                    ),
            );
        }

        let sort = query.sort.unwrap_or_default();
        select = match sort_column(&sort.field) {
            Some(column) => {
                let order = match sort.direction {
                    SortDirection::Asc => Order::Asc,
                    SortDirection::Desc => Order::Desc,
                };
                select.order_by(column, order)
            }
            // Unknown sort field: fall back to newest-first
            None => select.order_by_desc(user::Column::CreatedAt),
        };

        let models = select.all(&self.db).await.map_err(AppError::from)?;
        Ok(models.into_iter().map(User::from).collect())
    }

    async fn list_companies(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .filter(user::Column::Role.eq(UserRole::Company.as_str()))
            .order_by_desc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn count_by_role(&self, role: UserRole) -> AppResult<u64> {
        UserEntity::find()
            .filter(user::Column::Role.eq(role.as_str()))
            .count(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn count_by_role_and_status(
        &self,
        role: UserRole,
        status: AccountStatus,
    ) -> AppResult<u64> {
        UserEntity::find()
            .filter(user::Column::Role.eq(role.as_str()))
            .filter(user::Column::Status.eq(status.as_str()))
            .count(&self.db)
            .await
            .map_err(Into::into)
    }
}
