use sea_orm::{DatabaseConnection, TransactionTrait};
use models::user::NewUser;

use crate::auth::domain::{AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn repo_err(e: sea_orm::DbErr) -> AuthError { AuthError::Repository(e.to_string()) }

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::find_by_username(&self.db, username).await?;
        Ok(res.map(AuthUser::from))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::find_by_email(&self.db, email).await?;
        Ok(res.map(AuthUser::from))
    }

    async fn create_user(&self, new: NewUser, password_hash: String, password_algorithm: String) -> Result<AuthUser, AuthError> {
        let txn = self.db.begin().await.map_err(repo_err)?;
        let created = models::user::create(&txn, new).await?;
        models::user_credentials::upsert_password(&txn, created.id, password_hash, &password_algorithm).await?;
        txn.commit().await.map_err(repo_err)?;
        Ok(AuthUser::from(created))
    }

    async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, AuthError> {
        let res = models::user_credentials::find_by_user(&self.db, user_id).await?;
        Ok(res.map(|c| Credentials { user_id: c.user_id, password_hash: c.password_hash, password_algorithm: c.password_algorithm }))
    }

    async fn get_or_create_token(&self, user_id: i32, fresh_key: String) -> Result<(String, bool), AuthError> {
        let (token, created) = models::auth_token::get_or_create(&self.db, user_id, fresh_key).await?;
        Ok((token.key, created))
    }

    async fn find_user_by_token(&self, key: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = models::auth_token::find_user(&self.db, key).await?;
        Ok(res.map(AuthUser::from))
    }

    async fn delete_token(&self, user_id: i32) -> Result<bool, AuthError> {
        Ok(models::auth_token::delete_for_user(&self.db, user_id).await?)
    }
}
