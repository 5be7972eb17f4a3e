//! MongoDB implementation of UserRepository

use std::future::{Future, IntoFuture};
use std::time::Duration;

use async_trait::async_trait;
use mongodb::{
    Collection, Database, IndexModel,
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
};
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::User;
use crate::repository::UserRepository;

/// Deadline for a single store operation.
const OP_TIMEOUT: Duration = Duration::from_secs(5);

/// MongoDB duplicate-key error code, raised by the unique username index.
const DUPLICATE_KEY: i32 = 11000;

/// MongoDB implementation of the UserRepository
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    /// Create a new MongoUserRepository
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<User>("users");
        Self { collection }
    }

    /// Create a new MongoUserRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<User>(collection_name);
        Self { collection }
    }

    /// Create the unique username index.
    ///
    /// Call once at startup; the store enforces uniqueness from then on and
    /// `create` translates the duplicate-key signal into `UsernameTaken`.
    pub async fn ensure_indexes(&self) -> UserResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("idx_username_unique".to_string())
                    .build(),
            )
            .build();

        self.with_deadline("create user indexes", self.collection.create_index(index).into_future())
            .await?;

        tracing::info!("User indexes created successfully");
        Ok(())
    }

    /// Run a store operation under the call-scoped deadline.
    async fn with_deadline<T>(
        &self,
        op_name: &str,
        op: impl Future<Output = mongodb::error::Result<T>>,
    ) -> UserResult<T> {
        match tokio::time::timeout(OP_TIMEOUT, op).await {
            Ok(result) => result.map_err(UserError::from),
            Err(_) => Err(UserError::Timeout(op_name.to_string())),
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write_error))
            if write_error.code == DUPLICATE_KEY
    )
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: User) -> UserResult<User> {
        match tokio::time::timeout(OP_TIMEOUT, self.collection.insert_one(&user).into_future()).await {
            Ok(Ok(_)) => {
                tracing::info!(user_id = %user.id, "User created successfully");
                Ok(user)
            }
            Ok(Err(e)) if is_duplicate_key(&e) => Err(UserError::UsernameTaken(user.username)),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(UserError::Timeout("insert user".to_string())),
        }
    }

    #[instrument(skip(self))]
    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>> {
        self.with_deadline(
            "find user",
            self.collection.find_one(doc! { "username": username }).into_future(),
        )
        .await
    }
}
