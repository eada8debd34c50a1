use async_trait::async_trait;
use sea_orm::{sea_query::OnConflict, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};
use tracing::debug;
use uuid::Uuid;

use models::message::{self, Entity as MessageEntity};

use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};

/// Persistence port for messages. Performs no validation.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Insert, or replace the record with the same id.
    async fn save(&self, message: message::Model) -> Result<message::Model, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<message::Model>, ServiceError>;
    /// Succeeds whether or not the id exists.
    async fn delete_by_id(&self, id: Uuid) -> Result<(), ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
    /// Page through all messages ordered by `(created_at, id)`.
    async fn list_paged(&self, request: PageRequest) -> Result<Page<message::Model>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmMessageRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmMessageRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl MessageRepository for SeaOrmMessageRepository {
    async fn save(&self, msg: message::Model) -> Result<message::Model, ServiceError> {
        let saved = MessageEntity::insert(msg.into_set_active_model())
            .on_conflict(
                OnConflict::column(message::Column::Id)
                    .update_columns([
                        message::Column::Author,
                        message::Column::Content,
                        message::Column::CreatedAt,
                        message::Column::LikeCount,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await?;
        Ok(saved)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<message::Model>, ServiceError> {
        let found = MessageEntity::find_by_id(id).one(&self.db).await?;
        Ok(found)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), ServiceError> {
        let res = MessageEntity::delete_by_id(id).exec(&self.db).await?;
        debug!(%id, rows = res.rows_affected, "delete message");
        Ok(())
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        let n = MessageEntity::find().count(&self.db).await?;
        Ok(n)
    }

    async fn list_paged(&self, request: PageRequest) -> Result<Page<message::Model>, ServiceError> {
        let paginator = MessageEntity::find()
            .order_by_asc(message::Column::CreatedAt)
            .order_by_asc(message::Column::Id)
            .paginate(&self.db, request.size.max(1));
        let total = paginator.num_items().await?;
        // pages past the end never reach the database; this also keeps
        // `page_size * page` inside fetch_page from overflowing
        let rows = match request.page.checked_mul(request.size.max(1)) {
            Some(offset) if offset < total => paginator.fetch_page(request.page).await?,
            _ => Vec::new(),
        };
        Ok(Page::new(rows, request, total))
    }
}
