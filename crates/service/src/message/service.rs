use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use models::message;

use crate::errors::ServiceError;
use crate::message::domain::{NewMessage, UpdateMessage};
use crate::message::ids::{IdGenerator, UuidV4Generator};
use crate::message::repository::MessageRepository;
use crate::pagination::{Page, PageRequest};

const ID_MISMATCH: &str = "updated message does not carry the expected id";

/// Application service encapsulating the message rules:
/// server-assigned ids, existence checks, and content-only updates.
pub struct MessageService<R: MessageRepository + ?Sized> {
    repo: Arc<R>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl<R: MessageRepository + ?Sized> MessageService<R> {
    /// Random v4 ids and wall-clock timestamps.
    pub fn new(repo: Arc<R>) -> Self {
        Self::with_sources(repo, Arc::new(UuidV4Generator), Arc::new(DefaultClock))
    }

    pub fn with_sources(repo: Arc<R>, ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { repo, ids, clock }
    }

    #[instrument(skip_all)]
    pub async fn register(&self, input: NewMessage) -> Result<message::Model, ServiceError> {
        message::validate_author(&input.author)?;
        message::validate_content(&input.content)?;
        let record = message::Model::new(self.ids.next_id(), input.author, input.content, self.clock.utc().fixed_offset());
        let saved = self.repo.save(record).await?;
        info!(id = %saved.id, author = %saved.author, "message registered");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn find(&self, id: Uuid) -> Result<message::Model, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("message"))
    }

    /// Replace the content of message `id`. The body must carry the same id.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: UpdateMessage) -> Result<message::Model, ServiceError> {
        let mut current = self.find(id).await?;
        if input.id != Some(id) {
            warn!(body_id = ?input.id, "update rejected: id mismatch");
            return Err(ServiceError::NotFound(ID_MISMATCH.into()));
        }
        message::validate_content(&input.content)?;
        current.content = input.content;
        let saved = self.repo.save(current).await?;
        info!(id = %saved.id, "message updated");
        Ok(saved)
    }

    /// Delete message `id`; `NotFound` when it does not exist.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: Uuid) -> Result<bool, ServiceError> {
        let existing = self.find(id).await?;
        self.repo.delete_by_id(existing.id).await?;
        info!(id = %existing.id, "message removed");
        Ok(true)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, request: PageRequest) -> Result<Page<message::Model>, ServiceError> {
        self.repo.list_paged(request.normalize()).await
    }

    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<u64, ServiceError> {
        self.repo.count().await
    }
}
