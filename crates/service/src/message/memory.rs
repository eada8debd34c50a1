use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use models::message;

use crate::errors::ServiceError;
use crate::message::repository::MessageRepository;
use crate::pagination::{Page, PageRequest};

/// Process-local message store with the same ordering and paging rules as
/// the database adapter. Contents are lost on restart.
#[derive(Clone, Default)]
pub struct InMemoryMessageRepository {
    inner: Arc<RwLock<HashMap<Uuid, message::Model>>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn save(&self, msg: message::Model) -> Result<message::Model, ServiceError> {
        let mut map = self.inner.write().await;
        map.insert(msg.id, msg.clone());
        Ok(msg)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<message::Model>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.get(&id).cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        map.remove(&id);
        Ok(())
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.len() as u64)
    }

    async fn list_paged(&self, request: PageRequest) -> Result<Page<message::Model>, ServiceError> {
        let map = self.inner.read().await;
        let mut all: Vec<&message::Model> = map.values().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(request.size).unwrap_or(usize::MAX);
        let content = all.into_iter().skip(skip).take(take).cloned().collect();
        Ok(Page::new(content, request, map.len() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn msg(n: u128, minutes: i64) -> message::Model {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes);
        message::Model::new(Uuid::from_u128(n), "Ana", format!("m{n}"), at.fixed_offset())
    }

    #[tokio::test]
    async fn save_replaces_by_id() {
        let repo = InMemoryMessageRepository::new();
        repo.save(msg(1, 0)).await.unwrap();
        let mut m = msg(1, 0);
        m.content = "changed".into();
        repo.save(m).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(repo.find_by_id(Uuid::from_u128(1)).await.unwrap().unwrap().content, "changed");
    }

    #[tokio::test]
    async fn delete_missing_is_ok() {
        let repo = InMemoryMessageRepository::new();
        assert!(repo.delete_by_id(Uuid::from_u128(9)).await.is_ok());
        assert!(repo.find_by_id(Uuid::from_u128(9)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn pages_follow_creation_order() {
        let repo = InMemoryMessageRepository::new();
        // inserted out of order on purpose
        for (n, minute) in [(3, 30), (1, 10), (5, 50), (2, 20), (4, 40)] {
            repo.save(msg(n, minute)).await.unwrap();
        }
        let first = repo.list_paged(PageRequest::of(0, 2)).await.unwrap();
        let ids: Vec<u128> = first.content.iter().map(|m| m.id.as_u128()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(first.total_elements, 5);
        assert_eq!(first.total_pages, 3);

        let last = repo.list_paged(PageRequest::of(2, 2)).await.unwrap();
        assert_eq!(last.content.len(), 1);
        assert_eq!(last.content[0].id.as_u128(), 5);
        assert!(last.last);

        let beyond = repo.list_paged(PageRequest::of(7, 2)).await.unwrap();
        assert!(beyond.empty);
        assert_eq!(beyond.total_elements, 5);
    }
}
