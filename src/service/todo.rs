use super::{RequestContext, RequestValidator};
use crate::error::AppError;
use crate::model::{TodoRequestInput, TodoResponse};
use crate::store::TodoStore;
use std::sync::Arc;

/// Every operation validates first, then runs its storage call inside the request deadline.
#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        TodoService { store }
    }

    /// Insert a task and return the stored row.
    pub async fn create_task(
        &self,
        ctx: &RequestContext,
        input: &TodoRequestInput,
    ) -> Result<TodoResponse, AppError> {
        let task = RequestValidator::validate(input)?;
        let created = ctx.run("create", self.store.create(&task)).await?;
        Ok(created.into())
    }

    /// Tasks matching `ids`, or all tasks when `ids` is empty.
    pub async fn get_tasks(
        &self,
        ctx: &RequestContext,
        ids: &[i64],
    ) -> Result<Vec<TodoResponse>, AppError> {
        let rows = ctx.run("get", self.store.get_by_ids(ids)).await?;
        Ok(rows.into_iter().map(TodoResponse::from).collect())
    }

    /// Best-effort delete; reports success whether or not any id matched.
    pub async fn delete_tasks(
        &self,
        ctx: &RequestContext,
        ids: &[i64],
    ) -> Result<TodoResponse, AppError> {
        let removed = ctx.run("delete", self.store.delete_by_ids(ids)).await?;
        tracing::debug!(requested = ids.len(), removed, "delete finished");
        Ok(TodoResponse::success())
    }

    /// Update by id and echo the input back. Not an upsert: a missing id changes nothing.
    pub async fn update_task(
        &self,
        ctx: &RequestContext,
        input: &TodoRequestInput,
    ) -> Result<TodoResponse, AppError> {
        let task = RequestValidator::validate(input)?;
        ctx.run("update", self.store.update_by_id(&task)).await?;
        Ok(task.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TodoTask;
    use crate::store::{connect_pool, ensure_todo_table, SqliteTodoStore};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use tempfile::TempDir;

    /// Sleeps before answering, and records whether a call ever completed.
    struct SlowStore {
        delay: Duration,
        finished: AtomicBool,
    }

    impl SlowStore {
        fn new(delay: Duration) -> Arc<Self> {
            Arc::new(SlowStore {
                delay,
                finished: AtomicBool::new(false),
            })
        }

        async fn pause(&self) {
            tokio::time::sleep(self.delay).await;
            self.finished.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl TodoStore for SlowStore {
        async fn list_all(&self) -> Result<Vec<TodoTask>, AppError> {
            self.pause().await;
            Ok(Vec::new())
        }

        async fn get_by_ids(&self, _ids: &[i64]) -> Result<Vec<TodoTask>, AppError> {
            self.pause().await;
            Ok(Vec::new())
        }

        async fn create(&self, task: &TodoTask) -> Result<TodoTask, AppError> {
            self.pause().await;
            Ok(task.clone())
        }

        async fn delete_by_ids(&self, _ids: &[i64]) -> Result<u64, AppError> {
            self.pause().await;
            Ok(0)
        }

        async fn update_by_id(&self, _task: &TodoTask) -> Result<u64, AppError> {
            self.pause().await;
            Ok(0)
        }
    }

    async fn sqlite_service() -> (TempDir, TodoService, SqliteTodoStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todo.db");
        let pool = connect_pool(path.to_str().unwrap(), 4).await.unwrap();
        ensure_todo_table(&pool).await.unwrap();
        let store = SqliteTodoStore::new(pool);
        (dir, TodoService::new(Arc::new(store.clone())), store)
    }

    fn input(id: i64, name: &str, completed: bool) -> TodoRequestInput {
        TodoRequestInput {
            id: Some(id),
            name: Some(name.to_string()),
            completed: Some(completed),
        }
    }

    #[tokio::test]
    async fn every_operation_honours_the_deadline() {
        let store = SlowStore::new(Duration::from_secs(5));
        let service = TodoService::new(store.clone());
        let ctx = RequestContext::with_timeout(Duration::from_millis(20));

        let create = service.create_task(&ctx, &input(1, "a", false)).await;
        assert!(matches!(create, Err(AppError::Timeout)));
        let get = service.get_tasks(&ctx, &[]).await;
        assert!(matches!(get, Err(AppError::Timeout)));
        let update = service.update_task(&ctx, &input(1, "a", true)).await;
        assert!(matches!(update, Err(AppError::Timeout)));
        let delete = service.delete_tasks(&ctx, &[1]).await;
        assert!(matches!(delete, Err(AppError::Timeout)));
        assert!(!store.finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn abandoned_call_does_not_keep_running() {
        let store = SlowStore::new(Duration::from_millis(50));
        let service = TodoService::new(store.clone());
        let ctx = RequestContext::with_timeout(Duration::from_millis(5));
        assert!(service.create_task(&ctx, &input(1, "a", false)).await.is_err());
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!store.finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_before_storage() {
        let store = SlowStore::new(Duration::from_secs(5));
        let service = TodoService::new(store.clone());
        let err = service
            .create_task(&RequestContext::background(), &TodoRequestInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn expired_create_leaves_no_row() {
        let (_dir, service, store) = sqlite_service().await;
        let ctx = RequestContext::with_timeout(Duration::ZERO);
        let err = service.create_task(&ctx, &input(9, "late", true)).await.unwrap_err();
        assert!(matches!(err, AppError::Timeout));
        assert!(store.get_by_ids(&[9]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn cancelled_create_is_all_or_nothing() {
        let (_dir, service, store) = sqlite_service().await;
        let ctx = RequestContext::with_timeout(Duration::from_micros(200));
        let result = service.create_task(&ctx, &input(11, "racy", true)).await;
        // Let any queued statements on the connection finish.
        tokio::time::sleep(Duration::from_millis(200)).await;
        let rows = store.get_by_ids(&[11]).await.unwrap();
        match result {
            Ok(resp) => {
                assert_eq!(resp.id, Some(11));
                assert_eq!(rows.len(), 1);
            }
            Err(e) => assert!(matches!(e, AppError::Timeout), "got {e:?}"),
        }
        assert!(rows.len() <= 1);
        if let Some(row) = rows.first() {
            assert_eq!(
                row,
                &TodoTask {
                    id: 11,
                    name: Some("racy".into()),
                    completed: true
                }
            );
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trip() {
        let (_dir, service, _store) = sqlite_service().await;
        let ctx = RequestContext::background();
        service.create_task(&ctx, &input(7, "x", false)).await.unwrap();
        let got = service.get_tasks(&ctx, &[7]).await.unwrap();
        assert_eq!(
            got,
            vec![TodoResponse {
                message: "Success".into(),
                id: Some(7),
                name: Some("x".into()),
                completed: Some(false),
            }]
        );
    }

    #[tokio::test]
    async fn update_missing_id_echoes_input_without_inserting() {
        let (_dir, service, store) = sqlite_service().await;
        let ctx = RequestContext::background();
        let resp = service.update_task(&ctx, &input(3, "ghost", true)).await.unwrap();
        assert_eq!(resp.message, "Success");
        assert_eq!(resp.id, Some(3));
        assert_eq!(resp.name.as_deref(), Some("ghost"));
        assert_eq!(resp.completed, Some(true));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_reports_generic_success() {
        let (_dir, service, store) = sqlite_service().await;
        let ctx = RequestContext::background();
        service.create_task(&ctx, &input(1, "a", false)).await.unwrap();
        let resp = service.delete_tasks(&ctx, &[1, 2]).await.unwrap();
        assert_eq!(resp, TodoResponse::success());
        assert!(store.list_all().await.unwrap().is_empty());
    }
}
