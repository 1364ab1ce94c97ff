use std::sync::Arc;

use tracing::instrument;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User, UserPatch};
use crate::page::{PageRequest, Sort, SortField};
use crate::repository::UserRepository;

/// Business logic for the users domain. Generic over the repository so the
/// same service runs against Postgres in production and the in-memory store
/// in tests.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: i32) -> UserResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Page through all users, sorted by last name. Equal last names keep
    /// insertion order.
    #[instrument(skip(self))]
    pub async fn get_user_list(&self, offset: i64, limit: i64) -> UserResult<Vec<User>> {
        let page = PageRequest::new(offset, limit, Sort::ascending(SortField::LastName))?;
        let result = self.repository.find_all(&page).await?;
        Ok(result.items)
    }

    #[instrument(skip(self))]
    pub async fn add_user(&self, new_user: NewUser) -> UserResult<User> {
        new_user
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;
        self.repository.insert(new_user).await
    }

    /// Full replacement: both names are overwritten with the request values.
    #[instrument(skip(self))]
    pub async fn replace_user(&self, id: i32, new_user: NewUser) -> UserResult<User> {
        new_user
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;
        let mut user = self.get_user(id).await?;
        user.replace_with(new_user);
        self.repository.update(user).await
    }

    /// Partial update: only fields present in the patch are changed.
    #[instrument(skip(self))]
    pub async fn update_user(&self, id: i32, patch: UserPatch) -> UserResult<User> {
        let mut user = self.get_user(id).await?;
        user.apply_patch(patch);
        self.repository.update(user).await
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: i32) -> UserResult<()> {
        let user = self.get_user(id).await?;
        self.repository.delete(&user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryUserRepository;

    fn service() -> UserService<InMemoryUserRepository> {
        UserService::new(Arc::new(InMemoryUserRepository::new()))
    }

    async fn seeded() -> UserService<InMemoryUserRepository> {
        let svc = service();
        svc.add_user(NewUser::new("Philip", "Fry")).await.unwrap();
        svc.add_user(NewUser::new("Turanga", "Leela")).await.unwrap();
        svc.add_user(NewUser::new("Bender", "Rodriguez")).await.unwrap();
        svc
    }

    #[tokio::test]
    async fn test_add_then_get() {
        let svc = service();

        let created = svc.add_user(NewUser::new("Philip", "Fry")).await.unwrap();
        assert_eq!(created.id, 1);

        let fetched = svc.get_user(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_missing_user_is_not_found() {
        let svc = service();
        assert_eq!(svc.get_user(7).await, Err(UserError::NotFound(7)));
    }

    #[tokio::test]
    async fn test_add_duplicate_name_is_rejected() {
        let svc = service();
        svc.add_user(NewUser::new("Lrrr", "RulerOfThePlanet"))
            .await
            .unwrap();

        let result = svc.add_user(NewUser::new("Lrrr", "RulerOfThePlanet")).await;
        assert_eq!(result, Err(UserError::DuplicateName));
    }

    #[tokio::test]
    async fn test_add_empty_first_name_fails_validation() {
        let svc = service();
        let result = svc.add_user(NewUser::new("", "Fry")).await;
        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_sorted_by_last_name() {
        let svc = seeded().await;

        let users = svc.get_user_list(0, 10).await.unwrap();
        let last_names: Vec<&str> = users.iter().map(|u| u.last_name.as_str()).collect();
        assert_eq!(last_names, vec!["Fry", "Leela", "Rodriguez"]);
    }

    #[tokio::test]
    async fn test_list_respects_offset_and_limit() {
        let svc = seeded().await;

        let users = svc.get_user_list(1, 1).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].last_name, "Leela");
    }

    #[tokio::test]
    async fn test_list_negative_offset_rejected() {
        let svc = seeded().await;
        assert!(matches!(
            svc.get_user_list(-1, 10).await,
            Err(UserError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_replace_overwrites_both_names() {
        let svc = seeded().await;

        let updated = svc
            .replace_user(1, NewUser::new("Lars", "Fillmore"))
            .await
            .unwrap();
        assert_eq!(updated, User::new(1, "Lars", "Fillmore"));
    }

    #[tokio::test]
    async fn test_patch_merges_only_present_fields() {
        let svc = service();
        svc.add_user(NewUser::new("123", "abc")).await.unwrap();

        let patch = UserPatch {
            first_name: Some("Aname".to_string()),
            last_name: None,
        };
        let updated = svc.update_user(1, patch).await.unwrap();
        assert_eq!(updated, User::new(1, "Aname", "abc"));
    }

    #[tokio::test]
    async fn test_patch_missing_user_is_not_found() {
        let svc = service();
        let patch = UserPatch {
            first_name: Some("Nobody".to_string()),
            last_name: None,
        };
        assert_eq!(svc.update_user(9, patch).await, Err(UserError::NotFound(9)));
    }

    #[tokio::test]
    async fn test_update_to_existing_name_is_rejected() {
        let svc = seeded().await;

        let result = svc.replace_user(2, NewUser::new("Philip", "Fry")).await;
        assert_eq!(result, Err(UserError::DuplicateName));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let svc = seeded().await;

        svc.delete_user(2).await.unwrap();
        assert_eq!(svc.get_user(2).await, Err(UserError::NotFound(2)));
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_not_found() {
        let svc = service();
        assert_eq!(svc.delete_user(3).await, Err(UserError::NotFound(3)));
    }
}
