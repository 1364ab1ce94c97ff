use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};
use crate::page::{Page, PageRequest, SortDirection, SortField};

/// Repository trait for User persistence.
///
/// All paged reads honor the request's sort key and direction with a stable
/// `id` ascending tie-break, so pages do not drift between requests.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look up a user by id; a miss is not an error.
    async fn find_by_id(&self, id: i32) -> UserResult<Option<User>>;

    /// One page of all users, plus the total count.
    async fn find_all(&self, page: &PageRequest) -> UserResult<Page<User>>;

    /// One page of users matching the first name exactly.
    async fn find_by_first_name(&self, first_name: &str, page: &PageRequest)
        -> UserResult<Page<User>>;

    /// One page of users matching the last name exactly.
    async fn find_by_last_name(&self, last_name: &str, page: &PageRequest)
        -> UserResult<Page<User>>;

    /// One page of users matching both names exactly.
    async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
        page: &PageRequest,
    ) -> UserResult<Page<User>>;

    /// Insert a new user; the store assigns the id.
    ///
    /// Fails with [`UserError::DuplicateName`] when the name pair collides
    /// with an existing row.
    async fn insert(&self, user: NewUser) -> UserResult<User>;

    /// Update the row matching `user.id`.
    ///
    /// Fails with [`UserError::NotFound`] when the row is gone and
    /// [`UserError::DuplicateName`] when the new name pair collides with a
    /// different row.
    async fn update(&self, user: User) -> UserResult<User>;

    /// Remove the row matching `user.id`. Callers verify existence first.
    async fn delete(&self, user: &User) -> UserResult<()>;
}

/// Sort comparator shared by the in-memory paged reads.
fn compare(a: &User, b: &User, page: &PageRequest) -> Ordering {
    let sort = page.sort();
    let key = match sort.field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::FirstName => a.first_name.cmp(&b.first_name),
        SortField::LastName => a.last_name.cmp(&b.last_name),
    };
    let key = match sort.direction {
        SortDirection::Ascending => key,
        SortDirection::Descending => key.reverse(),
    };
    // Stable tie-break by primary key so pagination never drifts
    key.then(a.id.cmp(&b.id))
}

#[derive(Debug, Default)]
struct InMemoryState {
    next_id: i32,
    users: BTreeMap<i32, User>,
}

/// In-memory implementation of UserRepository (for tests and DB-less runs).
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn paged(users: Vec<User>, page: &PageRequest) -> Page<User> {
        let total = users.len() as u64;
        let mut users = users;
        users.sort_by(|a, b| compare(a, b, page));

        let items = users
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Page { items, total }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_all(&self, page: &PageRequest) -> UserResult<Page<User>> {
        let state = self.state.read().await;
        Ok(Self::paged(state.users.values().cloned().collect(), page))
    }

    async fn find_by_first_name(
        &self,
        first_name: &str,
        page: &PageRequest,
    ) -> UserResult<Page<User>> {
        let state = self.state.read().await;
        let matching = state
            .users
            .values()
            .filter(|u| u.first_name == first_name)
            .cloned()
            .collect();
        Ok(Self::paged(matching, page))
    }

    async fn find_by_last_name(
        &self,
        last_name: &str,
        page: &PageRequest,
    ) -> UserResult<Page<User>> {
        let state = self.state.read().await;
        let matching = state
            .users
            .values()
            .filter(|u| u.last_name == last_name)
            .cloned()
            .collect();
        Ok(Self::paged(matching, page))
    }

    async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
        page: &PageRequest,
    ) -> UserResult<Page<User>> {
        let state = self.state.read().await;
        let matching = state
            .users
            .values()
            .filter(|u| u.first_name == first_name && u.last_name == last_name)
            .cloned()
            .collect();
        Ok(Self::paged(matching, page))
    }

    async fn insert(&self, user: NewUser) -> UserResult<User> {
        let mut state = self.state.write().await;

        let name_exists = state
            .users
            .values()
            .any(|u| u.first_name == user.first_name && u.last_name == user.last_name);
        if name_exists {
            return Err(UserError::DuplicateName);
        }

        state.next_id += 1;
        let user = User {
            id: state.next_id,
            first_name: user.first_name,
            last_name: user.last_name,
        };
        state.users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let mut state = self.state.write().await;

        if !state.users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id));
        }

        let name_exists = state.users.values().any(|u| {
            u.id != user.id && u.first_name == user.first_name && u.last_name == user.last_name
        });
        if name_exists {
            return Err(UserError::DuplicateName);
        }

        state.users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, "Updated user");
        Ok(user)
    }

    async fn delete(&self, user: &User) -> UserResult<()> {
        let mut state = self.state.write().await;

        if state.users.remove(&user.id).is_none() {
            return Err(UserError::NotFound(user.id));
        }

        tracing::info!(user_id = user.id, "Deleted user");
        Ok(())
    }
}
