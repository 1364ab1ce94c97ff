use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DbBackend, FromQueryResult, Statement};

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};
use crate::page::{Page, PageRequest, SortDirection, SortField};
use crate::repository::UserRepository;

/// PostgreSQL implementation of UserRepository using SeaORM
#[derive(Clone)]
pub struct PostgresUserRepository {
    db: sea_orm::DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: sea_orm::DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Helper struct for deserializing user rows from the database
#[derive(Debug, FromQueryResult)]
struct UserRow {
    id: i32,
    first_name: String,
    last_name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
        }
    }
}

#[derive(FromQueryResult)]
struct CountRow {
    count: i64,
}

/// ORDER BY clause for a page request. Column names come from this whitelist,
/// never from request input; `id ASC` keeps equal sort keys stable.
fn order_clause(page: &PageRequest) -> String {
    let sort = page.sort();
    let column = match sort.field {
        SortField::Id => "id",
        SortField::FirstName => "first_name",
        SortField::LastName => "last_name",
    };
    let direction = match sort.direction {
        SortDirection::Ascending => "ASC",
        SortDirection::Descending => "DESC",
    };
    format!("{} {}, id ASC", column, direction)
}

fn map_db_err(e: sea_orm::DbErr) -> UserError {
    let err_str = e.to_string();
    if err_str.contains("duplicate key") || err_str.contains("unique constraint") {
        UserError::DuplicateName
    } else {
        UserError::Internal(format!("Database error: {}", e))
    }
}

impl PostgresUserRepository {
    async fn query_page(
        &self,
        select: Statement,
        count: Statement,
    ) -> UserResult<Page<User>> {
        let rows = UserRow::find_by_statement(select)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let total = CountRow::find_by_statement(count)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .map(|r| r.count as u64)
            .unwrap_or(0);

        Ok(Page {
            items: rows.into_iter().map(|r| r.into()).collect(),
            total,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let sql = "SELECT * FROM users WHERE id = $1";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_all(&self, page: &PageRequest) -> UserResult<Page<User>> {
        let sql = format!(
            "SELECT * FROM users ORDER BY {} LIMIT $1 OFFSET $2",
            order_clause(page)
        );

        let select = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [page.limit().into(), page.offset().into()],
        );
        let count = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT COUNT(*) as count FROM users",
            [],
        );

        self.query_page(select, count).await
    }

    async fn find_by_first_name(
        &self,
        first_name: &str,
        page: &PageRequest,
    ) -> UserResult<Page<User>> {
        let sql = format!(
            "SELECT * FROM users WHERE first_name = $1 ORDER BY {} LIMIT $2 OFFSET $3",
            order_clause(page)
        );

        let select = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [first_name.into(), page.limit().into(), page.offset().into()],
        );
        let count = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT COUNT(*) as count FROM users WHERE first_name = $1",
            [first_name.into()],
        );

        self.query_page(select, count).await
    }

    async fn find_by_last_name(
        &self,
        last_name: &str,
        page: &PageRequest,
    ) -> UserResult<Page<User>> {
        let sql = format!(
            "SELECT * FROM users WHERE last_name = $1 ORDER BY {} LIMIT $2 OFFSET $3",
            order_clause(page)
        );

        let select = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [last_name.into(), page.limit().into(), page.offset().into()],
        );
        let count = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT COUNT(*) as count FROM users WHERE last_name = $1",
            [last_name.into()],
        );

        self.query_page(select, count).await
    }

    async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
        page: &PageRequest,
    ) -> UserResult<Page<User>> {
        let sql = format!(
            "SELECT * FROM users WHERE first_name = $1 AND last_name = $2 ORDER BY {} LIMIT $3 OFFSET $4",
            order_clause(page)
        );

        let select = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                first_name.into(),
                last_name.into(),
                page.limit().into(),
                page.offset().into(),
            ],
        );
        let count = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT COUNT(*) as count FROM users WHERE first_name = $1 AND last_name = $2",
            [first_name.into(), last_name.into()],
        );

        self.query_page(select, count).await
    }

    async fn insert(&self, user: NewUser) -> UserResult<User> {
        let sql = r#"
            INSERT INTO users (first_name, last_name)
            VALUES ($1, $2)
            RETURNING *
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [user.first_name.into(), user.last_name.into()],
        );

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| UserError::Internal("Failed to create user".to_string()))?;

        Ok(row.into())
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let sql = r#"
            UPDATE users
            SET first_name = $2, last_name = $3
            WHERE id = $1
            RETURNING *
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                user.id.into(),
                user.first_name.into(),
                user.last_name.into(),
            ],
        );

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        row.map(|r| r.into()).ok_or(UserError::NotFound(user.id))
    }

    async fn delete(&self, user: &User) -> UserResult<()> {
        let sql = "DELETE FROM users WHERE id = $1";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [user.id.into()]);

        let result = self.db.execute_raw(stmt).await.map_err(map_db_err)?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(user.id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Sort;
    use sea_orm::{
        DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr, Transaction, Value,
    };
    use std::collections::BTreeMap;

    fn user_row(id: i32, first: &str, last: &str) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("id", Value::from(id)),
            ("first_name", Value::from(first)),
            ("last_name", Value::from(last)),
        ])
    }

    fn count_row(count: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("count", Value::from(count))])
    }

    fn page(offset: i64, limit: i64) -> PageRequest {
        PageRequest::new(offset, limit, Sort::ascending(SortField::LastName)).unwrap()
    }

    #[tokio::test]
    async fn test_find_by_id_maps_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_row(1, "Philip", "Fry")]])
            .into_connection();
        let repo = PostgresUserRepository::new(db);

        let user = repo.find_by_id(1).await.unwrap();
        assert_eq!(user, Some(User::new(1, "Philip", "Fry")));
    }

    #[tokio::test]
    async fn test_find_by_id_miss_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();
        let repo = PostgresUserRepository::new(db);

        assert_eq!(repo.find_by_id(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_all_returns_items_and_total() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                user_row(4, "Hubert", "Farnsworth"),
                user_row(1, "Philip", "Fry"),
            ]])
            .append_query_results([vec![count_row(5)]])
            .into_connection();
        let repo = PostgresUserRepository::new(db);

        let result = repo.find_all(&page(0, 2)).await.unwrap();

        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].last_name, "Farnsworth");
        assert_eq!(result.total, 5);
    }

    #[tokio::test]
    async fn test_find_by_name_binds_both_names_in_order() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_row(1, "Philip", "Fry")]])
            .append_query_results([vec![count_row(1)]])
            .into_connection();
        let repo = PostgresUserRepository::new(db.clone());

        let result = repo
            .find_by_name("Philip", "Fry", &page(0, 10))
            .await
            .unwrap();

        assert_eq!(result.items, vec![User::new(1, "Philip", "Fry")]);
        assert_eq!(result.total, 1);

        let log = db.into_transaction_log();
        assert_eq!(
            log[0],
            Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                "SELECT * FROM users WHERE first_name = $1 AND last_name = $2 ORDER BY last_name ASC, id ASC LIMIT $3 OFFSET $4",
                ["Philip".into(), "Fry".into(), 10i64.into(), 0i64.into()],
            )
        );
        assert_eq!(
            log[1],
            Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                "SELECT COUNT(*) as count FROM users WHERE first_name = $1 AND last_name = $2",
                ["Philip".into(), "Fry".into()],
            )
        );
    }

    #[tokio::test]
    async fn test_find_by_first_name_filters_and_counts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                user_row(3, "Philip", "Fry"),
                user_row(8, "Philip", "Wong"),
            ]])
            .append_query_results([vec![count_row(2)]])
            .into_connection();
        let repo = PostgresUserRepository::new(db);

        let result = repo.find_by_first_name("Philip", &page(0, 10)).await.unwrap();

        assert_eq!(result.items.len(), 2);
        assert!(result.items.iter().all(|u| u.first_name == "Philip"));
        assert_eq!(result.total, 2);
    }

    #[tokio::test]
    async fn test_find_by_last_name_binds_limit_and_offset() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_row(8, "Amy", "Wong")]])
            .append_query_results([vec![count_row(3)]])
            .into_connection();
        let repo = PostgresUserRepository::new(db.clone());

        let result = repo.find_by_last_name("Wong", &page(2, 1)).await.unwrap();

        assert_eq!(result.items, vec![User::new(8, "Amy", "Wong")]);
        assert_eq!(result.total, 3);

        let log = db.into_transaction_log();
        assert_eq!(
            log[0],
            Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                "SELECT * FROM users WHERE last_name = $1 ORDER BY last_name ASC, id ASC LIMIT $2 OFFSET $3",
                ["Wong".into(), 1i64.into(), 2i64.into()],
            )
        );
    }

    #[tokio::test]
    async fn test_insert_duplicate_key_maps_to_duplicate_name() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Query(RuntimeErr::Internal(
                "duplicate key value violates unique constraint \"uq_users_first_name_last_name\""
                    .to_string(),
            ))])
            .into_connection();
        let repo = PostgresUserRepository::new(db);

        let result = repo.insert(NewUser::new("Lrrr", "RulerOfThePlanet")).await;
        assert_eq!(result, Err(UserError::DuplicateName));
    }

    #[tokio::test]
    async fn test_update_missing_row_maps_to_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();
        let repo = PostgresUserRepository::new(db);

        let result = repo.update(User::new(99, "Nobody", "Here")).await;
        assert_eq!(result, Err(UserError::NotFound(99)));
    }

    #[tokio::test]
    async fn test_delete_zero_rows_maps_to_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = PostgresUserRepository::new(db);

        let result = repo.delete(&User::new(99, "Nobody", "Here")).await;
        assert_eq!(result, Err(UserError::NotFound(99)));
    }

    #[test]
    fn test_order_clause_is_whitelisted() {
        assert_eq!(order_clause(&page(0, 10)), "last_name ASC, id ASC");

        let by_first = PageRequest::new(0, 10, Sort::descending(SortField::FirstName)).unwrap();
        assert_eq!(order_clause(&by_first), "first_name DESC, id ASC");
    }
}
