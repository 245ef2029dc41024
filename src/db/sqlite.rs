use crate::db::dataset::Dataset;
use crate::db::models::DbUser;
use crate::db::schema::SQLITE_INIT;
use crate::error::VitiError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, QueryBuilder, Sqlite, SqliteConnection};
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

/// Rows per multi-value INSERT; keeps bound parameters well below SQLite's limit.
const INSERT_BATCH_ROWS: usize = 150;

#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `database_url` and apply the schema.
    pub async fn connect(database_url: &str) -> Result<Self, VitiError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), VitiError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn get<D: Dataset>(&self, id: i64) -> Result<D, VitiError> {
        let mut qb = QueryBuilder::<Sqlite>::new(select_all::<D>());
        qb.push(" WHERE id = ").push_bind(id);
        qb.build_query_as::<D>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or(VitiError::NotFound)
    }

    pub async fn list<D: Dataset>(&self) -> Result<Vec<D>, VitiError> {
        let mut qb = QueryBuilder::<Sqlite>::new(select_all::<D>());
        qb.push(" ORDER BY id");
        Ok(qb.build_query_as::<D>().fetch_all(&self.pool).await?)
    }

    /// Equality match on every field present in `fields`, combined with AND.
    pub async fn filter<D: Dataset>(&self, fields: &D::Fields) -> Result<Vec<D>, VitiError> {
        let mut qb = QueryBuilder::<Sqlite>::new(select_all::<D>());
        qb.push(" WHERE 1 = 1");
        if let Some(id) = D::id_of(fields) {
            qb.push(" AND id = ").push_bind(id);
        }
        for (column, value) in D::COLUMNS.iter().zip(D::bindings(fields)) {
            if value.is_null() {
                continue;
            }
            qb.push(" AND ").push(*column).push(" = ");
            value.push_bind(&mut qb);
        }
        qb.push(" ORDER BY id");
        Ok(qb.build_query_as::<D>().fetch_all(&self.pool).await?)
    }

    /// Insert one row; the `id` in `fields` is ignored. Returns the new id.
    pub async fn insert<D: Dataset>(&self, fields: &D::Fields) -> Result<i64, VitiError> {
        let mut qb = QueryBuilder::<Sqlite>::new("INSERT INTO ");
        qb.push(D::TABLE)
            .push(" (")
            .push(D::COLUMNS.join(", "))
            .push(") VALUES (");
        for (i, value) in D::bindings(fields).into_iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            value.push_bind(&mut qb);
        }
        qb.push(")");
        let result = qb.build().execute(&self.pool).await?;
        Ok(result.last_insert_rowid())
    }

    /// Replace every column of row `id`; absent fields become NULL.
    pub async fn update<D: Dataset>(&self, id: i64, fields: &D::Fields) -> Result<(), VitiError> {
        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE ");
        qb.push(D::TABLE).push(" SET ");
        for (i, (column, value)) in D::COLUMNS.iter().zip(D::bindings(fields)).enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(*column).push(" = ");
            value.push_bind(&mut qb);
        }
        qb.push(" WHERE id = ").push_bind(id);
        let result = qb.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(VitiError::NotFound);
        }
        Ok(())
    }

    pub async fn delete<D: Dataset>(&self, id: i64) -> Result<(), VitiError> {
        let mut qb = QueryBuilder::<Sqlite>::new("DELETE FROM ");
        qb.push(D::TABLE).push(" WHERE id = ").push_bind(id);
        let result = qb.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(VitiError::NotFound);
        }
        Ok(())
    }

    /// Truncate `D`'s table, restart its id sequence and insert `rows` in order.
    /// Runs on the caller's connection so a refresh can wrap every table in
    /// one transaction.
    pub async fn replace_all<D: Dataset>(
        conn: &mut SqliteConnection,
        rows: &[D::Fields],
    ) -> Result<u64, VitiError> {
        sqlx::query(&format!("DELETE FROM {}", D::TABLE))
            .execute(&mut *conn)
            .await?;
        sqlx::query("DELETE FROM sqlite_sequence WHERE name = ?")
            .bind(D::TABLE)
            .execute(&mut *conn)
            .await?;

        let mut inserted = 0;
        for chunk in rows.chunks(INSERT_BATCH_ROWS) {
            let mut qb = QueryBuilder::<Sqlite>::new("INSERT INTO ");
            qb.push(D::TABLE)
                .push(" (")
                .push(D::COLUMNS.join(", "))
                .push(") ");
            qb.push_values(chunk, |mut sep, row| {
                for value in D::bindings(row) {
                    value.push_bind_separated(&mut sep);
                }
            });
            inserted += qb.build().execute(&mut *conn).await?.rows_affected();
        }
        Ok(inserted)
    }

    pub async fn create_user(&self, username: &str, hashed_password: &str) -> Result<i64, VitiError> {
        let result = sqlx::query("INSERT INTO users (username, hashed_password) VALUES (?, ?)")
            .bind(username)
            .bind(hashed_password)
            .execute(&self.pool)
            .await
            .map_err(map_unique_violation)?;
        Ok(result.last_insert_rowid())
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<DbUser>, VitiError> {
        let user = sqlx::query_as::<_, DbUser>(
            "SELECT id, username, hashed_password FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> Result<DbUser, VitiError> {
        sqlx::query_as::<_, DbUser>("SELECT id, username, hashed_password FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(VitiError::NotFound)
    }

    pub async fn update_user(
        &self,
        id: i64,
        username: &str,
        hashed_password: &str,
    ) -> Result<(), VitiError> {
        let result = sqlx::query("UPDATE users SET username = ?, hashed_password = ? WHERE id = ?")
            .bind(username)
            .bind(hashed_password)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_unique_violation)?;
        if result.rows_affected() == 0 {
            return Err(VitiError::NotFound);
        }
        Ok(())
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), VitiError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(VitiError::NotFound);
        }
        Ok(())
    }
}

fn select_all<D: Dataset>() -> String {
    format!("SELECT id, {} FROM {}", D::COLUMNS.join(", "), D::TABLE)
}

fn map_unique_violation(err: sqlx::Error) -> VitiError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => VitiError::UsernameTaken,
        _ => VitiError::DatabaseError(err),
    }
}
