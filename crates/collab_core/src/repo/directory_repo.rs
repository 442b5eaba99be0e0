//! Users and projects: the read-mostly directory the notification flows join
//! against.

use crate::model::project::{Project, ProjectId};
use crate::model::user::{Credential, User, UserId};
use crate::repo::error::PersistenceResult;
use crate::repo::{ensure_schema_ready, uuid_column};
use rusqlite::{params, Connection, Row};

const USER_SELECT_SQL: &str = "SELECT
    uuid,
    username,
    email,
    first_name,
    last_name,
    password
FROM users";

pub trait DirectoryRepository {
    fn create_user(&self, user: &User) -> PersistenceResult<UserId>;
    fn get_user(&self, id: UserId) -> PersistenceResult<Option<User>>;
    fn find_user_by_username(&self, username: &str) -> PersistenceResult<Option<User>>;
    /// All users ordered by username.
    fn list_users(&self) -> PersistenceResult<Vec<User>>;
    fn create_project(&self, project: &Project) -> PersistenceResult<ProjectId>;
    fn get_project(&self, id: ProjectId) -> PersistenceResult<Option<Project>>;
}

pub struct SqliteDirectoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDirectoryRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> PersistenceResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }

    fn query_users(&self, filter: &str, param: Option<String>) -> PersistenceResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} {filter} ORDER BY username ASC;"))?;
        let mut rows = match param {
            Some(value) => stmt.query([value])?,
            None => stmt.query([])?,
        };
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }
        Ok(users)
    }
}

impl DirectoryRepository for SqliteDirectoryRepository<'_> {
    fn create_user(&self, user: &User) -> PersistenceResult<UserId> {
        user.validate()?;

        self.conn.execute(
            "INSERT INTO users (uuid, username, email, first_name, last_name, password)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                user.id.to_string(),
                user.username.trim(),
                user.email.trim(),
                user.first_name.as_str(),
                user.last_name.as_str(),
                user.password.expose(),
            ],
        )?;

        Ok(user.id)
    }

    fn get_user(&self, id: UserId) -> PersistenceResult<Option<User>> {
        Ok(self
            .query_users("WHERE uuid = ?1", Some(id.to_string()))?
            .into_iter()
            .next())
    }

    fn find_user_by_username(&self, username: &str) -> PersistenceResult<Option<User>> {
        Ok(self
            .query_users("WHERE username = ?1", Some(username.trim().to_string()))?
            .into_iter()
            .next())
    }

    fn list_users(&self) -> PersistenceResult<Vec<User>> {
        self.query_users("", None)
    }

    fn create_project(&self, project: &Project) -> PersistenceResult<ProjectId> {
        project.validate()?;

        self.conn.execute(
            "INSERT INTO projects (uuid, title, author_uuid) VALUES (?1, ?2, ?3);",
            params![
                project.id.to_string(),
                project.title.as_str(),
                project.author_id.to_string(),
            ],
        )?;

        Ok(project.id)
    }

    fn get_project(&self, id: ProjectId) -> PersistenceResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare("SELECT uuid, title, author_uuid FROM projects WHERE uuid = ?1;")?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            let project = Project {
                id: uuid_column(row, "uuid")?,
                title: row.get("title")?,
                author_id: uuid_column(row, "author_uuid")?,
            };
            project.validate()?;
            return Ok(Some(project));
        }
        Ok(None)
    }
}

fn parse_user_row(row: &Row<'_>) -> PersistenceResult<User> {
    let user = User {
        id: uuid_column(row, "uuid")?,
        username: row.get("username")?,
        email: row.get("email")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        password: Credential::new(row.get::<_, String>("password")?),
    };
    user.validate()?;
    Ok(user)
}
