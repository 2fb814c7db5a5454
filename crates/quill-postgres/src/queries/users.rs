use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::QueryResult;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use quill_model::id::UserId;
use quill_model::schema::users;
use quill_model::user::{InsertUser, UpdateUser, User};

use super::util::lower;

pub trait UserPgImpl: Sized {
    async fn find(conn: &mut AsyncPgConnection, id: UserId) -> QueryResult<Option<Self>>;

    async fn find_many(conn: &mut AsyncPgConnection, ids: &[UserId]) -> QueryResult<Vec<Self>>;

    async fn find_by_email(
        conn: &mut AsyncPgConnection,
        email: &str,
    ) -> QueryResult<Option<Self>>;

    async fn check_email_taken(conn: &mut AsyncPgConnection, email: &str)
        -> QueryResult<bool>;

    async fn update(
        conn: &mut AsyncPgConnection,
        id: UserId,
        form: &UpdateUser<'_>,
    ) -> QueryResult<Self>;
}

impl UserPgImpl for User {
    #[tracing::instrument(skip_all, name = "db.query.users.find")]
    async fn find(conn: &mut AsyncPgConnection, id: UserId) -> QueryResult<Option<Self>> {
        users::table
            .find(id)
            .select(User::as_select())
            .get_result(conn)
            .await
            .optional()
    }

    #[tracing::instrument(skip_all, name = "db.query.users.find_many")]
    async fn find_many(conn: &mut AsyncPgConnection, ids: &[UserId]) -> QueryResult<Vec<Self>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        users::table
            .filter(users::id.eq_any(ids.iter().copied()))
            .select(User::as_select())
            .load(conn)
            .await
    }

    #[tracing::instrument(skip_all, name = "db.query.users.find_by_email")]
    async fn find_by_email(
        conn: &mut AsyncPgConnection,
        email: &str,
    ) -> QueryResult<Option<Self>> {
        users::table
            .filter(lower(users::email).eq(email.to_lowercase()))
            .select(User::as_select())
            .get_result(conn)
            .await
            .optional()
    }

    #[tracing::instrument(skip_all, name = "db.query.users.is_email_taken")]
    async fn check_email_taken(
        conn: &mut AsyncPgConnection,
        email: &str,
    ) -> QueryResult<bool> {
        diesel::select(exists(
            users::table.filter(lower(users::email).eq(email.to_lowercase())),
        ))
        .get_result(conn)
        .await
    }

    #[tracing::instrument(skip_all, name = "db.query.users.update")]
    async fn update(
        conn: &mut AsyncPgConnection,
        id: UserId,
        form: &UpdateUser<'_>,
    ) -> QueryResult<Self> {
        diesel::update(users::table.find(id))
            .set(form)
            .returning(User::as_returning())
            .get_result(conn)
            .await
    }
}

pub trait InsertUserPgImpl {
    async fn create(&self, conn: &mut AsyncPgConnection) -> QueryResult<User>;
}

impl InsertUserPgImpl for InsertUser<'_> {
    #[tracing::instrument(skip_all, name = "db.query.users.insert")]
    async fn create(&self, conn: &mut AsyncPgConnection) -> QueryResult<User> {
        // empty last names are stored as NULL
        let last_name = self
            .last_name
            .filter(|last_name| !last_name.is_empty());

        diesel::insert_into(users::table)
            .values((
                users::email.eq(self.email),
                users::first_name.eq(self.first_name),
                users::last_name.eq(last_name),
                users::birthday.eq(self.birthday),
                users::password_hash.eq(self.password_hash),
            ))
            .returning(User::as_returning())
            .get_result(conn)
            .await
    }
}
