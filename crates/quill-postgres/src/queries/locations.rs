use diesel::prelude::*;
use diesel::QueryResult;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use quill_model::id::LocationId;
use quill_model::schema::locations;
use quill_model::Location;

pub trait LocationPgImpl: Sized {
    async fn find(conn: &mut AsyncPgConnection, id: LocationId)
        -> QueryResult<Option<Self>>;
}

impl LocationPgImpl for Location {
    #[tracing::instrument(skip_all, name = "db.query.locations.find")]
    async fn find(
        conn: &mut AsyncPgConnection,
        id: LocationId,
    ) -> QueryResult<Option<Self>> {
        locations::table
            .find(id)
            .select(Location::as_select())
            .get_result(conn)
            .await
            .optional()
    }
}
