use sqlx::SqlitePool;

/// Shared application state for REST handlers.
///
/// The pool is the only cross-request resource; every query checks a
/// connection out for its own duration and returns it on drop, so no
/// handler holds a connection across await points it does not need.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}
