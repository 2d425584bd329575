use crate::db::{DbPool, OrmConn};
use crate::notify::Notifier;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub notifier: Notifier,
}
