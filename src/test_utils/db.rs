use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    PasswordHash,
    db::initialize,
    user::{Email, UserID, create_user},
};

/// An initialized in-memory database shared the same way the app shares it.
pub(crate) fn get_test_connection() -> Arc<Mutex<Connection>> {
    let connection = Connection::open_in_memory().expect("Could not open database in memory");
    initialize(&connection).expect("Could not initialize database");

    Arc::new(Mutex::new(connection))
}

#[track_caller]
pub(crate) fn insert_test_user(connection: &Arc<Mutex<Connection>>, email: &str) -> UserID {
    let connection = connection.lock().unwrap();

    create_user(
        "Test User",
        Email::new_unchecked(email),
        PasswordHash::new_unchecked("hunter2"),
        &connection,
    )
    .expect("Could not create test user")
    .id
}
