// Account registration and login against a real on-disk store.

use tempfile::TempDir;

use signbridge::accounts::{Accounts, Registration};
use signbridge::db::Database;
use signbridge::models::Gender;

fn test_accounts() -> (TempDir, Accounts) {
    let dir = TempDir::new().expect("temp dir");
    let db = Database::new(dir.path().join("accounts-test.sqlite3")).expect("open database");
    (dir, Accounts::new(db))
}

#[tokio::test]
async fn test_register_then_login() {
    let (_dir, accounts) = test_accounts();

    let outcome = accounts
        .register("alice", "hunter2", Gender::Female)
        .await
        .expect("register");
    let Registration::Created(user_id) = outcome else {
        panic!("fresh username should register");
    };

    let profile = accounts
        .login("alice", "hunter2")
        .await
        .expect("login")
        .expect("credentials should match");
    assert_eq!(profile.user_id, user_id);
    assert_eq!(profile.username, "alice");
    assert_eq!(profile.gender, Gender::Female);
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let (_dir, accounts) = test_accounts();

    accounts
        .register("bob", "pw1", Gender::Male)
        .await
        .expect("first register");
    let outcome = accounts
        .register("bob", "pw2", Gender::Male)
        .await
        .expect("second register call itself succeeds");
    assert_eq!(outcome, Registration::UsernameTaken);
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_fail_the_same_way() {
    let (_dir, accounts) = test_accounts();

    accounts
        .register("carol", "correct", Gender::Female)
        .await
        .expect("register");

    assert!(accounts
        .login("carol", "incorrect")
        .await
        .expect("login call")
        .is_none());
    assert!(accounts
        .login("nobody", "whatever")
        .await
        .expect("login call")
        .is_none());
}

#[tokio::test]
async fn test_password_hashes_are_salted() {
    let dir = TempDir::new().expect("temp dir");
    let db = Database::new(dir.path().join("accounts-test.sqlite3")).expect("open database");
    let accounts = Accounts::new(db.clone());

    // Same password twice; the per-user salt must produce different stored
    // hashes, and login still verifies both.
    accounts
        .register("dave", "shared-password", Gender::Male)
        .await
        .expect("register dave");
    accounts
        .register("erin", "shared-password", Gender::Female)
        .await
        .expect("register erin");

    let dave = db
        .find_user_by_username("dave")
        .await
        .expect("fetch dave")
        .expect("dave exists");
    let erin = db
        .find_user_by_username("erin")
        .await
        .expect("fetch erin")
        .expect("erin exists");
    assert_ne!(dave.password_hash, erin.password_hash);

    assert!(accounts
        .login("dave", "shared-password")
        .await
        .expect("login")
        .is_some());
    assert!(accounts
        .login("erin", "shared-password")
        .await
        .expect("login")
        .is_some());
}
