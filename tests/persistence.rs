//! Options survive reopening the database and re-running migrations

use note_options::config::{open_memory_store, open_store};
use note_options::config::options::{
    BuiltinKeyboardActions, OptionsError, StartupOverrides, bootstrap_new_instance,
    init_startup_options,
};

#[tokio::test]
async fn test_options_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("options.db");

    let store = open_store(&db_path).await.unwrap();
    bootstrap_new_instance(&store, &BuiltinKeyboardActions).await.unwrap();
    store.set_option("theme", "light").await.unwrap();
    store.set_option("leftPaneWidth", 33).await.unwrap();
    let before = store.get_option_map().await.unwrap();
    store.pool().close().await;

    let store = open_store(&db_path).await.unwrap();
    let report = init_startup_options(&store, &BuiltinKeyboardActions, &StartupOverrides::default())
        .await
        .unwrap();
    let after = store.get_option_map().await.unwrap();

    assert!(report.created.is_empty());
    assert_eq!(before, after);
    assert_eq!(store.get_option("theme").await.unwrap(), "light");
    assert_eq!(store.get_option_int("leftPaneWidth", None).await.unwrap(), 33);
    assert!(store.is_initialized().await.unwrap());
}

/// A default added in a later release is filled in without touching the rest
#[tokio::test]
async fn test_upgrade_fills_only_gaps() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("options.db");

    let store = open_store(&db_path).await.unwrap();
    bootstrap_new_instance(&store, &BuiltinKeyboardActions).await.unwrap();
    sqlx::query("DELETE FROM options WHERE name = 'minTocHeadings'")
        .execute(store.pool())
        .await
        .unwrap();
    store.set_option("locale", "de").await.unwrap();
    store.pool().close().await;

    let store = open_store(&db_path).await.unwrap();
    let report = init_startup_options(&store, &BuiltinKeyboardActions, &StartupOverrides::default())
        .await
        .unwrap();

    assert_eq!(report.created, vec!["minTocHeadings".to_string()]);
    assert_eq!(store.get_option("minTocHeadings").await.unwrap(), "5");
    assert_eq!(store.get_option("locale").await.unwrap(), "de");
}

/// Storage failures surface to the caller instead of being swallowed
#[tokio::test]
async fn test_storage_failure_is_fatal_to_startup() {
    let store = open_memory_store().await.unwrap();
    store.pool().close().await;

    let err = init_startup_options(&store, &BuiltinKeyboardActions, &StartupOverrides::default())
        .await
        .unwrap_err();
    assert!(matches!(err, OptionsError::Persistence(_)), "{err:?}");

    let err = store.set_option("theme", "light").await.unwrap_err();
    assert!(matches!(err, OptionsError::Persistence(_)), "{err:?}");

    let err = store.get_option_or_null("theme").await.unwrap_err();
    assert!(matches!(err, OptionsError::Persistence(_)), "{err:?}");
}
