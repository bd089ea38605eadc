//! PostgreSQL store tests.
//!
//! These need a reachable server in `DATABASE_URL`; run them with
//! `cargo test -- --ignored`.

#![allow(clippy::panic)]

use chrono::{TimeZone, Utc};
use sqlx::PgPool;

use toolchangelog::domain::{ChangelogEntry, EntryId, Tool, ToolId};
use toolchangelog::persistence::{
    ChangelogRepository, PostgresStore, RepositoryError, ToolRepository,
};

fn tool(name: &str) -> Tool {
    Tool {
        id: ToolId::new(),
        name_kurz: name.to_string(),
        name_lang: format!("{name} long"),
    }
}

fn entry(tool_id: ToolId, version: &str, year: i32) -> ChangelogEntry {
    let Some(datum) = Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single() else {
        panic!("invalid date");
    };
    ChangelogEntry {
        id: EntryId::new(),
        tool_id,
        datum,
        version: version.to_string(),
        beschreibung: "notes".to_string(),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn entries_of_a_tool_come_back_newest_first(pool: PgPool) {
    let store = PostgresStore::new(pool);
    let git = tool("git");
    let Ok(()) = ToolRepository::insert(&store, &git).await else {
        panic!("insert tool failed");
    };
    for (version, year) in [("a", 2021), ("c", 2023), ("b", 2022)] {
        let Ok(()) = ChangelogRepository::insert(&store, &entry(git.id, version, year)).await
        else {
            panic!("insert entry failed");
        };
    }

    let Ok(listed) = store.list_by_tool(git.id).await else {
        panic!("list failed");
    };
    let versions: Vec<&str> = listed.iter().map(|e| e.version.as_str()).collect();
    assert_eq!(versions, vec!["c", "b", "a"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn entry_for_missing_tool_is_a_foreign_key_error(pool: PgPool) {
    let store = PostgresStore::new(pool);
    let result = ChangelogRepository::insert(&store, &entry(ToolId::new(), "1", 2024)).await;
    assert!(matches!(result, Err(RepositoryError::ForeignKey(_))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn removing_a_tool_cascades(pool: PgPool) {
    let store = PostgresStore::new(pool);
    let git = tool("git");
    let first = entry(git.id, "1", 2024);
    let Ok(()) = ToolRepository::insert(&store, &git).await else {
        panic!("insert tool failed");
    };
    let Ok(()) = ChangelogRepository::insert(&store, &first).await else {
        panic!("insert entry failed");
    };

    assert!(matches!(ToolRepository::remove(&store, git.id).await, Ok(true)));
    assert!(matches!(
        ChangelogRepository::find(&store, first.id).await,
        Ok(None)
    ));
    assert!(matches!(ToolRepository::remove(&store, git.id).await, Ok(false)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn replace_reports_missing_rows(pool: PgPool) {
    let store = PostgresStore::new(pool);
    let ghost = tool("ghost");
    assert!(matches!(ToolRepository::replace(&store, &ghost).await, Ok(false)));

    let Ok(()) = ToolRepository::insert(&store, &ghost).await else {
        panic!("insert tool failed");
    };
    let renamed = Tool {
        name_lang: "renamed".to_string(),
        ..ghost.clone()
    };
    assert!(matches!(ToolRepository::replace(&store, &renamed).await, Ok(true)));
    let Ok(Some(found)) = ToolRepository::find(&store, ghost.id).await else {
        panic!("tool missing after replace");
    };
    assert_eq!(found, renamed);
}
