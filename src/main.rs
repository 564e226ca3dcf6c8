//! Simple CLI demo for the todo store.
//!
//! Runs against the remote endpoint and snapshot file from `TODO_API_BASE_URL`
//! / `TODO_SNAPSHOT_PATH` when configured, and falls back to an offline
//! in-memory store otherwise.

use std::sync::Arc;
use std::time::Duration;
use todo_store::testing::StubApi;
use todo_store::{
    InMemorySnapshotStore, SystemClock, TodoConfig, TodoEnvironment, TodoPatch, TodoStore,
};

async fn print_todos(store: &TodoStore) {
    for todo in store.todos().await {
        let status = if todo.completed {
            "✓"
        } else if todo.in_progress {
            "~"
        } else {
            " "
        };
        println!("  [{}] {} ({})", status, todo.title, todo.id);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== Todo Store Demo ===\n");

    let config = TodoConfig::from_env().ok();
    let store = match &config {
        Some(config) => {
            println!("Using remote endpoint {}\n", config.api_base_url);
            TodoStore::from_config(config)
        }
        None => {
            println!("TODO_API_BASE_URL not set, running offline\n");
            TodoStore::with_environment(TodoEnvironment::new(
                Arc::new(SystemClock),
                Arc::new(StubApi::default()),
                Arc::new(InMemorySnapshotStore::new()),
            ))
        }
    };

    println!("Creating todos...");
    for title in ["Buy milk", "Write documentation", "Deploy to production"] {
        store.add_todo(title).await?;
        // Ids are clock milliseconds; space the creations out
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    print_todos(&store).await;

    let todos = store.todos().await;
    println!("\nCompleting '{}'...", todos[0].title);
    store
        .update_todo(todos[0].id, TodoPatch::new().completed(true))
        .await?;

    println!("Starting '{}'...", todos[1].title);
    store
        .update_todo(todos[1].id, TodoPatch::new().in_progress(true))
        .await?;
    print_todos(&store).await;

    println!("\nClearing completed...");
    store.clear_completed().await?;
    print_todos(&store).await;

    if config.is_some() {
        println!("\nFetching remote todos...");
        match store.fetch_todos().await {
            Ok(()) => {
                println!("Fetched {} todos", store.todos().await.len());
                print_todos(&store).await;
            }
            Err(error) => println!("Fetch failed: {error}"),
        }
    }

    println!("\nRestoring from snapshot...");
    store.load_from_snapshot().await?;
    print_todos(&store).await;

    println!("\n=== Demo Complete ===");
    Ok(())
}
