use anyhow::Result;
use clap::Parser;
use shared::domain::{EditableField, RecordDraft, SortDirection};
use table_core::{RecordTableController, TableSnapshot};
use tracing::warn;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
struct Args {
    /// Endpoint returning the initial `{ "data": [...] }` document.
    #[arg(long)]
    source_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(source_url) = args.source_url {
        settings.source_url = source_url;
    }

    let controller = RecordTableController::new(settings.source_url.clone());
    println!("Fetching records from {}", settings.source_url);
    if let Err(err) = controller.load().await {
        warn!("initial load failed: {err}");
    }

    let snapshot = controller.snapshot().await;
    if snapshot.is_loading() {
        println!("Loading...");
        return Ok(());
    }
    render(&snapshot);

    // Scripted session standing in for the interactive table: add a
    // row, edit a cell, sort by age, then bulk-remove a selection.
    let added = controller
        .add_record(&RecordDraft {
            name: "Lee".into(),
            age: "25".into(),
            country: "Chile".into(),
        })
        .await?;
    println!("\nAdded record id={}", added.0);

    controller
        .update_field(added, EditableField::Country, Some("  Chile  "))
        .await;

    let snapshot = controller.sort_by_age().await;
    println!("\nSorted by age:");
    render(&snapshot);

    controller.toggle_select(added).await;
    let snapshot = controller.remove_selected().await;
    println!("\nAfter removing the selection:");
    render(&snapshot);

    Ok(())
}

fn render(snapshot: &TableSnapshot) {
    let arrow = match snapshot.sort_direction {
        SortDirection::Ascending => "v",
        SortDirection::Descending => "^",
    };
    let all = if snapshot.all_selected() { "x" } else { " " };
    println!("[{all}] |   id | name       | age {arrow} | country");
    for record in &snapshot.records {
        let mark = if snapshot.selected.contains(&record.id) {
            "x"
        } else {
            " "
        };
        let age = record.age.to_string();
        println!(
            "[{mark}] | {:>4} | {:<10} | {age:>5} | {}",
            record.id.0, record.name, record.country
        );
    }
}
