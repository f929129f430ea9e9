mod args;
mod command;
mod error;
mod paths;
mod render;

use std::fs;
use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use datagrid_lib::controller::TableController;
use datagrid_lib::controller::TableSnapshot;
use datagrid_lib::dataset;
use datagrid_lib::engine::InMemoryEngine;
use datagrid_lib::error::QueryError;
use datagrid_lib::model::Record;
use datagrid_lib::query::SortSpec;
use log::info;
use log::warn;
use simplelog::Config;
use simplelog::WriteLogger;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::args::Args;
use crate::command::Command;
use crate::command::HELP;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    init_logging(&args)?;
    let controller_config = args.controller_config()?;

    let records = dataset::generate(&args.dataset_config());
    info!("Generated {} record(s)", records.len());
    let engine = InMemoryEngine::new(records).with_config(args.engine_config());
    let controller = TableController::new(engine, controller_config);

    println!("{}", HELP);
    let renderer = tokio::spawn(render_changes(controller.subscribe()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => apply(&controller, command),
            Err(e) => eprintln!("{}", e),
        }
    }

    // Let the last request land so piped input ends on its final table.
    controller.settled().await;
    drop(controller);
    join_renderer(renderer).await;
    info!("Exiting");
    Ok(())
}

/// Log to `--log-file`, or to a rotated file in the cache directory.
fn init_logging(args: &Args) -> Result<(), CliError> {
    let path: PathBuf = match &args.log_file {
        Some(path) => path.clone(),
        None => {
            paths::rotate_logs();
            paths::log_file().ok_or(CliError::NoLogDir)?
        }
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(&path)?;
    WriteLogger::init(args.log_level.into(), Config::default(), file)?;
    info!("Logging to {}", path.display());
    Ok(())
}

/// Prints every settled or loading snapshot; debounce-pending ones are skipped.
async fn render_changes(mut snapshots: watch::Receiver<TableSnapshot>) {
    while snapshots.changed().await.is_ok() {
        let snapshot = snapshots.borrow_and_update().clone();
        if snapshot.pending {
            continue;
        }
        println!("\n{}", render::snapshot(&snapshot));
    }
}

fn apply(controller: &TableController, command: Command) {
    let changed = match command {
        Command::Filter {
            column,
            value,
            sort,
        } => controller.submit_filter(column.key(), value.as_deref(), sort),
        Command::Sort { column, direction } => {
            controller.set_sort(SortSpec::new(column.key(), direction))
        }
        Command::CycleSort(column) => {
            let direction = controller.cycle_sort(column.key());
            info!("Sort on {} cycled to {:?}", column, direction);
            true
        }
        Command::Unsort => controller.clear_sort(),
        Command::Page(number) => controller.go_to_page(number - 1),
        Command::Next => controller.next_page(),
        Command::Prev => controller.previous_page(),
        Command::First => controller.first_page(),
        Command::Last => controller.last_page(),
        Command::Size(size) => match controller.change_page_size(size) {
            Ok(changed) => changed,
            Err(e) => return report(e),
        },
        Command::Reset => controller.reset(),
        Command::Refresh => controller.refresh(),
        Command::Select(rows) => {
            let ids: Vec<_> = page_rows(controller, &rows).iter().map(Record::id).collect();
            controller.select_rows(ids)
        }
        Command::Toggle(row) => match page_rows(controller, &[row]).first() {
            Some(record) => controller.toggle_row(record.id()),
            None => false,
        },
        Command::ToggleAll => controller.toggle_all_page_rows(),
        Command::State => {
            println!("\n{}", render::snapshot(&controller.snapshot()));
            return;
        }
        Command::Help => {
            println!("{}", HELP);
            return;
        }
        Command::Quit => return,
    };

    if !changed {
        let snapshot = controller.snapshot();
        if !snapshot.is_settled() {
            println!("Busy loading, try again when the page arrives");
        } else {
            println!("Nothing changed");
        }
    }
}

/// Resolves 1-based row numbers against the current page.
fn page_rows(controller: &TableController, rows: &[usize]) -> Vec<Record> {
    let snapshot = controller.snapshot();
    rows.iter()
        .filter_map(|row| snapshot.page().get(row.checked_sub(1)?))
        .cloned()
        .collect()
}

/// Waits for the render task, logging a panic instead of dropping it.
async fn join_renderer(renderer: JoinHandle<()>) -> bool {
    match renderer.await {
        Ok(()) => true,
        Err(e) => {
            warn!("Render task failed: {}", e);
            false
        }
    }
}

fn report(error: QueryError) {
    eprintln!("{}", error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_join_renderer_reports_panic() {
        assert!(join_renderer(tokio::spawn(async {})).await);
        let failing: JoinHandle<()> = tokio::spawn(async { panic!("render failed") });
        assert!(!join_renderer(failing).await);
    }
}
