use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use cs_app::{BulkDeleteOutcome, ContentQueue, QueueEvent, SubmitOutcome};
use cs_core::content::{FileRef, ItemUpdate, QueueQuery, SortDirection, Submission, Tags};
use cs_core::ids::EntryId;
use cs_core::intake::mime_for_name;
use cs_core::settings::SettingsPatch;
use cs_core::sync::SyncStatus;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use super::render;
use super::{AddSource, Commands, ListArgs, SettingsCommand, UpdateArgs};

const OUT_OF_SYNC_EXIT: u8 = 2;

/// Runs one command against a freshly wired queue.
pub async fn run(command: Commands, queue: ContentQueue) -> Result<ExitCode> {
    let events = log_events(&queue);

    let result = match command {
        Commands::List(args) => run_list(&queue, args).await,
        Commands::Add { source, force } => run_add(&queue, source, force).await,
        Commands::Update(args) => run_update(&queue, args).await,
        Commands::Remove { id } => run_remove(&queue, id).await,
        Commands::BulkRemove { ids, yes } => run_bulk_remove(&queue, ids, yes).await,
        Commands::Search { query, json } => run_search(&queue, &query, json).await,
        Commands::CheckSync { json } => run_check_sync(&queue, json).await,
        Commands::Settings { command } => run_settings(&queue, command).await,
    };

    events.abort();
    result
}

fn log_events(queue: &ContentQueue) -> tokio::task::JoinHandle<()> {
    let mut rx = queue.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = rx.recv().await {
            match event {
                QueueEvent::BulkDeleteResynced { deleted, failed } => {
                    debug!(deleted, failed = %failed, "queue reloaded after bulk delete failure");
                }
                other => debug!(event = ?other, "queue event"),
            }
        }
    })
}

async fn run_list(queue: &ContentQueue, args: ListArgs) -> Result<ExitCode> {
    queue.load().await?;

    let query = QueueQuery {
        text: args.text,
        status: args.status,
        tag: args.tag,
        category: args.category,
        sort: args.sort.into(),
        direction: if args.asc {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        },
    };
    let entries = queue.query(&query).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        render::print_entries(&entries);
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_add(queue: &ContentQueue, source: AddSource, force: bool) -> Result<ExitCode> {
    let submission = match source {
        AddSource::Paste { text: Some(text) } => Submission::paste(text),
        AddSource::Paste { text: None } => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("failed to read stdin")?;
            Submission::paste(text)
        }
        AddSource::Url { url } => Submission::url(url),
        AddSource::File { path, drop } => {
            let file = file_ref(&path).await?;
            if drop {
                Submission::drop_file(file)
            } else {
                Submission::upload(file)
            }
        }
    };

    let outcome = match queue.submit(submission).await? {
        SubmitOutcome::Duplicate(duplicate) => {
            println!("{}", duplicate.message());
            if let Some(existing) = duplicate.existing_id() {
                println!("- existing item: {existing}");
            }
            if force || confirm("Add it anyway?").await? {
                duplicate.approve().await?
            } else {
                duplicate.cancel();
                println!("not added");
                return Ok(ExitCode::SUCCESS);
            }
        }
        added => added,
    };

    if let Some(entry) = outcome.entry() {
        println!("added {}", entry.id());
        println!("{}", render::entry_line(entry));
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_update(queue: &ContentQueue, args: UpdateArgs) -> Result<ExitCode> {
    queue.load().await?;

    let update = ItemUpdate {
        title: args.title,
        tags: if args.tags.is_empty() {
            None
        } else {
            Some(args.tags.into_iter().collect::<Tags>())
        },
        category: args.category,
        status: args.status,
        ..Default::default()
    };
    if update.is_empty() {
        bail!("nothing to update");
    }

    let id = EntryId::from(args.id);
    queue.update(&id, update).await?;

    if let Some(entry) = queue.get(&id).await {
        println!("{}", render::entry_line(&entry));
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_remove(queue: &ContentQueue, id: String) -> Result<ExitCode> {
    queue.load().await?;

    let id = EntryId::from(id);
    if queue.get(&id).await.is_none() {
        bail!("no such item: {id}");
    }
    queue.remove(&id).await?;
    println!("removed {id}");
    Ok(ExitCode::SUCCESS)
}

async fn run_bulk_remove(queue: &ContentQueue, ids: Vec<String>, yes: bool) -> Result<ExitCode> {
    queue.load().await?;

    let request = queue.bulk_remove(ids.into_iter().map(EntryId::from).collect());
    if request.is_empty() {
        println!("nothing to remove");
        return Ok(ExitCode::SUCCESS);
    }

    let prompt = format!("Delete {} item(s)?", request.len());
    if !yes && !confirm(&prompt).await? {
        request.cancel();
        println!("cancelled");
        return Ok(ExitCode::SUCCESS);
    }

    match request.confirm().await {
        BulkDeleteOutcome::Completed { deleted } => {
            println!("removed {deleted} item(s)");
            Ok(ExitCode::SUCCESS)
        }
        BulkDeleteOutcome::Resynced {
            deleted,
            failed_id,
            error,
        } => {
            eprintln!("removed {deleted} item(s), then {failed_id} failed: {error}");
            eprintln!("queue reloaded from the backend");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run_search(queue: &ContentQueue, query: &str, json: bool) -> Result<ExitCode> {
    let items = queue.search(query).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        render::print_items(&items);
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_check_sync(queue: &ContentQueue, json: bool) -> Result<ExitCode> {
    // An unreachable backend still produces a report.
    if let Err(err) = queue.load().await {
        eprintln!("could not load queue: {err}");
    }

    let report = queue.check_sync().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render::print_report(&report);
    }

    Ok(match report.status {
        SyncStatus::OutOfSync => ExitCode::from(OUT_OF_SYNC_EXIT),
        _ => ExitCode::SUCCESS,
    })
}

async fn run_settings(queue: &ContentQueue, command: SettingsCommand) -> Result<ExitCode> {
    match command {
        SettingsCommand::Show => {}
        SettingsCommand::Set {
            company_name,
            primary_color,
        } => {
            queue
                .update_settings(SettingsPatch {
                    company_name,
                    primary_color,
                })
                .await?;
        }
        SettingsCommand::Logo { path } => {
            queue.update_logo(&path).await?;
            println!("logo updated from {}", path.display());
        }
        SettingsCommand::ClearLogo => {
            queue.clear_logo().await?;
        }
    }

    render::print_settings(&queue.settings().await?);
    Ok(ExitCode::SUCCESS)
}

async fn file_ref(path: &Path) -> Result<FileRef> {
    let meta = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("cannot read {}", path.display()))?;
    if !meta.is_file() {
        bail!("{} is not a file", path.display());
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(FileRef {
        mime: mime_for_name(&name).map(str::to_string),
        name,
        size_bytes: meta.len(),
        path: path.to_path_buf(),
    })
}

async fn confirm(prompt: &str) -> Result<bool> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(format!("{prompt} [y/N] ").as_bytes()).await?;
    stdout.flush().await?;

    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
