use cs_core::content::{ContentItem, ContentStatus, QueueEntry};
use cs_core::intake::{KIB, MIB};
use cs_core::settings::UserSettings;
use cs_core::sync::{SyncReport, SyncStatus};

const TITLE_WIDTH: usize = 48;

pub fn status_label(status: ContentStatus) -> &'static str {
    match status {
        ContentStatus::Raw => "raw",
        ContentStatus::Processing => "processing",
        ContentStatus::Processed => "processed",
        ContentStatus::Enriched => "enriched",
    }
}

pub fn sync_label(status: SyncStatus) -> &'static str {
    match status {
        SyncStatus::Synced => "synced",
        SyncStatus::Checking => "checking",
        SyncStatus::OutOfSync => "out of sync",
    }
}

pub fn size_label(bytes: u64) -> String {
    if bytes >= MIB {
        format!("{:.1}MB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1}KB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes}B")
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

pub fn item_line(item: &ContentItem) -> String {
    let tags: Vec<&str> = item.metadata.tags.iter().collect();
    let mut line = format!(
        "{:<38} {:<10} {:>8}  {}",
        item.id.as_str(),
        status_label(item.status),
        size_label(item.metadata.size_bytes),
        truncate(&item.title, TITLE_WIDTH),
    );
    if !tags.is_empty() {
        line.push_str(&format!("  [{}]", tags.join(", ")));
    }
    line
}

pub fn entry_line(entry: &QueueEntry) -> String {
    let marker = if entry.is_optimistic() { "*" } else { " " };
    format!("{marker}{}", item_line(entry.item()))
}

pub fn print_entries(entries: &[QueueEntry]) {
    if entries.is_empty() {
        println!("queue is empty");
        return;
    }
    for entry in entries {
        println!("{}", entry_line(entry));
    }
    println!("\n{} item(s)", entries.len());
}

pub fn print_items(items: &[ContentItem]) {
    if items.is_empty() {
        println!("no results");
        return;
    }
    for item in items {
        println!(" {}", item_line(item));
    }
}

pub fn print_report(report: &SyncReport) {
    println!("status:  {}", sync_label(report.status));
    println!("local:   {}", report.local_count);
    println!("remote:  {}", report.remote_count);
    println!("checked: {}", report.checked_at.format("%Y-%m-%d %H:%M:%S UTC"));
    if !report.extra_local.is_empty() {
        println!("- only local: {}", report.extra_local.join(", "));
    }
    if !report.missing_local.is_empty() {
        println!("- only remote: {}", report.missing_local.join(", "));
    }
}

pub fn print_settings(settings: &UserSettings) {
    println!(
        "company_name:  {}",
        settings.company_name.as_deref().unwrap_or("-")
    );
    println!(
        "primary_color: {}",
        settings.primary_color.as_deref().unwrap_or("-")
    );
    let logo = match &settings.logo_url {
        Some(url) => format!("set ({} chars)", url.len()),
        None => "-".to_string(),
    };
    println!("logo:          {logo}");
}
