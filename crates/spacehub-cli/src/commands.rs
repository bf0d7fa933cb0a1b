//! Command handlers for CLI subcommands.

use std::fmt::Write as _;
use std::path::Path;

use chrono::NaiveDate;
use spacehub_content::{BreadcrumbPath, ContentBrowser, ContentTree, TypeTab};
use spacehub_core::SpaceHubConfig;
use spacehub_models::{Document, Event, Module};
use spacehub_schedule::{placement, CalendarMode, Direction, EventScheduler, StatusFilter};
use tracing::{debug, warn};

use crate::cli::{Commands, ContentCommand, EventsCommand, OutputFormat};

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Resolved inputs shared by every command.
#[derive(Debug, Clone)]
pub struct Context<'a> {
    pub config: &'a SpaceHubConfig,
    pub events_path: &'a Path,
    pub content_path: &'a Path,
    pub format: OutputFormat,
}

/// Execute a CLI command.
pub fn execute(command: Commands, ctx: &Context<'_>) -> Result<()> {
    let output = match command {
        Commands::Events { action } => {
            let scheduler = load_scheduler(ctx)?;
            run_events(&scheduler, action, ctx.format)?
        }
        Commands::Content { action } => {
            let browser = load_browser(ctx)?;
            run_content(&browser, action, ctx.format)?
        }
    };
    print!("{}", output);
    Ok(())
}

/// Reads an event seed file. A missing file yields an empty calendar.
pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    if !path.exists() {
        warn!(path = %path.display(), "Event file not found, starting empty");
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)?;
    let events: Vec<Event> = serde_json::from_str(&content)?;
    debug!(path = %path.display(), count = events.len(), "Loaded events");
    Ok(events)
}

/// Reads a content seed file (nested modules). A missing file yields an
/// empty tree.
pub fn load_modules(path: &Path) -> Result<Vec<Module>> {
    if !path.exists() {
        warn!(path = %path.display(), "Content file not found, starting empty");
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)?;
    let modules: Vec<Module> = serde_json::from_str(&content)?;
    debug!(path = %path.display(), count = modules.len(), "Loaded modules");
    Ok(modules)
}

fn load_scheduler(ctx: &Context<'_>) -> Result<EventScheduler> {
    let events = load_events(ctx.events_path)?;
    Ok(EventScheduler::with_events(events)?.with_mode(ctx.config.calendar_mode))
}

fn load_browser(ctx: &Context<'_>) -> Result<ContentBrowser> {
    let modules = load_modules(ctx.content_path)?;
    let tree = ContentTree::from_modules(modules)?
        .with_default_link(ctx.config.default_document_link.clone());
    Ok(ContentBrowser::new(tree))
}

// ----------------------------------------------------------------------
// Events
// ----------------------------------------------------------------------

/// Runs an events subcommand and returns its rendered output.
pub fn run_events(
    scheduler: &EventScheduler,
    action: EventsCommand,
    format: OutputFormat,
) -> Result<String> {
    match action {
        EventsCommand::List { status } => {
            scheduler.set_filter(StatusFilter::parse(&status)?)?;
            let events = scheduler.visible();
            match format {
                OutputFormat::Table => render_events(&events),
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&events)? + "\n"),
            }
        }
        EventsCommand::Next { steps, status } => {
            step(scheduler, Direction::Next, steps, &status, format)
        }
        EventsCommand::Prev { steps, status } => {
            step(scheduler, Direction::Previous, steps, &status, format)
        }
        EventsCommand::Day { date, single } => {
            if single {
                scheduler.set_mode(CalendarMode::Day)?;
            }
            scheduler.set_selected_date(date)?;
            render_days(scheduler, format)
        }
    }
}

fn step(
    scheduler: &EventScheduler,
    direction: Direction,
    steps: usize,
    status: &[String],
    format: OutputFormat,
) -> Result<String> {
    scheduler.set_filter(StatusFilter::parse(status)?)?;
    for _ in 0..steps {
        scheduler.navigate(direction)?;
    }

    let total = scheduler.visible().len();
    let (Some(index), Some(event)) = (scheduler.cursor(), scheduler.current()) else {
        return Ok("No events.\n".to_string());
    };
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&event)? + "\n"),
        OutputFormat::Table => {
            let mut out = String::new();
            writeln!(out, "[{}/{}] {}", index + 1, total, event.title)?;
            writeln!(out, "  Status: {}", event.status.label())?;
            writeln!(
                out,
                "  When:   {} - {}",
                event.start.format("%Y-%m-%d %H:%M"),
                event.end.format("%H:%M")
            )?;
            if !event.instructor.name.is_empty() {
                writeln!(out, "  Host:   {} ({})", event.instructor.name, event.instructor.role)?;
            }
            if !event.meeting_url.is_empty() {
                writeln!(out, "  Join:   {}", event.meeting_url)?;
            }
            Ok(out)
        }
    }
}

fn render_events(events: &[Event]) -> Result<String> {
    if events.is_empty() {
        return Ok("No events found.\n".to_string());
    }

    let mut out = String::new();
    writeln!(
        out,
        "{:<16}  {:<12}  {:<11}  {:<5}  TITLE",
        "START", "STATUS", "COLOR", "END"
    )?;
    writeln!(out, "{}", "-".repeat(72))?;
    for event in events {
        writeln!(
            out,
            "{:<16}  {:<12}  {:<11}  {:<5}  {}",
            event.start.format("%Y-%m-%d %H:%M"),
            event.status.label(),
            event.display_color(),
            event.end.format("%H:%M"),
            truncate(&event.title, 30)
        )?;
    }
    writeln!(out, "\n{} event(s)", events.len())?;
    Ok(out)
}

fn render_days(scheduler: &EventScheduler, format: OutputFormat) -> Result<String> {
    let days: Vec<(NaiveDate, Vec<Event>)> = scheduler
        .days_to_show()?
        .into_iter()
        .map(|day| (day, scheduler.events_for_day(day)))
        .collect();

    if format == OutputFormat::Json {
        let json: Vec<serde_json::Value> = days
            .iter()
            .map(|(day, events)| {
                let items: Vec<serde_json::Value> = events
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "id": e.id,
                            "title": e.title,
                            "placement": placement(e),
                        })
                    })
                    .collect();
                serde_json::json!({ "date": day.to_string(), "events": items })
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&json)? + "\n");
    }

    let mut out = String::new();
    for (day, events) in &days {
        writeln!(out, "{}", day.format("%a %Y-%m-%d"))?;
        for event in events {
            let p = placement(event);
            writeln!(
                out,
                "  {}-{}  top {:>5.1}%  height {:>5.1}%  {}",
                event.start.format("%H:%M"),
                event.end.format("%H:%M"),
                p.top * 100.0,
                p.height * 100.0,
                event.title
            )?;
        }
    }
    Ok(out)
}

// ----------------------------------------------------------------------
// Content
// ----------------------------------------------------------------------

/// Runs a content subcommand and returns its rendered output.
pub fn run_content(
    browser: &ContentBrowser,
    action: ContentCommand,
    format: OutputFormat,
) -> Result<String> {
    match action {
        ContentCommand::Ls { path, query, tab } => {
            let path: BreadcrumbPath = path.parse()?;
            browser.navigate_to(path)?;
            let docs = browser.filter_documents(&query, tab);
            match format {
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&docs)? + "\n"),
                OutputFormat::Table => render_listing(browser, &docs, tab),
            }
        }
        ContentCommand::Tree => {
            let modules = browser.modules();
            match format {
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&modules)? + "\n"),
                OutputFormat::Table => render_tree(&modules),
            }
        }
    }
}

fn render_listing(browser: &ContentBrowser, docs: &[Document], tab: TypeTab) -> Result<String> {
    let trail: Vec<String> = browser.breadcrumbs().into_iter().map(|b| b.name).collect();

    let mut out = String::new();
    writeln!(out, "{}  [{}]", trail.join(" / "), tab)?;
    if docs.is_empty() {
        writeln!(out, "No documents found.")?;
        return Ok(out);
    }
    writeln!(
        out,
        "{:<6}  {:<30}  {:<8}  {:<6}  CREATED",
        "ID", "TITLE", "TYPE", "FORMAT"
    )?;
    writeln!(out, "{}", "-".repeat(72))?;
    for doc in docs {
        writeln!(
            out,
            "{:<6}  {:<30}  {:<8}  {:<6}  {}",
            doc.id.get(),
            truncate(&doc.title, 30),
            doc.doc_type.as_str(),
            doc.format.as_str(),
            doc.created_at.format("%Y-%m-%d")
        )?;
    }
    writeln!(out, "\n{} document(s)", docs.len())?;
    Ok(out)
}

fn render_tree(modules: &[Module]) -> Result<String> {
    if modules.is_empty() {
        return Ok("No modules found.\n".to_string());
    }

    let mut out = String::new();
    for module in modules {
        writeln!(out, "{} [{}]", module.name, module.id.get())?;
        for chapter in &module.chapters {
            writeln!(out, "  {} [{}]", chapter.name, chapter.id.get())?;
            for doc in &chapter.documents {
                writeln!(
                    out,
                    "    {} [{}] {} {}",
                    doc.title,
                    doc.id.get(),
                    doc.doc_type.as_str(),
                    doc.format.as_str()
                )?;
            }
        }
    }
    Ok(out)
}

/// Truncate a string to a maximum length, adding "..." if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
