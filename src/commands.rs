use std::io::{self, Write};

use anyhow::Result;
use chrono::Local;

use crate::cli::{AddArgs, CliCommand, DeleteArgs, DoneArgs, ListArgs};
use crate::model::{Bucket, Task};
use crate::parser;
use crate::AppConfig;
use crate::TaskStore;

/// Run one CLI command against a freshly opened store, writing output to
/// `writer`. `confirm` is the delete-confirmation oracle; the binary wires a
/// stdin prompt in, tests pass a closure.
pub fn execute<W: Write, F: FnMut(&Task) -> bool>(
    config: &AppConfig,
    command: CliCommand,
    confirm: F,
    writer: &mut W,
) -> Result<()> {
    let mut store = TaskStore::open(config)?;
    match command {
        CliCommand::Add(args) => handle_add(&mut store, &args, writer),
        CliCommand::Done(args) => handle_done(&mut store, &args, writer),
        CliCommand::Delete(args) => handle_delete(&mut store, &args, confirm, writer),
        CliCommand::List(args) => handle_list(&store, &args, writer),
    }
}

/// Interactive confirmation oracle: prompts on stdout, reads one stdin line.
pub fn prompt_confirm(task: &Task) -> bool {
    print!("Delete #{} \"{}\"? [y/N] ", task.id, task.title);
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn handle_add<W: Write>(store: &mut TaskStore, args: &AddArgs, writer: &mut W) -> Result<()> {
    let title = args.text.join(" ");
    match store.create(&title, &args.due) {
        Ok(task) => {
            writeln!(
                writer,
                "Added #{} \"{}\" due {}",
                task.id, task.title, task.due_date
            )?;
            Ok(())
        }
        Err(err) => {
            writeln!(writer, "{}", err)?;
            Err(err.into())
        }
    }
}

fn handle_done<W: Write>(store: &mut TaskStore, args: &DoneArgs, writer: &mut W) -> Result<()> {
    store.toggle_done(args.id);
    match store.tasks().iter().find(|task| task.id == args.id) {
        Some(task) if task.is_done => writeln!(writer, "Completed #{} {}", task.id, task.title)?,
        Some(task) => writeln!(writer, "Reopened #{} {}", task.id, task.title)?,
        None => writeln!(writer, "Not found: {}", args.id)?,
    }
    Ok(())
}

fn handle_delete<W: Write, F: FnMut(&Task) -> bool>(
    store: &mut TaskStore,
    args: &DeleteArgs,
    mut confirm: F,
    writer: &mut W,
) -> Result<()> {
    let mut deleted = 0usize;
    let mut cancelled: Vec<u64> = Vec::new();
    let mut missing: Vec<u64> = Vec::new();

    for &id in &args.ids {
        let found = store.tasks().iter().find(|task| task.id == id).cloned();
        match found {
            Some(task) => {
                let confirmed = args.yes || confirm(&task);
                if store.delete(task.id, confirmed) {
                    deleted += 1;
                } else {
                    cancelled.push(id);
                }
            }
            None => {
                // Confirmation is pointless for an id that is not there; the
                // store still runs its confirmed-delete path and announces it.
                store.delete(id, true);
                missing.push(id);
            }
        }
    }

    if deleted > 0 {
        writeln!(
            writer,
            "Deleted {} task{}",
            deleted,
            if deleted == 1 { "" } else { "s" }
        )?;
    } else {
        writeln!(writer, "No tasks deleted")?;
    }
    if !cancelled.is_empty() {
        writeln!(writer, "Cancelled: {}", join_ids(&cancelled))?;
    }
    if !missing.is_empty() {
        writeln!(writer, "Not found: {}", join_ids(&missing))?;
    }
    Ok(())
}

fn handle_list<W: Write>(store: &TaskStore, args: &ListArgs, writer: &mut W) -> Result<()> {
    let now = Local::now().date_naive();
    let views = store.partition(now);

    let buckets: &[Bucket] = match args.view {
        Some(Bucket::Today) => &[Bucket::Today],
        Some(Bucket::ThisWeek) => &[Bucket::ThisWeek],
        Some(Bucket::Other) => &[Bucket::Other],
        None => &[Bucket::Today, Bucket::ThisWeek, Bucket::Other],
    };
    for bucket in buckets {
        writeln!(writer, "{}", bucket.label())?;
        write_group(views.bucket(*bucket), writer)?;
    }

    if let Some(spec) = &args.on {
        let day = parser::parse_due_date(spec)?;
        writeln!(writer, "On {}", day)?;
        write_group(&store.on_day(Some(day)), writer)?;
    }
    Ok(())
}

fn write_group<W: Write>(tasks: &[Task], writer: &mut W) -> Result<()> {
    if tasks.is_empty() {
        writeln!(writer, "  (none)")?;
        return Ok(());
    }
    for task in tasks {
        writeln!(writer, "{}", task_line(task))?;
    }
    Ok(())
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn task_line(task: &Task) -> String {
    format!(
        "  [{}] #{} {} ({})",
        if task.is_done { "x" } else { " " },
        task.id,
        task.title,
        task.due_date
    )
}
