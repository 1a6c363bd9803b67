use std::io::{self, IsTerminal, Write};

use anyhow::anyhow;
use chrono::Utc;
use unicode_width::UnicodeWidthStr;

use crate::config::Config;
use crate::datetime::{self, format_due_date, format_time_ago};
use crate::lookup::{priority_style, status_style};
use crate::task::{Status, Task};

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color_cfg = cfg.get("color").unwrap_or_else(|| "on".to_string());
        let color = match color_cfg.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" | "1" => true,
            "off" | "no" | "false" | "0" => false,
            other => return Err(anyhow!("invalid color setting: {other}")),
        };

        Ok(Self { color })
    }

    #[tracing::instrument(skip(self, tasks))]
    pub fn print_task_table(&mut self, tasks: &[Task]) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        let now = Utc::now();

        let headers = vec![
            "ID".to_string(),
            "Pri".to_string(),
            "Status".to_string(),
            "Due".to_string(),
            "Title".to_string(),
        ];

        let mut rows = Vec::with_capacity(tasks.len());

        for task in tasks {
            let id = task
                .id
                .map(|value| value.to_string())
                .unwrap_or_else(|| "-".to_string());
            let id = self.paint(&id, "33");

            let priority = priority_style(task.priority).label.to_string();
            let status = status_style(task.status.as_str()).label.to_string();

            let due = task
                .due_date
                .as_deref()
                .map(|raw| format_due_date(Some(raw)))
                .unwrap_or_default();
            let due = if is_overdue(task, now) {
                self.paint(&due, "31")
            } else {
                due
            };

            rows.push(vec![id, priority, status, due, task.title.clone()]);
        }

        write_table(&mut out, headers, rows)?;
        Ok(())
    }

    #[tracing::instrument(skip(self, tasks))]
    pub fn print_status_summary(&mut self, tasks: &[Task]) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        let count = |status: Status| tasks.iter().filter(|t| t.status == status).count();

        writeln!(
            out,
            "\n{} to do, {} in progress, {} done ({} total)",
            count(Status::Todo),
            count(Status::InProgress),
            count(Status::Done),
            tasks.len()
        )?;
        Ok(())
    }

    #[tracing::instrument(skip(self, task))]
    pub fn print_task_info(&mut self, task: &Task) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        let now = Utc::now();

        writeln!(
            out,
            "id          {}",
            task.id
                .map(|value| value.to_string())
                .unwrap_or_else(|| "-".to_string())
        )?;
        writeln!(out, "title       {}", task.title)?;
        writeln!(out, "description {}", task.description)?;
        writeln!(out, "status      {}", status_style(task.status.as_str()).label)?;
        writeln!(
            out,
            "priority    {} ({})",
            task.priority,
            priority_style(task.priority).label
        )?;
        writeln!(out, "due         {}", format_due_date(task.due_date.as_deref()))?;

        if let Some(created) = task.created_at.as_deref() {
            writeln!(out, "created     {}", format_time_ago(created, now))?;
        }
        if let Some(updated) = task.updated_at.as_deref() {
            writeln!(out, "updated     {}", format_time_ago(updated, now))?;
        }

        Ok(())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color || !io::stdout().is_terminal() {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn is_overdue(task: &Task, now: chrono::DateTime<Utc>) -> bool {
    if task.status == Status::Done {
        return false;
    }
    task.due_date
        .as_deref()
        .and_then(datetime::parse_timestamp)
        .map(|due| due < now)
        .unwrap_or(false)
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
