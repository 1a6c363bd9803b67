pub mod api;
pub mod cli;
pub mod config;
pub mod controller;
pub mod datetime;
pub mod filter;
pub mod lookup;
pub mod prompt;
pub mod render;
pub mod task;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use crate::api::{HttpTaskApi, TaskApi};
use crate::cli::Command;
use crate::controller::TaskListController;
use crate::filter::TaskFilters;
use crate::prompt::TerminalPrompt;
use crate::render::Renderer;

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let cli = cli::GlobalCli::parse_from(raw_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;
    info!(verbose = cli.verbose, quiet = cli.quiet, "starting taskdeck CLI");

    let mut cfg = config::Config::load(cli.taskdeckrc.as_deref())?;
    cfg.apply_overrides(
        cli.rc_overrides
            .iter()
            .map(|kv| (kv.key.clone(), kv.value.clone())),
    );

    let base_url = cli
        .api_url
        .clone()
        .unwrap_or_else(|| cfg.api_url());
    debug!(base_url = %base_url, "resolved API base URL");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(execute(cli.command, &base_url, &cfg))?;

    info!("done");
    Ok(())
}

async fn execute(command: Command, base_url: &str, cfg: &config::Config) -> anyhow::Result<()> {
    let api = HttpTaskApi::new(base_url);
    let mut renderer = Renderer::new(cfg)?;

    match command {
        Command::List {
            status,
            priority,
            due_from,
            due_to,
            search,
            sort_by,
            sort_direction,
        } => {
            let mut controller =
                TaskListController::new(api, TerminalPrompt::new(false));
            let defaults = TaskFilters::default();
            controller.filters = TaskFilters {
                status,
                priority,
                due_date_from: due_from,
                due_date_to: due_to,
                search,
                sort_by: sort_by.unwrap_or(defaults.sort_by),
                sort_direction: sort_direction.unwrap_or(defaults.sort_direction),
            };

            controller.apply_filters().await;
            if let Some(err) = controller.error {
                anyhow::bail!(err);
            }
            renderer.print_task_table(&controller.tasks)?;
            renderer.print_status_summary(&controller.tasks)?;
        }

        Command::Info { id } => {
            let task = api
                .get_task(id)
                .await
                .with_context(|| format!("failed to fetch task {id}"))?;
            renderer.print_task_info(&task)?;
        }

        Command::Add {
            title,
            description,
            status,
            priority,
            due,
        } => {
            let mut controller =
                TaskListController::new(api, TerminalPrompt::new(false));
            controller.open_create_modal();
            controller.draft.title = title;
            controller.draft.description = description;
            controller.draft.status = Some(status.unwrap_or(task::Status::Todo));
            controller.draft.priority =
                Some(priority.unwrap_or(lookup::PRIORITY_DEFAULT));
            controller.draft.due_date = due;

            controller.save_task().await;
            if let Some(err) = controller.error {
                anyhow::bail!(err);
            }
            if controller.show_modal {
                // validation rejected the draft; the message already went
                // to the prompt
                anyhow::bail!("task was not created");
            }
            println!("Created task.");
        }

        Command::Modify {
            id,
            title,
            description,
            status,
            priority,
            due,
        } => {
            let current = api
                .get_task(id)
                .await
                .with_context(|| format!("failed to fetch task {id}"))?;

            let mut controller =
                TaskListController::new(api, TerminalPrompt::new(false));
            controller.open_edit_modal(&current);
            if let Some(title) = title {
                controller.draft.title = title;
            }
            if let Some(description) = description {
                controller.draft.description = description;
            }
            if let Some(status) = status {
                controller.draft.status = Some(status);
            }
            if let Some(priority) = priority {
                controller.draft.priority = Some(priority);
            }
            if let Some(due) = due {
                controller.draft.due_date = Some(due);
            }

            controller.save_task().await;
            if let Some(err) = controller.error {
                anyhow::bail!(err);
            }
            if controller.show_modal {
                anyhow::bail!("task {id} was not updated");
            }
            println!("Modified task {id}.");
        }

        Command::Delete { id, yes } => {
            let mut controller =
                TaskListController::new(api, TerminalPrompt::new(yes));
            let deleted = controller.delete_task(Some(id)).await;
            if let Some(err) = controller.error {
                anyhow::bail!(err);
            }
            if deleted {
                println!("Deleted task {id}.");
            } else {
                println!("Task {id} was not deleted.");
            }
        }
    }

    Ok(())
}
