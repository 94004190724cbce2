//! TouchTask CLI Application
//!
//! Command-line interface for the TouchTask daily planner.

mod args;
mod cli;
mod handlers;
mod renderer;
mod session;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use handlers::Cli;
use log::info;
use renderer::TerminalRenderer;
use touchtask_core::PlannerBuilder;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args { database_file, no_color, command } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("TouchTask started");

    let cli = Cli::new(planner, renderer);
    match command {
        Some(Day { command }) => cli.handle_day_command(command).await,
        Some(Block { command }) => cli.handle_block_command(command).await,
        Some(Subtask { command }) => cli.handle_subtask_command(command).await,
        Some(Task { command }) => cli.handle_task_command(command).await,
        Some(Reminder { command }) => cli.handle_reminder_command(command).await,
        Some(Meeting { command }) => cli.handle_meeting_command(command).await,
        Some(Timer { command }) => cli.handle_timer_command(command).await,
        Some(Settings { command }) => cli.handle_settings_command(command).await,
        Some(Data { command }) => cli.handle_data_command(command).await,
        None => cli.show_day().await,
    }
}
