use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{
    behavior_tree_view, BehaviorNodeTreeView, DropOutcome, RecordingHost,
};
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::NodeId;
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(count) = cli.count {
        settings.test_data_count = count;
    }
    debug!(?settings, "effective settings");

    match &cli.command {
        Some(Commands::Show) => _show(&settings),
        Some(Commands::Search { pattern }) => _search(&settings, pattern),
        Some(Commands::Drop { ids, target, index }) => _drop(&settings, ids, *target, *index),
        Some(Commands::Delete { ids }) => _delete(&settings, ids),
        Some(Commands::Config) => _config(&settings),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

fn print_tree(view: &BehaviorNodeTreeView) {
    output::info(&view.tree().to_tree_string());
}

#[instrument(skip(settings))]
fn _show(settings: &Settings) -> CliResult<()> {
    let view = behavior_tree_view(settings)?;
    print_tree(&view);
    Ok(())
}

#[instrument(skip(settings))]
fn _search(settings: &Settings, pattern: &str) -> CliResult<()> {
    let mut view = behavior_tree_view(settings)?;
    view.set_search(pattern);
    let rows = view.rows();
    output::header(&format!("{} matching rows", rows.len()));
    for row in &rows {
        output::info(&output::format_row(row));
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _drop(
    settings: &Settings,
    ids: &[NodeId],
    target: Option<NodeId>,
    index: Option<usize>,
) -> CliResult<()> {
    let mut view = behavior_tree_view(settings)?;
    let payload = view
        .begin_drag(ids)
        .ok_or_else(|| CliError::InvalidArgs("nothing to drag".into()))?;

    let mut host = RecordingHost::default();
    match view.perform_drop(&payload, target, index, &mut host) {
        DropOutcome::Moved { moved_ids } => {
            output::success(&format!("moved {:?}", moved_ids));
            print_tree(&view);
        }
        DropOutcome::Rejected { reason } => {
            output::warning(&format!("drop rejected: {}", reason));
        }
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _delete(settings: &Settings, ids: &[NodeId]) -> CliResult<()> {
    let mut view = behavior_tree_view(settings)?;
    let mut host = RecordingHost::default();
    let removed = view.delete_selection(ids, &mut host);
    if removed == 0 {
        output::warning("no matching nodes");
        return Ok(());
    }
    output::success(&format!("deleted {} node(s)", removed));
    print_tree(&view);
    Ok(())
}

fn _config(settings: &Settings) -> CliResult<()> {
    output::info(&settings.to_toml()?);
    Ok(())
}
