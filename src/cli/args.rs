//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::domain::NodeId;

/// Headless host for the behavior-node tree view: populate, drag, drop, delete
#[derive(Parser, Debug)]
#[command(name = "btv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (default: XDG config dir)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Number of test items to populate (overrides config)
    #[arg(short = 'n', long, global = true, env = "BTV_COUNT")]
    pub count: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the populated tree
    Show,

    /// Print rows whose label matches a search string
    Search {
        /// Search string
        pattern: String,
    },

    /// Drag nodes onto a target and print the result
    Drop {
        /// Dragged node ids
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<NodeId>,
        /// Target parent id (omit to drop outside any row)
        #[arg(short, long)]
        target: Option<NodeId>,
        /// Insert position among the target's children
        #[arg(short, long)]
        index: Option<usize>,
    },

    /// Delete nodes (with their subtrees) and print the result
    Delete {
        /// Node ids
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<NodeId>,
    },

    /// Print the effective configuration
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
