//! Command Line Arguments
//!
//! 命令行即输入表单：原文、总镜头数、各段镜头数、API 键

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::scene::{CutAllocation, Section};

#[derive(Debug, Parser)]
#[command(
    name = "scenecut",
    version,
    about = "Break a novel into a 기/승/전/결 scene-cut table with Gemini"
)]
pub struct Cli {
    /// Configuration file (defaults to ./scenecut.toml if present)
    #[arg(long, global = true, env = "SCENECUT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Keep the API key in memory only; nothing is read from or written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a novel and print the scene-cut table
    Generate(GenerateArgs),
    /// Show how a total is split across the four sections
    Allocate {
        #[command(flatten)]
        allocation: AllocationArgs,
    },
    /// Manage the stored Gemini API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
    /// Print the response schema sent to the model
    Schema,
}

#[derive(Debug, Subcommand)]
pub enum KeyAction {
    /// Store an API key
    Set {
        /// The API key
        key: String,
    },
    /// Remove the stored API key
    Clear,
    /// Show the stored API key (masked)
    Show {
        /// Print the key in full
        #[arg(long)]
        reveal: bool,
    },
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Novel text
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Plain-text (UTF-8) file with the novel; `-` reads stdin
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub allocation: AllocationArgs,

    /// Gemini API key (stored for later runs)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Print a JSON report instead of the table
    #[arg(long)]
    pub json: bool,

    /// Print the outbound prompt and schema without calling the service
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct AllocationArgs {
    /// Total number of cuts
    #[arg(long, short = 't')]
    pub total: Option<u32>,

    /// Cuts for 기 (introduction)
    #[arg(long, allow_negative_numbers = true)]
    pub gi: Option<i64>,

    /// Cuts for 승 (development)
    #[arg(long, allow_negative_numbers = true)]
    pub seung: Option<i64>,

    /// Cuts for 전 (turn/climax)
    #[arg(long, allow_negative_numbers = true)]
    pub jeon: Option<i64>,

    /// Cuts for 결 (conclusion)
    #[arg(long, allow_negative_numbers = true)]
    pub gyeol: Option<i64>,
}

impl AllocationArgs {
    /// 先按总数分配，再依次应用单段编辑
    pub fn build(&self, default_total: u32) -> CutAllocation {
        let mut allocation = CutAllocation::from_total(self.total.unwrap_or(default_total));

        let edits = [
            (Section::Gi, self.gi),
            (Section::Seung, self.seung),
            (Section::Jeon, self.jeon),
            (Section::Gyeol, self.gyeol),
        ];
        for (section, count) in edits {
            if let Some(count) = count {
                allocation.set_count(section, count);
            }
        }

        allocation
    }
}
