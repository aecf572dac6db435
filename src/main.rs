// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Nestdraw CLI entrypoint.
//!
//! By default this runs the interactive TUI on a document file. Use `--mcp` to serve the same
//! editor over MCP on stdio instead (intended for tool integrations).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use nestdraw::config::Config;
use nestdraw::editor::Editor;
use nestdraw::logging::{self, LogTarget};
use nestdraw::store::{GraphFile, WriteDurability};

#[derive(Debug, Parser)]
#[command(name = "nestdraw", version, about = "Edit diagrams whose nodes contain diagrams")]
struct Cli {
    /// Document to open (defaults to the configured file, `graph-data.json`)
    file: Option<PathBuf>,

    /// Serve MCP over stdio instead of running the terminal UI
    #[arg(long)]
    mcp: bool,

    /// Config file (defaults to `<config dir>/nestdraw/config.toml`)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Fsync documents and their directory on every save
    #[arg(long)]
    durable_writes: bool,

    /// Append log lines to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("nestdraw: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let log_file = cli.log_file.or(config.log_file);
    let target = match (cli.mcp, log_file) {
        (_, Some(path)) => LogTarget::File(path),
        (true, None) => LogTarget::Stderr,
        (false, None) => LogTarget::Off,
    };
    logging::init(&target, &config.log_filter)?;

    let durability = if cli.durable_writes { WriteDurability::Durable } else { config.durability };
    let file = GraphFile::new(cli.file.unwrap_or(config.file)).with_durability(durability);
    let mut editor = Editor::new(file).with_new_node_font_size(config.font_size);
    let opened = editor.open().context("Failed to open document")?;
    info!(path = %editor.file().path().display(), opened, mcp = cli.mcp, "starting");

    if cli.mcp {
        let mcp = nestdraw::mcp::NestdrawMcp::new(editor);
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        runtime
            .block_on(mcp.serve_stdio())
            .map_err(|err| anyhow::anyhow!("MCP server failed: {err}"))?;
        return Ok(());
    }

    nestdraw::tui::run(editor).context("Terminal UI failed")
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn parses_empty_args() {
        let cli = Cli::try_parse_from(["nestdraw"]).expect("parse");
        assert_eq!(cli.file, None);
        assert!(!cli.mcp);
        assert!(!cli.durable_writes);
    }

    #[test]
    fn parses_file_and_flags() {
        let cli = Cli::try_parse_from([
            "nestdraw",
            "map.json",
            "--mcp",
            "--durable-writes",
            "--log-file",
            "nestdraw.log",
        ])
        .expect("parse");
        assert_eq!(cli.file, Some(PathBuf::from("map.json")));
        assert!(cli.mcp);
        assert!(cli.durable_writes);
        assert_eq!(cli.log_file, Some(PathBuf::from("nestdraw.log")));
    }

    #[test]
    fn rejects_unknown_flags_and_second_file() {
        assert!(Cli::try_parse_from(["nestdraw", "--demo"]).is_err());
        assert!(Cli::try_parse_from(["nestdraw", "a.json", "b.json"]).is_err());
    }
}
