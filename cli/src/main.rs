//! Terminal front end for the peg solitaire campaign.
//!
//! Reads one command per line from stdin and redraws the board after each.
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pegjump_core::{Campaign, Catalog, GameError, ProgressStore};

mod command;
mod config;
mod render;
mod store;

use command::{Command, HELP, Step};
use config::CliConfig;
use store::JsonFileStore;

#[derive(Parser, Debug)]
#[command(name = "pegjump", version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML file with economy settings and the save location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where progress is stored (overrides the config file)
    #[arg(short, long)]
    save: Option<PathBuf>,

    /// Level catalog JSON to play instead of the builtin levels
    #[arg(long)]
    catalog: Option<PathBuf>,
}

fn load_catalog(path: Option<&PathBuf>) -> Result<Catalog> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read catalog {}", path.display()))?;
            Catalog::from_json(&json)
                .with_context(|| format!("invalid catalog {}", path.display()))
        }
        None => Catalog::builtin().context("builtin catalog is broken"),
    }
}

fn run<S: ProgressStore>(
    campaign: &mut Campaign<S>,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<()> {
    write!(output, "{}", render::render(&campaign.view()))?;
    writeln!(output, "(type `help` for commands)")?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "! {}", err)?;
                continue;
            }
        };

        match command.apply(campaign) {
            Ok(Step::Quit) => break,
            Ok(Step::Redraw) => {}
            Ok(Step::Unchanged) => {
                writeln!(output, "(nothing to do)")?;
                continue;
            }
            // the campaign rejects it without touching the session feedback
            Err(err @ GameError::LevelNotFound) => {
                writeln!(output, "! {}", err)?;
                continue;
            }
            Err(err) => log::debug!("{:?} rejected: {}", command, err),
        }

        match command {
            Command::Help => writeln!(output, "{}", HELP)?,
            Command::Levels => write!(
                output,
                "{}",
                render::render_levels(campaign.catalog(), campaign.current_index())
            )?,
            _ => write!(output, "{}", render::render(&campaign.view()))?,
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = CliConfig::load(args.config.as_deref())?;
    let save_path = config.resolve_save_path(args.save);
    log::debug!("economy: {:?}, save: {}", config.economy, save_path.display());

    let catalog = load_catalog(args.catalog.as_ref())?;
    log::info!("Loaded {} levels", catalog.len());

    let mut campaign = Campaign::load(catalog, config.economy, JsonFileStore::new(save_path))
        .context("failed to start campaign")?;

    let stdin = io::stdin();
    run(&mut campaign, stdin.lock(), io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pegjump_core::{EconomyConfig, MemoryStore};

    #[test]
    fn args_parse() {
        let args = Args::try_parse_from([
            "pegjump",
            "-v",
            "--save",
            "p.json",
            "--catalog",
            "c.json",
        ])
        .unwrap();
        assert_eq!(args.save, Some(PathBuf::from("p.json")));
        assert_eq!(args.catalog, Some(PathBuf::from("c.json")));
        assert_eq!(args.config, None);
    }

    #[test]
    fn scripted_session() {
        let mut campaign = Campaign::load(
            Catalog::builtin().unwrap(),
            EconomyConfig::default(),
            MemoryStore::new(),
        )
        .unwrap();
        let script = "click 0 1\nclick 2 1\nnext\nlevels\nlevel 99\nbogus\nquit\nnext\n";
        let mut output = Vec::new();

        run(&mut campaign, script.as_bytes(), &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("> Level 1 Complete!"));
        assert!(output.contains("== Level 2: Simple Line (2/6) =="));
        assert!(output.contains("*  2. Level 2: Simple Line\n"));
        assert!(output.contains("! Level not found"));
        assert!(output.contains("! unknown command `bogus`"));
        assert_eq!(campaign.current_index(), 1);
        assert_eq!(campaign.store().saved().unwrap().current_level_index, Some(1));
    }

    #[test]
    fn catalog_file_is_loaded() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("levels.json");
        fs::write(
            &path,
            r#"[{"id": 7, "name": "Tiny", "boardSetup": [[2, 2, 1]], "targetPegsRemaining": 1}]"#,
        )
        .unwrap();

        let catalog = load_catalog(Some(&path)).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).unwrap().title(), "Level 7: Tiny");

        fs::write(&path, "[]").unwrap();
        assert!(load_catalog(Some(&path)).is_err());
    }
}
