//! Command line front end for theme-changer catalogs.
//!
//! `themectl` works against the same registry and controller the browser
//! uses, with a [`FileStore`] standing in for `localStorage` and a headless
//! document standing in for the page:
//!
//! ```text
//! themectl list                 # themes in picker order, active one marked
//! themectl css dark             # the :root block a theme applies
//! themectl select dark          # apply and persist
//! themectl current              # what a page load would pick
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use console::Style;
use theme_changer::dom::{MemoryDocument, MemoryElement};
use theme_changer::storage::FileStore;
use theme_changer::{ThemeController, ThemeControllerOptions, ThemeRegistry};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

/// Default preference file, relative to the working directory.
pub const DEFAULT_STORE: &str = "theme-prefs.json";

type CliController = ThemeController<MemoryDocument, FileStore>;

#[derive(Debug, Parser)]
#[command(name = "themectl", version, about = "Inspect and select page themes")]
pub struct Cli {
    /// Theme catalog (YAML or JSON). Uses the built-in themes when omitted.
    #[arg(long, global = true, env = "THEMECTL_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Preference file holding the selected theme.
    #[arg(long, global = true, env = "THEMECTL_STORE", default_value = DEFAULT_STORE)]
    pub store: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List themes in picker order.
    List,
    /// Print the stylesheet block a theme applies.
    Css {
        /// Theme key.
        key: String,
    },
    /// Apply a theme and persist it.
    Select {
        /// Theme key.
        key: String,
    },
    /// Show the theme a page load would restore.
    Current,
}

fn load_registry(catalog: Option<&PathBuf>) -> Result<ThemeRegistry> {
    match catalog {
        Some(path) => {
            debug!(path = %path.display(), "loading theme catalog");
            ThemeRegistry::from_path(path)
                .with_context(|| format!("loading catalog {}", path.display()))
        }
        None => {
            debug!("using built-in themes");
            Ok(ThemeRegistry::builtin())
        }
    }
}

fn controller(cli: &Cli) -> Result<CliController> {
    debug!(store = %cli.store.display(), "opening preference store");
    let registry = load_registry(cli.catalog.as_ref())?;
    let mut controller = ThemeController::new(
        registry,
        MemoryDocument::with_elements(["body"]),
        FileStore::new(&cli.store),
    );
    controller.configure(ThemeControllerOptions::new(MemoryElement::new("body")).use_local(true));
    controller.on_load()?;
    Ok(controller)
}

/// Runs a parsed command, writing its output to `out`.
pub fn execute(cli: &Cli, out: &mut impl Write) -> Result<()> {
    match &cli.command {
        Command::List => list(cli, out),
        Command::Css { key } => css(cli, key, out),
        Command::Select { key } => select(cli, key, out),
        Command::Current => current(cli, out),
    }
}

fn list(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let controller = controller(cli)?;
    let registry = controller.registry();
    let active = controller.current_key();
    let width = registry.keys().map(|key| key.width()).max().unwrap_or(0);
    let highlight = Style::new().green().bold();

    for theme in registry.list() {
        let is_active = Some(theme.key()) == active;
        let marker = if is_active { "*" } else { " " };
        let padding = " ".repeat(width - theme.key().width());
        let detail = match theme.css() {
            None => "follows OS".to_string(),
            Some(vars) => format!("{} properties", vars.len()),
        };
        let line = format!("{marker} {}{padding}  {} ({detail})", theme.key(), theme.name());
        if is_active {
            writeln!(out, "{}", highlight.apply_to(line))?;
        } else {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

fn css(cli: &Cli, key: &str, out: &mut impl Write) -> Result<()> {
    let registry = load_registry(cli.catalog.as_ref())?;
    let theme = registry.get(key)?;
    match theme.stylesheet() {
        Some(sheet) => writeln!(out, "{sheet}")?,
        None => writeln!(out, "/* {} follows the OS color scheme */", theme.key())?,
    }
    Ok(())
}

fn select(cli: &Cli, key: &str, out: &mut impl Write) -> Result<()> {
    let mut controller = controller(cli)?;
    controller.select(key)?;
    if controller.is_persistence_degraded() {
        bail!(
            "theme '{key}' applied but could not be saved to {}",
            cli.store.display()
        );
    }
    let name = controller
        .current_theme()
        .map(|theme| theme.name().to_string())
        .unwrap_or_default();
    writeln!(out, "Selected {key} ({name})")?;
    Ok(())
}

fn current(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let controller = controller(cli)?;
    let Some(theme) = controller.current_theme() else {
        bail!("no theme selected");
    };
    let mode = controller
        .color_mode()
        .map(|mode| mode.as_str())
        .unwrap_or("unknown");
    writeln!(out, "{} ({}), color mode: {mode}", theme.key(), theme.name())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> Result<String> {
        console::set_colors_enabled(false);
        let cli = Cli::try_parse_from(std::iter::once("themectl").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        execute(&cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_list_marks_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("prefs.json");
        let output = run(&["list", "--store", store.to_str().unwrap()]).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("* os"));
        assert!(lines[0].contains("follows OS"));
        assert!(lines[2].starts_with("  dark"));
        assert!(lines[2].contains("5 properties"));
    }

    #[test]
    fn test_select_then_current() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("prefs.json");
        let store = store.to_str().unwrap();

        let output = run(&["select", "dark", "--store", store]).unwrap();
        assert_eq!(output, "Selected dark (Dark)\n");

        let output = run(&["current", "--store", store]).unwrap();
        assert_eq!(output, "dark (Dark), color mode: dark\n");

        let output = run(&["list", "--store", store]).unwrap();
        assert!(output.lines().any(|line| line.starts_with("* dark")));
    }

    #[test]
    fn test_select_unknown_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("prefs.json");
        let err = run(&["select", "sepia", "--store", store.to_str().unwrap()]).unwrap_err();
        assert!(err.to_string().contains("unknown theme 'sepia'"));
        assert!(!store.exists());
    }

    #[test]
    fn test_css_output() {
        let output = run(&["css", "os"]).unwrap();
        assert_eq!(output, "/* os follows the OS color scheme */\n");

        let output = run(&["css", "light"]).unwrap();
        assert!(output.starts_with(":root {\n  color-scheme: light;\n"));
    }

    #[test]
    fn test_custom_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join("themes.yaml");
        std::fs::write(
            &catalog,
            "themes:\n  - key: paper\n    name: Paper\n    css: [[\"--bg\", \"#fdfdf8\"]]\n",
        )
        .unwrap();
        let store = dir.path().join("prefs.json");

        let output = run(&[
            "list",
            "--catalog",
            catalog.to_str().unwrap(),
            "--store",
            store.to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(output, "* paper  Paper (1 properties)\n");
    }
}
