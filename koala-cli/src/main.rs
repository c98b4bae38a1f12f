//! Koala Dialog CLI
//!
//! Builds dialogs from a JSON description inside a blank document, optionally
//! clicks buttons or presses Escape on the topmost dialog, and prints the
//! resulting DOM tree and dialog states. Useful for checking a configuration
//! before shipping it to a page.

mod print;

use anyhow::{Context, Result, bail};
use clap::Parser;
use koala_common::warning::clear_warnings;
use koala_dialog::{Dialog, DialogConfig, DialogState, Environment, Host};
use koala_dom::{Document, Event, KEY_ESCAPE, Viewport, dispatch_event};
use owo_colors::OwoColorize;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "koala-dialog", version, about)]
struct Cli {
    /// JSON file holding one dialog object or an array of them
    config: Option<PathBuf>,

    /// Inline JSON instead of a file
    #[arg(long, conflicts_with = "config")]
    json: Option<String>,

    /// Width of the page body in pixels
    #[arg(long, default_value_t = 1024)]
    viewport_width: u32,

    /// Vertical scroll offset in pixels
    #[arg(long, default_value_t = 0)]
    scroll_top: u32,

    /// Scrollable document width in pixels
    #[arg(long, default_value_t = 1024)]
    scroll_width: u32,

    /// Scrollable document height in pixels
    #[arg(long, default_value_t = 768)]
    scroll_height: u32,

    /// Host identification string, used to decide on the legacy overlay fix
    #[arg(long, default_value = "")]
    user_agent: String,

    /// Pretend the host has no native XML HTTP request object
    #[arg(long)]
    no_xhr: bool,

    /// Click the button with this label on the topmost open dialog (repeatable)
    #[arg(long = "click", value_name = "LABEL")]
    clicks: Vec<String>,

    /// Press Escape on the topmost open dialog this many times, after clicks
    #[arg(long, default_value_t = 0)]
    escape: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    clear_warnings();

    let json = match (&cli.json, &cli.config) {
        (Some(json), _) => json.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        (None, None) => "{}".to_string(),
    };
    let configs = DialogConfig::list_from_json(&json)?;

    let viewport = Viewport {
        client_width: cli.viewport_width,
        scroll_top: cli.scroll_top,
        scroll_width: cli.scroll_width,
        scroll_height: cli.scroll_height,
    };
    let host = Host::new(Document::new(viewport).into_handle())
        .with_environment(Environment::detect(&cli.user_agent, !cli.no_xhr));

    let dialogs = configs
        .into_iter()
        .map(|config| Dialog::new(&host, config.into_options()))
        .collect::<Result<Vec<_>, _>>()?;

    for label in &cli.clicks {
        let Some(dialog) = topmost(&dialogs) else {
            bail!("no open dialog to click {label:?} on");
        };
        let Some(button) = dialog.find_button(label) else {
            bail!(
                "topmost dialog has no {label:?} button (has {:?})",
                dialog.button_labels()
            );
        };
        let _ = dispatch_event(&host.document, &Event::click(button));
    }
    for _ in 0..cli.escape {
        let Some(wrapper) = topmost(&dialogs).and_then(Dialog::nodes).map(|n| n.wrapper) else {
            bail!("no open dialog to press Escape on");
        };
        let _ = dispatch_event(&host.document, &Event::key_down(wrapper, KEY_ESCAPE));
    }

    let document = host.document.borrow();
    println!("{}", "=== DOM Tree ===".bold());
    print::print_tree(document.tree(), document.tree().root(), 0);

    println!("\n{}", "=== Dialogs ===".bold());
    for (index, dialog) in dialogs.iter().enumerate() {
        let state = match dialog.state() {
            DialogState::Open => dialog.state().green().to_string(),
            DialogState::Destroyed => dialog.state().red().to_string(),
            state => state.yellow().to_string(),
        };
        println!(
            "#{index} {state} z-index={} buttons={:?}",
            dialog.z_index(),
            dialog.button_labels()
        );
    }
    if let Some(focused) = document.focused() {
        println!("\nfocus: {}", print::describe(document.tree(), focused));
    }

    Ok(())
}

/// The open dialog with the highest stacking index.
fn topmost(dialogs: &[Dialog]) -> Option<&Dialog> {
    dialogs
        .iter()
        .filter(|d| d.state() == DialogState::Open)
        .max_by_key(|d| d.z_index())
}
