//! # Folio CLI
//!
//! Headless simulator for the folio-motion choreography engine.
//!
//! Mounts a page, drives it with a fixed-step frame loop and prints a JSON
//! report of what the view layer would have seen.
//!
//! ## Commands
//! - `navigate`: Run a section transition, optionally interrupted by a second one
//! - `overlay`: Open a work card (or project modal) and close it again
//! - `config`: Print the effective configuration

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use folio_motion::{BoundingBox, MotionConfig, Page, PageContent, Property};
use serde::Serialize;
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Simulate section transitions and overlay morphs frame by frame")]
#[command(version)]
struct Cli {
    /// JSON configuration file; missing fields fall back to defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Navigate between two sections
    Navigate {
        /// Section the page rests on before navigating
        #[arg(long, default_value_t = 0)]
        from: usize,

        /// Section to navigate to
        #[arg(long)]
        to: usize,

        /// Seconds into the transition at which a second navigation starts
        #[arg(long, requires = "then")]
        interrupt_at: Option<f64>,

        /// Target of the interrupting navigation
        #[arg(long, requires = "interrupt_at")]
        then: Option<usize>,

        /// Simulation frame rate
        #[arg(long, default_value_t = 60)]
        fps: u32,

        /// Include per-frame container opacities in the report
        #[arg(long)]
        frames: bool,
    },

    /// Open a work card overlay and close it again
    Overlay {
        /// Index of the work card to open
        #[arg(long, default_value_t = 0)]
        card: usize,

        /// Use the project modal instead of the plain card overlay
        #[arg(long)]
        modal: bool,

        /// Seconds after opening at which close is requested
        #[arg(long, default_value_t = 2.0)]
        close_at: f64,

        /// Simulation frame rate
        #[arg(long, default_value_t = 60)]
        fps: u32,
    },

    /// Print the effective configuration as JSON
    Config,
}

fn init_logging(verbose: u8, json: bool) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<MotionConfig> {
    match path {
        Some(path) => MotionConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(MotionConfig::default()),
    }
}

fn frame_step(fps: u32) -> Result<f64> {
    if fps == 0 {
        bail!("--fps must be greater than zero");
    }
    Ok(1.0 / fps as f64)
}

#[derive(Serialize)]
struct FrameSample {
    time: f64,
    opacities: Vec<f32>,
}

#[derive(Serialize)]
struct SectionState {
    name: &'static str,
    opacity: f32,
}

#[derive(Serialize)]
struct NavigationReport {
    from: usize,
    to: usize,
    interrupted_by: Option<usize>,
    completed_at: Option<f64>,
    current_section: usize,
    sections: Vec<SectionState>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    frames: Vec<FrameSample>,
}

#[derive(Serialize)]
struct OverlayReport {
    card: usize,
    variant: &'static str,
    source: BoundingBox,
    phases: Vec<PhaseChange>,
    closed_at: Option<f64>,
    final_geometry: Option<BoundingBox>,
    scroll_locked: bool,
}

#[derive(Serialize)]
struct PhaseChange {
    time: f64,
    phase: &'static str,
}

fn root_opacities(page: &Page) -> Vec<f32> {
    page.elements()
        .roots()
        .iter()
        .map(|root| {
            root.and_then(|id| page.stage.get(id, Property::Opacity))
                .unwrap_or(0.0)
        })
        .collect()
}

/// Ticks until the page has no transition left, capped at `limit` seconds.
fn settle(page: &mut Page, dt: f64, limit: f64) {
    let mut elapsed = 0.0;
    while page.orchestrator.is_transitioning() && elapsed < limit {
        page.frame(dt);
        elapsed += dt;
    }
}

fn navigate(
    mut page: Page,
    from: usize,
    to: usize,
    interrupt: Option<(f64, usize)>,
    dt: f64,
    record_frames: bool,
) -> Result<NavigationReport> {
    let count = page.orchestrator.section_count();
    for index in [Some(from), Some(to), interrupt.map(|(_, then)| then)]
        .into_iter()
        .flatten()
    {
        if index >= count {
            bail!("section {index} out of range, page has {count} sections");
        }
    }

    if from != page.current_section() {
        debug!(from, "moving page to starting section");
        page.go_to(from);
        settle(&mut page, dt, 30.0);
    }

    let mut frames = Vec::new();
    let mut handle = page.go_to(to);
    if handle.is_none() {
        info!(from, to, "navigation is a no-op");
    }
    let mut pending_interrupt = interrupt;

    let mut elapsed = 0.0;
    let mut completed_at = None;
    let limit = 60.0;
    while elapsed < limit {
        if let Some((at, then)) = pending_interrupt {
            if elapsed >= at {
                pending_interrupt = None;
                // the view layer still reports the section it rests on
                info!(at, then, "interrupting transition");
                handle = page.go_to(then);
            }
        }

        page.frame(dt);
        elapsed += dt;
        if record_frames {
            frames.push(FrameSample {
                time: elapsed,
                opacities: root_opacities(&page),
            });
        }

        if let Some(h) = &handle {
            if h.is_complete() && completed_at.is_none() {
                completed_at = Some(elapsed);
            }
        }
        if pending_interrupt.is_none() && !page.orchestrator.is_transitioning() {
            break;
        }
    }

    let sections = root_opacities(&page)
        .into_iter()
        .enumerate()
        .map(|(index, opacity)| SectionState {
            name: page.orchestrator.section_name(index).unwrap_or("unknown"),
            opacity,
        })
        .collect();

    Ok(NavigationReport {
        from,
        to,
        interrupted_by: interrupt.map(|(_, then)| then),
        completed_at,
        current_section: page.current_section(),
        sections,
        frames,
    })
}

fn overlay(mut page: Page, card: usize, modal: bool, close_at: f64, dt: f64) -> Result<OverlayReport> {
    let source = page
        .card_box(card)
        .with_context(|| format!("no work card {card}, page has {}", page.card_count()))?;

    let opened = if modal {
        page.open_project(card)
    } else {
        page.open_work_card(card)
    };
    if !opened {
        bail!("overlay refused to open");
    }

    let closed_at = Rc::new(Cell::new(None));
    let mut phases = Vec::new();
    let mut last_phase = "";
    let mut close_requested = false;
    let mut elapsed = 0.0;

    while elapsed < close_at + 30.0 {
        if !close_requested && elapsed >= close_at {
            close_requested = true;
            let closed_at = closed_at.clone();
            let time = elapsed;
            page.close_overlays(move || closed_at.set(Some(time)));
        }

        page.frame(dt);
        elapsed += dt;

        let controller = if modal {
            &page.project_modal
        } else {
            &page.work_overlay
        };
        let phase = controller.phase().name();
        if phase != last_phase {
            phases.push(PhaseChange {
                time: elapsed,
                phase,
            });
            last_phase = phase;
        }
        if close_requested && !controller.is_open() {
            break;
        }
    }

    let controller = if modal {
        &page.project_modal
    } else {
        &page.work_overlay
    };
    Ok(OverlayReport {
        card,
        variant: if modal { "project_modal" } else { "work_card" },
        source,
        phases,
        closed_at: closed_at.get(),
        final_geometry: controller.geometry(&page.stage),
        scroll_locked: page.stage.scroll_lock().is_locked(),
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize report")?;
    println!("{json}");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Navigate {
            from,
            to,
            interrupt_at,
            then,
            fps,
            frames,
        } => {
            let dt = frame_step(fps)?;
            let page = Page::mount(config, PageContent::default()).context("failed to mount page")?;
            let interrupt = interrupt_at.zip(then);
            let report = navigate(page, from, to, interrupt, dt, frames)?;
            print_json(&report)
        }
        Commands::Overlay {
            card,
            modal,
            close_at,
            fps,
        } => {
            let dt = frame_step(fps)?;
            let page = Page::mount(config, PageContent::default()).context("failed to mount page")?;
            let report = overlay(page, card, modal, close_at, dt)?;
            print_json(&report)
        }
        Commands::Config => print_json(&config),
    }
}
