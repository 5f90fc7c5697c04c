use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use engine_logging::{engine_info, engine_warn};
use leadgen_core::{update, AppState, Msg, ToastKind};
use leadgen_engine::ReqwestApi;

use super::effects::EffectRunner;
use super::input::{parse_command, Command};
use super::ui;
use crate::config::AppConfig;

const TICK_INTERVAL: Duration = Duration::from_millis(75);

/// Everything the main loop reacts to.
pub enum AppEvent {
    Msg(Msg),
    ToggleHelp,
    Quit,
}

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let api = ReqwestApi::new(config.api_settings())
        .with_context(|| format!("invalid dashboard url {:?}", config.base_url))?;
    engine_info!(
        "Console starting against {} (per_page={})",
        api.base_url(),
        config.per_page
    );

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let mut runner = EffectRunner::new(Arc::new(api), event_tx.clone());

    // Background tick drives timers, debounce and animation.
    let tick_tx = event_tx.clone();
    thread::spawn(move || {
        while tick_tx
            .send(AppEvent::Msg(Msg::Tick { now: Instant::now() }))
            .is_ok()
        {
            thread::sleep(TICK_INTERVAL);
        }
    });

    let input_tx = event_tx;
    thread::spawn(move || read_commands(input_tx));

    let mut state = AppState::new().with_per_page(config.per_page);
    let mut show_help = false;
    let mut stdout = io::stdout();

    let (next, effects) = update(state, Msg::Started);
    state = next;
    runner.enqueue(effects);
    draw(&mut stdout, &mut state, show_help)?;

    for event in event_rx {
        let mut force_draw = false;
        match event {
            AppEvent::Msg(msg) => {
                let (next, effects) = update(state, msg);
                state = next;
                runner.enqueue(effects);
            }
            AppEvent::ToggleHelp => {
                show_help = !show_help;
                force_draw = true;
            }
            AppEvent::Quit => break,
        }
        if state.consume_dirty() || force_draw {
            draw(&mut stdout, &mut state, show_help)?;
        }
    }

    engine_info!("Console shutting down");
    runner.shutdown();
    Ok(())
}

fn draw(stdout: &mut io::Stdout, state: &mut AppState, show_help: bool) -> anyhow::Result<()> {
    state.consume_dirty();
    let screen = ui::render::render(&state.view(), show_help);
    let mut out = stdout.lock();
    write!(out, "{}{}", ui::constants::CLEAR_SCREEN, screen).context("writing to terminal")?;
    out.flush().context("flushing terminal")?;
    Ok(())
}

fn read_commands(events: mpsc::Sender<AppEvent>) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                engine_warn!("Reading stdin failed: {}", err);
                break;
            }
        };
        let event = match parse_command(&line, Instant::now()) {
            Ok(Command::Msg(msg)) => AppEvent::Msg(msg),
            Ok(Command::Help) => AppEvent::ToggleHelp,
            Ok(Command::Quit) => AppEvent::Quit,
            Ok(Command::Nothing) => continue,
            Err(err) => AppEvent::Msg(Msg::Notice {
                message: err.to_string(),
                kind: ToastKind::Error,
            }),
        };
        let quitting = matches!(event, AppEvent::Quit);
        if events.send(event).is_err() || quitting {
            return;
        }
    }
    let _ = events.send(AppEvent::Quit);
}
