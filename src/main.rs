//! Terminal bomber runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from the term crate.
//! Settings come from `BOMBER_SEED`, `BOMBER_LEADERBOARD_PATH` and
//! `BOMBER_EVENT_LOG`.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use tui_bomber::core::{GameEvent, GameState, LeaderboardEntry, Phase};
use tui_bomber::input::{handle_key_event, should_quit, NameEntry, NameEntryOutcome};
use tui_bomber::term::{FrameBuffer, GameView, Screen, TerminalRenderer, Viewport};
use tui_bomber::types::GameAction;
use tui_bomber::{Config, EventLog, JsonFileStore, Session};

/// Fixed timestep of the frame loop
const FRAME_MS: u32 = 16;

fn main() -> Result<()> {
    let config = Config::from_env();
    eprintln!(
        "[Bomber] seed {} leaderboard {}",
        config.seed,
        config.leaderboard_path.display()
    );

    let store = JsonFileStore::new(&config.leaderboard_path);
    let mut session = Session::new(GameState::new(config.seed), store);
    if let Some(path) = &config.event_log_path {
        match EventLog::append_to(path) {
            Ok(log) => session = session.with_event_log(log),
            Err(e) => eprintln!("[Bomber] event log disabled: {:#}", e),
        }
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let mut warnings = Vec::new();
    let result = run(&mut term, &mut session, &mut warnings);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = session.flush_log() {
        eprintln!("[Bomber] event log flush failed: {:#}", e);
    }
    for warning in warnings {
        eprintln!("[Leaderboard] {}", warning);
    }
    result
}

fn run(
    term: &mut TerminalRenderer,
    session: &mut Session<JsonFileStore>,
    warnings: &mut Vec<String>,
) -> Result<()> {
    let view = GameView::new();
    let mut fb = FrameBuffer::new(1, 1);
    let mut name_entry: Option<NameEntry> = None;

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(u64::from(FRAME_MS));

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let snapshot = session.game().snapshot();
        let ranked: Vec<&LeaderboardEntry> = session.game().leaderboard().ranked();
        let typed = name_entry.as_ref().map(NameEntry::as_string);
        let screen = Screen {
            phase: session.game().phase(),
            snapshot: snapshot.as_ref(),
            leaderboard: &ranked,
            name_entry: typed.as_deref(),
        };
        view.render_into(&screen, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if is_interrupt(key) {
                        return Ok(());
                    }
                    if let Some(entry) = name_entry.as_mut() {
                        match entry.handle_key_press(key.code) {
                            NameEntryOutcome::Editing => {}
                            NameEntryOutcome::Submitted(name) => {
                                if let Err(e) = session.submit_name(&name) {
                                    warnings.push(format!("save failed: {:#}", e));
                                }
                                session.quit_match();
                                name_entry = None;
                            }
                            NameEntryOutcome::Cancelled => {
                                session.quit_match();
                                name_entry = None;
                            }
                        }
                    } else if should_quit(key) {
                        return Ok(());
                    } else if let Some(action) = handle_key_event(key) {
                        // Leaving a cleared level goes through the name prompt
                        if action == GameAction::Quit && session.can_record_score() {
                            name_entry = Some(NameEntry::new());
                        } else {
                            session.handle_action(action)?;
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(FRAME_MS);
        }

        for event in session.drain_outbox() {
            if event == GameEvent::GameOver && session.game().phase() == Phase::GameOver {
                name_entry = Some(NameEntry::new());
            }
        }
    }
}

fn is_interrupt(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
