mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use ocean_cleanup::compute::{restart, start_game, tick, FrameInput, GameEvent};
use ocean_cleanup::config::GameConfig;
use ocean_cleanup::leaderboard::{score_seconds, Leaderboard};
use ocean_cleanup::player::MoveInput;
use ocean_cleanup::session::{Session, SessionStatus};

use display::Overlay;

const FRAME: Duration = Duration::from_micros(16_667); // ≈60 FPS

/// Longest step fed to the simulation after a stall.
const MAX_DT: Duration = Duration::from_millis(250);

/// How long the "Stage N Complete" banner holds the game.
const BANNER_TIME: Duration = Duration::from_secs(3);

/// Leaderboard rows shown after a game.
const LEADERBOARD_ROWS: usize = 5;

const MAX_TEAM_NAME: usize = 20;

/// Frames a key stays down after its last press or repeat.  Terminals
/// without release events rely on this; 8 frames is about 133 ms, which
/// outlasts the usual key-repeat gap.
const HOLD_WINDOW: u64 = 8;

#[derive(Parser)]
#[command(name = "ocean_cleanup")]
#[command(about = "Two fish, two colours of trash, one ocean to clean")]
struct Args {
    /// JSON file overriding game parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where finished games are ranked
    #[arg(long, default_value = "leaderboard.json")]
    leaderboard: PathBuf,

    /// Seed for trash and hazard placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here (filtered by RUST_LOG); nothing is logged otherwise
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
}

/// Block for the next key press.  `None` once the input thread has exited,
/// which callers treat as quit.
fn next_press(rx: &mpsc::Receiver<Event>) -> Option<KeyEvent> {
    loop {
        match rx.recv() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => return Some(key),
            Ok(_) => {}
            Err(_) => return None,
        }
    }
}

/// Both fish's direction keys: W A S D for red, arrows for blue.
fn frame_input(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> FrameInput {
    let held = |keys: &[KeyCode]| any_held(key_frame, keys, frame);
    FrameInput {
        players: [
            MoveInput {
                up: held(&[KeyCode::Char('w'), KeyCode::Char('W')]),
                down: held(&[KeyCode::Char('s'), KeyCode::Char('S')]),
                left: held(&[KeyCode::Char('a'), KeyCode::Char('A')]),
                right: held(&[KeyCode::Char('d'), KeyCode::Char('D')]),
            },
            MoveInput {
                up: held(&[KeyCode::Up]),
                down: held(&[KeyCode::Down]),
                left: held(&[KeyCode::Left]),
                right: held(&[KeyCode::Right]),
            },
        ],
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    board: &Leaderboard,
) -> anyhow::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "~  GUARDIANS OF THE OCEAN  ~";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(8),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    for (i, entry) in board.top(3).iter().enumerate() {
        let line = format!("{}. {:<12} {:>8.2}s", i + 1, entry.team, entry.score);
        out.queue(cursor::MoveTo(
            cx.saturating_sub(line.chars().count() as u16 / 2),
            cy.saturating_sub(6) + i as u16,
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&line))?;
    }

    let controls: &[(&str, Color)] = &[
        ("Red fish:  W A S D   collects orange", Color::Red),
        ("Blue fish: arrow keys collects teal", Color::Blue),
        ("Collect matching colored trash!", Color::White),
        ("Avoid wrong colors and obstacles!", Color::White),
        ("SPACE pauses the game", Color::DarkGrey),
    ];
    for (i, (line, color)) in controls.iter().enumerate() {
        out.queue(cursor::MoveTo(cx.saturating_sub(18), cy.saturating_sub(2) + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*line))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(18), cy + 4))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("[ENTER] Play    [Q] Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Wait for Enter or quit.
    while let Some(KeyEvent {
        code, modifiers, ..
    }) = next_press(rx)
    {
        match code {
            KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => {
                return Ok(MenuResult::Start)
            }
            _ if is_quit(code, modifiers) => return Ok(MenuResult::Quit),
            _ => {}
        }
    }
    Ok(MenuResult::Quit)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    Quit,
    Menu,
    Finished(Duration),
}

/// Input model: a `key_frame` map records the frame of the last press/repeat
/// event for every key, so both players can hold keys at the same time.
/// Keys are dropped on release where the terminal reports it, and expire
/// after `HOLD_WINDOW` frames of silence where it doesn't.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> anyhow::Result<LoopExit> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last_tick = Instant::now();
    let mut banner: Option<(String, Instant)> = None;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Input ─────────────────────────────────────────────────────────────
        loop {
            let ev = match rx.try_recv() {
                Ok(ev) => ev,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(LoopExit::Quit),
            };
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    if is_quit(code, modifiers) {
                        return Ok(LoopExit::Quit);
                    }
                    let paused = session.status == SessionStatus::Paused;
                    match code {
                        KeyCode::Char(' ') => session.toggle_pause(),
                        KeyCode::Char('r') | KeyCode::Char('R') if paused => {
                            session.toggle_pause()
                        }
                        KeyCode::Char('n') | KeyCode::Char('N') if paused => {
                            restart(session, rng)?;
                            banner = None;
                        }
                        KeyCode::Char('m') | KeyCode::Char('M') if paused => {
                            return Ok(LoopExit::Menu);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let dt = last_tick.elapsed().min(MAX_DT);
        last_tick = Instant::now();

        // The stage banner freezes play, like the stage-complete screen did.
        if banner.as_ref().is_some_and(|(_, until)| Instant::now() >= *until) {
            banner = None;
        }
        if banner.is_none() {
            let input = frame_input(&key_frame, frame);
            for event in tick(session, &input, dt, rng)? {
                match event {
                    GameEvent::StageAdvanced { stage, .. } => {
                        let text = format!("Stage {} Complete. Onto Stage {}...", stage - 1, stage);
                        banner = Some((text, Instant::now() + BANNER_TIME));
                    }
                    GameEvent::GameComplete { score } => return Ok(LoopExit::Finished(score)),
                    _ => {}
                }
            }
        }

        let overlay = Overlay {
            banner: banner.as_ref().map(|(text, _)| text.as_str()),
        };
        display::render(out, session, &overlay)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── End of game ───────────────────────────────────────────────────────────────

/// Ask for a team name.  `None` means the player quit instead.
fn prompt_team_name<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    score: f64,
) -> anyhow::Result<Option<String>> {
    let mut name = String::new();
    loop {
        display::render_name_prompt(out, score, &name)?;
        let Some(KeyEvent {
            code, modifiers, ..
        }) = next_press(rx)
        else {
            return Ok(None);
        };
        match code {
            KeyCode::Enter => return Ok(Some(name)),
            KeyCode::Backspace => {
                name.pop();
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(None),
            KeyCode::Esc => return Ok(None),
            KeyCode::Char(c) if name.chars().count() < MAX_TEAM_NAME => name.push(c),
            _ => {}
        }
    }
}

/// Returns true if the player quit while entering a name.
fn finish_game<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    board: &mut Leaderboard,
    elapsed: Duration,
) -> anyhow::Result<bool> {
    let score = score_seconds(elapsed);
    let Some(team) = prompt_team_name(out, rx, score)? else {
        return Ok(true);
    };

    let rank = board.record(team, score);
    if let Err(err) = board.save() {
        log::error!("could not save leaderboard {}: {err}", board.path().display());
    }

    let highlight = (rank < LEADERBOARD_ROWS).then_some(rank);
    display::render_leaderboard(out, board.top(LEADERBOARD_ROWS), highlight)?;

    // Any key returns to the menu; a dead input thread ends the program.
    Ok(next_press(rx).is_none())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    // Logging to the terminal would scribble over the game screen.
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    config.validate()?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut board = Leaderboard::load(&args.leaderboard);

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Release events let fish stop the moment a key comes up.  Terminals
    // without the kitty protocol fall back to HOLD_WINDOW.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads happen on their own thread; the frame loop drains the
    // channel without waiting.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, config, &mut board, &mut rng);

    // Restore the terminal whatever `run` returned.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
    board: &mut Leaderboard,
    rng: &mut StdRng,
) -> anyhow::Result<()> {
    loop {
        match show_menu(out, rx, board)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let mut session = start_game(config.clone(), rng)?;
                match game_loop(out, &mut session, rx, rng)? {
                    LoopExit::Quit => break,
                    LoopExit::Menu => {}
                    LoopExit::Finished(elapsed) => {
                        if finish_game(out, rx, board, elapsed)? {
                            break;
                        }
                    }
                }
            }
        }
    }
    Ok(())
}
