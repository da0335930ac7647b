/// Game rules.
///
/// `start_game` builds a fresh `Session`; `tick` advances it by one frame.
/// Every rule takes the session by `&mut` and reports what happened as
/// `GameEvent`s.  All randomness comes through the injected RNG so tests can
/// drive the simulation with a seeded generator.

use std::time::Duration;

use rand::Rng;

use crate::collision::mask_collision;
use crate::config::{GameConfig, ALGAE_STAGE};
use crate::entities::{Algae, Rect, Rock, TrashColor};
use crate::error::{GameError, PlacementError};
use crate::level::{next_after, Advance, Level};
use crate::placement::place;
use crate::player::{MoveInput, Player, WrongTrashContact};
use crate::session::{Session, SessionStatus};

/// Input for both fish for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub players: [MoveInput; 2],
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    CountdownFinished,
    /// `player` touched the other colour; `added` pieces of its own colour
    /// were dropped into the field.
    PenaltyTrash {
        player: usize,
        color: TrashColor,
        added: u32,
    },
    Immobilized { player: usize },
    Recovered { player: usize },
    TrashCollected { player: usize, color: TrashColor },
    LevelAdvanced { stage: u32, level: u32 },
    StageAdvanced {
        stage: u32,
        rocks: usize,
        algae: usize,
    },
    GameComplete { score: Duration },
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a new session at stage 1, level 1, counting down to play.
pub fn start_game<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Session, GameError> {
    config.validate()?;

    let spawn = |i: usize, target: TrashColor| {
        let (x, y) = config.spawn_point(i);
        Player::new(x, y, config.player_size, target, config.player_speed)
    };
    let players = [spawn(0, TrashColor::Orange), spawn(1, TrashColor::Teal)];

    let mut occupied: Vec<Rect> = players.iter().map(|p| p.rect).collect();
    let level = Level::generate(1, 1, &config, &mut occupied, rng)?;

    log::info!(
        "new game: {}x{} field, {} trash",
        config.width,
        config.height,
        level.trash.len()
    );

    Ok(Session {
        status: SessionStatus::Countdown {
            remaining: config.countdown(),
        },
        players,
        level,
        rocks: Vec::new(),
        algae: Vec::new(),
        elapsed: Duration::ZERO,
        config,
    })
}

/// Throw away the current game and start over with the same config.
pub fn restart<R: Rng + ?Sized>(session: &mut Session, rng: &mut R) -> Result<(), GameError> {
    *session = start_game(session.config.clone(), rng)?;
    Ok(())
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the session by one frame of `dt`.
///
/// Only `Running` frames move the match clock and run the rules, so time
/// spent paused or counting down never counts against the players.
pub fn tick<R: Rng + ?Sized>(
    session: &mut Session,
    input: &FrameInput,
    dt: Duration,
    rng: &mut R,
) -> Result<Vec<GameEvent>, GameError> {
    let mut events = Vec::new();

    match session.status {
        SessionStatus::Countdown { remaining } => {
            let remaining = remaining.saturating_sub(dt);
            if remaining.is_zero() {
                session.status = SessionStatus::Running;
                events.push(GameEvent::CountdownFinished);
            } else {
                session.status = SessionStatus::Countdown { remaining };
            }
            return Ok(events);
        }
        SessionStatus::Paused | SessionStatus::Complete { .. } => return Ok(events),
        SessionStatus::Running => {}
    }

    session.elapsed += dt;

    // ── 1. Movement ──────────────────────────────────────────────────────────
    move_players(session, input, &mut events);

    // Pieces dropped this frame are not tested until the next one.
    let snapshot = session.level.trash.len();

    // ── 2. Rules ─────────────────────────────────────────────────────────────
    check_wrong_trash(session, snapshot, rng, &mut events)?;
    if session.stage() == ALGAE_STAGE {
        check_algae(session, &mut events);
    }
    if check_collections(session, snapshot, &mut events) {
        advance_level(session, rng, &mut events)?;
    }

    Ok(events)
}

fn move_players(session: &mut Session, input: &FrameInput, events: &mut Vec<GameEvent>) {
    let now = session.elapsed;
    let lock = session.config.immobilize_duration();
    let field = session.field();
    for (i, player) in session.players.iter_mut().enumerate() {
        if player.try_recover(now, lock) {
            log::debug!("player {} can move again", i + 1);
            events.push(GameEvent::Recovered { player: i });
        }
        player.step(input.players[i], field, &session.rocks);
    }
}

/// Penalise the first frame of contact with the other team's trash by
/// dropping more of the toucher's own colour into the field.
pub fn check_wrong_trash<R: Rng + ?Sized>(
    session: &mut Session,
    snapshot: usize,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Result<(), PlacementError> {
    let touching: Vec<bool> = session
        .players
        .iter()
        .map(|p| {
            session.level.trash[..snapshot]
                .iter()
                .any(|t| !t.collected && t.color != p.target && mask_collision(p, t))
        })
        .collect();

    for (i, now_touching) in touching.into_iter().enumerate() {
        let contact = if now_touching {
            WrongTrashContact::Touching
        } else {
            WrongTrashContact::NotTouching
        };
        let rising = now_touching && session.players[i].contact == WrongTrashContact::NotTouching;
        if !rising {
            session.players[i].contact = contact;
            continue;
        }

        // The contact edge is only consumed once the penalty is in place.
        let color = session.players[i].target;
        let mut occupied = session.occupied_rects();
        session.level.add_trash(
            color,
            session.config.penalty_trash,
            &session.config,
            &mut occupied,
            rng,
        )?;
        session.players[i].contact = contact;
        log::debug!(
            "player {} touched wrong trash: +{} {}",
            i + 1,
            session.config.penalty_trash,
            color.name()
        );
        events.push(GameEvent::PenaltyTrash {
            player: i,
            color,
            added: session.config.penalty_trash,
        });
    }
    Ok(())
}

/// Algae freezes whoever touches it and is used up.
pub fn check_algae(session: &mut Session, events: &mut Vec<GameEvent>) {
    let now = session.elapsed;
    for i in 0..session.players.len() {
        let player = &session.players[i];
        let mut hit = false;
        session.algae.retain(|algae| {
            let touching = mask_collision(player, algae);
            hit |= touching;
            !touching
        });
        if hit {
            session.players[i].immobilize(now);
            log::debug!("player {} caught in algae", i + 1);
            events.push(GameEvent::Immobilized { player: i });
        }
    }
}

/// Mark trash collected by its own team.  Returns true once every piece in
/// the level, penalty pieces included, has been collected.
pub fn check_collections(
    session: &mut Session,
    snapshot: usize,
    events: &mut Vec<GameEvent>,
) -> bool {
    for trash in session.level.trash[..snapshot]
        .iter_mut()
        .filter(|t| !t.collected)
    {
        let collector = session
            .players
            .iter()
            .position(|p| p.target == trash.color && mask_collision(p, &*trash));
        if let Some(player) = collector {
            trash.collected = true;
            log::debug!("player {} collected {}", player + 1, trash.color.name());
            events.push(GameEvent::TrashCollected {
                player,
                color: trash.color,
            });
        }
    }
    session.level.all_collected()
}

/// Move on from a cleared level: next level, next stage (with its
/// hazards), or the end of the game.
pub fn advance_level<R: Rng + ?Sized>(
    session: &mut Session,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Result<(), PlacementError> {
    let advance = next_after(session.stage(), session.level_number(), &session.config);

    let (stage, number) = match advance {
        Advance::GameComplete => {
            let score = session.elapsed;
            session.status = SessionStatus::Complete { score };
            log::info!("all stages cleared in {:.2}s", score.as_secs_f64());
            events.push(GameEvent::GameComplete { score });
            return Ok(());
        }
        Advance::NextLevel { stage, level } => (stage, level),
        Advance::NextStage { stage, .. } => (stage, 1),
    };

    // The old level's trash goes away before anything new is placed.
    session.level.trash.clear();
    let mut occupied = session.occupied_rects();
    let config = &session.config;

    if let Advance::NextStage {
        spawn_rocks,
        spawn_algae,
        ..
    } = advance
    {
        if spawn_rocks {
            session.rocks =
                spawn_hazards(config.rocks_per_stage, config, &mut occupied, rng, Rock::new)?;
        }
        if spawn_algae {
            session.algae =
                spawn_hazards(config.algae_per_stage, config, &mut occupied, rng, Algae::new)?;
        }
    }

    session.level = Level::generate(stage, number, config, &mut occupied, rng)?;

    if number == 1 {
        log::info!(
            "stage {stage}: {} rocks, {} algae",
            session.rocks.len(),
            session.algae.len()
        );
        events.push(GameEvent::StageAdvanced {
            stage,
            rocks: session.rocks.len(),
            algae: session.algae.len(),
        });
    } else {
        log::info!("stage {stage} level {number}");
        events.push(GameEvent::LevelAdvanced {
            stage,
            level: number,
        });
    }
    Ok(())
}

fn spawn_hazards<T, R: Rng + ?Sized>(
    count: u32,
    config: &GameConfig,
    occupied: &mut Vec<Rect>,
    rng: &mut R,
    make: fn(i32, i32, i32) -> T,
) -> Result<Vec<T>, PlacementError> {
    let field = Rect::new(0, 0, config.width, config.height);
    let mut out = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let spot = place(
            rng,
            config.tile_size,
            field,
            occupied,
            config.max_placement_attempts,
        )?;
        occupied.push(spot);
        out.push(make(spot.x, spot.y, config.tile_size));
    }
    Ok(out)
}
