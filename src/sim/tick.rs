//! Per-frame simulation tick
//!
//! One call = apply input, advance the projectile one step, resolve any
//! contact with the grid. Motion is per tick, so the caller's frame rate
//! sets the game speed.

use glam::Vec2;

use super::collision::{CollisionOutcome, resolve_collision};
use super::snapshot::RenderSnapshot;
use super::state::{GameEvent, GameState};

/// Aim update from the input source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aim {
    /// Absolute angle (radians)
    Angle(f32),
    /// Pointer position in arena coordinates
    Point(Vec2),
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub aim: Option<Aim>,
    /// Fire trigger (ignored while a projectile is flying)
    pub fire: bool,
    /// New game
    pub reset: bool,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> RenderSnapshot {
    let mut events = Vec::new();

    if input.reset {
        state.reset();
        events.push(GameEvent::Reset);
    }

    match input.aim {
        Some(Aim::Angle(angle)) => state.shooter.aim = angle,
        Some(Aim::Point(target)) => state.shooter.aim_at(target),
        None => {}
    }

    if input.fire {
        match state.shoot() {
            Ok(projectile) => {
                log::debug!(
                    "Shot {:?} at {:.3} rad",
                    projectile.color,
                    state.shooter.aim
                );
                events.push(GameEvent::ShotFired {
                    color: projectile.color,
                    angle: state.shooter.aim,
                });
            }
            Err(e) => {
                log::debug!("Fire ignored: {}", e);
                events.push(GameEvent::ShotRejected);
            }
        }
    }

    state.time_ticks += 1;
    step_projectile(state, &mut events);

    RenderSnapshot::capture(state, events)
}

/// Move the live projectile and settle it if it touched the grid
fn step_projectile(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let Some(mut projectile) = state.projectile else {
        return;
    };

    let bounce = projectile.advance(state.tuning.arena_width);
    if bounce.any() {
        events.push(GameEvent::WallBounce(bounce));
    }

    match resolve_collision(&mut state.grid, &projectile) {
        CollisionOutcome::Miss => {}
        CollisionOutcome::Rejected { contact, reason } => {
            log::debug!("Contact with {:?} rejected: {}", contact, reason);
            events.push(GameEvent::ContactRejected { contact, reason });
        }
        CollisionOutcome::Settled { pos, cell, matched } => {
            log::debug!("Settled {:?} at ({}, {})", cell.color, pos.row, pos.col);
            events.push(GameEvent::Settled { pos, cell });
            if let Some(result) = matched {
                let total = state.add_points(result.points);
                log::debug!(
                    "Cleared {} {:?} balls (+{}, total {})",
                    result.cells.len(),
                    result.color,
                    result.points,
                    total
                );
                events.push(GameEvent::Matched { result, total });
            }
            state.projectile = None;
            return;
        }
    }

    if state.tuning.despawn_below_floor && projectile.below_floor(state.tuning.arena_height) {
        log::debug!("Projectile left the arena at {:?}", projectile.pos);
        events.push(GameEvent::Despawned);
        state.projectile = None;
        return;
    }

    state.projectile = Some(projectile);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::grid::{BallColor, GridPos, canonical_position};
    use crate::sim::projectile::Projectile;
    use crate::sim::state::GamePhase;
    use crate::tuning::Tuning;
    use std::f32::consts::FRAC_PI_2;

    fn fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    fn empty_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.grid.clear();
        state
    }

    #[test]
    fn test_idle_tick_is_quiet() {
        let mut state = GameState::new(1);
        let before = state.grid.clone();
        let snap = tick(&mut state, &TickInput::default());
        assert!(snap.events.is_empty());
        assert_eq!(snap.phase, GamePhase::Idle);
        assert_eq!(state.grid, before);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_fire_moves_projectile_same_tick() {
        let mut state = empty_state(1);
        let snap = tick(&mut state, &fire());
        assert_eq!(snap.phase, GamePhase::Flying);
        let p = snap.projectile.unwrap();
        assert!((p.pos.y - (740.0 - SHOT_SPEED)).abs() < 1e-4);
    }

    #[test]
    fn test_aim_point() {
        let mut state = empty_state(1);
        let input = TickInput {
            aim: Some(Aim::Point(Vec2::new(400.0, 740.0))),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(state.shooter.aim.abs() < 1e-6);
    }

    /// Four reds in row 4 once the fourth lands: +40
    #[test]
    fn test_scenario_row_of_four() {
        let mut state = empty_state(11);
        for col in 0..3 {
            state.grid.place(4, col, BallColor::Red).unwrap();
        }
        // Arriving from below, already within reach of (4, 2)
        state.projectile = Some(Projectile {
            pos: canonical_position(4, 3) + Vec2::new(-3.0, 10.0 + SHOT_SPEED),
            vel: Vec2::new(0.0, -SHOT_SPEED),
            color: BallColor::Red,
        });

        let snap = tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 40);
        assert!(state.grid.is_empty());
        assert!(state.projectile.is_none());
        assert_eq!(snap.matches().count(), 1);
        assert!(snap.events.iter().any(|e| matches!(
            e,
            GameEvent::Settled { pos: GridPos { row: 4, col: 3 }, .. }
        )));
    }

    /// A lonely settle scores nothing and keeps the ball
    #[test]
    fn test_settle_without_match() {
        let mut state = empty_state(11);
        state.grid.place(2, 2, BallColor::Blue).unwrap();
        state.projectile = Some(Projectile {
            pos: canonical_position(3, 2) + Vec2::new(0.0, SHOT_SPEED - 5.0),
            vel: Vec2::new(0.0, -SHOT_SPEED),
            color: BallColor::Green,
        });

        let snap = tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 0);
        assert_eq!(state.grid.len(), 2);
        assert_eq!(snap.matches().count(), 0);
        assert_eq!(snap.phase, GamePhase::Idle);
    }

    /// Straight up into an empty grid: bounces off the ceiling and keeps going
    #[test]
    fn test_scenario_ceiling_bounce() {
        let mut state = empty_state(3);
        let input = TickInput {
            aim: Some(Aim::Angle(-FRAC_PI_2)),
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input);

        let mut bounced = false;
        for _ in 0..200 {
            let snap = tick(&mut state, &TickInput::default());
            if snap
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::WallBounce(b) if b.ceiling))
            {
                bounced = true;
                break;
            }
        }
        assert!(bounced);
        let p = state.projectile.expect("projectile should still be flying");
        assert!(p.vel.y > 0.0);

        // Falls past the shooter and is never despawned
        for _ in 0..200 {
            tick(&mut state, &TickInput::default());
        }
        let p = state.projectile.expect("no floor despawn by default");
        assert!(p.pos.y > ARENA_HEIGHT);
        assert_eq!(state.phase(), GamePhase::Flying);
    }

    #[test]
    fn test_despawn_below_floor_opt_in() {
        let tuning = Tuning {
            despawn_below_floor: true,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(3, tuning);
        state.grid.clear();
        state.projectile = Some(Projectile {
            pos: Vec2::new(300.0, ARENA_HEIGHT + BALL_RADIUS - 1.0),
            vel: Vec2::new(0.0, SHOT_SPEED),
            color: BallColor::Red,
        });

        let snap = tick(&mut state, &TickInput::default());
        assert!(snap.events.contains(&GameEvent::Despawned));
        assert!(state.projectile.is_none());
    }

    /// Firing while a ball is in flight changes nothing
    #[test]
    fn test_scenario_duplicate_fire() {
        let mut state = GameState::new(21);
        tick(&mut state, &fire());
        let grid = state.grid.clone();

        let mut shadow = state.clone();
        let snap = tick(&mut state, &fire());
        tick(&mut shadow, &TickInput::default());

        assert!(snap.events.contains(&GameEvent::ShotRejected));
        assert_eq!(state.projectile, shadow.projectile);
        assert_eq!(state.shooter.loaded, shadow.shooter.loaded);
        assert_eq!(state.grid, grid);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_scenario_reset() {
        let mut state = empty_state(8);
        state.grid.place(6, 1, BallColor::Yellow).unwrap();
        state.score = 90;
        tick(&mut state, &fire());

        let snap = tick(
            &mut state,
            &TickInput {
                reset: true,
                ..Default::default()
            },
        );
        assert_eq!(snap.events.first(), Some(&GameEvent::Reset));
        assert_eq!(state.score, 0);
        assert!(state.projectile.is_none());
        for row in 0..GRID_ROWS as i32 {
            for col in 0..GRID_COLS as i32 {
                let cell = state.grid.cell_at(row, col).unwrap();
                assert_eq!(cell.is_some(), (row as usize) < PREFILLED_ROWS);
            }
        }
    }

    #[test]
    fn test_rejected_contact_keeps_flying() {
        let mut state = empty_state(4);
        state.grid.place(3, 5, BallColor::Red).unwrap();
        // Next step lands right on top of the settled ball
        state.projectile = Some(Projectile {
            pos: canonical_position(3, 5) + Vec2::new(0.0, 15.0),
            vel: Vec2::new(0.0, -SHOT_SPEED),
            color: BallColor::Blue,
        });

        let snap = tick(&mut state, &TickInput::default());
        assert!(snap
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::ContactRejected { .. })));
        assert_eq!(state.grid.len(), 1);
        assert_eq!(state.phase(), GamePhase::Flying);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                aim: Some(Aim::Angle(-1.2)),
                ..Default::default()
            },
            fire(),
            TickInput::default(),
            TickInput {
                aim: Some(Aim::Point(Vec2::new(100.0, 100.0))),
                ..Default::default()
            },
        ];

        for _ in 0..120 {
            for input in &inputs {
                let a = tick(&mut state1, input);
                let b = tick(&mut state2, input);
                assert_eq!(a, b);
            }
        }
        assert_eq!(state1.grid, state2.grid);
        assert_eq!(state1.score, state2.score);
    }
}
