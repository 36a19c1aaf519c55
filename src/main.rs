//! Bubble Pop entry point
//!
//! Native: headless demo that plays itself and reports scores.
//! Usage: `bubble-pop [seed] [ticks]`
//!
//! Web builds start from `web::start` and are driven by the page.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use bubble_pop::sim::{Aim, GamePhase, GameState, TickInput, tick};
    use bubble_pop::{JsonFileScoreStore, MemoryScoreStore, ScoreReporter, ScoreStore, Settings};
    use rand::seq::IteratorRandom;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Give up on a shot that has been flying this long
    const MAX_FLIGHT_TICKS: u32 = 600;
    const DEFAULT_TICKS: u64 = 20_000;

    #[derive(Debug, Default)]
    struct Stats {
        shots: u32,
        matches: u32,
        lost_shots: u32,
        boards_cleared: u32,
    }

    pub fn run(settings: Settings, seed: Option<u64>, ticks: Option<u64>) {
        let seed = seed.or(settings.seed).unwrap_or_else(seed_from_clock);
        let ticks = ticks.unwrap_or(DEFAULT_TICKS);

        match settings.score_file.as_deref() {
            Some(path) => play(&settings, seed, ticks, JsonFileScoreStore::new(path)),
            None => play(&settings, seed, ticks, MemoryScoreStore::new()),
        }
    }

    fn play<S: ScoreStore>(settings: &Settings, seed: u64, ticks: u64, store: S) {
        let mut state = GameState::with_tuning(seed, settings.tuning);
        let mut reporter = ScoreReporter::new(store);
        reporter.refresh();

        // Separate stream so the player never perturbs the board RNG
        let mut aim_rng = Pcg32::seed_from_u64(seed.wrapping_add(1));
        let mut stats = Stats::default();
        let mut flight_ticks = 0u32;

        for _ in 0..ticks {
            let mut input = TickInput::default();

            match state.phase() {
                GamePhase::Idle => {
                    if state.grid.is_empty() {
                        log::info!("Board cleared at score {}", state.score);
                        stats.boards_cleared += 1;
                        input.reset = true;
                    } else {
                        input.aim = pick_target(&state, &mut aim_rng).map(Aim::Point);
                        input.fire = true;
                        stats.shots += 1;
                    }
                    flight_ticks = 0;
                }
                GamePhase::Flying => {
                    flight_ticks += 1;
                    if flight_ticks > MAX_FLIGHT_TICKS {
                        log::warn!("Shot lost after {} ticks, starting over", flight_ticks);
                        stats.lost_shots += 1;
                        input.reset = true;
                        flight_ticks = 0;
                    }
                }
            }

            let snapshot = tick(&mut state, &input);
            stats.matches += snapshot.matches().count() as u32;
            reporter.observe(&snapshot.events);
        }

        println!("seed:        {}", seed);
        println!("ticks:       {}", state.time_ticks);
        println!("shots:       {}", stats.shots);
        println!("matches:     {}", stats.matches);
        println!("lost shots:  {}", stats.lost_shots);
        println!("boards:      {}", stats.boards_cleared);
        println!("score:       {}", state.score);
        match reporter.high_score() {
            Some(best) => println!("high score:  {}", best),
            None => println!("high score:  unavailable"),
        }
    }

    /// Prefer a ball matching the loaded color, otherwise any ball
    fn pick_target(state: &GameState, rng: &mut Pcg32) -> Option<glam::Vec2> {
        let loaded = state.shooter.loaded;
        state
            .grid
            .occupied()
            .filter(|(_, cell)| cell.color == loaded)
            .choose(rng)
            .or_else(|| state.grid.occupied().choose(rng))
            .map(|(_, cell)| cell.pos)
    }

    fn seed_from_clock() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok());
    let ticks = args.next().and_then(|s| s.parse().ok());

    // Settings first so the log filter can come from them
    let settings = bubble_pop::Settings::load();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_filter.as_str()),
    )
    .init();
    log::info!("Bubble Pop (native) starting...");

    demo::run(settings, seed, ticks);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
