//! Munch entry point
//!
//! The browser build is driven from JS through `munch::platform::web`.
//! Natively this runs a headless autopilot session:
//!
//! ```text
//! munch [seed] [tuning.json]
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use munch::Tuning;
    use munch::hud::format_clock;
    use munch::platform::headless::run_autopilot;
    use munch::sim::GameState;

    // Ten minutes of play at 60 Hz
    const MAX_TICKS: u64 = 10 * 60 * 60;

    #[derive(Debug, Parser)]
    #[command(author, version, about = "Munch headless autopilot runner")]
    pub struct Cli {
        /// World seed
        #[arg(default_value_t = 1)]
        pub seed: u64,

        /// JSON tuning document (reference balance when omitted)
        pub tuning: Option<PathBuf>,
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read tuning {}", path.display()))?;
        Tuning::from_json(&json).with_context(|| format!("invalid tuning {}", path.display()))
    }

    pub fn run(cli: Cli) -> Result<()> {
        let tuning = load_tuning(cli.tuning.as_ref())?;
        let mut state = GameState::with_tuning(cli.seed, tuning);
        let report = run_autopilot(&mut state, MAX_TICKS);

        match report.outcome {
            Some(outcome) => {
                println!("LEVEL COMPLETE!");
                println!("Time: {}", format_clock(outcome.elapsed_seconds));
                println!("Score: {}", outcome.final_score);
                println!("Stars: {}/3", outcome.stars_awarded);
            }
            None => {
                println!(
                    "Level not completed: tier {}, score {}, {} hazard hits",
                    report.final_tier, report.final_score, report.hazard_hits
                );
            }
        }
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Munch (native) starting...");

    native::run(native::Cli::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
