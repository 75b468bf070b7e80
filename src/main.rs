//! Cragjump - headless native runner
//!
//! Usage: `cragjump [MAP_FILE] [CONSTANTS_JSON]`
//!
//! Loads a layout (the built-in demo when omitted) and plays a scripted
//! input sequence against it, resetting after each defeat, until the level
//! is won or the tick limit runs out.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::fs;

    use cragjump::loader::DEMO_MAP;
    use cragjump::sim::Bounded;
    use cragjump::{LevelConstants, TickInput, build_level, tick};

    const MAX_TICKS: u64 = 2_000;
    const SEED: u64 = 0x5eed;

    /// Walk right, hop every 45 ticks, try to lift now and then
    fn scripted_input(t: u64) -> TickInput {
        TickInput {
            right: true,
            jump: t % 45 == 0,
            lift: t % 150 == 75,
            ..Default::default()
        }
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args().skip(1);
        let map = match args.next() {
            Some(path) => fs::read_to_string(&path)?,
            None => DEMO_MAP.to_string(),
        };
        let constants = match args.next() {
            Some(path) => LevelConstants::from_json(&fs::read_to_string(&path)?)?,
            None => LevelConstants::default(),
        };

        let mut level = build_level(&map, &constants, SEED)?;
        let mut attempts = 1;
        for t in 0..MAX_TICKS {
            tick(&mut level, &scripted_input(t))?;
            if level.is_victorious() {
                log::info!("Victory on attempt {attempts} at tick {}", level.ticks());
                return Ok(());
            }
            if level.is_finished() {
                attempts += 1;
                level.reset_protagonist()?;
            }
        }

        let p = level.protagonist();
        log::info!(
            "Gave up after {MAX_TICKS} ticks and {attempts} attempts; protagonist at {} ({:?})",
            p.body.bounds().center(),
            level.pose().stance
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Cragjump (native) starting...");
    if let Err(e) = native::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
