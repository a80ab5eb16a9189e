//! Watch a search expand across the board one step at a time.
//!
//! ```text
//! stepper                      built-in maze
//! stepper board.json           a serialized SearchConfig
//! stepper --random 7           open board with scattered obstacles
//! ```

use gridpath_demos::{Options, Source, Stepper, run};

fn main() {
    if let Err(e) = try_main() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Options::parse(std::env::args().skip(1))?;
    let config = opts.load_config()?;
    let (seed, density) = match opts.source {
        Source::Random(seed) => (seed, opts.density),
        _ => (0, 0.0),
    };
    run(Stepper::new(&config, seed, density)?)
}
