//! Shared host code for the gridpath demos.
//!
//! [`Stepper`] owns a [`SearchEngine`] and reacts to key presses; [`run`]
//! puts it on a crossterm terminal and advances the search one step every
//! `step_interval`.

use std::error::Error;
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use rand::SeedableRng;
use rand::rngs::StdRng;

use gridpath_core::Point;
use gridpath_search::{Algorithm, CellState, Layout, SearchConfig, SearchEngine, SearchStatus};

/// Board used when no config file or seed is given.
pub const BUILTIN: &str = "
S.......#...............#.......
.######.#.#############.#.#####.
.#......#.#...........#.#.#...#.
.#.######.#.#########.#.#.#.#.#.
.#........#.#.......#.#...#.#.#.
.##########.#.#.###.#.#####.#.#.
............#.#...#.#.......#.#.
.############.#.#.#.#########.#.
..............#.#G#...........#.
";

/// Default obstacle density for `--random`.
pub const DEFAULT_DENSITY: f64 = 0.3;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Where the board comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Builtin,
    File(PathBuf),
    Random(u64),
}

/// Command-line options of the `stepper` binary.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub source: Source,
    pub algorithm: Option<Algorithm>,
    pub density: f64,
    pub interval: Option<Duration>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            source: Source::Builtin,
            algorithm: None,
            density: DEFAULT_DENSITY,
            interval: None,
        }
    }
}

/// Error for malformed command lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageError(pub String);

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{}", self.0, USAGE)
    }
}

impl Error for UsageError {}

pub const USAGE: &str = "usage: stepper [CONFIG.json] [--random SEED] [--density P] \
[--algorithm NAME] [--interval MS]";

impl Options {
    /// Parse arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut opts = Options::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next()
                    .ok_or_else(|| UsageError(format!("{flag} needs a value")))
            };
            match arg.as_str() {
                "--random" => {
                    let v = value("--random")?;
                    let seed = v
                        .parse()
                        .map_err(|_| UsageError(format!("bad seed \u{201c}{v}\u{201d}")))?;
                    opts.source = Source::Random(seed);
                }
                "--density" => {
                    let v = value("--density")?;
                    opts.density = v
                        .parse()
                        .map_err(|_| UsageError(format!("bad density \u{201c}{v}\u{201d}")))?;
                }
                "--algorithm" => {
                    let v = value("--algorithm")?;
                    let algorithm = v
                        .parse::<Algorithm>()
                        .map_err(|e| UsageError(e.to_string()))?;
                    opts.algorithm = Some(algorithm);
                }
                "--interval" => {
                    let v = value("--interval")?;
                    let ms: u64 = v
                        .parse()
                        .map_err(|_| UsageError(format!("bad interval \u{201c}{v}\u{201d}")))?;
                    opts.interval = Some(Duration::from_millis(ms));
                }
                s if s.starts_with("--") => {
                    return Err(UsageError(format!("unknown flag {s}")));
                }
                path => opts.source = Source::File(PathBuf::from(path)),
            }
        }
        Ok(opts)
    }

    /// Resolve the configuration these options describe.
    pub fn load_config(&self) -> Result<SearchConfig, Box<dyn Error>> {
        let mut config = match &self.source {
            Source::Builtin => Layout::parse(BUILTIN)?.to_config(Algorithm::default()),
            Source::File(path) => {
                let text = std::fs::read_to_string(path)?;
                serde_json::from_str(&text)?
            }
            Source::Random(_) => SearchConfig::default(),
        };
        if let Some(a) = self.algorithm {
            config.algorithm = a;
        }
        if let Some(i) = self.interval {
            config.step_interval = i;
        }
        config.validate()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Stepper
// ---------------------------------------------------------------------------

/// What the host loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Interactive state of one demo session.
#[derive(Debug)]
pub struct Stepper {
    engine: SearchEngine,
    start: Point,
    goal: Point,
    algorithm: Algorithm,
    interval: Duration,
    density: f64,
    rng: StdRng,
    paused: bool,
}

impl Stepper {
    /// Build the board and start the first run.
    pub fn new(config: &SearchConfig, seed: u64, density: f64) -> Result<Self, Box<dyn Error>> {
        let mut engine = SearchEngine::new(config.build_graph()?);
        let mut rng = StdRng::seed_from_u64(seed);
        if config.blocked.is_empty() && density > 0.0 {
            engine
                .graph_mut()
                .scatter_blocked(&mut rng, density, &[config.start, config.goal]);
        }
        let mut stepper = Self {
            engine,
            start: config.start,
            goal: config.goal,
            algorithm: config.algorithm,
            interval: config.step_interval,
            density: if density > 0.0 { density } else { DEFAULT_DENSITY },
            rng,
            paused: false,
        };
        stepper.restart()?;
        Ok(stepper)
    }

    #[inline]
    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether [`tick`](Self::tick) would advance the run.
    pub fn wants_step(&self) -> bool {
        !self.paused && self.engine.status() == SearchStatus::Running
    }

    /// Advance the run by one step if it is running and not paused.
    pub fn tick(&mut self) -> Result<SearchStatus, Box<dyn Error>> {
        if self.wants_step() {
            self.engine.step()?;
        }
        Ok(self.engine.status())
    }

    /// Start a new run with the current algorithm on the current board.
    pub fn restart(&mut self) -> Result<(), Box<dyn Error>> {
        self.engine.initialize(self.start, self.goal, self.algorithm)?;
        log::debug!("restarted {} from {} to {}", self.algorithm, self.start, self.goal);
        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<Control, Box<dyn Error>> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(Control::Quit),
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::Char('s') => {
                if self.engine.status() == SearchStatus::Running {
                    self.engine.step()?;
                }
            }
            KeyCode::Char('f') => {
                if self.engine.status() == SearchStatus::Running {
                    self.engine.run_to_completion()?;
                }
            }
            KeyCode::Char('a') | KeyCode::Tab => {
                self.algorithm = self.algorithm.next();
                self.restart()?;
            }
            KeyCode::Char('r') => self.restart()?,
            KeyCode::Char('c') => {
                self.engine.clear_board();
                self.restart()?;
            }
            KeyCode::Char('x') => {
                self.engine.clear_board();
                let keep = [self.start, self.goal];
                self.engine
                    .graph_mut()
                    .scatter_blocked(&mut self.rng, self.density, &keep);
                self.restart()?;
            }
            _ => {}
        }
        Ok(Control::Continue)
    }

    /// One line describing the run.
    pub fn status_line(&self) -> String {
        let e = &self.engine;
        let mut line = format!(
            "{:<17} {:<9} steps {:>5}  {:>8.2?}",
            self.algorithm.name(),
            e.status().to_string(),
            e.iteration_count(),
            e.elapsed_time()
        );
        if let Some(cost) = e.goal_cost() {
            line.push_str(&format!("  cost {cost:.1}  path {}", e.path_points().len()));
        }
        if self.paused {
            line.push_str("  [paused]");
        }
        line
    }
}

// ---------------------------------------------------------------------------
// Terminal
// ---------------------------------------------------------------------------

fn cell_colors(c: CellState) -> (Color, Color) {
    match c {
        CellState::Open => (Color::DarkGrey, Color::Reset),
        CellState::Blocked => (Color::Grey, Color::DarkGrey),
        CellState::Frontier => (Color::Black, Color::Cyan),
        CellState::Explored => (Color::Black, Color::DarkBlue),
        CellState::Path => (Color::Black, Color::Yellow),
        CellState::Start => (Color::Black, Color::Green),
        CellState::Goal => (Color::Black, Color::Red),
    }
}

/// Raw mode and the alternate screen, undone on drop.
struct Screen;

impl Screen {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Screen)
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn draw(out: &mut impl Write, stepper: &Stepper) -> io::Result<()> {
    let engine = stepper.engine();
    let w = engine.graph().width() as usize;
    let overlay = engine.overlay();
    // North is up: the highest row goes on the first screen line.
    for (line, row) in overlay.chunks(w).rev().enumerate() {
        queue!(out, cursor::MoveTo(0, line as u16))?;
        for &cell in row {
            let (fg, bg) = cell_colors(cell);
            queue!(
                out,
                SetForegroundColor(fg),
                SetBackgroundColor(bg),
                Print(cell.glyph())
            )?;
        }
    }
    let h = engine.graph().height() as u16;
    queue!(
        out,
        ResetColor,
        cursor::MoveTo(0, h + 1),
        terminal::Clear(ClearType::CurrentLine),
        Print(stepper.status_line()),
        cursor::MoveTo(0, h + 2),
        Print("space pause  s step  f finish  a algorithm  r rerun  c clear  x scatter  q quit")
    )?;
    out.flush()
}

/// Run the interactive stepper until the user quits.
pub fn run(mut stepper: Stepper) -> Result<(), Box<dyn Error>> {
    let _screen = Screen::enter()?;
    let mut out = io::stdout();
    let mut last_step = Instant::now();
    loop {
        draw(&mut out, &stepper)?;
        let timeout = if stepper.wants_step() {
            stepper.interval().saturating_sub(last_step.elapsed())
        } else {
            Duration::from_millis(250)
        };
        if event::poll(timeout)? {
            if let Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            {
                if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }
                if stepper.handle_key(code)? == Control::Quit {
                    return Ok(());
                }
            }
            continue;
        }
        if stepper.wants_step() {
            stepper.tick()?;
            last_step = Instant::now();
        }
    }
}
