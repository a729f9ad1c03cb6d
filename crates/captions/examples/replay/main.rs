mod fixture;
mod renderer;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use captions::{
    FONT_FAMILIES, ManualPlayer, PlaybackConfig, PlayerClock, StyleConfig, SyncSession,
    SyncUpdate, decode, format_clock, seconds_to_frame,
};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use fixture::{Fixture, Mode};
use ratatui::DefaultTerminal;

#[derive(clap::Parser)]
#[command(name = "replay", about = "Play a caption fixture against a simulated player clock")]
struct Args {
    #[arg(short, long, default_value_t = Fixture::InterviewSrt)]
    fixture: Fixture,

    #[arg(short, long, default_value_t = Mode::Karaoke)]
    mode: Mode,

    /// Overrides CAPTIONS_FPS.
    #[arg(long)]
    fps: Option<f64>,

    /// Write tracing output here instead of dropping it.
    #[arg(long)]
    log: Option<PathBuf>,
}

struct App {
    player: Arc<ManualPlayer>,
    session: SyncSession<ManualPlayer>,
    update: SyncUpdate,
    paused: bool,
    mode: Mode,
    fixture_name: String,
    end_frame: u64,
    /// Transcript row kept in view; only moves on scroll requests.
    scroll: usize,
}

impl App {
    fn new(fixture: &Fixture, mode: Mode, fps: f64) -> Self {
        let segments = decode(fixture.format(), fixture.document());
        let end_seconds = segments
            .iter()
            .map(|s| s.end_seconds)
            .fold(0.0_f64, f64::max);

        let player = Arc::new(ManualPlayer::new(fps));
        let style = StyleConfig::default().with_mode(mode.into());
        let mut session = SyncSession::attach(player.clone(), segments, style);
        let update = session.tick();

        Self {
            player,
            session,
            update,
            paused: false,
            mode,
            fixture_name: fixture.to_string(),
            end_frame: seconds_to_frame(end_seconds + 1.0, fps),
            scroll: 0,
        }
    }

    fn fps(&self) -> f64 {
        self.session.controller().fps()
    }

    fn frame(&self) -> u64 {
        self.update.frame_number
    }

    fn apply(&mut self, update: SyncUpdate) {
        if let Some(position) = update.scroll_to {
            self.scroll = position;
        }
        self.update = update;
    }

    fn refresh(&mut self) {
        if let Some(update) = self.session.poll() {
            self.apply(update);
        }
    }

    fn advance(&mut self) {
        self.player.advance(1);
        self.refresh();
    }

    fn seek_frame(&mut self, frame: u64) {
        self.player.seek(frame.min(self.end_frame));
        self.refresh();
    }

    fn seek_segment(&mut self, position: usize) {
        if let Err(error) = self.session.seek_to_segment(position) {
            tracing::warn!(%error, "seek failed");
        }
        self.refresh();
    }

    fn seek_next(&mut self) {
        let t = self.update.frame.time_seconds;
        let next = self
            .session
            .controller()
            .segments()
            .iter()
            .position(|s| s.start_seconds > t);
        if let Some(position) = next {
            self.seek_segment(position);
        }
    }

    fn seek_previous(&mut self) {
        let t = self.update.frame.time_seconds;
        let started = self
            .session
            .controller()
            .segments()
            .iter()
            .rposition(|s| s.start_seconds < t);
        let target = match started {
            Some(position) if self.update.frame.active_index == Some(position) => {
                Some(position.saturating_sub(1))
            }
            other => other,
        };
        if let Some(position) = target {
            self.seek_segment(position);
        }
    }

    fn cycle_mode(&mut self) {
        self.mode = self.mode.next();
        let style = self.session.controller().style().clone().with_mode(self.mode.into());
        self.session.controller_mut().set_style(style);
        let update = self.session.tick();
        self.apply(update);
    }

    fn cycle_font(&mut self) {
        let style = self.session.controller().style();
        let next = FONT_FAMILIES
            .iter()
            .position(|family| *family == style.font_family())
            .map_or(0, |i| (i + 1) % FONT_FAMILIES.len());
        let style = StyleConfig {
            font_family: FONT_FAMILIES[next].to_string(),
            ..style.clone()
        };
        self.session.controller_mut().set_style(style);
        let update = self.session.tick();
        self.apply(update);
    }

    fn is_done(&self) -> bool {
        self.frame() >= self.end_frame
    }
}

fn init_logging(path: &Path) {
    let file = std::fs::File::create(path).expect("log file must be writable");
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "captions=debug".into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn main() {
    use clap::Parser;
    let args = Args::parse();

    if let Some(path) = &args.log {
        init_logging(path);
    }

    let config = match args.fps {
        Some(fps) => PlaybackConfig::new(fps),
        None => PlaybackConfig::from_env(),
    };
    let fps = match config {
        Ok(config) => config.fps,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &args.fixture, args.mode, fps);
    ratatui::restore();

    match result {
        Ok(app) => {
            println!(
                "Done. Stopped at {} of {} segments ({} fixture, {} fps).",
                format_clock(app.update.frame.time_seconds),
                app.session.controller().segments().len(),
                app.fixture_name,
                app.fps(),
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(
    terminal: &mut DefaultTerminal,
    fixture: &Fixture,
    mode: Mode,
    fps: f64,
) -> std::io::Result<App> {
    let mut app = App::new(fixture, mode, fps);
    let tick_duration = Duration::from_secs_f64(1.0 / app.fps());
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| renderer::render(frame, &app))?;

        let timeout = tick_duration.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char(' ') => {
                        app.paused = !app.paused;
                        last_tick = Instant::now();
                    }
                    KeyCode::Char('m') => app.cycle_mode(),
                    KeyCode::Char('f') => app.cycle_font(),
                    KeyCode::Right => app.seek_next(),
                    KeyCode::Left => app.seek_previous(),
                    KeyCode::Home => app.seek_frame(0),
                    KeyCode::End => {
                        let end = app.end_frame;
                        app.seek_frame(end);
                    }
                    _ => {}
                }
            }
        } else if !app.paused && last_tick.elapsed() >= tick_duration {
            app.advance();
            last_tick = Instant::now();

            if app.is_done() {
                app.paused = true;
            }
        }
    }

    Ok(app)
}
