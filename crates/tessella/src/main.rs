use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{
    DefaultTerminal, Frame,
    style::{Color, Stylize},
    text::Line,
};
use tessella_config::Config;
use tessella_content::{ContentStore, FileStore, PortfolioContent};
use tessella_core::Viewport;
use tessella_mosaic::{
    CellMetrics, MosaicSettings, MosaicView, Palette, SystemClock, TriangleSizePolicy, surface,
};

mod card;
mod logging;

/// How long to wait for input before drawing the next frame.
const FRAME_POLL: Duration = Duration::from_millis(40);

/// Accent for key hints.
const HINT: Color = Color::Rgb(255, 209, 102);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let loaded = Config::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    logging::init(&config)?;
    if let Err(err) = &loaded {
        tracing::warn!(%err, "using default config");
    }

    let (content, content_dir) = load_content(&config);
    let palette = if config.palette_from_gallery {
        let images: Vec<PathBuf> = content
            .gallery_images()
            .into_iter()
            .map(|image| resolve(content_dir.as_deref(), image))
            .collect();
        Palette::from_images(&images)
    } else {
        Palette::default()
    };

    let terminal = ratatui::init();
    let result = App::new(config, content, palette).run(terminal);
    ratatui::restore();
    result
}

/// Load the portfolio document, seeding the store with defaults on first run.
///
/// Also returns the directory gallery image paths are relative to.
fn load_content(config: &Config) -> (PortfolioContent, Option<PathBuf>) {
    let Some(path) = config.content_path.clone().or_else(FileStore::default_path) else {
        tracing::warn!("no data directory, showing default content");
        return (PortfolioContent::default(), None);
    };
    let dir = path.parent().map(Path::to_path_buf);

    let mut store = match FileStore::open(&path) {
        Ok(kv) => ContentStore::new(kv),
        Err(err) => {
            tracing::warn!(%err, path = %path.display(), "content store unreadable");
            return (PortfolioContent::default(), dir);
        }
    };

    let content = match store.try_load() {
        Ok(Some(content)) => content,
        Ok(None) => {
            let content = PortfolioContent::default();
            match store.save(&content) {
                Ok(()) => tracing::info!(path = %path.display(), "seeded content store"),
                Err(err) => tracing::warn!(%err, "could not seed content store"),
            }
            content
        }
        Err(err) => {
            tracing::warn!(%err, "stored content unreadable, showing defaults");
            PortfolioContent::default()
        }
    };
    (content, dir)
}

/// Resolve a gallery image reference against the content directory.
fn resolve(dir: Option<&Path>, image: &str) -> PathBuf {
    match dir {
        Some(dir) => dir.join(image),
        None => PathBuf::from(image),
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Pixel size of one terminal cell.
    metrics: CellMetrics,
    /// Color behind the translucent tiles.
    backdrop: tessella_core::Rgb,
    /// Portfolio shown on the card.
    content: PortfolioContent,
    /// Animated background.
    view: MosaicView<SystemClock, StdRng>,
    /// Is the profile card visible?
    show_card: bool,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, content: PortfolioContent, palette: Palette) -> Self {
        let settings = MosaicSettings {
            size_policy: TriangleSizePolicy {
                size: config.triangle_size,
                narrow_size: config.narrow_triangle_size,
                breakpoint: config.narrow_breakpoint,
            },
            layout: config.layout,
            palette,
            resize_debounce_ms: config.resize_debounce_ms,
        };
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            running: false,
            metrics: CellMetrics {
                width: config.cell_width_px,
                height: config.cell_height_px,
            },
            backdrop: config.backdrop,
            content,
            view: MosaicView::new(settings, SystemClock::new(), rng),
            show_card: true,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let size = terminal.size()?;
        self.view.regenerate(self.viewport_for(size.width, size.height));

        while self.running {
            self.view.frame();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Viewport in pixels for a terminal of the given size in cells.
    fn viewport_for(&self, columns: u16, rows: u16) -> Viewport {
        Viewport::from_cells(columns, rows, self.metrics.width, self.metrics.height)
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        surface::render(
            frame,
            area,
            self.view.grid(),
            self.view.display(),
            self.backdrop,
            self.metrics,
        );

        if self.show_card {
            card::render(frame, area, &self.content);
        }

        if area.height > 0 {
            let mut help_area = area;
            help_area.y = area.bottom() - 1;
            help_area.height = 1;
            frame.render_widget(self.help_line(), help_area);
        }
    }

    /// Key hints plus the current layout and sweep state.
    fn help_line(&self) -> Line<'static> {
        let sweep = if self.view.is_paused() {
            "paused"
        } else {
            "sweeping"
        };
        Line::from(vec![
            "q".bold().fg(HINT),
            " quit  ".gray(),
            "r".bold().fg(HINT),
            " regenerate  ".gray(),
            "space".bold().fg(HINT),
            format!(" {sweep}  ").gray(),
            "l".bold().fg(HINT),
            format!(" {}  ", self.view.settings().layout.name()).gray(),
            "h".bold().fg(HINT),
            " card".gray(),
        ])
        .centered()
        .on_black()
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls with a short timeout so the sweep keeps animating.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(FRAME_POLL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(columns, rows) => {
                    let viewport = self.viewport_for(columns, rows);
                    self.view.request_resize(viewport);
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('r')) => self.regenerate(),
            (_, KeyCode::Char(' ')) => self.view.toggle_pause(),
            (_, KeyCode::Char('l')) => self.cycle_layout(),
            (_, KeyCode::Char('h')) => self.show_card = !self.show_card,
            _ => {}
        }
    }

    /// Rebuild the mosaic with fresh colors.
    fn regenerate(&mut self) {
        let viewport = self.view.viewport();
        self.view.regenerate(viewport);
    }

    /// Switch between spaced and interlocked triangles.
    fn cycle_layout(&mut self) {
        let layout = self.view.settings().layout.toggle();
        self.view.set_layout(layout);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
