use std::io::stdout;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::model::ScanPhase;
use crate::app::{App, Message, Model, ToastLevel, update};
use crate::search::ScanOutcome;
use crate::watcher::FileWatcher;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal — etch requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model = Model::new((size.width, size.height));
        model.use_regex = self.regex_default;
        model.watch_enabled = self.watch_enabled;

        if let Some(path) = &self.file_path {
            if path.exists() {
                if let Err(err) = model.load_file(path) {
                    tracing::warn!(path = %path.display(), %err, "initial load failed");
                    model.show_toast(ToastLevel::Error, format!("Load failed: {err}"));
                }
            } else {
                // A fresh file: empty buffer, saved to this path later.
                model.file_path = Some(path.clone());
            }
        }

        execute!(stdout(), EnableMouseCapture)?;
        let result = Self::event_loop(&mut terminal, &mut model);
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let (scan_tx, scan_rx) = mpsc::channel::<ScanOutcome>();
        let mut file_watcher: Option<FileWatcher> = None;
        let mut watched_path: Option<PathBuf> = None;
        let mut needs_render = true;

        loop {
            // (Re)watch whenever the loaded file changes.
            if model.watch_enabled && model.file_path != watched_path {
                file_watcher = model.file_path.as_deref().and_then(|path| {
                    match FileWatcher::new(path, Duration::from_millis(200)) {
                        Ok(watcher) => Some(watcher),
                        Err(err) => {
                            tracing::warn!(path = %path.display(), %err, "watch unavailable");
                            None
                        }
                    }
                });
                watched_path.clone_from(&model.file_path);
            }

            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            // Scan completions are applied before any further input so
            // navigation only ever sees a fully populated match set.
            while let Ok(outcome) = scan_rx.try_recv() {
                *model = update(std::mem::take(model), Message::ScanFinished(outcome));
                needs_render = true;
            }

            if model.watch_enabled
                && file_watcher
                    .as_mut()
                    .is_some_and(FileWatcher::take_change_ready)
            {
                *model = update(std::mem::take(model), Message::FileChanged);
                Self::handle_message_side_effects(model, &scan_tx, &Message::FileChanged);
                needs_render = true;
            }

            // Poll briskly while a scan is in flight so its completion is
            // picked up promptly; idle otherwise.
            let poll_ms = if needs_render {
                0
            } else if matches!(model.search.phase, ScanPhase::Searching(_)) {
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                if let Some(msg) = Self::handle_event(&event::read()?, model) {
                    let side_msg = msg.clone();
                    *model = update(std::mem::take(model), msg);
                    Self::handle_message_side_effects(model, &scan_tx, &side_msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = Self::handle_event(&event::read()?, model) {
                        let side_msg = msg.clone();
                        *model = update(std::mem::take(model), msg);
                        Self::handle_message_side_effects(model, &scan_tx, &side_msg);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
