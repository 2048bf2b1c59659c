use std::path::PathBuf;
use std::sync::mpsc::Sender;

use crate::app::{App, Message, Model, ToastLevel};
use crate::app::model::PathAction;
use crate::search::{self, ScanOutcome, SearchSpec};

impl App {
    /// Run the side effects a message implies, after the pure update.
    ///
    /// Everything that touches the filesystem or spawns work lives here:
    /// loading, saving, kicking off background scans, and reacting to
    /// on-disk changes.
    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        scan_tx: &Sender<ScanOutcome>,
        msg: &Message,
    ) {
        match msg {
            Message::PathSubmit => {
                let Some(prompt) = model.path_prompt.take() else {
                    return;
                };
                let path = PathBuf::from(prompt.input.trim());
                if path.as_os_str().is_empty() {
                    model.show_toast(ToastLevel::Warning, "No path given");
                    return;
                }
                match prompt.action {
                    PathAction::Load => {
                        if let Err(err) = model.load_file(&path) {
                            tracing::warn!(path = %path.display(), %err, "load failed");
                            model.show_toast(ToastLevel::Error, format!("Load failed: {err}"));
                        }
                    }
                    PathAction::Save => Self::save_to(model, &path),
                }
            }
            Message::Save => {
                // No known path: the update opened the prompt instead.
                if let Some(path) = model.file_path.clone() {
                    Self::save_to(model, &path);
                }
            }
            Message::SubmitSearch => {
                // The snapshot is read once, here, before the worker starts.
                if let Some(query) = model.search_input.take() {
                    let generation = model.search.begin(&query);
                    let spec = SearchSpec {
                        pattern: query,
                        use_regex: model.use_regex,
                    };
                    tracing::debug!(generation, regex = spec.use_regex, "spawning scan");
                    search::spawn_scan(model.buffer.text(), spec, generation, scan_tx.clone());
                }
            }
            Message::FileChanged => {
                // Our own save also trips the watcher; only a foreign
                // modification warrants the warning.
                if !model.disk_changed && !model.disk_matches_buffer() {
                    model.disk_changed = true;
                    model.show_toast(
                        ToastLevel::Warning,
                        "File changed on disk — saving will overwrite it",
                    );
                }
            }
            _ => {}
        }
    }

    fn save_to(model: &mut Model, path: &std::path::Path) {
        match model.save_file(path) {
            Ok(()) => {
                model.show_toast(ToastLevel::Info, format!("Saved {}", path.display()));
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "save failed");
                model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
            }
        }
    }
}
