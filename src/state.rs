use std::path::Path;

use anyhow::{Context, Result};
use factbook_explorer::{DashboardConfig, FilterBounds, Session};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Display tabs of the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    BarCharts,
    Scatter,
    Maps,
}

/// Matching-row count shown in the top bar, refreshed by the central panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibleCount(usize);

impl VisibleCount {
    pub fn get(self) -> usize {
        self.0
    }

    /// Store the count of the frame just rendered; `true` when it differs
    /// from what was shown before.
    pub fn note(&mut self, count: usize) -> bool {
        let changed = self.0 != count;
        self.0 = count;
        changed
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded session (None when the store could not be read).
    pub session: Option<Session>,

    /// Current filter selection.
    pub bounds: FilterBounds,

    /// Selection the views were last recomputed for.
    last_bounds: Option<FilterBounds>,

    pub tab: Tab,

    /// Rows passing the current bounds, as of the last rendered frame.
    pub visible: VisibleCount,

    /// `file://` URI of the decorative background, when present.
    pub background_uri: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the state and load the configured store once.
    pub fn with_config(config: DashboardConfig) -> Self {
        let background_uri = config.background_image().map(|path| {
            let abs = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
            format!("file://{}", abs.display())
        });

        let mut state = Self {
            config,
            session: None,
            bounds: FilterBounds::default(),
            last_bounds: None,
            tab: Tab::BarCharts,
            visible: VisibleCount::default(),
            background_uri,
            status_message: None,
        };

        match Session::open(&state.config) {
            Ok(session) => state.set_session(session),
            Err(e) => {
                log::error!("Failed to load {}: {e}", state.config.database.display());
                state.status_message = Some(if e.is_data_unavailable() {
                    format!("Data unavailable: {e}")
                } else {
                    format!("Error: {e}")
                });
            }
        }
        state
    }

    /// Ingest a newly loaded session and reset the filters.
    pub fn set_session(&mut self, session: Session) {
        self.bounds = session.initial_bounds();
        self.last_bounds = None;
        self.visible = VisibleCount::default();
        self.session = Some(session);
        self.status_message = None;
    }

    /// Replace the session with the contents of `path`.
    pub fn open_path(&mut self, path: &Path) {
        match Session::open_path(path, &self.config.table) {
            Ok(session) => self.set_session(session),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Back to the start-up selection.
    pub fn reset_filters(&mut self) {
        if let Some(session) = &self.session {
            self.bounds = session.initial_bounds();
        }
    }

    /// Note a change of selection since the previous frame.
    pub fn track_bounds(&mut self) {
        if self.last_bounds == Some(self.bounds) {
            return;
        }
        log::debug!("Filter bounds changed: {:?}", self.bounds);
        let inverted = self.bounds.inverted_fields();
        if !inverted.is_empty() {
            log::warn!("Inverted filter ranges: {inverted:?}");
        }
        self.last_bounds = Some(self.bounds);
    }

    /// Write the CSV of the current selection to `path`.
    pub fn save_export(&self, path: &Path) -> Result<()> {
        let session = self.session.as_ref().context("no dataset loaded")?;
        let export = session
            .export_csv(&self.bounds)
            .context("serializing filtered rows")?;
        std::fs::write(path, &export.bytes)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!(
            "Exported {} bytes ({}) to {}",
            export.bytes.len(),
            export.mime,
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factbook_explorer::data::export::parse_csv;
    use rusqlite::Connection;

    fn state_over_temp_db(dir: &Path) -> AppState {
        let database = dir.join("factbook.db");
        let conn = Connection::open(&database).unwrap();
        conn.execute_batch(
            "CREATE TABLE facts (name TEXT, code TEXT, population INTEGER, area INTEGER, population_growth REAL);
             INSERT INTO facts VALUES ('Germany', 'DEU', 83000000, 357022, 0.1);
             INSERT INTO facts VALUES ('Liechtenstein', 'LIE', 38000, 160, 0.8);",
        )
        .unwrap();
        drop(conn);

        AppState::with_config(DashboardConfig {
            database,
            background: None,
            ..DashboardConfig::default()
        })
    }

    #[test]
    fn export_writes_current_selection_from_shared_state() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_over_temp_db(dir.path());
        assert!(state.status_message.is_none());

        let out = dir.path().join("out.csv");
        let shared: &AppState = &state;
        shared.save_export(&out).unwrap();

        let table = parse_csv(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].code, "DEU");
    }

    #[test]
    fn visible_count_reports_changes_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_over_temp_db(dir.path());
        assert_eq!(state.visible.get(), 0);

        assert!(state.visible.note(1));
        assert!(!state.visible.note(1));
        assert_eq!(state.visible.get(), 1);

        assert!(state.visible.note(2));
        state.open_path(&dir.path().join("factbook.db"));
        assert_eq!(state.visible.get(), 0);
    }

    #[test]
    fn missing_store_leaves_status_message() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::with_config(DashboardConfig {
            database: dir.path().join("absent.db"),
            background: None,
            ..DashboardConfig::default()
        });
        assert!(state.session.is_none());
        let message = state.status_message.unwrap_or_default();
        assert!(message.starts_with("Data unavailable"), "{message}");
    }
}
