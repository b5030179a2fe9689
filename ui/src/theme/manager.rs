use crate::config::{ThemeSettings, setup};
use crate::error::AppResult;
use lumen_core::{
    AppearanceProbe, FileStore, OsPreferenceWatcher, RootClassList, StaticProbe, SystemProbe,
    ThemeContext, ThemeController,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Composition root for the theme: builds the single [`ThemeController`]
/// from configuration and hands out consumer views of it.
pub struct ThemeManager {
    controller: ThemeController,
    probe: Arc<dyn AppearanceProbe>,
    root: Arc<RootClassList>,
    state_file: PathBuf,
    settings: ThemeSettings,
}

impl ThemeManager {
    /// Initialize the theme subsystem - call this once at startup
    pub fn init(settings: &ThemeSettings) -> AppResult<Self> {
        let state_file = match settings.state_file() {
            Some(path) => path.clone(),
            None => setup::get_state_file_path()?,
        };

        let probe: Arc<dyn AppearanceProbe> = match settings.assume_os() {
            Some(appearance) => {
                log::info!("OS appearance pinned to {appearance} by configuration");
                Arc::new(StaticProbe::new(appearance))
            }
            None => Arc::new(SystemProbe::new()),
        };

        let root = Arc::new(RootClassList::new());
        let controller = ThemeController::initialize(
            Arc::new(FileStore::new(&state_file)),
            Arc::clone(&probe),
            root.clone(),
            settings.default_preference(),
        );

        log::debug!("Theme state persisted at: {}", state_file.display());

        Ok(Self {
            controller,
            probe,
            root,
            state_file,
            settings: settings.clone(),
        })
    }

    pub fn controller(&self) -> &ThemeController {
        &self.controller
    }

    /// Consumer view: preference, resolved appearance and `set_preference`
    pub fn context(&self) -> ThemeContext {
        ThemeContext::from(&self.controller)
    }

    pub fn root(&self) -> &RootClassList {
        &self.root
    }

    pub fn state_file(&self) -> &Path {
        &self.state_file
    }

    /// Start following OS appearance changes on the current tokio runtime
    pub fn spawn_watcher(&self) -> OsPreferenceWatcher {
        OsPreferenceWatcher::spawn(
            self.controller.clone(),
            Arc::clone(&self.probe),
            self.settings.poll_interval(),
        )
    }
}
