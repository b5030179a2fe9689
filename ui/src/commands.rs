use crate::error::AppResult;
use crate::theme::{ThemeManager, selector};
use lumen_core::{ResolvedAppearance, ThemePreference, ThemeState};
use serde::Serialize;
use std::future::Future;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

/// Machine-readable form of `lumen show --json`
#[derive(Debug, Serialize)]
struct ShowOutput<'a> {
    #[serde(flatten)]
    state: ThemeState,
    os: ResolvedAppearance,
    root_class: String,
    system_dark_indicator: bool,
    state_file: &'a str,
}

/// Print the current preference and resolved appearance
pub fn show(manager: &ThemeManager, json: bool, out: &mut impl Write) -> AppResult<()> {
    let state = manager.context().state();

    if json {
        let state_file = manager.state_file().to_string_lossy();
        let output = ShowOutput {
            state,
            os: manager.controller().latest_os_appearance(),
            root_class: manager.root().class_name(),
            system_dark_indicator: selector::shows_system_dark_indicator(&state),
            state_file: &*state_file,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        return Ok(());
    }

    let option = selector::option_for(state.preference);
    writeln!(out, "Preference: {} {}", option.icon, option.label)?;
    writeln!(out, "{}", selector::status_line(&state))?;
    Ok(())
}

/// Select and persist a new preference
pub fn set(
    manager: &ThemeManager,
    preference: ThemePreference,
    out: &mut impl Write,
) -> AppResult<()> {
    let theme = manager.context();
    theme.set_preference(preference);
    writeln!(out, "{}", selector::status_line(&theme.state()))?;
    Ok(())
}

/// Print the selection menu
pub fn options(manager: &ThemeManager, out: &mut impl Write) -> AppResult<()> {
    writeln!(out, "{}", selector::render_menu(&manager.context().state()))?;
    Ok(())
}

/// Follow OS appearance changes until `shutdown` completes, reporting each
/// change to `out`
pub async fn watch<W, F>(
    manager: &ThemeManager,
    out: Arc<Mutex<W>>,
    shutdown: F,
) -> AppResult<()>
where
    W: Write + Send + 'static,
    F: Future<Output = ()>,
{
    let context = manager.context();
    writeln!(
        out.lock().unwrap_or_else(PoisonError::into_inner),
        "{}",
        selector::status_line(&context.state())
    )?;

    let listener_context = context.clone();
    let listener_out = Arc::clone(&out);
    let subscription = manager
        .controller()
        .subscribe_to_os_preference_change(move |_resolved| {
            let mut out = listener_out.lock().unwrap_or_else(PoisonError::into_inner);
            if let Err(e) = writeln!(
                out,
                "[{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                selector::status_line(&listener_context.state())
            ) {
                log::warn!("Failed to report appearance change: {e}");
            }
        });

    let mut watcher = manager.spawn_watcher();
    shutdown.await;

    watcher.shutdown().await;
    subscription.unsubscribe();
    log::info!("Stopped watching OS appearance");
    Ok(())
}
