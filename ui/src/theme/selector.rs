use lumen_core::{ThemePreference, ThemeState};

/// One entry of the theme selection menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeOption {
    pub preference: ThemePreference,
    pub label: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// Menu entries, in display order
pub const THEME_OPTIONS: [ThemeOption; 3] = [
    ThemeOption {
        preference: ThemePreference::Light,
        label: "Light",
        description: "Light theme with bright colors",
        icon: "☀",
    },
    ThemeOption {
        preference: ThemePreference::Dark,
        label: "Dark",
        description: "Dark theme with muted colors",
        icon: "☾",
    },
    ThemeOption {
        preference: ThemePreference::System,
        label: "System",
        description: "Follow system preference",
        icon: "🖥",
    },
];

pub fn option_for(preference: ThemePreference) -> &'static ThemeOption {
    match preference {
        ThemePreference::Light => &THEME_OPTIONS[0],
        ThemePreference::Dark => &THEME_OPTIONS[1],
        ThemePreference::System => &THEME_OPTIONS[2],
    }
}

impl ThemeOption {
    pub fn is_selected(&self, state: &ThemeState) -> bool {
        self.preference == state.preference
    }
}

/// e.g. `Current: Dark mode (System)`
pub fn status_line(state: &ThemeState) -> String {
    let mode = if state.resolved.is_dark() {
        "Dark"
    } else {
        "Light"
    };
    let mut line = format!("Current: {mode} mode");
    if state.preference.is_system() {
        line.push_str(" (System)");
    }
    line
}

/// The trigger shows a badge when the system is what made the theme dark
pub fn shows_system_dark_indicator(state: &ThemeState) -> bool {
    state.resolved.is_dark() && state.preference.is_system()
}

/// Plain-text rendering of the selection menu
pub fn render_menu(state: &ThemeState) -> String {
    let mut lines = vec!["Theme Selection".to_string()];

    for option in &THEME_OPTIONS {
        let marker = if option.is_selected(state) { "●" } else { " " };
        lines.push(format!(
            "{marker} {} {:<6} - {}",
            option.icon, option.label, option.description
        ));
    }

    lines.push(status_line(state));
    lines.join("\n")
}
