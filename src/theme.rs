use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::EffectError;
use crate::event::{EffectEvent, EventDispatcher};
use crate::prefs::PreferenceStore;
use crate::schedule::TimerScheduler;
use crate::stage::Stage;
use crate::time::EffectTime;

const PREF_KEY: &str = "theme";

/// Color scheme applied at the stage root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The opposite scheme.
    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Glyph shown on the toggle control. The icon advertises the scheme a
    /// toggle would switch to, so dark mode shows the sun.
    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Light => "\u{1F319}",
            Theme::Dark => "\u{2600}\u{FE0F}",
        }
    }
}

impl From<&str> for Theme {
    fn from(s: &str) -> Self {
        match s {
            "dark" => Theme::Dark,
            "light" => Theme::Light,
            _ => Theme::Light,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

/// Owns the active color scheme and its persistence rules.
///
/// A stored preference always wins over the host's system scheme, and once
/// the user toggles explicitly the controller stops following system scheme
/// changes for the rest of the session.
#[derive(Debug)]
pub struct ThemeController {
    current: Theme,
    explicit: bool,
    transition: EffectTime,
}

impl ThemeController {
    /// Resolve the initial scheme and apply it to the stage root.
    ///
    /// Initialization paints the root directly: no transition window opens
    /// and no `ThemeChanged` event fires, so a stored dark preference does
    /// not flash light on load.
    pub fn initialize(
        prefs: &dyn PreferenceStore,
        system: Option<Theme>,
        transition: EffectTime,
        stage: &mut Stage,
    ) -> Self {
        let (current, explicit) = match prefs.get(PREF_KEY) {
            Some(value) => (Theme::from(value.as_str()), true),
            None => (system.unwrap_or(Theme::Light), false),
        };
        let controller = Self {
            current,
            explicit,
            transition,
        };
        controller.apply(stage);
        controller
    }

    #[inline]
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Whether the user has toggled the theme this session or a stored
    /// preference was found on load.
    #[inline]
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// Flip the scheme in response to a user action.
    ///
    /// Opens the transition window on the root, schedules its close, and
    /// persists the new scheme with a single store write. Persistence
    /// failure is logged and does not undo the visual change.
    pub fn toggle(
        &mut self,
        prefs: &mut dyn PreferenceStore,
        scheduler: &mut TimerScheduler,
        stage: &mut Stage,
        events: &mut EventDispatcher,
    ) -> Result<(), EffectError> {
        self.current = self.current.toggled();
        self.explicit = true;
        self.apply(stage);

        stage.root_mut().theme_transition = true;
        scheduler.schedule(self.transition, |ctx| {
            ctx.stage.root_mut().theme_transition = false;
            Ok(())
        });

        if let Err(err) = prefs.set(PREF_KEY, self.current.name()) {
            warn!("theme preference not persisted: {}", err);
        }

        events.emit(EffectEvent::ThemeChanged {
            theme: self.current,
            explicit: true,
        });
        Ok(())
    }

    /// React to the host reporting a system scheme change.
    ///
    /// Ignored once the user has chosen explicitly. A followed change is
    /// applied without persistence and without a transition window.
    pub fn system_scheme_changed(
        &mut self,
        scheme: Theme,
        stage: &mut Stage,
        events: &mut EventDispatcher,
    ) -> Result<(), EffectError> {
        if self.explicit {
            debug!(
                "ignoring system scheme {} (explicit preference active)",
                scheme.name()
            );
            return Ok(());
        }
        if scheme == self.current {
            return Ok(());
        }
        self.current = scheme;
        self.apply(stage);
        events.emit(EffectEvent::ThemeChanged {
            theme: scheme,
            explicit: false,
        });
        Ok(())
    }

    fn apply(&self, stage: &mut Stage) {
        let root = stage.root_mut();
        root.theme = self.current;
        root.icon = self.current.icon().to_string();
    }
}
