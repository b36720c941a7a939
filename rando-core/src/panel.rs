//! Open/closed state for expandable filter and menu panels.
//!
//! [`PanelController`] is a two-state machine driven by the set of expanded
//! panel ids reported by an accordion: a non-empty set opens the panel, an
//! empty set closes it. The controller owns no selection data; closing a
//! panel leaves every filter selection untouched.
//!
//! [`FilterDrawer`] tracks which filter category, if any, is shown in the
//! side drawer, and [`MenuSection`] models menu sections whose items are
//! either plain labels or links.

/// Visual state of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PanelState {
    /// Collapsed.
    #[default]
    Closed,
    /// Expanded.
    Opened,
}

/// A state change reported by [`PanelController::on_expansion_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelTransition {
    /// State before the change.
    pub from: PanelState,
    /// State after the change.
    pub to: PanelState,
}

/// Two-state machine for one expandable panel.
///
/// # Examples
/// ```
/// use rando_core::{PanelController, PanelState};
///
/// let mut panel = PanelController::new();
/// assert_eq!(panel.state(), PanelState::Closed);
///
/// let opened = panel.on_expansion_change(&["item-0"]);
/// assert_eq!(opened.map(|t| t.to), Some(PanelState::Opened));
///
/// // Re-reporting a non-empty set changes nothing.
/// assert!(panel.on_expansion_change(&["item-0"]).is_none());
///
/// let no_ids: [&str; 0] = [];
/// assert!(panel.on_expansion_change(&no_ids).is_some());
/// assert_eq!(panel.state(), PanelState::Closed);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelController {
    state: PanelState,
}

impl PanelController {
    /// A closed panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Whether the panel is expanded.
    pub fn is_open(&self) -> bool {
        self.state == PanelState::Opened
    }

    /// Feed the accordion's expanded ids and return the transition, if any.
    pub fn on_expansion_change<S: AsRef<str>>(&mut self, expanded: &[S]) -> Option<PanelTransition> {
        let next = if expanded.is_empty() {
            PanelState::Closed
        } else {
            PanelState::Opened
        };
        if next == self.state {
            return None;
        }
        let transition = PanelTransition {
            from: self.state,
            to: next,
        };
        self.state = next;
        Some(transition)
    }
}

/// Which filter category the side drawer shows.
///
/// Closing the drawer only forgets the displayed category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterDrawer {
    displayed: Option<String>,
}

impl FilterDrawer {
    /// A hidden drawer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `category_id` in the drawer, replacing any displayed category.
    pub fn open(&mut self, category_id: impl Into<String>) {
        self.displayed = Some(category_id.into());
    }

    /// Hide the drawer.
    pub fn close(&mut self) {
        self.displayed = None;
    }

    /// Category currently displayed.
    pub fn displayed(&self) -> Option<&str> {
        self.displayed.as_deref()
    }

    /// Whether the drawer is visible.
    pub fn is_displayed(&self) -> bool {
        self.displayed.is_some()
    }
}

/// An entry within a menu section: a plain label or a link.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum MenuEntry {
    /// Text without a target.
    Label(String),
    /// Titled link.
    Link {
        /// Link text.
        title: String,
        /// Link target.
        url: String,
    },
}

impl MenuEntry {
    /// Text to display for the entry.
    pub fn title(&self) -> &str {
        match self {
            Self::Label(label) => label,
            Self::Link { title, .. } => title,
        }
    }

    /// Target URL, for links.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Label(_) => None,
            Self::Link { url, .. } => Some(url),
        }
    }
}

/// A titled menu section with optional expandable entries.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MenuSection {
    /// Section heading.
    pub title: String,
    /// Entries shown when expanded; `None` makes the heading a plain action.
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Option<Vec<MenuEntry>>,
}

impl MenuSection {
    /// Whether the section expands into entries.
    pub fn is_expandable(&self) -> bool {
        self.items.is_some()
    }
}
