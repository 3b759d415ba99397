//! Picker window placement
//!
//! All coordinates are logical pixels in the desktop space of the screen
//! holding the cursor.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::shared::types::{CursorPosition, ScreenBounds, WindowPosition};

pub const PICKER_WIDTH: f64 = 480.0;
pub const PICKER_HEIGHT: f64 = 360.0;

const CURSOR_OFFSET: f64 = 20.0;
const CURSOR_OFFSET_CENTERED: f64 = 50.0;
/// Cursor further than this from every edge counts as "mid-screen"
const EDGE_THRESHOLD: f64 = 100.0;
const MENU_BAR_RIGHT_MARGIN: f64 = 20.0;
const MENU_BAR_TOP_MARGIN: f64 = 30.0;

/// Where the picker appears when shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../ui/bindings/")]
pub enum PickerPlacement {
    /// Next to the mouse cursor
    #[default]
    MouseRelative,
    /// Top right, under the menu bar icons
    MenuBar,
    Center,
}

impl PickerPlacement {
    pub const ALL: [PickerPlacement; 3] = [Self::MouseRelative, Self::MenuBar, Self::Center];

    /// Stable identifier used for tray menu ids and env config
    pub fn key(self) -> &'static str {
        match self {
            Self::MouseRelative => "mouse",
            Self::MenuBar => "menubar",
            Self::Center => "center",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|placement| placement.key().eq_ignore_ascii_case(key.trim()))
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::MouseRelative => "Near Mouse Cursor",
            Self::MenuBar => "Near Menu Bar",
            Self::Center => "Center of Screen",
        }
    }

    /// Top-left corner for a window of `size` on `screen`.
    ///
    /// `cursor` is only consulted in [`PickerPlacement::MouseRelative`].
    pub fn position(
        self,
        cursor: CursorPosition,
        screen: ScreenBounds,
        size: (f64, f64),
    ) -> WindowPosition {
        match self {
            Self::MouseRelative => mouse_relative(cursor, screen, size),
            Self::MenuBar => WindowPosition {
                x: screen.x + screen.width - size.0 - MENU_BAR_RIGHT_MARGIN,
                y: screen.y + MENU_BAR_TOP_MARGIN,
            },
            Self::Center => WindowPosition {
                x: screen.x + (screen.width - size.0) / 2.0,
                y: screen.y + (screen.height - size.1) / 2.0,
            },
        }
    }
}

fn mouse_relative(cursor: CursorPosition, screen: ScreenBounds, (width, height): (f64, f64)) -> WindowPosition {
    let right = screen.x + screen.width;
    let bottom = screen.y + screen.height;

    let mid_screen = cursor.x > screen.x + EDGE_THRESHOLD
        && cursor.y > screen.y + EDGE_THRESHOLD
        && cursor.x < right - EDGE_THRESHOLD
        && cursor.y < bottom - EDGE_THRESHOLD;

    let (mut x, mut y, offset) = if mid_screen {
        (
            cursor.x - width / 2.0,
            cursor.y - height / 2.0,
            CURSOR_OFFSET_CENTERED,
        )
    } else {
        (cursor.x + CURSOR_OFFSET, cursor.y + CURSOR_OFFSET, CURSOR_OFFSET)
    };

    // Flip to the other side of the cursor instead of running off screen
    if x + width > right {
        x = cursor.x - width - offset;
    }
    if y + height > bottom {
        y = cursor.y - height - offset;
    }

    WindowPosition {
        x: x.max(screen.x),
        y: y.max(screen.y),
    }
}
