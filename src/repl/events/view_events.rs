//! # View Events
//!
//! Events emitted by the view model when parts of the screen need redrawing.

/// Screen regions that can be redrawn independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Pending-operation line, display and error panel
    Display,
    /// History panel
    History,
    /// Bottom status bar
    StatusBar,
}

/// Events emitted when view updates are needed
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Full screen redraw required (terminal resize, first frame)
    FullRedrawRequired,

    /// A single region needs redrawing
    RegionRedrawRequired { region: Region },
}

impl ViewEvent {
    pub fn display() -> Self {
        ViewEvent::RegionRedrawRequired {
            region: Region::Display,
        }
    }

    pub fn history() -> Self {
        ViewEvent::RegionRedrawRequired {
            region: Region::History,
        }
    }

    pub fn status_bar() -> Self {
        ViewEvent::RegionRedrawRequired {
            region: Region::StatusBar,
        }
    }
}
