//! Flick: an on/off toggle that is tapped or flicked.
//!
//! ```
//! use flick::prelude::*;
//!
//! let mut toggle = FlickToggle::new();
//! toggle.set_label_on("Wi-Fi on");
//! toggle.set_label_off("Wi-Fi off");
//! toggle.toggle();
//! assert_eq!(toggle.displayed_text(), "Wi-Fi off");
//! ```

pub use flick_core::*;
pub use flick_widgets as widgets;
pub use flick_yaml as yaml;

use flick_widgets::FlickToggle;
use flick_yaml::ParseError;
use log::debug;
use std::collections::BTreeMap;

/// Commonly used items.
pub mod prelude {
    pub use flick_core::{
        Constraints, DisplayMetrics, Event, Point, Rect, Size, TextUnit, Widget, WidgetId,
    };
    pub use flick_widgets::{FlickChanged, FlickObserver, FlickToggle};
    pub use flick_yaml::{FlickAttributes, ParseError};
}

/// Build one toggle per entry of an attribute sheet, keyed by entry name.
pub fn toggles_from_yaml(
    yaml: &str,
    metrics: DisplayMetrics,
) -> Result<BTreeMap<String, FlickToggle>, ParseError> {
    let sheet = flick_yaml::parse_sheet(yaml)?;
    debug!("building {} toggles from sheet", sheet.len());
    Ok(sheet
        .into_iter()
        .map(|(name, attributes)| (name, FlickToggle::from_attributes(&attributes, metrics)))
        .collect())
}
