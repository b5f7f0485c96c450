//! Headless testing for flick widgets.
//!
//! ```
//! use flick_test::Selector;
//!
//! let selector = Selector::parse("[data-testid='wifi']").expect("valid selector");
//! assert_eq!(selector, Selector::TestId("wifi".to_string()));
//! ```

mod harness;
mod selector;

pub use harness::{Harness, Violation, FRAME_SECS, MAX_SETTLE_FRAMES};
pub use selector::{Selector, SelectorError};
