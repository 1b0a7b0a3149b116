//! Fuzz target: `StatusModel` render path
//!
//! Drives arbitrary sequences of raw status codes and text writes through
//! the status model and verifies:
//! - No panics under arbitrary input
//! - The current status is always a known variant
//! - A repeated identical write never renders twice
//!
//! cargo fuzz run fuzz_status_render

#![no_main]

use airlock::status::{DisplayStatus, Render, StatusModel};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut model = StatusModel::new(Vec::new());
    for pair in data.chunks(2) {
        match pair {
            [0, len] => {
                let text = "x".repeat(usize::from(*len % 8));
                model.set_text(&text, false);
                assert!(!model.set_text(&text, false));
            }
            [_, code] => {
                let code = *code as i8;
                model.set_status_code(code);
                assert!(DisplayStatus::from_code(model.current().code()).is_some());
                if let Some(status) = DisplayStatus::from_code(code) {
                    assert_eq!(model.set_status(status), Render::Unchanged);
                }
            }
            _ => {}
        }
    }
});
