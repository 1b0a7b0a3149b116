//! Fuzz target: `AirlockConfig::from_json`
//!
//! Feeds arbitrary bytes to the config loader and verifies:
//! - No panics under arbitrary input
//! - Every accepted config also passes `validate()`
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use airlock::config::AirlockConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = AirlockConfig::from_json(text) {
        assert!(config.validate().is_ok());
        assert!(config.tick_interval_ms > 0);
    }
});
