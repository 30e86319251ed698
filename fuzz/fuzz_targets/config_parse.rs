//! Fuzz target for pipeline configuration YAML parsing.

#![no_main]

use cropmark::config::fuzz_parse_config;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(yaml) = std::str::from_utf8(data) else {
        return;
    };

    let _ = fuzz_parse_config(yaml);
});
