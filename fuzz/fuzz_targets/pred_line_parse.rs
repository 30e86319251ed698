//! Fuzz target for single-line prediction row parsing.
//!
//! Feeds arbitrary UTF-8 lines to the `x1 y1 x2 y2 conf cls` parser,
//! checking for panics or hangs.

#![no_main]

use cropmark::ir::io_pred_txt::fuzz_parse_pred_line;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    let _ = fuzz_parse_pred_line(line);
});
