// crates/watchface-config/tests/proptest_color.rs
// ============================================================================
// Module: Color Literal Property-Based Tests
// Description: Property tests for hex color parsing and formatting.
// Purpose: Detect panics and invariants across the full value range.
// ============================================================================

//! Property-based tests for color literal invariants.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use watchface_config::HexColor;
use watchface_config::MAX_RGB24;

proptest! {
    #[test]
    fn formatted_24_bit_colors_reparse(rgb in 0u32 ..= MAX_RGB24) {
        let color = HexColor::from_rgb(rgb);
        let text = color.to_string();
        prop_assert_eq!(text.len(), 8);
        prop_assert_eq!(text.parse::<HexColor>().unwrap(), color);
    }

    #[test]
    fn wider_literals_are_rejected(rgb in (MAX_RGB24 + 1) ..= u32::MAX) {
        let literal = format!("0x{:X}", rgb);
        prop_assert!(literal.parse::<HexColor>().is_err());
        prop_assert!(!HexColor::from_rgb(rgb).is_rgb24());
    }

    #[test]
    fn short_literals_are_rejected(rgb in 0u32 ..= 0xF_FFFF) {
        let literal = format!("0x{:X}", rgb);
        prop_assert!(literal.parse::<HexColor>().is_err());
    }

    #[test]
    fn hash_prefixed_literals_are_rejected(rgb in 0u32 ..= MAX_RGB24) {
        let literal = format!("#{:06X}", rgb);
        prop_assert!(literal.parse::<HexColor>().is_err());
    }

    #[test]
    fn arbitrary_text_never_panics(text in ".*") {
        let _ = text.parse::<HexColor>();
    }
}
