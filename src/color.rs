//! Colour derivation for inherited task colours.
//!
//! Tasks inherit a lightened variant of their project's group colour. The
//! derivation works on a 24-bit hex colour: each 8-bit channel is adjusted by
//! a signed amount and clamped to its own range, then repacked in the same
//! bit positions it was read from. Stored colours round-trip exactly.

use crate::error::{ErrorCode, GanttError, Result};
use regex::Regex;
use std::sync::OnceLock;

fn hex_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^#?[0-9a-fA-F]{6}$").expect("valid hex pattern"))
}

/// Lighten (positive amount) or darken (negative amount) a 6-digit hex colour.
///
/// The `#` prefix is optional and preserved in the output. Anything that is
/// not six hex digits fails with `InvalidColorFormat`; group colours come
/// from remote records and are not trusted.
pub fn derive_color(hex: &str, amount: i32) -> Result<String> {
    if !hex_pattern().is_match(hex) {
        return Err(
            GanttError::new(ErrorCode::InvalidColorFormat, format!("not a 6-digit hex colour: {hex:?}"))
                .with_context(serde_json::json!({ "value": hex })),
        );
    }

    let (use_pound, digits) = match hex.strip_prefix('#') {
        Some(rest) => (true, rest),
        None => (false, hex),
    };

    // Validated above, so the parse cannot fail.
    let num = u32::from_str_radix(digits, 16).map_err(|e| {
        GanttError::from_error(ErrorCode::InvalidColorFormat, e)
    })?;

    let hi = clamp_channel((num >> 16) as i32 + amount);
    let mid = clamp_channel(((num >> 8) & 0x00FF) as i32 + amount);
    let lo = clamp_channel((num & 0x0000FF) as i32 + amount);

    let packed = lo | (mid << 8) | (hi << 16);
    Ok(if use_pound {
        format!("#{:06x}", packed)
    } else {
        format!("{:06x}", packed)
    })
}

fn clamp_channel(value: i32) -> u32 {
    value.clamp(0, 255) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lighten_mid_grey() {
        // 0x80 + 50 = 0xb2 in every channel
        assert_eq!(derive_color("#808080", 50).unwrap(), "#b2b2b2");
    }

    #[test]
    fn test_prefix_preserved() {
        assert_eq!(derive_color("808080", 50).unwrap(), "b2b2b2");
        assert!(derive_color("#808080", 50).unwrap().starts_with('#'));
    }

    #[test]
    fn test_channels_clamp_independently() {
        // High channel saturates, the others still move
        assert_eq!(derive_color("#ff0080", 50).unwrap(), "#ff32b2");
        // Darkening clamps at zero
        assert_eq!(derive_color("#100080", -32).unwrap(), "#000060");
    }

    #[test]
    fn test_darken_clamps_to_zero() {
        assert_eq!(derive_color("#0a0a0a", -50).unwrap(), "#000000");
    }

    #[test]
    fn test_leading_zero_padding() {
        // A dark leading channel keeps its zero padding
        assert_eq!(derive_color("#0a2030", -5).unwrap(), "#051b2b");
    }

    #[test]
    fn test_exact_bytes_for_known_colour() {
        // #3366CC + 50 -> 0x33+0x32=0x65, 0x66+0x32=0x98, 0xcc+0x32=0xfe
        assert_eq!(derive_color("#3366CC", 50).unwrap(), "#6598fe");
    }

    #[test]
    fn test_rejects_malformed_input() {
        for bad in ["", "#", "#fff", "fff", "#12345", "#1234567", "#gggggg", "red"] {
            let err = derive_color(bad, 50).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidColorFormat as u16, "input {bad:?}");
        }
    }

    #[test]
    fn test_zero_amount_is_identity_modulo_case() {
        assert_eq!(derive_color("#3366CC", 0).unwrap(), "#3366cc");
    }
}
