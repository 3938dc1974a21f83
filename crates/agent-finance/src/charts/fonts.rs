//! Embedded chart font
//!
//! The bitmap backend has no system font lookup, so DejaVu Sans is compiled
//! into the binary and registered under the `sans-serif` family once.

use crate::error::{FinanceError, Result};
use plotters::style::{FontStyle, register_font};
use std::sync::OnceLock;

/// Family name every chart text style uses
pub const FONT_FAMILY: &str = "sans-serif";

static DEJAVU_SANS: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

static REGISTERED: OnceLock<bool> = OnceLock::new();

/// Register the embedded font with plotters if not done yet
pub fn ensure_registered() -> Result<()> {
    let ok = *REGISTERED.get_or_init(|| {
        let ok = register_font(FONT_FAMILY, FontStyle::Normal, DEJAVU_SANS).is_ok();
        if ok {
            tracing::debug!(family = FONT_FAMILY, "Registered chart font");
        }
        ok
    });

    if ok {
        Ok(())
    } else {
        Err(FinanceError::render("font", "embedded font could not be parsed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_is_idempotent() {
        ensure_registered().unwrap();
        ensure_registered().unwrap();
    }
}
