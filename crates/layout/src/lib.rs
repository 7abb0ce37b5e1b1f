//! Layout: places gallery tiles on screen before any scrolling.
//!
//! # Invariants
//! - Placement depends only on the screen size and the config; it never reads
//!   scroll state.
//! - Every tile index below the tile count gets a rectangle once laid out.

mod grid;

pub use grid::{GridLayout, GridLayoutConfig, LayoutError};

pub fn crate_info() -> &'static str {
    "gallery-layout v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("layout"));
    }
}
