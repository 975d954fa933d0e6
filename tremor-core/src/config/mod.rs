//! Configuration types
//!
//! Board-agnostic node configuration, variant presets and the config file
//! parser. Nothing here is persisted; the firmware embeds its config file
//! and falls back to the variant preset.

pub mod bits;
pub mod parse;
pub mod types;
pub mod variant;

pub use parse::{parse_config, ParseError};
pub use types::*;
pub use variant::Variant;
