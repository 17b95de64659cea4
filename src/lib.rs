//! Minefield - clearance training mission on a small discrete map
//!
//! Aerial scouts scan map units so sensor estimates can be bought for them;
//! a ground vehicle detects and clears mines on its way to the end location.

pub mod command;
pub mod core;
pub mod map;
pub mod mission;
