//! Views derived from a telescope.
//!
//! Each view registers one observer on its parent's stream and forwards its
//! own evolutions to the parent, rewritten for the parent's value type.

mod dimap;
mod magnify;
mod uplift;
