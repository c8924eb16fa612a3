//! storystrip
//!
//! Layout, interpolation and interaction engine for a horizontal strip of
//! story items that morphs between a compact row of overlapping small
//! circles and an expanded, scrollable row of full-size circles with names.
//!
//! The engine ([`strip`]) is pure: the host feeds it an expanding height,
//! pointer events and frame ticks, and reads back geometry, a draw plan and
//! queued events. Everything that touches the outside world lives in the
//! shell modules ([`config`], [`logging`], [`source`], [`view`]).

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod strip;
pub mod view;
