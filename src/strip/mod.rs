//! Stories strip engine.
//!
//! Pure layout, interpolation and state handling for a strip of story
//! thumbnails that blends between a compact row of overlapping circles and
//! an expanded, scrollable row with names. Nothing in here touches a
//! terminal or a clock; [`crate::view`] is one host.

pub mod animation;
pub mod drag;
pub mod draw_plan;
pub mod events;
pub mod expansion;
pub mod geometry;
pub mod hit_test;
pub mod item_store;
pub mod layout;
pub mod list;
pub mod name;
pub mod params;
pub mod scroll;
pub mod style;

pub use animation::{Animation, AnimationClock, AnimationTick, Easing};
pub use drag::{DragController, ReleaseOutcome};
pub use draw_plan::{DrawPlan, Slot, SlotItems};
pub use events::{ContextMenu, CursorShape, MenuAction, MenuPopulator, StripEvent};
pub use expansion::{ExpansionController, ExpansionTick, StripState};
pub use geometry::{Alignment, Point, PointF, Rect};
pub use hit_test::{HitTestResult, HitTester, Hover};
pub use item_store::{Item, ItemStore, NameCache, SnapshotOutcome};
pub use layout::{compute_layout, Layout, LayoutInput, Transition};
pub use list::StoriesList;
pub use params::StripConfig;
pub use scroll::ScrollController;
pub use style::{FullStyle, SmallStyle, StripStyle};
