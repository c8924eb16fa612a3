//! Tests for the strip's interaction handling.

use super::*;
use crate::model::{ContentElement, LetterThumbnail};
use crate::strip::events::CursorShape;

// ===== Test Helpers =====

const FULL: Rect = Rect::new(0, 0, 40, 6);
const FRAME: Duration = Duration::from_millis(200);

fn content(count: u64) -> Content {
    Content::new(
        (0..count)
            .map(|id| {
                ContentElement::new(
                    StoryId::new(id),
                    LetterThumbnail::shared(format!("Friend {id}")),
                    format!("Friend {id}"),
                )
            })
            .collect(),
    )
}

fn compact_list(count: u64) -> StoriesList {
    let mut list =
        StoriesList::new(StripStyle::default(), StripConfig::default()).expect("valid style");
    list.set_layout_constraints(Point::new(0, 0), Alignment::Left, FULL);
    list.show_content(content(count));
    list.take_events();
    list
}

fn expanded_list(count: u64) -> StoriesList {
    let mut list = compact_list(count);
    list.request_expanded(true);
    list.set_expanded_height(FULL.height, false);
    list.tick(FRAME);
    assert_eq!(list.state(), StripState::Expanded);
    list.take_events();
    list
}

fn clicked(events: &[StripEvent]) -> Vec<StoryId> {
    events
        .iter()
        .filter_map(|event| match event {
            StripEvent::Clicked(id) => Some(*id),
            _ => None,
        })
        .collect()
}

// ===== Geometry =====

#[test]
fn compact_geometry_covers_three_circles() {
    let list = compact_list(5);
    // left + photo_left + photo + 2 * shift + photo_left + left
    assert_eq!(list.geometry(), Rect::new(0, 0, 14, 4));
}

#[test]
fn compact_geometry_respects_alignment() {
    let mut list = compact_list(5);
    list.set_layout_constraints(Point::new(50, 2), Alignment::Right, FULL);
    assert_eq!(list.geometry(), Rect::new(36, 2, 14, 4));
}

#[test]
fn transitioning_geometry_unites_both_boxes() {
    let mut list = compact_list(5);
    list.set_layout_constraints(Point::new(10, 8), Alignment::Left, FULL);

    list.set_expanded_height(3, false);

    assert_eq!(list.state(), StripState::Transitioning);
    assert_eq!(list.geometry(), Rect::new(0, 0, 40, 12));
}

#[test]
fn expanded_geometry_is_full_box() {
    let list = expanded_list(5);
    assert_eq!(list.geometry(), FULL);
    assert_eq!(list.scroll_max(), 11);
}

#[test]
fn empty_snapshot_collapses_geometry() {
    let mut list = compact_list(5);
    assert_eq!(list.show_content(Content::default()), SnapshotOutcome::Cleared);
    assert!(list.is_empty());
    assert!(list.geometry().is_empty());
}

#[test]
fn identical_snapshot_requests_nothing() {
    let mut list = compact_list(3);
    let again = Content::new(list.items().iter().map(|i| i.element().clone()).collect());
    list.take_repaint();

    assert_eq!(list.show_content(again), SnapshotOutcome::Unchanged);
    assert!(!list.take_repaint());
    assert!(list.take_events().is_empty());
}

#[test]
fn collapsed_geometry_starts_at_first_visible_compact_slot() {
    let list = compact_list(5);
    assert_eq!(list.collapsed_geometry_current(), (Rect::new(1, 0, 13, 4), 0.0));
}

#[test]
fn collapsed_geometry_is_empty_when_fully_expanded() {
    let list = expanded_list(5);
    assert_eq!(list.collapsed_geometry_current(), (Rect::default(), 1.0));
}

// ===== Click vs drag =====

#[test]
fn tap_while_expanded_clicks_pressed_item() {
    let mut list = expanded_list(5);

    list.mouse_press(Point::new(22, 1));
    list.mouse_release(Point::new(22, 1));

    let events = list.take_events();
    assert_eq!(clicked(&events), vec![StoryId::new(2)]);
    assert!(events.contains(&StripEvent::CursorChanged(CursorShape::Pointer)));
}

#[test]
fn tap_while_compact_requests_expansion() {
    let mut list = compact_list(5);

    list.mouse_press(Point::new(5, 1));
    list.mouse_release(Point::new(5, 1));

    let events = list.take_events();
    assert!(clicked(&events).is_empty());
    assert!(events.contains(&StripEvent::ExpandedToggled(true)));
    assert!(list.is_expanded());
}

#[test]
fn drag_scrolls_and_never_clicks() {
    let mut list = expanded_list(5);

    list.mouse_press(Point::new(30, 1));
    list.mouse_move(Point::new(24, 1));
    list.mouse_release(Point::new(22, 1));

    assert_eq!(list.scroll_left(), 8);
    let events = list.take_events();
    assert!(clicked(&events).is_empty());
    assert!(events.contains(&StripEvent::LoadMoreRequested));
}

#[test]
fn release_on_another_item_does_not_click() {
    let mut list = expanded_list(5);

    // No move in between, so no drag starts.
    list.mouse_press(Point::new(5, 1));
    list.mouse_release(Point::new(25, 1));

    assert!(clicked(&list.take_events()).is_empty());
}

#[test]
fn compact_press_expands_even_when_released_elsewhere() {
    let mut list = compact_list(5);

    list.mouse_press(Point::new(5, 1));
    assert_eq!(list.selected(), Some(0));
    list.mouse_move(Point::new(9, 1));
    list.mouse_release(Point::new(9, 1));

    let events = list.take_events();
    assert_eq!(list.selected(), Some(2));
    assert!(events.contains(&StripEvent::ExpandedToggled(true)));
    assert!(clicked(&events).is_empty());
    assert!(list.is_expanded());
}

#[test]
fn tap_while_transitioning_never_clicks() {
    let mut list = compact_list(5);
    list.request_expanded(true);
    list.set_expanded_height(3, false);
    list.tick(FRAME);
    assert_eq!(list.state(), StripState::Transitioning);
    list.take_events();

    list.mouse_press(Point::new(15, 2));
    list.mouse_release(Point::new(15, 2));

    let events = list.take_events();
    assert!(clicked(&events).is_empty());
    assert!(!events
        .iter()
        .any(|event| matches!(event, StripEvent::ExpandedToggled(_))));
}

// ===== Wheel =====

#[test]
fn wheel_is_ignored_while_compact() {
    let mut list = compact_list(5);
    assert!(!list.wheel(-120, 0));
    assert_eq!(list.scroll_left(), 0);
}

#[test]
fn wheel_scrolls_expanded_strip() {
    let mut list = expanded_list(5);

    assert!(list.wheel(-120, -4));

    assert_eq!(list.scroll_left(), 4);
    let events = list.take_events();
    assert!(events.contains(&StripEvent::ExpandedToggled(true)));
    assert!(events.contains(&StripEvent::LoadMoreRequested));
}

#[test]
fn vertical_wheel_is_not_consumed() {
    let mut list = expanded_list(5);
    assert!(!list.wheel(0, 0));
}

// ===== Animation =====

#[test]
fn expand_animation_ticks_report_collapsed_geometry() {
    let mut list = compact_list(5);
    list.request_expanded(true);
    list.take_events();

    assert!(list.tick(Duration::from_millis(50)));

    assert_eq!(list.take_events(), vec![StripEvent::CollapsedGeometryChanged]);
    assert!(list.is_animating());
}

#[test]
fn host_height_drives_expansion_through_layout() {
    let mut list = compact_list(5);

    list.set_expanded_height(5, false);
    list.layout();

    assert!(list.is_expanded());
    assert!(list.take_events().contains(&StripEvent::ExpandedToggled(true)));
}

// ===== Context menu =====

#[test]
fn context_menu_is_built_for_hovered_item() {
    let mut list = expanded_list(5);
    list.set_menu_populator(|id, menu| menu.add_action(format!("Open {id}"), "open"));

    let menu = list.context_menu(Some(Point::new(22, 1))).expect("menu");

    assert_eq!(menu.story, StoryId::new(2));
    assert_eq!(menu.actions[0].label, "Open 2");
    assert!(list.open_menu().is_some());

    list.menu_closed(Point::new(5, 1));
    assert!(list.open_menu().is_none());
    assert_eq!(list.selected(), Some(0));
}

#[test]
fn context_menu_requires_expanded_strip() {
    let mut list = compact_list(5);
    list.set_menu_populator(|_, menu| menu.add_action("Open", "open"));
    assert!(list.context_menu(Some(Point::new(5, 1))).is_none());
}

#[test]
fn empty_menu_is_discarded() {
    let mut list = expanded_list(5);
    list.set_menu_populator(|_, _| {});
    assert!(list.context_menu(Some(Point::new(22, 1))).is_none());
    assert!(list.open_menu().is_none());
}

// ===== Thumbnails =====

#[test]
fn thumbnail_update_requests_repaint() {
    let thumbnail = std::rc::Rc::new(LetterThumbnail::new("Ada"));
    let element = ContentElement::new(StoryId::new(1), thumbnail.clone(), "Ada");
    let mut list =
        StoriesList::new(StripStyle::default(), StripConfig::default()).expect("valid style");
    list.show_content(Content::new(vec![element]));

    assert!(list.validate_thumbnail(0));
    assert!(!list.validate_thumbnail(0));
    list.take_repaint();

    thumbnail.mark_ready();

    assert!(list.take_repaint());
}

#[test]
fn invalid_style_is_rejected() {
    let mut style = StripStyle::default();
    style.full.height = 0;
    assert!(StoriesList::new(style, StripConfig::default()).is_err());
}
