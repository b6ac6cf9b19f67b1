use std::{
  cell::RefCell,
  rc::Rc,
};

use the_default::{
  EditorMode,
  Key,
  KeyOutcome,
  OverlayRect,
  PlaceholderEditor,
  PointerButton,
  PointerEvent,
  PointerEventOutcome,
  PointerKind,
};
use the_lib::{
  placeholder::{
    Placeholder,
    PlaceholderCatalog,
  },
  render::SurfaceState,
  substitution::{
    Resolver,
    ValueDictionary,
  },
};
use the_loader::config::Config;

fn zoom_catalog() -> PlaceholderCatalog {
  PlaceholderCatalog::new([
    Placeholder::new("zoomUrl", "Zoom URL").unwrap(),
    Placeholder::new("zoomPasscode", "Zoom passcode").unwrap(),
    Placeholder::new("eventTitle", "Event title").unwrap(),
  ])
  .unwrap()
}

fn tokens(editor: &PlaceholderEditor) -> Vec<String> {
  editor
    .menu()
    .items
    .iter()
    .map(|item| item.token.clone())
    .collect()
}

#[test]
fn typing_a_partial_token_lists_matches_in_catalog_order() {
  let mut editor = PlaceholderEditor::new(zoom_catalog());
  for ch in "{zoom".chars() {
    editor.insert_text(&ch.to_string());
  }

  assert_eq!(editor.mode(), EditorMode::Suggesting);
  assert_eq!(tokens(&editor), ["{zoomUrl}", "{zoomPasscode}"]);
  assert_eq!(editor.menu().highlighted, None);
}

#[test]
fn enter_without_highlight_changes_nothing() {
  let changes = Rc::new(RefCell::new(0));
  let counter = Rc::clone(&changes);
  let mut editor =
    PlaceholderEditor::new(zoom_catalog()).on_change(move |_| *counter.borrow_mut() += 1);
  editor.handle_input("Join {zoom", 10);
  assert_eq!(*changes.borrow(), 1);

  let outcome = editor.handle_key(Key::Enter.into());

  assert_eq!(outcome, KeyOutcome::Handled);
  assert_eq!(editor.text(), "Join {zoom");
  assert_eq!(editor.caret(), 10);
  assert_eq!(editor.mode(), EditorMode::Suggesting);
  assert_eq!(editor.menu().items.len(), 2);
  assert_eq!(*changes.borrow(), 1);
}

#[test]
fn navigation_wraps_in_both_directions() {
  let mut editor = PlaceholderEditor::new(zoom_catalog());
  editor.handle_input("{zoom", 5);

  assert_eq!(editor.handle_key(Key::Up.into()), KeyOutcome::Handled);
  assert_eq!(editor.menu().highlighted, Some(1));
  editor.handle_key(Key::Down.into());
  assert_eq!(editor.menu().highlighted, Some(0));
  editor.handle_key(Key::Up.into());
  assert_eq!(editor.menu().highlighted, Some(1));
  editor.handle_key(Key::Down.into());
  assert_eq!(editor.menu().highlighted, Some(0));
}

#[test]
fn single_suggestion_keeps_the_highlight_on_it() {
  let mut editor = PlaceholderEditor::new(zoom_catalog());
  editor.handle_input("{zoomU", 6);
  assert_eq!(tokens(&editor), ["{zoomUrl}"]);

  assert!(editor.handle_key(Key::Down.into()).handled());
  assert_eq!(editor.menu().highlighted, Some(0));
  editor.handle_key(Key::Down.into());
  assert_eq!(editor.menu().highlighted, Some(0));
  editor.handle_key(Key::Up.into());
  assert_eq!(editor.menu().highlighted, Some(0));
}

#[test]
fn enter_inserts_the_highlighted_token_and_closes() {
  let mut editor = PlaceholderEditor::new(zoom_catalog());
  editor.handle_input("Join:\n  {zoom here", 13);
  editor.handle_key(Key::Down.into());
  editor.handle_key(Key::Down.into());

  assert_eq!(editor.handle_key(Key::Enter.into()), KeyOutcome::Handled);
  assert_eq!(editor.text(), "Join:\n  {zoomPasscode} here");
  assert_eq!(editor.caret(), 22);
  assert_eq!(editor.mode(), EditorMode::Idle);
  assert_eq!(editor.handle_key(Key::Down.into()), KeyOutcome::Continue);
}

#[test]
fn selecting_a_row_ignores_the_highlight() {
  let mut editor = PlaceholderEditor::new(zoom_catalog());
  editor.handle_input("{zoom", 5);
  editor.handle_key(Key::Down.into());

  assert_eq!(editor.select_suggestion(1), PointerEventOutcome::Handled);
  assert_eq!(editor.text(), "{zoomPasscode}");
  assert_eq!(editor.mode(), EditorMode::Idle);
  assert_eq!(editor.select_suggestion(0), PointerEventOutcome::Continue);
}

#[test]
fn selecting_a_missing_row_is_not_handled() {
  let mut editor = PlaceholderEditor::new(zoom_catalog());
  editor.handle_input("{zoom", 5);
  assert_eq!(editor.select_suggestion(7), PointerEventOutcome::Continue);
  assert_eq!(editor.mode(), EditorMode::Suggesting);
}

#[test]
fn pointer_press_on_a_popup_row_inserts_it() {
  let area = OverlayRect::new(0.0, 0.0, 640.0, 480.0);
  let mut editor = PlaceholderEditor::new(zoom_catalog()).with_surface(SurfaceState::default());
  editor.handle_input("{zoom", 5);
  let popup = editor.popup_rect(area, 240.0, 48.0).unwrap();

  let outside = PointerEvent::new(
    PointerKind::Down(PointerButton::Left),
    popup.x - 1.0,
    popup.y,
  );
  assert_eq!(
    editor.handle_pointer(outside, popup, 24.0),
    PointerEventOutcome::Continue
  );

  let hover = PointerEvent::new(PointerKind::Move, popup.x + 10.0, popup.y + 30.0);
  assert!(!editor.handle_pointer(hover, popup, 24.0).handled());

  let second_row = PointerEvent::new(
    PointerKind::Down(PointerButton::Left),
    popup.x + 10.0,
    popup.y + 30.0,
  );
  assert_eq!(
    editor.handle_pointer(second_row, popup, 24.0),
    PointerEventOutcome::Handled
  );
  assert_eq!(editor.text(), "{zoomPasscode}");
}

#[test]
fn configured_editor_feeds_the_resolver() {
  let config = Config::builtin().unwrap();
  let mut editor = PlaceholderEditor::from_config(&config).unwrap();
  editor.handle_input("開催日: {eventDa", 13);
  assert_eq!(tokens(&editor), ["{eventDate}"]);
  editor.handle_key(Key::Down.into());
  editor.handle_key(Key::Enter.into());
  assert_eq!(editor.text(), "開催日: {eventDate}");

  let resolver: Resolver = config.resolver().unwrap();
  let values = ValueDictionary::from([("eventDate".to_string(), "2024-12-01".to_string())]);
  assert_eq!(
    resolver.resolve(&editor.text(), &values),
    "開催日: 2024年12月01日(日)"
  );
}
