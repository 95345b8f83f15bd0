use novawm_core::types::{Color, MarginStyle, MenuItemStyle, MenuStyle, Point};
use novawm_toolkit::{
    ButtonEvent, ButtonKind, MenuId, MenuItemId, MenuItemState, MenuMode, Scene, BTN_LEFT, BTN_RIGHT,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::cell::Cell;
use std::rc::Rc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn style() -> MenuStyle {
    MenuStyle {
        border: MarginStyle {
            width: 2,
            color: Color::BLACK,
        },
        margin: MarginStyle {
            width: 1,
            color: Color::BLACK,
        },
        item: MenuItemStyle {
            width: 100,
            height: 20,
            ..MenuItemStyle::default()
        },
    }
}

fn build_menu(scene: &mut Scene, labels: &[&str]) -> (MenuId, Vec<MenuItemId>) {
    let style = style();
    let menu = scene.create_menu(&style).unwrap();
    let items = labels
        .iter()
        .map(|label| {
            let item = scene.create_menu_item(label, &style.item).unwrap();
            scene.menu_add_item(menu, item).unwrap();
            item
        })
        .collect();
    (menu, items)
}

fn count_triggers(scene: &Scene, item: MenuItemId) -> (Rc<Cell<usize>>, novawm_toolkit::Listener) {
    let count = Rc::new(Cell::new(0));
    let counter = Rc::clone(&count);
    let listener = scene
        .menu_item_triggered(item)
        .unwrap()
        .connect(move |_| counter.set(counter.get() + 1));
    (count, listener)
}

/// Main menu with "Open" (submenu "Recent" holding "file.txt") and "Quit".
struct Fixture {
    scene: Scene,
    menu: MenuId,
    open: MenuItemId,
    quit: MenuItemId,
    submenu: MenuId,
    recent: MenuItemId,
}

fn fixture() -> Fixture {
    init_tracing();
    let mut scene = Scene::default();
    let (submenu, sub_items) = build_menu(&mut scene, &["file.txt"]);
    let style = style();
    let menu = scene.create_menu(&style).unwrap();
    let open = scene.create_menu_item("Open", &style.item).unwrap();
    scene.menu_item_set_submenu(open, Some(submenu)).unwrap();
    scene.menu_add_item(menu, open).unwrap();
    let quit = scene.create_menu_item("Quit", &style.item).unwrap();
    scene.menu_add_item(menu, quit).unwrap();
    Fixture {
        scene,
        menu,
        open,
        quit,
        submenu,
        recent: sub_items[0],
    }
}

#[test]
fn submenu_starts_closed_and_opens_at_item_corner() {
    let mut f = fixture();
    assert!(!f.scene.menu_is_open(f.submenu).unwrap());
    assert_eq!(f.scene.menu_parent_item(f.submenu).unwrap(), Some(f.open));
    assert_eq!(f.scene.pane_popups(f.menu).unwrap(), &[f.submenu.element()]);

    f.scene.pointer_motion(f.menu, Point::new(10.0, 10.0), 0).unwrap();
    assert_eq!(f.scene.menu_item_state(f.open).unwrap(), MenuItemState::Highlighted);
    assert!(f.scene.menu_is_open(f.submenu).unwrap());
    assert_eq!(f.scene.position(f.submenu).unwrap(), Point::new(102, 2));
}

#[test]
fn pointer_travels_into_open_submenu() {
    let mut f = fixture();
    f.scene.pointer_motion(f.menu, Point::new(10.0, 10.0), 0).unwrap();
    f.scene.pointer_motion(f.menu, Point::new(110.0, 10.0), 1).unwrap();

    assert!(!f.scene.pointer_inside(f.open).unwrap());
    assert_eq!(f.scene.menu_item_state(f.open).unwrap(), MenuItemState::Highlighted);
    assert_eq!(f.scene.menu_item_state(f.recent).unwrap(), MenuItemState::Highlighted);
    assert!(f.scene.menu_is_open(f.submenu).unwrap());
}

#[test]
fn highlighting_a_sibling_closes_submenu() {
    let mut f = fixture();
    f.scene.pointer_motion(f.menu, Point::new(10.0, 10.0), 0).unwrap();
    f.scene.pointer_motion(f.menu, Point::new(110.0, 10.0), 1).unwrap();
    f.scene.pointer_motion(f.menu, Point::new(10.0, 30.0), 2).unwrap();

    assert!(!f.scene.menu_is_open(f.submenu).unwrap());
    assert_eq!(f.scene.menu_item_state(f.open).unwrap(), MenuItemState::Enabled);
    assert_eq!(f.scene.menu_item_state(f.recent).unwrap(), MenuItemState::Enabled);
    assert_eq!(f.scene.menu_highlighted_item(f.menu).unwrap(), Some(f.quit));
}

#[test]
fn closing_submenu_unhighlights_item_left_by_pointer() {
    let mut f = fixture();
    f.scene.pointer_motion(f.menu, Point::new(10.0, 10.0), 0).unwrap();
    f.scene.pointer_motion(f.menu, Point::new(110.0, 10.0), 1).unwrap();

    f.scene.menu_set_open(f.submenu, false).unwrap();
    assert_eq!(f.scene.menu_item_state(f.open).unwrap(), MenuItemState::Enabled);
    assert_eq!(f.scene.menu_highlighted_item(f.menu).unwrap(), None);
}

#[test]
fn closing_submenu_keeps_item_under_pointer_highlighted() {
    let mut f = fixture();
    f.scene.pointer_motion(f.menu, Point::new(10.0, 10.0), 0).unwrap();

    f.scene.menu_set_open(f.submenu, false).unwrap();
    assert_eq!(f.scene.menu_item_state(f.open).unwrap(), MenuItemState::Highlighted);
}

#[test]
fn closing_main_menu_closes_submenus() {
    let mut f = fixture();
    f.scene.pointer_motion(f.menu, Point::new(10.0, 10.0), 0).unwrap();
    f.scene.pointer_motion(f.menu, Point::new(110.0, 10.0), 1).unwrap();

    f.scene.menu_set_open(f.menu, false).unwrap();
    assert!(!f.scene.menu_is_open(f.submenu).unwrap());
    assert_eq!(f.scene.menu_highlighted_item(f.menu).unwrap(), None);
    assert_eq!(f.scene.menu_highlighted_item(f.submenu).unwrap(), None);
}

#[test]
fn mode_propagates_to_submenus() {
    let mut f = fixture();
    f.scene.menu_set_mode(f.menu, MenuMode::RightClick).unwrap();
    assert_eq!(f.scene.menu_mode(f.submenu).unwrap(), MenuMode::RightClick);
}

#[test]
fn destroying_menu_destroys_submenus() {
    let mut f = fixture();
    f.scene.destroy(f.menu).unwrap();
    assert!(!f.scene.contains(f.submenu));
    assert!(!f.scene.contains(f.recent));
    assert!(f.scene.is_empty());
}

#[test]
fn replacing_submenu_destroys_the_old_one() {
    let mut f = fixture();
    let (replacement, _) = build_menu(&mut f.scene, &["other"]);
    f.scene.menu_item_set_submenu(f.open, Some(replacement)).unwrap();
    assert!(!f.scene.contains(f.submenu));
    assert_eq!(f.scene.menu_item_submenu(f.open).unwrap(), Some(replacement));
    assert_eq!(f.scene.pane_popups(f.menu).unwrap(), &[replacement.element()]);
}

#[test]
fn highlighted_item_joining_a_menu_takes_over_the_highlight() {
    let mut scene = Scene::default();
    let (menu, items) = build_menu(&mut scene, &["Copy"]);
    scene.menu_request_item_highlight(menu, Some(items[0])).unwrap();

    let style = style();
    let paste = scene.create_menu_item("Paste", &style.item).unwrap();
    assert!(scene.menu_item_set_highlighted(paste, true).unwrap());
    scene.menu_add_item(menu, paste).unwrap();
    assert_eq!(scene.menu_highlighted_item(menu).unwrap(), Some(paste));
    assert_eq!(scene.menu_item_state(items[0]).unwrap(), MenuItemState::Enabled);
    assert_eq!(scene.menu_highlighted_count(menu).unwrap(), 1);

    let cut = scene.create_menu_item("Cut", &style.item).unwrap();
    scene.menu_add_item(menu, cut).unwrap();
    scene.menu_request_item_highlight(menu, Some(cut)).unwrap();
    assert_eq!(scene.menu_item_state(paste).unwrap(), MenuItemState::Enabled);
    assert_eq!(scene.menu_highlighted_count(menu).unwrap(), 1);
}

#[test]
fn highlighted_item_brings_its_open_submenu_along() {
    let mut scene = Scene::default();
    let (menu, _) = build_menu(&mut scene, &["Copy"]);
    let (submenu, _) = build_menu(&mut scene, &["file.txt"]);
    let style = style();
    let open = scene.create_menu_item("Open", &style.item).unwrap();
    scene.menu_item_set_submenu(open, Some(submenu)).unwrap();
    scene.menu_item_set_highlighted(open, true).unwrap();

    scene.menu_add_item(menu, open).unwrap();
    assert!(scene.menu_is_open(submenu).unwrap());
    assert_eq!(scene.position(submenu).unwrap(), Point::new(102, 23));
}

#[rstest]
#[case(MenuMode::Normal, BTN_LEFT, ButtonKind::Click, 1)]
#[case(MenuMode::Normal, BTN_LEFT, ButtonKind::Up, 0)]
#[case(MenuMode::Normal, BTN_RIGHT, ButtonKind::Click, 0)]
#[case(MenuMode::RightClick, BTN_RIGHT, ButtonKind::Up, 1)]
#[case(MenuMode::RightClick, BTN_RIGHT, ButtonKind::Click, 0)]
#[case(MenuMode::RightClick, BTN_LEFT, ButtonKind::Click, 0)]
fn mode_decides_which_button_triggers(
    #[case] mode: MenuMode,
    #[case] button: u32,
    #[case] kind: ButtonKind,
    #[case] expected: usize,
) {
    let mut scene = Scene::default();
    let (menu, items) = build_menu(&mut scene, &["Copy"]);
    scene.menu_set_mode(menu, mode).unwrap();
    let (count, _listener) = count_triggers(&scene, items[0]);

    scene.pointer_motion(menu, Point::new(10.0, 10.0), 0).unwrap();
    let claimed = scene.pointer_button(menu, &ButtonEvent::new(button, kind, 1)).unwrap();
    assert!(claimed);
    assert_eq!(count.get(), expected);
}

#[test]
fn disabled_item_never_triggers() {
    let mut scene = Scene::default();
    let (menu, items) = build_menu(&mut scene, &["Paste"]);
    scene.menu_item_set_enabled(items[0], false).unwrap();
    let (count, _listener) = count_triggers(&scene, items[0]);

    scene.pointer_motion(menu, Point::new(10.0, 10.0), 0).unwrap();
    scene
        .pointer_button(menu, &ButtonEvent::new(BTN_LEFT, ButtonKind::Click, 1))
        .unwrap();
    assert_eq!(count.get(), 0);
    assert_eq!(scene.menu_highlighted_item(menu).unwrap(), None);
}

#[test]
fn button_outside_items_is_not_claimed() {
    let mut scene = Scene::default();
    let (menu, items) = build_menu(&mut scene, &["Cut"]);
    let (count, _listener) = count_triggers(&scene, items[0]);

    scene.pointer_motion(menu, Point::new(500.0, 500.0), 0).unwrap();
    let claimed = scene
        .pointer_button(menu, &ButtonEvent::new(BTN_LEFT, ButtonKind::Click, 1))
        .unwrap();
    assert!(!claimed);
    assert_eq!(count.get(), 0);
}

#[test]
fn dropped_listener_stops_receiving() {
    let mut scene = Scene::default();
    let (menu, items) = build_menu(&mut scene, &["Copy"]);
    let (count, listener) = count_triggers(&scene, items[0]);
    scene.pointer_motion(menu, Point::new(10.0, 10.0), 0).unwrap();
    let click = ButtonEvent::new(BTN_LEFT, ButtonKind::Click, 1);

    scene.pointer_button(menu, &click).unwrap();
    drop(listener);
    scene.pointer_button(menu, &click).unwrap();
    assert_eq!(count.get(), 1);
}
