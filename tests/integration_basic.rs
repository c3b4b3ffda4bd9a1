use desk_wm::window::{InitialGeometry, Position, Size, WindowStore};

fn geometry(x: i32, y: i32) -> InitialGeometry {
    InitialGeometry::new(Some(Position::new(x, y)), Some(Size::new(20, 8)))
}

#[test]
fn z_indices_start_at_baseline_and_grow() {
    let mut store: WindowStore<&str> = WindowStore::new();
    assert!(store.add_window("a", geometry(0, 0)));
    assert!(store.add_window("b", geometry(5, 5)));
    let a = store.get_window(&"a").unwrap().z_index;
    let b = store.get_window(&"b").unwrap().z_index;
    assert!(a >= 1000);
    assert!(b > a);
    assert_eq!(store.top_window(), Some(&"b"));
}

#[test]
fn focus_raises_above_everything() {
    let mut store: WindowStore<u32> = WindowStore::new();
    for id in 0..4 {
        store.add_window(id, InitialGeometry::default());
    }
    assert!(store.focus_window(&1));
    let top = store.get_window(&1).unwrap().z_index;
    assert!(store.records().filter(|r| r.id != 1).all(|r| r.z_index < top));
    assert_eq!(store.stacking_order().last(), Some(&1));
}

#[test]
fn adding_an_existing_id_keeps_its_record() {
    let mut store: WindowStore<&str> = WindowStore::new();
    store.add_window("a", geometry(1, 1));
    store.set_position(&"a", Position::new(7, 7));
    let before = store.get_window(&"a").unwrap();
    assert!(!store.add_window("a", geometry(2, 2)));
    assert_eq!(store.get_window(&"a").unwrap(), before);
}

#[test]
fn minimized_windows_leave_the_stacking_order_only() {
    let mut store: WindowStore<&str> = WindowStore::new();
    store.add_window("a", geometry(0, 0));
    store.add_window("b", geometry(0, 0));
    store.set_minimized(&"b", true);
    assert_eq!(store.stacking_order(), vec!["a"]);
    assert_eq!(store.top_window(), Some(&"a"));
    assert!(store.contains(&"b"));
}

#[test]
fn unknown_ids_leave_the_store_unchanged() {
    let mut store: WindowStore<&str> = WindowStore::new();
    store.add_window("a", geometry(0, 0));
    let before = store.clone();
    assert!(!store.focus_window(&"x"));
    assert!(!store.set_minimized(&"x", true));
    assert!(!store.set_maximized(&"x", true));
    assert!(!store.set_position(&"x", Position::new(1, 1)));
    assert!(!store.set_size(&"x", Size::new(1, 1)));
    assert!(store.remove_window(&"x").is_none());
    assert_eq!(store, before);
}

#[test]
fn geometry_survives_maximize_round_trip() {
    let mut store: WindowStore<&str> = WindowStore::new();
    store.add_window("a", geometry(3, 4));
    store.set_size(&"a", Size::new(30, 12));
    assert_eq!(store.toggle_maximized(&"a"), Some(true));
    assert_eq!(store.toggle_maximized(&"a"), Some(false));
    let record = store.get_window(&"a").unwrap();
    assert_eq!(record.position, Some(Position::new(3, 4)));
    assert_eq!(record.size, Some(Size::new(30, 12)));
}
