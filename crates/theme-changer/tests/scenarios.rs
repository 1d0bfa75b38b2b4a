//! End-to-end controller scenarios against the headless document and store.

use proptest::prelude::*;
use theme_changer::dom::{MemoryDocument, MemoryElement};
use theme_changer::storage::{MemoryStore, PreferenceStore, STORAGE_KEY};
use theme_changer::{Theme, ThemeController, ThemeControllerOptions, ThemeError, ThemeRegistry};

type Controller = ThemeController<MemoryDocument, MemoryStore>;

fn page_registry() -> ThemeRegistry {
    let mut registry = ThemeRegistry::new();
    registry
        .register(Theme::os_default("os", "OS-default"))
        .unwrap();
    registry
        .register(
            Theme::new("light", "Light")
                .var("color-scheme", "light")
                .var("--color-background", "#f6f6f6")
                .var("--color-text", "#1c1c1c"),
        )
        .unwrap();
    registry
        .register(
            Theme::new("dark", "Dark")
                .var("color-scheme", "dark")
                .var("--color-background", "#151515")
                .var("--color-border", "#333"),
        )
        .unwrap();
    registry
}

fn page(store: &MemoryStore) -> Controller {
    let mut controller = ThemeController::new(
        page_registry(),
        MemoryDocument::with_elements(["main"]),
        store.clone(),
    );
    controller.configure(
        ThemeControllerOptions::new(MemoryElement::new("main"))
            .use_local(true)
            .selected_theme_css_class("active"),
    );
    controller
}

#[test]
fn test_page_lifecycle() {
    let store = MemoryStore::new();
    let mut controller = page(&store);

    // First visit: nothing stored
    controller.on_load().unwrap();
    assert!(controller.document().root_properties().is_empty());
    assert_eq!(store.peek(STORAGE_KEY), None);
    assert_eq!(controller.current_key(), Some("os"));

    // Pick dark through the picker
    controller.toggle_theme_picker();
    assert!(controller.is_picker_open());
    controller.select("dark").unwrap();

    assert_eq!(
        controller.document().root_property("color-scheme"),
        Some("dark")
    );
    assert_eq!(store.peek(STORAGE_KEY).as_deref(), Some("dark"));
    assert!(!controller.is_picker_open());
    assert!(controller.document().mounted_picker().is_none());

    // A bad key is reported and changes nothing
    let before = controller.document().root_properties().clone();
    let result = controller.select("unknown");
    assert!(matches!(result, Err(ThemeError::UnknownTheme { .. })));
    assert_eq!(controller.current_key(), Some("dark"));
    assert_eq!(controller.document().root_properties(), &before);
    assert_eq!(store.peek(STORAGE_KEY).as_deref(), Some("dark"));
}

#[test]
fn test_reload_restores_selection() {
    let store = MemoryStore::new();
    {
        let mut controller = page(&store);
        controller.on_load().unwrap();
        controller.apply_theme("light").unwrap();
    }

    let mut reloaded = page(&store);
    reloaded.on_load().unwrap();
    assert_eq!(reloaded.current_key(), Some("light"));
    assert_eq!(
        reloaded.document().root_property("--color-text"),
        Some("#1c1c1c")
    );
}

#[test]
fn test_reload_with_stale_stored_key() {
    let mut store = MemoryStore::new();
    store.save(STORAGE_KEY, "high-contrast").unwrap();

    let mut controller = page(&store);
    controller.on_load().unwrap();
    assert_eq!(controller.current_key(), Some("os"));
}

#[test]
fn test_memory_only_without_use_local() {
    let store = MemoryStore::new();
    let mut controller = ThemeController::new(
        page_registry(),
        MemoryDocument::with_elements(["main"]),
        store.clone(),
    );
    controller.configure(ThemeControllerOptions::new(MemoryElement::new("main")));
    controller.on_load().unwrap();
    controller.select("dark").unwrap();
    drop(controller);

    assert_eq!(store.write_count(), 0);

    let mut reloaded = page(&store);
    reloaded.on_load().unwrap();
    assert_eq!(reloaded.current_key(), Some("os"));
}

#[test]
fn test_storage_failure_never_blocks_theme_change() {
    let store = MemoryStore::new();
    let mut controller = page(&store);
    controller.on_load().unwrap();

    store.set_failing(true);
    controller.select("dark").unwrap();

    assert_eq!(
        controller.document().root_property("color-scheme"),
        Some("dark")
    );
    assert!(controller.is_persistence_degraded());
}

#[test]
fn test_picker_lists_every_theme_once() {
    let store = MemoryStore::new();
    let mut controller = page(&store);
    controller.on_load().unwrap();
    controller.apply_theme("light").unwrap();

    controller.toggle_theme_picker();
    let markup = &controller.document().mounted_picker().unwrap().markup;

    for key in ["os", "light", "dark"] {
        let attr = format!(r#"data-theme-key="{key}""#);
        assert_eq!(markup.matches(&attr).count(), 1, "row for {key}");
    }
    let os = markup.find(r#"data-theme-key="os""#).unwrap();
    let light = markup.find(r#"data-theme-key="light""#).unwrap();
    let dark = markup.find(r#"data-theme-key="dark""#).unwrap();
    assert!(os < light && light < dark);
    assert_eq!(markup.matches(r#"class="active""#).count(), 1);
}

fn theme_keys() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(vec!["os", "light", "dark"]), 0..12)
}

proptest! {
    #[test]
    fn prop_root_matches_last_applied_theme(history in theme_keys(), last in prop::sample::select(vec!["os", "light", "dark"])) {
        let store = MemoryStore::new();
        let mut controller = page(&store);
        for key in &history {
            controller.apply_theme(key).unwrap();
        }
        controller.apply_theme(last).unwrap();

        let theme = controller.registry().get(last).unwrap().clone();
        let root = controller.document().root_properties();
        let expected: std::collections::BTreeMap<String, String> = theme
            .css()
            .unwrap_or(&[])
            .iter()
            .map(|var| (var.name().to_string(), var.value().to_string()))
            .collect();

        prop_assert_eq!(root, &expected);
        let stored = store.peek(STORAGE_KEY);
        prop_assert_eq!(stored.as_deref(), Some(last));
    }

    #[test]
    fn prop_apply_is_idempotent(history in theme_keys(), key in prop::sample::select(vec!["os", "light", "dark"])) {
        let mut controller = page(&MemoryStore::new());
        for k in &history {
            controller.apply_theme(k).unwrap();
        }
        controller.apply_theme(key).unwrap();
        let once = controller.document().root_properties().clone();
        controller.apply_theme(key).unwrap();

        prop_assert_eq!(controller.document().root_properties(), &once);
    }

    #[test]
    fn prop_toggle_parity(toggles in 0usize..20) {
        let mut controller = page(&MemoryStore::new());
        controller.on_load().unwrap();
        for _ in 0..toggles {
            controller.toggle_theme_picker();
        }

        let open = toggles % 2 == 1;
        prop_assert_eq!(controller.is_picker_open(), open);
        prop_assert_eq!(controller.document().mounted_picker().is_some(), open);
        prop_assert_eq!(controller.document().dismiss_listener_count(), usize::from(open));
    }
}
