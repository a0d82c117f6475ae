//! Integration tests for Hearth

use hearth::{
    try_use_theme, try_use_user, use_theme, use_user, ContextError, Dispatch, Theme, ThemeAction,
    ThemeProvider, ThemeState, UserProvider, UserRecord,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

fn al() -> UserRecord {
    UserRecord::new("1", "al", "s1").with_roles(["admin", "editor"])
}

#[test]
fn theme_scenario_dark_on_initial_state() {
    ThemeProvider::new().provide(|| {
        let theme = use_theme();
        theme.dispatch().dispatch(ThemeAction::SetTheme(Theme::Dark));

        assert_eq!(
            *theme.state(),
            ThemeState {
                current_theme: Theme::Dark,
                primary_color: "#007bff".to_string(),
                background_color: "#ffffff".to_string(),
            }
        );
    });
}

#[test]
fn theme_actions_from_json() {
    let actions: Vec<ThemeAction> = serde_json::from_str(
        r##"[
            {"type": "SET_THEME", "payload": "custom"},
            {"type": "SET_PRIMARY_COLOR", "payload": "#ff0000"},
            {"type": "TOGGLE_SIDEBAR"},
            {"type": "SET_BACKGROUND_COLOR", "payload": "black"}
        ]"##,
    )
    .unwrap();

    let provider = ThemeProvider::new();
    provider.provide(|| {
        let dispatch = use_theme().dispatch();
        for action in actions {
            dispatch.dispatch(action);
        }
    });

    let state = provider.context().state();
    assert_eq!(state.current_theme, Theme::Custom);
    assert_eq!(state.primary_color, "#ff0000");
    assert_eq!(state.background_color, "black");
}

#[test]
fn subscribers_see_mutations_in_issue_order() {
    let provider = ThemeProvider::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let _subscription = {
        let seen = Arc::clone(&seen);
        provider
            .context()
            .subscribe(move |state| seen.lock().unwrap().push(state.current_theme))
    };

    provider.provide(|| {
        let theme = use_theme();
        theme.set_theme(Theme::Dark);
        theme.set_theme(Theme::Custom);
        theme.set_theme(Theme::Light);
    });

    assert_eq!(
        *seen.lock().unwrap(),
        vec![Theme::Dark, Theme::Custom, Theme::Light]
    );
}

#[test]
fn user_scenario_roles() {
    UserProvider::new().provide(|| {
        let session = use_user();
        session.set_user(al());

        assert!(session.has_role("editor"));
        assert!(!session.has_role("viewer"));
    });
}

#[test]
fn user_scenario_logout() {
    UserProvider::new().provide(|| {
        let session = use_user();
        session.set_user(al());
        session.logout();

        assert!(!session.is_authenticated());
        assert_eq!(session.user(), None);
    });
}

#[test]
fn user_record_from_login_payload() {
    let record: UserRecord = serde_json::from_str(
        r#"{"id":"1","username":"al","sessionId":"s1","roles":["admin","editor"]}"#,
    )
    .unwrap();

    UserProvider::new().provide(|| {
        use_user().set_user(record);
        assert!(use_user().has_role("admin"));
    });
}

#[test]
fn accessors_fail_outside_providers_every_time() {
    for _ in 0..3 {
        assert!(matches!(
            try_use_theme(),
            Err(ContextError::MissingProvider { .. })
        ));
        assert!(matches!(
            try_use_user(),
            Err(ContextError::MissingProvider { .. })
        ));
        assert!(std::panic::catch_unwind(use_theme).is_err());
        assert!(std::panic::catch_unwind(use_user).is_err());
    }
}

#[test]
fn leaving_a_provider_removes_its_scope() {
    let provider = UserProvider::new();
    provider.provide(|| assert!(try_use_user().is_ok()));
    assert!(try_use_user().is_err());
}

#[test]
fn nested_component_tree() {
    let renders = Arc::new(AtomicUsize::new(0));

    fn toolbar(renders: &AtomicUsize) -> String {
        renders.fetch_add(1, Ordering::SeqCst);
        let theme = use_theme();
        let session = use_user();
        match session.user() {
            Some(user) => format!("{} on {}", user.username, theme.state().current_theme),
            None => format!("guest on {}", theme.state().current_theme),
        }
    }

    let label = ThemeProvider::new().provide(|| {
        UserProvider::new().provide(|| {
            let before = toolbar(&renders);
            use_user().set_user(al());
            use_theme().set_theme(Theme::Dark);
            let after = toolbar(&renders);
            format!("{before} / {after}")
        })
    });

    assert_eq!(label, "guest on light / al on dark");
    assert_eq!(renders.load(Ordering::SeqCst), 2);
}

#[test]
fn dispatch_identity_survives_state_changes() {
    let provider = ThemeProvider::new();
    let before = provider.provide(|| use_theme().dispatch());
    provider.provide(|| use_theme().set_primary_color("#000"));
    let after = provider.provide(|| use_theme().dispatch());

    assert!(Dispatch::ptr_eq(&before, &after));
}
