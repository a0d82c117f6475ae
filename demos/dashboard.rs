//! A small "component tree" wired to both stores.
//!
//! Run with `RUST_LOG=hearth=debug cargo run --example dashboard` to see the
//! store's own tracing output.

use hearth::{
    try_use_user, use_theme, use_user, Theme, ThemeAction, ThemeProvider, UserProvider, UserRecord,
};
use tracing_subscriber::EnvFilter;

fn header() -> String {
    let theme = use_theme().state();
    let session = use_user();
    let who = match session.user() {
        Some(user) => user.username,
        None => "guest".to_string(),
    };
    format!(
        "[{} | fg {} | bg {}] signed in as {}",
        theme.current_theme, theme.primary_color, theme.background_color, who
    )
}

fn admin_panel() -> &'static str {
    if use_user().has_role("admin") {
        "admin panel: visible"
    } else {
        "admin panel: hidden"
    }
}

fn render(step: &str) {
    println!("{step}");
    println!("   {}", header());
    println!("   {}", admin_panel());
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Dashboard ===\n");

    let theme = ThemeProvider::new();
    let session = UserProvider::new();

    let _theme_log = theme.context().subscribe(|state| {
        println!("   [Theme Update] {}", state.current_theme);
    });
    let _session_log = session.context().subscribe(|state| {
        println!("   [Session Update] authenticated: {}", state.is_authenticated());
    });

    theme.provide(|| {
        session.provide(|| {
            render("1. Initial render");

            println!("\n2. Login");
            use_user().set_user(
                UserRecord::new("1", "al", "s1").with_roles(["admin", "editor"]),
            );
            render("   after login");

            println!("\n3. Switching to a custom theme");
            let dispatch = use_theme().dispatch();
            dispatch.dispatch(ThemeAction::SetTheme(Theme::Custom));
            dispatch.dispatch(ThemeAction::SetPrimaryColor("#e83e8c".to_string()));
            dispatch.dispatch(ThemeAction::SetBackgroundColor("#1b1b1b".to_string()));
            render("   after theme change");

            println!("\n4. Logout (twice)");
            use_user().logout();
            use_user().logout();
            render("   after logout");
        })
    });

    println!("\n5. Outside the providers");
    match try_use_user() {
        Ok(_) => println!("   unexpected: session still in scope"),
        Err(err) => println!("   {err}"),
    }

    println!("\n✓ Dashboard complete!");
}
