use azbot::config::{self, AppConfig};

fn main() {
    let config = AppConfig::load().unwrap_or_else(|err| {
        eprintln!("invalid configuration, using defaults: {err:#}");
        AppConfig::default()
    });
    config::init_logging(&config);
    tracing::info!(locale = %config.locale, theme = %config.theme, "starting AZbot");

    dioxus::LaunchBuilder::new()
        .with_context(config)
        .launch(azbot::ui::App);
}
