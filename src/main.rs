use sequence_comparator::app::ComparatorApp;
use sequence_comparator::config::{Config, LaunchParams};
use sequence_comparator::constant;
use sequence_comparator::ui;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let settings = Config::default().settings;
    let launch = LaunchParams::from_args(std::env::args().skip(1));
    let options = ui::viewport::build_viewport();

    eframe::run_native(
        constant::DEFAULT_WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(ComparatorApp::new(cc, settings.archive, launch)))),
    )
}
