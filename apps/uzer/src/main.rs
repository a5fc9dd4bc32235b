use uzer::{UzerScreen, UzerTestTheme};
use uzer_core::*;
use uzer_platform::{DesktopConfig, run_desktop_app};
use uzer_ui::Surface;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Starting UzerTest");
    run_desktop_app(DesktopConfig::default(), |_s| {
        UzerTestTheme(is_system_in_dark_theme(), || {
            Surface(
                Modifier::new().fill_max_size().background(theme().background),
                UzerScreen(),
            )
        })
    })
}
