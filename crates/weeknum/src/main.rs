//! WeekNum: the current ISO week in the tray and a draggable badge.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

fn main() -> eframe::Result {
    // Log to stdout (if you run with `RUST_LOG=debug`).
    env_logger::init();

    let options = eframe::NativeOptions {
        // The root viewport is the badge pill; it resizes itself to fit the
        // label and restores its own saved position.
        viewport: egui::ViewportBuilder::default()
            .with_title("WeekNum")
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top()
            .with_taskbar(false)
            .with_resizable(false)
            .with_inner_size([72.0, 34.0]),
        persist_window: false,
        ..Default::default()
    };
    eframe::run_native(
        "WeekNum",
        options,
        Box::new(|cc| Ok(Box::new(weeknum::WeekNumApp::new(cc)?))),
    )
}
