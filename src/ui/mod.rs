use adw::Application;

use crate::app::AppState;

pub mod chat_view;
pub mod main_window;
pub mod setup;

pub fn build_ui(app: &Application) {
    let state = AppState::load();
    if state.is_complete() {
        main_window::show_main_window(app);
    } else {
        setup::show_setup_window(app);
    }
}
