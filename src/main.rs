use adw::prelude::*;
use adw::Application;

fn main() -> glib::ExitCode {
    env_logger::init();

    let app = Application::builder()
        .application_id("com.example.MentorChat")
        .build();
    app.connect_activate(|app| {
        mentor_chat::ui::build_ui(app);
    });
    app.run()
}
