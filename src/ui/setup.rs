use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;
use std::rc::Rc;
use std::time::Duration;

use crate::api::client::ApiClient;
use crate::api::models::{MentorRef, User};
use crate::app::AppState;

fn field(form: &gtk::Box, placeholder: &str, initial: &str) -> gtk::Entry {
    let entry = gtk::Entry::new();
    entry.set_placeholder_text(Some(placeholder));
    entry.set_text(initial);
    entry.set_hexpand(true);
    form.append(&entry);
    entry
}

/// Collects the server and profile the chat runs as, then opens the main window.
pub fn show_setup_window(app: &Application) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Mentor Chat Setup")
        .default_width(420)
        .default_height(360)
        .resizable(false)
        .build();

    let toast_overlay = adw::ToastOverlay::new();

    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_margin_top(24);
    root.set_margin_bottom(24);
    root.set_margin_start(24);
    root.set_margin_end(24);

    let title = gtk::Label::new(Some("Connect to your mentor"));
    title.add_css_class("title-2");
    title.set_halign(gtk::Align::Start);
    root.append(&title);

    let existing = AppState::load();
    let user = existing.user.clone();
    let form = gtk::Box::new(gtk::Orientation::Vertical, 8);
    let server_entry = field(&form, "Server URL (e.g. https://chat.example.com)", &existing.base_url);
    let name_entry = field(&form, "First name", user.as_ref().map_or("", |u| u.firstname.as_str()));
    let email_entry = field(&form, "Email", user.as_ref().map_or("", |u| u.email.as_str()));
    let student_entry = field(&form, "Student ID", user.as_ref().map_or("", |u| u.id.as_str()));
    let mentor_entry = field(&form, "Mentor ID", user.as_ref().map_or("", |u| u.mentor.id.as_str()));
    root.append(&form);

    let status = gtk::Label::new(None);
    status.add_css_class("dim-label");
    status.set_halign(gtk::Align::Start);
    root.append(&status);

    let connect_btn = gtk::Button::with_label("Connect");
    connect_btn.add_css_class("suggested-action");
    connect_btn.set_halign(gtk::Align::End);
    root.append(&connect_btn);

    toast_overlay.set_child(Some(&root));
    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let header_title = gtk::Label::new(Some("Mentor Chat"));
    header.set_title_widget(Some(&header_title));
    container.append(&header);
    container.append(&toast_overlay);
    window.set_content(Some(&container));

    let on_connect = {
        let app = app.clone();
        let window = window.clone();
        let overlay = toast_overlay.clone();
        let entries = [
            server_entry.clone(),
            name_entry.clone(),
            email_entry.clone(),
            student_entry.clone(),
            mentor_entry.clone(),
        ];
        move || {
            let values: Vec<String> = entries.iter().map(|e| e.text().trim().to_string()).collect();
            if values.iter().any(String::is_empty) {
                overlay.add_toast(adw::Toast::new("Please fill in every field."));
                return;
            }
            let [url, firstname, email, student_id, mentor_id]: [String; 5] = match values.try_into() {
                Ok(v) => v,
                Err(_) => return,
            };

            let mut state = AppState::load();
            state.base_url = crate::utils::normalize_url(&url);
            state.user = Some(User { id: student_id, firstname, email, mentor: MentorRef { id: mentor_id } });

            status.set_label("Connecting…");
            let client = match reqwest::Client::builder().timeout(Duration::from_secs(5)).build() {
                Ok(http) => ApiClient::from_state(&state).with_http(http),
                Err(_) => ApiClient::from_state(&state),
            };
            let rx = crate::utils::run_async_to_main(async move { client.ping().await });

            let status_label = status.clone();
            let app2 = app.clone();
            let window2 = window.clone();
            let overlay2 = overlay.clone();
            glib::MainContext::default().spawn_local(async move {
                let message = match rx.await {
                    Ok(Ok(code)) if (200..300).contains(&code) => "Connected".to_string(),
                    Ok(Ok(code)) => format!("Saved (server answered HTTP {code})"),
                    Ok(Err(e)) => {
                        log::warn!("Server check failed: {e}");
                        "Saved (server unreachable)".to_string()
                    }
                    Err(_) => "Saved".to_string(),
                };
                status_label.set_label(&message);
                // Credentials are kept even when the server could not be reached.
                if let Err(e) = state.save() {
                    overlay2.add_toast(adw::Toast::new(&format!("Failed to save settings: {}", e)));
                    return;
                }
                crate::ui::main_window::show_main_window(&app2);
                window2.close();
            });
        }
    };

    let on_connect: Rc<dyn Fn()> = Rc::new(on_connect);
    {
        let on_connect = on_connect.clone();
        connect_btn.connect_clicked(move |_| (on_connect)());
    }
    for entry in [&server_entry, &name_entry, &email_entry, &student_entry, &mentor_entry] {
        let on_connect = on_connect.clone();
        entry.connect_activate(move |_| (on_connect)());
    }

    window.present();
}
