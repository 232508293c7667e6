use adw::prelude::*;
use adw::Application;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::api::client::ApiClient;
use crate::api::socket::WsChannel;
use crate::app::AppState;
use crate::chat::{ChatSession, UnreadCounter};
use crate::icons::quiz_icon;

fn quiz_image() -> Option<gtk4::Image> {
    let bytes = glib::Bytes::from_owned(quiz_icon("#1f2937").into_bytes());
    match gtk4::gdk::Texture::from_bytes(&bytes) {
        Ok(texture) => Some(gtk4::Image::from_paintable(Some(&texture))),
        Err(e) => {
            log::warn!("Could not render quiz icon: {e}");
            None
        }
    }
}

/// Avatar, name and status of the mentor; initials stand in until the image loads.
fn peer_header(state: &AppState) -> gtk4::Box {
    let peer = state.peer();
    let avatar = adw::Avatar::new(36, Some(&peer.title), true);
    let title = adw::WindowTitle::new(&peer.title, &peer.status);

    let row = gtk4::Box::new(gtk4::Orientation::Horizontal, 8);
    row.append(&avatar);
    row.append(&title);

    if let Some(url) = peer.img.filter(|u| !u.trim().is_empty()) {
        let client = ApiClient::from_state(state);
        let rx = crate::utils::run_async_to_main(async move { client.fetch_image(&url).await });
        glib::MainContext::default().spawn_local(async move {
            match rx.await {
                Ok(Ok(bytes)) => match gtk4::gdk::Texture::from_bytes(&glib::Bytes::from_owned(bytes)) {
                    Ok(texture) => avatar.set_custom_image(Some(&texture)),
                    Err(e) => log::warn!("Unreadable avatar image: {e}"),
                },
                Ok(Err(e)) => log::warn!("Failed to load avatar: {e}"),
                Err(_) => {}
            }
        });
    }
    row
}

pub fn show_main_window(app: &Application) {
    let state = AppState::load();
    let Some(user) = state.user.clone() else {
        crate::ui::setup::show_setup_window(app);
        return;
    };

    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Mentor Chat")
        .default_width(720)
        .default_height(640)
        .build();

    let overlay = adw::ToastOverlay::new();

    let session = Rc::new(RefCell::new(ChatSession::new(user, UnreadCounter::new())));
    let chat = crate::ui::chat_view::ChatView::new(session.clone());
    overlay.set_child(Some(&chat.widget()));

    let container = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    header.set_title_widget(Some(&peer_header(&state)));
    if let Some(icon) = quiz_image() {
        icon.set_tooltip_text(Some("Quizzes"));
        header.pack_start(&icon);
    }

    let settings_btn = gtk4::Button::with_label("Settings");
    header.pack_end(&settings_btn);
    container.append(&header);
    container.append(&overlay);
    window.set_content(Some(&container));
    window.present();

    // History
    {
        let client = ApiClient::from_state(&state);
        let query = session.borrow().query();
        let rx = crate::utils::run_async_to_main(async move { client.get_chat(&query).await });
        let session = session.clone();
        glib::MainContext::default().spawn_local(async move {
            if let Ok(res) = rx.await {
                session.borrow().apply_history(res);
            }
        });
    }

    // Live channel
    match state.socket_url() {
        Ok(url) => {
            let rx = crate::utils::run_async_to_main(async move { WsChannel::connect(&url).await });
            let session = session.clone();
            let overlay = overlay.clone();
            glib::MainContext::default().spawn_local(async move {
                match rx.await {
                    Ok(Ok(channel)) => session.borrow_mut().attach_channel(Arc::new(channel)),
                    Ok(Err(err)) => {
                        log::error!("Failed to connect to chat: {err}");
                        overlay.add_toast(adw::Toast::new(&format!("Failed to connect to chat: {}", err)));
                    }
                    Err(_) => {}
                }
            });
        }
        Err(err) => overlay.add_toast(adw::Toast::new(&format!("Invalid socket URL: {}", err))),
    }

    {
        let app = app.clone();
        let window = window.clone();
        let chat = chat.clone();
        settings_btn.connect_clicked(move |_| {
            chat.session().borrow_mut().detach_channel();
            crate::ui::setup::show_setup_window(&app);
            window.close();
        });
    }
}
