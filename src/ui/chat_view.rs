use gtk4::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::api::models::OutgoingMessage;
use crate::chat::composer::{Key, KeyPress};
use crate::chat::{ChatSession, KeyOutcome};
use crate::error::ValidationError;

pub struct ChatView {
    root: gtk::Box,
    scroller: gtk::ScrolledWindow,
    messages_box: gtk::Box,
    input: gtk::TextView,
    placeholder: gtk::Label,
    error_label: gtk::Label,
    session: Rc<RefCell<ChatSession>>,
}

impl ChatView {
    pub fn new(session: Rc<RefCell<ChatSession>>) -> Rc<Self> {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);

        let scroller = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .hexpand(true)
            .build();
        let messages_box = gtk::Box::new(gtk::Orientation::Vertical, 6);
        scroller.set_child(Some(&messages_box));
        root.append(&scroller);

        // Composer
        let input_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let input = gtk::TextView::builder()
            .wrap_mode(gtk::WrapMode::WordChar)
            .hexpand(true)
            .accepts_tab(false)
            .build();
        let placeholder = gtk::Label::new(Some("Type a Message here!..."));
        placeholder.add_css_class("dim-label");
        placeholder.set_halign(gtk::Align::Start);
        placeholder.set_valign(gtk::Align::Start);
        placeholder.set_can_target(false);
        let input_overlay = gtk::Overlay::new();
        input_overlay.set_hexpand(true);
        input_overlay.set_child(Some(&input));
        input_overlay.add_overlay(&placeholder);
        let send_btn = gtk::Button::with_label("Send");
        send_btn.add_css_class("suggested-action");
        input_row.append(&input_overlay);
        input_row.append(&send_btn);
        root.append(&input_row);

        let error_label = gtk::Label::new(None);
        error_label.add_css_class("error");
        error_label.set_halign(gtk::Align::Start);
        error_label.set_visible(false);
        root.append(&error_label);

        let view = Rc::new(Self { root, scroller, messages_box, input, placeholder, error_label, session });

        {
            let weak = Rc::downgrade(&view);
            view.input.buffer().connect_changed(move |buffer| {
                let Some(view) = weak.upgrade() else { return };
                let text = buffer.text(&buffer.start_iter(), &buffer.end_iter(), false);
                let shows_placeholder = {
                    let mut session = view.session.borrow_mut();
                    session.composer_mut().set_text(text.as_str());
                    session.composer().shows_placeholder()
                };
                view.placeholder.set_visible(shows_placeholder);
                view.error_label.set_visible(false);
            });
        }
        {
            let weak = Rc::downgrade(&view);
            send_btn.connect_clicked(move |_| {
                if let Some(view) = weak.upgrade() {
                    view.submit();
                }
            });
        }
        {
            let keys = gtk::EventControllerKey::new();
            keys.set_propagation_phase(gtk::PropagationPhase::Capture);
            let weak = Rc::downgrade(&view);
            keys.connect_key_pressed(move |_, key, _, state| {
                let Some(view) = weak.upgrade() else { return glib::Propagation::Proceed };
                let press = KeyPress {
                    key: if key == gtk::gdk::Key::Return || key == gtk::gdk::Key::KP_Enter {
                        Key::Enter
                    } else {
                        Key::Other
                    },
                    shift: state.contains(gtk::gdk::ModifierType::SHIFT_MASK),
                };
                let outcome = view.session.borrow_mut().handle_key(press);
                match outcome {
                    KeyOutcome::Submitted(result) => {
                        view.show_submit_result(result);
                        glib::Propagation::Stop
                    }
                    KeyOutcome::NewlineInserted => {
                        // The session already has the newline; mirror it into the buffer.
                        view.input.buffer().insert_at_cursor("\n");
                        glib::Propagation::Stop
                    }
                    KeyOutcome::Ignored => glib::Propagation::Proceed,
                }
            });
            view.input.add_controller(keys);
        }

        view.render();
        Self::watch_messages(&view);
        view
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn session(&self) -> &Rc<RefCell<ChatSession>> {
        &self.session
    }

    fn watch_messages(view: &Rc<Self>) {
        let mut changes = view.session.borrow().log().changes();
        let weak: Weak<Self> = Rc::downgrade(view);
        glib::MainContext::default().spawn_local(async move {
            while changes.changed().await.is_ok() {
                match weak.upgrade() {
                    Some(view) => view.render(),
                    None => break,
                }
            }
        });
    }

    fn submit(&self) {
        let result = self.session.borrow_mut().submit();
        self.show_submit_result(result);
    }

    fn show_submit_result(&self, result: Result<OutgoingMessage, ValidationError>) {
        match result {
            Ok(sent) => {
                log::debug!("Sent message at {}", sent.timestamp);
                self.input.buffer().set_text("");
                self.error_label.set_visible(false);
            }
            Err(e) => {
                self.error_label.set_label(&e.to_string());
                self.error_label.set_visible(true);
            }
        }
    }

    pub fn render(&self) {
        while let Some(child) = self.messages_box.first_child() {
            self.messages_box.remove(&child);
        }

        let session = self.session.borrow();
        for group in session.grouped() {
            let header = gtk::Label::new(Some(&group.label));
            header.add_css_class("dim-label");
            header.set_margin_top(8);
            header.set_margin_bottom(8);
            self.messages_box.append(&header);

            for message in &group.messages {
                let row = session.row(message);
                let align = if row.own { gtk::Align::End } else { gtk::Align::Start };

                let bubble = gtk::Box::new(gtk::Orientation::Vertical, 2);
                bubble.set_halign(align);
                let text = gtk::Label::new(Some(row.text));
                text.set_wrap(true);
                text.set_max_width_chars(40);
                text.set_xalign(0.0);
                text.add_css_class("card");
                text.set_margin_start(4);
                text.set_margin_end(4);
                let caption = gtk::Label::new(Some(&row.caption()));
                caption.add_css_class("caption");
                caption.add_css_class("dim-label");
                caption.set_halign(align);
                bubble.append(&text);
                bubble.append(&caption);
                self.messages_box.append(&bubble);
            }
        }
        drop(session);

        let scroller = self.scroller.clone();
        glib::idle_add_local_once(move || {
            let adj = scroller.vadjustment();
            adj.set_value(adj.upper());
        });
    }
}
