use crate::session::Session;
use crate::ui::dialogs::{self, Kind};
use gtk4 as gtk;
use gtk4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Name/phone form. Saving overwrites the in-memory profile.
pub fn profile_form(session: Rc<RefCell<Session>>, window: adw::ApplicationWindow) -> gtk::Widget {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 8);
    root.set_margin_top(8);
    root.set_margin_bottom(8);
    root.set_margin_start(8);
    root.set_margin_end(8);

    let title = gtk::Label::new(Some("User Profile"));
    title.add_css_class("heading");
    title.set_halign(gtk::Align::Start);
    root.append(&title);

    let name_entry = gtk::Entry::new();
    name_entry.set_placeholder_text(Some("Name"));
    name_entry.set_hexpand(true);

    let phone_entry = gtk::Entry::new();
    phone_entry.set_placeholder_text(Some("Phone"));
    phone_entry.set_hexpand(true);

    root.append(&name_entry);
    root.append(&phone_entry);

    let save_btn = gtk::Button::with_label("Save Profile");
    save_btn.set_halign(gtk::Align::End);
    root.append(&save_btn);

    save_btn.connect_clicked(move |_| {
        let name = name_entry.text();
        let phone = phone_entry.text();
        let result = session.borrow_mut().profile.update(&name, &phone);
        match result {
            Ok(()) => {
                let s = session.borrow();
                dialogs::show(&window, Kind::Info, "User Profile",
                    &format!("Name: {}\nPhone: {}", s.profile.name, s.profile.phone));
            }
            Err(e) => dialogs::show(&window, Kind::Warning, "Input Error", &e.to_string()),
        }
    });

    root.upcast()
}
