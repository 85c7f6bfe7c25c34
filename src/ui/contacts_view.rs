use crate::contacts::Contact;
use crate::session::Session;
use crate::ui::dialogs::{self, Kind};
use gtk4 as gtk;
use gtk4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Emergency contact entry, picker and add/edit/remove buttons.
pub struct ContactsView {
    root: gtk::Box,
    entry: gtk::Entry,
    list: gtk::DropDown,
}

impl ContactsView {
    pub fn new(session: Rc<RefCell<Session>>, window: adw::ApplicationWindow) -> Rc<Self> {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);

        let title = gtk::Label::new(Some("Emergency Contact:"));
        title.add_css_class("heading");
        title.set_halign(gtk::Align::Start);
        root.append(&title);

        let entry = gtk::Entry::new();
        entry.set_placeholder_text(Some("+15551234567"));
        entry.set_hexpand(true);
        root.append(&entry);

        let list = gtk::DropDown::from_strings(&[]);
        list.set_hexpand(true);
        root.append(&list);

        let buttons = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let add_btn = gtk::Button::with_label("Add Contact");
        add_btn.add_css_class("suggested-action");
        let edit_btn = gtk::Button::with_label("Edit Contact");
        let remove_btn = gtk::Button::with_label("Remove Contact");
        remove_btn.add_css_class("destructive-action");
        buttons.append(&add_btn);
        buttons.append(&edit_btn);
        buttons.append(&remove_btn);
        root.append(&buttons);

        let view = Rc::new(Self { root, entry, list });
        view.set_items(session.borrow().contacts.all());

        {
            let view = view.clone();
            let session = session.clone();
            let window = window.clone();
            let entry = view.entry.clone();
            let add: Rc<dyn Fn()> = Rc::new(move || {
                let input = view.entry.text().to_string();
                let result = session.borrow_mut().contacts.add(&input).map(Contact::to_string);
                match result {
                    Ok(number) => {
                        view.entry.set_text("");
                        view.set_items(session.borrow().contacts.all());
                        log::info!("Added emergency contact {number}");
                        dialogs::show(&window, Kind::Info, "Contact Added",
                            &format!("Emergency contact '{number}' added successfully!"));
                    }
                    Err(e) => dialogs::show(&window, Kind::Warning, "Input Error", &e.to_string()),
                }
            });
            {
                let add = add.clone();
                add_btn.connect_clicked(move |_| (add)());
            }
            entry.connect_activate(move |_| (add)());
        }

        {
            let view = view.clone();
            let session = session.clone();
            let window = window.clone();
            edit_btn.connect_clicked(move |_| {
                let input = view.entry.text().to_string();
                let result = {
                    let mut s = session.borrow_mut();
                    s.contacts.select(view.selected());
                    s.contacts.edit_selected(&input).map(Contact::to_string)
                };
                match result {
                    Ok(number) => {
                        view.entry.set_text("");
                        view.set_items(session.borrow().contacts.all());
                        dialogs::show(&window, Kind::Info, "Contact Edited",
                            &format!("Emergency contact updated to '{number}'!"));
                    }
                    Err(e) => dialogs::show(&window, Kind::Warning, "Input Error", &e.to_string()),
                }
            });
        }

        {
            let view = view.clone();
            remove_btn.connect_clicked(move |_| {
                let result = {
                    let mut s = session.borrow_mut();
                    s.contacts.select(view.selected());
                    s.contacts.remove_selected()
                };
                match result {
                    Ok(removed) => {
                        view.set_items(session.borrow().contacts.all());
                        log::info!("Removed emergency contact {removed}");
                        dialogs::show(&window, Kind::Info, "Contact Removed",
                            &format!("Emergency contact '{removed}' removed successfully!"));
                    }
                    Err(e) => dialogs::show(&window, Kind::Warning, "Selection Error", &e.to_string()),
                }
            });
        }

        view
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    fn selected(&self) -> Option<usize> {
        let pos = self.list.selected();
        if pos == gtk::INVALID_LIST_POSITION { None } else { Some(pos as usize) }
    }

    pub fn set_items(&self, items: &[Contact]) {
        let numbers: Vec<&str> = items.iter().map(Contact::number).collect();
        self.list.set_model(Some(&gtk::StringList::new(&numbers)));
    }
}
