use crate::dispatch::Severity;
use gtk4 as gtk;
use gtk4::prelude::*;

#[derive(Debug, Clone, Copy)]
pub enum Kind {
    Info,
    Warning,
    Error,
}

impl From<Severity> for Kind {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Info => Kind::Info,
            Severity::Warning => Kind::Warning,
            Severity::Error => Kind::Error,
        }
    }
}

/// Modal message box with a single OK button.
pub fn show(parent: &impl IsA<gtk::Window>, kind: Kind, title: &str, body: &str) {
    let dialog = gtk::Dialog::builder()
        .title(title)
        .transient_for(parent)
        .modal(true)
        .resizable(false)
        .build();

    let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
    content.set_margin_top(18);
    content.set_margin_bottom(12);
    content.set_margin_start(18);
    content.set_margin_end(18);

    let label = gtk::Label::new(Some(body));
    label.set_wrap(true);
    label.set_halign(gtk::Align::Start);
    label.set_selectable(true);
    match kind {
        Kind::Info => {}
        Kind::Warning => label.add_css_class("warning"),
        Kind::Error => label.add_css_class("error"),
    }
    content.append(&label);
    dialog.content_area().append(&content);

    let ok_btn = dialog.add_button("OK", gtk::ResponseType::Ok);
    ok_btn.add_css_class("suggested-action");
    dialog.set_default_response(gtk::ResponseType::Ok);
    dialog.connect_response(|dlg, _| dlg.close());
    dialog.present();
}

pub fn open_link(parent: &impl IsA<gtk::Window>, uri: &str) {
    match url::Url::parse(uri) {
        Ok(url) => {
            log::info!("Opening {url}");
            gtk::show_uri(Some(parent), url.as_str(), 0);
        }
        Err(e) => {
            log::error!("Refusing to open {uri:?}: {e}");
            show(parent, Kind::Error, "Open Link", &format!("Invalid link: {uri}"));
        }
    }
}
