use crate::api::client::ApiClient;
use crate::api::geo::GeoClient;
use crate::api::sms::SmsClient;
use crate::dispatch::{dispatch_alert, AlertRequest, DispatchError, DispatchEvent};
use crate::panels;
use crate::session::Session;
use crate::ui::dialogs::{self, Kind};
use adw::prelude::*;
use adw::Application;
use glib::MainContext;
use gtk4 as gtk;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

pub fn show_main_window(app: &Application, session: Session) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Personal Safety")
        .default_width(800)
        .default_height(560)
        .build();

    let session = Rc::new(RefCell::new(session));
    apply_theme(session.borrow().settings.dark_mode, false);

    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let title = gtk::Label::new(Some("Personal Safety"));
    header.set_title_widget(Some(&title));

    let theme_btn = gtk::Button::with_label(session.borrow().settings.theme_label());
    header.pack_end(&theme_btn);
    container.append(&header);

    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_margin_top(12);
    root.set_margin_bottom(12);
    root.set_margin_start(12);
    root.set_margin_end(12);

    // Alert row
    let alert_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    let sos_btn = gtk::Button::with_label("Emergency SOS");
    sos_btn.add_css_class("destructive-action");
    sos_btn.add_css_class("pill");
    let location_btn = gtk::Button::with_label("Get Location");
    let alerts_btn = gtk::Button::with_label("Safety Alerts");
    let weather_btn = gtk::Button::with_label("Weather Alerts");
    for btn in [&sos_btn, &location_btn, &alerts_btn, &weather_btn] {
        alert_row.append(btn);
    }
    root.append(&alert_row);

    let progress = gtk::ProgressBar::new();
    progress.set_show_text(true);
    progress.set_visible(false);
    root.append(&progress);

    // Contacts and profile side by side
    let forms = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    let contacts = crate::ui::contacts_view::ContactsView::new(session.clone(), window.clone());
    let contacts_widget = contacts.widget();
    contacts_widget.set_hexpand(true);
    forms.append(&contacts_widget);
    let profile = crate::ui::profile_view::profile_form(session.clone(), window.clone());
    profile.set_hexpand(true);
    forms.append(&profile);
    root.append(&forms);

    // Tips, incident report, check-in
    let tools_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    let tips_btn = gtk::Button::with_label("Safety Tips");
    let incident_btn = gtk::Button::with_label("Report Incident");
    let check_in = gtk::CheckButton::with_label("Enable periodic safety check-ins");
    let check_in_btn = gtk::Button::with_label("Set Safety Check-in");
    tools_row.append(&tips_btn);
    tools_row.append(&incident_btn);
    tools_row.append(&check_in);
    tools_row.append(&check_in_btn);
    root.append(&tools_row);

    let tips = gtk::TextView::new();
    tips.set_editable(false);
    tips.set_cursor_visible(false);
    tips.set_wrap_mode(gtk::WrapMode::Word);
    tips.buffer().set_text(panels::SAFETY_TIPS);
    root.append(&tips);

    let incident_box = gtk::Box::new(gtk::Orientation::Vertical, 6);
    let incident_hint = gtk::Label::new(Some("Describe the incident here..."));
    incident_hint.add_css_class("dim-label");
    incident_hint.set_halign(gtk::Align::Start);
    let incident_form = gtk::TextView::new();
    incident_form.set_wrap_mode(gtk::WrapMode::Word);
    incident_form.set_size_request(-1, 100);
    let incident_save = gtk::Button::with_label("Save Report");
    incident_save.set_halign(gtk::Align::End);
    incident_box.append(&incident_hint);
    incident_box.append(&incident_form);
    incident_box.append(&incident_save);
    incident_box.set_visible(false);
    root.append(&incident_box);

    // Links and history
    let services_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    let nearby_btn = gtk::Button::with_label("Nearby Safety Services");
    let history_btn = gtk::Button::with_label("Location History");
    let help_btn = gtk::Button::with_label("Help Center");
    for btn in [&nearby_btn, &history_btn, &help_btn] {
        services_row.append(btn);
    }
    root.append(&services_row);

    let scroller = gtk::ScrolledWindow::builder()
        .vexpand(true)
        .hexpand(true)
        .build();
    scroller.set_child(Some(&root));
    container.append(&scroller);
    window.set_content(Some(&container));
    window.present();

    {
        let session = session.clone();
        let window = window.clone();
        let progress = progress.clone();
        let hide_timer = Rc::new(RefCell::new(None));
        sos_btn.connect_clicked(move |btn| {
            send_emergency_sos(&session, &window, btn, &progress, &hide_timer);
        });
    }

    {
        let session = session.clone();
        let window = window.clone();
        location_btn.connect_clicked(move |_| {
            let config = session.borrow().config.clone();
            let geo = match ApiClient::new(config.location.timeout())
                .and_then(|api| GeoClient::new(api, &config.location.endpoint))
            {
                Ok(geo) => geo,
                Err(e) => {
                    dialogs::show(&window, Kind::Error, "Location Error", &e.to_string());
                    return;
                }
            };
            let session = session.clone();
            let window = window.clone();
            crate::utils::run_async_to_main(async move { geo.lookup().await }, move |res| match res {
                Ok(location) => {
                    if let Err(e) = session.borrow().history.record_location(&location) {
                        log::warn!("Could not record location: {e}");
                    }
                    let mut text = location.display();
                    if let Some(place) = location.place() {
                        text.push_str(&format!("\n{place}"));
                    }
                    dialogs::show(&window, Kind::Info, "Current Location", &text);
                }
                Err(e) => {
                    log::error!("Location lookup failed: {e}");
                    dialogs::show(&window, Kind::Error, "Location Error", "Unable to retrieve location");
                }
            });
        });
    }

    {
        let window = window.clone();
        alerts_btn.connect_clicked(move |_| {
            dialogs::show(&window, Kind::Info, "Safety Alert", panels::SAFETY_ALERTS);
        });
    }
    {
        let window = window.clone();
        weather_btn.connect_clicked(move |_| {
            dialogs::show(&window, Kind::Info, "Weather Alerts", panels::WEATHER_ALERTS);
        });
    }

    {
        let session = session.clone();
        theme_btn.connect_clicked(move |btn| {
            let mut s = session.borrow_mut();
            let label = s.settings.toggle_dark_mode();
            btn.set_label(label);
            apply_theme(s.settings.dark_mode, true);
        });
    }

    {
        let tips = tips.clone();
        tips_btn.connect_clicked(move |_| tips.set_visible(true));
    }
    {
        let incident_box = incident_box.clone();
        incident_btn.connect_clicked(move |_| incident_box.set_visible(!incident_box.is_visible()));
    }
    {
        let session = session.clone();
        let window = window.clone();
        incident_save.connect_clicked(move |_| {
            let buffer = incident_form.buffer();
            let (start, end) = buffer.bounds();
            let text = buffer.text(&start, &end, false);
            let text = text.trim();
            if text.is_empty() {
                dialogs::show(&window, Kind::Warning, "Incident Report", "Please describe the incident first");
                return;
            }
            match session.borrow().history.record_incident(text) {
                Ok(()) => {
                    buffer.set_text("");
                    dialogs::show(&window, Kind::Info, "Incident Report", "Incident report saved for this session.");
                }
                Err(e) => dialogs::show(&window, Kind::Error, "Incident Report", &e.to_string()),
            }
        });
    }

    {
        let session = session.clone();
        check_in.connect_toggled(move |cb| {
            session.borrow_mut().settings.check_in_enabled = cb.is_active();
        });
    }
    {
        let session = session.clone();
        let window = window.clone();
        check_in_btn.connect_clicked(move |_| {
            let message = panels::check_in_message(&session.borrow().settings);
            dialogs::show(&window, Kind::Info, "Safety Check-in", &message);
        });
    }

    {
        let session = session.clone();
        let window = window.clone();
        nearby_btn.connect_clicked(move |_| {
            let url = session.borrow().config.safety.nearby_services_url.clone();
            dialogs::open_link(&window, &url);
        });
    }
    {
        let session = session.clone();
        let window = window.clone();
        history_btn.connect_clicked(move |_| {
            let summary = {
                let s = session.borrow();
                s.history.recent_locations(panels::HISTORY_LIMIT).and_then(|records| {
                    let counts = panels::session_counts(s.history.alert_count()?, s.history.incident_count()?);
                    Ok(format!("{}\n\n{counts}", panels::location_history(&records)))
                })
            };
            match summary {
                Ok(text) => dialogs::show(&window, Kind::Info, "Location History", &text),
                Err(e) => dialogs::show(&window, Kind::Error, "Location History", &e.to_string()),
            }
        });
    }
    {
        let window = window.clone();
        help_btn.connect_clicked(move |_| {
            let url = session.borrow().config.safety.help_center_url.clone();
            dialogs::open_link(&window, &url);
        });
    }
}

/// `explicit` forces light mode; otherwise light follows the system scheme.
fn apply_theme(dark: bool, explicit: bool) {
    let scheme = match (dark, explicit) {
        (true, _) => adw::ColorScheme::ForceDark,
        (false, true) => adw::ColorScheme::ForceLight,
        (false, false) => adw::ColorScheme::Default,
    };
    adw::StyleManager::default().set_color_scheme(scheme);
}

fn send_emergency_sos(
    session: &Rc<RefCell<Session>>,
    window: &adw::ApplicationWindow,
    btn: &gtk::Button,
    progress: &gtk::ProgressBar,
    hide_timer: &Rc<RefCell<Option<glib::SourceId>>>,
) {
    let (config, request) = {
        let s = session.borrow();
        if s.contacts.is_empty() {
            drop(s);
            dialogs::show(window, Kind::Error, "Emergency SOS", &DispatchError::NoContacts.to_string());
            return;
        }
        let request = AlertRequest { contacts: s.contacts.numbers(), profile: s.profile.clone() };
        (s.config.clone(), request)
    };
    let clients = ApiClient::new(config.location.timeout()).and_then(|api| {
        let sms = SmsClient::new(api.clone(), &config.twilio)?;
        let geo = GeoClient::new(api, &config.location.endpoint)?;
        Ok((geo, sms))
    });
    let (geo, sms) = match clients {
        Ok(clients) => clients,
        Err(e) => {
            log::error!("Cannot send SOS: {e}");
            dialogs::show(window, Kind::Error, "Emergency SOS", &e.to_string());
            return;
        }
    };

    // a hide left over from the previous alert must not hit this one
    if let Some(id) = hide_timer.borrow_mut().take() {
        id.remove();
    }
    btn.set_sensitive(false);
    progress.set_fraction(0.0);
    progress.set_text(Some("Locating…"));
    progress.set_visible(true);

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<DispatchEvent>();
    let locating = Rc::new(Cell::new(false));
    {
        let progress = progress.clone();
        let locating = locating.clone();
        MainContext::default().spawn_local(async move {
            while let Some(event) = rx.recv().await {
                match event {
                    DispatchEvent::Locating => {
                        locating.set(true);
                        let progress = progress.clone();
                        let locating = locating.clone();
                        glib::timeout_add_local(Duration::from_millis(100), move || {
                            if !locating.get() {
                                return glib::ControlFlow::Break;
                            }
                            progress.pulse();
                            glib::ControlFlow::Continue
                        });
                    }
                    DispatchEvent::Located(_) => {
                        locating.set(false);
                        progress.set_text(Some("Sending…"));
                    }
                    DispatchEvent::Sent { done, total } => {
                        progress.set_fraction(done as f64 / total as f64);
                        progress.set_text(Some(&format!("Sent {done} of {total}")));
                    }
                }
            }
            locating.set(false);
        });
    }

    let session = session.clone();
    let window = window.clone();
    let btn = btn.clone();
    let progress = progress.clone();
    let hide_timer = hide_timer.clone();
    crate::utils::run_async_to_main(
        async move { dispatch_alert(&geo, &sms, &request, Some(&tx)).await },
        move |res| {
            btn.set_sensitive(true);
            locating.set(false);
            let slot = hide_timer.clone();
            let id = glib::timeout_add_local_once(Duration::from_secs(1), move || {
                // fired sources must not be removed again
                slot.borrow_mut().take();
                progress.set_visible(false);
            });
            *hide_timer.borrow_mut() = Some(id);
            match res {
                Ok(report) => {
                    let s = session.borrow();
                    let failed = report.outcomes.len() - report.delivered();
                    if let Err(e) = s.history.record_location(&report.location) {
                        log::warn!("Could not record location: {e}");
                    }
                    if let Err(e) = s.history.record_alert(report.delivered(), failed) {
                        log::warn!("Could not record alert: {e}");
                    }
                    dialogs::show(&window, report.severity().into(), "Emergency SOS", &report.summary());
                }
                Err(DispatchError::Location(_)) => {
                    dialogs::show(&window, Kind::Error, "Location Error", "Unable to retrieve location");
                }
                Err(e) => dialogs::show(&window, Kind::Error, "Emergency SOS", &e.to_string()),
            }
        },
    );
}
