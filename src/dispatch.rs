//! SOS broadcast: one location lookup, then one SMS per contact.
//!
//! Every contact gets an outcome in the returned [`AlertReport`]; a failing
//! send is recorded and the loop moves on to the next number.

use crate::api::client::ApiError;
use crate::api::models::{Location, SentMessage};
use crate::session::UserProfile;
use std::future::Future;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

pub trait LocationProvider {
    fn locate(&self) -> impl Future<Output = Result<Location, ApiError>> + Send;
}

pub trait SmsSender {
    fn send(&self, to: &str, body: &str) -> impl Future<Output = Result<SentMessage, ApiError>> + Send;
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("No emergency contacts to notify")]
    NoContacts,
    #[error("Unable to retrieve location: {0}")]
    Location(ApiError),
}

/// Progress notifications for the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchEvent {
    Locating,
    Located(Location),
    Sent { done: usize, total: usize },
}

#[derive(Debug, Clone)]
pub struct AlertRequest {
    pub contacts: Vec<String>,
    pub profile: UserProfile,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Delivered { sid: String },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactOutcome {
    pub contact: String,
    pub delivery: Delivery,
}

/// How loudly the outcome of a dispatch should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct AlertReport {
    pub location: Location,
    pub outcomes: Vec<ContactOutcome>,
}

impl AlertReport {
    pub fn delivered(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.delivery, Delivery::Delivered { .. }))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|o| match &o.delivery {
            Delivery::Failed { error } => Some((o.contact.as_str(), error.as_str())),
            Delivery::Delivered { .. } => None,
        })
    }

    pub fn all_delivered(&self) -> bool {
        self.delivered() == self.outcomes.len()
    }

    pub fn none_delivered(&self) -> bool {
        self.delivered() == 0
    }

    /// Info when every send went out, error when none did, warning otherwise.
    pub fn severity(&self) -> Severity {
        if self.all_delivered() {
            Severity::Info
        } else if self.none_delivered() {
            Severity::Error
        } else {
            Severity::Warning
        }
    }

    pub fn summary(&self) -> String {
        let mut text = format!(
            "Distress signal sent to {} of {} emergency contacts.",
            self.delivered(),
            self.outcomes.len()
        );
        for (contact, error) in self.failures() {
            text.push_str(&format!("\nFailed: {contact} ({error})"));
        }
        text
    }
}

pub fn compose_message(profile: &UserProfile, location: &Location) -> String {
    let opening = if profile.name.is_empty() {
        "Emergency SOS".to_string()
    } else {
        format!("Emergency SOS from {}", profile.name)
    };
    format!(
        "{opening}: Please check on me immediately! My location is {} {}",
        location.display(),
        location.maps_url()
    )
}

fn emit(events: Option<&UnboundedSender<DispatchEvent>>, event: DispatchEvent) {
    if let Some(tx) = events {
        // receiver gone means the window closed; keep sending anyway
        let _ = tx.send(event);
    }
}

pub async fn dispatch_alert<L, S>(
    locator: &L,
    sender: &S,
    request: &AlertRequest,
    events: Option<&UnboundedSender<DispatchEvent>>,
) -> Result<AlertReport, DispatchError>
where
    L: LocationProvider,
    S: SmsSender,
{
    if request.contacts.is_empty() {
        return Err(DispatchError::NoContacts);
    }

    emit(events, DispatchEvent::Locating);
    let location = locator.locate().await.map_err(|e| {
        log::error!("Location lookup failed, alert abandoned: {e}");
        DispatchError::Location(e)
    })?;
    emit(events, DispatchEvent::Located(location.clone()));

    let body = compose_message(&request.profile, &location);
    let total = request.contacts.len();
    let mut outcomes = Vec::with_capacity(total);
    for (i, contact) in request.contacts.iter().enumerate() {
        let delivery = match sender.send(contact, &body).await {
            Ok(msg) => Delivery::Delivered { sid: msg.sid },
            Err(e) => {
                log::warn!("Failed to send message to {contact}: {e}");
                Delivery::Failed { error: e.to_string() }
            }
        };
        outcomes.push(ContactOutcome { contact: contact.clone(), delivery });
        emit(events, DispatchEvent::Sent { done: i + 1, total });
    }

    Ok(AlertReport { location, outcomes })
}
