use std::fmt;
use thiserror::Error;

/// Numbers at or below this length are rejected even with a `+` prefix.
const MIN_NUMBER_LEN: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("Please enter a phone number")]
    Empty,
    #[error("Please enter a valid phone number in E.164 format")]
    InvalidFormat,
    #[error("Please select a contact first")]
    NoSelection,
}

/// An emergency contact phone number, e.g. `+15551234567`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact(String);

impl Contact {
    pub fn number(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Loose E.164 check: leading `+` and more than ten characters.
pub fn validate(raw: &str) -> Result<Contact, ContactError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ContactError::Empty);
    }
    if !trimmed.starts_with('+') || trimmed.chars().count() <= MIN_NUMBER_LEN {
        return Err(ContactError::InvalidFormat);
    }
    Ok(Contact(trimmed.to_string()))
}

#[derive(Debug, Default)]
pub struct ContactBook {
    contacts: Vec<Contact>,
    selected: Option<usize>,
}

impl ContactBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a book from configured numbers, dropping the ones that don't validate.
    pub fn seeded<I, S>(numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut book = Self::new();
        for raw in numbers {
            match validate(raw.as_ref()) {
                Ok(contact) => book.contacts.push(contact),
                Err(e) => log::warn!("Skipping configured contact {:?}: {}", raw.as_ref(), e),
            }
        }
        book
    }

    pub fn all(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Select the entry at `index`; anything out of range clears the selection.
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|i| *i < self.contacts.len());
    }

    pub fn add(&mut self, raw: &str) -> Result<&Contact, ContactError> {
        let contact = validate(raw)?;
        self.contacts.push(contact);
        Ok(&self.contacts[self.contacts.len() - 1])
    }

    pub fn edit_selected(&mut self, raw: &str) -> Result<&Contact, ContactError> {
        let index = self.selected.ok_or(ContactError::NoSelection)?;
        let contact = validate(raw)?;
        self.contacts[index] = contact;
        Ok(&self.contacts[index])
    }

    pub fn remove_selected(&mut self) -> Result<Contact, ContactError> {
        let index = self.selected.take().ok_or(ContactError::NoSelection)?;
        Ok(self.contacts.remove(index))
    }

    pub fn numbers(&self) -> Vec<String> {
        self.contacts.iter().map(|c| c.0.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_plus_or_short_numbers() {
        assert_eq!(validate(""), Err(ContactError::Empty));
        assert_eq!(validate("   "), Err(ContactError::Empty));
        assert_eq!(validate("15551234567"), Err(ContactError::InvalidFormat));
        // exactly ten characters is still too short
        assert_eq!(validate("+919876543"), Err(ContactError::InvalidFormat));
        assert!(validate("+9198765432").is_ok());
    }

    #[test]
    fn add_appends_one_contact() {
        let mut book = ContactBook::new();
        assert!(book.add("+15551234567").is_ok());
        assert_eq!(book.len(), 1);
        assert!(book.add("+1555").is_err());
        assert_eq!(book.len(), 1);
        assert_eq!(book.all()[0].number(), "+15551234567");
    }

    #[test]
    fn add_trims_whitespace() {
        let mut book = ContactBook::new();
        let added = book.add("  +15551234567 ").unwrap().clone();
        assert_eq!(added.number(), "+15551234567");
    }

    #[test]
    fn remove_deletes_selected_index() {
        let mut book = ContactBook::seeded(["+15551234567", "+15551234567", "+442071234567"]);
        book.select(Some(1));
        let removed = book.remove_selected().unwrap();
        assert_eq!(removed.number(), "+15551234567");
        assert_eq!(book.len(), 2);
        assert_eq!(book.all()[1].number(), "+442071234567");
        assert_eq!(book.remove_selected(), Err(ContactError::NoSelection));
    }

    #[test]
    fn edit_and_remove_require_selection() {
        let mut book = ContactBook::seeded(["+15551234567"]);
        assert_eq!(book.edit_selected("+15557654321"), Err(ContactError::NoSelection));
        assert_eq!(book.remove_selected(), Err(ContactError::NoSelection));
        book.select(Some(5));
        assert_eq!(book.remove_selected(), Err(ContactError::NoSelection));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn edit_replaces_only_with_valid_number() {
        let mut book = ContactBook::seeded(["+15551234567"]);
        book.select(Some(0));
        assert_eq!(book.edit_selected("555"), Err(ContactError::InvalidFormat));
        assert_eq!(book.all()[0].number(), "+15551234567");
        book.edit_selected("+15557654321").unwrap();
        assert_eq!(book.all()[0].number(), "+15557654321");
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn seeded_skips_placeholders() {
        let book = ContactBook::seeded(["+", "+91", "+919876543210"]);
        assert_eq!(book.numbers(), vec!["+919876543210".to_string()]);
    }
}
