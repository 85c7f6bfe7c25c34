pub mod contacts_view;
pub mod dialogs;
pub mod main_window;
pub mod profile_view;
