pub mod client;
pub mod geo;
pub mod models;
pub mod sms;

#[cfg(test)]
pub(crate) mod test_server;
