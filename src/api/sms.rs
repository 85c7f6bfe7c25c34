use crate::api::client::{ApiClient, ApiError};
use crate::api::models::SentMessage;
use crate::app::TwilioConfig;
use crate::dispatch::SmsSender;
use url::Url;

/// Twilio Programmable Messaging over REST.
pub struct SmsClient {
    api: ApiClient,
    messages_url: Url,
    account_sid: String,
    auth_token: String,
    from: String,
}

impl SmsClient {
    pub fn new(api: ApiClient, cfg: &TwilioConfig) -> Result<Self, ApiError> {
        if !cfg.is_configured() {
            return Err(ApiError::MissingCredentials);
        }
        Ok(Self {
            api,
            messages_url: messages_url(&cfg.api_base, &cfg.account_sid)?,
            account_sid: cfg.account_sid.clone(),
            auth_token: cfg.auth_token.clone(),
            from: cfg.from_number.clone(),
        })
    }

    pub async fn send_message(&self, to: &str, body: &str) -> Result<SentMessage, ApiError> {
        let params = [("To", to), ("From", self.from.as_str()), ("Body", body)];
        let resp = self
            .api
            .http
            .post(self.messages_url.clone())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await?;
        let resp = ApiClient::check(resp).await?;
        let msg: SentMessage = resp.json().await?;
        log::info!(
            "Sent message to {to}, SID: {} ({})",
            msg.sid,
            msg.status.as_deref().unwrap_or("unknown")
        );
        Ok(msg)
    }
}

impl SmsSender for SmsClient {
    async fn send(&self, to: &str, body: &str) -> Result<SentMessage, ApiError> {
        self.send_message(to, body).await
    }
}

fn messages_url(api_base: &str, account_sid: &str) -> Result<Url, ApiError> {
    let base = api_base.trim_end_matches('/');
    Ok(Url::parse(&format!("{base}/2010-04-01/Accounts/{account_sid}/Messages.json"))?)
}
