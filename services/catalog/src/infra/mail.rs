use anyhow::Context as _;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;

use crate::domain::challenge::CHALLENGE_TTL_MINUTES;
use crate::domain::repository::CodeNotifier;
use crate::domain::types::CodeNotice;
use crate::error::CatalogError;

/// Sends confirmation codes over SMTP.
#[derive(Clone)]
pub struct SmtpCodeNotifier {
    pub transport: AsyncSmtpTransport<Tokio1Executor>,
    pub from: Mailbox,
}

fn deletion_subject() -> &'static str {
    "Confirmation code (tool deletion)"
}

fn deletion_body(tool_name: &str, code: &str) -> String {
    format!(
        "Confirmation code for deleting the tool \"{tool_name}\": {code}\n\
         The code is valid for {CHALLENGE_TTL_MINUTES} minutes.\n\
         If you did not request this, you can ignore this message."
    )
}

fn build_message(from: &Mailbox, notice: &CodeNotice) -> anyhow::Result<Message> {
    let to: Mailbox = notice
        .to
        .parse()
        .with_context(|| format!("invalid recipient address {:?}", notice.to))?;
    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(deletion_subject())
        .header(ContentType::TEXT_PLAIN)
        .body(deletion_body(&notice.tool_name, notice.code.expose_secret()))
        .context("build confirmation email")
}

impl CodeNotifier for SmtpCodeNotifier {
    async fn send_code(&self, notice: &CodeNotice) -> Result<(), CatalogError> {
        let message = build_message(&self.from, notice)?;
        self.transport
            .send(message)
            .await
            .context("send confirmation email")
            .map_err(CatalogError::DeliveryFailed)?;
        // The code itself never reaches the logs.
        tracing::info!(to = %notice.to, "confirmation code sent");
        Ok(())
    }
}
