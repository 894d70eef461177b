//! Verification email template

use chrono::{DateTime, Utc};

use super::mail_service::EmailMessage;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Render the verification email for `code`
///
/// `generated_at` is the render time; the expiry notice states the whole
/// minutes left until `expires_at`, rounded up. A non-blank
/// `custom_message` is placed before the text body and after the greeting
/// in the HTML body.
pub fn render_verification_email(
    app_name: &str,
    code: &str,
    expires_at: DateTime<Utc>,
    generated_at: DateTime<Utc>,
    custom_message: Option<&str>,
) -> EmailMessage {
    let remaining_seconds = (expires_at - generated_at).num_seconds().max(0);
    let minutes = (remaining_seconds + 59) / 60;
    let expires = expires_at.format(TIMESTAMP_FORMAT);
    let generated = generated_at.format(TIMESTAMP_FORMAT);
    let custom_message = custom_message.map(str::trim).filter(|m| !m.is_empty());

    let mut text_body = format!(
        "Email Verification - {app_name}\n\
         \n\
         Hello,\n\
         \n\
         You have requested email verification. Please use the following code to complete your verification:\n\
         \n\
         Verification Code: {code}\n\
         \n\
         Important: This code will expire in {minutes} minutes (at {expires}).\n\
         \n\
         If you didn't request this verification, please ignore this email.\n\
         \n\
         This is an automated message from {app_name}\n\
         Generated on: {generated}\n"
    );
    if let Some(custom) = custom_message {
        text_body = format!("{custom}\n\n{text_body}");
    }

    let app = escape_html(app_name);
    let custom_html = custom_message
        .map(|m| format!("<p>{}</p>", escape_html(m)))
        .unwrap_or_default();
    let html_body = format!(
        r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; background-color: #f4f4f4; margin: 0; padding: 20px;">
  <div style="max-width: 600px; margin: 0 auto; background-color: white; padding: 30px; border-radius: 10px;">
    <div style="text-align: center; margin-bottom: 30px;">
      <h1 style="color: #333;">Email Verification</h1>
      <h2 style="color: #666;">{app}</h2>
    </div>
    <p>Hello,</p>{custom_html}
    <p>You have requested email verification. Please use the following code to complete your verification:</p>
    <div style="background-color: #f8f9fa; border: 2px dashed #007bff; border-radius: 8px; padding: 20px; text-align: center; margin: 20px 0;">
      <p style="margin: 0; color: #333;">Your verification code is:</p>
      <div style="font-size: 32px; font-weight: bold; color: #007bff; letter-spacing: 5px; margin: 10px 0;">{code}</div>
    </div>
    <div style="background-color: #fff3cd; border: 1px solid #ffeaa7; color: #856404; padding: 15px; border-radius: 5px; margin: 20px 0;">
      <strong>Important:</strong> This code will expire in {minutes} minutes (at {expires}).
    </div>
    <p>If you didn't request this verification, please ignore this email.</p>
    <div style="margin-top: 30px; text-align: center; color: #666; font-size: 14px;">
      <p>This is an automated message from {app}</p>
      <p>Generated on: {generated}</p>
    </div>
  </div>
</body>
</html>
"#,
        code = escape_html(code),
    );

    EmailMessage {
        subject: format!("Email Verification Code - {app_name}"),
        text_body,
        html_body,
    }
}

/// Escape the five HTML-significant characters
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
