//! Bodies of the transactional emails.

use crate::backend::email::client::OutgoingEmail;
use crate::shared::models::payment::format_amount;
use crate::shared::Payment;

pub fn verification_email(app_url: &str, username: &str, to: &str, token: &str) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_string(),
        subject: "Verify your Matchday account".to_string(),
        body: format!(
            "Hi {username},\n\n\
             Thanks for joining Matchday. Confirm your email address to start commenting \
             and unlock your dashboard:\n\n\
             {app_url}/verify-email?token={token}\n\n\
             If you did not create an account you can ignore this message.\n"
        ),
    }
}

pub fn password_reset_email(app_url: &str, username: &str, to: &str, token: &str, ttl_minutes: i64) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_string(),
        subject: "Reset your Matchday password".to_string(),
        body: format!(
            "Hi {username},\n\n\
             Someone asked to reset the password for your account. The link below is valid \
             for {ttl_minutes} minutes:\n\n\
             {app_url}/reset-password?token={token}\n\n\
             If this was not you, your password is unchanged.\n"
        ),
    }
}

pub fn payment_receipt_email(username: &str, to: &str, payment: &Payment) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_string(),
        subject: "Your Matchday receipt".to_string(),
        body: format!(
            "Hi {username},\n\n\
             We received your payment of {} for the {} plan (reference {}).\n\
             Premium predictions are now unlocked on your account.\n",
            format_amount(payment.amount_cents, &payment.currency),
            payment.plan,
            payment.reference
        ),
    }
}
