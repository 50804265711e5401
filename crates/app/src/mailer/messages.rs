//! Email message constructors.

use crate::mailer::EmailMessage;

/// Render a minor-unit amount as `"INR 1,234.50"`-style text (no grouping).
#[must_use]
pub fn format_amount(amount: u64, currency: &str) -> String {
    format!("{currency} {}.{:02}", amount / 100, amount % 100)
}

/// Receipt sent to the buyer after a verified payment.
#[must_use]
pub fn payment_receipt(
    to: &str,
    buyer_name: &str,
    design_title: &str,
    amount: u64,
    currency: &str,
    payment_id: &str,
) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Payment Successful - Atelier".to_string(),
        html_body: format!(
            "<div style=\"font-family: Arial, sans-serif; padding: 20px; color: #333;\">\
             <h2>Payment Successful</h2>\
             <p>Dear {buyer_name},</p>\
             <p>Thank you for purchasing <strong>{design_title}</strong>.</p>\
             <p>Amount paid: <strong>{}</strong></p>\
             <p>Transaction ID: {payment_id}</p>\
             <p>You can now download the design documentation from the design page.</p>\
             </div>",
            format_amount(amount, currency),
        ),
    }
}

/// Alert sent to the studio when a design sells.
#[must_use]
pub fn sale_alert(
    to: &str,
    design_title: &str,
    amount: u64,
    currency: &str,
    buyer_name: &str,
    buyer_email: &str,
    payment_id: &str,
) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "New Sale - Atelier".to_string(),
        html_body: format!(
            "<div style=\"font-family: Arial, sans-serif; padding: 20px; color: #333;\">\
             <h2>New Design Sold</h2>\
             <p><strong>Design:</strong> {design_title}</p>\
             <p><strong>Amount:</strong> {}</p>\
             <p><strong>Buyer:</strong> {buyer_name} ({buyer_email})</p>\
             <p><strong>Transaction ID:</strong> {payment_id}</p>\
             </div>",
            format_amount(amount, currency),
        ),
    }
}

/// Alert sent to the studio when an appointment is requested.
#[must_use]
pub fn appointment_alert(
    to: &str,
    name: &str,
    date: &str,
    time_slot: &str,
    mode: &str,
    purpose: &str,
) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "New Appointment Request".to_string(),
        html_body: format!(
            "<h2>New Appointment Request</h2>\
             <p><strong>Name:</strong> {name}</p>\
             <p><strong>Date:</strong> {date}</p>\
             <p><strong>Time:</strong> {time_slot}</p>\
             <p><strong>Mode:</strong> {mode}</p>\
             <p><strong>Purpose:</strong> {purpose}</p>"
        ),
    }
}

/// Confirmation sent to the requester after booking.
#[must_use]
pub fn appointment_received(to: &str, name: &str, date: &str, time_slot: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Appointment Request Received".to_string(),
        html_body: format!(
            "<h2>Appointment Request Received</h2>\
             <p>Dear {name},</p>\
             <p>We have received your request for an appointment on \
             <strong>{date}</strong> at <strong>{time_slot}</strong>.</p>\
             <p>We will confirm the details shortly.</p>"
        ),
    }
}

/// Status update sent to the requester when the studio responds.
#[must_use]
pub fn appointment_updated(
    to: &str,
    name: &str,
    status: &str,
    meeting_link: Option<&str>,
    admin_reply: Option<&str>,
) -> EmailMessage {
    let link_block = meeting_link.map_or(String::new(), |link| {
        format!("<p><strong>Meeting link:</strong> <a href=\"{link}\">{link}</a></p>")
    });
    let reply_block = admin_reply.map_or(String::new(), |reply| {
        format!("<p><strong>Message from the studio:</strong><br>{reply}</p>")
    });

    EmailMessage {
        to: to.to_string(),
        subject: format!("Appointment Update: {}", status.to_uppercase()),
        html_body: format!(
            "<h2>Appointment {status}</h2>\
             <p>Dear {name},</p>\
             <p>Your appointment status has been updated to <strong>{status}</strong>.</p>\
             {link_block}{reply_block}"
        ),
    }
}

/// Password-reset email carrying the one-time code and a direct link.
#[must_use]
pub fn password_reset(to: &str, code: &str, reset_link: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Reset Your Password - Atelier".to_string(),
        html_body: format!(
            "<div style=\"font-family: Arial, sans-serif; padding: 20px; color: #333;\">\
             <h2>Password Reset</h2>\
             <p>You requested a password reset. Use the code below or follow the link:</p>\
             <p style=\"font-size: 28px; letter-spacing: 6px;\"><strong>{code}</strong></p>\
             <p>The code is valid for 5 minutes.</p>\
             <p><a href=\"{reset_link}\">Reset password</a></p>\
             <p>If you didn't request this, please ignore this email.</p>\
             </div>"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_amount_renders_minor_units() {
        assert_eq!(format_amount(123_450, "INR"), "INR 1234.50");
        assert_eq!(format_amount(5, "INR"), "INR 0.05");
        assert_eq!(format_amount(0, "USD"), "USD 0.00");
    }

    #[test]
    fn payment_receipt_addresses_the_buyer() {
        let message = payment_receipt(
            "buyer@example.com",
            "Asha",
            "Hillside Villa",
            50_000,
            "INR",
            "pay_123",
        );

        assert_eq!(message.to, "buyer@example.com");
        assert!(message.html_body.contains("Hillside Villa"));
        assert!(message.html_body.contains("INR 500.00"));
        assert!(message.html_body.contains("pay_123"));
    }

    #[test]
    fn appointment_updated_omits_absent_blocks() {
        let message = appointment_updated("user@example.com", "Asha", "confirmed", None, None);

        assert!(!message.html_body.contains("Meeting link"));
        assert!(!message.html_body.contains("Message from the studio"));
    }

    #[test]
    fn appointment_updated_includes_link_and_reply() {
        let message = appointment_updated(
            "user@example.com",
            "Asha",
            "confirmed",
            Some("https://meet.example.com/abc"),
            Some("See you then"),
        );

        assert!(message.html_body.contains("https://meet.example.com/abc"));
        assert!(message.html_body.contains("See you then"));
        assert_eq!(message.subject, "Appointment Update: CONFIRMED");
    }
}
