use tracing::info;

/// Notification sink for the registration OTP flow. Delivery is
/// fire-and-forget; a failed send never fails the registration.
///
/// TODO: wire an SMTP relay here; until then the code lands in the app log
/// so local setups can complete verification.
pub async fn send_otp_email(to: &str, otp: &str) {
    info!(to, otp, "Dispatching verification OTP email");
}
