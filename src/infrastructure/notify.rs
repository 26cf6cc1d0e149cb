use crate::domain::errors::NotificationError;
use crate::domain::order::OrderView;
use crate::domain::ports::ConfirmationSender;

/// Confirmation sender that records the send in the service log.
///
/// Durable delivery does not depend on this: every commit writes an
/// `OrderCreated` row to `order_outbox` in the same transaction, and an
/// out-of-band relay owns actually getting the message to the customer.
pub struct LoggingConfirmationSender;

impl ConfirmationSender for LoggingConfirmationSender {
    fn send_confirmation(&self, order: &OrderView) -> Result<(), NotificationError> {
        log::info!(
            "order confirmation queued: number={} email={}",
            order.order_number,
            order.email
        );
        Ok(())
    }
}
