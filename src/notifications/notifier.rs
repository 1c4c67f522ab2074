use log::{debug, warn};
use nanoid::nanoid;
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::bookings::rto::booking_rto::BookingRto;

const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingEnded {
  pub id: i64,
}

/// Lifecycle events pushed to every connected subscriber.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum BookingEvent {
  BookingCreated(BookingRto),
  BookingEnded(BookingEnded),
}

impl BookingEvent {
  pub fn name(&self) -> &'static str {
    match self {
      Self::BookingCreated(_) => "booking_created",
      Self::BookingEnded(_) => "booking_ended",
    }
  }
}

/// Best-effort fan-out of booking events. Nothing is stored: a subscriber
/// only sees events published while it is connected, and one that falls more
/// than `CHANNEL_CAPACITY` events behind skips the ones it missed.
#[derive(Debug, Clone)]
pub struct Notifier {
  sender: broadcast::Sender<BookingEvent>,
}

impl Default for Notifier {
  fn default() -> Self {
    let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
    Self { sender }
  }
}

impl Notifier {
  /// Returns how many subscribers the event was handed to.
  pub fn publish(&self, event: BookingEvent) -> usize {
    let name = event.name();
    match self.sender.send(event) {
      Ok(receivers) => {
        debug!("Published {name} to {receivers} subscriber(s)");
        receivers
      }
      Err(_) => {
        debug!("Published {name} with no subscribers");
        0
      }
    }
  }

  pub fn subscribe(&self) -> Subscription {
    let subscription = Subscription {
      id: nanoid!(),
      receiver: self.sender.subscribe(),
    };
    debug!(
      "Subscriber {} connected, {} listening",
      subscription.id,
      self.subscriber_count()
    );
    subscription
  }

  pub fn subscriber_count(&self) -> usize {
    self.sender.receiver_count()
  }
}

pub struct Subscription {
  pub id: String,
  receiver: broadcast::Receiver<BookingEvent>,
}

impl Subscription {
  /// Waits for the next event. `None` once the notifier is gone.
  pub async fn next(&mut self) -> Option<BookingEvent> {
    loop {
      match self.receiver.recv().await {
        Ok(event) => return Some(event),
        Err(RecvError::Lagged(skipped)) => {
          warn!("Subscriber {} lagged, skipped {skipped} event(s)", self.id);
        }
        Err(RecvError::Closed) => return None,
      }
    }
  }

  #[cfg(test)]
  pub fn try_next(&mut self) -> Option<BookingEvent> {
    self.receiver.try_recv().ok()
  }
}

impl Drop for Subscription {
  fn drop(&mut self) {
    debug!("Subscriber {} disconnected", self.id);
  }
}
