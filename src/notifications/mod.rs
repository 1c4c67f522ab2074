pub mod notifier;

use std::time::{Duration, Instant};

use actix_web::{web, HttpRequest, HttpResponse};
use actix_ws::{Message, MessageStream, Session};
use log::{error, warn};
use notifier::{BookingEvent, Notifier, Subscription};
use tokio::time;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Upgrades to a WebSocket that receives every booking event published while
/// it stays connected.
pub async fn subscribe(
  notifier: web::Data<Notifier>,
  request: HttpRequest,
  body: web::Payload,
) -> actix_web::Result<HttpResponse> {
  let (response, session, stream) = actix_ws::handle(&request, body)?;
  let subscription = notifier.subscribe();
  actix_web::rt::spawn(run_session(subscription, session, stream));
  Ok(response)
}

enum Step {
  Continue,
  Stop,
}

async fn run_session(
  mut subscription: Subscription,
  mut session: Session,
  mut stream: MessageStream,
) {
  let mut last_heartbeat = Instant::now();
  let mut heartbeat = time::interval(HEARTBEAT_INTERVAL);

  loop {
    let step = tokio::select! {
      event = subscription.next() => match event {
        Some(event) => forward(&mut session, &event).await,
        None => Step::Stop,
      },
      message = stream.recv() => {
        last_heartbeat = Instant::now();
        handle_message(&mut session, message).await
      },
      _ = heartbeat.tick() => {
        if last_heartbeat.elapsed() > CLIENT_TIMEOUT {
          warn!("Subscriber {} timed out", subscription.id);
          Step::Stop
        } else if session.ping(b"").await.is_err() {
          Step::Stop
        } else {
          Step::Continue
        }
      },
    };

    if let Step::Stop = step {
      let _ = session.close(None).await;
      return;
    }
  }
}

async fn forward(session: &mut Session, event: &BookingEvent) -> Step {
  let payload = match serde_json::to_string(event) {
    Ok(payload) => payload,
    Err(err) => {
      error!("Failed to encode {}: {err}", event.name());
      return Step::Continue;
    }
  };
  match session.text(payload).await {
    Ok(()) => Step::Continue,
    Err(_) => Step::Stop,
  }
}

async fn handle_message(
  session: &mut Session,
  message: Option<Result<Message, actix_ws::ProtocolError>>,
) -> Step {
  match message {
    Some(Ok(Message::Ping(bytes))) => match session.pong(&bytes).await {
      Ok(()) => Step::Continue,
      Err(_) => Step::Stop,
    },
    Some(Ok(Message::Close(_))) | None => Step::Stop,
    // The channel is push-only; anything else the client sends is ignored.
    Some(Ok(_)) => Step::Continue,
    Some(Err(err)) => {
      warn!("WebSocket protocol error: {err}");
      Step::Stop
    }
  }
}
