pub mod api;
pub mod dispatcher;
pub mod models;
pub mod twilio;

pub use api::send_notification;
pub use dispatcher::NotificationDispatcher;
pub use models::{
    DispatchResult, NotificationRequest, NotificationResponse, OutboundMessage, SkipReason,
};
pub use twilio::{MessageSender, TwilioClient};
