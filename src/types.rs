use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Who authored a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Remote,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    /// Millisecond creation stamp. Two messages built in the same
    /// millisecond share an id.
    pub id: String,
    pub text: String,
    pub origin: Origin,
    pub created_at: OffsetDateTime,
    pub attachments: Vec<String>,
}

impl Message {
    pub fn new(origin: Origin, text: impl Into<String>, attachments: Vec<String>) -> Self {
        Self::at(current_time(), origin, text, attachments)
    }

    pub fn at(
        created_at: OffsetDateTime,
        origin: Origin,
        text: impl Into<String>,
        attachments: Vec<String>,
    ) -> Self {
        Self {
            id: message_id(created_at),
            text: text.into(),
            origin,
            created_at,
            attachments,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self.origin, Origin::User)
    }
}

/// Wall clock in UTC. On wasm32 this reads the browser's `Date` through
/// the `time/wasm-bindgen` feature.
pub fn current_time() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

fn message_id(created_at: OffsetDateTime) -> String {
    (created_at.unix_timestamp_nanos() / 1_000_000).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn id_is_millisecond_stamp() {
        let at = datetime!(2024-05-01 10:30:00.123_456 UTC);
        let msg = Message::at(at, Origin::User, "hi", Vec::new());
        assert_eq!(msg.id, "1714559400123");
    }

    #[test]
    fn new_message_reads_the_wall_clock() {
        let before = current_time();
        let msg = Message::new(Origin::User, "now", Vec::new());
        let after = current_time();
        assert!(before <= msg.created_at && msg.created_at <= after);
        assert!(msg.created_at.offset().is_utc());
    }

    #[test]
    fn same_millisecond_collides() {
        let a = Message::at(datetime!(2024-05-01 10:30:00.123_100 UTC), Origin::User, "a", vec![]);
        let b = Message::at(datetime!(2024-05-01 10:30:00.123_900 UTC), Origin::Remote, "b", vec![]);
        assert_eq!(a.id, b.id);
    }
}
