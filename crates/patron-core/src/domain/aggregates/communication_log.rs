//! Communication Log
//!
//! Record of a broadcast message sent to a campaign's customers. These
//! records are created and owned by the remote API; the client composes a
//! draft, submits it, and reads the log back for history display. Nothing
//! here is ever mutated locally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Email, EntityId};

/// A customer the message was delivered to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: EntityId,
    pub name: String,
    pub email: Email,
}

/// A sent-message record as returned by the API
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommunicationLog {
    pub id: EntityId,
    pub campaign_id: EntityId,
    pub campaign_name: String,
    pub message: String,
    pub recipients: Vec<Recipient>,
    pub created_at: DateTime<Utc>,
}

impl CommunicationLog {
    pub fn recipient_count(&self) -> usize {
        self.recipients.len()
    }
}

/// A message composed locally, not yet accepted by the API
#[derive(Clone, Debug)]
pub struct MessageDraft {
    pub campaign_id: EntityId,
    pub campaign_name: String,
    pub message: String,
    pub recipients: Vec<Recipient>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipient_count() {
        let log = CommunicationLog {
            id: EntityId::new(),
            campaign_id: EntityId::new(),
            campaign_name: "Summer Sale".into(),
            message: "20% off this week".into(),
            recipients: vec![
                Recipient {
                    id: EntityId::new(),
                    name: "Ana Lee".into(),
                    email: Email::new("ana@example.com").unwrap(),
                },
                Recipient {
                    id: EntityId::new(),
                    name: "Bob".into(),
                    email: Email::new("bob@example.com").unwrap(),
                },
            ],
            created_at: Utc::now(),
        };

        assert_eq!(log.recipient_count(), 2);
    }
}
