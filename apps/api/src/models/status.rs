use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{Collection, Record};

/// Liveness ping recorded by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: Uuid,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

impl StatusCheck {
    pub fn new(client_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_name,
            timestamp: Utc::now(),
        }
    }
}

impl Record for StatusCheck {
    const COLLECTION: Collection = Collection::StatusChecks;

    fn record_id(&self) -> String {
        self.id.to_string()
    }
}
