//! Storage-layer listing types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use flowsync_core::{FlowDocument, Theme, UserId};

/// Collection name used when none is configured.
pub const DEFAULT_COLLECTION: &str = "reactflow_data";

/// Summary of a stored flow document (for listing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub user_id: UserId,
    pub node_count: usize,
    pub edge_count: usize,
    pub theme: Theme,
    pub updated_at: DateTime<Utc>,
}

impl From<&FlowDocument> for UserSummary {
    fn from(doc: &FlowDocument) -> Self {
        UserSummary {
            user_id: doc.user_id.clone(),
            node_count: doc.node_count,
            edge_count: doc.edge_count,
            theme: doc.theme.clone(),
            updated_at: doc.updated_at,
        }
    }
}
