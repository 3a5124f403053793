//! Dashboard summary page

use std::sync::Arc;

use serde::Serialize;

use crate::config::ModelsConfig;
use crate::twin::RawTwin;
use crate::twin_client::TwinStore;

/// A headline number on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: u32,
    pub icon: &'static str,
    pub color: &'static str,
    pub footer: &'static str,
}

/// The dashboard's stat cards.
///
/// The values are placeholders: the room count query result is logged, not
/// shown here.
pub const STAT_CARDS: [StatCard; 2] = [
    StatCard {
        title: "Rooms",
        value: 5,
        icon: "living",
        color: "success",
        footer: "Hello",
    },
    StatCard {
        title: "Sensors",
        value: 3,
        icon: "thermostat",
        color: "warning",
        footer: "Hello",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct SummarySnapshot {
    pub cards: Vec<StatCard>,
}

/// Dashboard summary: issues a room count query on every load
#[derive(Clone)]
pub struct SummaryPage {
    query: String,
    store: Arc<dyn TwinStore>,
}

impl std::fmt::Debug for SummaryPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryPage")
            .field("query", &self.query)
            .finish()
    }
}

impl SummaryPage {
    pub fn new(models: &ModelsConfig, store: Arc<dyn TwinStore>) -> Self {
        Self {
            query: count_query(&models.room),
            store,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Run the count query and log what came back.
    ///
    /// Unlike the list pages, a failure is handed to the caller.
    pub async fn refresh(&self) -> crate::Result<Vec<RawTwin>> {
        let result = self.store.query_twins(&self.query).await?;
        tracing::info!(
            "Room count query returned {:?} ({} records)",
            count_of(&result),
            result.len()
        );
        Ok(result)
    }

    pub fn snapshot(&self) -> SummarySnapshot {
        SummarySnapshot {
            cards: STAT_CARDS.to_vec(),
        }
    }
}

pub fn count_query(model_id: &str) -> String {
    format!(
        "SELECT COUNT() FROM digitaltwins WHERE IS_OF_MODEL('{}')",
        model_id
    )
}

/// Read `COUNT` out of a count query result
pub fn count_of(records: &[RawTwin]) -> Option<u64> {
    records.first()?.get("COUNT")?.as_u64()
}
