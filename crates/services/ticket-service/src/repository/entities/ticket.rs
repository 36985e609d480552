//! Ticket database entity for SeaORM.

use sea_orm::entity::prelude::*;

use common::{AppError, AppResult};
use domain::{Ticket, TicketPriority, TicketStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub assignee_id: Option<String>,
    pub reporter_id: String,
    /// JSON array of strings
    #[sea_orm(column_type = "Text")]
    pub tags: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Encode tags for the `tags` column.
pub fn encode_tags(tags: &[String]) -> Result<String, serde_json::Error> {
    serde_json::to_string(tags)
}

/// Decode the `tags` column. An empty column reads as no tags.
pub fn decode_tags(raw: &str) -> Result<Vec<String>, serde_json::Error> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
}

impl Model {
    /// Convert database row to domain entity.
    ///
    /// Fails only when the stored tags are not a JSON string array.
    pub fn into_domain(self, operation: &'static str) -> AppResult<Ticket> {
        let tags = decode_tags(&self.tags)
            .map_err(|e| AppError::storage(operation, format!("ticket {}", self.id), e))?;

        Ok(Ticket {
            id: self.id,
            title: self.title,
            description: self.description,
            status: TicketStatus::from(self.status.as_str()),
            priority: TicketPriority::from(self.priority.as_str()),
            assignee_id: self.assignee_id,
            reporter_id: self.reporter_id,
            tags,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_preserve_order() {
        let tags = vec!["zeta".to_string(), "alpha".to_string(), "zeta".to_string()];
        let raw = encode_tags(&tags).unwrap();
        assert_eq!(raw, r#"["zeta","alpha","zeta"]"#);
        assert_eq!(decode_tags(&raw).unwrap(), tags);
    }

    #[test]
    fn test_empty_tags() {
        assert_eq!(encode_tags(&[]).unwrap(), "[]");
        assert!(decode_tags("[]").unwrap().is_empty());
        assert!(decode_tags("").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_tags_fail_conversion() {
        let model = Model {
            id: "t-1".to_string(),
            title: "Broken".to_string(),
            description: None,
            status: "OPEN".to_string(),
            priority: "LOW".to_string(),
            assignee_id: None,
            reporter_id: "r-1".to_string(),
            tags: r#"{"not":"an array"}"#.to_string(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let err = model.into_domain("get").unwrap_err();
        assert!(matches!(err, AppError::Storage { operation: "get", .. }));
    }

    #[test]
    fn test_unknown_stored_enums_use_defaults() {
        let now = chrono::Utc::now();
        let model = Model {
            id: "t-2".to_string(),
            title: "Legacy".to_string(),
            description: Some("imported".to_string()),
            status: "TRIAGE".to_string(),
            priority: "P0".to_string(),
            assignee_id: Some("u-1".to_string()),
            reporter_id: "r-1".to_string(),
            tags: "[]".to_string(),
            created_at: now,
            updated_at: now,
        };

        let ticket = model.into_domain("get").unwrap();
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.priority, TicketPriority::Medium);
        assert_eq!(ticket.description.as_deref(), Some("imported"));
    }
}
