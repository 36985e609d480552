//! Ticket repository backed by PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, UpdateMany,
};
use tracing::debug;

use super::entities::ticket::{self, encode_tags, ActiveModel, Entity as TicketEntity};
use common::{AppError, AppResult, OptionExt};
use domain::{Ticket, TicketUpdate};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Ticket repository trait for dependency injection.
///
/// Every method is a single statement, so no transaction is ever held open.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Insert a fully populated ticket; returns the row as stored
    async fn create(&self, ticket: Ticket) -> AppResult<Ticket>;

    /// Find ticket by ID
    async fn get_by_id(&self, id: &str) -> AppResult<Ticket>;

    /// Newest first, `limit` rows starting at `offset`
    async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<Ticket>>;

    /// Apply the supplied fields and bump `updated_at`.
    ///
    /// An empty update is a plain read and leaves `updated_at` alone.
    async fn update(&self, id: &str, changes: TicketUpdate) -> AppResult<Ticket>;

    /// Permanently delete ticket
    async fn delete(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of TicketRepository
pub struct TicketStore {
    db: DatabaseConnection,
}

impl TicketStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TicketRepository for TicketStore {
    async fn create(&self, ticket: Ticket) -> AppResult<Ticket> {
        const OP: &str = "create";
        let target = format!("ticket {}", ticket.id);

        let tags = encode_tags(&ticket.tags).map_err(|e| AppError::storage(OP, &target, e))?;
        let active_model = ActiveModel {
            id: Set(ticket.id),
            title: Set(ticket.title),
            description: Set(ticket.description),
            status: Set(ticket.status.into()),
            priority: Set(ticket.priority.into()),
            assignee_id: Set(ticket.assignee_id),
            reporter_id: Set(ticket.reporter_id),
            tags: Set(tags),
            created_at: Set(ticket.created_at),
            updated_at: Set(ticket.updated_at),
        };

        // Postgres inserts with RETURNING, so the result reflects what was stored
        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::storage(OP, &target, e))?;
        model.into_domain(OP)
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Ticket> {
        const OP: &str = "get";

        TicketEntity::find_by_id(id.to_owned())
            .one(&self.db)
            .await
            .map_err(|e| AppError::storage(OP, format!("ticket {}", id), e))?
            .ok_or_not_found(OP, id)?
            .into_domain(OP)
    }

    async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<Ticket>> {
        const OP: &str = "list";

        let models = TicketEntity::find()
            .order_by_desc(ticket::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await
            .map_err(|e| {
                AppError::storage(OP, format!("page limit={} offset={}", limit, offset), e)
            })?;

        models.into_iter().map(|m| m.into_domain(OP)).collect()
    }

    async fn update(&self, id: &str, changes: TicketUpdate) -> AppResult<Ticket> {
        const OP: &str = "update";

        if changes.is_empty() {
            debug!(ticket_id = %id, "Empty update, returning stored ticket");
            return self.get_by_id(id).await.map_err(|e| {
                if e.is_not_found() {
                    AppError::not_found(OP, id)
                } else {
                    e
                }
            });
        }

        let target = format!("ticket {}", id);
        let statement = update_statement(id, changes, Utc::now())
            .map_err(|e| AppError::storage(OP, &target, e))?;

        // One UPDATE ... RETURNING; no row back means no such id
        statement
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| AppError::storage(OP, &target, e))?
            .into_iter()
            .next()
            .ok_or_not_found(OP, id)?
            .into_domain(OP)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        const OP: &str = "delete";

        let result = TicketEntity::delete_by_id(id.to_owned())
            .exec(&self.db)
            .await
            .map_err(|e| AppError::storage(OP, format!("ticket {}", id), e))?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(OP, id));
        }

        Ok(())
    }
}

/// Build the partial update for one ticket.
///
/// Only supplied fields are `Set`, so each one takes the next positional
/// parameter in column order; `updated_at` and the `id` filter always bind
/// last, in that order.
pub(crate) fn update_statement(
    id: &str,
    changes: TicketUpdate,
    now: DateTime<Utc>,
) -> Result<UpdateMany<TicketEntity>, serde_json::Error> {
    let tags = changes.tags.as_deref().map(encode_tags).transpose()?;

    let active_model = ActiveModel {
        id: NotSet,
        title: changes.title.map_or(NotSet, Set),
        description: changes.description.map_or(NotSet, |d| Set(Some(d))),
        status: changes.status.map_or(NotSet, |s| Set(s.into())),
        priority: changes.priority.map_or(NotSet, |p| Set(p.into())),
        assignee_id: changes.assignee_id.map_or(NotSet, |a| Set(Some(a))),
        reporter_id: NotSet,
        tags: tags.map_or(NotSet, Set),
        created_at: NotSet,
        updated_at: Set(now),
    };

    Ok(TicketEntity::update_many()
        .set(active_model)
        .filter(ticket::Column::Id.eq(id)))
}
