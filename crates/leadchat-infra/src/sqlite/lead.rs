//! SQLite lead repository implementation.

use leadchat_core::lead::repository::LeadRepository;
use leadchat_types::error::RepositoryError;
use leadchat_types::lead::ContactLead;
use sqlx::Row;
use uuid::Uuid;

use super::chat::{format_datetime, parse_datetime};
use super::pool::DatabasePool;

/// SQLite-backed implementation of `LeadRepository`.
#[derive(Clone)]
pub struct SqliteLeadRepository {
    pool: DatabasePool,
}

impl SqliteLeadRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct LeadRow {
    id: String,
    session_id: String,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    interest: String,
    followed_up: i64,
    created_at: String,
}

impl LeadRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            interest: row.try_get("interest")?,
            followed_up: row.try_get("followed_up")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_lead(self) -> Result<ContactLead, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid lead id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(ContactLead {
            id,
            session_id: self.session_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            interest: self.interest,
            followed_up: self.followed_up != 0,
            created_at,
        })
    }
}

impl LeadRepository for SqliteLeadRepository {
    async fn save_lead(&self, lead: &ContactLead) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO leads (id, session_id, name, email, phone, interest, followed_up, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(lead.id.to_string())
        .bind(&lead.session_id)
        .bind(&lead.name)
        .bind(&lead.email)
        .bind(&lead.phone)
        .bind(&lead.interest)
        .bind(lead.followed_up as i64)
        .bind(format_datetime(&lead.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list_leads(&self, session_id: &str) -> Result<Vec<ContactLead>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM leads WHERE session_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(session_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut leads = Vec::with_capacity(rows.len());
        for row in &rows {
            let lead_row = LeadRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            leads.push(lead_row.into_lead()?);
        }

        Ok(leads)
    }
}
