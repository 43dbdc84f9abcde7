//! PostgreSQL implementation of the ChannelStore port
//!
//! Each guarded mutation is one SQL statement whose WHERE clause carries
//! the identity predicate and the precondition together, so concurrent
//! callers racing on the same channel cannot interleave between check and
//! patch. A `RETURNING` clause tells success apart from predicate failure;
//! the post-state aggregate is then read back by id.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use channel_core::{
    Channel, ChannelBasicInfo, ChannelId, ChannelMember, ChannelPatch, ChannelStore,
    ChannelType, ModerationStatus, NewChannel, StoreResult,
};

use crate::mappers::{assemble_channel, map_basic_info, map_member};
use crate::models::{BasicInfoRow, ChannelRow, MemberRow, ThreadRow};

use super::error::map_db_error;

const CHANNEL_COLUMNS: &str =
    "id, name, owner_id, channel_type, is_active, created_at, updated_at, deleted_at";

/// PostgreSQL implementation of ChannelStore
#[derive(Clone)]
pub struct PgChannelStore {
    pool: PgPool,
}

impl PgChannelStore {
    /// Create a new PgChannelStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Read back the full aggregate for a channel id, active or not
    async fn load(&self, id: Uuid) -> StoreResult<Option<Channel>> {
        let row = sqlx::query_as::<_, ChannelRow>(&format!(
            "SELECT {CHANNEL_COLUMNS} FROM channels WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(row) = row else { return Ok(None) };

        let members = sqlx::query_as::<_, MemberRow>(
            r"
            SELECT channel_id, user_id, joined_at, status
            FROM channel_members
            WHERE channel_id = $1
            ORDER BY joined_at, user_id
            ",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let threads = sqlx::query_as::<_, ThreadRow>(
            r"
            SELECT thread_id, channel_id, attached_at
            FROM channel_threads
            WHERE channel_id = $1
            ORDER BY attached_at, thread_id
            ",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Some(assemble_channel(row, members, threads)))
    }

    /// Load aggregates for a list of channel rows
    async fn load_all(&self, rows: Vec<ChannelRow>) -> StoreResult<Vec<Channel>> {
        let mut channels = Vec::with_capacity(rows.len());
        for row in rows {
            if let Some(channel) = self.load(row.id).await? {
                channels.push(channel);
            }
        }
        Ok(channels)
    }

    /// Map a guarded-mutation outcome to the post-state aggregate
    async fn post_state(&self, matched: Option<Uuid>) -> StoreResult<Option<Channel>> {
        match matched {
            Some(id) => self.load(id).await,
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ChannelStore for PgChannelStore {
    #[instrument(skip(self, new), fields(owner_id = %new.owner_id))]
    async fn create(&self, new: NewChannel) -> StoreResult<Channel> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let row = sqlx::query_as::<_, ChannelRow>(&format!(
            r"
            INSERT INTO channels (name, owner_id, channel_type)
            VALUES ($1, $2, $3)
            RETURNING {CHANNEL_COLUMNS}
            "
        ))
        .bind(&new.name)
        .bind(&new.owner_id)
        .bind(new.channel_type.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // Owner auto-joins first; initial users follow, deduplicated by the
        // member primary key so a repeated or owner-listing input is a no-op.
        sqlx::query(
            r"
            INSERT INTO channel_members (channel_id, user_id)
            VALUES ($1, $2)
            ",
        )
        .bind(row.id)
        .bind(&new.owner_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if !new.initial_users.is_empty() {
            sqlx::query(
                r"
                INSERT INTO channel_members (channel_id, user_id)
                SELECT $1, u FROM UNNEST($2::TEXT[]) AS u
                ON CONFLICT (channel_id, user_id) DO NOTHING
                ",
            )
            .bind(row.id)
            .bind(&new.initial_users)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        let members = sqlx::query_as::<_, MemberRow>(
            r"
            SELECT channel_id, user_id, joined_at, status
            FROM channel_members
            WHERE channel_id = $1
            ORDER BY joined_at, user_id
            ",
        )
        .bind(row.id)
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(assemble_channel(row, members, Vec::new()))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ChannelId) -> StoreResult<Option<Channel>> {
        match self.load(id.into_inner()).await? {
            Some(channel) if channel.is_active => Ok(Some(channel)),
            _ => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn find_by_id_any(&self, id: ChannelId) -> StoreResult<Option<Channel>> {
        self.load(id.into_inner()).await
    }

    #[instrument(skip(self, patch))]
    async fn update_fields(
        &self,
        id: ChannelId,
        patch: ChannelPatch,
    ) -> StoreResult<Option<Channel>> {
        // COALESCE keeps unset fields untouched; a field is modified only
        // if the caller explicitly provided it.
        let matched = sqlx::query_scalar::<_, Uuid>(
            r"
            UPDATE channels
            SET name = COALESCE($2, name),
                owner_id = COALESCE($3, owner_id),
                channel_type = COALESCE($4, channel_type),
                updated_at = NOW()
            WHERE id = $1 AND is_active
            RETURNING id
            ",
        )
        .bind(id.into_inner())
        .bind(patch.name)
        .bind(patch.owner_id)
        .bind(patch.channel_type.map(ChannelType::as_str))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.post_state(matched).await
    }

    #[instrument(skip(self))]
    async fn deactivate(&self, id: ChannelId) -> StoreResult<Option<Channel>> {
        let matched = sqlx::query_scalar::<_, Uuid>(
            r"
            UPDATE channels
            SET is_active = FALSE, deleted_at = NOW()
            WHERE id = $1 AND is_active
            RETURNING id
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.post_state(matched).await
    }

    #[instrument(skip(self))]
    async fn reactivate(&self, id: ChannelId) -> StoreResult<Option<Channel>> {
        // deleted_at stays as a record of the most recent deactivation.
        let matched = sqlx::query_scalar::<_, Uuid>(
            r"
            UPDATE channels
            SET is_active = TRUE, updated_at = NOW()
            WHERE id = $1 AND NOT is_active
            RETURNING id
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.post_state(matched).await
    }

    #[instrument(skip(self))]
    async fn add_member(&self, id: ChannelId, user_id: &str) -> StoreResult<Option<Channel>> {
        // The guarded SELECT requires an active channel; the conflict guard
        // on the member primary key makes concurrent same-user adds yield
        // exactly one success.
        let matched = sqlx::query_scalar::<_, Uuid>(
            r"
            INSERT INTO channel_members (channel_id, user_id)
            SELECT c.id, $2 FROM channels c
            WHERE c.id = $1 AND c.is_active
            ON CONFLICT (channel_id, user_id) DO NOTHING
            RETURNING channel_id
            ",
        )
        .bind(id.into_inner())
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.post_state(matched).await
    }

    #[instrument(skip(self))]
    async fn remove_member(&self, id: ChannelId, user_id: &str) -> StoreResult<Option<Channel>> {
        let matched = sqlx::query_scalar::<_, Uuid>(
            r"
            DELETE FROM channel_members m
            USING channels c
            WHERE m.channel_id = c.id
              AND c.id = $1 AND c.is_active
              AND m.user_id = $2
              AND c.owner_id <> $2
            RETURNING m.channel_id
            ",
        )
        .bind(id.into_inner())
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.post_state(matched).await
    }

    #[instrument(skip(self))]
    async fn set_member_status(
        &self,
        id: ChannelId,
        user_id: &str,
        status: ModerationStatus,
    ) -> StoreResult<Option<Channel>> {
        let matched = sqlx::query_scalar::<_, Uuid>(
            r"
            UPDATE channel_members m
            SET status = $3
            FROM channels c
            WHERE c.id = m.channel_id
              AND m.channel_id = $1
              AND m.user_id = $2
              AND c.is_active
            RETURNING m.channel_id
            ",
        )
        .bind(id.into_inner())
        .bind(user_id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.post_state(matched).await
    }

    #[instrument(skip(self))]
    async fn add_thread(&self, id: ChannelId, thread_id: &str) -> StoreResult<Option<Channel>> {
        // thread_id is the table's primary key, so the conflict guard is
        // the global one-channel-per-thread invariant; the CTE bumps the
        // channel's updated_at in the same statement.
        let matched = sqlx::query_scalar::<_, Uuid>(
            r"
            WITH attached AS (
                INSERT INTO channel_threads (thread_id, channel_id)
                SELECT $2, c.id FROM channels c
                WHERE c.id = $1 AND c.is_active
                ON CONFLICT (thread_id) DO NOTHING
                RETURNING channel_id
            )
            UPDATE channels
            SET updated_at = NOW()
            WHERE id IN (SELECT channel_id FROM attached)
            RETURNING id
            ",
        )
        .bind(id.into_inner())
        .bind(thread_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.post_state(matched).await
    }

    #[instrument(skip(self))]
    async fn remove_thread(&self, id: ChannelId, thread_id: &str) -> StoreResult<Option<Channel>> {
        let matched = sqlx::query_scalar::<_, Uuid>(
            r"
            WITH detached AS (
                DELETE FROM channel_threads
                WHERE thread_id = $2 AND channel_id = $1
                RETURNING channel_id
            )
            UPDATE channels
            SET updated_at = NOW()
            WHERE id IN (SELECT channel_id FROM detached)
            RETURNING id
            ",
        )
        .bind(id.into_inner())
        .bind(thread_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.post_state(matched).await
    }

    #[instrument(skip(self))]
    async fn find_by_thread(&self, thread_id: &str) -> StoreResult<Option<Channel>> {
        let channel_id = sqlx::query_scalar::<_, Uuid>(
            r"
            SELECT t.channel_id
            FROM channel_threads t
            JOIN channels c ON c.id = t.channel_id
            WHERE t.thread_id = $1 AND c.is_active
            ",
        )
        .bind(thread_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.post_state(channel_id).await
    }

    #[instrument(skip(self))]
    async fn list_basic(&self, offset: i64, limit: i64) -> StoreResult<Vec<ChannelBasicInfo>> {
        let rows = sqlx::query_as::<_, BasicInfoRow>(
            r"
            SELECT c.id, c.name, c.owner_id, c.channel_type, c.created_at,
                   COUNT(m.user_id) AS user_count
            FROM channels c
            LEFT JOIN channel_members m ON m.channel_id = c.id
            WHERE c.is_active
            GROUP BY c.id
            ORDER BY c.created_at, c.id
            OFFSET $1 LIMIT $2
            ",
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(map_basic_info).collect())
    }

    #[instrument(skip(self))]
    async fn basic_info(&self, id: ChannelId) -> StoreResult<Option<ChannelBasicInfo>> {
        let row = sqlx::query_as::<_, BasicInfoRow>(
            r"
            SELECT c.id, c.name, c.owner_id, c.channel_type, c.created_at,
                   COUNT(m.user_id) AS user_count
            FROM channels c
            LEFT JOIN channel_members m ON m.channel_id = c.id
            WHERE c.id = $1 AND c.is_active
            GROUP BY c.id
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(map_basic_info))
    }

    #[instrument(skip(self))]
    async fn list_by_owner(&self, owner_id: &str) -> StoreResult<Vec<Channel>> {
        let rows = sqlx::query_as::<_, ChannelRow>(&format!(
            r"
            SELECT {CHANNEL_COLUMNS} FROM channels
            WHERE owner_id = $1 AND is_active
            ORDER BY created_at, id
            "
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.load_all(rows).await
    }

    #[instrument(skip(self))]
    async fn list_by_member(&self, user_id: &str) -> StoreResult<Vec<Channel>> {
        let rows = sqlx::query_as::<_, ChannelRow>(
            r"
            SELECT c.id, c.name, c.owner_id, c.channel_type, c.is_active,
                   c.created_at, c.updated_at, c.deleted_at
            FROM channels c
            JOIN channel_members m ON m.channel_id = c.id
            WHERE m.user_id = $1 AND c.is_active
            ORDER BY c.created_at, c.id
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.load_all(rows).await
    }

    #[instrument(skip(self))]
    async fn member_page(
        &self,
        id: ChannelId,
        offset: i64,
        limit: i64,
    ) -> StoreResult<Option<Vec<ChannelMember>>> {
        let exists = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM channels WHERE id = $1 AND is_active",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        if exists.is_none() {
            return Ok(None);
        }

        let rows = sqlx::query_as::<_, MemberRow>(
            r"
            SELECT channel_id, user_id, joined_at, status
            FROM channel_members
            WHERE channel_id = $1
            ORDER BY joined_at, user_id
            OFFSET $2 LIMIT $3
            ",
        )
        .bind(id.into_inner())
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Some(rows.into_iter().map(map_member).collect()))
    }
}
