//! In-memory store and publisher doubles for service-level tests
//!
//! `MemoryChannelStore` mirrors the guarded-mutation contract of the SQL
//! store: every operation takes the interior lock exactly once, checks its
//! predicate and applies the change under that single acquisition, and
//! returns `None` when the predicate fails. `RecordingPublisher` captures
//! published events and can be switched into a failing mode to exercise the
//! publish-after-commit error path.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use channel_core::traits::{ChannelPatch, ChannelStore, EventPublisher, NewChannel, StoreResult};
use channel_core::{
    Channel, ChannelBasicInfo, ChannelId, ChannelMember, DomainError, DomainEvent,
    ModerationStatus,
};
use chrono::Utc;
use uuid::Uuid;

/// In-memory implementation of the `ChannelStore` port
#[derive(Default)]
pub struct MemoryChannelStore {
    channels: Mutex<HashMap<Uuid, Channel>>,
}

impl MemoryChannelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot a channel regardless of its active flag
    pub fn snapshot(&self, id: ChannelId) -> Option<Channel> {
        self.channels.lock().unwrap().get(&id.into_inner()).cloned()
    }

    fn sorted_active<F>(&self, filter: F) -> Vec<Channel>
    where
        F: Fn(&Channel) -> bool,
    {
        let channels = self.channels.lock().unwrap();
        let mut matched: Vec<Channel> = channels
            .values()
            .filter(|c| c.is_active && filter(c))
            .cloned()
            .collect();
        matched.sort_by_key(|c| (c.created_at, c.id.into_inner()));
        matched
    }
}

fn basic_info_of(channel: &Channel) -> ChannelBasicInfo {
    ChannelBasicInfo {
        id: channel.id,
        name: channel.name.clone(),
        owner_id: channel.owner_id.clone(),
        channel_type: channel.channel_type,
        created_at: channel.created_at,
        user_count: channel.users.len() as i64,
    }
}

fn page_of<T: Clone>(items: &[T], offset: i64, limit: i64) -> Vec<T> {
    items
        .iter()
        .skip(usize::try_from(offset).unwrap_or(0))
        .take(usize::try_from(limit).unwrap_or(0))
        .cloned()
        .collect()
}

#[async_trait]
impl ChannelStore for MemoryChannelStore {
    async fn create(&self, new: NewChannel) -> StoreResult<Channel> {
        let now = Utc::now();
        let id = ChannelId::new(Uuid::new_v4());

        let mut users = vec![ChannelMember {
            user_id: new.owner_id.clone(),
            joined_at: now,
            status: ModerationStatus::Normal,
        }];
        for user_id in new.initial_users {
            if user_id != new.owner_id && !users.iter().any(|m| m.user_id == user_id) {
                users.push(ChannelMember {
                    user_id,
                    joined_at: now,
                    status: ModerationStatus::Normal,
                });
            }
        }

        let channel = Channel {
            id,
            name: new.name,
            owner_id: new.owner_id,
            channel_type: new.channel_type,
            is_active: true,
            users,
            threads: Vec::new(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.channels
            .lock()
            .unwrap()
            .insert(id.into_inner(), channel.clone());
        Ok(channel)
    }

    async fn find_by_id(&self, id: ChannelId) -> StoreResult<Option<Channel>> {
        let channels = self.channels.lock().unwrap();
        Ok(channels
            .get(&id.into_inner())
            .filter(|c| c.is_active)
            .cloned())
    }

    async fn find_by_id_any(&self, id: ChannelId) -> StoreResult<Option<Channel>> {
        Ok(self.snapshot(id))
    }

    async fn update_fields(
        &self,
        id: ChannelId,
        patch: ChannelPatch,
    ) -> StoreResult<Option<Channel>> {
        let mut channels = self.channels.lock().unwrap();
        let Some(channel) = channels.get_mut(&id.into_inner()).filter(|c| c.is_active) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            channel.name = name;
        }
        if let Some(owner_id) = patch.owner_id {
            channel.owner_id = owner_id;
        }
        if let Some(channel_type) = patch.channel_type {
            channel.channel_type = channel_type;
        }
        channel.updated_at = Utc::now();
        Ok(Some(channel.clone()))
    }

    async fn deactivate(&self, id: ChannelId) -> StoreResult<Option<Channel>> {
        let mut channels = self.channels.lock().unwrap();
        let Some(channel) = channels.get_mut(&id.into_inner()).filter(|c| c.is_active) else {
            return Ok(None);
        };
        channel.is_active = false;
        channel.deleted_at = Some(Utc::now());
        Ok(Some(channel.clone()))
    }

    async fn reactivate(&self, id: ChannelId) -> StoreResult<Option<Channel>> {
        let mut channels = self.channels.lock().unwrap();
        let Some(channel) = channels.get_mut(&id.into_inner()).filter(|c| !c.is_active) else {
            return Ok(None);
        };
        channel.is_active = true;
        // deleted_at is kept as a record of the prior deactivation
        channel.updated_at = Utc::now();
        Ok(Some(channel.clone()))
    }

    async fn add_member(&self, id: ChannelId, user_id: &str) -> StoreResult<Option<Channel>> {
        let mut channels = self.channels.lock().unwrap();
        let Some(channel) = channels.get_mut(&id.into_inner()).filter(|c| c.is_active) else {
            return Ok(None);
        };
        if channel.is_member(user_id) {
            return Ok(None);
        }
        channel.users.push(ChannelMember {
            user_id: user_id.to_string(),
            joined_at: Utc::now(),
            status: ModerationStatus::Normal,
        });
        Ok(Some(channel.clone()))
    }

    async fn remove_member(&self, id: ChannelId, user_id: &str) -> StoreResult<Option<Channel>> {
        let mut channels = self.channels.lock().unwrap();
        let Some(channel) = channels.get_mut(&id.into_inner()).filter(|c| c.is_active) else {
            return Ok(None);
        };
        if !channel.is_member(user_id) || channel.is_owner(user_id) {
            return Ok(None);
        }
        channel.users.retain(|m| m.user_id != user_id);
        Ok(Some(channel.clone()))
    }

    async fn set_member_status(
        &self,
        id: ChannelId,
        user_id: &str,
        status: ModerationStatus,
    ) -> StoreResult<Option<Channel>> {
        let mut channels = self.channels.lock().unwrap();
        let Some(channel) = channels.get_mut(&id.into_inner()).filter(|c| c.is_active) else {
            return Ok(None);
        };
        let Some(member) = channel.users.iter_mut().find(|m| m.user_id == user_id) else {
            return Ok(None);
        };
        member.status = status;
        Ok(Some(channel.clone()))
    }

    async fn add_thread(&self, id: ChannelId, thread_id: &str) -> StoreResult<Option<Channel>> {
        let mut channels = self.channels.lock().unwrap();
        // Thread exclusivity is global, so the predicate scans all channels
        if channels.values().any(|c| c.has_thread(thread_id)) {
            return Ok(None);
        }
        let Some(channel) = channels.get_mut(&id.into_inner()).filter(|c| c.is_active) else {
            return Ok(None);
        };
        channel.threads.push(thread_id.to_string());
        channel.updated_at = Utc::now();
        Ok(Some(channel.clone()))
    }

    async fn remove_thread(&self, id: ChannelId, thread_id: &str) -> StoreResult<Option<Channel>> {
        let mut channels = self.channels.lock().unwrap();
        let Some(channel) = channels.get_mut(&id.into_inner()).filter(|c| c.is_active) else {
            return Ok(None);
        };
        if !channel.has_thread(thread_id) {
            return Ok(None);
        }
        channel.threads.retain(|t| t != thread_id);
        channel.updated_at = Utc::now();
        Ok(Some(channel.clone()))
    }

    async fn find_by_thread(&self, thread_id: &str) -> StoreResult<Option<Channel>> {
        let channels = self.channels.lock().unwrap();
        Ok(channels
            .values()
            .find(|c| c.is_active && c.has_thread(thread_id))
            .cloned())
    }

    async fn list_basic(&self, offset: i64, limit: i64) -> StoreResult<Vec<ChannelBasicInfo>> {
        let all = self.sorted_active(|_| true);
        let infos: Vec<ChannelBasicInfo> = all.iter().map(basic_info_of).collect();
        Ok(page_of(&infos, offset, limit))
    }

    async fn basic_info(&self, id: ChannelId) -> StoreResult<Option<ChannelBasicInfo>> {
        let channels = self.channels.lock().unwrap();
        Ok(channels
            .get(&id.into_inner())
            .filter(|c| c.is_active)
            .map(basic_info_of))
    }

    async fn list_by_owner(&self, owner_id: &str) -> StoreResult<Vec<Channel>> {
        Ok(self.sorted_active(|c| c.owner_id == owner_id))
    }

    async fn list_by_member(&self, user_id: &str) -> StoreResult<Vec<Channel>> {
        Ok(self.sorted_active(|c| c.is_member(user_id)))
    }

    async fn member_page(
        &self,
        id: ChannelId,
        offset: i64,
        limit: i64,
    ) -> StoreResult<Option<Vec<ChannelMember>>> {
        let channels = self.channels.lock().unwrap();
        let Some(channel) = channels.get(&id.into_inner()).filter(|c| c.is_active) else {
            return Ok(None);
        };
        let mut members = channel.users.clone();
        members.sort_by(|a, b| {
            a.joined_at
                .cmp(&b.joined_at)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        Ok(Some(page_of(&members, offset, limit)))
    }
}

/// Publisher double that records events and can simulate delivery failure
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<DomainEvent>>,
    failing: AtomicBool,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent publishes fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All events recorded so far
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Routing keys of all recorded events, in publish order
    pub fn routing_keys(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(DomainEvent::routing_key)
            .collect()
    }

    /// Drop all recorded events
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::EventDelivery(
                "simulated publish failure".to_string(),
            ));
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}
