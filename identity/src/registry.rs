//! The user registry — verification levels, reputation, eligibility queries.

use crate::error::IdentityError;
use agora_types::{Timestamp, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// A registered user.
///
/// Users are never deleted; reputation only moves through the explicit
/// grant/slash operations and never goes negative.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Verification level — the monotonic gate value for every action.
    pub level: u32,
    /// Reputation score, starts at 1.0. Only used as a vote-weight input.
    pub reputation: f64,
    pub registered_at: Timestamp,
}

/// Concurrent registry of users keyed by id.
///
/// Reads (gate checks, eligibility counts) take a shared lock; only
/// registration and reputation adjustments take the exclusive lock.
#[derive(Debug, Default)]
pub struct IdentityRegistry {
    users: RwLock<HashMap<UserId, User>>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<UserId, User>> {
        self.users.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<UserId, User>> {
        self.users.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new user at the given verification level.
    pub fn register(&self, id: UserId, level: u32) -> Result<(), IdentityError> {
        let mut users = self.write();
        if users.contains_key(&id) {
            return Err(IdentityError::AlreadyRegistered(id.to_string()));
        }
        debug!(user = %id, level, "registering user");
        users.insert(
            id.clone(),
            User {
                id,
                level,
                reputation: 1.0,
                registered_at: Timestamp::now(),
            },
        );
        Ok(())
    }

    /// Whether `user` meets the required verification level.
    ///
    /// Fails closed: an unregistered user never meets a non-zero
    /// requirement. A requirement of 0 is met by anyone.
    pub fn meets_requirement(&self, user: &UserId, required: u32) -> bool {
        if required == 0 {
            return true;
        }
        self.read().get(user).is_some_and(|u| u.level >= required)
    }

    pub fn is_registered(&self, user: &UserId) -> bool {
        self.read().contains_key(user)
    }

    /// Current reputation, if registered.
    pub fn reputation(&self, user: &UserId) -> Option<f64> {
        self.read().get(user).map(|u| u.reputation)
    }

    /// Vote weight = square root of reputation; 0 for unregistered users.
    ///
    /// Reputation is never negative, so the weight is never NaN or negative.
    pub fn vote_weight(&self, user: &UserId) -> f64 {
        self.read().get(user).map_or(0.0, |u| u.reputation.sqrt())
    }

    /// Increase a user's reputation. Returns the new score.
    pub fn grant_reputation(&self, user: &UserId, amount: f64) -> Result<f64, IdentityError> {
        let mut users = self.write();
        let entry = users
            .get_mut(user)
            .ok_or_else(|| IdentityError::NotRegistered(user.to_string()))?;
        entry.reputation += amount.max(0.0);
        Ok(entry.reputation)
    }

    /// Decrease a user's reputation, saturating at 0. Returns the new score.
    pub fn slash_reputation(&self, user: &UserId, amount: f64) -> Result<f64, IdentityError> {
        let mut users = self.write();
        let entry = users
            .get_mut(user)
            .ok_or_else(|| IdentityError::NotRegistered(user.to_string()))?;
        entry.reputation = (entry.reputation - amount.max(0.0)).max(0.0);
        Ok(entry.reputation)
    }

    /// Count of registered users whose level meets `min_level`.
    pub fn eligible_count(&self, min_level: u32) -> u32 {
        self.read().values().filter(|u| u.level >= min_level).count() as u32
    }

    /// Ids of registered users whose level meets `min_level`.
    ///
    /// Sorted so the candidate pool handed to the juror sampler is
    /// deterministic regardless of map iteration order.
    pub fn eligible_users(&self, min_level: u32) -> Vec<UserId> {
        let mut pool: Vec<UserId> = self
            .read()
            .values()
            .filter(|u| u.level >= min_level)
            .map(|u| u.id.clone())
            .collect();
        pool.sort();
        pool
    }
}
