//! In-memory ledger used in tests and single-process deployments.

use crate::error::LedgerError;
use crate::event::{Event, EventKind};
use crate::Ledger;
use agora_types::{Timestamp, UserId};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Account {
    balance: u64,
    eligible: bool,
}

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<UserId, Account>,
    pools: HashMap<String, BTreeSet<UserId>>,
    events: Vec<Event>,
    minted: u64,
}

/// An in-memory [`Ledger`] with an optional supply cap so the
/// refused-deposit path (`deposit -> false`) is reachable in tests.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    inner: Mutex<Inner>,
    supply_cap: Option<u64>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger that refuses deposits once `cap` tokens have been minted.
    pub fn with_supply_cap(cap: u64) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            supply_cap: Some(cap),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current balance of an account, if it exists.
    pub fn balance(&self, user: &UserId) -> Option<u64> {
        self.lock().accounts.get(user).map(|a| a.balance)
    }

    /// Members of a named pool, sorted.
    pub fn pool_members(&self, pool: &str) -> Vec<UserId> {
        self.lock()
            .pools
            .get(pool)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Ledger for MemoryLedger {
    fn create_account(&self, user: &UserId) -> Result<(), LedgerError> {
        self.lock().accounts.entry(user.clone()).or_default();
        Ok(())
    }

    fn set_eligible(&self, user: &UserId, eligible: bool) -> Result<(), LedgerError> {
        let mut inner = self.lock();
        let account = inner
            .accounts
            .get_mut(user)
            .ok_or_else(|| LedgerError::UnknownAccount(user.to_string()))?;
        account.eligible = eligible;
        Ok(())
    }

    fn deposit(&self, user: &UserId, amount: u64) -> Result<bool, LedgerError> {
        let mut inner = self.lock();
        if let Some(cap) = self.supply_cap {
            if inner.minted.saturating_add(amount) > cap {
                return Ok(false);
            }
        }
        let account = inner
            .accounts
            .get_mut(user)
            .ok_or_else(|| LedgerError::UnknownAccount(user.to_string()))?;
        account.balance += amount;
        inner.minted += amount;
        Ok(true)
    }

    fn add_to_pool(&self, pool: &str, user: &UserId) -> Result<(), LedgerError> {
        self.lock()
            .pools
            .entry(pool.to_string())
            .or_default()
            .insert(user.clone());
        Ok(())
    }

    fn add_event(&self, kind: EventKind, payload: serde_json::Value) -> Result<(), LedgerError> {
        self.lock().events.push(Event {
            kind,
            payload,
            at: Timestamp::now(),
        });
        Ok(())
    }

    fn list_events(&self, count: Option<usize>) -> Result<Vec<Event>, LedgerError> {
        let inner = self.lock();
        let events = &inner.events;
        let start = count.map_or(0, |c| events.len().saturating_sub(c));
        Ok(events[start..].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn uid(s: &str) -> UserId {
        UserId::new(s)
    }

    #[test]
    fn deposit_requires_account() {
        let ledger = MemoryLedger::new();
        assert!(matches!(
            ledger.deposit(&uid("ghost"), 10),
            Err(LedgerError::UnknownAccount(_))
        ));
    }

    #[test]
    fn supply_cap_refuses_without_erroring() {
        let ledger = MemoryLedger::with_supply_cap(12);
        ledger.create_account(&uid("a")).unwrap();

        assert!(ledger.deposit(&uid("a"), 10).unwrap());
        assert!(!ledger.deposit(&uid("a"), 10).unwrap());
        assert_eq!(ledger.balance(&uid("a")), Some(10));
    }

    #[test]
    fn events_list_most_recent() {
        let ledger = MemoryLedger::new();
        for i in 0..5 {
            ledger
                .add_event(EventKind::Vote, json!({ "n": i }))
                .unwrap();
        }
        let last_two = ledger.list_events(Some(2)).unwrap();
        assert_eq!(last_two.len(), 2);
        assert_eq!(last_two[0].payload["n"], 3);
        assert_eq!(last_two[1].payload["n"], 4);

        assert_eq!(ledger.list_events(None).unwrap().len(), 5);
    }

    #[test]
    fn pools_deduplicate_members() {
        let ledger = MemoryLedger::new();
        ledger.add_to_pool("creators", &uid("a")).unwrap();
        ledger.add_to_pool("creators", &uid("a")).unwrap();
        ledger.add_to_pool("creators", &uid("b")).unwrap();
        assert_eq!(ledger.pool_members("creators"), vec![uid("a"), uid("b")]);
    }
}
