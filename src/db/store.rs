use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::models::{PsychologyEntry, Trade, TradingRule, User};

/// Storage keys, carried over from the original device-local layout.
pub const TRADES_KEY: &str = "tjp_trades";
pub const PSYCHOLOGY_KEY: &str = "tjp_psychology";
pub const RULES_KEY: &str = "tjp_rules";
pub const USERS_KEY: &str = "tjp_users";

/// A record addressable by id and owned by a user.
pub trait Keyed {
    fn key(&self) -> &str;
    fn owner(&self) -> &str;
}

impl Keyed for Trade {
    fn key(&self) -> &str {
        &self.id
    }
    fn owner(&self) -> &str {
        &self.user_id
    }
}

impl Keyed for PsychologyEntry {
    fn key(&self) -> &str {
        &self.id
    }
    fn owner(&self) -> &str {
        &self.user_id
    }
}

impl Keyed for TradingRule {
    fn key(&self) -> &str {
        &self.id
    }
    fn owner(&self) -> &str {
        &self.user_id
    }
}

impl Keyed for User {
    fn key(&self) -> &str {
        &self.id
    }
    // Users own themselves; the owner filter degenerates to the id.
    fn owner(&self) -> &str {
        &self.id
    }
}

/// Key-value persistence, one JSON array per key. Backends provide raw
/// string access; the typed record operations are shared across backends.
///
/// All calls are synchronous and last-writer-wins; concurrent writers from
/// other processes are not coordinated.
pub trait Storage: Send + Sync {
    fn read_key(&self, key: &str) -> Result<Option<String>>;
    fn write_key(&self, key: &str, value: &str) -> Result<()>;

    fn list_trades(&self, user_id: &str) -> Result<Vec<Trade>> {
        list_owned(self, TRADES_KEY, user_id)
    }

    fn upsert_trade(&self, trade: &Trade) -> Result<()> {
        upsert(self, TRADES_KEY, trade)
    }

    fn delete_trades(&self, user_id: &str, ids: &[String]) -> Result<usize> {
        delete_ids::<Trade, _>(self, TRADES_KEY, user_id, ids)
    }

    fn list_psychology(&self, user_id: &str) -> Result<Vec<PsychologyEntry>> {
        list_owned(self, PSYCHOLOGY_KEY, user_id)
    }

    fn upsert_psychology(&self, entry: &PsychologyEntry) -> Result<()> {
        upsert(self, PSYCHOLOGY_KEY, entry)
    }

    fn delete_psychology(&self, user_id: &str, ids: &[String]) -> Result<usize> {
        delete_ids::<PsychologyEntry, _>(self, PSYCHOLOGY_KEY, user_id, ids)
    }

    fn list_rules(&self, user_id: &str) -> Result<Vec<TradingRule>> {
        list_owned(self, RULES_KEY, user_id)
    }

    fn upsert_rule(&self, rule: &TradingRule) -> Result<()> {
        upsert(self, RULES_KEY, rule)
    }

    fn delete_rules(&self, user_id: &str, ids: &[String]) -> Result<usize> {
        delete_ids::<TradingRule, _>(self, RULES_KEY, user_id, ids)
    }

    fn list_users(&self) -> Result<Vec<User>> {
        load(self, USERS_KEY)
    }

    fn get_user(&self, id: &str) -> Result<Option<User>> {
        Ok(self.list_users()?.into_iter().find(|u| u.id == id))
    }

    fn upsert_user(&self, user: &User) -> Result<()> {
        upsert(self, USERS_KEY, user)
    }
}

// Shared record plumbing over the raw key space, usable through trait
// objects as well as concrete backends.

fn load<T, S>(store: &S, key: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    S: Storage + ?Sized,
{
    match store.read_key(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

fn save<T, S>(store: &S, key: &str, items: &[T]) -> Result<()>
where
    T: Serialize,
    S: Storage + ?Sized,
{
    store.write_key(key, &serde_json::to_string(items)?)
}

fn list_owned<T, S>(store: &S, key: &str, owner: &str) -> Result<Vec<T>>
where
    T: Keyed + DeserializeOwned,
    S: Storage + ?Sized,
{
    let items: Vec<T> = load(store, key)?;
    Ok(items.into_iter().filter(|i| i.owner() == owner).collect())
}

fn upsert<T, S>(store: &S, key: &str, item: &T) -> Result<()>
where
    T: Keyed + Serialize + DeserializeOwned + Clone,
    S: Storage + ?Sized,
{
    let mut items: Vec<T> = load(store, key)?;
    match items.iter_mut().find(|i| i.key() == item.key()) {
        Some(existing) => *existing = item.clone(),
        None => items.push(item.clone()),
    }
    save(store, key, &items)
}

fn delete_ids<T, S>(store: &S, key: &str, owner: &str, ids: &[String]) -> Result<usize>
where
    T: Keyed + Serialize + DeserializeOwned,
    S: Storage + ?Sized,
{
    let mut items: Vec<T> = load(store, key)?;
    let before = items.len();
    items.retain(|i| !(i.owner() == owner && ids.iter().any(|id| id == i.key())));
    let removed = before - items.len();
    if removed > 0 {
        save(store, key, &items)?;
    }
    Ok(removed)
}
