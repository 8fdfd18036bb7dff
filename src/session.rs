//! Session handling and the journal facade. There is no implicit
//! current-user state: a [`Journal`] is an explicit session object binding
//! one authenticated (or guest) user to one storage backend, and every
//! operation goes through it.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::achievements::{self, Achievement, RankInfo, DEFAULT_CATALOG};
use crate::analytics::{equity, performance, EquityReport, PerformanceReport};
use crate::coach::{self, CoachModel};
use crate::db::{MemoryStore, Storage};
use crate::error::{JournalError, Result};
use crate::models::{
    PsychologyEntry, PsychologyInput, Trade, TradeInput, TradingRule, User, EMOTIONS,
    MAX_INTENSITY, MIN_INTENSITY,
};
use crate::progression::{self, XP_PSYCHOLOGY_LOG, XP_TRADE_LOG};
use crate::seed;

pub const GUEST_USER_ID: &str = "guest-session";

pub struct Journal {
    store: Arc<dyn Storage>,
    user: User,
}

impl Journal {
    /// Creates an account and opens a session for it.
    pub fn register(store: Arc<dyn Storage>, email: &str, name: &str) -> Result<Journal> {
        if email.trim().is_empty() {
            return Err(JournalError::Validation("email must not be empty".into()));
        }
        if store.list_users()?.iter().any(|u| u.email == email) {
            return Err(JournalError::Authentication(format!(
                "account already exists for {}",
                email
            )));
        }
        let user = User::new(
            Uuid::new_v4().to_string(),
            email.to_string(),
            name.to_string(),
        );
        store.upsert_user(&user)?;
        log::info!("registered user {}", user.id);
        Ok(Journal { store, user })
    }

    /// Opens a session for an existing account.
    pub fn login(store: Arc<dyn Storage>, email: &str) -> Result<Journal> {
        let mut user = store
            .list_users()?
            .into_iter()
            .find(|u| u.email == email)
            .ok_or_else(|| JournalError::Authentication("user not found".into()))?;
        // Level is derived state; recompute in case a stored snapshot drifted.
        user.level = progression::level_for_xp(user.xp);
        Ok(Journal { store, user })
    }

    /// Anonymous session over an ephemeral store, pre-seeded with sample
    /// records. Nothing outlives the session.
    pub fn guest() -> Result<Journal> {
        let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
        let mut user = User::new(
            GUEST_USER_ID.to_string(),
            "guest@tjp.com".to_string(),
            "Guest".to_string(),
        );
        user.is_anonymous = true;
        store.upsert_user(&user)?;

        for trade in seed::sample_trades(GUEST_USER_ID) {
            store.upsert_trade(&trade)?;
        }
        for entry in seed::sample_psychology(GUEST_USER_ID) {
            store.upsert_psychology(&entry)?;
        }
        for rule in seed::sample_rules(GUEST_USER_ID) {
            store.upsert_rule(&rule)?;
        }
        Ok(Journal { store, user })
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn set_starting_balance(&mut self, amount: f64) -> Result<()> {
        self.user.starting_balance = amount;
        self.store.upsert_user(&self.user)
    }

    // -- record operations --

    /// Logs a new trade. Awards XP and credits the daily streak; awards
    /// happen on creation only, editing an existing record is not activity.
    pub fn log_trade(&mut self, input: TradeInput) -> Result<Trade> {
        self.validate_trade(&input)?;
        let trade = self.build_trade(
            format!("TRADE-{}-{}", Utc::now().timestamp_millis(), Uuid::new_v4()),
            input,
        );
        self.store.upsert_trade(&trade)?;
        self.record_activity(XP_TRADE_LOG, Utc::now().date_naive())?;
        log::info!("trade {} logged for {}", trade.id, self.user.id);
        Ok(trade)
    }

    /// Re-saves an existing trade without progression side effects.
    pub fn update_trade(&mut self, id: &str, input: TradeInput) -> Result<Trade> {
        self.validate_trade(&input)?;
        let exists = self
            .store
            .list_trades(&self.user.id)?
            .iter()
            .any(|t| t.id == id);
        if !exists {
            return Err(JournalError::NotFound(format!("trade {}", id)));
        }
        let trade = self.build_trade(id.to_string(), input);
        self.store.upsert_trade(&trade)?;
        Ok(trade)
    }

    pub fn delete_trades(&mut self, ids: &[String]) -> Result<usize> {
        self.store.delete_trades(&self.user.id, ids)
    }

    pub fn trades(&self) -> Result<Vec<Trade>> {
        self.store.list_trades(&self.user.id)
    }

    pub fn log_psychology(&mut self, input: PsychologyInput) -> Result<PsychologyEntry> {
        self.validate_psychology(&input)?;
        let entry = self.build_psychology(format!("psych-{}", Uuid::new_v4()), input);
        self.store.upsert_psychology(&entry)?;
        self.record_activity(XP_PSYCHOLOGY_LOG, Utc::now().date_naive())?;
        Ok(entry)
    }

    pub fn update_psychology(&mut self, id: &str, input: PsychologyInput) -> Result<PsychologyEntry> {
        self.validate_psychology(&input)?;
        let exists = self
            .store
            .list_psychology(&self.user.id)?
            .iter()
            .any(|e| e.id == id);
        if !exists {
            return Err(JournalError::NotFound(format!("psychology entry {}", id)));
        }
        let entry = self.build_psychology(id.to_string(), input);
        self.store.upsert_psychology(&entry)?;
        Ok(entry)
    }

    pub fn delete_psychology(&mut self, ids: &[String]) -> Result<usize> {
        self.store.delete_psychology(&self.user.id, ids)
    }

    pub fn psychology(&self) -> Result<Vec<PsychologyEntry>> {
        self.store.list_psychology(&self.user.id)
    }

    pub fn add_rule(&mut self, description: &str) -> Result<TradingRule> {
        if description.trim().is_empty() {
            return Err(JournalError::Validation(
                "rule description must not be empty".into(),
            ));
        }
        let rule = TradingRule {
            id: format!("rule-{}", Uuid::new_v4()),
            user_id: self.user.id.clone(),
            description: description.to_string(),
        };
        self.store.upsert_rule(&rule)?;
        Ok(rule)
    }

    pub fn delete_rules(&mut self, ids: &[String]) -> Result<usize> {
        self.store.delete_rules(&self.user.id, ids)
    }

    pub fn rules(&self) -> Result<Vec<TradingRule>> {
        self.store.list_rules(&self.user.id)
    }

    // -- derived views, recomputed from the full history on each call --

    pub fn equity(&self) -> Result<EquityReport> {
        Ok(equity::compute(self.user.starting_balance, &self.trades()?))
    }

    pub fn performance(&self) -> Result<PerformanceReport> {
        Ok(performance::compute(&self.trades()?))
    }

    pub fn achievements(&self) -> Result<Vec<Achievement>> {
        Ok(achievements::evaluate(
            DEFAULT_CATALOG,
            &self.trades()?,
            &self.psychology()?,
            &self.user,
        ))
    }

    pub fn rank(&self) -> Result<RankInfo> {
        Ok(achievements::rank::evaluate(
            &self.trades()?,
            Utc::now().date_naive(),
        ))
    }

    /// Asks the coach model for advice over the bounded recent window.
    /// Failure is surfaced to the caller and leaves stored state untouched.
    pub async fn coach_advice(&self, model: &dyn CoachModel) -> Result<String> {
        coach::generate_advice(model, &self.trades()?, &self.psychology()?).await
    }

    // -- internals --

    fn record_activity(&mut self, xp: u32, today: NaiveDate) -> Result<()> {
        progression::award_xp(&mut self.user, xp);
        progression::touch_streak(&mut self.user, today);
        self.store.upsert_user(&self.user)
    }

    fn validate_trade(&self, input: &TradeInput) -> Result<()> {
        if input.asset.trim().is_empty() {
            return Err(JournalError::Validation("asset must not be empty".into()));
        }
        Ok(())
    }

    fn validate_psychology(&self, input: &PsychologyInput) -> Result<()> {
        if input.emotions.is_empty() {
            return Err(JournalError::Validation(
                "at least one emotion is required".into(),
            ));
        }
        if let Some(unknown) = input
            .emotions
            .iter()
            .find(|e| !EMOTIONS.contains(&e.as_str()))
        {
            return Err(JournalError::Validation(format!(
                "unknown emotion tag: {}",
                unknown
            )));
        }
        if input.notes.trim().is_empty() {
            return Err(JournalError::Validation("notes must not be empty".into()));
        }
        if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&input.intensity) {
            return Err(JournalError::Validation(format!(
                "intensity must be between {} and {}",
                MIN_INTENSITY, MAX_INTENSITY
            )));
        }
        Ok(())
    }

    fn build_trade(&self, id: String, input: TradeInput) -> Trade {
        Trade {
            id,
            user_id: self.user.id.clone(),
            date: input.date,
            asset: input.asset,
            side: input.side,
            lot_size: input.lot_size,
            profit_loss: input.profit_loss,
            notes: input.notes,
            setup: input.setup,
            rules_followed: input.rules_followed,
            r_multiple: input.r_multiple,
            stop_loss: input.stop_loss,
            session: input.session,
            auto_flags: input.auto_flags,
        }
    }

    fn build_psychology(&self, id: String, input: PsychologyInput) -> PsychologyEntry {
        PsychologyEntry {
            id,
            user_id: self.user.id.clone(),
            date: input.date,
            emotions: input.emotions,
            intensity: input.intensity,
            notes: input.notes,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}
