//! Core accrual ledger engine.

use std::collections::{HashMap, HashSet};

use crate::error::LedgerError;
use crate::event::LedgerEvent;
use crate::holder::HolderRecord;
use swell_types::{AmountSpec, HolderAddress, LedgerParams, Timestamp};

/// The accrual ledger — settles, mints, burns, transfers, and answers
/// balance queries.
///
/// All mutable ledger state lives behind this single aggregate: holder
/// records, the global rate, and the authority sets. Every mutating
/// operation checks authority first, settles the touched holders second,
/// and applies its delta last, so `principal` is exact as of the
/// operation's timestamp and interest between touchpoints exists only as a
/// derived quantity. Calls take `&mut self`, which serializes them; a
/// transfer settles and mutates both sides inside one call, so no caller
/// can observe a half-updated pair.
pub struct LedgerEngine {
    /// Every holder ever touched. Records persist at zero balance; only
    /// `frozen_rate` is overwritten on the next zero-to-nonzero transition.
    holders: HashMap<HolderAddress, HolderRecord>,
    /// Rate offered to new depositors (`PRECISION`-scaled, per second).
    global_rate: u128,
    /// May change the global rate and manage the minter set.
    owner: HolderAddress,
    /// Identities allowed to mint and burn (typically the vault).
    minters: HashSet<HolderAddress>,
    /// Events accumulated since the last drain.
    events: Vec<LedgerEvent>,
}

impl LedgerEngine {
    pub fn new(owner: HolderAddress, params: &LedgerParams) -> Self {
        Self::with_rate(owner, params.initial_global_rate)
    }

    /// Create an engine with an explicit initial global rate.
    pub fn with_rate(owner: HolderAddress, initial_rate: u128) -> Self {
        Self {
            holders: HashMap::new(),
            global_rate: initial_rate,
            owner,
            minters: HashSet::new(),
            events: Vec::new(),
        }
    }

    // ── Authority ────────────────────────────────────────────────────────

    fn require_owner(&self, caller: &HolderAddress) -> Result<(), LedgerError> {
        if *caller != self.owner {
            return Err(LedgerError::Unauthorized(caller.to_string()));
        }
        Ok(())
    }

    fn require_minter(&self, caller: &HolderAddress) -> Result<(), LedgerError> {
        if !self.minters.contains(caller) {
            return Err(LedgerError::Unauthorized(caller.to_string()));
        }
        Ok(())
    }

    /// Grant mint/burn authority. Owner only.
    pub fn authorize_minter(
        &mut self,
        caller: &HolderAddress,
        minter: HolderAddress,
    ) -> Result<(), LedgerError> {
        self.require_owner(caller)?;
        tracing::info!(target: "swell::ledger", %minter, "minter authorized");
        self.minters.insert(minter);
        Ok(())
    }

    /// Revoke mint/burn authority. Owner only.
    pub fn revoke_minter(
        &mut self,
        caller: &HolderAddress,
        minter: &HolderAddress,
    ) -> Result<(), LedgerError> {
        self.require_owner(caller)?;
        tracing::info!(target: "swell::ledger", %minter, "minter revoked");
        self.minters.remove(minter);
        Ok(())
    }

    pub fn is_minter(&self, address: &HolderAddress) -> bool {
        self.minters.contains(address)
    }

    // ── Settlement ───────────────────────────────────────────────────────

    /// Settle a holder and return their record, creating it on first touch.
    /// After this call the holder has no pending unrealized interest.
    fn settled(
        &mut self,
        address: &HolderAddress,
        now: Timestamp,
    ) -> Result<&mut HolderRecord, LedgerError> {
        let record = self
            .holders
            .entry(address.clone())
            .or_insert_with(|| HolderRecord::new(now));
        record.settle(now).ok_or(LedgerError::Overflow)?;
        Ok(record)
    }

    /// Settle a holder in place and return the settled principal, without
    /// creating a record. Unknown holders settle to zero. Keeps operations
    /// that go on to fail from growing the holder map.
    fn settle_existing(
        &mut self,
        address: &HolderAddress,
        now: Timestamp,
    ) -> Result<u128, LedgerError> {
        match self.holders.get_mut(address) {
            Some(record) => {
                record.settle(now).ok_or(LedgerError::Overflow)?;
                Ok(record.principal)
            }
            None => Ok(0),
        }
    }

    // ── Operations ───────────────────────────────────────────────────────

    /// Credit `amount` of principal to `to`. Minter authority required.
    ///
    /// A holder whose pre-settlement balance was zero (first deposit, or
    /// re-entry after draining to zero) freezes the current global rate.
    pub fn mint(
        &mut self,
        caller: &HolderAddress,
        to: &HolderAddress,
        amount: u128,
        now: Timestamp,
    ) -> Result<(), LedgerError> {
        self.require_minter(caller)?;
        let global_rate = self.global_rate;
        let record = self.settled(to, now)?;
        if record.principal == 0 {
            record.frozen_rate = global_rate;
        }
        record.principal = record
            .principal
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        tracing::debug!(target: "swell::ledger", %to, amount, "minted");
        self.events.push(LedgerEvent::Minted {
            to: to.clone(),
            amount,
        });
        Ok(())
    }

    /// Debit `amount` of principal from `from`. Minter authority required.
    ///
    /// Settlement folds accrued interest into principal first, so the
    /// overdraft check is against the just-settled principal.
    pub fn burn(
        &mut self,
        caller: &HolderAddress,
        from: &HolderAddress,
        amount: u128,
        now: Timestamp,
    ) -> Result<(), LedgerError> {
        self.require_minter(caller)?;
        let available = self.settle_existing(from, now)?;
        if amount > available {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        if let Some(record) = self.holders.get_mut(from) {
            record.principal = available - amount;
        }
        tracing::debug!(target: "swell::ledger", %from, amount, "burned");
        self.events.push(LedgerEvent::Burned {
            from: from.clone(),
            amount,
        });
        Ok(())
    }

    /// Move principal between holders. Callable by the sender themselves —
    /// no external authority involved.
    ///
    /// `AmountSpec::All` resolves to the sender's full post-settlement
    /// balance. A recipient whose pre-settlement balance was zero inherits
    /// the *current global rate*, never the sender's potentially stale
    /// frozen rate.
    pub fn transfer(
        &mut self,
        from: &HolderAddress,
        to: &HolderAddress,
        spec: AmountSpec,
        now: Timestamp,
    ) -> Result<u128, LedgerError> {
        // Settle both sides in place; records only materialize once the
        // transfer is known to succeed. Post-settlement, principal equals
        // effective balance.
        let from_principal = self.settle_existing(from, now)?;
        if to != from {
            self.settle_existing(to, now)?;
        }

        let amount = spec.resolve(from_principal);
        if amount > from_principal {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available: from_principal,
            });
        }

        if to != from {
            // Validate the credit before debiting so a failure mutates nothing.
            let to_principal = self.holders.get(to).map(|r| r.principal).unwrap_or(0);
            let credited = to_principal
                .checked_add(amount)
                .ok_or(LedgerError::Overflow)?;
            let global_rate = self.global_rate;

            if let Some(record) = self.holders.get_mut(from) {
                record.principal = from_principal - amount;
            }
            let to_record = self
                .holders
                .entry(to.clone())
                .or_insert_with(|| HolderRecord::new(now));
            if to_record.principal == 0 {
                to_record.frozen_rate = global_rate;
            }
            to_record.principal = credited;
        }

        tracing::debug!(target: "swell::ledger", %from, %to, amount, "transferred");
        self.events.push(LedgerEvent::Transferred {
            from: from.clone(),
            to: to.clone(),
            amount,
        });
        Ok(amount)
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// Effective balance — principal plus interest accrued since the last
    /// settlement. Pure read; returns 0 for unknown holders or on overflow.
    pub fn balance_of(&self, user: &HolderAddress, now: Timestamp) -> u128 {
        self.holders
            .get(user)
            .map(|r| r.effective_balance(now))
            .unwrap_or(0)
    }

    /// Effective balance with checked arithmetic.
    pub fn balance_of_checked(
        &self,
        user: &HolderAddress,
        now: Timestamp,
    ) -> Result<u128, LedgerError> {
        match self.holders.get(user) {
            Some(record) => record
                .effective_balance_checked(now)
                .ok_or(LedgerError::Overflow),
            None => Ok(0),
        }
    }

    /// Raw stored principal, no accrual applied.
    pub fn principal_balance_of(&self, user: &HolderAddress) -> u128 {
        self.holders.get(user).map(|r| r.principal).unwrap_or(0)
    }

    /// The holder's frozen rate, if a record exists. Carries no meaning
    /// while the holder's principal is zero.
    pub fn user_rate(&self, user: &HolderAddress) -> Option<u128> {
        self.holders.get(user).map(|r| r.frozen_rate)
    }

    /// The rate currently offered to new depositors.
    pub fn global_rate(&self) -> u128 {
        self.global_rate
    }

    /// Raise the rate offered to new depositors. Owner only.
    ///
    /// The rate may never decrease: a lower offer is rejected atomically
    /// with `RateDirectionViolation`. Already-frozen holder rates are
    /// unaffected either way.
    pub fn set_global_rate(
        &mut self,
        caller: &HolderAddress,
        new_rate: u128,
    ) -> Result<(), LedgerError> {
        self.require_owner(caller)?;
        if new_rate < self.global_rate {
            return Err(LedgerError::RateDirectionViolation {
                current: self.global_rate,
                proposed: new_rate,
            });
        }
        self.global_rate = new_rate;
        tracing::info!(target: "swell::ledger", new_rate, "global rate changed");
        self.events.push(LedgerEvent::RateChanged { new_rate });
        Ok(())
    }

    /// Sum of every holder's effective balance at `now` — the amount the
    /// vault's reserve must cover for all redemptions to stay live.
    pub fn total_effective_checked(&self, now: Timestamp) -> Result<u128, LedgerError> {
        let mut total: u128 = 0;
        for record in self.holders.values() {
            let balance = record
                .effective_balance_checked(now)
                .ok_or(LedgerError::Overflow)?;
            total = total.checked_add(balance).ok_or(LedgerError::Overflow)?;
        }
        Ok(total)
    }

    /// Direct read of a holder record.
    pub fn holder(&self, address: &HolderAddress) -> Option<&HolderRecord> {
        self.holders.get(address)
    }

    /// Compensating rollback: restore a holder record captured before a
    /// burn whose paired external action (the vault's asset payout) was
    /// rejected. `None` removes the record, matching a pre-burn state where
    /// the holder had never been touched.
    pub fn restore_holder(&mut self, address: &HolderAddress, snapshot: Option<HolderRecord>) {
        tracing::warn!(target: "swell::ledger", %address, "holder record rolled back");
        match snapshot {
            Some(record) => {
                self.holders.insert(address.clone(), record);
            }
            None => {
                self.holders.remove(address);
            }
        }
        // The burn this compensates emitted an event; retract it so a
        // drained stream never shows a burn that was undone.
        if let Some(pos) = self
            .events
            .iter()
            .rposition(|e| matches!(e, LedgerEvent::Burned { from, .. } if from == address))
        {
            self.events.remove(pos);
        }
    }

    /// Take all events accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Persistence ──────────────────────────────────────────────────────

    const META_GLOBAL_RATE: &'static [u8] = b"global_rate";
    const META_OWNER: &'static [u8] = b"owner";
    const META_MINTERS: &'static [u8] = b"minters";

    /// Persist all engine state to a ledger store.
    pub fn save_to_store(&self, store: &dyn swell_store::LedgerStore) -> Result<(), LedgerError> {
        let rate_bytes = bincode::serialize(&self.global_rate)
            .map_err(|e| LedgerError::Other(e.to_string()))?;
        store
            .put_meta(Self::META_GLOBAL_RATE, &rate_bytes)
            .map_err(|e| LedgerError::Other(e.to_string()))?;

        let owner_bytes = bincode::serialize(&self.owner)
            .map_err(|e| LedgerError::Other(e.to_string()))?;
        store
            .put_meta(Self::META_OWNER, &owner_bytes)
            .map_err(|e| LedgerError::Other(e.to_string()))?;

        let minter_bytes = bincode::serialize(&self.minters)
            .map_err(|e| LedgerError::Other(e.to_string()))?;
        store
            .put_meta(Self::META_MINTERS, &minter_bytes)
            .map_err(|e| LedgerError::Other(e.to_string()))?;

        for (address, record) in &self.holders {
            let bytes =
                bincode::serialize(record).map_err(|e| LedgerError::Other(e.to_string()))?;
            store
                .put_holder(address, &bytes)
                .map_err(|e| LedgerError::Other(e.to_string()))?;
        }
        Ok(())
    }

    /// Restore engine state from a ledger store.
    pub fn load_from_store(
        store: &dyn swell_store::LedgerStore,
    ) -> Result<Self, LedgerError> {
        let owner: HolderAddress = match store
            .get_meta(Self::META_OWNER)
            .map_err(|e| LedgerError::Other(e.to_string()))?
        {
            Some(bytes) => {
                bincode::deserialize(&bytes).map_err(|e| LedgerError::Other(e.to_string()))?
            }
            None => return Err(LedgerError::Other("store has no owner record".into())),
        };

        let global_rate = match store
            .get_meta(Self::META_GLOBAL_RATE)
            .map_err(|e| LedgerError::Other(e.to_string()))?
        {
            Some(bytes) => {
                bincode::deserialize(&bytes).map_err(|e| LedgerError::Other(e.to_string()))?
            }
            None => 0,
        };

        let minters: HashSet<HolderAddress> = match store
            .get_meta(Self::META_MINTERS)
            .map_err(|e| LedgerError::Other(e.to_string()))?
        {
            Some(bytes) => {
                bincode::deserialize(&bytes).map_err(|e| LedgerError::Other(e.to_string()))?
            }
            None => HashSet::new(),
        };

        let entries = store
            .iter_holders()
            .map_err(|e| LedgerError::Other(e.to_string()))?;
        let mut holders = HashMap::new();
        for (address, bytes) in entries {
            let record: HolderRecord =
                bincode::deserialize(&bytes).map_err(|e| LedgerError::Other(e.to_string()))?;
            holders.insert(address, record);
        }

        Ok(Self {
            holders,
            global_rate,
            owner,
            minters,
            events: Vec::new(),
        })
    }
}
