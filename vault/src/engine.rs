//! The exchange vault — reserve accounting and ledger bridging.

use crate::assets::AssetBackend;
use crate::error::VaultError;
use crate::event::VaultEvent;
use swell_ledger::{LedgerEngine, LedgerError};
use swell_types::{AmountSpec, HolderAddress, Timestamp};

/// Exchanges the base asset for ledger credits 1:1.
///
/// The vault is itself a ledger identity: it must be authorized as a minter
/// before deposits can succeed. All amounts are raw asset units; the
/// reserve is the vault's own asset holding, which must stay at or above
/// the sum of all holders' effective balances for redemptions to stay live
/// (funded via `add_rewards`).
pub struct Vault<A: AssetBackend> {
    /// Ledger identity this vault mints and burns under.
    address: HolderAddress,
    /// Units of the underlying asset currently held.
    reserve: u128,
    assets: A,
    /// Events accumulated since the last drain.
    events: Vec<VaultEvent>,
}

impl<A: AssetBackend> Vault<A> {
    pub fn new(address: HolderAddress, assets: A) -> Self {
        Self {
            address,
            reserve: 0,
            assets,
            events: Vec::new(),
        }
    }

    /// The vault's ledger identity (the address to authorize as minter).
    pub fn address(&self) -> &HolderAddress {
        &self.address
    }

    /// Current asset reserve, raw units.
    pub fn reserve(&self) -> u128 {
        self.reserve
    }

    /// Accept `amount` of inbound asset and mint the same amount of ledger
    /// credit to `caller`.
    pub fn deposit(
        &mut self,
        ledger: &mut LedgerEngine,
        caller: &HolderAddress,
        amount: u128,
        now: Timestamp,
    ) -> Result<(), VaultError> {
        let credited = self
            .reserve
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        ledger.mint(&self.address, caller, amount, now)?;
        self.reserve = credited;
        tracing::info!(target: "swell::vault", user = %caller, amount, "deposit");
        self.events.push(VaultEvent::Deposited {
            user: caller.clone(),
            amount,
        });
        Ok(())
    }

    /// Burn `spec` of the caller's ledger credit and pay out the same
    /// amount of the underlying asset. Returns the amount paid.
    ///
    /// `AmountSpec::All` resolves to the caller's full effective balance at
    /// `now`. Burn and payout behave as one atomic unit: if the asset
    /// backend rejects the payout, the burn is rolled back from a snapshot
    /// taken within this same call, so no accrual is lost or double-counted.
    pub fn redeem(
        &mut self,
        ledger: &mut LedgerEngine,
        caller: &HolderAddress,
        spec: AmountSpec,
        now: Timestamp,
    ) -> Result<u128, VaultError> {
        let full = ledger.balance_of_checked(caller, now)?;
        let amount = spec.resolve(full);
        if amount > full {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available: full,
            }
            .into());
        }
        if amount > self.reserve {
            return Err(VaultError::InsufficientReserve {
                needed: amount,
                reserve: self.reserve,
            });
        }

        let snapshot = ledger.holder(caller).cloned();
        ledger.burn(&self.address, caller, amount, now)?;
        if let Err(rejected) = self.assets.transfer_out(caller, amount) {
            ledger.restore_holder(caller, snapshot);
            tracing::warn!(
                target: "swell::vault",
                user = %caller,
                amount,
                "payout rejected, burn rolled back"
            );
            return Err(VaultError::TransferFailed(rejected.to_string()));
        }

        self.reserve -= amount;
        tracing::info!(target: "swell::vault", user = %caller, amount, "redeem");
        self.events.push(VaultEvent::Redeemed {
            user: caller.clone(),
            amount,
        });
        Ok(amount)
    }

    /// Fund the reserve so later redemptions can pay out accrued interest.
    /// Touches nothing but the reserve — in particular, never the global
    /// rate.
    pub fn add_rewards(&mut self, amount: u128) -> Result<(), VaultError> {
        self.reserve = self
            .reserve
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        tracing::info!(target: "swell::vault", amount, "rewards added");
        self.events.push(VaultEvent::RewardsAdded { amount });
        Ok(())
    }

    /// Liveness check: does the reserve cover every holder's effective
    /// balance at `now`?
    pub fn is_solvent(&self, ledger: &LedgerEngine, now: Timestamp) -> Result<bool, VaultError> {
        Ok(self.reserve >= ledger.total_effective_checked(now)?)
    }

    /// Take all events accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<VaultEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetRejected, SinkBackend};
    use swell_types::{LedgerParams, PRECISION};

    fn addr(n: u8) -> HolderAddress {
        HolderAddress::new(format!("swl_{:0>60}", n))
    }

    fn ts(secs: u64) -> Timestamp {
        Timestamp::new(secs)
    }

    /// Ledger plus an authorized vault at 1%-per-second for round numbers.
    fn make_system() -> (LedgerEngine, Vault<SinkBackend>, HolderAddress) {
        let owner = addr(0);
        let mut ledger = LedgerEngine::with_rate(owner.clone(), PRECISION / 100);
        let vault = Vault::new(addr(1), SinkBackend);
        ledger
            .authorize_minter(&owner, vault.address().clone())
            .unwrap();
        (ledger, vault, owner)
    }

    /// Backend that records payouts and rejects on demand.
    struct ScriptedBackend {
        reject: bool,
        payouts: Vec<(HolderAddress, u128)>,
    }

    impl AssetBackend for ScriptedBackend {
        fn transfer_out(
            &mut self,
            to: &HolderAddress,
            amount: u128,
        ) -> Result<(), AssetRejected> {
            if self.reject {
                return Err(AssetRejected {
                    recipient: to.clone(),
                    reason: "recipient refused".into(),
                });
            }
            self.payouts.push((to.clone(), amount));
            Ok(())
        }
    }

    #[test]
    fn deposit_mints_one_to_one_and_grows_reserve() {
        let (mut ledger, mut vault, _) = make_system();
        let user = addr(2);
        vault.deposit(&mut ledger, &user, 100_000, ts(0)).unwrap();
        assert_eq!(ledger.balance_of(&user, ts(0)), 100_000);
        assert_eq!(vault.reserve(), 100_000);
    }

    #[test]
    fn unauthorized_vault_cannot_deposit() {
        let owner = addr(0);
        let mut ledger = LedgerEngine::new(owner, &LedgerParams::default());
        let mut vault = Vault::new(addr(1), SinkBackend);
        let err = vault
            .deposit(&mut ledger, &addr(2), 1_000, ts(0))
            .unwrap_err();
        assert!(matches!(
            err,
            VaultError::Ledger(LedgerError::Unauthorized(_))
        ));
        assert_eq!(vault.reserve(), 0);
    }

    #[test]
    fn immediate_redeem_all_round_trips_exactly() {
        let owner = addr(0);
        let mut ledger = LedgerEngine::with_rate(owner.clone(), PRECISION / 100);
        let backend = ScriptedBackend { reject: false, payouts: Vec::new() };
        let mut vault = Vault::new(addr(1), backend);
        ledger
            .authorize_minter(&owner, vault.address().clone())
            .unwrap();

        let user = addr(2);
        vault.deposit(&mut ledger, &user, 250_000, ts(7)).unwrap();
        let paid = vault
            .redeem(&mut ledger, &user, AmountSpec::All, ts(7))
            .unwrap();

        // Zero elapsed time ⇒ zero accrued interest.
        assert_eq!(paid, 250_000);
        assert_eq!(ledger.balance_of(&user, ts(7)), 0);
        assert_eq!(vault.reserve(), 0);
        assert_eq!(vault.assets.payouts, vec![(user, 250_000)]);
    }

    #[test]
    fn redeem_after_accrual_pays_effective_balance() {
        let (mut ledger, mut vault, _) = make_system();
        let user = addr(2);
        vault.deposit(&mut ledger, &user, 100_000, ts(0)).unwrap();

        // 10s of 1%/s ⇒ 10_000 of interest; top up the reserve by exactly
        // the accrued delta.
        let owed = ledger.balance_of(&user, ts(10));
        assert_eq!(owed, 110_000);
        vault.add_rewards(owed - 100_000).unwrap();

        let paid = vault
            .redeem(&mut ledger, &user, AmountSpec::All, ts(10))
            .unwrap();
        assert_eq!(paid, 110_000);
        assert_eq!(ledger.balance_of(&user, ts(10)), 0);
        assert_eq!(vault.reserve(), 0);
    }

    #[test]
    fn redeem_exact_overdraft_reports_insufficient_balance() {
        let (mut ledger, mut vault, _) = make_system();
        let user = addr(2);
        vault.deposit(&mut ledger, &user, 100_000, ts(0)).unwrap();
        vault.add_rewards(1_000_000).unwrap();

        let err = vault
            .redeem(&mut ledger, &user, AmountSpec::Exact(110_001), ts(10))
            .unwrap_err();
        match err {
            VaultError::Ledger(LedgerError::InsufficientBalance { needed, available }) => {
                assert_eq!(needed, 110_001);
                assert_eq!(available, 110_000);
            }
            other => panic!("expected InsufficientBalance, got {other:?}"),
        }
    }

    #[test]
    fn redeem_beyond_reserve_fails_without_burning() {
        let (mut ledger, mut vault, _) = make_system();
        let user = addr(2);
        vault.deposit(&mut ledger, &user, 100_000, ts(0)).unwrap();

        // Interest accrued but the reserve was never topped up.
        let err = vault
            .redeem(&mut ledger, &user, AmountSpec::All, ts(10))
            .unwrap_err();
        match err {
            VaultError::InsufficientReserve { needed, reserve } => {
                assert_eq!(needed, 110_000);
                assert_eq!(reserve, 100_000);
            }
            other => panic!("expected InsufficientReserve, got {other:?}"),
        }
        // Nothing was burned.
        assert_eq!(ledger.balance_of(&user, ts(10)), 110_000);
    }

    #[test]
    fn rejected_payout_rolls_back_the_burn() {
        let owner = addr(0);
        let mut ledger = LedgerEngine::with_rate(owner.clone(), PRECISION / 100);
        let backend = ScriptedBackend { reject: true, payouts: Vec::new() };
        let mut vault = Vault::new(addr(1), backend);
        ledger
            .authorize_minter(&owner, vault.address().clone())
            .unwrap();

        let user = addr(2);
        vault.deposit(&mut ledger, &user, 100_000, ts(0)).unwrap();
        // Clear the deposit's events so only the failed redeem is under test.
        ledger.drain_events();
        vault.drain_events();

        let err = vault
            .redeem(&mut ledger, &user, AmountSpec::Exact(40_000), ts(10))
            .unwrap_err();
        assert!(matches!(err, VaultError::TransferFailed(_)));

        // Ledger state and reserve as if the redeem never happened.
        assert_eq!(ledger.balance_of(&user, ts(10)), 110_000);
        assert_eq!(ledger.user_rate(&user), Some(PRECISION / 100));
        assert_eq!(vault.reserve(), 100_000);
        assert!(vault.drain_events().is_empty());
        assert!(ledger.drain_events().is_empty());
    }

    #[test]
    fn add_rewards_funds_reserve_and_never_touches_the_rate() {
        let (mut ledger, mut vault, _) = make_system();
        let rate_before = ledger.global_rate();
        vault.add_rewards(777_777).unwrap();
        assert_eq!(vault.reserve(), 777_777);
        assert_eq!(ledger.global_rate(), rate_before);
    }

    #[test]
    fn solvency_tracks_accrued_interest() {
        let (mut ledger, mut vault, _) = make_system();
        let user = addr(2);
        vault.deposit(&mut ledger, &user, 100_000, ts(0)).unwrap();

        assert!(vault.is_solvent(&ledger, ts(0)).unwrap());
        // Interest has accrued past the reserve.
        assert!(!vault.is_solvent(&ledger, ts(10)).unwrap());
        vault.add_rewards(10_000).unwrap();
        assert!(vault.is_solvent(&ledger, ts(10)).unwrap());
    }

    #[test]
    fn events_record_the_exchange_history() {
        let (mut ledger, mut vault, _) = make_system();
        let user = addr(2);
        vault.deposit(&mut ledger, &user, 100_000, ts(0)).unwrap();
        vault.add_rewards(10_000).unwrap();
        vault
            .redeem(&mut ledger, &user, AmountSpec::All, ts(10))
            .unwrap();

        assert_eq!(
            vault.drain_events(),
            vec![
                VaultEvent::Deposited { user: user.clone(), amount: 100_000 },
                VaultEvent::RewardsAdded { amount: 10_000 },
                VaultEvent::Redeemed { user, amount: 110_000 },
            ]
        );
    }
}
