//! End-to-end exchange flow: deposit, accrue, rate change, transfer, redeem.

use swell_ledger::LedgerEngine;
use swell_types::{AmountSpec, HolderAddress, Timestamp, PRECISION};
use swell_vault::{SinkBackend, Vault};

fn addr(n: u8) -> HolderAddress {
    HolderAddress::new(format!("swl_{:0>60}", n))
}

fn ts(secs: u64) -> Timestamp {
    Timestamp::new(secs)
}

#[test]
fn full_lifecycle_across_rate_epochs() {
    swell_utils::init_tracing();

    let owner = addr(0);
    let mut ledger = LedgerEngine::with_rate(owner.clone(), PRECISION / 100);
    let mut vault = Vault::new(addr(1), SinkBackend);
    ledger
        .authorize_minter(&owner, vault.address().clone())
        .unwrap();

    let alice = addr(2);
    let bob = addr(3);

    // Alice deposits at the 1%/s launch rate.
    vault.deposit(&mut ledger, &alice, 1_000_000, ts(0)).unwrap();

    // The offer improves to 2%/s. Alice's frozen rate is unaffected.
    ledger.set_global_rate(&owner, PRECISION / 50).unwrap();
    assert_eq!(ledger.user_rate(&alice), Some(PRECISION / 100));

    // 10s later Alice has accrued 10% simple interest.
    assert_eq!(ledger.balance_of(&alice, ts(10)), 1_100_000);

    // Alice sends Bob a quarter; Bob is new, so he gets the current offer.
    ledger
        .transfer(&alice, &bob, AmountSpec::Exact(275_000), ts(10))
        .unwrap();
    assert_eq!(ledger.user_rate(&bob), Some(PRECISION / 50));
    assert_eq!(ledger.balance_of(&alice, ts(10)), 825_000);

    // Bob accrues at his own 2%/s for 5s: 275_000 * 10% = 27_500.
    assert_eq!(ledger.balance_of(&bob, ts(15)), 302_500);

    // Fund the vault for everything owed at t=15, then both exit in full.
    let owed = ledger.total_effective_checked(ts(15)).unwrap();
    vault.add_rewards(owed - vault.reserve()).unwrap();

    let alice_paid = vault
        .redeem(&mut ledger, &alice, AmountSpec::All, ts(15))
        .unwrap();
    let bob_paid = vault
        .redeem(&mut ledger, &bob, AmountSpec::All, ts(15))
        .unwrap();

    // Alice: 825_000 at 1%/s for 5 more seconds = 866_250.
    assert_eq!(alice_paid, 866_250);
    assert_eq!(bob_paid, 302_500);
    assert_eq!(ledger.balance_of(&alice, ts(15)), 0);
    assert_eq!(ledger.balance_of(&bob, ts(15)), 0);
    assert_eq!(vault.reserve(), 0);
}

#[test]
fn drained_holder_reenters_at_the_improved_offer() {
    swell_utils::init_tracing();

    let owner = addr(0);
    let mut ledger = LedgerEngine::with_rate(owner.clone(), PRECISION / 100);
    let mut vault = Vault::new(addr(1), SinkBackend);
    ledger
        .authorize_minter(&owner, vault.address().clone())
        .unwrap();

    let user = addr(2);
    vault.deposit(&mut ledger, &user, 500_000, ts(0)).unwrap();
    vault
        .redeem(&mut ledger, &user, AmountSpec::All, ts(0))
        .unwrap();
    assert_eq!(ledger.balance_of(&user, ts(0)), 0);

    // Rate rises while the holder sits at zero; the next inflow refreezes.
    ledger.set_global_rate(&owner, PRECISION / 25).unwrap();
    vault.deposit(&mut ledger, &user, 500_000, ts(100)).unwrap();
    assert_eq!(ledger.user_rate(&user), Some(PRECISION / 25));
}
