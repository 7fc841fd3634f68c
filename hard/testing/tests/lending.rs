use {
    hard_lending::{ErrorKind, LendingError},
    hard_math::{Int256, Udec256},
    hard_testing::{
        btree_map, coins, mock_oracle, mock_params, setup_tracing_subscriber, BalanceChange,
        MockBank, TestSuite,
    },
    hard_types::{Addr, Coins, Denom, ResultExt},
    std::{str::FromStr, sync::LazyLock},
};

static ALICE: LazyLock<Addr> = LazyLock::new(|| Addr::from_str("alice").unwrap());
static BOB: LazyLock<Addr> = LazyLock::new(|| Addr::from_str("bob").unwrap());
static CAROL: LazyLock<Addr> = LazyLock::new(|| Addr::from_str("carol").unwrap());

static BNB: LazyLock<Denom> = LazyLock::new(|| Denom::from_str("bnb").unwrap());
static UKAVA: LazyLock<Denom> = LazyLock::new(|| Denom::from_str("ukava").unwrap());

fn setup() -> TestSuite {
    setup_tracing_subscriber(tracing::Level::DEBUG);

    TestSuite::new_with_balances([
        (ALICE.clone(), coins! { "bnb" => 200, "ukava" => 1000 }),
        (BOB.clone(), coins! { "bnb" => 500, "ukava" => 1000 }),
        (CAROL.clone(), coins! { "bnb" => 10 }),
    ])
}

#[test]
fn deposit_works() {
    let mut suite = setup();

    suite.balance_tracker().record(&ALICE);

    suite.deposit(&ALICE, coins! { "bnb" => 100 }).should_succeed();

    suite.balance_tracker().should_change(&ALICE, btree_map! {
        BNB.clone() => BalanceChange::Decreased(100),
        UKAVA.clone() => BalanceChange::Unchanged,
    });

    let deposit = suite.ledger.deposit_of(&ALICE).unwrap().unwrap();
    assert_eq!(deposit.owner, *ALICE);
    assert_eq!(deposit.amount, coins! { "bnb" => 100 });
    assert_eq!(deposit.index, btree_map! { BNB.clone() => Udec256::ONE });

    assert_eq!(suite.total_deposited("bnb"), Int256::new(100));

    // A second deposit merges into the same record.
    suite
        .deposit(&ALICE, coins! { "bnb" => 20, "ukava" => 300 })
        .should_succeed();

    let deposit = suite.ledger.deposit_of(&ALICE).unwrap().unwrap();
    assert_eq!(deposit.amount, coins! { "bnb" => 120, "ukava" => 300 });
    assert_eq!(deposit.index.len(), 2);
}

#[test]
fn deposit_rejects_invalid_requests() {
    let mut suite = setup();

    suite
        .deposit(&ALICE, coins! { "btc" => 1 })
        .should_fail_with_error("invalid deposit denom: no money market found for `btc`");

    suite
        .deposit(&ALICE, Coins::new())
        .should_fail_with_error("coins must not be empty");

    let err = suite
        .deposit(&CAROL, coins! { "bnb" => 11 })
        .should_fail_with_error(
            "the requested amount of 11 exceeds the available balance of 10bnb in account carol",
        );
    assert_eq!(err.kind(), ErrorKind::Funds);

    assert!(suite.ledger.deposit_of(&CAROL).unwrap().is_none());
    assert!(suite.ledger.supply_interest_factors().unwrap().is_empty());
}

/// Deposit 100 bnb worth 200 at a loan-to-value of 0.8: up to 160 of debt is
/// allowed.
#[test]
fn borrow_respects_ltv() {
    let mut suite = setup();

    suite.deposit(&ALICE, coins! { "bnb" => 100 }).should_succeed();

    suite.balance_tracker().record(&ALICE);

    suite.borrow(&ALICE, coins! { "bnb" => 50 }).should_succeed();

    suite.balance_tracker().should_change(&ALICE, btree_map! {
        BNB.clone() => BalanceChange::Increased(50),
    });

    let borrow = suite.ledger.borrow_of(&ALICE).unwrap().unwrap();
    assert_eq!(borrow.amount, coins! { "bnb" => 50 });
    assert_eq!(borrow.index, btree_map! { BNB.clone() => Udec256::ONE });
    assert_eq!(suite.ledger.total_borrowed().unwrap(), coins! { "bnb" => 50 });

    // 81 bnb is worth 162, above the limit.
    suite.balance_tracker().record(&ALICE);

    let err = suite
        .borrow(&ALICE, coins! { "bnb" => 31 })
        .should_fail_with_error("loan-to-value limit exceeded");
    assert_eq!(err.kind(), ErrorKind::Solvency);

    suite.balance_tracker().should_change(&ALICE, btree_map! {
        BNB.clone() => BalanceChange::Unchanged,
    });
    assert_eq!(
        suite.ledger.borrow_of(&ALICE).unwrap().unwrap().amount,
        coins! { "bnb" => 50 }
    );
    assert_eq!(suite.ledger.total_borrowed().unwrap(), coins! { "bnb" => 50 });

    // Exactly at the limit is fine.
    suite.borrow(&ALICE, coins! { "bnb" => 30 }).should_succeed();
}

#[test]
fn borrow_rejects_invalid_requests() {
    let mut suite = setup();

    suite
        .borrow(&ALICE, coins! { "btc" => 1 })
        .should_fail_with_error("invalid borrow denom: no money market found for `btc`");

    // Nothing deposited, nothing can be borrowed.
    suite.deposit(&BOB, coins! { "bnb" => 100 }).should_succeed();
    suite
        .borrow(&ALICE, coins! { "bnb" => 1 })
        .should_fail_with_error("loan-to-value limit exceeded");

    // 100 ukava is worth 50, supporting 25 of debt.
    suite.deposit(&ALICE, coins! { "ukava" => 100 }).should_succeed();
    suite
        .borrow(&ALICE, coins! { "bnb" => 101 })
        .should_fail_with_error("loan-to-value limit exceeded");
    suite.withdraw(&BOB, coins! { "bnb" => 95 }).should_succeed();
    suite
        .borrow(&ALICE, coins! { "bnb" => 10 })
        .should_fail_with_error(
            "insufficient pool balance: requested 10bnb but the pool holds 5bnb",
        );
}

#[test]
fn borrow_respects_aggregate_cap() {
    let mut params = mock_params();
    params.money_markets[0].borrow_limit.has_max_limit = true;
    params.money_markets[0].borrow_limit.maximum_limit = Int256::new(60);

    let bank = MockBank::new()
        .with_balance(&ALICE, coins! { "bnb" => 200 })
        .with_balance(&BOB, coins! { "bnb" => 200 });
    let mut suite = TestSuite::new(&params, bank, mock_oracle());

    suite.deposit(&ALICE, coins! { "bnb" => 100 }).should_succeed();
    suite.deposit(&BOB, coins! { "bnb" => 100 }).should_succeed();

    suite.borrow(&ALICE, coins! { "bnb" => 50 }).should_succeed();

    suite
        .borrow(&BOB, coins! { "bnb" => 11 })
        .should_fail_with_error(
            "borrow cap exceeded: borrowing 11bnb would bring the total to 61, above the limit of 60",
        );

    suite.borrow(&BOB, coins! { "bnb" => 10 }).should_succeed();
}

/// Deposit 100, borrow 50, then repay 60 with 200 spendable: exactly 50 moves
/// and the borrow is gone.
#[test]
fn repay_is_capped_at_owed() {
    let mut suite = TestSuite::new_with_balances([(ALICE.clone(), coins! { "bnb" => 250 })]);

    suite.deposit(&ALICE, coins! { "bnb" => 100 }).should_succeed();
    suite.borrow(&ALICE, coins! { "bnb" => 50 }).should_succeed();

    assert_eq!(suite.query_balances(&ALICE), coins! { "bnb" => 200 });

    suite.balance_tracker().record(&ALICE);

    suite
        .repay(&ALICE, &ALICE, coins! { "bnb" => 60 })
        .should_succeed();

    suite.balance_tracker().should_change(&ALICE, btree_map! {
        BNB.clone() => BalanceChange::Decreased(50),
    });
    assert_eq!(suite.query_balances(&ALICE), coins! { "bnb" => 150 });

    assert!(suite.ledger.borrow_of(&ALICE).unwrap().is_none());
    assert!(suite.ledger.total_borrowed().unwrap().is_empty());
    assert!(suite.ledger.risky_accounts(None).unwrap().is_empty());
    assert_eq!(suite.total_deposited("bnb"), Int256::new(100));
}

#[test]
fn repay_on_behalf_of_another_account() {
    let mut suite = setup();

    suite.deposit(&ALICE, coins! { "bnb" => 100 }).should_succeed();
    suite.borrow(&ALICE, coins! { "bnb" => 50 }).should_succeed();

    suite.balance_tracker().record_many([&*ALICE, &*BOB]);

    suite
        .repay(&BOB, &ALICE, coins! { "bnb" => 20 })
        .should_succeed();

    suite.balance_tracker().should_change(&BOB, btree_map! {
        BNB.clone() => BalanceChange::Decreased(20),
    });
    suite.balance_tracker().should_change(&ALICE, btree_map! {
        BNB.clone() => BalanceChange::Unchanged,
    });

    assert_eq!(
        suite.ledger.borrow_of(&ALICE).unwrap().unwrap().amount,
        coins! { "bnb" => 30 }
    );
    assert_eq!(suite.ledger.total_borrowed().unwrap(), coins! { "bnb" => 30 });
}

#[test]
fn repay_rejects_invalid_requests() {
    let mut suite = setup();

    let err = suite
        .repay(&ALICE, &ALICE, coins! { "bnb" => 1 })
        .should_fail_with_error("no borrow found for account alice");
    assert_eq!(err.kind(), ErrorKind::NotFound);

    suite.deposit(&ALICE, coins! { "bnb" => 100 }).should_succeed();
    suite.borrow(&ALICE, coins! { "bnb" => 50 }).should_succeed();

    suite
        .repay(&ALICE, &ALICE, coins! { "bnb" => 10, "ukava" => 1 })
        .should_fail_with_error("account can only repay up to 0ukava");

    // Carol only has 10 bnb; the capped amount of 50 is what she must cover.
    suite.balance_tracker().record(&CAROL);

    suite
        .repay(&CAROL, &ALICE, coins! { "bnb" => 60 })
        .should_fail_and(|err| {
            *err == LendingError::InsufficientFunds {
                account: CAROL.clone(),
                denom: BNB.clone(),
                requested: Int256::new(50),
                available: Int256::new(10),
            }
        });

    suite.balance_tracker().should_change(&CAROL, btree_map! {
        BNB.clone() => BalanceChange::Unchanged,
    });
    assert_eq!(
        suite.ledger.borrow_of(&ALICE).unwrap().unwrap().amount,
        coins! { "bnb" => 50 }
    );
}

#[test]
fn withdraw_works() {
    let mut suite = setup();

    suite
        .withdraw(&BOB, coins! { "bnb" => 1 })
        .should_fail_with_error("no deposit found for account bob");

    suite.deposit(&ALICE, coins! { "bnb" => 100 }).should_succeed();

    suite
        .withdraw(&ALICE, coins! { "bnb" => 101 })
        .should_fail_with_error(
            "insufficient balance: cannot withdraw 101bnb, only 100bnb is deposited",
        );
    suite
        .withdraw(&ALICE, coins! { "ukava" => 1 })
        .should_fail_with_error("cannot withdraw 1ukava, only 0ukava is deposited");

    suite.balance_tracker().record(&ALICE);

    suite.withdraw(&ALICE, coins! { "bnb" => 40 }).should_succeed();

    suite.balance_tracker().should_change(&ALICE, btree_map! {
        BNB.clone() => BalanceChange::Increased(40),
    });
    assert_eq!(
        suite.ledger.deposit_of(&ALICE).unwrap().unwrap().amount,
        coins! { "bnb" => 60 }
    );

    // Withdrawing everything deletes the record.
    suite.withdraw(&ALICE, coins! { "bnb" => 60 }).should_succeed();

    assert!(suite.ledger.deposit_of(&ALICE).unwrap().is_none());
    assert_eq!(suite.query_balances(&ALICE), coins! { "bnb" => 200, "ukava" => 1000 });
    assert_eq!(suite.total_deposited("bnb"), Int256::ZERO);
}

#[test]
fn withdraw_respects_ltv() {
    let mut suite = setup();

    suite.deposit(&ALICE, coins! { "bnb" => 100 }).should_succeed();
    suite.borrow(&ALICE, coins! { "bnb" => 50 }).should_succeed();

    // 62 bnb left would support only 99.2 of debt; 100 is owed.
    suite
        .withdraw(&ALICE, coins! { "bnb" => 38 })
        .should_fail_with_error("loan-to-value limit exceeded");

    // 63 bnb left supports 100.8.
    suite.withdraw(&ALICE, coins! { "bnb" => 37 }).should_succeed();

    assert_eq!(
        suite.ledger.deposit_of(&ALICE).unwrap().unwrap().amount,
        coins! { "bnb" => 63 }
    );
}

#[test]
fn failed_operation_leaves_no_trace() {
    let mut suite = setup();

    suite.deposit(&ALICE, coins! { "bnb" => 100 }).should_succeed();
    suite.borrow(&ALICE, coins! { "bnb" => 50 }).should_succeed();

    let storage_before = suite.ledger.storage().clone();
    let bank_before = suite.bank.clone();

    // The ukava price is needed to re-file alice in the risk index, which
    // happens after the deposit record and the new ukava factor are written.
    suite.oracle.remove_price("ukava:usd");

    let err = suite
        .deposit(&ALICE, coins! { "ukava" => 100 })
        .should_fail_with_error("price unavailable for market `ukava:usd`");
    assert_eq!(err.kind(), ErrorKind::Oracle);

    assert_eq!(*suite.ledger.storage(), storage_before);
    assert_eq!(suite.bank, bank_before);
    assert!(suite.ledger.supply_interest_factor(&UKAVA).unwrap().is_none());
}

#[test]
fn risk_index_tracks_riskiest_accounts() {
    let mut suite = setup();

    suite.deposit(&ALICE, coins! { "bnb" => 200 }).should_succeed();

    // 1000 ukava is worth 500 and supports 250 of debt. 100 bnb is worth 200.
    suite.deposit(&BOB, coins! { "ukava" => 1000 }).should_succeed();
    suite.borrow(&BOB, coins! { "bnb" => 100 }).should_succeed();

    suite.borrow(&ALICE, coins! { "bnb" => 50 }).should_succeed();

    suite
        .ledger
        .risky_accounts(None)
        .should_succeed_and_equal(vec![
            (Udec256::new_percent(40), BOB.clone()),
            (Udec256::new_percent(25), ALICE.clone()),
        ]);
    suite
        .ledger
        .risky_accounts(Some(1))
        .should_succeed_and_equal(vec![(Udec256::new_percent(40), BOB.clone())]);
    suite
        .ledger
        .liquidation_candidates(&suite.oracle, None)
        .should_succeed_and_equal(Vec::<Addr>::new());

    // bnb rallies: bob's 100 bnb of debt is now worth 300, above his limit.
    suite.oracle.set_price("bnb:usd", Udec256::new(3));

    suite
        .ledger
        .liquidation_candidates(&suite.oracle, None)
        .should_succeed_and_equal(vec![BOB.clone()]);
    suite
        .ledger
        .ltv_of(&suite.oracle, &BOB)
        .should_succeed_and_equal(Some(Udec256::new_percent(60)));
    suite
        .ledger
        .ltv_of(&suite.oracle, &CAROL)
        .should_succeed_and_equal(None);

    // Repaying in full takes bob out of the index.
    suite
        .repay(&BOB, &BOB, coins! { "bnb" => 100 })
        .should_succeed();

    suite
        .ledger
        .risky_accounts(None)
        .should_succeed_and_equal(vec![(Udec256::new_percent(25), ALICE.clone())]);
}

#[test]
fn paginated_queries() {
    let mut suite = setup();

    suite.deposit(&ALICE, coins! { "bnb" => 100 }).should_succeed();
    suite.deposit(&BOB, coins! { "bnb" => 100 }).should_succeed();
    suite.deposit(&CAROL, coins! { "bnb" => 10 }).should_succeed();
    suite.borrow(&BOB, coins! { "bnb" => 1 }).should_succeed();

    let all = suite.ledger.deposits(None, None).unwrap();
    assert_eq!(all.keys().collect::<Vec<_>>(), vec![&*ALICE, &*BOB, &*CAROL]);

    let page = suite.ledger.deposits(None, Some(2)).unwrap();
    assert_eq!(page.keys().collect::<Vec<_>>(), vec![&*ALICE, &*BOB]);

    let page = suite.ledger.deposits(Some(&BOB), None).unwrap();
    assert_eq!(page.keys().collect::<Vec<_>>(), vec![&*CAROL]);

    let borrows = suite.ledger.borrows(None, None).unwrap();
    assert_eq!(borrows.keys().collect::<Vec<_>>(), vec![&*BOB]);
}
