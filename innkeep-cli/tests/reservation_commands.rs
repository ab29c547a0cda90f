//! Integration tests for booking, amending and cancelling.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_book_prices_from_rate() {
    let env = TestEnv::new();
    env.add_room("101");
    let id = env.book("Mma Ramotswe", "101", "2030-05-10", "2030-05-15");

    let reservations = env.json(&["reservations"]);
    let reservation = &reservations[0];
    assert_eq!(reservation["id"], id);
    assert_eq!(reservation["guest_name"], "Mma Ramotswe");
    assert_eq!(reservation["status"], "confirmed");
    // Five nights at 400.00.
    assert_eq!(reservation["total_amount"], 200_000);
}

#[test]
fn test_book_with_agreed_amount() {
    let env = TestEnv::new();
    env.add_room("101");
    env.run(&[
        "book", "--guest", "Ada", "--room", "101", "--check-in", "2030-05-10", "--check-out",
        "2030-05-15", "--amount", "1800",
    ]);
    assert_eq!(env.json(&["reservations"])[0]["total_amount"], 180_000);
}

#[test]
fn test_book_overlap_fails_but_adjacent_succeeds() {
    let env = TestEnv::new();
    env.add_room("101");
    env.book("Ada", "101", "2030-05-10", "2030-05-15");

    env.command()
        .args([
            "book", "--guest", "Bob", "--room", "101", "--check-in", "2030-05-14",
            "--check-out", "2030-05-16",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Ada"));

    // Checking in on the day the previous guest leaves is fine.
    env.book("Bob", "101", "2030-05-15", "2030-05-16");
}

#[test]
fn test_book_rejects_empty_stay() {
    let env = TestEnv::new();
    env.add_room("101");
    env.command()
        .args([
            "book", "--guest", "Ada", "--room", "101", "--check-in", "2030-05-10",
            "--check-out", "2030-05-10",
        ])
        .assert()
        .code(4);
}

#[test]
fn test_book_unknown_room() {
    let env = TestEnv::new();
    env.command()
        .args([
            "book", "--guest", "Ada", "--room", "999", "--check-in", "2030-05-10",
            "--check-out", "2030-05-12",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("999"));
}

#[test]
fn test_book_dry_run_prints_no_id() {
    let env = TestEnv::new();
    env.add_room("101");
    env.command()
        .args([
            "book", "--guest", "Ada", "--room", "101", "--check-in", "2030-05-10",
            "--check-out", "2030-05-12", "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Dry run"));

    assert_eq!(env.json(&["reservations"]).as_array().unwrap().len(), 0);
}

#[test]
fn test_amend_moves_room_and_dates() {
    let env = TestEnv::new();
    env.add_room("101");
    let deluxe = env.add_room_of("102", "deluxe", "Savuti");
    let id = env.book("Ada", "101", "2030-05-10", "2030-05-12").to_string();

    env.run(&[
        "amend", &id, "--room", "102", "--check-out", "2030-05-13",
    ]);

    let reservation = &env.json(&["reservations"])[0];
    assert_eq!(reservation["room_id"], deluxe);
    assert_eq!(reservation["stay"]["check_out"], "2030-05-13");
}

#[test]
fn test_amend_into_occupied_dates_fails() {
    let env = TestEnv::new();
    env.add_room("101");
    env.add_room("102");
    env.book("Ada", "101", "2030-05-10", "2030-05-12");
    let bob = env.book("Bob", "102", "2030-05-10", "2030-05-12").to_string();

    env.command()
        .args(["amend", &bob, "--room", "101"])
        .assert()
        .code(1);
}

#[test]
fn test_amend_nothing_is_invalid() {
    let env = TestEnv::new();
    env.add_room("101");
    let id = env.book("Ada", "101", "2030-05-10", "2030-05-12").to_string();
    env.command().args(["amend", &id]).assert().code(4);
}

#[test]
fn test_cancel_frees_dates() {
    let env = TestEnv::new();
    env.add_room("101");
    let id = env.book("Ada", "101", "2030-05-10", "2030-05-12").to_string();
    env.run(&["cancel", &id]);

    env.book("Bob", "101", "2030-05-10", "2030-05-12");
    let cancelled = env.json(&["reservations", "--status", "cancelled"]);
    assert_eq!(cancelled.as_array().unwrap().len(), 1);
}

#[test]
fn test_cancel_twice_warns() {
    let env = TestEnv::new();
    env.add_room("101");
    let id = env.book("Ada", "101", "2030-05-10", "2030-05-12").to_string();
    env.run(&["cancel", &id]);
    env.command()
        .args(["cancel", &id])
        .assert()
        .success()
        .stderr(predicate::str::contains("already cancelled"));
}

#[test]
fn test_reservations_filters() {
    let env = TestEnv::new();
    env.add_room("101");
    env.add_room("102");
    env.book("Ada Lovelace", "101", "2030-05-10", "2030-05-12");
    env.book("Bob", "102", "2030-05-11", "2030-05-14");

    let on_13th = env.json(&["reservations", "--on", "2030-05-13"]);
    assert_eq!(on_13th.as_array().unwrap().len(), 1);
    assert_eq!(on_13th[0]["guest_name"], "Bob");

    let by_guest = env.json(&["reservations", "--guest", "lovelace"]);
    assert_eq!(by_guest.as_array().unwrap().len(), 1);

    let by_room = env.json(&["reservations", "--room", "102"]);
    assert_eq!(by_room[0]["guest_name"], "Bob");
}
