//! Property-based tests for the booking operations.
//!
//! Random sequences of bookings, amendments and cancellations must never
//! leave two active reservations sharing a night in the same room.

use proptest::prelude::*;

use crate::config::Config;
use crate::database::test_util::{create_test_database, d, stay};
use crate::database::ReservationFilter;
use crate::desk::FrontDesk;
use crate::error::ErrorKind;
use crate::money::Money;
use crate::operations::{AmendOptions, BookingOptions};
use crate::pricing::{compute_quote, QuoteRequest};
use crate::reservation::{Reservation, ReservationId};
use crate::room::{Category, NewRoom, RoomId};

#[derive(Debug, Clone)]
enum Step {
    Book { room: usize, from: u32, nights: u32 },
    Move { target: usize, from: u32, nights: u32 },
    Cancel { target: usize },
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (0usize..3, 1u32..20, 1u32..6)
            .prop_map(|(room, from, nights)| Step::Book { room, from, nights }),
        1 => (0usize..8, 1u32..20, 1u32..6)
            .prop_map(|(target, from, nights)| Step::Move { target, from, nights }),
        1 => (0usize..8).prop_map(|target| Step::Cancel { target }),
    ]
}

fn assert_no_overlap(reservations: &[Reservation]) -> Result<(), TestCaseError> {
    let active: Vec<_> = reservations.iter().filter(|r| r.status.is_active()).collect();
    for (i, a) in active.iter().enumerate() {
        for b in &active[i + 1..] {
            prop_assert!(
                a.room_id != b.room_id || !a.stay.overlaps(&b.stay),
                "reservations {} and {} overlap",
                a.id,
                b.id
            );
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_active_reservations_never_overlap(
        steps in prop::collection::vec(step_strategy(), 1..25)
    ) {
        let mut desk = FrontDesk::new(create_test_database(), &Config::default()).unwrap();
        let rooms: Vec<RoomId> = ["101", "102", "103"]
            .iter()
            .map(|n| {
                let room = NewRoom::new(*n, Category::Premium, "Moremi").unwrap();
                desk.create_room(room).unwrap().room_id().unwrap()
            })
            .collect();
        let mut booked: Vec<ReservationId> = Vec::new();

        for step in steps {
            let outcome = match step {
                Step::Book { room, from, nights } => desk
                    .create_reservation(BookingOptions::new(
                        "Guest",
                        rooms[room],
                        stay(from, from + nights),
                    ))
                    .map(|r| booked.extend(r.reservation_id)),
                Step::Move { target, from, nights } => match booked.get(target) {
                    Some(&id) => desk
                        .update_reservation(
                            id,
                            AmendOptions::new().with_dates(Some(d(from)), Some(d(from + nights))),
                        )
                        .map(|_| ()),
                    None => Ok(()),
                },
                Step::Cancel { target } => match booked.get(target) {
                    Some(&id) => desk.cancel_reservation(id).map(|_| ()),
                    None => Ok(()),
                },
            };

            if let Err(err) = outcome {
                prop_assert!(
                    matches!(err.kind(), ErrorKind::Overlap | ErrorKind::InvalidTransition),
                    "unexpected error: {err}"
                );
            }
            assert_no_overlap(&desk.reservations(&ReservationFilter::default()).unwrap())?;
        }
    }

    #[test]
    fn prop_no_discount_means_base_price(
        rate in 1i64..100_000,
        nights in 0u32..30,
        entered in prop::option::of(0i64..10_000_000),
    ) {
        let rate = Money::from_minor(rate);
        let mut request = QuoteRequest::new(rate).with_dates(d(1), d(1 + nights));
        request.entered_amount = entered.map(Money::from_minor);

        let quote = compute_quote(&request);
        prop_assert_eq!(quote.final_amount, quote.base_price);
        prop_assert_eq!(quote.discount_value, Money::ZERO);
    }

    #[test]
    fn prop_strict_discount_never_exceeds_base(
        rate in 1i64..100_000,
        entered in 0i64..10_000_000,
    ) {
        let rate = Money::from_minor(rate);
        let request = QuoteRequest::new(rate)
            .with_dates(d(1), d(4))
            .with_discount(Some(Money::from_minor(entered)))
            .capped(true);
        let quote = compute_quote(&request);
        prop_assert!(quote.final_amount <= quote.base_price);
        prop_assert!(!quote.final_amount.is_negative());
    }
}
