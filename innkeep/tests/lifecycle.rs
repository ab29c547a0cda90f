//! Integration tests for the reservation and stay lifecycle.
//!
//! These drive [`FrontDesk`] end to end over a real database: booking,
//! amending, cancelling, checking in and out, and the room inventory rules
//! that depend on reservation history.

mod common;

use common::{add_room, add_room_of, book, create_test_desk, june, stay};
use innkeep::{
    AmendOptions, BookingOptions, Category, DeleteOutcome, ErrorKind, HousekeepingStatus, Money,
    NewRoom, Occupancy, ReservationFilter, ReservationStatus, RoomPatch,
};

#[test]
fn test_check_in_then_check_out() {
    let mut desk = create_test_desk();
    let room = add_room(&mut desk, "101");
    let id = book(&mut desk, "Precious Ramotswe", room, 10, 15);

    desk.check_in(id, None).unwrap();
    let occupied = desk.room(room).unwrap();
    assert_eq!(occupied.occupancy, Occupancy::Occupied);
    // Check-in leaves the cleanliness axis alone.
    assert_eq!(occupied.housekeeping, HousekeepingStatus::Clean);

    desk.check_out(id).unwrap();
    let room = desk.room(room).unwrap();
    assert_eq!(room.housekeeping, HousekeepingStatus::Dirty);
    assert_eq!(room.occupancy, Occupancy::Vacant);
    assert_eq!(desk.reservation(id).unwrap().status, ReservationStatus::CheckedOut);

    let ledger = desk.ledger().unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].reservation_id, id);
    assert_eq!(ledger[0].amount, Money::from_major(2000));
}

#[test]
fn test_check_in_with_final_amount() {
    let mut desk = create_test_desk();
    let room = add_room(&mut desk, "101");
    let id = book(&mut desk, "Grace Makutsi", room, 10, 15);

    desk.check_in(id, Some(Money::from_major(1800))).unwrap();
    assert_eq!(
        desk.reservation(id).unwrap().total_amount,
        Money::from_major(1800)
    );
    assert_eq!(desk.ledger_summary().unwrap().total, Money::from_major(1800));
}

#[test]
fn test_check_in_requires_confirmed_and_changes_nothing() {
    let mut desk = create_test_desk();
    let room = add_room(&mut desk, "101");
    let id = book(&mut desk, "Ada", room, 1, 3);
    desk.cancel_reservation(id).unwrap();
    let before_room = desk.room(room).unwrap();

    let err = desk.check_in(id, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);

    assert_eq!(desk.room(room).unwrap(), before_room);
    assert_eq!(desk.reservation(id).unwrap().status, ReservationStatus::Cancelled);
    assert!(desk.ledger().unwrap().is_empty());
}

#[test]
fn test_check_in_twice_is_rejected() {
    let mut desk = create_test_desk();
    let room = add_room(&mut desk, "101");
    let id = book(&mut desk, "Ada", room, 1, 3);
    desk.check_in(id, None).unwrap();

    let err = desk.check_in(id, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);
    assert_eq!(desk.ledger().unwrap().len(), 1);
}

#[test]
fn test_check_out_requires_checked_in() {
    let mut desk = create_test_desk();
    let room = add_room(&mut desk, "101");
    let id = book(&mut desk, "Ada", room, 1, 3);

    let err = desk.check_out(id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);
    assert_eq!(desk.room(room).unwrap().housekeeping, HousekeepingStatus::Clean);
}

#[test]
fn test_adjacent_bookings_succeed_straddling_fails() {
    let mut desk = create_test_desk();
    let room = add_room(&mut desk, "101");
    book(&mut desk, "First", room, 1, 5);
    book(&mut desk, "Second", room, 5, 8);

    let err = desk
        .create_reservation(BookingOptions::new("Third", room, stay(4, 6)))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Overlap);
    assert_eq!(
        desk.reservations(&ReservationFilter::default()).unwrap().len(),
        2
    );
}

#[test]
fn test_cancelled_booking_frees_the_dates() {
    let mut desk = create_test_desk();
    let room = add_room(&mut desk, "101");
    let first = book(&mut desk, "First", room, 1, 5);
    desk.cancel_reservation(first).unwrap();

    book(&mut desk, "Second", room, 2, 4);
}

#[test]
fn test_amend_cannot_collide() {
    let mut desk = create_test_desk();
    let room = add_room(&mut desk, "101");
    book(&mut desk, "First", room, 1, 5);
    let second = book(&mut desk, "Second", room, 5, 8);

    let err = desk
        .update_reservation(
            second,
            AmendOptions::new().with_dates(Some(june(3)), None),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Overlap);

    // Moving within its own dates never collides with itself.
    desk.update_reservation(second, AmendOptions::new().with_dates(Some(june(6)), None))
        .unwrap();
    assert_eq!(desk.reservation(second).unwrap().stay, stay(6, 8));
}

#[test]
fn test_amend_moves_to_another_room() {
    let mut desk = create_test_desk();
    let first = add_room(&mut desk, "101");
    let second = add_room_of(&mut desk, "201", Category::Kings, "Chobe");
    let id = book(&mut desk, "Ada", first, 1, 3);

    desk.update_reservation(
        id,
        AmendOptions::new()
            .with_room(Some(second))
            .with_guest(Some("Ada Lovelace".into())),
    )
    .unwrap();

    let reservation = desk.reservation(id).unwrap();
    assert_eq!(reservation.room_id, second);
    assert_eq!(reservation.guest_name, "Ada Lovelace");
}

#[test]
fn test_cancel_checked_in_stay_releases_room() {
    let mut desk = create_test_desk();
    let room = add_room(&mut desk, "101");
    let id = book(&mut desk, "Ada", room, 1, 3);
    desk.check_in(id, None).unwrap();

    desk.cancel_reservation(id).unwrap();
    let room = desk.room(room).unwrap();
    assert_eq!(room.occupancy, Occupancy::Vacant);
    assert_eq!(room.housekeeping, HousekeepingStatus::Dirty);
    // Revenue already recognised stays in the ledger.
    assert_eq!(desk.ledger().unwrap().len(), 1);
}

#[test]
fn test_cancel_checked_out_is_rejected() {
    let mut desk = create_test_desk();
    let room = add_room(&mut desk, "101");
    let id = book(&mut desk, "Ada", room, 1, 3);
    desk.check_in(id, None).unwrap();
    desk.check_out(id).unwrap();

    let err = desk.cancel_reservation(id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);
}

#[test]
fn test_delete_room_with_booking_conflicts_until_cancelled() {
    let mut desk = create_test_desk();
    let room = add_room(&mut desk, "101");
    let id = book(&mut desk, "Ada", room, 1, 3);

    let err = desk.delete_room(room).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    desk.cancel_reservation(id).unwrap();
    let result = desk.delete_room(room).unwrap();
    assert_eq!(result.deleted, Some(DeleteOutcome::Retired));
    assert!(desk.rooms().unwrap().is_empty());
}

#[test]
fn test_delete_unused_room_removes_it() {
    let mut desk = create_test_desk();
    let room = add_room(&mut desk, "101");
    let result = desk.delete_room(room).unwrap();
    assert_eq!(result.deleted, Some(DeleteOutcome::Removed));
    assert_eq!(desk.room(room).unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn test_room_rate_comes_from_catalog() {
    let mut desk = create_test_desk();
    let room = add_room_of(&mut desk, "301", Category::Standard, "kalahari");
    let room = desk.room(room).unwrap();
    assert_eq!(room.room_type, "Kalahari");
    assert_eq!(room.nightly_rate, Money::from_major(250));

    let err = desk
        .create_room(NewRoom::new("302", Category::Standard, "Chobe").unwrap())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_duplicate_room_number_rejected() {
    let mut desk = create_test_desk();
    add_room(&mut desk, "101");
    let err = desk
        .create_room(NewRoom::new(" 101 ", Category::Premium, "Moremi").unwrap())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(desk.rooms().unwrap().len(), 1);
}

#[test]
fn test_import_is_all_or_nothing() {
    let mut desk = create_test_desk();
    let rooms = vec![
        NewRoom::new("101", Category::Premium, "Moremi").unwrap(),
        NewRoom::new("102", Category::Premium, "Okavango").unwrap(),
    ];
    let err = desk.import_rooms(rooms).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(desk.rooms().unwrap().is_empty());

    let rooms = vec![
        NewRoom::new("101", Category::Premium, "Moremi").unwrap(),
        NewRoom::new("102", Category::Executive, "Okavango").unwrap(),
    ];
    let result = desk.import_rooms(rooms).unwrap();
    assert_eq!(result.rooms_created.len(), 2);
}

#[test]
fn test_housekeeping_and_staff() {
    let mut desk = create_test_desk();
    let room = add_room(&mut desk, "101");

    desk.set_housekeeping_status(room, HousekeepingStatus::OutOfOrder)
        .unwrap();
    desk.assign_staff(room, Some("hk-07".into())).unwrap();
    let updated = desk.room(room).unwrap();
    assert_eq!(updated.housekeeping, HousekeepingStatus::OutOfOrder);
    assert_eq!(updated.assigned_staff.as_deref(), Some("hk-07"));

    desk.assign_staff(room, None).unwrap();
    assert!(desk.room(room).unwrap().assigned_staff.is_none());
}

#[test]
fn test_room_update_cannot_touch_occupancy() {
    let mut desk = create_test_desk();
    let room = add_room(&mut desk, "101");
    let id = book(&mut desk, "Mma Potokwane", room, 10, 15);
    desk.check_in(id, None).unwrap();

    let mut edited = desk.room(room).unwrap();
    edited.occupancy = Occupancy::Vacant;
    edited.assigned_staff = Some("hk-03".into());
    desk.update_room(edited, false).unwrap();

    let stored = desk.room(room).unwrap();
    assert_eq!(stored.occupancy, Occupancy::Occupied);
    assert_eq!(stored.assigned_staff.as_deref(), Some("hk-03"));
}

#[test]
fn test_patch_applies_to_current_room_state() {
    let mut desk = create_test_desk();
    let room = add_room(&mut desk, "101");
    let id = book(&mut desk, "Mr J.L.B. Matekoni", room, 10, 15);
    desk.check_in(id, None).unwrap();
    desk.check_out(id).unwrap();

    let patch = RoomPatch {
        assigned_staff: Some(Some("hk-04".into())),
        ..RoomPatch::default()
    };
    desk.patch_room(room, patch).unwrap();

    let stored = desk.room(room).unwrap();
    assert_eq!(stored.housekeeping, HousekeepingStatus::Dirty);
    assert_eq!(stored.occupancy, Occupancy::Vacant);
    assert_eq!(stored.assigned_staff.as_deref(), Some("hk-04"));
    assert_eq!(stored.nightly_rate, Money::from_major(400));
}

#[test]
fn test_patch_rate_override_sticks() {
    let mut desk = create_test_desk();
    let room = add_room(&mut desk, "101");
    let patch = RoomPatch {
        nightly_rate: Some(Money::from_major(420)),
        ..RoomPatch::default()
    };
    let result = desk.patch_room(room, patch).unwrap();
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(desk.room(room).unwrap().nightly_rate, Money::from_major(420));
}

#[test]
fn test_reservation_filters() {
    let mut desk = create_test_desk();
    let first = add_room(&mut desk, "101");
    let second = add_room(&mut desk, "102");
    book(&mut desk, "Ada Lovelace", first, 1, 3);
    let cancelled = book(&mut desk, "Charles Babbage", second, 1, 3);
    desk.cancel_reservation(cancelled).unwrap();

    let by_room = desk
        .reservations(&ReservationFilter::default().with_room(first))
        .unwrap();
    assert_eq!(by_room.len(), 1);

    let by_status = desk
        .reservations(&ReservationFilter::default().with_status(ReservationStatus::Cancelled))
        .unwrap();
    assert_eq!(by_status[0].id, cancelled);

    let by_guest = desk
        .reservations(&ReservationFilter::default().with_guest("lovelace"))
        .unwrap();
    assert_eq!(by_guest.len(), 1);
}
