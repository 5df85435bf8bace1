use super::*;

#[test]
fn new_flag_is_mounted() {
    assert!(MountFlag::new().is_mounted());
}

#[test]
fn release_is_seen_by_every_clone() {
    let flag = MountFlag::new();
    let task_copy = flag.clone();
    flag.release();
    assert!(!task_copy.is_mounted());
    task_copy.release();
    assert!(!flag.is_mounted());
}

#[test]
fn only_latest_ticket_is_current() {
    let loads = LoadSequence::new();
    let first = loads.begin();
    assert!(first.is_current());
    let second = loads.begin();
    assert!(!first.is_current());
    assert!(second.is_current());
}

#[test]
fn invalidate_drops_outstanding_ticket() {
    let loads = LoadSequence::new();
    let ticket = loads.begin();
    loads.invalidate();
    assert!(!ticket.is_current());
    assert!(loads.begin().is_current());
}

#[test]
fn unmount_drops_every_ticket() {
    let loads = LoadSequence::new();
    let ticket = loads.begin();
    loads.release();
    assert!(!ticket.is_current());
    assert!(!loads.begin().is_current());
}
