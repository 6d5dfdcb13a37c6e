//! Tests for the in-memory library database through the `Db` trait

use shoebox_core::{Db, FileImportInfo, LibraryError};
use shoebox_storage::MemoryDb;

#[test]
fn test_new_db_is_empty_and_synced() {
    let db = MemoryDb::new();

    assert!(db.sync());
    assert!(db.photos.is_empty());
    assert!(db.tags.is_empty());
    assert!(db.rolls.is_empty());
}

#[test]
fn test_sync_flag_round_trips() {
    let mut db = MemoryDb::new();
    db.set_sync(false);
    assert!(!db.sync());
    db.set_sync(true);
    assert!(db.sync());
}

#[test]
fn test_photos_are_grouped_by_roll() {
    let mut db = MemoryDb::new();
    let first = db.rolls().create().unwrap();
    let second = db.rolls().create().unwrap();
    assert_ne!(first.id, second.id);

    db.photos()
        .create_from(&FileImportInfo::single("/card/a.jpg"), first.id, None)
        .unwrap();
    db.photos()
        .create_from(&FileImportInfo::single("/card/b.jpg"), first.id, None)
        .unwrap();
    db.photos()
        .create_from(&FileImportInfo::single("/card/c.jpg"), second.id, None)
        .unwrap();

    assert_eq!(db.photos.in_roll(first.id).len(), 2);
    assert_eq!(db.photos.in_roll(second.id).len(), 1);
}

#[test]
fn test_removed_roll_is_gone() {
    let mut db = MemoryDb::new();
    let roll = db.rolls().create().unwrap();

    db.rolls().remove(roll.id).unwrap();

    assert!(db.rolls().get(roll.id).unwrap().is_none());
    assert!(matches!(
        db.rolls().remove(roll.id),
        Err(LibraryError::NotFound { .. })
    ));
}

#[test]
fn test_tag_lookup_by_name() {
    let mut db = MemoryDb::new();
    let root = db.tags().root_category();
    let people = db.tags().create_category(root, "People").unwrap();
    db.tags().create_tag(people.id, "Alice").unwrap();

    let found = db.tags().get_tag_by_name("Alice").unwrap().unwrap();
    assert_eq!(found.category, Some(people.id));
    assert!(!found.is_category);
    assert!(db.tags().get_tag_by_name("Bob").unwrap().is_none());
}
