//! Behaviour every backend shares when driven through `RecordStore`, plus the
//! places where the id-uniqueness capability makes them differ.

use roster_backends::{BulkFileBackend, InMemoryBackend, SqliteBackend};
use roster_core::statistics;
use roster_core::{IdUniqueness, PersistenceBackend, RecordStore, Student};
use tempfile::TempDir;

fn seed() -> Vec<Student> {
    vec![
        Student::new("001", "张三", "男", 20, 85.5),
        Student::new("002", "李四", "女", 21, 92.0),
        Student::new("003", "王五", "男", 22, 78.5),
    ]
}

/// One store per backend kind, all empty.
fn stores(dir: &TempDir) -> Vec<RecordStore<Box<dyn PersistenceBackend>>> {
    let backends: Vec<Box<dyn PersistenceBackend>> = vec![
        Box::new(BulkFileBackend::new(dir.path().join("students.json"))),
        Box::new(SqliteBackend::open_default(dir.path().join("students.db")).unwrap()),
        Box::new(InMemoryBackend::new(IdUniqueness::Enforced)),
        Box::new(InMemoryBackend::new(IdUniqueness::Unenforced)),
    ];
    backends.into_iter().map(RecordStore::new).collect()
}

fn by_id(mut roster: Vec<Student>) -> Vec<Student> {
    roster.sort_by(|a, b| a.id.cmp(&b.id));
    roster
}

#[test]
fn crud_behaves_the_same_everywhere() {
    let dir = tempfile::tempdir().unwrap();
    for store in stores(&dir) {
        let name = store.backend().name().to_string();
        for student in seed() {
            assert!(store.add(student), "{name}");
        }
        assert_eq!(by_id(store.get_all()), seed(), "{name}");

        assert!(store.update("003", Student::new("003", "Amy Lee", "女", 20, 95.0)));
        let amy = store.get_by_id("003").unwrap();
        assert_eq!(amy.id, "003", "{name}");
        assert_eq!(amy.name.as_deref(), Some("Amy Lee"), "{name}");
        assert_eq!(amy.score, 95.0, "{name}");

        assert!(store.remove_by_id("002"), "{name}");
        assert!(!store.remove_by_id("404"), "{name}");
        assert_eq!(store.count(), 2, "{name}");
        assert!(store.get_by_id("002").is_none(), "{name}");
    }
}

#[test]
fn get_all_is_a_defensive_copy() {
    let dir = tempfile::tempdir().unwrap();
    for store in stores(&dir) {
        store.replace_all(&seed());
        let mut snapshot = store.get_all();
        snapshot[0].score = -1.0;
        snapshot.pop();
        assert_eq!(by_id(store.get_all()), seed(), "{}", store.backend().name());
    }
}

#[test]
fn statistics_agree_across_backends() {
    let dir = tempfile::tempdir().unwrap();
    let expected = statistics::summary(&seed());
    for store in stores(&dir) {
        store.replace_all(&seed());
        assert_eq!(statistics::summary(&store.get_all()), expected);
    }
}

#[test]
fn add_with_existing_id_depends_on_capability() {
    let dir = tempfile::tempdir().unwrap();
    for store in stores(&dir) {
        store.replace_all(&seed());
        store.add(Student::new("001", "张三", "男", 20, 50.0));

        let matches = store.get_all().into_iter().filter(|s| s.id == "001").count();
        match store.backend().id_uniqueness() {
            IdUniqueness::Enforced => {
                assert_eq!(matches, 1);
                assert_eq!(store.get_by_id("001").unwrap().score, 50.0);
            }
            IdUniqueness::Unenforced => {
                assert_eq!(matches, 2);
                // First match wins on lookup.
                assert_eq!(store.get_by_id("001").unwrap().score, 85.5);
                assert!(store.remove_by_id("001"));
                assert!(store.get_by_id("001").is_none());
            }
        }
    }
}

#[test]
fn text_roundtrip_preserves_records() {
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("roster.csv");
    for store in stores(&dir) {
        store.replace_all(&seed());
        assert!(store.export_to_text(&export));
        store.replace_all(&[]);

        let outcome = store.import_from_text(&export, false).unwrap();
        assert_eq!(outcome.skipped(), 0);
        assert_eq!(outcome.stored, 3);
        assert_eq!(by_id(store.get_all()), seed(), "{}", store.backend().name());
    }
}

#[test]
fn outage_degrades_to_empty_and_false() {
    let store = RecordStore::new(InMemoryBackend::with_roster(IdUniqueness::Enforced, seed()));
    store.backend().set_unavailable(true);

    assert!(store.get_all().is_empty());
    assert!(store.get_by_id("001").is_none());
    assert!(!store.add(Student::new("004", "赵六", "女", 19, 66.0)));
    assert!(!store.update("001", Student::new("001", "x", "男", 1, 1.0)));
    assert!(!store.remove_by_id("001"));
    assert!(!store.replace_all(&[]));

    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("out.csv");
    assert!(store.export_to_text(&export));
    assert_eq!(
        std::fs::read_to_string(&export).unwrap(),
        "id,name,gender,age,score\n"
    );

    store.backend().set_unavailable(false);
    assert_eq!(store.count(), 3);
}

#[test]
fn import_during_outage_reports_nothing_stored() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("incoming.csv");
    std::fs::write(
        &csv,
        "id,name,gender,age,score\n010,A,女,20,90.00\n011,B,男,21,80.00\n",
    )
    .unwrap();

    let existing = vec![Student::new("009", "赵六", "女", 19, 66.0)];
    let store = RecordStore::new(InMemoryBackend::with_roster(IdUniqueness::Enforced, existing));
    store.backend().set_unavailable(true);

    for append in [false, true] {
        let outcome = store.import_from_text(&csv, append).unwrap();
        assert_eq!(outcome.students.len(), 2);
        assert_eq!(outcome.stored, 0, "append={append}");
    }

    store.backend().set_unavailable(false);
    let ids: Vec<String> = store.get_all().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["009"]);

    let outcome = store.import_from_text(&csv, true).unwrap();
    assert_eq!(outcome.stored, 2);
    assert_eq!(store.count(), 3);
}

#[test]
fn unreadable_bulk_file_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.json");
    std::fs::write(&path, "{ not a roster").unwrap();

    let store = RecordStore::new(BulkFileBackend::new(&path));
    assert!(store.get_all().is_empty());
    assert!(!store.remove_by_id("001"));
}

#[test]
fn sqlite_data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("students.db");
    {
        let store = RecordStore::new(SqliteBackend::open_default(&db).unwrap());
        store.replace_all(&seed());
    }
    let store = RecordStore::new(SqliteBackend::open_default(&db).unwrap());
    assert_eq!(store.get_all(), seed());
}
