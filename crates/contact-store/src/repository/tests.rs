//! Repository Integration Tests
//!
//! ContactStore and ContactRepository against real files in a temp dir.

#[cfg(test)]
mod tests {
    use crate::config::{PlaceholderMode, StoreConfig};
    use crate::domain::{Contact, ContactDraft, ContactField};
    use crate::repository::{ContactRepository, ContactStore, Repository, StoreEvent, PLACEHOLDER};
    use std::fs;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    fn setup_test_dir() -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("contacts.xml");
        (dir, path)
    }

    fn loaded_store(path: &PathBuf, mode: PlaceholderMode) -> ContactStore {
        let mut store = ContactStore::new(StoreConfig::new(path).with_placeholder(mode));
        store.load();
        store
    }

    fn drafts(store: &ContactStore) -> Vec<ContactDraft> {
        store.contacts().iter().map(Contact::to_draft).collect()
    }

    #[test]
    fn test_load_well_formed_file() {
        let (_dir, path) = setup_test_dir();
        fs::write(
            &path,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<contacts>\n<contact>\n\t<first_name>A</first_name>\n\t<last_name>B</last_name>\n\t<phone_number>555</phone_number>\n\t<notes>n</notes>\n</contact>\n</contacts>\n",
        )
        .unwrap();

        let store = loaded_store(&path, PlaceholderMode::Normalize);
        assert_eq!(store.len(), 1);
        assert_eq!(drafts(&store), vec![ContactDraft::new("A", "B", "555", "n")]);
    }

    #[test]
    fn test_round_trip_many_contacts() {
        let (_dir, path) = setup_test_dir();
        let mut store = ContactStore::new(StoreConfig::new(&path));
        for i in 0..25 {
            store.add(ContactDraft::new(format!("First{i}"), format!("Last{i}"), format!("555-{i:04}"), "note"));
        }
        store.add(ContactDraft::new("", "No First", "", ""));
        store.save().unwrap();

        let reloaded = loaded_store(&path, PlaceholderMode::Normalize);
        assert_eq!(reloaded.len(), 26);
        assert_eq!(drafts(&reloaded), drafts(&store));
    }

    #[test]
    fn test_legacy_round_trip_distorts_empty_fields() {
        let (_dir, path) = setup_test_dir();
        let mut store = ContactStore::new(StoreConfig::new(&path).with_placeholder(PlaceholderMode::Legacy));
        store.add(ContactDraft::new("A", "", "555", "n"));
        store.save().unwrap();

        let reloaded = loaded_store(&path, PlaceholderMode::Legacy);
        assert_eq!(reloaded.contacts()[0].last_name, PLACEHOLDER);

        // The same file read in normalize mode recovers the empty field
        let normalized = loaded_store(&path, PlaceholderMode::Normalize);
        assert_eq!(normalized.contacts()[0].last_name, "");
    }

    #[test]
    fn test_normalize_round_trip_keeps_dash_values() {
        let (_dir, path) = setup_test_dir();
        let mut store = ContactStore::new(StoreConfig::new(&path));
        store.add(ContactDraft::new("A", PLACEHOLDER, "555", ""));
        store.save().unwrap();

        let reloaded = loaded_store(&path, PlaceholderMode::Normalize);
        assert_eq!(drafts(&reloaded), drafts(&store));
    }

    #[test]
    fn test_add_then_delete_restores_file() {
        let (_dir, path) = setup_test_dir();
        let mut store = ContactStore::new(StoreConfig::new(&path));
        store.add(ContactDraft::new("A", "B", "1", "x"));
        store.add(ContactDraft::new("C", "D", "2", "y"));
        store.save().unwrap();
        let original = fs::read_to_string(&path).unwrap();

        let temp = store.add(ContactDraft::new("E", "F", "3", "z"));
        store.save().unwrap();
        assert_ne!(fs::read_to_string(&path).unwrap(), original);

        store.delete(temp.id);
        store.save().unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_empty_collection_round_trip() {
        let (_dir, path) = setup_test_dir();
        let store = ContactStore::new(StoreConfig::new(&path));
        store.save().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("<contacts placeholder=\"none\">\n</contacts>"));
        assert!(!content.contains("<contact>"));
        assert!(loaded_store(&path, PlaceholderMode::Normalize).is_empty());
    }

    #[test]
    fn test_missing_file_is_not_fatal() {
        let (_dir, path) = setup_test_dir();
        let mut store = ContactStore::new(StoreConfig::new(&path));
        let report = store.load();
        assert_eq!(report.loaded, 0);
        assert!(report.error.as_ref().is_some_and(|e| e.is_not_found_file()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_file_keeps_partial_load() {
        let (_dir, path) = setup_test_dir();
        fs::write(
            &path,
            "<contacts><contact><first_name>Kept</first_name></contact><contact><first_name>Lost</notes></contact></contacts>",
        )
        .unwrap();

        let mut store = ContactStore::new(StoreConfig::new(&path));
        let report = store.load();
        assert_eq!(report.loaded, 1);
        assert!(!report.is_clean());
        assert_eq!(store.contacts()[0].first_name, "Kept");
    }

    #[test]
    fn test_load_publishes_count() {
        let (_dir, path) = setup_test_dir();
        fs::write(&path, "<contacts><contact/><contact/></contacts>").unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut store = ContactStore::new(StoreConfig::new(&path));
        store.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        store.load();
        store.save().unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![StoreEvent::Loaded { count: 2 }, StoreEvent::Saved { count: 2 }]
        );
    }

    #[test]
    fn test_failed_save_keeps_previous_file() {
        let (dir, path) = setup_test_dir();
        let mut store = ContactStore::new(StoreConfig::new(&path));
        store.add(ContactDraft::new("A", "B", "1", ""));
        store.save().unwrap();
        let before = fs::read_to_string(&path).unwrap();

        // A directory squatting on the temp file name makes the write fail
        fs::create_dir(dir.path().join(".contacts.xml.tmp")).unwrap();
        store.add(ContactDraft::new("C", "D", "2", ""));
        assert!(store.save().is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    // ========================
    // ContactRepository
    // ========================

    fn setup_repo(path: &PathBuf) -> ContactRepository {
        ContactRepository::from_store(ContactStore::new(StoreConfig::new(path)))
    }

    #[tokio::test]
    async fn test_create_persists_immediately() {
        let (_dir, path) = setup_test_dir();
        let repo = setup_repo(&path);

        let created = repo
            .create(&Contact::from_draft(0, ContactDraft::new("Ada", "Lovelace", "555", "")))
            .await
            .expect("Failed to create");
        assert_eq!(created.id, 1);

        let on_disk = loaded_store(&path, PlaceholderMode::Normalize);
        assert_eq!(drafts(&on_disk), vec![ContactDraft::new("Ada", "Lovelace", "555", "")]);
    }

    #[tokio::test]
    async fn test_find_and_list() {
        let (_dir, path) = setup_test_dir();
        let repo = setup_repo(&path);

        let a = repo.add(ContactDraft::new("A", "", "", "")).await.unwrap();
        repo.add(ContactDraft::new("B", "", "", "")).await.unwrap();

        assert_eq!(repo.find_by_id(a.id).await.unwrap(), Some(a));
        assert_eq!(repo.find_by_id(42).await.unwrap(), None);
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_cell_edit_rewrites_file() {
        let (_dir, path) = setup_test_dir();
        let repo = setup_repo(&path);
        let contact = repo.add(ContactDraft::new("A", "B", "1", "")).await.unwrap();

        let edited = repo
            .set_field(contact.id, ContactField::Notes, "called back".into())
            .await
            .unwrap();
        assert_eq!(edited.notes, "called back");

        let on_disk = loaded_store(&path, PlaceholderMode::Normalize);
        assert_eq!(on_disk.contacts()[0].notes, "called back");
    }

    #[tokio::test]
    async fn test_update_missing_contact_is_not_found() {
        let (_dir, path) = setup_test_dir();
        let repo = setup_repo(&path);

        let err = repo
            .update(&Contact::from_draft(9, ContactDraft::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::domain::DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_absent_is_noop() {
        let (_dir, path) = setup_test_dir();
        let repo = setup_repo(&path);
        repo.add(ContactDraft::new("A", "", "", "")).await.unwrap();

        repo.delete(77).await.expect("Delete of absent id should succeed");
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_persists() {
        let (_dir, path) = setup_test_dir();
        let repo = setup_repo(&path);
        let a = repo.add(ContactDraft::new("A", "", "", "")).await.unwrap();
        repo.add(ContactDraft::new("B", "", "", "")).await.unwrap();

        repo.delete(a.id).await.unwrap();

        let on_disk = loaded_store(&path, PlaceholderMode::Normalize);
        assert_eq!(on_disk.len(), 1);
        assert_eq!(on_disk.contacts()[0].first_name, "B");
    }
}
