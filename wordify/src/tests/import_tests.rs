use wordlist::Record;

use crate::settings::AppState;
use crate::storage::{Storage, StorageError};

async fn memory_storage() -> Storage {
    Storage::connect("sqlite::memory:")
        .await
        .expect("in-memory storage")
}

fn record(word: &str) -> Record {
    Record {
        word: word.to_owned(),
        audio: format!("https://audio.example/{word}.mp3"),
        phonetic: format!("/{word}/"),
        definition: format!("definition of {word}"),
        word_type: "noun".to_owned(),
        category: "C2".to_owned(),
        example: format!("A sentence using {word}."),
    }
}

#[tokio::test]
async fn import_links_words_to_one_category() {
    let storage = memory_storage().await;
    let records = [record("aberration"), record("ascertain"), record("ebullient")];

    let outcome = storage.import_batch(&records, "C2").await.unwrap();
    assert_eq!(outcome.words_inserted, 3);

    let categories = storage.categories().await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].label, "C2");
    assert_eq!(categories[0].uid, outcome.category_uid);

    let words = storage.words_in_category(outcome.category_uid).await.unwrap();
    let texts: Vec<&str> = words.iter().map(|word| word.word.as_str()).collect();
    assert_eq!(texts, ["aberration", "ascertain", "ebullient"]);
    for word in &words {
        assert_eq!(word.category_uid, outcome.category_uid);
        assert!(!word.is_favorite);
    }
}

#[tokio::test]
async fn reimport_reuses_category_but_duplicates_words() {
    let storage = memory_storage().await;
    let records = [record("aberration"), record("ascertain")];

    let first = storage.import_batch(&records, "C2").await.unwrap();
    let second = storage.import_batch(&records, "C2").await.unwrap();
    assert_eq!(first.category_uid, second.category_uid);

    assert_eq!(storage.categories().await.unwrap().len(), 1);
    let words = storage.words_in_category(first.category_uid).await.unwrap();
    assert_eq!(words.len(), 4);
}

#[tokio::test]
async fn find_or_create_returns_the_existing_category() {
    let storage = memory_storage().await;
    let created = storage.find_or_create_category("B2").await.unwrap();
    let found = storage.find_or_create_category("B2").await.unwrap();
    assert_eq!(created.uid, found.uid);

    // labels are case sensitive
    let other = storage.find_or_create_category("b2").await.unwrap();
    assert_ne!(created.uid, other.uid);
}

#[tokio::test]
async fn empty_batch_creates_only_the_category() {
    let storage = memory_storage().await;
    let outcome = storage.import_batch(&[], "C1").await.unwrap();
    assert_eq!(outcome.words_inserted, 0);
    assert_eq!(storage.categories().await.unwrap().len(), 1);
    assert!(storage
        .words_in_category(outcome.category_uid)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn toggle_favorite_round_trips() {
    let storage = memory_storage().await;
    let outcome = storage.import_batch(&[record("aberration")], "C2").await.unwrap();
    let words = storage.words_in_category(outcome.category_uid).await.unwrap();
    let word = &words[0];

    assert!(storage.toggle_favorite(word.uid).await.unwrap());
    assert!(!storage.toggle_favorite(word.uid).await.unwrap());

    let word = storage.word_by_text("aberration").await.unwrap().unwrap();
    assert!(!word.is_favorite);
}

#[tokio::test]
async fn toggling_an_unknown_word_is_an_error() {
    let storage = memory_storage().await;
    assert!(matches!(
        storage.toggle_favorite(42).await,
        Err(StorageError::UnknownWord(42))
    ));
}

#[tokio::test]
async fn favorites_and_category_queries_end_to_end() {
    let storage = memory_storage().await;
    let records = [record("aberration"), record("ascertain"), record("ebullient")];
    let outcome = storage.import_batch(&records, "C2").await.unwrap();

    let words = storage.words_in_category(outcome.category_uid).await.unwrap();
    storage.toggle_favorite(words[1].uid).await.unwrap();

    let favorites = storage.favorite_words().await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].word, "ascertain");

    assert_eq!(
        storage
            .words_in_category(outcome.category_uid)
            .await
            .unwrap()
            .len(),
        3
    );
}

#[tokio::test]
async fn word_lookup_prefers_the_oldest_entry() {
    let storage = memory_storage().await;
    storage.import_batch(&[record("aberration")], "C2").await.unwrap();
    storage.import_batch(&[record("aberration")], "C1").await.unwrap();

    let entry = storage.word_by_text("aberration").await.unwrap().unwrap();
    let first_category = storage.category_by_label("C2").await.unwrap().unwrap();
    assert_eq!(entry.category_uid, first_category.uid);
}

#[tokio::test]
async fn app_state_defaults_and_round_trip() {
    let storage = memory_storage().await;

    let state = AppState::load(&storage).await.unwrap();
    assert_eq!(state, AppState::default());
    assert!(!state.first_launch_done);
    assert_eq!(state.streak, 0);
    assert_eq!(state.last_scroll_index, 0);
    assert!(state.last_login.is_empty());

    let updated = AppState {
        first_launch_done: true,
        streak: 7,
        last_scroll_index: 12,
        last_login: "2025-01-10".to_owned(),
    };
    updated.save(&storage).await.unwrap();
    assert_eq!(AppState::load(&storage).await.unwrap(), updated);
}

#[tokio::test]
async fn sampling_excludes_the_named_words() {
    let storage = memory_storage().await;
    let records = [record("aberration"), record("ascertain"), record("ebullient")];
    storage.import_batch(&records, "C2").await.unwrap();

    let rest = storage
        .find_words_excluding(&["ascertain"], 10)
        .await
        .unwrap();
    assert_eq!(rest.len(), 2);
    assert!(rest.iter().all(|word| word.word != "ascertain"));
}
