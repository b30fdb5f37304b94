//! Concurrent first requests must build exactly one instance per key.

use language_factory::{LanguageFactory, LanguageResource, Settings, Stemmer, StemmerRegistry};
use std::sync::Arc;
use std::sync::Barrier;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

const THREADS: usize = 16;

static SLOW_BUILDS: AtomicUsize = AtomicUsize::new(0);

/// Resource whose construction is slow enough for threads to overlap.
struct SlowLanguage {
    identifier: String,
}

impl LanguageResource for SlowLanguage {
    fn create(identifier: &str, _debug: bool) -> Self {
        SLOW_BUILDS.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        Self {
            identifier: identifier.to_string(),
        }
    }
}

static MIXED_BUILDS: AtomicUsize = AtomicUsize::new(0);

struct CountedLanguage;

impl LanguageResource for CountedLanguage {
    fn create(_identifier: &str, _debug: bool) -> Self {
        MIXED_BUILDS.fetch_add(1, Ordering::SeqCst);
        Self
    }
}

static STEMMER_BUILDS: AtomicUsize = AtomicUsize::new(0);

struct CountedStemmer;

impl Stemmer for CountedStemmer {
    fn stem(&self, token: &str, _lang: &str) -> String {
        token.to_string()
    }
}

fn counted_stemmer() -> Box<dyn Stemmer> {
    STEMMER_BUILDS.fetch_add(1, Ordering::SeqCst);
    thread::sleep(Duration::from_millis(20));
    Box::new(CountedStemmer)
}

#[test]
fn test_concurrent_language_miss_builds_once() {
    let factory: LanguageFactory<SlowLanguage> =
        LanguageFactory::with_registry(&Settings::default(), StemmerRegistry::new());
    let barrier = Barrier::new(THREADS);

    let results: Vec<Arc<SlowLanguage>> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let factory = &factory;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    factory.get_language(Some("de-DE"), None, false)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(SLOW_BUILDS.load(Ordering::SeqCst), 1);
    let first = &results[0];
    assert_eq!(first.identifier, "de-DE");
    assert!(results.iter().all(|r| Arc::ptr_eq(first, r)));
}

#[test]
fn test_concurrent_mixed_languages_build_once_each() {
    let languages = ["en-GB", "fr-FR", "de-DE", "ja-JP"];
    let factory: LanguageFactory<CountedLanguage> =
        LanguageFactory::with_registry(&Settings::default(), StemmerRegistry::new());

    thread::scope(|s| {
        for i in 0..THREADS {
            let factory = &factory;
            s.spawn(move || {
                for round in 0..50 {
                    let id = languages[(i + round) % languages.len()];
                    factory.get_language(Some(id), None, round % 2 == 0);
                }
            });
        }
    });

    assert_eq!(MIXED_BUILDS.load(Ordering::SeqCst), languages.len());
    assert_eq!(factory.loaded_languages(), vec!["de-DE", "en-GB", "fr-FR", "ja-JP"]);
}

#[test]
fn test_concurrent_stemmer_miss_builds_once() {
    let factory = LanguageFactory::new();
    factory.register_stemmer("porter", counted_stemmer);
    let barrier = Barrier::new(THREADS);

    let results: Vec<Arc<dyn Stemmer>> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let factory = &factory;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    // Alternate spellings that resolve to the same class
                    let adapter = if i % 2 == 0 { "porter" } else { "  porter\t" };
                    factory.get_stemmer(adapter).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(STEMMER_BUILDS.load(Ordering::SeqCst), 1);
    assert!(results.iter().all(|r| Arc::ptr_eq(&results[0], r)));
}

#[test]
fn test_shared_factory_across_threads_via_arc() {
    let factory = Arc::new(LanguageFactory::new());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let factory = Arc::clone(&factory);
            thread::spawn(move || factory.get_language(Some("pl-PL"), None, false))
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.iter().all(|r| Arc::ptr_eq(&results[0], r)));
    assert_eq!(results[0].identifier(), "pl-PL");
}
