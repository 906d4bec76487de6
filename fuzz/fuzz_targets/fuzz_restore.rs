//! Fuzz target: `AppService::restore` over arbitrary persisted records
//!
//! Splits the input into four byte strings and stores them as the
//! `session`, `ratings`, `users` and `config` records, then restores a
//! fresh service from that store.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - The restored ledger holds at most one fact per (account, pet) pair
//! - Every listing's aggregate is finite; `rating_count` equals its fact
//!   count, or the seeded count when nobody rated it
//! - The discovery cursor stays inside the working set
//!
//! cargo fuzz run fuzz_restore

#![no_main]

use libfuzzer_sys::fuzz_target;
use petmatch::adapters::memory_store::MemoryStore;
use petmatch::app::events::AppEvent;
use petmatch::app::ports::{EventSink, StoragePort};
use petmatch::app::service::AppService;
use petmatch::catalog::PetCatalog;
use petmatch::config::AppConfig;
use petmatch::persistence::{CONFIG_KEY, NAMESPACE, RATINGS_KEY, SESSION_KEY, USERS_KEY};

struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    // Records are separated by 0x00; missing trailing records stay absent.
    let mut store = MemoryStore::new();
    let keys = [SESSION_KEY, RATINGS_KEY, USERS_KEY, CONFIG_KEY];
    for (key, record) in keys.iter().zip(data.split(|b| *b == 0)) {
        let _ = store.write(NAMESPACE, key, record);
    }

    let mut app = AppService::new(AppConfig::default());
    app.restore(&store, &mut NullSink);

    let facts = app.ledger().facts();
    for (i, a) in facts.iter().enumerate() {
        assert!(
            !facts[i + 1..]
                .iter()
                .any(|b| a.account_id == b.account_id && a.pet_id == b.pet_id),
            "duplicate (account, pet) survived restore"
        );
    }

    let seed = PetCatalog::seeded();
    for pet in app.catalog().iter() {
        assert!(pet.rating.is_finite());
        let rated = app.ledger().facts_for(&pet.id).count();
        if rated > 0 {
            assert_eq!(pet.rating_count as usize, rated);
        } else if let Some(base) = seed.get(&pet.id) {
            assert_eq!(pet.rating_count, base.rating_count);
        }
    }

    let view = app.discover_view();
    assert!(view.total == 0 || view.position < view.total);
});
