//! Restore after restart, corrupt records and failing storage.

use petmatch::adapters::clock::ManualClock;
use petmatch::adapters::file_store::FileStore;
use petmatch::app::commands::Intent;
use petmatch::app::events::AppEvent;
use petmatch::app::ports::{ConfigError, ConfigPort, StoragePort};
use petmatch::app::service::AppService;
use petmatch::config::AppConfig;
use petmatch::model::{AuthProvider, Stars};
use petmatch::persistence::{self, CONFIG_KEY, RATINGS_KEY, SESSION_KEY, USERS_KEY};
use tempfile::TempDir;

use super::mock_ports::{Harness, MockStore, RecordingSink};

fn rate(h: &mut Harness, pet: &str, n: u8) {
    h.send(Intent::Rate {
        pet_id: pet.into(),
        stars: Stars::new(n).unwrap(),
    })
    .unwrap();
}

#[test]
fn restart_restores_session_and_ratings() {
    let mut h = Harness::new();
    h.sign_up("alex@pets.io");
    let id = h.app.current_account().unwrap().id.clone();
    rate(&mut h, "pet1", 5);
    rate(&mut h, "pet2", 1);

    let h = h.restart();
    assert_eq!(h.app.current_account().map(|a| a.id.as_str()), Some(id.as_str()));
    assert_eq!(h.app.ledger().len(), 2);
    assert_eq!(h.app.catalog().get("pet1").unwrap().rating_count, 1);
    assert_eq!(h.app.catalog().get("pet2").unwrap().rating_count, 1);
    assert!((h.app.catalog().get("pet2").unwrap().rating - 1.0).abs() < 1e-9);

    // Rated pets stay out of the working set.
    let view = h.app.discover_view();
    assert_eq!(view.total, 4);
    assert_eq!(view.current.map(|p| p.id).as_deref(), Some("pet3"));
    assert_eq!(
        h.sink.events.first(),
        Some(&AppEvent::Restored {
            signed_in: true,
            ratings: 2,
        })
    );
}

#[test]
fn restart_keeps_registered_users_after_logout() {
    let mut h = Harness::new();
    h.sign_up("alex@pets.io");
    h.send(Intent::Logout).unwrap();

    let mut h = h.restart();
    assert!(!h.app.is_authenticated());
    assert_eq!(h.app.users().len(), 1);

    h.send(Intent::Login {
        email: "alex@pets.io".into(),
        password: "hunter22".into(),
    })
    .unwrap();
    assert!(h.settle_auth().unwrap());
}

#[test]
fn radius_survives_restart() {
    let mut h = Harness::new();
    h.sign_up("alex@pets.io");
    h.send(Intent::SetRadius(120)).unwrap();

    let h = h.restart();
    assert_eq!(h.app.discover_view().radius_km, 120);
    assert_eq!(h.app.users().users()[0].account.discovery_radius_km, 120);
}

#[test]
fn corrupt_records_fall_back_to_defaults() {
    let mut store = MockStore::new();
    store.put(SESSION_KEY, b"{not json");
    store.put(RATINGS_KEY, b"garbage");
    store.put(USERS_KEY, b"[1, 2, 3]");
    store.put(CONFIG_KEY, b"\xff\xfe");

    let h = Harness::with_store(store);
    assert!(!h.app.is_authenticated());
    assert!(h.app.ledger().is_empty());
    assert!(h.app.users().is_empty());
    assert_eq!(h.app.config(), &AppConfig::default());
    assert_eq!(h.app.discover_view().total, 6);
}

#[test]
fn out_of_range_stars_invalidate_ratings_record() {
    let mut store = MockStore::new();
    store.put(
        RATINGS_KEY,
        br#"[{"accountId":"u","petId":"pet1","stars":9,"timestamp":"2024-01-01T00:00:00Z"}]"#,
    );
    let h = Harness::with_store(store);
    assert!(h.app.ledger().is_empty());
    assert_eq!(h.app.catalog().get("pet1").unwrap().rating_count, 24);
}

#[test]
fn legacy_user_id_field_is_accepted() {
    let mut store = MockStore::new();
    store.put(
        RATINGS_KEY,
        br#"[{"userId":"u","petId":"pet4","stars":3,"timestamp":"2024-01-01T00:00:00Z"}]"#,
    );
    let h = Harness::with_store(store);
    assert_eq!(h.app.ledger().len(), 1);
    assert_eq!(h.app.catalog().get("pet4").unwrap().rating_count, 1);
}

#[test]
fn logout_keeps_ratings_of_accounts_without_a_session() {
    let mut store = MockStore::new();
    store.put(
        RATINGS_KEY,
        br#"[{"accountId":"gone","petId":"pet2","stars":2,"timestamp":"2024-01-01T00:00:00Z"}]"#,
    );
    let mut h = Harness::with_store(store);
    assert!(!h.app.is_authenticated());
    assert_eq!(h.app.ledger().len(), 1);

    h.send(Intent::SocialAuth(AuthProvider::Google)).unwrap();
    assert!(h.settle_auth().unwrap());
    rate(&mut h, "pet1", 5);
    h.send(Intent::Logout).unwrap();

    assert_eq!(h.app.ledger().len(), 1);
    assert_eq!(persistence::load_ratings(&h.store).as_slice(), h.app.ledger().facts());
    assert!(h.store.raw(SESSION_KEY).is_none());

    let whiskers = h.app.catalog().get("pet2").cloned().unwrap();
    let h = h.restart();
    assert_eq!(h.app.ledger().len(), 1);
    assert_eq!(h.app.catalog().get("pet2"), Some(&whiskers));
    assert_eq!(whiskers.rating_count, 1);
    assert_eq!(h.app.catalog().get("pet1").unwrap().rating_count, 24);
}

#[test]
fn stored_config_is_applied_on_restore() {
    let mut store = MockStore::new();
    store.put(CONFIG_KEY, br#"{"auth_latency_ms": 10, "top_picks_limit": 2}"#);

    let h = Harness::with_store(store);
    assert_eq!(h.app.config().auth_latency_ms, 10);
    assert_eq!(h.app.config().max_radius_km, 200);
    assert_eq!(h.app.top_picks_view().top_rated.len(), 2);
}

#[test]
fn invalid_stored_config_is_ignored() {
    let mut store = MockStore::new();
    store.put(CONFIG_KEY, br#"{"min_radius_km": 300}"#);
    assert!(matches!(
        store.load(),
        Err(ConfigError::ValidationFailed(_))
    ));

    let h = Harness::with_store(store);
    assert_eq!(h.app.config(), &AppConfig::default());
}

#[test]
fn update_config_validates_before_writing() {
    let mut h = Harness::new();
    let bad = AppConfig {
        radius_step_km: 0,
        ..AppConfig::default()
    };
    assert!(h.app.update_config(bad, &mut h.store).is_err());
    assert!(h.store.raw(CONFIG_KEY).is_none());

    let good = AppConfig {
        radius_step_km: 25,
        ..AppConfig::default()
    };
    h.app.update_config(good.clone(), &mut h.store).unwrap();
    assert_eq!(h.app.config(), &good);

    let h = h.restart();
    assert_eq!(h.app.config().radius_step_km, 25);
}

#[test]
fn failed_writes_are_not_fatal() {
    let mut store = MockStore::new();
    store.fail_writes = true;
    let mut h = Harness::with_store(store);

    h.sign_up("alex@pets.io");
    rate(&mut h, "pet1", 4);
    h.send(Intent::SetRadius(80)).unwrap();

    assert!(h.app.is_authenticated());
    assert_eq!(h.app.ledger().len(), 1);
    assert_eq!(h.app.discover_view().radius_km, 80);
    assert!(h.store.writes_to(USERS_KEY) >= 1);
    assert!(h.store.raw(SESSION_KEY).is_none());
    assert!(h.store.raw(RATINGS_KEY).is_none());
}

#[test]
fn social_session_is_persisted_without_user_record() {
    let mut h = Harness::new();
    h.send(Intent::SocialAuth(AuthProvider::Facebook)).unwrap();
    assert!(h.settle_auth().unwrap());

    let account = persistence::load_session(&h.store).unwrap();
    assert_eq!(account.provider, AuthProvider::Facebook);
    assert_eq!(account.email, "jane@facebook.com");
    assert!(account.id.starts_with("facebook_"));
    assert!(h.store.raw(USERS_KEY).is_none());
}

#[test]
fn file_store_round_trip_across_restart() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::default();
    let mut sink = RecordingSink::new();

    let account_id = {
        let mut store = FileStore::new(dir.path());
        let mut app = AppService::new(AppConfig::default());
        app.restore(&store, &mut sink);
        app.social_auth(AuthProvider::Google, &clock, &mut sink)
            .unwrap();
        clock.advance_ms(1_500);
        assert!(app.poll_pending_auth(&mut store, &clock, &mut sink).unwrap());
        app.rate("pet3", Stars::new(2).unwrap(), &mut store, &clock, &mut sink)
            .unwrap();
        app.current_account().unwrap().id.clone()
    };

    let store = FileStore::new(dir.path());
    assert!(store.exists(persistence::NAMESPACE, SESSION_KEY));
    assert!(store.exists(persistence::NAMESPACE, RATINGS_KEY));

    let mut app = AppService::new(AppConfig::default());
    app.restore(&store, &mut sink);
    assert_eq!(app.current_account().unwrap().id, account_id);
    assert_eq!(app.current_account().unwrap().name, "John Doe");
    let rocky = app.catalog().get("pet3").unwrap();
    assert_eq!(rocky.rating_count, 1);
    assert!((rocky.rating - 2.0).abs() < 1e-9);
}
