//! Registration, sign-in, social auth, the pending slot and logout.

use petmatch::app::commands::Intent;
use petmatch::app::events::AppEvent;
use petmatch::error::{AuthError, Error, Field};
use petmatch::model::{AuthProvider, Stars};
use petmatch::persistence::{RATINGS_KEY, SESSION_KEY, USERS_KEY};

use super::mock_ports::{Harness, StoreCall};

#[test]
fn register_persists_users_and_session() {
    let mut h = Harness::new();
    h.sign_up("alex@pets.io");

    let account = h.app.current_account().expect("signed in");
    assert_eq!(account.email, "alex@pets.io");
    assert_eq!(account.provider, AuthProvider::Email);
    assert_eq!(account.discovery_radius_km, 50);
    assert_eq!(account.location.city, "Los Angeles");
    assert!(account.id.starts_with("user_"));

    assert_eq!(h.store.writes_to(USERS_KEY), 1);
    assert!(h.store.raw(SESSION_KEY).is_some());
    assert_eq!(h.app.users().len(), 1);
}

#[test]
fn nothing_happens_before_latency_elapses() {
    let mut h = Harness::new();
    h.send(Intent::Register(Harness::registration("a@b.io"))).unwrap();
    assert!(h.app.is_loading());

    h.clock.advance_ms(999);
    let resolved = h
        .app
        .poll_pending_auth(&mut h.store, &h.clock, &mut h.sink)
        .unwrap();
    assert!(!resolved);
    assert!(!h.app.is_authenticated());

    h.clock.advance_ms(1);
    assert!(h
        .app
        .poll_pending_auth(&mut h.store, &h.clock, &mut h.sink)
        .unwrap());
    assert!(h.app.is_authenticated());
}

#[test]
fn duplicate_email_fails_and_leaves_store_unchanged() {
    let mut h = Harness::new();
    h.sign_up("alex@pets.io");
    h.send(Intent::Logout).unwrap();
    let before = h.app.users().users().to_vec();
    let writes = h.store.writes_to(USERS_KEY);

    let err = h
        .send(Intent::Register(Harness::registration("alex@pets.io")))
        .unwrap_err();
    assert_eq!(err, Error::Auth(AuthError::DuplicateEmail));
    assert!(!h.app.is_loading());
    assert_eq!(h.app.users().users(), before.as_slice());
    assert_eq!(h.store.writes_to(USERS_KEY), writes);
}

#[test]
fn login_with_registered_credentials() {
    let mut h = Harness::new();
    h.sign_up("alex@pets.io");
    let id = h.app.current_account().unwrap().id.clone();
    h.send(Intent::Logout).unwrap();

    h.send(Intent::Login {
        email: "alex@pets.io".into(),
        password: "hunter22".into(),
    })
    .unwrap();
    assert!(h.settle_auth().unwrap());
    assert_eq!(h.app.current_account().unwrap().id, id);
}

#[test]
fn wrong_password_reports_invalid_credentials() {
    let mut h = Harness::new();
    h.sign_up("alex@pets.io");
    h.send(Intent::Logout).unwrap();

    h.send(Intent::Login {
        email: "alex@pets.io".into(),
        password: "nope".into(),
    })
    .unwrap();
    let err = h.settle_auth().unwrap_err();
    assert_eq!(err, Error::Auth(AuthError::InvalidCredentials));
    assert!(!h.app.is_authenticated());
    assert!(matches!(
        h.sink.last(),
        Some(AppEvent::AuthFailed(AuthError::InvalidCredentials))
    ));
}

#[test]
fn login_form_requires_both_fields() {
    let mut h = Harness::new();
    let err = h
        .send(Intent::Login {
            email: String::new(),
            password: String::new(),
        })
        .unwrap_err();
    match err {
        Error::Validation(v) => {
            assert_eq!(v.message_for(Field::Email), Some("Email and password are required"));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(!h.app.is_loading());
}

#[test]
fn short_password_is_rejected_at_registration() {
    let mut h = Harness::new();
    let mut reg = Harness::registration("a@b.io");
    reg.password = "12345".into();
    assert!(matches!(
        h.send(Intent::Register(reg)),
        Err(Error::Validation(_))
    ));
}

#[test]
fn second_trigger_while_pending_is_refused() {
    let mut h = Harness::new();
    h.send(Intent::SocialAuth(AuthProvider::Google)).unwrap();
    let err = h
        .send(Intent::Register(Harness::registration("a@b.io")))
        .unwrap_err();
    assert_eq!(err, Error::Auth(AuthError::Busy));

    assert!(h.settle_auth().unwrap());
    let account = h.app.current_account().unwrap();
    assert_eq!(account.name, "John Doe");
    assert!(h.app.users().is_empty());
}

#[test]
fn cancelled_auth_never_resolves() {
    let mut h = Harness::new();
    h.send(Intent::SocialAuth(AuthProvider::Facebook)).unwrap();
    h.send(Intent::CancelPendingAuth).unwrap();
    assert!(h.sink.count(|e| matches!(e, AppEvent::AuthCancelled)) == 1);
    assert!(!h.settle_auth().unwrap());
    assert!(!h.app.is_authenticated());
}

#[test]
fn logout_purges_ratings_and_records() {
    let mut h = Harness::new();
    h.sign_up("alex@pets.io");
    h.send(Intent::Rate {
        pet_id: "pet1".into(),
        stars: Stars::new(1).unwrap(),
    })
    .unwrap();
    assert_eq!(h.app.catalog().get("pet1").unwrap().rating_count, 1);

    h.send(Intent::Logout).unwrap();
    assert!(!h.app.is_authenticated());
    assert!(h.app.ledger().is_empty());
    let luna = h.app.catalog().get("pet1").unwrap();
    assert_eq!(luna.rating_count, 24);
    assert!((luna.rating - 4.8).abs() < 1e-9);

    assert!(h.store.calls.contains(&StoreCall::Delete(SESSION_KEY.into())));
    assert!(h.store.calls.contains(&StoreCall::Delete(RATINGS_KEY.into())));
    assert!(h.store.raw(USERS_KEY).is_some());
    assert!(h.sink.events.iter().any(|e| matches!(
        e,
        AppEvent::SignedOut { purged_ratings: 1, .. }
    )));
}

#[test]
fn signed_out_intents_are_refused() {
    let mut h = Harness::new();
    for intent in [
        Intent::Logout,
        Intent::IncreaseRadius,
        Intent::FocusPet("pet1".into()),
        Intent::Rate {
            pet_id: "pet1".into(),
            stars: Stars::new(5).unwrap(),
        },
    ] {
        assert_eq!(
            h.send(intent),
            Err(Error::Auth(AuthError::NotAuthenticated))
        );
    }
    assert!(h.app.ledger().is_empty());
}
