//! Discovery end to end: filters, rating, exhaustion, radius and focus.

use petmatch::app::commands::Intent;
use petmatch::app::events::AppEvent;
use petmatch::discovery::DiscoveryState;
use petmatch::error::Error;
use petmatch::filter::{Category, FilterSelection};
use petmatch::model::{PetType, Purpose, Stars};
use petmatch::persistence::USERS_KEY;

use super::mock_ports::Harness;

fn stars(n: u8) -> Stars {
    Stars::new(n).unwrap()
}

fn rate(h: &mut Harness, pet: &str, n: u8) {
    h.send(Intent::Rate {
        pet_id: pet.into(),
        stars: stars(n),
    })
    .unwrap();
}

fn current_id(h: &Harness) -> Option<String> {
    h.app.discover_view().current.map(|p| p.id)
}

fn signed_in_with_dogs() -> Harness {
    let mut h = Harness::new();
    h.sign_up("dogs@pets.io");
    h.send(Intent::SetFilter(FilterSelection::pet_type(PetType::Dog)))
        .unwrap();
    h.sink.clear();
    h
}

#[test]
fn dog_filter_starts_at_luna() {
    let h = signed_in_with_dogs();
    let view = h.app.discover_view();
    assert_eq!(view.state, DiscoveryState::Browsing);
    assert_eq!(view.current.as_ref().map(|p| p.name.as_str()), Some("Luna"));
    assert_eq!(view.position, 0);
    assert_eq!(view.total, 3);
    assert!(view.can_rate);
    assert_eq!(view.my_rating, None);
}

#[test]
fn rating_luna_updates_aggregate_and_moves_to_rocky() {
    let mut h = signed_in_with_dogs();
    rate(&mut h, "pet1", 5);

    let luna = h.app.catalog().get("pet1").unwrap();
    assert_eq!(luna.rating_count, 1);
    assert!((luna.rating - 5.0).abs() < 1e-9);
    assert!(h.sink.events.iter().any(|e| matches!(
        e,
        AppEvent::Rated { pet_id, rating_count: 1, .. } if pet_id == "pet1"
    )));

    assert_eq!(current_id(&h).as_deref(), Some("pet3"));
    assert_eq!(h.app.discover_view().total, 2);
}

#[test]
fn second_rating_of_same_pet_is_ignored() {
    let mut h = signed_in_with_dogs();
    rate(&mut h, "pet1", 5);
    rate(&mut h, "pet1", 1);

    assert_eq!(h.app.ledger().len(), 1);
    let luna = h.app.catalog().get("pet1").unwrap();
    assert_eq!(luna.rating_count, 1);
    assert!((luna.rating - 5.0).abs() < 1e-9);
    assert!(matches!(
        h.sink.last(),
        Some(AppEvent::RatingIgnored { pet_id }) if pet_id == "pet1"
    ));
}

#[test]
fn unknown_pet_cannot_be_rated() {
    let mut h = signed_in_with_dogs();
    let err = h
        .send(Intent::Rate {
            pet_id: "ghost".into(),
            stars: stars(3),
        })
        .unwrap_err();
    assert_eq!(err, Error::UnknownPet("ghost".into()));
    assert!(h.app.ledger().is_empty());
}

#[test]
fn rating_every_dog_exhausts_then_radius_widens() {
    let mut h = signed_in_with_dogs();
    for pet in ["pet1", "pet3", "pet6"] {
        rate(&mut h, pet, 4);
    }

    let view = h.app.discover_view();
    assert!(view.is_exhausted());
    assert!(view.current.is_none());
    assert_eq!(view.radius_km, 50);
    assert!(view.can_increase_radius);
    assert!(h.sink.events.contains(&AppEvent::DiscoveryChanged {
        from: DiscoveryState::Browsing,
        to: DiscoveryState::Exhausted,
    }));

    let user_writes = h.store.writes_to(USERS_KEY);
    h.send(Intent::IncreaseRadius).unwrap();
    let view = h.app.discover_view();
    assert_eq!(view.radius_km, 100);
    assert_eq!(view.position, 0);
    assert!(view.is_exhausted());
    assert_eq!(h.app.current_account().unwrap().discovery_radius_km, 100);
    assert_eq!(h.store.writes_to(USERS_KEY), user_writes + 1);
    assert!(h.sink.events.contains(&AppEvent::RadiusChanged { radius_km: 100 }));
}

#[test]
fn increase_radius_stops_at_cap() {
    let mut h = signed_in_with_dogs();
    for _ in 0..5 {
        h.send(Intent::IncreaseRadius).unwrap();
    }
    let view = h.app.discover_view();
    assert_eq!(view.radius_km, 200);
    assert!(!view.can_increase_radius);
    assert_eq!(
        h.sink.count(|e| matches!(e, AppEvent::RadiusChanged { .. })),
        3
    );
}

#[test]
fn set_radius_is_clamped() {
    let mut h = signed_in_with_dogs();
    h.send(Intent::SetRadius(500)).unwrap();
    assert_eq!(h.app.discover_view().radius_km, 200);
    h.send(Intent::SetRadius(1)).unwrap();
    assert_eq!(h.app.discover_view().radius_km, 5);
    assert_eq!(h.app.current_account().unwrap().discovery_radius_km, 5);
}

#[test]
fn go_global_rewinds_without_new_candidates() {
    let mut h = signed_in_with_dogs();
    h.send(Intent::AdvanceCursor).unwrap();
    assert_eq!(current_id(&h).as_deref(), Some("pet3"));

    h.send(Intent::GoGlobal).unwrap();
    let view = h.app.discover_view();
    assert!(view.global);
    assert_eq!(view.total, 3);
    assert_eq!(current_id(&h).as_deref(), Some("pet1"));
    assert!(h.sink.events.contains(&AppEvent::GlobalSearchEnabled));
}

#[test]
fn advancing_wraps_around() {
    let mut h = signed_in_with_dogs();
    let mut seen = Vec::new();
    for _ in 0..4 {
        seen.push(current_id(&h).unwrap());
        h.send(Intent::AdvanceCursor).unwrap();
    }
    assert_eq!(seen, ["pet1", "pet3", "pet6", "pet1"]);
}

#[test]
fn toggling_categories() {
    let mut h = signed_in_with_dogs();

    h.send(Intent::ToggleCategory(Category::Purpose(Purpose::ForBreeding)))
        .unwrap();
    let view = h.app.discover_view();
    assert_eq!(view.filter.pet_type, Some(PetType::Dog));
    assert_eq!(view.filter.purpose, Some(Purpose::ForBreeding));
    assert_eq!(view.total, 2);
    assert_eq!(current_id(&h).as_deref(), Some("pet3"));

    h.send(Intent::ToggleCategory(Category::Purpose(Purpose::ForSale)))
        .unwrap();
    assert!(h.app.discover_view().is_exhausted());

    h.send(Intent::ToggleCategory(Category::PetType(PetType::Dog)))
        .unwrap();
    let view = h.app.discover_view();
    assert_eq!(view.filter, FilterSelection::purpose(Purpose::ForSale));
    assert_eq!(current_id(&h).as_deref(), Some("pet2"));

    h.send(Intent::ClearFilters).unwrap();
    assert_eq!(h.app.discover_view().total, 6);
    assert!(!h.app.explore_view().has_active_filters());
}

#[test]
fn focus_from_top_picks_then_rate_returns_to_browsing() {
    let mut h = signed_in_with_dogs();
    let picks = h.app.top_picks_view();
    let charlie = picks
        .featured
        .iter()
        .find(|p| p.name == "Charlie")
        .map(|p| p.id.clone())
        .unwrap();

    h.send(Intent::FocusPet(charlie.clone())).unwrap();
    let view = h.app.discover_view();
    assert!(view.is_focused());
    assert_eq!(view.total, 1);
    assert_eq!(current_id(&h), Some(charlie.clone()));

    h.send(Intent::Rate {
        pet_id: charlie.clone(),
        stars: stars(4),
    })
    .unwrap();
    assert!(h.sink.events.contains(&AppEvent::ReturnedToBrowsing));
    let view = h.app.discover_view();
    assert_eq!(view.state, DiscoveryState::Browsing);
    assert_eq!(current_id(&h).as_deref(), Some("pet1"));
    assert_eq!(h.app.catalog().get(&charlie).unwrap().rating_count, 1);
}

#[test]
fn focus_on_rated_pet_shows_previous_rating() {
    let mut h = signed_in_with_dogs();
    rate(&mut h, "pet1", 2);
    h.send(Intent::FocusPet("pet1".into())).unwrap();

    let view = h.app.discover_view();
    assert!(view.is_focused());
    assert!(!view.can_rate);
    assert_eq!(view.my_rating, Some(stars(2)));

    h.send(Intent::ClearFocus).unwrap();
    assert_eq!(current_id(&h).as_deref(), Some("pet3"));
}

#[test]
fn focus_on_unknown_pet_fails() {
    let mut h = signed_in_with_dogs();
    assert_eq!(
        h.send(Intent::FocusPet("nope".into())),
        Err(Error::UnknownPet("nope".into()))
    );
    assert_eq!(h.app.discovery_state(), DiscoveryState::Browsing);
}

#[test]
fn changing_filter_drops_focus() {
    let mut h = signed_in_with_dogs();
    h.send(Intent::FocusPet("pet2".into())).unwrap();
    h.send(Intent::SetFilter(FilterSelection::pet_type(PetType::Cat)))
        .unwrap();
    let view = h.app.discover_view();
    assert_eq!(view.state, DiscoveryState::Browsing);
    assert_eq!(view.total, 2);
}

#[test]
fn next_account_sees_pets_rated_by_previous_one() {
    let mut h = signed_in_with_dogs();
    rate(&mut h, "pet1", 5);
    h.send(Intent::Logout).unwrap();
    h.sign_up("cats@pets.io");

    // Logout purged the first account's facts; the filter survives.
    assert_eq!(h.app.catalog().get("pet1").unwrap().rating_count, 24);
    let view = h.app.discover_view();
    assert_eq!(view.total, 3);
    assert_eq!(current_id(&h).as_deref(), Some("pet1"));
}
