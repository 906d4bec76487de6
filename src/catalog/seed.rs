//! Bundled sample listings shown before any user content exists.

use chrono::{DateTime, TimeZone, Utc};

use crate::model::{Coordinates, Images, Location, PetListing, PetType, Purpose, Sex};

fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn images(urls: &[&str]) -> Images {
    let mut v = Images::new();
    for url in urls {
        if v.push(format!("https://images.pexels.com/photos/{url}?auto=compress&cs=tinysrgb&w=500")).is_err() {
            break;
        }
    }
    v
}

fn california(city: &str, lat: f64, lng: f64) -> Location {
    Location {
        coordinates: Some(Coordinates { lat, lng }),
        ..Location::new("USA", "California", city)
    }
}

pub fn listings() -> Vec<PetListing> {
    vec![
        PetListing {
            id: "pet1".into(),
            name: "Luna".into(),
            age: 3,
            pet_type: PetType::Dog,
            breed: "Golden Retriever".into(),
            purpose: Purpose::ForAdoption,
            price: None,
            sex: Sex::Female,
            location: california("Los Angeles", 34.0522, -118.2437),
            description: "Luna is a friendly and energetic Golden Retriever who loves playing \
                          fetch and swimming. She is great with kids and other pets."
                .into(),
            phone: Some("+1-555-0123".into()),
            images: images(&[
                "1805164/pexels-photo-1805164.jpeg",
                "1254140/pexels-photo-1254140.jpeg",
                "1490908/pexels-photo-1490908.jpeg",
            ]),
            rating: 4.8,
            rating_count: 24,
            featured: true,
            owner_id: "owner1".into(),
            created_at: date(2024, 1, 15),
        },
        PetListing {
            id: "pet2".into(),
            name: "Whiskers".into(),
            age: 2,
            pet_type: PetType::Cat,
            breed: "Persian".into(),
            purpose: Purpose::ForSale,
            price: Some(1500),
            sex: Sex::Male,
            location: california("San Francisco", 37.7749, -122.4194),
            description: "Beautiful Persian cat with long, silky fur. Very calm and \
                          affectionate. Perfect for apartment living."
                .into(),
            phone: Some("+1-555-0124".into()),
            images: images(&[
                "2071873/pexels-photo-2071873.jpeg",
                "1741205/pexels-photo-1741205.jpeg",
            ]),
            rating: 4.6,
            rating_count: 18,
            featured: false,
            owner_id: "owner2".into(),
            created_at: date(2024, 1, 20),
        },
        PetListing {
            id: "pet3".into(),
            name: "Rocky".into(),
            age: 4,
            pet_type: PetType::Dog,
            breed: "German Shepherd".into(),
            purpose: Purpose::ForBreeding,
            price: Some(2000),
            sex: Sex::Male,
            location: california("San Diego", 32.7157, -117.1611),
            description: "Champion bloodline German Shepherd. Excellent temperament and \
                          health records. Perfect for breeding programs."
                .into(),
            phone: Some("+1-555-0125".into()),
            images: images(&[
                "1174081/pexels-photo-1174081.jpeg",
                "333083/pexels-photo-333083.jpeg",
                "1490908/pexels-photo-1490908.jpeg",
            ]),
            rating: 4.9,
            rating_count: 31,
            featured: true,
            owner_id: "owner3".into(),
            created_at: date(2024, 1, 10),
        },
        PetListing {
            id: "pet4".into(),
            name: "Bella".into(),
            age: 1,
            pet_type: PetType::Cat,
            breed: "Maine Coon".into(),
            purpose: Purpose::ForAdoption,
            price: None,
            sex: Sex::Female,
            location: california("Oakland", 37.8044, -122.2711),
            description: "Young Maine Coon kitten looking for a loving home. Very playful \
                          and social."
                .into(),
            phone: None,
            images: images(&["1472999/pexels-photo-1472999.jpeg"]),
            rating: 4.7,
            rating_count: 12,
            featured: false,
            owner_id: "owner4".into(),
            created_at: date(2024, 1, 25),
        },
        PetListing {
            id: "pet5".into(),
            name: "Charlie".into(),
            age: 2,
            pet_type: PetType::Bird,
            breed: "Cockatiel".into(),
            purpose: Purpose::ForSale,
            price: Some(300),
            sex: Sex::Male,
            location: california("Los Angeles", 34.0522, -118.2437),
            description: "Hand-trained Cockatiel with beautiful coloring. Can whistle \
                          several tunes and loves attention."
                .into(),
            phone: Some("+1-555-0126".into()),
            images: images(&["1661179/pexels-photo-1661179.jpeg"]),
            rating: 4.5,
            rating_count: 8,
            featured: true,
            owner_id: "owner5".into(),
            created_at: date(2024, 1, 18),
        },
        PetListing {
            id: "pet6".into(),
            name: "Max".into(),
            age: 5,
            pet_type: PetType::Dog,
            breed: "Labrador".into(),
            purpose: Purpose::ForBreeding,
            price: Some(1800),
            sex: Sex::Male,
            location: california("Fresno", 36.7378, -119.7871),
            description: "Purebred Labrador with excellent pedigree. Health tested and \
                          ready for breeding."
                .into(),
            phone: Some("+1-555-0127".into()),
            images: images(&[
                "1108099/pexels-photo-1108099.jpeg",
                "2253275/pexels-photo-2253275.jpeg",
            ]),
            rating: 4.4,
            rating_count: 15,
            featured: false,
            owner_id: "owner6".into(),
            created_at: date(2024, 1, 12),
        },
    ]
}
