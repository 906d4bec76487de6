//! Form validation for sign-in, registration and pet profiles.
//!
//! Each check reports every failing field at once so the presentation layer
//! can mark them inline.  Nothing here touches session state.

use crate::config::AppConfig;
use crate::error::{Field, ValidationErrors};
use crate::model::{Images, Location, PetType, Purpose, Sex};
use crate::users::Registration;

/// Email + password must both be present for any email sign-in.
pub fn validate_login(email: &str, password: &str) -> crate::Result<()> {
    let mut errors = ValidationErrors::new();
    check_credentials(&mut errors, email, password);
    errors.into_result()
}

/// Registration adds a name and a minimum password length.
pub fn validate_registration(reg: &Registration, config: &AppConfig) -> crate::Result<()> {
    let mut errors = ValidationErrors::new();
    check_credentials(&mut errors, &reg.email, &reg.password);
    if reg.name.trim().is_empty() {
        errors.push(Field::Name, "Name is required");
    }
    if !reg.password.is_empty() && reg.password.chars().count() < config.min_password_len {
        errors.push(Field::Password, "Password is too short");
    }
    errors.into_result()
}

fn check_credentials(errors: &mut ValidationErrors, email: &str, password: &str) {
    if email.is_empty() {
        errors.push(Field::Email, "Email and password are required");
    }
    if password.is_empty() {
        errors.push(Field::Password, "Email and password are required");
    }
}

/// Raw pet-profile form.  Unselected dropdowns are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetDraft {
    pub name: String,
    pub pet_type: Option<PetType>,
    pub breed: String,
    pub age: u8,
    pub sex: Option<Sex>,
    pub purpose: Option<Purpose>,
    pub country: String,
    pub state: String,
    pub city: String,
    pub phone: String,
    pub description: String,
    pub images: Vec<String>,
    pub price: Option<u32>,
}

/// A draft that passed [`validate_pet`]; every required field is present.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidPet {
    pub name: String,
    pub pet_type: PetType,
    pub breed: String,
    pub age: u8,
    pub sex: Sex,
    pub purpose: Purpose,
    pub location: Location,
    pub phone: Option<String>,
    pub description: String,
    pub images: Images,
    pub price: Option<u32>,
}

pub fn validate_pet(draft: PetDraft, config: &AppConfig) -> crate::Result<ValidPet> {
    let mut errors = ValidationErrors::new();

    let required = [
        (Field::Name, &draft.name, "Name is required"),
        (Field::Breed, &draft.breed, "Breed is required"),
        (Field::Country, &draft.country, "Country is required"),
        (Field::State, &draft.state, "State is required"),
        (Field::City, &draft.city, "City is required"),
    ];
    for (field, value, message) in required {
        if value.trim().is_empty() {
            errors.push(field, message);
        }
    }
    if draft.pet_type.is_none() {
        errors.push(Field::PetType, "Pet type is required");
    }
    if draft.age == 0 {
        errors.push(Field::Age, "Valid age is required");
    }
    if draft.sex.is_none() {
        errors.push(Field::Sex, "Sex is required");
    }
    if draft.purpose.is_none() {
        errors.push(Field::Purpose, "Purpose is required");
    }
    if draft.images.is_empty() {
        errors.push(Field::Images, "At least one image is required");
    } else if draft.images.len() > config.max_images {
        errors.push(Field::Images, "Too many images");
    }
    if draft.price == Some(0) {
        errors.push(Field::Price, "Price must be greater than zero");
    }

    let mut images = Images::new();
    for image in &draft.images {
        if images.push(image.clone()).is_err() {
            if errors.message_for(Field::Images).is_none() {
                errors.push(Field::Images, "Too many images");
            }
            break;
        }
    }

    let (Some(pet_type), Some(sex), Some(purpose)) = (draft.pet_type, draft.sex, draft.purpose)
    else {
        return Err(errors.into());
    };
    errors.into_result()?;

    let optional = |s: String| {
        let t = s.trim();
        (!t.is_empty()).then(|| t.to_owned())
    };

    Ok(ValidPet {
        name: draft.name.trim().to_owned(),
        pet_type,
        breed: draft.breed.trim().to_owned(),
        age: draft.age,
        sex,
        purpose,
        location: Location::new(draft.country.trim(), draft.state.trim(), draft.city.trim()),
        phone: optional(draft.phone),
        description: draft.description.trim().to_owned(),
        images,
        // Adoption listings never carry a price.
        price: draft.price.filter(|_| purpose.is_transaction()),
    })
}
