//! Realistic value primitives backed by the `fake` crate.
//!
//! Every function draws from the caller's RNG so seeded generators stay
//! reproducible.

use fake::faker::address::en::{BuildingNumber, CityName, CountryName, StateName, StreetName, ZipCode};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::{DomainSuffix, SafeEmail};
use fake::faker::job::en::Title;
use fake::faker::lorem::en::{Sentence, Word};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use panel_core::DocValue;
use rand::seq::IndexedRandom;
use rand::Rng;

const COLORS: &[&str] = &[
    "Red", "Blue", "Green", "Yellow", "Purple", "Orange", "Black", "White", "Gray", "Pink",
    "Brown", "Cyan", "Magenta", "Teal", "Navy", "Maroon", "Olive", "Silver", "Gold", "Indigo",
];

const ANIMALS: &[&str] = &[
    "Lion", "Tiger", "Elephant", "Giraffe", "Zebra", "Penguin", "Dolphin", "Eagle", "Wolf",
    "Fox", "Bear", "Otter", "Koala", "Kangaroo", "Panda", "Owl", "Falcon", "Turtle", "Rabbit",
    "Deer",
];

pub fn first_name<R: Rng>(rng: &mut R) -> String {
    FirstName().fake_with_rng(rng)
}

pub fn last_name<R: Rng>(rng: &mut R) -> String {
    LastName().fake_with_rng(rng)
}

pub fn full_name<R: Rng>(rng: &mut R) -> String {
    Name().fake_with_rng(rng)
}

pub fn company<R: Rng>(rng: &mut R) -> String {
    CompanyName().fake_with_rng(rng)
}

pub fn job_title<R: Rng>(rng: &mut R) -> String {
    Title().fake_with_rng(rng)
}

pub fn color<R: Rng>(rng: &mut R) -> String {
    pick(rng, COLORS)
}

pub fn animal<R: Rng>(rng: &mut R) -> String {
    pick(rng, ANIMALS)
}

fn pick<R: Rng>(rng: &mut R, list: &[&str]) -> String {
    list.choose(rng).copied().unwrap_or_default().to_string()
}

/// A lorem sentence of exactly `words` words.
pub fn sentence<R: Rng>(rng: &mut R, words: usize) -> String {
    Sentence(words..words + 1).fake_with_rng(rng)
}

/// A single lorem word.
pub fn word<R: Rng>(rng: &mut R) -> String {
    Word().fake_with_rng(rng)
}

pub fn email<R: Rng>(rng: &mut R) -> String {
    SafeEmail().fake_with_rng(rng)
}

pub fn phone<R: Rng>(rng: &mut R) -> String {
    PhoneNumber().fake_with_rng(rng)
}

pub fn url<R: Rng>(rng: &mut R) -> String {
    let host = word(rng).to_lowercase();
    let suffix: String = DomainSuffix().fake_with_rng(rng);
    format!("https://www.{host}.{suffix}")
}

/// Postal address object: `{street, city, state, zip, country}`.
pub fn address<R: Rng>(rng: &mut R) -> DocValue {
    let number: String = BuildingNumber().fake_with_rng(rng);
    let street: String = StreetName().fake_with_rng(rng);
    let city: String = CityName().fake_with_rng(rng);
    let state: String = StateName().fake_with_rng(rng);
    let zip: String = ZipCode().fake_with_rng(rng);
    let country: String = CountryName().fake_with_rng(rng);

    DocValue::object([
        ("street", DocValue::String(format!("{number} {street}"))),
        ("city", DocValue::String(city)),
        ("state", DocValue::String(state)),
        ("zip", DocValue::String(zip)),
        ("country", DocValue::String(country)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_address_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let address = address(&mut rng);
        let fields = address.as_object().unwrap();

        let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["city", "country", "state", "street", "zip"]);
        assert!(fields.values().all(|v| !v.as_str().unwrap().is_empty()));
    }

    #[test]
    fn test_sentence_word_count() {
        let mut rng = StdRng::seed_from_u64(42);
        for words in 1..=5 {
            let s = sentence(&mut rng, words);
            assert_eq!(s.split_whitespace().count(), words, "{s}");
        }
    }

    #[test]
    fn test_url_and_email_shapes() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(url(&mut rng).starts_with("https://www."));
        assert!(email(&mut rng).contains('@'));
    }

    #[test]
    fn test_word_lists() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(COLORS.contains(&color(&mut rng).as_str()));
        assert!(ANIMALS.contains(&animal(&mut rng).as_str()));
    }
}
