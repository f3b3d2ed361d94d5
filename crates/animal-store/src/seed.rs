//! Fixed sample set inserted into an empty animal store.

use common::NewAnimal;

/// The five animals every fresh installation starts with.
pub fn sample_animals() -> Vec<NewAnimal> {
    vec![
        NewAnimal::new("Misu", "cat")
            .with_age(2)
            .with_breed("European Shorthair")
            .with_description("Calm indoor cat who loves chin scratches and a sunny windowsill.")
            .with_image_url("https://placekitten.com/250/250"),
        NewAnimal::new("Rekku", "dog")
            .with_age(4)
            .with_breed("Mixed breed")
            .with_description("Full of energy, needs plenty of walks and play.")
            .with_image_url("https://placedog.net/400/300"),
        NewAnimal::new("Luna", "cat")
            .with_age(1)
            .with_breed("Maine Coon mix")
            .with_description("Playful young cat, gets along well with children.")
            .with_image_url("https://placekitten.com/260/260"),
        NewAnimal::new("Max", "dog")
            .with_age(6)
            .with_breed("Labrador Retriever")
            .with_description("Gentle and people-loving, a good first dog.")
            .with_image_url("https://placedog.net/410/300"),
        NewAnimal::new("Nuppu", "cat")
            .with_age(3)
            .with_breed("Siamese mix")
            .with_description("Social and talkative, wants to be part of everything.")
            .with_image_url("https://placekitten.com/255/255"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_set_has_five_distinct_animals() {
        let animals = sample_animals();
        assert_eq!(animals.len(), 5);
        assert_eq!(animals[0].name, "Misu");

        let mut names: Vec<_> = animals.iter().map(|a| a.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 5);
    }
}
