//! Built-in demonstration data and the first-run initializer.

use log::info;
use serde::Serialize;

use crate::kv_store::KeyValueStore;
use crate::local_db_model::{
    Garden, Helper, MarketplaceCategory, MarketplaceItem, RentalTerms, UserProfile,
    VolunteerProject,
};
use crate::repository::Baghela;

/// Which collections a call to [`Baghela::initialize_storage`] filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub gardens: bool,
    pub helpers: bool,
    pub projects: bool,
    pub marketplace: bool,
    pub user: bool,
}

impl SeedReport {
    pub fn seeded_anything(&self) -> bool {
        self.gardens || self.helpers || self.projects || self.marketplace || self.user
    }
}

impl<S: KeyValueStore> Baghela<S> {
    /// Fills every empty collection with the built-in dataset.
    ///
    /// Each collection is checked on its own, and only emptiness matters: a
    /// collection the user already wrote to is never reseeded. Calling this
    /// repeatedly is a no-op after the first call.
    pub fn initialize_storage(&self) -> SeedReport {
        let mut report = SeedReport::default();

        if self.get_gardens().is_empty() {
            self.save_gardens(&seed_gardens());
            report.gardens = true;
        }

        if self.get_helpers().is_empty() {
            self.save_helpers(&seed_helpers());
            report.helpers = true;
        }

        if self.get_projects().is_empty() {
            self.save_projects(&seed_projects());
            report.projects = true;
        }

        if self.get_marketplace_items().is_empty() {
            self.save_marketplace_items(&seed_marketplace_items());
            report.marketplace = true;
        }

        if self.get_user().is_none() {
            self.save_user(&seed_user());
            report.user = true;
        }

        if report.seeded_anything() {
            info!("Seeded empty collections: {report:?}");
        }
        report
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

pub fn seed_gardens() -> Vec<Garden> {
    vec![
        Garden {
            id: "1".into(),
            name: "სოფელ ყვარლის ბაღი".into(),
            location: "ყვარელი, კახეთი".into(),
            area: 500.0,
            garden_type: "ვაზის ბაღი".into(),
            owner: "გიორგი მამუკაშვილი".into(),
            description: "ლამაზი ვაზის ბაღი კახეთში, შესანიშნავი პირობებით".into(),
            for_rent: true,
            rental_terms: Some(RentalTerms {
                duration: "1 სეზონი (6 თვე)".into(),
                harvest_type: "ყურძენი".into(),
                harvest_share: 40,
                conditions: "ბაღის მოვლა და მორწყვა გაქირავებულის პასუხისმგებლობაა".into(),
            }),
            image: None,
        },
        Garden {
            id: "2".into(),
            name: "თბილისის ეკო-ბაღი".into(),
            location: "დიღომი, თბილისი".into(),
            area: 200.0,
            garden_type: "ბოსტნეულის ბაღი".into(),
            owner: "ნინო ჩხაიძე".into(),
            description: "ორგანული ბოსტნეულის მოყვანა თბილისში".into(),
            for_rent: false,
            rental_terms: None,
            image: None,
        },
        Garden {
            id: "3".into(),
            name: "ფორთოხლის ბაღი".into(),
            location: "ოზურგეთი, გურია".into(),
            area: 800.0,
            garden_type: "ციტრუსის ბაღი".into(),
            owner: "დავით ბერიძე".into(),
            description: "დიდი ფორთოხლის პლანტაცია გურიაში".into(),
            for_rent: true,
            rental_terms: Some(RentalTerms {
                duration: "1 წელი".into(),
                harvest_type: "ფორთოხალი".into(),
                harvest_share: 35,
                conditions: "გამოცდილება საჭიროა ციტრუსების მოვლაში".into(),
            }),
            image: None,
        },
    ]
}

pub fn seed_helpers() -> Vec<Helper> {
    vec![
        Helper {
            id: "1".into(),
            name: "ლევან კობახიძე".into(),
            skills: strings(&["ბაღის გაწმენდა", "ხეების გასხვლა", "მორწყვა"]),
            experience: "5 წელი".into(),
            rating: 4.8,
            completed_jobs: 45,
            phone: Some("+995 555 12 34 56".into()),
            badges: strings(&["მოსავლის გმირი", "პროფესიონალი"]),
            image: None,
        },
        Helper {
            id: "2".into(),
            name: "თამარ გელაშვილი".into(),
            skills: strings(&["ყურძნის კრეფა", "ბოსტნეულის დარგვა", "სარწყავი სისტემები"]),
            experience: "3 წელი".into(),
            rating: 4.9,
            completed_jobs: 32,
            phone: Some("+995 555 98 76 54".into()),
            badges: strings(&["განსაკუთრებით აქტიური"]),
            image: None,
        },
        Helper {
            id: "3".into(),
            name: "გიორგი მამულაშვილი".into(),
            skills: strings(&["ფორთოხლის კრეფა", "თხილის კრეფა", "ბაღის გაწმენდა"]),
            experience: "7 წელი".into(),
            rating: 5.0,
            completed_jobs: 67,
            phone: Some("+995 555 11 22 33".into()),
            badges: strings(&["მოსავლის გმირი", "პროფესიონალი", "ოქროს ბეჯი"]),
            image: None,
        },
    ]
}

pub fn seed_projects() -> Vec<VolunteerProject> {
    vec![
        VolunteerProject {
            id: "1".into(),
            title: "🍇 რთველი 2025 – მოსავლის კრეფა კახეთში".into(),
            description: "შემოგვიერთდით ტრადიციულ ქართულ რთველში! გაიხარე, ისწავლე და დაიმონტაჟე ქულები.".into(),
            organizer: "კახეთის მუნიციპალიტეტი".into(),
            date: "2025-09-15".into(),
            location: "ყვარელი, კახეთი".into(),
            points: 100,
            participants: 12,
            max_participants: 30,
            image: None,
            category: "მოსავალი".into(),
        },
        VolunteerProject {
            id: "2".into(),
            title: "🌱 სკოლის ეზოს გამწვანება".into(),
            description: "დავხმაროთ სკოლას მწვანე ეზოს შექმნაში. ერთად დავრგავთ ხეებს და ყვავილებს.".into(),
            organizer: "№42 საჯარო სკოლა".into(),
            date: "2025-04-20".into(),
            location: "ვაკე, თბილისი".into(),
            points: 50,
            participants: 8,
            max_participants: 20,
            image: None,
            category: "გამწვანება".into(),
        },
        VolunteerProject {
            id: "3".into(),
            title: "🧹 პარკის დასუფთავება".into(),
            description: "გაათავისუფლოთ ბუნება ნაგავისგან! დასუფთავების აქცია მუნიციპალურ პარკში.".into(),
            organizer: "ეკო კლუბი \"მწვანე მომავალი\"".into(),
            date: "2025-05-10".into(),
            location: "ვაკე პარკი, თბილისი".into(),
            points: 40,
            participants: 25,
            max_participants: 50,
            image: None,
            category: "დასუფთავება".into(),
        },
    ]
}

pub fn seed_marketplace_items() -> Vec<MarketplaceItem> {
    vec![
        MarketplaceItem {
            id: "1".into(),
            name: "ვაშლის ნერგი".into(),
            description: "ორგანული ვაშლის ნერგი, მზადაა დასარგავად".into(),
            points: 120,
            category: MarketplaceCategory::Seedling,
            stock: 25,
            image: Some("seedling.jpg".into()),
        },
        MarketplaceItem {
            id: "2".into(),
            name: "პომიდვრის თესლი".into(),
            description: "ადგილობრივი ჯიშის პომიდვრის თესლი".into(),
            points: 30,
            category: MarketplaceCategory::Seed,
            stock: 100,
            image: Some("seeds.jpg".into()),
        },
        MarketplaceItem {
            id: "3".into(),
            name: "ორგანული სასუქი".into(),
            description: "ბუნებრივი სასუქი ყველა ტიპის მცენარისთვის".into(),
            points: 80,
            category: MarketplaceCategory::Fertilizer,
            stock: 50,
            image: Some("fertilizer.jpg".into()),
        },
        MarketplaceItem {
            id: "4".into(),
            name: "ადგილობრივი თაფლი".into(),
            description: "ნატურალური თაფლი ქართული მეფუტკრეებისგან".into(),
            points: 100,
            category: MarketplaceCategory::Prize,
            stock: 15,
            image: Some("honey.jpg".into()),
        },
    ]
}

pub fn seed_user() -> UserProfile {
    UserProfile {
        id: "1".into(),
        name: "მარიამ გელაშვილი".into(),
        email: "mariam@example.com".into(),
        points: 350,
        level: 3,
        badges: strings(&["მოხალისე", "ბუნების მეგობარი"]),
        joined_date: "2024-01-15".into(),
        activities: Vec::new(),
        purchases: Vec::new(),
    }
}
