//! Fixture/demo store
//!
//! Static sample data served when no backend is configured: a tour catalog,
//! tour categories, news articles, past bookings, a demo identity and a cart
//! seed. Everything here is deterministic and allocation-only; there is no
//! I/O on any path in this module.

pub mod assistant;

pub use assistant::respond;

use chrono::{Duration, NaiveDate, Utc};

use crate::models::{
    Booking, BookingStatus, CartItem, NewsArticle, Profile, Tour, TourType, UserType,
};

/// Fixed id of the demo identity
pub const DEMO_USER_ID: &str = "demo-user-id";

/// Email of the demo identity
pub const DEMO_EMAIL: &str = "demo@wanderhub.example";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    // All fixture dates are valid calendar dates
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

/// The demo identity activated when demo mode is on
pub fn demo_profile() -> Profile {
    Profile {
        id: DEMO_USER_ID.to_string(),
        created_at: Utc::now(),
        email: DEMO_EMAIL.to_string(),
        first_name: Some("Demo".to_string()),
        last_name: Some("Traveler".to_string()),
        avatar_url: None,
        phone: Some("+1 (555) 123-4567".to_string()),
        user_type: UserType::User,
    }
}

/// Tour categories
pub fn demo_tour_types() -> Vec<TourType> {
    let rows = [
        ("1", "Beach & Resort", "umbrella-beach"),
        ("2", "Adventure", "mountain"),
        ("3", "Cultural", "landmark"),
        ("4", "City Break", "building"),
        ("5", "Cruise", "ship"),
        ("6", "Safari", "binoculars"),
    ];
    rows.iter()
        .map(|(id, name, icon)| TourType {
            id: id.to_string(),
            name: name.to_string(),
            image_url: None,
            icon: Some(icon.to_string()),
        })
        .collect()
}

/// The sample tour catalog
pub fn demo_tours() -> Vec<Tour> {
    let now = Utc::now();
    let tour = |id: &str,
                name: &str,
                description: &str,
                country: &str,
                price: f64,
                start: NaiveDate,
                end: NaiveDate,
                image: &str,
                rating: f64,
                tour_type_id: &str,
                featured: bool| Tour {
        id: id.to_string(),
        created_at: now,
        name: name.to_string(),
        description: description.to_string(),
        country: country.to_string(),
        price,
        start_date: start,
        end_date: end,
        image_url: image.to_string(),
        gallery: Vec::new(),
        rating,
        tour_type_id: tour_type_id.to_string(),
        tour_type: None,
        creator_id: "admin".to_string(),
        featured,
    };

    vec![
        tour(
            "1",
            "Tropical Paradise Bali",
            "Experience the magic of Bali with pristine beaches, ancient temples, and lush rice terraces. This 7-day tour includes visits to Ubud, Seminyak, and the famous Tanah Lot temple.",
            "Indonesia",
            1299.0,
            date(2024, 4, 15),
            date(2024, 4, 22),
            "https://images.unsplash.com/photo-1537996194471-e657df975ab4?w=800",
            4.8,
            "1",
            true,
        ),
        tour(
            "2",
            "Swiss Alps Adventure",
            "Conquer the majestic Swiss Alps with guided hikes, cable car rides, and breathtaking mountain views. Perfect for adventure seekers and nature lovers.",
            "Switzerland",
            2499.0,
            date(2024, 5, 1),
            date(2024, 5, 8),
            "https://images.unsplash.com/photo-1531366936337-7c912a4589a7?w=800",
            4.9,
            "2",
            true,
        ),
        tour(
            "3",
            "Ancient Rome Explorer",
            "Walk through history in the Eternal City. Visit the Colosseum, Vatican City, and enjoy authentic Italian cuisine on this cultural journey.",
            "Italy",
            1899.0,
            date(2024, 4, 20),
            date(2024, 4, 27),
            "https://images.unsplash.com/photo-1552832230-c0197dd311b5?w=800",
            4.7,
            "3",
            true,
        ),
        tour(
            "4",
            "Tokyo City Lights",
            "Discover the perfect blend of tradition and innovation in Tokyo. From ancient shrines to neon-lit streets, experience Japan like never before.",
            "Japan",
            2199.0,
            date(2024, 5, 10),
            date(2024, 5, 17),
            "https://images.unsplash.com/photo-1540959733332-eab4deabeeaf?w=800",
            4.8,
            "4",
            false,
        ),
        tour(
            "5",
            "Caribbean Dream Cruise",
            "Sail through crystal-clear waters visiting multiple Caribbean islands. All-inclusive dining, entertainment, and island excursions included.",
            "Caribbean",
            3499.0,
            date(2024, 6, 1),
            date(2024, 6, 10),
            "https://images.unsplash.com/photo-1548574505-5e239809ee19?w=800",
            4.6,
            "5",
            false,
        ),
        tour(
            "6",
            "African Safari Experience",
            "Witness the Big Five in their natural habitat. This luxury safari includes game drives, bush walks, and stays in premium lodges.",
            "Kenya",
            4299.0,
            date(2024, 7, 15),
            date(2024, 7, 24),
            "https://images.unsplash.com/photo-1516426122078-c23e76319801?w=800",
            4.9,
            "6",
            true,
        ),
        tour(
            "7",
            "Maldives Luxury Escape",
            "Indulge in paradise with overwater villas, private beaches, and world-class spa treatments in the Maldives.",
            "Maldives",
            5999.0,
            date(2024, 5, 20),
            date(2024, 5, 27),
            "https://images.unsplash.com/photo-1514282401047-d79a71a590e8?w=800",
            5.0,
            "1",
            true,
        ),
        tour(
            "8",
            "Patagonia Trekking",
            "Challenge yourself with world-class trekking in Patagonia. Witness glaciers, mountains, and untouched wilderness.",
            "Argentina",
            2899.0,
            date(2024, 8, 1),
            date(2024, 8, 10),
            "https://images.unsplash.com/photo-1531761535209-180857e963b9?w=800",
            4.7,
            "2",
            false,
        ),
    ]
}

/// Look up a fixture tour by id
pub fn demo_tour(id: &str) -> Option<Tour> {
    demo_tours().into_iter().find(|tour| tour.id == id)
}

/// Published sample news, newest first
pub fn demo_news() -> Vec<NewsArticle> {
    let now = Utc::now();
    let article = |id: &str,
                   age_days: i64,
                   title: &str,
                   content: &str,
                   excerpt: &str,
                   image: &str| NewsArticle {
        id: id.to_string(),
        created_at: now - Duration::days(age_days),
        title: title.to_string(),
        content: content.to_string(),
        excerpt: excerpt.to_string(),
        image_url: image.to_string(),
        author_id: "admin".to_string(),
        published: true,
    };

    vec![
        article(
            "1",
            0,
            "Top 10 Destinations for 2024",
            "Discover the most exciting travel destinations for 2024. From hidden gems to classic favorites, we have curated a list that will inspire your next adventure.",
            "Discover the most exciting travel destinations for 2024.",
            "https://images.unsplash.com/photo-1488646953014-85cb44e25828?w=800",
        ),
        article(
            "2",
            1,
            "Travel Tips: How to Pack Light",
            "Master the art of minimalist travel with our expert packing tips. Learn how to fit everything you need in a carry-on bag.",
            "Master the art of minimalist travel with our expert packing tips.",
            "https://images.unsplash.com/photo-1553062407-98eeb64c6a62?w=800",
        ),
        article(
            "3",
            2,
            "Best Budget-Friendly Beach Destinations",
            "You do not need to break the bank for a beach vacation. Here are our top picks for affordable beach destinations around the world.",
            "Affordable beach destinations that will not break the bank.",
            "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?w=800",
        ),
    ]
}

/// Past bookings shown on the demo dashboard
pub fn demo_bookings() -> Vec<Booking> {
    let tours = demo_tours();
    let now = Utc::now();
    vec![
        Booking {
            id: "1".to_string(),
            created_at: now,
            user_id: DEMO_USER_ID.to_string(),
            tour_id: "1".to_string(),
            tour: Some(tours[0].clone()),
            start_date: date(2024, 4, 15),
            end_date: date(2024, 4, 22),
            travelers: 2,
            total_price: 2598.0,
            status: BookingStatus::Confirmed,
        },
        Booking {
            id: "2".to_string(),
            created_at: now - Duration::days(7),
            user_id: DEMO_USER_ID.to_string(),
            tour_id: "3".to_string(),
            tour: Some(tours[2].clone()),
            start_date: date(2024, 3, 10),
            end_date: date(2024, 3, 17),
            travelers: 1,
            total_price: 1899.0,
            status: BookingStatus::Completed,
        },
    ]
}

/// Cart seed for the demo identity: one Bali line for two travelers
pub fn demo_cart() -> Vec<CartItem> {
    let bali = demo_tours().into_iter().next().expect("fixture catalog is non-empty");
    vec![CartItem {
        id: "1".to_string(),
        created_at: Utc::now(),
        user_id: DEMO_USER_ID.to_string(),
        tour_id: bali.id.clone(),
        start_date: bali.start_date,
        end_date: bali.end_date,
        travelers: 2,
        tour: Some(bali),
    }]
}

/// Wishlist tours shown on the demo dashboard
pub fn demo_wishlist() -> Vec<Tour> {
    demo_tours().into_iter().take(3).collect()
}
