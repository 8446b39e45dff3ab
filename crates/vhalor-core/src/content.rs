//! Built-in copy for the page

use crate::carousel::{CameraFraming, Feature, Vec3};
use crate::section::SectionId;

pub const BRAND: &str = "VHALÓR";

pub const LOADING_TITLE: &str = "Loading TravelHoodie Experience";

/// Shown one at a time on the loading screen
pub const AIRLINE_FACTS: [&str; 5] = [
    "Some airlines charge up to $65 for a carry-on bag that doesn't fit under the seat.",
    "Budget airlines earn about 40% of their revenue from add-on fees, including baggage charges.",
    "Passengers paid over $5 billion in baggage fees to U.S. airlines in 2022 alone.",
    "Some airlines charge more for baggage at the gate than during online check-in - sometimes double the price.",
    "The weight limit for checked luggage decreased from 70 pounds to 50 pounds over the years, resulting in more fees.",
];

pub const SOCIAL_LINKS: [(&str, &str); 3] = [
    ("Facebook", "https://facebook.com"),
    ("Instagram", "https://instagram.com"),
    ("YouTube", "https://youtube.com"),
];

/// Heading and paragraphs of a section
#[derive(Debug, Clone, Copy)]
pub struct SectionCopy {
    pub heading: &'static str,
    pub body: &'static [&'static str],
}

pub fn section_copy(id: SectionId) -> SectionCopy {
    match id {
        SectionId::Hero => SectionCopy {
            heading: "Travel Without Extra Fees",
            body: &["The innovative hoodie that lets you carry more without paying for carry-on luggage"],
        },
        SectionId::Video => SectionCopy {
            heading: "Designed for Modern Travelers",
            body: &[
                "Our innovative hoodie was created to solve a common problem faced by budget travelers. \
                 Airlines in America and Europe offer cheap flights but charge excessive fees for carry-on luggage.",
                "The TravelHoodie gives you the freedom to bring what you need without paying extra fees, \
                 letting you travel smarter and more economically.",
            ],
        },
        SectionId::Product => SectionCopy {
            heading: "Features",
            body: &[],
        },
        SectionId::About => SectionCopy {
            heading: "Our Story",
            body: &[
                "The TravelHoodie was born out of frustration with the current state of budget air travel. \
                 While flights across America and Europe have become more affordable, airlines have found new \
                 ways to increase revenue through excessive baggage fees.",
                "We noticed a troubling trend: gate agents were incentivized to find reasons to charge passengers \
                 for \"oversized\" personal items, even when those items met the airline's stated requirements. \
                 This practice was not only unfair but also created anxiety for travelers who couldn't predict \
                 whether they'd be hit with unexpected fees.",
                "Our team of designers and frequent travelers came together to create a solution. The result is \
                 the TravelHoodie - a garment that looks like ordinary clothing but provides extraordinary storage \
                 capacity, allowing you to carry essential items on your person rather than in a bag subject to fees.",
                "We believe in fair travel practices and empowering consumers to avoid predatory fees. Our mission \
                 is to help you travel more comfortably, economically, and with peace of mind.",
            ],
        },
        SectionId::Contact => SectionCopy {
            heading: BRAND,
            body: &["Travel smart. Travel Light. Travel with Vhalór."],
        },
    }
}

/// The four product features, each framed from its own camera position
pub fn default_features() -> Vec<Feature> {
    vec![
        Feature::new(
            "Hidden Compartments",
            "Multiple discreet pockets throughout the hoodie allow you to store essentials like phones, \
             passports, and small items that would normally go in your carry-on bag.",
            CameraFraming::at(Vec3::new(0.0, 3.0, 10.0)),
        ),
        Feature::new(
            "Expandable Storage",
            "Specially designed expandable sections can hold clothing items, reducing the need for \
             additional luggage while maintaining a normal appearance.",
            CameraFraming::at(Vec3::new(-5.0, 3.0, 10.0)),
        ),
        Feature::new(
            "Comfortable Design",
            "Despite its storage capabilities, the hoodie remains comfortable to wear during long flights, \
             with breathable fabric and ergonomic weight distribution.",
            CameraFraming::at(Vec3::new(5.0, 3.0, 10.0)),
        ),
        Feature::new(
            "Stylish Appearance",
            "Looks like a normal hoodie to casual observers, including airline staff, while providing the \
             functionality you need to avoid extra baggage fees.",
            CameraFraming::at(Vec3::new(0.0, 6.0, 8.0)),
        ),
    ]
}
