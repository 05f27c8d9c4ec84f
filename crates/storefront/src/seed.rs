//! Built-in catalog and review seed.
//!
//! Used when nothing has been persisted yet and no remote API is reachable,
//! so a fresh session still has a shop to show. Stock starts at zero; the
//! admin sets real quantities.

use chrono::{Duration, Utc};
use mirai_core::{Price, Product, ProductId, Review, ReviewId};
use rust_decimal::Decimal;

fn product(
    id: i64,
    name: &str,
    category: &str,
    price: Decimal,
    description: &str,
    ingredients: &str,
    image: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        category: category.to_owned(),
        price: Price::new(price),
        description: description.to_owned(),
        ingredients: ingredients.to_owned(),
        image: image.to_owned(),
        stock: 0,
        show_on_home: true,
    }
}

/// The default catalog.
#[must_use]
pub fn products() -> Vec<Product> {
    vec![
        product(
            1,
            "Yuzu Matcha Cloud",
            "Cakes",
            Decimal::new(1250, 2),
            "Ceremonial grade matcha mousse layered with yuzu curd and black sesame sponge.",
            "Kyoto Matcha, Yuzu Juice, Sesame, White Chocolate",
            "https://images.example.com/yuzu-matcha-cloud.jpg",
        ),
        product(
            2,
            "Noir Hazelnut Tart",
            "Seasonal",
            Decimal::new(900, 2),
            "70% dark chocolate ganache, roasted hazelnut praline, and a sea salt cocoa crust.",
            "Valrhona Chocolate, Hazelnuts, Sea Salt, Butter",
            "https://images.example.com/noir-hazelnut-tart.jpg",
        ),
        product(
            3,
            "Fraise '24",
            "Cakes",
            Decimal::new(1400, 2),
            "A reimagined strawberry shortcake. Vanilla bean chiffon, diplomat cream, and fresh Amaou strawberries.",
            "Amaou Strawberries, Vanilla Bean, Chiffon",
            "https://images.example.com/fraise-24.jpg",
        ),
        product(
            4,
            "Isigny Croissant",
            "Viennoiserie",
            Decimal::new(550, 2),
            "27 layers of butter-laminated dough, baked to a deep golden amber. Sourced Isigny butter.",
            "Isigny Ste Mere Butter, Flour, Milk",
            "https://images.example.com/isigny-croissant.jpg",
        ),
        product(
            5,
            "Pistachio Paris-Brest",
            "Viennoiserie",
            Decimal::new(1100, 2),
            "Choux pastry ring filled with rich pistachio mousseline and tart raspberry compote.",
            "Pistachio Paste, Raspberry, Choux, Almonds",
            "https://images.example.com/pistachio-paris-brest.jpg",
        ),
        product(
            6,
            "Earl Grey Financier Box",
            "Gifts",
            Decimal::new(2400, 2),
            "A box of 6 almond cakes infused with bergamot tea and honey.",
            "Almond Flour, Earl Grey Tea, Honey, Brown Butter",
            "https://images.example.com/earl-grey-financier-box.jpg",
        ),
    ]
}

/// The default review wall shown before anyone has written in.
#[must_use]
pub fn reviews() -> Vec<Review> {
    let now = Utc::now();
    vec![
        Review {
            id: ReviewId::new(1),
            name: "Ayu".to_owned(),
            city: "Jakarta".to_owned(),
            rating: 5,
            text: "Flavors are balanced and not too sweet. Delivery was fast.".to_owned(),
            created_at: now - Duration::days(2),
        },
        Review {
            id: ReviewId::new(2),
            name: "Dewi".to_owned(),
            city: "Bandung".to_owned(),
            rating: 4,
            text: "The croissants are incredible. Please open in Bandung!".to_owned(),
            created_at: now - Duration::weeks(1),
        },
        Review {
            id: ReviewId::new(3),
            name: "Michael".to_owned(),
            city: "Singapore".to_owned(),
            rating: 5,
            text: "Attention to detail is world-class. Packaging was beautiful.".to_owned(),
            created_at: now - Duration::weeks(3),
        },
    ]
}
