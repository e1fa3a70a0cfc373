//! Starter Menu

use rust_decimal::Decimal;

use super::models::CatalogItem;

const STARTER_MENU: [(&str, &str, i64); 24] = [
    ("Classic Milk Tea", "Milk Tea", 475),
    ("Taro Milk Tea", "Milk Tea", 525),
    ("Thai Tea", "Milk Tea", 500),
    ("Jasmine Green Tea", "Brewed Tea", 375),
    ("Oolong Tea", "Brewed Tea", 375),
    ("Wintermelon Tea", "Fruit Tea", 450),
    ("Mango Green Tea", "Fruit Tea", 525),
    ("Strawberry Tea", "Fruit Tea", 525),
    ("Passion Fruit Tea", "Fruit Tea", 500),
    ("Brown Sugar Boba Milk", "Specialty", 575),
    ("Matcha Latte", "Specialty", 575),
    ("Honey Lemon Tea", "Fruit Tea", 475),
    ("Lychee Tea", "Fruit Tea", 500),
    ("Peach Oolong Tea", "Fruit Tea", 525),
    ("Brown Sugar Milk Tea", "Milk Tea", 550),
    ("Mango Milk Tea", "Milk Tea", 550),
    ("Strawberry Milk Tea", "Milk Tea", 550),
    ("Honeydew Milk Tea", "Milk Tea", 550),
    ("Wintermelon Milk Tea", "Milk Tea", 550),
    ("Grape Chia", "Milk Tea", 550),
    ("Passion Fruit", "Milk Tea", 550),
    ("Oolong Milk Tea", "Milk Tea", 550),
    ("Honey Lemon Milk Tea", "Milk Tea", 550),
    ("Peach Milk Tea", "Milk Tea", 550),
];

/// The shop's opening menu, unsaved.
#[must_use]
pub fn starter_menu() -> Vec<CatalogItem> {
    STARTER_MENU
        .iter()
        .map(|(name, category, cents)| CatalogItem::new(*name, *category, Decimal::new(*cents, 2)))
        .collect()
}
