//! The bakery menu. A static, read-only catalog: entries are defined here at
//! build time and never mutated or deleted while the application runs.

use std::sync::LazyLock;

use crate::models::Product;

pub static CATEGORIES: [&str; 4] = ["Cakes", "Pastries", "Breads", "Cookies"];

static PRODUCTS: LazyLock<Vec<Product>> = LazyLock::new(|| {
    vec![
        product(1, "Chocolate Cake", 3599, "Rich chocolate layers with ganache", "Cakes", "chocolate-cake.jpg"),
        product(2, "Fresh Croissants", 499, "Buttery, flaky perfection", "Pastries", "croissants.jpg"),
        product(3, "Sourdough Bread", 799, "Artisan sourdough with crispy crust", "Breads", "sourdough.jpg"),
        product(4, "Chocolate Chip Cookies", 1299, "Classic cookies, dozen", "Cookies", "cookies.jpg"),
        product(5, "Strawberry Cheesecake", 3299, "Creamy cheesecake with fresh strawberries", "Cakes", "cheesecake.jpg"),
        product(6, "French Macarons", 1899, "Assorted flavors, box of 12", "Pastries", "macarons.jpg"),
    ]
});

fn product(
    id: i32,
    name: &str,
    price: i64,
    description: &str,
    category: &str,
    image: &str,
) -> Product {
    Product {
        id,
        name: name.to_string(),
        price,
        description: description.to_string(),
        category: category.to_string(),
        image: image.to_string(),
    }
}

pub fn products() -> &'static [Product] {
    &PRODUCTS
}

pub fn find(id: i32) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_is_well_formed() {
        let products = products();
        assert!(!products.is_empty());

        let ids: HashSet<i32> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), products.len(), "product ids must be unique");

        for p in products {
            assert!(p.id > 0);
            assert!(p.price >= 0);
            assert!(CATEGORIES.contains(&p.category.as_str()));
        }
    }

    #[test]
    fn find_returns_matching_product() {
        let cake = find(1).expect("chocolate cake");
        assert_eq!(cake.name, "Chocolate Cake");
        assert!(find(999).is_none());
    }
}
