//! House menu used to seed the in-memory catalog and the `productos` table.

use cevicheria_core::Price;

use crate::models::ProductDraft;

struct Dish {
    name: &'static str,
    price: u32,
    category: &'static str,
    description: &'static str,
    ingredients: &'static [&'static str],
}

const MENU: &[Dish] = &[
    Dish {
        name: "Ceviche Clásico",
        price: 11_900,
        category: "Ceviche",
        description: "Pescado del día marinado en limón con cebolla morada y ají limo.",
        ingredients: &["pescado", "limón", "cebolla morada", "ají limo", "cilantro", "camote"],
    },
    Dish {
        name: "Ceviche Mixto",
        price: 12_500,
        category: "Ceviche",
        description: "Pescado, pulpo, calamar y camarón en leche de tigre.",
        ingredients: &["pescado", "pulpo", "calamar", "camarón", "limón", "ají limo", "choclo"],
    },
    Dish {
        name: "Leche de Tigre",
        price: 6_900,
        category: "Ceviche",
        description: "Jugo concentrado del ceviche servido en copa.",
        ingredients: &["limón", "pescado", "apio", "ají limo", "kión"],
    },
    Dish {
        name: "Causa Limeña",
        price: 7_500,
        category: "Entradas",
        description: "Papa amarilla prensada rellena de pollo y palta.",
        ingredients: &["papa amarilla", "pollo", "palta", "mayonesa", "ají amarillo", "limón"],
    },
    Dish {
        name: "Chupe de Camarones",
        price: 13_900,
        category: "Sopas",
        description: "Sopa cremosa de camarones con huevo escalfado.",
        ingredients: &["camarón", "leche", "huevo", "queso fresco", "ají panca", "choclo"],
    },
    Dish {
        name: "Parihuela",
        price: 14_500,
        category: "Sopas",
        description: "Sopa de mariscos y pescado al estilo chalaco.",
        ingredients: &["pescado", "choros", "calamar", "ají panca", "chicha de jora"],
    },
    Dish {
        name: "Arroz con Mariscos",
        price: 13_500,
        category: "Platos de fondo",
        description: "Arroz graneado con mariscos y salsa criolla.",
        ingredients: &["arroz", "calamar", "camarón", "choros", "ají amarillo", "cebolla morada"],
    },
    Dish {
        name: "Jalea Mixta",
        price: 15_900,
        category: "Platos de fondo",
        description: "Mariscos y pescado fritos con yuca y sarsa criolla.",
        ingredients: &["pescado", "calamar", "camarón", "yuca", "limón", "cebolla morada"],
    },
    Dish {
        name: "Chicha Morada",
        price: 3_500,
        category: "Bebidas",
        description: "Refresco de maíz morado con piña y canela.",
        ingredients: &["maíz morado", "piña", "canela", "clavo de olor", "limón"],
    },
    Dish {
        name: "Suspiro a la Limeña",
        price: 4_900,
        category: "Postres",
        description: "Manjar blanco con merengue al oporto.",
        ingredients: &["leche", "huevo", "azúcar", "oporto", "canela"],
    },
];

/// The house menu, in display order.
#[must_use]
pub fn menu() -> Vec<ProductDraft> {
    MENU.iter()
        .map(|dish| ProductDraft {
            name: dish.name.to_owned(),
            price: Price::from_units(dish.price),
            category: dish.category.to_owned(),
            stock: crate::models::product::DEFAULT_STOCK,
            description: dish.description.to_owned(),
            ingredients: dish.ingredients.iter().map(|&i| i.to_owned()).collect(),
        })
        .collect()
}
