//! Sample listings written by the seed operation.

use crate::db::PriceListing;

/// Partition key of the sample data.
pub const SEED_FRAGRANCE: &str = "Dior_Sauvage";

struct SeedListing {
    store_name: &'static str,
    site_link: &'static str,
    product_name: &'static str,
    bottle_size: &'static str,
    price: &'static str,
}

const SEED_LISTINGS: [SeedListing; 7] = [
    SeedListing {
        store_name: "Amazon",
        site_link: "https://www.amazon.com/s?k=Sauvage&crid=28J6Y0MEHKMUS&sprefix=sauvage+%2Caps%2C161&ref=nb_sb_noss_2",
        product_name: "Dior Sauvage Eau de Toilette Spray for Men",
        bottle_size: "3.4 oz",
        price: "$124.16",
    },
    SeedListing {
        store_name: "FragranceNet.com",
        site_link: "https://www.fragrancenet.com/cologne/christian-dior/dior-sauvage/edt#283046",
        product_name: "Dior Sauvage Eau De Toilette Spray Refillable",
        bottle_size: "3.4 oz",
        price: "$129.99",
    },
    SeedListing {
        store_name: "Perfumania",
        site_link: "https://perfumania.com/search?q=Sauvage",
        product_name: "Sauvage Eau de Toilette Spray for Men by Christian Dior",
        bottle_size: "3.4 oz",
        price: "$91.95",
    },
    SeedListing {
        store_name: "Sephora",
        site_link: "https://www.sephora.com/search?keyword=Sauvage",
        product_name: "DIOR Sauvage Eau de Toilette",
        bottle_size: "3.4 oz",
        price: "$112.00",
    },
    SeedListing {
        store_name: "FragranceX",
        site_link: "https://www.fragrancex.com/search/search_results?stext=Sauvage+",
        product_name: "Sauvage by Christian Dior",
        bottle_size: "3.4 oz",
        price: "$123.55",
    },
    SeedListing {
        store_name: "ThePerfumeSpot",
        site_link: "https://theperfumespot.com/search-magic.html?query=Sauvage+&pu=null",
        product_name: "Sauvage by Christian Dior Eau De Toilette Spray",
        bottle_size: "6.8 oz",
        price: "$178.35",
    },
    SeedListing {
        store_name: "Walmart",
        site_link: "https://www.walmart.com/search?q=Sauvage+",
        product_name: "Dior Sauvage Eau de Toilette, Cologne for Men",
        bottle_size: "3.4 oz",
        price: "$66.99",
    },
];

/// The sample rows, in write order.
pub fn seed_listings() -> Vec<PriceListing> {
    SEED_LISTINGS
        .iter()
        .map(|seed| PriceListing {
            fragrance_name: SEED_FRAGRANCE.to_string(),
            store_name: seed.store_name.to_string(),
            site_link: seed.site_link.to_string(),
            product_name: seed.product_name.to_string(),
            bottle_size: seed.bottle_size.to_string(),
            price: seed.price.to_string(),
        })
        .collect()
}
