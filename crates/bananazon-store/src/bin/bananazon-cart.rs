//! # Bananazon Cart CLI
//!
//! Drives the persistent cart from a terminal against the built-in catalog.
//!
//! ## Usage
//! ```bash
//! # Show the cart with its order summary
//! cargo run -p bananazon-store --bin bananazon-cart -- list
//!
//! # Add two Organic Cavendish Bananas, then set them to five
//! cargo run -p bananazon-store --bin bananazon-cart -- add 1 2
//! cargo run -p bananazon-store --bin bananazon-cart -- set 1 5
//!
//! # Browse the catalog
//! cargo run -p bananazon-store --bin bananazon-cart -- products exotic --price 5to10
//! cargo run -p bananazon-store --bin bananazon-cart -- search ice cream
//!
//! # Use a scratch directory instead of the platform data dir
//! cargo run -p bananazon-store --bin bananazon-cart -- --dir ./tmp list
//! ```
//!
//! The cart lives in `<data dir>/<storage key>.json` and survives between
//! runs. `RUST_LOG=debug` shows every store operation on stderr.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use bananazon_core::validation::{validate_quantity, validate_search_query};
use bananazon_core::{Cart, Catalog, Product, ProductFilter, ProductId};
use bananazon_store::{init_tracing, CartStore, StoreConfig};

const USAGE: &str = "\
Bananazon cart

Usage: bananazon-cart [OPTIONS] <COMMAND> [ARGS]

Commands:
  list                          Show the cart and order summary
  add <ID> [QTY]                Add a product (default quantity 1)
  set <ID> <QTY>                Set the quantity of a cart line
  remove <ID>                   Remove a cart line
  clear                         Empty the cart
  products [CATEGORY] [--price <BAND>] [--rating <BAND>]
                                List catalog products
  show <ID>                     Show product details and related products
  search <QUERY>...             Search the catalog

Options:
  -c, --config <PATH>    store.toml to load
  -d, --dir <DIR>        Storage directory (overrides config)
  -h, --help             Show this help message

Bands: under5, 5to10, over10 (price); 4plus, 3plus (rating)";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut config_path: Option<PathBuf> = None;
    let mut storage_dir: Option<PathBuf> = None;
    let mut rest: Vec<String> = Vec::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => config_path = args.next().map(PathBuf::from),
            "--dir" | "-d" => storage_dir = args.next().map(PathBuf::from),
            "--help" | "-h" => {
                println!("{}", USAGE);
                return Ok(());
            }
            _ => rest.push(arg),
        }
    }

    let Some((command, params)) = rest.split_first() else {
        println!("{}", USAGE);
        return Ok(());
    };

    let mut config = StoreConfig::load_or_default(config_path);
    if storage_dir.is_some() {
        config.storage_dir = storage_dir;
    }

    let catalog = Catalog::seed();

    // Catalog-only commands don't need storage.
    match command.as_str() {
        "products" => return list_products(&catalog, &config, params),
        "show" => return show_product(&catalog, &config, params),
        "search" => return search(&catalog, &config, params),
        _ => {}
    }

    let storage = config.file_storage()?;
    let store = CartStore::open(Arc::new(storage), &config);

    match command.as_str() {
        "list" => {}
        "add" => {
            let product = catalog.require(parse_id(params.first())?)?;
            let quantity = match params.get(1) {
                Some(q) => parse_quantity(q)?,
                None => 1,
            };
            store.add_item(product, quantity);
            println!("✓ Added {} × {}", quantity, product.name);
        }
        "set" => {
            let id = parse_id(params.first())?;
            let quantity = parse_quantity(params.get(1).ok_or("missing quantity")?)?;
            if !store.update_quantity(id, quantity) {
                println!("⚠ Cart unchanged");
            }
        }
        "remove" => {
            let id = parse_id(params.first())?;
            if !store.remove_item(id) {
                println!("⚠ Product {} is not in the cart", id);
            }
        }
        "clear" => {
            store.clear_cart();
            println!("✓ Cart cleared");
        }
        other => {
            eprintln!("Unknown command '{}'", other);
            eprintln!();
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }

    print_cart(&store.snapshot(), &store, &config);
    Ok(())
}

// =============================================================================
// Commands
// =============================================================================

fn list_products(
    catalog: &Catalog,
    config: &StoreConfig,
    params: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut category: Option<&str> = None;
    let mut price: Option<&str> = None;
    let mut rating: Option<&str> = None;

    let mut i = 0;
    while i < params.len() {
        match params[i].as_str() {
            "--price" => {
                price = params.get(i + 1).map(String::as_str);
                i += 1;
            }
            "--rating" => {
                rating = params.get(i + 1).map(String::as_str);
                i += 1;
            }
            other => category = Some(other),
        }
        i += 1;
    }

    // Strict parsing here, so a typo is reported instead of ignored.
    if let Some(p) = price {
        p.parse::<bananazon_core::PriceBand>()?;
    }
    if let Some(r) = rating {
        r.parse::<bananazon_core::RatingBand>()?;
    }

    let filter = ProductFilter::from_params(category, price, rating);
    let products = catalog.filter(&filter);

    let categories: Vec<String> = catalog
        .categories()
        .iter()
        .map(|c| format!("{} ({})", c.name, c.count))
        .collect();
    println!("Categories: {}", categories.join(" · "));
    println!();

    if products.is_empty() {
        println!("No products match.");
    }
    for product in products {
        print_product_line(product, config);
    }
    Ok(())
}

fn show_product(
    catalog: &Catalog,
    config: &StoreConfig,
    params: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let product = catalog.require(parse_id(params.first())?)?;

    println!("{}", product.name);
    println!("================================");
    println!("{}  ·  {}", config.format_currency(product.price), product.category);
    if let Some(rating) = product.rating {
        match product.review_average() {
            Some(average) => println!(
                "Rating: {:.1} ({} reviews, averaging {:.1})",
                rating,
                product.reviews.len(),
                average
            ),
            None => println!("Rating: {:.1}", rating),
        }
    }
    if let Some(origin) = &product.origin {
        println!("Origin: {}", origin);
    }
    println!("Organic: {}", if product.organic { "yes" } else { "no" });
    println!("In stock: {}", if product.in_stock { "yes" } else { "no" });
    println!();
    println!("{}", product.long_description.as_deref().unwrap_or(&product.description));

    if let Some(n) = &product.nutrition {
        println!();
        println!(
            "Nutrition: {} kcal, protein {}, fat {}, carbs {}, fiber {}, sugar {}",
            n.calories, n.protein, n.fat, n.carbs, n.fiber, n.sugar
        );
    }

    for review in &product.reviews {
        println!();
        println!("  {} ★{} ({})", review.user, review.rating, review.date);
        println!("  {}", review.comment);
    }

    let related = catalog.related(product.id, 4);
    if !related.is_empty() {
        println!();
        println!("Related:");
        for other in related {
            print_product_line(other, config);
        }
    }
    Ok(())
}

fn search(
    catalog: &Catalog,
    config: &StoreConfig,
    params: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let query = validate_search_query(&params.join(" "))?;
    let results = catalog.search(&query);

    println!("{} result(s) for \"{}\"", results.len(), query);
    for product in results {
        print_product_line(product, config);
    }
    Ok(())
}

// =============================================================================
// Output
// =============================================================================

fn print_product_line(product: &Product, config: &StoreConfig) {
    let rating = product
        .rating
        .map(|r| format!("★{:.1}", r))
        .unwrap_or_default();
    println!(
        "  [{}] {:<32} {:>8}  {:<10} {}",
        product.id,
        product.name,
        config.format_currency(product.price),
        product.category,
        rating
    );
}

fn print_cart(cart: &Cart, store: &CartStore, config: &StoreConfig) {
    println!();
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for item in cart.items() {
        println!(
            "  [{}] {:<32} {:>3} × {:>8} = {:>9}",
            item.id,
            item.name,
            item.quantity,
            config.format_currency(item.price),
            config.format_currency(item.line_total())
        );
    }

    let totals = store.totals();
    println!("  ------------------------------------------------------------------");
    println!("  Items     {:>10}", totals.item_count);
    println!("  Subtotal  {:>10}", config.format_currency(totals.subtotal));
    println!("  Shipping  {:>10}", config.format_currency(totals.shipping));
    println!("  Total     {:>10}", config.format_currency(totals.total));
}

// =============================================================================
// Argument Parsing
// =============================================================================

fn parse_id(arg: Option<&String>) -> Result<ProductId, Box<dyn std::error::Error>> {
    let arg = arg.ok_or("missing product id")?;
    arg.parse()
        .map_err(|_| format!("'{}' is not a product id", arg).into())
}

fn parse_quantity(arg: &str) -> Result<i64, Box<dyn std::error::Error>> {
    let quantity: i64 = arg
        .parse()
        .map_err(|_| format!("'{}' is not a quantity", arg))?;
    Ok(validate_quantity(quantity)?)
}
