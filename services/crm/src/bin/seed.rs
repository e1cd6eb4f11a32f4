//! One-shot demo-data seeder. Wipes the CRM tables and repopulates them with
//! a demo user, products, customers, orders, and contact logs through the
//! same repositories and usecases the service runs on.

use anyhow::Context as _;
use chrono::{Duration, Utc};
use clap::Parser;
use rand::RngExt;
use rust_decimal::Decimal;
use sea_orm::{Database, DatabaseConnection, EntityTrait};
use tracing::info;
use uuid::Uuid;

use kontor_crm_schema::{contacts, customers, login_codes, order_items, orders, products, users};
use kontor_domain::contact::ContactChannel;
use kontor_domain::order::OrderStatus;
use kontor_domain::user::UserRole;

use kontor_crm::domain::repository::{CustomerRepository, ProductRepository, UserRepository};
use kontor_crm::domain::types::{Customer, Product, User};
use kontor_crm::infra::db::{
    DbContactRepository, DbCustomerRepository, DbOrderRepository, DbProductRepository,
    DbUserRepository,
};
use kontor_crm::usecase::contact::{LogContactInput, LogContactUseCase};
use kontor_crm::usecase::order::{CreateOrderInput, CreateOrderUseCase, OrderItemInput};
use kontor_crm::usecase::password::hash_password;

#[derive(Parser)]
#[command(name = "seed", about = "Populate the CRM database with demo data")]
struct Args {
    /// PostgreSQL connection URL. Falls back to `DATABASE_URL`.
    #[arg(long)]
    database_url: Option<String>,
}

const PRODUCTS: &[(&str, &str, &str)] = &[
    ("P-100", "Beratungspaket Basic", "890.00"),
    ("P-200", "Beratungspaket Plus", "1490.00"),
    ("P-300", "Supportvertrag", "590.00"),
    ("P-400", "Workshop Tagessatz", "1200.00"),
    ("P-500", "Lizenz SMALL", "49.00"),
    ("P-600", "Lizenz MEDIUM", "99.00"),
    ("P-700", "Lizenz LARGE", "199.00"),
];

const CUSTOMERS: &[(&str, &str, &str, &str, &str)] = &[
    ("Acme GmbH", "Max Mustermann", "max@acme.example", "+43 1 234567", "Hauptkunde Wien"),
    ("Blue Widgets OG", "Anna Blau", "anna@blue.example", "+43 699 111", "Interessiert an Upgrade"),
    ("TechNova GmbH", "Laura Huber", "laura@technova.example", "+43 316 9999", "Cloud-Projekt 2025"),
    ("Grün & Co KG", "Peter Grün", "peter@gruen.example", "+43 512 8888", "Supportvertrag Bronze"),
    ("Alpha Consult", "Sabine Weiss", "sabine@alpha.example", "+43 2742 12345", "Workshops geplant"),
    ("Bergblick Hotels", "Johann Steiner", "johann@bergblick.example", "+43 6542 7777", "Saisonbetrieb"),
    ("CityShop e.U.", "Martin Schwarz", "martin@cityshop.example", "+43 1 7654321", "E-Commerce"),
    ("DigiFactory GmbH", "Lisa König", "lisa@digifactory.example", "+43 732 5555", "Automation"),
    ("EventPro OG", "Thomas Fuchs", "thomas@eventpro.example", "+43 1 4444", "Events & Tickets"),
    ("FreshFoods KG", "Maria Grün", "maria@freshfoods.example", "+43 662 3333", "Lieferkettenanalyse"),
];

const SUBJECTS: &[&str] = &[
    "Rückfrage zum Angebot",
    "Support-Anfrage",
    "Quartalsgespräch",
    "Lizenzverlängerung",
    "Kickoff Meeting",
    "Status-Update",
];

const STATUSES: &[OrderStatus] = &[OrderStatus::Open, OrderStatus::Paid, OrderStatus::Cancelled];

const CHANNELS: &[ContactChannel] = &[
    ContactChannel::Phone,
    ContactChannel::Email,
    ContactChannel::Meeting,
    ContactChannel::Chat,
];

fn rand_range(lo: i64, hi: i64) -> i64 {
    let mut rng = rand::rng();
    rng.random_range(lo..hi)
}

fn pick<T: Copy>(items: &[T]) -> T {
    let mut rng = rand::rng();
    items[rng.random_range(0..items.len())]
}

/// Random timestamp within roughly the last two years.
fn random_recent_date() -> chrono::DateTime<Utc> {
    Utc::now() - Duration::days(rand_range(0, 730)) - Duration::hours(rand_range(0, 24))
}

async fn wipe(db: &DatabaseConnection) -> anyhow::Result<()> {
    // FK order: children before parents.
    order_items::Entity::delete_many().exec(db).await?;
    orders::Entity::delete_many().exec(db).await?;
    contacts::Entity::delete_many().exec(db).await?;
    login_codes::Entity::delete_many().exec(db).await?;
    customers::Entity::delete_many().exec(db).await?;
    products::Entity::delete_many().exec(db).await?;
    users::Entity::delete_many().exec(db).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    kontor_core::tracing::init_tracing();
    let args = Args::parse();

    let database_url = match args.database_url {
        Some(url) => url,
        None => std::env::var("DATABASE_URL").context("DATABASE_URL")?,
    };
    let db = Database::connect(&database_url).await?;
    wipe(&db).await?;

    let user_repo = DbUserRepository { db: db.clone() };
    let product_repo = DbProductRepository { db: db.clone() };
    let customer_repo = DbCustomerRepository { db: db.clone() };

    let now = Utc::now();

    // Demo user (Chef)
    let chef = User {
        id: Uuid::now_v7(),
        email: "admin@example.com".to_owned(),
        password_hash: hash_password("admin123")?,
        role: UserRole::Chef,
        created_at: now,
    };
    user_repo.create(&chef).await?;

    // Products
    let mut product_list = Vec::with_capacity(PRODUCTS.len());
    for (sku, name, price) in PRODUCTS {
        let product = Product {
            id: Uuid::now_v7(),
            sku: (*sku).to_owned(),
            name: (*name).to_owned(),
            unit_price: price.parse::<Decimal>()?,
            created_at: now,
        };
        product_repo.create(&product).await?;
        product_list.push(product);
    }

    // Customers
    let mut customer_list = Vec::with_capacity(CUSTOMERS.len());
    for (company, contact_name, email, phone, notes) in CUSTOMERS {
        let customer = Customer {
            id: Uuid::now_v7(),
            company: (*company).to_owned(),
            contact_name: Some((*contact_name).to_owned()),
            email: Some((*email).to_owned()),
            phone: Some((*phone).to_owned()),
            notes: Some((*notes).to_owned()),
            street: Some("Beispielstraße 1".to_owned()),
            zip_code: Some("1010".to_owned()),
            city: Some("Wien".to_owned()),
            created_at: now - Duration::days(rand_range(30, 400)),
            updated_at: now,
        };
        customer_repo.create(&customer).await?;
        customer_list.push(customer);
    }

    // Orders with items; totals are computed by the usecase.
    let create_order = CreateOrderUseCase {
        orders: DbOrderRepository { db: db.clone() },
        products: DbProductRepository { db: db.clone() },
        customers: DbCustomerRepository { db: db.clone() },
    };
    let mut order_count = 0u32;
    for (seq, customer) in customer_list.iter().enumerate() {
        for n in 0..rand_range(3, 9) {
            let items = (0..rand_range(1, 5))
                .map(|_| OrderItemInput {
                    product_id: pick_product(&product_list).id,
                    quantity: rand_range(1, 6) as i32,
                })
                .collect();
            create_order
                .execute(CreateOrderInput {
                    customer_id: customer.id,
                    order_number: format!("ORD-{:03}-{:03}", seq + 1, n + 1),
                    order_date: Some(random_recent_date()),
                    status: pick(STATUSES),
                    currency: "EUR".to_owned(),
                    items,
                })
                .await?;
            order_count += 1;
        }
    }

    // Contact logs, authored by the chef.
    let log_contact = LogContactUseCase {
        contacts: DbContactRepository { db: db.clone() },
        customers: DbCustomerRepository { db: db.clone() },
    };
    let mut contact_count = 0u32;
    for customer in &customer_list {
        for _ in 0..rand_range(3, 9) {
            log_contact
                .execute(LogContactInput {
                    customer_id: customer.id,
                    user_id: Some(chef.id),
                    channel: pick(CHANNELS),
                    subject: pick(SUBJECTS).to_owned(),
                    notes: Some("Beispielkontakt (Seeder).".to_owned()),
                    rating: Some(rand_range(1, 6) as u8),
                    contact_at: Some(random_recent_date()),
                })
                .await?;
            contact_count += 1;
        }
    }

    info!(
        customers = customer_list.len(),
        products = product_list.len(),
        orders = order_count,
        contacts = contact_count,
        "seed complete"
    );
    Ok(())
}

fn pick_product(products: &[Product]) -> &Product {
    let mut rng = rand::rng();
    &products[rng.random_range(0..products.len())]
}
