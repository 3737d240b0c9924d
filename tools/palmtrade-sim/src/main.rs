//! Palmtrade scenario simulator.
//!
//! Seeds a market with sellers and their listings, then drives a scripted
//! sequence of trading days: buyers browse, favorite listings, place
//! orders and message sellers; sellers reply and confirm; deliveries land
//! a day later and buyers leave reviews. Finishes with a JSON summary of
//! the market state (or the full state with `--dump-json`).

use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use palmtrade_common::conversation::ConversationKey;
use palmtrade_common::currency::format_kobo;
use palmtrade_common::identity::UserId;
use palmtrade_common::listing::{Listing, ListingId, Unit};
use palmtrade_common::message::{validate_text, Message, MessageId};
use palmtrade_common::notification::{Notification, NotificationId, NotificationKind};
use palmtrade_common::order::{Order, OrderId, OrderStatus};
use palmtrade_common::review::{Review, ReviewId};
use palmtrade_store::Market;

const SELLER_POOL: &[(&str, &str)] = &[
    ("Golden Farms", "Ikorodu, Lagos"),
    ("Mama Grace Oils", "Aba, Abia"),
    ("Delta Palms", "Warri, Delta"),
    ("Okomu Traders", "Benin City, Edo"),
    ("Sunrise Mills", "Calabar, Cross River"),
];

const BUYER_POOL: &[&str] = &["Adebayo", "Chinwe", "Emeka", "Funke", "Ibrahim", "Ngozi"];

#[derive(Parser)]
#[command(name = "palmtrade-sim", about = "Scripted palmtrade marketplace scenario")]
struct Cli {
    /// Sellers to seed (capped at the name pool size).
    #[arg(long, default_value_t = 3)]
    sellers: usize,

    /// Buyers to seed (capped at the name pool size).
    #[arg(long, default_value_t = 4)]
    buyers: usize,

    /// Trading days to simulate.
    #[arg(long, default_value_t = 5)]
    days: u32,

    /// RNG seed for the scenario.
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Print the full market state as JSON instead of the summary.
    #[arg(long)]
    dump_json: bool,
}

#[derive(Clone)]
struct Actor {
    id: UserId,
    name: String,
}

struct Sim {
    market: Market,
    rng: StdRng,
    clock: DateTime<Utc>,
    next_message_id: MessageId,
    next_order: u32,
    next_notification: u32,
    next_review: u32,
}

impl Sim {
    fn new(seed: u64) -> Self {
        Self {
            market: Market::new(),
            rng: StdRng::seed_from_u64(seed),
            clock: Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap(),
            next_message_id: 1,
            next_order: 1,
            next_notification: 1,
            next_review: 1,
        }
    }

    /// Advance the scenario clock by one minute and return the new time.
    fn tick(&mut self) -> DateTime<Utc> {
        self.clock += Duration::minutes(1);
        self.clock
    }

    fn seed_listings(&mut self, seller: &Actor, location: &str) {
        let units = [Unit::Litre, Unit::Jerrycan, Unit::Drum];
        for (i, unit) in units.iter().enumerate() {
            let now = self.tick();
            let price = match unit {
                Unit::Litre => 120_000,
                Unit::Jerrycan => 2_800_000,
                _ => 21_000_000,
            };
            let id = ListingId(format!("{}-l{}", seller.id, i + 1));
            self.market.listings.insert(Listing {
                id: id.clone(),
                title: format!("Red palm oil ({unit})"),
                description: format!("Fresh unrefined palm oil from {location}"),
                price_per_unit_kobo: price,
                unit: unit.clone(),
                location: location.to_string(),
                seller_id: seller.id.clone(),
                seller_name: seller.name.clone(),
                quantity_total: self.rng.gen_range(40..200),
                created_at: now,
                updated_at: now,
            });
            debug!(listing = %id.0, seller = %seller.name, "listed");
        }
    }

    fn send_message(
        &mut self,
        from: &Actor,
        to: &Actor,
        text: &str,
        listing_id: Option<ListingId>,
    ) -> Result<()> {
        let body = validate_text(text)?;
        let id = self.next_message_id;
        self.next_message_id += 1;
        let timestamp = self.tick();
        self.market.messages.append(Message {
            id,
            sender_id: from.id.clone(),
            receiver_id: to.id.clone(),
            sender_name: from.name.clone(),
            receiver_name: to.name.clone(),
            text: body.to_string(),
            timestamp,
            read: false,
            listing_id,
        });
        info!(from = %from.name, to = %to.name, "message sent");
        Ok(())
    }

    fn notify(&mut self, user: &UserId, kind: NotificationKind, title: &str, body: String) {
        let id = NotificationId(format!("n-{}", self.next_notification));
        self.next_notification += 1;
        let created_at = self.tick();
        self.market.notifications.push(Notification {
            id,
            user_id: user.clone(),
            kind,
            title: title.to_string(),
            body,
            read: false,
            action_url: None,
            created_at,
        });
    }

    fn place_order(&mut self, buyer: &Actor, listing_id: &ListingId) -> Result<Option<OrderId>> {
        let available = self.market.available_quantity(listing_id);
        if available == 0 {
            debug!(listing = %listing_id.0, "sold out, skipping order");
            return Ok(None);
        }
        let listing = match self.market.listings.get(listing_id) {
            Some(l) => l.clone(),
            None => return Ok(None),
        };

        let quantity = self.rng.gen_range(1..=available.min(5));
        let n = self.next_order;
        self.next_order += 1;
        let id = OrderId(format!("o-{n}"));
        let total = u64::from(quantity) * listing.price_per_unit_kobo;
        let created_at = self.tick();

        self.market.orders.place(Order {
            id: id.clone(),
            order_number: format!("ORD-2026-{n:03}"),
            listing_id: listing.id.clone(),
            listing_title: listing.title.clone(),
            quantity,
            total_price_kobo: total,
            status: OrderStatus::Pending,
            seller_id: listing.seller_id.clone(),
            seller_name: listing.seller_name.clone(),
            buyer_id: buyer.id.clone(),
            buyer_name: buyer.name.clone(),
            delivery_address: format!("{} depot, {}", buyer.name, listing.location),
            notes: None,
            created_at,
        });
        self.notify(
            &listing.seller_id,
            NotificationKind::Order,
            "New Order",
            format!(
                "{} ordered {} x {} ({})",
                buyer.name,
                quantity,
                listing.title,
                format_kobo(total)
            ),
        );
        info!(
            order = %id.0,
            buyer = %buyer.name,
            seller = %listing.seller_name,
            total = %format_kobo(total),
            "order placed"
        );
        Ok(Some(id))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut sim = Sim::new(cli.seed);

    let sellers: Vec<Actor> = SELLER_POOL
        .iter()
        .take(cli.sellers.clamp(1, SELLER_POOL.len()))
        .enumerate()
        .map(|(i, (name, _))| Actor {
            id: UserId(format!("s-{}", i + 1)),
            name: name.to_string(),
        })
        .collect();
    let buyers: Vec<Actor> = BUYER_POOL
        .iter()
        .take(cli.buyers.clamp(1, BUYER_POOL.len()))
        .enumerate()
        .map(|(i, name)| Actor {
            id: UserId(format!("b-{}", i + 1)),
            name: name.to_string(),
        })
        .collect();

    for (seller, (_, location)) in sellers.iter().zip(SELLER_POOL) {
        sim.seed_listings(seller, location);
    }
    info!(
        sellers = sellers.len(),
        buyers = buyers.len(),
        listings = sim.market.listings.len(),
        "market seeded"
    );

    for day in 1..=cli.days {
        info!(day, "--- trading day ---");

        // Buyers browse, favorite, order, and open a thread with the seller.
        for buyer in &buyers {
            let listings: Vec<Listing> = sim.market.listings.all().cloned().collect();
            if listings.is_empty() {
                break;
            }
            let listing = listings[sim.rng.gen_range(0..listings.len())].clone();

            if sim.rng.gen_bool(0.3) {
                sim.market.favorites.add(listing.clone());
            }

            if sim.rng.gen_bool(0.6) {
                if sim.place_order(buyer, &listing.id)?.is_some() {
                    let seller = Actor {
                        id: listing.seller_id.clone(),
                        name: listing.seller_name.clone(),
                    };
                    sim.send_message(
                        buyer,
                        &seller,
                        &format!(
                            "Good day, I just placed an order for {}. When can you deliver?",
                            listing.title
                        ),
                        Some(listing.id.clone()),
                    )?;
                }
            }
        }

        // Sellers catch up: read their threads, reply, confirm pending orders.
        for seller in &sellers {
            let threads: Vec<ConversationKey> = sim
                .market
                .messages
                .conversations_with(&seller.id)
                .filter(|conv| conv.unread_count > 0)
                .map(|conv| conv.key.clone())
                .collect();
            for key in threads {
                sim.market.messages.mark_read(&key, &seller.id);
                let counterpart_id = key
                    .participants()
                    .into_iter()
                    .find(|p| **p != seller.id)
                    .cloned();
                if let Some(counterpart_id) = counterpart_id {
                    let counterpart = buyers
                        .iter()
                        .find(|b| b.id == counterpart_id)
                        .cloned()
                        .unwrap_or(Actor {
                            id: counterpart_id,
                            name: "Customer".into(),
                        });
                    sim.send_message(
                        seller,
                        &counterpart,
                        "Thank you for your order. Delivery goes out within two days.",
                        None,
                    )?;
                }
            }

            let pending: Vec<OrderId> = sim
                .market
                .orders
                .by_seller(&seller.id)
                .filter(|o| o.status == OrderStatus::Pending)
                .map(|o| o.id.clone())
                .collect();
            for id in pending {
                sim.market.orders.set_status(&id, OrderStatus::Confirmed)?;
                let order = sim.market.orders.get(&id).expect("just confirmed").clone();
                sim.notify(
                    &order.buyer_id,
                    NotificationKind::Order,
                    "Order Confirmed",
                    format!("Your order {} has been confirmed by {}", order.order_number, order.seller_name),
                );
                info!(order = %id.0, seller = %seller.name, "order confirmed");
            }
        }

        // Buyers read the sellers' replies.
        for buyer in &buyers {
            let threads: Vec<ConversationKey> = sim
                .market
                .messages
                .conversations_with(&buyer.id)
                .filter(|conv| conv.unread_count > 0)
                .map(|conv| conv.key.clone())
                .collect();
            for key in threads {
                sim.market.messages.mark_read(&key, &buyer.id);
            }
        }

        // Confirmed orders from earlier days get delivered and reviewed.
        let cutoff = sim.clock - Duration::hours(20);
        let deliveries: Vec<Order> = sim
            .market
            .orders
            .all()
            .filter(|o| o.status == OrderStatus::Confirmed && o.created_at < cutoff)
            .cloned()
            .collect();
        for order in deliveries {
            sim.market.orders.set_status(&order.id, OrderStatus::Delivered)?;
            sim.notify(
                &order.buyer_id,
                NotificationKind::Order,
                "Order Delivered",
                format!("Your order {} has been delivered", order.order_number),
            );

            let rating = sim.rng.gen_range(3..=5);
            let rn = sim.next_review;
            sim.next_review += 1;
            let created_at = sim.tick();
            sim.market.reviews.add(Review {
                id: ReviewId(format!("r-{rn}")),
                listing_id: order.listing_id.clone(),
                seller_id: order.seller_id.clone(),
                buyer_id: order.buyer_id.clone(),
                buyer_name: order.buyer_name.clone(),
                rating,
                comment: "Arrived as described, good quality oil.".into(),
                created_at,
            });
            info!(order = %order.id.0, rating, "delivered and reviewed");
        }

        sim.clock += Duration::hours(24);
    }

    for buyer in &buyers {
        info!(
            buyer = %buyer.name,
            unread = sim.market.messages.unread_total(&buyer.id),
            notifications = sim.market.notifications.unread_count(&buyer.id),
            "end-of-run inbox"
        );
    }

    if cli.dump_json {
        println!("{}", serde_json::to_string_pretty(&sim.market)?);
    } else {
        let by_status = |status: OrderStatus| sim.market.orders.all().filter(|o| o.status == status).count();
        let summary = serde_json::json!({
            "listings": sim.market.listings.len(),
            "orders": {
                "total": sim.market.orders.len(),
                "pending": by_status(OrderStatus::Pending),
                "confirmed": by_status(OrderStatus::Confirmed),
                "delivered": by_status(OrderStatus::Delivered),
                "cancelled": by_status(OrderStatus::Cancelled),
            },
            "messages": sim.market.messages.message_count(),
            "conversations": sim.market.messages.conversation_count(),
            "reviews": sim.market.reviews.len(),
            "notifications": sim.market.notifications.len(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
