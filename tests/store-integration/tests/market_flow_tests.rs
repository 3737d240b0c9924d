//! Cross-store marketplace flows: listings, orders, reviews, favorites,
//! notifications, session.

use chrono::Utc;
use palmtrade_common::identity::UserRole;
use palmtrade_common::listing::{ListingPatch, Unit};
use palmtrade_common::notification::{Notification, NotificationId, NotificationKind};
use palmtrade_common::order::OrderStatus;
use palmtrade_store::orders::OrderError;
use palmtrade_store::session::{AuthError, Session};
use palmtrade_store_integration::harness::Marketplace;

#[test]
fn full_purchase_flow() {
    let mut mp = Marketplace::new();
    let seller = mp.seller("Golden Farms");
    let buyer = mp.buyer("Adebayo");

    let listing = mp.list(&seller, "Red palm oil (litre)", Unit::Litre, 120_000, 100);
    assert_eq!(mp.market.available_quantity(&listing), 100);

    let order = mp.place_order(&buyer, &listing, 30);
    assert_eq!(mp.market.available_quantity(&listing), 70);

    mp.market.orders.set_status(&order, OrderStatus::Confirmed).unwrap();
    assert_eq!(mp.market.available_quantity(&listing), 70, "confirmed orders still hold stock");

    mp.market.orders.set_status(&order, OrderStatus::Delivered).unwrap();
    assert_eq!(mp.market.available_quantity(&listing), 100, "delivered orders release their hold");

    mp.review(&buyer, &listing, 5, "Excellent oil, well packaged.");
    assert_eq!(mp.market.reviews.average_rating(&listing), 5.0);
    assert_eq!(mp.market.reviews.by_seller(&seller.id).count(), 1);
}

#[test]
fn cancelled_order_releases_stock() {
    let mut mp = Marketplace::new();
    let seller = mp.seller("Delta Palms");
    let buyer = mp.buyer("Funke");
    let listing = mp.list(&seller, "Palm kernel oil", Unit::Jerrycan, 2_800_000, 20);

    let order = mp.place_order(&buyer, &listing, 8);
    assert_eq!(mp.market.available_quantity(&listing), 12);

    mp.market.orders.set_status(&order, OrderStatus::Cancelled).unwrap();
    assert_eq!(mp.market.available_quantity(&listing), 20);
}

#[test]
fn delivered_orders_cannot_be_cancelled() {
    let mut mp = Marketplace::new();
    let seller = mp.seller("Okomu Traders");
    let buyer = mp.buyer("Ibrahim");
    let listing = mp.list(&seller, "Red palm oil (drum)", Unit::Drum, 21_000_000, 10);

    let order = mp.place_order(&buyer, &listing, 2);
    mp.market.orders.set_status(&order, OrderStatus::Confirmed).unwrap();
    mp.market.orders.set_status(&order, OrderStatus::Delivered).unwrap();

    let err = mp
        .market
        .orders
        .set_status(&order, OrderStatus::Cancelled)
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition { .. }));
}

#[test]
fn listing_patch_updates_price_and_stock() {
    let mut mp = Marketplace::new();
    let seller = mp.seller("Mama Grace Oils");
    let listing = mp.list(&seller, "Red palm oil (litre)", Unit::Litre, 120_000, 50);

    let updated = mp.market.listings.update(
        &listing,
        ListingPatch {
            price_per_unit_kobo: Some(135_000),
            quantity_total: Some(40),
            ..Default::default()
        },
    );
    assert!(updated);

    let stored = mp.market.listings.get(&listing).unwrap();
    assert_eq!(stored.price_per_unit_kobo, 135_000);
    assert_eq!(mp.market.available_quantity(&listing), 40);
}

#[test]
fn favorites_track_saved_listings() {
    let mut mp = Marketplace::new();
    let seller = mp.seller("Sunrise Mills");
    let a = mp.list(&seller, "Red palm oil (litre)", Unit::Litre, 120_000, 10);
    let b = mp.list(&seller, "Palm kernel oil", Unit::Jerrycan, 2_800_000, 10);

    let listing_a = mp.market.listings.get(&a).unwrap().clone();
    let listing_b = mp.market.listings.get(&b).unwrap().clone();
    mp.market.favorites.add(listing_a.clone());
    mp.market.favorites.add(listing_a);
    mp.market.favorites.add(listing_b);

    assert_eq!(mp.market.favorites.len(), 2);
    assert!(mp.market.favorites.contains(&a));

    mp.market.favorites.remove(&a);
    assert!(!mp.market.favorites.contains(&a));
    assert!(mp.market.favorites.contains(&b));
}

#[test]
fn notification_badge_lifecycle() {
    let mut mp = Marketplace::new();
    let buyer = mp.buyer("Ngozi");
    let other = mp.buyer("Emeka");

    for (i, kind) in [NotificationKind::Order, NotificationKind::Promotion, NotificationKind::Message]
        .into_iter()
        .enumerate()
    {
        mp.market.notifications.push(Notification {
            id: NotificationId(format!("n-{i}")),
            user_id: buyer.id.clone(),
            kind,
            title: "Update".into(),
            body: "Something happened".into(),
            read: false,
            action_url: None,
            created_at: Utc::now(),
        });
    }
    mp.market.notifications.push(Notification {
        id: NotificationId("n-other".into()),
        user_id: other.id.clone(),
        kind: NotificationKind::System,
        title: "Account Verified".into(),
        body: "Your buyer account has been verified".into(),
        read: false,
        action_url: None,
        created_at: Utc::now(),
    });

    assert_eq!(mp.market.notifications.unread_count(&buyer.id), 3);

    mp.market.notifications.mark_read(&NotificationId("n-0".into()));
    assert_eq!(mp.market.notifications.unread_count(&buyer.id), 2);

    mp.market.notifications.mark_all_read(&buyer.id);
    assert_eq!(mp.market.notifications.unread_count(&buyer.id), 0);
    assert_eq!(mp.market.notifications.unread_count(&other.id), 1);

    mp.market.notifications.clear(&buyer.id);
    assert_eq!(mp.market.notifications.for_user(&buyer.id).count(), 0);
    assert_eq!(mp.market.notifications.for_user(&other.id).count(), 1);
}

#[test]
fn session_sign_in_and_out() {
    let mut session = Session::new();
    assert_eq!(
        session.log_in("", "", UserRole::Buyer),
        Err(AuthError::InvalidCredentials)
    );

    let user = session
        .sign_up("grace@palmtrade.ng", "secret", "Mama Grace", UserRole::Seller)
        .unwrap();
    assert_eq!(user.name, "Mama Grace");
    assert_eq!(user.role, UserRole::Seller);

    session.log_out();
    assert!(!session.is_signed_in());
}
