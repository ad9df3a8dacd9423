//! Output formatting for the CLI.
//!
//! Amounts are printed exactly as the server computed them, two decimals.

use std::fmt::Write;

use clap::ValueEnum;
use serde::Serialize;

use api_types::{
    AdminRestaurant, AdminUser, Cart, Complaint, DeliveryPartner, Dish, Fee, Offer, Order,
    ReorderResponse, Restaurant, User,
};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print `value` as JSON, or as the text `render` produces.
pub fn print<T, F>(value: &T, render: F, format: OutputFormat)
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Text => print!("{}", render(value)),
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error: could not encode output: {e}"),
        },
    }
}

/// Print a success message.
pub fn print_success(message: &str, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{message}"),
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "status": "success", "message": message }));
        }
    }
}

pub fn user(user: &User) -> String {
    format!(
        "{} <{}>\n  id: {}\n  role: {}\n  pin code: {}\n",
        user.name, user.email, user.id, user.role, user.pin_code
    )
}

pub fn restaurants(restaurants: &[Restaurant]) -> String {
    if restaurants.is_empty() {
        return "No restaurants found.\n".to_string();
    }
    let mut out = String::new();
    for r in restaurants {
        let ordering = if r.is_ordering_enabled { "open" } else { "not taking orders" };
        let _ = writeln!(out, "#{:<4} {:<30} {}  ({})", r.id, r.name, r.pin_code, ordering);
    }
    out
}

pub fn dishes(dishes: &[Dish]) -> String {
    if dishes.is_empty() {
        return "No dishes.\n".to_string();
    }
    let mut out = String::new();
    for d in dishes {
        let availability = if d.available { "" } else { "  [unavailable]" };
        let _ = writeln!(out, "#{:<4} {:<30} {:>10}{}", d.id, d.name, d.price, availability);
    }
    out
}

pub fn cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Your cart is empty.\n".to_string();
    }
    let mut out = String::new();
    if let Some(name) = &cart.restaurant_name {
        let _ = writeln!(out, "Cart from {name}");
    }
    for item in &cart.items {
        let _ = writeln!(
            out,
            "  {:<30} {:>3} x {:>8} = {:>10}",
            item.dish_name, item.quantity, item.price, item.subtotal
        );
    }
    let _ = writeln!(out, "  {:<30} {:>27}", format!("Subtotal ({} items)", cart.item_count), cart.subtotal);
    out
}

pub fn order(order: &Order) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Order #{} ({})", order.id, order.status);
    for item in &order.items {
        let _ = writeln!(
            out,
            "  dish #{:<4} {:>3} x {:>8}",
            item.dish_id, item.quantity, item.price_snapshot
        );
    }
    let _ = writeln!(out, "  delivery fee: {}", order.delivery_fee);
    let _ = writeln!(out, "  platform fee: {}", order.platform_fee);
    let _ = writeln!(out, "  discount:     {}", order.discount_amount);
    let _ = writeln!(out, "  total:        {}", order.total_amount);
    let _ = writeln!(out, "  payment:      {}", order.payment_mode);
    if let Some(created_at) = &order.created_at {
        let _ = writeln!(out, "  placed at:    {created_at}");
    }
    out
}

pub fn order_status(order: &Order) -> String {
    format!("Order #{} is now {}.\n", order.id, order.status)
}

pub fn orders(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "No orders.\n".to_string();
    }
    let mut out = String::new();
    for o in orders {
        let _ = writeln!(
            out,
            "#{:<5} {:<18} {:>10}  {}",
            o.id,
            o.status,
            o.total_amount,
            o.created_at.as_deref().unwrap_or("-")
        );
    }
    out
}

pub fn reorder(response: &ReorderResponse) -> String {
    let mut out = String::new();
    if let Some(message) = &response.message {
        let _ = writeln!(out, "{message}");
    }
    if let Some(note) = &response.note {
        let _ = writeln!(out, "Note: {note}");
    }
    out.push_str(&cart(&response.cart));
    out
}

pub fn complaints(complaints: &[Complaint]) -> String {
    if complaints.is_empty() {
        return "No complaints.\n".to_string();
    }
    let mut out = String::new();
    for c in complaints {
        let _ = writeln!(out, "#{:<4} order #{:<5} [{}] {}", c.id, c.order_id, c.status, c.description);
        if let Some(notes) = &c.resolution_notes {
            let _ = writeln!(out, "      resolution: {notes}");
        }
    }
    out
}

pub fn delivery_partner(partner: &DeliveryPartner) -> String {
    let availability = if partner.available { "available" } else { "unavailable" };
    format!("You are now {availability} for deliveries in {}.\n", partner.pin_code)
}

pub fn admin_restaurants(restaurants: &[AdminRestaurant]) -> String {
    let mut out = String::new();
    for r in restaurants {
        let _ = writeln!(
            out,
            "#{:<4} {:<30} {}  owner: {}  status: {}",
            r.id,
            r.name,
            r.pin_code,
            r.owner_email.as_deref().unwrap_or("-"),
            r.status
        );
    }
    out
}

pub fn offers(offers: &[Offer]) -> String {
    let mut out = String::new();
    for o in offers {
        let scope = o.restaurant_name.as_deref().unwrap_or("all restaurants");
        let _ = writeln!(
            out,
            "#{:<4} {}% off over {} ({}){}{}",
            o.id,
            o.discount_percentage,
            o.min_order_value,
            scope,
            if o.first_time_user_only { " first order only" } else { "" },
            if o.active { "" } else { " [inactive]" }
        );
    }
    out
}

pub fn fees(fees: &[Fee]) -> String {
    let mut out = String::new();
    for f in fees {
        let scope = f.restaurant_name.as_deref().unwrap_or("default");
        let _ = writeln!(
            out,
            "#{:<4} {:<30} delivery {}  platform {}",
            f.id, scope, f.delivery_fee, f.platform_fee
        );
    }
    out
}

pub fn users(users: &[AdminUser]) -> String {
    let mut out = String::new();
    for u in users {
        let _ = writeln!(
            out,
            "#{:<4} {:<24} {:<30} {:<18} {}",
            u.id,
            u.name,
            u.email,
            u.role,
            if u.is_active { "active" } else { "inactive" }
        );
    }
    out
}
