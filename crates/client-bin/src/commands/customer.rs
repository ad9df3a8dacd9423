//! Customer commands: browsing, cart, checkout, orders and complaints.

use api_types::{PaymentMode, Role};
use clap::Subcommand;

use crate::app::{AppState, CliResult, OrFail};
use crate::output;

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show the cart
    Show,
    /// Add a dish
    Add {
        dish_id: i64,
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
    /// Remove a dish
    Remove { dish_id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// List past orders
    List,
    /// Show one order
    Show { order_id: i64 },
    /// Cancel an order that has not been prepared yet
    Cancel { order_id: i64 },
    /// Put an earlier order's dishes back in the cart
    Reorder { order_id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum ComplaintsCommand {
    /// List your complaints
    List,
    /// Raise a complaint about an order
    Create { order_id: i64, description: String },
}

const CUSTOMER: &[Role] = &[Role::Customer];

pub async fn restaurants(state: &AppState, pin_code: Option<String>) -> CliResult<()> {
    let user = state.require(CUSTOMER).await?;
    let pin_code = pin_code.unwrap_or(user.pin_code);

    let restaurants = state
        .client
        .customer()
        .restaurants(Some(&pin_code))
        .await
        .or_fail("Could not load restaurants")?;
    state.emit(restaurants.as_slice(), output::restaurants);
    Ok(())
}

pub async fn menu(state: &AppState, restaurant_id: i64) -> CliResult<()> {
    state.require(CUSTOMER).await?;
    let dishes = state
        .client
        .customer()
        .menu(restaurant_id)
        .await
        .or_fail("Could not load the menu")?;
    state.emit(dishes.as_slice(), output::dishes);
    Ok(())
}

pub async fn cart(state: &AppState, command: CartCommand) -> CliResult<()> {
    state.require(CUSTOMER).await?;
    let api = state.client.customer();

    let cart = match command {
        CartCommand::Show => api.cart().await.or_fail("Could not load your cart")?,
        CartCommand::Add { dish_id, quantity } => api
            .add_to_cart(dish_id, quantity)
            .await
            .or_fail("Could not add to cart")?,
        CartCommand::Remove { dish_id } => api
            .remove_from_cart(dish_id)
            .await
            .or_fail("Could not remove from cart")?,
    };
    state.emit(&cart, output::cart);
    Ok(())
}

pub async fn checkout(
    state: &AppState,
    payment_mode: PaymentMode,
    offer_id: Option<i64>,
) -> CliResult<()> {
    state.require(CUSTOMER).await?;
    let order = state
        .client
        .customer()
        .checkout(payment_mode, offer_id)
        .await
        .or_fail("Checkout failed")?;
    state.emit(&order, |order| format!("Order placed.\n{}", output::order(order)));
    Ok(())
}

pub async fn orders(state: &AppState, command: OrdersCommand) -> CliResult<()> {
    state.require(CUSTOMER).await?;
    let api = state.client.customer();

    match command {
        OrdersCommand::List => {
            let orders = api.order_history().await.or_fail("Could not load orders")?;
            state.emit(orders.as_slice(), output::orders);
        }
        OrdersCommand::Show { order_id } => {
            let order = api.order(order_id).await.or_fail("Could not load the order")?;
            state.emit(&order, output::order);
        }
        OrdersCommand::Cancel { order_id } => {
            let order = api.cancel_order(order_id).await.or_fail("Cancel failed")?;
            state.emit(&order, output::order_status);
        }
        OrdersCommand::Reorder { order_id } => {
            let response = api.reorder(order_id).await.or_fail("Reorder failed")?;
            state.emit(&response, output::reorder);
        }
    }
    Ok(())
}

pub async fn complaints(state: &AppState, command: ComplaintsCommand) -> CliResult<()> {
    state.require(CUSTOMER).await?;
    let api = state.client.customer();

    match command {
        ComplaintsCommand::List => {
            let complaints = api.complaints().await.or_fail("Could not load complaints")?;
            state.emit(complaints.as_slice(), output::complaints);
        }
        ComplaintsCommand::Create {
            order_id,
            description,
        } => {
            let complaint = api
                .create_complaint(order_id, &description)
                .await
                .or_fail("Could not file the complaint")?;
            state.emit(&complaint, |c| {
                format!("Complaint #{} filed for order #{}.\n", c.id, c.order_id)
            });
        }
    }
    Ok(())
}
