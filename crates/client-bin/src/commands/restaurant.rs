//! Restaurant owner commands.

use api_types::{Amount, DishCreate, DishUpdate, OrderStatus, Role};
use clap::Subcommand;

use super::Switch;
use crate::app::{AppState, CliError, CliResult, OrFail};
use crate::output;

#[derive(Debug, Subcommand)]
pub enum RestaurantCommand {
    /// List your dishes
    Dishes,
    /// Add a dish to your menu
    AddDish {
        #[arg(long)]
        restaurant_id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: Amount,
        #[arg(long)]
        photo_path: Option<String>,
        /// List the dish as unavailable
        #[arg(long)]
        unavailable: bool,
    },
    /// Change a dish
    UpdateDish {
        dish_id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<Amount>,
        #[arg(long)]
        photo_path: Option<String>,
        #[arg(long)]
        available: Option<Switch>,
    },
    /// Remove a dish
    DeleteDish { dish_id: i64 },
    /// Orders placed with your restaurant
    Orders,
    /// Move an order along (preparing, out_for_delivery, ...)
    SetStatus { order_id: i64, status: OrderStatus },
    /// Start or stop taking orders
    Ordering { state: Switch },
}

pub async fn run(state: &AppState, command: RestaurantCommand) -> CliResult<()> {
    state.require(&[Role::RestaurantOwner]).await?;
    let api = state.client.restaurant();

    match command {
        RestaurantCommand::Dishes => {
            let dishes = api.dishes().await.or_fail("Could not load dishes")?;
            state.emit(dishes.as_slice(), output::dishes);
        }
        RestaurantCommand::AddDish {
            restaurant_id,
            name,
            price,
            photo_path,
            unavailable,
        } => {
            let dish = api
                .create_dish(&DishCreate {
                    restaurant_id,
                    name,
                    price,
                    photo_path,
                    available: !unavailable,
                })
                .await
                .or_fail("Could not add the dish")?;
            state.emit(&dish, |d| format!("Added dish #{} {} at {}.\n", d.id, d.name, d.price));
        }
        RestaurantCommand::UpdateDish {
            dish_id,
            name,
            price,
            photo_path,
            available,
        } => {
            let update = DishUpdate {
                name,
                price,
                photo_path,
                available: available.map(Switch::enabled),
            };
            if update.is_empty() {
                return Err(CliError::Usage("Nothing to update".to_string()));
            }
            let dish = api
                .update_dish(dish_id, &update)
                .await
                .or_fail("Could not update the dish")?;
            state.emit(std::slice::from_ref(&dish), output::dishes);
        }
        RestaurantCommand::DeleteDish { dish_id } => {
            api.delete_dish(dish_id)
                .await
                .or_fail("Could not delete the dish")?;
            state.success(&format!("Deleted dish #{dish_id}."));
        }
        RestaurantCommand::Orders => {
            let orders = api.orders().await.or_fail("Could not load orders")?;
            state.emit(orders.as_slice(), output::orders);
        }
        RestaurantCommand::SetStatus { order_id, status } => {
            let order = api
                .update_order_status(order_id, status)
                .await
                .or_fail("Status update failed")?;
            state.emit(&order, output::order_status);
        }
        RestaurantCommand::Ordering { state: switch } => {
            let response = api
                .set_ordering_enabled(switch.enabled())
                .await
                .or_fail("Could not change ordering")?;
            state.emit(&response, |r| match &r.message {
                Some(message) => format!("{message}\n"),
                None if r.is_ordering_enabled => "Now taking orders.\n".to_string(),
                None => "No longer taking orders.\n".to_string(),
            });
        }
    }
    Ok(())
}
