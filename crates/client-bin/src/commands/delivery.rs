//! Delivery partner commands.

use api_types::{OrderStatus, Role};
use clap::Subcommand;

use super::Switch;
use crate::app::{AppState, CliResult, OrFail};
use crate::output;

#[derive(Debug, Subcommand)]
pub enum DeliveryCommand {
    /// Go on or off duty
    Availability { state: Switch },
    /// Orders assigned to you
    Orders,
    /// Mark an assigned order out for delivery or delivered
    SetStatus { order_id: i64, status: OrderStatus },
}

pub async fn run(state: &AppState, command: DeliveryCommand) -> CliResult<()> {
    state.require(&[Role::DeliveryPartner]).await?;
    let api = state.client.delivery();

    match command {
        DeliveryCommand::Availability { state: switch } => {
            let partner = api
                .set_availability(switch.enabled())
                .await
                .or_fail("Could not change availability")?;
            state.emit(&partner, output::delivery_partner);
        }
        DeliveryCommand::Orders => {
            let orders = api.assigned_orders().await.or_fail("Could not load orders")?;
            state.emit(orders.as_slice(), output::orders);
        }
        DeliveryCommand::SetStatus { order_id, status } => {
            let order = api
                .update_order_status(order_id, status)
                .await
                .or_fail("Status update failed")?;
            state.emit(&order, output::order_status);
        }
    }
    Ok(())
}
