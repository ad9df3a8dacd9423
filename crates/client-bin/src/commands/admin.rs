//! Platform administration commands.

use api_types::{AdminRestaurantCreate, Amount, FeeCreate, OfferCreate, Role};
use clap::Subcommand;

use crate::app::{AppState, CliResult, OrFail};
use crate::output;

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// List every restaurant
    Restaurants,
    /// Register a restaurant for an owner account
    AddRestaurant {
        #[arg(long)]
        name: String,
        /// User id of the restaurant owner
        #[arg(long)]
        owner: i64,
        #[arg(long)]
        pin_code: String,
    },
    /// List offers
    Offers,
    /// Create an offer, platform-wide unless --restaurant is given
    AddOffer {
        #[arg(long)]
        restaurant: Option<i64>,
        #[arg(long)]
        discount_percentage: Amount,
        #[arg(long, default_value = "0")]
        min_order_value: Amount,
        #[arg(long)]
        first_time_user_only: bool,
        /// Create the offer switched off
        #[arg(long)]
        inactive: bool,
    },
    /// List fee rules
    Fees,
    /// Create a fee rule, the default unless --restaurant is given
    AddFee {
        #[arg(long)]
        restaurant: Option<i64>,
        #[arg(long)]
        delivery_fee: Amount,
        #[arg(long)]
        platform_fee: Amount,
    },
    /// List every user
    Users,
}

pub async fn run(state: &AppState, command: AdminCommand) -> CliResult<()> {
    state.require(&[Role::Admin]).await?;
    let api = state.client.admin();

    match command {
        AdminCommand::Restaurants => {
            let restaurants = api.restaurants().await.or_fail("Could not load restaurants")?;
            state.emit(restaurants.as_slice(), output::admin_restaurants);
        }
        AdminCommand::AddRestaurant {
            name,
            owner,
            pin_code,
        } => {
            let restaurant = api
                .create_restaurant(&AdminRestaurantCreate {
                    name,
                    owner,
                    pin_code,
                    status: None,
                    is_ordering_enabled: None,
                })
                .await
                .or_fail("Could not create the restaurant")?;
            state.emit(std::slice::from_ref(&restaurant), output::admin_restaurants);
        }
        AdminCommand::Offers => {
            let offers = api.offers().await.or_fail("Could not load offers")?;
            state.emit(offers.as_slice(), output::offers);
        }
        AdminCommand::AddOffer {
            restaurant,
            discount_percentage,
            min_order_value,
            first_time_user_only,
            inactive,
        } => {
            let offer = api
                .create_offer(&OfferCreate {
                    restaurant,
                    discount_percentage,
                    min_order_value,
                    first_time_user_only,
                    active: !inactive,
                })
                .await
                .or_fail("Could not create the offer")?;
            state.emit(std::slice::from_ref(&offer), output::offers);
        }
        AdminCommand::Fees => {
            let fees = api.fees().await.or_fail("Could not load fees")?;
            state.emit(fees.as_slice(), output::fees);
        }
        AdminCommand::AddFee {
            restaurant,
            delivery_fee,
            platform_fee,
        } => {
            let fee = api
                .create_fee(&FeeCreate {
                    restaurant,
                    delivery_fee,
                    platform_fee,
                })
                .await
                .or_fail("Could not create the fee rule")?;
            state.emit(std::slice::from_ref(&fee), output::fees);
        }
        AdminCommand::Users => {
            let users = api.users().await.or_fail("Could not load users")?;
            state.emit(users.as_slice(), output::users);
        }
    }
    Ok(())
}
