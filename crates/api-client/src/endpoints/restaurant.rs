use crate::{ApiClient, ApiResult, RequestDescriptor};
use api_types::{
    Dish, DishCreate, DishUpdate, Order, OrderStatus, OrderStatusUpdate, OrderingToggle,
    OrderingToggleResponse,
};

/// Endpoints for the owner of a restaurant. The server resolves which
/// restaurant from the token.
pub struct RestaurantApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl RestaurantApi<'_> {
    pub async fn dishes(&self) -> ApiResult<Vec<Dish>> {
        let url = self.client.api_url("restaurant/dishes")?;
        self.client.send_json(RequestDescriptor::get(url)).await
    }

    pub async fn create_dish(&self, dish: &DishCreate) -> ApiResult<Dish> {
        let descriptor =
            RequestDescriptor::post(self.client.api_url("restaurant/dishes")?).json(dish)?;
        self.client.send_json(descriptor).await
    }

    pub async fn update_dish(&self, dish_id: i64, update: &DishUpdate) -> ApiResult<Dish> {
        let url = self.client.api_url(&format!("restaurant/dishes/{dish_id}"))?;
        let descriptor = RequestDescriptor::put(url).json(update)?;
        self.client.send_json(descriptor).await
    }

    /// The server answers 204 with no body.
    pub async fn delete_dish(&self, dish_id: i64) -> ApiResult<()> {
        let url = self.client.api_url(&format!("restaurant/dishes/{dish_id}"))?;
        self.client.send_empty(RequestDescriptor::delete(url)).await
    }

    pub async fn orders(&self) -> ApiResult<Vec<Order>> {
        let url = self.client.api_url("restaurant/orders")?;
        self.client.send_json(RequestDescriptor::get(url)).await
    }

    pub async fn update_order_status(&self, order_id: i64, status: OrderStatus) -> ApiResult<Order> {
        let url = self
            .client
            .api_url(&format!("restaurant/orders/{order_id}/status"))?;
        let descriptor = RequestDescriptor::put(url).json(&OrderStatusUpdate { status })?;
        self.client.send_json(descriptor).await
    }

    pub async fn set_ordering_enabled(&self, enabled: bool) -> ApiResult<OrderingToggleResponse> {
        let descriptor = RequestDescriptor::put(self.client.api_url("restaurant/toggle-ordering")?)
            .json(&OrderingToggle {
                is_ordering_enabled: enabled,
            })?;
        self.client.send_json(descriptor).await
    }
}
