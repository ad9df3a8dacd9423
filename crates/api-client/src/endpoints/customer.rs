use crate::{ApiClient, ApiResult, RequestDescriptor};
use api_types::{
    Cart, CartAddRequest, CartRemoveRequest, CheckoutRequest, Complaint, ComplaintCreate, Dish,
    Order, PaymentMode, ReorderResponse, Restaurant,
};
use tracing::debug;

/// Customer endpoints.
pub struct CustomerApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl CustomerApi<'_> {
    /// Active restaurants accepting orders, optionally in one pin code.
    pub async fn restaurants(&self, pin_code: Option<&str>) -> ApiResult<Vec<Restaurant>> {
        let descriptor =
            RequestDescriptor::get(self.client.api_url("restaurants")?).query_opt("pin_code", pin_code);
        self.client.send_json(descriptor).await
    }

    /// Available dishes of one restaurant.
    pub async fn menu(&self, restaurant_id: i64) -> ApiResult<Vec<Dish>> {
        let url = self.client.api_url(&format!("restaurants/{restaurant_id}/menu"))?;
        self.client.send_json(RequestDescriptor::get(url)).await
    }

    pub async fn cart(&self) -> ApiResult<Cart> {
        let url = self.client.api_url("cart")?;
        self.client.send_json(RequestDescriptor::get(url)).await
    }

    /// Returns the updated cart.
    pub async fn add_to_cart(&self, dish_id: i64, quantity: u32) -> ApiResult<Cart> {
        debug!(dish_id, quantity, "Adding to cart");
        let descriptor = RequestDescriptor::post(self.client.api_url("cart/add")?)
            .json(&CartAddRequest { dish_id, quantity })?;
        self.client.send_json(descriptor).await
    }

    /// Returns the updated cart.
    pub async fn remove_from_cart(&self, dish_id: i64) -> ApiResult<Cart> {
        debug!(dish_id, "Removing from cart");
        let descriptor = RequestDescriptor::post(self.client.api_url("cart/remove")?)
            .json(&CartRemoveRequest { dish_id })?;
        self.client.send_json(descriptor).await
    }

    /// Turn the cart into an order. Pricing and discounts are the server's.
    pub async fn checkout(&self, payment_mode: PaymentMode, offer_id: Option<i64>) -> ApiResult<Order> {
        let descriptor = RequestDescriptor::post(self.client.api_url("checkout")?).json(
            &CheckoutRequest {
                payment_mode,
                offer_id,
            },
        )?;
        self.client.send_json(descriptor).await
    }

    /// Newest first.
    pub async fn order_history(&self) -> ApiResult<Vec<Order>> {
        let url = self.client.api_url("orders/history")?;
        self.client.send_json(RequestDescriptor::get(url)).await
    }

    pub async fn order(&self, order_id: i64) -> ApiResult<Order> {
        let url = self.client.api_url(&format!("orders/{order_id}"))?;
        self.client.send_json(RequestDescriptor::get(url)).await
    }

    /// Only accepted by the server while the order is `placed`.
    pub async fn cancel_order(&self, order_id: i64) -> ApiResult<Order> {
        let url = self.client.api_url(&format!("orders/{order_id}/cancel"))?;
        self.client.send_json(RequestDescriptor::post(url)).await
    }

    /// Rebuild the cart from a past order at current prices.
    pub async fn reorder(&self, order_id: i64) -> ApiResult<ReorderResponse> {
        let url = self.client.api_url(&format!("orders/{order_id}/reorder"))?;
        self.client.send_json(RequestDescriptor::post(url)).await
    }

    pub async fn create_complaint(&self, order_id: i64, description: &str) -> ApiResult<Complaint> {
        let descriptor = RequestDescriptor::post(self.client.api_url("complaints")?).json(
            &ComplaintCreate {
                order_id,
                description: description.to_string(),
            },
        )?;
        self.client.send_json(descriptor).await
    }

    pub async fn complaints(&self) -> ApiResult<Vec<Complaint>> {
        let url = self.client.api_url("complaints")?;
        self.client.send_json(RequestDescriptor::get(url)).await
    }
}
