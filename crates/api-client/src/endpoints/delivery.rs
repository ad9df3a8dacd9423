use crate::{ApiClient, ApiResult, RequestDescriptor};
use api_types::{AvailabilityToggle, DeliveryPartner, Order, OrderStatus, OrderStatusUpdate};

/// Delivery-partner endpoints.
pub struct DeliveryApi<'a> {
    pub(crate) client: &'a ApiClient,
}

impl DeliveryApi<'_> {
    pub async fn set_availability(&self, available: bool) -> ApiResult<DeliveryPartner> {
        let descriptor =
            RequestDescriptor::put(self.client.api_url("delivery/toggle-availability")?)
                .json(&AvailabilityToggle { available })?;
        self.client.send_json(descriptor).await
    }

    pub async fn assigned_orders(&self) -> ApiResult<Vec<Order>> {
        let url = self.client.api_url("delivery/assigned-orders")?;
        self.client.send_json(RequestDescriptor::get(url)).await
    }

    pub async fn update_order_status(&self, order_id: i64, status: OrderStatus) -> ApiResult<Order> {
        let url = self
            .client
            .api_url(&format!("delivery/orders/{order_id}/status"))?;
        let descriptor = RequestDescriptor::put(url).json(&OrderStatusUpdate { status })?;
        self.client.send_json(descriptor).await
    }
}
